use crate::model::Post;
use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum PostsAction {
    /// Replace the whole collection.
    SetPosts(Vec<Post>),
    /// Append to the end of the collection. Duplicate ids are not checked.
    AddPosts(Vec<Post>),
    SetLoading(bool),
    SetError(Option<String>),
    IncrementPage,
}

impl Action for PostsAction {}
