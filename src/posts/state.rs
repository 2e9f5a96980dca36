use crate::model::Post;
use crate::mvi::StoreState;

/// Page numbering starts here.
pub const FIRST_PAGE: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct PostsState {
    /// Ordered as last fetched (newest first after a sync).
    pub posts: Vec<Post>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub current_page: u32,
}

impl Default for PostsState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            is_loading: false,
            error: None,
            current_page: FIRST_PAGE,
        }
    }
}

impl StoreState for PostsState {}

impl PostsState {
    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }
}
