use crate::mvi::Reducer;
use crate::posts::action::PostsAction;
use crate::posts::state::PostsState;

pub struct PostsReducer;

impl Reducer for PostsReducer {
    type State = PostsState;
    type Action = PostsAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            PostsAction::SetPosts(posts) => PostsState { posts, ..state },
            PostsAction::AddPosts(more) => {
                let mut posts = state.posts;
                posts.extend(more);
                PostsState { posts, ..state }
            }
            PostsAction::SetLoading(is_loading) => PostsState { is_loading, ..state },
            PostsAction::SetError(error) => PostsState { error, ..state },
            PostsAction::IncrementPage => PostsState {
                current_page: state.current_page.saturating_add(1),
                ..state
            },
        }
    }
}
