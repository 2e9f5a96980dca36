//! Post collection store.
//!
//! [`PostsReducer`] is the pure transition function; [`PostStore`] is the
//! shared, lock-protected container callers hold on to.

mod action;
mod reducer;
mod search;
mod state;
mod store;

pub use action::PostsAction;
pub use reducer::PostsReducer;
pub use search::filter_by_title;
pub use state::PostsState;
pub use store::{PostStore, RequestTicket};
