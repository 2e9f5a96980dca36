//! Shared post store with request sequencing.
//!
//! Every fetch takes a [`RequestTicket`]. Only the most recently issued
//! ticket may apply its results, so an older response that resolves late is
//! dropped instead of overwriting newer data or clearing the loading flag.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::mvi::Reducer;
use crate::posts::action::PostsAction;
use crate::posts::reducer::PostsReducer;
use crate::posts::state::PostsState;

/// Handle for one outstanding request against a [`PostStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Thread-safe post collection.
///
/// Cloning yields another handle to the same store. All mutation goes
/// through [`PostsReducer`] under the write lock.
#[derive(Clone, Default)]
pub struct PostStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    state: PostsState,
    /// Sequence number of the latest issued ticket (0 = none yet).
    latest_seq: u64,
}

impl StoreInner {
    fn apply(&mut self, action: PostsAction) {
        let state = std::mem::take(&mut self.state);
        self.state = PostsReducer::reduce(state, action);
    }
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> PostsState {
        self.inner.read().state.clone()
    }

    pub fn dispatch(&self, action: PostsAction) {
        self.inner.write().apply(action);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().state.find(id).is_some()
    }

    /// Start a request: supersedes any outstanding ticket, raises the loading
    /// flag and clears the previous error.
    pub fn begin_request(&self) -> RequestTicket {
        let mut inner = self.inner.write();
        inner.latest_seq += 1;
        inner.apply(PostsAction::SetLoading(true));
        inner.apply(PostsAction::SetError(None));
        RequestTicket {
            seq: inner.latest_seq,
        }
    }

    /// Complete a request.
    ///
    /// If `ticket` is still the latest, applies `actions` in order and then
    /// lowers the loading flag, returning `true`. A superseded ticket changes
    /// nothing and returns `false`.
    pub fn finish(&self, ticket: RequestTicket, actions: Vec<PostsAction>) -> bool {
        let mut inner = self.inner.write();
        if inner.latest_seq != ticket.seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = inner.latest_seq,
                "Discarding stale post store update"
            );
            return false;
        }
        for action in actions {
            inner.apply(action);
        }
        inner.apply(PostsAction::SetLoading(false));
        true
    }
}
