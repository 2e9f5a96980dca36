//! Authenticated session: bearer token plus user profile.
//!
//! The [`SessionStore`] is the only owner of session state. It persists
//! through a [`SessionStorage`] backend and hands out [`Session`] snapshots
//! that callers pass explicitly to the operations that need them.

mod secure;
mod storage;
mod store;

pub use secure::SecureString;
pub use storage::{
    FileStorage, MemoryStorage, SessionStorage, StorageError, TOKEN_KEY, USER_KEY,
};
pub use store::{Session, SessionError, SessionStore};
