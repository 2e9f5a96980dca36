//! Sync operations: one remote round trip each, translated into store
//! actions.
//!
//! Every operation takes the caller's [`Session`](crate::session::Session)
//! explicitly. Role checks and input validation run before any request is
//! sent. Successful mutations are always followed by a full list refetch;
//! nothing is removed or added locally until the server list confirms it.

mod error;
mod operations;

pub use error::{FailureKind, SyncError, SyncOp};
pub use operations::{login, logout, PostSync};
