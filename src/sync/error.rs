use std::fmt;

use thiserror::Error;

use crate::api::ApiError;
use crate::model::ValidationError;
use crate::session::SessionError;

const NOT_AUTHORIZED: &str = "You are not authorized to perform this action.";

/// The operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOp {
    LoadPosts,
    LoadPost,
    CreatePost,
    UpdatePost,
    DeletePost,
    Login,
    Logout,
}

impl SyncOp {
    /// The message shown to the user when this operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            SyncOp::LoadPosts => "Failed to load posts",
            SyncOp::LoadPost => "Failed to load post",
            SyncOp::CreatePost => "Failed to create post. Please try again.",
            SyncOp::UpdatePost => "Failed to update post. Please try again.",
            SyncOp::DeletePost => "Failed to delete post. Please try again.",
            SyncOp::Login => "Failed to login. Please check your credentials and try again.",
            SyncOp::Logout => "Failed to logout. Please try again.",
        }
    }
}

impl fmt::Display for SyncOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncOp::LoadPosts => "load posts",
            SyncOp::LoadPost => "load post",
            SyncOp::CreatePost => "create post",
            SyncOp::UpdatePost => "update post",
            SyncOp::DeletePost => "delete post",
            SyncOp::Login => "login",
            SyncOp::Logout => "logout",
        };
        f.write_str(name)
    }
}

/// Underlying cause, kept for logs. Callers show [`SyncError::user_message`].
#[derive(Debug, Error)]
pub enum FailureKind {
    #[error("not signed in")]
    NotAuthenticated,

    #[error("teacher or admin capability required")]
    Forbidden,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("login response is missing token or user")]
    IncompleteLogin,
}

#[derive(Debug, Error)]
#[error("{op} failed: {kind}")]
pub struct SyncError {
    pub op: SyncOp,
    #[source]
    pub kind: FailureKind,
}

impl SyncError {
    pub fn new(op: SyncOp, kind: impl Into<FailureKind>) -> Self {
        Self {
            op,
            kind: kind.into(),
        }
    }

    /// Single user-visible string for this failure.
    ///
    /// Validation and permission failures describe themselves; a post
    /// creation rejected with a server `message` shows that message;
    /// everything else collapses to the operation's generic text.
    pub fn user_message(&self) -> String {
        match (&self.kind, self.op) {
            (FailureKind::Validation(e), _) => e.to_string(),
            (FailureKind::NotAuthenticated | FailureKind::Forbidden, _) => {
                NOT_AUTHORIZED.to_string()
            }
            (FailureKind::Api(e), SyncOp::CreatePost) => e
                .server_message()
                .unwrap_or(self.op.failure_message())
                .to_string(),
            _ => self.op.failure_message().to_string(),
        }
    }

    /// True when the failure happened before any request was sent.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self.kind,
            FailureKind::NotAuthenticated | FailureKind::Forbidden | FailureKind::Validation(_)
        )
    }
}
