use crate::api::ApiClient;
use crate::model::{sort_newest_first, Credentials, Post, PostDraft, PostPatch};
use crate::posts::{PostStore, PostsAction, RequestTicket};
use crate::session::{SecureString, Session, SessionStore};
use crate::sync::error::{FailureKind, SyncError, SyncOp};

/// Post operations bound to one [`PostStore`].
#[derive(Clone)]
pub struct PostSync {
    api: ApiClient,
    store: PostStore,
}

impl PostSync {
    pub fn new(api: ApiClient, store: PostStore) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// Fetch the full list, newest first, and replace the collection.
    pub async fn refresh(&self, session: &Session) -> Result<(), SyncError> {
        let ticket = self.store.begin_request();
        let result = self.fetch_sorted(session).await;
        self.settle(ticket, SyncOp::LoadPosts, result)
    }

    /// Fetch one post for a detail view.
    ///
    /// The list store is never touched; a failure belongs to the detail view
    /// and is only returned to the caller.
    pub async fn fetch_post(&self, id: &str) -> Result<Post, SyncError> {
        self.api.get_post(id).await.map_err(|e| {
            let err = SyncError::new(SyncOp::LoadPost, e);
            log_failure(&err);
            err
        })
    }

    pub async fn create_post(&self, session: &Session, draft: &PostDraft) -> Result<(), SyncError> {
        let op = SyncOp::CreatePost;
        let token = require_teacher_or_admin(session).map_err(|k| SyncError::new(op, k))?;
        draft.validate().map_err(|e| SyncError::new(op, e))?;

        let ticket = self.store.begin_request();
        let result = self.create_then_fetch(session, token, draft).await;
        self.settle(ticket, op, result)
    }

    pub async fn update_post(
        &self,
        session: &Session,
        id: &str,
        patch: &PostPatch,
    ) -> Result<(), SyncError> {
        let op = SyncOp::UpdatePost;
        let token = require_teacher_or_admin(session).map_err(|k| SyncError::new(op, k))?;
        patch.validate().map_err(|e| SyncError::new(op, e))?;

        let ticket = self.store.begin_request();
        let result = self.update_then_fetch(session, token, id, patch).await;
        self.settle(ticket, op, result)
    }

    /// Delete on the server, then resync. The post stays in the store until
    /// a successful refetch no longer lists it.
    pub async fn delete_post(&self, session: &Session, id: &str) -> Result<(), SyncError> {
        let op = SyncOp::DeletePost;
        let token = require_teacher_or_admin(session).map_err(|k| SyncError::new(op, k))?;

        let ticket = self.store.begin_request();
        let result = self.delete_then_fetch(session, token, id).await;
        self.settle(ticket, op, result)
    }

    async fn fetch_sorted(&self, session: &Session) -> Result<Vec<Post>, FailureKind> {
        let mut posts = self.api.list_posts(session.token()).await?;
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn create_then_fetch(
        &self,
        session: &Session,
        token: &SecureString,
        draft: &PostDraft,
    ) -> Result<Vec<Post>, FailureKind> {
        self.api.create_post(token, draft).await?;
        tracing::info!(title = %draft.title, "Post created");
        self.fetch_sorted(session).await
    }

    async fn update_then_fetch(
        &self,
        session: &Session,
        token: &SecureString,
        id: &str,
        patch: &PostPatch,
    ) -> Result<Vec<Post>, FailureKind> {
        self.api.update_post(token, id, patch).await?;
        tracing::info!(post_id = id, "Post updated");
        self.fetch_sorted(session).await
    }

    async fn delete_then_fetch(
        &self,
        session: &Session,
        token: &SecureString,
        id: &str,
    ) -> Result<Vec<Post>, FailureKind> {
        self.api.delete_post(token, id).await?;
        tracing::info!(post_id = id, "Post deleted");
        self.fetch_sorted(session).await
    }

    /// Apply the outcome of a ticketed request to the store.
    fn settle(
        &self,
        ticket: RequestTicket,
        op: SyncOp,
        result: Result<Vec<Post>, FailureKind>,
    ) -> Result<(), SyncError> {
        match result {
            Ok(posts) => {
                let count = posts.len();
                if self.store.finish(ticket, vec![PostsAction::SetPosts(posts)]) {
                    tracing::debug!(%op, count, seq = ticket.seq(), "Post list synced");
                }
                Ok(())
            }
            Err(kind) => {
                let err = SyncError::new(op, kind);
                log_failure(&err);
                self.store.finish(
                    ticket,
                    vec![PostsAction::SetError(Some(err.user_message()))],
                );
                Err(err)
            }
        }
    }
}

/// Exchange credentials for a token and persist the session.
pub async fn login(
    api: &ApiClient,
    sessions: &SessionStore,
    credentials: &Credentials,
) -> Result<Session, SyncError> {
    let op = SyncOp::Login;
    credentials.validate().map_err(|e| SyncError::new(op, e))?;

    let resp = api.login(credentials).await.map_err(|e| {
        let err = SyncError::new(op, e);
        log_failure(&err);
        err
    })?;

    let (Some(token), Some(user)) = (resp.token, resp.user) else {
        let err = SyncError::new(op, FailureKind::IncompleteLogin);
        log_failure(&err);
        return Err(err);
    };

    sessions
        .login(token, user)
        .map_err(|e| SyncError::new(op, e))
}

pub fn logout(sessions: &SessionStore) -> Result<(), SyncError> {
    sessions
        .logout()
        .map_err(|e| SyncError::new(SyncOp::Logout, e))
}

fn require_teacher_or_admin(session: &Session) -> Result<&SecureString, FailureKind> {
    let token = session.token().ok_or(FailureKind::NotAuthenticated)?;
    if !session.is_teacher_or_admin() {
        return Err(FailureKind::Forbidden);
    }
    Ok(token)
}

fn log_failure(err: &SyncError) {
    let api_kind = match &err.kind {
        FailureKind::Api(e) => e.kind(),
        _ => "",
    };
    tracing::warn!(op = %err.op, api_kind, error = %err.kind, "Sync operation failed");
}
