use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use crate::model::User;
use crate::session::secure::SecureString;
use crate::session::storage::{SessionStorage, StorageError, TOKEN_KEY, USER_KEY};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode user profile: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Owned snapshot of the session.
///
/// Token and user are always set or cleared together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<SecureString>,
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: SecureString, user: User) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    pub fn token(&self) -> Option<&SecureString> {
        self.token.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Teachers and admins share one capability, carried by `isAdmin`.
    pub fn is_teacher_or_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }
}

/// Sole owner of the session, backed by durable storage.
///
/// Clones share the same state and storage. `login` and `logout` hold the
/// mutation lock across the storage call and the memory swap, so memory and
/// disk always end on the same writer's value.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Session>>,
    storage: Arc<dyn SessionStorage>,
    mutation: Arc<Mutex<()>>,
}

impl SessionStore {
    /// Load the persisted session.
    ///
    /// Both entries must be present and the user must decode; anything else
    /// yields a logged-out store with no user in memory, and the leftover
    /// entry is removed. A corrupt storage file counts as logged out too.
    pub fn restore(storage: Arc<dyn SessionStorage>) -> Result<Self, SessionError> {
        let entries = storage
            .get(TOKEN_KEY)
            .and_then(|token| Ok((token, storage.get(USER_KEY)?)));
        let (token, user_json) = match entries {
            Ok(entries) => entries,
            Err(e @ StorageError::Corrupt { .. }) => {
                tracing::warn!(error = %e, "Discarding corrupt session storage");
                storage.remove_items(&[TOKEN_KEY, USER_KEY])?;
                (None, None)
            }
            Err(e) => return Err(e.into()),
        };

        let session = match (token, user_json) {
            (Some(token), Some(user_json)) => match serde_json::from_str::<User>(&user_json) {
                Ok(user) => {
                    tracing::debug!(user_id = %user.id, "Restored persisted session");
                    Session::authenticated(SecureString::new(token), user)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding persisted session with unreadable user");
                    storage.remove_items(&[TOKEN_KEY, USER_KEY])?;
                    Session::anonymous()
                }
            },
            (None, None) => Session::anonymous(),
            (token, _) => {
                tracing::warn!(
                    has_token = token.is_some(),
                    "Discarding incomplete persisted session"
                );
                storage.remove_items(&[TOKEN_KEY, USER_KEY])?;
                Session::anonymous()
            }
        };

        Ok(Self {
            state: Arc::new(RwLock::new(session)),
            storage,
            mutation: Arc::new(Mutex::new(())),
        })
    }

    /// Persist and activate a session.
    ///
    /// Storage is written first; if that fails the in-memory session is
    /// left untouched and the error is returned.
    pub fn login(&self, token: impl Into<String>, user: User) -> Result<Session, SessionError> {
        let token = token.into();
        let user_json = serde_json::to_string(&user)?;

        let _guard = self.mutation.lock();
        self.storage
            .set_items(&[(TOKEN_KEY, token.clone()), (USER_KEY, user_json)])?;

        let session = Session::authenticated(SecureString::new(token), user);
        *self.state.write() = session.clone();

        tracing::info!(
            user_id = session.user().map(|u| u.id.as_str()).unwrap_or_default(),
            teacher_or_admin = session.is_teacher_or_admin(),
            "Logged in"
        );
        Ok(session)
    }

    /// Clear the session in memory and on disk.
    ///
    /// Memory is cleared even when removal from storage fails.
    pub fn logout(&self) -> Result<(), SessionError> {
        let _guard = self.mutation.lock();
        let removed = self.storage.remove_items(&[TOKEN_KEY, USER_KEY]);
        *self.state.write() = Session::anonymous();
        tracing::info!("Logged out");
        removed.map_err(SessionError::from)
    }

    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    pub fn token(&self) -> Option<SecureString> {
        self.state.read().token().cloned()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn is_teacher_or_admin(&self) -> bool {
        self.state.read().is_teacher_or_admin()
    }
}
