//! Token and user lifecycle on top of a [`SessionStore`].

use std::sync::Arc;

use crate::session::store::{SessionStore, StoreError};
use crate::session::types::{Session, User};

/// Store key holding the bearer token.
pub const TOKEN_KEY: &str = "bizpilot_token";

/// Store key holding the JSON-encoded [`User`].
pub const USER_KEY: &str = "bizpilot_user";

/// Sole reader and writer of the persisted session.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Stored bearer token. An empty string counts as no token.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Stored user. Malformed JSON reads as `None`.
    pub fn user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user is malformed, ignoring it");
                None
            }
        }
    }

    /// Token and user together, or `None` if either is missing or malformed.
    pub fn current(&self) -> Option<Session> {
        let token = self.token()?;
        let user = self.user()?;
        Some(Session { token, user })
    }

    /// Whether a token is stored. The token is not checked against the server.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a freshly issued token and its user in one write.
    pub fn establish(&self, token: &str, user: &User) -> Result<(), StoreError> {
        let user_json = serde_json::to_string(user)?;
        self.store
            .put_all(&[(TOKEN_KEY, token), (USER_KEY, user_json.as_str())])?;

        tracing::info!(user_id = %user.id, "Session established");
        Ok(())
    }

    /// Forget the session. Idempotent; store failures are logged and swallowed.
    pub fn clear(&self) {
        match self.store.remove_all(&[TOKEN_KEY, USER_KEY]) {
            Ok(()) => tracing::info!("Session cleared"),
            Err(e) => tracing::warn!(error = %e, "Failed to clear session store"),
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
