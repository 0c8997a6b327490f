//! Session value types.

use serde::{Deserialize, Serialize};

use crate::api::models::BackendUser;

/// The signed-in user as the client persists and exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Display name.
    pub name: String,
}

impl From<&BackendUser> for User {
    fn from(user: &BackendUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: display_name(user.full_name.as_deref(), &user.email),
        }
    }
}

/// A persisted token together with the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Full name when present and non-blank, otherwise the local part of the email.
pub fn display_name(full_name: Option<&str>, email: &str) -> String {
    match full_name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => email.split('@').next().unwrap_or(email).to_string(),
    }
}
