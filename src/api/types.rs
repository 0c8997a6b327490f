//! Failure taxonomy shared by the request pipeline and fallback policies.

use std::fmt;

use thiserror::Error;

/// Fieldless discriminant of [`ApiFailure`]. Fallback policies match on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Network,
    Unauthorized,
    NotFound,
    Server,
    InvalidPayload,
    SessionStorage,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Network => "network",
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::NotFound => "not_found",
            FailureKind::Server => "server",
            FailureKind::InvalidPayload => "invalid_payload",
            FailureKind::SessionStorage => "session_storage",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified client failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiFailure {
    /// DNS, connect, TLS, timeout or body-read failure.
    #[error("network error occurred")]
    Network { detail: String },

    /// The backend answered 401.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend answered 404.
    #[error("endpoint not found: {path}")]
    NotFound { path: String },

    /// Any other non-2xx status.
    #[error("{}", server_message(.status, .message))]
    Server { status: u16, message: Option<String> },

    /// A 2xx body that does not match the endpoint's record type.
    #[error("invalid payload from {path}: {detail}")]
    InvalidPayload { path: String, detail: String },

    /// Login or signup succeeded but the session could not be persisted.
    #[error("failed to persist session: {0}")]
    SessionStorage(String),
}

fn server_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("request failed with status {status}"),
    }
}

impl ApiFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiFailure::Network { .. } => FailureKind::Network,
            ApiFailure::Unauthorized => FailureKind::Unauthorized,
            ApiFailure::NotFound { .. } => FailureKind::NotFound,
            ApiFailure::Server { .. } => FailureKind::Server,
            ApiFailure::InvalidPayload { .. } => FailureKind::InvalidPayload,
            ApiFailure::SessionStorage(_) => FailureKind::SessionStorage,
        }
    }

    /// HTTP status behind the failure, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiFailure::Unauthorized => Some(401),
            ApiFailure::NotFound { .. } => Some(404),
            ApiFailure::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for a single backend round trip.
pub type ApiResult<T> = Result<T, ApiFailure>;

/// Errors constructing an [`ApiClient`](crate::api::ApiClient).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiFailure::Network {
            detail: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "network error occurred");

        assert_eq!(ApiFailure::Unauthorized.to_string(), "unauthorized");

        let err = ApiFailure::NotFound {
            path: "/files".into(),
        };
        assert_eq!(err.to_string(), "endpoint not found: /files");

        let err = ApiFailure::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "request failed with status 500");

        let err = ApiFailure::Server {
            status: 422,
            message: Some("Email already registered".into()),
        };
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_kind_and_status() {
        assert_eq!(ApiFailure::Unauthorized.kind(), FailureKind::Unauthorized);
        assert_eq!(ApiFailure::Unauthorized.status(), Some(401));

        let err = ApiFailure::Server {
            status: 405,
            message: None,
        };
        assert_eq!(err.kind(), FailureKind::Server);
        assert_eq!(err.status(), Some(405));

        let err = ApiFailure::SessionStorage("disk full".into());
        assert_eq!(err.kind().as_str(), "session_storage");
        assert_eq!(err.status(), None);
    }
}
