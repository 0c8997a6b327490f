//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the backend origin is an absolute http(s) URL
//! - Validate value ranges (timeouts > 0, non-empty paths, known log levels)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::{ClientConfig, StoreKind};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("backend.base_url '{url}' is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("backend.base_url must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("backend.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("session.path must not be empty when session.store = \"file\"")]
    EmptySessionPath,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.backend.base_url) {
        Ok(url) => match url.scheme() {
            "https" => {}
            "http" => {
                tracing::warn!(
                    base_url = %config.backend.base_url,
                    "Backend configured over plain http; tokens will travel unencrypted"
                );
            }
            other => errors.push(ValidationError::UnsupportedScheme(other.to_string())),
        },
        Err(e) => errors.push(ValidationError::InvalidBaseUrl {
            url: config.backend.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.backend.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.session.store == StoreKind::File && config.session.path.trim().is_empty() {
        errors.push(ValidationError::EmptySessionPath);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_plain_http_is_allowed() {
        let mut config = ClientConfig::default();
        config.backend.base_url = "http://localhost:8000".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = ClientConfig::default();
        config.backend.base_url = "not a url".into();
        config.backend.timeout_secs = Some(0);
        config.session.path = "  ".into();
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::InvalidBaseUrl { .. }));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::EmptySessionPath));
        assert!(errors.contains(&ValidationError::InvalidLogLevel("loud".into())));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = ClientConfig::default();
        config.backend.base_url = "ftp://example.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::UnsupportedScheme("ftp".into())]);
    }

    #[test]
    fn test_memory_store_ignores_path() {
        let mut config = ClientConfig::default();
        config.session.store = StoreKind::Memory;
        config.session.path = String::new();
        assert!(validate_config(&config).is_ok());
    }
}
