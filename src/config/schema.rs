//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default backend origin.
pub const DEFAULT_BASE_URL: &str = "https://biz-pilot-ai.onrender.com";

/// Root configuration for the API client.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend connection settings.
    pub backend: BackendConfig,

    /// Where the session token and user are persisted.
    pub session: SessionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend origin (e.g., "https://biz-pilot-ai.onrender.com").
    pub base_url: String,

    /// Total request timeout in seconds. `None` leaves the transport default.
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: format!("bizpilot-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Session store backend.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// JSON file on disk, survives restarts.
    #[default]
    File,
    /// Process memory only.
    Memory,
}

/// Session persistence settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub store: StoreKind,

    /// Path of the session file when `store = "file"`.
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::File,
            path: ".bizpilot/session.json".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
