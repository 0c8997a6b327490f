//! BizPilot resilient API client library.
//!
//! Wraps the BizPilot HTTP+JSON backend: bearer-token session handling,
//! typed payloads, and a per-endpoint fallback policy that decides when a
//! failed call is answered with substitute data instead.

pub mod api;
pub mod config;
pub mod health;
pub mod observability;
pub mod resilience;
pub mod session;

pub use api::{ApiClient, ApiFailure, Envelope, Outcome};
pub use config::ClientConfig;
pub use session::{Session, User};
