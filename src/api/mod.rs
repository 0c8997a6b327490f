//! BizPilot backend API.
//!
//! # Data Flow
//! ```text
//! ApiClient::analytics() etc.
//!     → session token (session::SessionManager)
//!     → transport.rs (one HTTP attempt, classify into ApiFailure)
//!     → endpoint's Fallback (resilience::policy)
//!         → substitute.rs on a declared failure kind
//!     → Envelope { Live | Substituted | Failed }
//! ```

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod models;
pub mod substitute;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use endpoints::{catalog, Endpoint, EndpointInfo, Verb};
pub use envelope::{Envelope, Outcome};
pub use types::{ApiFailure, ApiResult, ClientError, FailureKind};
