//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! api::transport / api::client produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (request counters, latency histogram)
//!
//! Consumers:
//!     → stderr (binaries install the fmt subscriber)
//!     → whatever metrics recorder the host process installs
//! ```
//!
//! # Design Decisions
//! - Transport log lines carry the request ID sent as `x-request-id`
//! - Every substitution is logged at warn with the failure it replaced

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
