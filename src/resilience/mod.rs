//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → api::transport (one attempt, classify failure into FailureKind)
//!     → policy.rs (endpoint's Fallback decides: surface or substitute)
//!     → Envelope { Live | Substituted | Failed }
//! ```
//!
//! # Design Decisions
//! - One attempt per call; no retries, backoff or circuit breaking
//! - Policies dispatch on FailureKind, never on raw status codes
//! - The policy is part of each endpoint descriptor, not the call site

pub mod policy;

pub use policy::{Fallback, PolicyKind, SubstituteFn};
