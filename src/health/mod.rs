//! Backend health diagnostics.
//!
//! Used by the `bizpilot-diag` binary only; the client itself never
//! probes before a call.

pub mod probe;

pub use probe::{check_health, sweep, sweep_verbs, ProbeReport, ProbeStatus};
