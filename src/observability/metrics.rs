//! Metrics collection.
//!
//! # Metrics
//! - `bizpilot_requests_total` (counter): calls by endpoint and outcome
//!   (`succeeded`, `substituted`, `failed`)
//! - `bizpilot_request_duration_seconds` (histogram): backend round-trip
//!   latency by endpoint
//!
//! # Design Decisions
//! - Emits through the `metrics` facade only; the host process decides
//!   whether to install a recorder/exporter
//! - Labels are static endpoint names, never user data

use std::time::Duration;

/// Count one completed client call.
pub fn record_request(endpoint: &'static str, outcome: &'static str) {
    metrics::counter!(
        "bizpilot_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record backend round-trip latency for one call.
pub fn record_request_duration(endpoint: &'static str, elapsed: Duration) {
    metrics::histogram!(
        "bizpilot_request_duration_seconds",
        "endpoint" => endpoint
    )
    .record(elapsed.as_secs_f64());
}
