//! Backend probing for operational diagnostics.
//!
//! # Responsibilities
//! - Check `GET /health`
//! - Sweep the read-only endpoints and report status, latency and the
//!   failure kind the pipeline would assign
//! - Optionally probe every route with several verbs, so a route that
//!   exists under another verb (405) is told apart from a missing one (404)
//!
//! The default sweep only sends GET to GET endpoints; POST endpoints have
//! side effects (login, chat, upload) or expect a body. Verb sweeps are
//! opt-in and send an empty JSON object on POST.

use std::time::Duration;

use serde_json::Value;

use crate::api::endpoints::{catalog, EndpointInfo, Verb};
use crate::api::{ApiClient, ApiFailure, Envelope};

/// Result of probing one endpoint with one verb.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub endpoint: EndpointInfo,
    /// Verb actually sent, which may differ from the endpoint's own.
    pub verb: Verb,
    pub status: ProbeStatus,
}

#[derive(Debug, Clone)]
pub enum ProbeStatus {
    /// 2xx.
    Ok { status: u16, elapsed: Duration },
    /// 405: the route exists but not for this verb.
    WrongVerb { elapsed: Duration },
    /// Answered with another non-2xx status.
    Rejected {
        elapsed: Duration,
        failure: ApiFailure,
    },
    /// No HTTP answer at all.
    Unreachable(ApiFailure),
}

impl ProbeStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeStatus::Ok { .. })
    }
}

/// `GET /health`.
pub async fn check_health(client: &ApiClient) -> Envelope<Value> {
    let envelope = client.health().await;
    match &envelope {
        Envelope::Failed(failure) => {
            tracing::warn!(error = %failure, kind = %failure.kind(), "Backend health check failed");
        }
        _ => tracing::info!("Backend health check passed"),
    }
    envelope
}

/// Probe every GET endpoint, sequentially, with the stored token.
pub async fn sweep(client: &ApiClient) -> Vec<ProbeReport> {
    let token = client.session().token();
    let mut reports = Vec::new();

    for endpoint in catalog().into_iter().filter(|e| e.verb == Verb::Get) {
        reports.push(probe_one(client, endpoint, Verb::Get, token.as_deref()).await);
    }

    reports
}

/// Probe every endpoint's path once per verb in `verbs`, sequentially.
pub async fn sweep_verbs(client: &ApiClient, verbs: &[Verb]) -> Vec<ProbeReport> {
    let token = client.session().token();
    let mut reports = Vec::new();

    for endpoint in catalog() {
        for &verb in verbs {
            reports.push(probe_one(client, endpoint, verb, token.as_deref()).await);
        }
    }

    reports
}

async fn probe_one(
    client: &ApiClient,
    endpoint: EndpointInfo,
    verb: Verb,
    token: Option<&str>,
) -> ProbeReport {
    let status = match client.transport().probe(&endpoint, verb, token).await {
        Ok(reply) => match reply.failure {
            None => ProbeStatus::Ok {
                status: reply.status,
                elapsed: reply.elapsed,
            },
            Some(_) if reply.status == 405 => ProbeStatus::WrongVerb {
                elapsed: reply.elapsed,
            },
            Some(failure) => ProbeStatus::Rejected {
                elapsed: reply.elapsed,
                failure,
            },
        },
        Err(failure) => ProbeStatus::Unreachable(failure),
    };

    tracing::debug!(
        endpoint = endpoint.name,
        verb = %verb,
        ok = status.is_ok(),
        "Probed endpoint"
    );
    ProbeReport {
        endpoint,
        verb,
        status,
    }
}
