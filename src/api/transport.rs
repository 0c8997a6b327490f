//! The single HTTP primitive behind every client call.
//!
//! # Responsibilities
//! - Build the request (JSON content type, bearer token, request ID)
//! - Issue exactly one attempt
//! - Classify the outcome into [`ApiFailure`] once, so nothing downstream
//!   looks at raw status codes or transport errors
//!
//! # Classification
//! ```text
//! 2xx                        → body decoded into T (mismatch → InvalidPayload)
//! 401                        → Unauthorized
//! 404                        → NotFound
//! other non-2xx              → Server { status, message from body if readable }
//! send error, 2xx read error → Network
//! ```

use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::api::endpoints::{Endpoint, EndpointInfo, Verb};
use crate::api::types::{ApiFailure, ApiResult, ClientError};
use crate::config::BackendConfig;
use crate::observability::metrics;

/// Header carrying the per-request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Raw reply to a diagnostic probe.
#[derive(Debug, Clone)]
pub struct ProbeReply {
    pub status: u16,
    pub elapsed: Duration,
    /// How the pipeline would classify this reply, `None` for 2xx.
    pub failure: Option<ApiFailure>,
}

/// Shared HTTP connection pool plus the backend origin.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
}

impl Transport {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a JSON request (or a bodiless one when `body` is `None`).
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<T>,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> ApiResult<T> {
        let mut request = self
            .http
            .request(endpoint.verb.into(), self.url(endpoint.path))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.json(body);
        }

        self.dispatch(endpoint, token, request).await
    }

    /// Send a multipart form. The form sets its own content type.
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<T>,
        token: Option<&str>,
        form: reqwest::multipart::Form,
    ) -> ApiResult<T> {
        let request = self
            .http
            .request(endpoint.verb.into(), self.url(endpoint.path))
            .multipart(form);

        self.dispatch(endpoint, token, request).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<T>,
        token: Option<&str>,
        mut request: RequestBuilder,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4();
        request = request.header(REQUEST_ID_HEADER, request_id.to_string());
        if endpoint.auth {
            if let Some(token) = token {
                request = request.bearer_auth(token);
            }
        }

        tracing::debug!(
            endpoint = endpoint.name,
            method = %endpoint.verb,
            path = endpoint.path,
            request_id = %request_id,
            authenticated = endpoint.auth && token.is_some(),
            "Sending request"
        );

        let started = Instant::now();
        let result = match request.send().await {
            Ok(response) => read_response(endpoint.path, response).await,
            Err(e) => Err(ApiFailure::Network {
                detail: e.to_string(),
            }),
        };
        metrics::record_request_duration(endpoint.name, started.elapsed());

        match &result {
            Ok(_) => tracing::debug!(
                endpoint = endpoint.name,
                request_id = %request_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Request succeeded"
            ),
            Err(failure) => tracing::debug!(
                endpoint = endpoint.name,
                request_id = %request_id,
                kind = %failure.kind(),
                status = ?failure.status(),
                error = %failure,
                detail = ?network_detail(failure),
                "Request failed"
            ),
        }

        result
    }

    /// Issue a bare request with `verb` and report the status without
    /// decoding the body. POST probes carry an empty JSON object.
    pub async fn probe(
        &self,
        endpoint: &EndpointInfo,
        verb: Verb,
        token: Option<&str>,
    ) -> ApiResult<ProbeReply> {
        let mut request = self
            .http
            .request(verb.into(), self.url(endpoint.path))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());
        if verb == Verb::Post {
            request = request.body("{}");
        }
        if endpoint.auth {
            if let Some(token) = token {
                request = request.bearer_auth(token);
            }
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| ApiFailure::Network {
            detail: e.to_string(),
        })?;
        let status = response.status();
        let failure = if status.is_success() {
            None
        } else {
            let body = error_body(endpoint.path, response).await;
            Some(classify_status(endpoint.path, status, &body))
        };

        Ok(ProbeReply {
            status: status.as_u16(),
            elapsed: started.elapsed(),
            failure,
        })
    }
}

fn network_detail(failure: &ApiFailure) -> Option<&str> {
    match failure {
        ApiFailure::Network { detail } => Some(detail),
        _ => None,
    }
}

async fn read_response<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = error_body(path, response).await;
        return Err(classify_status(path, status, &body));
    }

    let body = response.bytes().await.map_err(|e| ApiFailure::Network {
        detail: e.to_string(),
    })?;
    serde_json::from_slice(&body).map_err(|e| ApiFailure::InvalidPayload {
        path: path.to_string(),
        detail: e.to_string(),
    })
}

/// Body of a non-2xx reply. The status alone decides the failure kind, so an
/// unreadable body only loses the server message.
async fn error_body(path: &str, response: reqwest::Response) -> Vec<u8> {
    let status = response.status();
    match response.bytes().await {
        Ok(body) => body.to_vec(),
        Err(e) => {
            tracing::debug!(
                path,
                status = status.as_u16(),
                error = %e,
                "Failed to read error response body"
            );
            Vec::new()
        }
    }
}

/// Map a non-2xx reply to its failure kind.
pub fn classify_status(path: &str, status: StatusCode, body: &[u8]) -> ApiFailure {
    match status {
        StatusCode::UNAUTHORIZED => ApiFailure::Unauthorized,
        StatusCode::NOT_FOUND => ApiFailure::NotFound {
            path: path.to_string(),
        },
        other => ApiFailure::Server {
            status: other.as_u16(),
            message: server_message(body),
        },
    }
}

/// `message`, else `error`, from a JSON error body.
fn server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
