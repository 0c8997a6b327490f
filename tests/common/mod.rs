//! Shared utilities for integration testing.
//!
//! `MockBackend` is a programmable stand-in for the BizPilot API: replies
//! are registered per (method, path), every request is recorded, and any
//! unregistered route answers 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use bizpilot_client::api::ApiClient;
use bizpilot_client::config::ClientConfig;
use bizpilot_client::session::{MemoryStore, SessionStore};

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Clone, Default)]
struct MockState {
    replies: Arc<Mutex<HashMap<(Method, String), (StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockBackend {
    addr: SocketAddr,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Register the reply for `method path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap();
        self.state
            .replies
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request reached the mock backend")
    }

    /// Client against this backend with an in-memory session store.
    pub fn client(&self) -> ApiClient {
        client_for(&self.url(), Arc::new(MemoryStore::new()))
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        authorization: header_str(header::AUTHORIZATION.as_str()),
        content_type: header_str(header::CONTENT_TYPE.as_str()),
        request_id: header_str("x-request-id"),
        body,
    });

    let reply = state
        .replies
        .lock()
        .unwrap()
        .get(&(method, uri.path().to_string()))
        .cloned();

    match reply {
        Some((status, body)) => (status, axum::Json(body)).into_response(),
        None => (StatusCode::NOT_FOUND, axum::Json(json!({ "detail": "Not Found" }))).into_response(),
    }
}

pub fn client_for(base_url: &str, store: Arc<dyn SessionStore>) -> ApiClient {
    let mut config = ClientConfig::default();
    config.backend.base_url = base_url.to_string();
    ApiClient::new(&config, store).unwrap()
}

/// A local address with nothing listening on it.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Raw backend answering every request with `status_line` and a body that
/// ends before its declared `Content-Length`. Returns the base URL.
pub async fn start_truncated_backend(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: 64\r\nConnection: close\r\n\r\n{{\"mess",
                    status_line
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Client whose backend refuses every connection.
pub async fn offline_client() -> ApiClient {
    client_for(&unreachable_base_url().await, Arc::new(MemoryStore::new()))
}

pub fn auth_body(token: &str, email: &str, full_name: Option<&str>) -> Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "user": {
            "id": "u-1",
            "email": email,
            "full_name": full_name,
        }
    })
}

/// Sign `client` in through `backend`.
pub async fn sign_in(backend: &MockBackend, client: &ApiClient, token: &str) {
    backend.respond(Method::POST, "/login", 200, auth_body(token, "a@b.com", Some("A B")));
    client
        .login("a@b.com", "secret")
        .await
        .into_result()
        .unwrap();
}
