//! Public API client.
//!
//! # Responsibilities
//! - Own the session and the transport
//! - Expose one method per backend capability
//! - Apply each endpoint's fallback policy and report the outcome
//!
//! Construct it once at startup and share it (`Arc<ApiClient>` or `&ApiClient`);
//! it holds no per-call state.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::api::endpoints::{
    Endpoint, ALERTS, ANALYTICS, CHAT, CUSTOMERS, FILES, FORECAST, HEALTH, LOGIN, PROFILE,
    REPORTS, SIGNUP, UPLOAD,
};
use crate::api::envelope::{Envelope, Outcome};
use crate::api::models::{
    AlertItem, AnalyticsData, AuthResponse, ChatResponse, CustomerData, FileItem, ForecastData,
    Report, UploadResponse,
};
use crate::api::transport::Transport;
use crate::api::types::{ApiFailure, ClientError};
use crate::config::{ClientConfig, StoreKind};
use crate::observability::metrics;
use crate::session::{FileStore, MemoryStore, Session, SessionManager, SessionStore, User};

/// Resilient client for the BizPilot backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Transport,
    session: SessionManager,
}

impl ApiClient {
    /// Build a client around an explicit session store.
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let transport = Transport::new(&config.backend)?;
        tracing::info!(base_url = %transport.base_url(), "API client initialized");

        Ok(Self {
            transport,
            session: SessionManager::new(store),
        })
    }

    /// Build a client with the session store named in the config.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let store: Arc<dyn SessionStore> = match config.session.store {
            StoreKind::File => Arc::new(FileStore::new(&config.session.path)),
            StoreKind::Memory => Arc::new(MemoryStore::new()),
        };
        Self::new(config, store)
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    pub fn get_session(&self) -> Option<Session> {
        self.session.current()
    }

    pub fn get_user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// `POST /login`. Persists the session on success.
    pub async fn login(&self, email: &str, password: &str) -> Envelope<AuthResponse> {
        let body = json!({ "email": email, "password": password });
        let envelope = self.call(&LOGIN, Some(body)).await;
        self.establish(envelope)
    }

    /// `POST /signup`. Persists the session on success.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Envelope<AuthResponse> {
        let body = json!({ "name": name, "email": email, "password": password });
        let envelope = self.call(&SIGNUP, Some(body)).await;
        self.establish(envelope)
    }

    /// Forget the stored session. Never fails.
    pub fn logout(&self) {
        self.session.clear();
    }

    fn establish(&self, envelope: Envelope<AuthResponse>) -> Envelope<AuthResponse> {
        let response = match envelope {
            Envelope::Live(response) => response,
            other => return other,
        };

        let user = User::from(&response.user);
        match self.session.establish(&response.access_token, &user) {
            Ok(()) => Envelope::Live(response),
            Err(e) => {
                tracing::error!(error = %e, "Login succeeded but session could not be stored");
                self.session.clear();
                Envelope::Failed(ApiFailure::SessionStorage(e.to_string()))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Data endpoints
    // -----------------------------------------------------------------------

    /// `GET /me`. Strict: identity data is never substituted.
    pub async fn profile(&self) -> Envelope<User> {
        self.call(&PROFILE, None).await.map(|user| User::from(&user))
    }

    pub async fn analytics(&self) -> Envelope<AnalyticsData> {
        self.call(&ANALYTICS, None).await
    }

    /// `POST /forecast` with `{"period": ..}`, or `{}` when no period is given.
    pub async fn forecast(&self, period: Option<&str>) -> Envelope<ForecastData> {
        let body = match period {
            Some(period) => json!({ "period": period }),
            None => json!({}),
        };
        self.call(&FORECAST, Some(body)).await
    }

    pub async fn files(&self) -> Envelope<Vec<FileItem>> {
        self.call(&FILES, None).await
    }

    pub async fn reports(&self) -> Envelope<Vec<Report>> {
        self.call(&REPORTS, None).await
    }

    pub async fn customers(&self) -> Envelope<CustomerData> {
        self.call(&CUSTOMERS, None).await
    }

    pub async fn alerts(&self) -> Envelope<Vec<AlertItem>> {
        self.call(&ALERTS, None).await
    }

    /// `POST /llm`. Any failure yields a canned reply matched to `message`.
    pub async fn chat(&self, message: &str) -> Envelope<ChatResponse> {
        self.call(&CHAT, Some(json!({ "message": message }))).await
    }

    /// `POST /upload-sales-data` as multipart field `file`. Strict.
    pub async fn upload_sales_data(&self, file_name: &str, contents: Vec<u8>) -> Envelope<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(contents).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let token = self.session.token();
        let result = self
            .transport
            .send_multipart(&UPLOAD, token.as_deref(), form)
            .await;
        let envelope = UPLOAD.fallback.resolve(result, &Value::Null);
        observe(&UPLOAD, &envelope);
        envelope
    }

    /// `GET /health`, unauthenticated. Used by diagnostics.
    pub async fn health(&self) -> Envelope<Value> {
        self.call(&HEALTH, None).await
    }

    async fn call<T: DeserializeOwned>(&self, endpoint: &Endpoint<T>, body: Option<Value>) -> Envelope<T> {
        let token = self.session.token();
        let result = self
            .transport
            .send_json(endpoint, token.as_deref(), body.as_ref())
            .await;

        let request = body.unwrap_or(Value::Null);
        let envelope = endpoint.fallback.resolve(result, &request);
        observe(endpoint, &envelope);
        envelope
    }
}

fn observe<T>(endpoint: &Endpoint<T>, envelope: &Envelope<T>) {
    let outcome = envelope.outcome();
    metrics::record_request(endpoint.name, outcome.as_str());

    match outcome {
        Outcome::Succeeded => {}
        Outcome::FailedSubstituted => {
            if let Some(cause) = envelope.substitution_cause() {
                tracing::warn!(
                    endpoint = endpoint.name,
                    policy = %endpoint.fallback.kind(),
                    kind = %cause.kind(),
                    error = %cause,
                    "Serving substitute data"
                );
            }
        }
        Outcome::FailedStrict => {
            if let Some(failure) = envelope.failure() {
                tracing::warn!(
                    endpoint = endpoint.name,
                    policy = %endpoint.fallback.kind(),
                    kind = %failure.kind(),
                    error = %failure,
                    "Request failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client() -> ApiClient {
        let mut config = ClientConfig::default();
        config.backend.base_url = "http://127.0.0.1:1".into();
        ApiClient::new(&config, Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_new_client_is_signed_out() {
        let client = offline_client();
        assert!(!client.is_authenticated());
        assert!(client.get_session().is_none());
        assert!(client.get_user().is_none());
    }

    #[test]
    fn test_from_config_memory_store() {
        let mut config = ClientConfig::default();
        config.session.store = StoreKind::Memory;
        let client = ApiClient::from_config(&config).unwrap();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_unreachable_backend_by_policy() {
        let client = offline_client();

        let analytics = client.analytics().await;
        assert!(matches!(analytics.failure(), Some(ApiFailure::Network { .. })));

        let chat = client.chat("help").await;
        assert!(chat.is_substitute());

        let profile = client.profile().await;
        assert_eq!(profile.outcome(), Outcome::FailedStrict);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let client = offline_client();
        client.logout();
        client.logout();
        assert!(!client.is_authenticated());
    }
}
