//! Reqwest-backed API client with transparent session recovery.
//!
//! The client injects the stored bearer token into every authenticated
//! request and routes failures through the [`SessionGuard`], so an expired
//! credential looks like a slow success to callers rather than an error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info};

use noteflow_core::{defaults, Credential, Error, Label, Note, Result};

use crate::auth::{AuthStore, HttpTokenRefresher, InMemoryAuthStore};
use crate::guard::{ReplayTransport, RequestContext, SessionGuard};

/// Builder for [`ApiClient`] instances.
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
}

impl ApiClientBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL (e.g. "https://api.noteflow.app").
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the overall request timeout.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Override the connect timeout.
    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = Some(secs);
        self
    }

    /// Build the client with a fresh in-memory auth store.
    pub fn build(self) -> Result<ApiClient> {
        self.build_with_auth(Arc::new(InMemoryAuthStore::new()))
    }

    /// Build the client around an existing auth store (e.g. one shared with
    /// a platform keychain wrapper).
    pub fn build_with_auth(self, auth: Arc<dyn AuthStore>) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| defaults::API_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        reqwest::Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {base_url}: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(
                self.request_timeout_secs
                    .unwrap_or(defaults::REQUEST_TIMEOUT_SECS),
            ))
            .connect_timeout(Duration::from_secs(
                self.connect_timeout_secs
                    .unwrap_or(defaults::CONNECT_TIMEOUT_SECS),
            ))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        let refresher = Arc::new(HttpTokenRefresher::new(
            client.clone(),
            format!("{base_url}{}", defaults::REFRESH_PATH),
        ));
        let guard = SessionGuard::new(Arc::clone(&auth), refresher);

        Ok(ApiClient {
            client,
            base_url,
            auth,
            guard,
        })
    }
}

/// Authenticated HTTP client for the NoteFlow backend.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthStore>,
    guard: SessionGuard,
}

impl ApiClient {
    /// Start building a client.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Create a client from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `NOTEFLOW_API_BASE` | production base URL | API base URL |
    /// | `NOTEFLOW_REQUEST_TIMEOUT_SECS` | 30 | Overall request timeout |
    pub fn from_env() -> Result<Self> {
        let mut builder = ApiClientBuilder::new();
        if let Ok(base) = std::env::var("NOTEFLOW_API_BASE") {
            builder = builder.base_url(base);
        }
        if let Some(secs) = std::env::var("NOTEFLOW_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            builder = builder.request_timeout_secs(secs);
        }
        builder.build()
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The credential store backing this client.
    pub fn auth(&self) -> &Arc<dyn AuthStore> {
        &self.auth
    }

    /// Authenticate and store the resulting credential.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential> {
        let url = format!("{}{}", self.base_url, defaults::LOGIN_PATH);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status.as_u16(), message));
        }

        let credential: Credential = response.json().await?;
        self.auth.store(credential.clone());
        info!(op = "login", "credential stored");
        Ok(credential)
    }

    /// Drop the credential and all in-flight retry state.
    pub fn logout(&self) {
        self.auth.clear();
        self.guard.reset();
        info!(op = "logout", "session cleared");
    }

    /// Fetch the full note collection snapshot.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let response = self.execute(Method::GET, defaults::NOTES_PATH).await?;
        Ok(response.json::<Vec<Note>>().await?)
    }

    /// Fetch all labels.
    pub async fn list_labels(&self) -> Result<Vec<Label>> {
        let response = self.execute(Method::GET, defaults::LABELS_PATH).await?;
        Ok(response.json::<Vec<Label>>().await?)
    }

    /// Issue an authenticated request, recovering from credential expiry.
    async fn execute(&self, method: Method, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.auth.current().map(|c| c.access_token);

        let response = self.send(&method, &url, token.as_deref()).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        let error = Error::from_status(status.as_u16(), message);
        debug!(
            op = "execute",
            status = status.as_u16(),
            url = %url,
            "request failed, consulting session guard"
        );

        let ctx = RequestContext::new(method, url, token);
        self.guard.recover(&ctx, error, self).await
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        token: Option<&str>,
    ) -> Result<reqwest::Response> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }
}

#[async_trait]
impl ReplayTransport for ApiClient {
    type Response = reqwest::Response;

    async fn replay(&self, ctx: &RequestContext, access_token: &str) -> Result<reqwest::Response> {
        let response = self.send(&ctx.method, &ctx.url, Some(access_token)).await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(Error::from_status(status.as_u16(), message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = ApiClientBuilder::new().base_url("not-a-url").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let client = ApiClientBuilder::new()
            .base_url("https://api.example.com/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_builder_defaults_to_production_base_url() {
        let client = ApiClientBuilder::new().build().unwrap();
        assert_eq!(client.base_url(), defaults::API_BASE_URL);
    }

    #[test]
    fn test_logout_clears_credential() {
        let client = ApiClientBuilder::new().build().unwrap();
        client.auth().store(Credential {
            user_id: uuid::Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            display_name: None,
            access_token: "tok".to_string(),
        });
        client.logout();
        assert!(client.auth().current().is_none());
    }
}
