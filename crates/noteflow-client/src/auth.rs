//! Credential storage and token refresh.

use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use noteflow_core::{Credential, Error, Result};

/// Process-wide credential store. One instance spans login to logout.
///
/// The session guard reads the current credential and conditionally rewrites
/// its token field via [`store`]; it never creates or destroys credentials.
///
/// [`store`]: AuthStore::store
pub trait AuthStore: Send + Sync {
    /// The current credential, if a user is logged in.
    fn current(&self) -> Option<Credential>;

    /// Replace the stored credential.
    fn store(&self, credential: Credential);

    /// Drop the stored credential (logout).
    fn clear(&self);
}

/// In-memory credential store.
#[derive(Default)]
pub struct InMemoryAuthStore {
    slot: RwLock<Option<Credential>>,
}

impl InMemoryAuthStore {
    /// Create an empty store (no user logged in).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a credential.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: RwLock::new(Some(credential)),
        }
    }
}

impl AuthStore for InMemoryAuthStore {
    fn current(&self) -> Option<Credential> {
        self.slot.read().unwrap().clone()
    }

    fn store(&self, credential: Credential) {
        *self.slot.write().unwrap() = Some(credential);
    }

    fn clear(&self) {
        *self.slot.write().unwrap() = None;
    }
}

/// Response payload of the refresh endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshedToken {
    pub access_token: String,
}

/// Exchanges a stale access token for a fresh one.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Perform the refresh. Fails if the backend rejects the stale token.
    async fn refresh(&self, stale_token: &str) -> Result<RefreshedToken>;
}

/// HTTP refresher posting the stale token to the refresh endpoint.
pub struct HttpTokenRefresher {
    client: reqwest::Client,
    refresh_url: String,
}

impl HttpTokenRefresher {
    /// Create a refresher targeting `refresh_url`, reusing the client's
    /// connection pool.
    pub fn new(client: reqwest::Client, refresh_url: impl Into<String>) -> Self {
        Self {
            client,
            refresh_url: refresh_url.into(),
        }
    }

    /// The endpoint this refresher targets.
    pub fn refresh_url(&self) -> &str {
        &self.refresh_url
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    async fn refresh(&self, stale_token: &str) -> Result<RefreshedToken> {
        debug!(op = "refresh", url = %self.refresh_url, "requesting token refresh");

        let response = self
            .client
            .post(&self.refresh_url)
            .json(&serde_json::json!({ "access_token": stale_token }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status.as_u16(), message));
        }

        Ok(response.json::<RefreshedToken>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn credential(token: &str) -> Credential {
        Credential {
            user_id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            display_name: None,
            access_token: token.to_string(),
        }
    }

    #[test]
    fn test_empty_store_has_no_credential() {
        let store = InMemoryAuthStore::new();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_store_and_read_back() {
        let store = InMemoryAuthStore::new();
        store.store(credential("tok"));
        assert_eq!(store.current().unwrap().access_token, "tok");
    }

    #[test]
    fn test_store_replaces_previous_credential() {
        let store = InMemoryAuthStore::with_credential(credential("old"));
        store.store(credential("new"));
        assert_eq!(store.current().unwrap().access_token, "new");
    }

    #[test]
    fn test_clear_logs_out() {
        let store = InMemoryAuthStore::with_credential(credential("tok"));
        store.clear();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_refreshed_token_deserializes() {
        let token: RefreshedToken =
            serde_json::from_str(r#"{"access_token":"fresh"}"#).unwrap();
        assert_eq!(token.access_token, "fresh");
    }
}
