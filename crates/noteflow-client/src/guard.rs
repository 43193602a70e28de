//! The session guard: transparent refresh-and-replay on expired credentials.
//!
//! Outbound authenticated calls that fail with the unauthorized class are
//! routed through [`SessionGuard::recover`], which refreshes the credential
//! once per distinct in-flight logical request and replays the original call
//! with the fresh token. Everything else passes through unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use noteflow_core::{defaults, Error, Result};

use crate::auth::{AuthStore, TokenRefresher};
use crate::fingerprint::Fingerprint;
use crate::ledger::{LedgerEntry, RefreshOutcome, RetryLedger};

/// The context of a failed request, enough to fingerprint and replay it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: reqwest::Method,
    pub url: String,
    /// The bearer token the failed request carried, i.e. the stale token
    /// handed to the refresher.
    pub bearer_token: Option<String>,
}

impl RequestContext {
    /// Build a context for a bearer-authenticated request.
    pub fn new(
        method: reqwest::Method,
        url: impl Into<String>,
        bearer_token: Option<String>,
    ) -> Self {
        Self {
            method,
            url: url.into(),
            bearer_token,
        }
    }

    /// The de-duplication fingerprint for this request.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(self.method.as_str(), self.url.clone())
    }

    /// The URL with any query string stripped.
    fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }
}

/// Re-issues a request with a replacement bearer token.
///
/// Implemented by the API client; test doubles implement it with an
/// arbitrary response type.
#[async_trait]
pub trait ReplayTransport: Send + Sync {
    type Response: Send;

    /// Re-issue the request described by `ctx` with `access_token` in place
    /// of the original authorization header.
    async fn replay(&self, ctx: &RequestContext, access_token: &str) -> Result<Self::Response>;
}

/// Coordinates token refresh and replay for expired-credential failures.
///
/// Owns its [`RetryLedger`]; one guard instance per session. The guard never
/// surfaces a new error type: callers see either the replayed response or
/// their original failure.
pub struct SessionGuard {
    ledger: RetryLedger,
    auth: Arc<dyn AuthStore>,
    refresher: Arc<dyn TokenRefresher>,
    refresh_path: String,
}

impl SessionGuard {
    /// Create a guard over the given store and refresher, excluding the
    /// default refresh path from retry.
    pub fn new(auth: Arc<dyn AuthStore>, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self {
            ledger: RetryLedger::new(),
            auth,
            refresher,
            refresh_path: defaults::REFRESH_PATH.to_string(),
        }
    }

    /// Override the refresh-endpoint path excluded from retry.
    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    /// Drop all in-flight retry state. Called on logout.
    pub fn reset(&self) {
        self.ledger.clear();
    }

    /// Handle a failed request.
    ///
    /// Preconditions, in order; any miss propagates `original` unchanged:
    /// 1. the failure is the unauthorized class;
    /// 2. the failing URL is not the refresh endpoint;
    /// 3. single-flight per fingerprint (concurrent failures of the same
    ///    logical request join the in-flight refresh instead of issuing
    ///    another).
    ///
    /// On a successful refresh the new token is merged into the stored
    /// credential (skipped, with a warning, if no credential is present)
    /// and the original request is replayed with the new token. A refresh
    /// failure propagates `original`, never the refresh error.
    pub async fn recover<T: ReplayTransport>(
        &self,
        ctx: &RequestContext,
        original: Error,
        transport: &T,
    ) -> Result<T::Response> {
        if !original.is_unauthorized() {
            return Err(original);
        }
        if ctx.path().ends_with(&self.refresh_path) {
            debug!(url = %ctx.url, "refresh endpoint failure, not retrying");
            return Err(original);
        }

        let fingerprint = ctx.fingerprint();
        match self.ledger.begin(&fingerprint) {
            LedgerEntry::Leader => {
                self.lead_refresh(ctx, &fingerprint, original, transport)
                    .await
            }
            LedgerEntry::Follower(mut outcome) => match outcome.recv().await {
                Ok(RefreshOutcome::Refreshed(token)) => {
                    debug!(fingerprint = %fingerprint, "replaying after joined refresh");
                    transport.replay(ctx, &token).await
                }
                Ok(RefreshOutcome::Failed) | Err(_) => Err(original),
            },
        }
    }

    async fn lead_refresh<T: ReplayTransport>(
        &self,
        ctx: &RequestContext,
        fingerprint: &Fingerprint,
        original: Error,
        transport: &T,
    ) -> Result<T::Response> {
        let stale = ctx.bearer_token.clone().unwrap_or_default();

        match self.refresher.refresh(&stale).await {
            Ok(refreshed) => {
                match self.auth.current() {
                    Some(credential) => {
                        self.auth
                            .store(credential.with_access_token(&refreshed.access_token));
                    }
                    // Best effort: nothing to merge into, but the replay
                    // still proceeds with the fresh token.
                    None => warn!(
                        fingerprint = %fingerprint,
                        "no stored credential to merge refreshed token into"
                    ),
                }
                self.ledger.complete(
                    fingerprint,
                    RefreshOutcome::Refreshed(refreshed.access_token.clone()),
                );
                info!(fingerprint = %fingerprint, "token refreshed, replaying request");
                transport.replay(ctx, &refreshed.access_token).await
            }
            Err(refresh_error) => {
                self.ledger.complete(fingerprint, RefreshOutcome::Failed);
                warn!(
                    fingerprint = %fingerprint,
                    error = %refresh_error,
                    "token refresh failed, propagating original error"
                );
                Err(original)
            }
        }
    }
}
