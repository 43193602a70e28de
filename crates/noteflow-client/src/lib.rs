//! # noteflow-client
//!
//! Authenticated API client and session guard for NoteFlow.
//!
//! This crate provides:
//! - A reqwest-backed client for the NoteFlow backend (login, notes, labels)
//! - Transparent refresh-and-replay on expired credentials
//! - Single-flight refresh coordination per request fingerprint
//!
//! ## Example
//!
//! ```no_run
//! use noteflow_client::ApiClient;
//!
//! # async fn run() -> noteflow_core::Result<()> {
//! let client = ApiClient::builder()
//!     .base_url("https://api.noteflow.app")
//!     .build()?;
//!
//! client.login("ada@example.com", "hunter2").await?;
//! let notes = client.list_notes().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod fingerprint;
pub mod guard;
pub mod ledger;

// Re-export core types
pub use noteflow_core::{Credential, Error, Label, Note, Result};

// Re-export client types
pub use auth::{AuthStore, HttpTokenRefresher, InMemoryAuthStore, RefreshedToken, TokenRefresher};
pub use client::{ApiClient, ApiClientBuilder};
pub use fingerprint::Fingerprint;
pub use guard::{ReplayTransport, RequestContext, SessionGuard};
pub use ledger::{LedgerEntry, RefreshOutcome, RetryLedger};
