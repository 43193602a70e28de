//! Debounced query recomputation.
//!
//! Parameter changes arrive per keystroke/toggle; recomputing on each one is
//! wasted work. `QueryDebouncer` owns a single pending timer task per
//! subscription: every `schedule` cancels the previous timer, and only the
//! last-scheduled computation within a settling window delivers a result.
//!
//! Last-write-wins is enforced twice over: the pending task is aborted on
//! reschedule, and a generation counter is re-checked after the timer fires
//! so a stale task that lost the abort race still never delivers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use noteflow_core::{defaults, Note};

use crate::engine::search_notes;
use crate::params::QueryParams;

/// One debounce timer, owned by one subscription.
///
/// Must be used inside a tokio runtime; `schedule` spawns the timer task.
/// Dropping the debouncer aborts any pending computation, so no timer fires
/// after the owning context is torn down.
pub struct QueryDebouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl QueryDebouncer {
    /// Create a debouncer with the default settling window.
    pub fn new() -> Self {
        Self {
            window: Duration::from_millis(defaults::DEBOUNCE_MS),
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// Override the settling window.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Schedule a computation over `notes` with `params`.
    ///
    /// Cancels any previously scheduled computation. After the settling
    /// window elapses without another call, `search_notes` runs and
    /// `on_search` receives the ordered result exactly once.
    pub fn schedule<F>(&mut self, notes: Arc<Vec<Note>>, params: QueryParams, on_search: F)
    where
        F: FnOnce(Vec<Note>) + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let latest = Arc::clone(&self.generation);
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Superseded while sleeping; a newer schedule owns the result.
            if latest.load(Ordering::SeqCst) != generation {
                debug!(generation, "debounced computation superseded");
                return;
            }
            on_search(search_notes(&notes, &params));
        }));
    }

    /// Cancel any pending computation without scheduling a new one.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
