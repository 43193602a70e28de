//! The retry ledger: at most one refresh in flight per fingerprint.
//!
//! The ledger is an instance-owned map from fingerprint to an in-progress
//! refresh. The first failure for a fingerprint becomes the *leader* and
//! performs the refresh; concurrent failures with the same fingerprint
//! become *followers* and await the leader's outcome over a broadcast
//! channel, then replay with the refreshed token themselves.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;
use tracing::debug;

use crate::fingerprint::Fingerprint;

/// Outcome of a leader's refresh attempt, broadcast to followers.
#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// Refresh succeeded; replay with this access token.
    Refreshed(String),
    /// Refresh failed; every waiter propagates its own original error.
    Failed,
}

/// Role assigned to a caller entering the ledger.
pub enum LedgerEntry {
    /// First failure for this fingerprint: perform the refresh, then call
    /// [`RetryLedger::complete`].
    Leader,
    /// A refresh for this fingerprint is already in flight: await its
    /// outcome.
    Follower(broadcast::Receiver<RefreshOutcome>),
}

/// In-flight refresh bookkeeping.
///
/// Invariant: a fingerprint is present iff a refresh-and-replay sequence
/// for it is currently in progress. The check-then-insert in [`begin`] is a
/// single critical section, so the at-most-one-refresh-per-fingerprint
/// invariant holds on multi-threaded runtimes too.
///
/// [`begin`]: RetryLedger::begin
#[derive(Default)]
pub struct RetryLedger {
    inflight: Mutex<HashMap<Fingerprint, broadcast::Sender<RefreshOutcome>>>,
}

impl RetryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the ledger for `fingerprint`.
    ///
    /// Returns [`LedgerEntry::Leader`] and records the fingerprint if no
    /// refresh is in flight for it, otherwise a follower receiver
    /// subscribed to the in-flight refresh's outcome.
    pub fn begin(&self, fingerprint: &Fingerprint) -> LedgerEntry {
        let mut inflight = self.inflight.lock().unwrap();
        if let Some(sender) = inflight.get(fingerprint) {
            debug!(fingerprint = %fingerprint, "joining in-flight refresh");
            return LedgerEntry::Follower(sender.subscribe());
        }
        // Capacity 1: exactly one outcome is ever sent per entry.
        let (sender, _) = broadcast::channel(1);
        inflight.insert(fingerprint.clone(), sender);
        LedgerEntry::Leader
    }

    /// Remove `fingerprint` and broadcast the refresh outcome to followers.
    ///
    /// Leader-only. Removal happens before the broadcast, so a failure for
    /// the same fingerprint arriving after this point starts a fresh cycle.
    pub fn complete(&self, fingerprint: &Fingerprint, outcome: RefreshOutcome) {
        let sender = self.inflight.lock().unwrap().remove(fingerprint);
        if let Some(sender) = sender {
            // No receivers is fine; there simply were no followers.
            let _ = sender.send(outcome);
        }
    }

    /// Whether a refresh is in flight for `fingerprint`.
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.inflight.lock().unwrap().contains_key(fingerprint)
    }

    /// Drop all in-flight entries. Called on logout; pending followers
    /// observe a closed channel and propagate their original errors.
    pub fn clear(&self) {
        self.inflight.lock().unwrap().clear();
    }
}
