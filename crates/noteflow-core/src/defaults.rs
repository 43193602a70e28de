//! Centralized default constants for the NoteFlow client.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates should reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// QUERY ENGINE
// =============================================================================

/// Settling window for debounced query recomputation, in milliseconds.
///
/// Long enough to coalesce a typing burst, short enough that the list feels
/// live. A tuning knob, not a correctness constraint.
pub const DEBOUNCE_MS: u64 = 300;

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// Default API base URL.
pub const API_BASE_URL: &str = "https://api.noteflow.app";

/// Overall request timeout (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connect timeout (seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// AUTH
// =============================================================================

/// Path of the token refresh endpoint.
///
/// Requests to this path are excluded from the refresh-and-replay logic to
/// avoid refresh loops.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";

// =============================================================================
// API SURFACE
// =============================================================================

/// Path of the notes listing endpoint.
pub const NOTES_PATH: &str = "/notes";

/// Path of the labels listing endpoint.
pub const LABELS_PATH: &str = "/labels";
