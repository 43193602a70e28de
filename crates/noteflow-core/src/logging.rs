//! Structured logging field name constants for the NoteFlow client.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log queries work by the same names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Terminal failure surfaced to the caller |
//! | WARN  | Recoverable issue, fallback applied (e.g. credential merge skipped) |
//! | INFO  | Session lifecycle (login, logout, token refresh) |
//! | DEBUG | Decision points (guard preconditions, query recomputation) |
//! | TRACE | Per-item iteration (individual predicate evaluation) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "client", "query", "session"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "session_guard", "retry_ledger", "debouncer", "api_client"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "recover", "refresh", "replay", "search", "schedule"
pub const OPERATION: &str = "op";

// ─── Session guard fields ──────────────────────────────────────────────────

/// Request fingerprint (METHOD:URL) being de-duplicated.
pub const FINGERPRINT: &str = "fingerprint";

/// HTTP status of the failed request the guard is handling.
pub const STATUS: &str = "status";

// ─── Query engine fields ───────────────────────────────────────────────────

/// Search query text.
pub const QUERY: &str = "query";

/// Sort mode applied to the filtered set.
pub const SORT_MODE: &str = "sort_mode";

/// Number of notes produced by a query computation.
pub const RESULT_COUNT: &str = "result_count";

/// Number of notes in the input snapshot.
pub const INPUT_COUNT: &str = "input_count";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
