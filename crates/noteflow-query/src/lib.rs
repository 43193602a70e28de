//! # noteflow-query
//!
//! Client-side note search/filter engine for NoteFlow.
//!
//! This crate provides:
//! - Pure filtering and sorting over an in-memory note snapshot
//! - Label-selection filters with an explicit "all" sentinel
//! - Debounced recomputation with last-write-wins delivery
//!
//! ## Example
//!
//! ```
//! use noteflow_core::Note;
//! use noteflow_query::{search_notes, QueryParams, SortMode};
//! use uuid::Uuid;
//!
//! let notes = vec![Note::new(Uuid::new_v4(), "Weekend trip")];
//! let params = QueryParams::new().with_text("trip").with_sort(SortMode::Newest);
//! let hits = search_notes(&notes, &params);
//! assert_eq!(hits.len(), 1);
//! ```

pub mod debounce;
pub mod engine;
pub mod filter;
pub mod params;
pub mod session;

// Re-export core types
pub use noteflow_core::{Label, LabelKind, Note};

// Re-export query types
pub use debounce::QueryDebouncer;
pub use engine::search_notes;
pub use filter::{LabelFilter, LabelPress};
pub use params::{QueryParams, SortMode};
pub use session::QuerySession;
