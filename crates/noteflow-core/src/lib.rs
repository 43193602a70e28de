//! # noteflow-core
//!
//! Core types, errors, and defaults for the NoteFlow client.
//!
//! This crate provides the foundational data structures that the query and
//! client crates depend on: the note/label/credential models, the shared
//! error taxonomy, tuning defaults, and structured-logging field names.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;

// Re-export commonly used types at crate root
pub use error::{Error, Result, UNAUTHORIZED_STATUS};
pub use models::{Credential, Label, LabelKind, Note};
