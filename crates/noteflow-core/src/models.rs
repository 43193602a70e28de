//! Data model for the NoteFlow client.
//!
//! These are the wire shapes exchanged with the remote backend. The query
//! engine treats them as immutable values per query cycle; the client never
//! mutates a fetched `Note` in place.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind discriminator for a [`Label`].
///
/// `Type` labels are exclusive (a note has at most one); `Category` labels
/// form a set. `Note` and `Task` kinds exist for the other surfaces of the
/// app and pass through this core untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Type,
    Category,
    Note,
    Task,
}

/// A user-defined label (type or category) attached to notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: Uuid,
    pub name: String,
    /// Display color as the backend sends it (e.g. "#FFB300").
    pub color: String,
    pub kind: LabelKind,
}

/// A note record as held in the client-side snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    /// Rich text body. May contain markup; its raw character length is the
    /// sort key for the "by words" sort mode.
    pub content: String,
    /// Event/creation timestamp in epoch milliseconds.
    pub start_date: i64,
    pub rating: f64,
    #[serde(default)]
    pub is_starred: bool,
    /// Image references; only presence/count matters to the query engine.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// The single type label, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_type: Option<Uuid>,
    /// Category label memberships (zero or more).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Uuid>,
}

impl Note {
    /// Create a note with the given id and title and neutral defaults.
    ///
    /// Intended for tests and local drafts; fetched notes come fully
    /// populated from the backend.
    pub fn new(id: Uuid, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            start_date: Utc::now().timestamp_millis(),
            rating: 0.0,
            is_starred: false,
            images: Vec::new(),
            note_type: None,
            categories: Vec::new(),
        }
    }

    /// Whether the note carries at least one image reference.
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// An authenticated session credential.
///
/// Owned by the auth store; the session guard only ever replaces the
/// `access_token` field, never creates or destroys the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub user_id: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub access_token: String,
}

impl Credential {
    /// Return a copy of this credential with a replacement access token.
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        Self {
            access_token: token.into(),
            ..self.clone()
        }
    }
}
