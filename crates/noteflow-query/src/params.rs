//! Query parameters for the note search engine.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::filter::{LabelFilter, LabelPress};

/// Sort mode applied to the filtered note set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Descending by start date. Default, and the fallback for any
    /// unrecognized wire value.
    #[default]
    Newest,
    /// Ascending by start date.
    Oldest,
    /// Descending by rating.
    ByRating,
    /// Descending by the raw character length of the note content,
    /// markup included. Documented proxy for "word count"; not a real
    /// tokenized count, and deliberately kept that way so observable
    /// ordering matches the selection UI.
    ByWords,
}

impl SortMode {
    /// Parse a wire string, degrading unknown values to `Newest`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "oldest" => SortMode::Oldest,
            "by_rating" => SortMode::ByRating,
            "by_words" => SortMode::ByWords,
            _ => SortMode::Newest,
        }
    }
}

// Unrecognized sort modes degrade to the default rather than failing the
// whole parameter payload.
impl<'de> Deserialize<'de> for SortMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SortMode::from_wire(&s))
    }
}

/// The full parameter set for one query cycle.
///
/// Owned by the UI layer and handed to the engine each cycle; the engine
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryParams {
    /// Free-text query; compared trimmed and case-insensitively against
    /// note titles.
    #[serde(default)]
    pub text: String,
    /// Active type-label selection.
    #[serde(default)]
    pub types: LabelFilter,
    /// Active category-label selection.
    #[serde(default)]
    pub categories: LabelFilter,
    #[serde(default)]
    pub sort: SortMode,
    #[serde(default)]
    pub starred_only: bool,
    #[serde(default)]
    pub with_images_only: bool,
}

impl QueryParams {
    /// Create an unconstrained parameter set (match everything, newest first).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the sort mode.
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Restrict to a single type label.
    pub fn with_type(mut self, id: Uuid) -> Self {
        self.types = LabelFilter::single(id);
        self
    }

    /// Restrict to a single category label.
    pub fn with_category(mut self, id: Uuid) -> Self {
        self.categories = LabelFilter::single(id);
        self
    }

    /// Only starred notes.
    pub fn starred_only(mut self, on: bool) -> Self {
        self.starred_only = on;
        self
    }

    /// Only notes carrying at least one image.
    pub fn with_images_only(mut self, on: bool) -> Self {
        self.with_images_only = on;
        self
    }

    /// Forward a type-label press from the selection UI.
    pub fn press_type(&mut self, press: LabelPress) {
        self.types.press(press);
    }

    /// Forward a category-label press from the selection UI.
    pub fn press_category(&mut self, press: LabelPress) {
        self.categories.press(press);
    }
}
