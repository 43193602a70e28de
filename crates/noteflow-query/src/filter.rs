//! Label selection filters with an explicit "all" sentinel.
//!
//! The label-selection UI drives two of these per query: one over type
//! labels, one over category labels. The "all" sentinel is a real enum
//! variant rather than a magic string, but its wire form stays the string
//! `"all"` for compatibility with the selection UI.

use std::collections::BTreeSet;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Wire form of the sentinel value.
const ALL_SENTINEL: &str = "all";

/// A label press event from the selection UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPress {
    /// The "all" chip was pressed.
    All,
    /// A specific label chip was pressed.
    Id(Uuid),
}

/// Active label selection for one filter dimension.
///
/// Invariant: the `Ids` variant never holds an empty set. Removing the last
/// explicit selection transitions back to `All`, so "no selection" is
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LabelFilter {
    /// No specific filter; every note passes this dimension.
    #[default]
    All,
    /// Only notes matching one of these label ids pass.
    Ids(BTreeSet<Uuid>),
}

impl LabelFilter {
    /// Selection containing exactly one label id.
    pub fn single(id: Uuid) -> Self {
        LabelFilter::Ids(BTreeSet::from([id]))
    }

    /// Whether the sentinel is active (no explicit selection).
    pub fn is_all(&self) -> bool {
        matches!(self, LabelFilter::All)
    }

    /// Whether the given id is an active explicit selection.
    pub fn contains(&self, id: Uuid) -> bool {
        match self {
            LabelFilter::All => false,
            LabelFilter::Ids(set) => set.contains(&id),
        }
    }

    /// Apply a label press from the selection UI.
    ///
    /// Transitions:
    /// - pressing "all" resets the dimension to the sentinel;
    /// - pressing an active id removes it (emptying resets to the sentinel);
    /// - pressing an id while only the sentinel is active selects just it;
    /// - pressing a new id alongside other selections adds it.
    pub fn press(&mut self, press: LabelPress) {
        match press {
            LabelPress::All => *self = LabelFilter::All,
            LabelPress::Id(id) => match self {
                LabelFilter::All => *self = LabelFilter::single(id),
                LabelFilter::Ids(set) => {
                    if !set.remove(&id) {
                        set.insert(id);
                    } else if set.is_empty() {
                        *self = LabelFilter::All;
                    }
                }
            },
        }
    }

    /// Type-dimension predicate: does a note with this (optional) type label
    /// pass the filter?
    pub fn allows_type(&self, note_type: Option<Uuid>) -> bool {
        match self {
            LabelFilter::All => true,
            LabelFilter::Ids(set) => note_type.is_some_and(|id| set.contains(&id)),
        }
    }

    /// Category-dimension predicate: does a note with these category labels
    /// pass the filter? At least one membership suffices.
    pub fn allows_any(&self, categories: &[Uuid]) -> bool {
        match self {
            LabelFilter::All => true,
            LabelFilter::Ids(set) => categories.iter().any(|id| set.contains(id)),
        }
    }
}

impl Serialize for LabelFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LabelFilter::All => serializer.serialize_str(ALL_SENTINEL),
            LabelFilter::Ids(set) => set.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LabelFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Sentinel(String),
            Ids(BTreeSet<Uuid>),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Sentinel(s) if s == ALL_SENTINEL => Ok(LabelFilter::All),
            Wire::Sentinel(s) => Err(DeError::custom(format!(
                "expected \"{ALL_SENTINEL}\" or a list of label ids, got \"{s}\""
            ))),
            // An empty explicit selection is not representable; normalize.
            Wire::Ids(set) if set.is_empty() => Ok(LabelFilter::All),
            Wire::Ids(set) => Ok(LabelFilter::Ids(set)),
        }
    }
}
