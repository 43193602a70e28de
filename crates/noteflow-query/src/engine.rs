//! Pure note filtering and sorting.
//!
//! `search_notes` is the whole engine: a synchronous function from a note
//! snapshot and a parameter set to a new ordered subset. All predicates are
//! AND-combined; the sort is stable so equal keys preserve snapshot order.

use std::cmp::Ordering;

use tracing::debug;

use noteflow_core::Note;

use crate::params::{QueryParams, SortMode};

/// Compute the filtered, ordered subset of `notes` matching `params`.
///
/// The input slice and its elements are never mutated; the result is a new
/// sequence of clones. Calling twice with identical arguments yields equal
/// results.
pub fn search_notes(notes: &[Note], params: &QueryParams) -> Vec<Note> {
    let needle = params.text.trim().to_lowercase();

    let mut hits: Vec<Note> = notes
        .iter()
        .filter(|note| matches(note, params, &needle))
        .cloned()
        .collect();

    sort_notes(&mut hits, params.sort);

    debug!(
        query = %needle,
        sort_mode = ?params.sort,
        input_count = notes.len(),
        result_count = hits.len(),
        "note query computed"
    );

    hits
}

/// AND-combination of every active predicate.
fn matches(note: &Note, params: &QueryParams, needle: &str) -> bool {
    matches_title(note, needle)
        && params.types.allows_type(note.note_type)
        && params.categories.allows_any(&note.categories)
        && (!params.starred_only || note.is_starred)
        && (!params.with_images_only || note.has_images())
}

/// Case-insensitive substring match on the title; an empty (or
/// whitespace-only) query matches every note.
fn matches_title(note: &Note, needle: &str) -> bool {
    needle.is_empty() || note.title.to_lowercase().contains(needle)
}

/// Sort in place. `Vec::sort_by` is stable, so ties keep snapshot order.
fn sort_notes(notes: &mut [Note], mode: SortMode) {
    match mode {
        SortMode::Newest => notes.sort_by(|a, b| b.start_date.cmp(&a.start_date)),
        SortMode::Oldest => notes.sort_by(|a, b| a.start_date.cmp(&b.start_date)),
        SortMode::ByRating => notes.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
        }),
        SortMode::ByWords => {
            notes.sort_by(|a, b| b.content.chars().count().cmp(&a.content.chars().count()))
        }
    }
}
