//! A live query session binding a note snapshot, parameters, and the
//! debouncer.
//!
//! This is the shape the UI layer holds: every setter records the new
//! parameter value and reschedules the debounced computation, and the
//! consumer callback receives the ordered result once per settled change.

use std::sync::Arc;
use std::time::Duration;

use noteflow_core::Note;

use crate::debounce::QueryDebouncer;
use crate::filter::LabelPress;
use crate::params::{QueryParams, SortMode};

/// A query subscription over one note snapshot.
pub struct QuerySession {
    notes: Arc<Vec<Note>>,
    params: QueryParams,
    debouncer: QueryDebouncer,
    on_search: Arc<dyn Fn(Vec<Note>) + Send + Sync>,
}

impl QuerySession {
    /// Create a session over `notes`, delivering results to `on_search`.
    ///
    /// No computation runs until the first parameter change (or an explicit
    /// [`QuerySession::refresh`]).
    pub fn new(notes: Vec<Note>, on_search: impl Fn(Vec<Note>) + Send + Sync + 'static) -> Self {
        Self {
            notes: Arc::new(notes),
            params: QueryParams::new(),
            debouncer: QueryDebouncer::new(),
            on_search: Arc::new(on_search),
        }
    }

    /// Override the debounce settling window.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.debouncer = QueryDebouncer::new().with_window(window);
        self
    }

    /// Current parameter values.
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Replace the note snapshot (the external store refreshed it).
    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = Arc::new(notes);
        self.refresh();
    }

    /// Set the free-text query.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.params.text = text.into();
        self.refresh();
    }

    /// Set the sort mode.
    pub fn set_sort(&mut self, sort: SortMode) {
        self.params.sort = sort;
        self.refresh();
    }

    /// Forward a type-label press from the selection UI.
    pub fn press_type(&mut self, press: LabelPress) {
        self.params.press_type(press);
        self.refresh();
    }

    /// Forward a category-label press from the selection UI.
    pub fn press_category(&mut self, press: LabelPress) {
        self.params.press_category(press);
        self.refresh();
    }

    /// Toggle the starred-only flag.
    pub fn set_starred_only(&mut self, on: bool) {
        self.params.starred_only = on;
        self.refresh();
    }

    /// Toggle the images-only flag.
    pub fn set_with_images_only(&mut self, on: bool) {
        self.params.with_images_only = on;
        self.refresh();
    }

    /// Reschedule the debounced computation with the current parameters.
    pub fn refresh(&mut self) {
        let deliver = Arc::clone(&self.on_search);
        self.debouncer.schedule(
            Arc::clone(&self.notes),
            self.params.clone(),
            move |hits| deliver(hits),
        );
    }

    /// Cancel any pending computation (e.g. the owning screen unmounted).
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }
}
