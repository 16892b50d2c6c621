//! The state machine that keeps session state and history in step.
//!
//! Video focus and overlay changes are local. Filter changes and token changes
//! are written into the current history entry with replace semantics, so
//! picking filters one by one never leaves a trail of back-button stops.

use crate::{
    CurrentEntry, EntryPatch, EntryState, FilterState, HistoryService, NavigationError,
    SelectionState, VideoRecord, DEFAULT_BASE_PATH,
};
use clipmap_geo::Coordinate;
use clipmap_telemetry::{metrics, names};

/// Owns [`SelectionState`] and projects it into a [`HistoryService`].
///
/// None of the operations fail. A history service that errors is logged and
/// skipped; the in-memory state is updated regardless.
#[derive(Debug)]
pub struct NavigationStateController<H> {
    state: SelectionState,
    history: H,
    base_path: String,
}

impl<H: HistoryService> NavigationStateController<H> {
    pub fn new(history: H) -> Self {
        Self::with_base_path(history, DEFAULT_BASE_PATH)
    }

    pub fn with_base_path(history: H, base_path: impl Into<String>) -> Self {
        Self {
            state: SelectionState::default(),
            history,
            base_path: base_path.into(),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn set_active_video(&mut self, index: Option<usize>) {
        self.state.active_video = index;
    }

    pub fn set_open_video(&mut self, index: Option<usize>) {
        self.state.open_video = index;
    }

    pub fn set_show_overlays(&mut self, show: bool) {
        self.state.show_overlays = show;
    }

    /// Stores the token and, when the current entry carries filter state,
    /// rewrites that entry with the token merged in.
    ///
    /// Going back to the entry later then restores the filters together with
    /// the token that was current when it was left.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.state.auth_token = token.clone();

        let Some(entry) = self.read_current_entry() else {
            return;
        };
        let Some(previous) = entry.state.as_ref() else {
            tracing::trace!(path = %entry.path(), "Current entry has no filter state; token kept in memory only");
            return;
        };

        let state = previous.merged(&EntryPatch::auth_token(token));
        self.write_current_entry(state, &entry.path());
    }

    /// Records a new filter selection and replaces the current entry with it.
    ///
    /// Returns the path written, e.g. `/videos?city=Juneau&year=2020`.
    pub fn init_filters(&mut self, city: &str, year: u32, month: u32) -> String {
        let filters = FilterState::new(city, year, month);
        let path = filters.to_path(&self.base_path);
        let state = EntryState::new(&filters, self.state.auth_token.clone());

        tracing::debug!(city, year, month, path = %path, "Filters changed");

        self.state.filters = filters;
        self.write_current_entry(state, &path);
        path
    }

    /// Adopts the filters (and token, if stored) of the entry the host just
    /// navigated to. Nothing is written back.
    pub fn restore_from_history(&mut self) {
        let Some(entry) = self.read_current_entry() else {
            return;
        };

        if entry.pathname != self.base_path {
            self.state.filters = FilterState::default();
            return;
        }

        match entry.state {
            Some(state) => {
                self.state.filters = state.filters();
                if state.auth_token.is_some() {
                    self.state.auth_token = state.auth_token;
                }
            }
            None => {
                self.state.filters = FilterState::from_query(&entry.search).unwrap_or_else(|err| {
                    tracing::warn!(error = %err, search = %entry.search, "Ignoring undecodable filters");
                    FilterState::default()
                });
            }
        }

        tracing::debug!(filters = ?self.state.filters, "Filters restored from history");
    }

    /// Location of the active video, if the index still points into `videos`.
    pub fn active_location(&self, videos: &[VideoRecord]) -> Option<Coordinate> {
        self.state.active_location(videos)
    }

    fn read_current_entry(&self) -> Option<CurrentEntry> {
        self.history
            .current_entry()
            .map_err(|err| self.history_failed("read", &err))
            .ok()
    }

    fn write_current_entry(&mut self, state: EntryState, path: &str) {
        match self.history.replace_current_entry(state, path) {
            Ok(()) => {
                metrics().increment(names::HISTORY_REPLACED);
                tracing::trace!(path, "History entry replaced");
            }
            Err(err) => self.history_failed("replace", &err),
        }
    }

    fn history_failed(&self, operation: &'static str, err: &NavigationError) {
        metrics().increment(names::HISTORY_FAILED);
        tracing::warn!(
            operation,
            code = err.code() as u32,
            error = %err,
            "History service call failed; continuing with in-memory state"
        );
    }
}
