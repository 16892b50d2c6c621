//! The history service seam and the state payload stored in each entry.

use crate::{FilterState, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State payload attached to a history entry.
///
/// Fields this crate does not know about are kept in `extra` and written back
/// untouched, so the host router can store its own data alongside ours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryState {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub month: u32,
    #[serde(default, alias = "idToken")]
    pub auth_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntryState {
    pub fn new(filters: &FilterState, auth_token: Option<String>) -> Self {
        Self {
            city: filters.city.clone(),
            year: filters.year,
            month: filters.month,
            auth_token,
            extra: Map::new(),
        }
    }

    pub fn filters(&self) -> FilterState {
        FilterState::new(self.city.clone(), self.year, self.month)
    }

    /// Applies `patch` on top of this state.
    ///
    /// Every field the patch sets wins; every other field, including unknown
    /// ones, is copied from `self` as is.
    ///
    /// # Example
    /// ```
    /// use clipmap_navigation::{EntryPatch, EntryState, FilterState};
    ///
    /// let before = EntryState::new(&FilterState::new("Juneau", 2020, 0), None);
    /// let after = before.merged(&EntryPatch::auth_token(Some("t-1".into())));
    ///
    /// assert_eq!(after.filters(), before.filters());
    /// assert_eq!(after.auth_token.as_deref(), Some("t-1"));
    /// ```
    pub fn merged(&self, patch: &EntryPatch) -> EntryState {
        EntryState {
            city: patch.city.clone().unwrap_or_else(|| self.city.clone()),
            year: patch.year.unwrap_or(self.year),
            month: patch.month.unwrap_or(self.month),
            auth_token: match &patch.auth_token {
                Some(token) => token.clone(),
                None => self.auth_token.clone(),
            },
            extra: self.extra.clone(),
        }
    }
}

/// A partial update for [`EntryState::merged`]. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub city: Option<String>,
    pub year: Option<u32>,
    pub month: Option<u32>,
    /// `Some(None)` clears the token.
    pub auth_token: Option<Option<String>>,
}

impl EntryPatch {
    pub fn auth_token(token: Option<String>) -> Self {
        Self {
            auth_token: Some(token),
            ..Self::default()
        }
    }
}

/// A path plus the state it is stored with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub path: String,
    pub state: EntryState,
}

/// The entry the history service is currently showing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentEntry {
    pub pathname: String,
    /// Query string including its leading `?`, or empty.
    pub search: String,
    pub state: Option<EntryState>,
}

impl CurrentEntry {
    /// Builds an entry from a full path, splitting off the query string.
    pub fn from_path(path: &str, state: Option<EntryState>) -> Self {
        let (pathname, search) = match path.find('?') {
            Some(idx) => (&path[..idx], &path[idx..]),
            None => (path, ""),
        };
        Self {
            pathname: pathname.to_string(),
            search: search.to_string(),
            state,
        }
    }

    /// `pathname` and `search` joined back together.
    pub fn path(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

/// The host's navigable history (browser history, router, ...).
///
/// Only two operations are needed: read the current entry and replace it.
/// Filter changes never push new entries.
pub trait HistoryService {
    fn current_entry(&self) -> Result<CurrentEntry>;

    fn replace_current_entry(&mut self, state: EntryState, path: &str) -> Result<()>;
}

impl<T: HistoryService + ?Sized> HistoryService for Box<T> {
    fn current_entry(&self) -> Result<CurrentEntry> {
        (**self).current_entry()
    }

    fn replace_current_entry(&mut self, state: EntryState, path: &str) -> Result<()> {
        (**self).replace_current_entry(state, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_keeps_unpatched_fields() {
        let mut before = EntryState::new(&FilterState::new("Juneau", 2020, 4), Some("old".into()));
        before.extra.insert("scroll".into(), json!(320));

        let after = before.merged(&EntryPatch::auth_token(Some("new".into())));

        assert_eq!(after.city, "Juneau");
        assert_eq!(after.year, 2020);
        assert_eq!(after.month, 4);
        assert_eq!(after.auth_token.as_deref(), Some("new"));
        assert_eq!(after.extra.get("scroll"), Some(&json!(320)));
    }

    #[test]
    fn test_merge_can_clear_token() {
        let before = EntryState::new(&FilterState::default(), Some("old".into()));
        let after = before.merged(&EntryPatch::auth_token(None));
        assert_eq!(after.auth_token, None);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let before = EntryState::new(&FilterState::new("Sitka", 0, 2), Some("t".into()));
        assert_eq!(before.merged(&EntryPatch::default()), before);
    }

    #[test]
    fn test_state_json_shape() {
        let state = EntryState::new(&FilterState::new("Juneau", 2020, 0), Some("t".into()));
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({"city": "Juneau", "year": 2020, "month": 0, "authToken": "t"})
        );
    }

    #[test]
    fn test_state_reads_id_token_and_keeps_unknown_keys() {
        let state: EntryState = serde_json::from_value(json!({
            "city": "Juneau",
            "year": 2020,
            "month": 0,
            "idToken": "legacy",
            "key": "abc123"
        }))
        .unwrap();

        assert_eq!(state.auth_token.as_deref(), Some("legacy"));
        assert_eq!(state.extra.get("key"), Some(&json!("abc123")));
        assert!(!state.extra.contains_key("idToken"));
    }

    #[test]
    fn test_current_entry_path_split() {
        let entry = CurrentEntry::from_path("/videos?city=Juneau&year=2020", None);
        assert_eq!(entry.pathname, "/videos");
        assert_eq!(entry.search, "?city=Juneau&year=2020");
        assert_eq!(entry.path(), "/videos?city=Juneau&year=2020");

        let bare = CurrentEntry::from_path("/", None);
        assert_eq!(bare.search, "");
        assert_eq!(bare.path(), "/");
    }
}
