//! In-process history stack.
//!
//! Behaves like a browser's session history: a list of entries with a cursor,
//! where pushing drops everything after the cursor. Used by tests and by the
//! CLI's `replay` command.

use crate::{CurrentEntry, EntryState, HistoryService, NavigationError, Result};

#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<CurrentEntry>,
    index: usize,
    available: bool,
    replacements: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHistory {
    /// A history holding a single stateless entry at `initial_path`.
    pub fn new(initial_path: &str) -> Self {
        Self {
            entries: vec![CurrentEntry::from_path(initial_path, None)],
            index: 0,
            available: true,
            replacements: 0,
        }
    }

    /// Adds a new entry after the current one, discarding forward entries.
    pub fn push(&mut self, path: &str, state: Option<EntryState>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(CurrentEntry::from_path(path, state));
        self.index = self.entries.len() - 1;
    }

    /// Moves one entry back. Returns false at the start of the stack.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves one entry forward. Returns false at the end of the stack.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn entries(&self) -> &[CurrentEntry] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of successful `replace_current_entry` calls.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// Simulates the service going away (`false`) or coming back (`true`).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(NavigationError::HistoryUnavailable(
                "in-memory history is switched off".into(),
            ))
        }
    }
}

impl HistoryService for MemoryHistory {
    fn current_entry(&self) -> Result<CurrentEntry> {
        self.ensure_available()?;
        Ok(self.entries[self.index].clone())
    }

    fn replace_current_entry(&mut self, state: EntryState, path: &str) -> Result<()> {
        self.ensure_available()?;
        self.entries[self.index] = CurrentEntry::from_path(path, Some(state));
        self.replacements += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterState;

    #[test]
    fn test_push_back_forward() {
        let mut history = MemoryHistory::new("/");
        history.push("/videos", None);
        history.push("/videos/3", None);

        assert!(history.back());
        assert_eq!(history.current_entry().unwrap().pathname, "/videos");
        assert!(history.forward());
        assert!(!history.forward());
        assert!(history.back() && history.back());
        assert!(!history.back());
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = MemoryHistory::new("/");
        history.push("/a", None);
        history.push("/b", None);
        history.back();
        history.push("/c", None);

        let paths: Vec<String> = history.entries().iter().map(CurrentEntry::path).collect();
        assert_eq!(paths, vec!["/", "/a", "/c"]);
    }

    #[test]
    fn test_replace_does_not_grow_stack() {
        let mut history = MemoryHistory::new("/videos");
        let state = EntryState::new(&FilterState::new("Juneau", 0, 0), None);
        history.replace_current_entry(state.clone(), "/videos?city=Juneau").unwrap();

        assert_eq!(history.entries().len(), 1);
        assert_eq!(history.replacements(), 1);
        let current = history.current_entry().unwrap();
        assert_eq!(current.search, "?city=Juneau");
        assert_eq!(current.state, Some(state));
    }

    #[test]
    fn test_unavailable_history_errors() {
        let mut history = MemoryHistory::default();
        history.set_available(false);

        assert!(history.current_entry().is_err());
        assert!(history
            .replace_current_entry(EntryState::default(), "/videos")
            .is_err());
        assert_eq!(history.replacements(), 0);
    }
}
