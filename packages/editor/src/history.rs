//! # Undo/Redo History
//!
//! Linear snapshot history of whole novels.
//!
//! ## Design
//!
//! - Every commit stores a complete [`Novel`] value
//! - Undo and redo only move a cursor over the snapshots
//! - Committing after an undo drops the redo tail
//! - Committing a value equal to the current one is ignored
//! - An optional level limit drops the oldest snapshots
//!
//! ## Example
//!
//! ```rust
//! use dfn_editor::{History, Novel};
//!
//! let mut history = History::new(Novel::new("Draft"));
//! history.commit(Novel::new("Renamed"));
//!
//! history.undo();
//! assert_eq!(history.current().title, "Draft");
//!
//! history.redo();
//! assert_eq!(history.current().title, "Renamed");
//! ```

use crate::model::Novel;

/// One history entry
#[derive(Debug, Clone)]
struct Snapshot {
    novel: Novel,

    /// Label of the edit that produced this snapshot
    description: Option<String>,
}

/// Linear undo/redo over novel snapshots
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,

    /// Index of the current snapshot
    cursor: usize,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Create a history with unlimited undo levels
    pub fn new(initial: Novel) -> Self {
        Self::with_max_levels(initial, 0)
    }

    pub fn with_max_levels(initial: Novel, max_levels: usize) -> Self {
        Self {
            snapshots: vec![Snapshot {
                novel: initial,
                description: None,
            }],
            cursor: 0,
            max_levels,
        }
    }

    pub fn current(&self) -> &Novel {
        &self.snapshots[self.cursor].novel
    }

    /// Record a new state. Returns `false` when it equals the current one.
    pub fn commit(&mut self, novel: Novel) -> bool {
        self.push(novel, None)
    }

    pub fn commit_with_description(&mut self, novel: Novel, description: impl Into<String>) -> bool {
        self.push(novel, Some(description.into()))
    }

    fn push(&mut self, novel: Novel, description: Option<String>) -> bool {
        if novel == *self.current() {
            return false;
        }

        // New edit invalidates the redo tail
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(Snapshot { novel, description });

        if self.max_levels > 0 && self.snapshots.len() > self.max_levels + 1 {
            self.snapshots.remove(0);
        }

        self.cursor = self.snapshots.len() - 1;
        true
    }

    pub fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    pub fn redo_levels(&self) -> usize {
        self.snapshots.len() - 1 - self.cursor
    }

    /// Number of stored snapshots, including the current one
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Forget everything except the current snapshot
    pub fn clear(&mut self) {
        let current = self.snapshots.swap_remove(self.cursor);
        self.snapshots = vec![current];
        self.cursor = 0;
    }

    /// Label of the edit the next undo reverts
    pub fn undo_description(&self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.snapshots[self.cursor].description.as_deref()
    }

    /// Label of the edit the next redo reapplies
    pub fn redo_description(&self) -> Option<&str> {
        self.snapshots
            .get(self.cursor + 1)
            .and_then(|snapshot| snapshot.description.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Novel {
        Novel::new(title)
    }

    #[test]
    fn test_history_creation() {
        let history = History::new(titled("v0"));
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_commit_undo_redo() {
        let mut history = History::new(titled("v0"));
        assert!(history.commit(titled("v1")));

        assert_eq!(history.undo_levels(), 1);
        assert!(history.undo());
        assert_eq!(history.current().title, "v0");
        assert_eq!(history.redo_levels(), 1);

        assert!(history.redo());
        assert_eq!(history.current().title, "v1");
        assert!(!history.redo());
    }

    #[test]
    fn test_equal_commit_is_ignored() {
        let mut history = History::new(Novel::sample());
        assert!(!history.commit(Novel::sample()));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_commit_after_undo_drops_redo_tail() {
        let mut history = History::new(titled("v0"));
        history.commit(titled("v1"));
        history.commit(titled("v2"));
        history.undo();
        history.undo();

        history.commit(titled("other"));
        assert_eq!(history.redo_levels(), 0);
        assert_eq!(history.len(), 2);
        assert_eq!(history.current().title, "other");
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut history = History::with_max_levels(titled("v0"), 2);
        for i in 1..=3 {
            history.commit(titled(&format!("v{i}")));
        }

        assert_eq!(history.undo_levels(), 2);
        history.undo();
        history.undo();
        assert!(!history.undo());
        assert_eq!(history.current().title, "v1");
    }

    #[test]
    fn test_descriptions() {
        let mut history = History::new(titled("v0"));
        history.commit_with_description(titled("v1"), "Rename");
        assert_eq!(history.undo_description(), Some("Rename"));
        assert_eq!(history.redo_description(), None);

        history.undo();
        assert_eq!(history.undo_description(), None);
        assert_eq!(history.redo_description(), Some("Rename"));
    }

    #[test]
    fn test_clear_keeps_current() {
        let mut history = History::new(titled("v0"));
        history.commit(titled("v1"));
        history.commit(titled("v2"));
        history.undo();

        history.clear();
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().title, "v1");
        assert!(!history.can_undo());
    }
}
