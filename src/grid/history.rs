//! Undo history of whole-table snapshots.

use crate::types::CellValue;

/// Deep copy of headers and rows taken before a mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Undo-only stack; redo is not tracked.
#[derive(Debug, Clone)]
pub struct History {
    past: Vec<Snapshot>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            past: Vec::new(),
            max_entries: 100,
        }
    }

    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            past: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.past.push(snapshot);
        if self.past.len() > self.max_entries {
            self.past.remove(0);
        }
    }

    /// Most recent snapshot, if any.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.past.pop()
    }

    pub fn len(&self) -> usize {
        self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.past.is_empty()
    }

    pub fn clear(&mut self) {
        self.past.clear();
    }
}
