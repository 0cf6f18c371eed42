//! Undo history - bounded stack of whole-session snapshots
//!
//! Entries are plain values copied out of the live session; nothing in an entry
//! refers back to live state, so later mutation cannot alter what was recorded.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::debug;

use crate::pattern::Pattern;
use crate::player::StoredPattern;
use crate::types::{Point, SessionState, MAX_HISTORY};

/// Recorded per-pattern state, in deck order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternSnapshot {
    pub type_id: u32,
    pub position: Point,
    pub cleared: bool,
}

impl From<&Pattern> for PatternSnapshot {
    fn from(value: &Pattern) -> Self {
        Self {
            type_id: value.type_id,
            position: value.position,
            cleared: value.cleared,
        }
    }
}

impl PatternSnapshot {
    pub(crate) fn apply_to(&self, pattern: &mut Pattern) {
        pattern.type_id = self.type_id;
        pattern.position = self.position;
        pattern.cleared = self.cleared;
    }
}

/// Everything an undo rolls back
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub patterns: Vec<PatternSnapshot>,
    pub storage: Vec<StoredPattern>,
    pub score: u32,
    pub state: SessionState,
    pub remaining: Duration,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push an entry, evicting the oldest when at capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        debug!(depth = self.entries.len(), "history saved");
    }

    /// Take the most recent entry
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        let entry = self.entries.pop_back();
        if entry.is_some() {
            debug!(depth = self.entries.len(), "history popped");
        }
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
