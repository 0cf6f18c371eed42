//! Player module - the bounded holding area and score
//!
//! Patterns enter the holding area in click order. Whenever some type reaches
//! [`MATCH_SIZE`] copies, one triplet of it can be removed for [`MATCH_SCORE`].

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::layout::Deck;
use crate::pattern::PatternId;
use crate::types::{MATCH_SCORE, MATCH_SIZE};

/// One occupied slot of the holding area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoredPattern {
    pub id: PatternId,
    pub type_id: u32,
}

/// Holding area plus score
#[derive(Debug, Clone)]
pub struct Player {
    storage_limit: usize,
    storage: Vec<StoredPattern>,
    score: u32,
}

impl Player {
    pub fn new(storage_limit: usize) -> Self {
        Self {
            storage_limit,
            storage: Vec::with_capacity(storage_limit),
            score: 0,
        }
    }

    pub fn storage(&self) -> &[StoredPattern] {
        &self.storage
    }

    pub fn storage_limit(&self) -> usize {
        self.storage_limit
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_full(&self) -> bool {
        self.storage.len() >= self.storage_limit
    }

    /// How many stored patterns have `type_id`
    pub fn count_of(&self, type_id: u32) -> usize {
        self.storage.iter().filter(|s| s.type_id == type_id).count()
    }

    /// Append a pattern. Returns `false` and leaves the store untouched when full.
    pub fn select(&mut self, id: PatternId, type_id: u32) -> bool {
        if self.is_full() {
            debug!(%id, "holding area full, selection refused");
            return false;
        }
        self.storage.push(StoredPattern { id, type_id });
        debug!(%id, type_id, stored = self.storage.len(), "pattern stored");
        true
    }

    /// Smallest type id with at least a triplet in store
    fn matched_type(&self) -> Option<u32> {
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for s in &self.storage {
            *counts.entry(s.type_id).or_default() += 1;
        }
        counts
            .into_iter()
            .find(|&(_, count)| count >= MATCH_SIZE)
            .map(|(type_id, _)| type_id)
    }

    pub fn check_for_match(&self) -> bool {
        self.matched_type().is_some()
    }

    /// Remove the first triplet of the smallest matching type and score it.
    ///
    /// Returns an empty set (and changes nothing) when no type has a triplet.
    pub fn remove_matched(&mut self) -> ArrayVec<PatternId, MATCH_SIZE> {
        let mut removed = ArrayVec::new();
        let Some(type_id) = self.matched_type() else {
            return removed;
        };

        self.storage.retain(|s| {
            if s.type_id == type_id && !removed.is_full() {
                removed.push(s.id);
                false
            } else {
                true
            }
        });
        self.score += MATCH_SCORE;
        debug!(type_id, score = self.score, "triplet removed");
        removed
    }

    /// Return the most recent selection to the table.
    ///
    /// Store-local undo; sessions use their history snapshots instead, never both.
    pub fn undo_last(&mut self, deck: &mut Deck) -> bool {
        match self.storage.pop() {
            Some(last) => {
                deck.set_cleared(last.id, false);
                debug!(id = %last.id, "selection undone");
                true
            }
            None => false,
        }
    }

    /// Overwrite contents and score, used when rolling back to a snapshot
    pub(crate) fn restore(&mut self, storage: &[StoredPattern], score: u32) {
        self.storage.clear();
        self.storage.extend_from_slice(storage);
        self.score = score;
    }

    pub(crate) fn reset(&mut self) {
        self.storage.clear();
        self.score = 0;
    }
}
