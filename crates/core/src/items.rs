//! Item usage limits for hints and undos
//!
//! A use is only spent when the item actually did something: a hint that finds nothing
//! or an undo with no history leaves the counter where it was.

use tracing::debug;

use crate::error::ActionError;
use crate::hint::Hint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemManager {
    hint_limit: u32,
    undo_limit: u32,
    hint_used: u32,
    undo_used: u32,
}

impl ItemManager {
    pub fn new(hint_limit: u32, undo_limit: u32) -> Self {
        Self {
            hint_limit,
            undo_limit,
            hint_used: 0,
            undo_used: 0,
        }
    }

    pub fn can_use_hint(&self) -> bool {
        self.hint_used < self.hint_limit
    }

    pub fn can_use_undo(&self) -> bool {
        self.undo_used < self.undo_limit
    }

    /// `(used, limit)`
    pub fn hint_uses(&self) -> (u32, u32) {
        (self.hint_used, self.hint_limit)
    }

    /// `(used, limit)`
    pub fn undo_uses(&self) -> (u32, u32) {
        (self.undo_used, self.undo_limit)
    }

    /// Run `search` if a hint use is left, spending it only on a result.
    pub fn use_hint(&mut self, search: impl FnOnce() -> Option<Hint>) -> Result<Hint, ActionError> {
        if !self.can_use_hint() {
            return Err(ActionError::HintsExhausted);
        }
        let hint = search().ok_or(ActionError::NoHintAvailable)?;
        self.hint_used += 1;
        debug!(used = self.hint_used, limit = self.hint_limit, "hint used");
        Ok(hint)
    }

    /// Run `restore` if an undo use is left, spending it only on success.
    pub fn use_undo(&mut self, restore: impl FnOnce() -> bool) -> Result<(), ActionError> {
        if !self.can_use_undo() {
            return Err(ActionError::UndosExhausted);
        }
        if !restore() {
            return Err(ActionError::NoHistory);
        }
        self.undo_used += 1;
        debug!(used = self.undo_used, limit = self.undo_limit, "undo used");
        Ok(())
    }

    /// Zero both counters for a new session
    pub fn reset(&mut self) {
        self.hint_used = 0;
        self.undo_used = 0;
    }
}
