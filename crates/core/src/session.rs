//! Session module - one play-through from deal to win or loss
//!
//! This module ties together all core components: deck, occlusion, holding area,
//! items, clock and undo history. It processes one event at a time to completion:
//!
//! - [`Session::handle_click`]: pick the free pattern under a point and store it
//! - [`Session::use_hint`] / [`Session::use_undo`]: item actions, gated by [`ItemManager`]
//! - [`Session::tick`]: advance the clock and detect time-out or a cleared table
//!
//! A pattern counts as cleared as soon as it enters the holding area, not only when its
//! triplet completes; an undo is the only way back onto the table.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::{ActionError, ConfigError};
use crate::hint::{find_hint, Hint};
use crate::history::{History, HistoryEntry, PatternSnapshot};
use crate::items::ItemManager;
use crate::layout::{validate, Deck};
use crate::pattern::{Pattern, PatternId};
use crate::player::{Player, StoredPattern};
use crate::rng::SimpleRng;
use crate::timer::SessionClock;
use crate::types::{LevelConfig, Outcome, PlayArea, Point, SessionState, DEFAULT_PLAYER, MATCH_SIZE};

/// Result of a click that was processed while in play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing selectable under the point
    Ignored,
    /// The pattern went into the holding area without completing a triplet
    Selected(PatternId),
    /// The click completed a triplet, which was removed and scored
    Matched([PatternId; MATCH_SIZE]),
    /// The holding area filled up; the session is lost
    StorageFull,
}

/// What a finished session hands to the leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub player: String,
    pub score: u32,
    pub time_taken: Duration,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: LevelConfig,
    area: PlayArea,
    seed: u32,
    player_name: String,
    state: SessionState,
    deck: Deck,
    player: Player,
    items: ItemManager,
    clock: SessionClock,
    history: History,
    hint: Option<Hint>,
    /// Produced once at the terminal transition, consumed by [`Session::take_record`]
    record: Option<SessionRecord>,
}

impl Session {
    /// Deal a new session. The clock does not run until [`Session::start`].
    pub fn new(config: LevelConfig, area: PlayArea, seed: u32) -> Result<Self, ConfigError> {
        validate(&config)?;
        let deck = Deck::generate(&config, area, &mut SimpleRng::new(seed))?;

        info!(
            patterns = deck.len(),
            layers = deck.layer_count(),
            seed,
            "session dealt"
        );

        Ok(Self {
            config,
            area,
            seed,
            player_name: DEFAULT_PLAYER.to_string(),
            state: SessionState::Setup,
            player: Player::new(config.storage_limit as usize),
            items: ItemManager::new(config.hint_limit, config.undo_limit),
            clock: SessionClock::new(Duration::from_secs(config.time_limit_secs as u64)),
            history: History::new(),
            hint: None,
            record: None,
            deck,
        })
    }

    /// Session over a hand-built deck, mainly for fixtures with exact geometry
    pub fn from_deck(config: LevelConfig, deck: Deck) -> Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self {
            config,
            area: PlayArea::default(),
            seed: 0,
            player_name: DEFAULT_PLAYER.to_string(),
            state: SessionState::Setup,
            player: Player::new(config.storage_limit as usize),
            items: ItemManager::new(config.hint_limit, config.undo_limit),
            clock: SessionClock::new(Duration::from_secs(config.time_limit_secs as u64)),
            history: History::new(),
            hint: None,
            record: None,
            deck,
        })
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Start the clock and begin play
    pub fn start(&mut self, now: Instant) {
        if self.state != SessionState::Setup {
            return;
        }
        self.clock.start(now);
        self.state = SessionState::Playing;
        info!(time_limit = self.config.time_limit_secs, "session started");
    }

    /// Throw away all in-memory state and deal again from the same level.
    pub fn restart(&mut self, seed: u32, now: Instant) -> Result<(), ConfigError> {
        self.deck = Deck::generate(&self.config, self.area, &mut SimpleRng::new(seed))?;
        self.seed = seed;
        self.player.reset();
        self.items.reset();
        self.clock = SessionClock::new(self.clock.total());
        self.history.clear();
        self.hint = None;
        self.record = None;
        self.state = SessionState::Setup;
        info!(seed, "session restarted");
        self.start(now);
        Ok(())
    }

    /// Process a click at `point` (play-area coordinates) made at `now`.
    ///
    /// The clock is brought up to `now` first, so a click past the deadline ends the
    /// session as lost instead, and a click that ends the session stamps its finish
    /// time. Clicks that hit nothing selectable are not recorded in the undo history.
    pub fn handle_click(
        &mut self,
        point: Point,
        now: Instant,
    ) -> Result<ClickOutcome, ActionError> {
        if self.state != SessionState::Playing {
            return Err(ActionError::NotPlaying);
        }

        self.clock.update(now);
        if self.clock.is_expired() {
            self.finish(Outcome::Lost);
            return Err(ActionError::NotPlaying);
        }

        let before = self.capture();
        self.hint = None;

        let Some(id) = self.deck.pick(point) else {
            debug!(x = point.x, y = point.y, "click hit nothing selectable");
            return Ok(ClickOutcome::Ignored);
        };

        let type_id = self.deck.patterns()[id.index()].type_id;
        if !self.player.select(id, type_id) {
            return Ok(ClickOutcome::StorageFull);
        }
        self.history.push(before);
        self.deck.set_cleared(id, true);

        let outcome = if self.player.check_for_match() {
            match self.player.remove_matched().into_inner() {
                Ok(triplet) => ClickOutcome::Matched(triplet),
                Err(_) => ClickOutcome::Selected(id),
            }
        } else {
            ClickOutcome::Selected(id)
        };

        if self.player.is_full() {
            self.finish(Outcome::Lost);
            return Ok(ClickOutcome::StorageFull);
        }
        if self.deck.all_cleared() {
            self.finish(Outcome::Won);
        }

        Ok(outcome)
    }

    /// Spend a hint use on a free triplet, remembered until the next click.
    pub fn use_hint(&mut self) -> Result<Hint, ActionError> {
        if self.state != SessionState::Playing {
            return Err(ActionError::NotPlaying);
        }

        let hint = self
            .items
            .use_hint(|| find_hint(&self.deck, &self.player))?;
        debug!(?hint, "hint found");
        self.hint = Some(hint);
        Ok(hint)
    }

    /// Spend an undo use to roll back the most recent click.
    pub fn use_undo(&mut self) -> Result<(), ActionError> {
        if self.state != SessionState::Playing {
            return Err(ActionError::NotPlaying);
        }

        let Self {
            items,
            history,
            deck,
            player,
            clock,
            state,
            ..
        } = self;

        items.use_undo(|| match history.pop() {
            Some(entry) => {
                apply_entry(&entry, deck, player, clock, state);
                true
            }
            None => false,
        })?;

        self.hint = None;
        info!(score = self.player.score(), "undo applied");
        Ok(())
    }

    /// Advance the clock. Returns the outcome once the session has ended.
    pub fn tick(&mut self, now: Instant) -> Option<Outcome> {
        if self.state == SessionState::Playing {
            self.clock.update(now);
            if self.clock.is_expired() {
                self.finish(Outcome::Lost);
            } else if self.deck.all_cleared() {
                self.finish(Outcome::Won);
            }
        }
        self.outcome()
    }

    /// Copy out everything an undo needs
    pub fn capture(&self) -> HistoryEntry {
        HistoryEntry {
            patterns: self.deck.patterns().iter().map(PatternSnapshot::from).collect(),
            storage: self.player.storage().to_vec(),
            score: self.player.score(),
            state: self.state,
            remaining: self.clock.remaining(),
        }
    }

    /// Push a snapshot of the current state onto the undo history
    pub fn save(&mut self) {
        let entry = self.capture();
        self.history.push(entry);
    }

    /// Pop and apply the latest snapshot without spending an undo use.
    ///
    /// Returns `false` when there is nothing to restore.
    pub fn restore(&mut self) -> bool {
        match self.history.pop() {
            Some(entry) => {
                apply_entry(
                    &entry,
                    &mut self.deck,
                    &mut self.player,
                    &mut self.clock,
                    &mut self.state,
                );
                true
            }
            None => false,
        }
    }

    /// Take the finished-session record. Yields `Some` exactly once per session.
    pub fn take_record(&mut self) -> Option<SessionRecord> {
        self.record.take()
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state = outcome.into();
        let record = SessionRecord {
            player: self.player_name.clone(),
            score: self.player.score(),
            time_taken: self.clock.time_taken(),
            outcome,
        };
        info!(
            outcome = outcome.as_str(),
            score = record.score,
            secs = record.time_taken.as_secs_f64(),
            "session over"
        );
        self.record = Some(record);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            SessionState::Won => Some(Outcome::Won),
            SessionState::Lost => Some(Outcome::Lost),
            _ => None,
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn area(&self) -> PlayArea {
        self.area
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn patterns(&self) -> &[Pattern] {
        self.deck.patterns()
    }

    pub fn is_covered(&self, id: PatternId) -> bool {
        self.deck.is_covered(id)
    }

    pub fn storage(&self) -> &[StoredPattern] {
        self.player.storage()
    }

    pub fn storage_limit(&self) -> usize {
        self.player.storage_limit()
    }

    pub fn score(&self) -> u32 {
        self.player.score()
    }

    pub fn remaining_time(&self) -> Duration {
        self.clock.remaining()
    }

    pub fn time_taken(&self) -> Duration {
        self.clock.time_taken()
    }

    /// `(used, limit)`
    pub fn hint_uses(&self) -> (u32, u32) {
        self.items.hint_uses()
    }

    /// `(used, limit)`
    pub fn undo_uses(&self) -> (u32, u32) {
        self.items.undo_uses()
    }

    /// The hint currently on display, if any
    pub fn hint(&self) -> Option<&Hint> {
        self.hint.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

fn apply_entry(
    entry: &HistoryEntry,
    deck: &mut Deck,
    player: &mut Player,
    clock: &mut SessionClock,
    state: &mut SessionState,
) {
    assert_eq!(
        entry.patterns.len(),
        deck.len(),
        "history entry does not belong to this deck"
    );
    for (snapshot, pattern) in entry.patterns.iter().zip(deck.patterns_mut()) {
        snapshot.apply_to(pattern);
    }
    player.restore(&entry.storage, entry.score);
    clock.set_remaining(entry.remaining);
    *state = entry.state;
}
