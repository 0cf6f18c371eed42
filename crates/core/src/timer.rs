//! Session clock - countdown driven by external ticks
//!
//! Elapsed time is always `now - started_at`, never accumulated, so irregular ticks
//! cannot drift. Once the remaining time hits zero the clock freezes.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SessionClock {
    total: Duration,
    remaining: Duration,
    started_at: Option<Instant>,
    last_tick: Option<Instant>,
}

impl SessionClock {
    pub fn new(total: Duration) -> Self {
        Self {
            total,
            remaining: total,
            started_at: None,
            last_tick: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.last_tick = Some(now);
        self.remaining = self.total;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && !self.is_expired()
    }

    /// Recompute remaining time from the start timestamp.
    pub fn update(&mut self, now: Instant) {
        let Some(start) = self.started_at else {
            return;
        };
        if self.is_expired() {
            return;
        }
        self.last_tick = Some(now);
        self.remaining = self.total.saturating_sub(now.saturating_duration_since(start));
    }

    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Time between start and the latest tick
    pub fn time_taken(&self) -> Duration {
        match (self.started_at, self.last_tick) {
            (Some(start), Some(last)) => last.saturating_duration_since(start),
            _ => Duration::ZERO,
        }
    }

    /// Report `remaining` until the next tick recomputes it
    pub(crate) fn set_remaining(&mut self, remaining: Duration) {
        self.remaining = remaining.min(self.total);
    }
}
