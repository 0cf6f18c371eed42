//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and session logic.
//! It has **no dependencies** on rendering, persistence, or networking, making it:
//!
//! - **Deterministic**: Same seed produces the identical deal (for replays and tests)
//! - **Testable**: Unit tests for every rule, plus scenario tests at the workspace root
//! - **Portable**: Front ends only feed in clicks and ticks and read state back out
//!
//! # Module Structure
//!
//! - [`pattern`]: A single token with its type, layer, geometry and cleared flag
//! - [`layout`]: Deals the deck and cuts it into layers
//! - [`occlusion`]: Coverage test and point picking
//! - [`player`]: The bounded holding area, triplet detection and score
//! - [`hint`]: Search for free patterns that complete a triplet
//! - [`items`]: Hint and undo usage limits
//! - [`timer`]: Countdown clock fed by absolute timestamps
//! - [`history`]: Bounded stack of undo snapshots
//! - [`session`]: The state machine tying it all together
//!
//! # Game Rules
//!
//! - The deck always holds a multiple of three of each type
//! - A pattern is covered while any uncleared pattern on a higher layer overlaps it
//! - Clicking a free pattern moves it into the holding area; three of a kind are removed
//!   for 10 points
//! - The session is won when every pattern is cleared, lost when the holding area fills
//!   or the clock runs out
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use trio_stack_core::{new_session, ClickOutcome};
//! use trio_stack_types::{Difficulty, Point};
//!
//! let now = Instant::now();
//! let mut session = new_session(Difficulty::Easy.level_config(), 12345, now).unwrap();
//!
//! let outcome = session.handle_click(Point::new(-1000.0, -1000.0), now).unwrap();
//! assert_eq!(outcome, ClickOutcome::Ignored);
//! assert_eq!(session.tick(now), None);
//! ```

pub mod error;
pub mod hint;
pub mod history;
pub mod items;
pub mod layout;
pub mod occlusion;
pub mod pattern;
pub mod player;
pub mod rng;
pub mod session;
pub mod timer;

pub use trio_stack_types as types;

use std::time::Instant;

// Re-export commonly used types for convenience
pub use error::{ActionError, ConfigError};
pub use hint::{find_hint, Hint};
pub use history::{History, HistoryEntry, PatternSnapshot};
pub use items::ItemManager;
pub use layout::Deck;
pub use pattern::{Pattern, PatternId};
pub use player::{Player, StoredPattern};
pub use rng::SimpleRng;
pub use session::{ClickOutcome, Session, SessionRecord};
pub use timer::SessionClock;

/// Deal a session in the default play area and start its clock at `now`.
pub fn new_session(
    config: types::LevelConfig,
    seed: u32,
    now: Instant,
) -> Result<Session, ConfigError> {
    let mut session = Session::new(config, types::PlayArea::default(), seed)?;
    session.start(now);
    Ok(session)
}
