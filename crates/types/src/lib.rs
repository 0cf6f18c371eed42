//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond parsing and geometry, making
//! them usable in any context (core logic, terminal rendering, leaderboard records).
//!
//! # Play Area
//!
//! Token positions live in a continuous play area measured in abstract pixels:
//!
//! - **Default size**: 800 x 600
//! - **Token size**: square, `TOKEN_SCALE` (20%) of the play area width
//! - **Spread**: tokens are scattered within `±SPREAD_FACTOR` token widths of the centre
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MATCH_SIZE` | 3 | Tokens of one type removed per match |
//! | `MATCH_SCORE` | 10 | Score awarded per removed triplet |
//! | `MAX_HISTORY` | 10 | Undo snapshots kept before the oldest is evicted |
//! | `TICK_MS` | 16 | Front-end frame interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use trio_stack_types::{Difficulty, Point, Rect, Size};
//!
//! let easy = Difficulty::from_str("EASY").unwrap().level_config();
//! assert_eq!(easy.storage_limit, 8);
//!
//! let rect = Rect::centered(Point::new(10.0, 10.0), Size::square(4.0));
//! assert!(rect.contains(Point::new(12.0, 8.0)));
//! ```

use serde::{Deserialize, Serialize};

/// Number of identical tokens that form a match
pub const MATCH_SIZE: usize = 3;

/// Score awarded for each removed triplet
pub const MATCH_SCORE: u32 = 10;

/// Maximum number of history snapshots retained for undo
pub const MAX_HISTORY: usize = 10;

/// Front-end frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default play area width
pub const DEFAULT_AREA_WIDTH: f64 = 800.0;

/// Default play area height
pub const DEFAULT_AREA_HEIGHT: f64 = 600.0;

/// Token edge length as a fraction of the play area width
pub const TOKEN_SCALE: f64 = 0.2;

/// Maximum offset from the centre, in token widths
pub const SPREAD_FACTOR: f64 = 2.0;

/// Hint uses granted when a level file omits `hint_limit`
pub const DEFAULT_HINT_LIMIT: u32 = 5;

/// Undo uses granted when a level file omits `undo_limit`
pub const DEFAULT_UNDO_LIMIT: u32 = 3;

/// Player name recorded when none is configured
pub const DEFAULT_PLAYER: &str = "Player1";


/// A point in play-area coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in play-area units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn square(edge: f64) -> Self {
        Self {
            width: edge,
            height: edge,
        }
    }
}

/// Axis-aligned rectangle stored as its edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Build a rectangle from its centre point and full size
    pub fn centered(center: Point, size: Size) -> Self {
        let hw = size.width / 2.0;
        let hh = size.height / 2.0;
        Self {
            left: center.x - hw,
            top: center.y - hh,
            right: center.x + hw,
            bottom: center.y + hh,
        }
    }

    /// Point containment, edges included
    pub fn contains(&self, p: Point) -> bool {
        self.left <= p.x && p.x <= self.right && self.top <= p.y && p.y <= self.bottom
    }

    /// Positive-area intersection; rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right <= other.left
            || other.right <= self.left
            || self.bottom <= other.top
            || other.bottom <= self.top)
    }
}

/// Dimensions of the area tokens are laid out in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f64,
    pub height: f64,
}

impl PlayArea {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Square token size derived from the area width
    pub fn token_size(&self) -> Size {
        Size::square(self.width * TOKEN_SCALE)
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(DEFAULT_AREA_WIDTH, DEFAULT_AREA_HEIGHT)
    }
}

fn default_hint_limit() -> u32 {
    DEFAULT_HINT_LIMIT
}

fn default_undo_limit() -> u32 {
    DEFAULT_UNDO_LIMIT
}

/// Parameters of a single session
///
/// Counts are unsigned; zero values are rejected when a session is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Number of distinct token types
    pub pattern_types: u32,
    /// Requested deck size, rounded up to a multiple of 3
    pub total_patterns: u32,
    /// Number of stacked layers
    pub layer_count: u32,
    /// Countdown length in seconds
    pub time_limit_secs: u32,
    #[serde(default = "default_hint_limit")]
    pub hint_limit: u32,
    #[serde(default = "default_undo_limit")]
    pub undo_limit: u32,
    /// Capacity of the holding area
    pub storage_limit: u32,
}

/// Built-in level presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
    Hell,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Hard, Difficulty::Hell];

    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use trio_stack_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("Hell"), Some(Difficulty::Hell));
    /// assert_eq!(Difficulty::from_str("medium"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "hard" => Some(Difficulty::Hard),
            "hell" => Some(Difficulty::Hell),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
            Difficulty::Hell => "hell",
        }
    }

    /// Level parameters for this preset
    pub fn level_config(&self) -> LevelConfig {
        match self {
            Difficulty::Easy => LevelConfig {
                pattern_types: 5,
                total_patterns: 30,
                layer_count: 3,
                time_limit_secs: 600,
                hint_limit: 5,
                undo_limit: 5,
                storage_limit: 8,
            },
            Difficulty::Hard => LevelConfig {
                pattern_types: 7,
                total_patterns: 42,
                layer_count: 5,
                time_limit_secs: 400,
                hint_limit: 3,
                undo_limit: 3,
                storage_limit: 7,
            },
            Difficulty::Hell => LevelConfig {
                pattern_types: 10,
                total_patterns: 60,
                layer_count: 7,
                time_limit_secs: 300,
                hint_limit: 1,
                undo_limit: 1,
                storage_limit: 7,
            },
        }
    }
}

/// Player commands delivered by a front end
///
/// Clicks carry play-area coordinates; the front end is responsible for projecting
/// its own pointer position into the play area first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Select the topmost free token under the point
    Click(Point),
    /// Spend a hint use
    Hint,
    /// Spend an undo use
    Undo,
    /// Discard the session and deal a fresh one
    Restart,
    /// Leave the game
    Quit,
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Deck dealt, clock not yet running
    Setup,
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Won | SessionState::Lost)
    }
}

/// Terminal result of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }
}

impl From<Outcome> for SessionState {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Won => SessionState::Won,
            Outcome::Lost => SessionState::Lost,
        }
    }
}
