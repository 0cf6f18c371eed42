//! Leaderboard - persisted top scores
//!
//! The session core only produces a [`SessionRecord`] when it ends; this crate ranks
//! those records and keeps the best ten in a JSON file:
//!
//! ```json
//! { "high_scores": [ { "player": "Player1", "score": 120, "time": 93.4 } ] }
//! ```
//!
//! Entries are ordered by score (descending), then time (ascending). A missing file
//! is an empty board; so is a corrupt one, with a warning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use trio_stack_core::SessionRecord;

/// Number of entries kept
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("failed to write leaderboard {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode leaderboard: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: String,
    pub score: u32,
    /// Seconds taken
    pub time: f64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LeaderboardFile {
    #[serde(default)]
    high_scores: Vec<ScoreEntry>,
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// Load from `path`. Missing or unreadable files give an empty board.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<LeaderboardFile>(&text) {
                Ok(file) => file.high_scores,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "corrupt leaderboard, starting empty");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable leaderboard, starting empty");
                Vec::new()
            }
        };

        let mut board = Self { path, entries };
        board.rank();
        board
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Insert a score, re-rank, truncate and persist.
    pub fn add_score(
        &mut self,
        player: impl Into<String>,
        score: u32,
        time: f64,
    ) -> Result<(), LeaderboardError> {
        self.entries.push(ScoreEntry {
            player: player.into(),
            score,
            time,
        });
        self.rank();
        self.save()?;
        info!(entries = self.entries.len(), "leaderboard updated");
        Ok(())
    }

    /// Add a finished session's record
    pub fn record(&mut self, record: &SessionRecord) -> Result<(), LeaderboardError> {
        self.add_score(
            record.player.clone(),
            record.score,
            record.time_taken.as_secs_f64(),
        )
    }

    pub fn save(&self) -> Result<(), LeaderboardError> {
        let file = LeaderboardFile {
            high_scores: self.entries.clone(),
        };
        let text = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, text).map_err(|source| LeaderboardError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn rank(&mut self) {
        self.entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.time.total_cmp(&b.time))
        });
        self.entries.truncate(MAX_ENTRIES);
    }
}
