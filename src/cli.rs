//! Command-line interface for the terminal game.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use crate::types::{Difficulty, LevelConfig, DEFAULT_PLAYER};

/// Trio Stack - clear the layered table three of a kind at a time
#[derive(Parser, Debug)]
#[command(name = "trio-stack")]
#[command(about = "Layered tile-matching puzzle in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Difficulty preset: easy, hard or hell
    #[arg(short, long, default_value = "easy", value_parser = parse_difficulty)]
    pub mode: Difficulty,

    /// JSON level file; overrides --mode
    #[arg(long)]
    pub level_file: Option<PathBuf>,

    /// Seed for the deal. Defaults to the current time.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Name recorded on the leaderboard
    #[arg(short, long, default_value = DEFAULT_PLAYER)]
    pub player: String,

    /// Leaderboard file (created on the first finished session)
    #[arg(long, default_value = "leaderboard.json")]
    pub leaderboard: PathBuf,

    /// Where tracing output goes; the terminal itself is taken by the board
    #[arg(long, default_value = "trio-stack.log")]
    pub log_file: PathBuf,
}

impl Cli {
    /// Level to play: the level file if given, otherwise the preset.
    pub fn level_config(&self) -> Result<LevelConfig> {
        match &self.level_file {
            Some(path) => load_level(path),
            None => Ok(self.mode.level_config()),
        }
    }

    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| {
        let names: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
        format!("unknown mode '{s}', expected one of: {}", names.join(", "))
    })
}

/// Read a [`LevelConfig`] from a JSON file
pub fn load_level(path: &Path) -> Result<LevelConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading level file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing level file {}", path.display()))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
