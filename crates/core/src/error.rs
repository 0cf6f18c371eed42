//! Error types for session creation and player actions.

use thiserror::Error;

/// A level configuration that cannot produce a playable session.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("pattern_types must be at least 1")]
    ZeroPatternTypes,

    #[error("total_patterns must be at least 1")]
    ZeroTotalPatterns,

    #[error("layer_count must be at least 1")]
    ZeroLayers,

    #[error("storage_limit must be at least 1")]
    ZeroStorage,

    #[error("time_limit_secs must be at least 1")]
    ZeroTimeLimit,
}

/// A player action that was rejected. The session is left untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// The session has not started or has already ended.
    #[error("session is not in play")]
    NotPlaying,

    #[error("no hint uses left")]
    HintsExhausted,

    #[error("no undo uses left")]
    UndosExhausted,

    /// Undo requested with nothing recorded.
    #[error("nothing to undo")]
    NoHistory,

    /// No free triplet can be completed from the current position.
    #[error("no hint available")]
    NoHintAvailable,
}
