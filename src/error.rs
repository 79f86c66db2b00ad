//! Error types for the engine.
//!
//! Each layer has its own enum so callers can match on what they can
//! handle; [`Error`] wraps them all for code that just propagates.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::CardId;

/// Invalid board or game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must have at least one column")]
    ZeroColumns,

    #[error("board must have at least one row")]
    ZeroRows,

    #[error("board has {cells} cell(s), at least 2 are needed for one pair")]
    TooFewCells { cells: usize },

    #[error("attempt budget must be at least 1")]
    ZeroAttempts,

    #[error("symbol count must be at least 1")]
    ZeroSymbols,

    #[error("board of {cells} cells exceeds the {max} cell limit")]
    TooManyCells { cells: usize, max: usize },

    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file")]
    Parse(#[from] serde_json::Error),
}

/// An action that the turn state machine refuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("the game is over")]
    GameOver,

    #[error("two cards are open, resolve the turn first")]
    AwaitingResolution,

    #[error("there is no card at {0}")]
    UnknownCard(CardId),

    #[error("{0} is already face-up")]
    AlreadyRevealed(CardId),

    #[error("{0} has already been matched")]
    AlreadyMatched(CardId),

    #[error("two cards must be open before resolving")]
    NothingToResolve,
}

/// Failure to load or persist the best score.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file I/O failed")]
    Io(#[from] std::io::Error),

    #[error("high score file is malformed")]
    Parse(#[from] serde_json::Error),
}

/// Failure to encode or decode a saved game.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed")]
    Codec(#[from] bincode::Error),

    #[error("snapshot is inconsistent: {0}")]
    Invalid(String),
}

/// Umbrella error for callers that do not need to distinguish layers.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
