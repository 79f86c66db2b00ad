//! # rust-concentration
//!
//! A memory-matching ("concentration") card game engine.
//!
//! A grid of face-down cards holds randomly shuffled pairs of symbols.
//! The player flips two cards per turn; matching pairs score and leave the
//! board, mismatches turn back over. The game is won when every pair is
//! found and lost when the attempt budget runs out. The best score is kept
//! between sessions.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: A seed fully determines the deal, so games can be
//!    replayed, tested, and simulated.
//!
//! 2. **Explicit turns**: Flipping the second card does not resolve the
//!    turn. Front-ends show both cards, then send `Action::Resolve`.
//!
//! 3. **Configuration Over Convention**: Grid size, attempt budget, and
//!    symbol count come from `BoardConfig`.
//!
//! ## Modules
//!
//! - `core`: Cards, board, state, actions, RNG, configuration
//! - `rules`: RulesEngine trait and turn outcomes
//! - `games`: The concentration rules
//! - `scores`: Best-score persistence
//! - `session`: One game at a time plus the best score
//! - `agents`: Automated players for simulation
//! - `render`: Text board and coordinate parsing

pub mod core;
pub mod error;
pub mod rules;
pub mod games;
pub mod scores;
pub mod session;
pub mod agents;
pub mod render;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Board, BoardConfig, Card, CardFace, CardId, GameRng, GameRngState,
    GameState, Hud, Phase, Snapshot, SymbolId,
};

pub use crate::error::{ConfigError, Error, Result, RulesError, SnapshotError, StoreError};

pub use crate::rules::{GameResult, RulesEngine, TurnOutcome};

pub use crate::games::concentration::{ConcentrationGame, ConcentrationGameBuilder};

pub use crate::scores::{HighScore, HighScoreStore, JsonFileStore, MemoryStore};

pub use crate::session::{SavedGame, Session};

pub use crate::agents::{
    run_episode, simulate, EpisodeResult, MemoryPolicy, Policy, PublicView, RandomPolicy,
    SimulationStats,
};
