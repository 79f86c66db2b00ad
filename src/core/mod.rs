//! Core engine types: cards, board, state, actions, RNG, configuration.
//!
//! This module contains the game-independent building blocks. Rules live
//! in `games`, which drives these types through the `RulesEngine` trait.

pub mod card;
pub mod board;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use card::{Card, CardFace, CardId, SymbolId};
pub use board::Board;
pub use rng::{GameRng, GameRngState};
pub use config::BoardConfig;
pub use action::{Action, ActionRecord};
pub use state::{GameState, Hud, Phase, Snapshot};
