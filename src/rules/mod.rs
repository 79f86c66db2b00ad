//! Turn rules behind a trait.
//!
//! `RulesEngine` owns legality, state transitions and the end condition.
//! Sessions and agents call into it without knowing the concrete game.

pub mod engine;

pub use engine::{GameResult, RulesEngine, TurnOutcome};
