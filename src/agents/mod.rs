//! Automated players.
//!
//! Agents drive a game through the same `RulesEngine` calls a human
//! front-end uses, seeing only the public view of the board. They are
//! used for the `simulate` command, benchmarks, and tests.

pub mod policy;
pub mod episode;

pub use policy::{MemoryPolicy, Policy, PublicView, RandomPolicy};
pub use episode::{run_episode, simulate, EpisodeResult, SimulationStats, DEFAULT_MAX_STEPS};
