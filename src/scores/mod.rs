//! Best-score persistence.
//!
//! The only state that outlives a game is the best score. `HighScore`
//! caches it and writes through a `HighScoreStore` whenever it is beaten.

pub mod store;

pub use store::{HighScore, HighScoreStore, JsonFileStore, MemoryStore};
