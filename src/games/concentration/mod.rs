//! Single-player concentration (memory matching).
//!
//! A grid of face-down cards holds shuffled pairs of symbols:
//! - Each turn the player flips two cards, then resolves the turn
//! - A match scores a point, removes both cards, and refunds the attempt
//!   (never past the budget)
//! - A mismatch turns both cards face-down again
//! - Every resolved turn spends one attempt
//! - The game is won when every pair is matched and lost when the
//!   attempts run out

mod game;

pub use game::{ConcentrationGame, ConcentrationGameBuilder};
