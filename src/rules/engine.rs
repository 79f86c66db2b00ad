//! The seam between a ruleset and whatever drives it.
//!
//! Sessions, agents and the CLI only talk to `RulesEngine`, so a variant
//! ruleset (different refund policy, timed reveals) slots in without
//! touching them.

use crate::core::{Action, BoardConfig, CardId, GameState, SymbolId};
use crate::error::RulesError;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Every pair was matched.
    Won { score: u32 },
    /// The attempt budget ran out first.
    Lost { score: u32 },
}

impl GameResult {
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, GameResult::Won { .. })
    }

    /// Final score.
    #[must_use]
    pub fn score(&self) -> u32 {
        match self {
            GameResult::Won { score } | GameResult::Lost { score } => *score,
        }
    }
}

/// What a resolved turn did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The two cards matched and were removed.
    Match {
        first: CardId,
        second: CardId,
        symbol: SymbolId,
    },
    /// The two cards differed and were turned back.
    Mismatch { first: CardId, second: CardId },
}

impl TurnOutcome {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, TurnOutcome::Match { .. })
    }
}

/// Turn rules for one board configuration.
///
/// `apply_action` is deterministic and leaves the state untouched when it
/// returns an error. `legal_actions` is empty once the game is over.
pub trait RulesEngine {
    fn config(&self) -> &BoardConfig;

    /// Every action accepted in `state`, flips in cell order.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Flip a card or resolve the open pair.
    ///
    /// Returns `Some(outcome)` when the action finished a turn.
    fn apply_action(
        &mut self,
        state: &mut GameState,
        action: Action,
    ) -> Result<Option<TurnOutcome>, RulesError>;

    /// `None` while the game is in progress.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    /// Is `action` legal in `state`?
    fn is_legal(&self, state: &GameState, action: Action) -> bool {
        self.legal_actions(state).contains(&action)
    }
}
