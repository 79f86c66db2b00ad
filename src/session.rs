//! A play session: one game at a time plus the persistent best score.
//!
//! `Session` is what a front-end drives. It forwards actions to the rules,
//! records the best score once when a game ends, and deals a fresh board
//! on restart.
//!
//! ```
//! use rust_concentration::games::concentration::ConcentrationGameBuilder;
//! use rust_concentration::scores::MemoryStore;
//! use rust_concentration::session::Session;
//!
//! let builder = ConcentrationGameBuilder::new().columns(4).rows(2);
//! let session = Session::new(builder, MemoryStore::default(), 7).unwrap();
//!
//! assert_eq!(session.hud().attempts_text(), "Attempts: 25");
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Action, BoardConfig, CardId, GameState, Hud, Snapshot};
use crate::error::{ConfigError, Error, RulesError, SnapshotError};
use crate::games::concentration::{ConcentrationGame, ConcentrationGameBuilder};
use crate::rules::{GameResult, RulesEngine, TurnOutcome};
use crate::scores::{HighScore, HighScoreStore};

/// A saved game: the board configuration plus the state snapshot.
///
/// The configuration travels with the save so a resumed game restarts on
/// the same board size, budget, and symbol set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub config: BoardConfig,
    pub state: Snapshot,
}

impl SavedGame {
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// The state must have been dealt under the saved configuration.
    fn check(&self) -> Result<(), Error> {
        self.config.validate()?;

        let board = &self.state.board;
        if board.columns() != self.config.columns
            || board.rows() != self.config.rows
            || self.state.max_attempts != self.config.max_attempts
        {
            return Err(SnapshotError::Invalid(format!(
                "{}x{} board with {} attempts saved under a {}x{} config with {}",
                board.columns(),
                board.rows(),
                self.state.max_attempts,
                self.config.columns,
                self.config.rows,
                self.config.max_attempts
            ))
            .into());
        }
        if board.len() != self.config.pair_count() * 2 {
            return Err(SnapshotError::Invalid(format!(
                "{} cards for {} pairs",
                board.len(),
                self.config.pair_count()
            ))
            .into());
        }
        Ok(())
    }
}

/// A game in progress together with the best score.
pub struct Session<S> {
    game: ConcentrationGame,
    state: GameState,
    high_score: HighScore<S>,
    seed: u64,
    /// Set once the finished game's score has been offered to the store.
    recorded: bool,
}

impl<S: HighScoreStore> Session<S> {
    /// Start a session with a freshly dealt board.
    pub fn new(builder: ConcentrationGameBuilder, store: S, seed: u64) -> Result<Self, ConfigError> {
        let (game, state) = builder.build(seed)?;
        tracing::info!(seed, pairs = state.total_pairs, attempts = state.attempts, "new game");
        Ok(Self {
            game,
            state,
            high_score: HighScore::open(store),
            seed,
            recorded: false,
        })
    }

    /// Continue a saved game under the configuration it was saved with.
    pub fn resume(saved: SavedGame, store: S) -> Result<Self, Error> {
        saved.check()?;
        let game = ConcentrationGame::new(saved.config)?;
        let state = GameState::restore(saved.state)?;
        let seed = state.rng.seed();
        let recorded = state.is_over();
        tracing::info!(seed, turn = state.turn_number, "resumed game");
        Ok(Self {
            game,
            state,
            high_score: HighScore::open(store),
            seed,
            recorded,
        })
    }

    #[must_use]
    pub fn game(&self) -> &ConcentrationGame {
        &self.game
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seed of the current deal.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    #[must_use]
    pub fn hud(&self) -> Hud {
        self.state.hud(self.high_score.best())
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.game.is_terminal(&self.state)
    }

    /// Capture the configuration and state for a save file.
    #[must_use]
    pub fn save(&self) -> SavedGame {
        SavedGame {
            config: self.game.config().clone(),
            state: self.state.snapshot(),
        }
    }

    /// Flip a card.
    pub fn flip(&mut self, id: CardId) -> Result<(), RulesError> {
        self.apply(Action::Flip(id)).map(|_| ())
    }

    /// Resolve the two open cards.
    pub fn resolve(&mut self) -> Result<TurnOutcome, RulesError> {
        self.apply(Action::Resolve)?
            .ok_or(RulesError::NothingToResolve)
    }

    /// Apply any action, recording the best score if the game just ended.
    pub fn apply(&mut self, action: Action) -> Result<Option<TurnOutcome>, RulesError> {
        let outcome = self.game.apply_action(&mut self.state, action)?;

        if !self.recorded {
            if let Some(result) = self.game.is_terminal(&self.state) {
                self.recorded = true;
                if let Err(err) = self.high_score.check_and_update(result.score()) {
                    tracing::warn!(error = %err, "could not save high score");
                }
            }
        }

        Ok(outcome)
    }

    /// Deal a new board with the same configuration.
    pub fn restart(&mut self, seed: u64) {
        self.state = self.game.new_state(seed);
        self.seed = seed;
        self.recorded = false;
        self.high_score.reload();
        tracing::info!(seed, "restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;
    use crate::scores::MemoryStore;
    use rustc_hash::FxHashMap;

    fn session(store: MemoryStore) -> Session<MemoryStore> {
        let builder = ConcentrationGameBuilder::new().columns(2).rows(2).max_attempts(4);
        Session::new(builder, store, 99).unwrap()
    }

    /// Pairs of card IDs grouped by symbol, read straight off the board.
    fn pairs(state: &GameState) -> Vec<(CardId, CardId)> {
        let mut by_symbol: FxHashMap<_, Vec<CardId>> = FxHashMap::default();
        for card in state.board.cards() {
            by_symbol.entry(card.symbol).or_default().push(card.id);
        }
        let mut pairs: Vec<_> = by_symbol.values().map(|ids| (ids[0], ids[1])).collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_win_records_high_score() {
        let mut session = session(MemoryStore::with_score(1));

        for (a, b) in pairs(session.state()) {
            session.flip(a).unwrap();
            session.flip(b).unwrap();
            assert!(session.resolve().unwrap().is_match());
        }

        assert_eq!(session.result(), Some(GameResult::Won { score: 2 }));
        assert_eq!(session.high_score(), 2);
        assert_eq!(session.hud().banner(), Some("You Win!"));
        assert_eq!(session.hud().high_score_text(), "High Score: 2");
    }

    #[test]
    fn test_loss_keeps_better_high_score() {
        let mut session = session(MemoryStore::with_score(10));
        let (a, _) = pairs(session.state())[0];
        let (c, _) = pairs(session.state())[1];

        while session.result().is_none() {
            session.flip(a).unwrap();
            session.flip(c).unwrap();
            session.resolve().unwrap();
        }

        assert_eq!(session.state().phase, Phase::Lost);
        assert_eq!(session.high_score(), 10);
        assert_eq!(session.hud().banner(), Some("Game Over!"));
    }

    #[test]
    fn test_resolve_without_two_cards() {
        let mut session = session(MemoryStore::default());
        assert_eq!(session.resolve(), Err(RulesError::NothingToResolve));
    }

    #[test]
    fn test_restart_deals_fresh_board() {
        let mut session = session(MemoryStore::default());
        let (a, b) = pairs(session.state())[0];
        session.flip(a).unwrap();
        session.flip(b).unwrap();
        session.resolve().unwrap();
        assert_eq!(session.state().score, 1);

        session.restart(1234);

        assert_eq!(session.seed(), 1234);
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().attempts, 4);
        assert_eq!(session.state().board.hidden_cards().count(), 4);
    }

    #[test]
    fn test_resume_from_saved_game() {
        let mut session = session(MemoryStore::default());
        let (a, _) = pairs(session.state())[0];
        session.flip(a).unwrap();

        let bytes = session.save().to_bytes().unwrap();
        let resumed = Session::resume(SavedGame::from_bytes(&bytes).unwrap(), MemoryStore::default()).unwrap();

        assert_eq!(resumed.state().open.as_slice(), &[a]);
        assert_eq!(resumed.seed(), 99);
    }

    #[test]
    fn test_restart_after_resume_keeps_saved_config() {
        let session = Session::new(
            ConcentrationGameBuilder::new()
                .columns(2)
                .rows(2)
                .max_attempts(4)
                .symbol_count(1)
                .reveal_delay_ms(900),
            MemoryStore::default(),
            3,
        )
        .unwrap();

        let mut resumed = Session::resume(session.save(), MemoryStore::default()).unwrap();
        resumed.restart(5);

        let config = resumed.game().config();
        assert_eq!((config.columns, config.rows), (2, 2));
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.symbol_count, Some(1));
        assert_eq!(config.reveal_delay_ms, 900);
        assert_eq!(resumed.state().board.columns(), 2);
        assert_eq!(resumed.state().attempts, 4);
    }

    #[test]
    fn test_resume_rejects_config_mismatch() {
        let session = session(MemoryStore::default());

        let mut saved = session.save();
        saved.config = BoardConfig::default();
        assert!(matches!(
            Session::resume(saved, MemoryStore::default()),
            Err(Error::Snapshot(SnapshotError::Invalid(_)))
        ));

        let mut saved = session.save();
        saved.config.max_attempts = 10;
        assert!(Session::resume(saved, MemoryStore::default()).is_err());

        let mut saved = session.save();
        saved.config.rows = 0;
        assert!(matches!(
            Session::resume(saved, MemoryStore::default()),
            Err(Error::Config(ConfigError::ZeroRows))
        ));
    }
}
