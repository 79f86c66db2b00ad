//! Concentration game implementation.

use crate::core::{Action, Board, BoardConfig, CardFace, CardId, GameRng, GameState, Phase};
use crate::error::{ConfigError, RulesError};
use crate::rules::{GameResult, RulesEngine, TurnOutcome};

/// The concentration rules.
#[derive(Clone, Debug)]
pub struct ConcentrationGame {
    config: BoardConfig,
}

/// Builder for creating a ConcentrationGame.
#[derive(Clone, Debug, Default)]
pub struct ConcentrationGameBuilder {
    config: BoardConfig,
}

impl ConcentrationGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration (e.g. one read from a file).
    pub fn from_config(config: BoardConfig) -> Self {
        Self { config }
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.config.columns = columns;
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.config.rows = rows;
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    pub fn symbol_count(mut self, count: usize) -> Self {
        self.config.symbol_count = Some(count);
        self
    }

    pub fn reveal_delay_ms(mut self, delay: u64) -> Self {
        self.config.reveal_delay_ms = delay;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Build the game and a freshly dealt initial state.
    pub fn build(self, seed: u64) -> Result<(ConcentrationGame, GameState), ConfigError> {
        let game = ConcentrationGame::new(self.config)?;
        let state = game.new_state(seed);
        Ok((game, state))
    }
}

impl ConcentrationGame {
    /// Create the rules for a validated configuration.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Deal a new board and return its initial state.
    pub fn new_state(&self, seed: u64) -> GameState {
        let mut rng = GameRng::new(seed);
        let board = Board::deal(&self.config, &mut rng);
        GameState::new(board, self.config.max_attempts, rng)
    }

    fn flip(&self, state: &mut GameState, id: CardId) -> Result<(), RulesError> {
        if state.is_over() || state.attempts == 0 {
            return Err(RulesError::GameOver);
        }
        if !state.can_open() {
            return Err(RulesError::AwaitingResolution);
        }

        let card = state.board.card(id).ok_or(RulesError::UnknownCard(id))?;
        match card.face {
            CardFace::Hidden => {}
            CardFace::Revealed => return Err(RulesError::AlreadyRevealed(id)),
            CardFace::Matched => return Err(RulesError::AlreadyMatched(id)),
        }

        state.board.set_face(id, CardFace::Revealed);
        state.open.push(id);
        state.record_action(Action::Flip(id));

        tracing::debug!(card = %id, open = state.open.len(), "flipped card");
        Ok(())
    }

    fn resolve(&self, state: &mut GameState) -> Result<TurnOutcome, RulesError> {
        if state.is_over() {
            return Err(RulesError::GameOver);
        }
        let (first, second) = match state.open.as_slice() {
            &[first, second] => (first, second),
            _ => return Err(RulesError::NothingToResolve),
        };
        let (Some(a), Some(b)) = (state.board.card(first), state.board.card(second)) else {
            return Err(RulesError::NothingToResolve);
        };

        let outcome = if a.matches(b) {
            let symbol = a.symbol;
            state.score += 1;
            state.board.set_face(first, CardFace::Matched);
            state.board.set_face(second, CardFace::Matched);

            // Refund the attempt this turn is about to spend, up to the budget.
            if state.attempts < state.max_attempts {
                state.attempts += 1;
            }
            state.matched_pairs += 1;

            if state.matched_pairs >= state.total_pairs {
                state.phase = Phase::Won;
            }

            tracing::info!(%first, %second, %symbol, score = state.score, "pair matched");
            TurnOutcome::Match {
                first,
                second,
                symbol,
            }
        } else {
            state.board.set_face(first, CardFace::Hidden);
            state.board.set_face(second, CardFace::Hidden);

            tracing::debug!(%first, %second, "cards did not match");
            TurnOutcome::Mismatch { first, second }
        };

        state.attempts = state.attempts.saturating_sub(1);
        if state.attempts == 0 && state.phase == Phase::Playing {
            state.phase = Phase::Lost;
        }

        state.record_action(Action::Resolve);
        state.advance_turn();

        match state.phase {
            Phase::Won => tracing::info!(score = state.score, turns = state.turn_number - 1, "game won"),
            Phase::Lost => tracing::info!(score = state.score, "out of attempts"),
            Phase::Playing => {}
        }

        Ok(outcome)
    }
}

impl RulesEngine for ConcentrationGame {
    fn config(&self) -> &BoardConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        if state.is_over() {
            return vec![];
        }
        if state.awaiting_resolution() {
            return vec![Action::Resolve];
        }
        if !state.can_open() {
            return vec![];
        }
        state.board.hidden_cards().map(Action::Flip).collect()
    }

    fn apply_action(
        &mut self,
        state: &mut GameState,
        action: Action,
    ) -> Result<Option<TurnOutcome>, RulesError> {
        match action {
            Action::Flip(id) => self.flip(state, id).map(|()| None),
            Action::Resolve => self.resolve(state).map(Some),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        match state.phase {
            Phase::Playing => None,
            Phase::Won => Some(GameResult::Won { score: state.score }),
            Phase::Lost => Some(GameResult::Lost { score: state.score }),
        }
    }
}
