//! Game state: board, bookkeeping, and the open-card pair.
//!
//! ## GameState
//!
//! Everything the turn state machine needs:
//! - The board and its card faces
//! - Score, remaining attempts, matched pairs
//! - Up to two open cards for the current turn
//! - Phase (playing, won, lost), turn counter, action history
//! - RNG
//!
//! ## Snapshot
//!
//! A serializable copy of the state, encoded with `bincode` for saved games.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{Action, ActionRecord};
use super::board::Board;
use super::card::{Card, CardFace, CardId, SymbolId};
use super::config::MAX_CELLS;
use super::rng::{GameRng, GameRngState};
use crate::error::SnapshotError;

/// Where the game stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Cards can be flipped.
    #[default]
    Playing,
    /// Every pair has been matched.
    Won,
    /// The attempt budget ran out.
    Lost,
}

impl Phase {
    #[must_use]
    pub fn is_over(self) -> bool {
        self != Phase::Playing
    }
}

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// The card grid.
    pub board: Board,

    /// Pairs found so far.
    pub score: u32,

    /// Remaining attempts.
    pub attempts: u32,

    /// Attempt budget; a match never refunds past this.
    pub max_attempts: u32,

    /// Pairs removed from the board.
    pub matched_pairs: u32,

    /// Pairs dealt.
    pub total_pairs: u32,

    /// Cards opened this turn, in flip order.
    pub open: SmallVec<[CardId; 2]>,

    pub phase: Phase,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Action sequence within turn.
    pub action_sequence: u32,

    /// Every accepted action, for replay.
    pub action_history: Vector<ActionRecord>,

    /// Deterministic RNG the board was dealt from.
    pub rng: GameRng,
}

impl GameState {
    /// Create a state for a freshly dealt board.
    #[must_use]
    pub fn new(board: Board, max_attempts: u32, rng: GameRng) -> Self {
        let total_pairs = (board.len() / 2) as u32;
        Self {
            board,
            score: 0,
            attempts: max_attempts,
            max_attempts,
            matched_pairs: 0,
            total_pairs,
            open: SmallVec::new(),
            phase: Phase::Playing,
            turn_number: 1,
            action_sequence: 0,
            action_history: Vector::new(),
            rng,
        }
    }

    /// Can another card be flipped right now?
    ///
    /// True while fewer than two cards are open, attempts remain, and the
    /// game is still in progress.
    #[must_use]
    pub fn can_open(&self) -> bool {
        self.open.len() < 2 && self.attempts > 0 && self.phase == Phase::Playing
    }

    /// Are two cards waiting to be resolved?
    #[must_use]
    pub fn awaiting_resolution(&self) -> bool {
        self.open.len() == 2 && self.phase == Phase::Playing
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// First card opened this turn.
    #[must_use]
    pub fn first_open(&self) -> Option<&Card> {
        self.open.first().and_then(|&id| self.board.card(id))
    }

    /// Second card opened this turn.
    #[must_use]
    pub fn second_open(&self) -> Option<&Card> {
        self.open.get(1).and_then(|&id| self.board.card(id))
    }

    // === Turn Advancement ===

    /// Record an accepted action in history.
    pub fn record_action(&mut self, action: Action) {
        let sequence = self.next_sequence();
        self.action_history
            .push_back(ActionRecord::new(action, self.turn_number, sequence));
    }

    /// Get the next action sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }

    /// Clear the open cards and move to the next turn.
    pub fn advance_turn(&mut self) {
        self.open.clear();
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    // === Display ===

    /// Status lines for the current state.
    #[must_use]
    pub fn hud(&self, high_score: u32) -> Hud {
        Hud {
            score: self.score,
            attempts: self.attempts,
            high_score,
            phase: self.phase,
        }
    }

    // === Snapshots ===

    /// Capture the state for saving.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            score: self.score,
            attempts: self.attempts,
            max_attempts: self.max_attempts,
            matched_pairs: self.matched_pairs,
            open: self.open.clone(),
            phase: self.phase,
            turn_number: self.turn_number,
            action_sequence: self.action_sequence,
            action_history: self.action_history.clone(),
            rng: self.rng.state(),
        }
    }

    /// Rebuild a state from a snapshot, rejecting inconsistent data.
    pub fn restore(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        snapshot.check()?;

        let total_pairs = (snapshot.board.len() / 2) as u32;
        Ok(Self {
            board: snapshot.board,
            score: snapshot.score,
            attempts: snapshot.attempts,
            max_attempts: snapshot.max_attempts,
            matched_pairs: snapshot.matched_pairs,
            total_pairs,
            open: snapshot.open,
            phase: snapshot.phase,
            turn_number: snapshot.turn_number,
            action_sequence: snapshot.action_sequence,
            action_history: snapshot.action_history,
            rng: GameRng::from_state(&snapshot.rng),
        })
    }
}

/// Status lines shown next to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub attempts: u32,
    pub high_score: u32,
    pub phase: Phase,
}

impl Hud {
    #[must_use]
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    #[must_use]
    pub fn attempts_text(&self) -> String {
        format!("Attempts: {}", self.attempts)
    }

    #[must_use]
    pub fn high_score_text(&self) -> String {
        format!("High Score: {}", self.high_score)
    }

    /// End-of-game banner, if the game is over.
    #[must_use]
    pub fn banner(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Playing => None,
            Phase::Won => Some("You Win!"),
            Phase::Lost => Some("Game Over!"),
        }
    }

    /// All lines in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.score_text(), self.attempts_text(), self.high_score_text()];
        if let Some(banner) = self.banner() {
            lines.push(banner.to_string());
        }
        lines
    }
}

/// Serializable game state for save files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub score: u32,
    pub attempts: u32,
    pub max_attempts: u32,
    pub matched_pairs: u32,
    pub open: SmallVec<[CardId; 2]>,
    pub phase: Phase,
    pub turn_number: u32,
    pub action_sequence: u32,
    pub action_history: Vector<ActionRecord>,
    pub rng: GameRngState,
}

impl Snapshot {
    /// Encode with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode with `bincode`. Consistency is checked by `GameState::restore`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    fn check(&self) -> Result<(), SnapshotError> {
        let invalid = |message: String| -> Result<(), SnapshotError> {
            Err(SnapshotError::Invalid(message))
        };
        let board = &self.board;

        if board.columns() == 0 || board.rows() == 0 {
            return invalid(format!("{}x{} board", board.columns(), board.rows()));
        }
        let cells = board.columns().saturating_mul(board.rows());
        if cells > MAX_CELLS {
            return invalid(format!("{} cells exceed {}", cells, MAX_CELLS));
        }
        if board.len() > cells || board.len() < 2 || board.len() % 2 != 0 {
            return invalid(format!("{} cards on {} cells", board.len(), cells));
        }

        let mut symbols: FxHashMap<SymbolId, usize> = FxHashMap::default();
        let mut matched = 0usize;
        let mut revealed = 0usize;
        for (index, card) in board.cards().enumerate() {
            if card.id.index() != index {
                return invalid(format!("{} stored in cell {}", card.id, index));
            }
            *symbols.entry(card.symbol).or_default() += 1;
            match card.face {
                CardFace::Hidden => {}
                CardFace::Revealed => revealed += 1,
                CardFace::Matched => matched += 1,
            }
        }
        if let Some((symbol, _)) = symbols.iter().find(|(_, n)| **n % 2 != 0) {
            return invalid(format!("{} has no partner", symbol));
        }

        if self.open.len() > 2 {
            return invalid(format!("{} open cards", self.open.len()));
        }
        for &id in &self.open {
            if !board.card(id).is_some_and(Card::is_revealed) {
                return invalid(format!("open {} is not a face-up card", id));
            }
        }
        if revealed != self.open.len() {
            return invalid(format!(
                "{} face-up cards but {} open",
                revealed,
                self.open.len()
            ));
        }

        if self.attempts > self.max_attempts {
            return invalid(format!(
                "attempts {} exceed budget {}",
                self.attempts, self.max_attempts
            ));
        }
        let total_pairs = (board.len() / 2) as u32;
        if self.matched_pairs > total_pairs {
            return invalid(format!(
                "{} matched pairs on a board of {}",
                self.matched_pairs, total_pairs
            ));
        }
        if matched != 2 * self.matched_pairs as usize || self.score != self.matched_pairs {
            return invalid(format!(
                "{} matched cards for {} pairs and score {}",
                matched, self.matched_pairs, self.score
            ));
        }

        let expected = if self.matched_pairs == total_pairs {
            Phase::Won
        } else if self.attempts == 0 {
            Phase::Lost
        } else {
            Phase::Playing
        };
        if self.phase != expected {
            return invalid(format!("phase {:?} should be {:?}", self.phase, expected));
        }
        if self.phase.is_over() && !self.open.is_empty() {
            return invalid("open cards after the game ended".to_string());
        }
        if self.turn_number == 0 {
            return invalid("turn 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_state() -> GameState {
        let board = Board::from_symbols(2, 2, &[0, 1, 1, 0]).unwrap();
        GameState::new(board, 5, GameRng::new(42))
    }

    #[test]
    fn test_new_state() {
        let state = small_state();

        assert_eq!(state.score, 0);
        assert_eq!(state.attempts, 5);
        assert_eq!(state.max_attempts, 5);
        assert_eq!(state.total_pairs, 2);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.phase, Phase::Playing);
        assert!(state.open.is_empty());
        assert!(state.can_open());
        assert!(!state.awaiting_resolution());
    }

    #[test]
    fn test_can_open_rules() {
        let mut state = small_state();

        state.open.push(CardId::new(0));
        assert!(state.can_open());

        state.open.push(CardId::new(1));
        assert!(!state.can_open());
        assert!(state.awaiting_resolution());

        state.open.clear();
        state.attempts = 0;
        assert!(!state.can_open());

        state.attempts = 3;
        state.phase = Phase::Won;
        assert!(!state.can_open());
    }

    #[test]
    fn test_open_accessors() {
        let mut state = small_state();
        state.open.push(CardId::new(1));
        state.open.push(CardId::new(2));

        assert_eq!(state.first_open().map(|c| c.id), Some(CardId::new(1)));
        assert_eq!(state.second_open().map(|c| c.id), Some(CardId::new(2)));
    }

    #[test]
    fn test_history_and_turns() {
        let mut state = small_state();

        state.record_action(Action::Flip(CardId::new(0)));
        state.record_action(Action::Flip(CardId::new(1)));
        state.advance_turn();
        state.record_action(Action::Flip(CardId::new(2)));

        assert_eq!(state.action_history.len(), 3);
        assert_eq!(state.action_history[1].sequence, 1);
        assert_eq!(state.action_history[2].turn, 2);
        assert_eq!(state.action_history[2].sequence, 0);
    }

    #[test]
    fn test_hud_lines() {
        let mut state = small_state();
        state.score = 3;

        let hud = state.hud(7);
        assert_eq!(
            hud.lines(),
            vec!["Score: 3", "Attempts: 5", "High Score: 7"]
        );

        state.phase = Phase::Lost;
        assert_eq!(state.hud(7).banner(), Some("Game Over!"));

        state.phase = Phase::Won;
        let hud = state.hud(9);
        assert_eq!(hud.banner(), Some("You Win!"));
        assert_eq!(hud.lines().len(), 4);
        assert_eq!(hud.high_score_text(), "High Score: 9");
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut state = small_state();
        state.board.set_face(CardId::new(0), CardFace::Revealed);
        state.open.push(CardId::new(0));
        state.record_action(Action::Flip(CardId::new(0)));

        let bytes = state.snapshot().to_bytes().unwrap();
        let restored = GameState::restore(Snapshot::from_bytes(&bytes).unwrap()).unwrap();

        assert_eq!(restored.board, state.board);
        assert_eq!(restored.open, state.open);
        assert_eq!(restored.action_history, state.action_history);
        assert_eq!(restored.rng.state(), state.rng.state());
    }

    #[test]
    fn test_restore_rejects_inconsistent_open_card() {
        let mut snapshot = small_state().snapshot();
        // Card 0 is still face-down.
        snapshot.open.push(CardId::new(0));

        assert!(matches!(
            GameState::restore(snapshot),
            Err(SnapshotError::Invalid(_))
        ));
    }

    #[test]
    fn test_restore_rejects_attempt_overflow() {
        let mut snapshot = small_state().snapshot();
        snapshot.attempts = 99;

        assert!(GameState::restore(snapshot).is_err());
    }

    fn crafted_board(columns: usize, rows: usize, cards: &[(u16, u16)]) -> Board {
        let cards: Vec<_> = cards
            .iter()
            .map(|&(id, symbol)| serde_json::json!({ "id": id, "symbol": symbol, "face": "Hidden" }))
            .collect();
        serde_json::from_value(serde_json::json!({
            "columns": columns,
            "rows": rows,
            "cards": cards,
        }))
        .unwrap()
    }

    fn is_invalid(snapshot: Snapshot) -> bool {
        matches!(GameState::restore(snapshot), Err(SnapshotError::Invalid(_)))
    }

    fn won_snapshot() -> Snapshot {
        let mut state = small_state();
        for raw in 0..4 {
            state.board.set_face(CardId::new(raw), CardFace::Matched);
        }
        state.score = 2;
        state.matched_pairs = 2;
        state.phase = Phase::Won;
        state.snapshot()
    }

    #[test]
    fn test_restore_accepts_finished_game() {
        let restored = GameState::restore(won_snapshot()).unwrap();
        assert_eq!(restored.phase, Phase::Won);
        assert_eq!(restored.total_pairs, 2);
    }

    #[test]
    fn test_restore_rejects_won_game_still_playing() {
        let mut snapshot = won_snapshot();
        snapshot.phase = Phase::Playing;
        assert!(is_invalid(snapshot));
    }

    #[test]
    fn test_restore_rejects_phase_mismatch() {
        let mut spent = small_state().snapshot();
        spent.attempts = 0;
        assert!(is_invalid(spent));

        let mut early = small_state().snapshot();
        early.phase = Phase::Lost;
        assert!(is_invalid(early));
    }

    #[test]
    fn test_restore_rejects_score_without_matched_cards() {
        let mut snapshot = small_state().snapshot();
        snapshot.matched_pairs = 1;
        snapshot.score = 1;
        assert!(is_invalid(snapshot));

        let mut snapshot = won_snapshot();
        snapshot.score = 1;
        assert!(is_invalid(snapshot));
    }

    #[test]
    fn test_restore_rejects_same_card_opened_twice() {
        let mut state = small_state();
        state.board.set_face(CardId::new(0), CardFace::Revealed);
        let mut snapshot = state.snapshot();
        snapshot.open.push(CardId::new(0));
        snapshot.open.push(CardId::new(0));
        assert!(is_invalid(snapshot));
    }

    #[test]
    fn test_restore_rejects_malformed_boards() {
        let with_board = |board: Board| {
            let mut snapshot = small_state().snapshot();
            snapshot.board = board;
            snapshot
        };

        // Card ids out of cell order.
        assert!(is_invalid(with_board(crafted_board(2, 1, &[(1, 0), (0, 0)]))));
        // Zero-width grid.
        assert!(is_invalid(with_board(crafted_board(0, 2, &[(0, 0), (1, 0)]))));
        // More cells than a CardId can address.
        assert!(is_invalid(with_board(crafted_board(70_000, 1, &[(0, 0), (1, 0)]))));
        // More cards than cells.
        assert!(is_invalid(with_board(crafted_board(1, 1, &[(0, 0), (1, 0)]))));
        // A symbol without its partner.
        assert!(is_invalid(with_board(crafted_board(2, 1, &[(0, 0), (1, 1)]))));

        assert!(GameState::restore(with_board(crafted_board(2, 1, &[(0, 3), (1, 3)]))).is_ok());
    }

    #[test]
    fn test_from_bytes_garbage() {
        assert!(matches!(
            Snapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::Codec(_))
        ));
    }
}
