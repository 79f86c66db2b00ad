//! The card grid: dealing, lookup, and face updates.
//!
//! The `Board` stores one card per dealt cell in an `im::Vector`, so
//! cloning a board (for agents or snapshots) is O(1). Cells are numbered
//! row-major. With an odd cell count the last cell holds no card.
//!
//! ## Usage
//!
//! ```
//! use rust_concentration::core::{Board, BoardConfig, GameRng};
//!
//! let config = BoardConfig::new().with_columns(4).with_rows(3);
//! let mut rng = GameRng::new(42);
//! let board = Board::deal(&config, &mut rng);
//!
//! assert_eq!(board.len(), 12);
//! assert_eq!(board.remaining_pairs(), 6);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardFace, CardId, SymbolId};
use super::config::{BoardConfig, MAX_CELLS};
use super::rng::GameRng;
use crate::error::ConfigError;

/// A grid of dealt cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: usize,
    rows: usize,
    /// Dealt cards, indexed by `CardId`. May be one short of the cell count.
    cards: Vector<Card>,
}

impl Board {
    /// Deal a freshly shuffled board.
    ///
    /// Builds `pair_count` pairs, shuffles them, and lays them out row-major.
    /// Pair `p` carries symbol `p % symbol_count`.
    pub fn deal(config: &BoardConfig, rng: &mut GameRng) -> Self {
        let symbol_count = config.effective_symbol_count().max(1);

        let mut symbols: Vec<u16> = Vec::with_capacity(config.pair_count() * 2);
        for pair in 0..config.pair_count() {
            let symbol = (pair % symbol_count) as u16;
            symbols.push(symbol);
            symbols.push(symbol);
        }

        rng.shuffle(&mut symbols);

        tracing::debug!(
            columns = config.columns,
            rows = config.rows,
            pairs = config.pair_count(),
            seed = rng.seed(),
            "dealt board"
        );

        Self::layout(config.columns, config.rows, &symbols)
    }

    /// Lay out a board from an explicit symbol sequence (row-major).
    ///
    /// Useful for fixed puzzles and tests. `symbols` may be shorter than the
    /// grid; trailing cells stay empty.
    pub fn from_symbols(columns: usize, rows: usize, symbols: &[u16]) -> Result<Self, ConfigError> {
        if columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        let cells = columns.saturating_mul(rows);
        if cells > MAX_CELLS {
            return Err(ConfigError::TooManyCells { cells, max: MAX_CELLS });
        }
        if symbols.len() > cells {
            return Err(ConfigError::TooManyCells {
                cells: symbols.len(),
                max: cells,
            });
        }
        Ok(Self::layout(columns, rows, symbols))
    }

    fn layout(columns: usize, rows: usize, symbols: &[u16]) -> Self {
        let cards = symbols
            .iter()
            .enumerate()
            .map(|(index, &symbol)| Card::new(CardId::new(index as u16), SymbolId::new(symbol)))
            .collect();

        Self { columns, rows, cards }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total grid cells, including an empty trailing cell.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Number of dealt cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get a card by ID. `None` for empty or out-of-range cells.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Cell ID at a grid position, if inside the grid.
    #[must_use]
    pub fn id_at(&self, column: usize, row: usize) -> Option<CardId> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(CardId::new((row * self.columns + column) as u16))
    }

    /// Card at a grid position.
    #[must_use]
    pub fn card_at(&self, column: usize, row: usize) -> Option<&Card> {
        self.id_at(column, row).and_then(|id| self.card(id))
    }

    /// Grid position `(column, row)` of a cell ID.
    #[must_use]
    pub fn position(&self, id: CardId) -> Option<(usize, usize)> {
        let index = id.index();
        if index >= self.cell_count() {
            return None;
        }
        Some((index % self.columns, index / self.columns))
    }

    /// Iterate over all dealt cards in cell order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// IDs of face-down cards.
    pub fn hidden_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().filter(|c| c.is_hidden()).map(|c| c.id)
    }

    /// Pairs not yet matched.
    #[must_use]
    pub fn remaining_pairs(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_matched()).count() / 2
    }

    /// Change a card's face. Returns the previous face, or `None` if no card.
    pub fn set_face(&mut self, id: CardId, face: CardFace) -> Option<CardFace> {
        let card = self.cards.get_mut(id.index())?;
        let old = card.face;
        card.face = face;
        Some(old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn symbol_counts(board: &Board) -> FxHashMap<SymbolId, usize> {
        let mut counts = FxHashMap::default();
        for card in board.cards() {
            *counts.entry(card.symbol).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_deal_default_board() {
        let config = BoardConfig::default();
        let mut rng = GameRng::new(42);
        let board = Board::deal(&config, &mut rng);

        // 9x5 = 45 cells, 22 pairs, one empty cell
        assert_eq!(board.cell_count(), 45);
        assert_eq!(board.len(), 44);
        assert_eq!(board.remaining_pairs(), 22);
        assert!(board.card(CardId::new(44)).is_none());

        let counts = symbol_counts(&board);
        assert_eq!(counts.len(), 22);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_deal_is_deterministic() {
        let config = BoardConfig::new().with_columns(4).with_rows(4);

        let a = Board::deal(&config, &mut GameRng::new(7));
        let b = Board::deal(&config, &mut GameRng::new(7));
        let c = Board::deal(&config, &mut GameRng::new(8));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_deal_with_shared_symbols() {
        let config = BoardConfig::new()
            .with_columns(4)
            .with_rows(2)
            .with_symbol_count(2);
        let board = Board::deal(&config, &mut GameRng::new(1));

        let counts = symbol_counts(&board);
        assert_eq!(counts.len(), 2);
        assert!(counts.values().all(|&n| n == 4));
    }

    #[test]
    fn test_all_cards_start_hidden() {
        let board = Board::deal(&BoardConfig::default(), &mut GameRng::new(3));
        assert_eq!(board.hidden_cards().count(), board.len());
    }

    #[test]
    fn test_positions_are_row_major() {
        let board = Board::from_symbols(3, 2, &[0, 1, 2, 0, 1, 2]).unwrap();

        assert_eq!(board.id_at(0, 0), Some(CardId::new(0)));
        assert_eq!(board.id_at(2, 0), Some(CardId::new(2)));
        assert_eq!(board.id_at(0, 1), Some(CardId::new(3)));
        assert_eq!(board.id_at(3, 0), None);
        assert_eq!(board.id_at(0, 2), None);

        assert_eq!(board.position(CardId::new(4)), Some((1, 1)));
        assert_eq!(board.position(CardId::new(6)), None);

        assert_eq!(board.card_at(2, 1).map(|c| c.symbol), Some(SymbolId::new(2)));
    }

    #[test]
    fn test_from_symbols_validation() {
        assert!(matches!(
            Board::from_symbols(0, 2, &[]),
            Err(ConfigError::ZeroColumns)
        ));
        assert!(matches!(
            Board::from_symbols(2, 0, &[]),
            Err(ConfigError::ZeroRows)
        ));
        assert!(Board::from_symbols(1, 2, &[0, 0, 1]).is_err());
    }

    #[test]
    fn test_set_face() {
        let mut board = Board::from_symbols(2, 1, &[0, 0]).unwrap();

        assert_eq!(board.set_face(CardId::new(0), CardFace::Revealed), Some(CardFace::Hidden));
        assert!(board.card(CardId::new(0)).unwrap().is_revealed());
        assert_eq!(board.set_face(CardId::new(9), CardFace::Revealed), None);

        board.set_face(CardId::new(0), CardFace::Matched);
        board.set_face(CardId::new(1), CardFace::Matched);
        assert_eq!(board.remaining_pairs(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::from_symbols(2, 1, &[0, 0]).unwrap();
        let mut copy = board.clone();
        copy.set_face(CardId::new(1), CardFace::Revealed);

        assert!(board.card(CardId::new(1)).unwrap().is_hidden());
        assert!(copy.card(CardId::new(1)).unwrap().is_revealed());
    }
}
