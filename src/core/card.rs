//! Cards: grid identity, symbol, and face state.
//!
//! Every dealt card has a `CardId`, which is also its grid cell index:
//! cells are numbered row-major, `index = row * columns + column`.
//! Two cards form a pair when they carry the same `SymbolId`.

use serde::{Deserialize, Serialize};

/// Card identifier, equal to the card's row-major cell index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Cell index for slice access.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Symbol carried by a card. Equal symbols match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u16);

impl SymbolId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Which side of a card is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    /// Face-down, can be flipped.
    #[default]
    Hidden,
    /// Face-up while its turn is in progress.
    Revealed,
    /// Part of a matched pair; removed from play.
    Matched,
}

/// A dealt card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Grid cell of this card.
    pub id: CardId,

    /// Pair symbol.
    pub symbol: SymbolId,

    /// Current face state.
    pub face: CardFace,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(id: CardId, symbol: SymbolId) -> Self {
        Self {
            id,
            symbol,
            face: CardFace::Hidden,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.face == CardFace::Hidden
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.face == CardFace::Revealed
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.face == CardFace::Matched
    }

    /// Does this card pair with `other`?
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.id != other.id && self.symbol == other.symbol
    }
}
