//! Card-picking policies for automated play.
//!
//! Policies are trait-based to allow customization:
//! - `RandomPolicy`: Flips uniformly among face-down cards
//! - `MemoryPolicy`: Remembers every symbol it has seen and plays known
//!   pairs first
//!
//! Policies only see a `PublicView`, so they never peek at face-down symbols.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{CardId, GameRng, GameState, SymbolId};

// =============================================================================
// Public View
// =============================================================================

/// What a player can see of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicView {
    /// Face-down cards in cell order.
    pub hidden: Vec<CardId>,

    /// Cards open this turn with their symbols.
    pub open: SmallVec<[(CardId, SymbolId); 2]>,

    /// Remaining attempts.
    pub attempts: u32,
}

impl PublicView {
    /// Build the view of a state.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        let open = state
            .open
            .iter()
            .filter_map(|&id| state.board.card(id).map(|c| (id, c.symbol)))
            .collect();

        Self {
            hidden: state.board.hidden_cards().collect(),
            open,
            attempts: state.attempts,
        }
    }
}

// =============================================================================
// Policy Trait
// =============================================================================

/// Chooses which card to flip next.
pub trait Policy {
    /// Short name for reports.
    fn name(&self) -> &'static str;

    /// Pick a face-down card to flip.
    ///
    /// Returns `None` only when `view.hidden` is empty.
    fn choose(&mut self, view: &PublicView, rng: &mut GameRng) -> Option<CardId>;

    /// A card was turned face-up and showed `symbol`.
    fn observe(&mut self, _card: CardId, _symbol: SymbolId) {}

    /// A card left play (matched).
    fn forget(&mut self, _card: CardId) {}

    /// Start a new game.
    fn reset(&mut self) {}
}

// =============================================================================
// Random Policy
// =============================================================================

/// Flips a uniformly random face-down card. No memory.
#[derive(Clone, Debug, Default)]
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(&mut self, view: &PublicView, rng: &mut GameRng) -> Option<CardId> {
        rng.choose(&view.hidden).copied()
    }
}

// =============================================================================
// Memory Policy
// =============================================================================

/// Perfect-recall player.
///
/// First flip: a known pair if there is one, otherwise an unseen card.
/// Second flip: the partner of the open card if known, otherwise an
/// unseen card, otherwise anything.
#[derive(Clone, Debug, Default)]
pub struct MemoryPolicy {
    seen: FxHashMap<CardId, SymbolId>,
}

impl MemoryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of face-down cards whose symbol is known.
    #[must_use]
    pub fn known(&self) -> usize {
        self.seen.len()
    }

    /// First card of a known pair among the face-down cards.
    fn known_pair(&self, view: &PublicView) -> Option<CardId> {
        let mut first_of: FxHashMap<SymbolId, CardId> = FxHashMap::default();
        for id in &view.hidden {
            if let Some(&symbol) = self.seen.get(id) {
                if let Some(&first) = first_of.get(&symbol) {
                    return Some(first);
                }
                first_of.insert(symbol, *id);
            }
        }
        None
    }

    fn partner(&self, view: &PublicView, open: CardId, symbol: SymbolId) -> Option<CardId> {
        view.hidden
            .iter()
            .copied()
            .find(|id| *id != open && self.seen.get(id) == Some(&symbol))
    }

    fn unseen(&self, view: &PublicView, rng: &mut GameRng) -> Option<CardId> {
        let unseen: Vec<CardId> = view
            .hidden
            .iter()
            .copied()
            .filter(|id| !self.seen.contains_key(id))
            .collect();
        rng.choose(&unseen).copied()
    }
}

impl Policy for MemoryPolicy {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn choose(&mut self, view: &PublicView, rng: &mut GameRng) -> Option<CardId> {
        match view.open.first() {
            None => self
                .known_pair(view)
                .or_else(|| self.unseen(view, rng))
                .or_else(|| rng.choose(&view.hidden).copied()),
            Some(&(open, symbol)) => self
                .partner(view, open, symbol)
                .or_else(|| self.unseen(view, rng))
                .or_else(|| rng.choose(&view.hidden).copied()),
        }
    }

    fn observe(&mut self, card: CardId, symbol: SymbolId) {
        self.seen.insert(card, symbol);
    }

    fn forget(&mut self, card: CardId) {
        self.seen.remove(&card);
    }

    fn reset(&mut self) {
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, CardFace};

    fn state(symbols: &[u16]) -> GameState {
        let board = Board::from_symbols(symbols.len(), 1, symbols).unwrap();
        GameState::new(board, 10, GameRng::new(0))
    }

    #[test]
    fn test_public_view_hides_symbols() {
        let mut state = state(&[0, 1, 0, 1]);
        state.board.set_face(CardId::new(2), CardFace::Revealed);
        state.open.push(CardId::new(2));

        let view = PublicView::of(&state);

        assert_eq!(view.hidden, vec![CardId::new(0), CardId::new(1), CardId::new(3)]);
        assert_eq!(view.open.as_slice(), &[(CardId::new(2), SymbolId::new(0))]);
        assert_eq!(view.attempts, 10);
    }

    #[test]
    fn test_random_policy_picks_hidden() {
        let view = PublicView::of(&state(&[0, 1, 0, 1]));
        let mut rng = GameRng::new(3);
        let mut policy = RandomPolicy;

        for _ in 0..20 {
            let pick = policy.choose(&view, &mut rng).unwrap();
            assert!(view.hidden.contains(&pick));
        }
    }

    #[test]
    fn test_policies_on_empty_view() {
        let view = PublicView {
            hidden: vec![],
            open: SmallVec::new(),
            attempts: 1,
        };
        let mut rng = GameRng::new(0);

        assert_eq!(RandomPolicy.choose(&view, &mut rng), None);
        assert_eq!(MemoryPolicy::new().choose(&view, &mut rng), None);
    }

    #[test]
    fn test_memory_policy_plays_known_pair() {
        let view = PublicView::of(&state(&[0, 1, 2, 1]));
        let mut policy = MemoryPolicy::new();
        policy.observe(CardId::new(1), SymbolId::new(1));
        policy.observe(CardId::new(3), SymbolId::new(1));

        let pick = policy.choose(&view, &mut GameRng::new(0));
        assert_eq!(pick, Some(CardId::new(1)));
    }

    #[test]
    fn test_memory_policy_finds_partner() {
        let mut state = state(&[0, 1, 0, 1]);
        state.board.set_face(CardId::new(0), CardFace::Revealed);
        state.open.push(CardId::new(0));

        let mut policy = MemoryPolicy::new();
        policy.observe(CardId::new(0), SymbolId::new(0));
        policy.observe(CardId::new(1), SymbolId::new(1));
        policy.observe(CardId::new(2), SymbolId::new(0));

        let pick = policy.choose(&PublicView::of(&state), &mut GameRng::new(0));
        assert_eq!(pick, Some(CardId::new(2)));
    }

    #[test]
    fn test_memory_policy_prefers_unseen() {
        let view = PublicView::of(&state(&[0, 1, 2, 0, 1, 2]));
        let mut policy = MemoryPolicy::new();
        policy.observe(CardId::new(0), SymbolId::new(0));
        policy.observe(CardId::new(1), SymbolId::new(1));

        let pick = policy.choose(&view, &mut GameRng::new(9)).unwrap();
        assert!(pick.raw() >= 2);
    }

    #[test]
    fn test_memory_policy_forget_and_reset() {
        let mut policy = MemoryPolicy::new();
        policy.observe(CardId::new(0), SymbolId::new(0));
        policy.observe(CardId::new(1), SymbolId::new(0));
        assert_eq!(policy.known(), 2);

        policy.forget(CardId::new(0));
        assert_eq!(policy.known(), 1);

        policy.reset();
        assert_eq!(policy.known(), 0);
    }
}
