//! Player actions and action history.
//!
//! A turn is two `Flip` actions followed by one `Resolve`. Front-ends
//! usually show both open cards for a moment before sending `Resolve`.

use serde::{Deserialize, Serialize};

use super::card::CardId;

/// A player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Turn a face-down card face-up.
    Flip(CardId),
    /// Evaluate the two open cards and finish the turn.
    Resolve,
}

impl Action {
    /// Card targeted by this action, if any.
    #[must_use]
    pub fn card(&self) -> Option<CardId> {
        match self {
            Action::Flip(id) => Some(*id),
            Action::Resolve => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Flip(id) => write!(f, "Flip {}", id),
            Action::Resolve => write!(f, "Resolve"),
        }
    }
}

/// A recorded action with metadata for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            action,
            turn,
            sequence,
        }
    }
}
