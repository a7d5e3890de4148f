//! Cards and what a display shows for them.

use serde::{Deserialize, Serialize};

/// Glyph shown on the back of a face-down card.
pub const HIDDEN_GLYPH: &str = "?";

/// Visibility state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardState {
    /// Face down.
    #[default]
    Hidden,
    /// Face up, waiting in the pending pair.
    Flipped,
    /// Paired with its twin; stays face up for the rest of the session.
    Matched,
}

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    index: usize,
    value: &'static str,
    state: CardState,
}

impl Card {
    /// Creates a face-down card.
    pub fn new(index: usize, value: &'static str) -> Self {
        Self {
            index,
            value,
            state: CardState::Hidden,
        }
    }

    /// Position of the card on the board, stable for the session.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The symbol on the card's face.
    pub fn value(&self) -> &'static str {
        self.value
    }

    /// Current visibility state.
    pub fn state(&self) -> CardState {
        self.state
    }

    /// Returns true if the card is face down.
    pub fn is_hidden(&self) -> bool {
        self.state == CardState::Hidden
    }

    /// Returns true if the card has been paired.
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    pub(crate) fn set_state(&mut self, state: CardState) {
        self.state = state;
    }

    /// The face a display should show for the card's current state.
    pub fn face(&self) -> Face {
        match self.state {
            CardState::Hidden => Face::Hidden,
            CardState::Flipped | CardState::Matched => Face::Shown(self.value),
        }
    }
}

/// What a display draws for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Face {
    /// The card's symbol.
    #[display("{_0}")]
    Shown(&'static str),
    /// The card back.
    #[display("{}", HIDDEN_GLYPH)]
    Hidden,
}
