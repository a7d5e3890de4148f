//! User actions and the reasons a flip is turned away.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

/// An input event from the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// The start/pause button.
    ToggleStart,
    /// Deal a new board at the current difficulty.
    Reset,
    /// Briefly show every unmatched card.
    Hint,
    /// Switch difficulty, discarding the current game.
    SelectDifficulty(Difficulty),
    /// Turn over the card at this index.
    Flip(usize),
}

/// What an accepted flip did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// First card of a pair is face up.
    Revealed,
    /// Second card is face up and resolution has been scheduled.
    PairComplete {
        /// Whether the two faces are equal.
        is_match: bool,
    },
}

/// Why a flip was ignored. None of these are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum FlipRejection {
    /// The game is idle, paused, or won.
    #[display("game is not running")]
    NotRunning,
    /// No card has that index.
    #[display("card {index} is not on the board")]
    OutOfRange {
        /// Requested index.
        index: usize,
    },
    /// The card is already face up or matched.
    #[display("card {index} is already face up")]
    AlreadyRevealed {
        /// Requested index.
        index: usize,
    },
    /// Two cards are waiting for resolution.
    #[display("waiting for the current pair to resolve")]
    Locked,
    /// A hint is showing every card.
    #[display("a hint is showing")]
    HintShowing,
}
