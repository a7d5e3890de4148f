//! Difficulty levels and the grid geometry they imply.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Difficulty level of a memory game.
///
/// Each level fixes the grid size and the number of pairs on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// 3×4 grid, 6 pairs.
    Easy,
    /// 4×4 grid, 8 pairs.
    #[default]
    Medium,
    /// 4×6 grid, 12 pairs.
    Hard,
}

impl Difficulty {
    /// Number of grid rows.
    #[instrument]
    pub fn rows(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Medium | Self::Hard => 4,
        }
    }

    /// Number of grid columns.
    #[instrument]
    pub fn cols(self) -> usize {
        match self {
            Self::Easy | Self::Medium => 4,
            Self::Hard => 6,
        }
    }

    /// Number of distinct pairs on the board.
    #[instrument]
    pub fn pair_count(self) -> usize {
        match self {
            Self::Easy => 6,
            Self::Medium => 8,
            Self::Hard => 12,
        }
    }

    /// Total number of cards (always `2 × pair_count`).
    pub fn card_count(self) -> usize {
        self.pair_count() * 2
    }
}
