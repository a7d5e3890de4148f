//! Scoring rules.

use serde::{Deserialize, Serialize};

/// Points a match is never worth less than.
pub const MIN_MATCH_POINTS: u32 = 10;
/// Base points for a match before moves and time are subtracted.
pub const MATCH_BASE: u32 = 100;
/// Time bonus ceiling; one point is lost per elapsed second.
pub const TIME_BONUS_BASE: u32 = 300;
/// Moves bonus ceiling; one point is lost per move.
pub const MOVES_BONUS_BASE: u32 = 200;
/// Cost of one hint.
pub const HINT_PENALTY: u32 = 50;

/// Points for a match made after `moves` moves and `elapsed_seconds`.
///
/// `max(100 − moves − elapsed, 10)`.
pub fn match_points(moves: u32, elapsed_seconds: u32) -> u32 {
    MATCH_BASE
        .saturating_sub(moves)
        .saturating_sub(elapsed_seconds)
        .max(MIN_MATCH_POINTS)
}

/// Bonus added once the board is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalBonus {
    /// `max(300 − elapsed, 0)`.
    pub time_bonus: u32,
    /// `max(200 − moves, 0)`.
    pub moves_bonus: u32,
}

impl FinalBonus {
    /// Computes the end-of-game bonus.
    pub fn compute(moves: u32, elapsed_seconds: u32) -> Self {
        Self {
            time_bonus: TIME_BONUS_BASE.saturating_sub(elapsed_seconds),
            moves_bonus: MOVES_BONUS_BASE.saturating_sub(moves),
        }
    }

    /// Sum of both bonuses.
    pub fn total(self) -> u32 {
        self.time_bonus + self.moves_bonus
    }
}

/// How well a finished game went, judged by moves per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// At most 1.5 moves per pair.
    #[strum(to_string = "Excellent memory!")]
    Excellent,
    /// At most 2 moves per pair.
    #[strum(to_string = "Good job!")]
    Good,
    /// Anything worse.
    #[strum(to_string = "Keep practicing!")]
    PracticeMore,
}

impl Tier {
    /// Rates a game cleared in `moves` moves on a board of `pair_count` pairs.
    pub fn rate(moves: u32, pair_count: usize) -> Self {
        // Compare doubled values to keep 1.5 × pairs exact in integers.
        let doubled_moves = u64::from(moves) * 2;
        let pairs = pair_count as u64;
        if doubled_moves <= pairs * 3 {
            Self::Excellent
        } else if doubled_moves <= pairs * 4 {
            Self::Good
        } else {
            Self::PracticeMore
        }
    }
}
