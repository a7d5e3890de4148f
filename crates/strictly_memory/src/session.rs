//! Per-session game state.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::card::CardState;
use crate::difficulty::Difficulty;
use crate::display::Counters;
use crate::scoring::Tier;

/// Lifecycle phase of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// Dealt but not started.
    #[default]
    Idle,
    /// Clock running, flips accepted.
    Running,
    /// Clock stopped, flips rejected.
    Paused,
    /// Every pair found.
    Won,
}

/// All mutable state of one game, from deal to win.
///
/// Read through the generated getters; only the controller mutates it.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    difficulty: Difficulty,
    board: Board,
    moves: u32,
    matches_found: u32,
    score: u32,
    elapsed_seconds: u32,
    phase: Phase,
    #[getter(skip)]
    pending: Vec<usize>,
    #[getter(skip)]
    locked: bool,
    #[getter(skip)]
    hint_generation: u64,
    #[getter(skip)]
    hint_showing: bool,
}

impl GameSession {
    /// Creates an idle session around a freshly dealt board.
    pub fn new(difficulty: Difficulty, board: Board) -> Self {
        Self {
            difficulty,
            board,
            moves: 0,
            matches_found: 0,
            score: 0,
            elapsed_seconds: 0,
            phase: Phase::Idle,
            pending: Vec::with_capacity(2),
            locked: false,
            hint_generation: 0,
            hint_showing: false,
        }
    }

    /// Cards flipped and waiting for resolution (at most two).
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    /// Returns true while a completed pair awaits resolution.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns true while a hint is showing every card.
    pub fn is_hint_showing(&self) -> bool {
        self.hint_showing
    }

    /// Pairs on this board.
    pub fn pair_count(&self) -> usize {
        self.difficulty.pair_count()
    }

    /// Returns true once every pair has been found.
    pub fn is_complete(&self) -> bool {
        self.matches_found as usize == self.pair_count()
    }

    /// Snapshot of the numeric readouts.
    pub fn counters(&self) -> Counters {
        Counters {
            moves: self.moves,
            matches: self.matches_found,
            score: self.score,
            elapsed_seconds: self.elapsed_seconds,
        }
    }

    /// Final report, available once the game is won.
    pub fn summary(&self) -> Option<GameSummary> {
        (self.phase == Phase::Won).then(|| GameSummary {
            difficulty: self.difficulty,
            moves: self.moves,
            matches: self.matches_found,
            score: self.score,
            elapsed_seconds: self.elapsed_seconds,
            tier: Tier::rate(self.moves, self.pair_count()),
        })
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn flip(&mut self, index: usize) {
        self.board.set_state(index, CardState::Flipped);
        self.pending.push(index);
        if self.pending.len() == 2 {
            self.moves += 1;
            self.locked = true;
        }
    }

    pub(crate) fn resolve_pair(&mut self, first: usize, second: usize, matched: bool) {
        let state = if matched {
            CardState::Matched
        } else {
            CardState::Hidden
        };
        self.board.set_state(first, state);
        self.board.set_state(second, state);
        self.pending.clear();
        self.locked = false;
        if matched {
            self.matches_found += 1;
        }
    }

    pub(crate) fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) fn deduct_score(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    pub(crate) fn tick(&mut self) {
        self.elapsed_seconds += 1;
    }

    pub(crate) fn begin_hint(&mut self) -> u64 {
        self.hint_generation += 1;
        self.hint_showing = true;
        self.hint_generation
    }

    /// Ends the reveal if `generation` is the newest one. Returns whether it did.
    pub(crate) fn end_hint(&mut self, generation: u64) -> bool {
        if self.hint_showing && generation == self.hint_generation {
            self.hint_showing = false;
            true
        } else {
            false
        }
    }
}

/// Final result of a won game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    /// Difficulty played.
    pub difficulty: Difficulty,
    /// Moves taken.
    pub moves: u32,
    /// Pairs found.
    pub matches: u32,
    /// Final score, bonuses included.
    pub score: u32,
    /// Seconds on the clock.
    pub elapsed_seconds: u32,
    /// Performance rating.
    pub tier: Tier,
}
