//! Strictly Memory - memory-matching game logic.
//!
//! A board of face-down card pairs, a flip/match state machine, scoring,
//! and the idle → running → paused → won lifecycle. Nothing here draws or
//! sleeps: visible changes go out through a [`Display`], and time comes
//! from an injected [`Timeline`] that the caller advances.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use strictly_memory::{Difficulty, GameAction, GameController, Phase, RecordingDisplay};
//!
//! let mut game = GameController::seeded(RecordingDisplay::new(), Difficulty::Easy, 7);
//! game.handle(GameAction::ToggleStart);
//! assert_eq!(*game.session().phase(), Phase::Running);
//!
//! game.advance(Duration::from_secs(3));
//! assert_eq!(*game.session().elapsed_seconds(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod card;
mod controller;
mod difficulty;
mod display;
mod palette;
mod scoring;
mod session;
mod timeline;
mod timings;

pub use action::{Flip, FlipRejection, GameAction};
pub use board::{Board, generate_values, shuffle};
pub use card::{Card, CardState, Face, HIDDEN_GLYPH};
pub use controller::{GameController, Task};
pub use difficulty::Difficulty;
pub use display::{Counters, Display, RecordingDisplay};
pub use palette::Category;
pub use scoring::{
    FinalBonus, HINT_PENALTY, MATCH_BASE, MIN_MATCH_POINTS, MOVES_BONUS_BASE, TIME_BONUS_BASE,
    Tier, match_points,
};
pub use session::{GameSession, GameSummary, Phase};
pub use timeline::{Clock, ManualTimeline, Scheduler, TaskId, Timeline, Wakeup};
pub use timings::Timings;
