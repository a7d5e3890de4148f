//! Strictly Memory terminal front-end.
//!
//! # Architecture
//!
//! - **Config**: TOML file with game defaults and timer delays
//! - **TUI**: ratatui rendering of a [`TerminalDisplay`] view model
//! - **Autoplay**: a perfect-memory bot that plays headlessly on virtual time

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod autoplay;
mod cli;
mod config;
mod logging;
mod terminal_display;
mod tui;

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_memory::{Difficulty, GameController, GameSummary, ManualTimeline, RecordingDisplay};
use tracing::instrument;

// Crate-level exports - Autoplay
pub use autoplay::{MemoryBot, play_to_completion};

// Crate-level exports - CLI and configuration
pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError, GameSettings};

// Crate-level exports - Logging
pub use logging::{init_file, init_stderr};

// Crate-level exports - Terminal UI
pub use terminal_display::{CELEBRATION_FRAMES, TerminalDisplay};
pub use tui::{App, CursorMove, KeyCommand, map_key, move_cursor, run_tui};

/// A seeded RNG when `seed` is given, otherwise one seeded from entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy)
}

/// Plays one headless game with the configured timings.
#[instrument(skip(config))]
pub fn run_autoplay(
    config: &AppConfig,
    difficulty: Difficulty,
    seed: Option<u64>,
) -> anyhow::Result<GameSummary> {
    let mut controller = GameController::with_parts(
        RecordingDisplay::new(),
        rng_from_seed(seed),
        ManualTimeline::new(),
        *config.timings(),
        difficulty,
    );
    let summary = play_to_completion(&mut controller)?;
    tracing::info!(status = controller.display().status(), "Final status");
    Ok(summary)
}
