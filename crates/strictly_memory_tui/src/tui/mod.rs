//! Terminal UI for Strictly Memory.

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{CursorMove, KeyCommand, map_key, move_cursor};

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use strictly_memory::{Difficulty, GameController, ManualTimeline};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::terminal_display::TerminalDisplay;
use crate::{logging, rng_from_seed};

/// How often the screen is redrawn and the timeline advanced.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the interactive game until the user quits.
#[instrument(skip(config))]
pub async fn run_tui(config: &AppConfig, difficulty: Difficulty, seed: Option<u64>) -> Result<()> {
    logging::init_file(config.log_file())?;
    info!("Starting Strictly Memory TUI");

    let controller = GameController::with_parts(
        TerminalDisplay::new(),
        rng_from_seed(seed),
        ManualTimeline::new(),
        *config.timings(),
        difficulty,
    );
    let mut app = App::new(controller);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("TUI exited");
    res
}

/// Single-task event loop: redraw, wait for a key or the next frame, let
/// the measured time pass on the game timeline, then apply the key.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    let (key_tx, mut key_rx) = mpsc::unbounded_channel::<KeyEvent>();
    std::thread::spawn(move || input::forward_keys(key_tx));

    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let key = tokio::select! {
            _ = frames.tick() => {
                app.step_frame();
                None
            }
            key = key_rx.recv() => match key {
                Some(key) => Some(key),
                None => {
                    info!("Key reader closed");
                    return Ok(());
                }
            },
        };

        let now = Instant::now();
        app.advance(now.duration_since(last));
        last = now;

        if let Some(key) = key
            && app.handle_key(key).is_break()
        {
            info!("User quit");
            return Ok(());
        }
    }
}
