//! Keyboard mapping, cursor movement, and the key reader thread.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use strictly_memory::{Difficulty, GameAction};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// Cursor step on the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

/// What a key press asks the UI to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Leave the game.
    Quit,
    /// Move the cursor.
    Move(CursorMove),
    /// Flip the card under the cursor.
    FlipAtCursor,
    /// Forward a non-flip action to the controller.
    Game(GameAction),
}

/// Maps a key press to a command. Releases and unbound keys map to nothing.
pub fn map_key(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyCommand::Quit,
        KeyCode::Up | KeyCode::Char('k') => KeyCommand::Move(CursorMove::Up),
        KeyCode::Down | KeyCode::Char('j') => KeyCommand::Move(CursorMove::Down),
        KeyCode::Left | KeyCode::Char('h') => KeyCommand::Move(CursorMove::Left),
        KeyCode::Right | KeyCode::Char('l') => KeyCommand::Move(CursorMove::Right),
        KeyCode::Enter | KeyCode::Char(' ') => KeyCommand::FlipAtCursor,
        KeyCode::Char('s') => KeyCommand::Game(GameAction::ToggleStart),
        KeyCode::Char('r') => KeyCommand::Game(GameAction::Reset),
        KeyCode::Char('?') | KeyCode::Char('i') => KeyCommand::Game(GameAction::Hint),
        KeyCode::Char('1') => KeyCommand::Game(GameAction::SelectDifficulty(Difficulty::Easy)),
        KeyCode::Char('2') => KeyCommand::Game(GameAction::SelectDifficulty(Difficulty::Medium)),
        KeyCode::Char('3') => KeyCommand::Game(GameAction::SelectDifficulty(Difficulty::Hard)),
        _ => return None,
    };
    Some(command)
}

/// Moves a row-major cursor on a `rows × cols` grid, stopping at the edges.
pub fn move_cursor(cursor: usize, step: CursorMove, rows: usize, cols: usize) -> usize {
    if rows == 0 || cols == 0 {
        return 0;
    }
    let (row, col) = (cursor / cols, cursor % cols);

    let (row, col) = match step {
        CursorMove::Up => (row.saturating_sub(1), col),
        CursorMove::Down => ((row + 1).min(rows - 1), col),
        CursorMove::Left => (row, col.saturating_sub(1)),
        CursorMove::Right => (row, (col + 1).min(cols - 1)),
    };
    row * cols + col
}

/// Reads terminal key events and forwards them until the receiver is gone.
///
/// Blocks; run it on its own thread.
pub fn forward_keys(tx: UnboundedSender<KeyEvent>) {
    debug!("Key reader started");
    while !tx.is_closed() {
        match event::poll(Duration::from_millis(100)) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                warn!(error = %e, "Failed to poll terminal events");
                return;
            }
        }
        match event::read() {
            Ok(Event::Key(key)) => {
                if tx.send(key).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Failed to read terminal event");
                return;
            }
        }
    }
    debug!("Key reader stopped");
}
