//! Application state: the controller plus the cursor.

use std::ops::ControlFlow;
use std::time::Duration;

use crossterm::event::KeyEvent;
use strictly_memory::{Difficulty, GameAction, GameController};
use tracing::debug;

use super::input::{KeyCommand, map_key, move_cursor};
use crate::terminal_display::TerminalDisplay;

/// The terminal game: a controller driving a [`TerminalDisplay`], and the
/// card the cursor is on.
#[derive(Debug)]
pub struct App {
    controller: GameController<TerminalDisplay>,
    cursor: usize,
}

impl App {
    /// Wraps a controller with the cursor on the first card.
    pub fn new(controller: GameController<TerminalDisplay>) -> Self {
        Self {
            controller,
            cursor: 0,
        }
    }

    /// The game controller.
    pub fn controller(&self) -> &GameController<TerminalDisplay> {
        &self.controller
    }

    /// Index of the card under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current difficulty.
    pub fn difficulty(&self) -> Difficulty {
        *self.controller.session().difficulty()
    }

    /// Handles one key press. Breaks when the user quits.
    pub fn handle_key(&mut self, key: KeyEvent) -> ControlFlow<()> {
        let Some(command) = map_key(key) else {
            return ControlFlow::Continue(());
        };
        debug!(?command, "Key command");

        match command {
            KeyCommand::Quit => return ControlFlow::Break(()),
            KeyCommand::Move(step) => {
                let display = self.controller.display();
                self.cursor = move_cursor(self.cursor, step, display.rows(), display.cols());
            }
            KeyCommand::FlipAtCursor => self.controller.handle(GameAction::Flip(self.cursor)),
            KeyCommand::Game(action) => {
                self.controller.handle(action);
                if self.cursor >= self.controller.session().board().len() {
                    self.cursor = 0;
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// Lets `elapsed` of wall-clock time pass on the game timeline.
    pub fn advance(&mut self, elapsed: Duration) {
        self.controller.advance(elapsed);
    }

    /// Advances presentation-only animation by one frame.
    pub fn step_frame(&mut self) {
        self.controller.display_mut().step_celebration();
    }
}
