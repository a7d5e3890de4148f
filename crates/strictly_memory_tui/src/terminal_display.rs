//! Retained view model that the terminal UI draws from.

use strictly_memory::{CardState, Counters, Display, Face};
use unicode_width::UnicodeWidthStr;

/// Frames the victory banner keeps animating for.
pub const CELEBRATION_FRAMES: u16 = 60;

/// [`Display`] implementation backing the ratatui front-end.
///
/// The controller writes into it; the renderer reads it every frame.
#[derive(Debug, Clone, Default)]
pub struct TerminalDisplay {
    rows: usize,
    cols: usize,
    faces: Vec<Face>,
    states: Vec<CardState>,
    status: String,
    counters: Counters,
    label: String,
    celebration_frames: u16,
}

impl TerminalDisplay {
    /// Creates an empty display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Face and state of the card at `index`.
    pub fn card(&self, index: usize) -> Option<(Face, CardState)> {
        Some((*self.faces.get(index)?, *self.states.get(index)?))
    }

    /// Status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Numeric readouts.
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Start control label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Remaining frames of the victory animation.
    pub fn celebration_frames(&self) -> u16 {
        self.celebration_frames
    }

    /// Advances the victory animation by one frame.
    pub fn step_celebration(&mut self) {
        self.celebration_frames = self.celebration_frames.saturating_sub(1);
    }

    /// Widest face on the board in terminal cells.
    pub fn face_width(&self) -> usize {
        self.faces
            .iter()
            .map(|face| face.to_string().width())
            .max()
            .unwrap_or(1)
    }
}

impl Display for TerminalDisplay {
    fn render(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.faces = vec![Face::Hidden; rows * cols];
        self.states = vec![CardState::Hidden; rows * cols];
        self.celebration_frames = 0;
    }

    fn set_card_face(&mut self, index: usize, face: Face) {
        if let Some(slot) = self.faces.get_mut(index) {
            *slot = face;
        }
    }

    fn set_card_state(&mut self, index: usize, state: CardState) {
        if let Some(slot) = self.states.get_mut(index) {
            *slot = state;
        }
    }

    fn set_status_text(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_counters(&mut self, counters: Counters) {
        self.counters = counters;
    }

    fn set_start_control_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn play_celebration(&mut self) {
        self.celebration_frames = CELEBRATION_FRAMES;
    }
}
