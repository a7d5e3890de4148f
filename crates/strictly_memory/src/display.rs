//! The rendering seam and a recording implementation of it.

use serde::Serialize;

use crate::card::{CardState, Face};

/// Snapshot of the numeric readouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counters {
    /// Completed pair attempts.
    pub moves: u32,
    /// Pairs found so far.
    pub matches: u32,
    /// Current score.
    pub score: u32,
    /// Seconds the clock has been running.
    pub elapsed_seconds: u32,
}

/// Anything that can show a grid of card faces and a few text fields.
///
/// The controller pushes every visible change through this trait and never
/// reads anything back.
pub trait Display {
    /// Lays out an empty grid of `rows × cols` cards.
    fn render(&mut self, rows: usize, cols: usize);

    /// Shows `face` on the card at `index`.
    fn set_card_face(&mut self, index: usize, face: Face);

    /// Reflects the logical state of the card at `index`.
    fn set_card_state(&mut self, index: usize, state: CardState);

    /// Replaces the status line.
    fn set_status_text(&mut self, text: &str);

    /// Updates the moves/matches/score/timer readouts.
    fn set_counters(&mut self, counters: Counters);

    /// Relabels the start/pause control.
    fn set_start_control_label(&mut self, label: &str);

    /// Plays the victory effect.
    fn play_celebration(&mut self);
}

/// A [`Display`] that keeps the latest value of every field.
///
/// Used by the tests and by headless play, where nothing is drawn.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    rows: usize,
    cols: usize,
    faces: Vec<Face>,
    states: Vec<CardState>,
    status: String,
    statuses: Vec<String>,
    counters: Counters,
    label: String,
    celebrations: usize,
    renders: usize,
}

impl RecordingDisplay {
    /// Creates an empty recording display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid size from the last render.
    pub fn grid(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Faces currently shown, in board order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Card states last pushed, in board order.
    pub fn states(&self) -> &[CardState] {
        &self.states
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Every status line shown since the grid was last laid out, oldest first.
    pub fn status_history(&self) -> &[String] {
        &self.statuses
    }

    /// Last counters pushed.
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Current start control label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// How many times the celebration played.
    pub fn celebrations(&self) -> usize {
        self.celebrations
    }

    /// How many times the grid was laid out.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl Display for RecordingDisplay {
    fn render(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.faces = vec![Face::Hidden; rows * cols];
        self.states = vec![CardState::Hidden; rows * cols];
        self.statuses.clear();
        self.renders += 1;
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
        self.statuses.push(text.to_string());
    }

    fn set_counters(&mut self, counters: Counters) {
        self.counters = counters;
    }

    fn set_start_control_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn play_celebration(&mut self) {
        self.celebrations += 1;
    }
}
