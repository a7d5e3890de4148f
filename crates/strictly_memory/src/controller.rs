//! The game controller: owns the session and drives the display.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::action::{Flip, FlipRejection, GameAction};
use crate::board::Board;
use crate::card::{CardState, Face};
use crate::difficulty::Difficulty;
use crate::display::Display;
use crate::scoring::{FinalBonus, HINT_PENALTY, Tier, match_points};
use crate::session::{GameSession, Phase};
use crate::timeline::{ManualTimeline, Timeline, Wakeup};
use crate::timings::Timings;

const STATUS_READY: &str = "Click \"Start Game\" to begin!";
const STATUS_STARTED: &str = "Game started! Find matching pairs.";
const STATUS_RESUMED: &str = "Game resumed!";
const STATUS_PAUSED: &str = "Game paused";
const STATUS_MATCH: &str = "Match found! Keep going!";
const STATUS_NO_MATCH: &str = "No match. Try again!";
const STATUS_NOT_STARTED: &str = "Start the game first!";
const STATUS_HINT: &str = "Remember the card positions!";
const STATUS_HINT_OVER: &str = "Back to the game!";

const LABEL_START: &str = "Start Game";
const LABEL_PAUSE: &str = "Pause Game";
const LABEL_RESUME: &str = "Resume Game";
const LABEL_NEW_GAME: &str = "New Game";

/// Deferred work the controller schedules on its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Mark a pair with equal faces as matched.
    ConfirmMatch {
        /// First card flipped.
        first: usize,
        /// Second card flipped.
        second: usize,
    },
    /// Turn a pair with different faces back over.
    RevertMismatch {
        /// First card flipped.
        first: usize,
        /// Second card flipped.
        second: usize,
    },
    /// Stop showing a hint, unless a newer hint replaced it.
    EndHint {
        /// Hint this task belongs to.
        generation: u64,
    },
}

/// Owns a [`GameSession`] and applies every rule of the game to it.
///
/// All visible changes go out through the [`Display`]; all timing comes from
/// the injected [`Timeline`], which the caller moves forward with
/// [`GameController::advance`].
#[derive(Debug)]
pub struct GameController<D, R = StdRng, T = ManualTimeline<Task>> {
    session: GameSession,
    display: D,
    rng: R,
    timeline: T,
    timings: Timings,
}

impl<D: Display> GameController<D> {
    /// Creates a controller with an entropy-seeded RNG, a virtual timeline,
    /// and default timings, then deals a board for `difficulty`.
    pub fn new(display: D, difficulty: Difficulty) -> Self {
        Self::with_parts(
            display,
            StdRng::from_entropy(),
            ManualTimeline::new(),
            Timings::default(),
            difficulty,
        )
    }

    /// Like [`GameController::new`], but deals reproducible boards.
    pub fn seeded(display: D, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_parts(
            display,
            StdRng::seed_from_u64(seed),
            ManualTimeline::new(),
            Timings::default(),
            difficulty,
        )
    }
}

impl<D, R, T> GameController<D, R, T>
where
    D: Display,
    R: Rng,
    T: Timeline<Task>,
{
    /// Creates a controller from explicit collaborators and deals a board.
    pub fn with_parts(
        display: D,
        rng: R,
        timeline: T,
        timings: Timings,
        difficulty: Difficulty,
    ) -> Self {
        // Placeholder until init_game deals the real board.
        let empty = Board::from_values(difficulty.rows(), difficulty.cols(), Vec::new());
        let mut controller = Self {
            session: GameSession::new(difficulty, empty),
            display,
            rng,
            timeline,
            timings,
        };
        controller.init_game(difficulty);
        controller
    }

    /// The current session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The display collaborator.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the display, for presentation-only state.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// The timeline collaborator.
    pub fn timeline(&self) -> &T {
        &self.timeline
    }

    /// The configured delays.
    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Dispatches one user action. Rejected flips are logged and dropped.
    #[instrument(skip(self))]
    pub fn handle(&mut self, action: GameAction) {
        match action {
            GameAction::ToggleStart => self.toggle_start(),
            GameAction::Reset => self.reset(),
            GameAction::Hint => {
                self.show_hint();
            }
            GameAction::SelectDifficulty(level) => self.set_difficulty(level),
            GameAction::Flip(index) => {
                if let Err(rejection) = self.flip_card(index) {
                    debug!(index, %rejection, "Flip ignored");
                }
            }
        }
    }

    /// Discards the current session and deals a fresh, idle one.
    ///
    /// Stops the clock and cancels every pending resolution or hint from the
    /// old session.
    #[instrument(skip(self))]
    pub fn init_game(&mut self, difficulty: Difficulty) {
        self.timeline.stop();
        self.timeline.cancel_all();

        let board = Board::generate(difficulty, &mut self.rng);
        self.session = GameSession::new(difficulty, board);

        self.display.render(difficulty.rows(), difficulty.cols());
        for index in 0..self.session.board().len() {
            self.display.set_card_face(index, Face::Hidden);
            self.display.set_card_state(index, CardState::Hidden);
        }
        self.display.set_counters(self.session.counters());
        self.display.set_status_text(STATUS_READY);
        self.display.set_start_control_label(LABEL_START);

        info!(
            %difficulty,
            rows = difficulty.rows(),
            cols = difficulty.cols(),
            pairs = difficulty.pair_count(),
            "New game dealt"
        );
    }

    /// Deals a new board at the current difficulty.
    pub fn reset(&mut self) {
        let difficulty = *self.session.difficulty();
        self.init_game(difficulty);
    }

    /// Switches difficulty and deals a new board right away.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, level: Difficulty) {
        self.init_game(level);
    }

    /// Starts or resumes the game. After a win this deals a new game first.
    #[instrument(skip(self), fields(phase = %self.session.phase()))]
    pub fn start_game(&mut self) {
        let status = match *self.session.phase() {
            Phase::Running => return,
            Phase::Won => {
                self.reset();
                STATUS_STARTED
            }
            Phase::Paused => STATUS_RESUMED,
            Phase::Idle => STATUS_STARTED,
        };

        self.session.set_phase(Phase::Running);
        self.timeline.start(self.timings.tick_interval);
        self.display.set_status_text(status);
        self.display.set_start_control_label(LABEL_PAUSE);
        info!("Game running");
    }

    /// Pauses a running game. Pending resolutions still fire while paused.
    #[instrument(skip(self), fields(phase = %self.session.phase()))]
    pub fn pause_game(&mut self) {
        if *self.session.phase() != Phase::Running {
            return;
        }

        self.session.set_phase(Phase::Paused);
        self.timeline.stop();
        self.display.set_status_text(STATUS_PAUSED);
        self.display.set_start_control_label(LABEL_RESUME);
        info!(elapsed = self.session.elapsed_seconds(), "Game paused");
    }

    /// Pauses if running, otherwise starts.
    pub fn toggle_start(&mut self) {
        if *self.session.phase() == Phase::Running {
            self.pause_game();
        } else {
            self.start_game();
        }
    }

    /// Turns over the card at `index`.
    ///
    /// The second card of a pair bumps the move count, locks input, and
    /// schedules the match or mismatch resolution.
    ///
    /// # Errors
    ///
    /// Returns a [`FlipRejection`] and changes nothing if the game is not
    /// running, a hint is showing, a pair is awaiting resolution, the index
    /// is off the board, or the card is already face up.
    #[instrument(skip(self))]
    pub fn flip_card(&mut self, index: usize) -> Result<Flip, FlipRejection> {
        if *self.session.phase() != Phase::Running {
            return Err(FlipRejection::NotRunning);
        }
        if self.session.is_hint_showing() {
            return Err(FlipRejection::HintShowing);
        }
        if self.session.is_locked() || self.session.pending().len() >= 2 {
            return Err(FlipRejection::Locked);
        }
        let card = self
            .session
            .board()
            .get(index)
            .ok_or(FlipRejection::OutOfRange { index })?;
        if !card.is_hidden() {
            return Err(FlipRejection::AlreadyRevealed { index });
        }
        let value = card.value();

        self.session.flip(index);
        self.display.set_card_face(index, Face::Shown(value));
        self.display.set_card_state(index, CardState::Flipped);

        let [first, second] = match self.session.pending() {
            [first, second] => [*first, *second],
            _ => return Ok(Flip::Revealed),
        };

        self.display.set_counters(self.session.counters());
        let is_match = self.card_value(first) == self.card_value(second);
        let (delay, task) = if is_match {
            (self.timings.match_delay, Task::ConfirmMatch { first, second })
        } else {
            (self.timings.mismatch_delay, Task::RevertMismatch { first, second })
        };
        self.timeline.schedule(delay, task);

        debug!(first, second, is_match, moves = self.session.moves(), "Pair complete");
        Ok(Flip::PairComplete { is_match })
    }

    /// Shows every unmatched card for the hint duration, at a score cost.
    ///
    /// Returns false, after telling the player to start, if the game is not
    /// running.
    #[instrument(skip(self))]
    pub fn show_hint(&mut self) -> bool {
        if *self.session.phase() != Phase::Running {
            self.display.set_status_text(STATUS_NOT_STARTED);
            return false;
        }

        self.session.deduct_score(HINT_PENALTY);
        self.display.set_counters(self.session.counters());
        self.display.set_status_text(STATUS_HINT);

        let generation = self.session.begin_hint();
        for index in self.session.board().unmatched() {
            let value = self.card_value(index);
            self.display.set_card_face(index, Face::Shown(value));
        }
        self.timeline
            .schedule(self.timings.hint_duration, Task::EndHint { generation });

        info!(generation, score = self.session.score(), "Hint shown");
        true
    }

    /// Counts one second of play.
    pub fn on_tick(&mut self) {
        self.session.tick();
        self.display.set_counters(self.session.counters());
    }

    /// Moves time forward by `by`, dispatching every tick and deferred task
    /// that comes due, in order.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.timeline.now() + by;
        while let Some(wakeup) = self.timeline.next_wakeup(deadline) {
            match wakeup {
                Wakeup::Tick => self.on_tick(),
                Wakeup::Deferred(task) => self.run_task(task),
            }
        }
        self.timeline.settle(deadline);
    }

    #[instrument(skip(self))]
    fn run_task(&mut self, task: Task) {
        match task {
            Task::ConfirmMatch { first, second } => self.confirm_match(first, second),
            Task::RevertMismatch { first, second } => self.revert_mismatch(first, second),
            Task::EndHint { generation } => self.end_hint(generation),
        }
    }

    fn confirm_match(&mut self, first: usize, second: usize) {
        self.session.resolve_pair(first, second, true);
        for index in [first, second] {
            self.display.set_card_state(index, CardState::Matched);
        }

        let points = match_points(*self.session.moves(), *self.session.elapsed_seconds());
        self.session.add_score(points);
        self.display.set_counters(self.session.counters());
        debug!(first, second, points, "Match confirmed");

        if self.session.is_complete() {
            self.end_game();
        } else {
            self.display.set_status_text(STATUS_MATCH);
        }
    }

    fn revert_mismatch(&mut self, first: usize, second: usize) {
        self.session.resolve_pair(first, second, false);
        let face = |value| {
            if self.session.is_hint_showing() {
                Face::Shown(value)
            } else {
                Face::Hidden
            }
        };
        let faces = [
            (first, face(self.card_value(first))),
            (second, face(self.card_value(second))),
        ];
        for (index, face) in faces {
            self.display.set_card_face(index, face);
            self.display.set_card_state(index, CardState::Hidden);
        }
        self.display.set_status_text(STATUS_NO_MATCH);
        debug!(first, second, "Mismatch reverted");
    }

    fn end_hint(&mut self, generation: u64) {
        if !self.session.end_hint(generation) {
            debug!(generation, "Superseded hint expired");
            return;
        }
        for index in self.session.board().indices_in(CardState::Hidden) {
            self.display.set_card_face(index, Face::Hidden);
        }
        if *self.session.phase() == Phase::Running {
            self.display.set_status_text(STATUS_HINT_OVER);
        }
    }

    #[instrument(skip(self))]
    fn end_game(&mut self) {
        if *self.session.phase() == Phase::Won {
            return;
        }
        self.session.set_phase(Phase::Won);
        self.timeline.stop();

        let moves = *self.session.moves();
        let bonus = FinalBonus::compute(moves, *self.session.elapsed_seconds());
        self.session.add_score(bonus.total());
        let tier = Tier::rate(moves, self.session.pair_count());

        self.display.set_counters(self.session.counters());
        self.display.set_status_text(&format!(
            "You won! {} Final Score: {}",
            tier,
            self.session.score()
        ));
        self.display.set_start_control_label(LABEL_NEW_GAME);
        self.display.play_celebration();

        info!(
            moves,
            elapsed = self.session.elapsed_seconds(),
            time_bonus = bonus.time_bonus,
            moves_bonus = bonus.moves_bonus,
            score = self.session.score(),
            %tier,
            "Game won"
        );
    }

    fn card_value(&self, index: usize) -> &'static str {
        self.session
            .board()
            .get(index)
            .map(|card| card.value())
            .unwrap_or_default()
    }
}
