//! Headless play by a bot with perfect memory.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use rand::Rng;
use strictly_memory::{
    Board, CardState, Display, GameController, GameSummary, Phase, Task, Timeline,
};
use tracing::{debug, info, instrument};

/// Upper bound on moves before the runner gives up.
const MAX_MOVES: usize = 1_000;

/// Remembers every face it has seen and never forgets one.
#[derive(Debug, Default)]
pub struct MemoryBot {
    seen: HashMap<usize, &'static str>,
}

impl MemoryBot {
    /// Creates a bot that has seen nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every face currently turned up.
    pub fn observe(&mut self, board: &Board) {
        for card in board.cards() {
            if !card.is_hidden() {
                self.seen.insert(card.index(), card.value());
            }
        }
    }

    /// Two hidden cards known to share a face.
    pub fn known_pair(&self, board: &Board) -> Option<(usize, usize)> {
        let mut by_value: HashMap<&'static str, usize> = HashMap::new();
        let mut hidden: Vec<_> = self
            .seen
            .iter()
            .filter(|(index, _)| board.get(**index).is_some_and(|card| card.is_hidden()))
            .collect();
        hidden.sort_unstable();
        for (index, value) in hidden {
            if let Some(first) = by_value.insert(*value, *index) {
                return Some((first, *index));
            }
        }
        None
    }

    /// A hidden card whose face is still unknown.
    pub fn unseen(&self, board: &Board, except: Option<usize>) -> Option<usize> {
        board
            .cards()
            .iter()
            .filter(|card| card.is_hidden() && Some(card.index()) != except)
            .map(|card| card.index())
            .find(|index| !self.seen.contains_key(index))
    }

    /// A hidden card other than `index` known to carry `value`.
    pub fn partner(&self, board: &Board, index: usize, value: &str) -> Option<usize> {
        board
            .indices_in(CardState::Hidden)
            .into_iter()
            .find(|other| {
                *other != index && self.seen.get(other).is_some_and(|seen| *seen == value)
            })
    }

    /// Picks the second card after `first` has been turned up.
    fn second(&self, board: &Board, first: usize) -> Option<usize> {
        let value = board.get(first)?.value();
        self.partner(board, first, value)
            .or_else(|| self.unseen(board, Some(first)))
            .or_else(|| {
                board
                    .indices_in(CardState::Hidden)
                    .into_iter()
                    .find(|other| *other != first)
            })
    }
}

/// Plays one game to completion and returns its summary.
///
/// The controller must be idle or paused; it is started, then driven on its
/// own timeline so the run takes no wall-clock time.
#[instrument(skip(controller), fields(difficulty = %controller.session().difficulty()))]
pub fn play_to_completion<D, R, T>(controller: &mut GameController<D, R, T>) -> Result<GameSummary>
where
    D: Display,
    R: Rng,
    T: Timeline<Task>,
{
    let settle = controller
        .timings()
        .match_delay
        .max(controller.timings().mismatch_delay)
        + Duration::from_millis(1);
    let mut bot = MemoryBot::new();
    controller.start_game();

    for turn in 0..MAX_MOVES {
        if *controller.session().phase() == Phase::Won {
            break;
        }

        let board = controller.session().board();
        let (first, second) = match bot.known_pair(board) {
            Some(pair) => pair,
            None => {
                let first = bot
                    .unseen(board, None)
                    .context("No hidden card left to turn over")?;
                controller.flip_card(first)?;
                bot.observe(controller.session().board());
                let second = bot
                    .second(controller.session().board(), first)
                    .context("No second card to turn over")?;
                (first, second)
            }
        };

        if controller.session().pending().is_empty() {
            controller.flip_card(first)?;
        }
        controller.flip_card(second)?;
        bot.observe(controller.session().board());
        debug!(turn, first, second, "Bot turned a pair");

        controller.advance(settle);
    }

    let Some(summary) = controller.session().summary() else {
        bail!("Bot did not finish within {} moves", MAX_MOVES);
    };
    info!(
        moves = summary.moves,
        score = summary.score,
        tier = %summary.tier,
        "Autoplay finished"
    );
    Ok(summary)
}
