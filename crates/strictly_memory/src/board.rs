//! Board generation and the pairing shuffle.

use rand::Rng;
use tracing::{debug, instrument};

use crate::card::{Card, CardState};
use crate::difficulty::Difficulty;
use crate::palette::Category;

/// Shuffles a slice in place with the Fisher–Yates algorithm.
///
/// Walks from the last index down to 1, swapping each element with a
/// uniformly chosen element at or before it. Given a uniform random source
/// every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Produces the shuffled face values for a board of `pair_count` pairs.
///
/// One palette category is chosen at random and its first `pair_count`
/// symbols are each used twice.
#[instrument(skip(rng))]
pub fn generate_values<R: Rng + ?Sized>(pair_count: usize, rng: &mut R) -> Vec<&'static str> {
    let category = Category::random(rng);
    let symbols = &category.symbols()[..pair_count.min(category.symbols().len())];

    let mut values: Vec<&'static str> = symbols.iter().chain(symbols.iter()).copied().collect();
    shuffle(&mut values, rng);

    debug!(%category, cards = values.len(), "Card values generated");
    values
}

/// The grid of cards for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cards: Vec<Card>,
}

impl Board {
    /// Generates a freshly shuffled, face-down board for `difficulty`.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let values = generate_values(difficulty.pair_count(), rng);
        Self::from_values(difficulty.rows(), difficulty.cols(), values)
    }

    /// Builds a face-down board from values already in board order.
    pub fn from_values(rows: usize, cols: usize, values: Vec<&'static str>) -> Self {
        let cards = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Card::new(index, value))
            .collect();
        Self { rows, cols, cards }
    }

    /// Number of grid rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if the board has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Gets the card at `index`.
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// All cards in board order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Face values in board order.
    pub fn values(&self) -> Vec<&'static str> {
        self.cards.iter().map(Card::value).collect()
    }

    /// Indices of cards that are not yet matched.
    pub fn unmatched(&self) -> Vec<usize> {
        self.cards
            .iter()
            .filter(|card| !card.is_matched())
            .map(Card::index)
            .collect()
    }

    /// Indices of cards currently in `state`.
    pub fn indices_in(&self, state: CardState) -> Vec<usize> {
        self.cards
            .iter()
            .filter(|card| card.state() == state)
            .map(Card::index)
            .collect()
    }

    pub(crate) fn set_state(&mut self, index: usize, state: CardState) {
        if let Some(card) = self.cards.get_mut(index) {
            card.set_state(state);
        }
    }
}
