//! Themed emoji palettes that card faces are drawn from.

use rand::Rng;
use rand::seq::IteratorRandom;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Theme of the symbols on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    /// Animal faces.
    Animals,
    /// Fruit.
    Fruits,
    /// Road vehicles.
    Vehicles,
    /// Gadgets and everyday objects.
    Objects,
    /// Sports balls and gear.
    Sports,
}

// Every palette is wide enough for the largest board and uses
// single-codepoint emoji so terminal cell widths stay uniform.
const ANIMALS: [&str; 12] = [
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮",
];
const FRUITS: [&str; 12] = [
    "🍎", "🍌", "🍒", "🍇", "🍊", "🍋", "🍉", "🍓", "🍑", "🍍", "🥝", "🥥",
];
const VEHICLES: [&str; 12] = [
    "🚗", "🚕", "🚙", "🚌", "🚎", "🚐", "🚓", "🚑", "🚒", "🚚", "🚜", "🚲",
];
const OBJECTS: [&str; 12] = [
    "📱", "💻", "⌚", "💡", "🎧", "🎮", "📷", "🔑", "📚", "🔔", "🎁", "💎",
];
const SPORTS: [&str; 12] = [
    "⚽", "🏀", "🏈", "⚾", "🎾", "🏐", "🏉", "🎱", "🏓", "🏸", "🥊", "⛳",
];

impl Category {
    /// The symbols of this palette in their fixed order.
    pub fn symbols(self) -> &'static [&'static str] {
        match self {
            Self::Animals => &ANIMALS,
            Self::Fruits => &FRUITS,
            Self::Vehicles => &VEHICLES,
            Self::Objects => &OBJECTS,
            Self::Sports => &SPORTS,
        }
    }

    /// Picks a category uniformly at random.
    #[instrument(skip(rng))]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let category = Self::iter().choose(rng).unwrap_or(Self::Animals);
        debug!(%category, "Palette category chosen");
        category
    }
}
