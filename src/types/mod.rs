//! Public types for the deckhand API.

mod card;
mod filter;
mod progress;

pub use card::{
    Ability, Attack, CREATURE_TYPE, CardRecord, ENERGY_TYPE, SUPPORT_TYPE, TARGET_DECK_SIZE,
};
pub use filter::CardFilter;
pub use progress::DeckProgress;
