//! Deck loading and game setup
//!
//! Deck files are JSON. Rows are expanded by copy count, turned into
//! instances by the entity factory, and dealt into a fresh game.

pub mod deck;
pub mod factory;
pub mod game_init;

pub use deck::{
    expand_deck, expand_equipment, CardRow, DeckEntry, DeckLoader, EquipmentDeck, EquipmentEntry, EquipmentRow,
    HeroDeck,
};
pub use factory::EntityFactory;
pub use game_init::{initialize_game, GameInitializer, GameSetup, SeatSetup};
