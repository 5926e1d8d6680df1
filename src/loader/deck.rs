//! Deck file loader (JSON format)
//!
//! A hero deck lists card rows with a copy count; an equipment deck lists
//! item rows the same way. Rows are plain data: turning them into game
//! objects is the job of [`EntityFactory`](crate::loader::EntityFactory).

use crate::core::{CardKind, HeroKind};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn one() -> u32 {
    1
}

/// Raw card data as it appears in a deck file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRow {
    pub name: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: CardKind,
    #[serde(default)]
    pub mana_cost: u32,
    /// Required for minions, ignored for spells
    #[serde(default)]
    pub attack: Option<i32>,
    /// Required for minions, ignored for spells
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default)]
    pub bounty: u32,
    #[serde(default)]
    pub effect: String,
}

/// A card row with its copy count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    #[serde(flatten)]
    pub card: CardRow,
    #[serde(default = "one")]
    pub copies: u32,
}

/// Raw equipment data as it appears in a shop file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRow {
    pub name: String,
    /// 1 = early, 2 = mid, 3+ = late. When no item in a pool has a tier,
    /// tiers are dealt round-robin at game setup.
    #[serde(default)]
    pub tier: Option<u8>,
    #[serde(default)]
    pub cost: u32,
    pub slot: String,
    #[serde(default)]
    pub effect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentEntry {
    #[serde(flatten)]
    pub item: EquipmentRow,
    #[serde(default = "one")]
    pub copies: u32,
}

/// A hero's card deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroDeck {
    pub name: String,
    pub hero: String,
    pub cards: Vec<DeckEntry>,
}

impl HeroDeck {
    pub fn hero_kind(&self) -> Result<HeroKind> {
        self.hero.parse()
    }

    /// Total number of cards after expanding copies
    pub fn total_cards(&self) -> usize {
        self.cards.iter().map(|e| e.copies as usize).sum()
    }

    pub fn expand(&self) -> Vec<CardRow> {
        expand_deck(&self.cards)
    }
}

/// The equipment pool the shop is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentDeck {
    pub name: String,
    pub items: Vec<EquipmentEntry>,
}

impl EquipmentDeck {
    pub fn total_items(&self) -> usize {
        self.items.iter().map(|e| e.copies as usize).sum()
    }

    pub fn expand(&self) -> Vec<EquipmentRow> {
        expand_equipment(&self.items)
    }
}

/// Flatten `{card, copies}` entries into one row per physical card
pub fn expand_deck(entries: &[DeckEntry]) -> Vec<CardRow> {
    entries
        .iter()
        .flat_map(|entry| std::iter::repeat(&entry.card).take(entry.copies as usize))
        .cloned()
        .collect()
}

/// Flatten `{item, copies}` entries into one row per physical item
pub fn expand_equipment(entries: &[EquipmentEntry]) -> Vec<EquipmentRow> {
    entries
        .iter()
        .flat_map(|entry| std::iter::repeat(&entry.item).take(entry.copies as usize))
        .cloned()
        .collect()
}

/// Deck loader for JSON deck files
pub struct DeckLoader;

impl DeckLoader {
    /// Load a hero deck from a JSON file
    pub fn load_hero_deck(path: &Path) -> Result<HeroDeck> {
        let content = fs::read_to_string(path)?;
        Self::parse_hero_deck(&content)
    }

    /// Parse a hero deck from JSON text
    pub fn parse_hero_deck(content: &str) -> Result<HeroDeck> {
        let deck: HeroDeck = serde_json::from_str(content)?;

        // Reject unknown heroes here rather than at game setup
        deck.hero_kind()?;

        if deck.total_cards() == 0 {
            return Err(EngineError::InvalidDeckFormat("Empty deck".to_string()));
        }
        for entry in &deck.cards {
            let card = &entry.card;
            if card.kind == CardKind::Minion && (card.attack.is_none() || card.health.is_none()) {
                return Err(EngineError::InvalidDeckFormat(format!(
                    "minion '{}' needs attack and health",
                    card.name
                )));
            }
        }
        Ok(deck)
    }

    /// Load an equipment deck from a JSON file
    pub fn load_equipment(path: &Path) -> Result<EquipmentDeck> {
        let content = fs::read_to_string(path)?;
        Self::parse_equipment(&content)
    }

    /// Parse an equipment deck from JSON text
    pub fn parse_equipment(content: &str) -> Result<EquipmentDeck> {
        let deck: EquipmentDeck = serde_json::from_str(content)?;
        if deck.total_items() == 0 {
            return Err(EngineError::InvalidDeckFormat("Empty equipment deck".to_string()));
        }
        Ok(deck)
    }
}
