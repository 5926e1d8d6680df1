//! Builds game objects from deck rows
//!
//! The factory owns the id allocator for one game, so every card and item it
//! creates gets an id that is unique across both players and the shop.

use crate::core::{
    parse_effects, parse_equipment_bonuses, CardInstance, CardKind, EquipmentInstance, EquipmentSlot, HeroKind,
    HeroState, IdAllocator, RulesConfig,
};
use crate::error::{EngineError, Result};
use crate::loader::{CardRow, EquipmentRow};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct EntityFactory {
    ids: IdAllocator,
}

impl EntityFactory {
    pub fn new() -> Self {
        EntityFactory { ids: IdAllocator::new() }
    }

    /// Create a card instance with a fresh id
    ///
    /// Minions enter the game at full health and summoning sick. Spells carry
    /// zero attack and health.
    pub fn create_card(&mut self, row: &CardRow) -> Result<CardInstance> {
        let (attack, health) = match row.kind {
            CardKind::Minion => match (row.attack, row.health) {
                (Some(attack), Some(health)) if health > 0 => (attack.max(0), health),
                _ => {
                    return Err(EngineError::InvalidDeckFormat(format!(
                        "minion '{}' needs attack and positive health",
                        row.name
                    )))
                }
            },
            CardKind::Spell => (0, 0),
        };

        Ok(CardInstance {
            id: self.ids.next_id(),
            name: Arc::from(row.name.as_str()),
            kind: row.kind,
            mana_cost: row.mana_cost,
            attack,
            health,
            bounty: row.bounty,
            effect_text: Arc::from(row.effect.as_str()),
            effects: parse_effects(&row.effect),
            current_health: health,
            tapped: false,
            summoning_sick: true,
        })
    }

    pub fn create_cards(&mut self, rows: &[CardRow]) -> Result<Vec<CardInstance>> {
        rows.iter().map(|row| self.create_card(row)).collect()
    }

    /// Create an equipment instance in the given tier
    pub fn create_equipment(&mut self, row: &EquipmentRow, tier: u8) -> Result<EquipmentInstance> {
        let slot: EquipmentSlot = row.slot.parse()?;
        Ok(EquipmentInstance {
            id: self.ids.next_id(),
            name: Arc::from(row.name.as_str()),
            tier,
            cost: row.cost,
            slot,
            effect_text: Arc::from(row.effect.as_str()),
            bonuses: parse_equipment_bonuses(&row.effect),
        })
    }

    /// Hero record with the standard starting stats
    pub fn create_hero(&self, kind: HeroKind, starting_mana: u32, rules: &RulesConfig) -> HeroState {
        HeroState::new(kind, starting_mana, rules)
    }

    /// Number of instance ids handed out so far
    pub fn ids_issued(&self) -> u32 {
        self.ids.issued()
    }
}
