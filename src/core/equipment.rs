//! Equipment items and hero equipment slots

use crate::core::{BonusList, EquipmentBonus, EquipmentId};
use crate::error::EngineError;
use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Equipment slot on a hero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Chest,
    Jewelry,
    Relic,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 4] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Chest,
        EquipmentSlot::Jewelry,
        EquipmentSlot::Relic,
    ];

    fn index(self) -> usize {
        match self {
            EquipmentSlot::Weapon => 0,
            EquipmentSlot::Chest => 1,
            EquipmentSlot::Jewelry => 2,
            EquipmentSlot::Relic => 3,
        }
    }
}

impl FromStr for EquipmentSlot {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match deunicode(s).trim().to_lowercase().as_str() {
            "weapon" => Ok(EquipmentSlot::Weapon),
            "chest" | "armor" | "armour" => Ok(EquipmentSlot::Chest),
            "jewelry" | "jewellery" | "ring" | "amulet" => Ok(EquipmentSlot::Jewelry),
            "relic" | "trinket" => Ok(EquipmentSlot::Relic),
            _ => Err(EngineError::InvalidDeckFormat(format!(
                "unknown equipment slot '{s}'"
            ))),
        }
    }
}

impl std::fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Chest => "chest",
            EquipmentSlot::Jewelry => "jewelry",
            EquipmentSlot::Relic => "relic",
        };
        write!(f, "{name}")
    }
}

/// A purchasable piece of equipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentInstance {
    pub id: EquipmentId,
    pub name: Arc<str>,
    /// Shop tier (1 = early, 2 = mid, 3+ = late)
    pub tier: u8,
    pub cost: u32,
    pub slot: EquipmentSlot,
    pub effect_text: Arc<str>,
    pub bonuses: BonusList,
}

impl EquipmentInstance {
    pub fn health_bonus(&self) -> i32 {
        self.sum(|b| match b {
            EquipmentBonus::Health(n) => Some(n),
            _ => None,
        }) as i32
    }

    pub fn armor_bonus(&self) -> i32 {
        self.sum(|b| match b {
            EquipmentBonus::Armor(n) => Some(n),
            _ => None,
        }) as i32
    }

    pub fn mana_bonus(&self) -> u32 {
        self.sum(|b| match b {
            EquipmentBonus::Mana(n) => Some(n),
            _ => None,
        })
    }

    pub fn weapon_damage(&self) -> i32 {
        self.sum(|b| match b {
            EquipmentBonus::WeaponDamage(n) => Some(n),
            _ => None,
        }) as i32
    }

    fn sum(&self, pick: impl Fn(EquipmentBonus) -> Option<u32>) -> u32 {
        self.bonuses.iter().copied().filter_map(pick).sum()
    }
}

/// The four equipment slots of a hero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSlots {
    pub weapon: Option<EquipmentInstance>,
    pub chest: Option<EquipmentInstance>,
    pub jewelry: Option<EquipmentInstance>,
    pub relic: Option<EquipmentInstance>,
    /// Max mana each slot's item actually added, after the mana cap
    #[serde(default)]
    applied_mana: [u32; 4],
}

impl EquipmentSlots {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquipmentInstance> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Chest => self.chest.as_ref(),
            EquipmentSlot::Jewelry => self.jewelry.as_ref(),
            EquipmentSlot::Relic => self.relic.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<EquipmentInstance> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Chest => &mut self.chest,
            EquipmentSlot::Jewelry => &mut self.jewelry,
            EquipmentSlot::Relic => &mut self.relic,
        }
    }

    /// Put an item into its slot, returning the previous occupant
    pub fn equip(&mut self, item: EquipmentInstance) -> Option<EquipmentInstance> {
        self.slot_mut(item.slot).replace(item)
    }

    pub fn applied_mana(&self, slot: EquipmentSlot) -> u32 {
        self.applied_mana[slot.index()]
    }

    pub fn set_applied_mana(&mut self, slot: EquipmentSlot, amount: u32) {
        self.applied_mana[slot.index()] = amount;
    }

    /// Iterate over equipped items in slot order
    pub fn iter(&self) -> impl Iterator<Item = &EquipmentInstance> {
        EquipmentSlot::ALL.into_iter().filter_map(move |slot| self.get(slot))
    }

    /// Total weapon damage bonus from everything worn
    pub fn weapon_damage(&self) -> i32 {
        self.iter().map(EquipmentInstance::weapon_damage).sum()
    }
}
