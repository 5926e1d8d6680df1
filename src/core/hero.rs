//! Heroes: archetypes, abilities and per-game hero state

use crate::core::{EquipmentInstance, EquipmentSlots, RulesConfig};
use crate::error::EngineError;
use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The four hero archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroKind {
    Necromancer,
    Barbarian,
    Mage,
    Rogue,
}

/// A hero power definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroPower {
    pub name: &'static str,
    pub description: &'static str,
}

/// A hero attack definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroAttack {
    pub name: &'static str,
    pub base_damage: i32,
    pub description: &'static str,
}

impl HeroKind {
    pub const ALL: [HeroKind; 4] = [
        HeroKind::Necromancer,
        HeroKind::Barbarian,
        HeroKind::Mage,
        HeroKind::Rogue,
    ];

    /// Class resource a fresh hero of this kind starts with
    pub fn initial_resource(self) -> ClassResource {
        match self {
            HeroKind::Necromancer => ClassResource::None,
            HeroKind::Barbarian => ClassResource::Fury(0),
            HeroKind::Mage => ClassResource::Arcana(0),
            HeroKind::Rogue => ClassResource::Stealth(false),
        }
    }

    /// Hero power, upgraded once the hero has leveled
    pub fn power(self, leveled: bool) -> HeroPower {
        match (self, leveled) {
            (HeroKind::Necromancer, false) => HeroPower {
                name: "Dark Pact",
                description: "Pay 2 health: draw a card",
            },
            (HeroKind::Necromancer, true) => HeroPower {
                name: "Greater Dark Pact",
                description: "Free. Pay 2 health: draw a card",
            },
            (HeroKind::Barbarian, false) => HeroPower {
                name: "Battle Fury",
                description: "Gain 2 Fury",
            },
            (HeroKind::Barbarian, true) => HeroPower {
                name: "Endless Fury",
                description: "Free. Gain 2 Fury",
            },
            (HeroKind::Mage, _) => HeroPower {
                name: "Arcane Surge",
                description: "Gain 1 Arcana. At 5+ Arcana this is free and draws a card",
            },
            (HeroKind::Rogue, false) => HeroPower {
                name: "Shadow Step",
                description: "Enter Stealth",
            },
            (HeroKind::Rogue, true) => HeroPower {
                name: "Vanish",
                description: "Free. Enter Stealth",
            },
        }
    }

    /// Hero attack, upgraded once the hero has leveled
    pub fn attack(self, leveled: bool) -> HeroAttack {
        match (self, leveled) {
            (HeroKind::Necromancer, _) => HeroAttack {
                name: "Life Drain",
                base_damage: 1,
                description: "Deal 1 damage",
            },
            (HeroKind::Barbarian, false) => HeroAttack {
                name: "Fury Strike",
                base_damage: 0,
                description: "Deal damage equal to Fury, then reset Fury",
            },
            (HeroKind::Barbarian, true) => HeroAttack {
                name: "Armored Fury Strike",
                base_damage: 0,
                description: "Deal damage equal to Fury plus Armor, then reset Fury",
            },
            (HeroKind::Mage, _) => HeroAttack {
                name: "Arcane Bolt",
                base_damage: 1,
                description: "Deal 1 damage",
            },
            (HeroKind::Rogue, false) => HeroAttack {
                name: "Quick Strike",
                base_damage: 1,
                description: "Deal 1 damage, doubled from Stealth",
            },
            (HeroKind::Rogue, true) => HeroAttack {
                name: "Assassinate",
                base_damage: 1,
                description: "Deal 1 damage, doubled from Stealth, tripled against heroes",
            },
        }
    }

    /// Mana cost of the hero power given the hero's current state
    pub fn power_cost(self, hero: &HeroState, rules: &RulesConfig) -> u32 {
        match self {
            HeroKind::Mage if hero.arcana() >= rules.arcana_threshold => 0,
            HeroKind::Mage => rules.mage_power_cost,
            _ if hero.leveled => 0,
            HeroKind::Necromancer => rules.necromancer_power_cost,
            HeroKind::Barbarian => rules.barbarian_power_cost,
            HeroKind::Rogue => rules.rogue_power_cost,
        }
    }

    /// Progress needed to level up
    pub fn level_threshold(self, rules: &RulesConfig) -> u32 {
        match self {
            HeroKind::Necromancer => rules.necromancer_level_threshold,
            HeroKind::Barbarian => rules.barbarian_level_threshold,
            HeroKind::Mage => rules.mage_level_threshold,
            HeroKind::Rogue => rules.rogue_level_threshold,
        }
    }

    /// What the level counter measures
    pub fn level_condition(self) -> &'static str {
        match self {
            HeroKind::Necromancer => "minions raised",
            HeroKind::Barbarian => "weapon damage dealt",
            HeroKind::Mage => "spells cast",
            HeroKind::Rogue => "gold spent",
        }
    }
}

impl FromStr for HeroKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match deunicode(s).trim().to_lowercase().as_str() {
            "necromancer" => Ok(HeroKind::Necromancer),
            "barbarian" => Ok(HeroKind::Barbarian),
            "mage" | "wizard" => Ok(HeroKind::Mage),
            "rogue" => Ok(HeroKind::Rogue),
            _ => Err(EngineError::UnknownHero(s.to_string())),
        }
    }
}

impl std::fmt::Display for HeroKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HeroKind::Necromancer => "Necromancer",
            HeroKind::Barbarian => "Barbarian",
            HeroKind::Mage => "Mage",
            HeroKind::Rogue => "Rogue",
        };
        write!(f, "{name}")
    }
}

/// Archetype-specific resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassResource {
    None,
    Fury(u32),
    Arcana(u32),
    Stealth(bool),
}

/// Once-per-turn ability flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityUsage {
    pub hero_power: bool,
    pub hero_attack: bool,
    pub shop_purchase: bool,
}

impl AbilityUsage {
    pub fn reset(&mut self) {
        *self = AbilityUsage::default();
    }

    pub fn any(&self) -> bool {
        self.hero_power || self.hero_attack || self.shop_purchase
    }
}

/// A hero during a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroState {
    pub kind: HeroKind,
    pub current_health: i32,
    pub max_health: i32,
    pub armor: i32,
    pub current_mana: u32,
    pub max_mana: u32,
    pub gold: u32,
    pub resource: ClassResource,
    pub leveled: bool,
    pub level_progress: u32,
    pub equipment: EquipmentSlots,
    pub abilities_used: AbilityUsage,
}

impl HeroState {
    pub fn new(kind: HeroKind, starting_mana: u32, rules: &RulesConfig) -> Self {
        let starting_mana = starting_mana.min(rules.max_mana);
        HeroState {
            kind,
            current_health: rules.starting_health,
            max_health: rules.starting_health,
            armor: 0,
            current_mana: starting_mana,
            max_mana: starting_mana,
            gold: 0,
            resource: kind.initial_resource(),
            leveled: false,
            level_progress: 0,
            equipment: EquipmentSlots::default(),
            abilities_used: AbilityUsage::default(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current_health <= 0
    }

    pub fn fury(&self) -> u32 {
        match self.resource {
            ClassResource::Fury(fury) => fury,
            _ => 0,
        }
    }

    pub fn arcana(&self) -> u32 {
        match self.resource {
            ClassResource::Arcana(arcana) => arcana,
            _ => 0,
        }
    }

    pub fn is_stealthed(&self) -> bool {
        matches!(self.resource, ClassResource::Stealth(true))
    }

    /// Add Fury up to `cap`; no effect on heroes without Fury
    pub fn gain_fury(&mut self, amount: u32, cap: u32) {
        if let ClassResource::Fury(fury) = &mut self.resource {
            *fury = (*fury + amount).min(cap);
        }
    }

    pub fn gain_arcana(&mut self, amount: u32) {
        if let ClassResource::Arcana(arcana) = &mut self.resource {
            *arcana += amount;
        }
    }

    pub fn set_stealth(&mut self, stealthed: bool) {
        if let ClassResource::Stealth(flag) = &mut self.resource {
            *flag = stealthed;
        }
    }

    pub fn weapon_damage(&self) -> i32 {
        self.equipment.weapon_damage()
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.current_health -= amount.max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.current_health = (self.current_health + amount.max(0)).min(self.max_health);
    }

    /// Refund or gain mana without exceeding the current maximum
    pub fn gain_mana(&mut self, amount: u32) {
        self.current_mana = (self.current_mana + amount).min(self.max_mana);
    }

    /// Upkeep mana growth: raise the maximum (up to `cap`) and refill
    pub fn grow_mana(&mut self, cap: u32) {
        self.max_mana = (self.max_mana + 1).min(cap);
        self.current_mana = self.max_mana;
    }

    /// Add level progress; returns true if this crossed the threshold
    pub fn add_level_progress(&mut self, amount: u32, threshold: u32) -> bool {
        self.level_progress += amount;
        if !self.leveled && self.level_progress >= threshold {
            self.leveled = true;
            return true;
        }
        false
    }

    /// Equip an item, moving stat bonuses from the replaced item to the new one
    pub fn equip(&mut self, item: EquipmentInstance, mana_cap: u32) -> Option<EquipmentInstance> {
        let slot = item.slot;
        let new_bonus = (item.health_bonus(), item.armor_bonus(), item.mana_bonus());
        let previous = self.equipment.equip(item);

        if let Some(old) = &previous {
            self.max_health -= old.health_bonus();
            self.current_health = self.current_health.min(self.max_health);
            self.armor = (self.armor - old.armor_bonus()).max(0);
            self.max_mana = self.max_mana.saturating_sub(self.equipment.applied_mana(slot));
            self.current_mana = self.current_mana.min(self.max_mana);
        }

        let (health, armor, mana) = new_bonus;
        self.max_health += health;
        self.current_health += health;
        self.armor += armor;
        let before = self.max_mana;
        self.max_mana = (self.max_mana + mana).min(mana_cap);
        let applied = self.max_mana - before;
        self.equipment.set_applied_mana(slot, applied);
        self.current_mana = (self.current_mana + applied).min(self.max_mana);

        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::equipment::test_support::item;
    use crate::core::EquipmentSlot;

    fn hero(kind: HeroKind) -> HeroState {
        HeroState::new(kind, 1, &RulesConfig::default())
    }

    #[test]
    fn test_hero_kind_parse() {
        assert_eq!("Necromancer".parse::<HeroKind>().unwrap(), HeroKind::Necromancer);
        assert_eq!("  BARBARIAN ".parse::<HeroKind>().unwrap(), HeroKind::Barbarian);
        assert_eq!("Mage".parse::<HeroKind>().unwrap(), HeroKind::Mage);
        assert!(matches!(
            "Paladin".parse::<HeroKind>(),
            Err(EngineError::UnknownHero(_))
        ));
    }

    #[test]
    fn test_new_hero_starting_stats() {
        let h = hero(HeroKind::Rogue);
        assert_eq!(h.current_health, 30);
        assert_eq!(h.armor, 0);
        assert_eq!(h.gold, 0);
        assert_eq!(h.current_mana, 1);
        assert_eq!(h.resource, ClassResource::Stealth(false));
        assert!(!h.abilities_used.any());
    }

    #[test]
    fn test_fury_is_capped() {
        let mut h = hero(HeroKind::Barbarian);
        h.gain_fury(10, 12);
        h.gain_fury(5, 12);
        assert_eq!(h.fury(), 12);

        let mut mage = hero(HeroKind::Mage);
        mage.gain_fury(3, 12);
        assert_eq!(mage.fury(), 0, "Only Fury heroes gain Fury");
    }

    #[test]
    fn test_power_cost_drops_with_level_and_arcana() {
        let rules = RulesConfig::default();
        let mut necro = hero(HeroKind::Necromancer);
        assert_eq!(HeroKind::Necromancer.power_cost(&necro, &rules), 2);
        necro.leveled = true;
        assert_eq!(HeroKind::Necromancer.power_cost(&necro, &rules), 0);

        let mut mage = hero(HeroKind::Mage);
        assert_eq!(HeroKind::Mage.power_cost(&mage, &rules), 1);
        mage.gain_arcana(5);
        assert_eq!(HeroKind::Mage.power_cost(&mage, &rules), 0);
    }

    #[test]
    fn test_power_cost_follows_rules() {
        let rules = RulesConfig {
            barbarian_power_cost: 3,
            rogue_power_cost: 0,
            ..RulesConfig::default()
        };
        let mut barbarian = hero(HeroKind::Barbarian);
        assert_eq!(HeroKind::Barbarian.power_cost(&barbarian, &rules), 3);
        barbarian.leveled = true;
        assert_eq!(HeroKind::Barbarian.power_cost(&barbarian, &rules), 0);
        assert_eq!(HeroKind::Rogue.power_cost(&hero(HeroKind::Rogue), &rules), 0);
    }

    #[test]
    fn test_level_up_is_one_way() {
        let mut h = hero(HeroKind::Barbarian);
        assert!(!h.add_level_progress(10, 15));
        assert!(h.add_level_progress(6, 15));
        assert!(h.leveled);
        assert!(!h.add_level_progress(20, 15), "Leveling only fires once");
        assert!(h.leveled);
    }

    #[test]
    fn test_grow_mana_is_capped() {
        let mut h = hero(HeroKind::Mage);
        h.max_mana = 10;
        h.current_mana = 3;
        h.grow_mana(10);
        assert_eq!(h.max_mana, 10);
        assert_eq!(h.current_mana, 10);
    }

    #[test]
    fn test_equip_swaps_bonuses() {
        let mut h = hero(HeroKind::Barbarian);
        let plate = item(1, 1, 3, EquipmentSlot::Chest, "+4 health, +2 armor");
        h.equip(plate, 10);
        assert_eq!(h.max_health, 34);
        assert_eq!(h.current_health, 34);
        assert_eq!(h.armor, 2);

        let robe = item(2, 1, 2, EquipmentSlot::Chest, "+1 max mana");
        let replaced = h.equip(robe, 10);
        assert_eq!(replaced.map(|i| i.id.as_u32()), Some(1));
        assert_eq!(h.max_health, 30);
        assert_eq!(h.current_health, 30);
        assert_eq!(h.armor, 0);
        assert_eq!(h.max_mana, 2);
        assert_eq!(h.current_mana, 2);
    }

    #[test]
    fn test_equip_swap_removes_only_capped_mana() {
        let mut h = hero(HeroKind::Mage);
        h.max_mana = 9;
        h.current_mana = 9;

        h.equip(item(1, 2, 3, EquipmentSlot::Jewelry, "+2 max mana"), 10);
        assert_eq!(h.max_mana, 10);
        assert_eq!(h.current_mana, 10);
        assert_eq!(h.equipment.applied_mana(EquipmentSlot::Jewelry), 1);

        h.equip(item(2, 1, 2, EquipmentSlot::Jewelry, "+1 armor"), 10);
        assert_eq!(h.max_mana, 9);
        assert_eq!(h.current_mana, 9);
        assert_eq!(h.armor, 1);
        assert_eq!(h.equipment.applied_mana(EquipmentSlot::Jewelry), 0);
    }
}
