//! Rules configuration
//!
//! Every numeric rule the engine applies lives here so alternative rule sets
//! can be loaded from JSON. Missing fields fall back to the standard rules.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard cap on a hero's maximum mana
pub const MAX_MANA: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub starting_health: i32,
    /// Maximum mana a hero can grow to (at most `MAX_MANA`)
    pub max_mana: u32,
    /// Number of face-up items in the shop
    pub market_size: usize,
    /// Round at which the shop switches to mid-tier items
    pub mid_tier_round: u32,
    /// Round at which the shop switches to late-tier items
    pub late_tier_round: u32,

    pub first_player_mana: u32,
    pub second_player_mana: u32,
    pub first_player_cards: usize,
    pub second_player_cards: usize,

    pub gold_per_turn: u32,
    /// Damage taken when drawing from an empty deck
    pub mill_damage: i32,

    /// Unleveled hero power mana costs; leveled powers are free
    pub necromancer_power_cost: u32,
    pub barbarian_power_cost: u32,
    pub mage_power_cost: u32,
    pub rogue_power_cost: u32,

    pub fury_cap: u32,
    pub fury_per_power: u32,
    /// Health paid by Dark Pact; the hero must have more than this to use it
    pub dark_pact_health_cost: i32,
    pub raise_mana_cost: u32,
    pub sacrifice_refund: u32,
    /// Arcana at which Arcane Surge becomes free and draws a card
    pub arcana_threshold: u32,

    pub necromancer_level_threshold: u32,
    pub barbarian_level_threshold: u32,
    pub mage_level_threshold: u32,
    pub rogue_level_threshold: u32,

    /// Upper bound on main-phase actions a controller may take per turn
    pub bot_action_limit: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            starting_health: 30,
            max_mana: MAX_MANA,
            market_size: 5,
            mid_tier_round: 5,
            late_tier_round: 9,
            first_player_mana: 1,
            second_player_mana: 2,
            first_player_cards: 4,
            second_player_cards: 5,
            gold_per_turn: 1,
            mill_damage: 1,
            necromancer_power_cost: 2,
            barbarian_power_cost: 1,
            mage_power_cost: 1,
            rogue_power_cost: 2,
            fury_cap: 12,
            fury_per_power: 2,
            dark_pact_health_cost: 2,
            raise_mana_cost: 2,
            sacrifice_refund: 1,
            arcana_threshold: 5,
            necromancer_level_threshold: 5,
            barbarian_level_threshold: 15,
            mage_level_threshold: 15,
            rogue_level_threshold: 15,
            bot_action_limit: 10,
        }
    }
}

impl RulesConfig {
    /// Load a rules file (JSON) and validate it
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse rules from JSON text and validate them
    pub fn from_json(content: &str) -> Result<Self> {
        let rules: RulesConfig = serde_json::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject rule sets that would break state invariants
    pub fn validate(&self) -> Result<()> {
        if self.max_mana == 0 || self.max_mana > MAX_MANA {
            return Err(EngineError::InvalidConfig(format!(
                "max_mana must be between 1 and {MAX_MANA}, got {}",
                self.max_mana
            )));
        }
        if self.first_player_mana > self.max_mana || self.second_player_mana > self.max_mana {
            return Err(EngineError::InvalidConfig(
                "opening mana cannot exceed max_mana".to_string(),
            ));
        }
        if self.starting_health <= 0 {
            return Err(EngineError::InvalidConfig(
                "starting_health must be positive".to_string(),
            ));
        }
        if self.market_size == 0 {
            return Err(EngineError::InvalidConfig(
                "market_size must be positive".to_string(),
            ));
        }
        if self.mid_tier_round >= self.late_tier_round {
            return Err(EngineError::InvalidConfig(
                "mid_tier_round must come before late_tier_round".to_string(),
            ));
        }
        if self.dark_pact_health_cost < 0 || self.mill_damage < 0 {
            return Err(EngineError::InvalidConfig(
                "health costs cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}
