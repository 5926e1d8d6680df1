//! Card instances (minions and spells)

use crate::core::{CardId, Effect, EffectList};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Card kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Minion,
    Spell,
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardKind::Minion => write!(f, "minion"),
            CardKind::Spell => write!(f, "spell"),
        }
    }
}

/// A card in a game
///
/// The template fields (name through effects) never change after the card is
/// created. `current_health`, `tapped` and `summoning_sick` only matter while
/// the card is a minion on the battlefield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: CardId,
    pub name: Arc<str>,
    pub kind: CardKind,
    pub mana_cost: u32,
    pub attack: i32,
    pub health: i32,
    /// Gold paid to the opponent of the owner when this minion dies
    pub bounty: u32,
    pub effect_text: Arc<str>,
    /// Effects parsed from `effect_text` at creation
    pub effects: EffectList,

    pub current_health: i32,
    pub tapped: bool,
    pub summoning_sick: bool,
}

impl CardInstance {
    pub fn is_minion(&self) -> bool {
        self.kind == CardKind::Minion
    }

    pub fn is_spell(&self) -> bool {
        self.kind == CardKind::Spell
    }

    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }

    /// Effects that do something when the card is played (keywords excluded)
    pub fn on_play_effects(&self) -> impl Iterator<Item = Effect> + '_ {
        self.effects.iter().copied().filter(|e| !e.is_keyword())
    }

    pub fn is_dead(&self) -> bool {
        self.current_health <= 0
    }

    /// Untapped, not summoning sick minion
    pub fn can_attack(&self) -> bool {
        self.is_minion() && !self.tapped && !self.summoning_sick
    }

    /// Untapped minion
    pub fn can_block(&self) -> bool {
        self.is_minion() && !self.tapped
    }

    pub fn heal_to_full(&mut self) {
        self.current_health = self.health;
    }

    /// Rough combat value used by the bot
    pub fn value(&self) -> i32 {
        self.attack + self.current_health.max(0)
    }
}

impl std::fmt::Display for CardInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            CardKind::Minion => write!(
                f,
                "{} ({}) [{}/{}]",
                self.name, self.id, self.attack, self.current_health
            ),
            CardKind::Spell => write!(f, "{} ({})", self.name, self.id),
        }
    }
}
