//! Core game types and entities

pub mod card;
pub mod config;
pub mod effects;
pub mod entity;
pub mod equipment;
pub mod hero;
pub mod player;

pub use card::{CardInstance, CardKind};
pub use config::{RulesConfig, MAX_MANA};
pub use effects::{parse_effects, parse_equipment_bonuses, BonusList, Effect, EffectList, EquipmentBonus};
pub use entity::{CardId, EquipmentId, IdAllocator, InstanceId};
pub use equipment::{EquipmentInstance, EquipmentSlot, EquipmentSlots};
pub use hero::{AbilityUsage, ClassResource, HeroAttack, HeroKind, HeroPower, HeroState};
pub use player::{PlayerId, PlayerState};
