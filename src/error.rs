//! Error types for herodeck
//!
//! `ActionError` is a recoverable rejection of a player verb: the caller keeps
//! its previous state and may retry. `EngineError` covers everything else:
//! bad input files, bad configuration and controller contract violations.

use crate::core::{CardId, HeroKind, PlayerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Unknown hero: {0}")]
    UnknownHero(String),

    #[error("Invalid rules configuration: {0}")]
    InvalidConfig(String),

    #[error("Controller for {0} was asked to act out of turn")]
    NotControllersTurn(PlayerId),

    #[error("Game is already over")]
    GameAlreadyOver,

    #[error("State integrity violated: {0}")]
    Integrity(String),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Why a player verb was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    #[error("Game is over")]
    GameOver,

    #[error("Not your turn")]
    NotYourTurn,

    #[error("Can only {action} during main phase")]
    WrongPhase { action: String },

    #[error("Combat already in progress")]
    CombatInProgress,

    #[error("Not enough mana")]
    InsufficientMana,

    #[error("Not enough gold")]
    InsufficientGold,

    #[error("Not enough health")]
    InsufficientHealth,

    #[error("Card not in hand")]
    CardNotInHand,

    #[error("Minion not found")]
    MinionNotFound,

    #[error("Card is not a minion")]
    NotAMinion,

    #[error("Minion is tapped")]
    MinionTapped,

    #[error("Minion has summoning sickness")]
    SummoningSick,

    #[error("{ability} already used this turn")]
    AbilityAlreadyUsed { ability: String },

    #[error("Already purchased this turn")]
    AlreadyPurchased,

    #[error("Item not in market")]
    ItemNotInMarket,

    #[error("Only a {required} can {action}")]
    WrongHero { required: HeroKind, action: String },

    #[error("Nothing to attack with")]
    NothingToAttackWith,

    #[error("No combat in progress")]
    NoCombat,

    #[error("No attackers declared")]
    NoAttackers,

    #[error("Minion {0} declared more than once")]
    DuplicateMinion(CardId),

    #[error("Not in blocking phase")]
    NotBlockingPhase,

    #[error("Not in damage order phase")]
    NotDamageOrderPhase,

    #[error("Only the defending player can block")]
    NotDefender,

    #[error("Minion is not attacking")]
    NotAttacking,

    #[error("Minion is already blocking")]
    AlreadyBlocking,

    #[error("Damage order must list every blocker exactly once")]
    InvalidDamageOrder,

    #[error("Damage order required for attacker {0}")]
    DamageOrderRequired(CardId),
}

/// Result of a player verb: the next state, or why the verb was rejected
pub type ActionResult<T> = std::result::Result<T, ActionError>;
