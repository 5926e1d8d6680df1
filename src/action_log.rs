//! Append-only action log
//!
//! Every state transition appends typed events here. The log travels with
//! `GameState`, so any state value carries the full history that produced it.

use crate::core::{CardId, EquipmentId, HeroKind, PlayerId};
use crate::game::{AttackTarget, ShopTier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Something that happened in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted {
        first_player: PlayerId,
    },
    TurnStarted {
        player: PlayerId,
        turn_number: u32,
        round_number: u32,
    },
    TurnEnded {
        player: PlayerId,
    },
    CardDrawn {
        player: PlayerId,
    },
    MillDamage {
        player: PlayerId,
        amount: i32,
    },
    CardPlayed {
        player: PlayerId,
        card: CardId,
        name: Arc<str>,
    },
    HeroDamaged {
        player: PlayerId,
        amount: i32,
    },
    HeroPowerUsed {
        player: PlayerId,
        power: String,
    },
    HeroAttacked {
        player: PlayerId,
        attack: String,
        target: AttackTarget,
        damage: i32,
        reflected: i32,
    },
    EquipmentPurchased {
        player: PlayerId,
        item: EquipmentId,
        name: Arc<str>,
        cost: u32,
    },
    MinionRaised {
        player: PlayerId,
        card: CardId,
        name: Arc<str>,
    },
    MinionSacrificed {
        player: PlayerId,
        card: CardId,
        name: Arc<str>,
    },
    AttackersDeclared {
        player: PlayerId,
        attackers: Vec<CardId>,
    },
    BlockerDeclared {
        player: PlayerId,
        blocker: CardId,
        attacker: CardId,
    },
    DamageOrderSet {
        attacker: CardId,
        order: Vec<CardId>,
    },
    CombatResolved,
    MinionDied {
        owner: PlayerId,
        card: CardId,
        name: Arc<str>,
        bounty: u32,
    },
    LeveledUp {
        player: PlayerId,
        hero: HeroKind,
    },
    ShopTierAdvanced {
        tier: ShopTier,
    },
    GameOver {
        winner: Option<PlayerId>,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::GameStarted { first_player } => write!(f, "Game started, {first_player} goes first"),
            GameEvent::TurnStarted {
                player,
                turn_number,
                round_number,
            } => write!(f, "Turn {turn_number} (round {round_number}): {player}"),
            GameEvent::TurnEnded { player } => write!(f, "{player} ended their turn"),
            GameEvent::CardDrawn { player } => write!(f, "{player} drew a card"),
            GameEvent::MillDamage { player, amount } => {
                write!(f, "{player} has no cards left and takes {amount} damage")
            }
            GameEvent::CardPlayed { player, card, name } => write!(f, "{player} played {name} ({card})"),
            GameEvent::HeroDamaged { player, amount } => write!(f, "{player}'s hero takes {amount} damage"),
            GameEvent::HeroPowerUsed { player, power } => write!(f, "{player} used {power}"),
            GameEvent::HeroAttacked {
                player,
                attack,
                target,
                damage,
                reflected,
            } => {
                write!(f, "{player} used {attack} on {target} for {damage} damage")?;
                if *reflected > 0 {
                    write!(f, " and took {reflected} back")?;
                }
                Ok(())
            }
            GameEvent::EquipmentPurchased {
                player,
                item,
                name,
                cost,
            } => write!(f, "{player} bought {name} ({item}) for {cost} gold"),
            GameEvent::MinionRaised { player, card, name } => write!(f, "{player} raised {name} ({card})"),
            GameEvent::MinionSacrificed { player, card, name } => {
                write!(f, "{player} sacrificed {name} ({card})")
            }
            GameEvent::AttackersDeclared { player, attackers } => {
                write!(f, "{player} attacks with {} minion(s)", attackers.len())
            }
            GameEvent::BlockerDeclared {
                player,
                blocker,
                attacker,
            } => write!(f, "{player} blocks {attacker} with {blocker}"),
            GameEvent::DamageOrderSet { attacker, order } => {
                write!(f, "{attacker} will assign damage in order {order:?}")
            }
            GameEvent::CombatResolved => write!(f, "Combat resolved"),
            GameEvent::MinionDied {
                owner,
                card,
                name,
                bounty,
            } => {
                write!(f, "{owner}'s {name} ({card}) died")?;
                if *bounty > 0 {
                    write!(f, ", {} collects {bounty} gold", owner.opponent())?;
                }
                Ok(())
            }
            GameEvent::LeveledUp { player, hero } => write!(f, "{player}'s {hero} leveled up!"),
            GameEvent::ShopTierAdvanced { tier } => write!(f, "Shop refreshed with {tier} tier items"),
            GameEvent::GameOver { winner: Some(winner) } => write!(f, "Game over: {winner} wins"),
            GameEvent::GameOver { winner: None } => write!(f, "Game over: draw"),
        }
    }
}

/// One entry in the action log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub turn_number: u32,
    pub event: GameEvent,
}

impl fmt::Display for LoggedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[T{}] {}", self.turn_number, self.event)
    }
}

/// Append-only log of everything that happened in a game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    entries: Vec<LoggedEvent>,
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog { entries: Vec::new() }
    }

    pub fn push(&mut self, turn_number: u32, event: GameEvent) {
        self.entries.push(LoggedEvent { turn_number, event });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LoggedEvent] {
        &self.entries
    }

    /// Entries appended after the first `index` entries
    pub fn since(&self, index: usize) -> &[LoggedEvent] {
        self.entries.get(index..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&LoggedEvent> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.entries.iter().map(|entry| &entry.event)
    }
}
