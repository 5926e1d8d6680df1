//! Minion combat
//!
//! Combat runs as a small protocol on top of the main phase:
//! attackers are declared by the active player, the defender declares
//! blockers, the attacker orders damage for every attacker blocked by more
//! than one minion, and then damage resolves simultaneously.

use crate::action_log::GameEvent;
use crate::core::{CardId, PlayerId};
use crate::error::{ActionError, ActionResult};
use crate::game::GameState;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Where the combat protocol currently stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    #[default]
    None,
    Blocking,
    DamageOrder,
    Resolving,
}

/// Combat state for the current combat
///
/// Uses BTreeMap for deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub active: bool,
    pub phase: CombatPhase,

    /// Player who declared the attack
    pub attacking_player: Option<PlayerId>,

    /// Attacking minions in declaration order
    pub attackers: SmallVec<[CardId; 8]>,

    /// Attacker -> blockers, in the order they were declared
    pub blockers: BTreeMap<CardId, SmallVec<[CardId; 4]>>,

    /// Attacker -> confirmed kill order for its blockers
    pub damage_order: BTreeMap<CardId, SmallVec<[CardId; 4]>>,
}

impl CombatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to no combat
    pub fn clear(&mut self) {
        *self = CombatState::default();
    }

    pub fn defending_player(&self) -> Option<PlayerId> {
        self.attacking_player.map(PlayerId::opponent)
    }

    pub fn is_attacking(&self, card_id: CardId) -> bool {
        self.attackers.contains(&card_id)
    }

    pub fn is_blocking(&self, card_id: CardId) -> bool {
        self.blockers.values().any(|b| b.contains(&card_id))
    }

    /// Blockers assigned to an attacker, in declaration order
    pub fn get_blockers(&self, attacker: CardId) -> &[CardId] {
        self.blockers.get(&attacker).map(|b| b.as_slice()).unwrap_or(&[])
    }

    /// Attackers blocked by two or more minions that still lack a damage order
    pub fn pending_orders(&self) -> impl Iterator<Item = CardId> + '_ {
        self.attackers.iter().copied().filter(|attacker| {
            self.get_blockers(*attacker).len() >= 2 && !self.damage_order.contains_key(attacker)
        })
    }

    pub fn needs_damage_order(&self) -> bool {
        self.pending_orders().next().is_some()
    }

    /// Blockers in the order the attacker will assign damage
    pub fn ordered_blockers(&self, attacker: CardId) -> SmallVec<[CardId; 4]> {
        match self.damage_order.get(&attacker) {
            Some(order) => order.clone(),
            None => self.get_blockers(attacker).iter().copied().collect(),
        }
    }
}

impl GameState {
    /// Declare attacking minions and open the blocking step
    ///
    /// Every attacker must be an untapped minion without summoning sickness on
    /// the active player's battlefield. All attackers tap together, or none do.
    pub fn declare_attackers(&self, player: PlayerId, attackers: &[CardId]) -> ActionResult<GameState> {
        self.ensure_main_phase_action(player, "declare attackers")?;
        if attackers.is_empty() {
            return Err(ActionError::NoAttackers);
        }

        let battlefield = &self.player(player).zones.battlefield;
        for (i, &attacker) in attackers.iter().enumerate() {
            if attackers[..i].contains(&attacker) {
                return Err(ActionError::DuplicateMinion(attacker));
            }
            let minion = battlefield.get(attacker).ok_or(ActionError::MinionNotFound)?;
            if !minion.is_minion() {
                return Err(ActionError::NotAMinion);
            }
            if minion.tapped {
                return Err(ActionError::MinionTapped);
            }
            if minion.summoning_sick {
                return Err(ActionError::SummoningSick);
            }
        }

        let mut next = self.clone();
        for minion in next.player_mut(player).zones.battlefield.iter_mut() {
            if attackers.contains(&minion.id) {
                minion.tapped = true;
            }
        }
        next.combat = CombatState {
            active: true,
            phase: CombatPhase::Blocking,
            attacking_player: Some(player),
            attackers: attackers.iter().copied().collect(),
            blockers: BTreeMap::new(),
            damage_order: BTreeMap::new(),
        };
        next.log_event(GameEvent::AttackersDeclared {
            player,
            attackers: attackers.to_vec(),
        });
        Ok(next)
    }

    /// Assign one of the defender's minions to block an attacker
    ///
    /// Blocking does not tap. An attacker may be blocked by any number of
    /// minions, but each minion blocks at most one attacker.
    pub fn declare_blocker(&self, player: PlayerId, blocker: CardId, attacker: CardId) -> ActionResult<GameState> {
        self.ensure_defender(player)?;
        if self.combat.phase != CombatPhase::Blocking {
            return Err(ActionError::NotBlockingPhase);
        }
        if !self.combat.is_attacking(attacker) {
            return Err(ActionError::NotAttacking);
        }
        let minion = self
            .player(player)
            .zones
            .battlefield
            .get(blocker)
            .ok_or(ActionError::MinionNotFound)?;
        if !minion.is_minion() {
            return Err(ActionError::NotAMinion);
        }
        if minion.tapped {
            return Err(ActionError::MinionTapped);
        }
        if self.combat.is_blocking(blocker) {
            return Err(ActionError::AlreadyBlocking);
        }

        let mut next = self.clone();
        next.combat.blockers.entry(attacker).or_default().push(blocker);
        // A new blocker invalidates any order chosen for the old set
        next.combat.damage_order.remove(&attacker);
        next.log_event(GameEvent::BlockerDeclared {
            player,
            blocker,
            attacker,
        });
        Ok(next)
    }

    /// Finish blocking
    ///
    /// Moves to the damage-order step if any attacker is blocked by several
    /// minions without an order yet, otherwise resolves combat right away.
    pub fn confirm_blocks(&self, player: PlayerId) -> ActionResult<GameState> {
        self.ensure_defender(player)?;
        if self.combat.phase != CombatPhase::Blocking {
            return Err(ActionError::NotBlockingPhase);
        }

        let mut next = self.clone();
        if next.combat.needs_damage_order() {
            next.combat.phase = CombatPhase::DamageOrder;
        } else {
            next.resolve_combat_damage();
        }
        Ok(next)
    }

    /// Decline to block: drop any declared blocks and resolve combat
    pub fn skip_blocking(&self, player: PlayerId) -> ActionResult<GameState> {
        self.ensure_defender(player)?;
        if self.combat.phase != CombatPhase::Blocking {
            return Err(ActionError::NotBlockingPhase);
        }

        let mut next = self.clone();
        next.combat.blockers.clear();
        next.combat.damage_order.clear();
        next.resolve_combat_damage();
        Ok(next)
    }

    /// Choose the order in which an attacker kills its blockers
    ///
    /// `order` must list every blocker of `attacker` exactly once.
    pub fn set_damage_order(&self, player: PlayerId, attacker: CardId, order: &[CardId]) -> ActionResult<GameState> {
        self.ensure_attacker(player)?;
        if !matches!(self.combat.phase, CombatPhase::Blocking | CombatPhase::DamageOrder) {
            return Err(ActionError::NotDamageOrderPhase);
        }
        if !self.combat.is_attacking(attacker) {
            return Err(ActionError::NotAttacking);
        }

        let blockers = self.combat.get_blockers(attacker);
        let is_permutation = order.len() == blockers.len()
            && order.iter().enumerate().all(|(i, id)| blockers.contains(id) && !order[..i].contains(id));
        if !is_permutation {
            return Err(ActionError::InvalidDamageOrder);
        }

        let mut next = self.clone();
        next.combat
            .damage_order
            .insert(attacker, order.iter().copied().collect());
        next.log_event(GameEvent::DamageOrderSet {
            attacker,
            order: order.to_vec(),
        });
        Ok(next)
    }

    /// Resolve combat once every multi-blocked attacker has a damage order
    pub fn resolve_combat(&self, player: PlayerId) -> ActionResult<GameState> {
        self.ensure_attacker(player)?;
        if self.combat.phase != CombatPhase::DamageOrder {
            return Err(ActionError::NotDamageOrderPhase);
        }
        if let Some(pending) = self.combat.pending_orders().next() {
            return Err(ActionError::DamageOrderRequired(pending));
        }

        let mut next = self.clone();
        next.resolve_combat_damage();
        Ok(next)
    }

    fn ensure_combat(&self) -> ActionResult<PlayerId> {
        if self.game_over {
            return Err(ActionError::GameOver);
        }
        match self.combat.attacking_player {
            Some(attacking) if self.combat.active => Ok(attacking),
            _ => Err(ActionError::NoCombat),
        }
    }

    fn ensure_defender(&self, player: PlayerId) -> ActionResult<()> {
        let attacking = self.ensure_combat()?;
        if player != attacking.opponent() {
            return Err(ActionError::NotDefender);
        }
        Ok(())
    }

    fn ensure_attacker(&self, player: PlayerId) -> ActionResult<()> {
        let attacking = self.ensure_combat()?;
        if player != attacking {
            return Err(ActionError::NotYourTurn);
        }
        Ok(())
    }

    /// Compute all combat damage, apply it at once, then clean up
    fn resolve_combat_damage(&mut self) {
        let Some(attacking) = self.combat.attacking_player else {
            self.combat.clear();
            return;
        };
        let defending = attacking.opponent();
        self.combat.phase = CombatPhase::Resolving;

        // First pass: work out who takes how much
        let mut minion_damage: FxHashMap<CardId, i32> = FxHashMap::default();
        let mut hero_damage = 0;
        {
            let attacker_field = &self.player(attacking).zones.battlefield;
            let defender_field = &self.player(defending).zones.battlefield;

            for &attacker_id in &self.combat.attackers {
                let Some(attacker) = attacker_field.get(attacker_id) else {
                    continue;
                };
                let power = attacker.attack.max(0);
                let blockers = self.combat.ordered_blockers(attacker_id);
                if blockers.is_empty() {
                    hero_damage += power;
                    continue;
                }

                let mut remaining = power;
                let last = blockers.len() - 1;
                for (i, blocker_id) in blockers.iter().enumerate() {
                    let Some(blocker) = defender_field.get(*blocker_id) else {
                        continue;
                    };
                    let assigned = if i == last {
                        remaining
                    } else {
                        remaining.min(blocker.current_health.max(0))
                    };
                    remaining -= assigned;
                    *minion_damage.entry(*blocker_id).or_default() += assigned;
                    *minion_damage.entry(attacker_id).or_default() += blocker.attack.max(0);
                }
            }
        }

        // Second pass: apply simultaneously
        for owner in [attacking, defending] {
            for minion in self.player_mut(owner).zones.battlefield.iter_mut() {
                if let Some(damage) = minion_damage.get(&minion.id) {
                    minion.current_health -= damage;
                }
            }
        }
        if hero_damage > 0 {
            self.player_mut(defending).hero.take_damage(hero_damage);
            self.log_event(GameEvent::HeroDamaged {
                player: defending,
                amount: hero_damage,
            });
        }

        self.sweep_dead_minions();
        self.combat.clear();
        self.log_event(GameEvent::CombatResolved);
        self.check_game_over();
    }
}
