//! Greedy AI controller
//!
//! Makes every decision with a fixed priority list and one-ply lookahead
//! through the view's legality helpers. It sees only what the view shows,
//! so it has no information a human opponent would not have.

use crate::core::{CardId, CardInstance, EquipmentId, HeroKind, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{AttackTarget, TurnAction};
use smallvec::SmallVec;

const KILL_AND_SURVIVE: i32 = 1000;
const TRADE: i32 = 500;
const WALL: i32 = 300;
const CHUMP: i32 = 100;

/// Greedy controller
pub struct GreedyController {
    player_id: PlayerId,
}

impl GreedyController {
    pub fn new(player_id: PlayerId) -> Self {
        GreedyController { player_id }
    }

    /// Whether using the hero power now is worth it
    fn power_is_safe(&self, view: &GameStateView) -> bool {
        let hero = view.hero();
        let rules = view.rules();
        match hero.kind {
            HeroKind::Necromancer => {
                hero.current_health > 2 * rules.dark_pact_health_cost && view.deck_size() > 0
            }
            HeroKind::Barbarian => hero.fury() < rules.fury_cap,
            HeroKind::Mage => true,
            HeroKind::Rogue => !hero.is_stealthed(),
        }
    }

    /// Best hero attack: the strongest minion we can kill without dying to
    /// the strike back, otherwise the enemy hero
    fn choose_hero_attack(&self, view: &GameStateView) -> Option<AttackTarget> {
        let health = view.hero().current_health;

        let mut best: Option<&CardInstance> = None;
        for minion in view.opponent_battlefield() {
            let Ok(preview) = view.preview_hero_attack(AttackTarget::Minion(minion.id)) else {
                continue;
            };
            if preview.lethal && preview.reflected < health && best.map_or(true, |b| minion.attack > b.attack) {
                best = Some(minion);
            }
        }
        if let Some(minion) = best {
            return Some(AttackTarget::Minion(minion.id));
        }

        let preview = view.preview_hero_attack(AttackTarget::Hero).ok()?;
        (preview.reflected < health || preview.lethal).then_some(AttackTarget::Hero)
    }

    fn block_score(blocker: &CardInstance, attacker: &CardInstance, lethal_if_unblocked: bool) -> Option<i32> {
        let kills = blocker.attack >= attacker.current_health;
        let survives = blocker.current_health > attacker.attack;
        match (kills, survives) {
            (true, true) => Some(KILL_AND_SURVIVE),
            (true, false) => Some(TRADE - blocker.value()),
            (false, true) => Some(WALL),
            (false, false) if lethal_if_unblocked => Some(CHUMP),
            (false, false) => None,
        }
    }
}

impl PlayerController for GreedyController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_turn_action(&mut self, view: &GameStateView) -> Option<TurnAction> {
        if let Some(card) = view.hand().iter().find(|card| view.can_play_card(card.id)) {
            return Some(TurnAction::PlayCard(card.id));
        }

        if view.can_use_hero_power() && self.power_is_safe(view) {
            return Some(TurnAction::HeroPower);
        }

        if let Some(target) = self.choose_hero_attack(view) {
            return Some(TurnAction::HeroAttack(target));
        }

        if view.hero().kind == HeroKind::Necromancer {
            let strongest = view
                .graveyard()
                .iter()
                .filter(|card| view.can_raise(card.id))
                .fold(None::<&CardInstance>, |best, card| match best {
                    Some(b) if b.value() >= card.value() => Some(b),
                    _ => Some(card),
                });
            if let Some(card) = strongest {
                return Some(TurnAction::RaiseMinion(card.id));
            }
        }

        None
    }

    fn choose_purchase(&mut self, view: &GameStateView) -> Option<EquipmentId> {
        view.market()
            .iter()
            .filter(|item| view.can_purchase(item.id))
            .fold(None::<&crate::core::EquipmentInstance>, |best, item| match best {
                Some(b) if b.cost >= item.cost => Some(b),
                _ => Some(item),
            })
            .map(|item| item.id)
    }

    fn choose_attackers(&mut self, _view: &GameStateView, available: &[CardId]) -> SmallVec<[CardId; 8]> {
        available.iter().copied().collect()
    }

    fn choose_blockers(
        &mut self,
        view: &GameStateView,
        available_blockers: &[CardId],
        attackers: &[CardId],
    ) -> SmallVec<[(CardId, CardId); 8]> {
        let mut blocks = SmallVec::new();
        if attackers.is_empty() || available_blockers.is_empty() {
            return blocks;
        }

        let mut attacker_cards: Vec<&CardInstance> = attackers.iter().filter_map(|&id| view.minion(id)).collect();
        let blocker_cards: Vec<&CardInstance> = available_blockers.iter().filter_map(|&id| view.minion(id)).collect();

        // Most dangerous attackers first
        attacker_cards.sort_by_key(|card| std::cmp::Reverse(card.attack));

        let health = view.hero().current_health;
        let mut unblocked: i32 = attacker_cards.iter().map(|card| card.attack.max(0)).sum();

        for attacker in &attacker_cards {
            let lethal_if_unblocked = unblocked >= health;
            let mut best: Option<(i32, CardId)> = None;

            for blocker in &blocker_cards {
                if blocks.iter().any(|(b, _)| *b == blocker.id) {
                    continue;
                }
                let Some(score) = Self::block_score(blocker, attacker, lethal_if_unblocked) else {
                    continue;
                };
                if best.map_or(true, |(s, _)| score > s) {
                    best = Some((score, blocker.id));
                }
            }

            if let Some((_, blocker)) = best {
                blocks.push((blocker, attacker.id));
                unblocked -= attacker.attack.max(0);
            }
        }

        blocks
    }

    fn choose_damage_order(
        &mut self,
        view: &GameStateView,
        _attacker: CardId,
        blockers: &[CardId],
    ) -> SmallVec<[CardId; 4]> {
        // Kill the weakest first
        let mut order: SmallVec<[CardId; 4]> = blockers.iter().copied().collect();
        order.sort_by_key(|id| view.minion(*id).map_or(i32::MAX, |card| card.current_health));
        order
    }
}
