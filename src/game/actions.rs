//! Player actions and hero abilities

use crate::action_log::GameEvent;
use crate::core::{CardId, CardInstance, ClassResource, Effect, EquipmentId, HeroKind, PlayerId};
use crate::error::{ActionError, ActionResult};
use crate::game::GameState;
use crate::zones::Zone;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a hero attack is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackTarget {
    /// The opposing hero
    Hero,
    /// A minion on the opposing battlefield
    Minion(CardId),
}

impl fmt::Display for AttackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackTarget::Hero => write!(f, "the enemy hero"),
            AttackTarget::Minion(id) => write!(f, "minion {id}"),
        }
    }
}

/// Main-phase actions a controller can choose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    PlayCard(CardId),
    HeroPower,
    HeroAttack(AttackTarget),
    Purchase(EquipmentId),
    RaiseMinion(CardId),
    SacrificeMinion(CardId),
}

impl fmt::Display for TurnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnAction::PlayCard(id) => write!(f, "play card {id}"),
            TurnAction::HeroPower => write!(f, "use hero power"),
            TurnAction::HeroAttack(target) => write!(f, "hero attack on {target}"),
            TurnAction::Purchase(id) => write!(f, "purchase item {id}"),
            TurnAction::RaiseMinion(id) => write!(f, "raise minion {id}"),
            TurnAction::SacrificeMinion(id) => write!(f, "sacrifice minion {id}"),
        }
    }
}

/// Outcome of a hero attack, computed without applying it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackPreview {
    pub damage: i32,
    /// Damage the attacking hero takes back
    pub reflected: i32,
    /// Whether the strike kills its target
    pub lethal: bool,
}

impl GameState {
    /// Apply any main-phase action
    pub fn apply_action(&self, player: PlayerId, action: &TurnAction) -> ActionResult<GameState> {
        match *action {
            TurnAction::PlayCard(card) => self.play_card(player, card),
            TurnAction::HeroPower => self.use_hero_power(player),
            TurnAction::HeroAttack(target) => self.use_hero_attack(player, target),
            TurnAction::Purchase(item) => self.purchase_equipment(player, item),
            TurnAction::RaiseMinion(card) => self.raise_minion(player, card),
            TurnAction::SacrificeMinion(card) => self.sacrifice_minion(player, card),
        }
    }

    /// Mana a card costs this player right now
    ///
    /// A leveled Mage pays 1 less for spells.
    pub fn effective_cost(&self, player: PlayerId, card: &CardInstance) -> u32 {
        let hero = &self.player(player).hero;
        if card.is_spell() && hero.kind == HeroKind::Mage && hero.leveled {
            card.mana_cost.saturating_sub(1)
        } else {
            card.mana_cost
        }
    }

    /// Check whether `play_card` would succeed
    pub fn can_play_card(&self, player: PlayerId, card_id: CardId) -> ActionResult<()> {
        self.ensure_main_phase_action(player, "play cards")?;
        let state = self.player(player);
        let card = state.zones.hand.get(card_id).ok_or(ActionError::CardNotInHand)?;
        if state.hero.current_mana < self.effective_cost(player, card) {
            return Err(ActionError::InsufficientMana);
        }
        Ok(())
    }

    /// Play a card from hand
    ///
    /// Minions enter the battlefield summoning sick unless Prepared. Spells go
    /// to the discard pile, or to the echo zone if they have Echo. On-play
    /// effects resolve afterwards.
    pub fn play_card(&self, player: PlayerId, card_id: CardId) -> ActionResult<GameState> {
        self.can_play_card(player, card_id)?;

        let mut next = self.clone();
        let state = next.player_mut(player);
        let Some(card) = state.zones.hand.remove(card_id) else {
            return Err(ActionError::CardNotInHand);
        };
        let cost = self.effective_cost(player, &card);
        state.hero.current_mana -= cost;

        let name = card.name.clone();
        let effects: Vec<Effect> = card.on_play_effects().collect();
        let is_spell = card.is_spell();
        if card.is_minion() {
            let mut minion = card;
            minion.current_health = minion.health;
            minion.tapped = false;
            minion.summoning_sick = !minion.has_effect(Effect::Prepared);
            state.zones.battlefield.add(minion);
        } else if card.has_effect(Effect::Echo) {
            state.zones.echo.add(card);
        } else {
            state.zones.discard.add(card);
        }
        next.log_event(GameEvent::CardPlayed {
            player,
            card: card_id,
            name,
        });

        for effect in effects {
            if next.game_over {
                break;
            }
            next.resolve_effect(player, effect);
        }

        if is_spell && next.player(player).hero.kind == HeroKind::Mage {
            next.player_mut(player).hero.gain_arcana(1);
            next.add_level_progress(player, 1);
        }

        next.check_game_over();
        Ok(next)
    }

    /// Resolve one on-play effect against its default target
    fn resolve_effect(&mut self, player: PlayerId, effect: Effect) {
        let fury_cap = self.rules.fury_cap;
        match effect {
            Effect::DamageHero(n) => {
                let target = player.opponent();
                self.player_mut(target).hero.take_damage(n as i32);
                self.log_event(GameEvent::HeroDamaged {
                    player: target,
                    amount: n as i32,
                });
            }
            Effect::Draw(n) => self.draw_cards(player, n),
            Effect::GainFury(n) => self.player_mut(player).hero.gain_fury(n, fury_cap),
            Effect::GainArmor(n) => self.player_mut(player).hero.armor += n as i32,
            Effect::GainGold(n) => self.player_mut(player).hero.gold += n,
            Effect::Heal(n) => self.player_mut(player).hero.heal(n as i32),
            Effect::Prepared | Effect::Echo => {}
        }
    }

    /// Check whether `use_hero_power` would succeed
    pub fn can_use_hero_power(&self, player: PlayerId) -> ActionResult<()> {
        self.ensure_main_phase_action(player, "use hero powers")?;
        let hero = &self.player(player).hero;
        if hero.abilities_used.hero_power {
            return Err(ActionError::AbilityAlreadyUsed {
                ability: "Hero power".to_string(),
            });
        }
        if hero.current_mana < hero.kind.power_cost(hero, &self.rules) {
            return Err(ActionError::InsufficientMana);
        }
        if hero.kind == HeroKind::Necromancer && hero.current_health <= self.rules.dark_pact_health_cost {
            return Err(ActionError::InsufficientHealth);
        }
        Ok(())
    }

    /// Use the hero power (once per turn)
    pub fn use_hero_power(&self, player: PlayerId) -> ActionResult<GameState> {
        self.can_use_hero_power(player)?;

        let mut next = self.clone();
        let rules = next.rules;
        let hero = &mut next.player_mut(player).hero;
        let kind = hero.kind;
        let power = kind.power(hero.leveled);
        let cost = kind.power_cost(hero, &rules);
        hero.current_mana -= cost;
        hero.abilities_used.hero_power = true;

        let mut draws = 0;
        match kind {
            HeroKind::Necromancer => {
                hero.take_damage(rules.dark_pact_health_cost);
                draws = 1;
            }
            HeroKind::Barbarian => hero.gain_fury(rules.fury_per_power, rules.fury_cap),
            HeroKind::Mage => {
                hero.gain_arcana(1);
                if hero.arcana() >= rules.arcana_threshold {
                    draws = 1;
                }
            }
            HeroKind::Rogue => hero.set_stealth(true),
        }
        next.log_event(GameEvent::HeroPowerUsed {
            player,
            power: power.name.to_string(),
        });

        next.draw_cards(player, draws);
        next.check_game_over();
        Ok(next)
    }

    /// Compute a hero attack without applying it
    ///
    /// Fails with the same error `use_hero_attack` would.
    pub fn preview_hero_attack(&self, player: PlayerId, target: AttackTarget) -> ActionResult<AttackPreview> {
        self.ensure_main_phase_action(player, "attack")?;
        let hero = &self.player(player).hero;
        if hero.abilities_used.hero_attack {
            return Err(ActionError::AbilityAlreadyUsed {
                ability: "Hero attack".to_string(),
            });
        }

        let defender = self.opponent_of(player);
        let (strike_back, target_health) = match target {
            AttackTarget::Hero => (defender.hero.weapon_damage(), defender.hero.current_health),
            AttackTarget::Minion(id) => {
                let minion = defender
                    .zones
                    .battlefield
                    .get(id)
                    .ok_or(ActionError::MinionNotFound)?;
                (minion.attack, minion.current_health)
            }
        };

        let attack = hero.kind.attack(hero.leveled);
        let mut damage = attack.base_damage;
        if hero.kind == HeroKind::Barbarian {
            damage += hero.fury() as i32;
        }
        damage += hero.weapon_damage();
        if hero.kind == HeroKind::Barbarian && hero.leveled {
            damage += hero.armor;
        }
        if hero.kind == HeroKind::Rogue && hero.is_stealthed() {
            damage *= if hero.leveled && target == AttackTarget::Hero { 3 } else { 2 };
        }
        if damage <= 0 {
            return Err(ActionError::NothingToAttackWith);
        }

        let lethal = damage >= target_health;
        let reflected = if lethal && hero.is_stealthed() {
            0
        } else {
            (strike_back.max(0) - hero.armor).max(0)
        };

        Ok(AttackPreview {
            damage,
            reflected,
            lethal,
        })
    }

    /// Use the hero attack (once per turn)
    ///
    /// The target strikes back: a minion with its attack, a hero with its
    /// weapon. Armor reduces what comes back. A lethal strike from stealth
    /// takes nothing back.
    pub fn use_hero_attack(&self, player: PlayerId, target: AttackTarget) -> ActionResult<GameState> {
        let preview = self.preview_hero_attack(player, target)?;

        let mut next = self.clone();
        let defender = player.opponent();
        match target {
            AttackTarget::Hero => next.player_mut(defender).hero.take_damage(preview.damage),
            AttackTarget::Minion(id) => {
                if let Some(minion) = next.player_mut(defender).zones.battlefield.get_mut(id) {
                    minion.current_health -= preview.damage;
                }
            }
        }

        let hero = &mut next.player_mut(player).hero;
        let kind = hero.kind;
        let attack = kind.attack(hero.leveled);
        hero.abilities_used.hero_attack = true;
        hero.take_damage(preview.reflected);
        match kind {
            HeroKind::Barbarian => {
                if let ClassResource::Fury(fury) = &mut hero.resource {
                    *fury = 0;
                }
            }
            HeroKind::Rogue => hero.set_stealth(false),
            HeroKind::Necromancer | HeroKind::Mage => {}
        }

        next.log_event(GameEvent::HeroAttacked {
            player,
            attack: attack.name.to_string(),
            target,
            damage: preview.damage,
            reflected: preview.reflected,
        });
        if kind == HeroKind::Barbarian {
            next.add_level_progress(player, preview.damage as u32);
        }

        next.sweep_dead_minions();
        next.check_game_over();
        Ok(next)
    }

    /// Check whether `purchase_equipment` would succeed
    pub fn can_purchase(&self, player: PlayerId, item: EquipmentId) -> ActionResult<()> {
        self.ensure_main_phase_action(player, "purchase equipment")?;
        let hero = &self.player(player).hero;
        if hero.abilities_used.shop_purchase {
            return Err(ActionError::AlreadyPurchased);
        }
        let item = self.shop.get(item).ok_or(ActionError::ItemNotInMarket)?;
        if hero.gold < item.cost {
            return Err(ActionError::InsufficientGold);
        }
        Ok(())
    }

    /// Buy an item from the market and equip it (once per turn)
    ///
    /// An item already in the same slot is replaced and its bonuses removed.
    pub fn purchase_equipment(&self, player: PlayerId, item_id: EquipmentId) -> ActionResult<GameState> {
        self.can_purchase(player, item_id)?;

        let mut next = self.clone();
        let item = next.shop.take(item_id).ok_or(ActionError::ItemNotInMarket)?;
        let cost = item.cost;
        let name = item.name.clone();
        let mana_cap = next.rules.max_mana;

        let hero = &mut next.player_mut(player).hero;
        hero.gold -= cost;
        hero.abilities_used.shop_purchase = true;
        hero.equip(item, mana_cap);
        let kind = hero.kind;

        next.log_event(GameEvent::EquipmentPurchased {
            player,
            item: item_id,
            name,
            cost,
        });
        if kind == HeroKind::Rogue {
            next.add_level_progress(player, cost);
        }
        Ok(next)
    }

    fn ensure_necromancer(&self, player: PlayerId, action: &str) -> ActionResult<()> {
        self.ensure_main_phase_action(player, action)?;
        if self.player(player).hero.kind != HeroKind::Necromancer {
            return Err(ActionError::WrongHero {
                required: HeroKind::Necromancer,
                action: action.to_string(),
            });
        }
        Ok(())
    }

    /// Check whether `raise_minion` would succeed
    pub fn can_raise(&self, player: PlayerId, card_id: CardId) -> ActionResult<()> {
        self.ensure_necromancer(player, "raise minions")?;
        let state = self.player(player);
        let card = state
            .zones
            .graveyard
            .get(card_id)
            .ok_or(ActionError::MinionNotFound)?;
        if !card.is_minion() {
            return Err(ActionError::NotAMinion);
        }
        if state.hero.current_mana < self.rules.raise_mana_cost {
            return Err(ActionError::InsufficientMana);
        }
        Ok(())
    }

    /// Return a minion from the graveyard to the battlefield (Necromancer)
    ///
    /// The minion comes back at full health, tapped and summoning sick, or
    /// ready to act if the hero has leveled.
    pub fn raise_minion(&self, player: PlayerId, card_id: CardId) -> ActionResult<GameState> {
        self.can_raise(player, card_id)?;

        let mut next = self.clone();
        let cost = next.rules.raise_mana_cost;
        let state = next.player_mut(player);
        state.hero.current_mana -= cost;
        let ready = state.hero.leveled;
        let minion = state
            .zones
            .move_card(card_id, Zone::Graveyard, Zone::Battlefield)
            .ok_or(ActionError::MinionNotFound)?;
        minion.heal_to_full();
        minion.tapped = !ready;
        minion.summoning_sick = !ready;
        let name = minion.name.clone();

        next.log_event(GameEvent::MinionRaised {
            player,
            card: card_id,
            name,
        });
        next.add_level_progress(player, 1);
        Ok(next)
    }

    /// Send one of your minions to the graveyard for a mana refund (Necromancer)
    ///
    /// Sacrificed minions pay no bounty.
    pub fn sacrifice_minion(&self, player: PlayerId, card_id: CardId) -> ActionResult<GameState> {
        self.ensure_necromancer(player, "sacrifice minions")?;
        if !self.player(player).zones.battlefield.contains(card_id) {
            return Err(ActionError::MinionNotFound);
        }

        let mut next = self.clone();
        let refund = next.rules.sacrifice_refund;
        let state = next.player_mut(player);
        let minion = state
            .zones
            .move_card(card_id, Zone::Battlefield, Zone::Graveyard)
            .ok_or(ActionError::MinionNotFound)?;
        minion.tapped = false;
        minion.summoning_sick = false;
        let name = minion.name.clone();
        state.hero.gain_mana(refund);

        next.log_event(GameEvent::MinionSacrificed {
            player,
            card: card_id,
            name,
        });
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::test_support::{minion, spell};
    use crate::core::equipment::test_support::item;
    use crate::core::EquipmentSlot;
    use crate::game::state::test_support::game_with;
    use crate::game::{Phase, Shop};

    fn id(n: u32) -> CardId {
        CardId::new(n)
    }

    fn in_hand(hero: HeroKind, cards: Vec<CardInstance>) -> GameState {
        let mut game = game_with(hero, vec![minion(90, 1, 1, 0), minion(91, 1, 1, 0)], HeroKind::Mage, vec![]);
        for card in cards {
            game.player.zones.hand.add(card);
        }
        game.player.hero.current_mana = 5;
        game.player.hero.max_mana = 5;
        game
    }

    #[test]
    fn test_play_minion() {
        let game = in_hand(HeroKind::Barbarian, vec![minion(1, 2, 3, 1)]);
        let next = game.play_card(PlayerId::Player, id(1)).unwrap();

        let played = next.player.zones.battlefield.get(id(1)).unwrap();
        assert!(played.summoning_sick);
        assert!(!played.tapped);
        assert_eq!(next.player.hero.current_mana, 4);
        assert!(game.player.zones.hand.contains(id(1)), "Input state is unchanged");
    }

    #[test]
    fn test_prepared_minion_can_attack_at_once() {
        let mut card = minion(1, 2, 2, 0);
        card.effects = crate::core::parse_effects("Prepared");
        let game = in_hand(HeroKind::Barbarian, vec![card]);
        let next = game.play_card(PlayerId::Player, id(1)).unwrap();
        assert!(next.player.zones.battlefield.get(id(1)).unwrap().can_attack());
    }

    #[test]
    fn test_play_card_errors() {
        let game = in_hand(HeroKind::Barbarian, vec![spell(1, 9, "Deal 9 damage")]);
        assert_eq!(
            game.play_card(PlayerId::Player, id(1)).unwrap_err(),
            ActionError::InsufficientMana
        );
        assert_eq!(
            game.play_card(PlayerId::Player, id(77)).unwrap_err(),
            ActionError::CardNotInHand
        );
        assert_eq!(
            game.play_card(PlayerId::Ai, id(1)).unwrap_err(),
            ActionError::NotYourTurn
        );

        let mut ended = game.clone();
        ended.phase = Phase::End;
        assert_eq!(
            ended.play_card(PlayerId::Player, id(1)).unwrap_err(),
            ActionError::WrongPhase {
                action: "play cards".to_string()
            }
        );
    }

    #[test]
    fn test_damage_spell_can_win() {
        let mut game = in_hand(HeroKind::Barbarian, vec![spell(1, 2, "Deal 3 damage")]);
        game.ai.hero.current_health = 3;

        let next = game.play_card(PlayerId::Player, id(1)).unwrap();
        assert!(next.player.zones.discard.contains(id(1)));
        assert!(next.is_game_over());
        assert_eq!(next.winner(), Some(PlayerId::Player));
    }

    #[test]
    fn test_spell_effects_resolve_on_self() {
        let game = in_hand(
            HeroKind::Barbarian,
            vec![spell(1, 1, "Gain 3 fury. Gain 2 armor. Gain 1 gold. Draw a card")],
        );
        let next = game.play_card(PlayerId::Player, id(1)).unwrap();
        let hero = &next.player.hero;
        assert_eq!(hero.fury(), 3);
        assert_eq!(hero.armor, 2);
        assert_eq!(hero.gold, 1);
        assert_eq!(next.player.zones.hand.len(), 1);
    }

    #[test]
    fn test_echo_spell_goes_to_echo_zone() {
        let game = in_hand(HeroKind::Mage, vec![spell(1, 1, "Echo. Deal 1 damage")]);
        let next = game.play_card(PlayerId::Player, id(1)).unwrap();
        assert!(next.player.zones.echo.contains(id(1)));
        assert_eq!(next.ai.hero.current_health, 29);
    }

    #[test]
    fn test_mage_spells_build_arcana_and_level() {
        let mut game = in_hand(HeroKind::Mage, vec![spell(1, 2, "Draw a card")]);
        game.player.hero.level_progress = 14;

        let next = game.play_card(PlayerId::Player, id(1)).unwrap();
        assert_eq!(next.player.hero.arcana(), 1);
        assert!(next.player.hero.leveled);
        assert!(next
            .action_log
            .iter()
            .any(|e| matches!(e, GameEvent::LeveledUp { hero: HeroKind::Mage, .. })));
    }

    #[test]
    fn test_leveled_mage_spells_cost_less() {
        let mut game = in_hand(HeroKind::Mage, vec![spell(1, 2, "Draw a card"), spell(2, 0, "")]);
        game.player.hero.leveled = true;

        let next = game.play_card(PlayerId::Player, id(1)).unwrap();
        assert_eq!(next.player.hero.current_mana, 4);
        let next = next.play_card(PlayerId::Player, id(2)).unwrap();
        assert_eq!(next.player.hero.current_mana, 4, "Cost floors at zero");
    }

    #[test]
    fn test_dark_pact_requires_health() {
        let mut game = in_hand(HeroKind::Necromancer, vec![]);
        game.player.hero.current_health = 2;
        assert_eq!(
            game.use_hero_power(PlayerId::Player).unwrap_err(),
            ActionError::InsufficientHealth
        );
        assert_eq!(game.player.hero.current_health, 2);

        game.player.hero.current_health = 10;
        let next = game.use_hero_power(PlayerId::Player).unwrap();
        assert_eq!(next.player.hero.current_health, 8);
        assert_eq!(next.player.hero.current_mana, 3);
        assert_eq!(next.player.zones.hand.len(), 1);
        assert_eq!(
            next.use_hero_power(PlayerId::Player).unwrap_err(),
            ActionError::AbilityAlreadyUsed {
                ability: "Hero power".to_string()
            }
        );
    }

    #[test]
    fn test_battle_fury_caps() {
        let mut game = in_hand(HeroKind::Barbarian, vec![]);
        game.player.hero.resource = ClassResource::Fury(11);
        let next = game.use_hero_power(PlayerId::Player).unwrap();
        assert_eq!(next.player.hero.fury(), 12);
        assert_eq!(next.player.hero.current_mana, 4);
    }

    #[test]
    fn test_arcane_surge_draws_at_threshold() {
        let mut game = in_hand(HeroKind::Mage, vec![]);
        game.player.hero.resource = ClassResource::Arcana(4);
        let next = game.use_hero_power(PlayerId::Player).unwrap();
        assert_eq!(next.player.hero.arcana(), 5);
        assert_eq!(next.player.hero.current_mana, 4);
        assert_eq!(next.player.zones.hand.len(), 1);

        game.player.hero.resource = ClassResource::Arcana(5);
        let free = game.use_hero_power(PlayerId::Player).unwrap();
        assert_eq!(free.player.hero.current_mana, 5);
    }

    #[test]
    fn test_stealth_strike_doubles_and_breaks_stealth() {
        let mut game = in_hand(HeroKind::Rogue, vec![]);
        game = game.use_hero_power(PlayerId::Player).unwrap();
        assert!(game.player.hero.is_stealthed());

        let next = game.use_hero_attack(PlayerId::Player, AttackTarget::Hero).unwrap();
        assert_eq!(next.ai.hero.current_health, 28);
        assert!(!next.player.hero.is_stealthed());
        assert_eq!(
            next.use_hero_attack(PlayerId::Player, AttackTarget::Hero).unwrap_err(),
            ActionError::AbilityAlreadyUsed {
                ability: "Hero attack".to_string()
            }
        );
    }

    #[test]
    fn test_leveled_rogue_triples_against_heroes() {
        let mut game = in_hand(HeroKind::Rogue, vec![]);
        game.player.hero.leveled = true;
        game.player.hero.set_stealth(true);
        game.ai.zones.battlefield.add(minion(5, 0, 9, 0));

        let hero = game.preview_hero_attack(PlayerId::Player, AttackTarget::Hero).unwrap();
        assert_eq!(hero.damage, 3);
        let minion = game
            .preview_hero_attack(PlayerId::Player, AttackTarget::Minion(id(5)))
            .unwrap();
        assert_eq!(minion.damage, 2);
    }

    #[test]
    fn test_minion_strikes_back_through_armor() {
        let mut game = in_hand(HeroKind::Mage, vec![]);
        game.player.hero.armor = 1;
        game.ai.zones.battlefield.add(minion(5, 3, 4, 2));

        let next = game
            .use_hero_attack(PlayerId::Player, AttackTarget::Minion(id(5)))
            .unwrap();
        assert_eq!(next.ai.zones.battlefield.get(id(5)).unwrap().current_health, 3);
        assert_eq!(next.player.hero.current_health, 28);
    }

    #[test]
    fn test_lethal_stealth_strike_takes_nothing_back() {
        let mut game = in_hand(HeroKind::Rogue, vec![]);
        game.player.hero.set_stealth(true);
        game.ai.zones.battlefield.add(minion(5, 6, 2, 3));

        let next = game
            .use_hero_attack(PlayerId::Player, AttackTarget::Minion(id(5)))
            .unwrap();
        assert_eq!(next.player.hero.current_health, 30);
        assert!(next.ai.zones.graveyard.contains(id(5)));
        assert_eq!(next.player.hero.gold, 3);
    }

    #[test]
    fn test_fury_strike() {
        let mut game = in_hand(HeroKind::Barbarian, vec![]);
        assert_eq!(
            game.use_hero_attack(PlayerId::Player, AttackTarget::Hero).unwrap_err(),
            ActionError::NothingToAttackWith
        );

        game.player.hero.resource = ClassResource::Fury(6);
        game.player
            .hero
            .equip(item(40, 1, 2, EquipmentSlot::Weapon, "+2 weapon damage"), 10);
        let next = game.use_hero_attack(PlayerId::Player, AttackTarget::Hero).unwrap();
        assert_eq!(next.ai.hero.current_health, 22);
        assert_eq!(next.player.hero.fury(), 0);
        assert_eq!(next.player.hero.level_progress, 8);
    }

    #[test]
    fn test_leveled_fury_strike_adds_armor() {
        let mut game = in_hand(HeroKind::Barbarian, vec![]);
        game.player.hero.leveled = true;
        game.player.hero.armor = 3;
        game.player.hero.resource = ClassResource::Fury(2);
        let preview = game.preview_hero_attack(PlayerId::Player, AttackTarget::Hero).unwrap();
        assert_eq!(preview.damage, 5);
    }

    #[test]
    fn test_attack_missing_minion() {
        let game = in_hand(HeroKind::Mage, vec![]);
        assert_eq!(
            game.use_hero_attack(PlayerId::Player, AttackTarget::Minion(id(55)))
                .unwrap_err(),
            ActionError::MinionNotFound
        );
    }

    fn with_shop(mut game: GameState, items: Vec<crate::core::EquipmentInstance>) -> GameState {
        game.shop = Shop::new(items, game.rules.market_size);
        game
    }

    #[test]
    fn test_purchase_equipment() {
        let game = with_shop(
            in_hand(HeroKind::Rogue, vec![]),
            vec![
                item(40, 1, 3, EquipmentSlot::Chest, "+5 health"),
                item(41, 1, 1, EquipmentSlot::Relic, "+1 armor"),
            ],
        );
        assert_eq!(
            game.purchase_equipment(PlayerId::Player, id(40)).unwrap_err(),
            ActionError::InsufficientGold
        );

        let mut rich = game.clone();
        rich.player.hero.gold = 5;
        let next = rich.purchase_equipment(PlayerId::Player, id(40)).unwrap();
        assert_eq!(next.player.hero.gold, 2);
        assert_eq!(next.player.hero.max_health, 35);
        assert_eq!(next.player.hero.current_health, 35);
        assert_eq!(next.player.hero.level_progress, 3);
        assert!(next.shop.get(id(40)).is_none());
        assert_eq!(
            next.purchase_equipment(PlayerId::Player, id(41)).unwrap_err(),
            ActionError::AlreadyPurchased
        );
        assert_eq!(
            rich.purchase_equipment(PlayerId::Player, id(99)).unwrap_err(),
            ActionError::ItemNotInMarket
        );
        assert!(next.check_integrity().is_ok());
    }

    #[test]
    fn test_mana_item_raises_current_mana() {
        let mut game = with_shop(
            in_hand(HeroKind::Mage, vec![]),
            vec![item(40, 1, 1, EquipmentSlot::Jewelry, "+2 max mana")],
        );
        game.player.hero.gold = 1;
        game.player.hero.current_mana = 1;
        let next = game.purchase_equipment(PlayerId::Player, id(40)).unwrap();
        assert_eq!(next.player.hero.max_mana, 7);
        assert_eq!(next.player.hero.current_mana, 3);
    }

    #[test]
    fn test_raise_and_sacrifice() {
        let mut game = in_hand(HeroKind::Necromancer, vec![]);
        let mut dead = minion(5, 2, 3, 1);
        dead.current_health = -1;
        game.player.zones.graveyard.add(dead);

        let raised = game.raise_minion(PlayerId::Player, id(5)).unwrap();
        let back = raised.player.zones.battlefield.get(id(5)).unwrap();
        assert_eq!(back.current_health, 3);
        assert!(back.tapped);
        assert!(back.summoning_sick);
        assert_eq!(raised.player.hero.current_mana, 3);
        assert_eq!(raised.player.hero.level_progress, 1);

        let sacrificed = raised.sacrifice_minion(PlayerId::Player, id(5)).unwrap();
        assert!(sacrificed.player.zones.graveyard.contains(id(5)));
        assert_eq!(sacrificed.player.hero.current_mana, 4);
        assert_eq!(sacrificed.ai.hero.gold, 0, "Sacrifice pays no bounty");
    }

    #[test]
    fn test_leveled_necromancer_raises_ready_minions() {
        let mut game = in_hand(HeroKind::Necromancer, vec![]);
        game.player.hero.leveled = true;
        game.player.zones.graveyard.add(minion(5, 2, 3, 1));
        let raised = game.raise_minion(PlayerId::Player, id(5)).unwrap();
        assert!(raised.player.zones.battlefield.get(id(5)).unwrap().can_attack());
    }

    #[test]
    fn test_raise_requires_necromancer() {
        let mut game = in_hand(HeroKind::Mage, vec![]);
        game.player.zones.graveyard.add(minion(5, 2, 3, 1));
        assert_eq!(
            game.raise_minion(PlayerId::Player, id(5)).unwrap_err(),
            ActionError::WrongHero {
                required: HeroKind::Necromancer,
                action: "raise minions".to_string()
            }
        );
    }

    #[test]
    fn test_sacrifice_refund_is_capped() {
        let mut game = in_hand(HeroKind::Necromancer, vec![]);
        game.player.zones.battlefield.add(minion(5, 1, 1, 0));
        let next = game.sacrifice_minion(PlayerId::Player, id(5)).unwrap();
        assert_eq!(next.player.hero.current_mana, 5);
    }

    #[test]
    fn test_apply_action_dispatches() {
        let game = in_hand(HeroKind::Barbarian, vec![minion(1, 1, 1, 0)]);
        let next = game
            .apply_action(PlayerId::Player, &TurnAction::PlayCard(id(1)))
            .unwrap();
        assert!(next.player.zones.battlefield.contains(id(1)));
        assert_eq!(TurnAction::HeroAttack(AttackTarget::Hero).to_string(), "hero attack on the enemy hero");
    }
}
