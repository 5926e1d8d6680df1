//! End-to-end tests for the main-phase verbs and hero abilities

mod common;

use common::{item_row, minion_row, spell_row, Table};
use herodeck::core::{EquipmentSlot, HeroKind, PlayerId};
use herodeck::game::{AttackTarget, TurnAction};
use herodeck::ActionError;
use similar_asserts::assert_eq;

#[test]
fn test_play_minion_and_spell() {
    let mut table = Table::new(HeroKind::Barbarian, HeroKind::Mage);
    table.set_mana(PlayerId::Player, 5);
    let wolf = table.to_hand(PlayerId::Player, minion_row("Wolf", 2, 2, 2, 1));
    let bolt = table.to_hand(PlayerId::Player, spell_row("Bolt", 2, "Deal 3 damage"));
    let big = table.to_hand(PlayerId::Player, minion_row("Giant", 9, 9, 9, 5));

    let game = table.game.play_card(PlayerId::Player, wolf).unwrap();
    assert!(game.player.zones.battlefield.contains(wolf));
    assert!(game.player.zones.battlefield.get(wolf).unwrap().summoning_sick);
    assert_eq!(game.player.hero.current_mana, 3);

    let game = game.play_card(PlayerId::Player, bolt).unwrap();
    assert!(game.player.zones.discard.contains(bolt));
    assert_eq!(game.ai.hero.current_health, 27);

    assert_eq!(
        game.play_card(PlayerId::Player, big).unwrap_err(),
        ActionError::InsufficientMana
    );
    assert_eq!(
        game.play_card(PlayerId::Player, bolt).unwrap_err(),
        ActionError::CardNotInHand
    );
    assert_eq!(
        game.play_card(PlayerId::Ai, big).unwrap_err(),
        ActionError::NotYourTurn
    );
    game.check_integrity().unwrap();
}

#[test]
fn test_prepared_minion_can_attack_at_once() {
    let mut table = Table::new(HeroKind::Rogue, HeroKind::Mage);
    let mut row = minion_row("Charger", 1, 2, 1, 1);
    row.effect = "Prepared".to_string();
    let charger = table.to_hand(PlayerId::Player, row);

    let game = table
        .game
        .play_card(PlayerId::Player, charger)
        .and_then(|g| g.declare_attackers(PlayerId::Player, &[charger]))
        .and_then(|g| g.skip_blocking(PlayerId::Ai))
        .unwrap();
    assert_eq!(game.ai.hero.current_health, 28);
}

#[test]
fn test_dark_pact_needs_more_health_than_it_costs() {
    let mut table = Table::new(HeroKind::Necromancer, HeroKind::Mage);
    table.set_mana(PlayerId::Player, 3);
    table.to_deck(PlayerId::Player, minion_row("Ghoul", 2, 2, 2, 1));
    table.game.player.hero.current_health = 2;

    assert_eq!(
        table.game.use_hero_power(PlayerId::Player).unwrap_err(),
        ActionError::InsufficientHealth
    );
    assert_eq!(table.game.player.hero.current_health, 2);

    table.game.player.hero.current_health = 3;
    let game = table.game.use_hero_power(PlayerId::Player).unwrap();
    assert_eq!(game.player.hero.current_health, 1);
    assert_eq!(game.player.hero.current_mana, 1);
    assert_eq!(game.player.zones.hand.len(), 1);
    assert!(matches!(
        game.use_hero_power(PlayerId::Player).unwrap_err(),
        ActionError::AbilityAlreadyUsed { .. }
    ));
}

#[test]
fn test_raise_and_sacrifice() {
    let mut table = Table::new(HeroKind::Necromancer, HeroKind::Mage);
    table.set_mana(PlayerId::Player, 3);
    let ghoul = table.to_graveyard(PlayerId::Player, minion_row("Ghoul", 2, 2, 2, 3));
    let bolt = table.to_graveyard(PlayerId::Player, spell_row("Bolt", 1, "Deal 1 damage"));

    assert_eq!(
        table.game.raise_minion(PlayerId::Player, bolt).unwrap_err(),
        ActionError::NotAMinion
    );

    let game = table.game.raise_minion(PlayerId::Player, ghoul).unwrap();
    let raised = game.player.zones.battlefield.get(ghoul).unwrap();
    assert!(raised.tapped);
    assert!(raised.summoning_sick);
    assert_eq!(raised.current_health, 2);
    assert_eq!(game.player.hero.current_mana, 1);
    assert_eq!(game.player.hero.level_progress, 1);

    let game = game.sacrifice_minion(PlayerId::Player, ghoul).unwrap();
    assert!(game.player.zones.graveyard.contains(ghoul));
    assert_eq!(game.player.hero.current_mana, 2);
    // No bounty for a sacrifice
    assert_eq!(game.ai.hero.gold, 0);

    // Other heroes cannot raise
    let mut table = Table::new(HeroKind::Mage, HeroKind::Rogue);
    let ghoul = table.to_graveyard(PlayerId::Player, minion_row("Ghoul", 2, 2, 2, 3));
    assert!(matches!(
        table.game.raise_minion(PlayerId::Player, ghoul).unwrap_err(),
        ActionError::WrongHero { .. }
    ));
}

#[test]
fn test_fury_strike() {
    let mut table = Table::new(HeroKind::Barbarian, HeroKind::Mage);
    assert_eq!(
        table
            .game
            .use_hero_attack(PlayerId::Player, AttackTarget::Hero)
            .unwrap_err(),
        ActionError::NothingToAttackWith
    );

    let game = table.game.use_hero_power(PlayerId::Player).unwrap();
    assert_eq!(game.player.hero.fury(), 2);

    let game = game.use_hero_attack(PlayerId::Player, AttackTarget::Hero).unwrap();
    assert_eq!(game.ai.hero.current_health, 28);
    assert_eq!(game.player.hero.fury(), 0);
    assert_eq!(game.player.hero.level_progress, 2);
    // The Mage carries no weapon, so nothing comes back
    assert_eq!(game.player.hero.current_health, 30);
}

#[test]
fn test_hero_attack_on_minion_reflects_its_attack() {
    let mut table = Table::new(HeroKind::Barbarian, HeroKind::Mage);
    let ogre = table.to_battlefield(PlayerId::Ai, minion_row("Ogre", 4, 3, 5, 2));
    table.game.player.hero.armor = 1;

    let game = table.game.use_hero_power(PlayerId::Player).unwrap();
    let preview = game
        .preview_hero_attack(PlayerId::Player, AttackTarget::Minion(ogre))
        .unwrap();
    assert_eq!(preview.damage, 2);
    assert_eq!(preview.reflected, 2);
    assert!(!preview.lethal);

    let game = game
        .use_hero_attack(PlayerId::Player, AttackTarget::Minion(ogre))
        .unwrap();
    assert_eq!(game.ai.zones.battlefield.get(ogre).unwrap().current_health, 3);
    assert_eq!(game.player.hero.current_health, 28);
}

#[test]
fn test_lethal_hero_attack_kills_minion_and_pays_bounty() {
    let mut table = Table::new(HeroKind::Mage, HeroKind::Rogue);
    let imp = table.to_battlefield(PlayerId::Ai, minion_row("Imp", 1, 1, 1, 2));

    let game = table
        .game
        .use_hero_attack(PlayerId::Player, AttackTarget::Minion(imp))
        .unwrap();
    assert!(game.ai.zones.graveyard.contains(imp));
    assert_eq!(game.player.hero.gold, 2);
    // Not from stealth, so the imp still strikes back
    assert_eq!(game.player.hero.current_health, 29);
}

#[test]
fn test_rogue_stealth_strike() {
    let mut table = Table::new(HeroKind::Rogue, HeroKind::Mage);
    table.set_mana(PlayerId::Player, 2);

    let game = table.game.use_hero_power(PlayerId::Player).unwrap();
    assert!(game.player.hero.is_stealthed());
    assert_eq!(game.player.hero.current_mana, 0);

    let game = game.use_hero_attack(PlayerId::Player, AttackTarget::Hero).unwrap();
    assert_eq!(game.ai.hero.current_health, 28);
    assert!(!game.player.hero.is_stealthed());
}

#[test]
fn test_stealth_lethal_takes_nothing_back() {
    let mut table = Table::new(HeroKind::Rogue, HeroKind::Mage);
    table.set_mana(PlayerId::Player, 2);
    let brute = table.to_battlefield(PlayerId::Ai, minion_row("Brute", 3, 6, 2, 1));

    let game = table.game.use_hero_power(PlayerId::Player).unwrap();
    let preview = game
        .preview_hero_attack(PlayerId::Player, AttackTarget::Minion(brute))
        .unwrap();
    assert_eq!(preview.damage, 2);
    assert!(preview.lethal);
    assert_eq!(preview.reflected, 0);
}

#[test]
fn test_arcane_surge_and_spell_arcana() {
    let mut table = Table::new(HeroKind::Mage, HeroKind::Rogue);
    table.set_mana(PlayerId::Player, 4);
    let spark = table.to_hand(PlayerId::Player, spell_row("Spark", 1, "Deal 1 damage"));

    let game = table
        .game
        .use_hero_power(PlayerId::Player)
        .and_then(|g| g.play_card(PlayerId::Player, spark))
        .unwrap();
    assert_eq!(game.player.hero.arcana(), 2);
    assert_eq!(game.player.hero.level_progress, 1);
    assert_eq!(game.player.hero.current_mana, 2);
}

#[test]
fn test_purchase_equipment() {
    let items = [
        item_row("Dagger", 1, 2, "weapon", "+2 weapon damage"),
        item_row("Vest", 1, 3, "chest", "+3 health"),
        item_row("Axe", 1, 2, "weapon", "+1 weapon damage"),
    ];
    let mut table = Table::with_shop(HeroKind::Rogue, HeroKind::Mage, &items);
    let dagger = table.game.shop.market[0].id;
    let vest = table.game.shop.market[1].id;

    assert_eq!(
        table.game.purchase_equipment(PlayerId::Player, dagger).unwrap_err(),
        ActionError::InsufficientGold
    );

    table.game.player.hero.gold = 5;
    let game = table.game.purchase_equipment(PlayerId::Player, dagger).unwrap();
    assert_eq!(game.player.hero.gold, 3);
    assert_eq!(game.player.hero.weapon_damage(), 2);
    assert_eq!(game.player.hero.level_progress, 2);
    assert_eq!(game.shop.market.len(), 2);
    assert!(game.player.hero.equipment.get(EquipmentSlot::Weapon).is_some());

    assert_eq!(
        game.purchase_equipment(PlayerId::Player, vest).unwrap_err(),
        ActionError::AlreadyPurchased
    );
    assert_eq!(
        game.purchase_equipment(PlayerId::Player, dagger).unwrap_err(),
        ActionError::AlreadyPurchased
    );
    game.check_integrity().unwrap();
}

#[test]
fn test_swapping_capped_mana_item_restores_old_max() {
    let items = [
        item_row("Amulet", 1, 3, "jewelry", "+2 max mana"),
        item_row("Ring", 1, 2, "jewelry", "+1 armor"),
    ];
    let mut table = Table::with_shop(HeroKind::Mage, HeroKind::Rogue, &items);
    table.set_mana(PlayerId::Player, 9);
    table.game.player.hero.gold = 10;
    let amulet = table.game.shop.market[0].id;
    let ring = table.game.shop.market[1].id;

    let mut game = table.game.purchase_equipment(PlayerId::Player, amulet).unwrap();
    assert_eq!(game.player.hero.max_mana, 10);
    assert_eq!(game.player.hero.current_mana, 10);

    game.player.hero.abilities_used.shop_purchase = false;
    let game = game.purchase_equipment(PlayerId::Player, ring).unwrap();
    assert_eq!(game.player.hero.max_mana, 9);
    assert_eq!(game.player.hero.current_mana, 9);
    assert_eq!(game.player.hero.armor, 1);
    game.check_integrity().unwrap();
}

#[test]
fn test_simultaneous_hero_death_is_a_draw() {
    let items = [item_row("Spear", 1, 1, "weapon", "+1 weapon damage")];
    let mut table = Table::with_shop(HeroKind::Barbarian, HeroKind::Mage, &items);
    let spear = table.game.shop.market[0].clone();
    table.game.shop.market.clear();
    table.game.ai.hero.equip(spear, 10);
    table.game.player.hero.current_health = 1;
    table.game.ai.hero.current_health = 2;

    let game = table
        .game
        .use_hero_power(PlayerId::Player)
        .and_then(|g| g.use_hero_attack(PlayerId::Player, AttackTarget::Hero))
        .unwrap();
    assert!(game.game_over);
    assert_eq!(game.winner, None);
}

#[test]
fn test_apply_action_dispatches() {
    let mut table = Table::new(HeroKind::Barbarian, HeroKind::Mage);
    let wolf = table.to_hand(PlayerId::Player, minion_row("Wolf", 1, 1, 1, 0));

    let direct = table.game.play_card(PlayerId::Player, wolf).unwrap();
    let dispatched = table
        .game
        .apply_action(PlayerId::Player, &TurnAction::PlayCard(wolf))
        .unwrap();
    assert_eq!(direct, dispatched);
}

#[test]
fn test_failed_verb_leaves_state_unchanged() {
    let table = Table::new(HeroKind::Necromancer, HeroKind::Mage);
    let before = table.game.clone();
    assert!(table.game.use_hero_power(PlayerId::Player).is_err());
    assert_eq!(table.game, before);
}
