//! Shared setup for integration tests
//!
//! `Table` builds a game with empty zones and lets a test place cards
//! exactly where it wants them. Player always goes first.

#![allow(dead_code)]

use herodeck::core::{CardId, CardKind, HeroKind, HeroState, PlayerId, PlayerState, RulesConfig};
use herodeck::game::{GameState, Shop};
use herodeck::loader::{CardRow, EntityFactory, EquipmentRow};
use std::path::PathBuf;

pub fn minion_row(name: &str, mana_cost: u32, attack: i32, health: i32, bounty: u32) -> CardRow {
    CardRow {
        name: name.to_string(),
        kind: CardKind::Minion,
        mana_cost,
        attack: Some(attack),
        health: Some(health),
        bounty,
        effect: String::new(),
    }
}

pub fn spell_row(name: &str, mana_cost: u32, effect: &str) -> CardRow {
    CardRow {
        name: name.to_string(),
        kind: CardKind::Spell,
        mana_cost,
        attack: None,
        health: None,
        bounty: 0,
        effect: effect.to_string(),
    }
}

pub fn item_row(name: &str, tier: u8, cost: u32, slot: &str, effect: &str) -> EquipmentRow {
    EquipmentRow {
        name: name.to_string(),
        tier: Some(tier),
        cost,
        slot: slot.to_string(),
        effect: effect.to_string(),
    }
}

pub struct Table {
    pub factory: EntityFactory,
    pub game: GameState,
}

impl Table {
    /// Player (first, 1 mana) vs AI (2 mana), no cards anywhere, empty shop
    pub fn new(player_hero: HeroKind, ai_hero: HeroKind) -> Self {
        Self::with_shop(player_hero, ai_hero, &[])
    }

    pub fn with_shop(player_hero: HeroKind, ai_hero: HeroKind, items: &[EquipmentRow]) -> Self {
        let rules = RulesConfig::default();
        let mut factory = EntityFactory::new();
        let items = items
            .iter()
            .map(|row| factory.create_equipment(row, row.tier.unwrap_or(1)).unwrap())
            .collect();
        let player = PlayerState::new(
            PlayerId::Player,
            HeroState::new(player_hero, rules.first_player_mana, &rules),
            Vec::new(),
        );
        let ai = PlayerState::new(
            PlayerId::Ai,
            HeroState::new(ai_hero, rules.second_player_mana, &rules),
            Vec::new(),
        );
        let game = GameState::new(player, ai, Shop::new(items, rules.market_size), PlayerId::Player, rules);
        Table { factory, game }
    }

    pub fn to_hand(&mut self, seat: PlayerId, row: CardRow) -> CardId {
        let card = self.factory.create_card(&row).unwrap();
        let id = card.id;
        self.game.player_mut(seat).zones.hand.add(card);
        id
    }

    pub fn to_deck(&mut self, seat: PlayerId, row: CardRow) -> CardId {
        let card = self.factory.create_card(&row).unwrap();
        let id = card.id;
        self.game.player_mut(seat).zones.deck.add(card);
        id
    }

    /// Put a minion on the battlefield, ready to attack and block
    pub fn to_battlefield(&mut self, seat: PlayerId, row: CardRow) -> CardId {
        let mut card = self.factory.create_card(&row).unwrap();
        card.summoning_sick = false;
        let id = card.id;
        self.game.player_mut(seat).zones.battlefield.add(card);
        id
    }

    pub fn to_graveyard(&mut self, seat: PlayerId, row: CardRow) -> CardId {
        let card = self.factory.create_card(&row).unwrap();
        let id = card.id;
        self.game.player_mut(seat).zones.graveyard.add(card);
        id
    }

    pub fn set_mana(&mut self, seat: PlayerId, mana: u32) {
        let hero = &mut self.game.player_mut(seat).hero;
        hero.max_mana = mana;
        hero.current_mana = mana;
    }
}

pub fn deck_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("decks").join(file)
}
