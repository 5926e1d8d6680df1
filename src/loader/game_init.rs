//! Game initialization from decks
//!
//! Creates a ready-to-play game from two hero decks and an equipment pool.
//! All randomness (first player, deck order, shop order) comes from one
//! seeded RNG, so the same setup and seed always produce the same game.

use crate::core::{HeroKind, PlayerId, PlayerState, RulesConfig};
use crate::error::Result;
use crate::game::{GameState, Shop};
use crate::loader::{CardRow, EntityFactory, EquipmentDeck, EquipmentRow, HeroDeck};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// One seat's hero and expanded card list
#[derive(Debug, Clone)]
pub struct SeatSetup {
    pub hero: HeroKind,
    pub cards: Vec<CardRow>,
}

/// Everything needed to start a game
#[derive(Debug, Clone)]
pub struct GameSetup {
    pub player: SeatSetup,
    pub ai: SeatSetup,
    /// Expanded equipment pool
    pub shop: Vec<EquipmentRow>,
}

impl GameSetup {
    pub fn from_decks(player: &HeroDeck, ai: &HeroDeck, shop: &EquipmentDeck) -> Result<Self> {
        Ok(GameSetup {
            player: SeatSetup {
                hero: player.hero_kind()?,
                cards: player.expand(),
            },
            ai: SeatSetup {
                hero: ai.hero_kind()?,
                cards: ai.expand(),
            },
            shop: shop.expand(),
        })
    }
}

/// Game builder for initializing games from decks
pub struct GameInitializer {
    rules: RulesConfig,
}

impl GameInitializer {
    pub fn new(rules: RulesConfig) -> Self {
        GameInitializer { rules }
    }

    /// Build a game at turn 1, round 1, main phase
    ///
    /// The first player is chosen at random and opens with
    /// `first_player_mana` and `first_player_cards`; the other seat gets the
    /// second-player values.
    pub fn init_game(&self, setup: &GameSetup, seed: u64) -> Result<GameState> {
        self.rules.validate()?;
        let rules = self.rules;

        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let mut factory = EntityFactory::new();

        let first_player = if rng.gen_bool(0.5) { PlayerId::Player } else { PlayerId::Ai };

        let player = self.build_seat(PlayerId::Player, &setup.player, first_player, &mut factory, &mut rng)?;
        let ai = self.build_seat(PlayerId::Ai, &setup.ai, first_player, &mut factory, &mut rng)?;
        let shop = self.build_shop(&setup.shop, &mut factory, &mut rng)?;

        Ok(GameState::new(player, ai, shop, first_player, rules))
    }

    /// Create a seat's hero and shuffled deck, then deal the opening hand
    fn build_seat(
        &self,
        id: PlayerId,
        seat: &SeatSetup,
        first_player: PlayerId,
        factory: &mut EntityFactory,
        rng: &mut ChaCha12Rng,
    ) -> Result<PlayerState> {
        let (mana, hand_size) = if id == first_player {
            (self.rules.first_player_mana, self.rules.first_player_cards)
        } else {
            (self.rules.second_player_mana, self.rules.second_player_cards)
        };

        let hero = factory.create_hero(seat.hero, mana, &self.rules);
        let deck = factory.create_cards(&seat.cards)?;
        let mut state = PlayerState::new(id, hero, deck);
        state.zones.deck.shuffle(rng);
        for _ in 0..hand_size {
            if state.draw_card().is_none() {
                break;
            }
        }
        Ok(state)
    }

    /// Shuffle the pool, assign tiers and open the market
    ///
    /// If no item carries a tier, tiers are dealt round-robin (early, mid,
    /// late) over the shuffled pool. Items without a tier in a pool that has
    /// some tiers go to the early queue.
    fn build_shop(
        &self,
        rows: &[EquipmentRow],
        factory: &mut EntityFactory,
        rng: &mut ChaCha12Rng,
    ) -> Result<Shop> {
        let mut rows: Vec<&EquipmentRow> = rows.iter().collect();
        rows.shuffle(rng);

        let untiered = rows.iter().all(|row| row.tier.is_none());
        let items = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let tier = if untiered { (i % 3) as u8 + 1 } else { row.tier.unwrap_or(1) };
                factory.create_equipment(row, tier)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Shop::new(items, self.rules.market_size))
    }
}

/// Build a game with the standard rules
pub fn initialize_game(setup: &GameSetup, seed: u64) -> Result<GameState> {
    GameInitializer::new(RulesConfig::default()).init_game(setup, seed)
}
