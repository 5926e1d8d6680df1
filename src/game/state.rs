//! Main game state structure

use crate::action_log::{ActionLog, GameEvent};
use crate::core::{CardId, PlayerId, PlayerState, RulesConfig};
use crate::error::{ActionError, ActionResult, EngineError};
use crate::game::{CombatState, Phase, Shop};
use crate::zones::Zone;
use crate::Result;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Complete game state
///
/// A `GameState` is a value: every verb borrows the current state and
/// returns a new one, leaving its input untouched. Cloning is cheap enough
/// to do once per action (card names and effect text are shared `Arc<str>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub current_player: PlayerId,

    /// Whoever took the first turn; rounds advance when play returns to them
    pub first_player: PlayerId,

    pub round_number: u32,
    pub turn_number: u32,
    pub phase: Phase,

    /// `None` while the game runs, and also after a draw
    pub winner: Option<PlayerId>,
    pub game_over: bool,

    pub player: PlayerState,
    pub ai: PlayerState,

    pub shop: Shop,
    pub combat: CombatState,
    pub action_log: ActionLog,

    /// Rules this game was created with
    pub rules: RulesConfig,
}

impl GameState {
    /// Assemble a game at the start of turn 1, main phase
    pub fn new(
        player: PlayerState,
        ai: PlayerState,
        shop: Shop,
        first_player: PlayerId,
        rules: RulesConfig,
    ) -> Self {
        let mut game = GameState {
            current_player: first_player,
            first_player,
            round_number: 1,
            turn_number: 1,
            phase: Phase::Main,
            winner: None,
            game_over: false,
            player,
            ai,
            shop,
            combat: CombatState::new(),
            action_log: ActionLog::new(),
            rules,
        };
        game.log_event(GameEvent::GameStarted { first_player });
        game.log_event(GameEvent::TurnStarted {
            player: first_player,
            turn_number: 1,
            round_number: 1,
        });
        game
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        match id {
            PlayerId::Player => &self.player,
            PlayerId::Ai => &self.ai,
        }
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        match id {
            PlayerId::Player => &mut self.player,
            PlayerId::Ai => &mut self.ai,
        }
    }

    /// State of the player whose turn it is
    pub fn active_player(&self) -> &PlayerState {
        self.player(self.current_player)
    }

    /// State of the player waiting for their turn
    pub fn opponent_of(&self, id: PlayerId) -> &PlayerState {
        self.player(id.opponent())
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub(crate) fn log_event(&mut self, event: GameEvent) {
        self.action_log.push(self.turn_number, event);
    }

    /// Which player and zone hold a card
    pub fn find_card(&self, card_id: CardId) -> Option<(PlayerId, Zone)> {
        PlayerId::ALL.into_iter().find_map(|owner| {
            self.player(owner)
                .zones
                .find(card_id)
                .map(|zone| (owner, zone))
        })
    }

    /// Common guard for every main-phase verb
    pub(crate) fn ensure_main_phase_action(&self, player: PlayerId, action: &str) -> ActionResult<()> {
        if self.game_over {
            return Err(ActionError::GameOver);
        }
        if self.current_player != player {
            return Err(ActionError::NotYourTurn);
        }
        if self.phase != Phase::Main {
            return Err(ActionError::WrongPhase {
                action: action.to_string(),
            });
        }
        if self.combat.active {
            return Err(ActionError::CombatInProgress);
        }
        Ok(())
    }

    /// Draw one card, or take mill damage if the deck is empty
    ///
    /// Mill damage can end the game.
    pub(crate) fn draw_card(&mut self, player: PlayerId) -> Option<CardId> {
        match self.player_mut(player).draw_card() {
            Some(card_id) => {
                self.log_event(GameEvent::CardDrawn { player });
                Some(card_id)
            }
            None => {
                let amount = self.rules.mill_damage;
                self.player_mut(player).hero.take_damage(amount);
                self.log_event(GameEvent::MillDamage { player, amount });
                self.check_game_over();
                None
            }
        }
    }

    pub(crate) fn draw_cards(&mut self, player: PlayerId, count: u32) {
        for _ in 0..count {
            if self.game_over {
                break;
            }
            self.draw_card(player);
        }
    }

    /// Add level progress and announce a level-up the first time it happens
    pub(crate) fn add_level_progress(&mut self, player: PlayerId, amount: u32) {
        if amount == 0 {
            return;
        }
        let threshold = {
            let hero = &self.player(player).hero;
            hero.kind.level_threshold(&self.rules)
        };
        let hero = &mut self.player_mut(player).hero;
        if hero.add_level_progress(amount, threshold) {
            let kind = hero.kind;
            self.log_event(GameEvent::LeveledUp { player, hero: kind });
        }
    }

    /// Move every minion at 0 health or less to its owner's graveyard
    ///
    /// Each dead minion pays its bounty to the opponent of its owner, no
    /// matter what killed it.
    pub(crate) fn sweep_dead_minions(&mut self) {
        for owner in PlayerId::ALL {
            let dead: SmallVec<[CardId; 4]> = self
                .player(owner)
                .zones
                .battlefield
                .iter()
                .filter(|card| card.is_dead())
                .map(|card| card.id)
                .collect();

            for card_id in dead {
                let Some(card) = self
                    .player_mut(owner)
                    .zones
                    .move_card(card_id, Zone::Battlefield, Zone::Graveyard)
                else {
                    continue;
                };
                card.tapped = false;
                card.summoning_sick = false;
                let name = card.name.clone();
                let bounty = card.bounty;

                self.player_mut(owner.opponent()).hero.gold += bounty;
                self.log_event(GameEvent::MinionDied {
                    owner,
                    card: card_id,
                    name,
                    bounty,
                });
            }
        }
    }

    /// End the game if a hero is dead; both dead is a draw
    ///
    /// Returns true if the game is over.
    pub(crate) fn check_game_over(&mut self) -> bool {
        if self.game_over {
            return true;
        }
        let winner = match (self.player.hero.is_dead(), self.ai.hero.is_dead()) {
            (false, false) => return false,
            (true, true) => None,
            (true, false) => Some(PlayerId::Ai),
            (false, true) => Some(PlayerId::Player),
        };
        self.game_over = true;
        self.winner = winner;
        self.combat.clear();
        self.log_event(GameEvent::GameOver { winner });
        true
    }

    /// Verify the structural invariants of a state
    ///
    /// Checks mana bounds, that every instance id lives in exactly one place
    /// (zones, equipment slots, shop), the market size, and that combat only
    /// references minions on the right battlefields.
    pub fn check_integrity(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        let mut claim = |id: CardId, place: &str| -> Result<()> {
            if seen.insert(id) {
                Ok(())
            } else {
                Err(EngineError::Integrity(format!("{id} appears more than once ({place})")))
            }
        };

        for owner in PlayerId::ALL {
            let state = self.player(owner);
            let hero = &state.hero;
            if hero.max_mana > self.rules.max_mana || hero.current_mana > hero.max_mana {
                return Err(EngineError::Integrity(format!(
                    "{owner} mana out of bounds: {}/{} (cap {})",
                    hero.current_mana, hero.max_mana, self.rules.max_mana
                )));
            }
            for card in state.zones.all_cards() {
                claim(card.id, "zones")?;
            }
            for item in hero.equipment.iter() {
                claim(item.id, "equipment")?;
            }
        }

        for item in self.shop.all_items() {
            claim(item.id, "shop")?;
        }
        if self.shop.market.len() > self.shop.market_size {
            return Err(EngineError::Integrity(format!(
                "market holds {} items (size {})",
                self.shop.market.len(),
                self.shop.market_size
            )));
        }

        if let Some(attacking_player) = self.combat.attacking_player {
            let attacker_field = &self.player(attacking_player).zones.battlefield;
            let defender_field = &self.player(attacking_player.opponent()).zones.battlefield;
            for attacker in &self.combat.attackers {
                if !attacker_field.contains(*attacker) {
                    return Err(EngineError::Integrity(format!(
                        "attacker {attacker} is not on the battlefield"
                    )));
                }
            }
            for blocker in self.combat.blockers.values().flatten() {
                if !defender_field.contains(*blocker) {
                    return Err(EngineError::Integrity(format!(
                        "blocker {blocker} is not on the battlefield"
                    )));
                }
            }
        }

        Ok(())
    }
}
