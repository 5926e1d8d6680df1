//! Turn phases and the turn controller
//!
//! A turn runs Upkeep -> Main -> End. Upkeep and End are bookkeeping steps
//! executed inside `end_turn`; players only ever act during Main.

use crate::action_log::GameEvent;
use crate::game::{GameState, ShopTier};
use crate::zones::Zone;
use serde::{Deserialize, Serialize};

/// Phases of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Upkeep,
    Main,
    End,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Upkeep => write!(f, "upkeep"),
            Phase::Main => write!(f, "main"),
            Phase::End => write!(f, "end"),
        }
    }
}

impl GameState {
    /// Finish the active player's turn and run upkeep for the next player
    ///
    /// End of turn: the active player's minions heal to full, their hero
    /// gains gold and their once-per-turn flags reset. Then the turn passes,
    /// the round advances when play returns to the first player (opening a
    /// new shop tier at the tier rounds), and the new active player untaps,
    /// grows mana and draws. An unfinished combat is discarded.
    ///
    /// A finished game is returned unchanged.
    pub fn end_turn(&self) -> GameState {
        let mut next = self.clone();
        if next.game_over {
            return next;
        }
        next.combat.clear();

        let ending = next.current_player;
        next.phase = Phase::End;
        let gold = next.rules.gold_per_turn;
        {
            let state = next.player_mut(ending);
            for minion in state.zones.battlefield.iter_mut() {
                minion.heal_to_full();
            }
            state.hero.gold += gold;
            state.hero.abilities_used.reset();
        }
        next.log_event(GameEvent::TurnEnded { player: ending });

        let upcoming = ending.opponent();
        next.current_player = upcoming;
        next.turn_number += 1;
        if upcoming == next.first_player {
            next.round_number += 1;
            let tier = ShopTier::for_round(next.round_number, &next.rules);
            if next.shop.refresh_to(tier) {
                next.log_event(GameEvent::ShopTierAdvanced { tier });
            }
        }

        next.run_upkeep();
        next
    }

    fn run_upkeep(&mut self) {
        self.phase = Phase::Upkeep;
        let player = self.current_player;
        self.log_event(GameEvent::TurnStarted {
            player,
            turn_number: self.turn_number,
            round_number: self.round_number,
        });

        let mana_cap = self.rules.max_mana;
        {
            let state = self.player_mut(player);
            for minion in state.zones.battlefield.iter_mut() {
                minion.tapped = false;
                minion.summoning_sick = false;
            }
            let echoed: Vec<_> = state.zones.echo.drain().collect();
            for card in echoed {
                state.zones.get_zone_mut(Zone::Hand).add(card);
            }
            state.hero.grow_mana(mana_cap);
            state.hero.abilities_used.reset();
        }

        self.draw_card(player);
        self.phase = Phase::Main;
    }
}
