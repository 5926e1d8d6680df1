//! Game loop implementation
//!
//! Drives two controllers through complete turns: main-phase actions, one
//! purchase, the combat protocol (with the defender's controller choosing
//! blocks) and the end of turn, until the game ends or the turn limit hits.

/// Macro for controller-choice logging that compiles away when the
/// verbose-logging feature is disabled
macro_rules! log_choice {
    ($self:expr, $controller:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.logger.controller_choice($controller.name(), &format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = (&$self, &$controller);
        }
    };
}

use crate::core::{CardId, PlayerId};
use crate::error::EngineError;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{GameLogger, GameState};
use crate::Result;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Verbosity level for game output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - every game event (default)
    #[default]
    Normal = 2,
    /// Verbose - game events plus controller decisions
    Verbose = 3,
}

/// Result of running a game to completion
#[derive(Debug, Clone)]
pub struct GameResult {
    /// Winner of the game (None for a draw or the turn limit)
    pub winner: Option<PlayerId>,
    pub turns_played: u32,
    pub end_reason: GameEndReason,
    pub final_state: GameState,
}

/// Reason the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    /// The given player's hero died
    HeroDeath(PlayerId),
    /// Both heroes died at once
    Draw,
    /// Game reached maximum turn limit
    TurnLimit,
}

/// Game loop manager
pub struct GameLoop {
    /// Maximum turns before the game is called a draw
    max_turns: u32,
    logger: GameLogger,
}

impl GameLoop {
    pub fn new() -> Self {
        GameLoop {
            max_turns: 200,
            logger: GameLogger::new(),
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.logger.set_verbosity(verbosity);
        self
    }

    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.logger.verbosity()
    }

    /// Play a game to the end
    ///
    /// Each turn goes to whichever controller plays the current seat.
    pub fn run_game(
        &self,
        state: GameState,
        first: &mut dyn PlayerController,
        second: &mut dyn PlayerController,
    ) -> Result<GameResult> {
        if first.player_id() == second.player_id() {
            return Err(EngineError::InvalidConfig(format!(
                "both controllers play {}",
                first.player_id()
            )));
        }

        for entry in state.action_log.entries() {
            self.logger.game_event(entry);
        }

        let mut game = state;
        let mut turns_played = 0;
        while !game.is_game_over() && turns_played < self.max_turns {
            game = if game.current_player == first.player_id() {
                self.run_turn(&game, first, second)?
            } else {
                self.run_turn(&game, second, first)?
            };
            turns_played += 1;
        }

        let end_reason = if game.is_game_over() {
            match game.winner() {
                Some(winner) => GameEndReason::HeroDeath(winner.opponent()),
                None => GameEndReason::Draw,
            }
        } else {
            GameEndReason::TurnLimit
        };
        let winner = game.winner();

        match (winner, end_reason) {
            (Some(winner), _) => self.logger.minimal(&format!(
                "{winner} ({}) wins after {turns_played} turns",
                game.player(winner).hero.kind
            )),
            (None, GameEndReason::TurnLimit) => {
                self.logger
                    .minimal(&format!("Turn limit of {} reached, game is a draw", self.max_turns));
            }
            (None, _) => self.logger.minimal(&format!("Draw after {turns_played} turns")),
        }

        let seat = first.player_id();
        first.on_game_end(&GameStateView::new(&game, seat), winner == Some(seat));
        let seat = second.player_id();
        second.on_game_end(&GameStateView::new(&game, seat), winner == Some(seat));

        Ok(GameResult {
            winner,
            turns_played,
            end_reason,
            final_state: game,
        })
    }

    /// Play one full turn for the active controller and end it
    ///
    /// Asking a controller to act when the game is over, or for the wrong
    /// seat, is a contract violation and returns an `EngineError`. A verb the
    /// controller gets wrong is logged and ends that step of the turn.
    pub fn run_turn(
        &self,
        state: &GameState,
        active: &mut dyn PlayerController,
        defender: &mut dyn PlayerController,
    ) -> Result<GameState> {
        if state.is_game_over() {
            return Err(EngineError::GameAlreadyOver);
        }
        let player = state.current_player;
        if active.player_id() != player {
            return Err(EngineError::NotControllersTurn(active.player_id()));
        }
        if defender.player_id() != player.opponent() {
            return Err(EngineError::NotControllersTurn(defender.player_id()));
        }

        let mut game = state.clone();
        let mut mark = game.action_log.len();

        // Main phase actions
        for _ in 0..game.rules.bot_action_limit {
            if game.is_game_over() {
                break;
            }
            let action = {
                let view = GameStateView::new(&game, player);
                active.choose_turn_action(&view)
            };
            let Some(action) = action else {
                break;
            };
            log_choice!(self, active, "chose to {action}");
            match game.apply_action(player, &action) {
                Ok(next) => game = next,
                Err(e) => {
                    self.logger.verbose(&format!("{player} could not {action}: {e}"));
                    break;
                }
            }
            self.emit_events(&game, &mut mark);
        }

        // One purchase
        if !game.is_game_over() {
            let item = {
                let view = GameStateView::new(&game, player);
                active.choose_purchase(&view)
            };
            if let Some(item) = item {
                log_choice!(self, active, "chose to purchase {item}");
                match game.purchase_equipment(player, item) {
                    Ok(next) => game = next,
                    Err(e) => self.logger.verbose(&format!("{player} could not purchase {item}: {e}")),
                }
                self.emit_events(&game, &mut mark);
            }
        }

        // Combat
        if !game.is_game_over() {
            game = self.run_combat(game, active, defender)?;
            self.emit_events(&game, &mut mark);
        }

        let game = game.end_turn();
        self.emit_events(&game, &mut mark);
        Ok(game)
    }

    fn run_combat(
        &self,
        mut game: GameState,
        active: &mut dyn PlayerController,
        defender: &mut dyn PlayerController,
    ) -> Result<GameState> {
        let player = game.current_player;
        let defending = player.opponent();

        let eligible: SmallVec<[CardId; 8]> = game
            .player(player)
            .zones
            .battlefield
            .iter()
            .filter(|card| card.can_attack())
            .map(|card| card.id)
            .collect();
        if eligible.is_empty() {
            return Ok(game);
        }

        let chosen = {
            let view = GameStateView::new(&game, player);
            active.choose_attackers(&view, &eligible)
        };
        if chosen.is_empty() {
            return Ok(game);
        }
        log_choice!(self, active, "chose {} attacker(s)", chosen.len());
        game = match game.declare_attackers(player, &chosen) {
            Ok(next) => next,
            Err(e) => {
                self.logger.verbose(&format!("{player} could not attack: {e}"));
                return Ok(game);
            }
        };

        let attackers = game.combat.attackers.clone();
        let available: SmallVec<[CardId; 8]> = game
            .player(defending)
            .zones
            .battlefield
            .iter()
            .filter(|card| card.can_block())
            .map(|card| card.id)
            .collect();
        let blocks = {
            let view = GameStateView::new(&game, defending);
            defender.choose_blockers(&view, &available, &attackers)
        };
        log_choice!(self, defender, "chose {} block(s)", blocks.len());
        for (blocker, attacker) in blocks {
            match game.declare_blocker(defending, blocker, attacker) {
                Ok(next) => game = next,
                Err(e) => self
                    .logger
                    .verbose(&format!("{defending} could not block {attacker} with {blocker}: {e}")),
            }
        }

        for attacker in attackers {
            let blockers: SmallVec<[CardId; 4]> = game.combat.get_blockers(attacker).iter().copied().collect();
            if blockers.len() < 2 {
                continue;
            }
            let order = {
                let view = GameStateView::new(&game, player);
                active.choose_damage_order(&view, attacker, &blockers)
            };
            game = match game.set_damage_order(player, attacker, &order) {
                Ok(next) => next,
                Err(e) => {
                    self.logger
                        .verbose(&format!("{player} gave an invalid damage order ({e}), using declared order"));
                    game.set_damage_order(player, attacker, &blockers)?
                }
            };
        }

        game = game.confirm_blocks(defending)?;
        if game.combat.active {
            game = game.resolve_combat(player)?;
        }
        Ok(game)
    }

    /// Mirror new action-log entries into the logger
    fn emit_events(&self, game: &GameState, mark: &mut usize) {
        for entry in game.action_log.since(*mark) {
            self.logger.game_event(entry);
        }
        *mark = game.action_log.len();
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
