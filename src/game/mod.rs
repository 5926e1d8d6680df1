//! Game state, turn structure, combat and controllers

pub mod actions;
pub mod combat;
pub mod controller;
pub mod game_loop;
pub mod greedy_controller;
pub mod logger;
pub mod phase;
pub mod shop;
pub mod state;
pub mod zero_controller;

pub use actions::{AttackPreview, AttackTarget, TurnAction};
pub use combat::{CombatPhase, CombatState};
pub use controller::{GameStateView, PlayerController};
pub use game_loop::{GameEndReason, GameLoop, GameResult, VerbosityLevel};
pub use greedy_controller::GreedyController;
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode};
pub use phase::Phase;
pub use shop::{Shop, ShopTier};
pub use state::GameState;
pub use zero_controller::ZeroController;
