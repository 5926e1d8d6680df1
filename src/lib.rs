//! herodeck - a two-player hero card game engine
//!
//! Every player verb is a pure transition: it borrows a `GameState` and
//! returns either the next state or an `ActionError` explaining why the move
//! is illegal. Controllers (the greedy bot, or any caller of the public API)
//! drive the same verbs.

pub mod action_log;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod tournament;
pub mod zones;

pub use error::{ActionError, ActionResult, EngineError, Result};
