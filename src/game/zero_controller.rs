//! Zero controller for testing and automation
//!
//! This controller never acts on its own turn and never blocks. When asked
//! for a damage order it keeps the order blockers were declared in. Useful
//! as a passive opponent in tests and as a baseline in tournaments.

use crate::core::{CardId, EquipmentId, PlayerId};
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::TurnAction;
use smallvec::SmallVec;

/// A controller that always passes
pub struct ZeroController {
    player_id: PlayerId,
}

impl ZeroController {
    pub fn new(player_id: PlayerId) -> Self {
        ZeroController { player_id }
    }
}

impl PlayerController for ZeroController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &'static str {
        "zero"
    }

    fn choose_turn_action(&mut self, _view: &GameStateView) -> Option<TurnAction> {
        None
    }

    fn choose_purchase(&mut self, _view: &GameStateView) -> Option<EquipmentId> {
        None
    }

    fn choose_attackers(&mut self, _view: &GameStateView, _available: &[CardId]) -> SmallVec<[CardId; 8]> {
        SmallVec::new()
    }

    fn choose_blockers(
        &mut self,
        _view: &GameStateView,
        _available_blockers: &[CardId],
        _attackers: &[CardId],
    ) -> SmallVec<[(CardId, CardId); 8]> {
        SmallVec::new()
    }

    fn choose_damage_order(
        &mut self,
        _view: &GameStateView,
        _attacker: CardId,
        blockers: &[CardId],
    ) -> SmallVec<[CardId; 4]> {
        blockers.iter().copied().collect()
    }
}
