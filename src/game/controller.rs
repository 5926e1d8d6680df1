//! Player controller trait and game state view
//!
//! This module defines the interface between the game loop and player
//! controllers. The loop calls the controller whenever a decision is needed,
//! and the controller inspects a read-only view of the game to make it. The
//! view exposes exactly what a human at the table could see: your own hand
//! and graveyard, both battlefields and heroes, the opponent's hand size, and
//! the market.

use crate::core::{CardId, CardInstance, EquipmentId, EquipmentInstance, HeroState, PlayerId, RulesConfig};
use crate::error::ActionResult;
use crate::game::{AttackPreview, AttackTarget, GameState, TurnAction};
use smallvec::SmallVec;

/// Read-only view of game state for controllers
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
}

impl<'a> GameStateView<'a> {
    /// Create a view of the game from one player's seat
    pub fn new(game: &'a GameState, player_id: PlayerId) -> Self {
        GameStateView { game, player_id }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn opponent_id(&self) -> PlayerId {
        self.player_id.opponent()
    }

    pub fn is_my_turn(&self) -> bool {
        self.game.current_player == self.player_id
    }

    pub fn turn_number(&self) -> u32 {
        self.game.turn_number
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.game.rules
    }

    pub fn hero(&self) -> &HeroState {
        &self.game.player(self.player_id).hero
    }

    pub fn opponent_hero(&self) -> &HeroState {
        &self.game.opponent_of(self.player_id).hero
    }

    pub fn hand(&self) -> &[CardInstance] {
        &self.game.player(self.player_id).zones.hand.cards
    }

    pub fn battlefield(&self) -> &[CardInstance] {
        &self.game.player(self.player_id).zones.battlefield.cards
    }

    pub fn graveyard(&self) -> &[CardInstance] {
        &self.game.player(self.player_id).zones.graveyard.cards
    }

    pub fn opponent_battlefield(&self) -> &[CardInstance] {
        &self.game.opponent_of(self.player_id).zones.battlefield.cards
    }

    /// Number of cards in the opponent's hand (not their identities)
    pub fn opponent_hand_size(&self) -> usize {
        self.game.opponent_of(self.player_id).zones.hand.len()
    }

    pub fn deck_size(&self) -> usize {
        self.game.player(self.player_id).zones.deck.len()
    }

    pub fn opponent_deck_size(&self) -> usize {
        self.game.opponent_of(self.player_id).zones.deck.len()
    }

    pub fn market(&self) -> &[EquipmentInstance] {
        &self.game.shop.market
    }

    /// Find one of the visible minions (either battlefield)
    pub fn minion(&self, card_id: CardId) -> Option<&CardInstance> {
        self.battlefield()
            .iter()
            .chain(self.opponent_battlefield())
            .find(|card| card.id == card_id)
    }

    pub fn can_play_card(&self, card_id: CardId) -> bool {
        self.game.can_play_card(self.player_id, card_id).is_ok()
    }

    pub fn can_use_hero_power(&self) -> bool {
        self.game.can_use_hero_power(self.player_id).is_ok()
    }

    pub fn preview_hero_attack(&self, target: AttackTarget) -> ActionResult<AttackPreview> {
        self.game.preview_hero_attack(self.player_id, target)
    }

    pub fn can_raise(&self, card_id: CardId) -> bool {
        self.game.can_raise(self.player_id, card_id).is_ok()
    }

    pub fn can_purchase(&self, item: EquipmentId) -> bool {
        self.game.can_purchase(self.player_id, item).is_ok()
    }
}

/// Player controller trait
///
/// Implement this trait to create AI players or connect a UI. The game loop
/// calls these methods when decisions need to be made and applies the
/// answers through the regular verbs, so a controller can never make an
/// illegal move stick.
pub trait PlayerController {
    /// The seat this controller plays
    fn player_id(&self) -> PlayerId;

    /// Short name used when logging this controller's choices
    fn name(&self) -> &'static str {
        "controller"
    }

    /// Pick the next main-phase action, or `None` to move on
    fn choose_turn_action(&mut self, view: &GameStateView) -> Option<TurnAction>;

    /// Pick an item to buy this turn, if any
    fn choose_purchase(&mut self, view: &GameStateView) -> Option<EquipmentId>;

    /// Choose which of the eligible minions attack (empty to skip combat)
    fn choose_attackers(&mut self, view: &GameStateView, available: &[CardId]) -> SmallVec<[CardId; 8]>;

    /// Choose blocks as (blocker, attacker) pairs
    fn choose_blockers(
        &mut self,
        view: &GameStateView,
        available_blockers: &[CardId],
        attackers: &[CardId],
    ) -> SmallVec<[(CardId, CardId); 8]>;

    /// Order the blockers of one attacker for damage assignment
    fn choose_damage_order(
        &mut self,
        view: &GameStateView,
        attacker: CardId,
        blockers: &[CardId],
    ) -> SmallVec<[CardId; 4]>;

    /// Called when the game ends
    fn on_game_end(&mut self, _view: &GameStateView, _won: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::test_support::minion;
    use crate::core::HeroKind;
    use crate::game::state::test_support::game_with;

    #[test]
    fn test_view_hides_opponent_hand() {
        let mut game = game_with(HeroKind::Mage, vec![], HeroKind::Rogue, vec![]);
        game.ai.zones.hand.add(minion(1, 1, 1, 0));
        game.ai.zones.hand.add(minion(2, 1, 1, 0));
        game.player.zones.hand.add(minion(3, 1, 1, 0));
        game.ai.zones.battlefield.add(minion(4, 2, 2, 0));

        let view = GameStateView::new(&game, PlayerId::Player);
        assert_eq!(view.hand().len(), 1);
        assert_eq!(view.opponent_hand_size(), 2);
        assert_eq!(view.opponent_battlefield().len(), 1);
        assert!(view.minion(CardId::new(4)).is_some());
        assert!(view.minion(CardId::new(1)).is_none());
        assert!(view.is_my_turn());
    }

    #[test]
    fn test_view_legality_helpers() {
        let mut game = game_with(HeroKind::Mage, vec![], HeroKind::Rogue, vec![]);
        game.player.zones.hand.add(minion(3, 1, 1, 0));

        let mine = GameStateView::new(&game, PlayerId::Player);
        assert!(mine.can_play_card(CardId::new(3)));
        assert!(mine.can_use_hero_power());
        assert!(mine.preview_hero_attack(AttackTarget::Hero).is_ok());

        let theirs = GameStateView::new(&game, PlayerId::Ai);
        assert!(!theirs.can_use_hero_power());
    }
}
