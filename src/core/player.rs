//! Player seats and per-player state

use crate::core::{CardId, CardInstance, HeroState};
use crate::zones::PlayerZones;
use serde::{Deserialize, Serialize};

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    Player,
    Ai,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::Player, PlayerId::Ai];

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Player => PlayerId::Ai,
            PlayerId::Ai => PlayerId::Player,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::Player => write!(f, "Player"),
            PlayerId::Ai => write!(f, "AI"),
        }
    }
}

/// Everything one player owns: their hero and their card zones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub hero: HeroState,
    pub zones: PlayerZones,
}

impl PlayerState {
    /// Create a player whose deck holds `deck` (top of deck is the last card)
    pub fn new(id: PlayerId, hero: HeroState, deck: Vec<CardInstance>) -> Self {
        let mut zones = PlayerZones::new();
        for card in deck {
            zones.deck.add(card);
        }
        PlayerState { id, hero, zones }
    }

    /// Move the top card of the deck into hand
    ///
    /// Returns `None` if the deck is empty. Mill damage is the caller's concern.
    pub fn draw_card(&mut self) -> Option<CardId> {
        let card = self.zones.deck.draw_top()?;
        let id = card.id;
        self.zones.hand.add(card);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::test_support::minion;
    use crate::core::{HeroKind, RulesConfig};

    #[test]
    fn test_opponent() {
        assert_eq!(PlayerId::Player.opponent(), PlayerId::Ai);
        assert_eq!(PlayerId::Ai.opponent(), PlayerId::Player);
    }

    #[test]
    fn test_draw_card_moves_top_card_to_hand() {
        let hero = HeroState::new(HeroKind::Mage, 1, &RulesConfig::default());
        let mut player = PlayerState::new(
            PlayerId::Player,
            hero,
            vec![minion(1, 1, 1, 0), minion(2, 2, 2, 0)],
        );

        assert_eq!(player.draw_card(), Some(CardId::new(2)));
        assert_eq!(player.zones.hand.len(), 1);
        assert_eq!(player.zones.deck.len(), 1);

        assert_eq!(player.draw_card(), Some(CardId::new(1)));
        assert_eq!(player.draw_card(), None);
        assert_eq!(player.zones.hand.len(), 2);
    }
}
