//! Game zones (Deck, Hand, Battlefield, Discard, Graveyard, Echo)

use crate::core::{CardId, CardInstance};
use serde::{Deserialize, Serialize};

/// Different zones where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Battlefield,
    /// Spells after they resolve
    Discard,
    /// Minions after they die or are sacrificed
    Graveyard,
    /// Echo spells waiting to return to hand
    Echo,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::Deck,
        Zone::Hand,
        Zone::Battlefield,
        Zone::Discard,
        Zone::Graveyard,
        Zone::Echo,
    ];
}

/// An ordered zone of card instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,
    pub cards: Vec<CardInstance>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, card_id: CardId) -> Option<CardInstance> {
        // Order is observable: controllers pick cards front to back.
        let pos = self.cards.iter().position(|c| c.id == card_id)?;
        Some(self.cards.remove(pos))
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == card_id)
    }

    pub fn get(&self, card_id: CardId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn get_mut(&mut self, card_id: CardId) -> Option<&mut CardInstance> {
        self.cards.iter_mut().find(|c| c.id == card_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CardInstance> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, CardInstance> {
        self.cards.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|c| c.id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from top (for Deck)
    pub fn draw_top(&mut self) -> Option<CardInstance> {
        self.cards.pop()
    }

    /// Look at top card without removing it
    pub fn peek_top(&self) -> Option<&CardInstance> {
        self.cards.last()
    }

    /// Shuffle the zone (for Deck)
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    /// Take every card out of the zone, front to back
    pub fn drain(&mut self) -> std::vec::Drain<'_, CardInstance> {
        self.cards.drain(..)
    }
}

/// Collection of all zones for a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: CardZone,
    pub hand: CardZone,
    pub battlefield: CardZone,
    pub discard: CardZone,
    pub graveyard: CardZone,
    pub echo: CardZone,
}

impl PlayerZones {
    pub fn new() -> Self {
        PlayerZones {
            deck: CardZone::new(Zone::Deck),
            hand: CardZone::new(Zone::Hand),
            battlefield: CardZone::new(Zone::Battlefield),
            discard: CardZone::new(Zone::Discard),
            graveyard: CardZone::new(Zone::Graveyard),
            echo: CardZone::new(Zone::Echo),
        }
    }

    pub fn get_zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Battlefield => &self.battlefield,
            Zone::Discard => &self.discard,
            Zone::Graveyard => &self.graveyard,
            Zone::Echo => &self.echo,
        }
    }

    pub fn get_zone_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Battlefield => &mut self.battlefield,
            Zone::Discard => &mut self.discard,
            Zone::Graveyard => &mut self.graveyard,
            Zone::Echo => &mut self.echo,
        }
    }

    /// Which zone holds a card, if any
    pub fn find(&self, card_id: CardId) -> Option<Zone> {
        Zone::ALL
            .into_iter()
            .find(|&zone| self.get_zone(zone).contains(card_id))
    }

    /// Move a card between two zones and return it in its new zone
    ///
    /// Returns `None` (and changes nothing) if the card is not in `from`.
    pub fn move_card(&mut self, card_id: CardId, from: Zone, to: Zone) -> Option<&mut CardInstance> {
        let card = self.get_zone_mut(from).remove(card_id)?;
        let target = self.get_zone_mut(to);
        target.add(card);
        target.cards.last_mut()
    }

    /// Every card in every zone
    pub fn all_cards(&self) -> impl Iterator<Item = &CardInstance> {
        Zone::ALL
            .into_iter()
            .flat_map(move |zone| self.get_zone(zone).iter())
    }
}

impl Default for PlayerZones {
    fn default() -> Self {
        Self::new()
    }
}
