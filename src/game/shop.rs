//! Shared equipment shop
//!
//! The shop holds one face-up market plus three draw queues, one per tier.
//! Purchases refill from the queue of the current tier. When the game reaches
//! a tier round, the unsold market goes back under its own queue and the
//! market is redrawn from the new tier.

use crate::core::{EquipmentId, EquipmentInstance, RulesConfig};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Shop tiers, in the order they open up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopTier {
    Early,
    Mid,
    Late,
}

impl ShopTier {
    /// Tier an item with the given tier number belongs to
    pub fn from_tier_number(tier: u8) -> Self {
        match tier {
            0 | 1 => ShopTier::Early,
            2 => ShopTier::Mid,
            _ => ShopTier::Late,
        }
    }

    /// Tier the shop should offer in a given round
    pub fn for_round(round: u32, rules: &RulesConfig) -> Self {
        if round >= rules.late_tier_round {
            ShopTier::Late
        } else if round >= rules.mid_tier_round {
            ShopTier::Mid
        } else {
            ShopTier::Early
        }
    }
}

impl fmt::Display for ShopTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShopTier::Early => write!(f, "early"),
            ShopTier::Mid => write!(f, "mid"),
            ShopTier::Late => write!(f, "late"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub market: Vec<EquipmentInstance>,
    pub early: VecDeque<EquipmentInstance>,
    pub mid: VecDeque<EquipmentInstance>,
    pub late: VecDeque<EquipmentInstance>,
    pub current_tier: ShopTier,
    pub market_size: usize,
}

impl Shop {
    /// Sort items into tier queues (keeping their order) and open the market
    pub fn new(items: Vec<EquipmentInstance>, market_size: usize) -> Self {
        let mut shop = Shop {
            market: Vec::with_capacity(market_size),
            early: VecDeque::new(),
            mid: VecDeque::new(),
            late: VecDeque::new(),
            current_tier: ShopTier::Early,
            market_size,
        };
        for item in items {
            shop.queue_mut(ShopTier::from_tier_number(item.tier)).push_back(item);
        }
        shop.fill_market();
        shop
    }

    pub fn queue(&self, tier: ShopTier) -> &VecDeque<EquipmentInstance> {
        match tier {
            ShopTier::Early => &self.early,
            ShopTier::Mid => &self.mid,
            ShopTier::Late => &self.late,
        }
    }

    fn queue_mut(&mut self, tier: ShopTier) -> &mut VecDeque<EquipmentInstance> {
        match tier {
            ShopTier::Early => &mut self.early,
            ShopTier::Mid => &mut self.mid,
            ShopTier::Late => &mut self.late,
        }
    }

    /// Look up an item in the market
    pub fn get(&self, item: EquipmentId) -> Option<&EquipmentInstance> {
        self.market.iter().find(|i| i.id == item)
    }

    /// Remove an item from the market and draw its replacement
    ///
    /// If the current tier's queue is empty the market stays one short.
    pub fn take(&mut self, item: EquipmentId) -> Option<EquipmentInstance> {
        let pos = self.market.iter().position(|i| i.id == item)?;
        let taken = self.market.remove(pos);
        self.fill_market();
        Some(taken)
    }

    /// Switch to `tier` if it is later than the current one
    ///
    /// Returns false (and changes nothing) otherwise.
    pub fn refresh_to(&mut self, tier: ShopTier) -> bool {
        if tier <= self.current_tier {
            return false;
        }
        for item in std::mem::take(&mut self.market) {
            self.queue_mut(ShopTier::from_tier_number(item.tier)).push_back(item);
        }
        self.current_tier = tier;
        self.fill_market();
        true
    }

    fn fill_market(&mut self) {
        let tier = self.current_tier;
        while self.market.len() < self.market_size {
            match self.queue_mut(tier).pop_front() {
                Some(item) => self.market.push(item),
                None => break,
            }
        }
    }

    /// Every item the shop holds, market first
    pub fn all_items(&self) -> impl Iterator<Item = &EquipmentInstance> {
        self.market
            .iter()
            .chain(self.early.iter())
            .chain(self.mid.iter())
            .chain(self.late.iter())
    }
}
