//! Instance identifiers for cards and equipment

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for a card or equipment instance
///
/// Every instance created for a game gets its own id, so two copies of the
/// same card are still distinguishable. Ids are never reused within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(u32);

impl InstanceId {
    pub const fn new(id: u32) -> Self {
        InstanceId(id)
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Id of a card instance (minion or spell)
pub type CardId = InstanceId;

/// Id of an equipment instance
pub type EquipmentId = InstanceId;

/// Hands out contiguous, unique instance ids
///
/// Cards and equipment share one id space so an id identifies exactly one
/// object anywhere in the game.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_id: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next_id: 1 }
    }

    /// Generate a new unique id
    pub fn next_id(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u32 {
        self.next_id - 1
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
