//! Equip targets and the main-thread equip capability

use crate::form::FormId;
use crate::world::WorldError;
use quickslot_xr::Hand;
use serde::{Deserialize, Serialize};

/// Which hand an action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandSlot {
    /// Let the game pick, or both hands where that applies
    Default,
    Right,
    Left,
}

impl HandSlot {
    /// Concrete hand, if one is pinned
    pub fn hand(self) -> Option<Hand> {
        match self {
            Self::Default => None,
            Self::Right => Some(Hand::Right),
            Self::Left => Some(Hand::Left),
        }
    }
}

impl Default for HandSlot {
    fn default() -> Self {
        Self::Default
    }
}

impl From<Hand> for HandSlot {
    fn from(hand: Hand) -> Self {
        match hand {
            Hand::Right => Self::Right,
            Hand::Left => Self::Left,
        }
    }
}

/// Equips objects on the actor.
///
/// Calls into the game's equip machinery are only safe on the game's main
/// thread, so implementations are invoked when deferred tasks are drained,
/// never from a pose or button callback.
pub trait EquipHandler {
    /// Equip an owned object into a hand slot
    fn equip(&mut self, id: FormId, slot: HandSlot) -> Result<(), WorldError>;
}
