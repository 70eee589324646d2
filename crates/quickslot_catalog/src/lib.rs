//! Quickslot Catalog - Game World Interfaces
//!
//! This crate describes the game world a quickslot acts on.
//!
//! # Features
//!
//! - Hex form identifiers (`FormId`) with serde support
//! - Catalog entries with kinds, keywords and source plugin
//! - Category filters resolved against the catalog
//! - The `GameWorld` query trait and the `EquipHandler` action trait
//! - An in-memory world for hosts and tests
//!
//! # Example
//!
//! ```ignore
//! use quickslot_catalog::prelude::*;
//!
//! let mut world = InMemoryWorld::new();
//! world.add_entry(CatalogEntry::new(FormId(0x0003EADE), "Potion of Healing", FormKind::Potion)
//!     .with_potion(PotionKind::Healing));
//! world.add_item(FormId(0x0003EADE), 3);
//!
//! let filter = CategoryFilter::new(FormKind::Potion).with_potion(PotionKind::Healing);
//! assert_eq!(filter.resolve(&world), vec![FormId(0x0003EADE)]);
//! ```

pub mod entry;
pub mod equipment;
pub mod filter;
pub mod form;
pub mod world;

pub mod prelude {
    pub use crate::entry::{CatalogEntry, FormKind, PotionKind};
    pub use crate::equipment::{EquipHandler, HandSlot};
    pub use crate::filter::CategoryFilter;
    pub use crate::form::{FormId, FormIdError};
    pub use crate::world::{GameWorld, InMemoryWorld, WorldError};
}

pub use prelude::*;
