//! Game-world queries and an in-memory implementation

use crate::entry::{CatalogEntry, FormKind};
use crate::equipment::{EquipHandler, HandSlot};
use crate::form::FormId;
use quickslot_xr::Hand;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Game-world errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Identifier does not resolve to a catalog object
    #[error("Unknown form {0}")]
    UnknownForm(FormId),
    /// Actor does not carry or know the object
    #[error("Form {0} is not owned by the actor")]
    NotOwned(FormId),
    /// Object exists but cannot be equipped
    #[error("Cannot equip {id}: {reason}")]
    CannotEquip { id: FormId, reason: String },
}

/// Read-only view of the game world and the player actor
pub trait GameWorld {
    /// Resolve an identifier to its catalog entry
    fn lookup(&self, id: FormId) -> Option<&CatalogEntry>;

    /// Number of the object carried by the actor
    fn item_count(&self, id: FormId) -> u32;

    /// Actor carries at least one
    fn has_item(&self, id: FormId) -> bool {
        self.item_count(id) > 0
    }

    /// Actor knows the spell or shout
    fn knows(&self, id: FormId) -> bool;

    /// Object is currently equipped anywhere on the actor
    fn is_equipped(&self, id: FormId) -> bool;

    /// Object currently held in a hand
    fn equipped_in_hand(&self, hand: Hand) -> Option<FormId>;

    /// Every catalog entry, in catalog order
    fn entries(&self) -> Box<dyn Iterator<Item = &CatalogEntry> + '_>;
}

/// Self-contained game world: a catalog plus one actor's inventory,
/// knowledge and equipment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorld {
    /// Catalog in insertion order
    entries: Vec<CatalogEntry>,
    /// id -> index into `entries`
    index: HashMap<FormId, usize>,
    /// Carried objects
    inventory: HashMap<FormId, u32>,
    /// Learned spells and shouts
    known: HashSet<FormId>,
    /// Held objects (left, right)
    hands: [Option<FormId>; 2],
    /// Worn armor, ammo and other non-hand equipment
    worn: HashSet<FormId>,
    /// Equipped shout
    voice: Option<FormId>,
}

impl InMemoryWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a catalog entry
    pub fn add_entry(&mut self, entry: CatalogEntry) {
        match self.index.get(&entry.id) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.id, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Builder form of `add_entry`
    pub fn with_entry(mut self, entry: CatalogEntry) -> Self {
        self.add_entry(entry);
        self
    }

    /// Give the actor some of an object
    pub fn add_item(&mut self, id: FormId, count: u32) {
        *self.inventory.entry(id).or_insert(0) += count;
    }

    /// Take objects away; unequips when the last one goes
    pub fn remove_item(&mut self, id: FormId, count: u32) {
        let remaining = match self.inventory.get_mut(&id) {
            Some(current) => {
                *current = current.saturating_sub(count);
                *current
            }
            None => return,
        };

        if remaining == 0 {
            self.inventory.remove(&id);
            self.unequip(id);
        }
    }

    /// Teach the actor a spell or shout
    pub fn learn(&mut self, id: FormId) {
        self.known.insert(id);
    }

    /// Remove an object from every equip slot
    pub fn unequip(&mut self, id: FormId) {
        for held in self.hands.iter_mut() {
            if *held == Some(id) {
                *held = None;
            }
        }
        self.worn.remove(&id);
        if self.voice == Some(id) {
            self.voice = None;
        }
    }

    /// Number of catalog entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn owns(&self, entry: &CatalogEntry) -> bool {
        if entry.kind.is_knowledge() {
            self.known.contains(&entry.id)
        } else {
            self.item_count(entry.id) > 0
        }
    }

    fn hold(&mut self, id: FormId, hand: Hand) {
        // two-handed objects occupy both hands; replacing either half clears the other
        for other in Hand::BOTH {
            if let Some(held) = self.hands[other.index()] {
                if self.lookup(held).is_some_and(|e| e.two_handed) {
                    self.hands[other.index()] = None;
                }
            }
        }
        self.hands[hand.index()] = Some(id);
    }
}

impl GameWorld for InMemoryWorld {
    fn lookup(&self, id: FormId) -> Option<&CatalogEntry> {
        self.index.get(&id).map(|&i| &self.entries[i])
    }

    fn item_count(&self, id: FormId) -> u32 {
        self.inventory.get(&id).copied().unwrap_or(0)
    }

    fn knows(&self, id: FormId) -> bool {
        self.known.contains(&id)
    }

    fn is_equipped(&self, id: FormId) -> bool {
        self.hands.contains(&Some(id)) || self.worn.contains(&id) || self.voice == Some(id)
    }

    fn equipped_in_hand(&self, hand: Hand) -> Option<FormId> {
        self.hands[hand.index()]
    }

    fn entries(&self) -> Box<dyn Iterator<Item = &CatalogEntry> + '_> {
        Box::new(self.entries.iter())
    }
}

impl EquipHandler for InMemoryWorld {
    fn equip(&mut self, id: FormId, slot: HandSlot) -> Result<(), WorldError> {
        let entry = self.lookup(id).cloned().ok_or(WorldError::UnknownForm(id))?;
        if !self.owns(&entry) {
            return Err(WorldError::NotOwned(id));
        }

        match entry.kind {
            FormKind::Weapon | FormKind::Spell | FormKind::Scroll => {
                if entry.two_handed {
                    self.hands = [Some(id), Some(id)];
                } else {
                    self.hold(id, slot.hand().unwrap_or(Hand::Right));
                }
            }
            FormKind::Shout => self.voice = Some(id),
            FormKind::Potion | FormKind::Ingredient => self.remove_item(id, 1),
            FormKind::Armor | FormKind::Ammo => {
                self.worn.insert(id);
            }
            FormKind::Book | FormKind::Misc => {
                return Err(WorldError::CannotEquip {
                    id,
                    reason: format!("{:?} objects are not equippable", entry.kind),
                });
            }
        }

        log::debug!("Equipped {} ({}) into {:?}", entry.name, id, slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::PotionKind;

    const DAGGER: FormId = FormId(0x0001_397E);
    const GREATSWORD: FormId = FormId(0x0001_359D);
    const FLAMES: FormId = FormId(0x0001_2FCD);
    const POTION: FormId = FormId(0x0003_EADE);
    const BOOK: FormId = FormId(0x0001_AD3B);

    fn world() -> InMemoryWorld {
        InMemoryWorld::new()
            .with_entry(CatalogEntry::new(DAGGER, "Iron Dagger", FormKind::Weapon))
            .with_entry(CatalogEntry::new(GREATSWORD, "Iron Greatsword", FormKind::Weapon).two_handed())
            .with_entry(CatalogEntry::new(FLAMES, "Flames", FormKind::Spell))
            .with_entry(
                CatalogEntry::new(POTION, "Potion of Healing", FormKind::Potion)
                    .with_potion(PotionKind::Healing),
            )
            .with_entry(CatalogEntry::new(BOOK, "Book", FormKind::Book))
    }

    #[test]
    fn test_lookup_and_counts() {
        let mut w = world();
        assert_eq!(w.len(), 5);
        assert!(w.lookup(DAGGER).is_some());
        assert!(w.lookup(FormId(0xDEAD)).is_none());

        assert!(!w.has_item(DAGGER));
        w.add_item(DAGGER, 2);
        assert_eq!(w.item_count(DAGGER), 2);
        w.remove_item(DAGGER, 5);
        assert!(!w.has_item(DAGGER));
    }

    #[test]
    fn test_equip_requires_ownership() {
        let mut w = world();
        assert_eq!(w.equip(DAGGER, HandSlot::Right), Err(WorldError::NotOwned(DAGGER)));
        assert_eq!(
            w.equip(FormId(0xDEAD), HandSlot::Right),
            Err(WorldError::UnknownForm(FormId(0xDEAD)))
        );

        w.learn(FLAMES);
        assert!(w.equip(FLAMES, HandSlot::Left).is_ok());
        assert_eq!(w.equipped_in_hand(Hand::Left), Some(FLAMES));
        assert!(w.is_equipped(FLAMES));
    }

    #[test]
    fn test_two_handed_replaces_both_hands() {
        let mut w = world();
        w.add_item(DAGGER, 1);
        w.add_item(GREATSWORD, 1);

        w.equip(GREATSWORD, HandSlot::Default).unwrap();
        assert_eq!(w.equipped_in_hand(Hand::Left), Some(GREATSWORD));
        assert_eq!(w.equipped_in_hand(Hand::Right), Some(GREATSWORD));

        w.equip(DAGGER, HandSlot::Left).unwrap();
        assert_eq!(w.equipped_in_hand(Hand::Left), Some(DAGGER));
        assert_eq!(w.equipped_in_hand(Hand::Right), None);
        assert!(!w.is_equipped(GREATSWORD));
    }

    #[test]
    fn test_consumables_and_unequippable() {
        let mut w = world();
        w.add_item(POTION, 2);
        w.equip(POTION, HandSlot::Default).unwrap();
        assert_eq!(w.item_count(POTION), 1);

        w.add_item(BOOK, 1);
        assert!(matches!(
            w.equip(BOOK, HandSlot::Default),
            Err(WorldError::CannotEquip { .. })
        ));
    }

    #[test]
    fn test_removing_last_item_unequips() {
        let mut w = world();
        w.add_item(DAGGER, 1);
        w.equip(DAGGER, HandSlot::Right).unwrap();
        w.remove_item(DAGGER, 1);
        assert_eq!(w.equipped_in_hand(Hand::Right), None);
    }
}
