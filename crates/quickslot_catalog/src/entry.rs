//! Catalog entries

use crate::form::FormId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Broad category of a catalog object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Swords, bows, staves
    Weapon,
    /// Armor and clothing
    Armor,
    /// Arrows and bolts
    Ammo,
    /// Potions, poisons and food
    Potion,
    /// Alchemy ingredients
    Ingredient,
    /// Single-use spell scrolls
    Scroll,
    /// Learnable spells
    Spell,
    /// Shouts / powers
    Shout,
    /// Books and notes
    Book,
    /// Everything else
    Misc,
}

impl FormKind {
    /// Objects held in a hand
    pub fn is_handheld(&self) -> bool {
        matches!(self, Self::Weapon | Self::Spell | Self::Scroll)
    }

    /// Objects the actor learns rather than carries
    pub fn is_knowledge(&self) -> bool {
        matches!(self, Self::Spell | Self::Shout)
    }

    /// Objects used up when equipped
    pub fn is_consumable(&self) -> bool {
        matches!(self, Self::Potion | Self::Ingredient)
    }
}

impl Default for FormKind {
    fn default() -> Self {
        Self::Misc
    }
}

/// Consumable sub-type, used by category filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PotionKind {
    Healing,
    Magicka,
    Stamina,
    Poison,
    Food,
    Other,
}

/// One object definition in the game catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique identifier
    pub id: FormId,
    /// Display name
    pub name: String,
    /// Category
    pub kind: FormKind,
    /// Keyword tags used by category filters
    pub keywords: BTreeSet<String>,
    /// Plugin file that defines this object
    pub source: String,
    /// Occupies both hands when equipped
    pub two_handed: bool,
    /// Consumable sub-type (potions/ingredients only)
    pub potion: Option<PotionKind>,
}

impl CatalogEntry {
    /// Create a new entry
    pub fn new(id: FormId, name: impl Into<String>, kind: FormKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            keywords: BTreeSet::new(),
            source: String::new(),
            two_handed: false,
            potion: None,
        }
    }

    /// Add a keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.insert(keyword.into());
        self
    }

    /// Add multiple keywords
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for keyword in keywords {
            self.keywords.insert(keyword.into());
        }
        self
    }

    /// Set defining plugin
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Mark as two-handed
    pub fn two_handed(mut self) -> Self {
        self.two_handed = true;
        self
    }

    /// Set consumable sub-type
    pub fn with_potion(mut self, potion: PotionKind) -> Self {
        self.potion = Some(potion);
        self
    }

    /// Check for a keyword (case-insensitive)
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }

    /// Can be held in either hand, so one of each can be equipped
    pub fn is_one_handed(&self) -> bool {
        self.kind.is_handheld() && !self.two_handed
    }
}
