//! Category filters resolved against the catalog

use crate::entry::{CatalogEntry, FormKind, PotionKind};
use crate::form::FormId;
use crate::world::GameWorld;
use serde::{Deserialize, Serialize};

/// Declarative selection of catalog objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFilter {
    /// Required category
    pub category: FormKind,
    /// Keywords an entry must all carry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    /// Keywords an entry must not carry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /// Consumable sub-type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potion: Option<PotionKind>,
}

impl CategoryFilter {
    /// Filter that accepts every entry of a category
    pub fn new(category: FormKind) -> Self {
        Self {
            category,
            include: Vec::new(),
            exclude: Vec::new(),
            potion: None,
        }
    }

    /// Require a keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.include.push(keyword.into());
        self
    }

    /// Exclude a keyword
    pub fn without_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.exclude.push(keyword.into());
        self
    }

    /// Require a consumable sub-type
    pub fn with_potion(mut self, potion: PotionKind) -> Self {
        self.potion = Some(potion);
        self
    }

    /// Check if an entry passes this filter
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if entry.kind != self.category {
            return false;
        }

        if let Some(potion) = self.potion {
            if entry.potion != Some(potion) {
                return false;
            }
        }

        // Must have all required keywords
        if !self.include.iter().all(|k| entry.has_keyword(k)) {
            return false;
        }

        // Must not have any excluded keywords
        !self.exclude.iter().any(|k| entry.has_keyword(k))
    }

    /// Identifiers of all matching entries, in catalog order
    pub fn resolve(&self, world: &dyn GameWorld) -> Vec<FormId> {
        world
            .entries()
            .filter(|entry| self.matches(entry))
            .map(|entry| entry.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::InMemoryWorld;

    fn potion(id: u32, kind: PotionKind) -> CatalogEntry {
        CatalogEntry::new(FormId(id), format!("potion {}", id), FormKind::Potion).with_potion(kind)
    }

    #[test]
    fn test_filter_matches() {
        let filter = CategoryFilter::new(FormKind::Potion)
            .with_potion(PotionKind::Healing)
            .with_keyword("VendorItemPotion")
            .without_keyword("Quest");

        let good = potion(1, PotionKind::Healing).with_keyword("VendorItemPotion");
        let wrong_kind = potion(2, PotionKind::Magicka).with_keyword("VendorItemPotion");
        let missing_keyword = potion(3, PotionKind::Healing);
        let excluded = potion(4, PotionKind::Healing).with_keywords(["VendorItemPotion", "Quest"]);
        let not_potion = CatalogEntry::new(FormId(5), "sword", FormKind::Weapon);

        assert!(filter.matches(&good));
        assert!(!filter.matches(&wrong_kind));
        assert!(!filter.matches(&missing_keyword));
        assert!(!filter.matches(&excluded));
        assert!(!filter.matches(&not_potion));
    }

    #[test]
    fn test_resolve_keeps_catalog_order() {
        let mut world = InMemoryWorld::new();
        world.add_entry(potion(0x30, PotionKind::Healing));
        world.add_entry(potion(0x10, PotionKind::Stamina));
        world.add_entry(potion(0x20, PotionKind::Healing));

        let filter = CategoryFilter::new(FormKind::Potion).with_potion(PotionKind::Healing);
        assert_eq!(filter.resolve(&world), vec![FormId(0x30), FormId(0x20)]);

        let all = CategoryFilter::new(FormKind::Potion);
        assert_eq!(all.resolve(&world).len(), 3);
        assert!(CategoryFilter::new(FormKind::Shout).resolve(&world).is_empty());
    }
}
