//! Slot command model
//!
//! A `Command` is the declarative description of what a slot does: an
//! action kind, the hand it targets, and the ordered candidate objects it
//! may act on. Candidates come from explicit identifiers, from a category
//! filter resolved against the catalog at load time, or both; either way
//! they end up in `candidate_ids` before any runtime use.

use quickslot_catalog::{CategoryFilter, FormId, GameWorld, HandSlot};
use serde::{Deserialize, Serialize};

/// What a command does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Unbound placeholder, awaiting assignment
    None,
    /// Equip a weapon or other hand-held item
    EquipItem,
    /// Equip armor, ammo or use a consumable
    EquipOther,
    /// Equip a known spell into one or both hands
    EquipSpell,
    /// Equip a known shout or power
    EquipShout,
    /// Run the stored console text verbatim
    #[serde(rename = "console_cmd")]
    ConsoleCommand,
    /// Drop carried objects
    DropObject,
}

impl ActionKind {
    /// Requires the actor to carry the candidate
    pub fn needs_possession(&self) -> bool {
        matches!(self, Self::EquipItem | Self::EquipOther | Self::DropObject)
    }

    /// Requires the actor to know the candidate
    pub fn needs_knowledge(&self) -> bool {
        matches!(self, Self::EquipSpell | Self::EquipShout)
    }
}

impl Default for ActionKind {
    fn default() -> Self {
        Self::None
    }
}

/// How a multi-command slot picks what to execute on release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Primary and secondary command, one per hand, both executed
    PerHand,
    /// First applicable command/candidate in order
    First,
    /// Uniformly random applicable command/candidate
    Random,
    /// Every command in the list
    All,
    /// First applicable candidate that is not already equipped
    Toggle,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::PerHand
    }
}

/// One concrete attempt target: a catalog object, or `None` for commands
/// that take no object (console text)
pub type Candidate = Option<FormId>;

/// Declarative action specification
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Action kind
    pub action: ActionKind,
    /// Target hand
    pub hand: HandSlot,
    /// Explicit identifiers, as configured
    pub ids: Vec<FormId>,
    /// Category filter, as configured
    pub filter: Option<CategoryFilter>,
    /// Resolved, ordered candidates
    pub candidate_ids: Vec<FormId>,
    /// Console text for `ConsoleCommand`
    pub console_text: String,
    /// Object count for `DropObject`
    pub count: u32,
}

impl Command {
    /// Unbound placeholder
    pub fn none() -> Self {
        Self::new(ActionKind::None)
    }

    /// Create a command with no candidates
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            hand: HandSlot::Default,
            ids: Vec::new(),
            filter: None,
            candidate_ids: Vec::new(),
            console_text: String::new(),
            count: 1,
        }
    }

    /// Console command with literal text
    pub fn console(text: impl Into<String>) -> Self {
        Self::new(ActionKind::ConsoleCommand).with_console_text(text)
    }

    /// Set target hand
    pub fn with_hand(mut self, hand: HandSlot) -> Self {
        self.hand = hand;
        self
    }

    /// Set explicit identifiers; they become the candidates directly
    pub fn with_ids<I: IntoIterator<Item = FormId>>(mut self, ids: I) -> Self {
        self.ids = ids.into_iter().collect();
        self.candidate_ids = self.ids.clone();
        self
    }

    /// Set a category filter; call `resolve_candidates` to apply it
    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set console text
    pub fn with_console_text(mut self, text: impl Into<String>) -> Self {
        self.console_text = text.into();
        self
    }

    /// Set drop count
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Bound to a real action
    pub fn is_bound(&self) -> bool {
        self.action != ActionKind::None
    }

    /// Rebuild `candidate_ids` from the explicit ids followed by the filter
    /// results, dropping duplicates and keeping first occurrence order.
    pub fn resolve_candidates(&mut self, world: &dyn GameWorld) {
        let mut resolved = self.ids.clone();

        if let Some(filter) = &self.filter {
            for id in filter.resolve(world) {
                if !resolved.contains(&id) {
                    resolved.push(id);
                }
            }
            log::debug!(
                "Filter {:?} resolved to {} candidates for {:?}",
                filter.category,
                resolved.len(),
                self.action
            );
        }

        self.candidate_ids = resolved;
    }

    /// Attempt targets in order
    pub fn candidates(&self) -> Vec<Candidate> {
        match self.action {
            ActionKind::None => Vec::new(),
            ActionKind::ConsoleCommand => vec![None],
            _ => self.candidate_ids.iter().copied().map(Some).collect(),
        }
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::none()
    }
}
