//! Action dispatch against the host collaborators
//!
//! Item equips go through the deferred [`EquipSender`]; spells, shouts,
//! drops and raw console text go through the [`ConsoleGateway`] as
//! textual directives.

use crate::command::{ActionKind, Candidate, Command};
use crate::equip_queue::{EquipSender, EquipTask};
use crate::error::GatewayError;
use crate::resolver::ActionSink;
use quickslot_catalog::{CatalogEntry, FormId, GameWorld, HandSlot};

/// Runs a console-style directive against the host's command interpreter
pub trait ConsoleGateway {
    fn run(&mut self, command: &str) -> Result<(), GatewayError>;
}

/// `player.equipspell <id> left|right`
pub fn equip_spell_directive(id: FormId, hand: HandSlot) -> Vec<String> {
    let hands: &[&str] = match hand {
        HandSlot::Default => &["right", "left"],
        HandSlot::Right => &["right"],
        HandSlot::Left => &["left"],
    };
    hands
        .iter()
        .map(|h| format!("player.equipspell {} {}", id, h))
        .collect()
}

/// `player.equipshout <id>`
pub fn equip_shout_directive(id: FormId) -> String {
    format!("player.equipshout {}", id)
}

/// `player.drop <id> <count>`
pub fn drop_directive(id: FormId, count: u32) -> String {
    format!("player.drop {} {}", id, count.max(1))
}

/// Applies applicability tests and executes commands for the resolver
pub struct Dispatcher<'a> {
    world: &'a dyn GameWorld,
    console: &'a mut dyn ConsoleGateway,
    equip: &'a EquipSender,
    always_allowed: &'a [String],
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        world: &'a dyn GameWorld,
        console: &'a mut dyn ConsoleGateway,
        equip: &'a EquipSender,
        always_allowed: &'a [String],
    ) -> Self {
        Self {
            world,
            console,
            equip,
            always_allowed,
        }
    }

    /// Possession or knowledge check for a resolved candidate
    fn is_applicable(&self, action: ActionKind, entry: &CatalogEntry) -> bool {
        if action.needs_possession() {
            return self.world.has_item(entry.id);
        }
        if action.needs_knowledge() {
            return self.world.knows(entry.id)
                || self
                    .always_allowed
                    .iter()
                    .any(|source| source.eq_ignore_ascii_case(&entry.source));
        }
        false
    }

    fn run_console(&mut self, directive: &str) -> bool {
        match self.console.run(directive) {
            Ok(()) => {
                log::debug!("Console: {}", directive);
                true
            }
            Err(e) => {
                log::error!("Console directive `{}` failed: {}", directive, e);
                false
            }
        }
    }

    fn queue_equip(&self, command: &Command, entry: &CatalogEntry) -> bool {
        // a pair of one-handed items fills both hands when no hand is pinned
        let tasks = if command.hand == HandSlot::Default
            && command.action == ActionKind::EquipItem
            && entry.is_one_handed()
            && self.world.item_count(entry.id) >= 2
        {
            vec![
                EquipTask::new(entry.id, HandSlot::Right),
                EquipTask::new(entry.id, HandSlot::Left),
            ]
        } else {
            vec![EquipTask::new(entry.id, command.hand)]
        };

        for task in tasks {
            if let Err(e) = self.equip.send(task) {
                log::error!("Could not queue equip of {}: {}", entry.id, e);
                return false;
            }
        }
        true
    }
}

impl ActionSink for Dispatcher<'_> {
    fn try_execute(&mut self, command: &Command, candidate: Candidate) -> bool {
        match command.action {
            ActionKind::None => return false,
            ActionKind::ConsoleCommand => {
                let text = command.console_text.trim();
                if text.is_empty() {
                    return false;
                }
                return self.run_console(text);
            }
            _ => {}
        }

        let Some(id) = candidate else {
            return false;
        };
        let world = self.world;
        let Some(entry) = world.lookup(id) else {
            log::warn!("Form {} does not resolve to a catalog object", id);
            return false;
        };
        if !self.is_applicable(command.action, entry) {
            log::debug!("Skipping {} ({}): not owned or known", entry.name, id);
            return false;
        }

        match command.action {
            ActionKind::EquipItem | ActionKind::EquipOther => self.queue_equip(command, entry),
            ActionKind::EquipSpell => {
                let mut any = false;
                for directive in equip_spell_directive(id, command.hand) {
                    any |= self.run_console(&directive);
                }
                any
            }
            ActionKind::EquipShout => self.run_console(&equip_shout_directive(id)),
            ActionKind::DropObject => self.run_console(&drop_directive(id, command.count)),
            ActionKind::None | ActionKind::ConsoleCommand => false,
        }
    }

    fn is_equipped(&self, id: FormId) -> bool {
        self.world.is_equipped(id)
    }
}
