//! Quickslot Core - Resolution and Action Dispatch
//!
//! Headset-anchored quickslots: spheres fixed relative to the headset that
//! run an action when a controller touches one and the activate button is
//! pressed and released.
//!
//! # Features
//!
//! - Per-frame slot transform and controller overlap scan
//! - Press/hold/release state machine with long-press bind/unbind
//! - Selection policies: per-hand, first, random, all, toggle
//! - Action dispatch through a deferred equip queue and a console gateway
//! - Hover, hold and feedback haptics
//! - Menu tracking that suppresses interaction while the game is paused
//! - TOML configuration store
//!
//! # Example
//!
//! ```ignore
//! use quickslot_core::prelude::*;
//!
//! let config = QuickslotConfig::load("quickslots.toml")?;
//! let mut manager = QuickslotManager::new();
//! manager.load_config(&config, &world);
//! manager.set_active_game_state(true);
//!
//! // every frame
//! let mut host = Host::new(&world, &mut console, &equip_sender, &mut haptics, &menus);
//! manager.update(delta_time, &poses, &mut host);
//!
//! // on the host's main-thread tick
//! equip_queue.drain(&mut world);
//! ```

pub mod command;
pub mod config;
pub mod dispatch;
pub mod equip_queue;
pub mod error;
pub mod events;
pub mod interaction;
pub mod manager;
pub mod menu;
pub mod resolver;
pub mod slot;

pub mod prelude {
    pub use crate::command::{ActionKind, Candidate, Command, SelectionPolicy};
    pub use crate::config::{CommandConfig, GlobalOptions, QuickslotConfig, SlotConfig};
    pub use crate::dispatch::{ConsoleGateway, Dispatcher};
    pub use crate::equip_queue::{EquipQueue, EquipSender, EquipTask};
    pub use crate::error::{ConfigError, ConfigResult, GatewayError, QueueClosed};
    pub use crate::events::{QuickslotEvent, QuickslotEventType};
    pub use crate::interaction::{HoldEvent, HoldState, PressTiming};
    pub use crate::manager::{Host, QuickslotManager};
    pub use crate::menu::{MenuEventSink, MenuGate, MenuTracker, NoMenus, SharedMenuTracker};
    pub use crate::resolver::ActionSink;
    pub use crate::slot::{find_overlap, Quickslot};
}

pub use prelude::*;
