//! Menu-state tracking
//!
//! The host reports menu open/close events by name. Only a fixed set of
//! known menus is tracked; of those, the game-stopping ones block quickslot
//! interaction while open and for a short grace window after closing.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Menus that pause gameplay
pub const GAME_STOPPING_MENUS: &[&str] = &[
    "BarterMenu",
    "Book Menu",
    "Console",
    "Native UI Menu",
    "ContainerMenu",
    "Dialogue Menu",
    "Crafting Menu",
    "Credits Menu",
    "Cursor Menu",
    "Debug Text Menu",
    "FavoritesMenu",
    "GiftMenu",
    "InventoryMenu",
    "Journal Menu",
    "Kinect Menu",
    "Loading Menu",
    "Lockpicking Menu",
    "MagicMenu",
    "Main Menu",
    "MapMarkerText3D",
    "MapMenu",
    "MessageBoxMenu",
    "Mist Menu",
    "Quantity Menu",
    "RaceSex Menu",
    "Sleep/Wait Menu",
    "StatsMenuSkillRing",
    "StatsMenuPerks",
    "Training Menu",
    "Tutorial Menu",
    "TweenMenu",
];

/// Known menus that never block
pub const PASSIVE_MENUS: &[&str] = &[
    "Fader Menu",
    "HUD Menu",
    "Overlay Interaction Menu",
    "Overlay Menu",
    "StatsMenu",
    "TitleSequence Menu",
    "Top Menu",
    "WSEnemyMeters",
    "WSDebugOverlay",
    "WSActivateRollover",
    "LoadWaitSpinner",
];

/// Time a closed game-stopping menu keeps blocking
pub const MENU_CLOSE_GRACE: Duration = Duration::from_millis(250);

/// Query: is interaction currently suppressed by a menu
pub trait MenuGate {
    fn is_blocking(&self) -> bool;
}

/// Callback interface for host menu events
pub trait MenuEventSink {
    fn on_menu_open(&mut self, name: &str);
    fn on_menu_close(&mut self, name: &str);
}

#[derive(Debug, Clone, Copy)]
struct MenuState {
    open: bool,
    stops_game: bool,
}

/// Open/closed state of every known menu
#[derive(Debug, Clone)]
pub struct MenuTracker {
    menus: HashMap<&'static str, MenuState>,
    grace: Duration,
    /// When the last game-stopping menu closed
    last_stop_closed: Option<Instant>,
}

impl MenuTracker {
    /// Tracker over the built-in menu tables, all closed
    pub fn new() -> Self {
        let stopping = GAME_STOPPING_MENUS.iter().map(|&name| (name, true));
        let passive = PASSIVE_MENUS.iter().map(|&name| (name, false));

        Self {
            menus: stopping
                .chain(passive)
                .map(|(name, stops_game)| (name, MenuState { open: false, stops_game }))
                .collect(),
            grace: MENU_CLOSE_GRACE,
            last_stop_closed: None,
        }
    }

    /// Override the close grace window
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Whether a known menu is currently open
    pub fn is_open(&self, name: &str) -> bool {
        self.menus.get(name).is_some_and(|m| m.open)
    }

    /// Blocking state at a given instant
    pub fn is_blocking_at(&self, now: Instant) -> bool {
        if self.menus.values().any(|m| m.open && m.stops_game) {
            return true;
        }
        self.last_stop_closed
            .is_some_and(|closed| now.saturating_duration_since(closed) < self.grace)
    }

    /// Close everything, e.g. after a load
    pub fn reset(&mut self) {
        for state in self.menus.values_mut() {
            state.open = false;
        }
        self.last_stop_closed = None;
    }

    fn set_open(&mut self, name: &str, open: bool) {
        let Some(state) = self.menus.get_mut(name) else {
            return;
        };
        // a close restarts the grace window even when already closed
        if state.stops_game && !open {
            self.last_stop_closed = Some(Instant::now());
        }
        if state.open == open {
            return;
        }

        state.open = open;
        log::debug!("Menu '{}' {}", name, if open { "opened" } else { "closed" });
    }
}

impl Default for MenuTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuGate for MenuTracker {
    fn is_blocking(&self) -> bool {
        self.is_blocking_at(Instant::now())
    }
}

impl MenuEventSink for MenuTracker {
    fn on_menu_open(&mut self, name: &str) {
        self.set_open(name, true);
    }

    fn on_menu_close(&mut self, name: &str) {
        self.set_open(name, false);
    }
}

/// Tracker shared between the UI event thread and the VR update callback
#[derive(Debug, Clone, Default)]
pub struct SharedMenuTracker {
    inner: Arc<RwLock<MenuTracker>>,
}

impl SharedMenuTracker {
    pub fn new(tracker: MenuTracker) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tracker)),
        }
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.inner.read().is_open(name)
    }
}

impl MenuGate for SharedMenuTracker {
    fn is_blocking(&self) -> bool {
        self.inner.read().is_blocking()
    }
}

impl MenuEventSink for SharedMenuTracker {
    fn on_menu_open(&mut self, name: &str) {
        self.inner.write().on_menu_open(name);
    }

    fn on_menu_close(&mut self, name: &str) {
        self.inner.write().on_menu_close(name);
    }
}

/// Gate that never blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMenus;

impl MenuGate for NoMenus {
    fn is_blocking(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_disjoint() {
        for name in PASSIVE_MENUS {
            assert!(!GAME_STOPPING_MENUS.contains(name), "{} in both tables", name);
        }
        assert_eq!(MenuTracker::new().menus.len(), GAME_STOPPING_MENUS.len() + PASSIVE_MENUS.len());
    }

    #[test]
    fn test_stopping_menu_blocks() {
        let mut tracker = MenuTracker::new().with_grace(Duration::ZERO);
        assert!(!tracker.is_blocking());

        tracker.on_menu_open("InventoryMenu");
        assert!(tracker.is_open("InventoryMenu"));
        assert!(tracker.is_blocking());

        tracker.on_menu_close("InventoryMenu");
        assert!(!tracker.is_blocking());
    }

    #[test]
    fn test_passive_and_unknown_menus_do_not_block() {
        let mut tracker = MenuTracker::new();
        tracker.on_menu_open("HUD Menu");
        tracker.on_menu_open("Some Mod Menu");

        assert!(tracker.is_open("HUD Menu"));
        assert!(!tracker.is_open("Some Mod Menu"));
        assert!(!tracker.is_blocking());
    }

    #[test]
    fn test_close_grace_window() {
        let mut tracker = MenuTracker::new();
        tracker.on_menu_open("Dialogue Menu");
        tracker.on_menu_close("Dialogue Menu");

        let closed = tracker.last_stop_closed.unwrap();
        assert!(tracker.is_blocking_at(closed + Duration::from_millis(100)));
        assert!(!tracker.is_blocking_at(closed + Duration::from_millis(300)));
    }

    #[test]
    fn test_close_after_reset_keeps_grace() {
        let mut tracker = MenuTracker::new();
        tracker.on_menu_open("Loading Menu");
        tracker.reset();
        assert!(tracker.last_stop_closed.is_none());

        tracker.on_menu_close("Loading Menu");
        let closed = tracker.last_stop_closed.unwrap();
        assert!(!tracker.is_open("Loading Menu"));
        assert!(tracker.is_blocking_at(closed + Duration::from_millis(100)));

        // passive menus never stamp
        let mut passive = MenuTracker::new();
        passive.on_menu_close("HUD Menu");
        assert!(passive.last_stop_closed.is_none());
    }

    #[test]
    fn test_shared_tracker() {
        let tracker = SharedMenuTracker::new(MenuTracker::new().with_grace(Duration::ZERO));
        let mut ui_side = tracker.clone();

        ui_side.on_menu_open("Loading Menu");
        assert!(tracker.is_blocking());

        tracker.reset();
        assert!(!tracker.is_open("Loading Menu"));
        assert!(!tracker.is_blocking());
    }
}
