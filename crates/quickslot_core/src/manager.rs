//! Quickslot manager
//!
//! Owns the slot collection and drives everything per frame: the slot
//! transform, the overlap scan for both controllers, hover and hold
//! haptics, long-press editing, and release dispatch. Host collaborators
//! are passed in through [`Host`] on each call; the manager keeps no
//! references to them.

use crate::config::{GlobalOptions, QuickslotConfig, SlotConfig};
use crate::dispatch::{ConsoleGateway, Dispatcher};
use crate::equip_queue::EquipSender;
use crate::events::{QuickslotEvent, QuickslotEventType};
use crate::interaction::{self, HoldEvent};
use crate::menu::MenuGate;
use crate::resolver;
use crate::slot::{self, Quickslot};
use quickslot_catalog::GameWorld;
use quickslot_math::geometry;
use quickslot_xr::{Hand, HapticScheduler, HapticsBackend, PoseFrame, PoseSource, VrButton, VrDevice};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Haptic cue: strength as a multiple of `haptic_strength`, and duration
#[derive(Debug, Clone, Copy)]
struct HapticCue {
    scale: f32,
    duration: f32,
}

const TICK_CUE: HapticCue = HapticCue { scale: 0.6, duration: 0.03 };
const NO_ACTION_CUE: HapticCue = HapticCue { scale: 1.0, duration: 0.1 };
const UNSET_CUE: HapticCue = HapticCue { scale: 1.5, duration: 0.2 };
const SET_CUE: HapticCue = HapticCue { scale: 2.0, duration: 0.4 };

/// Host collaborators for one manager call
pub struct Host<'a> {
    pub world: &'a dyn GameWorld,
    pub console: &'a mut dyn ConsoleGateway,
    pub equip: &'a EquipSender,
    pub haptics: &'a mut dyn HapticsBackend,
    pub menus: &'a dyn MenuGate,
}

impl<'a> Host<'a> {
    pub fn new(
        world: &'a dyn GameWorld,
        console: &'a mut dyn ConsoleGateway,
        equip: &'a EquipSender,
        haptics: &'a mut dyn HapticsBackend,
        menus: &'a dyn MenuGate,
    ) -> Self {
        Self {
            world,
            console,
            equip,
            haptics,
            menus,
        }
    }
}

/// Owns every quickslot and the interaction state around them
pub struct QuickslotManager {
    slots: Vec<Quickslot>,
    options: GlobalOptions,
    /// Seconds since creation, advanced by `update`
    current_time: f64,
    in_game: bool,
    /// Last frame with all poses valid
    last_frame: Option<PoseFrame>,
    /// Slot each controller pressed on, per `Hand::index`
    pressed: [Option<usize>; 2],
    haptics: HapticScheduler,
    rng: StdRng,
    /// Slots edited since the last load or save
    dirty: bool,
    /// Events since the start of the last update
    last_events: Vec<QuickslotEvent>,
}

impl QuickslotManager {
    /// Create an empty manager with default options
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create with a fixed random seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            slots: Vec::new(),
            options: GlobalOptions::default(),
            current_time: 0.0,
            in_game: false,
            last_frame: None,
            pressed: [None; 2],
            haptics: HapticScheduler::new(),
            rng,
            dirty: false,
            last_events: Vec::new(),
        }
    }

    /// Replace the global options
    pub fn with_options(mut self, options: GlobalOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a slot
    pub fn add_slot(&mut self, slot: Quickslot) -> usize {
        self.slots.push(slot);
        self.dirty = true;
        self.slots.len() - 1
    }

    pub fn slots(&self) -> &[Quickslot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Quickslot> {
        self.slots.get(index)
    }

    pub fn options(&self) -> &GlobalOptions {
        &self.options
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_in_game(&self) -> bool {
        self.in_game
    }

    /// Slot a controller is holding the activate button on
    pub fn pressed_slot(&self, hand: Hand) -> Option<usize> {
        self.pressed[hand.index()]
    }

    pub fn haptics(&self) -> &HapticScheduler {
        &self.haptics
    }

    /// Events since the start of the last update
    pub fn events(&self) -> &[QuickslotEvent] {
        &self.last_events
    }

    pub fn drain_events(&mut self) -> Vec<QuickslotEvent> {
        std::mem::take(&mut self.last_events)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Enter or leave gameplay. Leaving cancels any held press.
    pub fn set_active_game_state(&mut self, in_game: bool) {
        if self.in_game != in_game {
            log::debug!("Quickslots {}", if in_game { "active" } else { "inactive" });
        }
        self.in_game = in_game;
        if !in_game {
            self.cancel_presses();
        }
    }

    /// Drop every slot and all interaction state
    pub fn reset(&mut self) {
        self.slots.clear();
        self.pressed = [None; 2];
        self.last_frame = None;
        self.haptics.clear();
        self.last_events.clear();
        self.dirty = false;
    }

    /// Rebuild the slot collection from a configuration
    pub fn load_config(&mut self, config: &QuickslotConfig, world: &dyn GameWorld) {
        self.reset();
        self.options = config.options.clone();
        self.slots = config
            .slots
            .iter()
            .map(|s| s.to_slot(self.options.default_radius, world))
            .collect();

        for slot in &self.slots {
            log::debug!("Quickslot {}", slot.describe());
        }
        log::info!("Loaded {} quickslots", self.slots.len());
    }

    /// Persistable configuration for the live slots
    pub fn to_config(&self) -> QuickslotConfig {
        QuickslotConfig {
            options: self.options.clone(),
            slots: self.slots.iter().map(SlotConfig::from_slot).collect(),
        }
    }

    fn gate_open(&self, menus: &dyn MenuGate) -> bool {
        self.in_game && !menus.is_blocking()
    }

    fn cancel_presses(&mut self) {
        for pressed in &mut self.pressed {
            if let Some(slot) = pressed.take().and_then(|i| self.slots.get_mut(i)) {
                slot.clear_press();
            }
        }
    }

    fn cue(&mut self, hand: Hand, cue: HapticCue) {
        let strength = self.options.haptic_strength * cue.scale;
        self.haptics.schedule(hand, strength, cue.duration, self.current_time);
    }

    fn emit(&mut self, event: QuickslotEvent) {
        self.last_events.push(event);
    }

    /// Per-frame entry point
    pub fn update(&mut self, delta_time: f32, frame: &PoseFrame, host: &mut Host<'_>) {
        self.current_time += f64::from(delta_time);
        self.last_events.clear();

        self.step(frame, host.world, host.menus);
        self.haptics.tick(self.current_time, &mut *host.haptics);
    }

    /// Per-frame entry point pulling the snapshot from a live tracker
    pub fn update_from(&mut self, delta_time: f32, source: &dyn PoseSource, host: &mut Host<'_>) {
        let frame = source.poses();
        self.update(delta_time, &frame, host);
    }

    fn step(&mut self, frame: &PoseFrame, world: &dyn GameWorld, menus: &dyn MenuGate) {
        if !self.gate_open(menus) {
            return;
        }
        if !frame.all_valid() {
            return;
        }

        self.last_frame = Some(*frame);
        let yaw = geometry::yaw_only_rotation(&frame.hmd.matrix);
        let head = frame.hmd.position();
        for slot in &mut self.slots {
            slot.update_transform(&yaw, head);
        }

        for hand in Hand::BOTH {
            self.scan_controller(hand, frame, world);
        }
    }

    fn scan_controller(&mut self, hand: Hand, frame: &PoseFrame, world: &dyn GameWorld) {
        let now = self.current_time;
        let point = frame.controller(hand).position();

        let overlap = slot::find_overlap(&self.slots, point, self.options.controller_radius);
        if let Some(index) = overlap {
            let interval = f64::from(self.options.hover_haptic_interval);
            let slot = &mut self.slots[index];
            if self.options.hover_haptics && now - slot.last_hover_time >= interval {
                slot.last_hover_time = now;
                let (strength, duration) = (self.options.haptic_strength, self.options.hover_haptic_duration);
                self.haptics.schedule(hand, strength, duration, now);
                self.emit(QuickslotEvent::new(QuickslotEventType::Hover, index, hand, now));
            }
        }

        // holds only advance while the controller stays on the anchored slot
        let Some(index) = self.pressed[hand.index()].filter(|&anchor| overlap == Some(anchor)) else {
            return;
        };
        let timing = self.options.timing();
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };

        match interaction::advance_hold(slot, now, &timing) {
            HoldEvent::None => {}
            HoldEvent::Tick => {
                self.cue(hand, TICK_CUE);
                self.emit(QuickslotEvent::new(QuickslotEventType::HoldTick, index, hand, now));
            }
            HoldEvent::LongPress => self.edit_slot(index, hand, world),
        }
    }

    /// Long-press edit: unbind a bound slot, or bind the hand's equipment
    fn edit_slot(&mut self, index: usize, hand: Hand, world: &dyn GameWorld) {
        let now = self.current_time;
        let allow_edit = self.options.allow_edit_slots;
        let slot = &mut self.slots[index];

        if slot.is_bound() {
            slot.unset_action();
            log::info!("Unbound quickslot '{}'", slot.name);
            self.dirty = true;
            self.cue(hand, UNSET_CUE);
            self.emit(QuickslotEvent::new(QuickslotEventType::Unbound, index, hand, now));
            return;
        }

        if !allow_edit {
            self.cue(hand, NO_ACTION_CUE);
            self.emit(QuickslotEvent::new(QuickslotEventType::EditDenied, index, hand, now));
            return;
        }

        match interaction::equipped_command(world, hand) {
            Some(command) => {
                log::info!("Bound quickslot '{}' to {:?} {:?}", slot.name, command.action, command.candidate_ids);
                slot.set_action(command);
                self.dirty = true;
                self.cue(hand, SET_CUE);
                self.emit(QuickslotEvent::new(QuickslotEventType::Bound, index, hand, now));
            }
            None => {
                log::debug!("Nothing equipped in {:?} hand to bind", hand);
                self.cue(hand, NO_ACTION_CUE);
                self.emit(QuickslotEvent::new(QuickslotEventType::NoAction, index, hand, now));
            }
        }
    }

    /// Activate button press. Returns true if a quickslot consumed it.
    pub fn button_press(&mut self, button: VrButton, device: VrDevice, host: &Host<'_>) -> bool {
        let Some(hand) = device.hand() else {
            return false;
        };
        if button != self.options.activate_button || !self.gate_open(host.menus) {
            return false;
        }
        let Some(frame) = self.last_frame else {
            return false;
        };

        let point = frame.controller(hand).position();
        let Some(index) = slot::find_overlap(&self.slots, point, self.options.controller_radius) else {
            return false;
        };

        if let Some(previous) = self.pressed[hand.index()].replace(index) {
            if previous != index {
                if let Some(slot) = self.slots.get_mut(previous) {
                    slot.clear_press();
                }
            }
        }

        let now = self.current_time;
        self.slots[index].press(now);
        log::debug!("{:?} pressed quickslot '{}'", hand, self.slots[index].name);
        self.emit(QuickslotEvent::new(QuickslotEventType::Pressed, index, hand, now));
        true
    }

    /// Activate button release. Fires the slot the press started on if
    /// the hold stayed under the long-press threshold. Returns true if a
    /// quickslot consumed it.
    pub fn button_release(&mut self, button: VrButton, device: VrDevice, host: &mut Host<'_>) -> bool {
        let Some(hand) = device.hand() else {
            return false;
        };
        if button != self.options.activate_button {
            return false;
        }
        let Some(index) = self.pressed[hand.index()].take() else {
            return false;
        };
        if index >= self.slots.len() {
            return false;
        }

        if !self.gate_open(host.menus) {
            self.slots[index].clear_press();
            return false;
        }

        let now = self.current_time;
        let fires = interaction::release_fires(&self.slots[index], now, &self.options.timing());
        self.slots[index].clear_press();

        if fires {
            self.fire(index, hand, host);
        }
        true
    }

    fn fire(&mut self, index: usize, hand: Hand, host: &mut Host<'_>) {
        let now = self.current_time;
        let performed = {
            let mut dispatcher = Dispatcher::new(
                host.world,
                &mut *host.console,
                host.equip,
                &self.options.always_allowed_sources,
            );
            resolver::resolve(&self.slots[index], &mut dispatcher, &mut self.rng)
        };

        if performed == 0 {
            log::debug!("Quickslot '{}': no applicable action", self.slots[index].name);
            self.cue(hand, NO_ACTION_CUE);
            self.emit(QuickslotEvent::new(QuickslotEventType::NoAction, index, hand, now));
        } else {
            log::debug!("Quickslot '{}': {} action(s)", self.slots[index].name, performed);
            self.emit(QuickslotEvent::fired(index, hand, now, performed));
        }
    }
}

impl Default for QuickslotManager {
    fn default() -> Self {
        Self::new()
    }
}
