//! Press/hold/release interaction state machine
//!
//! Press state lives on the slot itself (`press_start_time`); these
//! helpers classify it and compute the transitions driven by the frame
//! clock and by button releases.

use crate::command::{ActionKind, Command};
use crate::slot::Quickslot;
use quickslot_catalog::{FormKind, GameWorld, HandSlot};
use quickslot_xr::Hand;

/// Seconds between hold tick pulses
pub const HOLD_TICK_INTERVAL: f64 = 0.25;

/// Hold thresholds, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressTiming {
    pub short_press: f64,
    pub long_press: f64,
    pub tick_interval: f64,
}

impl PressTiming {
    pub fn new(short_press: f64, long_press: f64) -> Self {
        Self {
            short_press,
            long_press,
            tick_interval: HOLD_TICK_INTERVAL,
        }
    }
}

impl Default for PressTiming {
    fn default() -> Self {
        Self::new(0.25, 1.0)
    }
}

/// Where a slot is in the hold cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldState {
    Idle,
    Pressed,
    ShortHeld,
    LongHeld,
}

impl HoldState {
    pub fn of(slot: &Quickslot, now: f64, timing: &PressTiming) -> Self {
        match slot.held_for(now) {
            None => Self::Idle,
            Some(t) if t >= timing.long_press => Self::LongHeld,
            Some(t) if t >= timing.short_press => Self::ShortHeld,
            Some(_) => Self::Pressed,
        }
    }
}

/// Outcome of advancing a held slot by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldEvent {
    None,
    /// Emit a hold tick pulse
    Tick,
    /// Long-press threshold crossed; run the edit transition
    LongPress,
}

/// Advance a held slot. Crossing the long-press threshold resets the
/// press so the edit fires once and the following release is a no-op.
pub fn advance_hold(slot: &mut Quickslot, now: f64, timing: &PressTiming) -> HoldEvent {
    match HoldState::of(slot, now, timing) {
        HoldState::Idle | HoldState::Pressed => HoldEvent::None,
        HoldState::ShortHeld => {
            if now - slot.last_tick_time >= timing.tick_interval {
                slot.last_tick_time = now;
                HoldEvent::Tick
            } else {
                HoldEvent::None
            }
        }
        HoldState::LongHeld => {
            slot.clear_press();
            HoldEvent::LongPress
        }
    }
}

/// Whether a release now should dispatch the slot's action
pub fn release_fires(slot: &Quickslot, now: f64, timing: &PressTiming) -> bool {
    slot.held_for(now).is_some_and(|t| t < timing.long_press)
}

/// Command that binds whatever `hand` currently holds, pinned to that hand
pub fn equipped_command(world: &dyn GameWorld, hand: Hand) -> Option<Command> {
    let id = world.equipped_in_hand(hand)?;
    let action = match world.lookup(id).map(|e| e.kind) {
        Some(FormKind::Spell) => ActionKind::EquipSpell,
        _ => ActionKind::EquipItem,
    };

    Some(Command::new(action).with_ids([id]).with_hand(HandSlot::from(hand)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickslot_catalog::{CatalogEntry, EquipHandler, FormId, InMemoryWorld};
    use quickslot_math::Vec3;

    fn pressed_at(t: f64) -> Quickslot {
        let mut slot = Quickslot::new("s", Vec3::ZERO, 0.1);
        slot.press(t);
        slot
    }

    #[test]
    fn test_hold_states() {
        let timing = PressTiming::default();
        let slot = pressed_at(10.0);

        assert_eq!(HoldState::of(&Quickslot::new("s", Vec3::ZERO, 0.1), 10.0, &timing), HoldState::Idle);
        assert_eq!(HoldState::of(&slot, 10.1, &timing), HoldState::Pressed);
        assert_eq!(HoldState::of(&slot, 10.5, &timing), HoldState::ShortHeld);
        assert_eq!(HoldState::of(&slot, 11.0, &timing), HoldState::LongHeld);
    }

    #[test]
    fn test_ticks_while_short_held() {
        let timing = PressTiming::default();
        let mut slot = pressed_at(0.0);

        assert_eq!(advance_hold(&mut slot, 0.125, &timing), HoldEvent::None);
        assert_eq!(advance_hold(&mut slot, 0.375, &timing), HoldEvent::Tick);
        assert_eq!(advance_hold(&mut slot, 0.5, &timing), HoldEvent::None);
        assert_eq!(advance_hold(&mut slot, 0.625, &timing), HoldEvent::Tick);
    }

    #[test]
    fn test_long_press_fires_once() {
        let timing = PressTiming::default();
        let mut slot = pressed_at(0.0);

        assert_eq!(advance_hold(&mut slot, 1.0, &timing), HoldEvent::LongPress);
        assert!(!slot.is_pressed());
        assert_eq!(advance_hold(&mut slot, 1.5, &timing), HoldEvent::None);
        assert!(!release_fires(&slot, 1.5, &timing));
    }

    #[test]
    fn test_release_window() {
        let timing = PressTiming::default();
        let slot = pressed_at(0.0);

        assert!(release_fires(&slot, 0.1, &timing));
        assert!(release_fires(&slot, 0.75, &timing));
        assert!(!release_fires(&slot, 1.0, &timing));
    }

    #[test]
    fn test_equipped_command() {
        let dagger = FormId(0x0001_397E);
        let flames = FormId(0x0001_2FCD);
        let mut world = InMemoryWorld::new()
            .with_entry(CatalogEntry::new(dagger, "Iron Dagger", FormKind::Weapon))
            .with_entry(CatalogEntry::new(flames, "Flames", FormKind::Spell));
        world.add_item(dagger, 1);
        world.learn(flames);

        assert_eq!(equipped_command(&world, Hand::Left), None);

        world.equip(dagger, HandSlot::Left).unwrap();
        world.equip(flames, HandSlot::Right).unwrap();

        let left = equipped_command(&world, Hand::Left).unwrap();
        assert_eq!(left.action, ActionKind::EquipItem);
        assert_eq!(left.hand, HandSlot::Left);
        assert_eq!(left.candidate_ids, vec![dagger]);

        let right = equipped_command(&world, Hand::Right).unwrap();
        assert_eq!(right.action, ActionKind::EquipSpell);
        assert_eq!(right.hand, HandSlot::Right);
    }
}
