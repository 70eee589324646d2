//! Interaction events reported by the manager

use quickslot_xr::Hand;

/// What happened on a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickslotEventType {
    /// Hover pulse emitted while a controller is inside the slot
    Hover,
    /// Activate button went down on the slot
    Pressed,
    /// Hold tick while between the short and long thresholds
    HoldTick,
    /// Long press cleared the slot's commands
    Unbound,
    /// Long press bound the hand's equipment to the slot
    Bound,
    /// Long press on an unbound slot with editing disabled
    EditDenied,
    /// Release dispatched at least one action
    Fired,
    /// Release or edit found nothing to do
    NoAction,
}

/// A slot interaction event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickslotEvent {
    pub event_type: QuickslotEventType,
    /// Index into the manager's slot list
    pub slot: usize,
    /// Controller that caused it
    pub hand: Hand,
    /// Manager clock at the time of the event
    pub time: f64,
    /// Actions performed, for `Fired`
    pub actions: usize,
}

impl QuickslotEvent {
    pub fn new(event_type: QuickslotEventType, slot: usize, hand: Hand, time: f64) -> Self {
        Self {
            event_type,
            slot,
            hand,
            time,
            actions: 0,
        }
    }

    /// Create a fired event
    pub fn fired(slot: usize, hand: Hand, time: f64, actions: usize) -> Self {
        Self {
            actions,
            ..Self::new(QuickslotEventType::Fired, slot, hand, time)
        }
    }

    pub fn is(&self, event_type: QuickslotEventType) -> bool {
        self.event_type == event_type
    }
}
