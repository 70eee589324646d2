//! # quickslot_xr - Tracking and Haptics Interfaces
//!
//! The VR-runtime side of the quickslot system:
//! - Validity-flagged tracked poses for the headset and both controllers
//! - Controller buttons and press/release events
//! - A haptics backend trait plus a deadline-based pulse scheduler
//!
//! The runtime itself is a collaborator supplied by the host; nothing in
//! this crate talks to a device directly.
//!
//! ## Example
//!
//! ```ignore
//! use quickslot_xr::prelude::*;
//!
//! let mut haptics = HapticScheduler::new();
//! haptics.schedule(Hand::Right, 0.5, 0.1, now);
//!
//! // every frame
//! haptics.tick(now, &mut backend);
//! ```

pub mod haptics;

pub use haptics::HapticScheduler;

use quickslot_math::{Mat34, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Controller hand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const BOTH: [Hand; 2] = [Hand::Left, Hand::Right];

    /// Stable index for per-hand arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Tracked device that produced an input event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VrDevice {
    Hmd,
    LeftController,
    RightController,
    /// Trackers, base stations and anything else
    Other(u32),
}

impl VrDevice {
    /// Controller hand, if this device is a hand controller
    pub fn hand(self) -> Option<Hand> {
        match self {
            Self::LeftController => Some(Hand::Left),
            Self::RightController => Some(Hand::Right),
            _ => None,
        }
    }
}

impl From<Hand> for VrDevice {
    fn from(hand: Hand) -> Self {
        match hand {
            Hand::Left => Self::LeftController,
            Hand::Right => Self::RightController,
        }
    }
}

/// Controller button, numbered the way the VR runtime reports them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ButtonRepr", into = "ButtonRepr")]
pub enum VrButton {
    System,
    ApplicationMenu,
    Grip,
    A,
    Touchpad,
    Trigger,
    Other(u32),
}

impl VrButton {
    /// Runtime button id
    pub fn id(self) -> u32 {
        match self {
            Self::System => 0,
            Self::ApplicationMenu => 1,
            Self::Grip => 2,
            Self::A => 7,
            Self::Touchpad => 32,
            Self::Trigger => 33,
            Self::Other(id) => id,
        }
    }

    /// Map a runtime button id
    pub fn from_id(id: u32) -> Self {
        match id {
            0 => Self::System,
            1 => Self::ApplicationMenu,
            2 => Self::Grip,
            7 => Self::A,
            32 => Self::Touchpad,
            33 => Self::Trigger,
            other => Self::Other(other),
        }
    }

    /// Parse a configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "system" => Some(Self::System),
            "application_menu" | "menu" => Some(Self::ApplicationMenu),
            "grip" => Some(Self::Grip),
            "a" => Some(Self::A),
            "touchpad" | "thumbstick" => Some(Self::Touchpad),
            "trigger" => Some(Self::Trigger),
            _ => None,
        }
    }

    /// Configuration name, `None` for unnamed ids
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::System => Some("system"),
            Self::ApplicationMenu => Some("application_menu"),
            Self::Grip => Some("grip"),
            Self::A => Some("a"),
            Self::Touchpad => Some("touchpad"),
            Self::Trigger => Some("trigger"),
            Self::Other(_) => None,
        }
    }
}

impl Default for VrButton {
    fn default() -> Self {
        Self::Trigger
    }
}

/// Serialized form of a button: a name or a raw id
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ButtonRepr {
    Id(u32),
    Name(String),
}

impl TryFrom<ButtonRepr> for VrButton {
    type Error = String;

    fn try_from(repr: ButtonRepr) -> Result<Self, Self::Error> {
        match repr {
            ButtonRepr::Id(id) => Ok(Self::from_id(id)),
            ButtonRepr::Name(name) => {
                Self::from_name(&name).ok_or_else(|| format!("unknown button name '{}'", name))
            }
        }
    }
}

impl From<VrButton> for ButtonRepr {
    fn from(button: VrButton) -> Self {
        match button.name() {
            Some(name) => ButtonRepr::Name(name.to_string()),
            None => ButtonRepr::Id(button.id()),
        }
    }
}

/// Button transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEventKind {
    Pressed,
    Released,
}

/// Discrete button event from the runtime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonEvent {
    pub kind: ButtonEventKind,
    pub button: VrButton,
    pub device: VrDevice,
}

impl ButtonEvent {
    pub fn pressed(button: VrButton, device: VrDevice) -> Self {
        Self { kind: ButtonEventKind::Pressed, button, device }
    }

    pub fn released(button: VrButton, device: VrDevice) -> Self {
        Self { kind: ButtonEventKind::Released, button, device }
    }
}

/// Tracked device pose with the runtime's validity flag
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackedPose {
    /// Device-to-tracking transform
    pub matrix: Mat34,
    /// Whether the runtime considers this pose usable
    pub valid: bool,
}

impl TrackedPose {
    pub fn new(matrix: Mat34, valid: bool) -> Self {
        Self { matrix, valid }
    }

    /// Valid pose at a position with identity orientation
    pub fn at(position: Vec3) -> Self {
        Self::new(Mat34::from_translation(position), true)
    }

    /// Pose flagged invalid by the runtime
    pub fn invalid() -> Self {
        Self::new(Mat34::IDENTITY, false)
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.matrix.translation()
    }
}

/// One frame's snapshot of head and controller poses
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PoseFrame {
    pub hmd: TrackedPose,
    pub left: TrackedPose,
    pub right: TrackedPose,
}

impl PoseFrame {
    pub fn new(hmd: TrackedPose, left: TrackedPose, right: TrackedPose) -> Self {
        Self { hmd, left, right }
    }

    /// All three poses are usable this frame
    pub fn all_valid(&self) -> bool {
        self.hmd.valid && self.left.valid && self.right.valid
    }

    /// Pose of a controller
    pub fn controller(&self, hand: Hand) -> &TrackedPose {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }
}

/// Source of per-frame pose snapshots
pub trait PoseSource {
    /// Poses for the current frame
    fn poses(&self) -> PoseFrame;
}

/// XR error types
#[derive(Clone, Debug, Error)]
pub enum XrError {
    /// Backend not initialized yet
    #[error("XR backend not initialized")]
    NotInitialized,
    /// Feature not supported
    #[error("Not supported: {0}")]
    NotSupported(String),
    /// Device error
    #[error("Device error: {0}")]
    DeviceError(String),
}

/// Haptic output on the hand controllers
pub trait HapticsBackend {
    /// Whether the backend is usable
    fn is_ready(&self) -> bool;

    /// Attempt to discover/initialize the backend
    fn try_init(&mut self) -> Result<(), XrError>;

    /// Emit a pulse. `duration_hint` is in seconds; runtimes may clamp it
    /// to a single short burst, so callers re-issue pulses every frame.
    fn pulse(&mut self, hand: Hand, strength: f32, duration_hint: f32);
}

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::haptics::HapticScheduler;
    pub use crate::{
        ButtonEvent, ButtonEventKind, Hand, HapticsBackend, PoseFrame, PoseSource, TrackedPose,
        VrButton, VrDevice, XrError,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_hand() {
        assert_eq!(VrDevice::LeftController.hand(), Some(Hand::Left));
        assert_eq!(VrDevice::RightController.hand(), Some(Hand::Right));
        assert_eq!(VrDevice::Hmd.hand(), None);
        assert_eq!(VrDevice::Other(4).hand(), None);
        assert_eq!(VrDevice::from(Hand::Right), VrDevice::RightController);
    }

    #[test]
    fn test_button_ids() {
        assert_eq!(VrButton::Trigger.id(), 33);
        assert_eq!(VrButton::from_id(33), VrButton::Trigger);
        assert_eq!(VrButton::from_id(2), VrButton::Grip);
        assert_eq!(VrButton::from_id(99), VrButton::Other(99));
        assert_eq!(VrButton::from_name("TRIGGER"), Some(VrButton::Trigger));
        assert_eq!(VrButton::from_name("nope"), None);
        assert_eq!(VrButton::default(), VrButton::Trigger);
    }

    #[test]
    fn test_button_repr() {
        assert_eq!(VrButton::try_from(ButtonRepr::Id(32)).ok(), Some(VrButton::Touchpad));
        assert_eq!(
            VrButton::try_from(ButtonRepr::Name("grip".into())).ok(),
            Some(VrButton::Grip)
        );
        assert!(VrButton::try_from(ButtonRepr::Name("elbow".into())).is_err());
        assert!(matches!(ButtonRepr::from(VrButton::Other(12)), ButtonRepr::Id(12)));
    }

    #[test]
    fn test_pose_frame_validity() {
        let valid = TrackedPose::at(Vec3::new(0.1, 1.0, 0.0));
        let frame = PoseFrame::new(valid, valid, valid);
        assert!(frame.all_valid());
        assert_eq!(frame.controller(Hand::Left).position(), Vec3::new(0.1, 1.0, 0.0));

        let frame = PoseFrame::new(valid, TrackedPose::invalid(), valid);
        assert!(!frame.all_valid());
    }
}
