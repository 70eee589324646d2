//! Quickslot entity: a headset-anchored trigger sphere and its commands

use crate::command::{ActionKind, Command, SelectionPolicy};
use quickslot_math::{geometry, Mat3, Vec3};

/// A spherical trigger volume fixed relative to the headset
#[derive(Debug, Clone)]
pub struct Quickslot {
    /// Display name
    pub name: String,
    /// Headset-relative origin, fixed after load
    pub origin: Vec3,
    /// World position as of the last valid frame
    pub position: Vec3,
    /// Sphere radius
    pub radius: f32,
    /// Release selection policy
    pub policy: SelectionPolicy,
    /// Primary hand command, `PerHand` only
    pub primary: Command,
    /// Secondary hand command, `PerHand` only
    pub secondary: Command,
    /// Ordered command list, every other policy
    pub commands: Vec<Command>,
    /// Last time a hover pulse was emitted
    pub last_hover_time: f64,
    /// Time the activate button went down on this slot; negative when idle
    pub press_start_time: f64,
    /// Last hold tick pulse
    pub last_tick_time: f64,
}

impl Quickslot {
    /// Create an unbound slot at a headset-relative origin
    pub fn new(name: impl Into<String>, origin: Vec3, radius: f32) -> Self {
        Self {
            name: name.into(),
            origin,
            position: origin,
            radius,
            policy: SelectionPolicy::PerHand,
            primary: Command::none(),
            secondary: Command::none(),
            commands: Vec::new(),
            last_hover_time: f64::NEG_INFINITY,
            press_start_time: -1.0,
            last_tick_time: f64::NEG_INFINITY,
        }
    }

    /// Set selection policy
    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set primary and secondary hand commands
    pub fn with_hand_commands(mut self, primary: Command, secondary: Command) -> Self {
        self.primary = primary;
        self.secondary = secondary;
        self
    }

    /// Append a command to the ordered list
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Recompute `position` from the head's yaw rotation and position
    pub fn update_transform(&mut self, yaw: &Mat3, head: Vec3) {
        self.position = geometry::transform(yaw, self.origin) + head;
    }

    /// Whether a sphere at `point` touches this slot. The boundary does not count.
    pub fn overlaps(&self, point: Vec3, radius: f32) -> bool {
        let reach = radius + self.radius;
        geometry::squared_distance(point, self.position) < reach * reach
    }

    /// Commands active under the current policy
    pub fn active_commands(&self) -> Vec<&Command> {
        match self.policy {
            SelectionPolicy::PerHand => vec![&self.primary, &self.secondary],
            _ => self.commands.iter().collect(),
        }
    }

    /// Any active command has a real action
    pub fn is_bound(&self) -> bool {
        self.active_commands().iter().any(|c| c.is_bound())
    }

    /// Clear every command back to unbound
    pub fn unset_action(&mut self) {
        self.primary = Command::none();
        self.secondary = Command::none();
        self.commands.clear();
    }

    /// Bind a single command under the current policy
    pub fn set_action(&mut self, command: Command) {
        match self.policy {
            SelectionPolicy::PerHand => {
                self.primary = command;
                self.secondary = Command::none();
            }
            _ => self.commands = vec![command],
        }
    }

    pub fn press(&mut self, now: f64) {
        self.press_start_time = now;
        self.last_tick_time = now;
    }

    pub fn clear_press(&mut self) {
        self.press_start_time = -1.0;
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.press_start_time >= 0.0
    }

    /// Seconds the button has been held, if pressed
    pub fn held_for(&self, now: f64) -> Option<f64> {
        self.is_pressed().then(|| now - self.press_start_time)
    }

    /// One-line summary for logs
    pub fn describe(&self) -> String {
        let bound: Vec<String> = self
            .active_commands()
            .iter()
            .filter(|c| c.action != ActionKind::None)
            .map(|c| match c.action {
                ActionKind::ConsoleCommand => format!("console `{}`", c.console_text),
                action => format!("{:?} x{}", action, c.candidate_ids.len()),
            })
            .collect();

        format!(
            "'{}' at ({:.3}, {:.3}, {:.3}) r={:.3} {:?} [{}]",
            self.name,
            self.origin.x,
            self.origin.y,
            self.origin.z,
            self.radius,
            self.policy,
            if bound.is_empty() { "unbound".to_string() } else { bound.join(", ") }
        )
    }
}

/// Index of the first slot, in stored order, overlapping a sphere at `point`
pub fn find_overlap(slots: &[Quickslot], point: Vec3, radius: f32) -> Option<usize> {
    slots.iter().position(|slot| slot.overlaps(point, radius))
}
