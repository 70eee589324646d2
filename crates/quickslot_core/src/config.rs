//! Quickslot configuration store
//!
//! One TOML document holds the global options and the slot list.
//! Loading and saving happen at checkpoints, never on the frame path.
//!
//! # Format
//!
//! ```toml
//! [options]
//! controller_radius = 0.1
//! activate_button = "trigger"
//! long_press_time = 1.0
//!
//! [[quickslot]]
//! name = "Left hip"
//! position = [-0.25, -0.6, 0.0]
//! radius = 0.1
//! policy = "per_hand"
//!
//!   [[quickslot.command]]
//!   action = "equip_item"
//!   hand = "right"
//!   ids = ["00012EB7"]
//!
//!   [[quickslot.command]]
//!   action = "equip_other"
//!   [quickslot.command.filter]
//!   category = "potion"
//!   potion = "healing"
//! ```

use crate::command::{ActionKind, Command, SelectionPolicy};
use crate::error::{ConfigError, ConfigResult};
use crate::interaction::PressTiming;
use crate::slot::Quickslot;
use log::LevelFilter;
use quickslot_catalog::{CategoryFilter, FormId, GameWorld, HandSlot};
use quickslot_math::Vec3;
use quickslot_xr::VrButton;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalOptions {
    /// Sphere radius around each controller
    pub controller_radius: f32,
    /// Radius for slots that do not set one
    pub default_radius: f32,
    /// Button that activates slots
    pub activate_button: VrButton,
    /// Base haptic strength, 0..=1
    pub haptic_strength: f32,
    /// Pulse while hovering a slot
    pub hover_haptics: bool,
    /// Seconds between hover pulses
    pub hover_haptic_interval: f32,
    /// Hover pulse length in seconds
    pub hover_haptic_duration: f32,
    /// Hold time before tick pulses start
    pub short_press_time: f32,
    /// Hold time that triggers edit mode
    pub long_press_time: f32,
    /// Long press may bind unbound slots
    pub allow_edit_slots: bool,
    /// Plugins whose spells and shouts skip the knowledge check
    pub always_allowed_sources: Vec<String>,
    /// 0 = off, 1 = info, 2 = debug, 3+ = trace
    pub debug_log_level: u32,
}

impl Default for GlobalOptions {
    fn default() -> Self {
        Self {
            controller_radius: 0.1,
            default_radius: 0.1,
            activate_button: VrButton::Trigger,
            haptic_strength: 0.5,
            hover_haptics: true,
            hover_haptic_interval: 1.0,
            hover_haptic_duration: 0.05,
            short_press_time: 0.25,
            long_press_time: 1.0,
            allow_edit_slots: true,
            always_allowed_sources: Vec::new(),
            debug_log_level: 0,
        }
    }
}

impl GlobalOptions {
    /// Log filter for `debug_log_level`
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.debug_log_level {
            0 => LevelFilter::Off,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Hold thresholds
    pub fn timing(&self) -> PressTiming {
        PressTiming::new(f64::from(self.short_press_time), f64::from(self.long_press_time))
    }

    fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("controller_radius", self.controller_radius),
            ("default_radius", self.default_radius),
            ("hover_haptic_interval", self.hover_haptic_interval),
            ("hover_haptic_duration", self.hover_haptic_duration),
            ("short_press_time", self.short_press_time),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation(format!("{} must be non-negative, got {}", name, value)));
            }
        }
        if !(0.0..=1.0).contains(&self.haptic_strength) {
            return Err(ConfigError::Validation(format!(
                "haptic_strength must be within 0..=1, got {}",
                self.haptic_strength
            )));
        }
        if self.long_press_time <= self.short_press_time {
            return Err(ConfigError::Validation(format!(
                "long_press_time ({}) must exceed short_press_time ({})",
                self.long_press_time, self.short_press_time
            )));
        }
        Ok(())
    }
}

/// One persisted command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub action: ActionKind,
    #[serde(default)]
    pub hand: HandSlot,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<FormId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<CategoryFilter>,
}

fn default_count() -> u32 {
    1
}

impl CommandConfig {
    /// Build a runtime command, resolving the filter against the catalog
    pub fn to_command(&self, world: &dyn GameWorld) -> Command {
        let mut command = Command::new(self.action)
            .with_hand(self.hand)
            .with_ids(self.ids.iter().copied())
            .with_console_text(self.text.clone())
            .with_count(self.count);

        if let Some(filter) = &self.filter {
            command = command.with_filter(filter.clone());
        }
        command.resolve_candidates(world);
        command
    }

    /// Persistable form of a runtime command
    pub fn from_command(command: &Command) -> Self {
        Self {
            action: command.action,
            hand: command.hand,
            ids: command.ids.clone(),
            text: command.console_text.clone(),
            count: command.count,
            filter: command.filter.clone(),
        }
    }
}

/// One persisted slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    #[serde(default)]
    pub name: String,
    /// Headset-relative origin
    pub position: [f32; 3],
    /// Falls back to `default_radius`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(default)]
    pub policy: SelectionPolicy,
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandConfig>,
}

impl SlotConfig {
    /// Build a runtime slot. A `per_hand` slot takes its first two
    /// commands as primary and secondary; any further ones are ignored.
    pub fn to_slot(&self, default_radius: f32, world: &dyn GameWorld) -> Quickslot {
        let mut slot = Quickslot::new(
            self.name.clone(),
            Vec3::from_array(self.position),
            self.radius.unwrap_or(default_radius),
        )
        .with_policy(self.policy);

        let mut commands = self.commands.iter().map(|c| c.to_command(world));

        match self.policy {
            SelectionPolicy::PerHand => {
                slot.primary = commands.next().unwrap_or_default();
                slot.secondary = commands.next().unwrap_or_default();
                if self.commands.len() > 2 {
                    log::warn!(
                        "Slot '{}' is per_hand but lists {} commands; extras ignored",
                        self.name,
                        self.commands.len()
                    );
                }
            }
            _ => slot.commands = commands.collect(),
        }

        slot
    }

    /// Persistable form of a runtime slot
    pub fn from_slot(slot: &Quickslot) -> Self {
        let commands = match slot.policy {
            SelectionPolicy::PerHand if slot.secondary.is_bound() => vec![
                CommandConfig::from_command(&slot.primary),
                CommandConfig::from_command(&slot.secondary),
            ],
            SelectionPolicy::PerHand => vec![CommandConfig::from_command(&slot.primary)],
            _ => slot.commands.iter().map(CommandConfig::from_command).collect(),
        };

        Self {
            name: slot.name.clone(),
            position: slot.origin.to_array(),
            radius: Some(slot.radius),
            policy: slot.policy,
            commands,
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if !Vec3::from_array(self.position).is_finite() {
            return Err(ConfigError::Validation(format!("Slot '{}' has a non-finite position", self.name)));
        }
        if let Some(radius) = self.radius {
            if !radius.is_finite() || radius < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "Slot '{}' radius must be non-negative, got {}",
                    self.name, radius
                )));
            }
        }
        for command in &self.commands {
            if command.action == ActionKind::ConsoleCommand && command.text.trim().is_empty() {
                log::warn!("Slot '{}' has a console command with no text", self.name);
            }
        }
        Ok(())
    }
}

/// Complete persisted configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickslotConfig {
    #[serde(default)]
    pub options: GlobalOptions,
    #[serde(default, rename = "quickslot")]
    pub slots: Vec<SlotConfig>,
}

impl QuickslotConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load from a file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            log::error!("Failed to read quickslot config {:?}: {}", path, source);
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded {} quickslots from {:?}", config.slots.len(), path);
        Ok(config)
    }

    /// Save to a file
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| {
            log::error!("Failed to write quickslot config {:?}: {}", path, source);
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        log::info!("Saved {} quickslots to {:?}", self.slots.len(), path);
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        self.options.validate()?;
        self.slots.iter().try_for_each(SlotConfig::validate)
    }
}
