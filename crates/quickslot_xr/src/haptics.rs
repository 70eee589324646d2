//! Deadline-based haptic scheduling
//!
//! Runtimes only emit a very short burst per pulse call, so a pulse of a
//! given duration is modeled as a deadline: every frame the scheduler
//! re-issues the pulse for each controller whose deadline has not passed.
//! Nothing here sleeps.

use crate::{Hand, HapticsBackend};

#[derive(Clone, Copy, Debug, Default)]
struct HapticChannel {
    strength: f32,
    /// Absolute time the pulse stops; negative when idle
    expires_at: f64,
}

impl HapticChannel {
    const IDLE: Self = Self { strength: 0.0, expires_at: -1.0 };

    fn is_active(&self, now: f64) -> bool {
        self.expires_at >= 0.0 && now < self.expires_at
    }
}

/// Per-controller haptic deadlines
#[derive(Clone, Debug)]
pub struct HapticScheduler {
    channels: [HapticChannel; 2],
    /// Backend reported ready on the last tick
    backend_ready: bool,
    /// Discovery failure already logged
    reported_unavailable: bool,
}

impl HapticScheduler {
    /// Create an idle scheduler
    pub fn new() -> Self {
        Self {
            channels: [HapticChannel::IDLE; 2],
            backend_ready: false,
            reported_unavailable: false,
        }
    }

    /// Start or extend a pulse on one controller.
    ///
    /// An overlapping request keeps the later deadline and the stronger
    /// strength so a weak hover cue never truncates an edit-mode pulse.
    pub fn schedule(&mut self, hand: Hand, strength: f32, duration: f32, now: f64) {
        if duration <= 0.0 || strength <= 0.0 {
            return;
        }

        let strength = strength.min(1.0);
        let expires_at = now + f64::from(duration);
        let channel = &mut self.channels[hand.index()];

        if channel.is_active(now) {
            channel.strength = channel.strength.max(strength);
            channel.expires_at = channel.expires_at.max(expires_at);
        } else {
            *channel = HapticChannel { strength, expires_at };
        }
    }

    /// Whether a pulse is in flight on a controller
    pub fn is_active(&self, hand: Hand, now: f64) -> bool {
        self.channels[hand.index()].is_active(now)
    }

    /// Whether the backend was usable on the last tick
    pub fn backend_ready(&self) -> bool {
        self.backend_ready
    }

    /// Cancel all pending pulses
    pub fn clear(&mut self) {
        self.channels = [HapticChannel::IDLE; 2];
    }

    /// Advance one frame: expire finished pulses and re-issue live ones.
    ///
    /// Until the backend is ready, discovery is retried every call and
    /// pulses are dropped on expiry as usual.
    pub fn tick(&mut self, now: f64, backend: &mut dyn HapticsBackend) {
        if !backend.is_ready() {
            match backend.try_init() {
                Ok(()) => {
                    log::info!("Haptics backend initialized");
                    self.reported_unavailable = false;
                }
                Err(e) => {
                    if !self.reported_unavailable {
                        log::debug!("Haptics backend unavailable, retrying each frame: {}", e);
                        self.reported_unavailable = true;
                    }
                }
            }
        }
        self.backend_ready = backend.is_ready();

        for hand in Hand::BOTH {
            let channel = &mut self.channels[hand.index()];
            if !channel.is_active(now) {
                *channel = HapticChannel::IDLE;
                continue;
            }

            if self.backend_ready {
                let remaining = (channel.expires_at - now) as f32;
                backend.pulse(hand, channel.strength, remaining);
            }
        }
    }
}

impl Default for HapticScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::XrError;

    #[derive(Default)]
    struct RecordingBackend {
        ready: bool,
        init_attempts: u32,
        ready_after: u32,
        pulses: Vec<(Hand, f32)>,
    }

    impl HapticsBackend for RecordingBackend {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn try_init(&mut self) -> Result<(), XrError> {
            self.init_attempts += 1;
            if self.init_attempts >= self.ready_after {
                self.ready = true;
                Ok(())
            } else {
                Err(XrError::NotInitialized)
            }
        }

        fn pulse(&mut self, hand: Hand, strength: f32, _duration_hint: f32) {
            self.pulses.push((hand, strength));
        }
    }

    fn ready_backend() -> RecordingBackend {
        RecordingBackend { ready: true, ..Default::default() }
    }

    #[test]
    fn test_pulse_repeats_until_deadline() {
        let mut scheduler = HapticScheduler::new();
        let mut backend = ready_backend();

        scheduler.schedule(Hand::Right, 0.5, 0.1, 0.0);
        scheduler.tick(0.0, &mut backend);
        scheduler.tick(0.05, &mut backend);
        scheduler.tick(0.15, &mut backend);
        scheduler.tick(0.2, &mut backend);

        assert_eq!(backend.pulses, vec![(Hand::Right, 0.5), (Hand::Right, 0.5)]);
        assert!(!scheduler.is_active(Hand::Right, 0.2));
    }

    #[test]
    fn test_overlapping_requests_keep_stronger_and_later() {
        let mut scheduler = HapticScheduler::new();
        let mut backend = ready_backend();

        scheduler.schedule(Hand::Left, 0.9, 0.5, 0.0);
        scheduler.schedule(Hand::Left, 0.2, 0.05, 0.1);
        scheduler.tick(0.3, &mut backend);

        assert_eq!(backend.pulses, vec![(Hand::Left, 0.9)]);
        assert!(scheduler.is_active(Hand::Left, 0.45));
        assert!(!scheduler.is_active(Hand::Right, 0.0));
    }

    #[test]
    fn test_backend_discovery_retried() {
        let mut scheduler = HapticScheduler::new();
        let mut backend = RecordingBackend { ready_after: 3, ..Default::default() };

        scheduler.schedule(Hand::Right, 1.0, 10.0, 0.0);
        scheduler.tick(0.0, &mut backend);
        scheduler.tick(0.1, &mut backend);
        assert!(!scheduler.backend_ready());
        assert!(backend.pulses.is_empty());

        scheduler.tick(0.2, &mut backend);
        assert!(scheduler.backend_ready());
        assert_eq!(backend.init_attempts, 3);
        assert_eq!(backend.pulses.len(), 1);
    }

    #[test]
    fn test_ignores_empty_requests_and_clear() {
        let mut scheduler = HapticScheduler::new();
        scheduler.schedule(Hand::Right, 0.0, 1.0, 0.0);
        scheduler.schedule(Hand::Left, 1.0, 0.0, 0.0);
        assert!(!scheduler.is_active(Hand::Right, 0.0));
        assert!(!scheduler.is_active(Hand::Left, 0.0));

        scheduler.schedule(Hand::Left, 1.0, 1.0, 0.0);
        scheduler.clear();
        assert!(!scheduler.is_active(Hand::Left, 0.5));
    }
}
