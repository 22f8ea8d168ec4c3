//! Force-feedback cache for host-issued rumble commands.
//!
//! The host drives the main motors and the trigger motors through two
//! independent entry points. Each one overwrites only its own motor
//! pair in the cache, so a combined four-motor command can always be
//! issued with the most recent values of the other pair.

use tracing::debug;

use crate::input::dispatch::MAX_CONTROLLERS;
use crate::platform::InputSource;

/// Last scaled magnitudes per motor, one entry per controller slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotorState {
    pub low_freq: u16,
    pub high_freq: u16,
    pub left_trigger: u16,
    pub right_trigger: u16,
}

/// Per-slot rumble cache.
#[derive(Debug, Default)]
pub struct RumbleCache {
    motors: [MotorState; MAX_CONTROLLERS],
}

fn scale(magnitude: u16, multiplier: f32) -> u16 {
    (magnitude as f32 * multiplier) as u16
}

impl RumbleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Handle a main-motor request: cache the scaled low/high pair and
    /// forward a two-motor command.
    pub fn handle_rumble(
        &mut self,
        source: &mut dyn InputSource,
        slot: u8,
        low_freq: u16,
        high_freq: u16,
        multiplier: f32,
    ) {
        let Some(entry) = self.motors.get_mut(slot as usize) else {
            return;
        };

        debug!("rumble #{}: {} {}", slot, low_freq, high_freq);
        entry.low_freq = scale(low_freq, multiplier);
        entry.high_freq = scale(high_freq, multiplier);

        source.rumble(slot, entry.low_freq, entry.high_freq);
    }

    /// Handle a trigger-motor request: cache the scaled left/right pair
    /// and forward a four-motor command combining the last main-motor
    /// values (zero if none were ever cached).
    pub fn handle_rumble_triggers(
        &mut self,
        source: &mut dyn InputSource,
        slot: u8,
        left_trigger: u16,
        right_trigger: u16,
        multiplier: f32,
    ) {
        let Some(entry) = self.motors.get_mut(slot as usize) else {
            return;
        };

        debug!("trigger rumble #{}: {} {}", slot, left_trigger, right_trigger);
        entry.left_trigger = scale(left_trigger, multiplier);
        entry.right_trigger = scale(right_trigger, multiplier);

        source.rumble_triggers(
            slot,
            entry.low_freq,
            entry.high_freq,
            entry.left_trigger,
            entry.right_trigger,
        );
    }
}
