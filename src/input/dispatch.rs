//! Diff-based controller state dispatch.
//!
//! Owns the last-sent cache and transmits a combined controller state
//! event only when a slot's packed state actually changed. The cache is
//! updated only on a successful send, so a rejected frame is retried as
//! soon as the state differs again.

use tracing::{debug, warn};

use crate::transport::{
    Transport, WireGamepadState, CAP_ACCEL, CAP_GYRO, CAP_RUMBLE, CAP_TRIGGER_RUMBLE,
};

/// Maximum number of controller slots tracked per session.
pub const MAX_CONTROLLERS: usize = 4;

/// Bitmask of currently-mapped controller slots.
pub fn active_slot_mask(count: usize) -> u16 {
    match count {
        0 => 0x0,
        1 => 0x1,
        2 => 0x3,
        3 => 0x7,
        _ => 0xF,
    }
}

/// Diff & dispatch engine for controller state traffic.
#[derive(Debug, Default)]
pub struct DiffDispatcher {
    last_sent: [WireGamepadState; MAX_CONTROLLERS],
    last_count: usize,
}

impl DiffDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the zero state, as at session start.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Re-announce arrival and capabilities for every connected slot if
    /// the connected-controller count changed since the last tick.
    ///
    /// Runs before diffed state dispatch so the host learns about new
    /// controllers before their first state frame.
    pub fn announce_arrivals(&mut self, transport: &mut dyn Transport, count: usize) {
        if count == self.last_count {
            return;
        }
        self.last_count = count;

        let mask = active_slot_mask(count);
        for slot in 0..count {
            debug!("announcing capabilities for controller #{}", slot);
            if let Err(e) = transport.send_controller_arrival(
                slot as u8,
                mask,
                CAP_RUMBLE | CAP_TRIGGER_RUMBLE | CAP_ACCEL | CAP_GYRO,
            ) {
                warn!("controller #{} arrival event dropped: {}", slot, e);
            }
        }
    }

    /// Transmit one slot's state if it differs byte-for-byte from the
    /// last successfully sent state.
    pub fn dispatch_slot(
        &mut self,
        transport: &mut dyn Transport,
        slot: usize,
        count: usize,
        state: WireGamepadState,
    ) {
        if slot >= MAX_CONTROLLERS {
            return;
        }
        if state == self.last_sent[slot] {
            return;
        }

        match transport.send_controller_state(slot as u8, active_slot_mask(count), &state) {
            Ok(()) => self.last_sent[slot] = state,
            Err(e) => warn!("controller #{} state event dropped: {}", slot, e),
        }
    }

    /// Send a zeroed state for every connected slot, releasing all
    /// buttons, triggers, and sticks on the remote side.
    ///
    /// Returns true only if every transmission succeeded; failed slots
    /// keep their cached state so the next pass retries them.
    pub fn release_all(&mut self, transport: &mut dyn Transport, count: usize) -> bool {
        let mask = active_slot_mask(count);
        let mut all_ok = true;

        for slot in 0..count.min(MAX_CONTROLLERS) {
            let zero = WireGamepadState::default();
            match transport.send_controller_state(slot as u8, mask, &zero) {
                Ok(()) => self.last_sent[slot] = zero,
                Err(e) => {
                    warn!("controller #{} release dropped: {}", slot, e);
                    all_ok = false;
                }
            }
        }

        all_ok
    }
}
