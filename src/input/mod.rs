//! Session-scoped input pipeline.
//!
//! [`InputSession`] owns every cache the pipeline needs for one
//! streaming session and is the single entry point for both the
//! per-tick dispatch pass and the discrete platform callbacks. All of
//! it runs on one logical thread inside the host's frame loop; the only
//! state meant to be toggled from outside is the enable flag. A host
//! that delivers callbacks from another thread must wrap the session in
//! its own mutual exclusion.

pub mod analog;
pub mod dispatch;
pub mod gamepad;
pub mod mouse;
pub mod remap;
pub mod rumble;
pub mod touch;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, trace, warn};

use crate::config::{Settings, SettingsHandle};
use crate::keymap;
use crate::platform::{Axis, ControllerButton, InputSource, SensorKind, SensorSample};
use crate::transport::{ButtonAction, KeyAction, MotionKind, MouseButton, Transport};

use dispatch::{DiffDispatcher, MAX_CONTROLLERS};
use gamepad::{build_wire_state, GamepadShaping, SpecialLatch};
use mouse::{MouseSnapshot, PointerDispatcher};
use remap::RemapTable;
use rumble::RumbleCache;
use touch::TouchTracker;

/// Radians-per-second to degrees-per-second, for gyroscope samples.
const RAD_TO_DEG: f32 = 57.2957795;

/// One streaming session's input state.
///
/// Constructed at session start, reset or dropped at session end.
pub struct InputSession<S: InputSource, T: Transport> {
    source: S,
    transport: T,
    settings: SettingsHandle,
    remap: RemapTable,
    enabled: Arc<AtomicBool>,
    quiescent: bool,
    latches: [SpecialLatch; MAX_CONTROLLERS],
    gamepads: DiffDispatcher,
    pointer: PointerDispatcher,
    touch: TouchTracker,
    rumble: RumbleCache,
}

impl<S: InputSource, T: Transport> InputSession<S, T> {
    pub fn new(source: S, transport: T, settings: SettingsHandle) -> Self {
        let remap = RemapTable::from_layout(&settings.read().remap);
        info!("input session ready");
        Self {
            source,
            transport,
            settings,
            remap,
            enabled: Arc::new(AtomicBool::new(true)),
            quiescent: false,
            latches: [SpecialLatch::default(); MAX_CONTROLLERS],
            gamepads: DiffDispatcher::new(),
            pointer: PointerDispatcher::new(),
            touch: TouchTracker::new(),
            rumble: RumbleCache::new(),
        }
    }

    /// Shared flag gating all callback-driven dispatch. The host may
    /// toggle this from outside the tick loop.
    pub fn enabled_flag(&self) -> Arc<AtomicBool> {
        self.enabled.clone()
    }

    fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Whether the last quiescence pass fully succeeded.
    pub fn is_quiescent(&self) -> bool {
        self.quiescent
    }

    /// Rebuild the remap table after a configuration reload. The table
    /// is read-only for the duration of a tick.
    pub fn reload_remap(&mut self) {
        self.remap = RemapTable::from_layout(&self.settings.read().remap);
    }

    /// Clear every cache back to the session-start state.
    pub fn reset(&mut self) {
        self.gamepads.reset();
        self.pointer.reset();
        self.touch = TouchTracker::new();
        self.rumble.reset();
        self.latches = [SpecialLatch::default(); MAX_CONTROLLERS];
        self.quiescent = false;
    }

    /// Record a drag delta from an external gesture recognizer; it is
    /// consumed at most once on the next tick.
    pub fn set_pan_delta(&mut self, dx: f32, dy: f32) {
        self.pointer.set_pan_delta(dx, dy);
    }

    /// Run one dispatch tick inside the host's frame loop.
    ///
    /// `ignore_touch` suppresses pointer emulation and gesture
    /// consumption for this tick (on-screen keyboard case). Ticking
    /// always re-enables dispatch after a quiescence pass.
    pub fn tick(&mut self, ignore_touch: bool) {
        self.quiescent = false;
        let settings = self.settings.read().clone();

        let unified = self.remap.normalize(&self.source.unified_controller_state());
        let mouse = self.source.mouse_state();
        let touches = self.source.touch_states();

        // Sticks only assist the pointer while exactly one finger is on
        // the screen and dedicated touch mode is off.
        let pointer_emulation =
            !ignore_touch && !settings.touchscreen_mouse_mode && touches.len() == 1;

        self.handle_controllers(&settings, pointer_emulation);

        let mut snapshot = if settings.touchscreen_mouse_mode {
            MouseSnapshot {
                scroll: 0.0,
                left: mouse.left_button,
                middle: mouse.middle_button,
                right: mouse.right_button,
            }
        } else {
            let scroll = if pointer_emulation {
                unified.axis(Axis::LeftY) + unified.axis(Axis::RightY)
            } else {
                0.0
            };
            MouseSnapshot {
                scroll,
                left: (pointer_emulation && unified.button(ControllerButton::RightTrigger))
                    || mouse.left_button,
                middle: mouse.middle_button,
                right: (pointer_emulation && unified.button(ControllerButton::LeftTrigger))
                    || mouse.right_button,
            }
        };

        // Swaps happen before edge detection so transitions are
        // detected on what actually goes on the wire.
        if settings.swap_mouse_scroll {
            snapshot.scroll = -snapshot.scroll;
        }
        if settings.swap_mouse_buttons {
            std::mem::swap(&mut snapshot.left, &mut snapshot.right);
        }

        self.pointer
            .dispatch(&mut self.transport, snapshot, Instant::now());

        if settings.touchscreen_mouse_mode {
            let viewport = self.source.viewport_size();
            self.touch.dispatch(&mut self.transport, &touches, viewport);
        } else {
            if ignore_touch {
                return;
            }
            self.pointer
                .consume_pan(&mut self.transport, settings.pointer_multiplier());
        }
    }

    fn handle_controllers(&mut self, settings: &Settings, pointer_emulation: bool) {
        let count = self.source.connected_controller_count();
        self.gamepads.announce_arrivals(&mut self.transport, count);

        let shaping = GamepadShaping {
            left_deadzone: settings.deadzone_stick_left,
            right_deadzone: settings.deadzone_stick_right,
            layout: settings.face_button_layout,
            guide_combo: &settings.guide_combo,
        };

        for slot in 0..count.min(MAX_CONTROLLERS) {
            let normalized = self.remap.normalize(&self.source.controller_state(slot));
            let state = build_wire_state(
                &normalized,
                &shaping,
                &mut self.latches[slot],
                pointer_emulation,
            );
            self.gamepads
                .dispatch_slot(&mut self.transport, slot, count, state);
        }
    }

    /// Discrete callback: relative pointer motion from a real mouse.
    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        if !self.enabled() || self.quiescent {
            return;
        }
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let multiplier = self.settings.read().pointer_multiplier();
        if let Err(e) = self
            .transport
            .send_mouse_move((dx * multiplier) as i16, (dy * multiplier) as i16)
        {
            warn!("mouse move event dropped: {}", e);
        }
    }

    /// Discrete callback: high-resolution wheel deltas.
    pub fn handle_wheel(&mut self, dx: f32, dy: f32) {
        if !self.enabled() {
            return;
        }

        if dx != 0.0 {
            trace!("horizontal wheel: {}", dx);
            if let Err(e) = self.transport.send_high_res_hscroll(dx as i16) {
                warn!("horizontal wheel event dropped: {}", e);
            }
        }
        if dy != 0.0 {
            trace!("vertical wheel: {}", dy);
            if let Err(e) = self.transport.send_high_res_scroll(dy as i16) {
                warn!("vertical wheel event dropped: {}", e);
            }
        }
    }

    /// Discrete callback: keyboard key transition.
    pub fn handle_key(&mut self, key: i32, pressed: bool, modifiers: u8) {
        if !self.enabled() {
            return;
        }

        let vk = keymap::virtual_key(key);
        let action = if pressed {
            KeyAction::Down
        } else {
            KeyAction::Up
        };
        if let Err(e) = self.transport.send_keyboard(vk, action, modifiers) {
            warn!("keyboard event dropped: {}", e);
        }
    }

    /// Discrete callback: motion sensor sample.
    pub fn handle_sensor(&mut self, sample: SensorSample) {
        if !self.enabled() {
            return;
        }

        let [x, y, z] = sample.values;
        let result = match sample.kind {
            SensorKind::Accelerometer => {
                self.transport
                    .send_motion(sample.slot, MotionKind::Accel, x, y, z)
            }
            SensorKind::Gyroscope => self.transport.send_motion(
                sample.slot,
                MotionKind::Gyro,
                x * RAD_TO_DEG,
                y * RAD_TO_DEG,
                z * RAD_TO_DEG,
            ),
        };
        if let Err(e) = result {
            warn!("motion event dropped: {}", e);
        }
    }

    /// Host-issued main-motor rumble request.
    pub fn handle_rumble(&mut self, slot: u8, low_freq: u16, high_freq: u16) {
        if !self.enabled() {
            return;
        }
        let multiplier = self.settings.read().rumble_force;
        self.rumble
            .handle_rumble(&mut self.source, slot, low_freq, high_freq, multiplier);
    }

    /// Host-issued trigger-motor rumble request.
    pub fn handle_rumble_triggers(&mut self, slot: u8, left_trigger: u16, right_trigger: u16) {
        if !self.enabled() {
            return;
        }
        let multiplier = self.settings.read().rumble_force;
        self.rumble.handle_rumble_triggers(
            &mut self.source,
            slot,
            left_trigger,
            right_trigger,
            multiplier,
        );
    }

    /// Synthetic left click for host UI affordances.
    pub fn left_mouse_click(&mut self) {
        for action in [ButtonAction::Press, ButtonAction::Release] {
            if let Err(e) = self.transport.send_mouse_button(action, MouseButton::Left) {
                warn!("synthetic left click dropped: {}", e);
            }
        }
    }

    /// Synthetic right click for host UI affordances.
    pub fn right_mouse_click(&mut self) {
        for action in [ButtonAction::Press, ButtonAction::Release] {
            if let Err(e) = self.transport.send_mouse_button(action, MouseButton::Right) {
                warn!("synthetic right click dropped: {}", e);
            }
        }
    }

    /// Quiescence pass: guarantee nothing stays held on the remote
    /// side. Idempotent; a second call while already quiescent does
    /// nothing. The quiescent flag sticks only if every controller
    /// release was accepted, so a caller can retry on a later tick.
    pub fn drop_input(&mut self) {
        if self.quiescent {
            return;
        }

        let count = self.source.connected_controller_count();
        let all_released = self.gamepads.release_all(&mut self.transport, count);

        self.pointer.release_left(&mut self.transport);
        self.touch.cancel_all(&mut self.transport);

        for key in keymap::KEY_SPACE..keymap::KEY_LAST {
            let vk = keymap::virtual_key(key);
            if let Err(e) = self.transport.send_keyboard(vk, KeyAction::Up, 0) {
                trace!("key-up sweep event dropped: {}", e);
            }
        }

        self.quiescent = all_released;
    }

    /// Borrow the transport, mainly for inspection in tests.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Borrow the platform source, mainly for inspection in tests.
    pub fn source(&self) -> &S {
        &self.source
    }
}
