//! Pointer button, scroll, and drag-gesture dispatch.
//!
//! Button state is compared edge-wise against the previous tick so
//! only transitions hit the wire. Scroll is rate-limited with a period
//! that shrinks as the accumulated magnitude grows; the emitted value
//! is always a direction, never a magnitude.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::transport::{ButtonAction, MouseButton, Transport};

/// Shaped pointer state for one tick, after the special-mode
/// substitution and the configured swaps have been applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseSnapshot {
    pub scroll: f32,
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

/// Emission interval in milliseconds for a given scroll magnitude.
///
/// Larger magnitudes repeat sooner; |v| = 1 bottoms out at 50ms.
fn scroll_interval_ms(value: f32) -> f32 {
    550.0 - value.abs() * 500.0
}

/// Edge-detecting pointer dispatcher with scroll throttling and the
/// once-per-tick pan delta slot.
#[derive(Debug, Default)]
pub struct PointerDispatcher {
    last: MouseSnapshot,
    last_scroll_emit: Option<Instant>,
    pan: Option<(f32, f32)>,
}

impl PointerDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset edge-detection and throttle state, as at session start.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record a pending drag delta from an external gesture source.
    /// Overwrites any delta not yet consumed this tick.
    pub fn set_pan_delta(&mut self, dx: f32, dy: f32) {
        self.pan = Some((dx, dy));
    }

    /// Emit press/release transitions and a throttled scroll tick.
    pub fn dispatch(&mut self, transport: &mut dyn Transport, state: MouseSnapshot, now: Instant) {
        if state.left != self.last.left {
            self.last.left = state.left;
            let action = if state.left {
                ButtonAction::Press
            } else {
                ButtonAction::Release
            };
            if let Err(e) = transport.send_mouse_button(action, MouseButton::Left) {
                warn!("left pointer button event dropped: {}", e);
            }
            if !state.left {
                debug!("released left pointer button");
            }
        }

        if state.middle != self.last.middle {
            self.last.middle = state.middle;
            let action = if state.middle {
                ButtonAction::Press
            } else {
                ButtonAction::Release
            };
            if let Err(e) = transport.send_mouse_button(action, MouseButton::Middle) {
                warn!("middle pointer button event dropped: {}", e);
            }
        }

        if state.right != self.last.right {
            self.last.right = state.right;
            let action = if state.right {
                ButtonAction::Press
            } else {
                ButtonAction::Release
            };
            if let Err(e) = transport.send_mouse_button(action, MouseButton::Right) {
                warn!("right pointer button event dropped: {}", e);
            }
        }

        if state.scroll != 0.0 && self.scroll_due(state.scroll, now) {
            self.last_scroll_emit = Some(now);
            self.last.scroll = state.scroll;
            let direction = if state.scroll > 0.0 { 1 } else { -1 };
            trace!("scroll tick: {}", direction);
            if let Err(e) = transport.send_scroll(direction) {
                warn!("scroll event dropped: {}", e);
            }
        }
    }

    fn scroll_due(&self, value: f32, now: Instant) -> bool {
        match self.last_scroll_emit {
            None => true,
            Some(t) => {
                let elapsed_ms = now.duration_since(t).as_secs_f32() * 1000.0;
                elapsed_ms >= scroll_interval_ms(value)
            }
        }
    }

    /// Consume the pending drag delta, if any, scaled by the pointer
    /// multiplier. At most one delta is dispatched per tick.
    pub fn consume_pan(&mut self, transport: &mut dyn Transport, multiplier: f32) {
        if let Some((dx, dy)) = self.pan.take() {
            // Drag moves the content, so the pointer goes the other way
            if let Err(e) =
                transport.send_mouse_move((-dx * multiplier) as i16, (-dy * multiplier) as i16)
            {
                warn!("pan move event dropped: {}", e);
            }
        }
    }

    /// Force-release the emulated left button during a quiescence pass.
    pub fn release_left(&mut self, transport: &mut dyn Transport) {
        self.last.left = false;
        if let Err(e) = transport.send_mouse_button(ButtonAction::Release, MouseButton::Left) {
            warn!("left pointer button release dropped: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{
        KeyAction, MotionKind, SendResult, TouchEventKind, WireGamepadState,
    };
    use std::time::Duration;

    #[derive(Debug, PartialEq)]
    enum Sent {
        Button(ButtonAction, MouseButton),
        Scroll(i8),
        Move(i16, i16),
    }

    #[derive(Default)]
    struct FakeTransport {
        sent: Vec<Sent>,
    }

    impl Transport for FakeTransport {
        fn send_controller_arrival(&mut self, _: u8, _: u16, _: u8) -> SendResult {
            Ok(())
        }
        fn send_controller_state(&mut self, _: u8, _: u16, _: &WireGamepadState) -> SendResult {
            Ok(())
        }
        fn send_mouse_move(&mut self, dx: i16, dy: i16) -> SendResult {
            self.sent.push(Sent::Move(dx, dy));
            Ok(())
        }
        fn send_mouse_position(&mut self, _: i16, _: i16, _: i16, _: i16) -> SendResult {
            Ok(())
        }
        fn send_mouse_button(&mut self, action: ButtonAction, button: MouseButton) -> SendResult {
            self.sent.push(Sent::Button(action, button));
            Ok(())
        }
        fn send_scroll(&mut self, direction: i8) -> SendResult {
            self.sent.push(Sent::Scroll(direction));
            Ok(())
        }
        fn send_high_res_scroll(&mut self, _: i16) -> SendResult {
            Ok(())
        }
        fn send_high_res_hscroll(&mut self, _: i16) -> SendResult {
            Ok(())
        }
        fn send_keyboard(&mut self, _: i16, _: KeyAction, _: u8) -> SendResult {
            Ok(())
        }
        fn send_touch(&mut self, _: TouchEventKind, _: u32, _: f32, _: f32, _: u16) -> SendResult {
            Ok(())
        }
        fn send_motion(&mut self, _: u8, _: MotionKind, _: f32, _: f32, _: f32) -> SendResult {
            Ok(())
        }
    }

    fn pressed_left() -> MouseSnapshot {
        MouseSnapshot {
            left: true,
            ..MouseSnapshot::default()
        }
    }

    #[test]
    fn button_events_fire_only_on_transitions() {
        let mut transport = FakeTransport::default();
        let mut pointer = PointerDispatcher::new();
        let now = Instant::now();

        pointer.dispatch(&mut transport, pressed_left(), now);
        pointer.dispatch(&mut transport, pressed_left(), now);
        pointer.dispatch(&mut transport, MouseSnapshot::default(), now);

        assert_eq!(
            transport.sent,
            vec![
                Sent::Button(ButtonAction::Press, MouseButton::Left),
                Sent::Button(ButtonAction::Release, MouseButton::Left),
            ]
        );
    }

    #[test]
    fn scroll_throttle_honors_magnitude_scaled_interval() {
        let mut transport = FakeTransport::default();
        let mut pointer = PointerDispatcher::new();
        let base = Instant::now();

        let state = MouseSnapshot {
            scroll: 0.5,
            ..MouseSnapshot::default()
        };
        // |v| = 0.5 -> interval 300ms
        let interval = Duration::from_millis(300);

        // First emission always goes out.
        pointer.dispatch(&mut transport, state, base);
        // Immediate repeat suppressed.
        pointer.dispatch(&mut transport, state, base);
        // At exactly the interval the next one is due.
        pointer.dispatch(&mut transport, state, base + interval);

        assert_eq!(transport.sent, vec![Sent::Scroll(1), Sent::Scroll(1)]);
    }

    #[test]
    fn scroll_emits_direction_not_magnitude() {
        let mut transport = FakeTransport::default();
        let mut pointer = PointerDispatcher::new();

        let state = MouseSnapshot {
            scroll: -1.7,
            ..MouseSnapshot::default()
        };
        pointer.dispatch(&mut transport, state, Instant::now());
        assert_eq!(transport.sent, vec![Sent::Scroll(-1)]);
    }

    #[test]
    fn pan_is_consumed_once_and_scaled() {
        let mut transport = FakeTransport::default();
        let mut pointer = PointerDispatcher::new();

        pointer.set_pan_delta(10.0, -4.0);
        pointer.consume_pan(&mut transport, 2.0);
        pointer.consume_pan(&mut transport, 2.0); // nothing pending

        assert_eq!(transport.sent, vec![Sent::Move(-20, 8)]);
    }

    #[test]
    fn release_left_resets_edge_state() {
        let mut transport = FakeTransport::default();
        let mut pointer = PointerDispatcher::new();
        let now = Instant::now();

        pointer.dispatch(&mut transport, pressed_left(), now);
        pointer.release_left(&mut transport);
        // Pressing again after the forced release is a fresh transition.
        pointer.dispatch(&mut transport, pressed_left(), now);

        assert_eq!(
            transport.sent,
            vec![
                Sent::Button(ButtonAction::Press, MouseButton::Left),
                Sent::Button(ButtonAction::Release, MouseButton::Left),
                Sent::Button(ButtonAction::Press, MouseButton::Left),
            ]
        );
    }
}
