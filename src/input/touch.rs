//! Touch event dispatch with per-id phase tracking.
//!
//! Every touch id with a pending "down" on the remote side stays in the
//! active set until explicitly released, so a quiescence pass can
//! cancel exactly those ids and no others. When the transport reports
//! the touch path unsupported for the first point of a frame, that
//! point falls back to pointer-move-then-click emulation.

use std::collections::BTreeSet;

use tracing::{trace, warn};

use crate::platform::{TouchPhase, TouchPoint};
use crate::transport::{
    ButtonAction, MouseButton, TouchEventKind, Transport, TransportError, ROTATION_UNKNOWN,
};

fn event_kind(phase: TouchPhase) -> TouchEventKind {
    match phase {
        TouchPhase::Start => TouchEventKind::Down,
        TouchPhase::Stay => TouchEventKind::Move,
        TouchPhase::End => TouchEventKind::Up,
        TouchPhase::None => TouchEventKind::Cancel,
    }
}

/// Tracks which touch ids are currently down on the remote side.
#[derive(Debug, Default)]
pub struct TouchTracker {
    active: BTreeSet<u32>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids currently held down, in ascending order.
    pub fn active_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.active.iter().copied()
    }

    /// Forward every reported touch point for this frame.
    ///
    /// Positions go out normalized to fractions of the viewport. The
    /// pointer-emulation fallback is evaluated for the frame's first
    /// point only.
    pub fn dispatch(
        &mut self,
        transport: &mut dyn Transport,
        touches: &[TouchPoint],
        viewport: (f32, f32),
    ) {
        let (width, height) = viewport;

        for (index, touch) in touches.iter().enumerate() {
            let kind = event_kind(touch.phase);

            match touch.phase {
                TouchPhase::Start | TouchPhase::Stay => {
                    self.active.insert(touch.id);
                }
                TouchPhase::End | TouchPhase::None => {
                    self.active.remove(&touch.id);
                }
            }

            let result = transport.send_touch(
                kind,
                touch.id,
                touch.x / width,
                touch.y / height,
                ROTATION_UNKNOWN,
            );

            match result {
                Ok(()) => {}
                Err(TransportError::Unsupported) if index == 0 => {
                    trace!("touch path unsupported, emulating pointer for id {}", touch.id);
                    self.emulate_pointer(transport, touch, viewport);
                }
                Err(e) => warn!("touch event for id {} dropped: {}", touch.id, e),
            }
        }
    }

    /// Move-the-cursor-and-click emulation for hosts without touch
    /// support.
    fn emulate_pointer(
        &mut self,
        transport: &mut dyn Transport,
        touch: &TouchPoint,
        viewport: (f32, f32),
    ) {
        if touch.phase != TouchPhase::None {
            if let Err(e) = transport.send_mouse_position(
                touch.x as i16,
                touch.y as i16,
                viewport.0 as i16,
                viewport.1 as i16,
            ) {
                warn!("fallback pointer position dropped: {}", e);
            }
        }
        if touch.phase == TouchPhase::Start {
            if let Err(e) = transport.send_mouse_button(ButtonAction::Press, MouseButton::Left) {
                warn!("fallback pointer press dropped: {}", e);
            }
        }
        if touch.phase == TouchPhase::End {
            if let Err(e) = transport.send_mouse_button(ButtonAction::Release, MouseButton::Left) {
                warn!("fallback pointer release dropped: {}", e);
            }
        }
    }

    /// Cancel every id still down on the remote side and forget them.
    pub fn cancel_all(&mut self, transport: &mut dyn Transport) {
        for id in std::mem::take(&mut self.active) {
            if let Err(e) = transport.send_touch(TouchEventKind::Cancel, id, 0.0, 0.0, ROTATION_UNKNOWN)
            {
                warn!("touch cancel for id {} dropped: {}", id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{KeyAction, MotionKind, SendResult, WireGamepadState};

    #[derive(Debug, PartialEq)]
    enum Sent {
        Touch(TouchEventKind, u32, i32, i32), // position in 1/1000ths
        Position(i16, i16),
        Button(ButtonAction, MouseButton),
    }

    #[derive(Default)]
    struct FakeTransport {
        sent: Vec<Sent>,
        touch_unsupported: bool,
    }

    impl Transport for FakeTransport {
        fn send_controller_arrival(&mut self, _: u8, _: u16, _: u8) -> SendResult {
            Ok(())
        }
        fn send_controller_state(&mut self, _: u8, _: u16, _: &WireGamepadState) -> SendResult {
            Ok(())
        }
        fn send_mouse_move(&mut self, _: i16, _: i16) -> SendResult {
            Ok(())
        }
        fn send_mouse_position(&mut self, x: i16, y: i16, _: i16, _: i16) -> SendResult {
            self.sent.push(Sent::Position(x, y));
            Ok(())
        }
        fn send_mouse_button(&mut self, action: ButtonAction, button: MouseButton) -> SendResult {
            self.sent.push(Sent::Button(action, button));
            Ok(())
        }
        fn send_scroll(&mut self, _: i8) -> SendResult {
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
        fn send_touch(
            &mut self,
            kind: TouchEventKind,
            id: u32,
            x: f32,
            y: f32,
            _: u16,
        ) -> SendResult {
            if self.touch_unsupported {
                return Err(TransportError::Unsupported);
            }
            self.sent
                .push(Sent::Touch(kind, id, (x * 1000.0) as i32, (y * 1000.0) as i32));
            Ok(())
        }
        fn send_motion(&mut self, _: u8, _: MotionKind, _: f32, _: f32, _: f32) -> SendResult {
            Ok(())
        }
    }

    fn point(id: u32, phase: TouchPhase) -> TouchPoint {
        TouchPoint {
            id,
            x: 640.0,
            y: 360.0,
            phase,
        }
    }

    const VIEWPORT: (f32, f32) = (1280.0, 720.0);

    #[test]
    fn phases_map_to_wire_event_kinds() {
        let mut transport = FakeTransport::default();
        let mut tracker = TouchTracker::new();

        tracker.dispatch(&mut transport, &[point(1, TouchPhase::Start)], VIEWPORT);
        tracker.dispatch(&mut transport, &[point(1, TouchPhase::Stay)], VIEWPORT);
        tracker.dispatch(&mut transport, &[point(1, TouchPhase::End)], VIEWPORT);

        assert_eq!(
            transport.sent,
            vec![
                Sent::Touch(TouchEventKind::Down, 1, 500, 500),
                Sent::Touch(TouchEventKind::Move, 1, 500, 500),
                Sent::Touch(TouchEventKind::Up, 1, 500, 500),
            ]
        );
        assert_eq!(tracker.active_ids().count(), 0);
    }

    #[test]
    fn active_set_tracks_down_ids() {
        let mut transport = FakeTransport::default();
        let mut tracker = TouchTracker::new();

        tracker.dispatch(
            &mut transport,
            &[point(7, TouchPhase::Start), point(3, TouchPhase::Stay)],
            VIEWPORT,
        );
        assert_eq!(tracker.active_ids().collect::<Vec<_>>(), vec![3, 7]);

        tracker.dispatch(&mut transport, &[point(7, TouchPhase::None)], VIEWPORT);
        assert_eq!(tracker.active_ids().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn unsupported_first_point_falls_back_to_pointer_emulation() {
        let mut transport = FakeTransport {
            touch_unsupported: true,
            ..FakeTransport::default()
        };
        let mut tracker = TouchTracker::new();

        tracker.dispatch(
            &mut transport,
            &[point(1, TouchPhase::Start), point(2, TouchPhase::Start)],
            VIEWPORT,
        );

        // Only the first point is emulated; the second is dropped.
        assert_eq!(
            transport.sent,
            vec![
                Sent::Position(640, 360),
                Sent::Button(ButtonAction::Press, MouseButton::Left),
            ]
        );
    }

    #[test]
    fn fallback_releases_on_end_phase() {
        let mut transport = FakeTransport {
            touch_unsupported: true,
            ..FakeTransport::default()
        };
        let mut tracker = TouchTracker::new();

        tracker.dispatch(&mut transport, &[point(1, TouchPhase::End)], VIEWPORT);

        assert_eq!(
            transport.sent,
            vec![
                Sent::Position(640, 360),
                Sent::Button(ButtonAction::Release, MouseButton::Left),
            ]
        );
    }

    #[test]
    fn cancel_all_cancels_each_id_once_then_forgets() {
        let mut transport = FakeTransport::default();
        let mut tracker = TouchTracker::new();

        tracker.dispatch(
            &mut transport,
            &[point(3, TouchPhase::Start), point(7, TouchPhase::Start)],
            VIEWPORT,
        );
        transport.sent.clear();

        tracker.cancel_all(&mut transport);
        assert_eq!(
            transport.sent,
            vec![
                Sent::Touch(TouchEventKind::Cancel, 3, 0, 0),
                Sent::Touch(TouchEventKind::Cancel, 7, 0, 0),
            ]
        );

        transport.sent.clear();
        tracker.cancel_all(&mut transport);
        assert!(transport.sent.is_empty());
    }
}
