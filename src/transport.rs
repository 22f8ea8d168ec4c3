//! Streaming transport interface and wire-level constants.
//!
//! The transport is the client library that carries input events to the
//! remote host. Every send is synchronous, non-blocking, and reports
//! per-call success or failure; callers log failures and move on. The
//! diff cache in [`crate::input::dispatch`] guarantees that a dropped
//! controller frame is retried on the next differing tick.

use thiserror::Error;

/// D-pad up.
pub const UP_FLAG: u32 = 0x0001;
/// D-pad down.
pub const DOWN_FLAG: u32 = 0x0002;
/// D-pad left.
pub const LEFT_FLAG: u32 = 0x0004;
/// D-pad right.
pub const RIGHT_FLAG: u32 = 0x0008;
/// Start / play button.
pub const PLAY_FLAG: u32 = 0x0010;
/// Back / select button.
pub const BACK_FLAG: u32 = 0x0020;
/// Left stick click.
pub const LS_CLK_FLAG: u32 = 0x0040;
/// Right stick click.
pub const RS_CLK_FLAG: u32 = 0x0080;
/// Left bumper.
pub const LB_FLAG: u32 = 0x0100;
/// Right bumper.
pub const RB_FLAG: u32 = 0x0200;
/// Guide / special button. When set via the guide combo, all other
/// state in the packed frame is zeroed.
pub const SPECIAL_FLAG: u32 = 0x0400;
/// Face button A.
pub const A_FLAG: u32 = 0x1000;
/// Face button B.
pub const B_FLAG: u32 = 0x2000;
/// Face button X.
pub const X_FLAG: u32 = 0x4000;
/// Face button Y.
pub const Y_FLAG: u32 = 0x8000;

/// Controller capability: rumble motors.
pub const CAP_RUMBLE: u8 = 0x02;
/// Controller capability: trigger rumble motors.
pub const CAP_TRIGGER_RUMBLE: u8 = 0x04;
/// Controller capability: accelerometer.
pub const CAP_ACCEL: u8 = 0x10;
/// Controller capability: gyroscope.
pub const CAP_GYRO: u8 = 0x20;

/// Touch rotation is never reported by the local platform layer.
pub const ROTATION_UNKNOWN: u16 = 0xFFFF;

/// Keyboard event direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyAction {
    Down = 0x03,
    Up = 0x04,
}

/// Pointer button event direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ButtonAction {
    Press = 0x07,
    Release = 0x08,
}

/// Pointer button identity on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MouseButton {
    Left = 0x01,
    Middle = 0x02,
    Right = 0x03,
}

/// Touch event type on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TouchEventKind {
    Down = 0x01,
    Up = 0x02,
    Move = 0x03,
    Cancel = 0x04,
}

/// Motion sensor event type on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MotionKind {
    Accel = 0x01,
    Gyro = 0x02,
}

/// Packed per-controller state as it goes on the wire.
///
/// Byte-for-byte equality is what the diff dispatcher keys on: two
/// consecutive identical values for a slot produce zero traffic.
/// Y axes are already inverted at packing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireGamepadState {
    pub button_flags: u32,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub left_stick_x: i16,
    pub left_stick_y: i16,
    pub right_stick_x: i16,
    pub right_stick_y: i16,
}

/// Transport-level send failure.
///
/// No variant is fatal; the worst outcome of any of these is that this
/// frame's event was dropped.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The remote host does not support this event type. For touch
    /// dispatch this triggers the pointer-emulation fallback.
    #[error("event type not supported by remote host")]
    Unsupported,

    /// The transport rejected the event with a nonzero status code.
    #[error("transport rejected event (code {0})")]
    Rejected(i32),
}

pub type SendResult = Result<(), TransportError>;

/// Outgoing protocol event sink implemented by the streaming client.
///
/// `active_mask` is the bitmask of currently-mapped controller slots
/// (0x1/0x3/0x7/0xF for 1/2/3/4+ controllers), carried on every
/// controller event so the host keeps its slot table in sync.
pub trait Transport {
    /// Announce a controller slot and its capabilities to the host.
    fn send_controller_arrival(&mut self, slot: u8, active_mask: u16, capabilities: u8)
        -> SendResult;

    /// Combined multi-controller state event for one slot.
    fn send_controller_state(
        &mut self,
        slot: u8,
        active_mask: u16,
        state: &WireGamepadState,
    ) -> SendResult;

    /// Relative pointer move, already scaled by the pointer multiplier.
    fn send_mouse_move(&mut self, dx: i16, dy: i16) -> SendResult;

    /// Absolute pointer position within the given reference size.
    fn send_mouse_position(&mut self, x: i16, y: i16, width: i16, height: i16) -> SendResult;

    /// Pointer button press or release.
    fn send_mouse_button(&mut self, action: ButtonAction, button: MouseButton) -> SendResult;

    /// Throttled scroll tick; `direction` is always +1 or -1.
    fn send_scroll(&mut self, direction: i8) -> SendResult;

    /// High-resolution vertical wheel delta from a real mouse.
    fn send_high_res_scroll(&mut self, amount: i16) -> SendResult;

    /// High-resolution horizontal wheel delta from a real mouse.
    fn send_high_res_hscroll(&mut self, amount: i16) -> SendResult;

    /// Keyboard event carrying the external virtual-key code.
    fn send_keyboard(&mut self, vk: i16, action: KeyAction, modifiers: u8) -> SendResult;

    /// Touch event with position normalized to [0,1] of the viewport.
    fn send_touch(
        &mut self,
        kind: TouchEventKind,
        touch_id: u32,
        x: f32,
        y: f32,
        rotation: u16,
    ) -> SendResult;

    /// Motion sensor sample; gyro values are in degrees per second.
    fn send_motion(&mut self, slot: u8, kind: MotionKind, x: f32, y: f32, z: f32) -> SendResult;
}
