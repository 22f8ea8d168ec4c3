//! Platform input layer interface.
//!
//! The platform layer polls raw hardware and exposes per-frame
//! snapshots plus discrete event callbacks. This module defines the
//! snapshot types and the [`InputSource`] trait the session polls each
//! tick; the callback direction is plain method calls on
//! [`crate::input::InputSession`] made by the host wiring.

use serde::{Deserialize, Serialize};

/// Canonical controller buttons.
///
/// Indexes the boolean array in [`ControllerState`]; remap tables map
/// physical button identities into this space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerButton {
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    A,
    B,
    X,
    Y,
    Back,
    Start,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    LeftStickClick,
    RightStickClick,
    Guide,
}

impl ControllerButton {
    pub const COUNT: usize = 17;

    /// All buttons in index order.
    pub const ALL: [ControllerButton; Self::COUNT] = [
        ControllerButton::DpadUp,
        ControllerButton::DpadDown,
        ControllerButton::DpadLeft,
        ControllerButton::DpadRight,
        ControllerButton::A,
        ControllerButton::B,
        ControllerButton::X,
        ControllerButton::Y,
        ControllerButton::Back,
        ControllerButton::Start,
        ControllerButton::LeftBumper,
        ControllerButton::RightBumper,
        ControllerButton::LeftTrigger,
        ControllerButton::RightTrigger,
        ControllerButton::LeftStickClick,
        ControllerButton::RightStickClick,
        ControllerButton::Guide,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Analog axes reported by the platform layer.
///
/// Stick axes are in [-1, 1], trigger axes in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl Axis {
    pub const COUNT: usize = 6;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One controller's state for one tick: raw when it comes off the
/// platform layer, normalized once the remap table has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    pub buttons: [bool; ControllerButton::COUNT],
    pub axes: [f32; Axis::COUNT],
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            buttons: [false; ControllerButton::COUNT],
            axes: [0.0; Axis::COUNT],
        }
    }
}

impl ControllerState {
    pub fn button(&self, button: ControllerButton) -> bool {
        self.buttons[button.index()]
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        self.axes[axis.index()]
    }
}

/// Raw pointer device button state for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawMouseState {
    pub left_button: bool,
    pub middle_button: bool,
    pub right_button: bool,
}

/// Lifecycle phase of a touch point as reported by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// Finger just landed.
    Start,
    /// Finger still down, possibly moving.
    Stay,
    /// Finger lifted this frame.
    End,
    /// Point is gone without a proper lift (tracking lost).
    None,
}

/// One reported touch point, position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub phase: TouchPhase,
}

/// Motion sensor sample delivered by the platform layer.
///
/// Gyroscope values arrive in radians per second and are converted to
/// degrees per second before hitting the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub slot: u8,
    pub kind: SensorKind,
    pub values: [f32; 3],
}

/// Which sensor produced a [`SensorSample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Accelerometer,
    Gyroscope,
}

/// Per-tick polling surface of the platform input layer, plus the
/// rumble primitive for reflecting host force-feedback onto hardware.
pub trait InputSource {
    /// Fresh raw snapshot for one controller slot.
    fn controller_state(&mut self, slot: usize) -> ControllerState;

    /// Merged snapshot across all connected controllers. Drives the
    /// pointer/scroll emulation so any controller can steer the mouse.
    fn unified_controller_state(&mut self) -> ControllerState;

    /// Pointer device button snapshot.
    fn mouse_state(&mut self) -> RawMouseState;

    /// All currently reported touch points.
    fn touch_states(&mut self) -> Vec<TouchPoint>;

    /// Number of connected controllers.
    fn connected_controller_count(&self) -> usize;

    /// Viewport size in pixels, used to normalize touch positions.
    fn viewport_size(&self) -> (f32, f32);

    /// Drive the main rumble motors of one controller.
    fn rumble(&mut self, slot: u8, low_freq: u16, high_freq: u16);

    /// Drive all four rumble motors of one controller.
    fn rumble_triggers(
        &mut self,
        slot: u8,
        low_freq: u16,
        high_freq: u16,
        left_trigger: u16,
        right_trigger: u16,
    );
}
