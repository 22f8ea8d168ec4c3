//! Per-tick controller snapshot building and wire packing.
//!
//! Takes a normalized [`ControllerState`], applies trigger derivation,
//! deadzone shaping, and the guide-combo interceptor, and packs the
//! result into a [`WireGamepadState`] ready for diff dispatch.

use crate::config::FaceButtonLayout;
use crate::input::analog::{quantize_stick, quantize_trigger, shape_stick};
use crate::platform::{Axis, ControllerButton, ControllerState};
use crate::transport::{
    WireGamepadState, A_FLAG, BACK_FLAG, B_FLAG, DOWN_FLAG, LB_FLAG, LEFT_FLAG, LS_CLK_FLAG,
    PLAY_FLAG, RB_FLAG, RIGHT_FLAG, RS_CLK_FLAG, SPECIAL_FLAG, UP_FLAG, X_FLAG, Y_FLAG,
};

/// Guide-combo interceptor state, one per controller slot.
///
/// Arms when the configured combo is fully held or the native guide
/// button goes down; stays armed until every arming input is released.
/// While armed, the packed state carries only the special bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpecialLatch {
    #[default]
    Idle,
    Armed,
}

impl SpecialLatch {
    /// Advance the latch for this tick.
    ///
    /// `arm` means the full combo is held or the guide button is down;
    /// `any_input_held` means at least one combo button or the guide
    /// button is still down (the release condition).
    pub fn step(&mut self, arm: bool, any_input_held: bool) -> bool {
        *self = match (*self, arm, any_input_held) {
            (SpecialLatch::Idle, true, _) => SpecialLatch::Armed,
            (SpecialLatch::Armed, _, true) => SpecialLatch::Armed,
            _ => SpecialLatch::Idle,
        };
        *self == SpecialLatch::Armed
    }
}

/// Per-slot shaping parameters resolved from settings once per tick.
#[derive(Debug, Clone)]
pub struct GamepadShaping<'a> {
    pub left_deadzone: f32,
    pub right_deadzone: f32,
    pub layout: FaceButtonLayout,
    pub guide_combo: &'a [ControllerButton],
}

/// Pack the canonical button table into the wire bitmask.
///
/// Pure mapping from the enum-indexed boolean table; the face-button
/// assignment depends on the configured physical layout.
pub fn pack_buttons(state: &ControllerState, layout: FaceButtonLayout) -> u32 {
    let mut flags = 0u32;

    let mut set = |flag: u32, button: ControllerButton| {
        if state.button(button) {
            flags |= flag;
        }
    };

    set(UP_FLAG, ControllerButton::DpadUp);
    set(DOWN_FLAG, ControllerButton::DpadDown);
    set(LEFT_FLAG, ControllerButton::DpadLeft);
    set(RIGHT_FLAG, ControllerButton::DpadRight);

    match layout {
        FaceButtonLayout::Standard => {
            set(A_FLAG, ControllerButton::A);
            set(B_FLAG, ControllerButton::B);
            set(X_FLAG, ControllerButton::X);
            set(Y_FLAG, ControllerButton::Y);
        }
        FaceButtonLayout::Swapped => {
            set(A_FLAG, ControllerButton::B);
            set(B_FLAG, ControllerButton::A);
            set(X_FLAG, ControllerButton::Y);
            set(Y_FLAG, ControllerButton::X);
        }
    }

    set(BACK_FLAG, ControllerButton::Back);
    set(PLAY_FLAG, ControllerButton::Start);
    set(LB_FLAG, ControllerButton::LeftBumper);
    set(RB_FLAG, ControllerButton::RightBumper);
    set(LS_CLK_FLAG, ControllerButton::LeftStickClick);
    set(RS_CLK_FLAG, ControllerButton::RightStickClick);

    flags
}

/// Derive one trigger value, preferring the analog axis and falling
/// back to the digital bumper-trigger button when the axis is silent.
fn trigger_value(state: &ControllerState, axis: Axis, button: ControllerButton) -> f32 {
    let value = state.axis(axis);
    if value > 0.0 {
        value
    } else if state.button(button) {
        1.0
    } else {
        0.0
    }
}

/// Build the packed wire state for one controller slot this tick.
///
/// `pointer_emulation` is the shared special-mode decision: while the
/// sticks and triggers are repurposed for pointer control, their
/// packed values are zeroed so the host never sees them double.
pub fn build_wire_state(
    state: &ControllerState,
    shaping: &GamepadShaping<'_>,
    latch: &mut SpecialLatch,
    pointer_emulation: bool,
) -> WireGamepadState {
    let combo_held = !shaping.guide_combo.is_empty()
        && shaping.guide_combo.iter().all(|&b| state.button(b));
    let any_input_held = shaping.guide_combo.iter().any(|&b| state.button(b))
        || state.button(ControllerButton::Guide);
    let armed = latch.step(
        combo_held || state.button(ControllerButton::Guide),
        any_input_held,
    );

    if armed {
        return WireGamepadState {
            button_flags: SPECIAL_FLAG,
            ..WireGamepadState::default()
        };
    }

    let (lt, rt) = if pointer_emulation {
        (0.0, 0.0)
    } else {
        (
            trigger_value(state, Axis::LeftTrigger, ControllerButton::LeftTrigger),
            trigger_value(state, Axis::RightTrigger, ControllerButton::RightTrigger),
        )
    };

    let (lx, ly, rx, ry) = if pointer_emulation {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        let (lx, ly) = shape_stick(
            state.axis(Axis::LeftX),
            state.axis(Axis::LeftY),
            shaping.left_deadzone,
        );
        let (rx, ry) = shape_stick(
            state.axis(Axis::RightX),
            state.axis(Axis::RightY),
            shaping.right_deadzone,
        );
        (lx, ly, rx, ry)
    };

    WireGamepadState {
        button_flags: pack_buttons(state, shaping.layout),
        left_trigger: quantize_trigger(lt),
        right_trigger: quantize_trigger(rt),
        left_stick_x: quantize_stick(lx),
        // Y axes are inverted on the wire
        left_stick_y: quantize_stick(-ly),
        right_stick_x: quantize_stick(rx),
        right_stick_y: quantize_stick(-ry),
    }
}
