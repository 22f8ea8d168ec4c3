//! Normalized remote-input pipeline for a real-time game-streaming
//! client.
//!
//! Translates heterogeneous local input (gamepads, mouse, keyboard,
//! touch, motion sensors) into a deduplicated, rate-limited stream of
//! remote-input protocol events, and reflects host force-feedback back
//! onto local hardware. The host wiring polls [`input::InputSession`]
//! once per frame and forwards discrete platform callbacks to it; the
//! [`transport::Transport`] and [`platform::InputSource`] traits are
//! the two seams to the outside world.

pub mod config;
pub mod input;
pub mod keymap;
pub mod logging;
pub mod platform;
pub mod transport;

pub use config::{FaceButtonLayout, Settings, SettingsHandle};
pub use input::InputSession;
pub use platform::{
    Axis, ControllerButton, ControllerState, InputSource, RawMouseState, SensorKind, SensorSample,
    TouchPhase, TouchPoint,
};
pub use transport::{Transport, TransportError, WireGamepadState};
