//! User preferences for the input pipeline.
//!
//! Handles loading, parsing, and saving of the YAML settings file. The
//! live [`Settings`] value is shared behind a [`SettingsHandle`] so a
//! settings UI or config watcher can swap preferences between ticks;
//! the session reads a consistent copy at the top of each tick.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::fs;

use crate::platform::ControllerButton;

/// Shared handle to the live settings value.
pub type SettingsHandle = Arc<RwLock<Settings>>;

/// Face-button layout of the target platform's native controller.
///
/// `Swapped` is for hardware where the physical A/B and X/Y positions
/// are exchanged relative to the standard layout. Resolved at startup
/// from configuration so both variants are testable in one binary.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FaceButtonLayout {
    #[default]
    Standard,
    Swapped,
}

/// All user preferences consumed by the input pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Pointer speed as a percentage; 100 means the default multiplier.
    #[serde(default = "default_mouse_speed")]
    pub mouse_speed_percent: u16,

    /// Swap emitted left/right pointer buttons.
    #[serde(default)]
    pub swap_mouse_buttons: bool,

    /// Invert the stick-driven scroll direction.
    #[serde(default)]
    pub swap_mouse_scroll: bool,

    /// Dedicated touch mode: forward touches as touch protocol events
    /// instead of repurposing a controller for pointer emulation.
    #[serde(default)]
    pub touchscreen_mouse_mode: bool,

    /// Scale applied to every host rumble magnitude before it reaches
    /// local hardware. 0 disables force feedback.
    #[serde(default = "default_rumble_force")]
    pub rumble_force: f32,

    /// Radial cutoff for the left stick; 0 disables the deadzone.
    #[serde(default = "default_deadzone")]
    pub deadzone_stick_left: f32,

    /// Radial cutoff for the right stick; 0 disables the deadzone.
    #[serde(default = "default_deadzone")]
    pub deadzone_stick_right: f32,

    #[serde(default)]
    pub face_button_layout: FaceButtonLayout,

    /// Button set that must be held together to arm the special latch.
    /// An empty set means the combo can never match.
    #[serde(default)]
    pub guide_combo: Vec<ControllerButton>,

    /// Physical-to-canonical button remap. Buttons absent from the
    /// table map to themselves.
    #[serde(default)]
    pub remap: HashMap<ControllerButton, ControllerButton>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_speed_percent: default_mouse_speed(),
            swap_mouse_buttons: false,
            swap_mouse_scroll: false,
            touchscreen_mouse_mode: false,
            rumble_force: default_rumble_force(),
            deadzone_stick_left: default_deadzone(),
            deadzone_stick_right: default_deadzone(),
            face_button_layout: FaceButtonLayout::Standard,
            guide_combo: Vec::new(),
            remap: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub async fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings file: {}", path))?;

        let settings: Settings = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML settings: {}", path))?;

        Ok(settings)
    }

    /// Save settings to a YAML file.
    pub async fn save(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize settings to YAML")?;

        fs::write(path, yaml)
            .await
            .with_context(|| format!("Failed to write settings file: {}", path))?;

        Ok(())
    }

    /// Wrap in a shared handle for the session and settings UI.
    pub fn into_handle(self) -> SettingsHandle {
        Arc::new(RwLock::new(self))
    }

    /// Pointer sensitivity multiplier derived from the speed percent.
    pub fn pointer_multiplier(&self) -> f32 {
        self.mouse_speed_percent as f32 / 100.0 * 1.5 + 0.5
    }
}

// Default value functions
fn default_mouse_speed() -> u16 {
    100
}
fn default_rumble_force() -> f32 {
    1.0
}
fn default_deadzone() -> f32 {
    0.1
}
