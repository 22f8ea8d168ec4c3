//! Physical-to-canonical button remapping.
//!
//! The active table is rebuilt only on configuration reload and is
//! read-only during a tick.

use std::collections::HashMap;

use crate::platform::{ControllerButton, ControllerState};

/// Total mapping from physical button identity to canonical identity.
///
/// Any button absent from the configured layout maps to itself, so
/// `apply` has no error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTable {
    map: [ControllerButton; ControllerButton::COUNT],
}

impl Default for RemapTable {
    fn default() -> Self {
        Self::identity()
    }
}

impl RemapTable {
    /// The identity table: every button maps to itself.
    pub fn identity() -> Self {
        Self {
            map: ControllerButton::ALL,
        }
    }

    /// Build a table from a configured layout, falling back to identity
    /// for every button the layout does not mention.
    pub fn from_layout(layout: &HashMap<ControllerButton, ControllerButton>) -> Self {
        let mut table = Self::identity();
        for button in ControllerButton::ALL {
            if let Some(&target) = layout.get(&button) {
                table.map[button.index()] = target;
            }
        }
        table
    }

    /// Canonical identity for a physical button.
    pub fn apply(&self, button: ControllerButton) -> ControllerButton {
        self.map[button.index()]
    }

    /// Produce the normalized state for one raw snapshot: buttons are
    /// folded through the table (two physical buttons may land on the
    /// same canonical one), axes copy through unchanged.
    pub fn normalize(&self, raw: &ControllerState) -> ControllerState {
        let mut result = ControllerState::default();
        result.axes = raw.axes;

        for button in ControllerButton::ALL {
            if raw.buttons[button.index()] {
                result.buttons[self.apply(button).index()] = true;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Axis;

    #[test]
    fn identity_maps_every_button_to_itself() {
        let table = RemapTable::identity();
        for button in ControllerButton::ALL {
            assert_eq!(table.apply(button), button);
        }
    }

    #[test]
    fn unknown_buttons_fall_back_to_identity() {
        let mut layout = HashMap::new();
        layout.insert(ControllerButton::A, ControllerButton::B);

        let table = RemapTable::from_layout(&layout);
        assert_eq!(table.apply(ControllerButton::A), ControllerButton::B);
        // Everything else untouched
        assert_eq!(table.apply(ControllerButton::B), ControllerButton::B);
        assert_eq!(table.apply(ControllerButton::Guide), ControllerButton::Guide);
    }

    #[test]
    fn normalize_folds_buttons_and_copies_axes() {
        let mut layout = HashMap::new();
        layout.insert(ControllerButton::X, ControllerButton::Y);

        let table = RemapTable::from_layout(&layout);

        let mut raw = ControllerState::default();
        raw.buttons[ControllerButton::X.index()] = true;
        raw.axes[Axis::LeftX.index()] = 0.5;

        let normalized = table.normalize(&raw);
        assert!(!normalized.button(ControllerButton::X));
        assert!(normalized.button(ControllerButton::Y));
        assert_eq!(normalized.axis(Axis::LeftX), 0.5);
    }

    #[test]
    fn normalize_merges_two_physical_buttons_onto_one_canonical() {
        let mut layout = HashMap::new();
        layout.insert(ControllerButton::Back, ControllerButton::Guide);

        let table = RemapTable::from_layout(&layout);

        let mut raw = ControllerState::default();
        raw.buttons[ControllerButton::Back.index()] = true;
        raw.buttons[ControllerButton::Guide.index()] = true;

        let normalized = table.normalize(&raw);
        assert!(normalized.button(ControllerButton::Guide));
        assert!(!normalized.button(ControllerButton::Back));
    }
}
