//! gilrs-backed snapshot source
//!
//! Reads the first connected gamepad's cached state each tick. gilrs reports
//! face buttons by physical position; they are mapped to Xbox names using the
//! Xbox layout:
//!
//! ```text
//!       [Y/North]
//!   [X/West] [B/East]
//!       [A/South]
//! ```

use anyhow::{anyhow, Result};
use gilrs::{Axis, Button as GilrsButton, Gamepad, Gilrs};
use tracing::{debug, info};

use super::buttons::{Button, ButtonState};
use super::provider::SnapshotSource;
use super::snapshot::RawSnapshot;
use super::vector::Vector2;

/// Map a gilrs button to one of the 14 named buttons
///
/// Triggers (`LeftTrigger2`/`RightTrigger2`) are analog and read separately;
/// buttons with no counterpart return `None`.
pub fn gilrs_button_to_button(button: GilrsButton) -> Option<Button> {
    match button {
        GilrsButton::South => Some(Button::A),
        GilrsButton::East => Some(Button::B),
        GilrsButton::West => Some(Button::X),
        GilrsButton::North => Some(Button::Y),

        GilrsButton::LeftTrigger => Some(Button::LBumper),
        GilrsButton::RightTrigger => Some(Button::RBumper),

        GilrsButton::LeftThumb => Some(Button::LThumb),
        GilrsButton::RightThumb => Some(Button::RThumb),

        GilrsButton::DPadUp => Some(Button::Up),
        GilrsButton::DPadDown => Some(Button::Down),
        GilrsButton::DPadLeft => Some(Button::Left),
        GilrsButton::DPadRight => Some(Button::Right),

        GilrsButton::Select => Some(Button::Back),
        GilrsButton::Start => Some(Button::Start),

        _ => None,
    }
}

/// gilrs buttons that carry one of the 14 named inputs
const MAPPED_BUTTONS: [GilrsButton; 14] = [
    GilrsButton::South,
    GilrsButton::East,
    GilrsButton::West,
    GilrsButton::North,
    GilrsButton::LeftTrigger,
    GilrsButton::RightTrigger,
    GilrsButton::LeftThumb,
    GilrsButton::RightThumb,
    GilrsButton::DPadUp,
    GilrsButton::DPadDown,
    GilrsButton::DPadLeft,
    GilrsButton::DPadRight,
    GilrsButton::Select,
    GilrsButton::Start,
];

/// Snapshot source reading the first connected gilrs gamepad
pub struct GilrsSource {
    gilrs: Gilrs,
    active_name: Option<String>,
}

impl GilrsSource {
    pub fn new() -> Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| anyhow!("gilrs initialization failed: {}", e))?;
        info!("GilRs initialized");
        Ok(Self {
            gilrs,
            active_name: None,
        })
    }

    fn read(gamepad: &Gamepad<'_>) -> RawSnapshot {
        let mut buttons = ButtonState::NONE;
        for gilrs_button in MAPPED_BUTTONS {
            if let Some(button) = gilrs_button_to_button(gilrs_button) {
                buttons.set(button, gamepad.is_pressed(gilrs_button));
            }
        }

        let axis = |a: Axis| f64::from(gamepad.value(a)).clamp(-1.0, 1.0);
        let trigger = |b: GilrsButton| {
            gamepad
                .button_data(b)
                .map_or(0.0, |data| f64::from(data.value()).clamp(0.0, 1.0))
        };

        RawSnapshot {
            buttons,
            left_stick: Vector2::new(axis(Axis::LeftStickX), axis(Axis::LeftStickY)),
            right_stick: Vector2::new(axis(Axis::RightStickX), axis(Axis::RightStickY)),
            left_trigger: trigger(GilrsButton::LeftTrigger2),
            right_trigger: trigger(GilrsButton::RightTrigger2),
        }
    }
}

impl SnapshotSource for GilrsSource {
    fn poll(&mut self) -> Option<RawSnapshot> {
        // Drain pending events so gilrs updates its cached gamepad state
        while self.gilrs.next_event().is_some() {}

        let gamepad = self
            .gilrs
            .gamepads()
            .map(|(_, gamepad)| gamepad)
            .find(|gamepad| gamepad.is_connected());

        match gamepad {
            Some(gamepad) => {
                let name = gamepad.name();
                if self.active_name.as_deref() != Some(name) {
                    info!("Reading gamepad \"{}\"", name);
                    self.active_name = Some(name.to_string());
                }
                Some(Self::read(&gamepad))
            },
            None => {
                if self.active_name.take().is_some() {
                    debug!("No gamepad available");
                }
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_button_mapping_xbox_layout() {
        assert_eq!(gilrs_button_to_button(GilrsButton::South), Some(Button::A));
        assert_eq!(gilrs_button_to_button(GilrsButton::East), Some(Button::B));
        assert_eq!(gilrs_button_to_button(GilrsButton::West), Some(Button::X));
        assert_eq!(gilrs_button_to_button(GilrsButton::North), Some(Button::Y));
    }

    #[test]
    fn test_shoulder_and_menu_buttons() {
        assert_eq!(gilrs_button_to_button(GilrsButton::LeftTrigger), Some(Button::LBumper));
        assert_eq!(gilrs_button_to_button(GilrsButton::RightTrigger), Some(Button::RBumper));
        assert_eq!(gilrs_button_to_button(GilrsButton::Select), Some(Button::Back));
        assert_eq!(gilrs_button_to_button(GilrsButton::Start), Some(Button::Start));
    }

    #[test]
    fn test_analog_triggers_are_not_buttons() {
        assert_eq!(gilrs_button_to_button(GilrsButton::LeftTrigger2), None);
        assert_eq!(gilrs_button_to_button(GilrsButton::RightTrigger2), None);
        assert_eq!(gilrs_button_to_button(GilrsButton::Mode), None);
    }

    #[test]
    fn test_mapped_buttons_cover_every_button_once() {
        let state: ButtonState = MAPPED_BUTTONS
            .iter()
            .filter_map(|b| gilrs_button_to_button(*b))
            .collect();
        assert_eq!(state.pressed().count(), Button::ALL.len());
    }
}
