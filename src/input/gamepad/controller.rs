//! Per-tick controller state tracking
//!
//! [`ControllerState`] keeps the previous snapshot between ticks and turns
//! each new [`RawSnapshot`] into zero or more [`ControllerEvent`]s. Buttons go
//! through the transition engine (at most one button event per tick), sticks
//! through the hybrid deadzone, and triggers are clamped to `[0, 1]`.

use serde::Serialize;
use tracing::trace;

use super::buttons::{compare_states, falling_edges, rising_edges, ButtonState, Transition};
use super::deadzone::hybrid;
use super::snapshot::RawSnapshot;
use super::vector::Vector2;
use crate::config::StickConfig;

/// Standardized controller event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ControllerEvent {
    /// At least one button was pressed this tick
    ButtonsPressed {
        previous: ButtonState,
        current: ButtonState,
        just_pressed: ButtonState,
    },
    /// Buttons were released and none were pressed this tick
    ButtonsReleased {
        previous: ButtonState,
        current: ButtonState,
        just_released: ButtonState,
    },
    /// Deadzone-corrected left stick position changed
    LeftThumbMoved { position: Vector2 },
    /// Deadzone-corrected right stick position changed
    RightThumbMoved { position: Vector2 },
    /// Either trigger changed
    TriggersMoved { left: f64, right: f64 },
}

/// Controller state carried between polling ticks.
#[derive(Debug, Clone)]
pub struct ControllerState {
    left_deadzone: f64,
    right_deadzone: f64,
    buttons: ButtonState,
    left_thumb: Vector2,
    right_thumb: Vector2,
    left_trigger: f64,
    right_trigger: f64,
}

impl ControllerState {
    /// Create a tracker with everything at rest.
    pub fn new(sticks: &StickConfig) -> Self {
        Self {
            left_deadzone: sticks.left_deadzone,
            right_deadzone: sticks.right_deadzone,
            buttons: ButtonState::NONE,
            left_thumb: Vector2::ZERO,
            right_thumb: Vector2::ZERO,
            left_trigger: 0.0,
            right_trigger: 0.0,
        }
    }

    /// Current button state.
    pub fn buttons(&self) -> ButtonState {
        self.buttons
    }

    /// Current corrected left stick position.
    pub fn left_thumb(&self) -> Vector2 {
        self.left_thumb
    }

    /// Current corrected right stick position.
    pub fn right_thumb(&self) -> Vector2 {
        self.right_thumb
    }

    /// Current `(left, right)` trigger values.
    pub fn triggers(&self) -> (f64, f64) {
        (self.left_trigger, self.right_trigger)
    }

    /// Apply one snapshot and return the events it produces, in the order
    /// buttons, left stick, right stick, triggers.
    pub fn update(&mut self, raw: &RawSnapshot) -> Vec<ControllerEvent> {
        let mut events = Vec::new();

        let previous = self.buttons;
        let current = raw.buttons;
        match compare_states(previous, current) {
            Transition::Rose => events.push(ControllerEvent::ButtonsPressed {
                previous,
                current,
                just_pressed: rising_edges(previous, current),
            }),
            Transition::Fell => events.push(ControllerEvent::ButtonsReleased {
                previous,
                current,
                just_released: falling_edges(previous, current),
            }),
            Transition::Unchanged => {},
        }
        self.buttons = current;

        let left = hybrid(raw.left_stick, self.left_deadzone);
        if left != self.left_thumb {
            self.left_thumb = left;
            events.push(ControllerEvent::LeftThumbMoved { position: left });
        }

        let right = hybrid(raw.right_stick, self.right_deadzone);
        if right != self.right_thumb {
            self.right_thumb = right;
            events.push(ControllerEvent::RightThumbMoved { position: right });
        }

        let lt = raw.left_trigger.clamp(0.0, 1.0);
        let rt = raw.right_trigger.clamp(0.0, 1.0);
        if lt != self.left_trigger || rt != self.right_trigger {
            self.left_trigger = lt;
            self.right_trigger = rt;
            events.push(ControllerEvent::TriggersMoved { left: lt, right: rt });
        }

        trace!("Controller tick produced {} event(s)", events.len());
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gamepad::buttons::Button;

    fn sticks() -> StickConfig {
        StickConfig {
            left_deadzone: 0.15,
            right_deadzone: 0.15,
        }
    }

    fn pressed(buttons: &[Button]) -> RawSnapshot {
        RawSnapshot {
            buttons: buttons.iter().copied().collect(),
            ..RawSnapshot::default()
        }
    }

    #[test]
    fn test_idle_snapshot_emits_nothing() {
        let mut state = ControllerState::new(&sticks());
        assert!(state.update(&RawSnapshot::default()).is_empty());
    }

    #[test]
    fn test_press_then_release() {
        let mut state = ControllerState::new(&sticks());

        let events = state.update(&pressed(&[Button::A]));
        assert_eq!(
            events,
            vec![ControllerEvent::ButtonsPressed {
                previous: ButtonState::NONE,
                current: ButtonState::NONE.with(Button::A),
                just_pressed: ButtonState::NONE.with(Button::A),
            }]
        );

        // Holding is silent
        assert!(state.update(&pressed(&[Button::A])).is_empty());

        let events = state.update(&RawSnapshot::default());
        assert_eq!(
            events,
            vec![ControllerEvent::ButtonsReleased {
                previous: ButtonState::NONE.with(Button::A),
                current: ButtonState::NONE,
                just_released: ButtonState::NONE.with(Button::A),
            }]
        );
    }

    #[test]
    fn test_simultaneous_press_and_release_reports_press_only() {
        let mut state = ControllerState::new(&sticks());
        state.update(&pressed(&[Button::A]));

        let events = state.update(&pressed(&[Button::B]));
        assert_eq!(events.len(), 1);
        match &events[0] {
            ControllerEvent::ButtonsPressed { just_pressed, .. } => {
                assert_eq!(*just_pressed, ButtonState::NONE.with(Button::B));
            },
            other => panic!("expected ButtonsPressed, got {:?}", other),
        }
        assert_eq!(state.buttons(), ButtonState::NONE.with(Button::B));
    }

    #[test]
    fn test_stick_noise_is_ignored() {
        let mut state = ControllerState::new(&sticks());
        let raw = RawSnapshot {
            left_stick: Vector2::new(0.05, 0.05),
            right_stick: Vector2::new(-0.1, 0.0),
            ..RawSnapshot::default()
        };
        assert!(state.update(&raw).is_empty());
        assert_eq!(state.left_thumb(), Vector2::ZERO);
    }

    #[test]
    fn test_stick_move_emits_corrected_position() {
        let mut state = ControllerState::new(&sticks());
        let raw = RawSnapshot {
            right_stick: Vector2::new(1.0, 0.0),
            ..RawSnapshot::default()
        };

        let events = state.update(&raw);
        assert_eq!(
            events,
            vec![ControllerEvent::RightThumbMoved {
                position: Vector2::new(1.0, 0.0)
            }]
        );
        assert!(state.update(&raw).is_empty());

        // Returning to rest is reported once
        let events = state.update(&RawSnapshot::default());
        assert_eq!(
            events,
            vec![ControllerEvent::RightThumbMoved {
                position: Vector2::ZERO
            }]
        );
    }

    #[test]
    fn test_triggers_are_clamped() {
        let mut state = ControllerState::new(&sticks());
        let raw = RawSnapshot {
            left_trigger: 1.5,
            right_trigger: 0.25,
            ..RawSnapshot::default()
        };

        let events = state.update(&raw);
        assert_eq!(
            events,
            vec![ControllerEvent::TriggersMoved {
                left: 1.0,
                right: 0.25
            }]
        );
        assert_eq!(state.triggers(), (1.0, 0.25));
    }

    #[test]
    fn test_event_order() {
        let mut state = ControllerState::new(&sticks());
        let raw = RawSnapshot {
            buttons: ButtonState::NONE.with(Button::Start),
            left_stick: Vector2::new(0.0, 1.0),
            right_stick: Vector2::new(-1.0, 0.0),
            left_trigger: 0.5,
            right_trigger: 0.0,
        };

        let events = state.update(&raw);
        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], ControllerEvent::ButtonsPressed { .. }));
        assert!(matches!(events[1], ControllerEvent::LeftThumbMoved { .. }));
        assert!(matches!(events[2], ControllerEvent::RightThumbMoved { .. }));
        assert!(matches!(events[3], ControllerEvent::TriggersMoved { .. }));
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = ControllerEvent::TriggersMoved { left: 0.5, right: 0.0 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "triggers_moved");
        assert_eq!(json["left"], 0.5);
    }
}
