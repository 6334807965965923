//! Raw device snapshot handed to the controller each tick.

use super::buttons::ButtonState;
use super::vector::Vector2;
use serde::{Deserialize, Serialize};

/// One fully sampled instant of device state, before any deadzone is applied.
///
/// Sticks are expected in `[-1, 1]` per axis and triggers in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub buttons: ButtonState,
    pub left_stick: Vector2,
    pub right_stick: Vector2,
    pub left_trigger: f64,
    pub right_trigger: f64,
}

impl RawSnapshot {
    /// Build a snapshot from XInput-style integer readings.
    ///
    /// # Arguments
    /// * `buttons` - `wButtons` flag word
    /// * `thumbs` - `[lx, ly, rx, ry]` in `i16` range
    /// * `triggers` - `[left, right]` in `0..=255`
    pub fn from_xinput(buttons: u16, thumbs: [i16; 4], triggers: [u8; 2]) -> Self {
        // 32768 so that i16::MIN maps to exactly -1.0
        const MAX_AXIS: f64 = 32768.0;
        let axis = |v: i16| (f64::from(v) / MAX_AXIS).max(-1.0);

        Self {
            buttons: ButtonState::from_xinput_flags(buttons),
            left_stick: Vector2::new(axis(thumbs[0]), axis(thumbs[1])),
            right_stick: Vector2::new(axis(thumbs[2]), axis(thumbs[3])),
            left_trigger: f64::from(triggers[0]) / 255.0,
            right_trigger: f64::from(triggers[1]) / 255.0,
        }
    }
}
