//! XController - gamepad input normalization
//!
//! Turns raw gamepad snapshots into deadzone-corrected stick vectors and
//! edge-triggered button events.

pub mod config;
pub mod input;

pub use config::{AppConfig, ConfigError};
pub use input::gamepad::{
    Button, ButtonState, ControllerEvent, ControllerState, GamepadProvider, RawSnapshot,
    Transition, Vector2,
};
