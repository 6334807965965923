//! Gamepad input normalization
//!
//! Pure deadzone correction for thumbsticks and edge detection for buttons,
//! plus the per-tick state tracker and polling provider built on top of them.

pub mod buttons;
pub mod controller;
pub mod deadzone;
pub mod gilrs_source;
pub mod provider;
pub mod snapshot;
pub mod vector;

pub use buttons::{compare_states, falling_edges, rising_edges, Button, ButtonState, Transition};
pub use controller::{ControllerEvent, ControllerState};
pub use deadzone::{clip, hybrid, scaled_radial, sloped_scaled_axial, DeadzoneMode};
pub use gilrs_source::GilrsSource;
pub use provider::{EventCallback, GamepadProvider, SnapshotSource};
pub use snapshot::RawSnapshot;
pub use vector::{map_range, Vector2};
