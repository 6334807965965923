//! Controller input handling

pub mod gamepad;
