//! Digital button snapshots and edge detection
//!
//! A [`ButtonState`] is a fixed bit vector over the 14 named buttons of an
//! Xbox-style pad. Each bit sits at the position the XInput `wButtons` word
//! uses, so decoding device flags is a mask and nothing more.
//!
//! Transitions between two snapshots are classified by [`compare_states`]
//! and the exact buttons involved come from [`rising_edges`] and
//! [`falling_edges`]. These three functions are independent: the edge sets
//! are computed per button and never gated by the classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// XInput `wButtons` bit positions.
mod button_flags {
    pub const DPAD_UP: u16 = 0x0001;
    pub const DPAD_DOWN: u16 = 0x0002;
    pub const DPAD_LEFT: u16 = 0x0004;
    pub const DPAD_RIGHT: u16 = 0x0008;
    pub const START: u16 = 0x0010;
    pub const BACK: u16 = 0x0020;
    pub const LEFT_THUMB: u16 = 0x0040;
    pub const RIGHT_THUMB: u16 = 0x0080;
    pub const LEFT_SHOULDER: u16 = 0x0100;
    pub const RIGHT_SHOULDER: u16 = 0x0200;
    pub const A: u16 = 0x1000;
    pub const B: u16 = 0x2000;
    pub const X: u16 = 0x4000;
    pub const Y: u16 = 0x8000;
}

/// One of the 14 digital inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    A,
    B,
    X,
    Y,
    LBumper,
    RBumper,
    LThumb,
    RThumb,
    Up,
    Down,
    Left,
    Right,
    Back,
    Start,
}

impl Button {
    /// Canonical order, used for iteration and display.
    pub const ALL: [Button; 14] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::LBumper,
        Button::RBumper,
        Button::LThumb,
        Button::RThumb,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Back,
        Button::Start,
    ];

    /// Bit for this button inside a [`ButtonState`].
    pub const fn bit(self) -> u16 {
        match self {
            Button::A => button_flags::A,
            Button::B => button_flags::B,
            Button::X => button_flags::X,
            Button::Y => button_flags::Y,
            Button::LBumper => button_flags::LEFT_SHOULDER,
            Button::RBumper => button_flags::RIGHT_SHOULDER,
            Button::LThumb => button_flags::LEFT_THUMB,
            Button::RThumb => button_flags::RIGHT_THUMB,
            Button::Up => button_flags::DPAD_UP,
            Button::Down => button_flags::DPAD_DOWN,
            Button::Left => button_flags::DPAD_LEFT,
            Button::Right => button_flags::DPAD_RIGHT,
            Button::Back => button_flags::BACK,
            Button::Start => button_flags::START,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Button::A => "A",
            Button::B => "B",
            Button::X => "X",
            Button::Y => "Y",
            Button::LBumper => "LBumper",
            Button::RBumper => "RBumper",
            Button::LThumb => "LThumb",
            Button::RThumb => "RThumb",
            Button::Up => "Up",
            Button::Down => "Down",
            Button::Left => "Left",
            Button::Right => "Right",
            Button::Back => "Back",
            Button::Start => "Start",
        }
    }
}

/// Bits that belong to a named button.
const ALL_BITS: u16 = {
    let mut bits = 0;
    let mut i = 0;
    while i < Button::ALL.len() {
        bits |= Button::ALL[i].bit();
        i += 1;
    }
    bits
};

/// Pressed/released state of every button at one instant.
///
/// Compared structurally; `Default` is all released. Serializes as the list
/// of pressed buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Button>", from = "Vec<Button>")]
pub struct ButtonState {
    bits: u16,
}

impl ButtonState {
    /// Nothing pressed.
    pub const NONE: ButtonState = ButtonState { bits: 0 };

    /// Decode an XInput `wButtons` word. Bits with no named button are dropped.
    pub const fn from_xinput_flags(flags: u16) -> Self {
        Self { bits: flags & ALL_BITS }
    }

    /// Encode back into the XInput `wButtons` layout.
    pub const fn to_xinput_flags(self) -> u16 {
        self.bits
    }

    pub const fn is_pressed(self, button: Button) -> bool {
        self.bits & button.bit() != 0
    }

    /// Copy of this state with `button` pressed.
    pub const fn with(self, button: Button) -> Self {
        Self { bits: self.bits | button.bit() }
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        if pressed {
            self.bits |= button.bit();
        } else {
            self.bits &= !button.bit();
        }
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Pressed buttons in canonical order.
    pub fn pressed(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.is_pressed(*b))
    }
}

impl FromIterator<Button> for ButtonState {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter().fold(ButtonState::NONE, ButtonState::with)
    }
}

impl From<ButtonState> for Vec<Button> {
    fn from(state: ButtonState) -> Self {
        state.pressed().collect()
    }
}

impl From<Vec<Button>> for ButtonState {
    fn from(buttons: Vec<Button>) -> Self {
        buttons.into_iter().collect()
    }
}

/// Comma separated names of the pressed buttons, e.g. `A, LBumper, Start`.
impl fmt::Display for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, button) in self.pressed().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(button.name())?;
        }
        Ok(())
    }
}

/// Overall classification of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// At least one button went from released to pressed.
    Rose,
    /// No button was pressed, but at least one was released.
    Fell,
    Unchanged,
}

/// Classify the change from `prev` to `next`.
///
/// A press anywhere wins: if one button rises while another falls in the same
/// tick the result is [`Transition::Rose`]. Consumers rely on getting at most
/// one event per tick.
pub fn compare_states(prev: ButtonState, next: ButtonState) -> Transition {
    if !rising_edges(prev, next).is_empty() {
        Transition::Rose
    } else if !falling_edges(prev, next).is_empty() {
        Transition::Fell
    } else {
        Transition::Unchanged
    }
}

/// Buttons released in `prev` and pressed in `next`.
pub fn rising_edges(prev: ButtonState, next: ButtonState) -> ButtonState {
    ButtonState { bits: !prev.bits & next.bits }
}

/// Buttons pressed in `prev` and released in `next`.
pub fn falling_edges(prev: ButtonState, next: ButtonState) -> ButtonState {
    ButtonState { bits: prev.bits & !next.bits }
}
