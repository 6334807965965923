//! Two-dimensional stick vector and the linear range map shared by the
//! deadzone algorithms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul};

/// A stick position relative to the center.
///
/// Raw samples live in `[-1, 1] x [-1, 1]`. Values are produced by value and
/// never mutated in place by the normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Vector2 {
    /// The rest position.
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, scalar: f64) -> Vector2 {
        Vector2::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, divisor: f64) -> Vector2 {
        Vector2::new(self.x / divisor, self.y / divisor)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {:.3}, Y: {:.3}", self.x, self.y)
    }
}

/// Linearly map `value` from `[old_min, old_max]` onto `[new_min, new_max]`.
///
/// The evaluation order is fixed so results are bit-for-bit reproducible.
/// No clamping is performed; `old_min == old_max` divides by zero.
pub fn map_range(value: f64, old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> f64 {
    new_min + (new_max - new_min) * (value - old_min) / (old_max - old_min)
}
