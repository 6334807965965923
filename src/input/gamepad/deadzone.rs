//! Thumbstick deadzone algorithms.
//!
//! Each function maps a raw stick sample to a corrected vector so that input
//! near rest reads as exactly zero and the remaining travel is rescaled to
//! fill the full `[0, 1]` output range, without a jump at the deadzone edge.
//!
//! # Algorithms
//!
//! - [`scaled_radial`]: circular deadzone, magnitude rescaled along the
//!   stick direction
//! - [`sloped_scaled_axial`]: per-axis rescale with a threshold that slopes
//!   with the axis value
//! - [`hybrid`]: radial suppression and rescale followed by the axial pass,
//!   clipped to the unit square. This is what live stick output uses.
//!
//! All functions are pure. Inputs are not validated: a deadzone of `1.0`
//! divides by zero and yields NaN/infinity, so callers keep it below one.

use super::vector::{map_range, Vector2};
use serde::{Deserialize, Serialize};

/// Clamp each axis independently to `[-max, max]`, keeping its sign.
///
/// Values already inside the bound are returned unchanged.
pub fn clip(input: Vector2, max: f64) -> Vector2 {
    let mut result = input;
    if input.x.abs() > max {
        result.x = max * input.x.signum();
    }
    if input.y.abs() > max {
        result.y = max * input.y.signum();
    }
    result
}

/// Scaled radial deadzone.
///
/// Samples whose magnitude is below `deadzone` return the zero vector.
/// Otherwise the direction is kept and the magnitude is mapped from
/// `[deadzone, 1]` onto `[0, 1]`.
///
/// # Example
/// ```
/// use xcontroller::input::gamepad::deadzone::scaled_radial;
/// use xcontroller::input::gamepad::Vector2;
///
/// let out = scaled_radial(Vector2::new(1.0, 0.0), 0.15);
/// assert_eq!(out, Vector2::new(1.0, 0.0));
///
/// let out = scaled_radial(Vector2::new(0.1, 0.0), 0.15);
/// assert_eq!(out, Vector2::ZERO);
/// ```
pub fn scaled_radial(input: Vector2, deadzone: f64) -> Vector2 {
    let magnitude = input.magnitude();
    if magnitude < deadzone {
        return Vector2::ZERO;
    }

    let normalized = input / magnitude;
    normalized * map_range(magnitude, deadzone, 1.0, 0.0, 1.0)
}

/// Sloped scaled axial deadzone.
///
/// Each axis is rescaled on its own. The threshold for an axis is
/// `deadzone * |axis|`, and an axis that does not exceed its threshold is
/// zeroed. Signs are preserved per axis.
pub fn sloped_scaled_axial(input: Vector2, deadzone: f64) -> Vector2 {
    let threshold = Vector2::new(deadzone * input.x.abs(), deadzone * input.y.abs());
    let mut result = Vector2::ZERO;

    if input.x.abs() > threshold.x {
        result.x = input.x.signum() * map_range(input.x.abs(), threshold.x, 1.0, 0.0, 1.0);
    }
    if input.y.abs() > threshold.y {
        result.y = input.y.signum() * map_range(input.y.abs(), threshold.y, 1.0, 0.0, 1.0);
    }

    result
}

/// Hybrid deadzone: radial suppression, radial rescale, axial rescale, then
/// a clip to `1.0` per axis.
///
/// # Example
/// ```
/// use xcontroller::input::gamepad::deadzone::hybrid;
/// use xcontroller::input::gamepad::Vector2;
///
/// // Noise near rest is suppressed entirely
/// assert_eq!(hybrid(Vector2::new(0.05, 0.05), 0.15), Vector2::ZERO);
/// ```
pub fn hybrid(input: Vector2, deadzone: f64) -> Vector2 {
    if input.magnitude() < deadzone {
        return Vector2::ZERO;
    }

    let partial = scaled_radial(input, deadzone);
    clip(sloped_scaled_axial(partial, deadzone), 1.0)
}

/// Selectable deadzone algorithm.
///
/// Live stick output always goes through [`hybrid`]; the other modes exist
/// for side-by-side inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadzoneMode {
    /// Pass the sample through unchanged.
    None,
    ScaledRadial,
    SlopedScaledAxial,
    Hybrid,
}

impl DeadzoneMode {
    /// Every mode, in display order.
    pub const ALL: [DeadzoneMode; 4] = [
        DeadzoneMode::None,
        DeadzoneMode::ScaledRadial,
        DeadzoneMode::SlopedScaledAxial,
        DeadzoneMode::Hybrid,
    ];

    /// Run this mode's algorithm on one sample.
    pub fn apply(self, input: Vector2, deadzone: f64) -> Vector2 {
        match self {
            DeadzoneMode::None => input,
            DeadzoneMode::ScaledRadial => scaled_radial(input, deadzone),
            DeadzoneMode::SlopedScaledAxial => sloped_scaled_axial(input, deadzone),
            DeadzoneMode::Hybrid => hybrid(input, deadzone),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DeadzoneMode::None => "none",
            DeadzoneMode::ScaledRadial => "scaled_radial",
            DeadzoneMode::SlopedScaledAxial => "sloped_scaled_axial",
            DeadzoneMode::Hybrid => "hybrid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DEADZONE: f64 = 0.15;
    const EPS: f64 = 1e-9;

    #[test]
    fn test_clip_bounds_each_axis() {
        assert_eq!(clip(Vector2::new(1.5, -2.0), 1.0), Vector2::new(1.0, -1.0));
        assert_eq!(clip(Vector2::new(0.3, -0.7), 1.0), Vector2::new(0.3, -0.7));
        assert_eq!(clip(Vector2::new(-0.9, 0.2), 0.5), Vector2::new(-0.5, 0.2));
    }

    #[test]
    fn test_scaled_radial_inside_deadzone() {
        assert_eq!(scaled_radial(Vector2::new(0.1, 0.1), DEADZONE), Vector2::ZERO);
        assert_eq!(scaled_radial(Vector2::ZERO, DEADZONE), Vector2::ZERO);
    }

    #[test]
    fn test_scaled_radial_full_right() {
        let out = scaled_radial(Vector2::new(1.0, 0.0), DEADZONE);
        assert_eq!(out, Vector2::new(1.0, 0.0));
        assert_eq!(out.magnitude(), 1.0);
    }

    #[test]
    fn test_scaled_radial_zero_at_boundary() {
        let out = scaled_radial(Vector2::new(0.0, -DEADZONE), DEADZONE);
        assert!(out.magnitude() < EPS, "boundary output was {}", out);
    }

    #[test]
    fn test_scaled_radial_keeps_direction() {
        let input = Vector2::new(0.3, 0.4); // magnitude 0.5
        let out = scaled_radial(input, DEADZONE);
        let expected = (0.5 - DEADZONE) / (1.0 - DEADZONE);
        assert!((out.magnitude() - expected).abs() < EPS);
        assert!((out.x / out.y - 0.75).abs() < EPS);
    }

    #[test]
    fn test_sloped_scaled_axial_preserves_sign() {
        let out = sloped_scaled_axial(Vector2::new(-0.5, 0.5), DEADZONE);
        assert!(out.x < 0.0);
        assert!(out.y > 0.0);
        assert!((out.x + out.y).abs() < EPS);
    }

    #[test]
    fn test_sloped_scaled_axial_zero_axis_stays_zero() {
        let out = sloped_scaled_axial(Vector2::new(0.8, 0.0), DEADZONE);
        assert_eq!(out.y, 0.0);
        let threshold = DEADZONE * 0.8;
        assert_eq!(out.x, (0.8 - threshold) / (1.0 - threshold));
    }

    #[test]
    fn test_sloped_scaled_axial_full_deflection() {
        assert_eq!(
            sloped_scaled_axial(Vector2::new(1.0, -1.0), DEADZONE),
            Vector2::new(1.0, -1.0)
        );
    }

    #[test]
    fn test_hybrid_suppresses_noise() {
        // magnitude ~0.0707
        assert_eq!(hybrid(Vector2::new(0.05, 0.05), DEADZONE), Vector2::ZERO);
    }

    #[test]
    fn test_hybrid_full_right() {
        assert_eq!(hybrid(Vector2::new(1.0, 0.0), DEADZONE), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_hybrid_square_corner_is_clipped() {
        let out = hybrid(Vector2::new(1.0, 1.0), DEADZONE);
        assert!(out.x <= 1.0 && out.y <= 1.0);
        assert!(out.x > 0.0 && out.y > 0.0);
    }

    #[test]
    fn test_hybrid_mid_range_sample() {
        let input = Vector2::new(0.6, -0.2);

        // Radial stage, then the per-axis stage on its output
        let magnitude = input.magnitude();
        let radial = (input / magnitude) * map_range(magnitude, DEADZONE, 1.0, 0.0, 1.0);
        let expected = Vector2::new(
            map_range(radial.x.abs(), DEADZONE * radial.x.abs(), 1.0, 0.0, 1.0),
            -map_range(radial.y.abs(), DEADZONE * radial.y.abs(), 1.0, 0.0, 1.0),
        );

        let out = hybrid(input, DEADZONE);
        assert_eq!(out, expected);
        assert!((out.x - 0.49791410091066995).abs() < 1e-12, "x was {}", out.x);
        assert!((out.y + 0.15678707347340837).abs() < 1e-12, "y was {}", out.y);
    }

    #[test]
    fn test_zero_deadzone_disables_filtering() {
        let input = Vector2::new(0.3, -0.4);
        let out = scaled_radial(input, 0.0);
        assert!((out.x - input.x).abs() < EPS);
        assert!((out.y - input.y).abs() < EPS);
    }

    #[test]
    fn test_full_deadzone_divides_by_zero() {
        let out = scaled_radial(Vector2::new(1.0, 0.0), 1.0);
        assert!(out.x.is_nan());
    }

    #[test]
    fn test_mode_dispatch() {
        let input = Vector2::new(0.6, -0.2);
        assert_eq!(DeadzoneMode::None.apply(input, DEADZONE), input);
        assert_eq!(DeadzoneMode::Hybrid.apply(input, DEADZONE), hybrid(input, DEADZONE));
        assert_eq!(
            DeadzoneMode::ScaledRadial.apply(input, DEADZONE),
            scaled_radial(input, DEADZONE)
        );
        assert_eq!(
            DeadzoneMode::SlopedScaledAxial.apply(input, DEADZONE),
            sloped_scaled_axial(input, DEADZONE)
        );
    }

    fn unit_square() -> impl Strategy<Value = Vector2> {
        (-1.0f64..=1.0, -1.0f64..=1.0).prop_map(|(x, y)| Vector2::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_inside_deadzone_is_zero(
            angle in 0.0f64..std::f64::consts::TAU,
            fraction in 0.0f64..0.999,
            deadzone in 0.01f64..0.99,
        ) {
            let v = Vector2::new(angle.cos(), angle.sin()) * (fraction * deadzone);
            prop_assume!(v.magnitude() < deadzone);
            prop_assert_eq!(scaled_radial(v, deadzone), Vector2::ZERO);
            prop_assert_eq!(hybrid(v, deadzone), Vector2::ZERO);
        }

        #[test]
        fn prop_scaled_radial_magnitude_in_unit_range(
            angle in 0.0f64..std::f64::consts::TAU,
            t in 0.0f64..=1.0,
            deadzone in 0.01f64..0.99,
        ) {
            let v = Vector2::new(angle.cos(), angle.sin()) * (deadzone + t * (1.0 - deadzone));
            let out = scaled_radial(v, deadzone).magnitude();
            prop_assert!(out >= 0.0 && out <= 1.0 + EPS, "magnitude {}", out);
        }

        #[test]
        fn prop_scaled_radial_monotonic(
            angle in 0.0f64..std::f64::consts::TAU,
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
            deadzone in 0.01f64..0.99,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let dir = Vector2::new(angle.cos(), angle.sin());
            let out_lo = scaled_radial(dir * lo, deadzone).magnitude();
            let out_hi = scaled_radial(dir * hi, deadzone).magnitude();
            prop_assert!(out_lo <= out_hi + EPS);
        }

        #[test]
        fn prop_clip_bounds_and_sign(x in -3.0f64..3.0, y in -3.0f64..3.0, max in 0.01f64..2.0) {
            let out = clip(Vector2::new(x, y), max);
            prop_assert!(out.x.abs() <= max && out.y.abs() <= max);
            prop_assert!(out.x == 0.0 || out.x.signum() == x.signum());
            prop_assert!(out.y == 0.0 || out.y.signum() == y.signum());
            if x.abs() <= max { prop_assert_eq!(out.x, x); }
            if y.abs() <= max { prop_assert_eq!(out.y, y); }
        }

        #[test]
        fn prop_hybrid_within_unit_square(v in unit_square(), deadzone in 0.01f64..0.99) {
            let out = hybrid(v, deadzone);
            prop_assert!(out.x.abs() <= 1.0 && out.y.abs() <= 1.0);
        }
    }
}
