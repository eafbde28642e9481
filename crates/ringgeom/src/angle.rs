//! Angle convention shared by every ring.
//!
//! Screen angles put 0 rad at 3 o'clock and grow clockwise (y points down).
//! Slider degrees put 0° at 12 o'clock, so both conversions carry a fixed
//! quarter-turn offset. Folding into `[0, 360)` is left to callers.

use std::f64::consts::{FRAC_PI_2, PI};

/// Screen angle of slider degree 0 (12 o'clock).
pub const ZERO_ANGLE: f64 = -FRAC_PI_2;

#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    (degrees - 90.0) * (PI / 180.0)
}

#[inline]
pub fn to_degrees(radians: f64) -> f64 {
    (radians + FRAC_PI_2) * (180.0 / PI)
}
