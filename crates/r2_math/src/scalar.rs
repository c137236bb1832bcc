//! Scalar helpers shared by every vector, quaternion and matrix type

use std::f32::consts::PI;

/// Absolute tolerance used whenever two floats are compared for equality.
///
/// This is not a relative or ULP comparison: values with large magnitudes
/// will rarely compare equal after any arithmetic.
pub const EPSILON: f32 = 0.000_000_954;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f32 = PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f32 = 180.0 / PI;

/// Returns true if `a` and `b` are within [`EPSILON`] of each other
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// Convert an angle in degrees to radians
#[inline]
pub fn deg_to_rad(d: f32) -> f32 {
    d * DEG_TO_RAD
}

/// Convert an angle in radians to degrees
#[inline]
pub fn rad_to_deg(r: f32) -> f32 {
    r * RAD_TO_DEG
}

/// Divisor used by the vector `/` operators: exactly zero becomes one.
#[inline]
pub(crate) fn safe_divisor(d: f32) -> f32 {
    if d == 0.0 {
        1.0
    } else {
        d
    }
}

/// Euclidean norm of `components`
///
/// Sums squares directly when that stays in the normal range, otherwise
/// rescales by the largest magnitude so finite inputs give a finite length.
pub(crate) fn norm(components: &[f32]) -> f32 {
    let sum_sq: f32 = components.iter().map(|c| c * c).sum();
    if sum_sq.is_finite() && sum_sq >= f32::MIN_POSITIVE {
        return sum_sq.sqrt();
    }

    let scale = components.iter().fold(0.0f32, |m, c| m.max(c.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return sum_sq.sqrt();
    }
    let scaled: f32 = components
        .iter()
        .map(|c| {
            let s = c / scale;
            s * s
        })
        .sum();
    scale * scaled.sqrt()
}
