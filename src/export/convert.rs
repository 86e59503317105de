//! Coordinate-system conversion and numeric rounding.
//!
//! The source scene is left-handed Y-up; the target format expects a
//! different convention. Matrices go through a fixed composed transform,
//! while raw vertex/normal components are simply re-ordered `(z, y, x)` —
//! the two conversions are intentionally different and must not be derived
//! from each other.

use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// Convert a local-to-world matrix into the target convention.
///
/// The composition is, in multiplication order: negate X, apply the node
/// transform, rotate 180° about X, rotate 90° about Y, negate Y.
pub fn to_export_space(local_to_world: Mat4) -> Mat4 {
    let negate_x = Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0));
    let rotate_x = Mat4::from_quat(Quat::from_axis_angle(Vec3::X, PI));
    let rotate_y = Mat4::from_quat(Quat::from_axis_angle(Vec3::Y, FRAC_PI_2));
    let negate_y = Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0));

    negate_x * local_to_world * rotate_x * rotate_y * negate_y
}

/// Round to `places` decimal places, halves away from zero.
///
/// `-0.0` is normalized to `0.0` so the rotation fuzz of near-zero matrix
/// components never prints a negative zero.
pub fn round_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// The 16 matrix components in column-major order, rounded for emission.
pub fn matrix_elements(m: Mat4, places: u32) -> Vec<f64> {
    m.to_cols_array()
        .iter()
        .map(|&c| round_places(f64::from(c), places))
        .collect()
}

/// Re-order a vector's components to `(z, y, x)` without rounding.
pub fn swizzle_zyx(v: Vec3) -> [f32; 3] {
    [v.z, v.y, v.x]
}

/// Re-order to `(z, y, x)` and round each component.
pub fn swizzle_zyx_rounded(v: Vec3, places: u32) -> [f64; 3] {
    [
        round_places(f64::from(v.z), places),
        round_places(f64::from(v.y), places),
        round_places(f64::from(v.x), places),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        // Pins the rounding policy: 0.125 at two places goes up, not to even.
        assert_eq!(round_places(0.125, 2), 0.13);
        assert_eq!(round_places(-0.125, 2), -0.13);
        assert_eq!(round_places(1.0049, 2), 1.0);
    }

    #[test]
    fn test_round_normalizes_negative_zero() {
        let r = round_places(-0.00001, 2);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn test_swizzle_is_component_reorder() {
        assert_eq!(swizzle_zyx(Vec3::new(1.0, 2.0, 3.0)), [3.0, 2.0, 1.0]);
        assert_eq!(
            swizzle_zyx_rounded(Vec3::new(1.0, 2.0, 3.0), 2),
            [3.0, 2.0, 1.0]
        );
    }

    #[test]
    fn test_identity_transform_export_matrix() {
        let elements = matrix_elements(to_export_space(Mat4::IDENTITY), 4);
        #[rustfmt::skip]
        let expected = vec![
            0.0, 0.0, 1.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -1.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        assert_eq!(elements, expected);
    }

    #[test]
    fn test_translation_survives_conversion() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let elements = matrix_elements(to_export_space(m), 4);
        // Negate-X on the left flips the translation's X; the right-hand
        // rotations and Y-negation only touch the basis columns.
        assert_eq!(&elements[12..16], &[-1.0, 2.0, 3.0, 1.0]);
    }
}
