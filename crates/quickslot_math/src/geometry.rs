//! Geometry helpers for the per-frame slot transform and overlap scan

use crate::consts::EPSILON;
use crate::matrix::{Mat3, Mat34};
use crate::vector::Vec3;

/// Squared euclidean distance. The overlap scan compares against squared
/// radii so it never takes a square root.
#[inline]
pub fn squared_distance(a: Vec3, b: Vec3) -> f32 {
    let d = a - b;
    d.x * d.x + d.y * d.y + d.z * d.z
}

/// Extract the rotation around the vertical (Y) axis from a device pose.
///
/// Pitch and roll are discarded so headset-relative points stay level when
/// the player nods or tilts. The heading is taken from the pose's right
/// vector (column 0), which pitch does not disturb; if that vector is
/// vertical the forward column is used instead. A pose with no usable
/// horizontal component yields the identity.
pub fn yaw_only_rotation(pose: &Mat34) -> Mat3 {
    let m = &pose.m;

    let (cos, sin) = if let Some((x, z)) = normalize_2d(m[0][0], m[2][0]) {
        // right vector = (cos, 0, -sin)
        (x, -z)
    } else if let Some((x, z)) = normalize_2d(m[0][2], m[2][2]) {
        // forward column = (sin, 0, cos)
        (z, x)
    } else {
        return Mat3::IDENTITY;
    };

    Mat3::from_cols(
        Vec3::new(cos, 0.0, -sin),
        Vec3::Y,
        Vec3::new(sin, 0.0, cos),
    )
}

/// Standard 3x3 linear transform
#[inline]
pub fn transform(matrix: &Mat3, vector: Vec3) -> Vec3 {
    *matrix * vector
}

fn normalize_2d(x: f32, z: f32) -> Option<(f32, f32)> {
    let len_sq = x * x + z * z;
    if len_sq > EPSILON && len_sq.is_finite() {
        let len = len_sq.sqrt();
        Some((x / len, z / len))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length_squared() < 1e-8
    }

    #[test]
    fn test_squared_distance() {
        assert_eq!(squared_distance(Vec3::ZERO, Vec3::new(0.15, 0.0, 0.0)), 0.15 * 0.15);
        assert_eq!(squared_distance(Vec3::ONE, Vec3::ONE), 0.0);
    }

    #[test]
    fn test_yaw_identity_pose() {
        assert_eq!(yaw_only_rotation(&Mat34::IDENTITY), Mat3::IDENTITY);
    }

    #[test]
    fn test_yaw_matches_pure_yaw() {
        let yaw = Mat3::from_rotation_y(0.7);
        let pose = Mat34::from_rotation_translation(yaw, Vec3::new(0.0, 1.7, 0.0));
        let extracted = yaw_only_rotation(&pose);

        for v in [Vec3::X, Vec3::Z, Vec3::new(0.3, -0.5, 0.2)] {
            assert!(approx(extracted * v, yaw * v));
        }
    }

    #[test]
    fn test_yaw_discards_pitch() {
        let yaw = Mat3::from_rotation_y(0.4);
        let pitched = yaw * Mat3::from_rotation_x(0.6);
        let pose = Mat34::from_rotation_translation(pitched, Vec3::ZERO);
        let extracted = yaw_only_rotation(&pose);

        let offset = Vec3::new(0.2, -0.4, 0.1);
        assert!(approx(extracted * offset, yaw * offset));
        // vertical offsets never tilt
        assert!(approx(extracted * Vec3::Y, Vec3::Y));
    }

    #[test]
    fn test_yaw_degenerate_right_vector() {
        // right vector pointing straight up: fall back to the forward column
        let pose = Mat34::new([
            [0.0, 0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
        ]);
        let extracted = yaw_only_rotation(&pose);
        assert!(approx(extracted * Vec3::Z, Vec3::X));
        assert!(approx(extracted * Vec3::X, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_transform() {
        let m = Mat3::from_rotation_y(FRAC_PI_2);
        assert!(approx(transform(&m, Vec3::Z), Vec3::X));
    }
}
