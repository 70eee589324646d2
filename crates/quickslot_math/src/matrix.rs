//! Matrix types for transformations

use crate::vector::Vec3;
use core::ops::Mul;

/// 3x3 matrix (column-major)
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    pub cols: [Vec3; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        cols: [Vec3::X, Vec3::Y, Vec3::Z],
    };

    #[inline]
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Rotation of `angle` radians around +Y
    #[inline]
    pub fn from_rotation_y(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols(
            Vec3::new(cos, 0.0, -sin),
            Vec3::Y,
            Vec3::new(sin, 0.0, cos),
        )
    }

    /// Rotation of `angle` radians around +X
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_cols(
            Vec3::X,
            Vec3::new(0.0, cos, sin),
            Vec3::new(0.0, -sin, cos),
        )
    }

}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.cols[0] * rhs.x + self.cols[1] * rhs.y + self.cols[2] * rhs.z
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(self * rhs.cols[0], self * rhs.cols[1], self * rhs.cols[2])
    }
}

/// 3x4 row-major device-to-tracking matrix, as reported by the VR runtime.
///
/// The left 3x3 block is the orientation, column 3 the position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Mat34 {
    pub m: [[f32; 4]; 3],
}

impl Mat34 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
    };

    #[inline]
    pub const fn new(m: [[f32; 4]; 3]) -> Self {
        Self { m }
    }

    /// Compose from an orientation and a position
    pub fn from_rotation_translation(rotation: Mat3, translation: Vec3) -> Self {
        let [c0, c1, c2] = rotation.cols;
        Self {
            m: [
                [c0.x, c1.x, c2.x, translation.x],
                [c0.y, c1.y, c2.y, translation.y],
                [c0.z, c1.z, c2.z, translation.z],
            ],
        }
    }

    /// Pure translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_rotation_translation(Mat3::IDENTITY, translation)
    }

    /// Position column
    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.m[0][3], self.m[1][3], self.m[2][3])
    }
}

impl Default for Mat34 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
