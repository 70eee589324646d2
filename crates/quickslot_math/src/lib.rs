//! # quickslot_math - Geometry Utilities
//!
//! Small, allocation-free math primitives used on the per-frame path:
//! vectors, 3x3 rotation matrices, 3x4 tracked-device pose matrices and
//! the helpers that project headset-relative offsets into tracking space.

pub mod geometry;
pub mod matrix;
pub mod vector;

pub use geometry::*;
pub use matrix::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const EPSILON: f32 = 1e-6;
}

pub mod prelude {
    pub use crate::geometry::{squared_distance, transform, yaw_only_rotation};
    pub use crate::matrix::{Mat3, Mat34};
    pub use crate::vector::Vec3;
}
