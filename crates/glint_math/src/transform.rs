// Affine transform with an explicitly tracked inverse.
//
// Scene traversal composes transforms at every group node and needs the
// inverse at every leaf to map rays into local space. Recomputing the
// inverse per leaf would be wasteful and drifts numerically, so the
// inverse is carried alongside the matrix and composed in reverse order:
// if M = A * B then M^-1 = B^-1 * A^-1.

use glam::{Mat4, Vec3};
use thiserror::Error;

/// Determinants below this magnitude are treated as singular.
const MIN_DETERMINANT: f32 = 1e-8;

/// Errors from transform construction.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("transform matrix is singular (determinant {determinant})")]
    Singular { determinant: f32 },
}

/// A 4x4 affine transform paired with its inverse.
///
/// The pairing is an invariant: both fields always describe the same
/// transform, so the fields are private and every constructor either
/// derives the inverse analytically or validates invertibility up front.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Mat4,
    inverse: Mat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: Mat4::IDENTITY,
        inverse: Mat4::IDENTITY,
    };

    /// Build from an arbitrary matrix, computing the inverse once.
    ///
    /// Rejects matrices with near-zero determinant: a non-invertible
    /// local transform makes every intersection test under it
    /// meaningless, so this is a construction-time error rather than a
    /// per-ray failure.
    pub fn from_matrix(matrix: Mat4) -> Result<Self, TransformError> {
        let determinant = matrix.determinant();
        if determinant.abs() < MIN_DETERMINANT {
            return Err(TransformError::Singular { determinant });
        }
        Ok(Self {
            matrix,
            inverse: matrix.inverse(),
        })
    }

    /// Translation by `offset`.
    pub fn translation(offset: Vec3) -> Self {
        Self {
            matrix: Mat4::from_translation(offset),
            inverse: Mat4::from_translation(-offset),
        }
    }

    /// Rotation around the X axis by `angle` radians.
    pub fn rotation_x(angle: f32) -> Self {
        Self {
            matrix: Mat4::from_rotation_x(angle),
            inverse: Mat4::from_rotation_x(-angle),
        }
    }

    /// Rotation around the Y axis by `angle` radians.
    pub fn rotation_y(angle: f32) -> Self {
        Self {
            matrix: Mat4::from_rotation_y(angle),
            inverse: Mat4::from_rotation_y(-angle),
        }
    }

    /// Rotation around the Z axis by `angle` radians.
    pub fn rotation_z(angle: f32) -> Self {
        Self {
            matrix: Mat4::from_rotation_z(angle),
            inverse: Mat4::from_rotation_z(-angle),
        }
    }

    /// Non-uniform scale. A near-zero factor on any axis is singular.
    pub fn scale(factors: Vec3) -> Result<Self, TransformError> {
        let determinant = factors.x * factors.y * factors.z;
        if determinant.abs() < MIN_DETERMINANT {
            return Err(TransformError::Singular { determinant });
        }
        Ok(Self {
            matrix: Mat4::from_scale(factors),
            inverse: Mat4::from_scale(factors.recip()),
        })
    }

    /// Compose with a child transform: `self` applied after `local`.
    ///
    /// The resulting matrix is `self.matrix * local.matrix`; the
    /// inverse multiplies in the opposite order.
    pub fn then(&self, local: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * local.matrix,
            inverse: local.inverse * self.inverse,
        }
    }

    /// The forward (local-to-world) matrix.
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// The tracked inverse (world-to-local) matrix.
    #[inline]
    pub fn inverse(&self) -> Mat4 {
        self.inverse
    }

    /// Transform a point (w = 1): rotation, scale, and translation apply.
    pub fn point_to_world(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    /// Transform a direction (w = 0): translation does not apply.
    /// Length is not preserved under non-uniform scale.
    pub fn dir_to_world(&self, dir: Vec3) -> Vec3 {
        self.matrix.transform_vector3(dir)
    }

    /// Map a world-space point into this transform's local frame.
    pub fn point_to_local(&self, point: Vec3) -> Vec3 {
        self.inverse.transform_point3(point)
    }

    /// Map a world-space direction into this transform's local frame.
    pub fn dir_to_local(&self, dir: Vec3) -> Vec3 {
        self.inverse.transform_vector3(dir)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
