//! World transform of a curtain group.
//!
//! Mirrors what a scene graph node carries: translation, rotation and
//! per-axis scale. The physics patch derives its anchor corners from
//! the translation and scale only.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use pleat_types::constants::EPSILON;

/// Translation, rotation, and scale applied to a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position.
    pub translation: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Builds a transform from a position, XYZ Euler angles (radians),
    /// and a uniform scale.
    pub fn from_euler(translation: Vec3, euler_xyz: [f32; 3], scale: f32) -> Self {
        Self {
            translation,
            rotation: Quat::from_euler(EulerRot::XYZ, euler_xyz[0], euler_xyz[1], euler_xyz[2]),
            scale: Vec3::splat(scale),
        }
    }

    /// Returns a transform that only translates.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Returns the 4×4 matrix `T * R * S`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Maps a point from local space into world space.
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.rotation * (local * self.scale) + self.translation
    }

    /// Maps a world-space point back into local space.
    ///
    /// Returns `None` when any scale component is (near) zero.
    #[inline]
    pub fn inverse_transform_point(&self, world: Vec3) -> Option<Vec3> {
        if !self.is_invertible() {
            return None;
        }
        Some((self.rotation.inverse() * (world - self.translation)) / self.scale)
    }

    /// True if every scale component is non-zero.
    pub fn is_invertible(&self) -> bool {
        self.scale.abs().min_element() > EPSILON
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
