// src/engine_lib/transform.rs
//
// Matrices here follow glam's column-vector convention: `m * v` applies `m`
// to `v`, and `b * a` applies `a` first. The per-axis rotation matrices
// match the row-vector operators the portal math was written against, so a
// row-vector product `v · M` becomes `m * v`, and `v · (A · B)` becomes
// `b * a * v`.

use std::fmt;

use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::engine_lib::scene_types::SceneError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    pub fn rotation_matrix(self, angle: f32) -> Mat3 {
        match self {
            Axis::X => Mat3::from_rotation_x(angle),
            Axis::Y => Mat3::from_rotation_y(angle),
            Axis::Z => Mat3::from_rotation_z(angle),
        }
    }
}

/// Order in which the per-axis Euler rotations are applied, first to last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RotationOrder(pub [Axis; 3]);

impl RotationOrder {
    /// Scene objects: X, then Y, then Z.
    pub const XYZ: Self = Self([Axis::X, Axis::Y, Axis::Z]);
    /// Observer orientation: yaw first, then pitch, then roll (Z∘X∘Y).
    pub const YXZ: Self = Self([Axis::Y, Axis::X, Axis::Z]);
}

impl Default for RotationOrder {
    fn default() -> Self {
        Self::XYZ
    }
}

/// Position, Euler rotation (radians) and scale of a scene object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    pub fn scale_matrix(&self) -> Mat4 {
        Mat4::from_scale(self.scale)
    }

    pub fn rotation_matrix(&self, order: RotationOrder) -> Mat3 {
        order.0.iter().fold(Mat3::IDENTITY, |acc, axis| {
            axis.rotation_matrix(axis.component(self.rotation)) * acc
        })
    }

    pub fn translation_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    /// Scale, then rotate, then translate.
    pub fn world_matrix(&self, order: RotationOrder) -> Mat4 {
        self.translation_matrix() * Mat4::from_mat3(self.rotation_matrix(order)) * self.scale_matrix()
    }

    /// Expresses `other` in this transform's local frame.
    ///
    /// The inverse world matrix is applied per field: the position as a point,
    /// rotation and scale as direction vectors. A frame with a zero scale
    /// component has no inverse and is rejected.
    pub fn to_local(&self, other: &Transform, order: RotationOrder) -> Result<Transform, SceneError> {
        if self.scale.abs().min_element() <= f32::EPSILON {
            return Err(SceneError::SingularScale { scale: self.scale });
        }

        let to_local = self.world_matrix(order).inverse();

        Ok(Transform {
            position: to_local.transform_point3(other.position),
            rotation: to_local.transform_vector3(other.rotation),
            scale: to_local.transform_vector3(other.scale),
        })
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P: {}, R: {}, S: {}", self.position, self.rotation, self.scale)
    }
}
