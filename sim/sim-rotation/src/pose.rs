//! Rigid pose: position plus orientation.

use nalgebra::{Matrix3, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Quaternion;

/// Position and orientation of a rigid body in world space.
///
/// The orientation is a [`Quaternion`] kept at (or renormalized back to)
/// unit length by whoever produced it; the pose itself never renormalizes.
///
/// # Example
///
/// ```
/// use sim_rotation::{Pose, Quaternion};
/// use nalgebra::{Point3, Vector3};
///
/// let pose = Pose::from_position_rotation(
///     Point3::new(1.0, 0.0, 0.0),
///     Quaternion::from_axis_angle(&Vector3::z(), std::f64::consts::FRAC_PI_2),
/// );
/// let world = pose.transform_point(&Point3::new(1.0, 0.0, 0.0));
/// assert!((world.x - 1.0).abs() < 1e-12);
/// assert!((world.y - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// Position in world coordinates.
    pub position: Point3<f64>,
    /// Orientation as a unit quaternion.
    pub rotation: Quaternion,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Create an identity pose (origin, no rotation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: Quaternion::IDENTITY,
        }
    }

    /// Create a pose from position only (identity rotation).
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            rotation: Quaternion::IDENTITY,
        }
    }

    /// Create a pose from position and rotation.
    #[must_use]
    pub const fn from_position_rotation(position: Point3<f64>, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Return the orientation as a 3x3 rotation matrix.
    #[must_use]
    pub fn basis(&self) -> Matrix3<f64> {
        self.rotation.to_rotation_matrix()
    }

    /// Transform a point from local to world coordinates.
    #[must_use]
    pub fn transform_point(&self, local: &Point3<f64>) -> Point3<f64> {
        self.position + self.rotation.rotate(&local.coords)
    }

    /// Transform a vector from local to world coordinates (rotation only).
    #[must_use]
    pub fn transform_vector(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation.rotate(local)
    }

    /// Transform a point from world to local coordinates.
    #[must_use]
    pub fn inverse_transform_point(&self, world: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation.inverse().rotate(&(world - self.position)))
    }

    /// Transform a vector from world to local coordinates.
    #[must_use]
    pub fn inverse_transform_vector(&self, world: &Vector3<f64>) -> Vector3<f64> {
        self.rotation.inverse().rotate(world)
    }

    /// Compute the inverse pose.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            position: Point3::from(-inv_rotation.rotate(&self.position.coords)),
            rotation: inv_rotation,
        }
    }

    /// Compose two poses: `self * other`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(&other.position),
            rotation: self.rotation * other.rotation,
        }
    }

    /// Interpolate between two poses.
    ///
    /// Positions interpolate linearly, rotations by slerp along the
    /// shorter arc.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            position: Point3::from(self.position.coords.lerp(&other.position.coords, t)),
            rotation: self.rotation.slerp(&other.rotation, t),
        }
    }

    /// Check if the pose contains `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|x| x.is_finite()) && self.rotation.is_finite()
    }
}
