//! Implied-velocity extraction from pose pairs.
//!
//! Continuous collision detection runs backwards from integration: given the
//! pose at the start and end of a step, recover the constant linear and
//! angular velocity that would produce that motion. The angular part is an
//! axis-angle difference of the two orientations, with the quaternion double
//! cover resolved so the recovered rotation never takes the long way around.

use nalgebra::{Point3, Vector3};
use sim_rotation::{Pose, Quaternion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear and angular velocity of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Twist {
    /// Linear velocity in world coordinates (m/s).
    pub linear: Vector3<f64>,
    /// Angular velocity in world coordinates (rad/s).
    pub angular: Vector3<f64>,
}

impl Default for Twist {
    fn default() -> Self {
        Self::zero()
    }
}

impl Twist {
    /// Create a twist with specified linear and angular velocity.
    #[must_use]
    pub const fn new(linear: Vector3<f64>, angular: Vector3<f64>) -> Self {
        Self { linear, angular }
    }

    /// Create a zero twist (at rest).
    #[must_use]
    pub fn zero() -> Self {
        Self {
            linear: Vector3::zeros(),
            angular: Vector3::zeros(),
        }
    }

    /// Create a twist with linear velocity only.
    #[must_use]
    pub fn from_linear(v: Vector3<f64>) -> Self {
        Self {
            linear: v,
            angular: Vector3::zeros(),
        }
    }

    /// Create a twist with angular velocity only.
    #[must_use]
    pub fn from_angular(omega: Vector3<f64>) -> Self {
        Self {
            linear: Vector3::zeros(),
            angular: omega,
        }
    }

    /// Check if the twist contains `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.linear.iter().all(|x| x.is_finite()) && self.angular.iter().all(|x| x.is_finite())
    }
}

/// Normalize the vector part of a relative rotation into an axis.
///
/// Near-zero rotations have an indeterminate axis; unit X stands in so the
/// caller always gets a finite unit vector.
fn diff_axis(dorn: &Quaternion) -> Vector3<f64> {
    let axis = Vector3::new(dorn.x, dorn.y, dorn.z);
    let len2 = axis.norm_squared();
    if len2 < f64::EPSILON * f64::EPSILON {
        Vector3::x()
    } else {
        axis / len2.sqrt()
    }
}

/// Compute the axis and angle rotating `pose0`'s orientation onto `pose1`'s,
/// going through the rotation matrices.
///
/// The relative basis `basis1 * basis0ᵀ` is converted back to a quaternion
/// and renormalized before the angle is read: floating-point drift can push
/// the scalar part past one, which would turn the `acos` into NaN.
///
/// Returns a unit axis and a non-negative angle. The conversion does not
/// pick a hemisphere, so for relative rotations beyond 120 degrees the pair
/// may describe the turn the long way around; the quaternion path resolves
/// that (see [`calculate_diff_axis_angle_quaternion`]).
#[must_use]
pub fn calculate_diff_axis_angle(pose0: &Pose, pose1: &Pose) -> (Vector3<f64>, f64) {
    let dmat = pose1.basis() * pose0.basis().transpose();
    let dorn = Quaternion::from_rotation_matrix(&dmat).normalize();
    let angle = dorn.angle();
    (diff_axis(&dorn), angle)
}

/// Compute the axis and angle rotating `orn0` onto `orn1`.
///
/// `orn1` is first flipped onto `orn0`'s hemisphere so the extracted
/// rotation is the short one; the relative rotation is then
/// `orn1 * orn0⁻¹`.
///
/// Returns a unit axis and an angle in `[0, π]`.
#[must_use]
pub fn calculate_diff_axis_angle_quaternion(
    orn0: &Quaternion,
    orn1: &Quaternion,
) -> (Vector3<f64>, f64) {
    let orn1_aligned = orn0.nearest(orn1);
    let dorn = orn1_aligned * orn0.inverse();
    let angle = dorn.angle();
    (diff_axis(&dorn), angle)
}

/// Recover the constant velocity carrying `pose0` to `pose1` over `dt`.
#[must_use]
pub fn calculate_velocity(pose0: &Pose, pose1: &Pose, dt: f64) -> Twist {
    debug_assert!(dt != 0.0, "velocity over a zero timestep is undefined");
    let linear = (pose1.position - pose0.position) / dt;
    let (axis, angle) = calculate_diff_axis_angle(pose0, pose1);
    Twist::new(linear, axis * angle / dt)
}

/// Recover the constant velocity carrying `(pos0, orn0)` to `(pos1, orn1)`
/// over `dt`.
///
/// Identical orientations short-circuit to zero angular velocity without
/// touching the axis fallback.
#[must_use]
pub fn calculate_velocity_quaternion(
    pos0: &Point3<f64>,
    pos1: &Point3<f64>,
    orn0: &Quaternion,
    orn1: &Quaternion,
    dt: f64,
) -> Twist {
    debug_assert!(dt != 0.0, "velocity over a zero timestep is undefined");
    let linear = (pos1 - pos0) / dt;
    let angular = if orn0 == orn1 {
        Vector3::zeros()
    } else {
        let (axis, angle) = calculate_diff_axis_angle_quaternion(orn0, orn1);
        axis * angle / dt
    };
    Twist::new(linear, angular)
}
