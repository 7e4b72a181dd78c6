//! Conservative separating-distance tracking for convex body pairs.
//!
//! Exact closest-distance queries between convex shapes are iterative and
//! expensive. Most simulation steps move a pair of bodies by a small
//! fraction of their separation, so instead of re-running the exact solver
//! every step, [`SeparatingDistanceTracker`] maintains a cheap lower bound
//! on the current distance and decrements it by the worst-case approach the
//! step could have caused. The exact solver only needs to run again once
//! the bound collapses to zero.
//!
//! The bound is safe because both decrement terms overestimate:
//!
//! - rotation by angle θ moves a surface point of a body with bounding
//!   radius `r` at most `θ·r`, regardless of where the point sits;
//! - translation reduces the separation at most by the relative motion
//!   projected on the separating normal, and motion away from the other
//!   body (negative projection) is clamped out entirely.

use nalgebra::{Point3, Vector3};
use sim_rotation::{Pose, Quaternion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MotionError;
use crate::velocity::calculate_velocity_quaternion;

/// Conservative lower bound on the closest distance between two convex
/// bodies, updated incrementally from their pose history.
///
/// The tracker has two logical states. While the tracked distance is
/// positive it is **armed**: the bound is meaningful and each
/// [`update_separating_distance`] call shrinks it by the worst case the
/// step allows. Once the distance reaches zero or below it is
/// **collapsed**: the bound carries no information and the caller must
/// re-run the exact solver, then re-seed with
/// [`init_separating_distance`].
///
/// The stored separating normal points from body B toward body A, the
/// direction the exact solver reports its witness axis; closing motion of
/// B relative to A therefore projects positively onto it.
///
/// # Example
///
/// ```
/// use sim_motion::SeparatingDistanceTracker;
/// use sim_rotation::Pose;
/// use nalgebra::{Point3, Vector3};
///
/// let mut tracker = SeparatingDistanceTracker::new(1.0, 1.0);
///
/// // Exact solver found the bodies 10 apart along +X (normal points B -> A).
/// let pose_a = Pose::from_position(Point3::new(12.0, 0.0, 0.0));
/// let pose_b = Pose::from_position(Point3::new(0.0, 0.0, 0.0));
/// tracker.init_separating_distance(&Vector3::x(), 10.0, &pose_a, &pose_b);
///
/// // B translates 1 unit toward A: the bound gives up exactly that much.
/// let pose_b = Pose::from_position(Point3::new(1.0, 0.0, 0.0));
/// tracker.update_separating_distance(&pose_a, &pose_b);
/// assert!((tracker.conservative_separating_distance() - 9.0).abs() < 1e-9);
/// ```
///
/// [`update_separating_distance`]: SeparatingDistanceTracker::update_separating_distance
/// [`init_separating_distance`]: SeparatingDistanceTracker::init_separating_distance
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeparatingDistanceTracker {
    orn_a: Quaternion,
    orn_b: Quaternion,
    pos_a: Point3<f64>,
    pos_b: Point3<f64>,
    separating_normal: Vector3<f64>,
    bounding_radius_a: f64,
    bounding_radius_b: f64,
    separating_distance: f64,
    warned_non_finite: bool,
}

impl SeparatingDistanceTracker {
    /// Create a tracker for a body pair with fixed bounding-sphere radii.
    ///
    /// Each radius is the maximum distance from that body's reference point
    /// to any point on its surface; it stays fixed for the pair's lifetime.
    /// The tracker starts collapsed and must be seeded by
    /// [`SeparatingDistanceTracker::init_separating_distance`].
    #[must_use]
    pub fn new(bounding_radius_a: f64, bounding_radius_b: f64) -> Self {
        Self {
            orn_a: Quaternion::IDENTITY,
            orn_b: Quaternion::IDENTITY,
            pos_a: Point3::origin(),
            pos_b: Point3::origin(),
            separating_normal: Vector3::zeros(),
            bounding_radius_a,
            bounding_radius_b,
            separating_distance: 0.0,
            warned_non_finite: false,
        }
    }

    /// Seed (or re-seed) the bound from an exact solver result.
    ///
    /// Arms the tracker when `separating_distance` is positive, storing the
    /// normal and both poses as the new baseline. A non-positive distance
    /// leaves the tracker collapsed; the value is still stored so
    /// [`SeparatingDistanceTracker::conservative_separating_distance`]
    /// reports what the solver said.
    ///
    /// `separating_vector` must be unit length and point from body B toward
    /// body A (checked in debug builds when arming).
    pub fn init_separating_distance(
        &mut self,
        separating_vector: &Vector3<f64>,
        separating_distance: f64,
        pose_a: &Pose,
        pose_b: &Pose,
    ) {
        if !separating_distance.is_finite() && !self.warned_non_finite {
            tracing::warn!(
                distance = separating_distance,
                "non-finite separating distance seeded; tracker stays collapsed"
            );
            self.warned_non_finite = true;
        }

        self.separating_distance = separating_distance;

        if self.separating_distance > 0.0 {
            debug_assert!(
                (separating_vector.norm() - 1.0).abs() < 1.0e-6,
                "separating vector must be unit length"
            );
            self.separating_normal = *separating_vector;

            self.pos_a = pose_a.position;
            self.pos_b = pose_b.position;
            self.orn_a = pose_a.rotation;
            self.orn_b = pose_b.rotation;
        }
    }

    /// Advance the bound by one simulation step.
    ///
    /// Call once per step, at a uniform cadence: the implied velocities are
    /// derived over a unit interval from the previous call's poses, so the
    /// decrement is per-call, not per-second. While armed, subtracts the
    /// worst-case approach
    ///
    /// ```text
    /// |ωA|·rA + |ωB|·rB + max(0, (vB − vA)·normal)
    /// ```
    ///
    /// from the stored distance. The new poses become the baseline for the
    /// next call whether or not the bound survives.
    pub fn update_separating_distance(&mut self, pose_a: &Pose, pose_b: &Pose) {
        if self.separating_distance > 0.0 {
            let vel_a = calculate_velocity_quaternion(
                &self.pos_a,
                &pose_a.position,
                &self.orn_a,
                &pose_a.rotation,
                1.0,
            );
            let vel_b = calculate_velocity_quaternion(
                &self.pos_b,
                &pose_b.position,
                &self.orn_b,
                &pose_b.rotation,
                1.0,
            );
            let max_angular_projected_velocity = vel_a.angular.norm() * self.bounding_radius_a
                + vel_b.angular.norm() * self.bounding_radius_b;

            let rel_lin_vel = vel_b.linear - vel_a.linear;
            let mut rel_lin_veloc_length = rel_lin_vel.dot(&self.separating_normal);
            if rel_lin_veloc_length < 0.0 {
                // Separating motion cannot shrink the bound.
                rel_lin_veloc_length = 0.0;
            }

            let projected_motion = max_angular_projected_velocity + rel_lin_veloc_length;
            self.separating_distance -= projected_motion;
        }

        self.pos_a = pose_a.position;
        self.pos_b = pose_b.position;
        self.orn_a = pose_a.rotation;
        self.orn_b = pose_b.rotation;
    }

    /// Return the current conservative bound.
    ///
    /// Positive means the bodies are provably at least this far apart.
    /// Zero or below means the bound is exhausted and only the exact solver
    /// can answer.
    #[must_use]
    pub fn conservative_separating_distance(&self) -> f64 {
        self.separating_distance
    }

    /// Check whether the bound is currently meaningful (distance > 0).
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.separating_distance > 0.0
    }

    /// Validate the tracker's numeric state.
    ///
    /// Radii must be finite and non-negative; an armed tracker must carry a
    /// finite distance, normal, and baseline poses.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.bounding_radius_a.is_finite() || self.bounding_radius_a < 0.0 {
            return Err(MotionError::InvalidBoundingRadius(self.bounding_radius_a));
        }
        if !self.bounding_radius_b.is_finite() || self.bounding_radius_b < 0.0 {
            return Err(MotionError::InvalidBoundingRadius(self.bounding_radius_b));
        }

        if !self.separating_distance.is_finite() {
            return Err(MotionError::diverged("separating distance is not finite"));
        }

        if self.is_armed() {
            if !self.separating_normal.iter().all(|x| x.is_finite()) {
                return Err(MotionError::diverged("separating normal is not finite"));
            }
            let poses_finite = self.pos_a.coords.iter().all(|x| x.is_finite())
                && self.pos_b.coords.iter().all(|x| x.is_finite())
                && self.orn_a.is_finite()
                && self.orn_b.is_finite();
            if !poses_finite {
                return Err(MotionError::diverged("baseline poses are not finite"));
            }
        }

        Ok(())
    }
}
