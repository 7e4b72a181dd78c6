//! Temporal transform utilities for physics simulation.
//!
//! This crate provides the per-step kinematics every rigid-body pipeline
//! runs: predicting a pose from velocities, recovering velocities from a
//! pair of poses, and conservatively tracking how much two convex bodies'
//! separation can have shrunk so the exact distance solver can be skipped
//! on most steps. It builds on [`sim_rotation`] for the quaternion algebra.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 SeparatingDistanceTracker                    │
//! │  Conservative bound: seeded by the exact solver, decayed    │
//! │  per step, collapsed when contact might be imminent         │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Velocity extraction                        │
//! │  Axis-angle difference of orientations, implied twist       │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │               Exponential-map integration                    │
//! │  Pose prediction under constant twist, clamped per step     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero engine dependencies**. It can be used
//! in headless stepping loops, continuous collision detection, and analysis
//! tools.
//!
//! # Quick Start
//!
//! ```
//! use sim_motion::{integrate_transform, SeparatingDistanceTracker};
//! use sim_rotation::Pose;
//! use nalgebra::{Point3, Vector3};
//!
//! // The exact solver reported 5 units of clearance along +X
//! // (the separating normal points from body B toward body A).
//! let pose_a = Pose::from_position(Point3::new(6.0, 0.0, 0.0));
//! let mut pose_b = Pose::from_position(Point3::new(0.0, 0.0, 0.0));
//! let mut tracker = SeparatingDistanceTracker::new(0.5, 0.5);
//! tracker.init_separating_distance(&Vector3::x(), 5.0, &pose_a, &pose_b);
//!
//! // Step the pair; B drifts toward A at 0.1 per step.
//! for _ in 0..10 {
//!     pose_b = integrate_transform(&pose_b, &Vector3::new(0.1, 0.0, 0.0), &Vector3::zeros(), 1.0);
//!     tracker.update_separating_distance(&pose_a, &pose_b);
//! }
//!
//! // Ten steps of 0.1 closing: the bound gave up 1.0 of its 5.0, and the
//! // exact solver never had to run.
//! assert!((tracker.conservative_separating_distance() - 4.0).abs() < 1e-9);
//! assert!(tracker.is_armed());
//! ```

#![doc(html_root_url = "https://docs.rs/sim-motion/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,         // The decrement formulas mirror their derivations
)]

mod error;
pub mod integrate;
pub mod separation;
pub mod support;
pub mod velocity;

pub use error::MotionError;
pub use integrate::{
    integrate_transform, integrate_transform_with, RotationIntegration, ANGULAR_MOTION_THRESHOLD,
};
pub use separation::SeparatingDistanceTracker;
pub use support::aabb_support;
pub use velocity::{
    calculate_diff_axis_angle, calculate_diff_axis_angle_quaternion, calculate_velocity,
    calculate_velocity_quaternion, Twist,
};

// Re-export the rotation types for convenience
pub use sim_rotation::{Pose, Quaternion};

/// Result type for motion operations.
pub type Result<T> = std::result::Result<T, MotionError>;
