//! Rotation algebra for physics simulation.
//!
//! This crate provides the rotation foundation other simulation crates build
//! on:
//!
//! - [`Quaternion`] - Rotation algebra with the double cover exposed
//! - [`Pose`] - Position plus orientation of a rigid body
//!
//! # Design Philosophy
//!
//! [`Quaternion`] is deliberately **not** a constrained unit type. Pose
//! integration steps through non-unit intermediates (a scaled axis
//! quaternion, a sum of derivative terms) before renormalizing, and
//! difference extraction needs raw component access to resolve the `q`/`-q`
//! ambiguity. The invariant "unit length at rest" is owned by the call
//! sites that produce orientations, not enforced per operation.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero engine dependencies**. It can be used
//! in headless stepping loops, analysis tools, and other engines.
//!
//! # Example
//!
//! ```
//! use sim_rotation::{Pose, Quaternion};
//! use nalgebra::{Point3, Vector3};
//!
//! let pose = Pose::from_position_rotation(
//!     Point3::new(0.0, 0.0, 1.0),
//!     Quaternion::from_axis_angle(&Vector3::z(), 0.5),
//! );
//!
//! assert!(pose.is_finite());
//! assert!((pose.rotation.angle() - 0.5).abs() < 1e-12);
//! ```

#![doc(html_root_url = "https://docs.rs/sim-rotation/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
// Allow certain clippy lints that are overly pedantic for math kernels
#![allow(
    clippy::missing_const_for_fn,     // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,         // The component formulas mirror their derivations
)]

mod pose;
mod quaternion;

pub use pose::Pose;
pub use quaternion::Quaternion;

// Re-export math types for convenience
pub use nalgebra::{Matrix3, Point3, Vector3};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_with_quaternion() {
        let pose = Pose::from_position_rotation(
            Point3::new(1.0, 0.0, 0.0),
            Quaternion::from_axis_angle(&Vector3::z(), std::f64::consts::FRAC_PI_2),
        );

        let local = Point3::new(1.0, 0.0, 0.0);
        let world = pose.transform_point(&local);

        // After 90 degrees around Z, local (1,0,0) lands on (0,1,0), plus the
        // (1,0,0) translation.
        assert!((world.x - 1.0).abs() < 1e-10);
        assert!((world.y - 1.0).abs() < 1e-10);
    }
}
