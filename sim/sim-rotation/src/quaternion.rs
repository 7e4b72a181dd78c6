//! Quaternion rotation algebra.
//!
//! The [`Quaternion`] type represents 3D rotations with the scalar part
//! stored last (`x`, `y`, `z`, `w`). Unlike a constrained unit-quaternion
//! wrapper, all four components are public and the algebra (sums, scalar
//! scaling, Hamilton products) is exposed directly: integration and
//! interpolation code needs to step through non-unit intermediates before
//! renormalizing.
//!
//! Unit quaternions double-cover rotation space: `q` and `-q` encode the
//! same rotation. Operations that compare or interpolate two quaternions
//! ([`Quaternion::nearest`], [`Quaternion::slerp`],
//! [`Quaternion::shortest_path_angle_to`]) resolve that ambiguity
//! explicitly; the component-wise operators do not.

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rotation represented as a quaternion with scalar part last.
///
/// The layout is four consecutive `f64` components aligned to 32 bytes, so
/// a quaternion occupies exactly one AVX register and arrays of them stay
/// cache-line friendly. All hot-path operations are written as plain scalar
/// arithmetic on the components, which the compiler auto-vectorizes.
///
/// # Example
///
/// ```
/// use sim_rotation::Quaternion;
/// use nalgebra::Vector3;
///
/// // Quarter turn around Z maps +X onto +Y.
/// let q = Quaternion::from_axis_angle(&Vector3::z(), std::f64::consts::FRAC_PI_2);
/// let v = q.rotate(&Vector3::x());
/// assert!((v.y - 1.0).abs() < 1e-12);
/// ```
#[repr(C, align(32))]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion {
    /// First vector component.
    pub x: f64,
    /// Second vector component.
    pub y: f64,
    /// Third vector component.
    pub z: f64,
    /// Scalar component.
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The identity rotation `(0, 0, 0, 1)`.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Create a quaternion from raw components, scalar part last.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a rotation of `angle` radians around `axis`.
    ///
    /// The axis does not need to be normalized, but it must be non-zero;
    /// a zero axis is a caller error (checked in debug builds).
    #[must_use]
    pub fn from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Self {
        let d = axis.norm();
        debug_assert!(d != 0.0, "rotation axis must be non-zero");
        let s = (angle * 0.5).sin() / d;
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: (angle * 0.5).cos(),
        }
    }

    /// Create a rotation from Euler angles: yaw around Y, pitch around X,
    /// roll around Z.
    #[must_use]
    pub fn from_euler(yaw: f64, pitch: f64, roll: f64) -> Self {
        let (sin_yaw, cos_yaw) = (yaw * 0.5).sin_cos();
        let (sin_pitch, cos_pitch) = (pitch * 0.5).sin_cos();
        let (sin_roll, cos_roll) = (roll * 0.5).sin_cos();
        Self {
            x: cos_roll * sin_pitch * cos_yaw + sin_roll * cos_pitch * sin_yaw,
            y: cos_roll * cos_pitch * sin_yaw - sin_roll * sin_pitch * cos_yaw,
            z: sin_roll * cos_pitch * cos_yaw - cos_roll * sin_pitch * sin_yaw,
            w: cos_roll * cos_pitch * cos_yaw + sin_roll * sin_pitch * sin_yaw,
        }
    }

    /// Create a rotation from Euler angles: yaw around Z, pitch around Y,
    /// roll around X (the aerospace Z-Y-X convention).
    #[must_use]
    pub fn from_euler_zyx(yaw: f64, pitch: f64, roll: f64) -> Self {
        let (sin_yaw, cos_yaw) = (yaw * 0.5).sin_cos();
        let (sin_pitch, cos_pitch) = (pitch * 0.5).sin_cos();
        let (sin_roll, cos_roll) = (roll * 0.5).sin_cos();
        Self {
            x: sin_roll * cos_pitch * cos_yaw - cos_roll * sin_pitch * sin_yaw,
            y: cos_roll * sin_pitch * cos_yaw + sin_roll * cos_pitch * sin_yaw,
            z: cos_roll * cos_pitch * sin_yaw - sin_roll * sin_pitch * cos_yaw,
            w: cos_roll * cos_pitch * cos_yaw + sin_roll * sin_pitch * sin_yaw,
        }
    }

    /// Create a quaternion from an orthonormal rotation matrix.
    #[must_use]
    pub fn from_rotation_matrix(basis: &Matrix3<f64>) -> Self {
        let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*basis));
        Self {
            x: q.i,
            y: q.j,
            z: q.k,
            w: q.w,
        }
    }

    /// Create the rotation that takes unit vector `v0` onto unit vector `v1`
    /// along the shortest arc.
    ///
    /// Both inputs must already be normalized; use
    /// [`Quaternion::shortest_arc_normalized`] otherwise. Antiparallel
    /// inputs have no unique shortest arc, so any axis orthogonal to `v0`
    /// is chosen for the 180-degree turn.
    #[must_use]
    pub fn shortest_arc(v0: &Vector3<f64>, v1: &Vector3<f64>) -> Self {
        let c = v0.cross(v1);
        let d = v0.dot(v1);

        if d < -1.0 + f64::EPSILON {
            let n = plane_space(v0);
            return Self::new(n.x, n.y, n.z, 0.0);
        }

        let s = ((1.0 + d) * 2.0).sqrt();
        let rs = 1.0 / s;
        Self {
            x: c.x * rs,
            y: c.y * rs,
            z: c.z * rs,
            w: s * 0.5,
        }
    }

    /// Like [`Quaternion::shortest_arc`], but normalizes both inputs first.
    #[must_use]
    pub fn shortest_arc_normalized(v0: &Vector3<f64>, v1: &Vector3<f64>) -> Self {
        Self::shortest_arc(&v0.normalize(), &v1.normalize())
    }

    /// Return the dot product of two quaternions viewed as 4-vectors.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Return the squared Euclidean norm.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Return the Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Return this quaternion scaled to unit length.
    ///
    /// Undefined for a zero quaternion (divides by the norm).
    #[must_use]
    pub fn normalize(&self) -> Self {
        *self / self.norm()
    }

    /// Return the inverse rotation (the conjugate).
    ///
    /// Only correct for unit quaternions; non-unit inputs need the extra
    /// division by the squared norm that rotation code never pays for.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Return the angle of rotation, in `[0, 2π]`.
    ///
    /// Reads the raw scalar part; a quaternion in the negative hemisphere
    /// reports the long-way angle. See
    /// [`Quaternion::shortest_path_angle`] for the `[0, π]` variant.
    #[must_use]
    pub fn angle(&self) -> f64 {
        2.0 * self.w.acos()
    }

    /// Return the angle of rotation along the shorter arc, in `[0, π]`.
    #[must_use]
    pub fn shortest_path_angle(&self) -> f64 {
        2.0 * self.w.abs().acos()
    }

    /// Return the half-angle between this rotation and `other`.
    ///
    /// This is the raw 4-vector angle, half the rotation angle between the
    /// two orientations, and it does not resolve the double cover; see
    /// [`Quaternion::shortest_path_angle_to`].
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> f64 {
        let s = (self.norm_squared() * other.norm_squared()).sqrt();
        debug_assert!(s != 0.0, "angle between zero quaternions is undefined");
        (self.dot(other) / s).acos()
    }

    /// Return the full rotation angle between this rotation and `other`
    /// along the shortest path, in `[0, π]`.
    #[must_use]
    pub fn shortest_path_angle_to(&self, other: &Self) -> f64 {
        let s = (self.norm_squared() * other.norm_squared()).sqrt();
        debug_assert!(s != 0.0, "angle between zero quaternions is undefined");
        let d = self.dot(other);
        if d < 0.0 {
            (-d / s).acos() * 2.0
        } else {
            (d / s).acos() * 2.0
        }
    }

    /// Return the normalized rotation axis.
    ///
    /// Near the identity the axis is numerically indeterminate
    /// (`1 - w²` underflows), so unit X is returned as an arbitrary but
    /// finite stand-in. The result is never NaN for unit input.
    #[must_use]
    pub fn axis(&self) -> Vector3<f64> {
        let s_squared = 1.0 - self.w * self.w;
        if s_squared < 10.0 * f64::EPSILON {
            return Vector3::x();
        }
        let s = 1.0 / s_squared.sqrt();
        Vector3::new(self.x * s, self.y * s, self.z * s)
    }

    /// Return whichever of `other` and `-other` is closer to `self`
    /// component-wise.
    ///
    /// Differencing code calls this before multiplying by an inverse so the
    /// extracted relative rotation never takes the long way around the
    /// double cover.
    ///
    /// # Example
    ///
    /// ```
    /// use sim_rotation::Quaternion;
    /// use nalgebra::Vector3;
    ///
    /// let q = Quaternion::from_axis_angle(&Vector3::z(), 0.3);
    /// // -q encodes the same rotation; the nearest representative is q itself.
    /// assert_eq!(q.nearest(&-q), q);
    /// ```
    #[must_use]
    pub fn nearest(&self, other: &Self) -> Self {
        let diff = *self - *other;
        let sum = *self + *other;
        if diff.dot(&diff) < sum.dot(&sum) {
            return *other;
        }
        -*other
    }

    /// Return whichever of `other` and `-other` is farther from `self`
    /// component-wise. Complement of [`Quaternion::nearest`].
    #[must_use]
    pub fn farthest(&self, other: &Self) -> Self {
        let diff = *self - *other;
        let sum = *self + *other;
        if diff.dot(&diff) > sum.dot(&sum) {
            return *other;
        }
        -*other
    }

    /// Spherical linear interpolation from `self` (`t = 0`) to `other`
    /// (`t = 1`), always along the shorter arc.
    ///
    /// When the inputs are (anti)parallel there is nothing to interpolate
    /// and `self` is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use sim_rotation::Quaternion;
    /// use nalgebra::Vector3;
    ///
    /// let a = Quaternion::IDENTITY;
    /// let b = Quaternion::from_axis_angle(&Vector3::z(), std::f64::consts::FRAC_PI_2);
    /// let mid = a.slerp(&b, 0.5);
    /// assert!((mid.angle() - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn slerp(&self, other: &Self, t: f64) -> Self {
        let magnitude = (self.norm_squared() * other.norm_squared()).sqrt();
        debug_assert!(magnitude > 0.0, "slerp between zero quaternions is undefined");

        let product = self.dot(other) / magnitude;
        if product.abs() < 1.0 {
            // Interpolate toward -other when the hemispheres disagree.
            let sign = if product < 0.0 { -1.0 } else { 1.0 };

            let theta = (sign * product).acos();
            let s1 = (sign * t * theta).sin();
            let d = 1.0 / theta.sin();
            let s0 = ((1.0 - t) * theta).sin();

            Self {
                x: (self.x * s0 + other.x * s1) * d,
                y: (self.y * s0 + other.y * s1) * d,
                z: (self.z * s0 + other.z * s1) * d,
                w: (self.w * s0 + other.w * s1) * d,
            }
        } else {
            *self
        }
    }

    /// Rotate a vector by this quaternion.
    ///
    /// Computes `q * v * q⁻¹` with the vector lifted to a zero-scalar
    /// quaternion. Requires unit `self`.
    #[must_use]
    pub fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let q = (*self * *v) * self.inverse();
        Vector3::new(q.x, q.y, q.z)
    }

    /// Expand this unit quaternion into a 3x3 rotation matrix.
    #[must_use]
    pub fn to_rotation_matrix(&self) -> Matrix3<f64> {
        let d = self.norm_squared();
        debug_assert!(d != 0.0, "zero quaternion has no rotation matrix");
        let s = 2.0 / d;
        let (xs, ys, zs) = (self.x * s, self.y * s, self.z * s);
        let (wx, wy, wz) = (self.w * xs, self.w * ys, self.w * zs);
        let (xx, xy, xz) = (self.x * xs, self.x * ys, self.x * zs);
        let (yy, yz, zz) = (self.y * ys, self.y * zs, self.z * zs);
        Matrix3::new(
            1.0 - (yy + zz),
            xy - wz,
            xz + wy,
            xy + wz,
            1.0 - (xx + zz),
            yz - wx,
            xz - wy,
            yz + wx,
            1.0 - (xx + yy),
        )
    }

    /// Check whether all components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

/// Return a unit vector orthogonal to `n` (assumed non-zero).
///
/// Picks the larger of the two candidate coordinate planes so the
/// normalization never divides by a vanishing length.
fn plane_space(n: &Vector3<f64>) -> Vector3<f64> {
    if n.z.abs() > std::f64::consts::FRAC_1_SQRT_2 {
        // Choose the orthogonal in the Y-Z plane.
        let a = n.y * n.y + n.z * n.z;
        let k = 1.0 / a.sqrt();
        Vector3::new(0.0, -n.z * k, n.y * k)
    } else {
        // Choose the orthogonal in the X-Y plane.
        let a = n.x * n.x + n.y * n.y;
        let k = 1.0 / a.sqrt();
        Vector3::new(-n.y * k, n.x * k, 0.0)
    }
}

impl std::ops::Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl std::ops::Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: self.w - rhs.w,
        }
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

impl std::ops::Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }
}

impl std::ops::Div<f64> for Quaternion {
    type Output = Self;

    fn div(self, s: f64) -> Self {
        self * (1.0 / s)
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;

    /// Hamilton product: `self` applied after `rhs`.
    fn mul(self, rhs: Self) -> Self {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            z: self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl std::ops::Mul<Vector3<f64>> for Quaternion {
    type Output = Self;

    /// Hamilton product with the vector lifted to `(v, 0)` on the right.
    fn mul(self, rhs: Vector3<f64>) -> Self {
        Self {
            x: self.w * rhs.x + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y + self.z * rhs.x - self.x * rhs.z,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x,
            w: -(self.x * rhs.x + self.y * rhs.y + self.z * rhs.z),
        }
    }
}

impl std::ops::Mul<Quaternion> for Vector3<f64> {
    type Output = Quaternion;

    /// Hamilton product with the vector lifted to `(v, 0)` on the left.
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion {
            x: self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            z: self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
            w: -(self.x * rhs.x + self.y * rhs.y + self.z * rhs.z),
        }
    }
}
