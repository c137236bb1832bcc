//! Quaternion for representing rotations in 3D space
//!
//! A quaternion `w + xi + yj + zk` stores the rotation axis (scaled by
//! `sin(θ/2)`) in its imaginary part and `cos(θ/2)` in its real part `w`.
//!
//! Rotation functions assume unit length. Multiplication chains drift, so
//! renormalize with [`Quat::normalized`] after composing many rotations.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::scalar::{deg_to_rad, EPSILON};
use crate::{Mat4, Vec3, Vec4};

/// Rotation quaternion; `w` is the scalar (real) part
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// No rotation
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// All components zero; not a valid rotation
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Reinterpret a Vec4 as a quaternion (`w` becomes the real part)
    #[inline]
    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    #[inline]
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, self.w)
    }

    /// Rotation of `theta` radians about `axis`
    ///
    /// The axis must already be unit length; it is not normalized here.
    pub fn from_axis_angle(axis: Vec3, theta: f32) -> Self {
        let half = theta * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Rotation from Euler angles in radians
    ///
    /// `roll` turns about X, `pitch` about Y, `yaw` about Z. The angles are
    /// applied intrinsically in Z-Y-X order (yaw, then pitch, then roll).
    pub fn from_euler(roll: f32, pitch: f32, yaw: f32) -> Self {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();

        Self {
            w: cr * cp * cy + sr * sp * sy,
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
        }
    }

    /// Same as [`Quat::from_euler`] with the angles given in degrees
    pub fn from_euler_degrees(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self::from_euler(deg_to_rad(roll), deg_to_rad(pitch), deg_to_rad(yaw))
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.to_vec4().dot(other.to_vec4())
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.to_vec4().length_squared()
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.to_vec4().length()
    }

    /// Unit quaternion, or [`Quat::ZERO`] for a (near) zero-length input
    #[inline]
    pub fn normalized(self) -> Self {
        Self::from_vec4(self.to_vec4().normalized())
    }

    /// Negate the imaginary part
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse: conjugate divided by the squared length
    ///
    /// Equal to [`Quat::conjugate`] for unit quaternions. A (near) zero
    /// quaternion has no inverse and yields [`Quat::ZERO`].
    pub fn inverse(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq < EPSILON * EPSILON {
            return Self::ZERO;
        }
        self.conjugate() * (1.0 / len_sq)
    }

    /// Component-wise comparison within [`EPSILON`]
    #[inline]
    pub fn approx_eq(self, other: Self) -> bool {
        self.to_vec4().approx_eq(other.to_vec4())
    }

    /// Rotate a vector with the sandwich product `q * (v, 0) * q⁻¹`
    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        self.rotate_vec4(v.extend(0.0)).xyz()
    }

    /// Sandwich product on the xyz part of `v`
    ///
    /// The input `w` is ignored. The returned `w` is the real part of the
    /// product, which is zero up to rounding.
    pub fn rotate_vec4(self, v: Vec4) -> Vec4 {
        let pure = Self::new(v.x, v.y, v.z, 0.0);
        (self * pure * self.inverse()).to_vec4()
    }

    /// 4x4 rotation matrix for column vectors
    ///
    /// `q.to_mat4().transform_point(p)` rotates `p` the same way as
    /// [`Quat::rotate_vector`]. The last row and column are `(0, 0, 0, 1)`.
    pub fn to_mat4(self) -> Mat4 {
        let Self { x, y, z, w } = self;

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;

        Mat4::from_rows_flat([
            1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz),       2.0 * (xz + wy),       0.0,
            2.0 * (xy + wz),       1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx),       0.0,
            2.0 * (xz - wy),       2.0 * (yz + wx),       1.0 - 2.0 * (xx + yy), 0.0,
            0.0,                   0.0,                   0.0,                   1.0,
        ])
    }
}

impl From<Vec4> for Quat {
    #[inline]
    fn from(v: Vec4) -> Self {
        Self::from_vec4(v)
    }
}

impl From<Quat> for Vec4 {
    #[inline]
    fn from(q: Quat) -> Self {
        q.to_vec4()
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} + {:.6}i + {:.6}j + {:.6}k",
            self.w, self.x, self.y, self.z
        )
    }
}

/// Hamilton product. `a * b` applies `b` first, then `a`.
impl std::ops::Mul for Quat {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        // i² = j² = k² = ijk = -1
        let (a, b, c, d) = (self.w, self.x, self.y, self.z);
        let (e, f, g, h) = (other.w, other.x, other.y, other.z);

        Self {
            w: a * e - b * f - c * g - d * h,
            x: a * f + b * e + c * h - d * g,
            y: a * g - b * h + c * e + d * f,
            z: a * h + b * g - c * f + d * e,
        }
    }
}

impl std::ops::MulAssign for Quat {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl std::ops::Mul<f32> for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::from_vec4(self.to_vec4() * scalar)
    }
}

impl std::ops::Add for Quat {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::from_vec4(self.to_vec4() + other.to_vec4())
    }
}

impl std::ops::Sub for Quat {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::from_vec4(self.to_vec4() - other.to_vec4())
    }
}

impl std::ops::Neg for Quat {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}
