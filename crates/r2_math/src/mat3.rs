//! 3x3 matrices
//!
//! Same conventions as [`Mat4`](crate::Mat4): row-major storage, column
//! vectors, `a * b` applies `b` first.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::scalar::approx_eq;
use crate::{MathError, Vec3};

/// 3x3 matrix, fields named `m<row><col>`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat3 {
    pub m00: f32, pub m01: f32, pub m02: f32,
    pub m10: f32, pub m11: f32, pub m12: f32,
    pub m20: f32, pub m21: f32, pub m22: f32,
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const IDENTITY: Self = Self::from_rows_flat([
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
    ]);

    pub const ZERO: Self = Self::from_rows_flat([0.0; 9]);

    /// Build from 9 values given one row at a time
    pub const fn from_rows_flat(v: [f32; 9]) -> Self {
        Self {
            m00: v[0], m01: v[1], m02: v[2],
            m10: v[3], m11: v[4], m12: v[5],
            m20: v[6], m21: v[7], m22: v[8],
        }
    }

    pub fn set_from_flat(&mut self, values: &[f32; 9]) {
        *self = Self::from_rows_flat(*values);
    }

    /// Build from a row-major slice that must hold exactly 9 values
    pub fn from_slice(values: &[f32]) -> Result<Self, MathError> {
        let arr: [f32; 9] = values.try_into().map_err(|_| MathError::BufferSize {
            name: "mat3",
            expected: 9,
            actual: values.len(),
        })?;
        Ok(Self::from_rows_flat(arr))
    }

    #[inline]
    pub fn as_array(&self) -> &[f32; 9] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [f32; 9] {
        bytemuck::cast_mut(self)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 9] {
        bytemuck::cast(self)
    }

    /// Element at `(row, col)`; panics if either index is above 2
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < 3 && col < 3, "Mat3 index ({}, {}) out of range", row, col);
        self.as_array()[row * 3 + col]
    }

    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::new(self.get(i, 0), self.get(i, 1), self.get(i, 2))
    }

    pub fn column(&self, j: usize) -> Vec3 {
        Vec3::new(self.get(0, j), self.get(1, j), self.get(2, j))
    }

    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.m00 * v.x + self.m01 * v.y + self.m02 * v.z,
            self.m10 * v.x + self.m11 * v.y + self.m12 * v.z,
            self.m20 * v.x + self.m21 * v.y + self.m22 * v.z,
        )
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows_flat([
            self.m00, self.m10, self.m20,
            self.m01, self.m11, self.m21,
            self.m02, self.m12, self.m22,
        ])
    }

    pub fn transpose_in_place(&mut self) {
        *self = self.transpose();
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .all(|(a, b)| approx_eq(*a, *b))
    }
}

/// Multiply two 3x3 matrices: result = a * b
#[allow(clippy::needless_range_loop)]
pub fn mul(a: &Mat3, b: &Mat3) -> Mat3 {
    let a = a.as_array();
    let b = b.as_array();
    let mut out = [0.0f32; 9];

    for i in (0..9).step_by(3) {
        let row = [a[i], a[i + 1], a[i + 2]];
        for j in 0..3 {
            let col = [b[j], b[j + 3], b[j + 6]];
            out[i + j] = row[0] * col[0] + row[1] * col[1] + row[2] * col[2];
        }
    }

    Mat3::from_rows_flat(out)
}

impl std::ops::Mul for Mat3 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        mul(&self, &other)
    }
}

impl std::ops::MulAssign for Mat3 {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = mul(self, &other);
    }
}

impl std::ops::Mul<Vec3> for Mat3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        self.transform_vector(v)
    }
}

impl From<[f32; 9]> for Mat3 {
    fn from(v: [f32; 9]) -> Self {
        Self::from_rows_flat(v)
    }
}

impl fmt::Display for Mat3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..3 {
            let r = self.row(i);
            writeln!(f, "{:.6} {:.6} {:.6}", r.x, r.y, r.z)?;
        }
        Ok(())
    }
}
