//! 4x4 matrices for 3D transformations
//!
//! Storage is **row-major** and vectors are **column vectors**:
//!
//! ```text
//! flat index of (row, col) = row * 4 + col
//! transformed = M * p
//! (A * B) * p = A * (B * p)      // B is applied first
//! ```
//!
//! Projection matrices follow the right-handed OpenGL convention: the camera
//! looks down -Z and clip-space depth runs from -1 (near) to 1 (far).

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::scalar::{approx_eq, safe_divisor};
use crate::{Mat3, MathError, Vec3, Vec4};

/// 4x4 matrix, fields named `m<row><col>`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    pub m00: f32, pub m01: f32, pub m02: f32, pub m03: f32,
    pub m10: f32, pub m11: f32, pub m12: f32, pub m13: f32,
    pub m20: f32, pub m21: f32, pub m22: f32, pub m23: f32,
    pub m30: f32, pub m31: f32, pub m32: f32, pub m33: f32,
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self::from_rows_flat([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);

    pub const ZERO: Self = Self::from_rows_flat([0.0; 16]);

    /// Build from 16 values given one row at a time
    pub const fn from_rows_flat(v: [f32; 16]) -> Self {
        Self {
            m00: v[0],  m01: v[1],  m02: v[2],  m03: v[3],
            m10: v[4],  m11: v[5],  m12: v[6],  m13: v[7],
            m20: v[8],  m21: v[9],  m22: v[10], m23: v[11],
            m30: v[12], m31: v[13], m32: v[14], m33: v[15],
        }
    }

    /// Overwrite every element from 16 row-major values
    pub fn set_from_flat(&mut self, values: &[f32; 16]) {
        *self = Self::from_rows_flat(*values);
    }

    /// Build from a row-major slice that must hold exactly 16 values
    pub fn from_slice(values: &[f32]) -> Result<Self, MathError> {
        let arr: [f32; 16] = values.try_into().map_err(|_| MathError::BufferSize {
            name: "mat4",
            expected: 16,
            actual: values.len(),
        })?;
        Ok(Self::from_rows_flat(arr))
    }

    /// Flat row-major view
    #[inline]
    pub fn as_array(&self) -> &[f32; 16] {
        bytemuck::cast_ref(self)
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [f32; 16] {
        bytemuck::cast_mut(self)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 16] {
        bytemuck::cast(self)
    }

    /// Element at `(row, col)`; panics if either index is above 3
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < 4 && col < 4, "Mat4 index ({}, {}) out of range", row, col);
        self.as_array()[row * 4 + col]
    }

    pub fn row(&self, i: usize) -> Vec4 {
        Vec4::new(self.get(i, 0), self.get(i, 1), self.get(i, 2), self.get(i, 3))
    }

    pub fn column(&self, j: usize) -> Vec4 {
        Vec4::new(self.get(0, j), self.get(1, j), self.get(2, j), self.get(3, j))
    }

    /// Translation by `t`
    pub fn from_translation(t: Vec3) -> Self {
        Self::from_rows_flat([
            1.0, 0.0, 0.0, t.x,
            0.0, 1.0, 0.0, t.y,
            0.0, 0.0, 1.0, t.z,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Non-uniform scale along each axis
    pub fn from_scale(s: Vec3) -> Self {
        Self::from_rows_flat([
            s.x, 0.0, 0.0, 0.0,
            0.0, s.y, 0.0, 0.0,
            0.0, 0.0, s.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Perspective projection
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect` - Width divided by height
    /// * `z_near`, `z_far` - Positive distances to the clip planes
    ///
    /// A view-space point at `z = -z_near` lands on clip depth -1 and one at
    /// `z = -z_far` on +1 after the perspective divide. Degenerate arguments
    /// (zero aspect, `z_near == z_far`, zero fov) follow the divide-by-zero
    /// policy and never produce infinities.
    pub fn perspective(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        if z_near == z_far || aspect == 0.0 {
            log::warn!(
                "Degenerate perspective: aspect={} near={} far={}",
                aspect, z_near, z_far
            );
        }

        let f = 1.0 / safe_divisor((fov_y * 0.5).tan());
        let range_inv = 1.0 / safe_divisor(z_near - z_far);

        Self::from_rows_flat([
            f / safe_divisor(aspect), 0.0, 0.0,                          0.0,
            0.0,                      f,   0.0,                          0.0,
            0.0,                      0.0, (z_far + z_near) * range_inv, 2.0 * z_far * z_near * range_inv,
            0.0,                      0.0, -1.0,                         0.0,
        ])
    }

    /// Right-handed view matrix looking from `eye` towards `target`
    ///
    /// The rotation rows are the camera basis (right, up, back) and the last
    /// column is `-eye` expressed in that basis, so `eye` maps to the origin
    /// and `target` onto the -Z axis. If `eye == target` or `up` is parallel
    /// to the view direction the basis collapses to zero vectors.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(f);

        Self::from_rows_flat([
            s.x,  s.y,  s.z,  -s.dot(eye),
            u.x,  u.y,  u.z,  -u.dot(eye),
            -f.x, -f.y, -f.z, f.dot(eye),
            0.0,  0.0,  0.0,  1.0,
        ])
    }

    /// Apply the matrix to a homogeneous point: `out[i] = Σ_j m[i][j] * p[j]`
    pub fn transform_point(&self, p: Vec4) -> Vec4 {
        Vec4::new(
            self.m00 * p.x + self.m01 * p.y + self.m02 * p.z + self.m03 * p.w,
            self.m10 * p.x + self.m11 * p.y + self.m12 * p.z + self.m13 * p.w,
            self.m20 * p.x + self.m21 * p.y + self.m22 * p.z + self.m23 * p.w,
            self.m30 * p.x + self.m31 * p.y + self.m32 * p.z + self.m33 * p.w,
        )
    }

    /// Transpose a matrix
    pub fn transpose(&self) -> Self {
        Self::from_rows_flat([
            self.m00, self.m10, self.m20, self.m30,
            self.m01, self.m11, self.m21, self.m31,
            self.m02, self.m12, self.m22, self.m32,
            self.m03, self.m13, self.m23, self.m33,
        ])
    }

    pub fn transpose_in_place(&mut self) {
        *self = self.transpose();
    }

    /// Upper-left 3x3 block (the rotation/scale part)
    pub fn upper_left(&self) -> Mat3 {
        Mat3::from_rows_flat([
            self.m00, self.m01, self.m02,
            self.m10, self.m11, self.m12,
            self.m20, self.m21, self.m22,
        ])
    }

    /// Element-wise comparison within [`EPSILON`](crate::EPSILON)
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.as_array()
            .iter()
            .zip(other.as_array())
            .all(|(a, b)| approx_eq(*a, *b))
    }
}

/// Multiply two 4x4 matrices: result = a * b
///
/// Each output cell reads a full row of `a` and a full column of `b` into
/// locals first, and the result is built in a separate buffer.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let a = a.as_array();
    let b = b.as_array();
    let mut out = [0.0f32; 16];

    for i in (0..16).step_by(4) {
        let row = [a[i], a[i + 1], a[i + 2], a[i + 3]];
        for j in 0..4 {
            let col = [b[j], b[j + 4], b[j + 8], b[j + 12]];
            out[i + j] = row[0] * col[0] + row[1] * col[1] + row[2] * col[2] + row[3] * col[3];
        }
    }

    Mat4::from_rows_flat(out)
}

impl std::ops::Mul for Mat4 {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        mul(&self, &other)
    }
}

impl std::ops::MulAssign for Mat4 {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = mul(self, &other);
    }
}

impl std::ops::Mul<Vec4> for Mat4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, p: Vec4) -> Vec4 {
        self.transform_point(p)
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(v: [f32; 16]) -> Self {
        Self::from_rows_flat(v)
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..4 {
            let r = self.row(i);
            writeln!(f, "{:.6} {:.6} {:.6} {:.6}", r.x, r.y, r.z, r.w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quat;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 0.0001;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn vec_approx(a: Vec4, b: Vec4) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z) && approx(a.w, b.w)
    }

    fn mat_approx(a: &Mat4, b: &Mat4) -> bool {
        a.as_array().iter().zip(b.as_array()).all(|(x, y)| approx(*x, *y))
    }

    fn sample() -> Mat4 {
        Mat4::from_rows_flat([
            0.9, 0.82, 0.1, 3.0,
            0.39, 4.0, 1.0, 0.22,
            0.2, 3.0, 0.0, 1.0,
            0.0, 3.0, 1.0, 0.9,
        ])
    }

    #[test]
    fn test_identity() {
        let m = Mat4::IDENTITY;
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m.get(i, j), if i == j { 1.0 } else { 0.0 });
            }
        }
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
    }

    #[test]
    fn test_field_layout_is_row_major() {
        let m = Mat4::from_rows_flat([
            0.0, 1.0, 2.0, 3.0,
            4.0, 5.0, 6.0, 7.0,
            8.0, 9.0, 10.0, 11.0,
            12.0, 13.0, 14.0, 15.0,
        ]);
        assert_eq!(m.m01, 1.0);
        assert_eq!(m.m10, 4.0);
        assert_eq!(m.m32, 14.0);
        assert_eq!(m.as_array()[7], m.m13);
        assert_eq!(m.row(2), Vec4::new(8.0, 9.0, 10.0, 11.0));
        assert_eq!(m.column(1), Vec4::new(1.0, 5.0, 9.0, 13.0));
        assert_eq!(std::mem::size_of::<Mat4>(), 64);
    }

    #[test]
    fn test_set_from_flat() {
        let mut m = Mat4::ZERO;
        let values = sample().to_array();
        m.set_from_flat(&values);
        assert_eq!(m, sample());
    }

    #[test]
    fn test_from_slice() {
        let values = sample().to_array();
        assert_eq!(Mat4::from_slice(&values).ok(), Some(sample()));

        match Mat4::from_slice(&values[..9]) {
            Err(MathError::BufferSize { expected, actual, .. }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 9);
            }
            other => panic!("Expected BufferSize error, got {:?}", other),
        }
    }

    #[test]
    fn test_mul_rows() {
        let a = Mat4::from_rows_flat([1., 1., 1., 1., 2., 2., 2., 2., 3., 3., 3., 3., 4., 4., 4., 4.]);
        let b = Mat4::from_rows_flat([4., 4., 4., 4., 3., 3., 3., 3., 2., 2., 2., 2., 1., 1., 1., 1.]);

        let out = a * b;
        assert_eq!(out.row(0), Vec4::new(10.0, 10.0, 10.0, 10.0));
        assert_eq!(out.row(1), Vec4::new(20.0, 20.0, 20.0, 20.0));
        assert_eq!(out.row(2), Vec4::new(30.0, 30.0, 30.0, 30.0));
        assert_eq!(out.row(3), Vec4::new(40.0, 40.0, 40.0, 40.0));
    }

    #[test]
    fn test_mul_general() {
        let b = Mat4::from_rows_flat([
            3.0, 48.0, 21.0, 3.0,
            0.32, 0.45, 0.22, 0.3,
            3.0, 0.0, 0.4, 0.4,
            0.312, 0.2, 3.0, 2.0,
        ]);
        let expected = Mat4::from_rows_flat([
            4.198400, 44.168999, 28.120399, 8.986000,
            5.518640, 20.563999, 10.130000, 3.210000,
            1.872000, 11.150001, 7.860000, 3.500000,
            4.240800, 1.530000, 3.760000, 3.100000,
        ]);
        let out = mul(&sample(), &b);
        assert!(mat_approx(&out, &expected), "got\n{}", out);
    }

    #[test]
    fn test_mul_identity() {
        let m = sample();
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
    }

    #[test]
    fn test_mul_assign_in_place() {
        let a = sample();
        let b = Quat::from_euler(0.2, 0.4, 0.6).to_mat4();
        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);

        // Squaring in place must read every input before overwriting it
        let mut sq = a;
        sq *= sq;
        assert_eq!(sq, a * a);
    }

    #[test]
    fn test_mul_composition() {
        let r45 = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2 / 2.0).to_mat4();
        let r90 = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2).to_mat4();
        let v = Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert!(vec_approx((r45 * r45) * v, r90 * v));
    }

    #[test]
    fn test_mul_applies_right_operand_first() {
        let t = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let r = Quat::from_axis_angle(Vec3::Z, FRAC_PI_2).to_mat4();
        let p = Vec4::point(1.0, 0.0, 0.0);

        // Rotate then translate
        assert!(vec_approx((t * r) * p, Vec4::point(5.0, 1.0, 0.0)));
        // Translate then rotate
        assert!(vec_approx((r * t) * p, Vec4::point(0.0, 6.0, 0.0)));
    }

    #[test]
    fn test_transform_point() {
        let m = Mat4::from_rows_flat([1., 1., 1., 1., 2., 2., 2., 2., 3., 3., 3., 3., 4., 4., 4., 4.]);
        let p = Vec4::new(3.0, 3.0, 3.0, 0.0);
        assert_eq!(m.transform_point(p), Vec4::new(9.0, 18.0, 27.0, 36.0));
        assert_eq!(Mat4::IDENTITY * p, p);
    }

    #[test]
    fn test_translation_and_scale() {
        let p = Vec4::point(1.0, 2.0, 3.0);
        let t = Mat4::from_translation(Vec3::new(1.0, -1.0, 0.5));
        assert_eq!(t * p, Vec4::point(2.0, 1.0, 3.5));

        // Directions are unaffected by translation
        let d = Vec4::new(1.0, 2.0, 3.0, 0.0);
        assert_eq!(t * d, d);

        let s = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(s * p, Vec4::point(2.0, 6.0, 12.0));
    }

    #[test]
    fn test_transpose() {
        let m = sample();
        let t = m.transpose();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(t.get(i, j), m.get(j, i));
            }
        }
        assert_eq!(t.transpose(), m);

        let mut in_place = m;
        in_place.transpose_in_place();
        assert_eq!(in_place, t);
    }

    #[test]
    fn test_perspective_depth_range() {
        let near = 0.1;
        let far = 100.0;
        let proj = Mat4::perspective(FRAC_PI_2, 1.0, near, far);

        let at_near = proj * Vec4::point(0.0, 0.0, -near);
        let at_far = proj * Vec4::point(0.0, 0.0, -far);
        assert!(approx(at_near.z / at_near.w, -1.0), "near ndc z = {}", at_near.z / at_near.w);
        assert!((at_far.z / at_far.w - 1.0).abs() < 1e-3, "far ndc z = {}", at_far.z / at_far.w);
        assert_eq!(proj.m32, -1.0);
        assert_eq!(proj.m33, 0.0);
    }

    #[test]
    fn test_perspective_scaling() {
        // fov 90° gives f = 1
        let proj = Mat4::perspective(FRAC_PI_2, 2.0, 1.0, 10.0);
        assert!(approx(proj.m11, 1.0));
        assert!(approx(proj.m00, 0.5));

        // Point on the top edge of the frustum maps to ndc y = 1
        let p = proj * Vec4::point(0.0, 3.0, -3.0);
        assert!(approx(p.y / p.w, 1.0));
    }

    #[test]
    fn test_perspective_degenerate_is_finite() {
        let proj = Mat4::perspective(FRAC_PI_2, 0.0, 1.0, 1.0);
        assert!(proj.as_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_look_at() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let target = Vec3::new(0.0, 0.0, -1.0);
        let view = Mat4::look_at(eye, target, Vec3::Y);

        assert!(vec_approx(view * eye.extend(1.0), Vec4::point(0.0, 0.0, 0.0)));
        assert!(vec_approx(view * target.extend(1.0), Vec4::point(0.0, 0.0, -11.0)));
        assert!(vec_approx(view * Vec4::point(1.0, 0.0, 10.0), Vec4::point(1.0, 0.0, 0.0)));
        assert!(vec_approx(view * Vec4::point(0.0, 1.0, 10.0), Vec4::point(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_look_at_rotation_is_orthonormal() {
        let view = Mat4::look_at(Vec3::new(3.0, 4.0, 5.0), Vec3::new(-1.0, 0.5, 2.0), Vec3::Y);
        let r = view.upper_left();
        let product = r * r.transpose();
        let close = product
            .as_array()
            .iter()
            .zip(Mat3::IDENTITY.as_array())
            .all(|(a, b)| (a - b).abs() < 1e-5);
        assert!(close, "got\n{}", product);
    }

    #[test]
    fn test_look_at_from_side() {
        // Looking down -X: camera right is world -Z
        let view = Mat4::look_at(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert!(vec_approx(view * Vec4::point(5.0, 0.0, -1.0), Vec4::point(1.0, 0.0, 0.0)));
        assert!(vec_approx(view * Vec4::point(0.0, 0.0, 0.0), Vec4::point(0.0, 0.0, -5.0)));
    }

    #[test]
    fn test_upper_left() {
        let m = sample().upper_left();
        assert_eq!(m.row(0), Vec3::new(0.9, 0.82, 0.1));
        assert_eq!(m.row(2), Vec3::new(0.2, 3.0, 0.0));
    }

    #[test]
    fn test_display() {
        let s = format!("{}", Mat4::IDENTITY);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "1.000000 0.000000 0.000000 0.000000");
        assert_eq!(lines[3], "0.000000 0.000000 0.000000 1.000000");
    }
}
