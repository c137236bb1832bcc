//! RGBA color

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::Vec4;

/// Linear RGBA color, each channel nominally in `0.0..=1.0`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const TRANSPARENT: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Reinterpret x, y, z, w as r, g, b, a
    #[inline]
    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    #[inline]
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    /// Linear blend, channels (including alpha) interpolated independently
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::from_vec4(self.to_vec4().lerp(other.to_vec4(), t))
    }

    #[inline]
    pub fn approx_eq(self, other: Self) -> bool {
        self.to_vec4().approx_eq(other.to_vec4())
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Vec4> for Color {
    #[inline]
    fn from(v: Vec4) -> Self {
        Self::from_vec4(v)
    }
}

impl From<Color> for Vec4 {
    #[inline]
    fn from(c: Color) -> Self {
        c.to_vec4()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({:.6}, {:.6}, {:.6}, {:.6})", self.r, self.g, self.b, self.a)
    }
}
