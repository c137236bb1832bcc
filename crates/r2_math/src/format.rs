//! Diagnostic string rendering
//!
//! Every math type implements [`fmt::Display`]; this module adds a fallible
//! rendering path that reserves its buffer up front and reports allocation
//! failure to the caller instead of aborting.

use std::fmt::{self, Write};

use crate::{Color, Mat3, Mat4, MathError, Quat, Vec2, Vec3, Vec4};

/// Rough width of one `{:.6}` float plus its separator
const FLOAT_WIDTH: usize = 16;

/// Fallible debug rendering
pub trait DebugFormat: fmt::Display {
    /// Bytes reserved before rendering
    const CAPACITY_HINT: usize;

    /// Render into a freshly allocated string
    fn to_debug_string(&self) -> Result<String, MathError> {
        let mut out = String::new();
        if let Err(err) = out.try_reserve(Self::CAPACITY_HINT) {
            log::warn!("Could not reserve {} bytes for debug string", Self::CAPACITY_HINT);
            return Err(err.into());
        }
        write!(out, "{}", self)?;
        Ok(out)
    }
}

impl DebugFormat for Vec2 {
    const CAPACITY_HINT: usize = 2 * FLOAT_WIDTH;
}

impl DebugFormat for Vec3 {
    const CAPACITY_HINT: usize = 3 * FLOAT_WIDTH;
}

impl DebugFormat for Vec4 {
    const CAPACITY_HINT: usize = 4 * FLOAT_WIDTH;
}

impl DebugFormat for Quat {
    const CAPACITY_HINT: usize = 4 * FLOAT_WIDTH;
}

impl DebugFormat for Color {
    const CAPACITY_HINT: usize = 4 * FLOAT_WIDTH + 8;
}

impl DebugFormat for Mat3 {
    const CAPACITY_HINT: usize = 9 * FLOAT_WIDTH;
}

impl DebugFormat for Mat4 {
    const CAPACITY_HINT: usize = 16 * FLOAT_WIDTH;
}
