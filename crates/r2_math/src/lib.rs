//! Vector, quaternion and matrix primitives for real-time graphics
//!
//! ## Core Types
//!
//! - [`Vec2`], [`Vec3`], [`Vec4`] - vectors with x, y, z, w components
//! - [`Quat`] - rotation quaternion (`w` is the real part)
//! - [`Color`] - RGBA color sharing the 4-float layout
//! - [`Mat3`], [`Mat4`] - square matrices
//!
//! ## Conventions
//!
//! - Single precision (`f32`) everywhere.
//! - Matrices are stored **row-major** and act on **column vectors**:
//!   `M * p`, and `A * B` applies `B` first. [`Quat`] multiplication follows
//!   the same rule.
//! - Right-handed coordinates; projections target OpenGL clip space
//!   (depth -1..1).
//! - Degenerate inputs never panic or produce NaN: dividing a vector by zero
//!   leaves it unchanged and normalizing a zero vector yields zero.
//! - Angles are radians unless a function name says `degrees`.
//!
//! ## Errors
//!
//! Only shape checks ([`matmul`], `from_slice`) and diagnostic formatting
//! ([`DebugFormat`]) can fail; they return [`MathError`].

mod scalar;
mod error;
mod vec2;
mod vec3;
mod vec4;
mod color;
mod quat;
pub mod mat3;
pub mod mat4;
mod matmul;
mod format;

pub use scalar::{approx_eq, deg_to_rad, rad_to_deg, DEG_TO_RAD, EPSILON, RAD_TO_DEG};
pub use error::MathError;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use color::Color;
pub use quat::Quat;
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use matmul::matmul;
pub use format::DebugFormat;
