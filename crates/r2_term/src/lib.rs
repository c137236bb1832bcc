//! Terminal text helpers
//!
//! - [`utf8`] - byte buffers to code points, with a replacement policy for
//!   malformed input
//! - [`escape`] - ANSI/VT100 control sequences as plain strings
//!
//! Nothing here touches the terminal directly; callers write the returned
//! strings wherever they like.

pub mod escape;
pub mod utf8;

pub use escape::{TermColor, TextStyle};
pub use utf8::{decode, Rune, Utf8Str, REPLACEMENT};
