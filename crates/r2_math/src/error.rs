//! Math error types
//!
//! The numeric core never fails on degenerate values (those are handled by
//! substitution). Errors only come from shape checks and from allocating
//! diagnostic strings.

use std::collections::TryReserveError;
use std::fmt;

/// Error type for fallible math operations
#[derive(Debug)]
pub enum MathError {
    /// Generic multiply called with `left_cols != right_rows`
    DimensionMismatch {
        /// Column count of the left operand
        left_cols: usize,
        /// Row count of the right operand
        right_rows: usize,
    },
    /// A flat buffer is shorter (or longer) than its declared shape needs
    BufferSize {
        /// Which buffer was wrong
        name: &'static str,
        /// Number of floats the shape requires
        expected: usize,
        /// Number of floats supplied
        actual: usize,
    },
    /// `rows * cols` does not fit in `usize`
    ShapeOverflow {
        /// Which buffer the shape describes
        name: &'static str,
        rows: usize,
        cols: usize,
    },
    /// Could not allocate a diagnostic string
    OutOfMemory(TryReserveError),
    /// A `Display` implementation reported an error while rendering
    Format,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::DimensionMismatch { left_cols, right_rows } => write!(
                f,
                "Dimension mismatch: left operand has {} columns but right operand has {} rows",
                left_cols, right_rows
            ),
            MathError::BufferSize { name, expected, actual } => write!(
                f,
                "Buffer size error: '{}' needs {} values, got {}",
                name, expected, actual
            ),
            MathError::ShapeOverflow { name, rows, cols } => write!(
                f,
                "Shape overflow: '{}' is {}x{}, too large to address",
                name, rows, cols
            ),
            MathError::OutOfMemory(err) => write!(f, "Out of memory: {}", err),
            MathError::Format => write!(f, "Format error while rendering value"),
        }
    }
}

impl std::error::Error for MathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MathError::OutOfMemory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for MathError {
    fn from(err: TryReserveError) -> Self {
        MathError::OutOfMemory(err)
    }
}

impl From<fmt::Error> for MathError {
    fn from(_: fmt::Error) -> Self {
        MathError::Format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserve_error() -> TryReserveError {
        let mut v: Vec<u8> = Vec::new();
        match v.try_reserve(usize::MAX) {
            Err(e) => e,
            Ok(()) => panic!("reserving usize::MAX bytes should fail"),
        }
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = MathError::DimensionMismatch { left_cols: 3, right_rows: 4 };
        let msg = format!("{}", err);
        assert!(msg.contains("Dimension mismatch"));
        assert!(msg.contains("3 columns"));
        assert!(msg.contains("4 rows"));
    }

    #[test]
    fn test_buffer_size_display() {
        let err = MathError::BufferSize { name: "out", expected: 9, actual: 4 };
        let msg = format!("{}", err);
        assert!(msg.contains("'out'"));
        assert!(msg.contains("9"));
        assert!(msg.contains("4"));
    }

    #[test]
    fn test_shape_overflow_display() {
        let err = MathError::ShapeOverflow { name: "a", rows: usize::MAX, cols: 2 };
        let msg = format!("{}", err);
        assert!(msg.contains("Shape overflow"));
        assert!(msg.contains("'a'"));
        assert!(msg.contains(&usize::MAX.to_string()));
    }

    #[test]
    fn test_from_try_reserve_error() {
        let err: MathError = reserve_error().into();
        assert!(matches!(err, MathError::OutOfMemory(_)));
        assert!(format!("{}", err).contains("Out of memory"));
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;

        let oom = MathError::OutOfMemory(reserve_error());
        assert!(oom.source().is_some());

        let mismatch = MathError::DimensionMismatch { left_cols: 1, right_rows: 2 };
        assert!(mismatch.source().is_none());
    }
}
