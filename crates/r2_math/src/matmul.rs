//! Generic matrix multiply for arbitrary shapes
//!
//! This is the slow fallback. Use [`Mat4`](crate::Mat4) or
//! [`Mat3`](crate::Mat3) multiplication for square transforms.

use crate::MathError;

/// Multiply a `a_rows x a_cols` matrix by a `b_rows x b_cols` matrix
///
/// All buffers are row-major. `out` receives the `a_rows x b_cols` product
/// and is fully overwritten, so it does not need to be zeroed first.
///
/// # Errors
/// * [`MathError::DimensionMismatch`] when `a_cols != b_rows`
/// * [`MathError::ShapeOverflow`] when a shape's element count overflows `usize`
/// * [`MathError::BufferSize`] when any buffer is shorter than its shape
pub fn matmul(
    a: &[f32],
    a_rows: usize,
    a_cols: usize,
    b: &[f32],
    b_rows: usize,
    b_cols: usize,
    out: &mut [f32],
) -> Result<(), MathError> {
    if a_cols != b_rows {
        log::warn!(
            "matmul: cannot multiply {}x{} by {}x{}",
            a_rows, a_cols, b_rows, b_cols
        );
        return Err(MathError::DimensionMismatch {
            left_cols: a_cols,
            right_rows: b_rows,
        });
    }

    check_len("a", a, a_rows, a_cols)?;
    check_len("b", b, b_rows, b_cols)?;
    check_len("out", out, a_rows, b_cols)?;

    let mut row = vec![0.0f32; a_cols];
    for i in 0..a_rows {
        row.copy_from_slice(&a[i * a_cols..(i + 1) * a_cols]);
        for j in 0..b_cols {
            out[i * b_cols + j] = row
                .iter()
                .enumerate()
                .map(|(k, r)| r * b[k * b_cols + j])
                .sum();
        }
    }

    Ok(())
}

fn check_len(name: &'static str, buf: &[f32], rows: usize, cols: usize) -> Result<(), MathError> {
    let expected = rows
        .checked_mul(cols)
        .ok_or(MathError::ShapeOverflow { name, rows, cols })?;
    if buf.len() < expected {
        return Err(MathError::BufferSize {
            name,
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}
