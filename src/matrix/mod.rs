//! Square row-major matrices and the untiled multiplication variants.
//!
//! Every variant computes `C[j][i] += sum over l of A[l][i] * B[j][l]`,
//! which in conventional notation is `C += B * A`. The tiled variants live
//! in [`crate::blocked`].

pub mod buffers;
pub mod hoisted;
pub mod naive;

pub use buffers::{Matrix, MatrixBuffers};

use crate::error::MatMulError;

/// Checks that all three operands hold exactly `n * n` elements.
pub fn check_operands(a: &[f32], b: &[f32], c: &[f32], n: usize) -> Result<(), MatMulError> {
    let expected = n * n;
    for (name, len) in [("A", a.len()), ("B", b.len()), ("C", c.len())] {
        if len != expected {
            return Err(MatMulError::DimensionMismatch {
                name,
                expected,
                actual: len,
            });
        }
    }
    Ok(())
}
