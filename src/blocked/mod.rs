//! Cache-blocked multiplication.
//!
//! The N×N index space is cut into BS×BS tiles so the slices of A and B
//! touched between reuses (about `2 * BS^2` floats) stay resident in one
//! cache level. [`block_size`] picks BS from the probed cache geometry.
//!
//! Available implementations:
//! - `tiled`: six-loop tiled nest, scalar accumulation
//! - `tiled_simd`: same nest, inner loop 4 lanes wide

pub mod block_size;
pub mod tiled;
pub mod tiled_simd;

pub use block_size::{BlockSize, BlockSizeSelector, BlockSizeSource};

use crate::error::MatMulError;

/// Checks that `bs` is a usable tile edge for an `n`×`n` problem.
pub fn check_block(n: usize, bs: usize, lanes: usize) -> Result<(), MatMulError> {
    if bs == 0 {
        return Err(MatMulError::ZeroBlockSize);
    }
    if n % bs != 0 {
        return Err(MatMulError::BlockDoesNotDivide { n, bs });
    }
    if bs % lanes != 0 {
        return Err(MatMulError::BlockNotLaneAligned { bs, lanes });
    }
    Ok(())
}
