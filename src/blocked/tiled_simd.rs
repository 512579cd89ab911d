//! Cache-blocked multiplication with a 4-lane inner loop.

use wide::f32x4;

use super::check_block;
use crate::error::MatMulError;
use crate::matrix::check_operands;

/// Width of the vector the inner loop works on.
pub const LANES: usize = 4;

/// Same tiling as [`matmul_cache_blocked`](super::tiled::matmul_cache_blocked),
/// with the innermost loop taking four `ll` steps at a time.
///
/// Each step packs `A[ll..ll+4][ii]` (a column, so gathered) and
/// `B[jj][ll..ll+4]` into 4-wide vectors, multiplies them lane by lane,
/// sums the lanes horizontally and adds that into a running vector sum that
/// is written back to `C[jj][ii]` once the tile row is done.
///
/// The horizontal sum changes the association order of the additions, so
/// results differ from the scalar variants by rounding only.
///
/// # Errors
///
/// - `DimensionMismatch` if a slice does not hold `n * n` elements
/// - `ZeroBlockSize` / `BlockDoesNotDivide` if `bs` is not a divisor of `n`
/// - `BlockNotLaneAligned` if `bs` is not a multiple of [`LANES`]
pub fn matmul_cache_blocked_simd(
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    n: usize,
    bs: usize,
) -> Result<(), MatMulError> {
    check_operands(a, b, c, n)?;
    check_block(n, bs, LANES)?;

    for i in (0..n).step_by(bs) {
        for j in (0..n).step_by(bs) {
            for l in (0..n).step_by(bs) {
                for ii in i..i + bs {
                    for jj in j..j + bs {
                        let mut sum = f32x4::splat(c[jj * n + ii]);
                        for ll in (l..l + bs).step_by(LANES) {
                            let va = f32x4::from([
                                a[ll * n + ii],
                                a[(ll + 1) * n + ii],
                                a[(ll + 2) * n + ii],
                                a[(ll + 3) * n + ii],
                            ]);
                            let row = jj * n + ll;
                            let vb = f32x4::from([b[row], b[row + 1], b[row + 2], b[row + 3]]);
                            let dot = horizontal_sum(va * vb);
                            sum = sum + f32x4::splat(dot);
                        }
                        c[jj * n + ii] = sum.to_array()[0];
                    }
                }
            }
        }
    }

    Ok(())
}

/// `(x0 + x1) + (x2 + x3)`, the pairwise order of two `haddps` steps.
#[inline]
fn horizontal_sum(v: f32x4) -> f32 {
    let [x0, x1, x2, x3] = v.to_array();
    (x0 + x1) + (x2 + x3)
}
