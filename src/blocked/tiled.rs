//! Six-loop cache-blocked multiplication.

use super::check_block;
use crate::error::MatMulError;
use crate::matrix::check_operands;

/// Cache-blocked `C[j][i] += sum over l of A[l][i] * B[j][l]`.
///
/// The outer three loops step tile origins `(i, j, l)` by `bs`; the inner
/// three walk `(ii, jj, ll)` inside the current tile. Partial sums go back to
/// C between `l` tiles, and an `f32` round trip through memory is exact, so
/// the result is bit-identical to the naive variant.
///
/// # Errors
///
/// - `DimensionMismatch` if a slice does not hold `n * n` elements
/// - `ZeroBlockSize` / `BlockDoesNotDivide` if `bs` is not a divisor of `n`
pub fn matmul_cache_blocked(
    a: &[f32],
    b: &[f32],
    c: &mut [f32],
    n: usize,
    bs: usize,
) -> Result<(), MatMulError> {
    check_operands(a, b, c, n)?;
    check_block(n, bs, 1)?;

    for i in (0..n).step_by(bs) {
        for j in (0..n).step_by(bs) {
            for l in (0..n).step_by(bs) {
                for ii in i..i + bs {
                    for jj in j..j + bs {
                        let b_row = &b[jj * n + l..jj * n + l + bs];
                        let mut sum = c[jj * n + ii];
                        for (ll, &bv) in (l..l + bs).zip(b_row) {
                            sum += a[ll * n + ii] * bv;
                        }
                        c[jj * n + ii] = sum;
                    }
                }
            }
        }
    }

    Ok(())
}
