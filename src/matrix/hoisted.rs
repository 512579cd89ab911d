/// Same loop nest as [`matmul_naive`](super::naive::matmul_naive), written
/// so the compiler can keep the accumulator in a register.
///
/// There is no storage-class hint to give in Rust. Instead the row of B is
/// borrowed once per output element and A's column is walked with an
/// iterator, which drops the per-element bounds checks. Summation order is
/// unchanged, so results are bit-identical to the naive variant.
///
/// # Panics
///
/// Panics if any slice does not hold `n * n` elements.
pub fn matmul_register_hinted(a: &[f32], b: &[f32], c: &mut [f32], n: usize) {
    assert_eq!(a.len(), n * n, "A: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(b.len(), n * n, "B: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(c.len(), n * n, "C: expected {}x{}={} elements", n, n, n * n);

    for i in 0..n {
        let a_col = &a[i..];
        for j in 0..n {
            let b_row = &b[j * n..(j + 1) * n];
            let sum = a_col
                .iter()
                .step_by(n)
                .zip(b_row)
                .fold(c[j * n + i], |sum, (&x, &y)| sum + x * y);
            c[j * n + i] = sum;
        }
    }
}
