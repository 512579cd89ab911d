/// Textbook triple loop over the transposed-index product.
///
/// Computes `C[j][i] += sum over l of A[l][i] * B[j][l]`, accumulating each
/// output element in a scalar before writing it back. The inner loop walks
/// A down a column (stride `n`), which is what makes it slow.
///
/// # Arguments
///
/// * `a` - Matrix A (n × n), row-major
/// * `b` - Matrix B (n × n), row-major
/// * `c` - Matrix C (n × n), row-major, accumulated into
/// * `n` - Matrix dimension
///
/// # Panics
///
/// Panics if any slice does not hold `n * n` elements.
pub fn matmul_naive(a: &[f32], b: &[f32], c: &mut [f32], n: usize) {
    assert_eq!(a.len(), n * n, "A: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(b.len(), n * n, "B: expected {}x{}={} elements", n, n, n * n);
    assert_eq!(c.len(), n * n, "C: expected {}x{}={} elements", n, n, n * n);

    for i in 0..n {
        for j in 0..n {
            let mut sum = c[j * n + i];
            for l in 0..n {
                sum += a[l * n + i] * b[j * n + l];
            }
            c[j * n + i] = sum;
        }
    }
}
