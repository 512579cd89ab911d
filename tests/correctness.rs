use matmul_cache::blocked::block_size::largest_dividing_tile;
use matmul_cache::blocked::{BlockSizeSelector, BlockSizeSource};
use matmul_cache::matrix::MatrixBuffers;
use matmul_cache::platform::FixedCacheInfo;
use matmul_cache::runner::Outcome;
use matmul_cache::{
    BenchConfig, BenchmarkRunner, MatMulError, Variant, matmul_cache_blocked,
    matmul_cache_blocked_simd, matmul_naive, matmul_register_hinted,
};

fn assert_matrices_close(expected: &[f32], actual: &[f32], name: &str) {
    assert_eq!(expected.len(), actual.len(), "{}: length mismatch", name);
    for i in 0..expected.len() {
        let tolerance = 1e-3 * expected[i].abs().max(1.0);
        assert!(
            (expected[i] - actual[i]).abs() <= tolerance,
            "{}: mismatch at index {}: expected {}, got {}",
            name,
            i,
            expected[i],
            actual[i]
        );
    }
}

/// Conventional row-major `C += B * A`, which is what the transposed-index
/// formula works out to.
fn reference_b_times_a(a: &[f32], b: &[f32], c: &mut [f32], n: usize) {
    for row in 0..n {
        for col in 0..n {
            let mut sum = 0.0f64;
            for k in 0..n {
                sum += b[row * n + k] as f64 * a[k * n + col] as f64;
            }
            c[row * n + col] += sum as f32;
        }
    }
}

fn seeded(n: usize) -> MatrixBuffers {
    MatrixBuffers::new(n)
}

// ============================================================
// Hand-computed 4×4 scenario
// ============================================================

#[test]
fn test_4x4_seeded_against_hand_computed() {
    // C[j][i] = sum over l of (l + i) * (j + l) = 14 + 6(i + j) + 4ij
    #[rustfmt::skip]
    let expected = [
        14.0, 20.0, 26.0, 32.0,
        20.0, 30.0, 40.0, 50.0,
        26.0, 40.0, 54.0, 68.0,
        32.0, 50.0, 68.0, 86.0,
    ];

    let mut naive = seeded(4);
    Variant::Naive.run(&mut naive, 1).unwrap();
    assert_eq!(naive.c.as_slice(), &expected);

    for bs in [2, 4] {
        let mut blocked = seeded(4);
        Variant::CacheBlocked.run(&mut blocked, bs).unwrap();
        assert_eq!(blocked.c.as_slice(), &expected, "bs={}", bs);
    }

    let mut simd = seeded(4);
    Variant::Vectorized.run(&mut simd, 4).unwrap();
    assert_matrices_close(&expected, simd.c.as_slice(), "simd_4x4");
}

#[test]
fn test_index_convention_is_transposed() {
    // Asymmetric inputs so A*B and B*A differ.
    let n = 3;
    let a: Vec<f32> = (1..=9).map(|x| x as f32).collect();
    let b: Vec<f32> = vec![1.0, 0.0, 2.0, 0.0, 1.0, 0.0, 3.0, 0.0, 1.0];

    let mut c = vec![0.0; n * n];
    matmul_naive(&a, &b, &mut c, n);

    // B * A by hand
    assert_eq!(c, vec![15.0, 18.0, 21.0, 4.0, 5.0, 6.0, 10.0, 14.0, 18.0]);

    let mut reference = vec![0.0; n * n];
    reference_b_times_a(&a, &b, &mut reference, n);
    assert_matrices_close(&reference, &c, "transposed_convention");
}

// ============================================================
// All variants agree
// ============================================================

#[test]
fn test_all_variants_agree_on_seeded_input() {
    for (n, bs) in [(8, 4), (16, 8), (48, 12), (64, 16), (64, 64)] {
        let mut reference = seeded(n);
        Variant::Naive.run(&mut reference, bs).unwrap();

        let mut expected = vec![0.0; n * n];
        let buffers = seeded(n);
        reference_b_times_a(buffers.a.as_slice(), buffers.b.as_slice(), &mut expected, n);
        assert_matrices_close(&expected, reference.c.as_slice(), &format!("naive_{}", n));

        for variant in [Variant::RegisterHinted, Variant::CacheBlocked, Variant::Vectorized] {
            let mut buffers = seeded(n);
            variant.run(&mut buffers, bs).unwrap();
            assert!(
                buffers.c.max_relative_error(&reference.c) < 1e-3,
                "{} differs at n={} bs={}",
                variant.label(),
                n,
                bs
            );
        }
    }
}

#[test]
fn test_scalar_variants_are_bit_identical() {
    let n = 30;
    let a: Vec<f32> = (0..n * n).map(|i| ((i * 31) % 17) as f32 * 0.25 - 2.0).collect();
    let b: Vec<f32> = (0..n * n).map(|i| ((i * 7) % 23) as f32 * 0.5 - 5.0).collect();

    let mut c_naive = vec![0.0; n * n];
    let mut c_register = vec![0.0; n * n];
    matmul_naive(&a, &b, &mut c_naive, n);
    matmul_register_hinted(&a, &b, &mut c_register, n);
    assert_eq!(c_naive, c_register);

    for bs in [1, 2, 3, 5, 6, 10, 15, 30] {
        let mut c_blocked = vec![0.0; n * n];
        matmul_cache_blocked(&a, &b, &mut c_blocked, n, bs).unwrap();
        assert_eq!(c_naive, c_blocked, "bs={}", bs);
    }
}

#[test]
fn test_simd_tile_sizes() {
    let n = 32;
    let a: Vec<f32> = (0..n * n).map(|i| (i % 10) as f32).collect();
    let b: Vec<f32> = (0..n * n).map(|i| (i % 7) as f32).collect();

    let mut c_naive = vec![0.0; n * n];
    matmul_naive(&a, &b, &mut c_naive, n);

    for bs in [4, 8, 16, 32] {
        let mut c_simd = vec![0.0; n * n];
        matmul_cache_blocked_simd(&a, &b, &mut c_simd, n, bs).unwrap();
        assert_matrices_close(&c_naive, &c_simd, &format!("simd_bs_{}", bs));
    }
}

// ============================================================
// Accumulation test (C += ..., not C = ...)
// ============================================================

#[test]
fn test_accumulation() {
    let n = 16;
    let a: Vec<f32> = (0..n * n).map(|i| (i % 10) as f32).collect();
    let b: Vec<f32> = (0..n * n).map(|i| (i % 10) as f32).collect();

    let mut c_naive = vec![5.0; n * n];
    let mut c_blocked = vec![5.0; n * n];
    let mut c_simd = vec![5.0; n * n];

    matmul_naive(&a, &b, &mut c_naive, n);
    matmul_cache_blocked(&a, &b, &mut c_blocked, n, 4).unwrap();
    matmul_cache_blocked_simd(&a, &b, &mut c_simd, n, 8).unwrap();

    assert_matrices_close(&c_naive, &c_blocked, "accumulation_blocked");
    assert_matrices_close(&c_naive, &c_simd, "accumulation_simd");

    let mut expected = vec![5.0; n * n];
    reference_b_times_a(&a, &b, &mut expected, n);
    assert_matrices_close(&expected, &c_naive, "accumulation_reference");
}

// ============================================================
// Preconditions
// ============================================================

#[test]
fn test_bad_block_sizes_are_errors() {
    let mut buffers = seeded(12);
    assert_eq!(
        Variant::CacheBlocked.run(&mut buffers, 5).unwrap_err(),
        MatMulError::BlockDoesNotDivide { n: 12, bs: 5 }
    );
    assert_eq!(
        Variant::CacheBlocked.run(&mut buffers, 0).unwrap_err(),
        MatMulError::ZeroBlockSize
    );
    assert_eq!(
        Variant::Vectorized.run(&mut buffers, 6).unwrap_err(),
        MatMulError::BlockNotLaneAligned { bs: 6, lanes: 4 }
    );
}

#[test]
#[should_panic(expected = "C: expected")]
fn test_naive_panics_on_short_output() {
    let a = vec![0.0; 16];
    let mut c = vec![0.0; 8];
    matmul_naive(&a, &a, &mut c, 4);
}

// ============================================================
// Block size selection
// ============================================================

#[test]
fn test_degenerate_probe_falls_back() {
    let selector = BlockSizeSelector::new(FixedCacheInfo::new(0, 0), 32);
    let bs = selector.select(1024, 4).unwrap();
    assert_eq!(bs.edge, 32);
    assert_eq!(bs.source, BlockSizeSource::Fallback);
}

#[test]
fn test_selected_block_always_valid() {
    let caches = [(0, 0), (32 * 1024, 64), (48 * 1024, 64), (1024 * 1024, 64)];
    for (size, line) in caches {
        let selector = BlockSizeSelector::new(FixedCacheInfo::new(size, line), 32);
        for n in (4..=512).step_by(4) {
            let bs = selector.select(n, 4).unwrap();
            assert!(bs.edge >= 4);
            assert_eq!(n % bs.edge, 0);
            assert_eq!(bs.edge % 4, 0);
        }
    }
}

#[test]
fn test_prime_dimension_terminates_at_one() {
    for n in [2, 3, 13, 97, 1021] {
        assert_eq!(largest_dividing_tile(n, 74, 1), if n <= 74 { n } else { 1 });
    }
}

// ============================================================
// Whole run
// ============================================================

#[test]
fn test_runner_prime_dimension_still_times_every_scalar_variant() {
    let config = BenchConfig {
        n: 13,
        fallback_block_size: 32,
        verify: true,
        pause_on_exit: false,
    };
    let mut runner = BenchmarkRunner::new(config, FixedCacheInfo::new(0, 0));
    let report = runner.run(&mut Vec::new()).unwrap();

    assert_eq!(report.block_size.edge, 13);
    assert_eq!(report.samples.len(), 4);
    for sample in &report.samples[..3] {
        assert!(matches!(sample.outcome, Outcome::Timed { .. }));
    }
    assert!(matches!(report.samples[3].outcome, Outcome::Skipped(_)));
}

#[test]
fn test_runner_leaves_vectorized_result_in_buffers() {
    let config = BenchConfig {
        n: 32,
        fallback_block_size: 32,
        verify: true,
        pause_on_exit: false,
    };
    let mut runner = BenchmarkRunner::new(config, FixedCacheInfo::new(32 * 1024, 64));
    runner.run(&mut Vec::new()).unwrap();

    let mut expected = seeded(32);
    Variant::Naive.run(&mut expected, 1).unwrap();
    assert_matrices_close(
        expected.c.as_slice(),
        runner.buffers().c.as_slice(),
        "runner_final_c",
    );
}
