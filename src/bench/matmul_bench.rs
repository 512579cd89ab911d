use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use matmul_cache::blocked::BlockSizeSelector;
use matmul_cache::blocked::tiled_simd::LANES;
use matmul_cache::matrix::MatrixBuffers;
use matmul_cache::platform;
use matmul_cache::{Variant, config::DEFAULT_FALLBACK_BLOCK_SIZE};
use std::hint::black_box;

const N: usize = 256;

fn bench_variants(c: &mut Criterion) {
    let selector = BlockSizeSelector::new(platform::host(), DEFAULT_FALLBACK_BLOCK_SIZE);
    let bs = match selector.select(N, LANES) {
        Ok(bs) => bs.edge,
        Err(err) => panic!("no block size for N={N}: {err}"),
    };

    let mut group = c.benchmark_group(format!("matmul_{N}x{N}_bs{bs}"));
    group.sample_size(10);

    for variant in Variant::ALL {
        let mut buffers = MatrixBuffers::new(N);
        group.bench_function(BenchmarkId::from_parameter(variant.label()), |bencher| {
            bencher.iter(|| {
                buffers.reinitialize();
                if let Err(err) = variant.run(black_box(&mut buffers), bs) {
                    panic!("{}: {err}", variant.label());
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_variants);
criterion_main!(benches);
