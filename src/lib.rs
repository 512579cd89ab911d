//! Four steps from textbook to cache-aware matrix multiplication.
//!
//! I wanted to see how much each classic trick buys on its own, so this
//! crate times them one after the other on the same N×N `f32` problem:
//!
//! 1. naive triple loop
//! 2. the same loop written so the accumulator stays in a register
//! 3. cache blocking, with the tile edge derived from the probed L1 size
//! 4. cache blocking plus a 4-lane SIMD inner loop
//!
//! Every variant computes `C[j][i] += sum over l of A[l][i] * B[j][l]`
//! (that is `C += B * A` in the usual notation).
//!
//! ## Usage
//!
//! ```
//! use matmul_cache::blocked::tiled::matmul_cache_blocked;
//! use matmul_cache::matrix::naive::matmul_naive;
//!
//! let n = 64;
//! let a = vec![1.0f32; n * n];
//! let b = vec![1.0f32; n * n];
//! let mut c_naive = vec![0.0f32; n * n];
//! let mut c_tiled = vec![0.0f32; n * n];
//!
//! matmul_naive(&a, &b, &mut c_naive, n);
//! matmul_cache_blocked(&a, &b, &mut c_tiled, n, 16).unwrap();
//! assert_eq!(c_naive, c_tiled);
//! ```
//!
//! Picking the tile edge from cache geometry:
//!
//! ```
//! use matmul_cache::blocked::BlockSizeSelector;
//! use matmul_cache::platform::FixedCacheInfo;
//!
//! let selector = BlockSizeSelector::new(FixedCacheInfo::new(32 * 1024, 64), 32);
//! let bs = selector.select(1024, 4).unwrap();
//! assert_eq!(bs.edge, 64);
//! ```

pub mod blocked;
pub mod config;
pub mod error;
pub mod matrix;
pub mod platform;
pub mod runner;
pub mod timer;

pub use blocked::tiled::matmul_cache_blocked;
pub use blocked::tiled_simd::matmul_cache_blocked_simd;
pub use config::BenchConfig;
pub use error::{BenchError, BlockSizeError, MatMulError, Result};
pub use matrix::hoisted::matmul_register_hinted;
pub use matrix::naive::matmul_naive;
pub use runner::{BenchReport, BenchmarkRunner, Variant};
