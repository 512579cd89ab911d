//! Error types for the benchmark harness.

use thiserror::Error;

/// Errors from choosing a tile edge length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockSizeError {
    /// Matrix dimension is zero, nothing can divide it.
    #[error("matrix dimension must be at least 1")]
    ZeroDimension,

    /// No tile edge both divides `n` and is a multiple of `lanes`.
    #[error("no block size divides N={n} and is a multiple of {lanes} lanes")]
    NoLaneAlignedTile { n: usize, lanes: usize },
}

/// Precondition failures of the multiplication variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatMulError {
    /// A slice does not hold `n * n` elements.
    #[error("{name}: expected {expected} elements, got {actual}")]
    DimensionMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Block size of zero.
    #[error("block size must be at least 1")]
    ZeroBlockSize,

    /// Block size does not divide the matrix dimension.
    #[error("block size {bs} does not divide N={n}")]
    BlockDoesNotDivide { n: usize, bs: usize },

    /// Block size is not a whole number of SIMD lanes.
    #[error("block size {bs} is not a multiple of {lanes} lanes")]
    BlockNotLaneAligned { bs: usize, lanes: usize },
}

/// Top-level harness errors.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    BlockSize(#[from] BlockSizeError),

    #[error(transparent)]
    MatMul(#[from] MatMulError),

    /// Bad value in a configuration override.
    #[error("invalid value {value:?} for {key}")]
    Config { key: &'static str, value: String },

    /// Console output or keypress read failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, BenchError>;
