//! Tile edge selection from cache geometry.

use tracing::{info, warn};

use crate::error::BlockSizeError;
use crate::platform::CacheInfo;

const FLOAT_BYTES: usize = std::mem::size_of::<f32>();

/// Where a block size came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSizeSource {
    /// Computed from the probed cache size and line size.
    Derived,
    /// Probe gave nothing usable; started from the configured fallback.
    Fallback,
}

/// A tile edge that divides N (and, if asked, the SIMD lane count).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSize {
    pub edge: usize,
    pub lanes: usize,
    pub source: BlockSizeSource,
}

/// Picks the tile edge BS for an N×N run.
///
/// Starting point is the largest square tile of floats that fits the cache,
/// less one cache line worth of floats:
///
/// ```text
/// BS0 = floor(sqrt(cache_bytes / 4)) - line_bytes / 4
/// ```
///
/// BS is then walked down until it divides N and is a multiple of `lanes`.
/// A probe answering 0, or a cache too small to give a positive BS0, switches
/// to the fallback edge instead.
#[derive(Debug, Clone)]
pub struct BlockSizeSelector<C> {
    cache: C,
    fallback: usize,
}

impl<C: CacheInfo> BlockSizeSelector<C> {
    pub fn new(cache: C, fallback: usize) -> Self {
        Self { cache, fallback }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn select(&self, n: usize, lanes: usize) -> Result<BlockSize, BlockSizeError> {
        if n == 0 {
            return Err(BlockSizeError::ZeroDimension);
        }
        let lanes = lanes.max(1);
        if n % lanes != 0 {
            return Err(BlockSizeError::NoLaneAlignedTile { n, lanes });
        }

        let cache_bytes = self.cache.cache_size();
        let line_bytes = self.cache.cache_line_size();
        let (start, source) = match cache_tile_edge(cache_bytes, line_bytes) {
            Some(edge) => (edge, BlockSizeSource::Derived),
            None => {
                warn!(
                    cache_bytes,
                    line_bytes,
                    fallback = self.fallback,
                    "cache probe unavailable, using fallback block size"
                );
                (self.fallback.max(1), BlockSizeSource::Fallback)
            }
        };

        let edge = largest_dividing_tile(n, start, lanes);
        info!(n, lanes, start, edge, ?source, "block size selected");

        Ok(BlockSize {
            edge,
            lanes,
            source,
        })
    }
}

/// `floor(sqrt(cache / 4)) - line / 4`, or `None` when that is not positive.
pub fn cache_tile_edge(cache_bytes: usize, line_bytes: usize) -> Option<usize> {
    let floats = cache_bytes / FLOAT_BYTES;
    floats
        .isqrt()
        .checked_sub(line_bytes / FLOAT_BYTES)
        .filter(|&edge| edge > 0)
}

/// Largest multiple of `lanes` that is `<= start` and divides `n`.
///
/// Never returns less than `lanes`; `n` must be a non-zero multiple of
/// `lanes`.
pub fn largest_dividing_tile(n: usize, start: usize, lanes: usize) -> usize {
    debug_assert!(n > 0 && lanes > 0 && n % lanes == 0);

    let mut bs = start.min(n);
    bs -= bs % lanes;
    if bs < lanes {
        bs = lanes;
    }
    while n % bs != 0 {
        bs -= lanes;
    }
    bs
}
