//! L1 data cache geometry from CPUID.

use super::CacheInfo;

/// Asks the processor directly through the `cache-size` crate.
///
/// Only x86 exposes this; on other architectures both queries return 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuidCacheInfo;

impl CacheInfo for CpuidCacheInfo {
    fn cache_line_size(&self) -> usize {
        cache_size::l1_cache_line_size().unwrap_or(0)
    }

    fn cache_size(&self) -> usize {
        cache_size::l1_cache_size().unwrap_or(0)
    }
}
