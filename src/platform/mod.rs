//! Cache geometry of the host CPU.
//!
//! The tiling code only ever sees the [`CacheInfo`] trait, so tests can feed
//! it synthetic numbers while the binary uses [`host`].
//!
//! Available probes:
//! - `sysfs`: Linux, reads `/sys/devices/system/cpu/cpu0/cache/index0`
//! - `cpuid`: everything else, via the `cache-size` crate
//! - [`FixedCacheInfo`]: hard-coded values

pub mod cpuid;
pub mod sysfs;

pub use cpuid::CpuidCacheInfo;
pub use sysfs::SysfsCacheInfo;

/// Cache line and capacity of one cache level, in bytes.
///
/// Both queries return 0 when the platform cannot answer. Callers treat 0 as
/// "unknown", never as a real size.
pub trait CacheInfo {
    fn cache_line_size(&self) -> usize;
    fn cache_size(&self) -> usize;
}

impl<T: CacheInfo + ?Sized> CacheInfo for &T {
    fn cache_line_size(&self) -> usize {
        (**self).cache_line_size()
    }

    fn cache_size(&self) -> usize {
        (**self).cache_size()
    }
}

impl<T: CacheInfo + ?Sized> CacheInfo for Box<T> {
    fn cache_line_size(&self) -> usize {
        (**self).cache_line_size()
    }

    fn cache_size(&self) -> usize {
        (**self).cache_size()
    }
}

/// Cache geometry given up front. Used by tests and for pinning a run to a
/// known cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedCacheInfo {
    pub size: usize,
    pub line: usize,
}

impl FixedCacheInfo {
    pub fn new(size: usize, line: usize) -> Self {
        Self { size, line }
    }
}

impl CacheInfo for FixedCacheInfo {
    fn cache_line_size(&self) -> usize {
        self.line
    }

    fn cache_size(&self) -> usize {
        self.size
    }
}

/// The probe for the platform this binary was built for.
#[cfg(target_os = "linux")]
pub fn host() -> Box<dyn CacheInfo> {
    Box::new(SysfsCacheInfo::default())
}

/// The probe for the platform this binary was built for.
#[cfg(not(target_os = "linux"))]
pub fn host() -> Box<dyn CacheInfo> {
    Box::new(CpuidCacheInfo)
}
