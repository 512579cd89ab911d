//! Cache geometry from Linux sysfs.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::CacheInfo;

/// First cache described for cpu0, normally the L1 data cache.
pub const DEFAULT_CACHE_DIR: &str = "/sys/devices/system/cpu/cpu0/cache/index0";

/// Reads `size` and `coherency_line_size` from a sysfs cache directory.
#[derive(Debug, Clone)]
pub struct SysfsCacheInfo {
    dir: PathBuf,
}

impl Default for SysfsCacheInfo {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl SysfsCacheInfo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, file: &str) -> usize {
        let path = self.dir.join(file);
        match fs::read_to_string(&path) {
            Ok(text) => parse_size(&text).unwrap_or_else(|| {
                debug!(path = %path.display(), text = text.trim(), "unparsable cache entry");
                0
            }),
            Err(err) => {
                debug!(path = %path.display(), %err, "cache entry unavailable");
                0
            }
        }
    }
}

impl CacheInfo for SysfsCacheInfo {
    fn cache_line_size(&self) -> usize {
        self.read("coherency_line_size")
    }

    fn cache_size(&self) -> usize {
        self.read("size")
    }
}

/// Parses sysfs size strings: "64", "32K", "1M".
pub fn parse_size(text: &str) -> Option<usize> {
    let text = text.trim();
    let (digits, scale) = match text.as_bytes().last().copied()? {
        b'K' | b'k' => (&text[..text.len() - 1], 1024),
        b'M' | b'm' => (&text[..text.len() - 1], 1024 * 1024),
        b'G' | b'g' => (&text[..text.len() - 1], 1024 * 1024 * 1024),
        _ => (text, 1),
    };
    digits.trim().parse::<usize>().ok()?.checked_mul(scale)
}
