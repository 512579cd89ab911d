//! Harness settings.
//!
//! The binary takes no flags. Defaults reproduce the classic run (N = 1024,
//! fallback tile 32, wait for a keypress at the end); a few environment
//! variables override them for quick experiments:
//!
//! - `MATMUL_N` - matrix dimension
//! - `MATMUL_FALLBACK_BS` - tile edge used when the cache probe fails
//! - `MATMUL_VERIFY` - compare every variant against the naive result
//! - `MATMUL_PAUSE` - wait for Enter before exiting

use crate::error::{BenchError, Result};

/// Matrix dimension used when nothing overrides it.
pub const DEFAULT_N: usize = 1024;

/// Tile edge used when the platform cache probe reports nothing useful.
pub const DEFAULT_FALLBACK_BLOCK_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub n: usize,
    pub fallback_block_size: usize,
    pub verify: bool,
    pub pause_on_exit: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_N,
            fallback_block_size: DEFAULT_FALLBACK_BLOCK_SIZE,
            verify: true,
            pause_on_exit: true,
        }
    }
}

impl BenchConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("MATMUL_N") {
            config.n = parse_positive("MATMUL_N", &value)?;
        }
        if let Some(value) = lookup("MATMUL_FALLBACK_BS") {
            config.fallback_block_size = parse_positive("MATMUL_FALLBACK_BS", &value)?;
        }
        if let Some(value) = lookup("MATMUL_VERIFY") {
            config.verify = parse_flag("MATMUL_VERIFY", &value)?;
        }
        if let Some(value) = lookup("MATMUL_PAUSE") {
            config.pause_on_exit = parse_flag("MATMUL_PAUSE", &value)?;
        }

        Ok(config)
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(BenchError::Config {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(BenchError::Config {
            key,
            value: value.to_string(),
        }),
    }
}
