//! Wall-clock stopwatch for timing one variant at a time.

use std::time::Instant;

/// Monotonic stopwatch with sub-microsecond resolution.
///
/// ```
/// use matmul_cache::timer::HighResTimer;
///
/// let timer = HighResTimer::start();
/// let ms = timer.elapsed_millis();
/// assert!(ms >= 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HighResTimer {
    started: Instant,
}

impl HighResTimer {
    /// Starts a new stopwatch now.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Resets the origin to now.
    pub fn restart(&mut self) {
        self.started = Instant::now();
    }

    /// Milliseconds since the last `start`/`restart`.
    pub fn elapsed_millis(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}
