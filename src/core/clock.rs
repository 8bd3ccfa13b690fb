//! Logical clock collaborator
//!
//! Records carry two timestamps: elapsed wall time, measured by the logger
//! itself, and a logical time supplied by the host (a simulator's notion of
//! "now", a frame counter, or simply a monotonic clock).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Source of the logical timestamp attached to every record
pub trait LogicalClock: Send + Sync {
    /// Current logical time in microseconds; monotonic within a run
    fn now_micros(&self) -> u64;

    /// Human-readable resolution, printed in the log file header
    fn resolution(&self) -> String {
        "1us".to_string()
    }
}

/// Microseconds elapsed since the clock was created
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl LogicalClock for MonotonicClock {
    fn now_micros(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

/// Clock that only moves when told to
///
/// Suited to discrete-event simulations that own their notion of time.
///
/// # Example
///
/// ```
/// use rust_sim_logger::{LogicalClock, ManualClock};
///
/// let clock = ManualClock::new(0);
/// clock.advance(250);
/// assert_eq!(clock.now_micros(), 250);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicU64,
    resolution: Option<String>,
}

impl ManualClock {
    pub fn new(start_micros: u64) -> Self {
        Self {
            micros: AtomicU64::new(start_micros),
            resolution: None,
        }
    }

    #[must_use]
    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    pub fn set(&self, micros: u64) {
        self.micros.store(micros, Ordering::Relaxed);
    }

    pub fn advance(&self, micros: u64) {
        self.micros.fetch_add(micros, Ordering::Relaxed);
    }
}

impl LogicalClock for ManualClock {
    fn now_micros(&self) -> u64 {
        self.micros.load(Ordering::Relaxed)
    }

    fn resolution(&self) -> String {
        self.resolution.clone().unwrap_or_else(|| "1us".to_string())
    }
}
