//! Logger metrics for observability
//!
//! Counters for the producer side (enqueued, rejected) and the writer side
//! (committed, filtered, write failures).

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_sim_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_committed();
///
/// assert_eq!(metrics.enqueued(), 1);
/// assert_eq!(metrics.committed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records handed to the queue
    enqueued: AtomicU64,

    /// Records written to the sink
    committed: AtomicU64,

    /// Records consumed but masked out
    filtered: AtomicU64,

    /// Writes refused because the logger was not accepting records
    rejected: AtomicU64,

    /// Sink writes or flushes that failed
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            enqueued: AtomicU64::new(0),
            committed: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn committed(&self) -> u64 {
        self.committed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Returns the previous value, like every `record_*` method
    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_committed(&self) -> u64 {
        self.committed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_rejected(&self) -> u64 {
        self.rejected.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.record_write_failures(1)
    }

    /// Count `lines` lost in one failed write or flush
    #[inline]
    pub fn record_write_failures(&self, lines: u64) -> u64 {
        self.write_failures.fetch_add(lines, Ordering::Relaxed)
    }

    /// Records enqueued but not yet consumed by the writer
    pub fn in_flight(&self) -> u64 {
        self.enqueued()
            .saturating_sub(self.committed() + self.filtered() + self.write_failures())
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            enqueued: AtomicU64::new(self.enqueued()),
            committed: AtomicU64::new(self.committed()),
            filtered: AtomicU64::new(self.filtered()),
            rejected: AtomicU64::new(self.rejected()),
            write_failures: AtomicU64::new(self.write_failures()),
        }
    }
}
