//! Core logger types and traits

pub mod clock;
pub mod config;
pub mod error;
pub(crate) mod fatal;
pub mod format;
pub mod host;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub(crate) mod record_queue;
pub mod state;
pub(crate) mod writer;

pub use clock::{LogicalClock, ManualClock, MonotonicClock};
pub use config::{
    EpochMode, LoggerConfig, SinkMode, DEFAULT_CONSOLE_FLUSH_EVERY, DEFAULT_FATAL_PAUSE,
    DEFAULT_RING_CAPACITY,
};
pub use error::{LoggerError, Result};
pub use host::{
    BacktracePrinter, ProcessAbort, StdBacktrace, StdThreadFactory, Terminator, ThreadEntry,
    ThreadFactory,
};
pub use log_level::{LevelMask, LogLevel};
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder, WRITER_THREAD_NAME};
pub use metrics::LoggerMetrics;
pub use state::LoggerState;
