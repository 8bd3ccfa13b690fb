//! # Rust Sim Logger
//!
//! An asynchronous, level-masked file logger for simulators and other
//! programs that keep their own notion of time.
//!
//! ## Features
//!
//! - **Cheap producers**: `write()` builds a record and queues it; one
//!   dedicated writer thread formats and commits every line
//! - **Level masks**: seven levels as bit flags, any subset enabled
//! - **Two sinks**: a ring buffer that keeps the most recent lines and writes
//!   them at shutdown, or instant write-and-flush per line
//! - **Two clocks**: every line carries simulation time (from a pluggable
//!   [`LogicalClock`]) and wall time since the first write
//! - **Fatal escalation**: a FATAL record drains the log, prints a diagnostic
//!   and a backtrace, and terminates the process
//!
//! ## Example
//!
//! ```no_run
//! use rust_sim_logger::prelude::*;
//! use rust_sim_logger::info;
//!
//! let logger = Logger::builder()
//!     .enabled_mask(LevelMask::default())
//!     .path("log.txt")
//!     .sink_mode(SinkMode::Instant)
//!     .build()?;
//!
//! info!(logger, "simulation started with {} nodes", 16);
//! logger.close();
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        EpochMode, LevelMask, LogLevel, LogRecord, LogicalClock, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, LoggerState, ManualClock, MonotonicClock,
        Result, SinkMode,
    };
    pub use crate::sinks::{Console, Sink};
}

pub use core::{
    BacktracePrinter, EpochMode, LevelMask, LogLevel, LogRecord, LogicalClock, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, LoggerState, ManualClock,
    MonotonicClock, ProcessAbort, Result, SinkMode, StdBacktrace, StdThreadFactory, Terminator,
    ThreadEntry, ThreadFactory,
};
pub use sinks::{Console, Sink};
