//! Line formatting for the log file
//!
//! Producers never format; the writer thread turns each record into exactly
//! one line here. The FATAL console diagnostic uses the same layout.

use super::log_level::LogLevel;
use super::log_record::LogRecord;
use chrono::{DateTime, Local};

/// Format one record as a single line (no trailing newline)
///
/// ```
/// use rust_sim_logger::core::format::format_record;
/// use rust_sim_logger::{LogLevel, LogRecord};
///
/// let record = LogRecord::new(LogLevel::Info, "hello")
///     .with_location("mac.rs", 10, "schedule")
///     .with_times(500, 3);
/// assert_eq!(
///     format_record(&record),
///     "[INFO ], Sim(us)=500, Sys(us)=3, schedule(), hello"
/// );
/// ```
pub fn format_record(record: &LogRecord) -> String {
    match record.level {
        LogLevel::Fatal => format!(
            "{}{}, {}, line {}, {}(), {}",
            record.level.tag(),
            timing(record),
            record.source_file,
            record.source_line,
            record.function,
            record.message
        ),
        // compact: no labels, no context
        LogLevel::Trace => format!(
            "{}, {},{}, {}",
            record.level.tag(),
            record.sim_time_us,
            record.wall_time_us,
            record.message
        ),
        LogLevel::Error
        | LogLevel::Warn
        | LogLevel::Info
        | LogLevel::Debug
        | LogLevel::ConsoleDebug => format!(
            "{}{}, {}(), {}",
            record.level.tag(),
            timing(record),
            record.function,
            record.message
        ),
    }
}

fn timing(record: &LogRecord) -> String {
    format!(
        ", Sim(us)={}, Sys(us)={}",
        record.sim_time_us, record.wall_time_us
    )
}

/// First line of every log file
pub fn header(now: DateTime<Local>, clock_resolution: &str) -> String {
    format!(
        "=======  Log file, {}, Clock Resolution = {}  =======",
        now.format("%a %b %e %H:%M:%S %Y"),
        clock_resolution
    )
}
