//! Log record structure

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// One `write()` call, as seen by the writer thread
///
/// Records are built on the producer side and never modified afterwards. All
/// formatting happens on the writer thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub source_file: String,
    pub source_line: u32,
    pub function: String,
    pub message: String,
    /// Logical clock reading at the time of the call
    pub sim_time_us: u64,
    /// Wall time elapsed since the logger's epoch
    pub wall_time_us: u64,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one record can never span several lines of the log file.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            level,
            source_file: String::new(),
            source_line: 0,
            function: String::new(),
            message: Self::sanitize_message(&message),
            sim_time_us: 0,
            wall_time_us: 0,
        }
    }

    pub fn with_location(mut self, file: &str, line: u32, function: &str) -> Self {
        self.source_file = file.to_string();
        self.source_line = line;
        self.function = function.to_string();
        self
    }

    pub fn with_times(mut self, sim_time_us: u64, wall_time_us: u64) -> Self {
        self.sim_time_us = sim_time_us;
        self.wall_time_us = wall_time_us;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fields() {
        let record = LogRecord::new(LogLevel::Warn, "disk almost full")
            .with_location("phy.rs", 42, "decode")
            .with_times(1_000, 17);

        assert_eq!(record.level, LogLevel::Warn);
        assert_eq!(record.source_file, "phy.rs");
        assert_eq!(record.source_line, 42);
        assert_eq!(record.function, "decode");
        assert_eq!(record.sim_time_us, 1_000);
        assert_eq!(record.wall_time_us, 17);
    }

    #[test]
    fn test_message_is_sanitized() {
        let record = LogRecord::new(LogLevel::Info, "a\nb\tc\rd");
        assert_eq!(record.message, "a\\nb\\tc\\rd");
        assert!(!record.message.contains('\n'));
    }
}
