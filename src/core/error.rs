//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (configuration) error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The logger could not be brought up
    #[error("Initialization failed for {component}: {message}")]
    Initialization { component: String, message: String },

    /// The writer woke on a non-stop signal that carried no record
    #[error("Record queue consistency violation: {0}")]
    QueueConsistency(String),

    /// Raw level bits that do not name exactly one level
    #[error("Unknown log level bits: {0:#x}")]
    UnknownLevel(u32),

    /// A sink failed to persist a line
    #[error("Sink '{sink}' failed to write: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// A flush dropped `lost` buffered lines; `source` is the first failure
    #[error("Sink '{sink}' lost {lost} lines while flushing: {source}")]
    LinesLost {
        sink: String,
        lost: u64,
        #[source]
        source: std::io::Error,
    },

    /// File lock error
    #[error("Failed to acquire file lock on '{path}'")]
    FileLockError { path: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// The record queue has no consumer any more
    #[error("Logger already closed")]
    LoggerClosed,

}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an initialization error
    pub fn initialization(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Initialization {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a queue consistency error
    pub fn queue_consistency<S: Into<String>>(msg: S) -> Self {
        LoggerError::QueueConsistency(msg.into())
    }

    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file lock error
    pub fn file_lock(path: impl Into<String>) -> Self {
        LoggerError::FileLockError { path: path.into() }
    }

    /// Create an error for a flush that could not persist every buffered line
    pub fn lines_lost(sink: impl Into<String>, lost: u64, source: std::io::Error) -> Self {
        LoggerError::LinesLost {
            sink: sink.into(),
            lost,
            source,
        }
    }

    /// Lines this error cost the log file
    pub fn lost_lines(&self) -> u64 {
        match self {
            LoggerError::LinesLost { lost, .. } => *lost,
            _ => 1,
        }
    }

    /// Errors of this kind halt the process instead of being returned to producers
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LoggerError::Initialization { .. }
                | LoggerError::QueueConsistency(_)
                | LoggerError::UnknownLevel(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::initialization("writer thread", "spawn failed");
        assert!(matches!(err, LoggerError::Initialization { .. }));

        let err = LoggerError::config("LoggerConfig", "ring capacity must be positive");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::file_lock("/var/log/sim.log");
        assert!(matches!(err, LoggerError::FileLockError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::UnknownLevel(0x300);
        assert_eq!(err.to_string(), "Unknown log level bits: 0x300");

        let err = LoggerError::queue_consistency("woken with an empty queue");
        assert_eq!(
            err.to_string(),
            "Record queue consistency violation: woken with an empty queue"
        );

        let err = LoggerError::config("sink", "capacity is zero");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for sink: capacity is zero"
        );
    }

    #[test]
    fn test_sink_write_error_keeps_source() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = LoggerError::sink_write("ring", io_err);

        assert!(err.to_string().contains("ring"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_lost_lines() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = LoggerError::lines_lost("ring", 4, io_err);
        assert_eq!(err.lost_lines(), 4);
        assert_eq!(
            err.to_string(),
            "Sink 'ring' lost 4 lines while flushing: disk full"
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(LoggerError::sink_write("instant", io_err).lost_lines(), 1);
    }

    #[test]
    fn test_fatal_classification() {
        assert!(LoggerError::UnknownLevel(3).is_fatal());
        assert!(LoggerError::queue_consistency("x").is_fatal());
        assert!(LoggerError::initialization("a", "b").is_fatal());
        assert!(!LoggerError::LoggerClosed.is_fatal());
        assert!(!LoggerError::file_lock("x").is_fatal());
    }
}
