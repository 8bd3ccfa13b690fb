//! Logger configuration
//!
//! Everything here is fixed when the logger is built; there is no runtime
//! reload. Configurations can be written in code or loaded from JSON:
//!
//! ```
//! use rust_sim_logger::{LevelMask, LoggerConfig, SinkMode};
//!
//! let config = LoggerConfig::from_json_str(r#"{
//!     "enabled_mask": "INFO | ERROR",
//!     "path": "logs/run.txt",
//!     "sink": { "mode": "ring", "capacity": 512 }
//! }"#).unwrap();
//!
//! assert_eq!(config.enabled_mask, LevelMask::INFO | LevelMask::ERROR);
//! assert_eq!(config.sink, SinkMode::Ring { capacity: 512 });
//! ```

use super::error::{LoggerError, Result};
use super::log_level::LevelMask;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default number of lines kept by the ring sink
pub const DEFAULT_RING_CAPACITY: usize = 4096;

/// Default number of CONSOLE_DEBUG echoes between console flushes
pub const DEFAULT_CONSOLE_FLUSH_EVERY: u32 = 4;

/// Default pause between stopping the writer and terminating on FATAL
pub const DEFAULT_FATAL_PAUSE: Duration = Duration::from_secs(1);

/// How committed lines reach the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SinkMode {
    /// Keep the last `capacity` lines in memory, write them at shutdown
    Ring { capacity: usize },
    /// Write and flush every line as it is committed
    Instant,
}

impl Default for SinkMode {
    fn default() -> Self {
        SinkMode::Ring {
            capacity: DEFAULT_RING_CAPACITY,
        }
    }
}

/// Instant that wall times are measured from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpochMode {
    /// The first `write()` after initialization reads zero
    #[default]
    FirstWrite,
    /// Time is measured from initialization
    Initialize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Levels written to the file; empty disables logging
    pub enabled_mask: LevelMask,
    pub path: PathBuf,
    /// Scheduling hint passed to the thread factory
    pub thread_priority: i32,
    pub sink: SinkMode,
    pub epoch: EpochMode,
    pub console_flush_every: u32,
    pub fatal_pause_ms: u64,
    pub console_colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled_mask: LevelMask::default(),
            path: PathBuf::from("log.txt"),
            thread_priority: 0,
            sink: SinkMode::default(),
            epoch: EpochMode::default(),
            console_flush_every: DEFAULT_CONSOLE_FLUSH_EVERY,
            fatal_pause_ms: DEFAULT_FATAL_PAUSE.as_millis() as u64,
            console_colors: false,
        }
    }
}

impl LoggerConfig {
    pub fn new(enabled_mask: LevelMask, path: impl Into<PathBuf>) -> Self {
        Self {
            enabled_mask,
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: SinkMode) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn with_thread_priority(mut self, priority: i32) -> Self {
        self.thread_priority = priority;
        self
    }

    #[must_use]
    pub fn with_epoch(mut self, epoch: EpochMode) -> Self {
        self.epoch = epoch;
        self
    }

    #[must_use]
    pub fn with_fatal_pause(mut self, pause: Duration) -> Self {
        self.fatal_pause_ms = u64::try_from(pause.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn fatal_pause(&self) -> Duration {
        Duration::from_millis(self.fatal_pause_ms)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("reading logger config", path.display().to_string(), e)
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "path must not be empty"));
        }
        if let SinkMode::Ring { capacity: 0 } = self.sink {
            return Err(LoggerError::config(
                "LoggerConfig",
                "ring capacity must be positive",
            ));
        }
        if self.console_flush_every == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "console_flush_every must be positive",
            ));
        }
        Ok(())
    }
}
