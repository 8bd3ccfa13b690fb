//! Log level definitions
//!
//! Every level is a distinct bit. A logger emits a record when the record's
//! bit is present in its [`LevelMask`].

use super::error::{LoggerError, Result};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum LogLevel {
    Fatal = 1 << 0,
    Error = 1 << 1,
    Warn = 1 << 2,
    Info = 1 << 3,
    Debug = 1 << 4,
    Trace = 1 << 5,
    ConsoleDebug = 1 << 6,
}

impl LogLevel {
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
        LogLevel::ConsoleDebug,
    ];

    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
            LogLevel::ConsoleDebug => "CONSOLE_DEBUG",
        }
    }

    /// Bracketed, fixed-width label that starts every line in the log file
    pub fn tag(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "[FATAL]",
            LogLevel::Error => "[ERROR]",
            LogLevel::Warn => "[WARN ]",
            LogLevel::Info => "[INFO ]",
            LogLevel::Debug => "[DEBUG]",
            LogLevel::Trace => "[TRACE]",
            LogLevel::ConsoleDebug => "[CNSL ]",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FATAL" => Ok(LogLevel::Fatal),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            "CONSOLE_DEBUG" | "CNSL" => Ok(LogLevel::ConsoleDebug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<u32> for LogLevel {
    type Error = LoggerError;

    fn try_from(bits: u32) -> Result<Self> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.bits() == bits)
            .ok_or(LoggerError::UnknownLevel(bits))
    }
}

bitflags! {
    /// Set of levels a logger instance emits
    ///
    /// The serde form is the bitflags text syntax, e.g. `"INFO | ERROR"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct LevelMask: u32 {
        const FATAL = LogLevel::Fatal as u32;
        const ERROR = LogLevel::Error as u32;
        const WARN = LogLevel::Warn as u32;
        const INFO = LogLevel::Info as u32;
        const DEBUG = LogLevel::Debug as u32;
        const TRACE = LogLevel::Trace as u32;
        const CONSOLE_DEBUG = LogLevel::ConsoleDebug as u32;
    }
}

impl LevelMask {
    /// Nothing is emitted
    pub const NONE: LevelMask = LevelMask::empty();

    /// Whether a record of `level` passes this mask
    #[inline]
    pub fn enables(self, level: LogLevel) -> bool {
        self.bits() & level.bits() != 0
    }

    /// Parse `"info|error"`, `"ALL"` or `"none"` (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "ALL" => Ok(LevelMask::all()),
            "NONE" | "" => Ok(LevelMask::NONE),
            _ => bitflags::parser::from_str::<LevelMask>(&normalized)
                .map_err(|e| LoggerError::config("LevelMask", format!("'{}': {}", s, e))),
        }
    }

    /// Text form understood by [`LevelMask::parse`]
    pub fn describe(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = bitflags::parser::to_writer(self, &mut out);
        out
    }
}

impl Default for LevelMask {
    fn default() -> Self {
        LevelMask::FATAL | LevelMask::ERROR | LevelMask::WARN | LevelMask::INFO
    }
}

impl From<LogLevel> for LevelMask {
    fn from(level: LogLevel) -> Self {
        LevelMask::from_bits_retain(level.bits())
    }
}

impl BitOr for LogLevel {
    type Output = LevelMask;

    fn bitor(self, rhs: LogLevel) -> LevelMask {
        LevelMask::from(self) | LevelMask::from(rhs)
    }
}

impl BitOr<LogLevel> for LevelMask {
    type Output = LevelMask;

    fn bitor(self, rhs: LogLevel) -> LevelMask {
        self | LevelMask::from(rhs)
    }
}
