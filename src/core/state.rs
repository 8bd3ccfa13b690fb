//! Logger lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Uninitialized → Initialized → Draining → Closed
///
/// Records are accepted only while Initialized. Draining covers the shutdown
/// sequence (barrier, stop, join); the log file is closed when the writer
/// exits, just before the state becomes Closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum LoggerState {
    #[default]
    Uninitialized = 0,
    Initialized = 1,
    Draining = 2,
    Closed = 3,
}

impl LoggerState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => LoggerState::Initialized,
            2 => LoggerState::Draining,
            3 => LoggerState::Closed,
            _ => LoggerState::Uninitialized,
        }
    }

    pub fn accepts_records(self) -> bool {
        self == LoggerState::Initialized
    }
}

impl fmt::Display for LoggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerState::Uninitialized => write!(f, "Uninitialized"),
            LoggerState::Initialized => write!(f, "Initialized"),
            LoggerState::Draining => write!(f, "Draining"),
            LoggerState::Closed => write!(f, "Closed"),
        }
    }
}

/// Atomic holder read by every producer on each write
#[derive(Debug, Default)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn get(&self) -> LoggerState {
        LoggerState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, state: LoggerState) {
        self.0.store(state as u8, Ordering::Release);
    }

    /// Move to `next` only if currently `from`; returns whether it moved
    pub(crate) fn advance(&self, from: LoggerState, next: LoggerState) -> bool {
        self.0
            .compare_exchange(from as u8, next as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
