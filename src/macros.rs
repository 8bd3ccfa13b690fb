//! Logging macros for ergonomic log message formatting.
//!
//! Each macro records the call site (`file!()`, `line!()` and the enclosing
//! function) and formats its arguments like `format!`. Formatting is skipped
//! entirely when the level is masked out; FATAL always goes through.
//!
//! # Examples
//!
//! ```no_run
//! use rust_sim_logger::prelude::*;
//! use rust_sim_logger::{info, warn};
//!
//! let logger = Logger::builder().path("log.txt").build()?;
//!
//! info!(logger, "Simulation started");
//!
//! let node = 7;
//! warn!(logger, "Node {} missed its slot", node);
//! # Ok::<(), LoggerError>(())
//! ```

/// Name of the enclosing function, without its module path
///
/// Closures report the function they are defined in.
///
/// ```
/// fn schedule() -> &'static str {
///     rust_sim_logger::function_name!()
/// }
/// assert_eq!(schedule(), "schedule");
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = &name[..name.len() - 3];
        name.rsplit("::")
            .find(|part| *part != "{{closure}}")
            .unwrap_or(name)
    }};
}

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```no_run
/// # use rust_sim_logger::prelude::*;
/// # let logger = Logger::builder().build()?;
/// use rust_sim_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::LogLevel = $level;
        if level == $crate::LogLevel::Fatal || logger.level_enabled(level) {
            logger.write(
                level,
                file!(),
                line!(),
                $crate::function_name!(),
                format!($($arg)+),
            );
        }
    }};
}

/// Log a fatal message and terminate the process.
///
/// The record is written whatever the mask says, then the logger drains,
/// prints the diagnostic and a backtrace, and calls its terminator.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log a trace-level message. Trace lines omit labels and call site.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log to the file and echo the message on the console.
#[macro_export]
macro_rules! console_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::ConsoleDebug, $($arg)+)
    };
}
