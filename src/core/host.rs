//! Host collaborators: thread creation, backtraces and process termination
//!
//! The logger never decides on its own how a thread is prioritised or what
//! "terminate" means for the surrounding application. Each concern is a small
//! trait with a std-based default, and hosts (or tests) can swap in their own.

use std::io;
use std::thread::{self, JoinHandle};

/// Entry point handed to a [`ThreadFactory`]
pub type ThreadEntry = Box<dyn FnOnce() + Send + 'static>;

/// Creates the writer thread
pub trait ThreadFactory: Send + Sync {
    /// Start `entry` on a new thread. `priority` is a scheduling hint whose
    /// meaning is up to the factory.
    fn spawn(&self, name: &str, priority: i32, entry: ThreadEntry) -> io::Result<JoinHandle<()>>;
}

/// Plain `std::thread` spawning; the priority hint is not applied
#[derive(Debug, Default, Clone, Copy)]
pub struct StdThreadFactory;

impl ThreadFactory for StdThreadFactory {
    fn spawn(&self, name: &str, _priority: i32, entry: ThreadEntry) -> io::Result<JoinHandle<()>> {
        thread::Builder::new().name(name.to_string()).spawn(entry)
    }
}

/// Prints the call stack during fatal escalation
pub trait BacktracePrinter: Send + Sync {
    fn print_backtrace(&self);
}

/// Captures a backtrace with `std::backtrace` and prints it to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StdBacktrace;

impl BacktracePrinter for StdBacktrace {
    fn print_backtrace(&self) {
        eprintln!("{}", std::backtrace::Backtrace::force_capture());
    }
}

/// Ends the process after a fatal condition
pub trait Terminator: Send + Sync {
    fn terminate(&self, reason: &str) -> !;
}

/// Aborts the process
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessAbort;

impl Terminator for ProcessAbort {
    fn terminate(&self, reason: &str) -> ! {
        eprintln!("[LOGGER CRITICAL] terminating: {}", reason);
        std::process::abort()
    }
}
