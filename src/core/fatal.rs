//! Fatal escalation
//!
//! A FATAL record, or an internal error the logger cannot recover from, ends
//! the process. The steps that do not need the logger itself (latching, the
//! console diagnostic, the pause, the backtrace and the terminator call) live
//! here; draining and stopping the writer is done by the logger in between.

use super::error::LoggerError;
use super::host::{BacktracePrinter, Terminator};
use crate::sinks::Console;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub(crate) struct FatalEscalation {
    started: AtomicBool,
    pause: Duration,
    backtrace: Arc<dyn BacktracePrinter>,
    terminator: Arc<dyn Terminator>,
}

impl FatalEscalation {
    pub(crate) fn new(
        pause: Duration,
        backtrace: Arc<dyn BacktracePrinter>,
        terminator: Arc<dyn Terminator>,
    ) -> Self {
        Self {
            started: AtomicBool::new(false),
            pause,
            backtrace,
            terminator,
        }
    }

    /// Claim the single escalation; false if one is already running
    pub(crate) fn begin(&self) -> bool {
        !self.started.swap(true, Ordering::AcqRel)
    }

    pub(crate) fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Print the diagnostic whatever the level mask says
    pub(crate) fn announce(&self, console: &Console, diagnostic: &str) {
        if let Err(e) = console.fatal(diagnostic) {
            eprintln!("[LOGGER ERROR] Failed to print fatal diagnostic: {}", e);
        }
    }

    /// Pause, print the call stack and terminate
    pub(crate) fn finish(&self, reason: &str) -> ! {
        if !self.pause.is_zero() {
            std::thread::sleep(self.pause);
        }
        self.backtrace.print_backtrace();
        self.terminator.terminate(reason)
    }

    /// Terminate because of an internal error; skipped if an escalation already runs
    pub(crate) fn abort(&self, error: &LoggerError) {
        if !self.begin() {
            return;
        }
        eprintln!("[LOGGER CRITICAL] {}", error);
        self.backtrace.print_backtrace();
        self.terminator.terminate(&error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct Counting {
        backtraces: AtomicUsize,
        terminations: AtomicUsize,
    }

    impl BacktracePrinter for Counting {
        fn print_backtrace(&self) {
            self.backtraces.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Terminator for Counting {
        fn terminate(&self, reason: &str) -> ! {
            self.terminations.fetch_add(1, Ordering::SeqCst);
            panic!("terminated: {}", reason)
        }
    }

    fn escalation(host: &Arc<Counting>) -> FatalEscalation {
        FatalEscalation::new(Duration::ZERO, host.clone(), host.clone())
    }

    #[test]
    fn test_begin_is_single_shot() {
        let host = Arc::new(Counting::default());
        let fatal = escalation(&host);

        assert!(!fatal.is_started());
        assert!(fatal.begin());
        assert!(!fatal.begin());
        assert!(fatal.is_started());
    }

    #[test]
    fn test_finish_prints_backtrace_then_terminates() {
        let host = Arc::new(Counting::default());
        let fatal = escalation(&host);

        let result = catch_unwind(AssertUnwindSafe(|| fatal.finish("boom")));

        assert!(result.is_err());
        assert_eq!(host.backtraces.load(Ordering::SeqCst), 1);
        assert_eq!(host.terminations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_abort_skipped_while_escalation_runs() {
        let host = Arc::new(Counting::default());
        let fatal = escalation(&host);
        assert!(fatal.begin());

        fatal.abort(&LoggerError::UnknownLevel(0x80));

        assert_eq!(host.terminations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_abort_terminates_once() {
        let host = Arc::new(Counting::default());
        let fatal = escalation(&host);

        let first = catch_unwind(AssertUnwindSafe(|| {
            fatal.abort(&LoggerError::queue_consistency("empty wake"))
        }));
        assert!(first.is_err());

        fatal.abort(&LoggerError::UnknownLevel(0x80));
        assert_eq!(host.terminations.load(Ordering::SeqCst), 1);
    }
}
