//! Main logger implementation

use super::{
    clock::{LogicalClock, MonotonicClock},
    config::{EpochMode, LoggerConfig, SinkMode},
    error::{LoggerError, Result},
    fatal::FatalEscalation,
    format,
    host::{BacktracePrinter, ProcessAbort, StdBacktrace, StdThreadFactory, Terminator, ThreadFactory},
    log_level::{LevelMask, LogLevel},
    log_record::LogRecord,
    metrics::LoggerMetrics,
    record_queue::{self, RecordSender},
    state::{LoggerState, StateCell},
    writer::WriterLoop,
};
use crate::sinks::{Console, InstantSink, LogFile, RingSink, Sink};
use chrono::Local;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread::JoinHandle;
use std::time::Instant;

/// Name given to the writer thread
pub const WRITER_THREAD_NAME: &str = "log-writer";

/// Asynchronous, level-masked logger with one writer thread
///
/// Producers call [`Logger::write`] (usually through the macros) from any
/// thread; the call builds a record, queues it and returns without touching
/// the file. Share the logger between threads with an `Arc`.
///
/// # Example
///
/// ```no_run
/// use rust_sim_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .enabled_mask(LogLevel::Info | LogLevel::Error)
///     .path("log.txt")
///     .build()?;
///
/// logger.write(LogLevel::Info, file!(), line!(), "main", "hello");
/// logger.close();
/// # Ok::<(), LoggerError>(())
/// ```
pub struct Logger {
    mask: LevelMask,
    sender: RecordSender,
    stop: Arc<AtomicBool>,
    writer: Mutex<Option<JoinHandle<()>>>,
    state: StateCell,
    initialized_at: Instant,
    epoch: OnceLock<Instant>,
    clock: Arc<dyn LogicalClock>,
    console: Console,
    fatal: Arc<FatalEscalation>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Build a logger from a configuration with the default collaborators
    pub fn initialize(config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::from_config(config).build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Queue one record
    ///
    /// An empty message is ignored without touching the queue. A FATAL record
    /// is queued and then escalated on the calling thread: the diagnostic is
    /// printed to the console, the writer is drained and stopped, and the
    /// terminator is invoked.
    pub fn write(
        &self,
        level: LogLevel,
        file: &str,
        line: u32,
        function: &str,
        message: impl Into<String>,
    ) {
        let message = message.into();
        if message.is_empty() {
            return;
        }

        let now = Instant::now();
        let epoch = *self.epoch.get_or_init(|| now);
        let wall_time_us =
            u64::try_from(now.saturating_duration_since(epoch).as_micros()).unwrap_or(u64::MAX);
        let sim_time_us = self.clock.now_micros();

        let record = LogRecord::new(level, message)
            .with_location(file, line, function)
            .with_times(sim_time_us, wall_time_us);

        if level == LogLevel::Fatal {
            let diagnostic = format::format_record(&record);
            self.enqueue(record);
            self.escalate(&diagnostic);
        } else {
            self.enqueue(record);
        }
    }

    /// Like [`Logger::write`] for call sites that carry raw level bits
    ///
    /// `0` means "no level" and is ignored; anything that is not exactly one
    /// level bit terminates the process.
    pub fn write_raw(
        &self,
        level_bits: u32,
        file: &str,
        line: u32,
        function: &str,
        message: impl Into<String>,
    ) {
        if level_bits == 0 {
            return;
        }
        match LogLevel::try_from(level_bits) {
            Ok(level) => self.write(level, file, line, function, message),
            Err(e) => {
                self.close();
                self.fatal.abort(&e);
            }
        }
    }

    fn enqueue(&self, record: LogRecord) {
        if !self.state.get().accepts_records() || self.fatal.is_started() {
            self.metrics.record_rejected();
            return;
        }
        match self.sender.push(record) {
            Ok(()) => {
                self.metrics.record_enqueued();
            }
            Err(_) => {
                self.metrics.record_rejected();
            }
        }
    }

    fn escalate(&self, diagnostic: &str) {
        if !self.fatal.begin() {
            // Another thread is already taking the process down
            return;
        }
        // Nothing written from here on reaches the file, however long the
        // console takes to print the diagnostic
        self.state.advance(LoggerState::Initialized, LoggerState::Draining);
        self.fatal.announce(&self.console, diagnostic);
        self.close();
        self.fatal.finish("fatal log record")
    }

    /// Block until every record queued before this call has been committed
    ///
    /// With the instant sink the lines are on disk afterwards; the ring sink
    /// only writes to the file when the logger closes.
    pub fn flush(&self) -> Result<()> {
        if !self.state.get().accepts_records() {
            return Err(LoggerError::LoggerClosed);
        }
        let ack = self.sender.barrier()?;
        ack.recv().map_err(|_| LoggerError::LoggerClosed)
    }

    /// Drain the queue, stop the writer and close the file
    ///
    /// Safe to call more than once; only the first call does anything.
    pub fn close(&self) {
        let Some(handle) = self.writer.lock().take() else {
            return;
        };

        self.state.set(LoggerState::Draining);

        // Everything queued so far is committed before the stop request
        if let Ok(ack) = self.sender.barrier() {
            let _ = ack.recv();
        }

        self.stop.store(true, Ordering::Release);
        // The writer may already be gone; join below reports why
        let _ = self.sender.wake();

        if let Err(e) = handle.join() {
            eprintln!("[LOGGER ERROR] Writer thread panicked during shutdown: {:?}", e);
        }

        self.state.set(LoggerState::Closed);
    }

    /// Measure wall time from initialization instead of from the first write
    ///
    /// Has no effect once a record has been written.
    pub fn pin_epoch_to_init(&self) {
        let _ = self.epoch.set(self.initialized_at);
    }

    pub fn state(&self) -> LoggerState {
        self.state.get()
    }

    /// Whether a FATAL escalation has started on any thread
    pub fn is_terminating(&self) -> bool {
        self.fatal.is_started()
    }

    pub fn enabled_mask(&self) -> LevelMask {
        self.mask
    }

    /// Whether any level is enabled at all
    pub fn is_enabled(&self) -> bool {
        !self.mask.is_empty()
    }

    /// Whether records of `level` would reach the file
    #[inline]
    pub fn level_enabled(&self, level: LogLevel) -> bool {
        self.mask.enables(level)
    }

    /// Signals waiting for the writer thread
    pub fn queue_len(&self) -> usize {
        self.sender.len()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();

        let failures = self.metrics.write_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger closed after {} failed sink writes",
                failures
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Collaborators that are not set fall back to [`MonotonicClock`],
/// [`StdThreadFactory`], [`StdBacktrace`], [`ProcessAbort`] and stdout.
///
/// # Example
/// ```no_run
/// use rust_sim_logger::prelude::*;
/// use std::sync::Arc;
///
/// let clock = Arc::new(ManualClock::new(0));
/// let logger = Logger::builder()
///     .enabled_mask(LevelMask::all())
///     .path("sim.log")
///     .sink_mode(SinkMode::Ring { capacity: 1024 })
///     .clock(clock.clone())
///     .build()?;
/// # Ok::<(), LoggerError>(())
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    clock: Option<Arc<dyn LogicalClock>>,
    thread_factory: Option<Arc<dyn ThreadFactory>>,
    backtrace: Option<Arc<dyn BacktracePrinter>>,
    terminator: Option<Arc<dyn Terminator>>,
    console: Option<Console>,
    sink: Option<Box<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::from_config(LoggerConfig::default())
    }

    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            clock: None,
            thread_factory: None,
            backtrace: None,
            terminator: None,
            console: None,
            sink: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enabled_mask(mut self, mask: impl Into<LevelMask>) -> Self {
        self.config.enabled_mask = mask.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink_mode(mut self, mode: SinkMode) -> Self {
        self.config.sink = mode;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn thread_priority(mut self, priority: i32) -> Self {
        self.config.thread_priority = priority;
        self
    }

    /// Time between stopping the writer and terminating on FATAL
    #[must_use = "builder methods return a new value"]
    pub fn fatal_pause(mut self, pause: std::time::Duration) -> Self {
        self.config = self.config.with_fatal_pause(pause);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn LogicalClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn thread_factory(mut self, factory: Arc<dyn ThreadFactory>) -> Self {
        self.thread_factory = Some(factory);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn backtrace(mut self, printer: Arc<dyn BacktracePrinter>) -> Self {
        self.backtrace = Some(printer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = Some(terminator);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, console: Console) -> Self {
        self.console = Some(console);
        self
    }

    /// Use a custom sink instead of opening `path`
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Open the file, start the writer thread and return the running logger
    pub fn build(self) -> Result<Logger> {
        let LoggerBuilder {
            config,
            clock,
            thread_factory,
            backtrace,
            terminator,
            console,
            sink,
        } = self;
        config.validate()?;

        let clock = clock.unwrap_or_else(|| Arc::new(MonotonicClock::new()));
        let thread_factory = thread_factory.unwrap_or_else(|| Arc::new(StdThreadFactory));
        let backtrace = backtrace.unwrap_or_else(|| Arc::new(StdBacktrace));
        let terminator = terminator.unwrap_or_else(|| Arc::new(ProcessAbort));
        let console = console
            .unwrap_or_else(Console::stdout)
            .with_colors(config.console_colors);

        let sink = match sink {
            Some(sink) => sink,
            None => open_sink(&config, clock.as_ref())?,
        };

        let state = StateCell::default();
        let (sender, receiver) = record_queue::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let metrics = Arc::new(LoggerMetrics::new());
        let fatal = Arc::new(FatalEscalation::new(
            config.fatal_pause(),
            backtrace,
            terminator,
        ));

        let writer = WriterLoop::new(
            receiver,
            Arc::clone(&stop),
            config.enabled_mask,
            sink,
            console.clone(),
            config.console_flush_every,
            Arc::clone(&metrics),
            Arc::clone(&fatal),
        );
        let handle = thread_factory
            .spawn(
                WRITER_THREAD_NAME,
                config.thread_priority,
                Box::new(move || writer.run()),
            )
            .map_err(|e| LoggerError::initialization("writer thread", e.to_string()))?;
        state.advance(LoggerState::Uninitialized, LoggerState::Initialized);

        let initialized_at = Instant::now();
        let epoch = OnceLock::new();
        if config.epoch == EpochMode::Initialize {
            let _ = epoch.set(initialized_at);
        }

        Ok(Logger {
            mask: config.enabled_mask,
            sender,
            stop,
            writer: Mutex::new(Some(handle)),
            state,
            initialized_at,
            epoch,
            clock,
            console,
            fatal,
            metrics,
        })
    }

    /// Like [`LoggerBuilder::build`], but a failure terminates the process
    ///
    /// For hosts that cannot run without their log.
    pub fn build_or_terminate(self) -> Logger {
        let terminator = self
            .terminator
            .clone()
            .unwrap_or_else(|| Arc::new(ProcessAbort));
        match self.build() {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("[LOGGER CRITICAL] Logger initialization failed: {}", e);
                terminator.terminate(&e.to_string())
            }
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn open_sink(config: &LoggerConfig, clock: &dyn LogicalClock) -> Result<Box<dyn Sink>> {
    let header = format::header(Local::now(), &clock.resolution());
    let file = LogFile::create(&config.path, &header)?;
    Ok(match config.sink {
        SinkMode::Instant => Box::new(InstantSink::new(file)),
        SinkMode::Ring { capacity } => Box::new(RingSink::new(file, capacity)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use std::fs;
    use std::io;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tempfile::TempDir;

    #[derive(Default)]
    struct FakeHost {
        terminations: AtomicUsize,
    }

    impl BacktracePrinter for FakeHost {
        fn print_backtrace(&self) {}
    }

    impl Terminator for FakeHost {
        fn terminate(&self, reason: &str) -> ! {
            self.terminations.fetch_add(1, Ordering::SeqCst);
            panic!("terminated: {}", reason)
        }
    }

    struct FailingFactory;

    impl ThreadFactory for FailingFactory {
        fn spawn(
            &self,
            _name: &str,
            _priority: i32,
            _entry: crate::core::host::ThreadEntry,
        ) -> io::Result<JoinHandle<()>> {
            Err(io::Error::new(io::ErrorKind::Other, "no threads left"))
        }
    }

    fn builder(dir: &TempDir, host: &Arc<FakeHost>) -> LoggerBuilder {
        Logger::builder()
            .path(dir.path().join("unit.log"))
            .enabled_mask(LevelMask::all())
            .sink_mode(SinkMode::Instant)
            .console(Console::from_writer(io::sink()))
            .backtrace(host.clone())
            .terminator(host.clone())
    }

    #[test]
    fn test_build_starts_initialized() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost::default());
        let logger = builder(&dir, &host).build().unwrap();

        assert_eq!(logger.state(), LoggerState::Initialized);
        assert!(logger.is_enabled());
        assert!(logger.level_enabled(LogLevel::Trace));
    }

    #[test]
    fn test_empty_message_is_not_queued() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost::default());
        let logger = builder(&dir, &host).build().unwrap();

        let queued = logger.queue_len();
        logger.write(LogLevel::Info, "a.rs", 1, "f", "");
        logger.write(LogLevel::Fatal, "a.rs", 1, "f", String::new());

        assert_eq!(logger.queue_len(), queued);
        assert_eq!(logger.metrics().enqueued(), 0);
        assert_eq!(host.terminations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost::default());
        let logger = builder(&dir, &host).build().unwrap();

        logger.close();
        assert_eq!(logger.state(), LoggerState::Closed);
        logger.close();
        assert_eq!(logger.state(), LoggerState::Closed);
        assert!(matches!(logger.flush(), Err(LoggerError::LoggerClosed)));
    }

    #[test]
    fn test_writes_after_close_are_rejected() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost::default());
        let logger = builder(&dir, &host).build().unwrap();

        logger.close();
        crate::info!(logger, "too late");

        assert_eq!(logger.metrics().rejected(), 1);
        assert_eq!(logger.metrics().enqueued(), 0);
    }

    #[test]
    fn test_first_write_reads_zero_wall_time() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost::default());
        let clock = Arc::new(ManualClock::new(42));
        let logger = builder(&dir, &host).clock(clock).build().unwrap();

        logger.write(LogLevel::Info, "a.rs", 3, "start", "first");
        logger.close();

        let content = fs::read_to_string(dir.path().join("unit.log")).unwrap();
        assert!(content.contains("[INFO ], Sim(us)=42, Sys(us)=0, start(), first"));
    }

    #[test]
    fn test_pinned_epoch_counts_from_initialization() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost::default());
        let logger = builder(&dir, &host).build().unwrap();

        logger.pin_epoch_to_init();
        std::thread::sleep(Duration::from_millis(5));
        logger.write(LogLevel::Info, "a.rs", 3, "start", "later");
        logger.close();

        let content = fs::read_to_string(dir.path().join("unit.log")).unwrap();
        let line = content.lines().find(|l| l.ends_with("later")).unwrap();
        let sys: u64 = line
            .split("Sys(us)=")
            .nth(1)
            .and_then(|rest| rest.split(',').next())
            .unwrap()
            .parse()
            .unwrap();
        assert!(sys >= 5_000, "wall time {} should include the sleep", sys);
    }

    #[test]
    fn test_spawn_failure_is_an_initialization_error() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost::default());
        let result = builder(&dir, &host)
            .thread_factory(Arc::new(FailingFactory))
            .build();

        match result {
            Err(e) => {
                assert!(matches!(e, LoggerError::Initialization { .. }));
                assert!(e.is_fatal());
            }
            Ok(_) => panic!("build should fail"),
        }
    }

    #[test]
    fn test_build_or_terminate_uses_terminator() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost::default());
        let builder = builder(&dir, &host).thread_factory(Arc::new(FailingFactory));

        let result = catch_unwind(AssertUnwindSafe(|| builder.build_or_terminate()));

        assert!(result.is_err());
        assert_eq!(host.terminations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_opening_file() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost::default());
        let result = builder(&dir, &host)
            .sink_mode(SinkMode::Ring { capacity: 0 })
            .build();

        assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
        assert!(!dir.path().join("unit.log").exists());
    }

    #[test]
    fn test_raw_none_is_ignored() {
        let dir = TempDir::new().unwrap();
        let host = Arc::new(FakeHost::default());
        let logger = builder(&dir, &host).build().unwrap();

        logger.write_raw(0, "a.rs", 1, "f", "nothing");
        logger.write_raw(LogLevel::Warn.bits(), "a.rs", 1, "f", "warned");
        logger.close();

        assert_eq!(logger.metrics().enqueued(), 1);
        assert_eq!(host.terminations.load(Ordering::SeqCst), 0);
    }
}
