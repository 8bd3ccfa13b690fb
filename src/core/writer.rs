//! The writer thread
//!
//! One `WriterLoop` per logger. It blocks on the record queue, and for every
//! wake-up: checks the stop flag, takes one signal, filters by level mask,
//! formats and commits to the sink. On exit it flushes the sink and drops it,
//! which closes the log file.

use super::error::LoggerError;
use super::fatal::FatalEscalation;
use super::format::format_record;
use super::log_level::{LevelMask, LogLevel};
use super::log_record::LogRecord;
use super::metrics::LoggerMetrics;
use super::record_queue::{RecordReceiver, Signal};
use crate::sinks::{Console, Sink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Report the first failure and then every 1000th
const FAILURE_REPORT_INTERVAL: u64 = 1000;

pub(crate) struct WriterLoop {
    receiver: RecordReceiver,
    stop: Arc<AtomicBool>,
    mask: LevelMask,
    sink: Box<dyn Sink>,
    console: Console,
    console_flush_every: u32,
    console_echoes: u32,
    metrics: Arc<LoggerMetrics>,
    fatal: Arc<FatalEscalation>,
}

impl WriterLoop {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        receiver: RecordReceiver,
        stop: Arc<AtomicBool>,
        mask: LevelMask,
        sink: Box<dyn Sink>,
        console: Console,
        console_flush_every: u32,
        metrics: Arc<LoggerMetrics>,
        fatal: Arc<FatalEscalation>,
    ) -> Self {
        Self {
            receiver,
            stop,
            mask,
            sink,
            console,
            console_flush_every: console_flush_every.max(1),
            console_echoes: 0,
            metrics,
            fatal,
        }
    }

    pub(crate) fn run(mut self) {
        loop {
            let signal = match self.receiver.recv() {
                Ok(signal) => signal,
                // Every producer handle is gone; nobody can stop us any other way
                Err(_) => break,
            };

            // Records still queued behind a stop request are dropped
            if self.stop.load(Ordering::Acquire) {
                break;
            }

            match signal {
                Signal::Record(record) => self.process(&record),
                Signal::Barrier(ack) => {
                    let _ = ack.send(());
                }
                Signal::Wake => {
                    self.finish();
                    self.fatal.abort(&LoggerError::queue_consistency(
                        "writer woken without a record or a stop request",
                    ));
                    return;
                }
            }
        }

        self.finish();
    }

    fn process(&mut self, record: &LogRecord) {
        if !self.mask.enables(record.level) {
            self.metrics.record_filtered();
            return;
        }

        let line = format_record(record);

        if record.level == LogLevel::ConsoleDebug {
            self.echo(&record.message);
        }

        match self.sink.commit(&line) {
            Ok(()) => {
                self.metrics.record_committed();
            }
            Err(e) => self.report_failure(&e),
        }
    }

    fn echo(&mut self, message: &str) {
        if let Err(e) = self.console.echo(message) {
            eprintln!("[LOGGER ERROR] Console echo failed: {}", e);
        }
        self.console_echoes = self.console_echoes.wrapping_add(1);
        if self.console_echoes % self.console_flush_every == 0 {
            let _ = self.console.flush();
        }
    }

    fn report_failure(&self, error: &LoggerError) {
        let lost = error.lost_lines();
        let previous = self.metrics.record_write_failures(lost);
        // A batch loss is always worth a line; single failures are sampled
        if lost > 1 || previous % FAILURE_REPORT_INTERVAL == 0 {
            eprintln!(
                "[LOGGER ERROR] Sink '{}' failed ({} failures so far): {}",
                self.sink.name(),
                previous + lost,
                error
            );
        }
    }

    /// Flush buffered lines; the sink (and its file) is dropped with `self`
    fn finish(&mut self) {
        if let Err(e) = self.sink.flush() {
            self.report_failure(&e);
        }
        let _ = self.console.flush();
    }
}
