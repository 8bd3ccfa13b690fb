//! Multi-producer, single-consumer record queue
//!
//! Every message on the channel is one wake-up of the writer thread. Producers
//! push records; the lifecycle code additionally pushes barriers (to wait for
//! the writer to catch up) and a single wake-up once the stop flag is set.

use super::error::{LoggerError, Result};
use super::log_record::LogRecord;
use crossbeam_channel::{bounded, unbounded, Receiver, RecvError, Sender};

/// What the writer finds when it wakes up
#[derive(Debug)]
pub(crate) enum Signal {
    /// A record to filter, format and commit
    Record(LogRecord),
    /// Acknowledge once every earlier signal has been handled
    Barrier(Sender<()>),
    /// Carries nothing; only legitimate after a stop request
    Wake,
}

/// Create a connected producer/consumer pair
pub(crate) fn channel() -> (RecordSender, RecordReceiver) {
    let (tx, rx) = unbounded();
    (RecordSender { tx }, RecordReceiver { rx })
}

/// Producer half, shared by every thread that logs
#[derive(Debug, Clone)]
pub(crate) struct RecordSender {
    tx: Sender<Signal>,
}

impl RecordSender {
    pub(crate) fn push(&self, record: LogRecord) -> Result<()> {
        self.tx
            .send(Signal::Record(record))
            .map_err(|_| LoggerError::LoggerClosed)
    }

    /// Returns the receiver the writer acknowledges on
    pub(crate) fn barrier(&self) -> Result<Receiver<()>> {
        let (ack_tx, ack_rx) = bounded(1);
        self.tx
            .send(Signal::Barrier(ack_tx))
            .map_err(|_| LoggerError::LoggerClosed)?;
        Ok(ack_rx)
    }

    pub(crate) fn wake(&self) -> Result<()> {
        self.tx.send(Signal::Wake).map_err(|_| LoggerError::LoggerClosed)
    }

    /// Signals posted but not yet picked up by the writer
    pub(crate) fn len(&self) -> usize {
        self.tx.len()
    }
}

/// Consumer half, owned by the writer thread
#[derive(Debug)]
pub(crate) struct RecordReceiver {
    rx: Receiver<Signal>,
}

impl RecordReceiver {
    /// Block until a signal arrives; fails once every producer is gone
    pub(crate) fn recv(&self) -> std::result::Result<Signal, RecvError> {
        self.rx.recv()
    }
}
