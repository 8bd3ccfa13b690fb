//! Sink implementations
//!
//! A sink receives formatted lines from the writer thread. It is owned by that
//! thread alone, so implementations need `Send` but not `Sync`.

pub mod console;
pub mod instant;
pub mod log_file;
pub mod ring;

pub use console::Console;
pub use instant::InstantSink;
pub use log_file::{LineWriter, LogFile};
pub use ring::{RingBuffer, RingSink};

use crate::core::Result;

pub trait Sink: Send {
    /// Accept one formatted line (without trailing newline)
    fn commit(&mut self, line: &str) -> Result<()>;
    /// Push everything accepted so far to durable storage
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
