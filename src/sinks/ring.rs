//! In-memory ring of formatted lines, written out only on flush
//!
//! Committing a line costs a slot overwrite and an index increment, so the
//! writer thread never touches the disk while the program runs. The price is
//! that only the most recent `capacity` lines survive.

use super::{LineWriter, LogFile, Sink};
use crate::core::{LoggerError, Result};

/// Fixed-capacity circular buffer of lines
///
/// After more than `capacity` pushes the buffer holds the last `capacity`
/// lines; reading from the write index to the end and then from slot 0 yields
/// them oldest first.
///
/// # Example
///
/// ```
/// use rust_sim_logger::sinks::RingBuffer;
///
/// let mut ring = RingBuffer::new(3);
/// for line in ["m1", "m2", "m3", "m4", "m5"] {
///     ring.push(line.to_string());
/// }
/// let kept: Vec<&str> = ring.iter().collect();
/// assert_eq!(kept, ["m3", "m4", "m5"]);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuffer {
    slots: Vec<Option<String>>,
    index: usize,
}

impl RingBuffer {
    /// # Panics
    /// Panics if capacity is zero
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Ring capacity must be positive");
        Self {
            slots: vec![None; capacity],
            index: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot the next push overwrites
    pub fn write_index(&self) -> usize {
        self.index
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn push(&mut self, line: String) {
        self.slots[self.index] = Some(line);
        self.index = (self.index + 1) % self.slots.len();
    }

    /// Occupied slots, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let (newer, older) = self.slots.split_at(self.index);
        older.iter().chain(newer).filter_map(|slot| slot.as_deref())
    }

    /// Take every line out, oldest first, leaving the ring empty
    pub fn drain(&mut self) -> Vec<String> {
        let capacity = self.slots.len();
        let lines = (0..capacity)
            .map(|offset| (self.index + offset) % capacity)
            .filter_map(|pos| self.slots[pos].take())
            .collect();
        self.index = 0;
        lines
    }
}

/// Buffers lines in a [`RingBuffer`] and writes them to the file on flush
pub struct RingSink<W = LogFile> {
    ring: RingBuffer,
    file: W,
}

impl<W: LineWriter> RingSink<W> {
    pub fn new(file: W, capacity: usize) -> Self {
        Self {
            ring: RingBuffer::new(capacity),
            file,
        }
    }

    pub fn ring(&self) -> &RingBuffer {
        &self.ring
    }
}

impl<W: LineWriter> Sink for RingSink<W> {
    fn commit(&mut self, line: &str) -> Result<()> {
        self.ring.push(line.to_string());
        Ok(())
    }

    /// Write every buffered line, oldest first
    ///
    /// A failed line does not stop the rest; the error reports how many
    /// lines were lost along with the first failure.
    fn flush(&mut self) -> Result<()> {
        let mut lost = 0u64;
        let mut first_error = None;

        for line in self.ring.drain() {
            if let Err(e) = self.file.write_line(&line) {
                lost += 1;
                first_error.get_or_insert(e);
            }
        }
        if let Err(e) = self.file.flush() {
            first_error.get_or_insert(e);
        }

        match first_error {
            None => Ok(()),
            Some(e) => Err(LoggerError::lines_lost("ring", lost.max(1), e)),
        }
    }

    fn name(&self) -> &str {
        "ring"
    }
}
