//! Write-through sink: every line reaches the file as soon as it is committed

use super::{LogFile, Sink};
use crate::core::{LoggerError, Result};

pub struct InstantSink {
    file: LogFile,
}

impl InstantSink {
    pub fn new(file: LogFile) -> Self {
        Self { file }
    }
}

impl Sink for InstantSink {
    fn commit(&mut self, line: &str) -> Result<()> {
        self.file
            .write_line(line)
            .and_then(|_| self.file.flush())
            .map_err(|e| LoggerError::sink_write("instant", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.file
            .flush()
            .map_err(|e| LoggerError::sink_write("instant", e))
    }

    fn name(&self) -> &str {
        "instant"
    }
}
