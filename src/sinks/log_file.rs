//! The single output file behind both sink strategies

use crate::core::{LoggerError, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Line-oriented output a buffering sink writes into
pub trait LineWriter: Send {
    /// Write one line and its terminating newline
    fn write_line(&mut self, line: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Exclusively locked, truncated log file that starts with a header line
///
/// The lock is advisory (`flock`-style); it keeps a second logger instance
/// from interleaving into the same file. It is released, and the file closed,
/// when the value is dropped.
pub struct LogFile {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl LogFile {
    pub fn create(path: impl AsRef<Path>, header: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "creating log directory",
                        parent.display().to_string(),
                        e,
                    )
                })?;
            }
        }

        // Lock before truncating so a file held by another logger stays intact
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;
        file.try_lock_exclusive()
            .map_err(|_| LoggerError::file_lock(path.display().to_string()))?;
        file.set_len(0).map_err(|e| {
            LoggerError::io_operation("truncating log file", path.display().to_string(), e)
        })?;

        let mut log_file = Self {
            writer: BufWriter::new(file),
            path,
        };
        log_file.write_line(header)?;
        log_file.flush()?;
        Ok(log_file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl LineWriter for LogFile {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        LogFile::write_line(self, line)
    }

    fn flush(&mut self) -> io::Result<()> {
        LogFile::flush(self)
    }
}

impl Drop for LogFile {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        if let Err(e) = self.writer.flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush '{}' on close: {}",
                self.path.display(),
                e
            );
        }
        let _ = self.writer.get_ref().unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_writes_header_and_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        fs::write(&path, "stale content\nfrom last run\n").unwrap();

        let mut file = LogFile::create(&path, "HEADER").unwrap();
        file.write_line("first").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "HEADER\nfirst\n");
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/run.log");

        let file = LogFile::create(&path, "HEADER").unwrap();
        assert_eq!(file.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_second_instance_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("locked.log");

        let mut first = LogFile::create(&path, "HEADER").unwrap();
        first.write_line("owned by first").unwrap();
        first.flush().unwrap();

        let second = LogFile::create(&path, "OTHER");
        assert!(matches!(second, Err(LoggerError::FileLockError { .. })));
        assert!(fs::read_to_string(&path).unwrap().contains("owned by first"));

        drop(first);
        assert!(LogFile::create(&path, "OTHER").is_ok());
    }
}
