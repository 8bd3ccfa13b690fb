//! Console stream shared by the writer thread and the fatal path

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

#[cfg(feature = "console")]
use colored::Colorize;

/// Cloneable handle to the console stream (stdout by default)
///
/// The writer thread echoes CONSOLE_DEBUG messages here, and a producer that
/// logs FATAL prints its diagnostic here, so access is serialized by a mutex.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
    use_colors: bool,
}

impl Console {
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Route console output to any writer, e.g. an in-memory buffer in tests
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
            use_colors: false,
        }
    }

    /// Color the `[FATAL]` tag of fatal diagnostics (needs the `console` feature)
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Print a raw message on its own line
    pub fn echo(&self, message: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        writeln!(out, "{}", message)
    }

    /// Print a fatal diagnostic surrounded by blank lines and flush
    pub fn fatal(&self, diagnostic: &str) -> io::Result<()> {
        let diagnostic = self.decorate_fatal(diagnostic);
        let mut out = self.out.lock();
        write!(out, "\n{}\n\n", diagnostic)?;
        out.flush()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.out.lock().flush()
    }

    #[cfg(feature = "console")]
    fn decorate_fatal(&self, diagnostic: &str) -> String {
        if !self.use_colors {
            return diagnostic.to_string();
        }
        let tag = "[FATAL]".bright_red().bold().to_string();
        diagnostic.replacen("[FATAL]", &tag, 1)
    }

    #[cfg(not(feature = "console"))]
    fn decorate_fatal(&self, diagnostic: &str) -> String {
        diagnostic.to_string()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}
