//! Console sink implementation

use crate::core::{LogRecord, Result, Sink};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Write};

/// Width of the `<level>: <file>:<line> <code>` column
pub const DEFAULT_PREFIX_WIDTH: usize = 30;

/// Writes one line per record to standard output
///
/// Line shape: `<prefix padded to width> : <message> <args>`.
pub struct ConsoleSink {
    out: Box<dyn Write + Send>,
    prefix_width: usize,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            out: Box::new(io::stdout()),
            prefix_width: DEFAULT_PREFIX_WIDTH,
            use_colors: cfg!(feature = "console"),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self::new().colors(use_colors)
    }

    /// Send lines to another writer instead of stdout
    ///
    /// # Example
    ///
    /// ```
    /// use kslog::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::to_writer(Vec::new()).colors(false);
    /// ```
    pub fn to_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Box::new(writer),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors && cfg!(feature = "console");
        self
    }

    /// Set the prefix column width; longer prefixes are cut
    #[must_use]
    pub fn prefix_width(mut self, width: usize) -> Self {
        self.prefix_width = width;
        self
    }

    /// Render the console line for a record, without trailing newline
    pub fn format_line(&self, record: &LogRecord) -> String {
        let width = self.prefix_width;
        let prefix = format!("{:<width$.width$}", record.prefix());
        let prefix = self.paint(prefix, record);
        format!("{} : {} {}", prefix, record.message(), record.args())
    }

    #[cfg(feature = "console")]
    fn paint(&self, prefix: String, record: &LogRecord) -> String {
        if self.use_colors {
            prefix.color(record.level().color_code()).to_string()
        } else {
            prefix
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, prefix: String, _record: &LogRecord) -> String {
        prefix
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.format_line(record);
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallSite, LogArgs, LogLevel};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn record() -> LogRecord {
        LogRecord::new(
            LogLevel::Warning,
            "net",
            404,
            "not found",
            CallSite::new("src/http.rs", 9),
            LogArgs::new().with("path", "/x"),
        )
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_format_line() {
        let sink = ConsoleSink::with_colors(false);
        assert_eq!(
            sink.format_line(&record()),
            "4: http.rs:9 404               : not found [ path: /x ] "
        );
    }

    #[test]
    fn test_prefix_truncated() {
        let sink = ConsoleSink::with_colors(false).prefix_width(6);
        assert_eq!(sink.format_line(&record()), "4: htt : not found [ path: /x ] ");
    }

    #[test]
    fn test_writes_one_line_per_record() {
        let buf = SharedBuf::default();
        let mut sink = ConsoleSink::to_writer(buf.clone()).colors(false);
        sink.write_record(&record()).unwrap();
        sink.write_record(&record()).unwrap();
        sink.flush().unwrap();

        let text = String::from_utf8(buf.0.lock().clone()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("[ path: /x ] \n"));
    }
}
