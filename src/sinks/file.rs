//! File sink implementation

use crate::core::{LogRecord, LoggerError, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes one line per record to a log file
///
/// Line shape: `<level>: <file>:<line> <code> : "<message>" <args>`.
/// A sink created with [`FileSink::disabled`] accepts records and writes
/// nothing, which is what the logger falls back to when the file cannot be
/// opened.
pub struct FileSink {
    writer: Option<BufWriter<File>>,
    path: Option<PathBuf>,
}

impl FileSink {
    /// Open (create or append to) the file at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e))?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path: Some(path),
        })
    }

    /// A file sink without a file
    pub fn disabled() -> Self {
        Self {
            writer: None,
            path: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Render the file line for a record, including the trailing newline
    pub fn format_line(record: &LogRecord) -> String {
        format!(
            "{} : \"{}\" {}\n",
            record.prefix(),
            record.message(),
            record.args()
        )
    }
}

impl Sink for FileSink {
    fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        writer.write_all(Self::format_line(record).as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
