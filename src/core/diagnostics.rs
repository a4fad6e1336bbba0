//! Reports about the logger's own health
//!
//! Problems inside the pipeline (bad key/value lists, a failing sink, an
//! unopenable log file) are never written through the sinks themselves.
//! They are turned into a [`Diagnostic`] and handed to a
//! [`DiagnosticHook`], which by default prints them.

use super::call_site::CallSite;
use super::error::LoggerError;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Callback receiving every diagnostic
pub type DiagnosticHook = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

#[derive(Debug)]
pub enum Diagnostic {
    /// A flat key/value list was malformed; the record went out without args
    ArgumentEncoding {
        error: LoggerError,
        call_site: CallSite,
    },
    /// The per-run log file could not be created; logging is console-only
    FileOpenFailed { path: PathBuf, error: LoggerError },
    /// A sink returned an error while writing a record
    SinkWriteFailed { sink: String, error: LoggerError },
    /// A sink returned an error while flushing
    SinkFlushFailed { sink: String, error: LoggerError },
    /// A sink panicked; the writer keeps going with the other sinks
    SinkPanicked { sink: String, message: String },
    /// The sink writer thread died
    WriterPanicked { message: String },
    /// Shutdown gave up waiting for the sink writer
    ShutdownTimedOut { timeout: Duration, pending: u64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ArgumentEncoding { error, call_site } => {
                write!(f, "ERROR: {} at {}", error, call_site)
            }
            Diagnostic::FileOpenFailed { path, error } => {
                write!(
                    f,
                    "Error opening file for logging {}: {}",
                    path.display(),
                    error
                )
            }
            Diagnostic::SinkWriteFailed { sink, error } => {
                write!(f, "Sink '{}' failed: {}", sink, error)
            }
            Diagnostic::SinkFlushFailed { sink, error } => {
                write!(f, "Sink '{}' flush failed: {}", sink, error)
            }
            Diagnostic::SinkPanicked { sink, message } => {
                write!(
                    f,
                    "Sink '{}' panicked: {}. Other sinks continue to function.",
                    sink, message
                )
            }
            Diagnostic::WriterPanicked { message } => {
                write!(f, "Sink writer thread panicked: {}", message)
            }
            Diagnostic::ShutdownTimedOut { timeout, pending } => {
                write!(
                    f,
                    "Sink writer did not finish within {:?}, {} records may be lost",
                    timeout, pending
                )
            }
        }
    }
}

/// Hook used when none is configured
///
/// A file-open failure goes to stdout next to the console output; the rest
/// goes to stderr so it cannot feed back into a failing sink.
pub fn default_hook() -> DiagnosticHook {
    Arc::new(|diagnostic: &Diagnostic| {
        print_diagnostic(diagnostic, &mut io::stdout().lock(), &mut io::stderr().lock());
    })
}

/// Write `diagnostic` to `out` or `err` the way the default hook does
fn print_diagnostic(diagnostic: &Diagnostic, out: &mut impl Write, err: &mut impl Write) {
    // Nowhere left to report a failed write
    let _ = match diagnostic {
        Diagnostic::FileOpenFailed { .. } => writeln!(out, "[KSLOG WARNING] {}", diagnostic),
        _ => writeln!(err, "[KSLOG ERROR] {}", diagnostic),
    };
}

/// Extract a readable message from a caught panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
