//! # kslog
//!
//! Leveled asynchronous logging. Callers emit records tagged with a
//! severity level, a module name and a numeric code; a single background
//! sink writer delivers them to the console and to a per-run log file.
//!
//! ## Features
//!
//! - **Nine severity levels**: `EMERGE` (most urgent) through `DEBUG2`
//! - **Non-blocking producers**: records go through a bounded queue; a
//!   producer only waits when the queue is full
//! - **Three call shapes per level**: formatted, concatenated, and literal
//!   message plus key/value arguments
//! - **Call-site capture**: file and line of the calling code on every record
//!
//! ```
//! use kslog::prelude::*;
//! use kslog::infof;
//!
//! let logger = Logger::builder().no_file().build()?;
//! infof!(logger, "auth", 7, "login {}", "bob");
//! logger.info_ex("db", 3, "timeout", &["host".into(), "db1".into(), "retries".into(), 3.into()]);
//! # Ok::<(), kslog::LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ArgValue, CallSite, Diagnostic, DiagnosticHook, FileTarget, LogArgs, LogLevel, LogRecord,
        Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sink,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, FileSink};
}

pub use core::{
    ArgValue, CallSite, Diagnostic, DiagnosticHook, FileTarget, LogArgs, LogLevel, LogRecord,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Sink,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use sinks::{ConsoleSink, FileSink};
