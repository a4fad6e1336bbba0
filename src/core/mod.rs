//! Core logger types and traits

pub mod call_site;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod log_args;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod queue;
pub mod sink;
pub mod sink_writer;

pub use call_site::{CallSite, UNKNOWN_FILE};
pub use config::LoggerConfig;
pub use diagnostics::{default_hook, Diagnostic, DiagnosticHook};
pub use error::{LoggerError, Result};
pub use log_args::{concat_values, encode_args, ArgValue, LogArgs, UNKNOWN_KEY};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{FileTarget, Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use queue::{delivery_queue, RecordReceiver, RecordSender, DEFAULT_QUEUE_CAPACITY};
pub use sink::Sink;
pub use sink_writer::SinkWriter;
