//! Sink trait for log output destinations

use super::{error::Result, log_record::LogRecord};

/// A destination for formatted log records
///
/// Sinks are moved into the sink writer thread and only ever touched from
/// there, so they need to be `Send` but not `Sync`.
pub trait Sink: Send {
    fn write_record(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
