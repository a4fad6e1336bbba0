//! Log record structure

use super::call_site::CallSite;
use super::log_args::{escape_line_breaks, LogArgs};
use super::log_level::LogLevel;
use std::fmt;

/// A single accepted log call
///
/// Built once by the logger, moved through the delivery queue and consumed
/// by the sink writer. There are no setters.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    level: LogLevel,
    code: i32,
    module: String,
    message: String,
    call_site: CallSite,
    args: LogArgs,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a record can never span several sink lines.
    fn sanitize_message(message: &str) -> String {
        escape_line_breaks(message).into_owned()
    }

    pub fn new(
        level: LogLevel,
        module: impl Into<String>,
        code: i32,
        message: &str,
        call_site: CallSite,
        args: LogArgs,
    ) -> Self {
        Self {
            level,
            code,
            module: module.into(),
            message: Self::sanitize_message(message),
            call_site,
            args,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn call_site(&self) -> &CallSite {
        &self.call_site
    }

    pub fn file(&self) -> &str {
        self.call_site.file()
    }

    pub fn line(&self) -> u32 {
        self.call_site.line()
    }

    pub fn args(&self) -> &LogArgs {
        &self.args
    }

    /// `<level>: <file>:<line> <code>`, shared by the console and file lines
    pub fn prefix(&self) -> Prefix<'_> {
        Prefix(self)
    }
}

/// Display adapter for [`LogRecord::prefix`]
pub struct Prefix<'a>(&'a LogRecord);

impl fmt::Display for Prefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        let text = format!(
            "{}: {} {}",
            record.level.as_u8(),
            record.call_site,
            record.code
        );
        // pad/truncate flags of the caller apply to the whole prefix
        f.pad(&text)
    }
}
