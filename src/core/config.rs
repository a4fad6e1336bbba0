//! Serializable logger settings
//!
//! An application that keeps its settings in a config file can embed a
//! `LoggerConfig` there and hand it to [`LoggerBuilder::from_config`].
//! Every field has a default, so `{}` is a valid configuration.
//!
//! [`LoggerBuilder::from_config`]: crate::core::LoggerBuilder::from_config

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::queue::DEFAULT_QUEUE_CAPACITY;
use crate::sinks::{DEFAULT_LOG_ROOT, DEFAULT_PREFIX_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Most verbose level still delivered
    pub threshold: LogLevel,
    /// Delivery queue capacity in records
    pub queue_capacity: usize,
    /// Write to standard output
    pub console: bool,
    /// Colorize the console prefix column
    pub console_colors: bool,
    /// Width of the console prefix column
    pub console_width: usize,
    /// Root directory for per-run log files; `None` disables the file sink
    pub log_root: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            threshold: LogLevel::Debug2,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            console: true,
            console_colors: true,
            console_width: DEFAULT_PREFIX_WIDTH,
            log_root: Some(PathBuf::from(DEFAULT_LOG_ROOT)),
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON document
    pub fn from_json(text: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "queue_capacity must be at least 1",
            ));
        }
        if let Some(root) = &self.log_root {
            if root.as_os_str().is_empty() {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    "log_root must not be empty",
                ));
            }
        }
        Ok(())
    }
}
