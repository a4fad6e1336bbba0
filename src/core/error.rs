//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Flat key/value list with a dangling key
    #[error("key without matching value ({count} arguments)")]
    OddArgumentCount { count: usize },

    /// Non-string value found where a key was expected
    #[error("key is not a string (position {position}, found {found})")]
    KeyNotString { position: usize, found: &'static str },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Log file could not be opened
    #[error("File sink error for '{path}': {source}")]
    FileSinkError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Channel send error
    #[error("Failed to send log record to sink writer")]
    ChannelSendError,

    /// The sink writer thread could not be started
    #[error("Failed to spawn sink writer thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            source,
        }
    }

    /// True for the errors raised while encoding a flat key/value list
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            LoggerError::OddArgumentCount { .. } | LoggerError::KeyNotString { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LoggerConfig", "capacity out of range");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let err = LoggerError::file_sink("/var/log/kslog/app", io_err);
        assert!(matches!(err, LoggerError::FileSinkError { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::OddArgumentCount { count: 3 };
        assert_eq!(err.to_string(), "key without matching value (3 arguments)");

        let err = LoggerError::KeyNotString {
            position: 2,
            found: "int",
        };
        assert_eq!(
            err.to_string(),
            "key is not a string (position 2, found int)"
        );

        let err = LoggerError::file_sink(
            "/tmp/x.log",
            std::io::Error::new(std::io::ErrorKind::Other, "Disk full"),
        );
        assert_eq!(err.to_string(), "File sink error for '/tmp/x.log': Disk full");
    }

    #[test]
    fn test_argument_error_classification() {
        assert!(LoggerError::OddArgumentCount { count: 1 }.is_argument_error());
        assert!(!LoggerError::ChannelSendError.is_argument_error());
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("creating log directory", "cannot create", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("creating log directory"));
        assert!(err.to_string().contains("cannot create"));
    }
}
