//! Logging macros for ergonomic record construction.
//!
//! The macros expand at the call site, so the file and line captured for
//! each record are those of the macro invocation.
//!
//! # Examples
//!
//! ```
//! use kslog::prelude::*;
//! use kslog::{infof, log_ex};
//!
//! let logger = Logger::builder().no_file().build().unwrap();
//!
//! let user = "bob";
//! infof!(logger, "auth", 7, "login {}", user);
//!
//! log_ex!(logger, LogLevel::Error, "db", 3, "timeout", "host", "db1", "retries", 3);
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use kslog::prelude::*;
/// # let logger = Logger::builder().no_file().build().unwrap();
/// use kslog::logf;
/// logf!(logger, LogLevel::Notice, "net", 12, "listening on port {}", 8080);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $module:expr, $code:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, $module, $code, format_args!($($arg)+))
    };
}

/// Log the print-style concatenation of the given values.
///
/// # Examples
///
/// ```
/// # use kslog::prelude::*;
/// # let logger = Logger::builder().no_file().build().unwrap();
/// use kslog::log_concat;
/// log_concat!(logger, LogLevel::Info, "jobs", 2, "finished ", 10, 20);
/// ```
#[macro_export]
macro_rules! log_concat {
    ($logger:expr, $level:expr, $module:expr, $code:expr, $($value:expr),+ $(,)?) => {
        $logger.log_concat(
            $level,
            $module,
            $code,
            &[$($crate::ArgValue::from($value)),+],
        )
    };
}

/// Log a literal message followed by a flat `key, value, ...` list.
///
/// # Examples
///
/// ```
/// # use kslog::prelude::*;
/// # let logger = Logger::builder().no_file().build().unwrap();
/// use kslog::log_ex;
/// log_ex!(logger, LogLevel::Warning, "db", 3, "slow query", "ms", 1200, "table", "users");
/// log_ex!(logger, LogLevel::Warning, "db", 4, "no arguments");
/// ```
#[macro_export]
macro_rules! log_ex {
    ($logger:expr, $level:expr, $module:expr, $code:expr, $message:expr $(, $kv:expr)* $(,)?) => {
        $logger.log_ex(
            $level,
            $module,
            $code,
            $message,
            &[$($crate::ArgValue::from($kv)),*],
        )
    };
}

/// Log an emergency-level formatted message.
#[macro_export]
macro_rules! emergef {
    ($logger:expr, $module:expr, $code:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::Emerge, $module, $code, $($arg)+)
    };
}

/// Log an alert-level formatted message.
#[macro_export]
macro_rules! alertf {
    ($logger:expr, $module:expr, $code:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::Alert, $module, $code, $($arg)+)
    };
}

/// Log a critical-level formatted message.
#[macro_export]
macro_rules! critf {
    ($logger:expr, $module:expr, $code:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::Crit, $module, $code, $($arg)+)
    };
}

/// Log an error-level formatted message.
///
/// # Examples
///
/// ```
/// # use kslog::prelude::*;
/// # let logger = Logger::builder().no_file().build().unwrap();
/// use kslog::errorf;
/// errorf!(logger, "db", 500, "connection refused: {}", "db1:5432");
/// ```
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $module:expr, $code:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::Error, $module, $code, $($arg)+)
    };
}

/// Log a warning-level formatted message.
#[macro_export]
macro_rules! warningf {
    ($logger:expr, $module:expr, $code:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::Warning, $module, $code, $($arg)+)
    };
}

/// Log a notice-level formatted message.
#[macro_export]
macro_rules! noticef {
    ($logger:expr, $module:expr, $code:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::Notice, $module, $code, $($arg)+)
    };
}

/// Log an info-level formatted message.
///
/// # Examples
///
/// ```
/// # use kslog::prelude::*;
/// # let logger = Logger::builder().no_file().build().unwrap();
/// use kslog::infof;
/// infof!(logger, "auth", 7, "login {}", "bob");
/// ```
#[macro_export]
macro_rules! infof {
    ($logger:expr, $module:expr, $code:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::Info, $module, $code, $($arg)+)
    };
}

/// Log a debug-level formatted message.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $module:expr, $code:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::Debug, $module, $code, $($arg)+)
    };
}

/// Log a debug2-level formatted message.
#[macro_export]
macro_rules! debug2f {
    ($logger:expr, $module:expr, $code:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::Debug2, $module, $code, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogLevel, LogRecord, Logger, Result, Sink};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<LogRecord>>>);

    impl Sink for Capture {
        fn write_record(&mut self, record: &LogRecord) -> Result<()> {
            self.0.lock().push(record.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    fn logger() -> (Logger, Capture) {
        let capture = Capture::default();
        let logger = Logger::builder()
            .no_console()
            .no_file()
            .sink(capture.clone())
            .build()
            .unwrap();
        (logger, capture)
    }

    #[test]
    fn test_logf_macro() {
        let (mut logger, capture) = logger();
        let line = line!() + 1;
        logf!(logger, LogLevel::Info, "m", 1, "value {}", 42);
        logger.shutdown(Duration::from_secs(5));

        let records = capture.0.lock();
        assert_eq!(records[0].message(), "value 42");
        assert_eq!(records[0].file(), "macros.rs");
        assert_eq!(records[0].line(), line);
    }

    #[test]
    fn test_level_macros() {
        let (mut logger, capture) = logger();
        emergef!(logger, "m", 0, "a");
        alertf!(logger, "m", 1, "b");
        critf!(logger, "m", 2, "c");
        errorf!(logger, "m", 3, "d");
        warningf!(logger, "m", 4, "e");
        noticef!(logger, "m", 5, "f");
        infof!(logger, "m", 6, "g");
        debugf!(logger, "m", 7, "h");
        debug2f!(logger, "m", 8, "i {}", 9);
        logger.shutdown(Duration::from_secs(5));

        let records = capture.0.lock();
        assert_eq!(records.len(), 9);
        for (idx, record) in records.iter().enumerate() {
            assert_eq!(record.level(), LogLevel::ALL[idx]);
            assert_eq!(record.code(), idx as i32);
        }
        assert_eq!(records[8].message(), "i 9");
    }

    #[test]
    fn test_log_concat_macro() {
        let (mut logger, capture) = logger();
        log_concat!(logger, LogLevel::Notice, "m", 1, "took ", 12, 34);
        logger.shutdown(Duration::from_secs(5));

        assert_eq!(capture.0.lock()[0].message(), "took 12 34");
    }

    #[test]
    fn test_log_ex_macro() {
        let (mut logger, capture) = logger();
        log_ex!(logger, LogLevel::Error, "db", 3, "timeout", "host", "db1", "retries", 3);
        log_ex!(logger, LogLevel::Error, "db", 4, "bare");
        logger.shutdown(Duration::from_secs(5));

        let records = capture.0.lock();
        assert_eq!(records[0].args().render(), "[ host: db1 ] [ retries: 3 ] ");
        assert!(records[1].args().is_empty());
    }
}
