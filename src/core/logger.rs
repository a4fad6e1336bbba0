//! Main logger implementation

use super::{
    call_site::CallSite,
    config::LoggerConfig,
    diagnostics::{default_hook, panic_message, Diagnostic, DiagnosticHook},
    error::{LoggerError, Result},
    log_args::{concat_values, encode_args, ArgValue, LogArgs},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    queue::{delivery_queue, RecordSender, DEFAULT_QUEUE_CAPACITY},
    sink::Sink,
    sink_writer::SinkWriter,
};
use crate::sinks::{create_log_directory, per_run_log_path, ConsoleSink, FileSink, DEFAULT_LOG_ROOT};
use parking_lot::RwLock;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit shutdown.
/// For custom timeout control, use the `shutdown()` method instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Leveled asynchronous logger
///
/// Producers on any thread call the per-level methods; records are queued
/// and written by one background sink writer. Share it by reference or
/// through an `Arc`.
///
/// # Example
///
/// ```
/// use kslog::prelude::*;
///
/// let logger = Logger::builder()
///     .threshold(LogLevel::Info)
///     .no_file()
///     .build()
///     .unwrap();
///
/// logger.infof("auth", 7, format_args!("login {}", "bob"));
/// logger.info("auth", 8, &["session ".into(), 42.into()]);
/// logger.info_ex("db", 3, "timeout", &["host".into(), "db1".into()]);
/// logger.debugf("auth", 1, format_args!("suppressed"));
/// ```
pub struct Logger {
    threshold: RwLock<LogLevel>,
    sender: Option<RecordSender>,
    worker: Option<thread::JoinHandle<()>>,
    metrics: Arc<LoggerMetrics>,
    diagnostics: DiagnosticHook,
    log_path: Option<PathBuf>,
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The default wiring: console plus a per-run file under
    /// [`DEFAULT_LOG_ROOT`], most verbose threshold
    pub fn for_process() -> Result<Self> {
        LoggerBuilder::new().build()
    }

    pub fn threshold(&self) -> LogLevel {
        *self.threshold.read()
    }

    pub fn set_threshold(&self, level: LogLevel) {
        *self.threshold.write() = level;
    }

    /// Whether a record at `level` would be delivered
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.threshold.read().accepts(level)
    }

    /// Path of the log file, if one was opened
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Log a message built from format arguments
    ///
    /// The arguments are only rendered when `level` passes the threshold.
    #[track_caller]
    pub fn log_fmt(&self, level: LogLevel, module: &str, code: i32, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let call_site = CallSite::caller();
        let message = match args.as_str() {
            Some(literal) => literal.to_string(),
            None => args.to_string(),
        };
        self.emit(level, module, code, &message, call_site, LogArgs::new());
    }

    /// Log the print-style concatenation of `values`
    #[track_caller]
    pub fn log_concat(&self, level: LogLevel, module: &str, code: i32, values: &[ArgValue]) {
        if !self.enabled(level) {
            return;
        }
        let call_site = CallSite::caller();
        let message = concat_values(values);
        self.emit(level, module, code, &message, call_site, LogArgs::new());
    }

    /// Log a literal message plus a flat `key, value, ...` list
    ///
    /// A malformed list is reported through the diagnostic hook and the
    /// record goes out without arguments.
    #[track_caller]
    pub fn log_ex(
        &self,
        level: LogLevel,
        module: &str,
        code: i32,
        message: &str,
        key_values: &[ArgValue],
    ) {
        if !self.enabled(level) {
            return;
        }
        let call_site = CallSite::caller();
        let args = match encode_args(key_values) {
            Ok(args) => args,
            Err(error) => {
                self.metrics.record_argument_error();
                (self.diagnostics)(&Diagnostic::ArgumentEncoding {
                    error,
                    call_site: call_site.clone(),
                });
                LogArgs::new()
            }
        };
        self.emit(level, module, code, message, call_site, args);
    }

    /// Log a literal message plus arguments built with [`LogArgs`]
    #[track_caller]
    pub fn log_args(&self, level: LogLevel, module: &str, code: i32, message: &str, args: LogArgs) {
        if !self.enabled(level) {
            return;
        }
        let call_site = CallSite::caller();
        self.emit(level, module, code, message, call_site, args);
    }

    fn emit(
        &self,
        level: LogLevel,
        module: &str,
        code: i32,
        message: &str,
        call_site: CallSite,
        args: LogArgs,
    ) {
        let Some(ref sender) = self.sender else {
            return;
        };
        let record = LogRecord::new(level, module, code, message, call_site, args);
        // Only fails once the sink writer is gone
        if sender.push(record).is_err() {
            self.metrics.record_dropped();
        }
    }

    /// Gracefully shutdown the logger with a custom timeout
    ///
    /// Closes the delivery queue and waits for the sink writer to drain it
    /// and flush every sink. Records logged afterwards are ignored.
    ///
    /// **Note**: When the logger is dropped without calling `shutdown()` explicitly,
    /// it uses [`DEFAULT_SHUTDOWN_TIMEOUT`].
    ///
    /// # Returns
    ///
    /// `true` if the writer finished within `timeout`, `false` otherwise
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kslog::Logger;
    /// use std::time::Duration;
    ///
    /// let mut logger = Logger::for_process().unwrap();
    /// logger.notice_ex("main", 0, "starting", &[]);
    ///
    /// if !logger.shutdown(Duration::from_secs(10)) {
    ///     eprintln!("Warning: Logger shutdown timed out");
    /// }
    /// ```
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        // Close the channel to signal the sink writer
        drop(self.sender.take());

        let Some(handle) = self.worker.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(payload) = handle.join() {
                    (self.diagnostics)(&Diagnostic::WriterPanicked {
                        message: panic_message(payload.as_ref()),
                    });
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                (self.diagnostics)(&Diagnostic::ShutdownTimedOut {
                    timeout,
                    pending: self.metrics.pending(),
                });
                return false;
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold())
            .field("running", &self.sender.is_some())
            .field("log_path", &self.log_path)
            .field("metrics", &self.metrics)
            .finish()
    }
}

macro_rules! level_methods {
    ($($level:ident => $concat:ident, $formatted:ident, $explicit:ident;)+) => {
        impl Logger {
            $(
                #[doc = concat!("Log at `", stringify!($level), "` the print-style concatenation of `values`.")]
                #[inline]
                #[track_caller]
                pub fn $concat(&self, module: &str, code: i32, values: &[ArgValue]) {
                    self.log_concat(LogLevel::$level, module, code, values);
                }

                #[doc = concat!("Log at `", stringify!($level), "` a message built by `format_args!`.")]
                #[inline]
                #[track_caller]
                pub fn $formatted(&self, module: &str, code: i32, args: fmt::Arguments<'_>) {
                    self.log_fmt(LogLevel::$level, module, code, args);
                }

                #[doc = concat!("Log at `", stringify!($level), "` a literal message plus a flat key/value list.")]
                #[inline]
                #[track_caller]
                pub fn $explicit(&self, module: &str, code: i32, message: &str, key_values: &[ArgValue]) {
                    self.log_ex(LogLevel::$level, module, code, message, key_values);
                }
            )+
        }
    };
}

level_methods! {
    Emerge => emerge, emergef, emerge_ex;
    Alert => alert, alertf, alert_ex;
    Crit => crit, critf, crit_ex;
    Error => error, errorf, error_ex;
    Warning => warning, warningf, warning_ex;
    Notice => notice, noticef, notice_ex;
    Info => info, infof, info_ex;
    Debug => debug, debugf, debug_ex;
    Debug2 => debug2, debug2f, debug2_ex;
}

/// Where the file sink writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTarget {
    /// `<root>/<program>/<program>.log.<date>-<time>.<pid>`
    PerRun(PathBuf),
    /// A fixed file, appended to
    Path(PathBuf),
    /// No file sink
    Disabled,
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use kslog::prelude::*;
///
/// let logger = Logger::builder()
///     .threshold(LogLevel::Notice)
///     .queue_capacity(256)
///     .console_colors(false)
///     .no_file()
///     .build()
///     .unwrap();
/// assert_eq!(logger.threshold(), LogLevel::Notice);
/// ```
pub struct LoggerBuilder {
    threshold: LogLevel,
    queue_capacity: usize,
    console: Option<ConsoleSink>,
    file: FileTarget,
    extra_sinks: Vec<Box<dyn Sink>>,
    diagnostics: Option<DiagnosticHook>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            threshold: LogLevel::Debug2,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            console: Some(ConsoleSink::new()),
            file: FileTarget::PerRun(PathBuf::from(DEFAULT_LOG_ROOT)),
            extra_sinks: Vec::new(),
            diagnostics: None,
        }
    }

    /// Seed a builder from serialized settings
    pub fn from_config(config: &LoggerConfig) -> Self {
        let console = config.console.then(|| {
            ConsoleSink::with_colors(config.console_colors).prefix_width(config.console_width)
        });
        let file = match &config.log_root {
            Some(root) => FileTarget::PerRun(root.clone()),
            None => FileTarget::Disabled,
        };
        Self {
            threshold: config.threshold,
            queue_capacity: config.queue_capacity,
            console,
            file,
            ..Self::new()
        }
    }

    /// Set the most verbose level that is still delivered
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: LogLevel) -> Self {
        self.threshold = level;
        self
    }

    /// Set how many records may wait before producers block
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Replace the console sink, e.g. to write somewhere other than stdout
    #[must_use = "builder methods return a new value"]
    pub fn console_sink(mut self, sink: ConsoleSink) -> Self {
        self.console = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_colors(mut self, use_colors: bool) -> Self {
        self.console = self.console.map(|c| c.colors(use_colors));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn no_console(mut self) -> Self {
        self.console = None;
        self
    }

    /// Write per-run files under `root` instead of [`DEFAULT_LOG_ROOT`]
    #[must_use = "builder methods return a new value"]
    pub fn log_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.file = FileTarget::PerRun(root.into());
        self
    }

    /// Append to a fixed file instead of a per-run file
    #[must_use = "builder methods return a new value"]
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = FileTarget::Path(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn no_file(mut self) -> Self {
        self.file = FileTarget::Disabled;
        self
    }

    /// Add a sink after the console and file sinks
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.extra_sinks.push(Box::new(sink));
        self
    }

    /// Receive diagnostics instead of having them printed
    #[must_use = "builder methods return a new value"]
    pub fn on_diagnostic(mut self, hook: DiagnosticHook) -> Self {
        self.diagnostics = Some(hook);
        self
    }

    /// Open the sinks and start the sink writer
    ///
    /// A log file that cannot be opened is reported as a diagnostic and the
    /// logger carries on without it. Only a failure to start the writer
    /// thread is an error.
    pub fn build(self) -> Result<Logger> {
        let diagnostics = self.diagnostics.unwrap_or_else(default_hook);
        let metrics = Arc::new(LoggerMetrics::new());

        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
        if let Some(console) = self.console {
            sinks.push(Box::new(console));
        }

        let mut log_path = None;
        if let Some(file) = open_file_sink(&self.file, &diagnostics) {
            log_path = file.path().map(Path::to_path_buf);
            sinks.push(Box::new(file));
        }
        sinks.extend(self.extra_sinks);

        let (sender, receiver) = delivery_queue(self.queue_capacity, Arc::clone(&metrics));
        let worker = SinkWriter::new(sinks, Arc::clone(&metrics), Arc::clone(&diagnostics))
            .spawn(receiver)
            .map_err(LoggerError::WorkerSpawn)?;

        Ok(Logger {
            threshold: RwLock::new(self.threshold),
            sender: Some(sender),
            worker: Some(worker),
            metrics,
            diagnostics,
            log_path,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Open the file sink for `target`, degrading to a disabled sink on failure
fn open_file_sink(target: &FileTarget, diagnostics: &DiagnosticHook) -> Option<FileSink> {
    let path = match target {
        FileTarget::Disabled => return None,
        FileTarget::Path(path) => path.clone(),
        FileTarget::PerRun(root) => per_run_log_path(root),
    };

    let opened = match (target, path.parent()) {
        (FileTarget::PerRun(_), Some(dir)) => {
            create_log_directory(dir).and_then(|()| FileSink::open(&path))
        }
        _ => FileSink::open(&path),
    };

    match opened {
        Ok(sink) => Some(sink),
        Err(error) => {
            diagnostics(&Diagnostic::FileOpenFailed { path, error });
            Some(FileSink::disabled())
        }
    }
}
