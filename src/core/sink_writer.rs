//! The single consumer of the delivery queue
//!
//! The sink writer owns every sink outright. It runs on its own thread,
//! pops records in queue order and hands each one to every sink in
//! registration order (console first, then file, then anything extra).

use super::{
    diagnostics::{panic_message, Diagnostic, DiagnosticHook},
    log_record::LogRecord,
    metrics::LoggerMetrics,
    queue::RecordReceiver,
    sink::Sink,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

/// Name of the sink writer thread
pub const WRITER_THREAD_NAME: &str = "kslog-sink-writer";

pub struct SinkWriter {
    sinks: Vec<Box<dyn Sink>>,
    metrics: Arc<LoggerMetrics>,
    diagnostics: DiagnosticHook,
}

impl SinkWriter {
    pub fn new(
        sinks: Vec<Box<dyn Sink>>,
        metrics: Arc<LoggerMetrics>,
        diagnostics: DiagnosticHook,
    ) -> Self {
        Self {
            sinks,
            metrics,
            diagnostics,
        }
    }

    /// Start the loop on a dedicated thread
    pub fn spawn(self, receiver: RecordReceiver) -> std::io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || self.run(receiver))
    }

    /// Deliver records until the queue is closed and drained
    ///
    /// Sinks are flushed whenever the queue runs empty and once more at
    /// the end.
    pub fn run(mut self, receiver: RecordReceiver) {
        while let Some(record) = receiver.pop() {
            self.deliver(&record);
            if receiver.is_empty() {
                self.flush_all();
            }
        }
        self.flush_all();
    }

    /// Write one record to every sink
    ///
    /// **Per-sink isolation**: an error or panic in one sink is reported
    /// and the remaining sinks still receive the record.
    pub fn deliver(&mut self, record: &LogRecord) {
        let mut has_error = false;

        for sink in self.sinks.iter_mut() {
            let result = catch_unwind(AssertUnwindSafe(|| sink.write_record(record)));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    has_error = true;
                    self.metrics.record_sink_failure();
                    report(
                        &self.diagnostics,
                        Diagnostic::SinkWriteFailed {
                            sink: sink.name().to_string(),
                            error,
                        },
                    );
                }
                Err(payload) => {
                    has_error = true;
                    self.metrics.record_sink_failure();
                    report(
                        &self.diagnostics,
                        Diagnostic::SinkPanicked {
                            sink: sink.name().to_string(),
                            message: panic_message(payload.as_ref()),
                        },
                    );
                }
            }
        }

        if !has_error {
            self.metrics.record_written();
        }
    }

    pub fn flush_all(&mut self) {
        for sink in self.sinks.iter_mut() {
            let result = catch_unwind(AssertUnwindSafe(|| sink.flush()));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    self.metrics.record_sink_failure();
                    report(
                        &self.diagnostics,
                        Diagnostic::SinkFlushFailed {
                            sink: sink.name().to_string(),
                            error,
                        },
                    );
                }
                Err(payload) => {
                    self.metrics.record_sink_failure();
                    report(
                        &self.diagnostics,
                        Diagnostic::SinkPanicked {
                            sink: sink.name().to_string(),
                            message: panic_message(payload.as_ref()),
                        },
                    );
                }
            }
        }
    }
}

/// Hand a diagnostic to the hook without letting a panicking hook take
/// the writer thread down
fn report(hook: &DiagnosticHook, diagnostic: Diagnostic) {
    let _ = catch_unwind(AssertUnwindSafe(|| hook(&diagnostic)));
}
