//! Bounded delivery queue between producers and the sink writer
//!
//! Any number of [`RecordSender`] clones push; exactly one
//! [`RecordReceiver`] pops. A push into a full queue waits for the sink
//! writer to make room, nothing is ever dropped.

use super::error::{LoggerError, Result};
use super::log_record::LogRecord;
use super::metrics::LoggerMetrics;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::Arc;

/// Default number of records the queue holds before producers wait
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Create a queue holding at most `capacity` records (at least one)
pub fn delivery_queue(
    capacity: usize,
    metrics: Arc<LoggerMetrics>,
) -> (RecordSender, RecordReceiver) {
    let (sender, receiver) = bounded(capacity.max(1));
    (
        RecordSender {
            inner: sender,
            metrics,
        },
        RecordReceiver { inner: receiver },
    )
}

/// Producer side of the delivery queue
#[derive(Clone)]
pub struct RecordSender {
    inner: Sender<LogRecord>,
    metrics: Arc<LoggerMetrics>,
}

impl RecordSender {
    /// Push a record, waiting while the queue is full
    ///
    /// Fails only when the receiver is gone.
    pub fn push(&self, record: LogRecord) -> Result<()> {
        match self.inner.try_send(record) {
            Ok(()) => {}
            Err(TrySendError::Full(record)) => {
                self.metrics.record_queue_full();
                self.inner
                    .send(record)
                    .map_err(|_| LoggerError::ChannelSendError)?;
            }
            Err(TrySendError::Disconnected(_)) => return Err(LoggerError::ChannelSendError),
        }
        self.metrics.record_enqueued();
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity().unwrap_or(usize::MAX)
    }
}

/// Consumer side of the delivery queue; deliberately not `Clone`
pub struct RecordReceiver {
    inner: Receiver<LogRecord>,
}

impl RecordReceiver {
    /// Wait for the next record
    ///
    /// Returns `None` once every sender is dropped and the queue is drained.
    pub fn pop(&self) -> Option<LogRecord> {
        self.inner.recv().ok()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallSite, LogArgs, LogLevel};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    fn record(code: i32) -> LogRecord {
        LogRecord::new(
            LogLevel::Info,
            "queue",
            code,
            "msg",
            CallSite::unknown(),
            LogArgs::new(),
        )
    }

    #[test]
    fn test_fifo_order() {
        let (tx, rx) = delivery_queue(16, Arc::new(LoggerMetrics::new()));
        for code in 0..10 {
            tx.push(record(code)).unwrap();
        }
        let codes: Vec<i32> = (0..10).map(|_| rx.pop().unwrap().code()).collect();
        assert_eq!(codes, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_capacity_raised_to_one() {
        let (tx, rx) = delivery_queue(0, Arc::new(LoggerMetrics::new()));
        assert_eq!(tx.capacity(), 1);
        tx.push(record(1)).unwrap();
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn test_push_blocks_when_full() {
        let metrics = Arc::new(LoggerMetrics::new());
        let (tx, rx) = delivery_queue(1, Arc::clone(&metrics));
        tx.push(record(1)).unwrap();

        let done = Arc::new(AtomicBool::new(false));
        let done_clone = Arc::clone(&done);
        let producer = thread::spawn(move || {
            tx.push(record(2)).unwrap();
            done_clone.store(true, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(100));
        assert!(!done.load(Ordering::SeqCst), "push must wait for room");

        assert_eq!(rx.pop().unwrap().code(), 1);
        producer.join().unwrap();
        assert!(done.load(Ordering::SeqCst));
        assert_eq!(rx.pop().unwrap().code(), 2);

        assert_eq!(metrics.enqueued(), 2);
        assert_eq!(metrics.queue_full_events(), 1);
    }

    #[test]
    fn test_pop_ends_after_senders_dropped() {
        let (tx, rx) = delivery_queue(4, Arc::new(LoggerMetrics::new()));
        tx.push(record(5)).unwrap();
        drop(tx);
        assert_eq!(rx.pop().map(|r| r.code()), Some(5));
        assert!(rx.pop().is_none());
    }

    #[test]
    fn test_push_after_receiver_dropped() {
        let (tx, rx) = delivery_queue(4, Arc::new(LoggerMetrics::new()));
        drop(rx);
        assert!(matches!(
            tx.push(record(1)),
            Err(LoggerError::ChannelSendError)
        ));
    }
}
