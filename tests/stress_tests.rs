//! Stress tests for the delivery pipeline
//!
//! These tests verify:
//! - Per-producer FIFO order with many concurrent producers
//! - Producers block instead of dropping when the queue is tiny
//! - A slow sink never loses records

use kslog::prelude::*;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Clone, Default)]
struct Capture {
    records: Arc<Mutex<Vec<LogRecord>>>,
    delay: Option<Duration>,
}

impl Sink for Capture {
    fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}

fn build(capture: &Capture, capacity: usize) -> Logger {
    Logger::builder()
        .queue_capacity(capacity)
        .no_console()
        .no_file()
        .sink(capture.clone())
        .build()
        .expect("Failed to build logger")
}

/// Records of each producer arrive in the order that producer sent them
#[test]
fn test_per_producer_order_under_contention() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: i32 = 500;

    let capture = Capture::default();
    let logger = Arc::new(build(&capture, 16));

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let module = format!("producer-{}", producer);
                for seq in 0..PER_PRODUCER {
                    logger.info_ex(&module, seq, "tick", &["producer".into(), producer.into()]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("producer panicked");
    }

    let mut logger = Arc::try_unwrap(logger).expect("producers released the logger");
    assert!(logger.shutdown(Duration::from_secs(10)));

    let records = capture.records.lock();
    assert_eq!(records.len(), PRODUCERS * PER_PRODUCER as usize);

    let mut next: HashMap<String, i32> = HashMap::new();
    for record in records.iter() {
        let expected = next.entry(record.module().to_string()).or_insert(0);
        assert_eq!(record.code(), *expected, "out of order for {}", record.module());
        *expected += 1;
    }
    assert!(next.values().all(|&count| count == PER_PRODUCER));
}

/// A one-slot queue with a slow sink makes producers wait, never drop
#[test]
fn test_tiny_queue_blocks_instead_of_dropping() {
    let capture = Capture {
        delay: Some(Duration::from_millis(2)),
        ..Capture::default()
    };
    let mut logger = build(&capture, 1);

    for i in 0..100 {
        logger.noticef("slow", i, format_args!("record {}", i));
    }

    assert!(logger.shutdown(Duration::from_secs(10)));
    let metrics = logger.metrics();
    assert_eq!(metrics.enqueued(), 100);
    assert_eq!(metrics.written(), 100);
    assert!(metrics.queue_full_events() > 0);

    let codes: Vec<i32> = capture.records.lock().iter().map(|r| r.code()).collect();
    assert_eq!(codes, (0..100).collect::<Vec<_>>());
}

/// Threshold changes from another thread take effect for later calls
#[test]
fn test_threshold_shared_across_threads() {
    let capture = Capture::default();
    let logger = Arc::new(build(&capture, 64));

    logger.set_threshold(LogLevel::Error);
    let worker = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            logger.debugf("w", 1, format_args!("dropped"));
            logger.errorf("w", 2, format_args!("kept"));
        })
    };
    worker.join().expect("worker panicked");

    let mut logger = Arc::try_unwrap(logger).expect("worker released the logger");
    assert!(logger.shutdown(Duration::from_secs(5)));

    let codes: Vec<i32> = capture.records.lock().iter().map(|r| r.code()).collect();
    assert_eq!(codes, vec![2]);
}
