//! Async logging example
//!
//! Several producer threads share one logger; a small queue makes them wait
//! for the sink writer instead of dropping records.
//!
//! Run with: cargo run --example async_logging

use kslog::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== kslog - Async Logging Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .queue_capacity(8)
            .log_file("async_test.log")
            .build()?,
    );

    let handles: Vec<_> = (0..5)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..20 {
                    logger.info_ex(
                        "worker",
                        i,
                        "tick",
                        &["thread".into(), ArgValue::from(thread_id)],
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("a producer thread panicked");
        }
    }

    let metrics = logger.metrics().clone();
    drop(logger);

    println!("\n5 threads logged {} records", metrics.enqueued());
    println!("Producers waited on a full queue {} times", metrics.queue_full_events());
    println!("Check 'async_test.log' for file output");

    Ok(())
}
