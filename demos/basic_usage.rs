//! Basic logger usage example
//!
//! Demonstrates the three call shapes and threshold filtering on the console.
//!
//! Run with: cargo run --example basic_usage

use kslog::prelude::*;
use kslog::{infof, log_ex};

fn main() -> Result<()> {
    println!("=== kslog - Basic Usage Example ===\n");

    let mut logger = Logger::builder().no_file().build()?;

    println!("1. The three call shapes:");
    logger.noticef("demo", 1, format_args!("formatted: {} + {} = {}", 2, 2, 4));
    logger.notice("demo", 2, &["concatenated ".into(), 10.into(), 20.into()]);
    logger.notice_ex(
        "demo",
        3,
        "explicit",
        &["host".into(), "db1".into(), "retries".into(), 3.into()],
    );

    println!("\n2. Every level:");
    for level in LogLevel::ALL {
        logger.log_fmt(level, "demo", level.as_u8() as i32, format_args!("{} message", level));
    }

    println!("\n3. Threshold set to WARNING - NOTICE and below are hidden:");
    logger.set_threshold(LogLevel::Warning);
    infof!(logger, "demo", 4, "hidden");
    log_ex!(logger, LogLevel::Error, "demo", 5, "visible", "reason", "disk full");

    logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
