//! File logging example
//!
//! Logs to the console and to a per-run file under a local directory.
//!
//! Run with: cargo run --example file_logging

use kslog::prelude::*;

fn main() -> Result<()> {
    println!("=== kslog - File Logging Example ===\n");

    let mut logger = Logger::builder().log_root("demo-logs").build()?;

    logger.infof("app", 100, format_args!("Application started"));
    logger.debugf("app", 101, format_args!("Loading configuration..."));
    logger.warning_ex("app", 102, "Using defaults", &["missing".into(), "timeout_ms".into()]);
    for i in 1..=5 {
        logger.infof("worker", 200 + i, format_args!("Processing item {}/5", i));
    }
    logger.errorf("plugin", 300, format_args!("Failed to load optional plugin"));

    let path = logger.log_path().map(|p| p.display().to_string());
    logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

    println!("\n=== Example completed successfully! ===");
    match path {
        Some(path) => println!("Check '{}' for the file output", path),
        None => println!("The log file could not be opened"),
    }

    Ok(())
}
