//! File logging example
//!
//! Writes every record straight to disk with the instant sink, so the file is
//! complete even if the process dies before the logger closes.
//!
//! Run with: cargo run --example file_logging

use rust_sim_logger::prelude::*;
use rust_sim_logger::{console_debug, error, info, warn};

fn main() -> Result<()> {
    println!("=== Rust Sim Logger - File Logging Example ===\n");

    let logger = Logger::builder()
        .enabled_mask(LevelMask::default() | LogLevel::ConsoleDebug)
        .path("application.log")
        .sink_mode(SinkMode::Instant)
        .build()?;

    println!("1. Logging to the file:");

    info!(logger, "Application started");
    info!(logger, "Configuration loaded successfully");
    warn!(logger, "Using default settings for some options");
    error!(logger, "Failed to load optional plugin");

    println!("\n2. Echoing to the console as well:");

    for i in 1..=5 {
        console_debug!(logger, "Processing item {}/5", i);
    }

    // Lines are on disk once the writer has caught up
    logger.flush()?;
    let metrics = logger.metrics();
    println!(
        "\n3. Metrics: {} committed, {} filtered",
        metrics.committed(),
        metrics.filtered()
    );

    logger.close();
    println!("\nCheck 'application.log' for the output.");
    Ok(())
}
