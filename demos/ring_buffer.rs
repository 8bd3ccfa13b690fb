//! Ring buffer example
//!
//! Keeps only the most recent lines in memory and writes them when the logger
//! closes. Useful for long runs where only the end of the story matters.
//!
//! Run with: cargo run --example ring_buffer

use rust_sim_logger::prelude::*;
use rust_sim_logger::{debug, info};

fn main() -> Result<()> {
    println!("=== Rust Sim Logger - Ring Buffer Example ===\n");

    let config = LoggerConfig::new(LevelMask::all(), "ring.log")
        .with_sink(SinkMode::Ring { capacity: 10 });
    println!("Configuration:\n{}\n", config.to_json_string()?);

    let logger = Logger::initialize(config)?;

    for step in 1..=100 {
        debug!(logger, "step {} of 100", step);
    }
    info!(logger, "run complete");

    logger.close();
    println!("'ring.log' holds steps 92 to 100 and the final message.");
    Ok(())
}
