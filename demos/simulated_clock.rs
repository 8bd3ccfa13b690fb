//! Simulated clock example
//!
//! Every line carries two times: simulation time from a clock the program
//! advances itself, and wall time since the first write.
//!
//! Run with: cargo run --example simulated_clock

use rust_sim_logger::prelude::*;
use rust_sim_logger::{info, trace};
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Rust Sim Logger - Simulated Clock Example ===\n");

    let clock = Arc::new(ManualClock::new(0).with_resolution("10us"));
    let logger = Arc::new(
        Logger::builder()
            .enabled_mask(LevelMask::INFO | LevelMask::TRACE)
            .path("simulation.log")
            .sink_mode(SinkMode::Ring { capacity: 1024 })
            .clock(clock.clone())
            .build()?,
    );

    let nodes: Vec<_> = (0..4)
        .map(|node| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for slot in 0..5 {
                    trace!(logger, "node {} slot {}", node, slot);
                }
            })
        })
        .collect();

    for tick in 0..10 {
        clock.advance(10);
        info!(logger, "tick {}", tick);
    }

    for node in nodes {
        let _ = node.join();
    }

    logger.close();
    println!("Check 'simulation.log': Sim(us) follows the ticks, Sys(us) the wall clock.");
    Ok(())
}
