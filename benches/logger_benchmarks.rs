//! Criterion benchmarks for rust_sim_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_sim_logger::core::format::format_record;
use rust_sim_logger::prelude::*;
use rust_sim_logger::sinks::RingBuffer;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn bench_logger(dir: &TempDir, name: &str, sink: SinkMode, mask: LevelMask) -> Logger {
    Logger::builder()
        .path(dir.path().join(name))
        .enabled_mask(mask)
        .sink_mode(sink)
        .console(Console::from_writer(std::io::sink()))
        .build()
        .expect("Failed to build logger")
}

// ============================================================================
// Producer Latency Benchmarks
// ============================================================================

fn bench_producer_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("producer_write");
    group.throughput(Throughput::Elements(1));
    let dir = TempDir::new().expect("Failed to create temp dir");

    let ring = bench_logger(
        &dir,
        "ring.log",
        SinkMode::Ring { capacity: 4096 },
        LevelMask::all(),
    );
    group.bench_function("ring", |b| {
        b.iter(|| ring.write(LogLevel::Info, "bench.rs", 1, "bench", black_box("message")));
    });

    let instant = bench_logger(&dir, "instant.log", SinkMode::Instant, LevelMask::all());
    group.bench_function("instant", |b| {
        b.iter(|| instant.write(LogLevel::Info, "bench.rs", 1, "bench", black_box("message")));
    });

    let masked = bench_logger(&dir, "masked.log", SinkMode::Instant, LevelMask::ERROR);
    group.bench_function("masked_macro", |b| {
        b.iter(|| rust_sim_logger::debug!(masked, "value {}", black_box(42)));
    });

    group.finish();
    ring.close();
    instant.close();
    masked.close();
}

fn bench_concurrent_producers(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_producers");
    let dir = TempDir::new().expect("Failed to create temp dir");

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * 1000) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            let logger = Arc::new(bench_logger(
                &dir,
                &format!("concurrent_{}.log", threads),
                SinkMode::Ring { capacity: 4096 },
                LevelMask::all(),
            ));
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for i in 0..1000 {
                                logger.write(LogLevel::Debug, "bench.rs", 1, "bench", format!("{}", i));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().expect("producer panicked");
                }
            });
            logger.close();
        });
    }

    group.finish();
}

// ============================================================================
// Writer-side Benchmarks
// ============================================================================

fn bench_format_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_record");
    group.throughput(Throughput::Elements(1));

    for level in [LogLevel::Info, LogLevel::Trace, LogLevel::Fatal] {
        let record = LogRecord::new(level, "a typical log message")
            .with_location("src/sim/scheduler.rs", 128, "schedule")
            .with_times(1_234_567, 89);
        group.bench_function(level.to_str(), |b| {
            b.iter(|| format_record(black_box(&record)));
        });
    }

    group.finish();
}

fn bench_ring_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_push");
    group.throughput(Throughput::Elements(1));

    let mut ring = RingBuffer::new(4096);
    group.bench_function("wrapping", |b| {
        b.iter(|| ring.push(black_box(String::from("[INFO ], Sim(us)=1, Sys(us)=2, f(), m"))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_producer_write,
    bench_concurrent_producers,
    bench_format_record,
    bench_ring_push
);
criterion_main!(benches);
