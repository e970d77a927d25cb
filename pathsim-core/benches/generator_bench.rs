//! Criterion benchmarks for generation hot paths.
//!
//! Benchmarks:
//! 1. Full `generate` at daily, hourly, and minute resolution
//! 2. Price-path simulation alone
//! 3. Timestamp sequencing alone

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pathsim_core::path::simulate_path;
use pathsim_core::rng::simulation_rng;
use pathsim_core::{generate, Interval, SimulationConfig, TimestampSequence};

fn config(interval: &str, days: u32) -> SimulationConfig {
    SimulationConfig {
        days,
        interval: interval.to_string(),
        random_seed: Some(42),
        ..Default::default()
    }
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (interval, days) in [("1d", 3650), ("1h", 365), ("1m", 10)] {
        let cfg = config(interval, days);
        group.bench_with_input(BenchmarkId::new(interval, days), &cfg, |b, cfg| {
            b.iter(|| generate(black_box(cfg)))
        });
    }
    group.finish();
}

fn bench_path(c: &mut Criterion) {
    let cfg = config("1d", 10_000);
    c.bench_function("simulate_path_10k", |b| {
        b.iter(|| {
            let mut rng = simulation_rng(Some(7));
            simulate_path(black_box(&cfg), 10_000, &mut rng)
        })
    });
}

fn bench_timestamps(c: &mut Criterion) {
    let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let freq = Interval::FiveMinutes.resolve();
    c.bench_function("timestamps_5m_10k", |b| {
        b.iter(|| {
            let seq = TimestampSequence::new(start, &freq, 10_000).unwrap();
            seq.iter().count()
        })
    });
}

criterion_group!(benches, bench_generate, bench_path, bench_timestamps);
criterion_main!(benches);
