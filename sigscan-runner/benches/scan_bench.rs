//! Criterion benchmarks for the scan hot paths.
//!
//! Benchmarks:
//! 1. Full scan of the default universe on synthetic data
//! 2. Single-instrument composition at several history lengths
//! 3. Structure detection alone

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sigscan_core::config::StructureParams;
use sigscan_core::domain::SignalId;
use sigscan_core::structure::analyze;
use sigscan_core::{ComposeRequest, EngineConfig, SignalComposer};
use sigscan_runner::synthetic::{synthetic_bars, ticker_from_bars};
use sigscan_runner::{synthetic_snapshot, Scanner, Universe};

fn bench_full_scan(c: &mut Criterion) {
    let universe = Universe::default_crypto();
    let snapshot = synthetic_snapshot(&universe, 500, 42);
    let scanner = Scanner::new(EngineConfig::default()).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    c.bench_function("scan_default_universe_500_bars", |b| {
        b.iter(|| scanner.scan_at(black_box(&universe), black_box(&snapshot), now))
    });
}

fn bench_compose(c: &mut Criterion) {
    let config = EngineConfig::default();
    let composer = SignalComposer::new(&config);
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let mut group = c.benchmark_group("compose");

    for n in [100usize, 500, 2000] {
        let bars = synthetic_bars("BTCUSDT", n, 7);
        let ticker = ticker_from_bars(&bars).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| {
                composer.compose(ComposeRequest {
                    id: SignalId(1),
                    symbol: "BTCUSDT",
                    bars: black_box(bars),
                    ticker: &ticker,
                    generated_at: now,
                })
            })
        });
    }
    group.finish();
}

fn bench_structure(c: &mut Criterion) {
    let bars = synthetic_bars("ETHUSDT", 2000, 9);
    let params = StructureParams::default();
    c.bench_function("analyze_2000_bars", |b| {
        b.iter(|| analyze(black_box(&bars), &params))
    });
}

criterion_group!(benches, bench_full_scan, bench_compose, bench_structure);
criterion_main!(benches);
