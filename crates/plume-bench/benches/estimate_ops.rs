//! Criterion micro-benchmarks for density estimation and grid encoding.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use plume_bench::{scattered_ensemble, HEIGHT, LENGTH};
use plume_estimate::{DensityEstimator, DensityGrid, GridFormat};

/// Benchmark: bin 100K particles onto a 200x20 grid.
fn bench_estimate_100k(c: &mut Criterion) {
    let ensemble = scattered_ensemble(100_000, 7);
    let mut est = DensityEstimator::new(200, 20, HEIGHT, LENGTH).unwrap();

    c.bench_function("estimate_100k_200x20", |b| {
        b.iter(|| {
            let grid = est.estimate(&ensemble).unwrap();
            black_box(grid.total());
        });
    });
}

fn sample_grid() -> DensityGrid {
    let ensemble = scattered_ensemble(100_000, 8);
    let mut est = DensityEstimator::new(200, 20, HEIGHT, LENGTH).unwrap();
    est.estimate(&ensemble).unwrap().clone()
}

/// Benchmark: encode a 200x20 grid as text.
fn bench_encode_text(c: &mut Criterion) {
    let grid = sample_grid();
    c.bench_function("grid_encode_text_200x20", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(64 * 1024);
            grid.write_to(&mut buf, GridFormat::Text).unwrap();
            black_box(&buf);
        });
    });
}

/// Benchmark: encode then decode a 200x20 grid in binary.
fn bench_binary_round_trip(c: &mut Criterion) {
    let grid = sample_grid();
    let mut encoded = Vec::new();
    grid.write_to(&mut encoded, GridFormat::Binary).unwrap();

    c.bench_function("grid_decode_binary_200x20", |b| {
        b.iter(|| {
            let decoded = DensityGrid::read_from(&mut encoded.as_slice(), GridFormat::Binary).unwrap();
            black_box(&decoded);
        });
    });
}

criterion_group!(
    benches,
    bench_estimate_100k,
    bench_encode_text,
    bench_binary_round_trip
);
criterion_main!(benches);
