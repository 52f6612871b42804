//! Benchmarks for whole-curve fits and the per-span building blocks.

use std::{f64::consts::TAU, hint::black_box};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cubicfit::{
    CurveFitter, FitOptions, fit_curve,
    lsq::fit_segment,
    parameterize::chord_length_parameterize,
    point::Points,
};

/// A spiral of `n` samples in `dims` dimensions; extra axes rise linearly.
fn spiral(n: usize, dims: usize) -> Vec<f64> {
    (0..n)
        .flat_map(|i| {
            let t = i as f64 / (n - 1) as f64;
            let a = t * 4.0 * TAU;
            let r = 1.0 + t * 20.0;
            (0..dims).map(move |d| match d {
                0 => a.cos() * r,
                1 => a.sin() * r,
                _ => t * d as f64,
            })
        })
        .collect()
}

/// Benchmark full fits as the sample count grows.
fn bench_fit_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_sizes");

    for n in [64, 256, 1024, 4096] {
        let points = spiral(n, 2);
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| fit_curve(black_box(&points), 2, 0.1, None))
        });
    }

    group.finish();
}

/// Benchmark full fits across dimensions.
fn bench_fit_dims(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_dims");

    for dims in [1, 2, 3, 4, 8] {
        let points = spiral(512, dims);
        group.bench_function(BenchmarkId::from_parameter(dims), |b| {
            b.iter(|| fit_curve(black_box(&points), dims, 0.1, None))
        });
    }

    group.finish();
}

/// Compare thresholds and Newton round counts on the same input.
fn bench_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("options");
    let points = spiral(1024, 2);

    for threshold in [0.01, 0.1, 1.0] {
        for iterations in [0, 4, 16] {
            let fitter = CurveFitter::new(
                FitOptions::new(threshold).with_max_iterations(iterations),
            );
            group.bench_function(
                BenchmarkId::new(format!("e{threshold}"), format!("iter{iterations}")),
                |b| b.iter(|| fitter.fit(black_box(&points), 2, None)),
            );
        }
    }

    group.finish();
}

/// Benchmark a single least-squares segment fit.
fn bench_segment(c: &mut Criterion) {
    let data = spiral(64, 2);
    let points = Points::new(&data[..32], 2);
    let Some(u) = chord_length_parameterize(points, None) else {
        return;
    };

    c.bench_function("fit_segment", |b| {
        b.iter(|| fit_segment(black_box(points), &u, &[-1.0, 0.0], &[0.0, 1.0]))
    });
}

#[allow(missing_docs, clippy::missing_docs_in_private_items)]
mod bench_defs {
    use super::*;
    criterion_group!(
        benches,
        bench_fit_sizes,
        bench_fit_dims,
        bench_options,
        bench_segment
    );
}

pub use bench_defs::benches;
criterion_main!(benches);
