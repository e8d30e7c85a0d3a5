//! Criterion benchmarks for ued-baseline
//!
//! Run with: cargo bench -p ued-baseline

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ndarray::Array2;
use ued_baseline::{Axis, BaselineOptions, ExtensionMode, baseline_dt, baseline_dwt, baseline_dwt2, dtcwt, idtcwt};
use ued_core::{DualTreeFilter, FirstStageFilter, Wavelet};

/// Exponential background with a few narrow peaks.
fn powder_profile(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let x = i as f64 * 20.0 / size as f64;
            let peaks: f64 = [4.0, 9.0, 14.0]
                .iter()
                .map(|c| 25.0 * (-((x - c) / 0.05).powi(2) / 2.0).exp())
                .sum();
            75.0 * (-x / 5.0).exp() + peaks
        })
        .collect()
}

// ============================================================================
// Transform benchmarks
// ============================================================================

fn bench_dtcwt_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("DTCWT_RoundTrip");
    let first_stage = FirstStageFilter::default();

    for &size in &[1024, 4096, 16384] {
        let signal = powder_profile(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let coeffs = dtcwt(
                    black_box(&signal),
                    first_stage,
                    DualTreeFilter::Qshift4,
                    Some(5),
                    ExtensionMode::Symmetric,
                )
                .unwrap();
                black_box(idtcwt(&coeffs, first_stage, DualTreeFilter::Qshift4).unwrap())
            })
        });
    }
    group.finish();
}

// ============================================================================
// Baseline benchmarks
// ============================================================================

fn bench_baseline_1d(c: &mut Criterion) {
    let mut group = c.benchmark_group("Baseline1D");
    group.sample_size(20);
    let opts = BaselineOptions::new(100).with_level(5);

    for &size in &[1000, 4000] {
        let signal = powder_profile(size);
        group.bench_with_input(BenchmarkId::new("dwt_sym6", size), &size, |b, _| {
            b.iter(|| black_box(baseline_dwt(black_box(&signal), Wavelet::Sym6, &opts).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("dt_qshift4", size), &size, |b, _| {
            b.iter(|| {
                black_box(
                    baseline_dt(
                        black_box(&signal),
                        FirstStageFilter::default(),
                        DualTreeFilter::Qshift4,
                        &opts,
                    )
                    .unwrap(),
                )
            })
        });
    }
    group.finish();
}

fn bench_baseline_2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("Baseline2D");
    group.sample_size(10);
    let opts = BaselineOptions::new(20).with_level(3);
    let image = Array2::from_shape_fn((256, 256), |(i, j)| {
        let r = ((i as f64 - 128.0).powi(2) + (j as f64 - 128.0).powi(2)).sqrt();
        100.0 * (-r / 60.0).exp() + if (r - 40.0).abs() < 1.5 { 30.0 } else { 0.0 }
    });

    for (name, axis) in [("rows", Axis::Rows), ("both", Axis::Both)] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(baseline_dwt2(image.view(), Wavelet::Db4, axis, &opts).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_dtcwt_round_trip,
    bench_baseline_1d,
    bench_baseline_2d
);
criterion_main!(benches);
