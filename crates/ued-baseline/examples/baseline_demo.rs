//! Baseline demo: remove an exponential background from a synthetic
//! powder profile with both the real and the dual-tree transform.
//!
//! Run with: RUST_LOG=ued_baseline=debug cargo run -p ued-baseline --example baseline_demo

use tracing_subscriber::EnvFilter;
use ued_baseline::{BaselineOptions, baseline_dt, baseline_dwt};
use ued_core::{AnalysisError, DualTreeFilter, FirstStageFilter, Wavelet, gaussian};

fn main() -> Result<(), AnalysisError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let n = 1000;
    let x: Vec<f64> = (0..n).map(|i| i as f64 * 20.0 / n as f64).collect();
    let background: Vec<f64> = x.iter().map(|x| 75.0 * (-x / 5.0).exp()).collect();
    let mut signal = background.clone();
    for (center, area) in [(4.0, 2.5), (9.0, 4.0), (14.0, 2.0)] {
        for (s, g) in signal.iter_mut().zip(gaussian(&x, center, 0.12)?) {
            *s += area * g;
        }
    }

    println!("=== Baseline removal on {n} samples ===\n");
    let opts = BaselineOptions::new(100).with_level(5).with_tolerance(1e-6);

    let dwt = baseline_dwt(&signal, Wavelet::Sym6, &opts)?;
    let dt = baseline_dt(
        &signal,
        FirstStageFilter::Wavelet(Wavelet::Sym6),
        DualTreeFilter::Qshift4,
        &opts,
    )?;

    let rms = |estimate: &[f64]| {
        let err: f64 = estimate
            .iter()
            .zip(&background)
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        (err / n as f64).sqrt()
    };
    println!("{:>12} {:>12}", "Method", "RMS error");
    println!("{:->12} {:->12}", "", "");
    println!("{:>12} {:>12.4}", "dwt sym6", rms(&dwt));
    println!("{:>12} {:>12.4}", "dt qshift4", rms(&dt));

    println!("\nPeaks after subtraction:");
    for center in [4.0, 9.0, 14.0] {
        let i = (center * n as f64 / 20.0) as usize;
        println!(
            "  x = {center:>4.1}: signal {:>7.2}, dwt residual {:>6.2}, dt residual {:>6.2}",
            signal[i],
            signal[i] - dwt[i],
            signal[i] - dt[i]
        );
    }
    Ok(())
}
