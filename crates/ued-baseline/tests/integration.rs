//! Integration tests for ued-baseline.
//!
//! End-to-end baseline recovery on a synthetic powder profile (exponential
//! background plus narrow Gaussian peaks), idempotence, and the first-stage
//! alignment of the dual-tree transform.

use ued_baseline::{
    BaselineOptions, ExtensionMode, Region, baseline_dt, baseline_dwt, dtcwt, idtcwt,
};
use ued_core::{
    AnalysisError, DualTreeFilter, ErrorKind, FirstStageFilter, Wavelet, available_dt_filters,
    available_first_stage_filters, gaussian,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const N: usize = 1000;
const PEAKS: [(f64, f64); 3] = [(4.0, 20.0), (9.0, 30.0), (14.0, 15.0)];

fn coordinates() -> Vec<f64> {
    (0..N).map(|i| i as f64 * 20.0 / N as f64).collect()
}

fn true_background() -> Vec<f64> {
    coordinates().iter().map(|x| 75.0 * (-x / 5.0).exp()).collect()
}

/// Exponential background plus three narrow peaks of known height.
fn powder_profile() -> Vec<f64> {
    let x = coordinates();
    let mut signal = true_background();
    for (center, height) in PEAKS {
        // Unit-area Gaussian rescaled to the requested height.
        let shape = gaussian(&x, center, 0.12).unwrap();
        let top = shape.iter().copied().fold(0.0, f64::max);
        for (s, g) in signal.iter_mut().zip(shape) {
            *s += height * g / top;
        }
    }
    signal
}

fn relative_rms(estimate: &[f64], truth: &[f64]) -> f64 {
    let err: f64 = estimate.iter().zip(truth).map(|(a, b)| (a - b).powi(2)).sum();
    let norm: f64 = truth.iter().map(|b| b * b).sum();
    (err / norm).sqrt()
}

fn peak_index(center: f64) -> usize {
    (center * N as f64 / 20.0).round() as usize
}

// ===========================================================================
// Exponential background recovery
// ===========================================================================

#[test]
fn dwt_recovers_exponential_background() {
    let signal = powder_profile();
    let opts = BaselineOptions::new(100).with_level(5);
    let baseline = baseline_dwt(&signal, Wavelet::Sym6, &opts).unwrap();

    assert_eq!(baseline.len(), signal.len());
    let err = relative_rms(&baseline, &true_background());
    assert!(err < 0.08, "relative rms error {err}");

    for (b, s) in baseline.iter().zip(&signal) {
        assert!(*b <= *s + 1e-12);
    }

    // Peaks survive background subtraction.
    for (center, height) in PEAKS {
        let i = peak_index(center);
        let residual = signal[i] - baseline[i];
        assert!(residual > 0.8 * height, "peak at {center}: {residual}");
    }
}

#[test]
fn dt_recovers_exponential_background() {
    let signal = powder_profile();
    let opts = BaselineOptions::new(100).with_level(5);
    let baseline = baseline_dt(
        &signal,
        FirstStageFilter::Wavelet(Wavelet::Sym6),
        DualTreeFilter::Qshift4,
        &opts,
    )
    .unwrap();

    let err = relative_rms(&baseline, &true_background());
    assert!(err < 0.08, "relative rms error {err}");
    assert!(baseline.iter().zip(&signal).all(|(b, s)| *b <= *s + 1e-12));
    assert!(baseline.iter().all(|b| *b >= 0.0));
}

#[test]
fn baseline_of_baseline_is_stable() {
    let signal = powder_profile();
    let opts = BaselineOptions::new(100).with_level(5);
    let once = baseline_dwt(&signal, Wavelet::Sym6, &opts).unwrap();
    let twice = baseline_dwt(&once, Wavelet::Sym6, &opts).unwrap();

    let scale = once.iter().copied().fold(0.0, f64::max);
    let change = once
        .iter()
        .zip(&twice)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    assert!(change / scale < 0.05, "relative change {}", change / scale);
}

#[test]
fn background_region_is_never_raised() {
    let signal = powder_profile();
    let opts = BaselineOptions::new(50)
        .with_level(5)
        .with_background_region(Region::span(900..1000))
        .with_background_region(Region::index(0));
    let baseline = baseline_dwt(&signal, Wavelet::Db6, &opts).unwrap();
    for i in (900..1000).chain([0]) {
        assert!(baseline[i] <= signal[i] + 1e-12);
    }
}

// ===========================================================================
// Dual-tree transform
// ===========================================================================

#[test]
fn every_listed_filter_pair_round_trips() {
    let signal = powder_profile();
    for fs in available_first_stage_filters() {
        let first_stage: FirstStageFilter = fs.parse().unwrap();
        for wav in available_dt_filters() {
            let wavelet: DualTreeFilter = wav.parse().unwrap();
            let coeffs = dtcwt(&signal, first_stage, wavelet, Some(4), ExtensionMode::Symmetric).unwrap();
            let rec = idtcwt(&coeffs, first_stage, wavelet).unwrap();
            let tol = if wavelet == DualTreeFilter::Kingsbury99 { 1e-6 } else { 1e-8 };
            assert!(relative_rms(&rec, &signal) < tol, "{fs} + {wav}");
        }
    }
}

/// Tree B's first stage runs one sample behind tree A. Feeding tree A the
/// impulse one sample later must reproduce tree B's finest coefficients
/// exactly; an off-by-one in the first-stage delay breaks this.
#[test]
fn first_stage_aligns_with_one_sample_delay() {
    let mut impulse = vec![0.0; 128];
    impulse[61] = 1.0;
    let mut delayed = vec![0.0; 128];
    delayed[62] = 1.0;

    for name in ["db1", "db4", "sym6", "sym9"] {
        let fs: FirstStageFilter = name.parse().unwrap();
        let here = dtcwt(&impulse, fs, DualTreeFilter::Qshift3, Some(1), ExtensionMode::Zero).unwrap();
        let later = dtcwt(&delayed, fs, DualTreeFilter::Qshift3, Some(1), ExtensionMode::Zero).unwrap();
        for (b, a) in here.imag.details[0].iter().zip(&later.real.details[0]) {
            assert!((a - b).abs() < 1e-15, "{name}");
        }
    }
}

// ===========================================================================
// Error taxonomy
// ===========================================================================

#[test]
fn unknown_names_are_configuration_errors() {
    let err = "qshift_z".parse::<DualTreeFilter>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err, AnalysisError::UnknownFilter { .. }));
    assert!("sym42".parse::<FirstStageFilter>().is_err());
}

#[test]
fn level_is_checked_before_iterating() {
    let signal = powder_profile();
    let err = baseline_dt(
        &signal,
        FirstStageFilter::default(),
        DualTreeFilter::Qshift4,
        &BaselineOptions::new(usize::MAX).with_level(12),
    )
    .unwrap_err();
    assert_eq!(err, AnalysisError::level_too_deep(12, 6));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn non_finite_input_rejected() {
    let mut signal = powder_profile();
    signal[17] = f64::INFINITY;
    let err = baseline_dwt(&signal, Wavelet::Sym6, &BaselineOptions::new(10)).unwrap_err();
    assert_eq!(err, AnalysisError::non_finite("signal", 17));
    assert_eq!(err.kind(), ErrorKind::NonFinite);
}
