//! Integration tests for ued-align.
//!
//! End-to-end registration of synthetic diffraction patterns with and without
//! masks, the degenerate outcome, and input validation.

use ndarray::{Array2, s};
use ued_align::{
    DEFAULT_OVERLAP_RATIO, align, average_aligned, combine_masks, find_translation, ialign,
    mask_from_collection, masked_normalized_cross_correlation, register_batch, shift_image,
};
use ued_core::{AnalysisError, ErrorKind, gaussian2d};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Polycrystalline-like pattern: two rings and a central spot on a slowly
/// decaying background.
fn powder_pattern(size: usize, center: (f64, f64)) -> Array2<f64> {
    Array2::from_shape_fn((size, size), |(r, c)| {
        let radius = ((r as f64 - center.0).powi(2) + (c as f64 - center.1).powi(2)).sqrt();
        let rings = 60.0 * (-((radius - 18.0) / 1.5).powi(2)).exp()
            + 35.0 * (-((radius - 31.0) / 2.0).powi(2)).exp();
        rings + 200.0 * (-radius / 4.0).exp() + 10.0 * (-radius / 40.0).exp()
    })
}

fn spike(shape: (usize, usize), at: (usize, usize)) -> Array2<f64> {
    let mut image = Array2::zeros(shape);
    image[at] = 1.0;
    image
}

// ===========================================================================
// Registration scenarios
// ===========================================================================

#[test]
fn spike_translation_is_recovered() {
    let fixed = spike((100, 100), (50, 50));
    let moving = spike((100, 100), (52, 47));
    let t = find_translation(fixed.view(), moving.view(), None, None, DEFAULT_OVERLAP_RATIO).unwrap();
    assert_eq!(t.shift, [2, -3]);
    assert!((t.correlation - 1.0).abs() < 1e-6);
}

#[test]
fn self_correlation_peaks_at_zero_shift() {
    let image = powder_pattern(64, (30.0, 33.0));
    let mask = Array2::from_elem((64, 64), true);
    let surface = masked_normalized_cross_correlation(image.view(), mask.view(), image.view(), mask.view()).unwrap();

    assert_eq!(surface.shape(), (127, 127));
    let at_zero = surface.value_at([0, 0]).unwrap();
    assert!((at_zero - 1.0).abs() < 1e-9, "{at_zero}");
    assert!(surface.values.iter().all(|v| (-1.0..=1.0).contains(v)));
    assert_eq!(surface.overlap[surface.index_of([0, 0]).unwrap()], 64 * 64);

    let t = find_translation(image.view(), image.view(), None, None, DEFAULT_OVERLAP_RATIO).unwrap();
    assert_eq!(t.shift, [0, 0]);
}

#[test]
fn beam_block_does_not_bias_registration() {
    let size = 96;
    let reference = powder_pattern(size, (48.0, 47.0));
    let moved = powder_pattern(size, (51.0, 43.0));

    // Beam block: a bright rectangle that stays fixed on the detector while
    // the pattern drifts underneath it.
    let mut mask = Array2::from_elem((size, size), true);
    mask.slice_mut(s![0..50, 44..52]).fill(false);
    let mut blocked_ref = reference.clone();
    let mut blocked_moved = moved.clone();
    blocked_ref.slice_mut(s![0..50, 44..52]).fill(5000.0);
    blocked_moved.slice_mut(s![0..50, 44..52]).fill(5000.0);

    let masked = find_translation(
        blocked_ref.view(),
        blocked_moved.view(),
        Some(&mask),
        None,
        DEFAULT_OVERLAP_RATIO,
    )
    .unwrap();
    assert_eq!(masked.shift, [3, -4]);

    // Without the mask the static block dominates and pins the result at zero.
    let unmasked = find_translation(
        blocked_ref.view(),
        blocked_moved.view(),
        None,
        None,
        DEFAULT_OVERLAP_RATIO,
    )
    .unwrap();
    assert_eq!(unmasked.shift, [0, 0]);
}

#[test]
fn align_round_trip_on_pattern() {
    let reference = powder_pattern(80, (40.0, 40.0));
    let moved = shift_image(reference.view(), [-3, 5], 0.0);
    let aligned = align(moved.view(), reference.view(), None, 0.0).unwrap();
    let inner = s![3..80, 0..75];
    let err = (&aligned.slice(inner) - &reference.slice(inner))
        .iter()
        .fold(0.0f64, |m, v| m.max(v.abs()));
    assert!(err < 1e-12);
}

#[test]
fn gaussian_spot_drift_series() {
    let axis: Vec<f64> = (0..64).map(|i| i as f64).collect();
    let reference = gaussian2d(&axis, &axis, (30.0, 30.0), 5.0).unwrap();
    let drifts = [[1, 0], [0, -2], [2, 2], [-1, 3]];
    let frames: Vec<_> = drifts
        .iter()
        .map(|&[dy, dx]| gaussian2d(&axis, &axis, (30.0 + dy as f64, 30.0 + dx as f64), 5.0).unwrap())
        .collect();

    let results = register_batch(reference.view(), &frames, None, DEFAULT_OVERLAP_RATIO);
    for (result, drift) in results.iter().zip(drifts) {
        assert_eq!(result.as_ref().unwrap().shift, drift);
    }

    let streamed: Vec<_> = ialign(frames.clone(), Some(reference.clone()), None, 0.0)
        .collect::<ued_core::Result<_>>()
        .unwrap();
    let stats = average_aligned(reference.view(), &frames, None, 0.0).unwrap();
    assert_eq!(stats.count(), frames.len());
    let peak = stats.mean()[[30, 30]];
    assert!((peak - reference[[30, 30]]).abs() < 1e-12);
    for image in &streamed {
        assert!((image[[30, 30]] - reference[[30, 30]]).abs() < 1e-12);
    }
}

#[test]
fn masks_from_collection_feed_registration() {
    let base = powder_pattern(48, (24.0, 24.0));
    let mut frames: Vec<_> = (0..4).map(|k| &base * (1.0 + 0.01 * k as f64)).collect();
    // A hot pixel in one frame and a dead one in another.
    frames[1][[5, 5]] = 1e6;
    frames[2][[40, 7]] = -3.0;

    let collected = mask_from_collection(&frames, (0.0, 3e4), None).unwrap();
    assert!(!collected[[5, 5]]);
    assert!(!collected[[40, 7]]);
    assert_eq!(collected.iter().filter(|v| !**v).count(), 2);

    let mut block = Array2::from_elem((48, 48), true);
    block.slice_mut(s![20..28, 0..10]).fill(false);
    let mask = combine_masks(&[&collected, &block]).unwrap();
    assert_eq!(mask.iter().filter(|v| !**v).count(), 2 + 80);

    let t = find_translation(base.view(), frames[1].view(), Some(&mask), None, DEFAULT_OVERLAP_RATIO).unwrap();
    assert_eq!(t.shift, [0, 0]);
}

// ===========================================================================
// Degenerate and invalid inputs
// ===========================================================================

#[test]
fn fully_masked_registration_is_degenerate() {
    let image = powder_pattern(32, (16.0, 16.0));
    let mask = Array2::from_elem((32, 32), false);
    let t = find_translation(image.view(), image.view(), Some(&mask), Some(&mask), 0.3).unwrap();
    assert!(t.degenerate);
    assert_eq!(t.shift, [0, 0]);
}

#[test]
fn shape_errors_name_the_argument() {
    let image = powder_pattern(32, (16.0, 16.0));
    let wrong = Array2::from_elem((31, 32), true);
    let right = Array2::from_elem((32, 32), true);

    let err = masked_normalized_cross_correlation(image.view(), wrong.view(), image.view(), right.view())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    assert!(matches!(err, AnalysisError::ShapeMismatch { argument: "fixed_mask", .. }));

    let err = find_translation(image.view(), image.view(), Some(&right), Some(&wrong), 0.3).unwrap_err();
    assert!(matches!(err, AnalysisError::ShapeMismatch { argument: "moving_mask", .. }));

    let empty = Array2::<f64>::zeros((0, 4));
    let err = find_translation(empty.view(), image.view(), None, None, 0.3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
}

#[test]
fn non_finite_pixels_are_rejected() {
    let mut image = powder_pattern(16, (8.0, 8.0));
    image[[2, 3]] = f64::NAN;
    let clean = powder_pattern(16, (8.0, 8.0));
    let err = find_translation(clean.view(), image.view(), None, None, 0.3).unwrap_err();
    assert_eq!(err, AnalysisError::non_finite("moving", 2 * 16 + 3));
    assert_eq!(err.kind(), ErrorKind::NonFinite);
}
