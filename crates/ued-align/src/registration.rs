//! Integer-pixel translation search on the masked correlation surface.

use ndarray::{Array2, ArrayView2};
use ued_core::{AnalysisError, Result};

use crate::correlation::masked_normalized_cross_correlation;

/// Default fraction of the largest overlap a translation must reach to be
/// considered.
pub const DEFAULT_OVERLAP_RATIO: f64 = 0.3;

/// Best translation between two images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    /// Displacement `[dy, dx]` of the moving image relative to the fixed
    /// image. Shifting the moving image by `-shift` aligns it.
    pub shift: [isize; 2],
    /// Masked correlation at `shift`.
    pub correlation: f64,
    /// `true` when no translation had enough overlap and positive
    /// correlation. `shift` is then zero.
    pub degenerate: bool,
}

impl Translation {
    fn degenerate() -> Self {
        Self {
            shift: [0, 0],
            correlation: 0.0,
            degenerate: true,
        }
    }

    /// Shift to apply to the moving image to align it onto the fixed one.
    pub fn correction(&self) -> [isize; 2] {
        [-self.shift[0], -self.shift[1]]
    }
}

/// Finds the integer translation of `moving` that best matches `fixed`.
///
/// `moving_mask` defaults to `fixed_mask`; with no masks every pixel is
/// valid. Translations whose overlap is below `overlap_ratio` times the
/// largest overlap are rejected. Among equal maxima the first in row-major
/// order of the correlation surface wins.
///
/// # Example
///
/// ```rust
/// use ndarray::Array2;
/// use ued_align::{DEFAULT_OVERLAP_RATIO, find_translation};
///
/// let mut fixed = Array2::zeros((64, 64));
/// fixed[[30, 30]] = 100.0;
/// let mut moving = Array2::zeros((64, 64));
/// moving[[33, 28]] = 100.0;
///
/// let t = find_translation(fixed.view(), moving.view(), None, None, DEFAULT_OVERLAP_RATIO).unwrap();
/// assert_eq!(t.shift, [3, -2]);
/// ```
pub fn find_translation(
    fixed: ArrayView2<f64>,
    moving: ArrayView2<f64>,
    fixed_mask: Option<&Array2<bool>>,
    moving_mask: Option<&Array2<bool>>,
    overlap_ratio: f64,
) -> Result<Translation> {
    if !overlap_ratio.is_finite() || !(0.0..=1.0).contains(&overlap_ratio) {
        return Err(AnalysisError::invalid_parameter(
            "overlap_ratio",
            format!("must lie in [0, 1], got {overlap_ratio}"),
        ));
    }

    let all_fixed;
    let fixed_mask = match fixed_mask {
        Some(mask) => mask.view(),
        None => {
            all_fixed = Array2::from_elem(fixed.raw_dim(), true);
            all_fixed.view()
        }
    };
    let all_moving;
    let moving_mask = match (moving_mask, fixed_mask.dim() == moving.dim()) {
        (Some(mask), _) => mask.view(),
        (None, true) => fixed_mask,
        (None, false) if fixed_mask.iter().all(|v| *v) => {
            all_moving = Array2::from_elem(moving.raw_dim(), true);
            all_moving.view()
        }
        // Falling back to a fixed mask of the wrong shape is reported as a
        // mismatch on the moving mask.
        (None, false) => fixed_mask,
    };

    let surface = masked_normalized_cross_correlation(fixed, fixed_mask, moving, moving_mask)?;
    let max_overlap = surface.overlap.iter().copied().max().unwrap_or(0);
    let best = first_maximum(
        surface.values.view(),
        surface.overlap.view(),
        overlap_ratio * max_overlap as f64,
    );

    let Some((index, correlation)) = best else {
        tracing::warn!(
            max_overlap,
            overlap_ratio,
            "no translation with positive correlation above the overlap threshold"
        );
        return Ok(Translation::degenerate());
    };
    let shift = surface.translation_at(index);
    tracing::debug!(?shift, correlation, "find_translation");
    Ok(Translation {
        shift,
        correlation,
        degenerate: false,
    })
}

/// First strictly positive maximum in row-major order among cells with at
/// least `min_overlap` jointly valid pixels. A surface with no positive cell
/// has no maximum, so purely anticorrelated images register as degenerate.
fn first_maximum(
    values: ArrayView2<f64>,
    overlap: ArrayView2<usize>,
    min_overlap: f64,
) -> Option<((usize, usize), f64)> {
    let mut best: Option<((usize, usize), f64)> = None;
    for ((idx, &value), &count) in values.indexed_iter().zip(overlap.iter()) {
        if (count as f64) < min_overlap || value <= 0.0 {
            continue;
        }
        if best.is_none_or(|(_, v)| value > v) {
            best = Some((idx, value));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike(shape: (usize, usize), at: (usize, usize)) -> Array2<f64> {
        let mut image = Array2::zeros(shape);
        image[at] = 1000.0;
        image
    }

    #[test]
    fn test_spike_translation() {
        let fixed = spike((100, 100), (50, 50));
        let moving = spike((100, 100), (52, 47));
        let t = find_translation(fixed.view(), moving.view(), None, None, DEFAULT_OVERLAP_RATIO).unwrap();
        assert_eq!(t.shift, [2, -3]);
        assert_eq!(t.correction(), [-2, 3]);
        assert!((t.correlation - 1.0).abs() < 1e-6);
        assert!(!t.degenerate);
    }

    #[test]
    fn test_moving_mask_defaults_to_fixed() {
        let fixed = spike((40, 40), (20, 20));
        let moving = spike((40, 40), (21, 23));
        let mut mask = Array2::from_elem((40, 40), true);
        mask.slice_mut(ndarray::s![0..5, ..]).fill(false);
        let a = find_translation(fixed.view(), moving.view(), Some(&mask), None, 0.3).unwrap();
        let b = find_translation(fixed.view(), moving.view(), Some(&mask), Some(&mask), 0.3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shift, [1, 3]);
    }

    #[test]
    fn test_different_shapes_without_masks() {
        let fixed = spike((30, 40), (10, 12));
        let moving = spike((20, 20), (4, 9));
        let t = find_translation(fixed.view(), moving.view(), None, None, 0.0).unwrap();
        assert_eq!(t.shift, [-6, -3]);
    }

    #[test]
    fn test_all_invalid_is_degenerate() {
        let fixed = spike((16, 16), (8, 8));
        let mask = Array2::from_elem((16, 16), false);
        let t = find_translation(fixed.view(), fixed.view(), Some(&mask), None, 0.3).unwrap();
        assert!(t.degenerate);
        assert_eq!(t.shift, [0, 0]);
        assert_eq!(t.correlation, 0.0);
    }

    #[test]
    fn test_flat_images_are_degenerate() {
        let flat = Array2::from_elem((10, 10), 2.0);
        let t = find_translation(flat.view(), flat.view(), None, None, 0.3).unwrap();
        assert!(t.degenerate);
    }

    #[test]
    fn test_tie_break_is_first_row_major() {
        let values = ndarray::array![[0.2, 0.9, 0.1], [0.9, 0.5, 0.9]];
        let overlap = Array2::from_elem((2, 3), 10);
        assert_eq!(
            first_maximum(values.view(), overlap.view(), 0.0),
            Some(((0, 1), 0.9))
        );
    }

    #[test]
    fn test_overlap_threshold_rejects_cells() {
        let values = ndarray::array![[0.99, 0.5], [0.7, -0.2]];
        let overlap = ndarray::array![[2, 50], [40, 50]];
        assert_eq!(
            first_maximum(values.view(), overlap.view(), 15.0),
            Some(((1, 0), 0.7))
        );
        assert_eq!(first_maximum(values.view(), overlap.view(), 60.0), None);
        // Non-positive cells never win.
        let negative = ndarray::array![[-0.1, 0.0]];
        let counts = ndarray::array![[5, 5]];
        assert_eq!(first_maximum(negative.view(), counts.view(), 0.0), None);
    }

    #[test]
    fn test_anticorrelated_surface_is_degenerate() {
        let values = Array2::from_elem((3, 3), -0.8);
        let overlap = Array2::from_elem((3, 3), 100);
        assert_eq!(first_maximum(values.view(), overlap.view(), 30.0), None);

        // A ramp against its mirror only anticorrelates at full overlap, and
        // partial overlaps fall below the threshold.
        let fixed = Array2::from_shape_fn((1, 8), |(_, c)| c as f64);
        let moving = fixed.slice(ndarray::s![.., ..;-1]).to_owned();
        let t = find_translation(fixed.view(), moving.view(), None, None, 1.0).unwrap();
        assert!(t.degenerate);
        assert_eq!(t.shift, [0, 0]);
        assert_eq!(t.correlation, 0.0);
    }

    #[test]
    fn test_registers_dim_patch_beside_bright_strip() {
        let fixed = Array2::from_shape_fn((24, 24), |(r, c)| {
            if c < 8 {
                1e5 + ((r * 7 + c * 3) % 5) as f64
            } else {
                ((r * 131 + c * 71 + r * c * 17) % 97) as f64 / 97.0 * 0.05
            }
        });
        let moving = fixed.slice(ndarray::s![8..16, 12..20]).to_owned();
        let t = find_translation(fixed.view(), moving.view(), None, None, DEFAULT_OVERLAP_RATIO).unwrap();
        assert!(!t.degenerate);
        assert_eq!(t.shift, [-8, -12]);
        assert!(t.correlation > 0.99);
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let image = spike((8, 8), (4, 4));
        for ratio in [-0.1, 1.5, f64::NAN] {
            let err = find_translation(image.view(), image.view(), None, None, ratio).unwrap_err();
            assert_eq!(err.kind(), ued_core::ErrorKind::Configuration);
        }
    }
}
