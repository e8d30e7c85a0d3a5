//! Valid-pixel masks built from collections of diffraction images.
//!
//! Every mask here uses `true` for valid pixels, the same convention as
//! [`find_translation`](crate::find_translation).

use std::borrow::Borrow;

use ndarray::{Array2, ArrayView2, Zip};
use ued_core::{AnalysisError, Result};

use crate::streaming::RunningStats;

/// Builds a mask from images that record the same measurement.
///
/// A pixel is invalid when, in any image, its value is non-finite or lies
/// outside `pixel_range`, or when its running standard deviation (`ddof = 1`)
/// exceeds `std_threshold` at any point of the stream. Images are consumed
/// one at a time.
pub fn mask_from_collection<I, B>(
    images: I,
    pixel_range: (f64, f64),
    std_threshold: Option<f64>,
) -> Result<Array2<bool>>
where
    I: IntoIterator<Item = B>,
    B: Borrow<Array2<f64>>,
{
    let (low, high) = pixel_range;
    if low.is_nan() || high.is_nan() || low > high {
        return Err(AnalysisError::invalid_parameter(
            "pixel_range",
            format!("expected an ordered (min, max) pair, got ({low}, {high})"),
        ));
    }
    if let Some(threshold) = std_threshold
        && (threshold.is_nan() || threshold < 0.0)
    {
        return Err(AnalysisError::invalid_parameter(
            "std_threshold",
            format!("must be non-negative, got {threshold}"),
        ));
    }

    let mut images = images.into_iter();
    let first = images.next().ok_or_else(|| AnalysisError::empty("images"))?;
    let shape = first.borrow().dim();
    let mut mask = Array2::from_elem(shape, true);
    let mut stats = std_threshold.map(|_| RunningStats::new(shape));

    for image in std::iter::once(first).chain(images) {
        let image = image.borrow();
        if image.dim() != shape {
            return Err(AnalysisError::shape_mismatch(
                "images",
                &[shape.0, shape.1],
                image.shape(),
            ));
        }
        Zip::from(&mut mask).and(image).for_each(|valid, &v| {
            if !v.is_finite() || v < low || v > high {
                *valid = false;
            }
        });

        if let (Some(stats), Some(threshold)) = (stats.as_mut(), std_threshold) {
            // Non-finite pixels are already rejected; keep them out of the
            // running statistics.
            let clean = image.mapv(|v| if v.is_finite() { v } else { 0.0 });
            stats.push(clean.view())?;
            if stats.count() > 1 {
                Zip::from(&mut mask)
                    .and(&stats.std(1))
                    .for_each(|valid, &s| {
                        if s > threshold {
                            *valid = false;
                        }
                    });
            }
        }
    }

    let rejected = mask.iter().filter(|v| !**v).count();
    tracing::debug!(?shape, rejected, "mask_from_collection");
    Ok(mask)
}

/// Logical AND of validity across masks of one shape.
pub fn combine_masks<B: Borrow<Array2<bool>>>(masks: &[B]) -> Result<Array2<bool>> {
    let (first, rest) = masks.split_first().ok_or_else(|| AnalysisError::empty("masks"))?;
    let mut combined = first.borrow().clone();
    for mask in rest {
        let mask = mask.borrow();
        if mask.dim() != combined.dim() {
            return Err(AnalysisError::shape_mismatch("masks", combined.shape(), mask.shape()));
        }
        Zip::from(&mut combined).and(mask).for_each(|a, &b| *a &= b);
    }
    Ok(combined)
}

/// Copy of `image` with invalid pixels set to `fill_value`.
pub fn mask_image(image: ArrayView2<f64>, mask: ArrayView2<bool>, fill_value: f64) -> Result<Array2<f64>> {
    ued_core::validate::ensure_mask_shape("mask", image, mask)?;
    let mut out = image.to_owned();
    Zip::from(&mut out).and(mask).for_each(|v, &valid| {
        if !valid {
            *v = fill_value;
        }
    });
    Ok(out)
}
