//! Data-parallel registration of many frames against one reference.
//!
//! Frames are independent, so each rayon worker registers its own frames
//! with no shared mutable state. Results come back in input order.

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use ued_core::{AnalysisError, Result};

use crate::registration::{Translation, find_translation};
use crate::shift::align;
use crate::streaming::RunningStats;

/// Registers every frame against `reference` in parallel.
///
/// `mask` marks valid pixels of the reference and of every frame. The
/// result at index `i` belongs to `frames[i]`; a failing frame does not
/// stop the others.
pub fn register_batch(
    reference: ArrayView2<f64>,
    frames: &[Array2<f64>],
    mask: Option<&Array2<bool>>,
    overlap_ratio: f64,
) -> Vec<Result<Translation>> {
    tracing::debug!(frames = frames.len(), shape = ?reference.dim(), "register_batch");
    frames
        .par_iter()
        .map(|frame| find_translation(reference, frame.view(), mask, mask, overlap_ratio))
        .collect()
}

/// Aligns every frame onto `reference` in parallel and returns the running
/// statistics of the aligned frames.
///
/// Partial accumulators are combined with [`RunningStats::merge`], so the
/// result does not depend on how rayon splits the work beyond rounding. The
/// first error encountered is returned.
pub fn average_aligned(
    reference: ArrayView2<f64>,
    frames: &[Array2<f64>],
    mask: Option<&Array2<bool>>,
    fill_value: f64,
) -> Result<RunningStats> {
    if frames.is_empty() {
        return Err(AnalysisError::empty("frames"));
    }
    let shape = reference.dim();
    tracing::debug!(frames = frames.len(), ?shape, "average_aligned");

    frames
        .par_iter()
        .map(|frame| -> Result<RunningStats> {
            let aligned = align(frame.view(), reference, mask, fill_value)?;
            let mut stats = RunningStats::new(shape);
            stats.push(aligned.view())?;
            Ok(stats)
        })
        .try_reduce(
            || RunningStats::new(shape),
            |mut left, right| {
                left.merge(&right)?;
                Ok(left)
            },
        )
}
