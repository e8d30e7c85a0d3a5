//! Boundary checks shared by the engines.
//!
//! Engines validate their inputs before any numerical work and never wrap
//! or suppress errors raised by their own computations.

use ndarray::{ArrayView2, Dimension};

use crate::error::{AnalysisError, Result};

/// Rejects arrays with a NaN or infinite element.
pub fn ensure_finite<'a>(argument: &'static str, values: impl IntoIterator<Item = &'a f64>) -> Result<()> {
    match values.into_iter().position(|v| !v.is_finite()) {
        Some(index) => Err(AnalysisError::non_finite(argument, index)),
        None => Ok(()),
    }
}

/// Rejects arrays with no elements.
pub fn ensure_nonempty<D: Dimension>(argument: &'static str, shape: D) -> Result<()> {
    if shape.size() == 0 {
        return Err(AnalysisError::empty(argument));
    }
    Ok(())
}

/// Rejects a mask whose shape differs from its image.
pub fn ensure_mask_shape(argument: &'static str, image: ArrayView2<f64>, mask: ArrayView2<bool>) -> Result<()> {
    if image.shape() != mask.shape() {
        return Err(AnalysisError::shape_mismatch(argument, image.shape(), mask.shape()));
    }
    Ok(())
}

/// Rejects images that are empty or contain non-finite values.
pub fn ensure_image(argument: &'static str, image: ArrayView2<f64>) -> Result<()> {
    ensure_nonempty(argument, image.raw_dim())?;
    ensure_finite(argument, image.iter())
}
