//! Integer image shifts and single-image alignment.

use ndarray::{Array2, ArrayView2, s};
use ued_core::Result;

use crate::registration::{DEFAULT_OVERLAP_RATIO, find_translation};

/// Shifts `image` by `[dy, dx]` pixels: `out[r + dy, c + dx] = image[r, c]`.
///
/// Pixels shifted in from outside the image take `fill_value`.
///
/// # Example
///
/// ```rust
/// use ndarray::array;
/// use ued_align::shift_image;
///
/// let image = array![[1.0, 2.0], [3.0, 4.0]];
/// let shifted = shift_image(image.view(), [1, -1], 0.0);
/// assert_eq!(shifted, array![[0.0, 0.0], [2.0, 0.0]]);
/// ```
pub fn shift_image(image: ArrayView2<f64>, shift: [isize; 2], fill_value: f64) -> Array2<f64> {
    let (rows, cols) = image.dim();
    let mut out = Array2::from_elem((rows, cols), fill_value);
    let (Some((src_r, dst_r)), Some((src_c, dst_c))) = (overlap(rows, shift[0]), overlap(cols, shift[1])) else {
        return out;
    };
    out.slice_mut(s![dst_r.0..dst_r.1, dst_c.0..dst_c.1])
        .assign(&image.slice(s![src_r.0..src_r.1, src_c.0..src_c.1]));
    out
}

/// Source and destination index ranges along one axis, or `None` when the
/// shift moves everything out of view.
fn overlap(len: usize, shift: isize) -> Option<((usize, usize), (usize, usize))> {
    let magnitude = shift.unsigned_abs();
    if magnitude >= len {
        return None;
    }
    let kept = len - magnitude;
    Some(if shift >= 0 {
        ((0, kept), (magnitude, len))
    } else {
        ((magnitude, len), (0, kept))
    })
}

/// Registers `image` against `reference` and returns the aligned copy.
///
/// `mask` marks valid pixels of both images. Uncovered pixels take
/// `fill_value`. Degenerate registrations return the image unshifted.
pub fn align(
    image: ArrayView2<f64>,
    reference: ArrayView2<f64>,
    mask: Option<&Array2<bool>>,
    fill_value: f64,
) -> Result<Array2<f64>> {
    let translation = find_translation(reference, image, mask, mask, DEFAULT_OVERLAP_RATIO)?;
    Ok(shift_image(image, translation.correction(), fill_value))
}
