//! Masked normalized cross-correlation (MNXC).
//!
//! For every relative translation of two images, computes the Pearson
//! correlation over exactly the pixel pairs that are valid in both masks.
//! Invalid pixels never enter the means or variances, so a beam block or a
//! dead detector region does not bias the statistic the way zero-filling
//! before a plain cross-correlation would.
//!
//! # Method
//!
//! With `f`, `m` the fixed and 180°-rotated moving images (invalid pixels set
//! to zero), `Mf`, `Mm` their masks, and `⋆` linear convolution:
//!
//! ```text
//! N     = Mf ⋆ Mm                       overlap count
//! num   = f ⋆ m − (f ⋆ Mm)(Mf ⋆ m) / N
//! var_f = f² ⋆ Mm − (f ⋆ Mm)² / N
//! var_m = Mf ⋆ m² − (Mf ⋆ m)² / N
//! ρ     = num / √(var_f · var_m)
//! ```
//!
//! Every convolution is evaluated as a product in the Fourier domain, padded
//! to [`next_fast_len`] of the full linear size on each axis: six forward
//! and six inverse transforms per call.
//!
//! # Reference
//!
//! Padfield, "Masked Object Registration in the Fourier Domain", IEEE
//! Transactions on Image Processing 21(5), 2012

use ndarray::{Array2, ArrayView2, Zip, s};
use ued_core::validate::{ensure_image, ensure_mask_shape};
use ued_core::{Fft2, Result, next_fast_len};

/// Correlation values and overlap counts over every relative translation.
///
/// Both arrays have shape `(fixed_rows + moving_rows − 1, fixed_cols +
/// moving_cols − 1)`. Element `(kr, kc)` corresponds to the translation
/// `(moving_rows − 1 − kr, moving_cols − 1 − kc)` of the moving image, see
/// [`CorrelationSurface::translation_at`].
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationSurface {
    /// Masked correlation coefficients in `[-1, 1]`.
    pub values: Array2<f64>,
    /// Number of jointly valid pixel pairs per translation.
    pub overlap: Array2<usize>,
    moving_shape: (usize, usize),
}

impl CorrelationSurface {
    /// Surface shape.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Translation `[dy, dx]` of the moving image at a surface index.
    pub fn translation_at(&self, index: (usize, usize)) -> [isize; 2] {
        [
            self.moving_shape.0 as isize - 1 - index.0 as isize,
            self.moving_shape.1 as isize - 1 - index.1 as isize,
        ]
    }

    /// Surface index of a translation, or `None` if out of range.
    pub fn index_of(&self, translation: [isize; 2]) -> Option<(usize, usize)> {
        let (rows, cols) = self.shape();
        let r = self.moving_shape.0 as isize - 1 - translation[0];
        let c = self.moving_shape.1 as isize - 1 - translation[1];
        if r < 0 || c < 0 || r as usize >= rows || c as usize >= cols {
            return None;
        }
        Some((r as usize, c as usize))
    }

    /// Correlation at a translation, or `None` if out of range.
    pub fn value_at(&self, translation: [isize; 2]) -> Option<f64> {
        self.index_of(translation).map(|i| self.values[i])
    }
}

/// Masked normalized cross-correlation between `fixed` and `moving`.
///
/// Masks mark valid pixels with `true` and must match their image shapes.
/// Images may differ in shape. Translations with fewer than two jointly
/// valid pixels, or with zero variance in either image, correlate to 0.
///
/// # Example
///
/// ```rust
/// use ndarray::Array2;
/// use ued_align::masked_normalized_cross_correlation;
///
/// let image = Array2::from_shape_fn((8, 8), |(r, c)| ((r * 7 + c * 3) % 5) as f64);
/// let mask = Array2::from_elem((8, 8), true);
/// let surface =
///     masked_normalized_cross_correlation(image.view(), mask.view(), image.view(), mask.view()).unwrap();
/// assert_eq!(surface.shape(), (15, 15));
/// assert!((surface.value_at([0, 0]).unwrap() - 1.0).abs() < 1e-9);
/// ```
pub fn masked_normalized_cross_correlation(
    fixed: ArrayView2<f64>,
    fixed_mask: ArrayView2<bool>,
    moving: ArrayView2<f64>,
    moving_mask: ArrayView2<bool>,
) -> Result<CorrelationSurface> {
    ensure_image("fixed", fixed)?;
    ensure_image("moving", moving)?;
    ensure_mask_shape("fixed_mask", fixed, fixed_mask)?;
    ensure_mask_shape("moving_mask", moving, moving_mask)?;

    let (fr, fc) = fixed.dim();
    let (mr, mc) = moving.dim();
    let full = (fr + mr - 1, fc + mc - 1);
    let padded = (next_fast_len(full.0), next_fast_len(full.1));
    tracing::debug!(
        fixed = ?(fr, fc),
        moving = ?(mr, mc),
        ?padded,
        "masked_normalized_cross_correlation"
    );

    let fixed = prepare(fixed, fixed_mask);
    let fixed_valid = fixed_mask.mapv(f64::from);
    // Rotating by 180° turns the convolution into a correlation.
    let moving = prepare(moving, moving_mask).slice(s![..;-1, ..;-1]).to_owned();
    let moving_valid = moving_mask.mapv(f64::from).slice(s![..;-1, ..;-1]).to_owned();

    let fft = Fft2::new(padded.0, padded.1);
    let f_fixed = fft.forward(fixed.view());
    let f_moving = fft.forward(moving.view());
    let f_fixed_valid = fft.forward(fixed_valid.view());
    let f_moving_valid = fft.forward(moving_valid.view());
    let f_fixed_sq = fft.forward(fixed.mapv(|v| v * v).view());
    let f_moving_sq = fft.forward(moving.mapv(|v| v * v).view());

    let crop = |a: Array2<f64>| a.slice(s![..full.0, ..full.1]).to_owned();
    let overlap = crop(fft.inverse_real(&(&f_fixed_valid * &f_moving_valid))).mapv(|v| v.round().max(0.0));
    let fixed_sum = crop(fft.inverse_real(&(&f_fixed * &f_moving_valid)));
    let moving_sum = crop(fft.inverse_real(&(&f_fixed_valid * &f_moving)));
    let product = crop(fft.inverse_real(&(&f_fixed * &f_moving)));
    let fixed_sq_sum = crop(fft.inverse_real(&(&f_fixed_sq * &f_moving_valid)));
    let moving_sq_sum = crop(fft.inverse_real(&(&f_fixed_valid * &f_moving_sq)));

    let mut numerator = Array2::zeros(full);
    Zip::from(&mut numerator)
        .and(&overlap)
        .and(&fixed_sum)
        .and(&moving_sum)
        .and(&product)
        .for_each(|num, &n, &sf, &sm, &p| {
            *num = p - sf * sm / n.max(f64::EPSILON);
        });
    // A variance is zero when it is within round-off of the cell's own
    // second moment, or of the transform noise set by the largest sum.
    let fft_noise = |a: &Array2<f64>| {
        let log_len = ((padded.0 * padded.1) as f64).log2().max(1.0);
        f64::EPSILON * log_len * a.iter().fold(0.0f64, |m, v| m.max(v.abs()))
    };
    let (noise_f, noise_m) = (fft_noise(&fixed_sq_sum), fft_noise(&moving_sq_sum));
    let floor = |q: f64, noise: f64| (1e3 * f64::EPSILON * q.abs()).max(noise);
    let mut denominator = Array2::zeros(full);
    Zip::from(&mut denominator)
        .and(&overlap)
        .and(&fixed_sum)
        .and(&moving_sum)
        .and(&fixed_sq_sum)
        .and(&moving_sq_sum)
        .for_each(|den, &n, &sf, &sm, &qf, &qm| {
            let n = n.max(f64::EPSILON);
            let var_f = qf - sf * sf / n;
            let var_m = qm - sm * sm / n;
            *den = if var_f <= floor(qf, noise_f) || var_m <= floor(qm, noise_m) {
                0.0
            } else {
                (var_f * var_m).sqrt()
            };
        });

    let mut values = Array2::zeros(full);
    Zip::from(&mut values)
        .and(&numerator)
        .and(&denominator)
        .and(&overlap)
        .for_each(|v, &num, &den, &n| {
            // A single pair has zero variance by definition.
            *v = if n < 2.0 || den == 0.0 {
                0.0
            } else {
                (num / den).clamp(-1.0, 1.0)
            };
        });

    Ok(CorrelationSurface {
        values,
        overlap: overlap.mapv(|n| n as usize),
        moving_shape: (mr, mc),
    })
}

/// Zeroes invalid pixels, after lifting images with a negative valid
/// minimum so that every valid pixel is non-negative.
fn prepare(image: ArrayView2<f64>, mask: ArrayView2<bool>) -> Array2<f64> {
    let min = Zip::from(image)
        .and(mask)
        .fold(f64::INFINITY, |m, &v, &valid| if valid { m.min(v) } else { m });
    let offset = if min < 0.0 { -min } else { 0.0 };
    Zip::from(image)
        .and(mask)
        .map_collect(|&v, &valid| if valid { v + offset } else { 0.0 })
}
