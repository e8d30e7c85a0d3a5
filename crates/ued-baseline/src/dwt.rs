//! Real discrete wavelet transform (single and multi-level, 1D and 2D).
//!
//! # Conventions
//!
//! For a signal `x` of length `N` and a filter bank of length `L`, one
//! analysis step computes
//!
//! ```text
//! a[k] = Σ_j dec_lo[j] · x̃[2k + 1 − j]      k = 0 .. ⌊(N + L − 1) / 2⌋
//! d[k] = Σ_j dec_hi[j] · x̃[2k + 1 − j]
//! ```
//!
//! where `x̃` is `x` extended past its edges according to an
//! [`ExtensionMode`]. Synthesis is the adjoint,
//!
//! ```text
//! y[o] = Σ_m a[m] · rec_lo[o + L − 2 − 2m] + d[m] · rec_hi[o + L − 2 − 2m]
//! ```
//!
//! for `o < 2n − L + 2`, so that even-length signals are reconstructed to
//! their original length. Multi-level pyramids store coefficients coarsest
//! first: `[cA_n, cD_n, cD_n−1, …, cD_1]`.
//!
//! # References
//!
//! - Mallat, "A Wavelet Tour of Signal Processing", 3rd ed., ch. 7
//! - Lee et al., "PyWavelets: A Python package for wavelet analysis",
//!   JOSS 4(36), 2019 (coefficient layout and extension modes)

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView2, Axis};
use ued_core::{AnalysisError, FilterBank, Result};

/// How a signal is extended past its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExtensionMode {
    /// Zero padding: `… 0 0 | x0 x1 … xn−1 | 0 0 …`
    Zero,
    /// Edge replication: `… x0 x0 | x0 x1 … xn−1 | xn−1 xn−1 …`
    Constant,
    /// Half-sample symmetric: `… x1 x0 | x0 x1 … xn−1 | xn−1 xn−2 …`
    #[default]
    Symmetric,
    /// Whole-sample symmetric: `… x2 x1 | x0 x1 … xn−1 | xn−2 xn−3 …`
    Reflect,
    /// Periodic: `… xn−2 xn−1 | x0 x1 … xn−1 | x0 x1 …`
    Periodic,
}

impl ExtensionMode {
    /// Every mode.
    pub const ALL: &'static [ExtensionMode] = &[
        ExtensionMode::Zero,
        ExtensionMode::Constant,
        ExtensionMode::Symmetric,
        ExtensionMode::Reflect,
        ExtensionMode::Periodic,
    ];

    /// Registry name.
    pub fn name(self) -> &'static str {
        match self {
            ExtensionMode::Zero => "zero",
            ExtensionMode::Constant => "constant",
            ExtensionMode::Symmetric => "symmetric",
            ExtensionMode::Reflect => "reflect",
            ExtensionMode::Periodic => "periodic",
        }
    }

    /// Maps a possibly out-of-range index onto the signal, or `None` where
    /// the extension is zero. `n` must be non-zero.
    #[inline]
    pub fn index(self, i: isize, n: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < n {
            return Some(i as usize);
        }
        let n_i = n as isize;
        match self {
            ExtensionMode::Zero => None,
            ExtensionMode::Constant => Some(if i < 0 { 0 } else { n - 1 }),
            ExtensionMode::Symmetric => {
                let period = 2 * n_i;
                let r = i.rem_euclid(period);
                let folded = if r < n_i { r } else { period - 1 - r };
                Some(folded as usize)
            }
            ExtensionMode::Reflect => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * n_i - 2;
                let r = i.rem_euclid(period);
                let folded = if r < n_i { r } else { period - r };
                Some(folded as usize)
            }
            ExtensionMode::Periodic => Some(i.rem_euclid(n_i) as usize),
        }
    }
}

impl FromStr for ExtensionMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        ExtensionMode::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| {
                AnalysisError::invalid_parameter("mode", format!("unknown extension mode '{s}'"))
            })
    }
}

impl fmt::Display for ExtensionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deepest useful decomposition level for a signal of `data_len` samples
/// and a filter of `filter_len` taps: `⌊log2(data_len / (filter_len − 1))⌋`,
/// or 0 when the signal is shorter than the filter.
pub fn dwt_max_level(data_len: usize, filter_len: usize) -> usize {
    if filter_len <= 1 || data_len < filter_len - 1 {
        return 0;
    }
    (data_len / (filter_len - 1)).ilog2() as usize
}

/// Number of coefficients produced by one analysis step.
pub fn dwt_coeff_len(data_len: usize, filter_len: usize) -> usize {
    (data_len + filter_len).saturating_sub(1) / 2
}

/// Single-level analysis. Returns `(approximation, detail)`.
///
/// An empty signal yields empty coefficients.
pub fn dwt(signal: &[f64], bank: &FilterBank, mode: ExtensionMode) -> (Vec<f64>, Vec<f64>) {
    let n = signal.len();
    let len = bank.len();
    if n == 0 || len == 0 {
        return (Vec::new(), Vec::new());
    }
    let out_len = dwt_coeff_len(n, len);
    let mut approx = Vec::with_capacity(out_len);
    let mut detail = Vec::with_capacity(out_len);

    for i in (1..n + len - 1).step_by(2) {
        let mut a = 0.0;
        let mut d = 0.0;
        for j in 0..len {
            if let Some(k) = mode.index(i as isize - j as isize, n) {
                a += bank.dec_lo[j] * signal[k];
                d += bank.dec_hi[j] * signal[k];
            }
        }
        approx.push(a);
        detail.push(d);
    }
    (approx, detail)
}

/// Single-level synthesis from approximation and detail coefficients of
/// equal length.
pub fn idwt(approx: &[f64], detail: &[f64], bank: &FilterBank) -> Result<Vec<f64>> {
    if approx.len() != detail.len() {
        return Err(AnalysisError::shape_mismatch(
            "detail",
            &[approx.len()],
            &[detail.len()],
        ));
    }
    let n = approx.len();
    let len = bank.len();
    if len < 2 {
        return Err(AnalysisError::invalid_parameter(
            "bank",
            "filters need at least two taps",
        ));
    }
    let out_len = (2 * n + 2).saturating_sub(len);
    let mut out = Vec::with_capacity(out_len);
    for o in 0..out_len {
        let t0 = o + len - 2;
        let hi = (t0 / 2).min(n - 1);
        let mut acc = 0.0;
        for m in o / 2..=hi {
            let t = t0 - 2 * m;
            acc += approx[m] * bank.rec_lo[t] + detail[m] * bank.rec_hi[t];
        }
        out.push(acc);
    }
    Ok(out)
}

/// Multi-level 1D coefficients, coarsest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Pyramid {
    /// Approximation at the coarsest level (`cA_n`).
    pub approx: Vec<f64>,
    /// Details `[cD_n, …, cD_1]`.
    pub details: Vec<Vec<f64>>,
}

impl Pyramid {
    /// Decomposition depth.
    pub fn level(&self) -> usize {
        self.details.len()
    }

    /// Zeroes every detail band.
    pub fn zero_details(&mut self) {
        for d in &mut self.details {
            d.fill(0.0);
        }
    }

    /// Zeroes the finest detail band (`cD_1`), if any.
    pub fn zero_finest(&mut self) {
        if let Some(d) = self.details.last_mut() {
            d.fill(0.0);
        }
    }
}

/// Multi-level decomposition.
///
/// `level` must not exceed [`dwt_max_level`]; level 0 returns the signal as
/// the approximation.
pub fn wavedec(signal: &[f64], bank: &FilterBank, level: usize, mode: ExtensionMode) -> Result<Pyramid> {
    let max = dwt_max_level(signal.len(), bank.len());
    if level > max {
        return Err(AnalysisError::level_too_deep(level, max));
    }
    let mut approx = signal.to_vec();
    let mut details = Vec::with_capacity(level);
    for _ in 0..level {
        let (a, d) = dwt(&approx, bank, mode);
        approx = a;
        details.push(d);
    }
    details.reverse();
    Ok(Pyramid { approx, details })
}

/// Multi-level reconstruction.
///
/// Approximations one sample longer than the next detail band are trimmed
/// before each synthesis step.
pub fn waverec(pyramid: &Pyramid, bank: &FilterBank) -> Result<Vec<f64>> {
    let mut approx = pyramid.approx.clone();
    for detail in &pyramid.details {
        trim_to(&mut approx, detail.len());
        approx = idwt(&approx, detail, bank)?;
    }
    Ok(approx)
}

/// Drops the trailing sample when `approx` is one longer than `len`.
pub(crate) fn trim_to(approx: &mut Vec<f64>, len: usize) {
    if approx.len() == len + 1 {
        approx.pop();
    }
}

/// Detail bands of one 2D decomposition level.
#[derive(Debug, Clone, PartialEq)]
pub struct Details2 {
    /// High-pass along rows (axis 0), low-pass along columns (axis 1).
    pub horizontal: Array2<f64>,
    /// Low-pass along axis 0, high-pass along axis 1.
    pub vertical: Array2<f64>,
    /// High-pass along both axes.
    pub diagonal: Array2<f64>,
}

impl Details2 {
    fn shape(&self) -> (usize, usize) {
        self.horizontal.dim()
    }

    /// Zeroes all three bands.
    pub fn fill_zero(&mut self) {
        self.horizontal.fill(0.0);
        self.vertical.fill(0.0);
        self.diagonal.fill(0.0);
    }
}

/// Multi-level 2D coefficients, coarsest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Pyramid2 {
    /// Approximation at the coarsest level.
    pub approx: Array2<f64>,
    /// Detail triplets from coarsest to finest.
    pub details: Vec<Details2>,
}

/// Applies [`dwt`] to every lane of `x` along `axis`.
fn analyze_axis(x: ArrayView2<f64>, axis: Axis, bank: &FilterBank, mode: ExtensionMode) -> (Array2<f64>, Array2<f64>) {
    let mut shape = x.raw_dim();
    shape[axis.index()] = dwt_coeff_len(x.len_of(axis), bank.len());
    let mut approx = Array2::zeros(shape);
    let mut detail = Array2::zeros(shape);

    let mut buf = Vec::with_capacity(x.len_of(axis));
    for ((lane, mut a_lane), mut d_lane) in x
        .lanes(axis)
        .into_iter()
        .zip(approx.lanes_mut(axis))
        .zip(detail.lanes_mut(axis))
    {
        buf.clear();
        buf.extend(lane.iter().copied());
        let (a, d) = dwt(&buf, bank, mode);
        for (dst, v) in a_lane.iter_mut().zip(a) {
            *dst = v;
        }
        for (dst, v) in d_lane.iter_mut().zip(d) {
            *dst = v;
        }
    }
    (approx, detail)
}

/// Applies [`idwt`] to every pair of lanes along `axis`.
fn synthesize_axis(approx: ArrayView2<f64>, detail: ArrayView2<f64>, axis: Axis, bank: &FilterBank) -> Result<Array2<f64>> {
    if approx.shape() != detail.shape() {
        return Err(AnalysisError::shape_mismatch(
            "detail",
            approx.shape(),
            detail.shape(),
        ));
    }
    let mut shape = approx.raw_dim();
    shape[axis.index()] = (2 * approx.len_of(axis) + 2).saturating_sub(bank.len());
    let mut out = Array2::zeros(shape);

    let mut a_buf = Vec::with_capacity(approx.len_of(axis));
    let mut d_buf = Vec::with_capacity(approx.len_of(axis));
    for ((a_lane, d_lane), mut out_lane) in approx
        .lanes(axis)
        .into_iter()
        .zip(detail.lanes(axis))
        .zip(out.lanes_mut(axis))
    {
        a_buf.clear();
        a_buf.extend(a_lane.iter().copied());
        d_buf.clear();
        d_buf.extend(d_lane.iter().copied());
        let rec = idwt(&a_buf, &d_buf, bank)?;
        for (dst, v) in out_lane.iter_mut().zip(rec) {
            *dst = v;
        }
    }
    Ok(out)
}

/// Single-level separable 2D analysis.
pub fn dwt2(image: ArrayView2<f64>, bank: &FilterBank, mode: ExtensionMode) -> (Array2<f64>, Details2) {
    let (lo0, hi0) = analyze_axis(image, Axis(0), bank, mode);
    let (approx, vertical) = analyze_axis(lo0.view(), Axis(1), bank, mode);
    let (horizontal, diagonal) = analyze_axis(hi0.view(), Axis(1), bank, mode);
    (
        approx,
        Details2 {
            horizontal,
            vertical,
            diagonal,
        },
    )
}

/// Single-level separable 2D synthesis.
pub fn idwt2(approx: ArrayView2<f64>, details: &Details2, bank: &FilterBank) -> Result<Array2<f64>> {
    let lo0 = synthesize_axis(approx, details.vertical.view(), Axis(1), bank)?;
    let hi0 = synthesize_axis(
        details.horizontal.view(),
        details.diagonal.view(),
        Axis(1),
        bank,
    )?;
    synthesize_axis(lo0.view(), hi0.view(), Axis(0), bank)
}

/// Multi-level 2D decomposition. The maximum level is set by the shorter
/// image side.
pub fn wavedec2(image: ArrayView2<f64>, bank: &FilterBank, level: usize, mode: ExtensionMode) -> Result<Pyramid2> {
    let (rows, cols) = image.dim();
    let max = dwt_max_level(rows.min(cols), bank.len());
    if level > max {
        return Err(AnalysisError::level_too_deep(level, max));
    }
    let mut approx = image.to_owned();
    let mut details = Vec::with_capacity(level);
    for _ in 0..level {
        let (a, d) = dwt2(approx.view(), bank, mode);
        approx = a;
        details.push(d);
    }
    details.reverse();
    Ok(Pyramid2 { approx, details })
}

/// Multi-level 2D reconstruction.
pub fn waverec2(pyramid: &Pyramid2, bank: &FilterBank) -> Result<Array2<f64>> {
    let mut approx = pyramid.approx.clone();
    for details in &pyramid.details {
        let (rows, cols) = details.shape();
        if approx.dim() != (rows, cols) {
            let (ar, ac) = approx.dim();
            if ar < rows || ac < cols {
                return Err(AnalysisError::shape_mismatch(
                    "approx",
                    &[rows, cols],
                    &[ar, ac],
                ));
            }
            approx = approx.slice(ndarray::s![..rows, ..cols]).to_owned();
        }
        approx = idwt2(approx.view(), details, bank)?;
    }
    Ok(approx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ued_core::Wavelet;

    fn ramp_noise(n: usize) -> Vec<f64> {
        // Deterministic, non-smooth test signal.
        let mut state = 0x2545_f491_u32;
        (0..n)
            .map(|i| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                0.01 * i as f64 + (state as f64 / u32::MAX as f64)
            })
            .collect()
    }

    fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
    }

    #[test]
    fn test_extension_indices() {
        let n = 4;
        let sym: Vec<_> = (-3..7).map(|i| ExtensionMode::Symmetric.index(i, n)).collect();
        assert_eq!(
            sym,
            [2, 1, 0, 0, 1, 2, 3, 3, 2, 1].map(Some).to_vec()
        );
        let refl: Vec<_> = (-3..7).map(|i| ExtensionMode::Reflect.index(i, n)).collect();
        assert_eq!(
            refl,
            [3, 2, 1, 0, 1, 2, 3, 2, 1, 0].map(Some).to_vec()
        );
        let per: Vec<_> = (-2..6).map(|i| ExtensionMode::Periodic.index(i, n)).collect();
        assert_eq!(per, [2, 3, 0, 1, 2, 3, 0, 1].map(Some).to_vec());
        assert_eq!(ExtensionMode::Constant.index(-5, n), Some(0));
        assert_eq!(ExtensionMode::Constant.index(9, n), Some(3));
        assert_eq!(ExtensionMode::Zero.index(-1, n), None);
        assert_eq!(ExtensionMode::Reflect.index(5, 1), Some(0));
    }

    #[test]
    fn test_mode_names() {
        for &mode in ExtensionMode::ALL {
            assert_eq!(mode.name().parse::<ExtensionMode>().unwrap(), mode);
        }
        assert!("smooth".parse::<ExtensionMode>().is_err());
        assert_eq!(ExtensionMode::default(), ExtensionMode::Symmetric);
    }

    #[test]
    fn test_max_level() {
        assert_eq!(dwt_max_level(1000, 12), 6);
        assert_eq!(dwt_max_level(1000, 2), 9);
        assert_eq!(dwt_max_level(10, 12), 0);
        assert_eq!(dwt_max_level(11, 12), 0);
        assert_eq!(dwt_max_level(22, 12), 1);
        assert_eq!(dwt_max_level(5, 1), 0);
    }

    #[test]
    fn test_haar_single_level() {
        let bank = Wavelet::Db1.bank();
        let (a, d) = dwt(&[1.0, 3.0, 5.0, 7.0], &bank, ExtensionMode::Symmetric);
        let s = std::f64::consts::SQRT_2;
        assert_eq!(a.len(), 2);
        assert!((a[0] - 4.0 / s).abs() < 1e-12);
        assert!((a[1] - 12.0 / s).abs() < 1e-12);
        // Haar detail is (x[2k] − x[2k+1]) / √2 with this sign convention.
        assert!((d[0].abs() - 2.0 / s).abs() < 1e-12);
        assert!((d[1].abs() - 2.0 / s).abs() < 1e-12);
    }

    #[test]
    fn test_coefficient_lengths() {
        let bank = Wavelet::Sym6.bank();
        let (a, d) = dwt(&ramp_noise(100), &bank, ExtensionMode::Symmetric);
        assert_eq!(a.len(), 55);
        assert_eq!(d.len(), 55);
        let rec = idwt(&a, &d, &bank).unwrap();
        assert_eq!(rec.len(), 100);
    }

    #[test]
    fn test_perfect_reconstruction_every_mode() {
        let x = ramp_noise(96);
        for &w in Wavelet::ALL {
            let bank = w.bank();
            // Coiflet tables are orthonormal to about 1e-9.
            let tol = if w.name().starts_with("coif") { 1e-7 } else { 1e-10 };
            for &mode in ExtensionMode::ALL {
                let (a, d) = dwt(&x, &bank, mode);
                let rec = idwt(&a, &d, &bank).unwrap();
                assert_eq!(rec.len(), x.len());
                assert!(max_abs_diff(&rec, &x) < tol, "{w} {mode}");
            }
        }
    }

    #[test]
    fn test_multilevel_round_trip() {
        let x = ramp_noise(250);
        let bank = Wavelet::Db4.bank();
        let max = dwt_max_level(x.len(), bank.len());
        for level in 0..=max {
            let pyramid = wavedec(&x, &bank, level, ExtensionMode::Symmetric).unwrap();
            assert_eq!(pyramid.level(), level);
            let rec = waverec(&pyramid, &bank).unwrap();
            assert!(max_abs_diff(&rec[..x.len()], &x) < 1e-10, "level {level}");
        }
    }

    #[test]
    fn test_wavedec_rejects_deep_level() {
        let bank = Wavelet::Sym6.bank();
        let err = wavedec(&ramp_noise(64), &bank, 4, ExtensionMode::Symmetric).unwrap_err();
        assert_eq!(err, AnalysisError::level_too_deep(4, 2));
    }

    #[test]
    fn test_idwt_length_mismatch() {
        let bank = Wavelet::Db2.bank();
        assert!(idwt(&[1.0, 2.0], &[1.0], &bank).is_err());
    }

    #[test]
    fn test_zeroed_details_keep_constant() {
        // Constant signals live entirely in the approximation band.
        let x = vec![3.0; 64];
        let bank = Wavelet::Sym4.bank();
        let mut pyramid = wavedec(&x, &bank, 3, ExtensionMode::Symmetric).unwrap();
        pyramid.zero_details();
        let rec = waverec(&pyramid, &bank).unwrap();
        assert!(max_abs_diff(&rec, &x) < 1e-10);
    }

    #[test]
    fn test_2d_round_trip() {
        let data = ramp_noise(40 * 36);
        let image = Array2::from_shape_vec((40, 36), data).unwrap();
        let bank = Wavelet::Sym3.bank();
        let pyramid = wavedec2(image.view(), &bank, 2, ExtensionMode::Symmetric).unwrap();
        assert_eq!(pyramid.details.len(), 2);
        let rec = waverec2(&pyramid, &bank).unwrap();
        assert_eq!(rec.dim(), (40, 36));
        let err = (&rec - &image).iter().fold(0.0f64, |m, v| m.max(v.abs()));
        assert!(err < 1e-10);
    }

    #[test]
    fn test_2d_max_level_uses_short_side() {
        let image = Array2::<f64>::zeros((16, 200));
        let bank = Wavelet::Db2.bank();
        assert!(wavedec2(image.view(), &bank, 2, ExtensionMode::Zero).is_ok());
        assert_eq!(
            wavedec2(image.view(), &bank, 3, ExtensionMode::Zero).unwrap_err(),
            AnalysisError::level_too_deep(3, 2)
        );
    }
}
