//! Two-dimensional FFT on zero-padded real images.
//!
//! [`Fft2`] plans a fixed transform shape once and reuses the plans for every
//! forward/inverse pass, which is what the masked correlation needs: twelve
//! transforms of the same padded size per call.
//!
//! Sizes are chosen with [`next_fast_len`], the smallest integer ≥ `n` whose
//! prime factors are all in {2, 3, 5, 7}; rustfft has dedicated butterflies
//! for those radices.

use ndarray::{Array2, ArrayView2, Axis};
use rustfft::FftPlanner;
use std::sync::Arc;

pub use rustfft::num_complex::Complex;

/// Smallest integer ≥ `n` of the form 2^a·3^b·5^c·7^d.
///
/// Returns 1 for `n <= 1`.
pub fn next_fast_len(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    let mut candidate = n;
    loop {
        let mut m = candidate;
        for p in [2, 3, 5, 7] {
            while m % p == 0 {
                m /= p;
            }
        }
        if m == 1 {
            return candidate;
        }
        candidate += 1;
    }
}

/// Planned 2D complex FFT of a fixed shape.
pub struct Fft2 {
    shape: (usize, usize),
    row_fwd: Arc<dyn rustfft::Fft<f64>>,
    col_fwd: Arc<dyn rustfft::Fft<f64>>,
    row_inv: Arc<dyn rustfft::Fft<f64>>,
    col_inv: Arc<dyn rustfft::Fft<f64>>,
}

impl Fft2 {
    /// Plans forward and inverse transforms of shape `(rows, cols)`.
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            shape: (rows, cols),
            row_fwd: planner.plan_fft_forward(cols),
            col_fwd: planner.plan_fft_forward(rows),
            row_inv: planner.plan_fft_inverse(cols),
            col_inv: planner.plan_fft_inverse(rows),
        }
    }

    /// Transform shape.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Forward transform of a real image, zero-padded at the bottom/right to
    /// the planned shape. Inputs larger than the plan are truncated.
    pub fn forward(&self, input: ArrayView2<f64>) -> Array2<Complex<f64>> {
        let (rows, cols) = self.shape;
        let mut out = Array2::<Complex<f64>>::zeros((rows, cols));
        let (in_rows, in_cols) = input.dim();
        for r in 0..in_rows.min(rows) {
            for c in 0..in_cols.min(cols) {
                out[[r, c]] = Complex::new(input[[r, c]], 0.0);
            }
        }
        self.transform(&mut out, &self.row_fwd, &self.col_fwd);
        out
    }

    /// Inverse transform, normalized by `1 / (rows·cols)`, keeping the real
    /// part.
    pub fn inverse_real(&self, spectrum: &Array2<Complex<f64>>) -> Array2<f64> {
        let mut buffer = spectrum.clone();
        self.transform(&mut buffer, &self.row_inv, &self.col_inv);
        let norm = 1.0 / (self.shape.0 * self.shape.1) as f64;
        buffer.mapv(|z| z.re * norm)
    }

    fn transform(
        &self,
        data: &mut Array2<Complex<f64>>,
        row_plan: &Arc<dyn rustfft::Fft<f64>>,
        col_plan: &Arc<dyn rustfft::Fft<f64>>,
    ) {
        let (rows, cols) = self.shape;

        // Rows are contiguous in a standard-layout array.
        let mut row_buf = vec![Complex::new(0.0, 0.0); cols];
        for mut row in data.axis_iter_mut(Axis(0)) {
            for (dst, src) in row_buf.iter_mut().zip(row.iter()) {
                *dst = *src;
            }
            row_plan.process(&mut row_buf);
            for (dst, src) in row.iter_mut().zip(row_buf.iter()) {
                *dst = *src;
            }
        }

        let mut col_buf = vec![Complex::new(0.0, 0.0); rows];
        for mut col in data.axis_iter_mut(Axis(1)) {
            for (dst, src) in col_buf.iter_mut().zip(col.iter()) {
                *dst = *src;
            }
            col_plan.process(&mut col_buf);
            for (dst, src) in col.iter_mut().zip(col_buf.iter()) {
                *dst = *src;
            }
        }
    }
}
