//! Peak shapes with unit area.
//!
//! Shapes are normalized so that their sum times the sample spacing is one.
//! A full width at half maximum of exactly zero is a valid input: the shape
//! collapses to a discrete impulse of height `1 / Δx` at the coordinate
//! nearest the center, which keeps the unit area and never produces NaN.

use ndarray::Array2;

use crate::error::{AnalysisError, Result};

/// Ratio between the FWHM and standard deviation of a Gaussian, `2√(2 ln 2)`.
const FWHM_PER_STD: f64 = 2.354_820_045_030_949_3;

/// Gaussian with unit area, sampled at `coordinates`.
///
/// `fwhm` must be finite and non-negative. `fwhm == 0` yields an impulse.
///
/// # Example
///
/// ```rust
/// use ued_core::shapes::gaussian;
///
/// let x: Vec<f64> = (0..101).map(|i| -5.0 + 0.1 * i as f64).collect();
/// let g = gaussian(&x, 0.0, 1.0).unwrap();
/// let area: f64 = g.iter().sum::<f64>() * 0.1;
/// assert!((area - 1.0).abs() < 1e-6);
/// ```
pub fn gaussian(coordinates: &[f64], center: f64, fwhm: f64) -> Result<Vec<f64>> {
    check_width(fwhm)?;
    if fwhm == 0.0 {
        return Ok(impulse(coordinates, center));
    }
    let std = fwhm / FWHM_PER_STD;
    let norm = 1.0 / (std * (2.0 * std::f64::consts::PI).sqrt());
    Ok(coordinates
        .iter()
        .map(|&x| norm * (-(x - center).powi(2) / (2.0 * std * std)).exp())
        .collect())
}

/// Lorentzian (Cauchy) profile with unit area, sampled at `coordinates`.
pub fn lorentzian(coordinates: &[f64], center: f64, fwhm: f64) -> Result<Vec<f64>> {
    check_width(fwhm)?;
    if fwhm == 0.0 {
        return Ok(impulse(coordinates, center));
    }
    let gamma = fwhm / 2.0;
    Ok(coordinates
        .iter()
        .map(|&x| gamma / (std::f64::consts::PI * ((x - center).powi(2) + gamma * gamma)))
        .collect())
}

/// Isotropic 2D Gaussian with unit volume on the grid `rows × cols`.
///
/// Element `[i, j]` is evaluated at `(rows[i], cols[j])`.
pub fn gaussian2d(rows: &[f64], cols: &[f64], center: (f64, f64), fwhm: f64) -> Result<Array2<f64>> {
    let along_rows = gaussian(rows, center.0, fwhm)?;
    let along_cols = gaussian(cols, center.1, fwhm)?;
    // Separable: the product of two unit-area profiles has unit volume.
    Ok(Array2::from_shape_fn((rows.len(), cols.len()), |(i, j)| {
        along_rows[i] * along_cols[j]
    }))
}

fn check_width(fwhm: f64) -> Result<()> {
    if !fwhm.is_finite() || fwhm < 0.0 {
        return Err(AnalysisError::invalid_parameter(
            "fwhm",
            format!("must be finite and non-negative, got {fwhm}"),
        ));
    }
    Ok(())
}

/// Discrete impulse of unit area at the coordinate nearest `center`.
fn impulse(coordinates: &[f64], center: f64) -> Vec<f64> {
    let mut out = vec![0.0; coordinates.len()];
    let Some(nearest) = coordinates
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - center).abs().total_cmp(&(*b - center).abs()))
        .map(|(i, _)| i)
    else {
        return out;
    };

    let spacing = if coordinates.len() < 2 {
        1.0
    } else if nearest + 1 < coordinates.len() {
        (coordinates[nearest + 1] - coordinates[nearest]).abs()
    } else {
        (coordinates[nearest] - coordinates[nearest - 1]).abs()
    };
    out[nearest] = if spacing > 0.0 { 1.0 / spacing } else { 1.0 };
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(start: f64, step: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn test_gaussian_unit_area() {
        let x = grid(-10.0, 0.01, 2001);
        let g = gaussian(&x, 1.5, 0.8).unwrap();
        let area: f64 = g.iter().sum::<f64>() * 0.01;
        assert!((area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_gaussian_half_maximum_at_fwhm() {
        let x = vec![0.0, 1.0];
        let g = gaussian(&x, 0.0, 2.0).unwrap();
        // Half width from the center is fwhm/2 = 1.0.
        assert!((g[1] / g[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_zero_fwhm_is_impulse() {
        let x = grid(0.0, 0.5, 11);
        let g = gaussian(&x, 2.1, 0.0).unwrap();
        assert!(g.iter().all(|v| v.is_finite()));
        assert_eq!(g.iter().filter(|&&v| v != 0.0).count(), 1);
        assert_eq!(g[4], 2.0);
        let area: f64 = g.iter().sum::<f64>() * 0.5;
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_fwhm_single_coordinate() {
        assert_eq!(gaussian(&[3.0], 0.0, 0.0).unwrap(), vec![1.0]);
        assert_eq!(lorentzian(&[3.0], 0.0, 0.0).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_zero_fwhm_at_last_coordinate() {
        let x = grid(0.0, 0.25, 5);
        let g = gaussian(&x, 10.0, 0.0).unwrap();
        assert_eq!(g, vec![0.0, 0.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn test_empty_coordinates() {
        assert!(gaussian(&[], 0.0, 0.0).unwrap().is_empty());
        assert!(gaussian(&[], 0.0, 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_fwhm() {
        assert!(gaussian(&[0.0], 0.0, -1.0).is_err());
        assert!(gaussian(&[0.0], 0.0, f64::NAN).is_err());
        assert!(lorentzian(&[0.0], 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_lorentzian_peak_and_half_width() {
        let x = vec![0.0, 0.5];
        let l = lorentzian(&x, 0.0, 1.0).unwrap();
        assert!((l[0] - 2.0 / std::f64::consts::PI).abs() < 1e-12);
        assert!((l[1] / l[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian2d_unit_volume() {
        let x = grid(-5.0, 0.05, 201);
        let g = gaussian2d(&x, &x, (0.3, -0.2), 1.0).unwrap();
        assert_eq!(g.dim(), (201, 201));
        let volume = g.sum() * 0.05 * 0.05;
        assert!((volume - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_gaussian2d_zero_fwhm() {
        let x = grid(0.0, 1.0, 4);
        let g = gaussian2d(&x, &x, (1.0, 2.0), 0.0).unwrap();
        assert_eq!(g[[1, 2]], 1.0);
        assert_eq!(g.sum(), 1.0);
    }
}
