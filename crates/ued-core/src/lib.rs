//! UED Core - shared numeric primitives for diffraction analysis
//!
//! This crate holds the pieces used by both analysis engines:
//!
//! - [`error`] - Error taxonomy ([`AnalysisError`], [`ErrorKind`])
//! - [`fft`] - Planned 2D FFT and transform-friendly sizes
//! - [`filters`] - Named wavelet filter registries and coefficient tables
//! - [`shapes`] - Unit-area peak shapes (Gaussian, Lorentzian)
//! - [`validate`] - Input checks run before any numerical work
//!
//! Masks follow one convention everywhere: `true` marks a valid pixel.

pub mod error;
pub mod fft;
pub mod filters;
pub mod shapes;
pub mod validate;

pub use error::{AnalysisError, ErrorKind, Result};
pub use fft::{Complex, Fft2, next_fast_len};
pub use filters::{
    DualTreeFilter, FilterBank, FirstStageFilter, Wavelet, available_dt_filters,
    available_first_stage_filters, available_wavelets,
};
pub use shapes::{gaussian, gaussian2d, lorentzian};
