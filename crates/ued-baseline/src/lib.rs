//! UED Baseline - iterative wavelet background removal
//!
//! Estimates the slowly varying background under a diffraction signal by
//! repeatedly smoothing it in the wavelet domain and clipping it below the
//! measured intensity.
//!
//! - [`dwt`] - Real DWT in 1D and 2D with pywt-compatible coefficient layout
//! - [`dualtree`] - Dual-tree complex wavelet transform (DTCWT)
//! - [`baseline`] - The iterative baseline loop ([`baseline_dwt`],
//!   [`baseline_dwt2`], [`baseline_dt`])
//!
//! ## Example
//!
//! ```rust
//! use ued_baseline::{BaselineOptions, baseline_dt};
//! use ued_core::{DualTreeFilter, FirstStageFilter};
//!
//! let x: Vec<f64> = (0..512)
//!     .map(|i| {
//!         let t = i as f64 / 25.0;
//!         50.0 * (-t / 5.0).exp() + 20.0 * (-((t - 10.0) / 0.1).powi(2)).exp()
//!     })
//!     .collect();
//!
//! let opts = BaselineOptions::new(100).with_level(4);
//! let background = baseline_dt(&x, FirstStageFilter::default(), DualTreeFilter::Qshift4, &opts).unwrap();
//! assert_eq!(background.len(), x.len());
//! ```
//!
//! Filter names resolve through the registries in [`ued_core::filters`];
//! parse a user-supplied name with `str::parse` to get an error for unknown
//! filters instead of a silent fallback.

pub mod baseline;
pub mod dualtree;
pub mod dwt;

pub use baseline::{Axis, BaselineOptions, Region, Suppression, baseline_dt, baseline_dwt, baseline_dwt2};
pub use dualtree::{DualTreePyramid, dt_max_level, dtcwt, idtcwt};
pub use dwt::{
    Details2, ExtensionMode, Pyramid, Pyramid2, dwt, dwt_coeff_len, dwt_max_level, idwt, wavedec,
    wavedec2, waverec, waverec2,
};
pub use ued_core::{available_dt_filters, available_first_stage_filters};
