//! UED Align - masked registration of diffraction images
//!
//! Finds and corrects integer-pixel drift between diffraction patterns while
//! ignoring invalid pixels (beam block, dead detector areas, saturation).
//!
//! - [`correlation`] - Masked normalized cross-correlation over all
//!   translations ([`masked_normalized_cross_correlation`])
//! - [`registration`] - Best translation search ([`find_translation`])
//! - [`shift`] - Integer shifts and single-image alignment
//! - [`mask`] - Valid-pixel masks from image collections
//! - [`streaming`] - Constant-memory statistics and alignment over streams
//! - [`batch`] - Parallel registration of many frames with rayon
//!
//! ## Example
//!
//! ```rust
//! use ndarray::Array2;
//! use ued_align::{align, find_translation, DEFAULT_OVERLAP_RATIO};
//!
//! let mut reference = Array2::zeros((64, 64));
//! reference[[32, 30]] = 500.0;
//! let mut frame = Array2::zeros((64, 64));
//! frame[[34, 27]] = 500.0;
//!
//! let t = find_translation(reference.view(), frame.view(), None, None, DEFAULT_OVERLAP_RATIO).unwrap();
//! assert_eq!(t.shift, [2, -3]);
//!
//! let aligned = align(frame.view(), reference.view(), None, 0.0).unwrap();
//! assert_eq!(aligned[[32, 30]], 500.0);
//! ```
//!
//! Masks use `true` for valid pixels throughout. A registration with no
//! usable overlap is reported through [`Translation::degenerate`] rather
//! than as an error.

pub mod batch;
pub mod correlation;
pub mod mask;
pub mod registration;
pub mod shift;
pub mod streaming;

pub use batch::{average_aligned, register_batch};
pub use correlation::{CorrelationSurface, masked_normalized_cross_correlation};
pub use mask::{combine_masks, mask_from_collection, mask_image};
pub use registration::{DEFAULT_OVERLAP_RATIO, Translation, find_translation};
pub use shift::{align, shift_image};
pub use streaming::{
    AlignStream, Running, RunningStats, Statistic, iaverage, ialign, isem, istd, ivar,
    snr_from_collection,
};
