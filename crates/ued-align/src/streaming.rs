//! Constant-memory statistics and alignment over image streams.
//!
//! Everything here consumes images one at a time, so collections far larger
//! than memory can be reduced. [`RunningStats`] is the accumulator; the
//! adaptors ([`iaverage`], [`ivar`], [`istd`], [`isem`]) yield its current
//! state after every image, and [`AlignStream`] aligns each image onto a
//! reference as it arrives.
//!
//! # Reference
//!
//! D. H. D. West, "Updating mean and variance estimates: an improved method",
//! Communications of the ACM 22(9), 1979

use ndarray::{Array2, ArrayView2, Zip};
use ued_core::{AnalysisError, Result};

use crate::shift::align;

/// Weighted per-pixel running mean and variance.
///
/// Updates follow West's algorithm. Two accumulators can be combined with
/// [`merge`](Self::merge), which makes parallel reductions independent of
/// how the stream was split, up to rounding.
///
/// # Example
///
/// ```rust
/// use ndarray::array;
/// use ued_align::RunningStats;
///
/// let mut stats = RunningStats::new((1, 2));
/// stats.push(array![[1.0, 10.0]].view()).unwrap();
/// stats.push(array![[3.0, 10.0]].view()).unwrap();
/// assert_eq!(stats.mean(), &array![[2.0, 10.0]]);
/// assert_eq!(stats.variance(1), array![[2.0, 0.0]]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RunningStats {
    mean: Array2<f64>,
    /// Weighted sum of squared deviations from the mean.
    sum_sq: Array2<f64>,
    weight: f64,
    count: usize,
}

impl RunningStats {
    /// Empty accumulator for images of `shape`.
    pub fn new(shape: (usize, usize)) -> Self {
        Self {
            mean: Array2::zeros(shape),
            sum_sq: Array2::zeros(shape),
            weight: 0.0,
            count: 0,
        }
    }

    /// Image shape.
    pub fn shape(&self) -> (usize, usize) {
        self.mean.dim()
    }

    /// Number of images accumulated.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Total weight accumulated.
    pub fn total_weight(&self) -> f64 {
        self.weight
    }

    /// Adds an image with unit weight.
    pub fn push(&mut self, image: ArrayView2<f64>) -> Result<()> {
        self.push_weighted(image, 1.0)
    }

    /// Adds an image with a positive finite weight.
    pub fn push_weighted(&mut self, image: ArrayView2<f64>, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AnalysisError::invalid_parameter(
                "weight",
                format!("must be positive and finite, got {weight}"),
            ));
        }
        self.check_shape("image", image.shape())?;

        self.weight += weight;
        let ratio = weight / self.weight;
        Zip::from(&mut self.mean)
            .and(&mut self.sum_sq)
            .and(&image)
            .for_each(|mean, sum_sq, &x| {
                let delta = x - *mean;
                *mean += ratio * delta;
                *sum_sq += weight * delta * (x - *mean);
            });
        self.count += 1;
        Ok(())
    }

    /// Folds `other` into `self` with the pairwise combination formula.
    pub fn merge(&mut self, other: &RunningStats) -> Result<()> {
        self.check_shape("other", other.mean.shape())?;
        if other.count == 0 {
            return Ok(());
        }
        if self.count == 0 {
            self.clone_from(other);
            return Ok(());
        }

        let total = self.weight + other.weight;
        let ratio = other.weight / total;
        let cross = self.weight * other.weight / total;
        Zip::from(&mut self.mean)
            .and(&mut self.sum_sq)
            .and(&other.mean)
            .and(&other.sum_sq)
            .for_each(|mean, sum_sq, &other_mean, &other_sq| {
                let delta = other_mean - *mean;
                *mean += ratio * delta;
                *sum_sq += other_sq + cross * delta * delta;
            });
        self.weight = total;
        self.count += other.count;
        Ok(())
    }

    /// Weighted mean. Zero before any image.
    pub fn mean(&self) -> &Array2<f64> {
        &self.mean
    }

    /// Variance with divisor `total_weight − ddof`.
    ///
    /// Zero while the divisor is not positive, so a single image has zero
    /// variance at the default `ddof = 1`.
    pub fn variance(&self, ddof: usize) -> Array2<f64> {
        let divisor = self.weight - ddof as f64;
        if divisor <= 0.0 {
            return Array2::zeros(self.shape());
        }
        self.sum_sq.mapv(|s| (s / divisor).max(0.0))
    }

    /// Standard deviation, the square root of [`variance`](Self::variance).
    pub fn std(&self, ddof: usize) -> Array2<f64> {
        self.variance(ddof).mapv(f64::sqrt)
    }

    /// Standard error in the mean: `std / √count`.
    pub fn sem(&self, ddof: usize) -> Array2<f64> {
        if self.count == 0 {
            return Array2::zeros(self.shape());
        }
        let scale = (self.count as f64).sqrt().recip();
        self.std(ddof).mapv(|s| s * scale)
    }

    fn check_shape(&self, argument: &'static str, found: &[usize]) -> Result<()> {
        if self.mean.shape() != found {
            return Err(AnalysisError::shape_mismatch(argument, self.mean.shape(), found));
        }
        Ok(())
    }
}

/// Statistic yielded by a [`Running`] adaptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    /// Weighted mean.
    Mean,
    /// Variance with the given `ddof`.
    Variance(usize),
    /// Standard deviation with the given `ddof`.
    Std(usize),
    /// Standard error in the mean with the given `ddof`.
    Sem(usize),
}

/// Iterator adaptor yielding a running statistic after every image.
///
/// The accumulator is created from the first image's shape. Later images of
/// another shape yield an error and the stream can continue.
#[derive(Debug, Clone)]
pub struct Running<I> {
    images: I,
    statistic: Statistic,
    stats: Option<RunningStats>,
}

impl<I> Running<I> {
    /// Wraps `images`, yielding `statistic` after each one.
    pub fn new(images: I, statistic: Statistic) -> Self {
        Self {
            images,
            statistic,
            stats: None,
        }
    }

    /// Accumulator state so far; `None` before the first image.
    pub fn stats(&self) -> Option<&RunningStats> {
        self.stats.as_ref()
    }
}

impl<I: Iterator<Item = Array2<f64>>> Iterator for Running<I> {
    type Item = Result<Array2<f64>>;

    fn next(&mut self) -> Option<Self::Item> {
        let image = self.images.next()?;
        let stats = self.stats.get_or_insert_with(|| RunningStats::new(image.dim()));
        if let Err(err) = stats.push(image.view()) {
            return Some(Err(err));
        }
        Some(Ok(match self.statistic {
            Statistic::Mean => stats.mean().clone(),
            Statistic::Variance(ddof) => stats.variance(ddof),
            Statistic::Std(ddof) => stats.std(ddof),
            Statistic::Sem(ddof) => stats.sem(ddof),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.images.size_hint()
    }
}

/// Running mean of an image stream.
pub fn iaverage<I: IntoIterator<Item = Array2<f64>>>(images: I) -> Running<I::IntoIter> {
    Running::new(images.into_iter(), Statistic::Mean)
}

/// Running variance of an image stream.
pub fn ivar<I: IntoIterator<Item = Array2<f64>>>(images: I, ddof: usize) -> Running<I::IntoIter> {
    Running::new(images.into_iter(), Statistic::Variance(ddof))
}

/// Running standard deviation of an image stream.
pub fn istd<I: IntoIterator<Item = Array2<f64>>>(images: I, ddof: usize) -> Running<I::IntoIter> {
    Running::new(images.into_iter(), Statistic::Std(ddof))
}

/// Running standard error in the mean of an image stream.
pub fn isem<I: IntoIterator<Item = Array2<f64>>>(images: I, ddof: usize) -> Running<I::IntoIter> {
    Running::new(images.into_iter(), Statistic::Sem(ddof))
}

/// Pixelwise signal-to-noise ratio `mean / std` (`ddof = 1`) of images that
/// record the same measurement.
///
/// Pixels with zero standard deviation take `fill_value`.
pub fn snr_from_collection<I: IntoIterator<Item = Array2<f64>>>(images: I, fill_value: f64) -> Result<Array2<f64>> {
    let mut images = images.into_iter();
    let first = images.next().ok_or_else(|| AnalysisError::empty("images"))?;
    let mut stats = RunningStats::new(first.dim());
    stats.push(first.view())?;
    for image in images {
        stats.push(image.view())?;
    }
    let std = stats.std(1);
    Ok(Zip::from(stats.mean())
        .and(&std)
        .map_collect(|&m, &s| if s == 0.0 { fill_value } else { m / s }))
}

/// Single-pass iterator aligning each image onto a reference.
///
/// Without an explicit reference, the first image becomes the reference and
/// is yielded unchanged. Build a new stream to start over.
#[derive(Debug, Clone)]
pub struct AlignStream<I> {
    images: I,
    reference: Option<Array2<f64>>,
    mask: Option<Array2<bool>>,
    fill_value: f64,
}

impl<I> AlignStream<I> {
    /// Reference in use; `None` until the first image when none was given.
    pub fn reference(&self) -> Option<&Array2<f64>> {
        self.reference.as_ref()
    }
}

impl<I: Iterator<Item = Array2<f64>>> Iterator for AlignStream<I> {
    type Item = Result<Array2<f64>>;

    fn next(&mut self) -> Option<Self::Item> {
        let image = self.images.next()?;
        if let Some(reference) = &self.reference {
            return Some(align(image.view(), reference.view(), self.mask.as_ref(), self.fill_value));
        }
        self.reference = Some(image.clone());
        Some(Ok(image))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.images.size_hint()
    }
}

/// Aligns a stream of images onto `reference`, or onto the first image
/// when `reference` is `None`.
///
/// `mask` marks valid pixels; uncovered edges take `fill_value`.
pub fn ialign<I: IntoIterator<Item = Array2<f64>>>(
    images: I,
    reference: Option<Array2<f64>>,
    mask: Option<Array2<bool>>,
    fill_value: f64,
) -> AlignStream<I::IntoIter> {
    AlignStream {
        images: images.into_iter(),
        reference,
        mask,
        fill_value,
    }
}
