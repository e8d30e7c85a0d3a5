//! Analysis settings file format and operations.

use std::path::Path;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use ued_align::{
    RunningStats, Translation, average_aligned, find_translation, ialign, register_batch,
};
use ued_baseline::{BaselineOptions, ExtensionMode, Suppression, baseline_dt, baseline_dwt};
use ued_core::{AnalysisError, DualTreeFilter, FirstStageFilter, Wavelet};

use crate::error::ConfigError;
use crate::paths;

/// Settings for both analysis engines.
///
/// Every table and field is optional in TOML; missing ones take their
/// defaults.
///
/// # TOML Format
///
/// ```toml
/// [baseline]
/// method = "dt"
/// wavelet = "qshift1"
/// first_stage = "sym6"
/// level = 5
/// max_iter = 100
/// tolerance = 0.0
/// mode = "symmetric"
/// suppression = "all"
///
/// [registration]
/// overlap_ratio = 0.3
/// fill_value = 0.0
/// parallel = true
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Baseline removal settings.
    pub baseline: BaselineConfig,
    /// Image registration settings.
    pub registration: RegistrationConfig,
}

impl AnalysisConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded analysis config");
        Ok(config)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), "saved analysis config");
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field. Filter names resolve through the `ued-core`
    /// registries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.baseline.validate()?;
        self.registration.validate()
    }

    /// Load the file at `path`, or return the defaults if it does not exist.
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.is_file() {
            return Self::load(path);
        }
        tracing::debug!(path = %path.display(), "no analysis config, using defaults");
        Ok(Self::default())
    }

    /// Load the user's default configuration file, or the defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Self::load_or_default_from(paths::default_config_path())
    }
}

/// Wavelet engine used for baseline removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineMethod {
    /// Real discrete wavelet transform.
    Dwt,
    /// Dual-tree complex wavelet transform.
    #[default]
    Dt,
}

/// Baseline filters resolved to their registry types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineFilters {
    /// Filters for [`baseline_dwt`].
    Dwt {
        /// Analysis wavelet.
        wavelet: Wavelet,
    },
    /// Filters for [`baseline_dt`].
    Dt {
        /// First-stage wavelet.
        first_stage: FirstStageFilter,
        /// Q-shift filter pair for later stages.
        wavelet: DualTreeFilter,
    },
}

/// Baseline removal settings.
///
/// `wavelet` names a [`Wavelet`] for the `dwt` method and a
/// [`DualTreeFilter`] for the `dt` method. `first_stage` is only used by
/// `dt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Engine to run.
    pub method: BaselineMethod,
    /// Wavelet or dual-tree filter name.
    pub wavelet: String,
    /// First-stage wavelet name for the dual-tree engine.
    pub first_stage: String,
    /// Decomposition level; absent means the deepest level allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    /// Iteration cap.
    pub max_iter: usize,
    /// Early-stop threshold; zero runs every iteration.
    pub tolerance: f64,
    /// Signal extension mode name.
    pub mode: String,
    /// Detail suppression name (`all` or `finest`).
    pub suppression: String,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            method: BaselineMethod::Dt,
            wavelet: DualTreeFilter::default().name().to_string(),
            first_stage: FirstStageFilter::default().name().to_string(),
            level: None,
            max_iter: 100,
            tolerance: 0.0,
            mode: ExtensionMode::default().name().to_string(),
            suppression: Suppression::default().name().to_string(),
        }
    }
}

impl BaselineConfig {
    /// Resolve filter names for the configured method.
    pub fn filters(&self) -> Result<BaselineFilters, ConfigError> {
        Ok(match self.method {
            BaselineMethod::Dwt => BaselineFilters::Dwt {
                wavelet: self.wavelet.parse()?,
            },
            BaselineMethod::Dt => BaselineFilters::Dt {
                first_stage: self.first_stage.parse()?,
                wavelet: self.wavelet.parse()?,
            },
        })
    }

    /// Engine options described by this configuration.
    pub fn options(&self) -> Result<BaselineOptions, ConfigError> {
        let mut opts = BaselineOptions::new(self.max_iter)
            .with_mode(self.mode.parse()?)
            .with_tolerance(self.tolerance)
            .with_suppression(self.suppression.parse()?);
        if let Some(level) = self.level {
            opts = opts.with_level(level);
        }
        Ok(opts)
    }

    /// Check ranges and resolve every name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iter == 0 {
            return Err(ConfigError::invalid_value("baseline", "max_iter", "must be positive"));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::invalid_value(
                "baseline",
                "tolerance",
                format!("must be finite and non-negative, got {}", self.tolerance),
            ));
        }
        self.filters()?;
        self.options()?;
        Ok(())
    }

    /// Baseline of `signal` with the configured engine.
    pub fn apply(&self, signal: &[f64]) -> Result<Vec<f64>, ConfigError> {
        let opts = self.options()?;
        let baseline = match self.filters()? {
            BaselineFilters::Dwt { wavelet } => baseline_dwt(signal, wavelet, &opts)?,
            BaselineFilters::Dt { first_stage, wavelet } => baseline_dt(signal, first_stage, wavelet, &opts)?,
        };
        Ok(baseline)
    }
}

/// Image registration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Minimum overlap, as a fraction of the largest, a translation needs.
    pub overlap_ratio: f64,
    /// Value for pixels uncovered by a shift.
    pub fill_value: f64,
    /// Register batches on the rayon thread pool.
    pub parallel: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            overlap_ratio: ued_align::DEFAULT_OVERLAP_RATIO,
            fill_value: 0.0,
            parallel: true,
        }
    }
}

impl RegistrationConfig {
    /// Check ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.overlap_ratio) {
            return Err(ConfigError::invalid_value(
                "registration",
                "overlap_ratio",
                format!("must lie in [0, 1], got {}", self.overlap_ratio),
            ));
        }
        if self.fill_value.is_infinite() {
            return Err(ConfigError::invalid_value(
                "registration",
                "fill_value",
                "must not be infinite",
            ));
        }
        Ok(())
    }

    /// Register every frame against `reference`, in parallel when enabled.
    pub fn register(
        &self,
        reference: ArrayView2<f64>,
        frames: &[Array2<f64>],
        mask: Option<&Array2<bool>>,
    ) -> Vec<Result<Translation, ConfigError>> {
        let results = if self.parallel {
            register_batch(reference, frames, mask, self.overlap_ratio)
        } else {
            frames
                .iter()
                .map(|frame| find_translation(reference, frame.view(), mask, mask, self.overlap_ratio))
                .collect()
        };
        results.into_iter().map(|r| r.map_err(ConfigError::from)).collect()
    }

    /// Align every frame onto `reference` and accumulate the statistics.
    pub fn average(
        &self,
        reference: ArrayView2<f64>,
        frames: &[Array2<f64>],
        mask: Option<&Array2<bool>>,
    ) -> Result<RunningStats, ConfigError> {
        if self.parallel {
            return Ok(average_aligned(reference, frames, mask, self.fill_value)?);
        }
        let mut stats = RunningStats::new(reference.dim());
        let stream = ialign(
            frames.iter().cloned(),
            Some(reference.to_owned()),
            mask.cloned(),
            self.fill_value,
        );
        for aligned in stream {
            stats.push(aligned?.view())?;
        }
        if stats.count() == 0 {
            return Err(AnalysisError::empty("frames").into());
        }
        Ok(stats)
    }
}
