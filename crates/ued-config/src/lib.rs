//! Analysis settings for the ued engines.
//!
//! Baseline and registration parameters live in one TOML file. Names of
//! filters, extension modes and suppression strategies are validated against
//! the engine registries on load, so a typo fails early instead of at the
//! first analysis call.
//!
//! # Example
//!
//! ```rust
//! use ued_config::{AnalysisConfig, BaselineMethod};
//!
//! let config = AnalysisConfig::from_toml_str(
//!     r#"
//!     [baseline]
//!     method = "dwt"
//!     wavelet = "sym6"
//!     level = 5
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.baseline.method, BaselineMethod::Dwt);
//!
//! let opts = config.baseline.options().unwrap();
//! assert_eq!(opts.level, Some(5));
//! ```

mod analysis;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

pub use analysis::{AnalysisConfig, BaselineConfig, BaselineFilters, BaselineMethod, RegistrationConfig};
pub use error::ConfigError;
pub use paths::{default_config_path, ensure_user_config_dir, user_config_dir};
