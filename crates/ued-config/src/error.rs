//! Errors raised while reading, writing or checking analysis settings.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use ued_core::AnalysisError;

/// Everything that can go wrong between a settings file and a configured
/// engine.
///
/// I/O failures keep the offending path so messages point at the file.
/// Engine-level rejections (an unknown filter name, a level the signal
/// cannot support) pass through unchanged as [`ConfigError::Analysis`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read.
    #[error("cannot read settings '{path}': {source}")]
    ReadFile {
        /// File that was opened.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: io::Error,
    },

    /// Settings file could not be written.
    #[error("cannot write settings '{path}': {source}")]
    WriteFile {
        /// Destination file.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: io::Error,
    },

    /// Directory for the settings file could not be created.
    #[error("cannot create settings directory '{path}': {source}")]
    CreateDir {
        /// Directory that was requested.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: io::Error,
    },

    /// Malformed TOML or a field of the wrong type.
    #[error("malformed settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Settings could not be rendered as TOML.
    #[error("cannot render settings: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Rejected by the analysis engines.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// A numeric field outside its accepted range.
    #[error("[{section}] {field}: {reason}")]
    InvalidValue {
        /// TOML table holding the field.
        section: &'static str,
        /// Field name within the table.
        field: &'static str,
        /// Accepted range or constraint.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn read_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write_file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_value(
        section: &'static str,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            section,
            field,
            reason: reason.into(),
        }
    }

    /// True when the failure came from the file system rather than the
    /// contents of the settings.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::ReadFile { .. } | Self::WriteFile { .. } | Self::CreateDir { .. }
        )
    }
}
