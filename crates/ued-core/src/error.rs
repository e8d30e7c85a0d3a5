//! Error types for the analysis engines.

use thiserror::Error;

/// Broad category of an [`AnalysisError`], for callers that branch on cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad arguments: unknown filter names, impossible decomposition levels,
    /// out-of-range parameters.
    Configuration,
    /// Array shapes that do not agree, or empty arrays.
    Shape,
    /// NaN or infinite input values.
    NonFinite,
}

/// Errors raised while validating inputs to the analysis engines.
///
/// Numerical degeneracies that have a physically meaningful fallback (zero
/// overlap at every shift, zero-width shapes) are not errors; they are
/// reported through the returned values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Two arrays that must agree in shape do not.
    #[error("shape mismatch for '{argument}': expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Name of the offending argument.
        argument: &'static str,
        /// Shape it had to match.
        expected: Vec<usize>,
        /// Shape it had.
        found: Vec<usize>,
    },

    /// A filter name that is not in the registry.
    #[error("unknown {family}: '{name}'")]
    UnknownFilter {
        /// Filter family that was searched.
        family: &'static str,
        /// Name that failed to resolve.
        name: String,
    },

    /// A decomposition level deeper than the signal length supports.
    #[error("decomposition level {requested} exceeds the maximum of {max} for this signal")]
    LevelTooDeep {
        /// Level that was asked for.
        requested: usize,
        /// Deepest supported level.
        max: usize,
    },

    /// A scalar argument outside its valid range.
    #[error("invalid parameter '{param}': {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        param: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// An input array contains NaN or infinity.
    #[error("'{argument}' contains a non-finite value at flat index {index}")]
    NonFinite {
        /// Name of the offending argument.
        argument: &'static str,
        /// Row-major index of the first non-finite element.
        index: usize,
    },

    /// An input array has no elements.
    #[error("'{argument}' is empty")]
    Empty {
        /// Name of the offending argument.
        argument: &'static str,
    },
}

impl AnalysisError {
    /// Creates a shape-mismatch error.
    pub fn shape_mismatch(argument: &'static str, expected: &[usize], found: &[usize]) -> Self {
        AnalysisError::ShapeMismatch {
            argument,
            expected: expected.to_vec(),
            found: found.to_vec(),
        }
    }

    /// Creates an unknown-filter error.
    pub fn unknown_filter(family: &'static str, name: impl Into<String>) -> Self {
        AnalysisError::UnknownFilter {
            family,
            name: name.into(),
        }
    }

    /// Creates a level-too-deep error.
    pub fn level_too_deep(requested: usize, max: usize) -> Self {
        AnalysisError::LevelTooDeep { requested, max }
    }

    /// Creates an invalid-parameter error.
    pub fn invalid_parameter(param: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter {
            param,
            reason: reason.into(),
        }
    }

    /// Creates a non-finite-input error.
    pub fn non_finite(argument: &'static str, index: usize) -> Self {
        AnalysisError::NonFinite { argument, index }
    }

    /// Creates an empty-input error.
    pub fn empty(argument: &'static str) -> Self {
        AnalysisError::Empty { argument }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::UnknownFilter { .. }
            | AnalysisError::LevelTooDeep { .. }
            | AnalysisError::InvalidParameter { .. } => ErrorKind::Configuration,
            AnalysisError::ShapeMismatch { .. } | AnalysisError::Empty { .. } => ErrorKind::Shape,
            AnalysisError::NonFinite { .. } => ErrorKind::NonFinite,
        }
    }
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, AnalysisError>;
