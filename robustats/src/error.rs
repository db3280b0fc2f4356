//! Error types for clipping and robust estimation.

use thiserror::Error;

/// Errors reported by configuration validation and strict-mode estimators.
///
/// Per-slice degeneracies (empty slices, zero spread) are not errors; they
/// are reported through NaN-valued outputs for the affected slice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Sigma threshold '{name}' must be finite and non-negative, got {value}")]
    InvalidSigma { name: &'static str, value: f64 },

    #[error("Grow radius must be finite and non-negative, got {0}")]
    InvalidGrow(f64),

    #[error("Biweight tuning constant must be finite and positive, got {0}")]
    InvalidTuningConstant(f64),

    #[error("Unknown statistic function '{0}'")]
    UnknownFunction(String),

    #[error("Mask shape {mask:?} does not match data shape {data:?}")]
    ShapeMismatch { data: Vec<usize>, mask: Vec<usize> },

    #[error("Axis {axis} is out of bounds for array of dimension {ndim}")]
    AxisOutOfBounds { axis: usize, ndim: usize },

    #[error("Axis {0} is listed more than once")]
    DuplicateAxis(usize),

    #[error("All values in a reduction slice are invalid")]
    AllInvalid,
}
