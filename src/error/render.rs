//! Chart preparation errors.

use thiserror::Error;

/// A series that cannot be drawn as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartRenderError {
    #[error("dataset '{dataset}' has {found} values for {expected} labels")]
    LengthMismatch {
        dataset: String,
        expected: usize,
        found: usize,
    },

    #[error("dataset '{dataset}' has a non-finite value at index {index}")]
    NonFiniteValue { dataset: String, index: usize },

    #[error("dataset '{dataset}' has a negative value at index {index}")]
    NegativeValue { dataset: String, index: usize },

    #[error("{kind} chart needs {expected} dataset(s), got {found}")]
    DatasetCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
}
