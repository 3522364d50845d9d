//! Error types for preprocessing operations.

use thiserror::Error;

/// Error type for preprocessing operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreprocessingError {
    /// Numerical computation error (overflow, non-finite statistics, etc.).
    #[error("Numerical error: {0}")]
    NumericalError(String),
    /// Data contains NaN or infinite values where finite ones were required.
    #[error("Missing values: {0}")]
    MissingValues(String),
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Feature dimension mismatch.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },
}
