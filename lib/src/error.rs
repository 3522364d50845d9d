//! Error types surfaced by the prediction path.
//!
//! Two layers only: [`ValidationError`] describes what is wrong with the
//! caller's input, and [`PredictionError`] is the single error type returned
//! by [`QueuePredictor::predict`](crate::predictor::QueuePredictor::predict),
//! wrapping validation failures and any internal failure.

use crate::preprocessing::PreprocessingError;
use thiserror::Error;

/// Input rejected before any computation happened.
///
/// Always recoverable by the caller (a 400-equivalent for an HTTP surface).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required feature key is absent from the mapping.
    #[error("missing feature: {0}")]
    MissingFeature(&'static str),
    /// The value for a feature cannot be coerced to a finite number.
    #[error("invalid type for {0}")]
    InvalidType(&'static str),
    /// A raw sequence does not have exactly one value per feature.
    #[error("wrong feature count: expected {expected}, got {got}")]
    WrongFeatureCount { expected: usize, got: usize },
    /// The payload is neither a mapping nor a sequence.
    #[error("expected a feature object or array")]
    UnsupportedPayload,
}

/// Failure of a single `predict` call. No partial result is ever returned.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("prediction error: {0}")]
    Validation(#[from] ValidationError),
    #[error("prediction error: {0}")]
    Preprocessing(#[from] PreprocessingError),
    /// The estimator produced NaN.
    #[error("prediction error: estimator produced a non-numeric result")]
    NonNumericOutput,
}

impl PredictionError {
    /// Returns the wrapped validation error, if that is what failed.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            PredictionError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_missing_feature_message_names_the_key() {
        let err = ValidationError::MissingFeature("peak_hours");
        assert_eq!(err.to_string(), "missing feature: peak_hours");
    }

    #[test]
    fn test_invalid_type_message_names_the_key() {
        let err = ValidationError::InvalidType("store_traffic");
        assert_eq!(err.to_string(), "invalid type for store_traffic");
    }

    #[test]
    fn test_wrong_count_message() {
        let err = ValidationError::WrongFeatureCount {
            expected: 6,
            got: 4,
        };
        assert!(err.to_string().starts_with("wrong feature count"));
    }

    #[test]
    fn test_prediction_error_wraps_validation() {
        let err: PredictionError = ValidationError::MissingFeature("day_of_week").into();
        assert_eq!(
            err.to_string(),
            "prediction error: missing feature: day_of_week"
        );
        assert_eq!(
            err.validation(),
            Some(&ValidationError::MissingFeature("day_of_week"))
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_prediction_error_from_preprocessing_has_no_validation() {
        let err: PredictionError = PreprocessingError::FeatureMismatch {
            expected_features: 6,
            got_features: 5,
        }
        .into();
        assert!(err.validation().is_none());
        assert!(err.to_string().starts_with("prediction error:"));
    }
}
