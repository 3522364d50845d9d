//! The queue length predictor.
//!
//! A [`QueuePredictor`] runs one of two strategies:
//!
//! - [`Strategy::Heuristic`] (initial): the deterministic formula from
//!   [`heuristic`](crate::heuristic), applied to the raw feature values.
//! - [`Strategy::Trained`]: standardize with the training-time scaler, then
//!   run the fitted regression model.
//!
//! The only transitions are [`QueuePredictor::load_model`] and
//! [`QueuePredictor::train`]. Every result is clamped to
//! [`MIN_PREDICTION`]..=[`MAX_PREDICTION`].
//!
//! ```rust
//! use queue_predictor::QueuePredictor;
//! use serde_json::json;
//!
//! let predictor = QueuePredictor::new();
//! let payload = json!({
//!     "time_of_day": 12, "day_of_week": 3, "store_traffic": 50,
//!     "peak_hours": 0, "avg_service_time": 2, "checkout_counters": 3
//! });
//! let map = payload.as_object().unwrap();
//! assert_eq!(predictor.predict(map).unwrap(), 33.0);
//! ```

use crate::config::{PredictorConfig, TrainingConfig, ValidationPolicy};
use crate::dataset::TrainingSet;
use crate::error::PredictionError;
use crate::features::{FeatureInput, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::heuristic;
use crate::pipeline::TrainedModel;
use crate::trainer::TrainingError;
use tracing::{debug, info, warn};

/// Lower bound of every prediction.
pub const MIN_PREDICTION: f64 = 0.0;
/// Upper bound of every prediction.
pub const MAX_PREDICTION: f64 = 100.0;

/// How a prediction is computed.
#[derive(Clone, Debug, Default)]
pub enum Strategy {
    #[default]
    Heuristic,
    Trained(TrainedModel),
}

impl Strategy {
    /// Short label used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Heuristic => "heuristic",
            Strategy::Trained(_) => "trained",
        }
    }
}

/// Predicts checkout queue length from the six store features.
///
/// Starts on the heuristic; call [`load_model`](Self::load_model) or
/// [`train`](Self::train) to switch to a trained model. `predict` takes
/// `&self`, so a shared predictor serves concurrent callers behind a read lock.
#[derive(Clone, Debug, Default)]
pub struct QueuePredictor {
    strategy: Strategy,
    policy: ValidationPolicy,
}

impl QueuePredictor {
    /// Untrained predictor with strict validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Untrained predictor with the given validation policy.
    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self {
            strategy: Strategy::Heuristic,
            policy,
        }
    }

    /// Untrained predictor using the validation policy from `config`.
    pub fn from_config(config: &PredictorConfig) -> Self {
        Self::with_policy(config.validation)
    }

    /// Predictor already on the trained strategy, with strict validation.
    pub fn with_model(model: TrainedModel) -> Self {
        Self {
            strategy: Strategy::Trained(model),
            policy: ValidationPolicy::default(),
        }
    }

    /// Switches to the trained strategy, returning the previous one.
    pub fn load_model(&mut self, model: TrainedModel) -> Strategy {
        info!(previous = self.strategy.name(), "trained model loaded");
        std::mem::replace(&mut self.strategy, Strategy::Trained(model))
    }

    /// Fits a model on `data` and loads it. On error the current strategy is kept.
    pub fn train(&mut self, data: &TrainingSet, config: &TrainingConfig) -> Result<(), TrainingError> {
        let model = TrainedModel::fit(data, config)?;
        self.load_model(model);
        Ok(())
    }

    /// True once a trained model has been loaded.
    pub fn is_trained(&self) -> bool {
        matches!(self.strategy, Strategy::Trained(_))
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Feature names in the column order sequences are read in.
    pub fn feature_names(&self) -> &'static [&'static str; FEATURE_COUNT] {
        &FEATURE_NAMES
    }

    /// Validates `input` and returns the clamped queue estimate.
    ///
    /// # Errors
    /// [`PredictionError`] wrapping the validation failure or the internal
    /// failure; no partial result is returned.
    pub fn predict<'a>(&self, input: impl Into<FeatureInput<'a>>) -> Result<f64, PredictionError> {
        let input = input.into();
        let features = self.validate(&input).map_err(|err| {
            warn!(error = %err, "prediction input rejected");
            err
        })?;

        let raw = self.estimate(&features)?;
        if raw.is_nan() {
            return Err(PredictionError::NonNumericOutput);
        }
        let prediction = raw.clamp(MIN_PREDICTION, MAX_PREDICTION);

        debug!(
            strategy = self.strategy.name(),
            raw,
            prediction,
            "queue length predicted"
        );
        Ok(prediction)
    }

    fn validate(&self, input: &FeatureInput<'_>) -> Result<FeatureVector, PredictionError> {
        let features = match (&self.strategy, self.policy) {
            (Strategy::Heuristic, ValidationPolicy::FillDefaults) => {
                input.vectorize_with_defaults(&heuristic::DEFAULTS)?
            }
            _ => input.vectorize()?,
        };
        Ok(features)
    }

    fn estimate(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        match &self.strategy {
            Strategy::Heuristic => Ok(heuristic::estimate(features)),
            Strategy::Trained(model) => Ok(model.predict(features)?),
        }
    }
}
