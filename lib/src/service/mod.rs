//! Request-level contract around [`QueuePredictor`].
//!
//! Authentication happens upstream; this layer receives an already
//! authenticated [`UserId`] with a JSON payload, predicts, and stores the
//! successful result in the user's history. Predictions take a read lock on
//! the shared predictor, so they run concurrently; [`PredictionService::reload`]
//! is the only writer.

mod history;

pub use history::{HistoryStore, InMemoryHistory, PredictionRecord, StoreError};

use crate::error::PredictionError;
use crate::features::FeatureInput;
use crate::pipeline::TrainedModel;
use crate::predictor::QueuePredictor;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Identity of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type SharedPredictor = Arc<RwLock<QueuePredictor>>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// True when the request itself was at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ServiceError::Prediction(_))
    }
}

pub struct PredictionService<S> {
    predictor: SharedPredictor,
    store: S,
}

impl<S: HistoryStore> PredictionService<S> {
    pub fn new(predictor: SharedPredictor, store: S) -> Self {
        Self { predictor, store }
    }

    /// Wraps a predictor that nothing else shares yet.
    pub fn with_predictor(predictor: QueuePredictor, store: S) -> Self {
        Self::new(Arc::new(RwLock::new(predictor)), store)
    }

    pub fn predictor(&self) -> SharedPredictor {
        Arc::clone(&self.predictor)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Predicts for `user` and appends the result to their history.
    pub fn predict(&self, user: &UserId, payload: &Value) -> Result<f64, ServiceError> {
        let input = FeatureInput::try_from(payload).map_err(PredictionError::from)?;
        let prediction = self.predictor.read().predict(input)?;

        self.store.record(PredictionRecord::new(
            user.clone(),
            payload.clone(),
            prediction,
        ))?;
        Ok(prediction)
    }

    pub fn history(&self, user: &UserId) -> Result<Vec<PredictionRecord>, ServiceError> {
        Ok(self.store.history(user)?)
    }

    /// Replaces the active strategy with `model`.
    pub fn reload(&self, model: TrainedModel) {
        self.predictor.write().load_model(model);
        info!("prediction service reloaded");
    }
}
