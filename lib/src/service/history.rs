//! Per-user prediction history.

use super::UserId;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("history store unavailable: {0}")]
    Unavailable(String),
}

/// One successful prediction as persisted for its user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub user_id: UserId,
    pub input: Value,
    pub prediction: f64,
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(user_id: UserId, input: Value, prediction: f64) -> Self {
        Self {
            user_id,
            input,
            prediction,
            created_at: Utc::now(),
        }
    }
}

/// Storage backend for prediction history.
pub trait HistoryStore: Send + Sync {
    fn record(&self, record: PredictionRecord) -> Result<(), StoreError>;

    /// Records of `user`, oldest first.
    fn history(&self, user: &UserId) -> Result<Vec<PredictionRecord>, StoreError>;
}

/// Process-local store; contents are lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    records: Mutex<Vec<PredictionRecord>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistoryStore for InMemoryHistory {
    fn record(&self, record: PredictionRecord) -> Result<(), StoreError> {
        self.records.lock().push(record);
        Ok(())
    }

    fn history(&self, user: &UserId) -> Result<Vec<PredictionRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|record| &record.user_id == user)
            .cloned()
            .collect())
    }
}
