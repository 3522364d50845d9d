//! # queue-predictor
//!
//! Estimates how many people are waiting at a store checkout from six
//! numeric features: time of day, day of week, store traffic, whether it is
//! a peak hour, the average service time and the number of open counters.
//!
//! ## Core Design Principles
//!
//! - **Explicit strategy**: a [`QueuePredictor`] is either running the
//!   deterministic [`heuristic`] or a [`TrainedModel`]; switching is an
//!   explicit [`QueuePredictor::load_model`] / [`QueuePredictor::train`].
//! - **Fit once, reuse**: the feature scaler is fitted on training data and
//!   applied unchanged to every request.
//! - **Stateful type safety**: regression models carry their training state
//!   in the type (`Unfitted` vs `Fitted`), so only fitted models predict.
//! - **Bounded output**: every prediction lies in `0.0..=100.0`.
//!
//! ## Quick Start
//!
//! ```rust
//! use queue_predictor::{QueuePredictor, TrainingConfig, TrainingSet};
//!
//! let mut predictor = QueuePredictor::new();
//! let features = [12.0, 3.0, 50.0, 0.0, 2.0, 3.0];
//! assert_eq!(predictor.predict(&features[..]).unwrap(), 33.0);
//!
//! let x: Vec<Vec<f64>> = (0..20)
//!     .map(|i| vec![(i % 24) as f64, (i % 7) as f64, i as f64 * 5.0, (i % 2) as f64, 2.0, 3.0])
//!     .collect();
//! let y: Vec<f64> = x.iter().map(|row| row[2] * 0.2).collect();
//! predictor
//!     .train(&TrainingSet::new(x, y).unwrap(), &TrainingConfig::default())
//!     .unwrap();
//! assert!(predictor.is_trained());
//! ```
//!
//! ## Module Structure
//!
//! - `features` — feature names, [`FeatureVector`] and input validation
//! - `heuristic` — the untrained formula and its defaults
//! - `predictor` — [`QueuePredictor`] and clamping
//! - `pipeline` — fitted scaler plus fitted regression model
//! - `preprocessing` — `StandardScaler` and the transformer traits
//! - `model`, `loss`, `optimizer`, `trainer` — linear regression by SGD
//! - `dataset` — training data and batching
//! - `service` — per-user prediction history around a shared predictor
//! - `config`, `logging` — runtime configuration and tracing setup

/// Runtime configuration loaded from files and the environment.
pub mod config;

/// Training data loading and batching.
pub mod dataset;

pub mod error;

/// Feature schema and input validation.
pub mod features;

pub mod heuristic;

pub mod logging;

/// Differentiable loss functions for model training.
pub mod loss;

/// Regression models with compile-time state safety.
pub mod model;

/// Optimization algorithms for parameter updates.
pub mod optimizer;

pub mod pipeline;

pub mod predictor;

/// Data preprocessing transformers.
pub mod preprocessing;

pub mod service;

/// High-level training loop orchestration.
pub mod trainer;

pub use config::{PredictorConfig, TrainingConfig, ValidationPolicy};
pub use dataset::{Observation, TrainingSet};
pub use error::{PredictionError, ValidationError};
pub use features::{FeatureInput, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use pipeline::TrainedModel;
pub use predictor::{QueuePredictor, Strategy, MAX_PREDICTION, MIN_PREDICTION};
pub use service::{InMemoryHistory, PredictionService, ServiceError, UserId};
pub use trainer::TrainingError;
