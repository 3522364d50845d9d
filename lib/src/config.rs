//! Runtime configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. an optional TOML/JSON/YAML file
//! 3. environment variables prefixed with `QUEUE_PREDICTOR`, with `__`
//!    separating nested keys (`QUEUE_PREDICTOR__TRAINING__MAX_EPOCHS=200`)

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "QUEUE_PREDICTOR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Source(#[from] ::config::ConfigError),
    #[error("invalid training parameter: {0}")]
    InvalidTraining(String),
}

/// How strictly prediction input is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Every feature must be present and numeric.
    #[default]
    Strict,
    /// While no model is trained, absent keys take the heuristic defaults.
    /// Present but non-numeric values are still rejected.
    FillDefaults,
}

/// Hyperparameters for fitting the regression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub max_epochs: usize,
    pub batch_size: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            max_epochs: 500,
            batch_size: 32,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidTraining(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.max_epochs == 0 {
            return Err(ConfigError::InvalidTraining(
                "max_epochs must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidTraining(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub validation: ValidationPolicy,
    pub training: TrainingConfig,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::default(),
            training: TrainingConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl PredictorConfig {
    /// Loads defaults, then `path` if given, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.training.validate()?;
        Ok(config)
    }
}
