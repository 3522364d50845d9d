//! Fitted scaler plus fitted regression model.
//!
//! The scaler is fitted once on the training rows and reused for every
//! request; inference never refits it.

use crate::config::TrainingConfig;
use crate::dataset::TrainingSet;
use crate::features::{FeatureVector, FEATURE_COUNT};
use crate::loss::MSELoss;
use crate::model::{Fitted, InferenceModel, LinearModel, LinearRegression};
use crate::optimizer::SGD;
use crate::preprocessing::{
    FittedStandardScaler, FittedTransformer, PreprocessingError, StandardScaler, Transformer,
};
use crate::trainer::{Trainer, TrainingError};
use ndarray::Array1;
use tracing::info;

/// A trained queue model ready for inference.
#[derive(Clone, Debug)]
pub struct TrainedModel {
    scaler: FittedStandardScaler,
    model: LinearModel<Fitted>,
}

impl TrainedModel {
    /// Pairs an already fitted scaler with a model trained on its output.
    ///
    /// # Errors
    /// [`PreprocessingError::FeatureMismatch`] unless both expect exactly
    /// [`FEATURE_COUNT`] features.
    pub fn new(
        scaler: FittedStandardScaler,
        model: LinearModel<Fitted>,
    ) -> Result<Self, PreprocessingError> {
        for got in [scaler.n_features_in(), model.n_features()] {
            if got != FEATURE_COUNT {
                return Err(PreprocessingError::FeatureMismatch {
                    expected_features: FEATURE_COUNT,
                    got_features: got,
                });
            }
        }
        Ok(Self { scaler, model })
    }

    /// Fits the scaler on all rows, then trains linear regression on the
    /// standardized rows.
    pub fn fit(data: &TrainingSet, config: &TrainingConfig) -> Result<Self, TrainingError> {
        config.validate()?;
        if data.n_features() != FEATURE_COUNT {
            return Err(TrainingError::FeatureMismatch {
                expected: FEATURE_COUNT,
                got: data.n_features(),
            });
        }

        let scaler = StandardScaler::new().fit(data.features())?;
        let scaled = data.with_features(scaler.transform(data.features())?);

        let trainer = Trainer::builder(MSELoss, SGD::new(config.learning_rate))
            .batch_size(config.batch_size)
            .max_epochs(config.max_epochs)
            .build();
        let model = trainer.fit(LinearRegression::new(FEATURE_COUNT), &scaled)?;

        info!(
            samples = data.features().nrows(),
            epochs = config.max_epochs,
            "queue model trained"
        );
        Ok(Self::new(scaler, model)?)
    }

    pub fn scaler(&self) -> &FittedStandardScaler {
        &self.scaler
    }

    pub fn model(&self) -> &LinearModel<Fitted> {
        &self.model
    }

    /// Standardizes one row with the training statistics.
    pub fn normalize(&self, features: &FeatureVector) -> Result<Array1<f64>, PreprocessingError> {
        let scaled = self.scaler.transform(&features.to_row())?;
        Ok(scaled.row(0).to_owned())
    }

    /// Unclamped regression output for one row.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, PreprocessingError> {
        let normalized = self.normalize(features)?;
        Ok(self.model.predict(&normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearParams;
    use ndarray::{array, Array2};

    fn synthetic_set() -> TrainingSet {
        // queue = 2 + 0.5*traffic - 3*counters, other columns vary as noise-free inputs
        let mut x = Vec::new();
        let mut y = Vec::new();
        for traffic in 0..10 {
            for counters in 1..5 {
                let row = vec![
                    (traffic % 24) as f64,
                    (counters % 7) as f64,
                    traffic as f64 * 10.0,
                    (traffic % 2) as f64,
                    2.0,
                    counters as f64,
                ];
                y.push(2.0 + 0.05 * row[2] - 3.0 * row[5]);
                x.push(row);
            }
        }
        TrainingSet::new(x, y).unwrap()
    }

    #[test]
    fn test_fit_recovers_linear_relationship() {
        let config = TrainingConfig {
            learning_rate: 0.1,
            max_epochs: 2000,
            batch_size: 40,
        };
        let trained = TrainedModel::fit(&synthetic_set(), &config).unwrap();

        let probe = FeatureVector::from_array([3.0, 2.0, 30.0, 1.0, 2.0, 2.0]);
        let expected = 2.0 + 0.05 * 30.0 - 3.0 * 2.0;
        let got = trained.predict(&probe).unwrap();
        assert!((got - expected).abs() < 0.1, "expected {}, got {}", expected, got);
    }

    #[test]
    fn test_scaler_is_fitted_on_training_rows() {
        let set = synthetic_set();
        let trained = TrainedModel::fit(&set, &TrainingConfig::default()).unwrap();
        let mean_traffic = set.features().column(2).mean().unwrap();
        assert!((trained.scaler().mean()[2] - mean_traffic).abs() < 1e-12);
        // Constant column keeps unit divisor.
        assert_eq!(trained.scaler().std()[4], 1.0);
    }

    #[test]
    fn test_fit_rejects_wrong_width() {
        let set = TrainingSet::new(vec![vec![1.0, 2.0]], vec![1.0]).unwrap();
        assert!(matches!(
            TrainedModel::fit(&set, &TrainingConfig::default()),
            Err(TrainingError::FeatureMismatch {
                expected: 6,
                got: 2
            })
        ));
    }

    #[test]
    fn test_fit_rejects_invalid_config() {
        let config = TrainingConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            TrainedModel::fit(&synthetic_set(), &config),
            Err(TrainingError::Config(_))
        ));
    }

    #[test]
    fn test_new_rejects_mismatched_parts() {
        let scaler = StandardScaler::new()
            .fit(&Array2::<f64>::ones((2, FEATURE_COUNT)))
            .unwrap();
        let model = LinearModel::<Fitted>::new(LinearParams {
            weights: array![1.0, 2.0],
            bias: 0.0,
        });
        assert!(TrainedModel::new(scaler, model).is_err());
    }

    #[test]
    fn test_normalize_uses_fixed_statistics() {
        let rows = Array2::from_shape_fn((4, FEATURE_COUNT), |(i, j)| (i * (j + 1)) as f64);
        let scaler = StandardScaler::new().fit(&rows).unwrap();
        let model = LinearModel::<Fitted>::new(LinearParams {
            weights: Array1::ones(FEATURE_COUNT),
            bias: 0.0,
        });
        let trained = TrainedModel::new(scaler, model).unwrap();

        let row = FeatureVector::from_array([5.0; FEATURE_COUNT]);
        let first = trained.normalize(&row).unwrap();
        let second = trained.normalize(&row).unwrap();
        assert_eq!(first, second);
        assert!(first.iter().any(|&v| v != 0.0));
    }
}
