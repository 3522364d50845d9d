use crate::{
    dataset::Dataset,
    loss::Loss,
    model::{ParamOps, TrainableModel},
    optimizer::Optimizer,
};
use ndarray::{Array1, Array2};
use thiserror::Error;
use tracing::{debug, trace};

/// Failure of a training run.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("dataset is empty")]
    EmptyDataset,
    #[error("dataset length unknown")]
    UnknownLength,
    #[error("data error: {0}")]
    Data(String),
    #[error("loss diverged at epoch {epoch}")]
    Diverged { epoch: usize },
    #[error("expected {expected} features, dataset has {got}")]
    FeatureMismatch { expected: usize, got: usize },
    #[error(transparent)]
    Preprocessing(#[from] crate::preprocessing::PreprocessingError),
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Orchestrates the training loop for a [`TrainableModel`].
///
/// Combines a loss function and an optimizer. Once built via
/// [`TrainerBuilder`] it is immutable and can be reused across models.
/// [`fit`](Self::fit) returns the model's fitted form, which carries only
/// inference logic.
#[derive(Debug, Clone)]
pub struct Trainer<L, O> {
    pub(crate) batch_size: usize,
    pub(crate) max_epochs: usize,
    loss_fn: L,
    optimizer: O,
}

/// Fluent builder for constructing a [`Trainer`].
///
/// Defaults:
/// - `batch_size`: 32
/// - `max_epochs`: 1000
#[derive(Debug, Clone)]
pub struct TrainerBuilder<L, O> {
    batch_size: usize,
    max_epochs: usize,
    loss_fn: L,
    optimizer: O,
}

impl<L, O> TrainerBuilder<L, O> {
    pub fn new(loss_fn: L, optimizer: O) -> Self {
        Self {
            batch_size: 32,
            max_epochs: 1000,
            loss_fn,
            optimizer,
        }
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn max_epochs(mut self, epochs: usize) -> Self {
        self.max_epochs = epochs;
        self
    }

    pub fn build(self) -> Trainer<L, O> {
        Trainer {
            batch_size: self.batch_size,
            max_epochs: self.max_epochs,
            loss_fn: self.loss_fn,
            optimizer: self.optimizer,
        }
    }
}

impl<L, O> Trainer<L, O> {
    /// Starts the builder pattern. Equivalent to `TrainerBuilder::new(...)`.
    pub fn builder(loss_fn: L, optimizer: O) -> TrainerBuilder<L, O> {
        TrainerBuilder::new(loss_fn, optimizer)
    }

    /// Trains the model on the provided dataset for `max_epochs`.
    ///
    /// Loss is averaged over the dataset per epoch and logged at `trace`
    /// level; the final epoch's loss is logged at `debug`.
    ///
    /// # Errors
    /// - The dataset is empty or its length is unknown
    /// - A batch fails to load
    /// - The loss becomes NaN or infinite
    pub fn fit<M, P, D>(&self, mut model: M, dataset: &D) -> Result<M::Output, TrainingError>
    where
        L: Loss<Prediction = Array1<f64>, Target = Array1<f64>>,
        M: TrainableModel<Input = Array2<f64>, Prediction = Array1<f64>, Params = P, Gradients = P>,
        O: Optimizer<P>,
        P: ParamOps,
        D: Dataset,
    {
        let n_total = dataset.len().ok_or(TrainingError::UnknownLength)?;
        if n_total == 0 {
            return Err(TrainingError::EmptyDataset);
        }

        let mut avg_loss = f64::NAN;
        for epoch in 0..self.max_epochs {
            let mut total_loss = 0.0;
            for batch_result in dataset.batches(self.batch_size) {
                let (batch_x, batch_y) =
                    batch_result.map_err(|e| TrainingError::Data(e.to_string()))?;
                let preds = model.forward(&batch_x);
                total_loss += self.loss_fn.loss(&preds, &batch_y) * batch_y.len() as f64;
                let grad_preds = self.loss_fn.grad_wrt_prediction(&preds, &batch_y);
                let grads = model.backward(&batch_x, &grad_preds);
                let new_params = self.optimizer.step(model.params(), &grads);
                model.update_params(&new_params);
            }

            avg_loss = total_loss / n_total as f64;
            if !avg_loss.is_finite() {
                return Err(TrainingError::Diverged { epoch });
            }
            trace!(epoch, loss = avg_loss, "epoch finished");
        }
        debug!(epochs = self.max_epochs, loss = avg_loss, "training finished");

        Ok(model.into_fitted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dataset::TrainingSet,
        loss::MSELoss,
        model::{InferenceModel, LinearRegression},
        optimizer::SGD,
    };
    use ndarray::array;

    // === TrainerBuilder Tests ===

    #[test]
    fn test_trainer_builder_default_values() {
        let trainer = Trainer::builder(MSELoss, SGD::new(0.01)).build();
        assert_eq!(trainer.batch_size, 32);
        assert_eq!(trainer.max_epochs, 1000);
    }

    #[test]
    fn test_trainer_builder_custom_values() {
        let trainer = TrainerBuilder::new(MSELoss, SGD::new(0.01))
            .batch_size(64)
            .max_epochs(500)
            .build();
        assert_eq!(trainer.batch_size, 64);
        assert_eq!(trainer.max_epochs, 500);
    }

    // === Fit Tests ===

    #[test]
    fn test_fit_learns_line_with_bias() {
        // y = 2*x + 1
        let dataset = TrainingSet::new(
            vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]],
            vec![1.0, 3.0, 5.0, 7.0],
        )
        .unwrap();

        let trainer = Trainer::builder(MSELoss, SGD::new(0.1))
            .batch_size(4)
            .max_epochs(3000)
            .build();
        let fitted = trainer.fit(LinearRegression::new(1), &dataset).unwrap();

        assert!((fitted.predict(&array![0.0]) - 1.0).abs() < 0.05);
        assert!((fitted.predict(&array![3.0]) - 7.0).abs() < 0.05);
    }

    #[test]
    fn test_fit_divergence_is_reported() {
        let dataset = TrainingSet::new(
            vec![vec![1000.0], vec![-1000.0], vec![500.0]],
            vec![1.0, -1.0, 0.5],
        )
        .unwrap();

        let trainer = Trainer::builder(MSELoss, SGD::new(100.0))
            .batch_size(3)
            .max_epochs(1000)
            .build();
        let result = trainer.fit(LinearRegression::new(1), &dataset);

        assert!(matches!(result, Err(TrainingError::Diverged { .. })));
    }

    #[test]
    fn test_fit_zero_epochs_returns_initial_model() {
        let dataset = TrainingSet::new(vec![vec![1.0]], vec![5.0]).unwrap();
        let trainer = Trainer::builder(MSELoss, SGD::new(0.1))
            .max_epochs(0)
            .build();
        let fitted = trainer.fit(LinearRegression::new(1), &dataset).unwrap();
        assert_eq!(fitted.predict(&array![1.0]), 0.0);
    }
}
