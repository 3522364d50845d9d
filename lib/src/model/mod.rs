//! Regression models with the training state carried in the type.

pub mod linear;
pub mod state;

pub use linear::{LinearModel, LinearParams, LinearRegression};
pub use state::{Fitted, Unfitted};

/// Training-time interface: forward pass, gradients, parameter updates.
pub trait TrainableModel {
    type Input;
    type Prediction;
    type Params;
    type Gradients;
    type Output;

    fn forward(&self, input: &Self::Input) -> Self::Prediction;
    fn backward(&self, input: &Self::Input, grad_output: &Self::Prediction) -> Self::Gradients;
    fn params(&self) -> &Self::Params;
    fn update_params(&mut self, new_params: &Self::Params);

    /// Drops training capabilities and returns the inference model.
    fn into_fitted(self) -> Self::Output;
}

/// Arithmetic the optimizer needs on a parameter set.
pub trait ParamOps: Clone {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, scalar: f64) -> Self;
}

/// Inference-only interface of a trained model.
pub trait InferenceModel {
    type InputSingle;
    type OutputSingle;
    type InputBatch;
    type OutputBatch;

    fn predict(&self, input: &Self::InputSingle) -> Self::OutputSingle;
    fn predict_batch(&self, input: &Self::InputBatch) -> Self::OutputBatch;
}
