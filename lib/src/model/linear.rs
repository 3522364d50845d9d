//! Linear regression with compile-time state tracking.
//!
//! - [`LinearRegression`] = `LinearModel<Unfitted>`: used during training.
//! - `LinearModel<Fitted>`: inference only, `y = wᵀx + b`.
//!
//! The fitted model holds no training hyperparameters; those live in the
//! loss, optimizer and [`Trainer`](crate::trainer::Trainer).

use crate::model::{Fitted, InferenceModel, ParamOps, TrainableModel, Unfitted};
use ndarray::{Array1, Array2};
use std::marker::PhantomData;

/// Trainable parameters of a linear model: weights and bias.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearParams {
    pub weights: Array1<f64>,
    pub bias: f64,
}

impl ParamOps for LinearParams {
    fn add(&self, other: &Self) -> Self {
        Self {
            weights: &self.weights + &other.weights,
            bias: self.bias + other.bias,
        }
    }

    fn scale(&self, scalar: f64) -> Self {
        Self {
            weights: &self.weights * scalar,
            bias: self.bias * scalar,
        }
    }
}

/// A linear model with state encoded at the type level.
///
/// - When `S = Unfitted`: implements [`TrainableModel`].
/// - When `S = Fitted`: implements [`InferenceModel`].
///
/// Calling `predict()` on an untrained model does not compile.
#[derive(Clone, Debug)]
pub struct LinearModel<S> {
    params: LinearParams,
    _state: PhantomData<S>,
}

impl<S> LinearModel<S> {
    /// Number of input features the model expects.
    pub fn n_features(&self) -> usize {
        self.params.weights.len()
    }
}

impl LinearModel<Fitted> {
    /// Creates a fitted model from trained parameters.
    pub fn new(params: LinearParams) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.params.weights
    }

    pub fn bias(&self) -> f64 {
        self.params.bias
    }
}

impl InferenceModel for LinearModel<Fitted> {
    type InputSingle = Array1<f64>;
    type InputBatch = Array2<f64>;
    type OutputSingle = f64;
    type OutputBatch = Array1<f64>;

    fn predict(&self, input: &Self::InputSingle) -> Self::OutputSingle {
        self.params.weights.dot(input) + self.params.bias
    }

    fn predict_batch(&self, input: &Self::InputBatch) -> Self::OutputBatch {
        input.dot(&self.params.weights) + self.params.bias
    }
}

/// Forward pass: `X·w + b`.
/// Backward pass: `∇w = Xᵀ·grad`, `∇b = Σ grad`.
impl TrainableModel for LinearModel<Unfitted> {
    type Params = LinearParams;
    type Gradients = LinearParams;
    type Prediction = Array1<f64>;
    type Input = Array2<f64>;
    type Output = LinearModel<Fitted>;

    fn forward(&self, x: &Self::Input) -> Self::Prediction {
        x.dot(&self.params.weights) + self.params.bias
    }

    fn backward(&self, x: &Self::Input, grad_output: &Self::Prediction) -> Self::Gradients {
        LinearParams {
            weights: x.t().dot(grad_output),
            bias: grad_output.sum(),
        }
    }

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn update_params(&mut self, params: &Self::Params) {
        self.params = params.clone();
    }

    fn into_fitted(self) -> LinearModel<Fitted> {
        LinearModel::<Fitted>::new(self.params)
    }
}

/// Alias for an **unfitted** linear regression model.
pub type LinearRegression = LinearModel<Unfitted>;

impl LinearRegression {
    /// Creates a model with zero-initialized weights.
    pub fn new(n_features: usize) -> Self {
        Self::from_params(LinearParams {
            weights: Array1::zeros(n_features),
            bias: 0.0,
        })
    }

    /// Constructs a model from explicit parameters (warm start, tests).
    pub fn from_params(params: LinearParams) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }
}
