use ndarray::Array1;

/// A differentiable loss function used during model training.
///
/// Implementors define the scalar loss value (for logging) and the gradient
/// of the loss w.r.t. the model's predictions, which is fed to the model's
/// `backward()`.
pub trait Loss {
    type Prediction;
    type Target;

    /// Computes the scalar loss value (for logging/metrics).
    fn loss(&self, prediction: &Self::Prediction, target: &Self::Target) -> f64;

    /// Computes the gradient of the loss w.r.t. the prediction: ∂L/∂pred.
    fn grad_wrt_prediction(
        &self,
        prediction: &Self::Prediction,
        target: &Self::Target,
    ) -> Self::Prediction;
}

/// Mean Squared Error (MSE) loss: `L = (1/n) * Σ(pred_i - target_i)^2`
///
/// Gradient w.r.t. prediction: `∂L/∂pred = (pred - target) / n`
///
/// Note: The factor of 2 is omitted, as it can be absorbed into the learning rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MSELoss;

impl Loss for MSELoss {
    type Prediction = Array1<f64>;
    type Target = Array1<f64>;

    fn loss(&self, pred: &Self::Prediction, target: &Self::Target) -> f64 {
        let diff = pred - target;
        diff.dot(&diff) / pred.len() as f64
    }

    fn grad_wrt_prediction(&self, pred: &Self::Prediction, target: &Self::Target) -> Array1<f64> {
        (pred - target) / pred.len() as f64
    }
}
