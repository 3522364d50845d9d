use crate::model::ParamOps;

/// Trait for gradient-based optimizers.
///
/// The trainer computes gradients; the optimizer only turns parameters and
/// gradients into new parameters. Any model can be paired with any optimizer
/// whose parameter type matches.
pub trait Optimizer<P> {
    /// Performs an optimization step and returns the updated parameters.
    ///
    /// Inputs are not mutated.
    fn step(&self, params: &P, gradients: &P) -> P;
}

/// Stochastic Gradient Descent (SGD) optimizer.
///
/// ```text
/// θ ← θ - η · ∇L(θ)
/// ```
/// where `η` is the learning rate. Stateless: no momentum, no adaptive rates.
///
/// # Example
/// ```rust
/// use queue_predictor::optimizer::SGD;
///
/// let optimizer = SGD::new(0.01);
/// assert_eq!(optimizer.learning_rate(), 0.01);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SGD {
    lr: f64,
}

impl SGD {
    /// Creates a new SGD optimizer with the specified learning rate.
    pub fn new(lr: f64) -> Self {
        Self { lr }
    }

    /// Returns the current learning rate.
    pub fn learning_rate(&self) -> f64 {
        self.lr
    }
}

impl<P: ParamOps> Optimizer<P> for SGD {
    fn step(&self, params: &P, grads: &P) -> P {
        // params + (-lr) * grads
        params.add(&grads.scale(-self.lr))
    }
}
