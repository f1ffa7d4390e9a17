//! Parameter update rules.
//!
//! Training logic lives in [`crate::model::MaintenanceModel::fit`]; the update
//! step is kept separate so the loop reads as forward → backward → step.

use crate::error::ModelError;
use crate::model::logistic::LogisticParams;

/// A gradient-based parameter update.
pub trait Optimizer<P> {
    /// Returns the updated parameters; inputs are left untouched.
    fn step(&self, params: &P, gradients: &P) -> P;
}

/// Plain gradient descent: `θ ← θ − η · ∇L(θ)`.
///
/// No momentum and no adaptive rates; every step is fully determined by the
/// current parameters and gradients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sgd {
    lr: f64,
}

impl Sgd {
    /// Creates an optimizer with learning rate `lr`.
    ///
    /// # Errors
    /// [`ModelError::InvalidParameter`] unless `lr` is finite and strictly positive.
    pub fn new(lr: f64) -> Result<Self, ModelError> {
        if !lr.is_finite() || lr <= 0.0 {
            return Err(ModelError::InvalidParameter(format!(
                "learning rate must be finite and > 0, got {}",
                lr
            )));
        }
        Ok(Self { lr })
    }

    pub fn learning_rate(&self) -> f64 {
        self.lr
    }
}

impl Optimizer<LogisticParams> for Sgd {
    fn step(&self, params: &LogisticParams, grads: &LogisticParams) -> LogisticParams {
        LogisticParams {
            weights: &params.weights - &(&grads.weights * self.lr),
            bias: params.bias - self.lr * grads.bias,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sgd_step() {
        let sgd = Sgd::new(0.1).unwrap();
        let params = LogisticParams {
            weights: array![1.0, 2.0],
            bias: 0.5,
        };
        let grads = LogisticParams {
            weights: array![1.0, -2.0],
            bias: 0.5,
        };

        let updated = sgd.step(&params, &grads);

        assert!((updated.weights[0] - 0.9).abs() < 1e-12);
        assert!((updated.weights[1] - 2.2).abs() < 1e-12);
        assert!((updated.bias - 0.45).abs() < 1e-12);
        // inputs untouched
        assert_eq!(params.weights, array![1.0, 2.0]);
    }

    #[test]
    fn test_sgd_rejects_bad_learning_rate() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Sgd::new(lr),
                Err(ModelError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_learning_rate_accessor() {
        assert_eq!(Sgd::new(0.01).unwrap().learning_rate(), 0.01);
    }
}
