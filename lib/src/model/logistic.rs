//! Logistic-regression parameters and the forward/backward passes.
//!
//! Forward pass: `p = σ(Xs · w + b)`
//! Backward pass (cross-entropy w.r.t. parameters, averaged over rows):
//! `∇w = Xsᵀ · (p − y) / n`, `∇b = Σ(p − y) / n`

use ndarray::{Array1, ArrayView1, ArrayView2};

/// Numerically stable logistic function `1 / (1 + e^{-z})`.
///
/// Never overflows: for negative `z` the equivalent `e^z / (1 + e^z)` is used.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}

/// Weights and bias of the linear separator.
#[derive(Clone, Debug, PartialEq)]
pub struct LogisticParams {
    pub weights: Array1<f64>,
    pub bias: f64,
}

impl LogisticParams {
    /// Zero-initialized parameters for `n_features` inputs.
    pub fn zeros(n_features: usize) -> Self {
        Self {
            weights: Array1::zeros(n_features),
            bias: 0.0,
        }
    }

    /// Raw scores `Xs · w + b` for already standardized rows.
    pub fn logits(&self, xs: ArrayView2<'_, f64>) -> Array1<f64> {
        xs.dot(&self.weights) + self.bias
    }

    /// Probabilities `σ(Xs · w + b)` for already standardized rows.
    pub fn forward(&self, xs: ArrayView2<'_, f64>) -> Array1<f64> {
        self.logits(xs).mapv_into(sigmoid)
    }

    /// Mean cross-entropy gradients given the forward-pass probabilities.
    pub fn backward(
        &self,
        xs: ArrayView2<'_, f64>,
        probs: ArrayView1<'_, f64>,
        targets: ArrayView1<'_, f64>,
    ) -> LogisticParams {
        let n = xs.nrows() as f64;
        let residual = &probs - &targets;
        LogisticParams {
            weights: xs.t().dot(&residual) / n,
            bias: residual.sum() / n,
        }
    }
}
