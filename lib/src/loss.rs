//! Binary cross-entropy, used to monitor training progress.
//!
//! The update rule in [`crate::model::logistic::LogisticParams::backward`] is the
//! gradient of this loss; the value itself is only reported, never used to stop
//! training early.

use ndarray::ArrayView1;

/// Probabilities are clamped to `[PROB_CLAMP, 1 - PROB_CLAMP]` before taking logs.
pub const PROB_CLAMP: f64 = 1e-15;

/// Mean binary cross-entropy: `L = -(1/n) Σ [t·ln p + (1−t)·ln(1−p)]`.
///
/// Returns `0.0` for empty input.
pub fn binary_cross_entropy(probs: ArrayView1<'_, f64>, targets: ArrayView1<'_, f64>) -> f64 {
    let n = probs.len();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = probs
        .iter()
        .zip(targets.iter())
        .map(|(&p, &t)| {
            let p = p.clamp(PROB_CLAMP, 1.0 - PROB_CLAMP);
            -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
        })
        .sum();
    total / n as f64
}
