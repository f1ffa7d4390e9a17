//! Binary classification metrics.

use crate::error::ModelError;
use crate::loss::binary_cross_entropy;
use ndarray::ArrayView1;
use serde::Serialize;
use std::fmt;

/// Summary of probabilistic predictions against binary labels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Mean cross-entropy with probabilities clamped to `[1e-15, 1 - 1e-15]`.
    pub log_loss: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ClassificationMetrics {
    /// Scores `probabilities` against `labels`, predicting positive when
    /// `p >= threshold`.
    ///
    /// Ratios whose denominator is zero are reported as `0.0`.
    ///
    /// # Errors
    /// - [`ModelError::LengthMismatch`] if the inputs differ in length
    /// - [`ModelError::EmptyData`] if they are empty
    /// - [`ModelError::InvalidLabel`] for a label outside {0, 1}
    pub fn compute(
        probabilities: ArrayView1<'_, f64>,
        labels: ArrayView1<'_, f64>,
        threshold: f64,
    ) -> Result<Self, ModelError> {
        if probabilities.len() != labels.len() {
            return Err(ModelError::LengthMismatch {
                features: probabilities.len(),
                labels: labels.len(),
            });
        }
        if labels.is_empty() {
            return Err(ModelError::EmptyData(
                "no predictions to score".to_string(),
            ));
        }

        let (mut tp, mut fp, mut tn, mut fn_) = (0usize, 0usize, 0usize, 0usize);
        for (index, (&p, &t)) in probabilities.iter().zip(labels.iter()).enumerate() {
            let actual = match t {
                t if t == 1.0 => true,
                t if t == 0.0 => false,
                value => return Err(ModelError::InvalidLabel { index, value }),
            };
            match (p >= threshold, actual) {
                (true, true) => tp += 1,
                (true, false) => fp += 1,
                (false, false) => tn += 1,
                (false, true) => fn_ += 1,
            }
        }

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Ok(Self {
            accuracy: ratio(tp + tn, labels.len()),
            precision,
            recall,
            f1,
            log_loss: binary_cross_entropy(probabilities, labels),
            true_positives: tp,
            false_positives: fp,
            true_negatives: tn,
            false_negatives: fn_,
        })
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for ClassificationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accuracy={:.4} precision={:.4} recall={:.4} f1={:.4} log_loss={:.4} \
             [tp={} fp={} tn={} fn={}]",
            self.accuracy,
            self.precision,
            self.recall,
            self.f1,
            self.log_loss,
            self.true_positives,
            self.false_positives,
            self.true_negatives,
            self.false_negatives
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mixed_predictions() {
        let probs = array![0.9, 0.8, 0.3, 0.1, 0.6];
        let labels = array![1.0, 0.0, 1.0, 0.0, 1.0];
        let m = ClassificationMetrics::compute(probs.view(), labels.view(), 0.5).unwrap();

        assert_eq!(m.true_positives, 2);
        assert_eq!(m.false_positives, 1);
        assert_eq!(m.true_negatives, 1);
        assert_eq!(m.false_negatives, 1);
        assert!((m.accuracy - 0.6).abs() < 1e-12);
        assert!((m.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.f1 - 2.0 / 3.0).abs() < 1e-12);
        assert!(m.log_loss > 0.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let probs = array![0.5];
        let labels = array![1.0];
        let m = ClassificationMetrics::compute(probs.view(), labels.view(), 0.5).unwrap();
        assert_eq!(m.true_positives, 1);
    }

    #[test]
    fn test_no_positive_predictions_gives_zero_ratios() {
        let probs = array![0.1, 0.2];
        let labels = array![0.0, 0.0];
        let m = ClassificationMetrics::compute(probs.view(), labels.view(), 0.5).unwrap();

        assert_eq!(m.accuracy, 1.0);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
    }

    #[test]
    fn test_saturated_probabilities_keep_log_loss_finite() {
        let probs = array![0.0, 1.0];
        let labels = array![1.0, 0.0];
        let m = ClassificationMetrics::compute(probs.view(), labels.view(), 0.5).unwrap();
        assert!(m.log_loss.is_finite());
        assert_eq!(m.accuracy, 0.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        let probs = array![0.5, 0.5];
        assert!(matches!(
            ClassificationMetrics::compute(probs.view(), array![1.0].view(), 0.5),
            Err(ModelError::LengthMismatch { .. })
        ));
        assert!(matches!(
            ClassificationMetrics::compute(probs.view(), array![1.0, 0.5].view(), 0.5),
            Err(ModelError::InvalidLabel { index: 1, .. })
        ));
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert!(matches!(
            ClassificationMetrics::compute(empty.view(), empty.view(), 0.5),
            Err(ModelError::EmptyData(_))
        ));
    }
}
