//! Standardization (z-score) statistics.
//!
//! A sample `x` is rescaled per feature as:
//! ```text
//! z = (x - mean) / (std + EPSILON)
//! ```
//! `std` is the population standard deviation (divisor `n`) and is stored
//! without the epsilon; the guard is applied every time data is transformed,
//! so training and inference see exactly the same rescaling.

use crate::error::ModelError;
use crate::features::{FEATURE_NAMES, N_FEATURES};
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Added to every standard deviation before dividing, so constant columns map to ≈0.
pub const EPSILON: f64 = 1e-8;

/// Per-feature mean and standard deviation learned from training data.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardizationStats {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl StandardizationStats {
    /// Computes column means and population standard deviations.
    ///
    /// # Errors
    /// - [`ModelError::EmptyData`] if `x` has no rows
    /// - [`ModelError::FeatureMismatch`] if `x` does not have [`N_FEATURES`] columns
    /// - [`ModelError::NonFinite`] if a column's mean or std overflows
    pub fn fit(x: ArrayView2<'_, f64>) -> Result<Self, ModelError> {
        let (rows, cols) = x.dim();
        if cols != N_FEATURES {
            return Err(ModelError::FeatureMismatch {
                expected: N_FEATURES,
                got: cols,
            });
        }
        if rows == 0 {
            return Err(ModelError::EmptyData(
                "cannot compute statistics of zero rows".to_string(),
            ));
        }
        let mean = x.sum_axis(Axis(0)) / rows as f64;
        let std = x.std_axis(Axis(0), 0.0);
        let overflowed = mean
            .iter()
            .zip(std.iter())
            .position(|(m, s)| !m.is_finite() || !s.is_finite());
        if let Some(col) = overflowed {
            return Err(ModelError::NonFinite(format!(
                "statistics of column `{}` overflow (mean {}, std {})",
                FEATURE_NAMES[col], mean[col], std[col]
            )));
        }
        Ok(Self { mean, std })
    }

    /// Rebuilds statistics from stored vectors.
    ///
    /// # Errors
    /// [`ModelError::MalformedModel`] if either vector has the wrong length,
    /// holds a non-finite value, or a standard deviation is negative.
    pub fn from_parts(mean: Vec<f64>, std: Vec<f64>) -> Result<Self, ModelError> {
        if mean.len() != N_FEATURES || std.len() != N_FEATURES {
            return Err(ModelError::MalformedModel(format!(
                "mean/std must have {} entries, got {}/{}",
                N_FEATURES,
                mean.len(),
                std.len()
            )));
        }
        if mean.iter().chain(std.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::MalformedModel(
                "mean/std contain a non-finite value".to_string(),
            ));
        }
        if std.iter().any(|&s| s < 0.0) {
            return Err(ModelError::MalformedModel(
                "standard deviation cannot be negative".to_string(),
            ));
        }
        Ok(Self {
            mean: Array1::from(mean),
            std: Array1::from(std),
        })
    }

    /// Column means.
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Unguarded population standard deviations.
    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }

    /// Applies `(x - mean) / (std + EPSILON)` row-wise.
    ///
    /// Results are clamped to the finite range, so a huge reading in a
    /// constant column saturates instead of becoming infinite.
    ///
    /// # Errors
    /// [`ModelError::FeatureMismatch`] if `x` has the wrong number of columns.
    pub fn transform(&self, x: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        let cols = x.ncols();
        if cols != self.mean.len() {
            return Err(ModelError::FeatureMismatch {
                expected: self.mean.len(),
                got: cols,
            });
        }
        let denom = self.std.mapv(|s| s + EPSILON);
        let z = (&x - &self.mean) / &denom;
        Ok(z.mapv_into(|v| v.clamp(-f64::MAX, f64::MAX)))
    }

    #[cfg(test)]
    pub(crate) fn from_arrays_unchecked(mean: Array1<f64>, std: Array1<f64>) -> Self {
        Self { mean, std }
    }
}
