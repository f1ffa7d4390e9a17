//! Labeled training data.
//!
//! A [`Dataset`] is a validated, in-memory set of `(FeatureVector, label)`
//! pairs with `label ∈ {0, 1}`. It exists only for training and evaluation;
//! the fitted model keeps none of it.
//!
//! # Example
//!
//! ```rust
//! use maintenance_model::dataset::Dataset;
//!
//! let ds = Dataset::new(
//!     vec![[90.0, 5.0, 100.0, 1500.0], [40.0, 1.0, 100.0, 1500.0]],
//!     vec![1, 0],
//! ).unwrap();
//! assert_eq!(ds.len(), 2);
//! assert_eq!(ds.features().dim(), (2, 4));
//! ```

pub mod synthetic;

pub use synthetic::{LabelRule, SyntheticConfig};

use crate::error::ModelError;
use crate::features::{rows_to_matrix, FeatureVector};
use ndarray::{Array1, Array2};

/// In-memory labeled sensor data.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    x: Vec<FeatureVector>,
    y: Vec<u8>,
}

impl Dataset {
    /// Builds a dataset, checking it is non-empty, aligned and binary-labeled.
    ///
    /// # Errors
    /// - [`ModelError::EmptyData`] when there are no samples
    /// - [`ModelError::LengthMismatch`] when `x` and `y` differ in length
    /// - [`ModelError::InvalidLabel`] when a label is not 0 or 1
    pub fn new(x: Vec<FeatureVector>, y: Vec<u8>) -> Result<Self, ModelError> {
        if x.len() != y.len() {
            return Err(ModelError::LengthMismatch {
                features: x.len(),
                labels: y.len(),
            });
        }
        if x.is_empty() {
            return Err(ModelError::EmptyData("dataset has no samples".to_string()));
        }
        if let Some((index, &label)) = y.iter().enumerate().find(|&(_, &l)| l > 1) {
            return Err(ModelError::InvalidLabel {
                index,
                value: f64::from(label),
            });
        }
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True when there are no samples; never the case after [`Dataset::new`].
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Raw feature rows.
    pub fn rows(&self) -> &[FeatureVector] {
        &self.x
    }

    /// Labels in row order.
    pub fn labels(&self) -> &[u8] {
        &self.y
    }

    /// Feature matrix `n × 4`.
    pub fn features(&self) -> Array2<f64> {
        rows_to_matrix(&self.x)
    }

    /// Labels as `0.0`/`1.0` floats, ready for [`crate::MaintenanceModel::fit`].
    pub fn targets(&self) -> Array1<f64> {
        self.y.iter().map(|&l| f64::from(l)).collect()
    }

    /// Fraction of samples labeled 1.
    pub fn positive_rate(&self) -> f64 {
        let positives = self.y.iter().filter(|&&l| l == 1).count();
        positives as f64 / self.len() as f64
    }

    /// Splits off the trailing `fraction` of samples as a holdout set.
    ///
    /// Order is preserved, so the split is deterministic. Returns
    /// `(train, holdout)`; `holdout` is `None` when `fraction` rounds to zero
    /// samples.
    ///
    /// # Errors
    /// [`ModelError::InvalidParameter`] unless `0 <= fraction < 1`, or when the
    /// split would leave no training samples.
    pub fn split_holdout(&self, fraction: f64) -> Result<(Dataset, Option<Dataset>), ModelError> {
        if !(0.0..1.0).contains(&fraction) {
            return Err(ModelError::InvalidParameter(format!(
                "holdout fraction must be in [0, 1), got {}",
                fraction
            )));
        }
        let n_holdout = (self.len() as f64 * fraction).floor() as usize;
        if n_holdout == 0 {
            return Ok((self.clone(), None));
        }
        let n_train = self.len() - n_holdout;
        if n_train == 0 {
            return Err(ModelError::InvalidParameter(
                "holdout leaves no training samples".to_string(),
            ));
        }
        let train = Dataset {
            x: self.x[..n_train].to_vec(),
            y: self.y[..n_train].to_vec(),
        };
        let holdout = Dataset {
            x: self.x[n_train..].to_vec(),
            y: self.y[n_train..].to_vec(),
        };
        Ok((train, Some(holdout)))
    }
}
