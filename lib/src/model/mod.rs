//! The failure-probability model.
//!
//! [`MaintenanceModel`] is a plain stateful value: it is either untrained or
//! holds exactly one [`StandardizationStats`] and one [`LogisticParams`].
//! `fit` and `load` replace both at once; `predict_proba` refuses to run
//! before either has succeeded.
//!
//! The model does no locking of its own. A service sharing one instance
//! across threads wraps it in an `RwLock` and takes the write side for
//! `fit`/`load`.

pub mod logistic;

pub use logistic::{sigmoid, LogisticParams};

use crate::error::ModelError;
use crate::features::{rows_to_matrix, FeatureVector, SensorReading, N_FEATURES};
use crate::loss::binary_cross_entropy;
use crate::optimizer::{Optimizer, Sgd};
use crate::preprocessing::StandardizationStats;
use crate::serialization::{ModelFile, SerializableParams};
use ndarray::{Array1, Array2, ArrayView2};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Loss reported after one full-batch iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochStats {
    /// Zero-based epoch index.
    pub epoch: usize,
    /// Mean cross-entropy of the parameters *before* this epoch's update.
    pub loss: f64,
}

#[derive(Clone, Debug, PartialEq)]
struct Trained {
    stats: StandardizationStats,
    params: LogisticParams,
}

/// Logistic-regression failure predictor over standardized sensor features.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaintenanceModel {
    state: Option<Trained>,
}

impl MaintenanceModel {
    /// Creates an untrained model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a model from a file written by [`Self::save`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let mut model = Self::new();
        model.load(path)?;
        Ok(model)
    }

    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    /// Learned weights and bias, if trained.
    pub fn params(&self) -> Option<&LogisticParams> {
        self.state.as_ref().map(|s| &s.params)
    }

    /// Standardization statistics, if trained.
    pub fn stats(&self) -> Option<&StandardizationStats> {
        self.state.as_ref().map(|s| &s.stats)
    }

    /// Fits the model with full-batch gradient descent.
    ///
    /// Computes standardization statistics from `x`, then runs exactly
    /// `epochs` iterations from zero-initialized parameters. Identical inputs
    /// always produce identical parameters.
    ///
    /// # Errors
    /// Usage errors ([`ModelError::EmptyData`], [`ModelError::FeatureMismatch`],
    /// [`ModelError::LengthMismatch`], [`ModelError::InvalidLabel`],
    /// [`ModelError::InvalidParameter`], [`ModelError::NonFinite`]). On error the
    /// previous state of the model is left untouched.
    pub fn fit(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        epochs: usize,
        learning_rate: f64,
    ) -> Result<(), ModelError> {
        self.fit_impl(x, y, epochs, learning_rate, None)
    }

    /// Same as [`Self::fit`], calling `observer` after every epoch with the
    /// current training loss.
    pub fn fit_with_observer<F>(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        epochs: usize,
        learning_rate: f64,
        mut observer: F,
    ) -> Result<(), ModelError>
    where
        F: FnMut(EpochStats),
    {
        self.fit_impl(x, y, epochs, learning_rate, Some(&mut observer))
    }

    fn fit_impl(
        &mut self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        epochs: usize,
        learning_rate: f64,
        mut observer: Option<&mut dyn FnMut(EpochStats)>,
    ) -> Result<(), ModelError> {
        validate_training_input(x, y)?;
        if epochs == 0 {
            return Err(ModelError::InvalidParameter(
                "epochs must be at least 1".to_string(),
            ));
        }
        let optimizer = Sgd::new(learning_rate)?;

        let n_samples = x.nrows();
        debug!(
            n_samples,
            epochs,
            learning_rate = optimizer.learning_rate(),
            "fitting maintenance model"
        );

        let stats = StandardizationStats::fit(x.view())?;
        let xs = stats.transform(x.view())?;
        let mut params = LogisticParams::zeros(N_FEATURES);

        for epoch in 0..epochs {
            let probs = params.forward(xs.view());
            if let Some(observe) = observer.as_deref_mut() {
                let loss = binary_cross_entropy(probs.view(), y.view());
                observe(EpochStats { epoch, loss });
            }
            let grads = params.backward(xs.view(), probs.view(), y.view());
            params = optimizer.step(&params, &grads);
        }

        debug!(weights = ?params.weights.to_vec(), bias = params.bias, "fit complete");
        self.state = Some(Trained { stats, params });
        Ok(())
    }

    /// Failure probability for each row of `x` (`m × 4`, raw units).
    ///
    /// Rows are standardized with the stored statistics, never recomputed.
    /// Every output lies in `[0, 1]`.
    ///
    /// # Errors
    /// [`ModelError::Untrained`], [`ModelError::FeatureMismatch`] or
    /// [`ModelError::NonFinite`].
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let trained = self.state.as_ref().ok_or(ModelError::Untrained)?;
        if x.ncols() != N_FEATURES {
            return Err(ModelError::FeatureMismatch {
                expected: N_FEATURES,
                got: x.ncols(),
            });
        }
        ensure_finite(x.view())?;
        let xs = trained.stats.transform(x.view())?;
        let probs = trained.params.forward(xs.view());
        if let Some(row) = probs.iter().position(|p| p.is_nan()) {
            return Err(ModelError::NonFinite(format!(
                "row {} saturates features with opposite-signed weights",
                row
            )));
        }
        Ok(probs)
    }

    /// Failure probability for a single feature vector.
    pub fn predict_one(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let probs = self.predict_proba(&rows_to_matrix(std::slice::from_ref(features)))?;
        Ok(probs[0])
    }

    /// Failure probability for a named sensor reading.
    pub fn predict_reading(&self, reading: &SensorReading) -> Result<f64, ModelError> {
        self.predict_one(&reading.to_features())
    }

    /// Converts the trained state into its file representation.
    pub fn to_model_file(&self) -> Result<ModelFile, ModelError> {
        let trained = self.state.as_ref().ok_or(ModelError::Untrained)?;
        let file = ModelFile {
            weights: trained.params.weights.to_vec(),
            bias: trained.params.bias,
            mean: trained.stats.mean().to_vec(),
            std: trained.stats.std().to_vec(),
        };
        if file.mean.iter().chain(file.std.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite(
                "standardization statistics are not finite".to_string(),
            ));
        }
        let params_finite = file
            .weights
            .iter()
            .chain(std::iter::once(&file.bias))
            .all(|v| v.is_finite());
        if !params_finite {
            return Err(ModelError::NonFinite(
                "trained parameters diverged; lower the learning rate".to_string(),
            ));
        }
        Ok(file)
    }

    /// Replaces the current state with the contents of a model file.
    pub fn apply_model_file(&mut self, file: ModelFile) -> Result<(), ModelError> {
        if file.weights.len() != N_FEATURES {
            return Err(ModelError::MalformedModel(format!(
                "weights must have {} entries, got {}",
                N_FEATURES,
                file.weights.len()
            )));
        }
        if !file.bias.is_finite() || file.weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::MalformedModel(
                "weights/bias contain a non-finite value".to_string(),
            ));
        }
        let stats = StandardizationStats::from_parts(file.mean, file.std)?;
        let params = LogisticParams {
            weights: Array1::from(file.weights),
            bias: file.bias,
        };
        self.state = Some(Trained { stats, params });
        Ok(())
    }

    /// Writes the model document to `writer`.
    pub fn save_to_writer<W: Write>(&self, mut writer: W) -> Result<(), ModelError> {
        let text = self.to_model_file()?.to_text()?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Saves the model document to `path`, overwriting any existing file.
    ///
    /// # Errors
    /// [`ModelError::Untrained`] if there is nothing to save, [`ModelError::Io`]
    /// if the destination cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        let path = path.as_ref();
        let text = self.to_model_file()?.to_text()?;
        std::fs::write(path, text)?;
        info!(path = %path.display(), "saved maintenance model");
        Ok(())
    }

    /// Reads a model document from `reader`, replacing any trained state.
    pub fn load_from_reader<R: Read>(&mut self, mut reader: R) -> Result<(), ModelError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.load_from_bytes(&bytes)
    }

    /// Loads a model document from `path`, replacing any trained state.
    ///
    /// # Errors
    /// [`ModelError::Io`] if the file cannot be read, [`ModelError::MalformedModel`]
    /// if it is not a valid model document. On error the current state is kept.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ModelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        self.load_from_bytes(&bytes)?;
        info!(path = %path.display(), "loaded maintenance model");
        Ok(())
    }

    fn load_from_bytes(&mut self, bytes: &[u8]) -> Result<(), ModelError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ModelError::MalformedModel(format!("not UTF-8 text: {}", e)))?;
        let file = ModelFile::from_text(text)?;
        self.apply_model_file(file)
    }
}

fn validate_training_input(x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
    let (rows, cols) = x.dim();
    if rows == 0 {
        return Err(ModelError::EmptyData(
            "training set has no rows".to_string(),
        ));
    }
    if cols != N_FEATURES {
        return Err(ModelError::FeatureMismatch {
            expected: N_FEATURES,
            got: cols,
        });
    }
    if y.len() != rows {
        return Err(ModelError::LengthMismatch {
            features: rows,
            labels: y.len(),
        });
    }
    if let Some((index, &value)) = y
        .iter()
        .enumerate()
        .find(|&(_, &v)| v != 0.0 && v != 1.0)
    {
        return Err(ModelError::InvalidLabel { index, value });
    }
    ensure_finite(x.view())
}

fn ensure_finite(x: ArrayView2<'_, f64>) -> Result<(), ModelError> {
    match x.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), v)) => Err(ModelError::NonFinite(format!(
            "row {} column {} is {}",
            row, col, v
        ))),
        None => Ok(()),
    }
}
