//! Training orchestration on top of [`MaintenanceModel::fit`].
//!
//! The model owns the optimisation loop; the trainer adds what a training run
//! needs around it: hyperparameter defaults, periodic loss logging, a loss
//! history, post-fit metrics and persistence.

use crate::dataset::{Dataset, LabelRule, SyntheticConfig};
use crate::error::ModelError;
use crate::metrics::ClassificationMetrics;
use crate::model::{EpochStats, MaintenanceModel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Probability at or above which a reading counts as a predicted failure.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Settings for a complete training run, loadable from JSON.
///
/// Missing keys fall back to [`TrainConfig::default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub log_every: usize,
    pub n_samples: usize,
    pub seed: u64,
    /// Trailing fraction of the data held out for evaluation.
    pub holdout: f64,
    pub rule: LabelRule,
    pub output_path: PathBuf,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 5000,
            learning_rate: 0.1,
            log_every: 500,
            n_samples: 2000,
            seed: 42,
            holdout: 0.2,
            rule: LabelRule::default(),
            output_path: PathBuf::from("model_weights.json"),
        }
    }
}

impl TrainConfig {
    /// Reads a JSON config file.
    ///
    /// # Errors
    /// [`ModelError::Io`] if the file cannot be read,
    /// [`ModelError::InvalidParameter`] if it is not a valid config.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| {
            ModelError::InvalidParameter(format!("config {}: {}", path.display(), e))
        })
    }

    /// Synthetic data settings described by this config.
    pub fn synthetic(&self) -> SyntheticConfig {
        SyntheticConfig {
            n_samples: self.n_samples,
            seed: self.seed,
            rule: self.rule,
        }
    }

    pub fn trainer(&self) -> Trainer {
        Trainer::builder()
            .epochs(self.epochs)
            .learning_rate(self.learning_rate)
            .log_every(self.log_every)
            .build()
    }
}

/// Outcome of [`Trainer::fit`].
#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub model: MaintenanceModel,
    /// Cross-entropy of the fitted model on the training data.
    pub final_loss: f64,
    /// Loss sampled every `log_every` epochs and at the last epoch.
    pub history: Vec<EpochStats>,
    /// Metrics on the training data at [`DECISION_THRESHOLD`].
    pub train_metrics: ClassificationMetrics,
}

impl TrainingReport {
    pub fn train_accuracy(&self) -> f64 {
        self.train_metrics.accuracy
    }
}

/// Runs full-batch training with fixed hyperparameters.
///
/// Built via [`TrainerBuilder`]; immutable and reusable across datasets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trainer {
    pub(crate) epochs: usize,
    pub(crate) learning_rate: f64,
    pub(crate) log_every: usize,
}

/// Fluent builder for [`Trainer`].
///
/// Defaults:
/// - `epochs`: 5000
/// - `learning_rate`: 0.1
/// - `log_every`: 500
#[derive(Clone, Copy, Debug)]
pub struct TrainerBuilder {
    epochs: usize,
    learning_rate: f64,
    log_every: usize,
}

impl Default for TrainerBuilder {
    fn default() -> Self {
        Self {
            epochs: 5000,
            learning_rate: 0.1,
            log_every: 500,
        }
    }
}

impl TrainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Sets how often the loss is logged and recorded.
    ///
    /// `0` records only the last epoch.
    pub fn log_every(mut self, every: usize) -> Self {
        self.log_every = every;
        self
    }

    /// Hyperparameters are validated when training starts, not here.
    pub fn build(self) -> Trainer {
        Trainer {
            epochs: self.epochs,
            learning_rate: self.learning_rate,
            log_every: self.log_every,
        }
    }
}

impl Trainer {
    pub fn builder() -> TrainerBuilder {
        TrainerBuilder::new()
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Fits a fresh model on `dataset`.
    ///
    /// # Errors
    /// Anything [`MaintenanceModel::fit`] rejects, notably
    /// [`ModelError::InvalidParameter`] for zero epochs or a bad learning rate.
    pub fn fit(&self, dataset: &Dataset) -> Result<TrainingReport, ModelError> {
        let x = dataset.features();
        let y = dataset.targets();
        let last_epoch = self.epochs.saturating_sub(1);
        let log_every = self.log_every;

        info!(
            n_samples = dataset.len(),
            positive_rate = dataset.positive_rate(),
            epochs = self.epochs,
            learning_rate = self.learning_rate,
            "training started"
        );

        let mut history = Vec::new();
        let mut model = MaintenanceModel::new();
        model.fit_with_observer(&x, &y, self.epochs, self.learning_rate, |stats| {
            let sampled = log_every > 0 && stats.epoch % log_every == 0;
            if sampled || stats.epoch == last_epoch {
                info!(epoch = stats.epoch, loss = stats.loss, "epoch");
                history.push(stats);
            }
        })?;

        let probs = model.predict_proba(&x)?;
        let train_metrics =
            ClassificationMetrics::compute(probs.view(), y.view(), DECISION_THRESHOLD)?;
        info!(
            loss = train_metrics.log_loss,
            accuracy = train_metrics.accuracy,
            "training finished"
        );

        Ok(TrainingReport {
            model,
            final_loss: train_metrics.log_loss,
            history,
            train_metrics,
        })
    }

    /// Scores `model` on `dataset` at [`DECISION_THRESHOLD`].
    pub fn evaluate(
        &self,
        model: &MaintenanceModel,
        dataset: &Dataset,
    ) -> Result<ClassificationMetrics, ModelError> {
        let probs = model.predict_proba(&dataset.features())?;
        ClassificationMetrics::compute(probs.view(), dataset.targets().view(), DECISION_THRESHOLD)
    }

    /// [`Self::fit`], then writes the model to `path`.
    pub fn train_and_save<P: AsRef<Path>>(
        &self,
        dataset: &Dataset,
        path: P,
    ) -> Result<TrainingReport, ModelError> {
        let report = self.fit(dataset)?;
        report.model.save(path)?;
        Ok(report)
    }
}
