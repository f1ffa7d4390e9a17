//! # maintenance-model
//!
//! Predicts the probability that a piece of industrial equipment will fail,
//! from four sensor readings: temperature, vibration, pressure and rpm.
//!
//! The model is a logistic regression over standardized features, trained by
//! full-batch gradient descent. Training is deterministic: the same data and
//! hyperparameters always produce the same parameters.
//!
//! ## Quick Start
//!
//! ```rust
//! use maintenance_model::{MaintenanceModel, RiskLevel, SensorReading};
//! use ndarray::array;
//!
//! let x = array![[90.0, 5.0, 100.0, 1500.0], [40.0, 1.0, 100.0, 1500.0]];
//! let y = array![1.0, 0.0];
//!
//! let mut model = MaintenanceModel::new();
//! model.fit(&x, &y, 1000, 0.1).unwrap();
//!
//! let p = model
//!     .predict_reading(&SensorReading::new(88.0, 4.8, 100.0, 1500.0))
//!     .unwrap();
//! assert!(p > 0.5);
//! assert_eq!(RiskLevel::from_probability(p), RiskLevel::Critical);
//! ```
//!
//! ## Module Structure
//!
//! - `features`: the fixed feature order and `SensorReading`
//! - `preprocessing`: per-feature standardization statistics
//! - `model`: `MaintenanceModel` and its logistic parameters
//! - `loss`, `optimizer`: cross-entropy and the gradient-descent step
//! - `dataset`: validated labeled data and a seeded synthetic generator
//! - `trainer`: training runs with logging, metrics and persistence
//! - `metrics`, `risk`: interpreting predictions
//! - `serialization`: the JSON model file

pub mod dataset;

/// Binary classification metrics.
pub mod metrics;

pub mod error;

/// Sensor feature layout.
pub mod features;

/// Cross-entropy loss.
pub mod loss;

/// The failure-probability model.
pub mod model;

/// Gradient-descent parameter updates.
pub mod optimizer;

/// Feature standardization.
pub mod preprocessing;

/// Mapping of probabilities to risk tiers.
pub mod risk;

/// Model persistence format.
pub mod serialization;

pub mod trainer;

pub use dataset::{Dataset, LabelRule, SyntheticConfig};
pub use error::ModelError;
pub use features::{FeatureVector, SensorReading, FEATURE_NAMES, N_FEATURES};
pub use metrics::ClassificationMetrics;
pub use model::{EpochStats, MaintenanceModel};
pub use preprocessing::StandardizationStats;
pub use risk::RiskLevel;
pub use trainer::{TrainConfig, Trainer, TrainerBuilder, TrainingReport};
