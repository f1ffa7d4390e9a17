//! Error types for model training, inference and persistence.

use thiserror::Error;

/// Error type for every fallible operation in this crate.
///
/// Variants fall into three groups:
/// - usage errors (bad shapes, bad labels, bad hyperparameters, untrained model),
/// - [`ModelError::Io`], passed through from the filesystem unchanged,
/// - [`ModelError::MalformedModel`], a readable file whose contents are not a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Prediction or persistence was requested before `fit`/`load`.
    #[error("Untrained model: call fit or load first")]
    Untrained,
    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// Feature dimension mismatch.
    #[error("Feature mismatch: expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },
    /// Number of label values differs from number of feature rows.
    #[error("Length mismatch: {features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },
    /// A training label outside of {0, 1}.
    #[error("Invalid label at row {index}: {value} (expected 0 or 1)")]
    InvalidLabel { index: usize, value: f64 },
    /// Invalid hyperparameter value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Input contains NaN or infinity.
    #[error("Non-finite value: {0}")]
    NonFinite(String),
    /// I/O error while reading or writing a model file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The model document is readable but does not describe a model.
    #[error("Malformed model file: {0}")]
    MalformedModel(String),
}

impl ModelError {
    /// True for errors raised by the filesystem (e.g. a missing file).
    pub fn is_io(&self) -> bool {
        matches!(self, ModelError::Io(_))
    }

    /// True when a model document was read but could not be interpreted.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ModelError::MalformedModel(_))
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            ModelError::Io(err.into())
        } else {
            ModelError::MalformedModel(err.to_string())
        }
    }
}
