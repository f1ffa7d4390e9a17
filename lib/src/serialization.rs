//! Textual persistence of fitted model parameters.
//!
//! A model file is a single JSON object:
//! ```text
//! {"weights": [w0, w1, w2, w3], "bias": b, "mean": [m0, m1, m2, m3], "std": [s0, s1, s2, s3]}
//! ```
//! `std` holds the unguarded population standard deviations; readers add the
//! epsilon at use time. Unknown extra keys are ignored.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// A trait for parameter representations that can be written to and read from text.
///
/// Implementors should contain only plain numerical data (e.g. `Vec<f64>`, scalars).
pub trait SerializableParams: Sized {
    /// Serialize the parameters into a text document.
    fn to_text(&self) -> Result<String, ModelError>;

    /// Parse the parameters from a text document.
    fn from_text(text: &str) -> Result<Self, ModelError>;
}

impl<T> SerializableParams for T
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    fn to_text(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn from_text(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// On-disk representation of a trained [`crate::MaintenanceModel`].
///
/// Converts to and from the model's internal arrays; see
/// [`crate::MaintenanceModel::save`] and [`crate::MaintenanceModel::load`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}
