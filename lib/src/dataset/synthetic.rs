//! Seeded synthetic sensor data.
//!
//! Features are drawn independently per sample:
//!
//! | feature     | distribution   |
//! |-------------|----------------|
//! | temperature | N(60, 15)      |
//! | vibration   | N(2, 1)        |
//! | pressure    | N(100, 10)     |
//! | rpm         | N(1500, 100)   |
//!
//! Labels come from a [`LabelRule`]. The same config always yields the same
//! dataset.

use super::Dataset;
use crate::error::ModelError;
use crate::features::FeatureVector;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// `(mean, std)` per feature, in feature order.
pub const FEATURE_DISTRIBUTIONS: [(f64, f64); 4] =
    [(60.0, 15.0), (2.0, 1.0), (100.0, 10.0), (1500.0, 100.0)];

/// How failure labels are assigned to generated readings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LabelRule {
    /// Positive when `temperature > 85` or `vibration > 4.5`, then exactly
    /// `floor(n · flip_fraction)` distinct labels are inverted.
    Threshold { flip_fraction: f64 },
    /// Positive when `0.4·temp/100 + 0.5·vib/5 + N(0, noise_std) > 0.6`.
    RiskScore { noise_std: f64 },
}

impl LabelRule {
    pub fn threshold() -> Self {
        LabelRule::Threshold {
            flip_fraction: 0.05,
        }
    }

    pub fn risk_score() -> Self {
        LabelRule::RiskScore { noise_std: 0.1 }
    }

    fn validate(&self) -> Result<(), ModelError> {
        match *self {
            LabelRule::Threshold { flip_fraction } if !(0.0..=1.0).contains(&flip_fraction) => {
                Err(ModelError::InvalidParameter(format!(
                    "flip_fraction must be in [0, 1], got {}",
                    flip_fraction
                )))
            }
            LabelRule::RiskScore { noise_std } if !noise_std.is_finite() || noise_std < 0.0 => {
                Err(ModelError::InvalidParameter(format!(
                    "noise_std must be finite and >= 0, got {}",
                    noise_std
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Default for LabelRule {
    fn default() -> Self {
        LabelRule::risk_score()
    }
}

/// Parameters of a synthetic dataset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    pub n_samples: usize,
    pub seed: u64,
    pub rule: LabelRule,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            n_samples: 2000,
            seed: 42,
            rule: LabelRule::default(),
        }
    }
}

impl SyntheticConfig {
    /// Generates the dataset.
    ///
    /// # Errors
    /// [`ModelError::InvalidParameter`] for `n_samples == 0` or an out-of-range
    /// rule parameter.
    pub fn generate(&self) -> Result<Dataset, ModelError> {
        if self.n_samples == 0 {
            return Err(ModelError::InvalidParameter(
                "n_samples must be at least 1".to_string(),
            ));
        }
        self.rule.validate()?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let rows: Vec<FeatureVector> = (0..self.n_samples)
            .map(|_| {
                let mut row = [0.0; 4];
                for (value, &(mean, std)) in row.iter_mut().zip(FEATURE_DISTRIBUTIONS.iter()) {
                    *value = normal(&mut rng, mean, std);
                }
                row
            })
            .collect();

        let labels = match self.rule {
            LabelRule::Threshold { flip_fraction } => {
                let mut labels: Vec<u8> = rows
                    .iter()
                    .map(|r| u8::from(r[0] > 85.0 || r[1] > 4.5))
                    .collect();
                let n_flip = (self.n_samples as f64 * flip_fraction).floor() as usize;
                for i in index::sample(&mut rng, self.n_samples, n_flip).into_iter() {
                    labels[i] = 1 - labels[i];
                }
                labels
            }
            LabelRule::RiskScore { noise_std } => rows
                .iter()
                .map(|r| {
                    let score = 0.4 * r[0] / 100.0 + 0.5 * r[1] / 5.0;
                    u8::from(score + normal(&mut rng, 0.0, noise_std) > 0.6)
                })
                .collect(),
        };

        tracing::debug!(
            n = self.n_samples,
            seed = self.seed,
            rule = ?self.rule,
            "generated synthetic dataset"
        );
        Dataset::new(rows, labels)
    }
}

/// Box–Muller draw from `N(mean, std)`.
fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    // gen() is in [0, 1); shift to (0, 1] so ln never sees zero
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + std * z
}
