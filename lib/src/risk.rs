//! Risk tiers for failure probabilities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-tier interpretation of a failure probability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Warning,
    Critical,
}

impl RiskLevel {
    /// `p > 0.7` is critical, `p > 0.4` a warning, anything else low.
    pub fn from_probability(p: f64) -> Self {
        if p > 0.7 {
            RiskLevel::Critical
        } else if p > 0.4 {
            RiskLevel::Warning
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Warning => "Warning",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
