//! Sensor feature layout.
//!
//! At the model boundary a sample is a flat `[f64; 4]` ordered as
//! `[temperature, vibration, pressure, rpm]`. [`SensorReading`] is the named
//! view used by callers that build samples field by field.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Number of input features the model expects.
pub const N_FEATURES: usize = 4;

/// Feature names in column order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = ["temperature", "vibration", "pressure", "rpm"];

/// A flat feature vector in column order.
pub type FeatureVector = [f64; N_FEATURES];

/// One set of sensor readings from a machine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Vibration velocity in mm/s.
    pub vibration: f64,
    /// Pressure in psi.
    pub pressure: f64,
    /// Shaft speed in revolutions per minute.
    pub rpm: f64,
}

impl SensorReading {
    pub fn new(temperature: f64, vibration: f64, pressure: f64, rpm: f64) -> Self {
        Self {
            temperature,
            vibration,
            pressure,
            rpm,
        }
    }

    /// Flattens the reading into model column order.
    pub fn to_features(&self) -> FeatureVector {
        [self.temperature, self.vibration, self.pressure, self.rpm]
    }
}

impl From<FeatureVector> for SensorReading {
    fn from(v: FeatureVector) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<SensorReading> for FeatureVector {
    fn from(r: SensorReading) -> Self {
        r.to_features()
    }
}

/// Stacks feature vectors into an `n × 4` matrix.
pub fn rows_to_matrix(rows: &[FeatureVector]) -> Array2<f64> {
    Array2::from(rows.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_column_order() {
        let r = SensorReading::new(90.0, 5.0, 100.0, 1500.0);
        assert_eq!(r.to_features(), [90.0, 5.0, 100.0, 1500.0]);
    }

    #[test]
    fn test_reading_from_vector() {
        let r = SensorReading::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(r.vibration, 2.0);
        assert_eq!(r.rpm, 4.0);
    }

    #[test]
    fn test_rows_to_matrix_shape() {
        let m = rows_to_matrix(&[[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]]);
        assert_eq!(m.dim(), (2, 4));
        assert_eq!(m[[1, 2]], 7.0);
    }

    #[test]
    fn test_rows_to_matrix_empty() {
        let m = rows_to_matrix(&[]);
        assert_eq!(m.dim(), (0, 4));
    }
}
