pub mod sensor_csv;

pub use sensor_csv::{DataError, SensorCsvDataset};
