//! Tools around `maintenance-model`: CSV data loading, timing helpers, the
//! `train_model` and `score_reading` binaries, and criterion benchmarks.

pub mod data;
pub mod utils;

pub use data::{DataError, SensorCsvDataset};
pub use utils::time_fn;
