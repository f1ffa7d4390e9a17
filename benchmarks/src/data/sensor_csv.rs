use csv::{ReaderBuilder, StringRecord};
use maintenance_model::{Dataset, FeatureVector, ModelError, FEATURE_NAMES, N_FEATURES};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Name of the label column.
pub const LABEL_COLUMN: &str = "label";

/// Errors raised while loading labeled sensor data from CSV.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column `{0}`")]
    MissingColumn(&'static str),
    #[error("line {line}: cannot parse `{value}` in column `{column}`")]
    Parse {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: label must be 0 or 1, got `{value}`")]
    InvalidLabel { line: u64, value: String },
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Labeled sensor readings loaded from a headed CSV file.
///
/// Expected columns are `temperature,vibration,pressure,rpm,label`. Header
/// names are matched case-insensitively and may appear in any order; other
/// columns are ignored.
///
/// # Example
///
/// ```no_run
/// use benchmarks::data::SensorCsvDataset;
///
/// let data = SensorCsvDataset::load("data/sensors.csv").unwrap();
/// let dataset = data.into_dataset().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SensorCsvDataset {
    features: Vec<FeatureVector>,
    labels: Vec<u8>,
}

impl SensorCsvDataset {
    /// Load readings from the CSV file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load readings from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();

        let mut feature_idx = [0usize; N_FEATURES];
        for (slot, name) in feature_idx.iter_mut().zip(FEATURE_NAMES) {
            *slot = column_index(&headers, name)?;
        }
        let label_idx = column_index(&headers, LABEL_COLUMN)?;

        let mut features = Vec::new();
        let mut labels = Vec::new();

        for result in rdr.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());

            let mut row = [0.0; N_FEATURES];
            for ((value, &idx), name) in row.iter_mut().zip(&feature_idx).zip(FEATURE_NAMES) {
                *value = parse_field(&record, idx, name, line)?;
            }
            let label = parse_field(&record, label_idx, LABEL_COLUMN, line)?;
            let label = match label {
                l if l == 0.0 => 0,
                l if l == 1.0 => 1,
                _ => {
                    return Err(DataError::InvalidLabel {
                        line,
                        value: record[label_idx].to_string(),
                    })
                }
            };

            features.push(row);
            labels.push(label);
        }

        Ok(Self { features, labels })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Validate into a training [`Dataset`].
    pub fn into_dataset(self) -> Result<Dataset, DataError> {
        Ok(Dataset::new(self.features, self.labels)?)
    }
}

fn column_index(headers: &StringRecord, name: &'static str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or(DataError::MissingColumn(name))
}

fn parse_field(
    record: &StringRecord,
    idx: usize,
    column: &'static str,
    line: u64,
) -> Result<f64, DataError> {
    let raw = record.get(idx).unwrap_or("");
    raw.parse::<f64>().map_err(|_| DataError::Parse {
        line,
        column,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_reordered_headers_with_extra_column() {
        let csv = "machine_id,RPM,Label,Temperature,pressure,Vibration\n\
                   m1,1500,1,90.5,100,5.0\n\
                   m2,1480,0,55.0,98,1.5\n";
        let data = SensorCsvDataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(data.len(), 2);

        let ds = data.into_dataset().unwrap();
        assert_eq!(ds.rows()[0], [90.5, 5.0, 100.0, 1500.0]);
        assert_eq!(ds.labels(), &[1, 0]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "temperature,vibration,pressure,rpm,label").unwrap();
        writeln!(file, "70, 2.5, 101, 1510, 0").unwrap();
        writeln!(file, "95, 4.9, 99, 1490, 1.0").unwrap();

        let data = SensorCsvDataset::load(file.path()).unwrap();
        assert_eq!(data.len(), 2);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let csv = "temperature,vibration,pressure,label\n70,2,100,0\n";
        let err = SensorCsvDataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("rpm")));
    }

    #[test]
    fn test_unparseable_value_is_error() {
        let csv = "temperature,vibration,pressure,rpm,label\n70,abc,100,1500,0\n";
        let err = SensorCsvDataset::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DataError::Parse { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "vibration");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_binary_label() {
        let csv = "temperature,vibration,pressure,rpm,label\n70,2,100,1500,2\n";
        let err = SensorCsvDataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::InvalidLabel { line: 2, .. }));
    }

    #[test]
    fn test_empty_file_fails_validation() {
        let csv = "temperature,vibration,pressure,rpm,label\n";
        let data = SensorCsvDataset::from_reader(csv.as_bytes()).unwrap();
        assert!(data.is_empty());
        let err = data.into_dataset().unwrap_err();
        assert!(matches!(err, DataError::Model(ModelError::EmptyData(_))));
    }

    #[test]
    fn test_missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = SensorCsvDataset::load(dir.path().join("none.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
