#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Read-only incident dataset.
//!
//! A [`Dataset`] is loaded once at startup and then shared (behind an
//! `Arc`) by every dashboard component. It is never mutated or reloaded.
//! Loading accepts a JSON array of records or a CSV file with the published
//! column headers; malformed input fails fast with a [`DatasetError`]
//! rather than producing a misleading empty dataset.

pub mod progress;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crime_dashboard_incident_models::{Incident, RawIncident};
use thiserror::Error;

use crate::progress::ProgressCallback;

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened or read.
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        /// Path of the dataset file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The JSON input was not an array of incident records.
    #[error("Malformed JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV row could not be read or decoded.
    #[error("Malformed CSV dataset: {0}")]
    Csv(#[from] csv::Error),

    /// The file extension is neither `.json` nor `.csv`.
    #[error("Unsupported dataset format for {path} (expected .json or .csv)")]
    UnsupportedFormat {
        /// Path of the dataset file.
        path: PathBuf,
    },
}

/// The full, immutable incident collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Incident>,
}

impl Dataset {
    /// Wraps an already-parsed record collection.
    #[must_use]
    pub fn from_records(records: Vec<Incident>) -> Self {
        log_date_quality(&records);
        Self { records }
    }

    /// Parses a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Json`] if the input is not a JSON array of
    /// records (e.g. `null` or an object).
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let records: Vec<Incident> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Reads a JSON array of records.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Json`] if reading or decoding fails.
    pub fn from_json_reader<R: Read>(
        reader: R,
        progress: &dyn ProgressCallback,
    ) -> Result<Self, DatasetError> {
        let records: Vec<Incident> = serde_json::from_reader(reader)?;
        let total = records.len() as u64;
        progress.set_total(total);
        progress.inc(total);
        progress.finish(format!("Loaded {total} records"));
        Ok(Self::from_records(records))
    }

    /// Reads CSV rows with the published column headers.
    ///
    /// Cells are kept as written (`"007"` stays `"007"`) before the
    /// date, age and case-closed rules are applied.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Csv`] on the first row that cannot be read
    /// or decoded.
    pub fn from_csv_reader<R: Read>(
        reader: R,
        progress: &dyn ProgressCallback,
    ) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<RawIncident>() {
            records.push(Incident::from(row?));
            progress.inc(1);
        }

        progress.finish(format!("Loaded {} records", records.len()));
        Ok(Self::from_records(records))
    }

    /// Loads a dataset file, picking the decoder from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be read, has an
    /// unsupported extension, or is malformed.
    pub fn load(path: &Path, progress: &dyn ProgressCallback) -> Result<Self, DatasetError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let open = || {
            File::open(path)
                .map(BufReader::new)
                .map_err(|source| DatasetError::Io {
                    path: path.to_path_buf(),
                    source,
                })
        };

        log::info!("Loading dataset from {}", path.display());

        let dataset = match extension.as_deref() {
            Some("json") => Self::from_json_reader(open()?, progress)?,
            Some("csv") => Self::from_csv_reader(open()?, progress)?,
            _ => {
                return Err(DatasetError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        log::info!(
            "Loaded {} incident records from {}",
            dataset.len(),
            path.display()
        );

        Ok(dataset)
    }

    /// All records in their load order.
    #[must_use]
    pub fn records(&self) -> &[Incident] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over records in their load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Incident> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Incident;
    type IntoIter = std::slice::Iter<'a, Incident>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn log_date_quality(records: &[Incident]) {
    let undated = records.iter().filter(|r| r.occurred_at.is_none()).count();
    if undated > 0 {
        log::warn!(
            "{undated} of {} records have an unparsable occurrence date; \
             they are excluded from year options and time series",
            records.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::progress::NullProgress;

    #[derive(Default)]
    struct CountingProgress {
        total: AtomicU64,
        position: AtomicU64,
    }

    impl ProgressCallback for CountingProgress {
        fn set_total(&self, total: u64) {
            self.total.store(total, Ordering::SeqCst);
        }
        fn inc(&self, delta: u64) {
            self.position.fetch_add(delta, Ordering::SeqCst);
        }
        fn finish(&self, _msg: String) {}
    }

    const JSON: &str = r#"[
        {"City": "Delhi", "Crime Description": "THEFT", "Date of Occurrence": "2022-03-01",
         "Victim Age": 20, "Victim Gender": "M", "Weapon Used": "Knife", "Case Closed": "Yes"},
        {"City": "Mumbai", "Crime Description": "ASSAULT", "Date of Occurrence": "garbage",
         "Victim Age": "unknown", "Victim Gender": "F", "Weapon Used": null, "Case Closed": "No"}
    ]"#;

    #[test]
    fn parses_json_array_preserving_order() {
        let dataset = Dataset::from_json_str(JSON).unwrap();
        assert_eq!(dataset.len(), 2);
        let cities: Vec<&str> = dataset.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["Delhi", "Mumbai"]);
        assert_eq!(dataset.records()[1].occurred_at, None);
        assert_eq!(dataset.records()[1].weapon_used, None);
    }

    #[test]
    fn rejects_non_array_json() {
        assert!(matches!(
            Dataset::from_json_str("null"),
            Err(DatasetError::Json(_))
        ));
        assert!(matches!(
            Dataset::from_json_str(r#"{"City": "Delhi"}"#),
            Err(DatasetError::Json(_))
        ));
    }

    #[test]
    fn empty_array_is_an_empty_dataset() {
        let dataset = Dataset::from_json_str("[]").unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn reads_csv_with_dataset_headers() {
        let csv = "Report Number,City,Crime Description,Date of Occurrence,Victim Age,Victim Gender,Weapon Used,Case Closed\n\
                   1,Delhi,THEFT,01-03-2022 10:15,20,M,Knife,Yes\n\
                   2,Pune,FRAUD,,,X,,No\n";
        let progress = CountingProgress::default();
        let dataset = Dataset::from_csv_reader(csv.as_bytes(), &progress).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(progress.position.load(Ordering::SeqCst), 2);

        let first = &dataset.records()[0];
        assert_eq!(first.year(), Some(2022));
        assert_eq!(first.month0(), Some(2));
        assert_eq!(first.victim_age, Some(20));
        assert!(first.case_closed);

        let second = &dataset.records()[1];
        assert_eq!(second.occurred_at, None);
        assert_eq!(second.victim_age, None);
        assert_eq!(second.weapon_used, None);
        assert_eq!(second.victim_gender.as_deref(), Some("X"));
    }

    #[test]
    fn csv_cells_are_not_retyped() {
        let csv = "City,Crime Description,Date of Occurrence,Victim Age,Victim Gender,Weapon Used,Case Closed\n\
                   0123,1.50,2022,20,M,007,true\n";
        let dataset = Dataset::from_csv_reader(csv.as_bytes(), &NullProgress).unwrap();
        let record = &dataset.records()[0];

        assert_eq!(record.city, "0123");
        assert_eq!(record.crime_description.as_deref(), Some("1.50"));
        assert_eq!(record.weapon_used.as_deref(), Some("007"));
        assert_eq!(record.occurred_at, None);
        assert_eq!(record.victim_age, Some(20));
        assert!(!record.case_closed);
    }

    #[test]
    fn csv_without_city_column_is_rejected() {
        let csv = "Crime Description,Victim Age\nTHEFT,20\n";
        assert!(matches!(
            Dataset::from_csv_reader(csv.as_bytes(), &NullProgress),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn json_reader_reports_total() {
        let progress = CountingProgress::default();
        let dataset = Dataset::from_json_reader(JSON.as_bytes(), &progress).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(progress.total.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let result = Dataset::load(Path::new("incidents.parquet"), &NullProgress);
        assert!(matches!(
            result,
            Err(DatasetError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = Dataset::load(Path::new("/nonexistent/incidents.json"), &NullProgress);
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }
}
