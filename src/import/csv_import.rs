//! CSV history import
//!
//! Bulk-loads journal entries from a CSV export. Expected header:
//!
//! ```text
//! date,mood,energy,pain,sleep,symptoms,medications,notes
//! ```
//!
//! `date` is `YYYY-MM-DD`; metric columns may be empty; `symptoms` and
//! `medications` are semicolon-separated lists. A malformed row is
//! recorded and skipped rather than aborting the whole import.

use crate::journal::store::EntryStore;
use crate::journal::types::JournalEntry;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("store error: {0}")]
    Store(#[from] crate::journal::error::StoreError),
}

/// One parsed CSV row, before validation
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    #[serde(default)]
    mood: Option<f64>,
    #[serde(default)]
    energy: Option<f64>,
    #[serde(default)]
    pain: Option<f64>,
    #[serde(default)]
    sleep: Option<f64>,
    #[serde(default)]
    symptoms: String,
    #[serde(default)]
    medications: String,
    #[serde(default)]
    notes: String,
}

/// Outcome of one import run
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Entries successfully saved
    pub imported: usize,
    /// (1-based data row number, reason) for every skipped row
    pub skipped: Vec<(usize, String)>,
}

/// Imports CSV exports into an entry store
pub struct CsvImporter;

impl CsvImporter {
    /// Import a CSV file into the store, saving as it goes
    pub fn import_file(
        store: &mut EntryStore,
        path: &Path,
    ) -> Result<ImportReport, ImportError> {
        let content = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::import_str(store, &content)
    }

    /// Import CSV content into the store
    pub fn import_str(
        store: &mut EntryStore,
        content: &str,
    ) -> Result<ImportReport, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut report = ImportReport::default();

        for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row_number = index + 1;

            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    report.skipped.push((row_number, err.to_string()));
                    continue;
                }
            };

            let entry = match Self::entry_from_row(&row) {
                Ok(entry) => entry,
                Err(reason) => {
                    report.skipped.push((row_number, reason));
                    continue;
                }
            };

            match store.save(entry) {
                Ok(_) => report.imported += 1,
                Err(err) => report.skipped.push((row_number, err.to_string())),
            }
        }

        tracing::info!(
            imported = report.imported,
            skipped = report.skipped.len(),
            "CSV import finished"
        );

        Ok(report)
    }

    fn entry_from_row(row: &CsvRow) -> Result<JournalEntry, String> {
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .map_err(|_| format!("unparseable date {:?}", row.date))?;
        // Noon keeps the entry on the same calendar day in nearby timezones
        let millis = date
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| format!("invalid time for date {:?}", row.date))?
            .and_utc()
            .timestamp_millis();

        let mut entry = JournalEntry::new(millis);
        entry.mood = row.mood;
        entry.energy = row.energy;
        entry.pain = row.pain;
        entry.sleep_hours = row.sleep;
        entry.symptoms = split_list(&row.symptoms);
        entry.medications = split_list(&row.medications);
        entry.free_text = row.notes.clone();

        Ok(entry)
    }
}

/// Split a semicolon-separated list into a normalized set
fn split_list(raw: &str) -> std::collections::BTreeSet<String> {
    raw.split(';')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_well_formed_rows() {
        let csv = "\
date,mood,energy,pain,sleep,symptoms,medications,notes
2024-03-01,4,3,2,7.5,headache;nausea,ibuprofen,rough morning
2024-03-02,5,4,,8,,,slept well
";
        let mut store = EntryStore::in_memory();
        let report = CsvImporter::import_str(&mut store, csv).unwrap();

        assert_eq!(report.imported, 2);
        assert!(report.skipped.is_empty());
        assert_eq!(store.len(), 2);

        let first = &store.entries()[0];
        assert_eq!(first.mood, Some(4.0));
        assert_eq!(first.sleep_hours, Some(7.5));
        assert!(first.symptoms.contains("headache"));
        assert!(first.symptoms.contains("nausea"));
        assert!(first.medications.contains("ibuprofen"));
        assert_eq!(first.free_text, "rough morning");
        assert!(!first.id.is_empty());

        let second = &store.entries()[1];
        assert_eq!(second.pain, None);
        assert!(second.symptoms.is_empty());
    }

    #[test]
    fn test_bad_date_skips_row_only() {
        let csv = "\
date,mood,energy,pain,sleep,symptoms,medications,notes
not-a-date,4,,,,,,
2024-03-02,3,,,,,,
";
        let mut store = EntryStore::in_memory();
        let report = CsvImporter::import_str(&mut store, csv).unwrap();

        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, 1);
        assert!(report.skipped[0].1.contains("not-a-date"));
    }

    #[test]
    fn test_out_of_range_metric_skips_row() {
        let csv = "\
date,mood,energy,pain,sleep,symptoms,medications,notes
2024-03-01,11,,,,,,
";
        let mut store = EntryStore::in_memory();
        let report = CsvImporter::import_str(&mut store, csv).unwrap();

        assert_eq!(report.imported, 0);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].1.contains("mood"));
    }

    #[test]
    fn test_list_normalization() {
        let csv = "\
date,mood,energy,pain,sleep,symptoms,medications,notes
2024-03-01,,,,,Headache; NAUSEA ;;,Tylenol,
";
        let mut store = EntryStore::in_memory();
        let report = CsvImporter::import_str(&mut store, csv).unwrap();

        assert_eq!(report.imported, 1);
        let entry = &store.entries()[0];
        assert_eq!(entry.symptoms.len(), 2);
        assert!(entry.symptoms.contains("headache"));
        assert!(entry.symptoms.contains("nausea"));
        assert!(entry.medications.contains("tylenol"));
        assert!(entry.free_text.is_empty());
    }
}
