//! Bulk data import

pub mod csv_import;

pub use csv_import::{CsvImporter, ImportError, ImportReport};
