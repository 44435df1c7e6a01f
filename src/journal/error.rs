//! Entry store error types

use crate::journal::types::Metric;
use thiserror::Error;

/// Errors that can occur in the entry store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A metric value lies outside its valid bound
    #[error("Metric {metric} out of range: {value}")]
    OutOfRange { metric: Metric, value: f64 },

    /// Requested entry does not exist
    #[error("Entry not found: {0}")]
    EntryNotFound(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::EntryNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Entry not found: abc");

        let err = StoreError::OutOfRange {
            metric: Metric::Mood,
            value: 9.0,
        };
        assert_eq!(err.to_string(), "Metric mood out of range: 9");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }
}
