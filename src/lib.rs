//! # carelog
//!
//! A caregiver journal with pattern analysis. Caregivers log quick notes
//! about the person they care for; carelog extracts structured data from
//! the free text and mines the history for correlations, trends,
//! anomalies, medication effectiveness, and behavioral patterns.
//!
//! ## Modules
//!
//! - [`journal`]: entry types and the JSON-lines backed store
//! - [`extract`]: heuristic free-text to structured-entry extraction
//! - [`analysis`]: pure analyzers over an entry history
//! - [`insights`]: turns analyzer output into human-readable findings
//! - [`import`]: bulk CSV import
//!
//! ## Quick Start
//!
//! ```rust
//! use carelog::extract::{Extractor, InputMode};
//! use carelog::insights::InsightGenerator;
//! use carelog::journal::store::EntryStore;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = EntryStore::in_memory();
//!
//!     // Extract a structured entry from a free-text note
//!     let extractor = Extractor::new();
//!     let now = chrono::Utc::now().timestamp_millis();
//!     let extraction = extractor.extract(
//!         "Gave her tylenol for the headache, slept 7 hours",
//!         now,
//!         InputMode::Text,
//!     );
//!     store.save(extraction.entry)?;
//!
//!     // Analyze the whole history
//!     let generator = InsightGenerator::new();
//!     for category in generator.generate(store.entries()) {
//!         println!("{}: {}", category.category, category.summary);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod extract;
pub mod import;
pub mod insights;
pub mod journal;

// Re-export top-level types for convenience
pub use journal::{
    EntryStore, EventType, JournalEntry, Metric, StoreError, StoreResult,
};

pub use extract::{Extraction, Extractor, InputMode, Vocabulary};

pub use analysis::{
    analyze_all_medications, analyze_trend, detect_anomalies, lagged_correlation, mine_trigger,
    pearson, symptom_clusters, Anomaly, AnomalyKind, Correlation, MedicationCorrelation,
    MedicationEffect, Severity, Significance, SymptomCluster, Thresholds, TrendDirection,
    TrendResult, Trigger, TriggerPattern,
};

pub use insights::{Insight, InsightCategory, InsightGenerator, InsightType};

pub use import::{CsvImporter, ImportError, ImportReport};

pub use config::{Config, ConfigError, LoggingConfig, StoreConfig};
