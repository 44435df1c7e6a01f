//! Analytics pipeline
//!
//! Five independent, pure analyzers over a date-ascending entry sequence:
//!
//! - **correlation**: lag-optimized Pearson correlation between two metrics
//! - **trend**: OLS linear trend per metric
//! - **anomaly**: z-score outliers per metric per entry
//! - **medication**: sequential-pair medication effectiveness
//! - **trigger**: "X precedes onset of Y" pattern mining
//! - **cluster**: co-occurring symptom pairs
//! - **thresholds**: every tunable cutoff in one structure
//!
//! Every analyzer is a pure function over an immutable entry snapshot: no
//! I/O, no shared state, deterministic output. Not-enough-data cases
//! return empty or neutral results, never errors.

pub mod anomaly;
pub mod cluster;
pub mod correlation;
pub mod medication;
pub mod thresholds;
pub mod trend;
pub mod trigger;

use serde::Serialize;

pub use anomaly::{detect_anomalies, Anomaly, AnomalyKind};
pub use cluster::{symptom_clusters, SymptomCluster};
pub use correlation::{lagged_correlation, pearson, Correlation, Significance};
pub use medication::{
    analyze_all_medications, medication_effect, MedicationCorrelation, MedicationEffect,
};
pub use thresholds::Thresholds;
pub use trend::{analyze_trend, TrendDirection, TrendResult};
pub use trigger::{mine_trigger, Trigger, TriggerPattern};

/// Severity tier shared by anomalies and insights
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}
