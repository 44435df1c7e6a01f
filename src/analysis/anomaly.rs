//! Anomaly detector
//!
//! Flags statistical outliers per metric per entry using z-scores against
//! the metric's own history. A metric needs a minimum baseline of values
//! and nonzero spread before any of its entries can be called anomalous.

use crate::analysis::thresholds::Thresholds;
use crate::analysis::Severity;
use crate::journal::types::{JournalEntry, Metric};
use serde::Serialize;

/// Direction of an outlier relative to the metric's mean
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Spike,
    Drop,
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnomalyKind::Spike => write!(f, "spike"),
            AnomalyKind::Drop => write!(f, "drop"),
        }
    }
}

/// One statistically unusual metric value
#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    /// Entry the outlier was observed in
    pub entry_id: String,
    /// Which metric was unusual
    pub metric: Metric,
    /// Above or below the series mean
    pub kind: AnomalyKind,
    /// The observed value
    pub value: f64,
    /// Standard deviations from the series mean
    pub z_score: f64,
    /// min(z/3, 1)
    pub confidence: f64,
    /// Severity tier from the z-score
    pub severity: Severity,
}

/// Population standard deviation
fn std_dev(values: &[f64], mean: f64) -> f64 {
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Flag z-score outliers across all four metrics
///
/// Results are sorted by confidence, strongest first, with a deterministic
/// tie-break on entry id and metric.
pub fn detect_anomalies(entries: &[JournalEntry], th: &Thresholds) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    for &metric in Metric::all() {
        let observed: Vec<(&JournalEntry, f64)> = entries
            .iter()
            .filter_map(|e| e.metric(metric).map(|v| (e, v)))
            .collect();

        if observed.len() < th.min_anomaly_samples {
            continue;
        }

        let values: Vec<f64> = observed.iter().map(|(_, v)| *v).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let stddev = std_dev(&values, mean);

        // No spread, no definable outliers
        if stddev == 0.0 {
            continue;
        }

        for (entry, value) in observed {
            let z_score = (value - mean).abs() / stddev;
            if z_score <= th.anomaly_z {
                continue;
            }

            let severity = if z_score > th.anomaly_z_high {
                Severity::High
            } else if z_score > th.anomaly_z_medium {
                Severity::Medium
            } else {
                Severity::Low
            };

            anomalies.push(Anomaly {
                entry_id: entry.id.clone(),
                metric,
                kind: if value > mean {
                    AnomalyKind::Spike
                } else {
                    AnomalyKind::Drop
                },
                value,
                z_score,
                confidence: (z_score / 3.0).min(1.0),
                severity,
            });
        }
    }

    anomalies.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.entry_id.cmp(&b.entry_id))
            .then_with(|| a.metric.to_string().cmp(&b.metric.to_string()))
    });

    anomalies
}
