//! Analyzer thresholds
//!
//! Every tunable cutoff used by the analyzers and the insight generator
//! lives in one structure, loaded from the `[analysis]` section of the
//! config file with per-field defaults.

use serde::Deserialize;

/// Tunable cutoffs for the analytics pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    // -- correlation --
    /// Minimum aligned pairs before Pearson is attempted
    #[serde(default = "default_min_correlation_pairs")]
    pub min_correlation_pairs: usize,
    /// Strength above which a correlation can be "high" significance
    #[serde(default = "default_high_strength")]
    pub high_strength: f64,
    /// Sample size above which a correlation can be "high" significance
    #[serde(default = "default_high_samples")]
    pub high_samples: usize,
    /// Strength above which a correlation can be "medium" significance
    #[serde(default = "default_medium_strength")]
    pub medium_strength: f64,
    /// Sample size above which a correlation can be "medium" significance
    #[serde(default = "default_medium_samples")]
    pub medium_samples: usize,

    // -- trend --
    /// Minimum values before a trend is fitted
    #[serde(default = "default_min_trend_points")]
    pub min_trend_points: usize,
    /// Slope magnitude below which a trend counts as stable
    #[serde(default = "default_trend_slope")]
    pub trend_slope: f64,
    /// Minimum significance for a trend to surface as an insight
    #[serde(default = "default_min_trend_significance")]
    pub min_trend_significance: f64,

    // -- anomaly --
    /// Minimum samples per metric before outliers are looked for
    #[serde(default = "default_min_anomaly_samples")]
    pub min_anomaly_samples: usize,
    /// Z-score above which a value is an anomaly
    #[serde(default = "default_anomaly_z")]
    pub anomaly_z: f64,
    /// Z-score above which severity is medium
    #[serde(default = "default_anomaly_z_medium")]
    pub anomaly_z_medium: f64,
    /// Z-score above which severity is high
    #[serde(default = "default_anomaly_z_high")]
    pub anomaly_z_high: f64,

    // -- medication effectiveness --
    /// Entry count below which medication analysis does not run at all
    #[serde(default = "default_min_medication_entries")]
    pub min_medication_entries: usize,
    /// Observations that give full confidence (divisor in min(n/d, 1))
    #[serde(default = "default_medication_confidence_divisor")]
    pub medication_confidence_divisor: f64,
    /// Observation count that must be exceeded to avoid the 0.5 penalty
    #[serde(default = "default_medication_full_observations")]
    pub medication_full_observations: usize,
    /// Effectiveness above which a medication "helps"
    #[serde(default = "default_helps_effectiveness")]
    pub helps_effectiveness: f64,
    /// Effectiveness below which a medication may be "worsening"
    #[serde(default = "default_worsens_effectiveness")]
    pub worsens_effectiveness: f64,
    /// Confidence floor for a medication result to surface as an insight
    #[serde(default = "default_min_medication_confidence")]
    pub min_medication_confidence: f64,
    /// Cap on symptom x medication pairs scored per run
    #[serde(default = "default_max_cross_product")]
    pub max_cross_product: usize,

    // -- trigger mining --
    /// Entry count below which trigger mining does not run at all
    #[serde(default = "default_min_trigger_entries")]
    pub min_trigger_entries: usize,
    /// Pain level at or above which a day is a synthetic "high pain" trigger
    #[serde(default = "default_high_pain_level")]
    pub high_pain_level: f64,
    /// Window within which a following entry counts as triggered
    #[serde(default = "default_trigger_window_hours")]
    pub trigger_window_hours: i64,
    /// Confidence divisor for medication triggers
    #[serde(default = "default_trigger_confidence_divisor")]
    pub trigger_confidence_divisor: f64,
    /// Event count that must be exceeded to avoid the 0.5 penalty
    #[serde(default = "default_trigger_full_events")]
    pub trigger_full_events: usize,
    /// Confidence divisor for the high-pain trigger variant
    #[serde(default = "default_pain_trigger_confidence_divisor")]
    pub pain_trigger_confidence_divisor: f64,
    /// High-pain event count that must be exceeded to avoid the penalty
    #[serde(default = "default_pain_trigger_full_events")]
    pub pain_trigger_full_events: usize,
    /// Probability floor for a trigger pattern to surface as an insight
    #[serde(default = "default_min_trigger_probability")]
    pub min_trigger_probability: f64,
    /// Most distinct symptoms reported per trigger pattern
    #[serde(default = "default_max_triggered_symptoms")]
    pub max_triggered_symptoms: usize,

    // -- symptom clustering --
    /// Entry count below which clustering does not run
    #[serde(default = "default_min_cluster_entries")]
    pub min_cluster_entries: usize,
    /// Minimum co-occurrence count for a pair to count as a cluster
    #[serde(default = "default_min_cluster_count")]
    pub min_cluster_count: usize,
    /// Confidence divisor (min(count/d, 1))
    #[serde(default = "default_cluster_confidence_divisor")]
    pub cluster_confidence_divisor: f64,

    // -- insight generation --
    /// Entry count below which only the Getting Started prompt is produced
    #[serde(default = "default_min_entries_for_insights")]
    pub min_entries_for_insights: usize,
    /// Minimum samples per weekday for the day-of-week check
    #[serde(default = "default_weekday_min_samples")]
    pub weekday_min_samples: usize,
    /// Mood points a weekday must sit below the overall average
    #[serde(default = "default_weekday_dip_margin")]
    pub weekday_dip_margin: f64,
    /// Correlation insights kept per run
    #[serde(default = "default_max_correlation_insights")]
    pub max_correlation_insights: usize,
    /// Medication insights kept per run
    #[serde(default = "default_max_medication_insights")]
    pub max_medication_insights: usize,
    /// Clusters and trigger patterns kept per run, each
    #[serde(default = "default_max_behavioral_insights")]
    pub max_behavioral_insights: usize,
    /// Anomaly insights kept per run
    #[serde(default = "default_max_anomaly_insights")]
    pub max_anomaly_insights: usize,
}

fn default_min_correlation_pairs() -> usize {
    3
}
fn default_high_strength() -> f64 {
    0.7
}
fn default_high_samples() -> usize {
    20
}
fn default_medium_strength() -> f64 {
    0.5
}
fn default_medium_samples() -> usize {
    10
}
fn default_min_trend_points() -> usize {
    3
}
fn default_trend_slope() -> f64 {
    0.1
}
fn default_min_trend_significance() -> f64 {
    0.3
}
fn default_min_anomaly_samples() -> usize {
    5
}
fn default_anomaly_z() -> f64 {
    2.0
}
fn default_anomaly_z_medium() -> f64 {
    2.5
}
fn default_anomaly_z_high() -> f64 {
    3.0
}
fn default_min_medication_entries() -> usize {
    10
}
fn default_medication_confidence_divisor() -> f64 {
    5.0
}
fn default_medication_full_observations() -> usize {
    2
}
fn default_helps_effectiveness() -> f64 {
    0.6
}
fn default_worsens_effectiveness() -> f64 {
    0.3
}
fn default_min_medication_confidence() -> f64 {
    0.4
}
fn default_max_cross_product() -> usize {
    200
}
fn default_min_trigger_entries() -> usize {
    15
}
fn default_high_pain_level() -> f64 {
    7.0
}
fn default_trigger_window_hours() -> i64 {
    24
}
fn default_trigger_confidence_divisor() -> f64 {
    5.0
}
fn default_trigger_full_events() -> usize {
    2
}
fn default_pain_trigger_confidence_divisor() -> f64 {
    4.0
}
fn default_pain_trigger_full_events() -> usize {
    1
}
fn default_min_trigger_probability() -> f64 {
    0.3
}
fn default_max_triggered_symptoms() -> usize {
    3
}
fn default_min_cluster_entries() -> usize {
    5
}
fn default_min_cluster_count() -> usize {
    3
}
fn default_cluster_confidence_divisor() -> f64 {
    5.0
}
fn default_min_entries_for_insights() -> usize {
    5
}
fn default_weekday_min_samples() -> usize {
    3
}
fn default_weekday_dip_margin() -> f64 {
    0.8
}
fn default_max_correlation_insights() -> usize {
    3
}
fn default_max_medication_insights() -> usize {
    3
}
fn default_max_behavioral_insights() -> usize {
    2
}
fn default_max_anomaly_insights() -> usize {
    2
}

impl Default for Thresholds {
    fn default() -> Self {
        // serde's per-field defaults are the single source of truth
        toml::from_str("").expect("empty table must deserialize via field defaults")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let th = Thresholds::default();
        assert_eq!(th.min_correlation_pairs, 3);
        assert_eq!(th.min_anomaly_samples, 5);
        assert_eq!(th.min_medication_entries, 10);
        assert_eq!(th.min_trigger_entries, 15);
        assert_eq!(th.high_samples, 20);
        assert!((th.min_medication_confidence - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_toml_override() {
        let th: Thresholds = toml::from_str("anomaly_z = 2.2\nmax_cross_product = 50").unwrap();
        assert!((th.anomaly_z - 2.2).abs() < f64::EPSILON);
        assert_eq!(th.max_cross_product, 50);
        // Untouched fields keep their defaults
        assert_eq!(th.min_cluster_count, 3);
    }
}
