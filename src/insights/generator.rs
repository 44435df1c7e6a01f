//! Insight generator
//!
//! Orchestrates every analyzer over one entry history, filters and caps
//! their raw results, and renders them into categorized, severity-tagged
//! insights ready for display. Output is fully deterministic for a given
//! entry list: stable sorts, ordered sets, and semantic insight ids.

use crate::analysis::{
    analyze_all_medications, analyze_trend, detect_anomalies, lagged_correlation,
    mine_trigger, symptom_clusters, Anomaly, Correlation, MedicationCorrelation,
    MedicationEffect, Severity, Significance, SymptomCluster, Thresholds, TrendDirection,
    TrendResult, Trigger, TriggerPattern,
};
use crate::insights::types::{Insight, InsightCategory, InsightType};
use crate::journal::types::{JournalEntry, Metric};
use chrono::{DateTime, Utc, Weekday};
use std::collections::BTreeSet;

/// Canonical metric pairs the correlation family examines:
/// (today-side metric, lagged metric, candidate lags, minimum strength)
const CANONICAL_PAIRS: &[(Metric, Metric, &[usize], f64)] = &[
    (Metric::Mood, Metric::Pain, &[0, 1, 2], 0.3),
    (Metric::Sleep, Metric::Energy, &[0, 1], 0.25),
    (Metric::Pain, Metric::Sleep, &[0, 1], 0.3),
    (Metric::Energy, Metric::Mood, &[0, 1], 0.25),
];

/// Metrics the trend family watches
const TREND_METRICS: &[Metric] = &[Metric::Mood, Metric::Sleep, Metric::Pain];

/// Turns one entry history into categorized insights
pub struct InsightGenerator {
    thresholds: Thresholds,
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator {
    /// Create a generator with default thresholds
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }

    /// Create a generator with custom thresholds
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Generate all insight categories for a date-ascending entry history
    ///
    /// Fewer than five entries yields exactly the "Getting Started" prompt
    /// and runs no analyzer. Families with nothing to report are omitted.
    pub fn generate(&self, entries: &[JournalEntry]) -> Vec<InsightCategory> {
        if entries.len() < self.thresholds.min_entries_for_insights {
            return vec![self.getting_started(entries.len())];
        }

        let categories: Vec<InsightCategory> = [
            self.correlation_category(entries),
            self.trend_category(entries),
            self.medication_category(entries),
            self.behavioral_category(entries),
            self.notable_category(entries),
        ]
        .into_iter()
        .flatten()
        .collect();

        tracing::debug!(
            entries = entries.len(),
            categories = categories.len(),
            insights = categories.iter().map(|c| c.insights.len()).sum::<usize>(),
            "Generated insights"
        );

        categories
    }

    fn getting_started(&self, entry_count: usize) -> InsightCategory {
        let needed = self.thresholds.min_entries_for_insights;
        let insight = Insight {
            id: "getting-started".to_string(),
            insight_type: InsightType::Recommendation,
            title: "Keep logging to unlock insights".to_string(),
            description: format!(
                "You have {} {} so far. Patterns become visible once there are at least {} \
                 entries to compare.",
                entry_count,
                plural(entry_count, "entry", "entries"),
                needed
            ),
            severity: Severity::Low,
            confidence: 1.0,
            actionable: true,
            suggestion: Some(format!(
                "Add a short note each day - mood, sleep, pain, and any medication given. \
                 {} more will get the analysis going.",
                needed.saturating_sub(entry_count)
            )),
            evidence: vec![format!("{} of {} entries logged", entry_count, needed)],
            timeframe: "so far".to_string(),
            relevant_entry_ids: vec![],
        };

        InsightCategory {
            category: "Getting Started".to_string(),
            insights: vec![insight],
            summary: "Not enough entries yet to analyze patterns.".to_string(),
        }
    }

    // -- Health Correlations --

    fn correlation_category(&self, entries: &[JournalEntry]) -> Option<InsightCategory> {
        let th = &self.thresholds;

        let mut found: Vec<Correlation> = CANONICAL_PAIRS
            .iter()
            .filter_map(|&(a, b, lags, min_strength)| {
                lagged_correlation(entries, a, b, lags, min_strength, th)
            })
            .collect();

        found.sort_by(|a, b| {
            b.strength
                .partial_cmp(&a.strength)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.metric_a.to_string().cmp(&b.metric_a.to_string()))
        });
        found.truncate(th.max_correlation_insights);

        if found.is_empty() {
            return None;
        }

        let timeframe = timeframe_weeks(entries.len());
        let insights: Vec<Insight> = found
            .iter()
            .map(|c| self.correlation_insight(c, &timeframe))
            .collect();
        let n = insights.len();

        Some(InsightCategory {
            category: "Health Correlations".to_string(),
            insights,
            summary: format!(
                "Found {} meaningful {} between tracked metrics.",
                n,
                plural(n, "correlation", "correlations")
            ),
        })
    }

    fn correlation_insight(&self, corr: &Correlation, timeframe: &str) -> Insight {
        let (title, suggestion) = correlation_template(corr.metric_a, corr.metric_b);

        let relation = if corr.coefficient > 0.0 {
            "higher"
        } else {
            "lower"
        };
        let lag_phrase = match corr.optimal_lag {
            0 => "on the same day".to_string(),
            1 => "the next day".to_string(),
            n => format!("{} days later", n),
        };
        let description = format!(
            "When {} is higher, {} tends to be {} {}.",
            corr.metric_b, corr.metric_a, relation, lag_phrase
        );

        let mut evidence = vec![format!(
            "r = {:.2} over {} paired entries",
            corr.coefficient, corr.sample_size
        )];
        if corr.optimal_lag > 0 {
            evidence.push(format!(
                "strongest at a {}-day lag",
                corr.optimal_lag
            ));
        }

        Insight {
            id: format!("correlation-{}-{}", corr.metric_a, corr.metric_b),
            insight_type: InsightType::Correlation,
            title,
            description,
            severity: if corr.significance == Significance::High {
                Severity::Medium
            } else {
                Severity::Low
            },
            confidence: round2(corr.strength),
            actionable: suggestion.is_some(),
            suggestion,
            evidence,
            timeframe: timeframe.to_string(),
            relevant_entry_ids: vec![],
        }
    }

    // -- Health Trends --

    fn trend_category(&self, entries: &[JournalEntry]) -> Option<InsightCategory> {
        let th = &self.thresholds;

        let trends: Vec<TrendResult> = TREND_METRICS
            .iter()
            .map(|&metric| analyze_trend(entries, metric, th))
            .filter(|t| {
                t.direction != TrendDirection::Stable
                    && t.significance > th.min_trend_significance
            })
            .collect();

        if trends.is_empty() {
            return None;
        }

        let insights: Vec<Insight> = trends.iter().map(|t| self.trend_insight(t)).collect();
        let n = insights.len();

        Some(InsightCategory {
            category: "Health Trends".to_string(),
            insights,
            summary: format!(
                "{} metric {} moving over time.",
                n,
                plural(n, "trend is", "trends are")
            ),
        })
    }

    fn trend_insight(&self, trend: &TrendResult) -> Insight {
        let (title, suggestion) = trend_template(trend.metric, trend.direction);

        // Worsening pain is the one trend that always warrants urgency
        let severity = match (trend.metric, trend.direction) {
            (Metric::Pain, TrendDirection::Declining) => Severity::High,
            (_, TrendDirection::Declining) => Severity::Medium,
            _ => Severity::Low,
        };

        Insight {
            id: format!("trend-{}", trend.metric),
            insight_type: InsightType::Trend,
            title,
            description: format!(
                "{} has been {} over the last {}.",
                capitalize(&trend.metric.to_string()),
                trend.direction,
                trend.timeframe()
            ),
            severity,
            confidence: round2(trend.significance),
            actionable: suggestion.is_some(),
            suggestion,
            evidence: vec![format!("fitted over {} data points", trend.data_points)],
            timeframe: trend.timeframe(),
            relevant_entry_ids: vec![],
        }
    }

    // -- Medication Insights --

    fn medication_category(&self, entries: &[JournalEntry]) -> Option<InsightCategory> {
        let th = &self.thresholds;
        if entries.len() < th.min_medication_entries {
            return None;
        }

        let mut results: Vec<MedicationCorrelation> = analyze_all_medications(entries, th)
            .into_iter()
            .filter(|r| r.confidence > th.min_medication_confidence)
            .collect();
        results.truncate(th.max_medication_insights);

        if results.is_empty() {
            return None;
        }

        let timeframe = timeframe_weeks(entries.len());
        let insights: Vec<Insight> = results
            .iter()
            .map(|r| self.medication_insight(r, &timeframe))
            .collect();
        let n = insights.len();

        Some(InsightCategory {
            category: "Medication Insights".to_string(),
            insights,
            summary: format!(
                "{} medication {} from the entry history.",
                n,
                plural(n, "signal", "signals")
            ),
        })
    }

    fn medication_insight(&self, result: &MedicationCorrelation, timeframe: &str) -> Insight {
        let (title, suggestion, severity) = match result.effect {
            MedicationEffect::Helps => (
                format!(
                    "{} appears to help with {}",
                    capitalize(&result.medication),
                    result.symptom
                ),
                Some(format!(
                    "Keep noting when {} is given so the pattern stays visible.",
                    result.medication
                )),
                Severity::Low,
            ),
            MedicationEffect::Worsens => (
                format!(
                    "{} persists despite {}",
                    capitalize(&result.symptom),
                    result.medication
                ),
                Some(format!(
                    "Mention to the care team that {} does not seem to settle after {}.",
                    result.symptom, result.medication
                )),
                Severity::Medium,
            ),
            MedicationEffect::Neutral => (
                format!(
                    "{} shows mixed results for {}",
                    capitalize(&result.medication),
                    result.symptom
                ),
                None,
                Severity::Low,
            ),
        };

        Insight {
            id: format!(
                "medication-{}-{}",
                slug(&result.medication),
                slug(&result.symptom)
            ),
            insight_type: InsightType::Recommendation,
            title,
            description: format!(
                "{} resolved by the following entry in {:.0}% of observed cases.",
                capitalize(&result.symptom),
                result.effectiveness * 100.0
            ),
            severity,
            confidence: round2(result.confidence),
            actionable: suggestion.is_some(),
            suggestion,
            evidence: vec![format!(
                "{} qualifying before/after {}",
                result.observations,
                plural(result.observations, "observation", "observations")
            )],
            timeframe: timeframe.to_string(),
            relevant_entry_ids: vec![],
        }
    }

    // -- Behavioral Patterns --

    fn behavioral_category(&self, entries: &[JournalEntry]) -> Option<InsightCategory> {
        let th = &self.thresholds;
        let timeframe = timeframe_weeks(entries.len());

        let mut insights = Vec::new();

        if let Some(insight) = self.weekday_insight(entries, &timeframe) {
            insights.push(insight);
        }

        let clusters = symptom_clusters(entries, th);
        insights.extend(
            clusters
                .iter()
                .take(th.max_behavioral_insights)
                .map(|c| self.cluster_insight(c, &timeframe)),
        );

        if entries.len() >= th.min_trigger_entries {
            insights.extend(
                self.trigger_patterns(entries)
                    .iter()
                    .take(th.max_behavioral_insights)
                    .map(|(key, pattern)| self.trigger_insight(key, pattern, &timeframe)),
            );
        }

        if insights.is_empty() {
            return None;
        }
        let n = insights.len();

        Some(InsightCategory {
            category: "Behavioral Patterns".to_string(),
            insights,
            summary: format!(
                "{} recurring {} in the entries.",
                n,
                plural(n, "pattern", "patterns")
            ),
        })
    }

    /// Per-weekday mood average against the overall average
    fn weekday_insight(&self, entries: &[JournalEntry], timeframe: &str) -> Option<Insight> {
        let th = &self.thresholds;

        let moods: Vec<(Weekday, f64)> = entries
            .iter()
            .filter_map(|e| e.weekday().zip(e.mood))
            .collect();
        if moods.is_empty() {
            return None;
        }

        let overall = moods.iter().map(|(_, m)| m).sum::<f64>() / moods.len() as f64;

        let all_days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];

        let mut worst: Option<(Weekday, f64)> = None;
        for day in all_days {
            let values: Vec<f64> = moods
                .iter()
                .filter(|(w, _)| *w == day)
                .map(|(_, m)| *m)
                .collect();
            if values.len() < th.weekday_min_samples {
                continue;
            }
            let avg = values.iter().sum::<f64>() / values.len() as f64;
            if overall - avg < th.weekday_dip_margin {
                continue;
            }
            // Earliest weekday wins ties, keeping output stable
            if worst.map(|(_, w)| avg < w).unwrap_or(true) {
                worst = Some((day, avg));
            }
        }

        let (day, avg) = worst?;
        let name = weekday_name(day);

        Some(Insight {
            id: format!("weekday-mood-{}", name.to_lowercase()),
            insight_type: InsightType::Pattern,
            title: format!("{}s tend to be harder", name),
            description: format!(
                "Average mood on {}s is {:.1}, against {:.1} across the week.",
                name, avg, overall
            ),
            severity: Severity::Medium,
            confidence: round2(((overall - avg) / overall).clamp(0.0, 1.0)),
            actionable: true,
            suggestion: Some(format!(
                "Plan a lighter routine on {}s and see whether the dip softens.",
                name
            )),
            evidence: vec![format!(
                "mood averages {:.1} on {}s vs {:.1} overall",
                avg, name, overall
            )],
            timeframe: timeframe.to_string(),
            relevant_entry_ids: vec![],
        })
    }

    fn cluster_insight(&self, cluster: &SymptomCluster, timeframe: &str) -> Insight {
        let (a, b) = &cluster.symptoms;
        Insight {
            id: format!("cluster-{}-{}", slug(a), slug(b)),
            insight_type: InsightType::Pattern,
            title: format!("{} and {} often appear together", capitalize(a), b),
            description: format!(
                "These two symptoms were logged together in {:.0}% of entries ({} times).",
                cluster.frequency * 100.0,
                cluster.occurrences
            ),
            severity: Severity::Low,
            confidence: round2(cluster.confidence),
            actionable: false,
            suggestion: None,
            evidence: vec![format!("{} co-occurrences", cluster.occurrences)],
            timeframe: timeframe.to_string(),
            relevant_entry_ids: vec![],
        }
    }

    /// Mine all observed medications plus the synthetic high-pain trigger
    fn trigger_patterns(&self, entries: &[JournalEntry]) -> Vec<(String, TriggerPattern)> {
        let th = &self.thresholds;

        let candidates: BTreeSet<String> = entries
            .iter()
            .flat_map(|e| e.symptoms.iter().cloned())
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        let medications: BTreeSet<String> = entries
            .iter()
            .flat_map(|e| e.medications.iter().cloned())
            .collect();

        let mut triggers: Vec<Trigger> = medications
            .into_iter()
            .map(Trigger::Medication)
            .collect();
        triggers.push(Trigger::HighPain);

        let mut patterns: Vec<(String, TriggerPattern)> = triggers
            .iter()
            .filter_map(|t| {
                mine_trigger(entries, t, &candidates, th).map(|p| (t.key(), p))
            })
            .filter(|(_, p)| {
                p.probability >= th.min_trigger_probability && !p.triggered_symptoms.is_empty()
            })
            .collect();

        patterns.sort_by(|(ka, a), (kb, b)| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| ka.cmp(kb))
        });

        patterns
    }

    fn trigger_insight(&self, key: &str, pattern: &TriggerPattern, timeframe: &str) -> Insight {
        let symptoms = pattern.triggered_symptoms.join(", ");

        Insight {
            id: format!("trigger-{}", key),
            insight_type: InsightType::Pattern,
            title: format!(
                "{} {} to follow {}",
                capitalize(&symptoms),
                plural(pattern.triggered_symptoms.len(), "tends", "tend"),
                pattern.trigger
            ),
            description: format!(
                "After {} appears, {} showed up within {} hours in {:.0}% of cases.",
                pattern.trigger,
                symptoms,
                pattern.time_window_hours,
                pattern.probability * 100.0
            ),
            severity: Severity::Medium,
            confidence: round2(pattern.confidence),
            actionable: true,
            suggestion: Some(format!(
                "Note the timing around {} and raise the pattern with the care team.",
                pattern.trigger
            )),
            evidence: vec![format!(
                "{} trigger {} observed",
                pattern.observations,
                plural(pattern.observations, "event", "events")
            )],
            timeframe: timeframe.to_string(),
            relevant_entry_ids: vec![],
        }
    }

    // -- Notable Events --

    fn notable_category(&self, entries: &[JournalEntry]) -> Option<InsightCategory> {
        let th = &self.thresholds;

        let anomalies = detect_anomalies(entries, th);
        if anomalies.is_empty() {
            return None;
        }

        let insights: Vec<Insight> = anomalies
            .iter()
            .take(th.max_anomaly_insights)
            .map(|a| self.anomaly_insight(a, entries))
            .collect();
        let n = insights.len();

        Some(InsightCategory {
            category: "Notable Events".to_string(),
            insights,
            summary: format!(
                "{} statistically unusual {} in the history.",
                n,
                plural(n, "reading", "readings")
            ),
        })
    }

    fn anomaly_insight(&self, anomaly: &Anomaly, entries: &[JournalEntry]) -> Insight {
        let date = entries
            .iter()
            .find(|e| e.id == anomaly.entry_id)
            .and_then(|e| DateTime::<Utc>::from_timestamp_millis(e.date))
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "an unknown date".to_string());

        Insight {
            id: format!("anomaly-{}-{}", anomaly.entry_id, anomaly.metric),
            insight_type: InsightType::Anomaly,
            title: format!(
                "Unusual {} {} on {}",
                anomaly.metric, anomaly.kind, date
            ),
            description: format!(
                "{} was {:.1}, {:.1} standard deviations from its usual level.",
                capitalize(&anomaly.metric.to_string()),
                anomaly.value,
                anomaly.z_score
            ),
            severity: anomaly.severity,
            confidence: round2(anomaly.confidence),
            actionable: false,
            suggestion: None,
            evidence: vec![format!("z-score {:.2}", anomaly.z_score)],
            timeframe: date,
            relevant_entry_ids: vec![anomaly.entry_id.clone()],
        }
    }
}

// -- templates and small helpers --

fn correlation_template(a: Metric, b: Metric) -> (String, Option<String>) {
    use Metric::*;
    match (a, b) {
        (Sleep, Energy) | (Energy, Sleep) => (
            "Sleep and energy rise and fall together".to_string(),
            Some("Protecting a consistent bedtime is likely to pay off in daytime energy.".to_string()),
        ),
        (Mood, Pain) | (Pain, Mood) => (
            "Pain and mood are linked".to_string(),
            Some("On higher-pain days, plan lighter activities and comfort measures.".to_string()),
        ),
        (Pain, Sleep) | (Sleep, Pain) => (
            "Pain is tied to sleep".to_string(),
            Some("Evening pain may be cutting into sleep; worth discussing pain timing.".to_string()),
        ),
        (Energy, Mood) | (Mood, Energy) => (
            "Energy and mood track each other".to_string(),
            Some("Gentle activity on low-energy days may lift mood as well.".to_string()),
        ),
        _ => (format!("{} and {} appear related", capitalize(&a.to_string()), b), None),
    }
}

fn trend_template(metric: Metric, direction: TrendDirection) -> (String, Option<String>) {
    use Metric::*;
    use TrendDirection::*;
    match (metric, direction) {
        (Mood, Improving) => ("Mood is trending up".to_string(), None),
        (Mood, Declining) => (
            "Mood is trending down".to_string(),
            Some("A sustained mood dip is worth mentioning to the care team.".to_string()),
        ),
        (Sleep, Improving) => ("Sleep is getting longer".to_string(), None),
        (Sleep, Declining) => (
            "Sleep is shrinking".to_string(),
            Some("Review the evening routine; sleep has been shortening.".to_string()),
        ),
        (Pain, Improving) => ("Pain is easing".to_string(), None),
        (Pain, Declining) => (
            "Pain is getting worse".to_string(),
            Some("Worsening pain deserves a conversation with their clinician.".to_string()),
        ),
        (metric, direction) => (format!("{} is {}", capitalize(&metric.to_string()), direction), None),
    }
}

fn timeframe_weeks(entry_count: usize) -> String {
    let weeks = entry_count.div_ceil(7);
    if weeks == 1 {
        "1 week".to_string()
    } else {
        format!("{} weeks", weeks)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn slug(s: &str) -> String {
    s.to_lowercase().replace(' ', "-")
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
