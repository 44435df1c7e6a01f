//! Trend analyzer
//!
//! Fits an ordinary-least-squares line to one metric across the entry
//! sequence (entries treated as equally spaced) and classifies the health
//! direction. Pain is the inverted metric: a rising pain slope reports a
//! declining (worsening) trend.

use crate::analysis::thresholds::Thresholds;
use crate::journal::types::{JournalEntry, Metric};
use serde::Serialize;

/// Health direction of a metric trend
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "improving"),
            TrendDirection::Declining => write!(f, "declining"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// A fitted linear trend for one metric
#[derive(Debug, Clone, Serialize)]
pub struct TrendResult {
    /// The metric the trend was fitted for
    pub metric: Metric,
    /// Health direction (pain is inverted: rising pain declines)
    pub direction: TrendDirection,
    /// How much of the observed range the fitted line traverses, 0-1
    pub significance: f64,
    /// Reported timeframe: ceil(n/7) weeks of data
    pub timeframe_weeks: usize,
    /// Number of values the line was fitted to
    pub data_points: usize,
}

impl TrendResult {
    /// Human-readable timeframe ("3 weeks")
    pub fn timeframe(&self) -> String {
        if self.timeframe_weeks == 1 {
            "1 week".to_string()
        } else {
            format!("{} weeks", self.timeframe_weeks)
        }
    }

    fn stable(metric: Metric, data_points: usize) -> Self {
        Self {
            metric,
            direction: TrendDirection::Stable,
            significance: 0.0,
            timeframe_weeks: data_points.div_ceil(7),
            data_points,
        }
    }
}

/// OLS slope of values against index 0..n-1
fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;

    let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();
    let sum_x2: f64 = (0..values.len()).map(|i| (i * i) as f64).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    }
}

/// Fit a linear trend to one metric across a date-ascending entry sequence
///
/// Fewer than `min_trend_points` present values, or a flat series, yields
/// a stable zero-significance result rather than an error.
pub fn analyze_trend(entries: &[JournalEntry], metric: Metric, th: &Thresholds) -> TrendResult {
    let values: Vec<f64> = entries.iter().filter_map(|e| e.metric(metric)).collect();
    let n = values.len();

    if n < th.min_trend_points {
        return TrendResult::stable(metric, n);
    }

    let slope = ols_slope(&values);

    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let range = max - min;

    // Significance is the share of the observed range the fitted line
    // covers over the whole series; a flat series has no definable trend
    let significance = if range == 0.0 {
        0.0
    } else {
        (slope.abs() * (n - 1) as f64 / range).min(1.0)
    };

    // Orient the slope so "improving" always means the person is doing
    // better, regardless of whether the metric counts up or down
    let oriented = if metric.higher_is_better() {
        slope
    } else {
        -slope
    };

    let direction = if range == 0.0 {
        TrendDirection::Stable
    } else if oriented > th.trend_slope {
        TrendDirection::Improving
    } else if oriented < -th.trend_slope {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    TrendResult {
        metric,
        direction,
        significance,
        timeframe_weeks: n.div_ceil(7),
        data_points: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mood_entries(values: &[f64]) -> Vec<JournalEntry> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| JournalEntry::new(i as i64 * 86_400_000).mood(v))
            .collect()
    }

    #[test]
    fn test_strictly_increasing_mood_improves() {
        let entries = mood_entries(&[1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 5.0]);
        let th = Thresholds::default();

        let trend = analyze_trend(&entries, Metric::Mood, &th);
        assert_eq!(trend.direction, TrendDirection::Improving);
        assert!(trend.significance > 0.3);
        assert_eq!(trend.data_points, 7);
        assert_eq!(trend.timeframe_weeks, 1);
    }

    #[test]
    fn test_too_few_points_is_stable() {
        let entries = mood_entries(&[1.0, 5.0]);
        let th = Thresholds::default();

        let trend = analyze_trend(&entries, Metric::Mood, &th);
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.significance, 0.0);
        assert_eq!(trend.data_points, 2);
    }

    #[test]
    fn test_flat_series_is_stable() {
        let entries = mood_entries(&[3.0, 3.0, 3.0, 3.0, 3.0]);
        let th = Thresholds::default();

        let trend = analyze_trend(&entries, Metric::Mood, &th);
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.significance, 0.0);
    }

    #[test]
    fn test_rising_pain_declines() {
        let entries: Vec<JournalEntry> = (0..10)
            .map(|i| JournalEntry::new(i as i64).pain(1.0 + i as f64 * 0.8))
            .collect();
        let th = Thresholds::default();

        let trend = analyze_trend(&entries, Metric::Pain, &th);
        assert_eq!(trend.direction, TrendDirection::Declining);
        assert!(trend.significance > 0.3);
    }

    #[test]
    fn test_falling_pain_improves() {
        let entries: Vec<JournalEntry> = (0..10)
            .map(|i| JournalEntry::new(i as i64).pain(9.0 - i as f64 * 0.8))
            .collect();
        let th = Thresholds::default();

        let trend = analyze_trend(&entries, Metric::Pain, &th);
        assert_eq!(trend.direction, TrendDirection::Improving);
    }

    #[test]
    fn test_missing_values_ignored() {
        let mut entries = mood_entries(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        entries.push(JournalEntry::new(999).pain(3.0)); // no mood
        let th = Thresholds::default();

        let trend = analyze_trend(&entries, Metric::Mood, &th);
        assert_eq!(trend.data_points, 5);
        assert_eq!(trend.direction, TrendDirection::Improving);
    }

    #[test]
    fn test_timeframe_weeks() {
        let entries = mood_entries(&[3.0; 16]);
        let th = Thresholds::default();
        let trend = analyze_trend(&entries, Metric::Mood, &th);
        assert_eq!(trend.timeframe_weeks, 3); // ceil(16/7)
        assert_eq!(trend.timeframe(), "3 weeks");
    }
}
