//! Correlation analyzer
//!
//! Computes lag-optimized Pearson correlation between two metrics across
//! an entry sequence. A lag of N tests whether metric A today moves with
//! metric B from N entries (treated as days) earlier.

use crate::analysis::thresholds::Thresholds;
use crate::journal::types::{JournalEntry, Metric};
use serde::Serialize;

/// How trustworthy a correlation is, by strength and sample size
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Significance::High => write!(f, "high"),
            Significance::Medium => write!(f, "medium"),
            Significance::Low => write!(f, "low"),
        }
    }
}

/// A lag-optimized correlation between two metrics
#[derive(Debug, Clone, Serialize)]
pub struct Correlation {
    /// First metric (the "today" side of the lag)
    pub metric_a: Metric,
    /// Second metric (lagged into the past)
    pub metric_b: Metric,
    /// Pearson coefficient at the optimal lag, -1 to 1
    pub coefficient: f64,
    /// Absolute coefficient
    pub strength: f64,
    /// Lag (in entry positions, treated as days) that maximized |r|
    pub optimal_lag: usize,
    /// Trustworthiness tier
    pub significance: Significance,
    /// Number of aligned pairs at the optimal lag
    pub sample_size: usize,
}

/// Calculate the Pearson correlation coefficient
///
/// Returns a value between -1 and 1; a zero denominator (constant series)
/// yields 0 rather than NaN.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x.powi(2)) * (n * sum_y2 - sum_y.powi(2))).sqrt();

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Build aligned (a[i], b[i-lag]) pairs where both values are present
fn lagged_pairs(
    entries: &[JournalEntry],
    metric_a: Metric,
    metric_b: Metric,
    lag: usize,
) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();

    for i in lag..entries.len() {
        if let (Some(a), Some(b)) = (
            entries[i].metric(metric_a),
            entries[i - lag].metric(metric_b),
        ) {
            xs.push(a);
            ys.push(b);
        }
    }

    (xs, ys)
}

fn significance_of(strength: f64, sample_size: usize, th: &Thresholds) -> Significance {
    if strength > th.high_strength && sample_size >= th.high_samples {
        Significance::High
    } else if strength > th.medium_strength && sample_size >= th.medium_samples {
        Significance::Medium
    } else {
        Significance::Low
    }
}

/// Find the lag (from the candidate set) that maximizes |r| for a metric
/// pair over a date-ascending entry sequence
///
/// Returns `None` when no lag yields enough pairs, or when the best |r|
/// falls below `min_strength`. Ties keep the earliest candidate lag.
pub fn lagged_correlation(
    entries: &[JournalEntry],
    metric_a: Metric,
    metric_b: Metric,
    lags: &[usize],
    min_strength: f64,
    th: &Thresholds,
) -> Option<Correlation> {
    let mut best: Option<(usize, f64, usize)> = None; // (lag, r, n)

    for &lag in lags {
        let (xs, ys) = lagged_pairs(entries, metric_a, metric_b, lag);
        if xs.len() < th.min_correlation_pairs {
            continue;
        }

        let r = pearson(&xs, &ys);
        match best {
            Some((_, best_r, _)) if r.abs() <= best_r.abs() => {}
            _ => best = Some((lag, r, xs.len())),
        }
    }

    let (lag, r, n) = best?;
    let strength = r.abs();
    if strength < min_strength {
        return None;
    }

    Some(Correlation {
        metric_a,
        metric_b,
        coefficient: r,
        strength,
        optimal_lag: lag,
        significance: significance_of(strength, n, th),
        sample_size: n,
    })
}
