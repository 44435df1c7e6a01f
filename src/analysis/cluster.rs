//! Symptom cluster analyzer
//!
//! Finds pairs of symptoms that co-occur within the same entry often
//! enough to be worth surfacing. Pair enumeration is quadratic in the
//! number of symptoms on a single entry, which stays small in practice.

use crate::analysis::thresholds::Thresholds;
use crate::journal::types::JournalEntry;
use serde::Serialize;
use std::collections::BTreeMap;

/// A pair of symptoms that frequently appear together
#[derive(Debug, Clone, Serialize)]
pub struct SymptomCluster {
    /// The co-occurring pair, lexicographically ordered
    pub symptoms: (String, String),
    /// Co-occurrence count over the whole history
    pub occurrences: usize,
    /// occurrences / total entries, 0-1
    pub frequency: f64,
    /// min(occurrences/5, 1)
    pub confidence: f64,
}

/// Find frequently co-occurring symptom pairs
///
/// Results are sorted by frequency, highest first, with a deterministic
/// tie-break on the pair names.
pub fn symptom_clusters(entries: &[JournalEntry], th: &Thresholds) -> Vec<SymptomCluster> {
    if entries.len() < th.min_cluster_entries {
        return Vec::new();
    }

    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();

    for entry in entries {
        if entry.symptoms.len() < 2 {
            continue;
        }
        // BTreeSet iteration is sorted, so a < b holds for every pair
        let symptoms: Vec<&String> = entry.symptoms.iter().collect();
        for i in 0..symptoms.len() {
            for j in (i + 1)..symptoms.len() {
                *counts
                    .entry((symptoms[i].clone(), symptoms[j].clone()))
                    .or_insert(0) += 1;
            }
        }
    }

    let total = entries.len() as f64;
    let mut clusters: Vec<SymptomCluster> = counts
        .into_iter()
        .filter(|(_, count)| *count >= th.min_cluster_count)
        .map(|(symptoms, count)| SymptomCluster {
            symptoms,
            occurrences: count,
            frequency: count as f64 / total,
            confidence: (count as f64 / th.cluster_confidence_divisor).min(1.0),
        })
        .collect();

    clusters.sort_by(|a, b| {
        b.frequency
            .partial_cmp(&a.frequency)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.symptoms.cmp(&b.symptoms))
    });

    clusters
}
