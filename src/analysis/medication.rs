//! Medication effectiveness analyzer
//!
//! Scores whether a medication tends to resolve a symptom by walking
//! consecutive pairs of the entries that mention either one. The model
//! tracks symptom presence only, not intensity: a symptom that persists
//! into the next entry is scored as "not helped", which is the closest
//! the data gets to "worsened".

use crate::analysis::thresholds::Thresholds;
use crate::journal::types::JournalEntry;
use serde::Serialize;
use std::collections::BTreeSet;

/// Overall read on a (symptom, medication) pair
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MedicationEffect {
    Helps,
    Worsens,
    Neutral,
}

impl std::fmt::Display for MedicationEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MedicationEffect::Helps => write!(f, "helps"),
            MedicationEffect::Worsens => write!(f, "worsens"),
            MedicationEffect::Neutral => write!(f, "neutral"),
        }
    }
}

/// Effectiveness signal for one (symptom, medication) pair
#[derive(Debug, Clone, Serialize)]
pub struct MedicationCorrelation {
    /// The symptom being treated
    pub symptom: String,
    /// The medication being scored
    pub medication: String,
    /// Overall classification
    pub effect: MedicationEffect,
    /// Fraction of observations where the symptom resolved, 0-1
    pub effectiveness: f64,
    /// Observation-count based confidence, 0-1
    pub confidence: f64,
    /// Qualifying before/after observations
    pub observations: usize,
}

/// Score one (symptom, medication) pair over the full entry sequence
pub fn medication_effect(
    entries: &[JournalEntry],
    symptom: &str,
    medication: &str,
    th: &Thresholds,
) -> MedicationCorrelation {
    // Only entries mentioning either side matter; order is preserved
    let relevant: Vec<&JournalEntry> = entries
        .iter()
        .filter(|e| e.has_symptom(symptom) || e.has_medication(medication))
        .collect();

    let mut helpful = 0usize;
    let mut worsening = 0usize;

    for pair in relevant.windows(2) {
        let (previous, current) = (pair[0], pair[1]);

        // An observation requires the medication to have been given while
        // the symptom was present
        if !(previous.has_medication(medication) && previous.has_symptom(symptom)) {
            continue;
        }

        if current.has_symptom(symptom) {
            worsening += 1;
        } else {
            helpful += 1;
        }
    }

    let observations = helpful + worsening;

    let effectiveness = if observations == 0 {
        0.0
    } else {
        helpful as f64 / observations as f64
    };

    let penalty = if observations > th.medication_full_observations {
        1.0
    } else {
        0.5
    };
    let confidence =
        (observations as f64 / th.medication_confidence_divisor).min(1.0) * penalty;

    let effect = if effectiveness > th.helps_effectiveness {
        MedicationEffect::Helps
    } else if effectiveness < th.worsens_effectiveness && worsening > helpful {
        MedicationEffect::Worsens
    } else {
        MedicationEffect::Neutral
    };

    MedicationCorrelation {
        symptom: symptom.to_string(),
        medication: medication.to_string(),
        effect,
        effectiveness,
        confidence,
        observations,
    }
}

/// Score every observed symptom x medication pair
///
/// Pairs are enumerated in sorted order and capped at
/// `max_cross_product` so a runaway vocabulary cannot blow the run up.
/// Results are sorted by confidence then effectiveness, strongest first.
pub fn analyze_all_medications(
    entries: &[JournalEntry],
    th: &Thresholds,
) -> Vec<MedicationCorrelation> {
    let symptoms: BTreeSet<&str> = entries
        .iter()
        .flat_map(|e| e.symptoms.iter().map(String::as_str))
        .collect();
    let medications: BTreeSet<&str> = entries
        .iter()
        .flat_map(|e| e.medications.iter().map(String::as_str))
        .collect();

    let mut results = Vec::new();

    'outer: for medication in &medications {
        for symptom in &symptoms {
            if results.len() >= th.max_cross_product {
                tracing::warn!(
                    cap = th.max_cross_product,
                    "Symptom x medication cross product capped"
                );
                break 'outer;
            }
            results.push(medication_effect(entries, symptom, medication, th));
        }
    }

    results.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.effectiveness
                    .partial_cmp(&a.effectiveness)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.medication.cmp(&b.medication))
            .then_with(|| a.symptom.cmp(&b.symptom))
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Day-spaced entries; `(symptom?, medication?)` per day
    fn history(days: &[(Option<&str>, Option<&str>)]) -> Vec<JournalEntry> {
        days.iter()
            .enumerate()
            .map(|(i, (symptom, medication))| {
                let mut e = JournalEntry::new(i as i64 * 86_400_000);
                if let Some(s) = symptom {
                    e.symptoms.insert(s.to_string());
                }
                if let Some(m) = medication {
                    e.medications.insert(m.to_string());
                }
                e
            })
            .collect()
    }

    #[test]
    fn test_consistently_helpful_medication() {
        // Headache treated with ibuprofen resolves by the next entry,
        // four times over
        let entries = history(&[
            (Some("headache"), Some("ibuprofen")),
            (None, Some("ibuprofen")),
            (Some("headache"), Some("ibuprofen")),
            (None, Some("ibuprofen")),
            (Some("headache"), Some("ibuprofen")),
            (None, Some("ibuprofen")),
            (Some("headache"), Some("ibuprofen")),
            (None, Some("ibuprofen")),
        ]);
        let th = Thresholds::default();

        let result = medication_effect(&entries, "headache", "ibuprofen", &th);
        assert_eq!(result.observations, 4);
        assert_eq!(result.effectiveness, 1.0);
        assert_eq!(result.effect, MedicationEffect::Helps);
        assert!((result.confidence - 0.8).abs() < 1e-9); // min(4/5,1) * 1.0
    }

    #[test]
    fn test_persistent_symptom_scores_as_not_helped() {
        let entries = history(&[
            (Some("nausea"), Some("omeprazole")),
            (Some("nausea"), Some("omeprazole")),
            (Some("nausea"), Some("omeprazole")),
            (Some("nausea"), None),
        ]);
        let th = Thresholds::default();

        let result = medication_effect(&entries, "nausea", "omeprazole", &th);
        assert_eq!(result.observations, 3);
        assert_eq!(result.effectiveness, 0.0);
        assert_eq!(result.effect, MedicationEffect::Worsens);
    }

    #[test]
    fn test_no_cooccurrence_yields_zero_confidence() {
        // Medication and symptom never appear in the same entry
        let entries = history(&[
            (Some("headache"), None),
            (None, Some("melatonin")),
            (Some("headache"), None),
            (None, Some("melatonin")),
        ]);
        let th = Thresholds::default();

        let result = medication_effect(&entries, "headache", "melatonin", &th);
        assert_eq!(result.observations, 0);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.effect, MedicationEffect::Neutral);
    }

    #[test]
    fn test_few_observations_halve_confidence() {
        let entries = history(&[
            (Some("cough"), Some("antibiotic")),
            (None, None),
            (Some("cough"), Some("antibiotic")),
            (None, None),
        ]);
        let th = Thresholds::default();

        let result = medication_effect(&entries, "cough", "antibiotic", &th);
        assert_eq!(result.observations, 2);
        // min(2/5, 1) * 0.5
        assert!((result.confidence - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_all_covers_cross_product() {
        let entries = history(&[
            (Some("headache"), Some("ibuprofen")),
            (None, None),
            (Some("nausea"), Some("ibuprofen")),
            (None, None),
        ]);
        let th = Thresholds::default();

        let results = analyze_all_medications(&entries, &th);
        assert_eq!(results.len(), 2); // 2 symptoms x 1 medication
    }

    #[test]
    fn test_cross_product_cap() {
        let mut entries = Vec::new();
        for i in 0..30 {
            let mut e = JournalEntry::new(i as i64);
            e.symptoms.insert(format!("symptom{}", i));
            e.medications.insert(format!("med{}", i));
            entries.push(e);
        }
        let th = Thresholds::default();

        let results = analyze_all_medications(&entries, &th);
        assert_eq!(results.len(), th.max_cross_product); // 900 pairs capped
    }
}
