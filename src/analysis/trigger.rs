//! Trigger pattern miner
//!
//! Detects "X precedes onset of Y" patterns: does a symptom newly appear
//! in the entry following one that contains a trigger? Triggers are either
//! a medication or the synthetic "high pain" day. A success is only
//! awarded when the following entry actually falls within the stated time
//! window, measured from the entry timestamps.

use crate::analysis::thresholds::Thresholds;
use crate::journal::types::JournalEntry;
use serde::Serialize;
use std::collections::BTreeSet;

/// What precedes the symptom onset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A specific medication was given
    Medication(String),
    /// Pain was at or above the configured high-pain level
    HighPain,
}

impl Trigger {
    /// Display label for insight text
    pub fn label(&self, th: &Thresholds) -> String {
        match self {
            Trigger::Medication(name) => name.clone(),
            Trigger::HighPain => format!("high pain (>= {})", th.high_pain_level),
        }
    }

    /// Stable key for insight ids
    pub fn key(&self) -> String {
        match self {
            Trigger::Medication(name) => name.replace(' ', "-"),
            Trigger::HighPain => "high-pain".to_string(),
        }
    }

    fn present_in(&self, entry: &JournalEntry, th: &Thresholds) -> bool {
        match self {
            Trigger::Medication(name) => entry.has_medication(name),
            Trigger::HighPain => entry
                .pain
                .map(|p| p >= th.high_pain_level)
                .unwrap_or(false),
        }
    }
}

/// An observed tendency for symptoms to follow a trigger
#[derive(Debug, Clone, Serialize)]
pub struct TriggerPattern {
    /// Display label of the trigger
    pub trigger: String,
    /// Symptoms that newly appeared after the trigger (at most 3)
    pub triggered_symptoms: Vec<String>,
    /// Fraction of trigger events followed by a new symptom, 0-1
    pub probability: f64,
    /// Window within which the follow-up entry had to fall
    pub time_window_hours: i64,
    /// Event-count based confidence, 0-1
    pub confidence: f64,
    /// Total trigger events observed
    pub observations: usize,
}

/// Mine one trigger against a candidate symptom vocabulary
///
/// Walks consecutive entry pairs over the date-ascending sequence.
/// Returns `None` when the trigger never fires in the history.
pub fn mine_trigger(
    entries: &[JournalEntry],
    trigger: &Trigger,
    candidates: &BTreeSet<String>,
    th: &Thresholds,
) -> Option<TriggerPattern> {
    let window_millis = th.trigger_window_hours * 3_600_000;

    let mut total_events = 0usize;
    let mut successful_events = 0usize;
    let mut triggered: BTreeSet<String> = BTreeSet::new();

    for pair in entries.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        if !trigger.present_in(current, th) {
            continue;
        }
        total_events += 1;

        // Adjacency alone is not enough: the follow-up entry must fall
        // inside the stated window
        if next.date - current.date > window_millis {
            continue;
        }

        let mut event_triggered = false;
        for symptom in candidates {
            if !current.has_symptom(symptom) && next.has_symptom(symptom) {
                event_triggered = true;
                if triggered.len() < th.max_triggered_symptoms {
                    triggered.insert(symptom.clone());
                }
            }
        }
        if event_triggered {
            successful_events += 1;
        }
    }

    if total_events == 0 {
        return None;
    }

    let (divisor, full_events) = match trigger {
        Trigger::Medication(_) => (th.trigger_confidence_divisor, th.trigger_full_events),
        Trigger::HighPain => (
            th.pain_trigger_confidence_divisor,
            th.pain_trigger_full_events,
        ),
    };
    let penalty = if total_events > full_events { 1.0 } else { 0.5 };
    let confidence = ((total_events as f64 / divisor).min(1.0) * penalty).clamp(0.0, 1.0);

    Some(TriggerPattern {
        trigger: trigger.label(th),
        triggered_symptoms: triggered.into_iter().collect(),
        probability: successful_events as f64 / total_events as f64,
        time_window_hours: th.trigger_window_hours,
        confidence,
        observations: total_events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400_000;

    fn candidates(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_medication_trigger_detected() {
        // Nausea newly appears the day after every ibuprofen day
        let mut entries = Vec::new();
        for i in 0..8 {
            let mut e = JournalEntry::new(i as i64 * DAY);
            if i % 2 == 0 {
                e.medications.insert("ibuprofen".to_string());
            } else {
                e.symptoms.insert("nausea".to_string());
            }
            entries.push(e);
        }
        let th = Thresholds::default();

        let pattern = mine_trigger(
            &entries,
            &Trigger::Medication("ibuprofen".to_string()),
            &candidates(&["nausea", "headache"]),
            &th,
        )
        .unwrap();

        assert_eq!(pattern.observations, 4);
        assert_eq!(pattern.probability, 1.0);
        assert_eq!(pattern.triggered_symptoms, vec!["nausea"]);
        assert_eq!(pattern.time_window_hours, 24);
        assert!((pattern.confidence - 0.8).abs() < 1e-9); // min(4/5,1) * 1.0
    }

    #[test]
    fn test_gap_beyond_window_is_a_failed_event() {
        // The follow-up entry is three days later; the event counts but
        // cannot succeed
        let mut first = JournalEntry::new(0);
        first.medications.insert("aspirin".to_string());
        let mut second = JournalEntry::new(3 * DAY);
        second.symptoms.insert("rash".to_string());

        let th = Thresholds::default();
        let pattern = mine_trigger(
            &[first, second],
            &Trigger::Medication("aspirin".to_string()),
            &candidates(&["rash"]),
            &th,
        )
        .unwrap();

        assert_eq!(pattern.observations, 1);
        assert_eq!(pattern.probability, 0.0);
        assert!(pattern.triggered_symptoms.is_empty());
    }

    #[test]
    fn test_high_pain_trigger() {
        let mut entries = Vec::new();
        for i in 0..6 {
            let mut e = JournalEntry::new(i as i64 * DAY);
            if i % 2 == 0 {
                e.pain = Some(8.0);
            } else {
                e.pain = Some(2.0);
                e.symptoms.insert("insomnia".to_string());
            }
            entries.push(e);
        }
        let th = Thresholds::default();

        let pattern = mine_trigger(
            &entries,
            &Trigger::HighPain,
            &candidates(&["insomnia"]),
            &th,
        )
        .unwrap();

        assert_eq!(pattern.observations, 3);
        assert_eq!(pattern.probability, 1.0);
        // High-pain variant: min(3/4, 1) * 1.0
        assert!((pattern.confidence - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_symptom_already_present_is_not_onset() {
        let mut first = JournalEntry::new(0);
        first.medications.insert("metformin".to_string());
        first.symptoms.insert("nausea".to_string());
        let mut second = JournalEntry::new(DAY);
        second.symptoms.insert("nausea".to_string());

        let th = Thresholds::default();
        let pattern = mine_trigger(
            &[first, second],
            &Trigger::Medication("metformin".to_string()),
            &candidates(&["nausea"]),
            &th,
        )
        .unwrap();

        assert_eq!(pattern.probability, 0.0);
    }

    #[test]
    fn test_trigger_never_fires_yields_none() {
        let entries = vec![JournalEntry::new(0), JournalEntry::new(DAY)];
        let th = Thresholds::default();

        assert!(mine_trigger(
            &entries,
            &Trigger::Medication("insulin".to_string()),
            &candidates(&["rash"]),
            &th,
        )
        .is_none());
    }

    #[test]
    fn test_triggered_symptoms_capped_at_three() {
        let mut first = JournalEntry::new(0);
        first.medications.insert("antibiotic".to_string());
        let mut second = JournalEntry::new(DAY);
        for s in ["rash", "nausea", "diarrhea", "headache", "fatigue"] {
            second.symptoms.insert(s.to_string());
        }

        let th = Thresholds::default();
        let pattern = mine_trigger(
            &[first, second],
            &Trigger::Medication("antibiotic".to_string()),
            &candidates(&["rash", "nausea", "diarrhea", "headache", "fatigue"]),
            &th,
        )
        .unwrap();

        assert_eq!(pattern.triggered_symptoms.len(), 3);
    }
}
