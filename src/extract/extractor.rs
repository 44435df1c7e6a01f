//! Entry extractor
//!
//! Turns one free-text caregiver note into a partially-filled journal
//! entry plus a list of uncertainty flags and a confidence score. Pure
//! function over the note: no I/O, never fails — when nothing matches the
//! entry simply stays sparse and confidence drops.

use crate::extract::vocabulary::Vocabulary;
use crate::journal::types::JournalEntry;
use serde::Serialize;

/// How the note was captured
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Voice,
    Text,
}

impl InputMode {
    /// Tag recorded on the extracted entry
    pub fn as_tag(&self) -> &'static str {
        match self {
            InputMode::Voice => "voice",
            InputMode::Text => "text",
        }
    }
}

/// Result of extracting one note
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    /// The partially-filled entry (not yet persisted; no id)
    pub entry: JournalEntry,
    /// Human-readable reasons the extraction is uncertain
    pub uncertainties: Vec<String>,
    /// Overall confidence in the extraction, 0-1
    pub confidence: f64,
}

/// Heuristic text-to-entry extractor
pub struct Extractor {
    vocabulary: Vocabulary,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Create an extractor with the built-in lexicon
    pub fn new() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
        }
    }

    /// Create an extractor with a custom lexicon
    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// The lexicon in use
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Extract a structured entry from one note
    pub fn extract(&self, text: &str, date: i64, mode: InputMode) -> Extraction {
        let lower = text.to_lowercase();
        let vocab = &self.vocabulary;

        let mut entry = JournalEntry::new(date).note(text).tag(mode.as_tag());

        if let Some(event) = vocab.match_event(&lower) {
            entry.event_type = Some(event);
        }

        entry.symptoms = vocab.match_symptoms(&lower);

        entry.medications = vocab.match_medications(&lower);
        if let Some(candidate) = vocab.captured_medication(&lower) {
            // Known-vocabulary matches already cover brand-name aliases;
            // the generic capture only adds genuinely new names
            if vocab.match_medications(&candidate).is_empty() {
                entry.medications.insert(candidate);
            }
        }

        entry.mood = vocab.score_mood(&lower);
        entry.energy = vocab.score_energy(&lower);
        entry.pain = vocab.score_pain(&lower);
        entry.sleep_hours = vocab.sleep_hours(&lower);

        let mut uncertainties = Vec::new();
        if vocab.has_temporal_ambiguity(&lower) {
            uncertainties.push("ambiguous time reference in note".to_string());
        }
        if !entry.medications.is_empty() && !vocab.has_dosage(&lower) {
            uncertainties.push("medication mentioned without a dosage".to_string());
        }
        if vocab.has_vague_complaint(&lower) {
            uncertainties.push("vague complaint without a specific symptom".to_string());
        }

        let populated = entry.populated_fields() as f64;
        let total = JournalEntry::STRUCTURED_FIELDS as f64;
        let confidence =
            ((1.0 - 0.1 * uncertainties.len() as f64) * (populated / total)).clamp(0.0, 1.0);

        tracing::debug!(
            populated = populated as usize,
            uncertainties = uncertainties.len(),
            confidence,
            "Extracted entry from note"
        );

        Extraction {
            entry,
            uncertainties,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::types::{EventType, Metric};

    fn extract(text: &str) -> Extraction {
        Extractor::new().extract(text, 1_700_000_000_000, InputMode::Text)
    }

    #[test]
    fn test_rich_note() {
        let result = extract(
            "Gave her 200 mg ibuprofen for a severe pain flare-up. \
             She was sad and exhausted, slept for 5 hours last night.",
        );
        let entry = &result.entry;

        assert_eq!(entry.event_type, Some(EventType::MedicationTaken));
        assert!(entry.has_medication("ibuprofen"));
        assert_eq!(entry.metric(Metric::Pain), Some(7.0));
        assert_eq!(entry.metric(Metric::Mood), Some(2.0));
        assert_eq!(entry.metric(Metric::Energy), Some(1.0));
        assert_eq!(entry.metric(Metric::Sleep), Some(5.0));
        // Dosage present, no vague or temporal wording
        assert!(result.uncertainties.is_empty());
        assert!(result.confidence > 0.7);
    }

    #[test]
    fn test_empty_note_yields_sparse_entry() {
        let result = extract("quiet day");
        let entry = &result.entry;

        assert!(entry.event_type.is_none());
        assert!(entry.symptoms.is_empty());
        assert!(entry.medications.is_empty());
        assert!(entry.mood.is_none());
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_medication_without_dosage_flags_uncertainty() {
        let result = extract("took tylenol sometime earlier");

        assert!(result.entry.has_medication("acetaminophen"));
        assert_eq!(result.uncertainties.len(), 2); // temporal + no dosage
        assert!(result.confidence > 0.0);
    }

    #[test]
    fn test_vague_complaint() {
        let result = extract("she was not feeling well today");
        assert!(result
            .uncertainties
            .iter()
            .any(|u| u.contains("vague complaint")));
    }

    #[test]
    fn test_generic_medication_capture_feeds_entry() {
        let result = extract("gave him gabapentin 100 mg before bed");
        assert!(result.entry.has_medication("gabapentin"));
    }

    #[test]
    fn test_mode_recorded_as_tag() {
        let result = Extractor::new().extract("took a nap", 0, InputMode::Voice);
        assert!(result.entry.tags.contains("voice"));
        assert_eq!(result.entry.sleep_hours, Some(1.0));
    }

    #[test]
    fn test_confidence_scales_with_populated_fields() {
        let sparse = extract("she was happy");
        let rich = extract("she was happy and energetic, no pain, slept 8 hours of sleep");
        assert!(rich.confidence > sparse.confidence);
    }

    #[test]
    fn test_extraction_never_panics_on_odd_input() {
        for text in ["", "   ", "!!!", "1234567890", "\n\t"] {
            let result = extract(text);
            assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
        }
    }
}
