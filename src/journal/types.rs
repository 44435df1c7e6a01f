//! Core data types for the carelog journal
//!
//! This module defines the fundamental types used throughout the crate:
//! - `JournalEntry`: a single timestamped caregiver observation
//! - `Metric`: the four bounded numeric metrics an entry may carry
//! - `EventType`: coarse classification of what an entry describes

use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The four numeric metrics tracked per entry
///
/// Each metric is optional on an entry and bounded when present.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Overall mood, 1-5
    Mood,
    /// Energy level, 1-5
    Energy,
    /// Pain level, 0-10
    Pain,
    /// Hours of sleep, >= 0
    Sleep,
}

impl Metric {
    /// Get all metrics for iteration
    pub fn all() -> &'static [Metric] {
        &[Metric::Mood, Metric::Energy, Metric::Pain, Metric::Sleep]
    }

    /// Valid value range (inclusive) for this metric
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Metric::Mood => (1.0, 5.0),
            Metric::Energy => (1.0, 5.0),
            Metric::Pain => (0.0, 10.0),
            Metric::Sleep => (0.0, f64::INFINITY),
        }
    }

    /// Whether a higher value means the person is doing better
    ///
    /// Pain is the inverted metric: a rising pain series is a worsening
    /// one, and trend direction is reported accordingly.
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, Metric::Pain)
    }

    /// Check a value against this metric's bounds
    pub fn in_bounds(&self, value: f64) -> bool {
        let (min, max) = self.bounds();
        value >= min && value <= max
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Mood => write!(f, "mood"),
            Metric::Energy => write!(f, "energy"),
            Metric::Pain => write!(f, "pain"),
            Metric::Sleep => write!(f, "sleep"),
        }
    }
}

/// Coarse classification of what an entry describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Appointment,
    MedicationTaken,
    Symptom,
    Sleep,
    Meal,
    Behavior,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Appointment => write!(f, "appointment"),
            EventType::MedicationTaken => write!(f, "medication_taken"),
            EventType::Symptom => write!(f, "symptom"),
            EventType::Sleep => write!(f, "sleep"),
            EventType::Meal => write!(f, "meal"),
            EventType::Behavior => write!(f, "behavior"),
        }
    }
}

/// A single caregiver observation
///
/// Entries are sparse: every numeric metric is optional and absence never
/// means zero. Symptom/medication/tag sets are ordered (`BTreeSet`) so
/// serialized output and downstream analysis are deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    /// Unique identifier (assigned by the store when first saved)
    #[serde(default)]
    pub id: String,
    /// Observation time, Unix timestamp in milliseconds
    pub date: i64,
    /// Mood rating, 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<f64>,
    /// Energy level, 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// Pain level, 0-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain: Option<f64>,
    /// Hours of sleep, >= 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Observed symptoms
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub symptoms: BTreeSet<String>,
    /// Medications given or taken
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub medications: BTreeSet<String>,
    /// Free-form tags (input source, caregiver labels)
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    /// What kind of event this entry records, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    /// The raw caregiver note
    #[serde(default)]
    pub free_text: String,
    /// When the entry was first persisted (Unix ms, assigned by the store)
    #[serde(default)]
    pub created_at: i64,
    /// When the entry was last edited (Unix ms; only set on edit)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl JournalEntry {
    /// Create an empty entry at the given observation time
    pub fn new(date: i64) -> Self {
        Self {
            id: String::new(),
            date,
            mood: None,
            energy: None,
            pain: None,
            sleep_hours: None,
            symptoms: BTreeSet::new(),
            medications: BTreeSet::new(),
            tags: BTreeSet::new(),
            event_type: None,
            free_text: String::new(),
            created_at: 0,
            updated_at: None,
        }
    }

    /// Builder: set mood
    pub fn mood(mut self, value: f64) -> Self {
        self.mood = Some(value);
        self
    }

    /// Builder: set energy
    pub fn energy(mut self, value: f64) -> Self {
        self.energy = Some(value);
        self
    }

    /// Builder: set pain
    pub fn pain(mut self, value: f64) -> Self {
        self.pain = Some(value);
        self
    }

    /// Builder: set sleep hours
    pub fn sleep_hours(mut self, value: f64) -> Self {
        self.sleep_hours = Some(value);
        self
    }

    /// Builder: add a symptom
    pub fn symptom(mut self, name: impl Into<String>) -> Self {
        self.symptoms.insert(name.into());
        self
    }

    /// Builder: add a medication
    pub fn medication(mut self, name: impl Into<String>) -> Self {
        self.medications.insert(name.into());
        self
    }

    /// Builder: add a tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Builder: set the free-text note
    pub fn note(mut self, text: impl Into<String>) -> Self {
        self.free_text = text.into();
        self
    }

    /// Builder: set the event type
    pub fn event(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    /// Get the value of a metric, if present
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Mood => self.mood,
            Metric::Energy => self.energy,
            Metric::Pain => self.pain,
            Metric::Sleep => self.sleep_hours,
        }
    }

    /// Whether the entry mentions a symptom
    pub fn has_symptom(&self, name: &str) -> bool {
        self.symptoms.contains(name)
    }

    /// Whether the entry mentions a medication
    pub fn has_medication(&self, name: &str) -> bool {
        self.medications.contains(name)
    }

    /// The weekday of the observation (UTC)
    pub fn weekday(&self) -> Option<Weekday> {
        DateTime::<Utc>::from_timestamp_millis(self.date).map(|dt| dt.date_naive().weekday())
    }

    /// Check every present metric against its bound
    ///
    /// Returns the first offending metric and value, if any. Out-of-range
    /// values are an ingestion problem; the analytics pipeline assumes
    /// entries it receives have already passed this check.
    pub fn validate(&self) -> Result<(), (Metric, f64)> {
        for &metric in Metric::all() {
            if let Some(value) = self.metric(metric) {
                if !metric.in_bounds(value) || value.is_nan() {
                    return Err((metric, value));
                }
            }
        }
        Ok(())
    }

    /// Number of structured fields that carry data
    ///
    /// Counts the four metrics, symptoms, medications, and event type.
    pub fn populated_fields(&self) -> usize {
        let mut count = 0;
        for &metric in Metric::all() {
            if self.metric(metric).is_some() {
                count += 1;
            }
        }
        if !self.symptoms.is_empty() {
            count += 1;
        }
        if !self.medications.is_empty() {
            count += 1;
        }
        if self.event_type.is_some() {
            count += 1;
        }
        count
    }

    /// Total number of structured fields the extractor can fill
    pub const STRUCTURED_FIELDS: usize = 7;
}
