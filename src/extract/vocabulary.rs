//! Extraction vocabulary
//!
//! All lexicon knowledge lives here as explicitly ordered rule tables, kept
//! separate from the extraction control flow so the lexicon can be extended
//! and tested on its own. Every table is first-match-wins: the order of the
//! rules is part of the contract, and broader patterns deliberately sit
//! after the more specific ones that would otherwise shadow them (e.g.
//! "very happy" is scored before "happy").

use crate::journal::types::EventType;
use regex::Regex;
use std::collections::BTreeSet;

/// A named keyword pattern (symptoms, medications)
#[derive(Debug, Clone)]
pub struct KeywordRule {
    /// Canonical name recorded on the entry when the pattern matches
    pub name: String,
    /// Pattern matched against the lowercased note
    pub pattern: Regex,
}

/// A pattern that maps to a discrete metric score
#[derive(Debug, Clone)]
pub struct ScoreRule {
    /// Score assigned when the pattern matches
    pub score: f64,
    /// Pattern matched against the lowercased note
    pub pattern: Regex,
}

/// The full extraction lexicon
///
/// All fields are public so callers can extend or replace individual
/// tables before handing the vocabulary to an `Extractor`.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Ordered event-type rules; first match wins
    pub event_rules: Vec<(Regex, EventType)>,
    /// Symptom patterns; all matches are collected
    pub symptom_rules: Vec<KeywordRule>,
    /// Medication patterns; all matches are collected
    pub medication_rules: Vec<KeywordRule>,
    /// Ordered mood buckets (1-5); first match wins
    pub mood_rules: Vec<ScoreRule>,
    /// Ordered energy buckets (1-5); first match wins
    pub energy_rules: Vec<ScoreRule>,
    /// Ordered pain buckets (0-10); first match wins
    pub pain_rules: Vec<ScoreRule>,
    /// Patterns capturing an explicit hour count near sleep wording
    pub sleep_rules: Vec<Regex>,
    /// Nap mention; yields the fallback of one hour when no count is given
    pub nap_pattern: Regex,
    /// Generic "gave/took <word>" medication-name capture
    pub gave_took_pattern: Regex,
    /// Words the generic capture must never treat as a medication name
    pub medication_stopwords: BTreeSet<&'static str>,
    /// Dosage mention (number + unit)
    pub dosage_pattern: Regex,
    /// Ambiguous temporal wording
    pub temporal_pattern: Regex,
    /// Vague-complaint phrasing
    pub vague_pattern: Regex,
}

fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in vocabulary pattern must compile")
}

fn keyword(name: &str, pattern: &str) -> KeywordRule {
    KeywordRule {
        name: name.to_string(),
        pattern: rx(pattern),
    }
}

fn score(value: f64, pattern: &str) -> ScoreRule {
    ScoreRule {
        score: value,
        pattern: rx(pattern),
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            event_rules: vec![
                (
                    rx(r"\b(appointment|doctor|clinic|check[- ]?up|dentist|specialist)\b"),
                    EventType::Appointment,
                ),
                (
                    rx(r"\b(medication|medicine|meds|dose|pill|tablet|gave|took)\b"),
                    EventType::MedicationTaken,
                ),
                (
                    rx(r"\b(pain|ache|aching|hurt|hurting|fever|cough|nausea|dizzy|rash|symptom)\b"),
                    EventType::Symptom,
                ),
                (
                    rx(r"\b(sleep|slept|nap|napped|woke|insomnia|restless night)\b"),
                    EventType::Sleep,
                ),
                (
                    rx(r"\b(ate|eating|meal|breakfast|lunch|dinner|snack|appetite)\b"),
                    EventType::Meal,
                ),
                (
                    rx(r"\b(agitated|restless|wandering|confused|crying|upset|calm|behavior)\b"),
                    EventType::Behavior,
                ),
            ],
            symptom_rules: vec![
                keyword("headache", r"\bhead\s?aches?\b|\bmigraine\b"),
                keyword("nausea", r"\bnause(a|ous|ated)\b|\bqueasy\b"),
                keyword("vomiting", r"\bvomit(ed|ing)?\b|\bthrew up\b"),
                keyword("dizziness", r"\bdizz(y|iness)\b|\blight[- ]?headed\b"),
                keyword("fatigue", r"\bfatigue(d)?\b|\bexhausted\b|\bworn out\b"),
                keyword("fever", r"\bfever(ish)?\b|\bhigh temperature\b"),
                keyword("cough", r"\bcough(ing|s)?\b"),
                keyword("rash", r"\brash(es)?\b|\bhives\b"),
                keyword("constipation", r"\bconstipat(ed|ion)\b"),
                keyword("diarrhea", r"\bdiarrh(o)?ea\b"),
                keyword("insomnia", r"\binsomnia\b|\bcouldn'?t sleep\b"),
                keyword("anxiety", r"\banxi(ous|ety)\b|\bpanick(y|ed)\b"),
                keyword("confusion", r"\bconfus(ed|ion)\b|\bdisoriented\b"),
                keyword(
                    "shortness of breath",
                    r"\bshort(ness)? of breath\b|\bbreathless\b|\bwheezing\b",
                ),
                keyword(
                    "loss of appetite",
                    r"\bloss of appetite\b|\bno appetite\b|\bwouldn'?t eat\b|\brefused (to eat|food)\b",
                ),
                keyword("swelling", r"\bswelling\b|\bswollen\b"),
                keyword("tremor", r"\btremor(s)?\b|\bshaking hands?\b"),
            ],
            medication_rules: vec![
                keyword("ibuprofen", r"\bibuprofen\b|\badvil\b|\bmotrin\b"),
                keyword(
                    "acetaminophen",
                    r"\bacetaminophen\b|\btylenol\b|\bparacetamol\b",
                ),
                keyword("aspirin", r"\baspirin\b"),
                keyword("metformin", r"\bmetformin\b"),
                keyword("lisinopril", r"\blisinopril\b"),
                keyword("insulin", r"\binsulin\b"),
                keyword("melatonin", r"\bmelatonin\b"),
                keyword("omeprazole", r"\bomeprazole\b|\bprilosec\b"),
                keyword("donepezil", r"\bdonepezil\b|\baricept\b"),
                keyword("levothyroxine", r"\blevothyroxine\b|\bsynthroid\b"),
                keyword("antibiotic", r"\bantibiotics?\b|\bamoxicillin\b"),
            ],
            // Extremes before the milder buckets that would shadow them
            mood_rules: vec![
                score(1.0, r"\bterrible\b|\bawful\b|\bmiserable\b|\bdepressed\b|\bvery (sad|low|down)\b"),
                score(5.0, r"\bgreat\b|\bwonderful\b|\bfantastic\b|\bvery happy\b|\bexcellent spirits\b"),
                score(2.0, r"\bsad\b|\bdown\b|\blow\b|\btearful\b|\bgloomy\b"),
                score(4.0, r"\bhappy\b|\bcheerful\b|\bgood spirits\b|\bcontent\b|\bsmiling\b"),
                score(3.0, r"\bokay\b|\bok\b|\bfine\b|\bso-so\b|\balright\b|\bneutral mood\b"),
            ],
            energy_rules: vec![
                score(1.0, r"\bexhausted\b|\bno energy\b|\bcompletely drained\b|\bwiped out\b"),
                score(5.0, r"\bfull of energy\b|\bvery energetic\b|\bbursting with energy\b"),
                score(2.0, r"\bsluggish\b|\bdrained\b|\blethargic\b|\blow energy\b"),
                score(4.0, r"\benergetic\b|\blively\b|\bactive\b|\bspry\b"),
                score(3.0, r"\bsome energy\b|\bmoderate energy\b|\bup and about\b"),
            ],
            pain_rules: vec![
                score(9.0, r"\bunbearable\b|\bexcruciating\b|\bworst pain\b|\bscreaming in pain\b"),
                score(7.0, r"\bsevere pain\b|\bintense pain\b|\ba lot of pain\b|\bbad pain\b"),
                score(5.0, r"\bmoderate pain\b|\bpainful\b|\bhurting badly\b"),
                score(3.0, r"\bmild pain\b|\bsome pain\b|\baching\b|\bsore\b"),
                score(1.0, r"\bslight (pain|ache)\b|\btwinge\b|\bbarely hurts\b"),
                score(0.0, r"\bno pain\b|\bpain[- ]?free\b"),
            ],
            sleep_rules: vec![
                rx(r"(\d+(?:\.\d+)?)\s*(?:hours?|hrs?)\s*(?:of\s+)?sleep"),
                rx(r"slept\s+(?:for\s+|about\s+|around\s+)?(\d+(?:\.\d+)?)\s*(?:hours?|hrs?)"),
            ],
            nap_pattern: rx(r"\bnap(?:ped|ping|s)?\b"),
            gave_took_pattern: rx(
                r"\b(?:gave|took)\s+(?:(?:him|her|them|his|their|the|a|an|some)\s+)*([a-z][a-z-]{3,})",
            ),
            medication_stopwords: [
                "medicine",
                "medication",
                "meds",
                "pill",
                "pills",
                "tablet",
                "tablets",
                "dose",
                "temperature",
                "bath",
                "shower",
                "walk",
                "break",
                "while",
                "nothing",
                "something",
                "everything",
                "himself",
                "herself",
                "breakfast",
                "lunch",
                "dinner",
                "water",
                "time",
            ]
            .into_iter()
            .collect(),
            dosage_pattern: rx(r"\d+(?:\.\d+)?\s*(?:mg|ml|mcg|g|units?|tablets?|pills?|drops?)\b"),
            temporal_pattern: rx(r"\bearlier\b|\blater\b|\bsometime\b"),
            vague_pattern: rx(
                r"\bnot feeling well\b|\bfeeling (?:a bit |a little )?off\b|\bseem(?:s|ed)? off\b|\bunwell\b",
            ),
        }
    }
}

impl Vocabulary {
    /// First matching event-type rule, in table order
    pub fn match_event(&self, text: &str) -> Option<EventType> {
        self.event_rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(text))
            .map(|(_, event)| *event)
    }

    /// All symptom names mentioned in the text
    pub fn match_symptoms(&self, text: &str) -> BTreeSet<String> {
        self.symptom_rules
            .iter()
            .filter(|rule| rule.pattern.is_match(text))
            .map(|rule| rule.name.clone())
            .collect()
    }

    /// All known medication names mentioned in the text
    pub fn match_medications(&self, text: &str) -> BTreeSet<String> {
        self.medication_rules
            .iter()
            .filter(|rule| rule.pattern.is_match(text))
            .map(|rule| rule.name.clone())
            .collect()
    }

    /// Score the first matching bucket in an ordered table
    fn score_first(rules: &[ScoreRule], text: &str) -> Option<f64> {
        rules
            .iter()
            .find(|rule| rule.pattern.is_match(text))
            .map(|rule| rule.score)
    }

    /// Mood score from the ordered bucket table
    pub fn score_mood(&self, text: &str) -> Option<f64> {
        Self::score_first(&self.mood_rules, text)
    }

    /// Energy score from the ordered bucket table
    pub fn score_energy(&self, text: &str) -> Option<f64> {
        Self::score_first(&self.energy_rules, text)
    }

    /// Pain score from the ordered bucket table
    pub fn score_pain(&self, text: &str) -> Option<f64> {
        Self::score_first(&self.pain_rules, text)
    }

    /// Sleep hours: an explicit "<N> hours" near sleep wording, or the
    /// one-hour nap fallback
    pub fn sleep_hours(&self, text: &str) -> Option<f64> {
        for pattern in &self.sleep_rules {
            if let Some(caps) = pattern.captures(text) {
                if let Some(hours) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
                    return Some(hours);
                }
            }
        }
        if self.nap_pattern.is_match(text) {
            return Some(1.0);
        }
        None
    }

    /// Candidate medication name from the generic "gave/took <word>" form
    pub fn captured_medication(&self, text: &str) -> Option<String> {
        let caps = self.gave_took_pattern.captures(text)?;
        let word = caps.get(1)?.as_str();
        if self.medication_stopwords.contains(word) {
            return None;
        }
        Some(word.to_string())
    }

    /// Whether the text carries a dosage (number + unit)
    pub fn has_dosage(&self, text: &str) -> bool {
        self.dosage_pattern.is_match(text)
    }

    /// Whether the text uses ambiguous temporal wording
    pub fn has_temporal_ambiguity(&self, text: &str) -> bool {
        self.temporal_pattern.is_match(text)
    }

    /// Whether the text is a vague complaint
    pub fn has_vague_complaint(&self, text: &str) -> bool {
        self.vague_pattern.is_match(text)
    }
}
