//! Free-text extraction
//!
//! Fixed-vocabulary pattern matching that turns caregiver notes into
//! structured entries:
//!
//! - **vocabulary**: ordered rule tables (the lexicon)
//! - **extractor**: control flow applying the lexicon to one note
//!
//! This is deliberately not language understanding: every decision comes
//! from an explicit, ordered pattern table that can be extended and tested
//! independently of the extractor itself.

pub mod extractor;
pub mod vocabulary;

pub use extractor::{Extraction, Extractor, InputMode};
pub use vocabulary::{KeywordRule, ScoreRule, Vocabulary};
