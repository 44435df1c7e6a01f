//! Insight generation
//!
//! Turns raw analyzer output into categorized, human-readable findings.
//! The generator owns all display text, ranking, and per-family caps; the
//! analyzers stay purely numerical.

pub mod generator;
pub mod types;

pub use generator::InsightGenerator;
pub use types::{Insight, InsightCategory, InsightType};
