//! Insight types exposed to the presentation layer

use crate::analysis::Severity;
use serde::Serialize;

/// What kind of finding an insight reports
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Pattern,
    Correlation,
    Trend,
    Anomaly,
    Recommendation,
}

/// One human-readable finding, ready for direct display
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    /// Stable id derived from the finding's semantic key, for UI keying
    pub id: String,
    /// Kind of finding
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    /// Short headline
    pub title: String,
    /// One or two sentences describing the finding
    pub description: String,
    /// How urgent the finding is
    pub severity: Severity,
    /// Confidence in the finding, 0-1
    pub confidence: f64,
    /// Whether the caregiver can act on this directly
    pub actionable: bool,
    /// What to try, when actionable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Supporting facts, display-ready
    pub evidence: Vec<String>,
    /// Period the finding covers ("3 weeks")
    pub timeframe: String,
    /// Entries backing the finding
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relevant_entry_ids: Vec<String>,
}

/// A group of related insights with a one-line summary
#[derive(Debug, Clone, Serialize)]
pub struct InsightCategory {
    /// Category name ("Health Correlations")
    pub category: String,
    /// Ranked insights, strongest first
    pub insights: Vec<Insight>,
    /// Count-based natural-language summary
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_serializes_with_type_tag() {
        let insight = Insight {
            id: "trend-mood".to_string(),
            insight_type: InsightType::Trend,
            title: "Mood is improving".to_string(),
            description: "Mood has been climbing.".to_string(),
            severity: Severity::Low,
            confidence: 0.9,
            actionable: false,
            suggestion: None,
            evidence: vec!["7 data points".to_string()],
            timeframe: "1 week".to_string(),
            relevant_entry_ids: vec![],
        };

        let json = serde_json::to_string(&insight).unwrap();
        assert!(json.contains("\"type\":\"trend\""));
        assert!(json.contains("\"severity\":\"low\""));
        // Empty optional fields stay out of the payload
        assert!(!json.contains("suggestion"));
        assert!(!json.contains("relevant_entry_ids"));
    }
}
