//! Wire-level records consumed and produced by the scoring engine.
//!
//! Every field defaults when absent so that partial records from the
//! metadata fetcher degrade to neutral values instead of failing.

use serde::{Deserialize, Serialize};

/// An externally supplied concept tag with its own confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptTag {
    pub name: String,
    pub score: f64,
}

/// A paper as delivered by the metadata fetcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paper {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub journal: String,
    /// 1 (top) to 4; anything else is treated as tier 4.
    pub journal_tier: Option<i64>,
    /// `YYYY-MM-DD`, `YYYY-MM`, `YYYY` or an RFC 3339 timestamp.
    pub publication_date: Option<String>,
    pub cited_by_count: i64,
    pub concepts: Vec<ConceptTag>,
    /// economics | polisci | psychology | sociology | management | ...
    pub journal_field: Option<String>,
}

impl Paper {
    /// Citation count with negative values clamped to zero.
    pub fn citations(&self) -> u64 {
        self.cited_by_count.max(0) as u64
    }

    /// Journal tier in 1..=4; missing or out-of-range values become 4.
    pub fn tier(&self) -> u8 {
        match self.journal_tier {
            Some(t @ 1..=4) => t as u8,
            _ => 4,
        }
    }
}

/// The user's raw research profile as entered in onboarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub academic_level: String,
    pub primary_field: String,
    pub interests: Vec<String>,
    pub methods: Vec<String>,
    /// 0.0 = stay focused, 1.0 = explore broadly.
    pub exploration_level: f64,
    pub include_adjacent_fields: bool,
    pub selected_adjacent_fields: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            academic_level: String::new(),
            primary_field: String::new(),
            interests: Vec::new(),
            methods: Vec::new(),
            exploration_level: 0.5,
            include_adjacent_fields: false,
            selected_adjacent_fields: Vec::new(),
        }
    }
}

/// Coarse bucket derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Core,
    Explore,
    Discovery,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Core      => "core",
            MatchTier::Explore   => "explore",
            MatchTier::Discovery => "discovery",
        }
    }
}

/// A paper record annotated with its personalised relevance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPaper {
    #[serde(flatten)]
    pub paper: Paper,
    pub relevance_score: f64,
    pub matched_interests: Vec<String>,
    pub matched_methods: Vec<String>,
    pub matched_topics: Vec<String>,
    pub match_explanation: String,
    pub is_adjacent_field: bool,
    pub match_tier: MatchTier,
}

/// Result of scoring a paper collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub papers: Vec<ScoredPaper>,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_defaults_from_partial_json() {
        let paper: Paper = serde_json::from_str(r#"{"id": "W1", "title": "Voting"}"#).unwrap();
        assert_eq!(paper.abstract_text, "");
        assert!(paper.concepts.is_empty());
        assert_eq!(paper.tier(), 4);
        assert_eq!(paper.citations(), 0);
    }

    #[test]
    fn test_paper_clamps_malformed_numbers() {
        let paper = Paper {
            journal_tier: Some(9),
            cited_by_count: -3,
            ..Default::default()
        };
        assert_eq!(paper.tier(), 4);
        assert_eq!(paper.citations(), 0);
    }

    #[test]
    fn test_abstract_field_rename() {
        let paper: Paper = serde_json::from_str(r#"{"abstract": "We study wages."}"#).unwrap();
        assert_eq!(paper.abstract_text, "We study wages.");
    }

    #[test]
    fn test_user_profile_default_exploration() {
        let profile: UserProfile = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(profile.exploration_level, 0.5);
        assert!(profile.interests.is_empty());
    }

    #[test]
    fn test_scored_paper_flattens_record() {
        let scored = ScoredPaper {
            paper: Paper { id: "W7".to_string(), ..Default::default() },
            relevance_score: 7.2,
            matched_interests: vec![],
            matched_methods: vec![],
            matched_topics: vec![],
            match_explanation: "Top-tier journal".to_string(),
            is_adjacent_field: false,
            match_tier: MatchTier::Core,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["id"], "W7");
        assert_eq!(value["match_tier"], "core");
        assert_eq!(value["relevance_score"], 7.2);
    }
}
