//! Topic and method affinity between a paper profile and an expanded user
//! profile.
//!
//! Each detected item credits one proximity bucket according to its
//! confidence. Bucket levels are nested, so a paper squarely on a direct
//! interest also satisfies the weaker related and adjacent levels.

use serde::{Deserialize, Serialize};

use paperscope_profiler::PaperProfile;

use crate::expand::ExpandedUserProfile;
use crate::weights::ScoringWeights;

const DIRECT_CAP: f64 = 1.0;
const RELATED_CAP: f64 = 0.85;
const ADJACENT_CAP: f64 = 0.6;

/// Affinity reported when the user gave no preference to compare against.
pub const NEUTRAL_AFFINITY: f64 = 0.5;

/// Closest proximity at which a paper meets the user's interests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Direct,
    Related,
    Adjacent,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicAffinity {
    /// In [0, 1].
    pub score: f64,
    pub match_type: MatchType,
    /// Names of paper topics on a direct or related interest, or the
    /// paper's own high-confidence topics for a user without interests.
    pub matched_topics: Vec<String>,
    /// Ids of paper topics that hit the direct set.
    pub direct_topic_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodAffinity {
    /// In [0, 1].
    pub score: f64,
    /// Names of paper methods in the user's direct or family set.
    pub matched_methods: Vec<String>,
}

pub fn topic_affinity(paper: &PaperProfile, user: &ExpandedUserProfile, weights: &ScoringWeights) -> TopicAffinity {
    if !user.has_interests {
        return TopicAffinity {
            score: NEUTRAL_AFFINITY,
            match_type: MatchType::None,
            matched_topics: paper.high_confidence_topic_names(),
            direct_topic_ids: Vec::new(),
        };
    }

    let (mut direct, mut related, mut adjacent) = (0.0, 0.0, 0.0);
    let mut matched_topics = Vec::new();
    let mut direct_topic_ids = Vec::new();
    for topic in &paper.topics {
        let credit = topic.confidence.credit();
        if user.direct_topics.contains(&topic.id) {
            direct += credit;
            matched_topics.push(topic.name.clone());
            direct_topic_ids.push(topic.id.clone());
        } else if user.expanded_topics.contains(&topic.id) {
            related += credit * weights.direct_hop_weight;
            matched_topics.push(topic.name.clone());
        } else if user.adjacent_topics.contains(&topic.id) {
            adjacent += credit * weights.adjacent_hop_weight;
        }
    }

    let direct: f64 = direct.min(DIRECT_CAP);
    let related: f64 = related.min(RELATED_CAP);
    let adjacent: f64 = adjacent.min(ADJACENT_CAP);

    let match_type = if direct > 0.3 {
        MatchType::Direct
    } else if related > 0.3 {
        MatchType::Related
    } else if adjacent > 0.2 {
        MatchType::Adjacent
    } else {
        MatchType::None
    };

    let related_level = related.max(direct);
    let adjacent_level = adjacent.max(related_level);
    let score = (0.5 * direct + 0.3 * related_level + 0.2 * adjacent_level).clamp(0.0, 1.0);

    TopicAffinity { score, match_type, matched_topics, direct_topic_ids }
}

pub fn method_affinity(paper: &PaperProfile, user: &ExpandedUserProfile, weights: &ScoringWeights) -> MethodAffinity {
    if !user.has_methods {
        return MethodAffinity { score: NEUTRAL_AFFINITY, matched_methods: Vec::new() };
    }

    let (mut direct, mut family) = (0.0, 0.0);
    let mut matched_methods = Vec::new();
    for method in &paper.methods {
        let credit = method.confidence.credit();
        if user.direct_methods.contains(&method.id) {
            direct += credit;
            matched_methods.push(method.name.clone());
        } else if user.expanded_methods.contains(&method.id) {
            family += credit * weights.direct_hop_weight;
            matched_methods.push(method.name.clone());
        }
    }

    let direct: f64 = direct.min(DIRECT_CAP);
    let family_level = family.min(RELATED_CAP).max(direct);
    let score = (0.6 * direct + 0.4 * family_level).clamp(0.0, 1.0);

    MethodAffinity { score, matched_methods }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    use paperscope_common::Confidence;
    use paperscope_profiler::{DetectedMethod, DetectedTopic, MetaFlags, TopicSource};

    fn topic(id: &str, confidence: Confidence) -> DetectedTopic {
        DetectedTopic {
            id: id.to_string(),
            name: id.to_uppercase(),
            confidence,
            evidence: vec![],
            source: TopicSource::Text,
        }
    }

    fn method(id: &str, confidence: Confidence) -> DetectedMethod {
        DetectedMethod { id: id.to_string(), name: id.to_uppercase(), confidence, evidence: vec![] }
    }

    fn paper(topics: Vec<DetectedTopic>, methods: Vec<DetectedMethod>) -> PaperProfile {
        PaperProfile { methods, topics, meta: MetaFlags::default(), quality_score: 0.8 }
    }

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn user() -> ExpandedUserProfile {
        ExpandedUserProfile {
            direct_topics: set(&["a"]),
            expanded_topics: set(&["b"]),
            adjacent_topics: set(&["c"]),
            direct_methods: set(&["m"]),
            expanded_methods: set(&["n"]),
            interest_topics: BTreeMap::new(),
            is_generalist: false,
            has_interests: true,
            has_methods: true,
            exploration_level: 0.0,
            primary_field: None,
            include_adjacent_fields: false,
            selected_adjacent_fields: vec![],
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_direct_high_topic_is_full_affinity() {
        let w = ScoringWeights::NARROW;
        let aff = topic_affinity(&paper(vec![topic("a", Confidence::High)], vec![]), &user(), &w);
        assert!(close(aff.score, 1.0));
        assert_eq!(aff.match_type, MatchType::Direct);
        assert_eq!(aff.matched_topics, vec!["A".to_string()]);
        assert_eq!(aff.direct_topic_ids, vec!["a".to_string()]);
    }

    #[test]
    fn test_related_only() {
        let w = ScoringWeights::NARROW;
        let aff = topic_affinity(&paper(vec![topic("b", Confidence::High)], vec![]), &user(), &w);
        // related = 0.7, adjacent level lifts to 0.7
        assert!(close(aff.score, 0.3 * 0.7 + 0.2 * 0.7));
        assert_eq!(aff.match_type, MatchType::Related);
    }

    #[test]
    fn test_adjacent_only() {
        let w = ScoringWeights::NARROW;
        let aff = topic_affinity(&paper(vec![topic("c", Confidence::High)], vec![]), &user(), &w);
        assert!(close(aff.score, 0.2 * 0.4));
        assert_eq!(aff.match_type, MatchType::Adjacent);
        assert!(aff.matched_topics.is_empty());
    }

    #[test]
    fn test_weak_hits_below_match_threshold() {
        let w = ScoringWeights::NARROW;
        let aff = topic_affinity(&paper(vec![topic("a", Confidence::Low)], vec![]), &user(), &w);
        assert!(close(aff.score, 0.3));
        assert_eq!(aff.match_type, MatchType::None);
    }

    #[test]
    fn test_no_interests_is_neutral() {
        let mut u = user();
        u.has_interests = false;
        let p = paper(vec![topic("x", Confidence::High), topic("y", Confidence::Medium)], vec![]);
        let aff = topic_affinity(&p, &u, &ScoringWeights::default());
        assert_eq!(aff.score, NEUTRAL_AFFINITY);
        assert_eq!(aff.matched_topics, vec!["X".to_string()]);
    }

    #[test]
    fn test_method_affinity_buckets() {
        let w = ScoringWeights::NARROW;
        let direct = method_affinity(&paper(vec![], vec![method("m", Confidence::High)]), &user(), &w);
        assert!(close(direct.score, 1.0));

        let family = method_affinity(&paper(vec![], vec![method("n", Confidence::High)]), &user(), &w);
        assert!(close(family.score, 0.4 * 0.7));
        assert_eq!(family.matched_methods, vec!["N".to_string()]);

        let none = method_affinity(&paper(vec![], vec![method("z", Confidence::High)]), &user(), &w);
        assert_eq!(none.score, 0.0);

        let mut u = user();
        u.has_methods = false;
        assert_eq!(method_affinity(&paper(vec![], vec![]), &u, &w).score, NEUTRAL_AFFINITY);
    }
}
