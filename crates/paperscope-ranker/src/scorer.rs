//! Exploration-aware relevance scoring.
//!
//! total = clamp((baseline + topic_bonus + method_bonus + discovery_bonus)
//!               × field_modifier, 1, 10), rounded to one decimal.
//!
//! Weights shift with the user's exploration level: focused users are
//! rewarded for close topical matches, explorers for high-quality papers
//! just outside their interests and for neighbouring fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use paperscope_common::config::TierConfig;
use paperscope_common::{EngineConfig, MatchTier, Paper, ScoredPaper, UserProfile};
use paperscope_profiler::{PaperProfile, PaperProfiler};
use paperscope_taxonomy::Taxonomy;

use crate::affinity::{method_affinity, topic_affinity, MatchType, MethodAffinity, TopicAffinity};
use crate::expand::{expand_profile, ExpandedUserProfile};
use crate::explain::build_explanation;
use crate::weights::ScoringWeights;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Baseline for a quality-0 paper.
const QUALITY_BASELINE_FLOOR: f64 = 3.0;
/// Below this quality an off-interest paper earns no discovery bonus.
const DISCOVERY_MIN_QUALITY: f64 = 0.5;
const OPTED_IN_FIELD_MODIFIER: f64 = 0.95;
/// Field relevance when either field is unknown.
const UNKNOWN_FIELD_RELEVANCE: f64 = 0.5;

/// Additive components before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub baseline: f64,
    pub topic_bonus: f64,
    pub method_bonus: f64,
    pub discovery_bonus: f64,
    pub field_modifier: f64,
    /// (baseline + bonuses) × field_modifier.
    pub raw: f64,
}

/// Each component normalised to [0, 1]. `baseline` is the position between
/// the quality-0 floor and the quality-1 maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub baseline: f64,
    pub topic_affinity: f64,
    pub method_affinity: f64,
    pub quality: f64,
    pub field_relevance: f64,
    pub discovery: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// In [1, 10], one decimal.
    pub total: f64,
    pub components: ScoreComponents,
    pub sub_scores: SubScores,
    pub match_type: MatchType,
    pub topic: TopicAffinity,
    pub method: MethodAffinity,
    pub matched_interests: Vec<String>,
    pub explanation: String,
    pub is_adjacent_field: bool,
    pub match_tier: MatchTier,
}

/// A score with everything that went into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: MatchScore,
    pub profile: PaperProfile,
    pub weights: ScoringWeights,
}

/// Tier for a final score.
pub fn tier_for(score: f64, tiers: &TierConfig) -> MatchTier {
    if score >= tiers.core {
        MatchTier::Core
    } else if score >= tiers.explore {
        MatchTier::Explore
    } else {
        MatchTier::Discovery
    }
}

/// Bonus for a good paper just outside the user's direct interests.
///
/// `cross_field_affinity` is the affinity between the user's specific field
/// and a different paper field; 0 when either is unknown or they match.
pub fn discovery_bonus(
    has_interests: bool,
    match_type: MatchType,
    quality: f64,
    cross_field_affinity: f64,
    weights: &ScoringWeights,
) -> f64 {
    if !has_interests {
        return quality * weights.discovery_max * 0.5;
    }
    if match_type == MatchType::Direct || quality < DISCOVERY_MIN_QUALITY {
        return 0.0;
    }

    let adjacent_bump = if match_type == MatchType::Adjacent { 0.4 } else { 0.15 };
    let quality_bump = (quality - DISCOVERY_MIN_QUALITY) * 1.5;
    let field_bump = cross_field_affinity * weights.field_affinity_max;

    ((adjacent_bump + quality_bump) * weights.discovery_max / 3.0 + field_bump).min(weights.discovery_max)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scores papers for users against one taxonomy and reference date.
#[derive(Debug, Clone)]
pub struct RelevanceScorer<'t> {
    profiler: PaperProfiler<'t>,
    config: EngineConfig,
}

impl RelevanceScorer<'static> {
    /// Embedded taxonomy, default configuration.
    pub fn with_defaults(as_of: NaiveDate) -> Self {
        Self::new(Taxonomy::embedded(), EngineConfig::default(), as_of)
    }
}

impl<'t> RelevanceScorer<'t> {
    pub fn new(taxonomy: &'t Taxonomy, config: EngineConfig, as_of: NaiveDate) -> Self {
        Self { profiler: PaperProfiler::new(taxonomy, as_of), config }
    }

    pub fn taxonomy(&self) -> &'t Taxonomy {
        self.profiler.taxonomy()
    }

    pub fn profiler(&self) -> &PaperProfiler<'t> {
        &self.profiler
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve a raw profile against this scorer's taxonomy.
    pub fn expand(&self, profile: &UserProfile) -> ExpandedUserProfile {
        expand_profile(self.taxonomy(), profile, self.config.scoring.default_exploration_level)
    }

    pub fn score(&self, paper: &Paper, user: &ExpandedUserProfile) -> MatchScore {
        self.score_detailed(paper, user).score
    }

    /// Score one paper and keep its profile and the weights used.
    pub fn score_detailed(&self, paper: &Paper, user: &ExpandedUserProfile) -> ScoreBreakdown {
        let profile = self.profiler.profile(paper);
        let weights = ScoringWeights::for_exploration(user.exploration_level);
        let quality = profile.quality_score;

        let topic = topic_affinity(&profile, user, &weights);
        let method = method_affinity(&profile, user, &weights);

        let baseline = QUALITY_BASELINE_FLOOR + quality * (weights.quality_baseline_max - QUALITY_BASELINE_FLOOR);
        let topic_bonus = topic.score * weights.topic_max * if user.has_interests { 1.0 } else { 0.5 };
        let method_bonus = method.score * weights.method_max * if user.has_methods { 1.0 } else { 0.3 };

        let fields = self.taxonomy().fields();
        let paper_field = paper.journal_field.as_deref().and_then(|raw| fields.canonical(raw));
        let user_field = user.specific_field();

        let cross_field_affinity = match (user_field, paper_field) {
            (Some(u), Some(p)) if u != p => fields.affinity(u, p),
            _ => 0.0,
        };
        let discovery_bonus = discovery_bonus(user.has_interests, topic.match_type, quality, cross_field_affinity, &weights);

        let is_adjacent_field = match (user_field, paper_field) {
            (Some(u), Some(p)) => fields.is_adjacent(u, p),
            _ => false,
        };
        let field_modifier = if !is_adjacent_field {
            1.0
        } else if user.include_adjacent_fields
            && paper_field.is_some_and(|p| {
                user.selected_adjacent_fields.is_empty() || user.selected_adjacent_fields.iter().any(|s| s == p)
            })
        {
            OPTED_IN_FIELD_MODIFIER
        } else {
            0.8 + 0.1 * user.exploration_level
        };

        let raw = (baseline + topic_bonus + method_bonus + discovery_bonus) * field_modifier;
        let total = round_to_tenth(raw.clamp(MIN_SCORE, MAX_SCORE));
        let match_tier = tier_for(total, &self.config.tiers);

        let field_relevance = match (user_field, paper_field) {
            (Some(u), Some(p)) => fields.affinity(u, p),
            _ => UNKNOWN_FIELD_RELEVANCE,
        };
        let sub_scores = SubScores {
            baseline:        (baseline - QUALITY_BASELINE_FLOOR) / (weights.quality_baseline_max - QUALITY_BASELINE_FLOOR),
            topic_affinity:  topic.score,
            method_affinity: method.score,
            quality,
            field_relevance,
            discovery:       if weights.discovery_max > 0.0 { discovery_bonus / weights.discovery_max } else { 0.0 },
        };

        let direct_ids: Vec<&str> = topic.direct_topic_ids.iter().map(String::as_str).collect();
        let matched_interests = user.interests_matching(&direct_ids);
        let explanation = build_explanation(paper, &profile, &topic, &method, user, self.profiler.as_of());

        debug!(
            "Paper {}: total={total:.1} baseline={baseline:.2} topic={topic_bonus:.2} method={method_bonus:.2} \
             discovery={discovery_bonus:.2} field×{field_modifier:.2} ({:?})",
            paper.id, topic.match_type
        );

        let score = MatchScore {
            total,
            components: ScoreComponents { baseline, topic_bonus, method_bonus, discovery_bonus, field_modifier, raw },
            sub_scores,
            match_type: topic.match_type,
            topic,
            method,
            matched_interests,
            explanation,
            is_adjacent_field,
            match_tier,
        };

        ScoreBreakdown { score, profile, weights }
    }

    /// The paper record annotated with its score.
    pub fn to_scored_paper(&self, paper: &Paper, user: &ExpandedUserProfile) -> ScoredPaper {
        let score = self.score(paper, user);
        ScoredPaper {
            paper: paper.clone(),
            relevance_score: score.total,
            matched_interests: score.matched_interests,
            matched_methods: score.method.matched_methods,
            matched_topics: score.topic.matched_topics,
            match_explanation: score.explanation,
            is_adjacent_field: score.is_adjacent_field,
            match_tier: score.match_tier,
        }
    }

    /// Expand `profile` and score a single paper.
    pub fn score_paper(&self, paper: &Paper, profile: &UserProfile) -> ScoredPaper {
        self.to_scored_paper(paper, &self.expand(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperscope_test_utils::{
        causal_inference_profile, formal_theory_paper, generalist_profile, labor_economist_profile,
        minimum_wage_did_paper, polarization_media_paper, political_scientist_profile, recent_uncited_paper,
        reference_corpus, reference_date,
    };

    fn scorer() -> RelevanceScorer<'static> {
        RelevanceScorer::with_defaults(reference_date())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_tier_boundaries() {
        let tiers = TierConfig::default();
        assert_eq!(tier_for(7.0, &tiers), MatchTier::Core);
        assert_eq!(tier_for(6.999, &tiers), MatchTier::Explore);
        assert_eq!(tier_for(5.0, &tiers), MatchTier::Explore);
        assert_eq!(tier_for(4.999, &tiers), MatchTier::Discovery);
        assert_eq!(tier_for(1.0, &tiers), MatchTier::Discovery);
    }

    #[test]
    fn test_discovery_bonus_adjacent_cross_field() {
        // (0.4 + 0.4 × 1.5) × 3 / 3 + 0.7 × 1.0
        let bonus = discovery_bonus(true, MatchType::Adjacent, 0.9, 0.7, &ScoringWeights::EXPLORATORY);
        assert!(close(bonus, 1.7), "{bonus}");
    }

    #[test]
    fn test_discovery_bonus_unmatched_and_related() {
        // (0.15 + 0.4 × 1.5) × 0.5 / 3
        for match_type in [MatchType::None, MatchType::Related] {
            let bonus = discovery_bonus(true, match_type, 0.9, 0.0, &ScoringWeights::NARROW);
            assert!(close(bonus, 0.125), "{match_type:?}: {bonus}");
        }
        let bonus = discovery_bonus(true, MatchType::None, 0.7, 0.0, &ScoringWeights::EXPLORATORY);
        assert!(close(bonus, 0.15 + 0.3), "{bonus}");
    }

    #[test]
    fn test_discovery_bonus_capped() {
        let weights = ScoringWeights { discovery_max: 1.0, field_affinity_max: 1.0, ..ScoringWeights::NARROW };
        // uncapped: (0.4 + 0.75) / 3 + 1.0
        assert_eq!(discovery_bonus(true, MatchType::Adjacent, 1.0, 1.0, &weights), 1.0);
    }

    #[test]
    fn test_discovery_bonus_zero_cases() {
        let w = ScoringWeights::EXPLORATORY;
        assert_eq!(discovery_bonus(true, MatchType::Direct, 1.0, 1.0, &w), 0.0);
        assert_eq!(discovery_bonus(true, MatchType::Adjacent, 0.49, 1.0, &w), 0.0);
    }

    #[test]
    fn test_discovery_bonus_without_interests() {
        let bonus = discovery_bonus(false, MatchType::None, 0.8, 0.7, &ScoringWeights::EXPLORATORY);
        assert!(close(bonus, 0.8 * 3.0 * 0.5), "{bonus}");
    }

    #[test]
    fn test_adjacent_cross_field_paper() {
        let s = scorer();
        let mut profile = political_scientist_profile();
        profile.interests = vec!["Polarization".to_string()];
        profile.exploration_level = 1.0;
        let breakdown = s.score_detailed(&minimum_wage_did_paper(), &s.expand(&profile));
        let score = &breakdown.score;

        assert!(close(breakdown.profile.quality_score, 0.96));
        assert_eq!(score.match_type, MatchType::Adjacent);
        assert!(score.is_adjacent_field);
        // (0.4 + 0.46 × 1.5) × 3 / 3 + economics/polisci affinity 0.7
        assert!(close(score.components.discovery_bonus, 1.79), "{}", score.components.discovery_bonus);
        assert!(close(score.components.field_modifier, 0.95));
    }

    #[test]
    fn test_generalist_with_interests_gets_no_field_bump() {
        let s = scorer();
        let user = s.expand(&causal_inference_profile(1.0));
        assert!(user.is_generalist);
        let w = ScoringWeights::EXPLORATORY;
        for paper in reference_corpus() {
            let breakdown = s.score_detailed(&paper, &user);
            let (score, q) = (&breakdown.score, breakdown.profile.quality_score);
            let expected = if score.match_type == MatchType::Direct || q < 0.5 {
                0.0
            } else {
                let bump = if score.match_type == MatchType::Adjacent { 0.4 } else { 0.15 };
                (bump + (q - 0.5) * 1.5) * w.discovery_max / 3.0
            };
            assert!(close(score.components.discovery_bonus, expected), "{}", paper.id);
            assert_eq!(score.components.field_modifier, 1.0);
        }
    }

    #[test]
    fn test_baseline_and_partial_bonuses() {
        let s = scorer();

        // interests, no methods, e = 0
        let c = s.score(&minimum_wage_did_paper(), &s.expand(&causal_inference_profile(0.0)));
        assert!(close(c.components.baseline, 3.0 + 0.96 * 2.0));
        assert!(close(c.components.topic_bonus, 3.0));
        assert!(close(c.components.method_bonus, 0.5 * 1.5 * 0.3));
        assert!(close(c.sub_scores.baseline, 0.96));

        // neither interests nor methods, e = 0.5
        let g = s.score(&polarization_media_paper(), &s.expand(&generalist_profile()));
        assert!(close(g.components.baseline, 5.25));
        assert!(close(g.components.topic_bonus, 0.5 * 2.0 * 0.5));
        assert!(close(g.components.method_bonus, 0.5 * 1.0 * 0.3));
        assert!(close(g.sub_scores.baseline, 1.0));
    }

    #[test]
    fn test_non_finite_exploration_uses_configured_default() {
        let mut config = EngineConfig::default();
        config.scoring.default_exploration_level = 0.2;
        let s = RelevanceScorer::new(Taxonomy::embedded(), config, reference_date());
        let mut profile = labor_economist_profile();
        profile.exploration_level = f64::NAN;
        let breakdown = s.score_detailed(&minimum_wage_did_paper(), &s.expand(&profile));
        assert_eq!(breakdown.weights, ScoringWeights::for_exploration(0.2));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to_tenth(8.145), 8.1);
        assert_eq!(round_to_tenth(6.875), 6.9);
        assert_eq!(round_to_tenth(10.0), 10.0);
    }

    #[test]
    fn test_components_add_up() {
        let s = scorer();
        for profile in [labor_economist_profile(), political_scientist_profile(), causal_inference_profile(0.7)] {
            let user = s.expand(&profile);
            for paper in reference_corpus() {
                let c = s.score(&paper, &user).components;
                let sum = (c.baseline + c.topic_bonus + c.method_bonus + c.discovery_bonus) * c.field_modifier;
                assert!(close(sum, c.raw), "{}", paper.id);
            }
        }
    }

    #[test]
    fn test_sub_scores_normalised() {
        let s = scorer();
        let user = s.expand(&political_scientist_profile());
        for paper in reference_corpus() {
            let sub = s.score(&paper, &user).sub_scores;
            for value in [sub.baseline, sub.topic_affinity, sub.method_affinity, sub.quality, sub.field_relevance, sub.discovery] {
                assert!((0.0..=1.0).contains(&value), "{}: {value}", paper.id);
            }
        }
    }

    #[test]
    fn test_unopted_adjacent_field_is_dampened() {
        let s = scorer();
        let mut profile = political_scientist_profile();
        let opted = s.score(&minimum_wage_did_paper(), &s.expand(&profile));
        assert!(opted.is_adjacent_field);
        assert!(close(opted.components.field_modifier, 0.95));

        profile.include_adjacent_fields = false;
        let dampened = s.score(&minimum_wage_did_paper(), &s.expand(&profile));
        assert!(close(dampened.components.field_modifier, 0.8 + 0.1 * 0.6));
        assert!(dampened.components.raw < opted.components.raw);
    }

    #[test]
    fn test_same_field_not_adjacent() {
        let s = scorer();
        let score = s.score(&minimum_wage_did_paper(), &s.expand(&labor_economist_profile()));
        assert!(!score.is_adjacent_field);
        assert_eq!(score.components.field_modifier, 1.0);
    }

    #[test]
    fn test_low_quality_off_interest_gets_no_discovery() {
        let s = scorer();
        let user = s.expand(&labor_economist_profile());
        // tier 4, uncited but recent: quality 0.6 × 0.35 + 0.4 × 0.5 = 0.41
        let score = s.score(&recent_uncited_paper(), &user);
        assert!(score.sub_scores.quality < 0.5);
        assert_eq!(score.components.discovery_bonus, 0.0);
    }

    #[test]
    fn test_scored_paper_carries_matches() {
        let s = scorer();
        let scored = s.score_paper(&minimum_wage_did_paper(), &labor_economist_profile());
        assert_eq!(scored.paper.id, "W-minwage");
        assert_eq!(scored.matched_interests, vec!["Labor Economics".to_string()]);
        assert_eq!(scored.matched_methods.first().map(String::as_str), Some("Difference-in-Differences"));
        assert_eq!(scored.match_tier, MatchTier::Core);
    }

    #[test]
    fn test_off_field_theory_paper_stays_out_of_core() {
        let s = scorer();
        let score = s.score(&formal_theory_paper(), &s.expand(&labor_economist_profile()));
        assert_ne!(score.match_type, MatchType::Direct);
        assert_ne!(score.match_tier, MatchTier::Core);
    }
}
