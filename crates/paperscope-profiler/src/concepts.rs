//! Concept-tag channel.
//!
//! The metadata fetcher attaches subject tags with their own confidence
//! score. A tag hits a topic tier when it contains one of the tier's
//! phrases, or when a multi-word tag appears as whole words inside one.
//! Single-word tags such as "Economics" only match forward. The tag's
//! score then keeps or demotes the hit before the usual confidence rules
//! run.

use tracing::warn;

use paperscope_common::text::{contains_term, contains_words, SHORT_TERM_MAX_CHARS};
use paperscope_common::{classify_confidence, normalize_text, ConceptTag, ConfidenceThresholds, PhraseMatcher, SignalCounts};
use paperscope_taxonomy::{CompiledLexicon, Taxonomy};

use crate::detect::{push_evidence, ChannelHit};

/// Tags scoring at least this keep their tier.
const FULL_CREDIT_SCORE: f64 = 0.6;
/// Tags below this are ignored.
const MIN_TAG_SCORE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Strong,
    Moderate,
    Weak,
}

impl Tier {
    fn demote(self) -> Option<Tier> {
        match self {
            Tier::Strong => Some(Tier::Moderate),
            Tier::Moderate => Some(Tier::Weak),
            Tier::Weak => None,
        }
    }
}

fn tag_matches(tag: &str, phrase: &str) -> bool {
    if tag.chars().count() <= SHORT_TERM_MAX_CHARS {
        return tag == phrase;
    }
    contains_term(tag, phrase) || (tag.contains(' ') && contains_words(phrase, tag))
}

/// Highest lexicon tier the tag hits.
fn best_tier(lexicon: &CompiledLexicon, tag: &str) -> Option<Tier> {
    let hits = |matcher: &PhraseMatcher| matcher.terms().iter().any(|p| tag_matches(tag, p));
    if hits(&lexicon.strong) {
        Some(Tier::Strong)
    } else if hits(&lexicon.moderate) {
        Some(Tier::Moderate)
    } else if hits(&lexicon.weak) {
        Some(Tier::Weak)
    } else {
        None
    }
}

struct UsableTag<'a> {
    normalized: String,
    name: &'a str,
    score: f64,
}

fn usable_tags(concepts: &[ConceptTag]) -> Vec<UsableTag<'_>> {
    concepts
        .iter()
        .filter_map(|tag| {
            if !tag.score.is_finite() {
                warn!("Ignoring concept tag '{}' with non-finite score", tag.name);
                return None;
            }
            if tag.score < MIN_TAG_SCORE {
                return None;
            }
            let normalized = normalize_text(&tag.name);
            (!normalized.is_empty()).then_some(UsableTag { normalized, name: &tag.name, score: tag.score })
        })
        .collect()
}

/// Concept channel for topics, one slot per taxonomy topic.
pub fn detect_topics_from_concepts(taxonomy: &Taxonomy, concepts: &[ConceptTag]) -> Vec<Option<ChannelHit>> {
    let tags = usable_tags(concepts);
    if tags.is_empty() {
        return vec![None; taxonomy.topics().len()];
    }

    taxonomy
        .topics()
        .iter()
        .map(|entry| {
            let mut counts = SignalCounts::default();
            let mut evidence = Vec::new();
            for tag in &tags {
                let tier = best_tier(&entry.lexicon, &tag.normalized)
                    .and_then(|t| if tag.score >= FULL_CREDIT_SCORE { Some(t) } else { t.demote() });
                let Some(tier) = tier else {
                    continue;
                };
                match tier {
                    Tier::Strong => counts.strong += 1,
                    Tier::Moderate => counts.moderate += 1,
                    Tier::Weak => counts.weak += 1,
                }
                push_evidence(&mut evidence, tag.name);
            }
            let confidence = classify_confidence(&counts, &ConfidenceThresholds::CONCEPTS)?;
            Some(ChannelHit { confidence, evidence })
        })
        .collect()
}
