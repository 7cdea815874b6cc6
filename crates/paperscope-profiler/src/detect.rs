//! Lexicon detection over title + abstract.

use paperscope_common::{classify_confidence, Confidence, ConfidenceThresholds};
use paperscope_taxonomy::Taxonomy;

use crate::profile::DetectedMethod;

/// Evidence phrases kept per detection.
pub const MAX_EVIDENCE: usize = 3;

/// One channel's verdict on one topic, before merging.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelHit {
    pub confidence: Confidence,
    pub evidence: Vec<String>,
}

pub(crate) fn push_evidence(evidence: &mut Vec<String>, phrase: &str) {
    if evidence.len() < MAX_EVIDENCE && !evidence.iter().any(|e| e == phrase) {
        evidence.push(phrase.to_string());
    }
}

/// Detect methods in normalised title + abstract.
///
/// A detected child method suppresses its parent: a paper using
/// difference-in-differences is not separately reported as generic causal
/// inference. Output is ordered high → low, ties in taxonomy order.
pub fn detect_methods(taxonomy: &Taxonomy, text: &str) -> Vec<DetectedMethod> {
    let mut found = Vec::new();
    for entry in taxonomy.methods() {
        let hits = entry.lexicon.scan(text);
        if hits.counts.is_empty() {
            continue;
        }
        let Some(confidence) = classify_confidence(&hits.counts, &ConfidenceThresholds::METHODS) else {
            continue;
        };
        let mut evidence = Vec::new();
        for phrase in hits.evidence {
            push_evidence(&mut evidence, phrase);
        }
        found.push(DetectedMethod {
            id: entry.node.id.clone(),
            name: entry.node.name.clone(),
            confidence,
            evidence,
        });
    }

    let parents: Vec<String> = found
        .iter()
        .filter_map(|m| taxonomy.method(&m.id)?.node.parent.clone())
        .collect();
    found.retain(|m| !parents.contains(&m.id));
    found.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    found
}

/// Text channel for topics, one slot per taxonomy topic.
///
/// Tier counts are `matches(text) + matches(title)`, so title phrases count
/// twice. Every satisfied contextual signal adds one moderate hit.
pub fn detect_topics_in_text(taxonomy: &Taxonomy, text: &str, title: &str) -> Vec<Option<ChannelHit>> {
    taxonomy
        .topics()
        .iter()
        .map(|entry| {
            let body = entry.lexicon.scan(text);
            let heading = entry.lexicon.scan(title);
            let contextual = entry.lexicon.contextual_hits(text);

            let mut counts = body.counts + heading.counts;
            counts.moderate += contextual.len() as u32;
            if counts.is_empty() {
                return None;
            }
            let confidence = classify_confidence(&counts, &ConfidenceThresholds::TOPICS)?;

            let mut evidence = Vec::new();
            for phrase in body.evidence.into_iter().chain(heading.evidence).chain(contextual) {
                push_evidence(&mut evidence, phrase);
            }
            Some(ChannelHit { confidence, evidence })
        })
        .collect()
}
