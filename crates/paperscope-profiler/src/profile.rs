//! Paper profiles: what a paper *is*, independent of any user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use paperscope_common::{normalize_text, Confidence, Paper};
use paperscope_taxonomy::Taxonomy;

use crate::concepts::detect_topics_from_concepts;
use crate::detect::{detect_methods, detect_topics_in_text, push_evidence, ChannelHit};
use crate::meta::MetaFlags;
use crate::quality::quality_score;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedMethod {
    pub id: String,
    pub name: String,
    pub confidence: Confidence,
    /// Up to three matched phrases, strongest tier first.
    pub evidence: Vec<String>,
}

/// Which channel found a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicSource {
    Text,
    ExternalTags,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedTopic {
    pub id: String,
    pub name: String,
    pub confidence: Confidence,
    /// Text phrases first, then tag names; at most three.
    pub evidence: Vec<String>,
    pub source: TopicSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperProfile {
    pub methods: Vec<DetectedMethod>,
    pub topics: Vec<DetectedTopic>,
    #[serde(flatten)]
    pub meta: MetaFlags,
    /// In [0, 1].
    pub quality_score: f64,
}

impl PaperProfile {
    pub fn method(&self, id: &str) -> Option<&DetectedMethod> {
        self.methods.iter().find(|m| m.id == id)
    }

    pub fn topic(&self, id: &str) -> Option<&DetectedTopic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Names of high-confidence topics, in profile order.
    pub fn high_confidence_topic_names(&self) -> Vec<String> {
        self.topics
            .iter()
            .filter(|t| t.confidence == Confidence::High)
            .map(|t| t.name.clone())
            .collect()
    }

    /// The first `n` topic names, strongest first.
    pub fn top_topic_names(&self, n: usize) -> Vec<String> {
        self.topics.iter().take(n).map(|t| t.name.clone()).collect()
    }
}

/// Builds [`PaperProfile`]s against one taxonomy and reference date.
///
/// The reference date anchors paper age for the recency floor, so the same
/// paper profiled with the same date always yields the same profile.
#[derive(Debug, Clone, Copy)]
pub struct PaperProfiler<'t> {
    taxonomy: &'t Taxonomy,
    as_of: NaiveDate,
}

impl<'t> PaperProfiler<'t> {
    pub fn new(taxonomy: &'t Taxonomy, as_of: NaiveDate) -> Self {
        Self { taxonomy, as_of }
    }

    pub fn taxonomy(&self) -> &'t Taxonomy {
        self.taxonomy
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn profile(&self, paper: &Paper) -> PaperProfile {
        let title = normalize_text(&paper.title);
        let text = normalize_text(&format!("{} {}", paper.title, paper.abstract_text));

        let methods = detect_methods(self.taxonomy, &text);
        let topics = merge_topics(
            self.taxonomy,
            detect_topics_in_text(self.taxonomy, &text, &title),
            detect_topics_from_concepts(self.taxonomy, &paper.concepts),
        );
        let meta = MetaFlags::classify(&text, methods.iter().map(|m| m.id.as_str()));
        let quality_score = quality_score(paper, self.as_of);

        debug!(
            "Profiled paper {}: {} methods, {} topics, quality {:.2}",
            paper.id,
            methods.len(),
            topics.len(),
            quality_score
        );

        PaperProfile { methods, topics, meta, quality_score }
    }
}

/// Combine the two topic channels, then apply topic deduplication.
///
/// A topic seen by both channels is marked `Both` and promoted to high when
/// neither channel was low. A parent topic is dropped only when it and one
/// of its children are both high.
fn merge_topics(taxonomy: &Taxonomy, text: Vec<Option<ChannelHit>>, tags: Vec<Option<ChannelHit>>) -> Vec<DetectedTopic> {
    let mut topics: Vec<DetectedTopic> = taxonomy
        .topics()
        .iter()
        .zip(text.into_iter().zip(tags))
        .filter_map(|(entry, channels)| {
            let (confidence, source, evidence) = match channels {
                (None, None) => return None,
                (Some(t), None) => (t.confidence, TopicSource::Text, t.evidence),
                (None, Some(g)) => (g.confidence, TopicSource::ExternalTags, g.evidence),
                (Some(t), Some(g)) => {
                    let confidence = if t.confidence > Confidence::Low && g.confidence > Confidence::Low {
                        Confidence::High
                    } else {
                        t.confidence.max(g.confidence)
                    };
                    let mut evidence = t.evidence;
                    for name in &g.evidence {
                        push_evidence(&mut evidence, name);
                    }
                    (confidence, TopicSource::Both, evidence)
                }
            };
            Some(DetectedTopic {
                id: entry.node.id.clone(),
                name: entry.node.name.clone(),
                confidence,
                evidence,
                source,
            })
        })
        .collect();

    let high_parents: Vec<String> = topics
        .iter()
        .filter(|t| t.confidence == Confidence::High)
        .filter_map(|t| taxonomy.topic(&t.id)?.node.parent.clone())
        .collect();
    topics.retain(|t| !(t.confidence == Confidence::High && high_parents.contains(&t.id)));
    topics.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    topics
}
