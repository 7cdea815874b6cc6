//! User profile expansion.
//!
//! Onboarding labels resolve to taxonomy ids, and the taxonomy graph then
//! widens them: related topics one or two hops out, looser adjacent topics
//! further out the more the user wants to explore, and the one-hop family
//! of every chosen method.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use paperscope_common::UserProfile;
use paperscope_taxonomy::{Taxonomy, TopicEdges};

/// A user profile resolved against the taxonomy.
///
/// The three topic sets are disjoint, and so are the two method sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedUserProfile {
    pub direct_topics: BTreeSet<String>,
    pub expanded_topics: BTreeSet<String>,
    pub adjacent_topics: BTreeSet<String>,
    pub direct_methods: BTreeSet<String>,
    pub expanded_methods: BTreeSet<String>,
    /// Interest label → the topic ids it resolved to.
    pub interest_topics: BTreeMap<String, BTreeSet<String>>,
    pub is_generalist: bool,
    pub has_interests: bool,
    pub has_methods: bool,
    /// In [0, 1].
    pub exploration_level: f64,
    /// Canonical field id, when the user's field is recognised.
    pub primary_field: Option<String>,
    pub include_adjacent_fields: bool,
    /// Canonical field ids the user opted in to.
    pub selected_adjacent_fields: Vec<String>,
}

impl ExpandedUserProfile {
    /// Whether the user names a recognised, specific home field.
    pub fn specific_field(&self) -> Option<&str> {
        if self.is_generalist {
            return None;
        }
        self.primary_field.as_deref()
    }

    /// Interest labels whose topics include any of `topic_ids`.
    pub fn interests_matching(&self, topic_ids: &[&str]) -> Vec<String> {
        self.interest_topics
            .iter()
            .filter(|(_, ids)| topic_ids.iter().any(|t| ids.contains(*t)))
            .map(|(label, _)| label.clone())
            .collect()
    }
}

/// Exploration level for scoring: non-finite values fall back to
/// `default_level`, everything else is clamped to [0, 1].
pub fn sanitize_exploration(level: f64, default_level: f64) -> f64 {
    if !level.is_finite() {
        warn!("Non-finite exploration level, using {default_level}");
        return default_level;
    }
    if !(0.0..=1.0).contains(&level) {
        warn!("Exploration level {level} outside [0, 1], clamping");
    }
    level.clamp(0.0, 1.0)
}

/// Resolve and widen a raw profile.
pub fn expand_profile(taxonomy: &Taxonomy, profile: &UserProfile, default_exploration: f64) -> ExpandedUserProfile {
    let exploration_level = sanitize_exploration(profile.exploration_level, default_exploration);

    let mut direct_topics = BTreeSet::new();
    let mut interest_topics = BTreeMap::new();
    for label in &profile.interests {
        let ids = taxonomy.interest_ids(label);
        if ids.is_empty() {
            warn!("Unknown interest '{label}', ignoring");
            continue;
        }
        direct_topics.extend(ids.iter().cloned());
        interest_topics.insert(label.clone(), ids.into_iter().collect::<BTreeSet<_>>());
    }

    let mut direct_methods = BTreeSet::new();
    for label in &profile.methods {
        let ids = taxonomy.method_ids(label);
        if ids.is_empty() {
            warn!("Unknown method '{label}', ignoring");
        }
        direct_methods.extend(ids);
    }

    let direct_depth = if exploration_level > 0.7 { 2 } else { 1 };
    let expanded_topics = taxonomy.topic_neighborhood(&direct_topics, direct_depth, TopicEdges::Related);

    let adjacent_depth = (1.0 + 2.0 * exploration_level).round() as usize;
    let adjacent_topics: BTreeSet<String> = taxonomy
        .topic_neighborhood(&direct_topics, adjacent_depth, TopicEdges::RelatedAndAdjacent)
        .into_iter()
        .filter(|id| !expanded_topics.contains(id))
        .collect();

    let expanded_methods: BTreeSet<String> = direct_methods
        .iter()
        .flat_map(|id| taxonomy.method_family(id))
        .filter(|id| !direct_methods.contains(id))
        .collect();

    let fields = taxonomy.fields();
    let has_interests = !direct_topics.is_empty();
    let has_methods = !direct_methods.is_empty();
    let level_is_generalist = !profile.academic_level.trim().is_empty() && fields.is_generalist(&profile.academic_level);
    let is_generalist = fields.is_generalist(&profile.primary_field) || level_is_generalist || !has_interests;

    let primary_field = fields.canonical(&profile.primary_field).map(str::to_string);
    let selected_adjacent_fields = profile
        .selected_adjacent_fields
        .iter()
        .filter_map(|raw| {
            let id = fields.canonical(raw);
            if id.is_none() {
                warn!("Unknown adjacent field '{raw}', ignoring");
            }
            id.map(str::to_string)
        })
        .collect();

    debug!(
        "Expanded profile '{}': {} direct / {} expanded / {} adjacent topics, {} + {} methods, e={:.2}",
        profile.name,
        direct_topics.len(),
        expanded_topics.len(),
        adjacent_topics.len(),
        direct_methods.len(),
        expanded_methods.len(),
        exploration_level
    );

    ExpandedUserProfile {
        direct_topics,
        expanded_topics,
        adjacent_topics,
        direct_methods,
        expanded_methods,
        interest_topics,
        is_generalist,
        has_interests,
        has_methods,
        exploration_level,
        primary_field,
        include_adjacent_fields: profile.include_adjacent_fields,
        selected_adjacent_fields,
    }
}
