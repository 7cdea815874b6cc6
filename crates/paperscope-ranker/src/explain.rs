//! Short human-readable match explanations.

use chrono::NaiveDate;

use paperscope_common::Paper;
use paperscope_profiler::quality::age_days;
use paperscope_profiler::PaperProfile;

use crate::affinity::{MethodAffinity, TopicAffinity};
use crate::expand::ExpandedUserProfile;

pub const SEPARATOR: &str = " · ";
const MAX_PARTS: usize = 3;
const MAX_TOPIC_PARTS: usize = 2;

/// Join up to three reasons for recommending `paper`.
pub fn build_explanation(
    paper: &Paper,
    profile: &PaperProfile,
    topic: &TopicAffinity,
    method: &MethodAffinity,
    user: &ExpandedUserProfile,
    as_of: NaiveDate,
) -> String {
    let mut parts: Vec<String> = topic.matched_topics.iter().take(MAX_TOPIC_PARTS).cloned().collect();

    if user.has_methods && parts.len() < MAX_PARTS {
        if let Some(lead) = method.matched_methods.first() {
            parts.push(lead.clone());
        }
    }

    if parts.len() < MAX_PARTS {
        match paper.tier() {
            1 => parts.push("Top-tier journal".to_string()),
            2 => parts.push("Leading journal".to_string()),
            _ => {}
        }
    }

    if parts.len() < MAX_PARTS {
        if profile.meta.is_review {
            parts.push("Review".to_string());
        } else if profile.meta.is_theoretical {
            parts.push("Theoretical".to_string());
        }
    }

    if parts.is_empty() {
        if user.is_generalist {
            parts = profile.top_topic_names(MAX_TOPIC_PARTS);
        }
        if parts.is_empty() {
            let recent = age_days(paper, as_of).is_some_and(|days| days < 365);
            parts.push(if recent { "Recent research" } else { "Related research" }.to_string());
        }
    }

    parts.join(SEPARATOR)
}
