//! Confidence classification for lexicon detections.
//!
//! Every detector (methods, topics via text, topics via concept tags) turns
//! tiered signal counts into a label with the same rule shape; only the
//! literal thresholds differ, so each call site passes its own
//! [`ConfidenceThresholds`].

use serde::{Deserialize, Serialize};

/// Detection confidence. Ordered so that `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low    => "low",
            Confidence::Medium => "medium",
            Confidence::High   => "high",
        }
    }

    /// Credit a detection contributes to an affinity bucket.
    pub fn credit(&self) -> f64 {
        match self {
            Confidence::High   => 1.0,
            Confidence::Medium => 0.6,
            Confidence::Low    => 0.3,
        }
    }

    /// One step down; `None` once below low.
    pub fn demote(self) -> Option<Self> {
        match self {
            Confidence::High   => Some(Confidence::Medium),
            Confidence::Medium => Some(Confidence::Low),
            Confidence::Low    => None,
        }
    }
}

/// Distinct phrase hits per lexicon tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalCounts {
    pub strong: u32,
    pub moderate: u32,
    pub weak: u32,
    pub negative: u32,
}

impl SignalCounts {
    pub fn is_empty(&self) -> bool {
        self.strong == 0 && self.moderate == 0 && self.weak == 0
    }
}

impl std::ops::Add for SignalCounts {
    type Output = SignalCounts;

    fn add(self, rhs: SignalCounts) -> SignalCounts {
        SignalCounts {
            strong: self.strong + rhs.strong,
            moderate: self.moderate + rhs.moderate,
            weak: self.weak + rhs.weak,
            negative: self.negative + rhs.negative,
        }
    }
}

/// Threshold set for [`classify_confidence`].
///
/// Rules are checked top to bottom; the first one satisfied wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceThresholds {
    /// `strong >= n` → high
    pub high_strong: u32,
    /// `strong >= a && moderate >= b` → high
    pub high_strong_with_moderate: (u32, u32),
    /// `moderate >= n` → high
    pub high_moderate: Option<u32>,
    /// `strong >= n` → medium
    pub medium_strong: u32,
    /// `moderate >= n` → medium
    pub medium_moderate: u32,
    /// `moderate >= a && weak >= b` → low
    pub low_moderate_with_weak: Option<(u32, u32)>,
    /// `weak >= n` → low
    pub low_weak: Option<u32>,
}

impl ConfidenceThresholds {
    /// Method detection from title and abstract.
    pub const METHODS: ConfidenceThresholds = ConfidenceThresholds {
        high_strong: 2,
        high_strong_with_moderate: (1, 1),
        high_moderate: None,
        medium_strong: 1,
        medium_moderate: 2,
        low_moderate_with_weak: Some((1, 1)),
        low_weak: None,
    };

    /// Topic detection from text (title hits count twice).
    pub const TOPICS: ConfidenceThresholds = ConfidenceThresholds {
        high_strong: 2,
        high_strong_with_moderate: (1, 1),
        high_moderate: Some(3),
        medium_strong: 1,
        medium_moderate: 2,
        low_moderate_with_weak: Some((1, 1)),
        low_weak: Some(2),
    };

    /// Topic detection from external concept tags.
    pub const CONCEPTS: ConfidenceThresholds = ConfidenceThresholds {
        high_strong: 2,
        high_strong_with_moderate: (1, 1),
        high_moderate: None,
        medium_strong: 1,
        medium_moderate: 1,
        low_moderate_with_weak: None,
        low_weak: Some(1),
    };
}

/// Classify tiered signal counts into a confidence label.
///
/// Negative hits demote medium to low and drop low entirely; a high
/// classification is never overridden by negatives.
pub fn classify_confidence(counts: &SignalCounts, t: &ConfidenceThresholds) -> Option<Confidence> {
    let base = if counts.strong >= t.high_strong {
        Some(Confidence::High)
    } else if counts.strong >= t.high_strong_with_moderate.0
        && counts.moderate >= t.high_strong_with_moderate.1
    {
        Some(Confidence::High)
    } else if t.high_moderate.is_some_and(|n| counts.moderate >= n) {
        Some(Confidence::High)
    } else if counts.strong >= t.medium_strong {
        Some(Confidence::Medium)
    } else if counts.moderate >= t.medium_moderate {
        Some(Confidence::Medium)
    } else if t
        .low_moderate_with_weak
        .is_some_and(|(m, w)| counts.moderate >= m && counts.weak >= w)
    {
        Some(Confidence::Low)
    } else if t.low_weak.is_some_and(|n| counts.weak >= n) {
        Some(Confidence::Low)
    } else {
        None
    };

    match base {
        Some(Confidence::High) => Some(Confidence::High),
        Some(level) if counts.negative > 0 => level.demote(),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: ConfidenceThresholds = ConfidenceThresholds::METHODS;

    fn counts(strong: u32, moderate: u32, weak: u32, negative: u32) -> SignalCounts {
        SignalCounts { strong, moderate, weak, negative }
    }

    #[test]
    fn test_strong_signals_give_high() {
        assert_eq!(classify_confidence(&counts(2, 0, 0, 0), &RULES), Some(Confidence::High));
        assert_eq!(classify_confidence(&counts(1, 1, 0, 0), &RULES), Some(Confidence::High));
    }

    #[test]
    fn test_medium_and_low_rules() {
        assert_eq!(classify_confidence(&counts(1, 0, 0, 0), &RULES), Some(Confidence::Medium));
        assert_eq!(classify_confidence(&counts(0, 2, 0, 0), &RULES), Some(Confidence::Medium));
        assert_eq!(classify_confidence(&counts(0, 1, 1, 0), &RULES), Some(Confidence::Low));
        assert_eq!(classify_confidence(&counts(0, 1, 0, 0), &RULES), None);
        assert_eq!(classify_confidence(&counts(0, 0, 5, 0), &RULES), None);
    }

    #[test]
    fn test_negative_demotes_but_never_overrides_high() {
        assert_eq!(classify_confidence(&counts(2, 0, 0, 3), &RULES), Some(Confidence::High));
        assert_eq!(classify_confidence(&counts(1, 0, 0, 1), &RULES), Some(Confidence::Low));
        assert_eq!(classify_confidence(&counts(0, 1, 1, 1), &RULES), None);
    }

    #[test]
    fn test_topic_rules_accept_moderate_and_weak_only() {
        let topics = ConfidenceThresholds::TOPICS;
        assert_eq!(classify_confidence(&counts(0, 3, 0, 0), &topics), Some(Confidence::High));
        assert_eq!(classify_confidence(&counts(0, 0, 2, 0), &topics), Some(Confidence::Low));
        assert_eq!(classify_confidence(&counts(0, 0, 1, 0), &topics), None);
    }

    #[test]
    fn test_concept_rules() {
        let concepts = ConfidenceThresholds::CONCEPTS;
        assert_eq!(classify_confidence(&counts(0, 1, 0, 0), &concepts), Some(Confidence::Medium));
        assert_eq!(classify_confidence(&counts(0, 0, 1, 0), &concepts), Some(Confidence::Low));
        assert_eq!(classify_confidence(&counts(1, 1, 0, 0), &concepts), Some(Confidence::High));
    }

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
        assert_eq!(Confidence::Low.demote(), None);
    }
}
