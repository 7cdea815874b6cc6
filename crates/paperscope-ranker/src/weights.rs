//! Exploration-dependent scoring weights.
//!
//! Each weight is a straight line between a "narrow" endpoint (exploration
//! level 0: reward close topical matches) and an "exploratory" endpoint
//! (level 1: reward discovery and neighbouring fields).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Points for a perfect topic affinity.
    pub topic_max: f64,
    /// Points for a perfect method affinity.
    pub method_max: f64,
    /// Cap on the discovery bonus.
    pub discovery_max: f64,
    /// Points for a fully affine neighbouring field.
    pub field_affinity_max: f64,
    /// Baseline for a quality-1.0 paper; quality 0 sits at 3.0.
    pub quality_baseline_max: f64,
    /// Credit multiplier one hop from a direct interest.
    pub direct_hop_weight: f64,
    /// Credit multiplier for adjacent-topic hits.
    pub adjacent_hop_weight: f64,
}

impl ScoringWeights {
    pub const NARROW: ScoringWeights = ScoringWeights {
        topic_max:            3.0,
        method_max:           1.5,
        discovery_max:        0.5,
        field_affinity_max:   0.0,
        quality_baseline_max: 5.0,
        direct_hop_weight:    0.7,
        adjacent_hop_weight:  0.4,
    };

    pub const EXPLORATORY: ScoringWeights = ScoringWeights {
        topic_max:            1.0,
        method_max:           0.5,
        discovery_max:        3.0,
        field_affinity_max:   1.0,
        quality_baseline_max: 5.5,
        direct_hop_weight:    0.8,
        adjacent_hop_weight:  0.6,
    };

    /// Weights for an exploration level, clamped to [0, 1]. Non-finite
    /// levels are resolved upstream by `expand::sanitize_exploration`.
    pub fn for_exploration(level: f64) -> Self {
        let e = level.clamp(0.0, 1.0);
        let (n, x) = (Self::NARROW, Self::EXPLORATORY);
        let lerp = |a: f64, b: f64| a + (b - a) * e;
        Self {
            topic_max:            lerp(n.topic_max, x.topic_max),
            method_max:           lerp(n.method_max, x.method_max),
            discovery_max:        lerp(n.discovery_max, x.discovery_max),
            field_affinity_max:   lerp(n.field_affinity_max, x.field_affinity_max),
            quality_baseline_max: lerp(n.quality_baseline_max, x.quality_baseline_max),
            direct_hop_weight:    lerp(n.direct_hop_weight, x.direct_hop_weight),
            adjacent_hop_weight:  lerp(n.adjacent_hop_weight, x.adjacent_hop_weight),
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::for_exploration(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(ScoringWeights::for_exploration(0.0), ScoringWeights::NARROW);
        assert_eq!(ScoringWeights::for_exploration(1.0), ScoringWeights::EXPLORATORY);
    }

    #[test]
    fn test_midpoint() {
        let w = ScoringWeights::for_exploration(0.5);
        assert!(close(w.topic_max, 2.0));
        assert!(close(w.method_max, 1.0));
        assert!(close(w.discovery_max, 1.75));
        assert!(close(w.field_affinity_max, 0.5));
        assert!(close(w.quality_baseline_max, 5.25));
    }

    #[test]
    fn test_topic_falls_and_discovery_rises_with_exploration() {
        let mut prev = ScoringWeights::for_exploration(0.0);
        for step in 1..=20 {
            let w = ScoringWeights::for_exploration(step as f64 / 20.0);
            assert!(w.topic_max < prev.topic_max);
            assert!(w.method_max < prev.method_max);
            assert!(w.discovery_max > prev.discovery_max);
            prev = w;
        }
    }

    #[test]
    fn test_out_of_range_levels_clamped() {
        assert_eq!(ScoringWeights::for_exploration(-3.0), ScoringWeights::NARROW);
        assert_eq!(ScoringWeights::for_exploration(7.0), ScoringWeights::EXPLORATORY);
    }
}
