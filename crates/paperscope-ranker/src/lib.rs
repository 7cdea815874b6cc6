//! paperscope-ranker — Personalised relevance ranking.
//!
//! Expands a user's onboarding profile over the taxonomy graph, scores
//! profiled papers against it with exploration-dependent weights, and ranks
//! whole batches.

pub mod affinity;
pub mod batch;
pub mod expand;
pub mod explain;
pub mod scorer;
pub mod weights;

pub use affinity::{MatchType, MethodAffinity, TopicAffinity};
pub use batch::EMPTY_SUMMARY;
pub use expand::{expand_profile, ExpandedUserProfile};
pub use scorer::{tier_for, MatchScore, RelevanceScorer, ScoreBreakdown, ScoreComponents, SubScores};
pub use weights::ScoringWeights;
