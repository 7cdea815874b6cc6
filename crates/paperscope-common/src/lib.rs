//! paperscope-common — Shared types, errors, and text matching used across all Paperscope crates.

pub mod error;
pub mod models;
pub mod confidence;
pub mod text;
pub mod config;

// Re-export commonly used types
pub use confidence::{Confidence, ConfidenceThresholds, SignalCounts, classify_confidence};
pub use config::EngineConfig;
pub use error::{PaperscopeError, Result};
pub use models::{BatchResult, ConceptTag, MatchTier, Paper, ScoredPaper, UserProfile};
pub use text::{PhraseMatcher, count_term_matches, normalize_text};
