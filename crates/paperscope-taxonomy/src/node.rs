//! Taxonomy node definitions as they appear in the YAML tables.

use serde::{Deserialize, Serialize};

/// An ambiguous term that only counts when a companion term co-occurs
/// (a bare "network" says little until "social" or "ties" shows up).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextualSignal {
    pub term: String,
    pub requires: Vec<String>,
}

/// Tiered detection phrases for one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalLexicon {
    /// Precise phrases; one is nearly conclusive.
    pub strong: Vec<String>,
    pub moderate: Vec<String>,
    /// Common phrases that only corroborate.
    pub weak: Vec<String>,
    /// Phrases that argue against the node.
    pub negative: Vec<String>,
    pub contextual: Vec<ContextualSignal>,
}

/// A research method (econometric design, qualitative technique, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub siblings: Vec<String>,
    /// Using this method implies using these.
    #[serde(default)]
    pub implies: Vec<String>,
    #[serde(default)]
    pub implied_by: Vec<String>,
    #[serde(default)]
    pub signals: SignalLexicon,
}

/// A research topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    /// Close neighbours, walked for "related" expansion.
    #[serde(default)]
    pub related: Vec<String>,
    /// Looser neighbours, walked only for "adjacent" expansion.
    #[serde(default)]
    pub adjacent: Vec<String>,
    #[serde(default)]
    pub signals: SignalLexicon,
}
