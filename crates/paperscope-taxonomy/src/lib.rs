//! paperscope-taxonomy — Method and topic knowledge graphs.
//!
//! The embedded tables under `data/` cover quantitative, qualitative and
//! theoretical methods and the main topics of economics, political science,
//! psychology, sociology and management. They are parsed and compiled once
//! per process; see [`Taxonomy::embedded`].

pub mod error;
pub mod fields;
pub mod graph;
pub mod lexicon;
pub mod lookup;
pub mod node;

use std::sync::OnceLock;

pub use error::{NodeKind, TaxonomyError};
pub use fields::FieldTable;
pub use graph::{MethodEntry, Taxonomy, TaxonomyStats, TaxonomyTables, TopicEdges, TopicEntry};
pub use lexicon::{CompiledLexicon, LexiconHits};
pub use node::{ContextualSignal, MethodNode, SignalLexicon, TopicNode};

const METHODS_YAML: &str = include_str!("../data/methods.yaml");
const TOPICS_YAML: &str = include_str!("../data/topics.yaml");
const FIELDS_YAML: &str = include_str!("../data/fields.yaml");
const LOOKUPS_YAML: &str = include_str!("../data/lookups.yaml");

impl Taxonomy {
    /// The embedded taxonomy, built on first use and shared for the life of
    /// the process.
    pub fn embedded() -> &'static Taxonomy {
        static TAXONOMY: OnceLock<Taxonomy> = OnceLock::new();
        TAXONOMY.get_or_init(|| {
            Self::load_embedded().expect("Failed to build taxonomy from embedded tables")
        })
    }

    /// Parse and validate the embedded tables without caching.
    pub fn load_embedded() -> error::Result<Self> {
        Self::from_yaml(METHODS_YAML, TOPICS_YAML, FIELDS_YAML, LOOKUPS_YAML)
    }
}
