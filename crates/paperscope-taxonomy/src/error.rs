use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Method,
    Topic,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Method => f.write_str("method"),
            NodeKind::Topic => f.write_str("topic"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("YAML parse error in {table} table: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: NodeKind, id: String },

    #[error("{kind} '{id}' references unknown {edge} target '{target}'")]
    DanglingEdge {
        kind: NodeKind,
        id: String,
        edge: &'static str,
        target: String,
    },

    #[error("{kind} '{id}' has a cyclic parent chain")]
    ParentCycle { kind: NodeKind, id: String },

    #[error("{kind} '{id}' has no strong signals")]
    NoStrongSignals { kind: NodeKind, id: String },

    #[error("lookup entry '{name}' maps to unknown {kind} '{target}'")]
    DanglingLookup {
        kind: NodeKind,
        name: String,
        target: String,
    },

    #[error("invalid field table: {0}")]
    InvalidField(String),

    #[error(transparent)]
    Lexicon(#[from] paperscope_common::PaperscopeError),
}

pub type Result<T> = std::result::Result<T, TaxonomyError>;
