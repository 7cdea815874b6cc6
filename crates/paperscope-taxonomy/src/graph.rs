//! The loaded taxonomy: two id-keyed graphs plus field and name tables.
//!
//! Nodes are stored in declaration order (detection output keeps that order
//! for ties) with an id → index map alongside. Nothing here is mutated after
//! load, so a `&Taxonomy` can be shared freely across threads.

use std::collections::{BTreeSet, VecDeque};

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use tracing::info;

use paperscope_common::normalize_text;

use crate::error::{NodeKind, Result, TaxonomyError};
use crate::fields::{FieldTable, FieldTableSpec};
use crate::lexicon::CompiledLexicon;
use crate::lookup::{LookupSpec, NameLookup};
use crate::node::{MethodNode, TopicNode};

/// Raw tables, as deserialised from YAML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyTables {
    pub methods: Vec<MethodNode>,
    pub topics: Vec<TopicNode>,
    pub fields: FieldTableSpec,
    pub lookups: LookupSpec,
}

#[derive(Debug, Clone)]
pub struct MethodEntry {
    pub node: MethodNode,
    pub lexicon: CompiledLexicon,
}

#[derive(Debug, Clone)]
pub struct TopicEntry {
    pub node: TopicNode,
    pub lexicon: CompiledLexicon,
}

/// Which topic edges a neighbourhood walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicEdges {
    Related,
    RelatedAndAdjacent,
}

#[derive(Debug, Clone, Default)]
pub struct TaxonomyStats {
    pub method_count: usize,
    pub topic_count: usize,
    pub phrase_count: usize,
    pub field_count: usize,
}

pub struct Taxonomy {
    methods: Vec<MethodEntry>,
    method_index: AHashMap<String, usize>,
    /// Declared `implied_by` merged with the reverse of every `implies` edge.
    implied_by: AHashMap<String, Vec<String>>,
    topics: Vec<TopicEntry>,
    topic_index: AHashMap<String, usize>,
    fields: FieldTable,
    interests: NameLookup,
    method_names: NameLookup,
    stats: TaxonomyStats,
}

impl std::fmt::Debug for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Taxonomy").field("stats", &self.stats).finish_non_exhaustive()
    }
}

impl Taxonomy {
    /// Build and validate a taxonomy from raw tables.
    pub fn from_tables(tables: TaxonomyTables) -> Result<Self> {
        let TaxonomyTables { methods, topics, fields, lookups } = tables;

        let method_index = index_ids(methods.iter().map(|m| m.id.as_str()), NodeKind::Method)?;
        let topic_index = index_ids(topics.iter().map(|t| t.id.as_str()), NodeKind::Topic)?;

        for m in &methods {
            let edges = m
                .parent
                .iter()
                .map(|t| ("parent", t))
                .chain(m.siblings.iter().map(|t| ("sibling", t)))
                .chain(m.implies.iter().map(|t| ("implies", t)))
                .chain(m.implied_by.iter().map(|t| ("implied_by", t)));
            check_edges(NodeKind::Method, &m.id, edges, &method_index)?;
            if m.signals.strong.is_empty() {
                return Err(TaxonomyError::NoStrongSignals { kind: NodeKind::Method, id: m.id.clone() });
            }
        }
        for t in &topics {
            let edges = t
                .parent
                .iter()
                .map(|x| ("parent", x))
                .chain(t.related.iter().map(|x| ("related", x)))
                .chain(t.adjacent.iter().map(|x| ("adjacent", x)));
            check_edges(NodeKind::Topic, &t.id, edges, &topic_index)?;
            if t.signals.strong.is_empty() {
                return Err(TaxonomyError::NoStrongSignals { kind: NodeKind::Topic, id: t.id.clone() });
            }
        }
        check_parent_chains(NodeKind::Method, methods.iter().map(|m| (&m.id, &m.parent)), &method_index, |i| {
            methods[i].parent.as_ref()
        })?;
        check_parent_chains(NodeKind::Topic, topics.iter().map(|t| (&t.id, &t.parent)), &topic_index, |i| {
            topics[i].parent.as_ref()
        })?;
        check_lookup(NodeKind::Topic, &lookups.interests, &topic_index)?;
        check_lookup(NodeKind::Method, &lookups.methods, &method_index)?;

        let mut implied_by: AHashMap<String, Vec<String>> = AHashMap::new();
        for m in &methods {
            for target in &m.implied_by {
                push_unique(implied_by.entry(m.id.clone()).or_default(), target);
            }
            for target in &m.implies {
                push_unique(implied_by.entry(target.clone()).or_default(), &m.id);
            }
        }

        let methods = methods
            .into_iter()
            .map(|node| Ok(MethodEntry { lexicon: CompiledLexicon::compile(&node.signals)?, node }))
            .collect::<Result<Vec<_>>>()?;
        let topics = topics
            .into_iter()
            .map(|node| Ok(TopicEntry { lexicon: CompiledLexicon::compile(&node.signals)?, node }))
            .collect::<Result<Vec<_>>>()?;

        let fields = FieldTable::from_spec(&fields)?;
        let stats = TaxonomyStats {
            method_count: methods.len(),
            topic_count: topics.len(),
            phrase_count: methods.iter().map(|m| m.lexicon.phrase_count()).sum::<usize>()
                + topics.iter().map(|t| t.lexicon.phrase_count()).sum::<usize>(),
            field_count: fields.len(),
        };

        info!(
            "Taxonomy loaded: {} methods, {} topics, {} phrases, {} fields",
            stats.method_count, stats.topic_count, stats.phrase_count, stats.field_count
        );

        Ok(Self {
            methods,
            method_index,
            implied_by,
            topics,
            topic_index,
            fields,
            interests: NameLookup::new(&lookups.interests),
            method_names: NameLookup::new(&lookups.methods),
            stats,
        })
    }

    /// Parse the four YAML tables and build the taxonomy.
    pub fn from_yaml(methods: &str, topics: &str, fields: &str, lookups: &str) -> Result<Self> {
        fn parse<T: serde::de::DeserializeOwned>(table: &'static str, src: &str) -> Result<T> {
            serde_yaml::from_str(src).map_err(|source| TaxonomyError::Parse { table, source })
        }
        Self::from_tables(TaxonomyTables {
            methods: parse("methods", methods)?,
            topics: parse("topics", topics)?,
            fields: parse("fields", fields)?,
            lookups: parse("lookups", lookups)?,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn methods(&self) -> &[MethodEntry] {
        &self.methods
    }

    pub fn topics(&self) -> &[TopicEntry] {
        &self.topics
    }

    pub fn method(&self, id: &str) -> Option<&MethodEntry> {
        self.method_index.get(id).map(|&i| &self.methods[i])
    }

    pub fn topic(&self, id: &str) -> Option<&TopicEntry> {
        self.topic_index.get(id).map(|&i| &self.topics[i])
    }

    pub fn method_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.method(id).map(|m| m.node.name.as_str()).unwrap_or(id)
    }

    pub fn topic_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.topic(id).map(|t| t.node.name.as_str()).unwrap_or(id)
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    pub fn stats(&self) -> &TaxonomyStats {
        &self.stats
    }

    // ── Name resolution ──────────────────────────────────────────────────────

    /// Topic ids for an onboarding interest label.
    ///
    /// Falls back to a topic whose id or display name equals the label;
    /// anything else resolves to nothing.
    pub fn interest_ids(&self, label: &str) -> Vec<String> {
        let ids = self.interests.resolve(label);
        if !ids.is_empty() {
            return ids.to_vec();
        }
        let key = normalize_text(label);
        self.topics
            .iter()
            .find(|t| normalize_text(&t.node.id) == key || normalize_text(&t.node.name) == key)
            .map(|t| vec![t.node.id.clone()])
            .unwrap_or_default()
    }

    /// Method ids for an onboarding method label. Same fallback rule as
    /// [`Taxonomy::interest_ids`].
    pub fn method_ids(&self, label: &str) -> Vec<String> {
        let ids = self.method_names.resolve(label);
        if !ids.is_empty() {
            return ids.to_vec();
        }
        let key = normalize_text(label);
        self.methods
            .iter()
            .find(|m| normalize_text(&m.node.id) == key || normalize_text(&m.node.name) == key)
            .map(|m| vec![m.node.id.clone()])
            .unwrap_or_default()
    }

    // ── Traversal ────────────────────────────────────────────────────────────

    /// One hop over parent, siblings, implies and implied-by.
    /// The method itself is not included.
    pub fn method_family(&self, id: &str) -> BTreeSet<String> {
        let mut family = BTreeSet::new();
        let Some(entry) = self.method(id) else {
            return family;
        };
        let node = &entry.node;
        family.extend(node.parent.iter().cloned());
        family.extend(node.siblings.iter().cloned());
        family.extend(node.implies.iter().cloned());
        if let Some(rev) = self.implied_by.get(id) {
            family.extend(rev.iter().cloned());
        }
        family.remove(id);
        family
    }

    /// Topics reachable from `seeds` within `depth` hops, excluding the seeds.
    pub fn topic_neighborhood(&self, seeds: &BTreeSet<String>, depth: usize, edges: TopicEdges) -> BTreeSet<String> {
        let mut seen: AHashSet<&str> = seeds.iter().map(|s| s.as_str()).collect();
        let mut queue: VecDeque<(&str, usize)> = seeds.iter().map(|s| (s.as_str(), 0)).collect();
        let mut found = BTreeSet::new();

        while let Some((id, hops)) = queue.pop_front() {
            if hops >= depth {
                continue;
            }
            let Some(entry) = self.topic(id) else {
                continue;
            };
            let node = &entry.node;
            let adjacent: &[String] = match edges {
                TopicEdges::Related => &[],
                TopicEdges::RelatedAndAdjacent => &node.adjacent,
            };
            for next in node.related.iter().chain(adjacent.iter()) {
                if seen.insert(next.as_str()) {
                    found.insert(next.clone());
                    queue.push_back((next.as_str(), hops + 1));
                }
            }
        }
        found
    }
}

fn index_ids<'a>(ids: impl Iterator<Item = &'a str>, kind: NodeKind) -> Result<AHashMap<String, usize>> {
    let mut index = AHashMap::new();
    for (i, id) in ids.enumerate() {
        if index.insert(id.to_string(), i).is_some() {
            return Err(TaxonomyError::DuplicateId { kind, id: id.to_string() });
        }
    }
    Ok(index)
}

fn check_edges<'a>(
    kind: NodeKind,
    id: &str,
    edges: impl Iterator<Item = (&'static str, &'a String)>,
    index: &AHashMap<String, usize>,
) -> Result<()> {
    for (edge, target) in edges {
        if !index.contains_key(target) || target == id {
            return Err(TaxonomyError::DanglingEdge {
                kind,
                id: id.to_string(),
                edge,
                target: target.clone(),
            });
        }
    }
    Ok(())
}

fn check_parent_chains<'a>(
    kind: NodeKind,
    nodes: impl Iterator<Item = (&'a String, &'a Option<String>)>,
    index: &AHashMap<String, usize>,
    parent_of: impl Fn(usize) -> Option<&'a String>,
) -> Result<()> {
    for (id, parent) in nodes {
        let mut steps = 0;
        let mut cursor = parent.as_ref();
        while let Some(p) = cursor {
            steps += 1;
            if p == id || steps > index.len() {
                return Err(TaxonomyError::ParentCycle { kind, id: id.clone() });
            }
            cursor = index.get(p).and_then(|&i| parent_of(i));
        }
    }
    Ok(())
}

fn check_lookup(
    kind: NodeKind,
    entries: &std::collections::BTreeMap<String, Vec<String>>,
    index: &AHashMap<String, usize>,
) -> Result<()> {
    for (name, ids) in entries {
        if let Some(target) = ids.iter().find(|t| !index.contains_key(t.as_str())) {
            return Err(TaxonomyError::DanglingLookup {
                kind,
                name: name.clone(),
                target: target.clone(),
            });
        }
    }
    Ok(())
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}
