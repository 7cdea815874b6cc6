//! Interest / method name → taxonomy id tables.
//!
//! Onboarding offers fixed interest and method labels; each label maps to
//! one or more taxonomy ids. Keys are matched after normalisation, so
//! "Causal-Inference" and "causal inference" resolve the same way.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use paperscope_common::normalize_text;

/// Lookup tables as they appear in `lookups.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSpec {
    pub interests: BTreeMap<String, Vec<String>>,
    pub methods: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    map: AHashMap<String, Vec<String>>,
}

impl NameLookup {
    pub fn new(entries: &BTreeMap<String, Vec<String>>) -> Self {
        let mut map: AHashMap<String, Vec<String>> = AHashMap::with_capacity(entries.len());
        for (name, ids) in entries {
            let slot = map.entry(normalize_text(name)).or_default();
            for id in ids {
                if !slot.contains(id) {
                    slot.push(id.clone());
                }
            }
        }
        Self { map }
    }

    /// Ids for a raw label; empty when the label is unknown.
    pub fn resolve(&self, raw: &str) -> &[String] {
        self.map
            .get(&normalize_text(raw))
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
