//! Academic field table: aliases, generalist options and cross-field affinity.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use paperscope_common::normalize_text;

use crate::error::{Result, TaxonomyError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffinitySpec {
    pub a: String,
    pub b: String,
    pub score: f64,
}

/// Field table as it appears in `fields.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTableSpec {
    /// Field / level choices that mean "no single home field".
    pub generalist: Vec<String>,
    pub fields: Vec<FieldSpec>,
    pub affinity: Vec<AffinitySpec>,
}

#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    generalist: AHashSet<String>,
    aliases: AHashMap<String, String>,
    ids: AHashSet<String>,
    affinity: AHashMap<(String, String), f64>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl FieldTable {
    pub fn from_spec(spec: &FieldTableSpec) -> Result<Self> {
        let mut table = FieldTable {
            generalist: spec.generalist.iter().map(|g| normalize_text(g)).collect(),
            ..Default::default()
        };

        for field in &spec.fields {
            if !table.ids.insert(field.id.clone()) {
                return Err(TaxonomyError::InvalidField(format!("duplicate field id '{}'", field.id)));
            }
            let own = [normalize_text(&field.id), normalize_text(&field.name)];
            for alias in own.into_iter().chain(field.aliases.iter().map(|a| normalize_text(a))) {
                if alias.is_empty() {
                    continue;
                }
                if let Some(prev) = table.aliases.insert(alias.clone(), field.id.clone()) {
                    if prev != field.id {
                        return Err(TaxonomyError::InvalidField(format!(
                            "alias '{alias}' claimed by both '{prev}' and '{}'",
                            field.id
                        )));
                    }
                }
            }
        }

        for entry in &spec.affinity {
            for id in [&entry.a, &entry.b] {
                if !table.ids.contains(id) {
                    return Err(TaxonomyError::InvalidField(format!("affinity references unknown field '{id}'")));
                }
            }
            if entry.a == entry.b || !(0.0..=1.0).contains(&entry.score) {
                return Err(TaxonomyError::InvalidField(format!(
                    "bad affinity entry {} / {} = {}",
                    entry.a, entry.b, entry.score
                )));
            }
            table.affinity.insert(pair_key(&entry.a, &entry.b), entry.score);
        }

        Ok(table)
    }

    /// Canonical field id for a raw field string, if recognised.
    pub fn canonical(&self, raw: &str) -> Option<&str> {
        self.aliases.get(&normalize_text(raw)).map(|s| s.as_str())
    }

    /// Empty or explicitly "no home field" choices.
    pub fn is_generalist(&self, raw: &str) -> bool {
        let key = normalize_text(raw);
        key.is_empty() || self.generalist.contains(&key)
    }

    /// Symmetric affinity in [0, 1]; 1.0 for the same field, 0.0 when unlisted.
    pub fn affinity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        self.affinity.get(&pair_key(a, b)).copied().unwrap_or(0.0)
    }

    /// Two distinct fields with a listed affinity.
    pub fn is_adjacent(&self, a: &str, b: &str) -> bool {
        a != b && self.affinity.contains_key(&pair_key(a, b))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
