//! Reading papers, profiles and taxonomy tables from disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use paperscope_common::{Paper, UserProfile};
use paperscope_taxonomy::Taxonomy;

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("reading {what} from {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {what} in {}", path.display()))
}

/// A JSON array of paper records.
pub fn read_papers(path: &Path) -> Result<Vec<Paper>> {
    let papers: Vec<Paper> = read_json(path, "papers")?;
    debug!("Read {} papers from {}", papers.len(), path.display());
    Ok(papers)
}

pub fn read_paper(path: &Path) -> Result<Paper> {
    read_json(path, "paper")
}

pub fn read_profile(path: &Path) -> Result<UserProfile> {
    read_json(path, "profile")
}

/// Build a taxonomy from the four YAML tables in `dir`.
pub fn load_taxonomy(dir: &Path) -> Result<Taxonomy> {
    let table = |name: &str| {
        let path = dir.join(format!("{name}.yaml"));
        fs::read_to_string(&path).with_context(|| format!("reading taxonomy table {}", path.display()))
    };
    let taxonomy = Taxonomy::from_yaml(&table("methods")?, &table("topics")?, &table("fields")?, &table("lookups")?)
        .with_context(|| format!("building taxonomy from {}", dir.display()))?;
    info!("Loaded taxonomy from {}", dir.display());
    Ok(taxonomy)
}
