//! Loading case type definitions from `graphs/*.toml`

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::definition::CaseTypeDefinition;

/// Parse and validate a single graph file.
pub fn load_graph_file(path: &Path) -> Result<CaseTypeDefinition> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file: {}", path.display()))?;
    parse_graph(&content).with_context(|| format!("Invalid graph file: {}", path.display()))
}

pub fn parse_graph(content: &str) -> Result<CaseTypeDefinition> {
    let definition: CaseTypeDefinition =
        toml::from_str(content).context("Failed to parse graph TOML")?;
    definition.validate()?;
    Ok(definition)
}

/// Load every `.toml` file in `dir`, ordered by file name.
///
/// A missing directory yields no definitions.
pub fn load_graph_dir(dir: &Path) -> Result<Vec<CaseTypeDefinition>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read graphs directory: {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(|path| load_graph_file(path)).collect()
}

pub fn graph_to_toml(definition: &CaseTypeDefinition) -> Result<String> {
    toml::to_string_pretty(definition).context("Failed to serialize graph to TOML")
}
