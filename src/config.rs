//! `config.toml` and stage graph assembly

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::graph::{load_graph_dir, StageGraph};

pub const DEFAULT_ACTOR: &str = "casework";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Actor recorded when a command is run without `--actor`
    #[serde(default = "default_actor")]
    pub default_actor: String,
    /// Register the built-in case types before loading `graphs/`
    #[serde(default = "default_builtin_graphs")]
    pub builtin_graphs: bool,
}

fn default_actor() -> String {
    DEFAULT_ACTOR.to_string()
}

fn default_builtin_graphs() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_actor: default_actor(),
            builtin_graphs: default_builtin_graphs(),
        }
    }
}

impl Config {
    /// Load `config.toml`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&config_content).context("Failed to parse config.toml")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Build the stage graph: built-ins (if enabled) overlaid with every
    /// definition in `graphs_dir`.
    pub fn build_stage_graph(&self, graphs_dir: &Path) -> Result<StageGraph> {
        let mut graph = if self.builtin_graphs {
            StageGraph::builtin()
        } else {
            StageGraph::new()
        };

        for definition in load_graph_dir(graphs_dir)? {
            debug!(case_type = %definition.id, stages = definition.stages.len(), "registering graph");
            graph.register(definition)?;
        }

        Ok(graph)
    }
}
