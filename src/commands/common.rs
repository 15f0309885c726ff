//! Workspace context shared by every command that touches cases.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::engine::WorkflowEngine;
use crate::fs::WorkDir;
use crate::repository::FileRepository;

/// An initialized `.casework/` directory with its graph, engine and case
/// store ready to use.
pub struct Workspace {
    pub work_dir: WorkDir,
    pub config: Config,
    pub engine: WorkflowEngine,
    pub repository: FileRepository,
}

impl Workspace {
    /// Open the `.casework/` directory under `base`.
    pub fn open(base: &Path) -> Result<Self> {
        let work_dir = WorkDir::new(base);
        work_dir.load()?;

        let config = Config::load(&work_dir.config_path())?;
        let graph = Arc::new(config.build_stage_graph(&work_dir.graphs_dir())?);
        debug!(
            root = %work_dir.root().display(),
            case_types = graph.definitions().count(),
            "workspace opened"
        );

        let repository = FileRepository::for_work_dir(&work_dir, Arc::clone(&graph));
        Ok(Self {
            work_dir,
            config,
            engine: WorkflowEngine::with_shared(graph),
            repository,
        })
    }

    /// The actor given on the command line, or the configured default.
    pub fn actor(&self, actor: Option<String>) -> String {
        actor.unwrap_or_else(|| self.config.default_actor.clone())
    }
}
