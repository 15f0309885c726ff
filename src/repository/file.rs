use anyhow::{anyhow, Context};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::engine::check_input;
use crate::error::{WorkflowError, WorkflowResult};
use crate::fs::locking::{locked_read, locked_update, locked_update_existing};
use crate::fs::WorkDir;
use crate::graph::StageGraph;
use crate::models::case::{Case, CaseId, CaseType};
use crate::validation::validate_id;

use super::serialization::{case_from_markdown, case_to_markdown};
use super::{check_append_only, sort_cases, CaseRepository};

/// Case records stored as `<case-id>.md` files, one per case.
///
/// Reads take a shared lock and saves an exclusive one, so concurrent
/// processes sharing a directory serialize their writes and the append-only
/// check sees the latest stored history.
#[derive(Debug, Clone)]
pub struct FileRepository {
    cases_dir: PathBuf,
    graph: Arc<StageGraph>,
}

impl FileRepository {
    pub fn new<P: AsRef<Path>>(cases_dir: P, graph: Arc<StageGraph>) -> Self {
        Self {
            cases_dir: cases_dir.as_ref().to_path_buf(),
            graph,
        }
    }

    pub fn for_work_dir(work_dir: &WorkDir, graph: Arc<StageGraph>) -> Self {
        Self::new(work_dir.cases_dir(), graph)
    }

    pub fn cases_dir(&self) -> &Path {
        &self.cases_dir
    }

    fn case_path(&self, id: &CaseId) -> WorkflowResult<PathBuf> {
        validate_id(id.as_str()).map_err(|e| WorkflowError::InvalidInput(format!("case id: {e}")))?;
        Ok(self.cases_dir.join(format!("{id}.md")))
    }

    fn parse(&self, path: &Path, content: &str) -> WorkflowResult<Case> {
        let mut case = case_from_markdown(content)
            .with_context(|| format!("Failed to parse case from: {}", path.display()))?;
        case.reconcile(&self.graph)?;
        Ok(case)
    }

    fn ensure_dir(&self) -> WorkflowResult<()> {
        if !self.cases_dir.exists() {
            fs::create_dir_all(&self.cases_dir).with_context(|| {
                format!(
                    "Failed to create cases directory: {}",
                    self.cases_dir.display()
                )
            })?;
        }
        Ok(())
    }
}

impl CaseRepository for FileRepository {
    fn load(&self, id: &CaseId) -> WorkflowResult<Case> {
        let path = self.case_path(id)?;
        if !path.exists() {
            return Err(WorkflowError::NotFound(id.clone()));
        }
        let content = locked_read(&path)?;
        let case = self.parse(&path, &content)?;
        if case.id() != id {
            return Err(anyhow!(
                "Case file {} holds case {}",
                path.display(),
                case.id()
            )
            .into());
        }
        Ok(case)
    }

    fn save(&self, case: &Case) -> WorkflowResult<()> {
        let path = self.case_path(case.id())?;
        if !path.exists() {
            return Err(WorkflowError::NotFound(case.id().clone()));
        }

        // The file may vanish between the check and the open; never recreate it.
        let updated = locked_update_existing::<WorkflowError, _>(&path, |existing| {
            let existing = existing.ok_or_else(|| WorkflowError::NotFound(case.id().clone()))?;
            let stored = self.parse(&path, existing)?;
            check_append_only(&stored, case)?;
            Ok(case_to_markdown(case)?)
        })?;
        if !updated {
            return Err(WorkflowError::NotFound(case.id().clone()));
        }

        debug!(case_id = %case.id(), entries = case.history().len(), "case saved");
        Ok(())
    }

    fn create(&self, case_type: &CaseType, actor: &str, note: &str) -> WorkflowResult<Case> {
        self.ensure_dir()?;
        check_input(actor, note)?;
        let case = Case::open(&self.graph, CaseId::generate(), case_type.clone(), actor, note)?;
        let path = self.case_path(case.id())?;

        locked_update::<WorkflowError, _>(&path, |existing| {
            if existing.is_some() {
                return Err(WorkflowError::Storage(anyhow!(
                    "Case file already exists: {}",
                    path.display()
                )));
            }
            Ok(case_to_markdown(&case)?)
        })?;

        debug!(case_id = %case.id(), case_type = %case_type, path = %path.display(), "case created");
        Ok(case)
    }

    fn list(&self) -> WorkflowResult<Vec<Case>> {
        if !self.cases_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.cases_dir).with_context(|| {
            format!(
                "Failed to read cases directory: {}",
                self.cases_dir.display()
            )
        })?;

        let mut cases = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read directory entry")?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }

            let loaded = locked_read(&path)
                .map_err(WorkflowError::from)
                .and_then(|content| self.parse(&path, &content));
            match loaded {
                Ok(case) => cases.push(case),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable case file"),
            }
        }

        sort_cases(&mut cases);
        Ok(cases)
    }
}
