use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::engine::check_input;
use crate::error::{WorkflowError, WorkflowResult};
use crate::graph::StageGraph;
use crate::models::case::{Case, CaseId, CaseType};

use super::{check_append_only, sort_cases, CaseRepository};

/// In-process case store keyed by case id.
#[derive(Debug)]
pub struct MemoryRepository {
    graph: Arc<StageGraph>,
    cases: Mutex<HashMap<CaseId, Case>>,
}

impl MemoryRepository {
    pub fn new(graph: Arc<StageGraph>) -> Self {
        Self {
            graph,
            cases: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.cases().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cases(&self) -> MutexGuard<'_, HashMap<CaseId, Case>> {
        // A panic while holding the lock cannot leave a half-applied case:
        // every write replaces a whole value.
        self.cases.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CaseRepository for MemoryRepository {
    fn load(&self, id: &CaseId) -> WorkflowResult<Case> {
        let mut case = self
            .cases()
            .get(id)
            .cloned()
            .ok_or_else(|| WorkflowError::NotFound(id.clone()))?;
        case.reconcile(&self.graph)?;
        Ok(case)
    }

    fn save(&self, case: &Case) -> WorkflowResult<()> {
        let mut cases = self.cases();
        let stored = cases
            .get(case.id())
            .ok_or_else(|| WorkflowError::NotFound(case.id().clone()))?;
        check_append_only(stored, case)?;
        cases.insert(case.id().clone(), case.clone());
        debug!(case_id = %case.id(), entries = case.history().len(), "case saved");
        Ok(())
    }

    fn create(&self, case_type: &CaseType, actor: &str, note: &str) -> WorkflowResult<Case> {
        check_input(actor, note)?;
        let case = Case::open(&self.graph, CaseId::generate(), case_type.clone(), actor, note)?;
        self.cases().insert(case.id().clone(), case.clone());
        debug!(case_id = %case.id(), case_type = %case_type, "case created");
        Ok(case)
    }

    fn list(&self) -> WorkflowResult<Vec<Case>> {
        let mut cases: Vec<Case> = self.cases().values().cloned().collect();
        sort_cases(&mut cases);
        Ok(cases)
    }
}
