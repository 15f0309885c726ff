use anyhow::anyhow;
use chrono::{DateTime, Utc};

use crate::engine::derive_open_status;
use crate::error::{WorkflowError, WorkflowResult};
use crate::graph::StageGraph;

use super::ids::{CaseId, CaseType, DocumentTag, StageId};
use super::types::{ApprovalState, Case, CaseStatus, Document, HistoryAction, HistoryEntry};

impl Case {
    /// Open a new case in the first stage of its graph.
    ///
    /// The opening itself is the first history entry. Fails with
    /// `UnknownCaseType` if the graph does not define `case_type`.
    pub fn open(
        graph: &StageGraph,
        id: CaseId,
        case_type: CaseType,
        actor: &str,
        note: &str,
    ) -> WorkflowResult<Self> {
        let definition = graph.definition(&case_type)?;
        let first = definition.first_stage();
        let status = derive_open_status(&first.requires, &[], false);
        let now = Utc::now();

        Ok(Self {
            id,
            case_type,
            current_stage: first.id.clone(),
            status,
            held: false,
            documents: Vec::new(),
            history: vec![HistoryEntry {
                at: now,
                stage: first.id.clone(),
                actor: actor.to_string(),
                action: HistoryAction::Opened,
                note: note.to_string(),
            }],
            opened_at: now,
            expected_completion_at: None,
            closed_at: None,
        })
    }

    /// Bring a stored case in line with `graph`.
    ///
    /// The stored status of an open case is only a cache: it is recomputed
    /// from the current stage's requirements, so a graph whose requirements
    /// changed since the case was saved gates it correctly. Terminal cases
    /// keep their status but must carry `closed_at` and end in the matching
    /// history entry. Fails with `InvalidStage` if the stage left the graph
    /// and `Storage` if the record contradicts itself.
    pub(crate) fn reconcile(&mut self, graph: &StageGraph) -> WorkflowResult<()> {
        let requires = graph.requirements_for(&self.case_type, &self.current_stage)?;
        let inconsistent = |reason: &str| -> WorkflowError {
            anyhow!("Case {} is inconsistent: {reason}", self.id).into()
        };

        let last = match self.history.last() {
            Some(entry) => &entry.action,
            None => return Err(inconsistent("history is empty")),
        };
        if self.closed_at.is_some() != self.status.is_terminal() {
            return Err(inconsistent(&format!(
                "status {} with closed_at {}",
                self.status,
                if self.closed_at.is_some() { "set" } else { "unset" }
            )));
        }

        match self.status {
            CaseStatus::Completed if *last != HistoryAction::Completed => {
                Err(inconsistent("completed without a completion entry"))
            }
            CaseStatus::Denied if *last != HistoryAction::Denied => {
                Err(inconsistent("denied without a denial entry"))
            }
            CaseStatus::Completed | CaseStatus::Denied => Ok(()),
            _ => {
                self.status = derive_open_status(requires, &self.documents, self.held);
                Ok(())
            }
        }
    }

    pub fn id(&self) -> &CaseId {
        &self.id
    }

    pub fn case_type(&self) -> &CaseType {
        &self.case_type
    }

    pub fn current_stage(&self) -> &StageId {
        &self.current_stage
    }

    pub fn status(&self) -> CaseStatus {
        self.status
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, tag: &DocumentTag) -> Option<&Document> {
        self.documents.iter().find(|d| &d.tag == tag)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn expected_completion_at(&self) -> Option<DateTime<Utc>> {
        self.expected_completion_at
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// An open case whose advisory completion date has passed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_closed() && self.expected_completion_at.is_some_and(|at| at < now)
    }

    /// Insert or re-review the document for `tag`.
    ///
    /// A re-review keeps the original `uploaded_at`.
    pub(crate) fn upsert_document(
        &mut self,
        tag: &DocumentTag,
        approval: ApprovalState,
        now: DateTime<Utc>,
    ) {
        match self.documents.iter_mut().find(|d| &d.tag == tag) {
            Some(existing) => existing.approval = approval,
            None => self.documents.push(Document {
                tag: tag.clone(),
                uploaded_at: now,
                approval,
            }),
        }
    }

    pub(crate) fn record(
        &mut self,
        at: DateTime<Utc>,
        actor: &str,
        action: HistoryAction,
        note: &str,
    ) {
        self.history.push(HistoryEntry {
            at,
            stage: self.current_stage.clone(),
            actor: actor.to_string(),
            action,
            note: note.to_string(),
        });
    }
}
