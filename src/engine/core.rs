//! Workflow engine operations
//!
//! Every operation validates everything it needs before touching the case,
//! so a failed call leaves the case exactly as it was. A successful call
//! appends exactly one history entry.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{WorkflowError, WorkflowResult};
use crate::gate::DocumentGate;
use crate::graph::StageGraph;
use crate::models::case::{
    ApprovalState, Case, CaseId, CaseStatus, CaseType, DocumentTag, HistoryAction, StageId,
};
use crate::validation::{validate_actor, validate_id, validate_note};

use super::progress::Progress;
use super::status::derive_open_status;

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The case moved to the next stage of its graph.
    Moved { from: StageId, to: StageId },
    /// The final stage was left; the case is completed.
    Completed,
}

#[derive(Debug, Clone)]
pub struct WorkflowEngine {
    graph: Arc<StageGraph>,
}

impl WorkflowEngine {
    pub fn new(graph: StageGraph) -> Self {
        Self::with_shared(Arc::new(graph))
    }

    pub fn with_shared(graph: Arc<StageGraph>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &StageGraph {
        &self.graph
    }

    /// Open a case with a freshly allocated id.
    ///
    /// Repositories normally do this through `CaseRepository::create`; this
    /// is for callers that manage storage themselves.
    pub fn open_case(&self, case_type: &CaseType, actor: &str, note: &str) -> WorkflowResult<Case> {
        check_input(actor, note)?;
        let case = Case::open(&self.graph, CaseId::generate(), case_type.clone(), actor, note)?;
        info!(case_id = %case.id, case_type = %case_type, actor, "case opened");
        Ok(case)
    }

    /// Record a review of the document `tag`, creating it if absent.
    pub fn review_document(
        &self,
        case: &mut Case,
        tag: &DocumentTag,
        state: ApprovalState,
        actor: &str,
        note: &str,
    ) -> WorkflowResult<()> {
        ensure_open(case)?;
        check_input(actor, note)?;
        validate_id(tag.as_str())
            .map_err(|e| WorkflowError::InvalidInput(format!("document tag: {e}")))?;
        let requires = self
            .graph
            .requirements_for(&case.case_type, &case.current_stage)?;

        let now = Utc::now();
        case.upsert_document(tag, state, now);
        case.record(
            now,
            actor,
            HistoryAction::DocumentReviewed {
                tag: tag.clone(),
                state,
            },
            note,
        );
        case.status = derive_open_status(requires, &case.documents, case.held);

        info!(
            case_id = %case.id,
            stage = %case.current_stage,
            tag = %tag,
            state = %state,
            actor,
            status = %case.status,
            "document reviewed"
        );
        Ok(())
    }

    /// Move the case out of its current stage.
    ///
    /// Fails with `NotReady` (carrying the missing tags) while the stage's
    /// documents are not all approved, and with `OnHold` while a hold is in
    /// place. Leaving the final stage completes the case.
    pub fn advance(&self, case: &mut Case, actor: &str, note: &str) -> WorkflowResult<Advance> {
        ensure_open(case)?;
        check_input(actor, note)?;
        let case_type = &case.case_type;
        let requires = self.graph.requirements_for(case_type, &case.current_stage)?;

        if !DocumentGate::is_satisfied(requires, &case.documents) {
            let missing = DocumentGate::missing(requires, &case.documents);
            debug!(case_id = %case.id, stage = %case.current_stage, ?missing, "advance refused");
            return Err(WorkflowError::NotReady {
                case_id: case.id.clone(),
                stage: case.current_stage.clone(),
                missing,
            });
        }
        if case.held {
            debug!(case_id = %case.id, stage = %case.current_stage, "advance refused: on hold");
            return Err(WorkflowError::OnHold {
                case_id: case.id.clone(),
                stage: case.current_stage.clone(),
            });
        }

        let next = self
            .graph
            .next_stage(case_type, &case.current_stage)?
            .cloned();
        let now = Utc::now();

        match next {
            Some(next) => {
                let next_requires = self.graph.requirements_for(case_type, &next)?;
                let from = std::mem::replace(&mut case.current_stage, next.clone());
                case.record(
                    now,
                    actor,
                    HistoryAction::Advanced { from: from.clone() },
                    note,
                );
                case.status = derive_open_status(next_requires, &case.documents, case.held);

                info!(
                    case_id = %case.id,
                    from = %from,
                    to = %next,
                    actor,
                    status = %case.status,
                    "case advanced"
                );
                Ok(Advance::Moved { from, to: next })
            }
            None => {
                close(case, CaseStatus::Completed, now);
                case.record(now, actor, HistoryAction::Completed, note);

                info!(case_id = %case.id, stage = %case.current_stage, actor, "case completed");
                Ok(Advance::Completed)
            }
        }
    }

    /// Deny the case. Irreversible.
    pub fn deny(&self, case: &mut Case, actor: &str, note: &str) -> WorkflowResult<()> {
        ensure_open(case)?;
        check_input(actor, note)?;

        let now = Utc::now();
        close(case, CaseStatus::Denied, now);
        case.record(now, actor, HistoryAction::Denied, note);

        info!(case_id = %case.id, stage = %case.current_stage, actor, "case denied");
        Ok(())
    }

    /// Put the case on hold for mid-stage work.
    ///
    /// A held case with its documents in order is `InProgress` and cannot be
    /// advanced until released.
    pub fn hold(&self, case: &mut Case, actor: &str, note: &str) -> WorkflowResult<()> {
        self.set_hold(case, true, actor, note)
    }

    /// Lift a hold placed with `hold`.
    pub fn release(&self, case: &mut Case, actor: &str, note: &str) -> WorkflowResult<()> {
        self.set_hold(case, false, actor, note)
    }

    fn set_hold(&self, case: &mut Case, held: bool, actor: &str, note: &str) -> WorkflowResult<()> {
        ensure_open(case)?;
        check_input(actor, note)?;
        if case.held == held {
            return Err(WorkflowError::HoldState {
                case_id: case.id.clone(),
                held,
            });
        }
        let requires = self
            .graph
            .requirements_for(&case.case_type, &case.current_stage)?;

        let now = Utc::now();
        case.held = held;
        let action = if held {
            HistoryAction::Held
        } else {
            HistoryAction::Released
        };
        case.record(now, actor, action, note);
        case.status = derive_open_status(requires, &case.documents, case.held);

        info!(
            case_id = %case.id,
            stage = %case.current_stage,
            held,
            actor,
            status = %case.status,
            "hold changed"
        );
        Ok(())
    }

    /// Set or clear the advisory expected completion date.
    pub fn reschedule(
        &self,
        case: &mut Case,
        expected: Option<DateTime<Utc>>,
        actor: &str,
        note: &str,
    ) -> WorkflowResult<()> {
        ensure_open(case)?;
        check_input(actor, note)?;

        let now = Utc::now();
        case.expected_completion_at = expected;
        case.record(now, actor, HistoryAction::Rescheduled { expected }, note);

        info!(case_id = %case.id, expected = ?expected, actor, "case rescheduled");
        Ok(())
    }

    /// Fraction of the graph the case has left behind.
    ///
    /// A case at stage `i` of `n` reports `i / n`; only a completed case
    /// reports 1. A denied case keeps the fraction it reached.
    ///
    /// The divisor is the stage count, not the stage count minus one, so an
    /// open case sitting at its final stage stays below 1.
    pub fn progress(&self, case: &Case) -> WorkflowResult<Progress> {
        if case.status == CaseStatus::Completed {
            return Ok(Progress::complete());
        }
        let (index, total) = self.graph.position(&case.case_type, &case.current_stage)?;
        Ok(Progress::new(index, total))
    }

    /// Tags still blocking the current stage, for diagnostics.
    pub fn missing_documents(&self, case: &Case) -> WorkflowResult<BTreeSet<DocumentTag>> {
        let requires = self
            .graph
            .requirements_for(&case.case_type, &case.current_stage)?;
        Ok(DocumentGate::missing(requires, &case.documents))
    }
}

fn ensure_open(case: &Case) -> WorkflowResult<()> {
    if case.status.is_terminal() {
        debug!(case_id = %case.id, status = %case.status, "mutation refused: case closed");
        return Err(WorkflowError::CaseClosed {
            case_id: case.id.clone(),
            status: case.status,
        });
    }
    Ok(())
}

pub(crate) fn check_input(actor: &str, note: &str) -> WorkflowResult<()> {
    validate_actor(actor).map_err(|e| WorkflowError::InvalidInput(e.to_string()))?;
    validate_note(note).map_err(|e| WorkflowError::InvalidInput(e.to_string()))?;
    Ok(())
}

fn close(case: &mut Case, status: CaseStatus, now: DateTime<Utc>) {
    case.status = status;
    case.held = false;
    case.closed_at = Some(now);
}
