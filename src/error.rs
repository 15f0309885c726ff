//! Workflow error types

use std::collections::BTreeSet;

use thiserror::Error;

use crate::models::case::{CaseId, CaseStatus, CaseType, DocumentTag, StageId};

#[derive(Error, Debug)]
pub enum WorkflowError {
    /// No stage graph is registered for the case type.
    #[error("Unknown case type: {0}")]
    UnknownCaseType(CaseType),

    /// The stage is not part of the case type's graph.
    #[error("Stage '{stage}' is not part of the '{case_type}' graph")]
    InvalidStage { case_type: CaseType, stage: StageId },

    /// Mutation attempted on a completed or denied case.
    #[error("Case {case_id} is closed ({status})")]
    CaseClosed { case_id: CaseId, status: CaseStatus },

    /// Advance attempted while the current stage's documents are not approved.
    #[error("Case {case_id} cannot leave stage '{stage}': missing {}", join_tags(.missing))]
    NotReady {
        case_id: CaseId,
        stage: StageId,
        missing: BTreeSet<DocumentTag>,
    },

    /// Advance attempted while the case is held.
    #[error("Case {case_id} is on hold at stage '{stage}'")]
    OnHold { case_id: CaseId, stage: StageId },

    /// Hold requested on a held case, or release on a case that is not held.
    #[error("Case {case_id} is {}", hold_phrase(.held))]
    HoldState { case_id: CaseId, held: bool },

    #[error("Case not found: {0}")]
    NotFound(CaseId),

    /// The stored record moved on since the case was loaded.
    #[error("Case {case_id} was modified concurrently (stored history has {stored} entries, incoming {incoming})")]
    Conflict {
        case_id: CaseId,
        stored: usize,
        incoming: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl WorkflowError {
    /// Errors the caller can act on by changing input or retrying.
    ///
    /// `UnknownCaseType` and `InvalidStage` indicate configuration defects;
    /// `Storage` is left to the caller's retry policy.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WorkflowError::CaseClosed { .. }
                | WorkflowError::NotReady { .. }
                | WorkflowError::OnHold { .. }
                | WorkflowError::HoldState { .. }
                | WorkflowError::NotFound(_)
                | WorkflowError::Conflict { .. }
                | WorkflowError::InvalidInput(_)
        )
    }
}

fn join_tags(tags: &BTreeSet<DocumentTag>) -> String {
    tags.iter()
        .map(DocumentTag::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn hold_phrase(held: &bool) -> &'static str {
    if *held {
        "already on hold"
    } else {
        "not on hold"
    }
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
