use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ids::{CaseId, CaseType, DocumentTag, StageId};

/// One administrative process instance.
///
/// Fields are private: a case is only mutated through `WorkflowEngine`
/// operations, which keep the status, documents and history consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub(crate) id: CaseId,
    pub(crate) case_type: CaseType,
    pub(crate) current_stage: StageId,
    pub(crate) status: CaseStatus,
    /// Explicit hold on mid-stage work (e.g. a scheduled inspection)
    #[serde(default)]
    pub(crate) held: bool,
    #[serde(default)]
    pub(crate) documents: Vec<Document>,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) opened_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) expected_completion_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) closed_at: Option<DateTime<Utc>>,
}

/// Derived status of a case.
///
/// State machine:
/// - `AwaitingDocuments` -> `ReadyToAdvance` (when the stage's documents are approved)
/// - `ReadyToAdvance` -> `InProgress` (hold) | next stage | `Completed` (advance at final stage)
/// - `InProgress` -> `ReadyToAdvance` (release)
/// - any non-terminal status -> `Denied`
/// - `Completed` and `Denied` are terminal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    /// Required documents for the current stage are missing or not approved.
    #[serde(rename = "awaiting-documents")]
    AwaitingDocuments,

    /// Documents are in order but the stage is held for mid-stage work.
    #[serde(rename = "in-progress")]
    InProgress,

    /// Documents are in order and nothing holds the case; advance may proceed.
    #[serde(rename = "ready-to-advance")]
    ReadyToAdvance,

    /// The final stage was advanced; terminal.
    #[serde(rename = "completed")]
    Completed,

    /// Explicitly denied; terminal.
    #[serde(rename = "denied")]
    Denied,
}

impl CaseStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaseStatus::Completed | CaseStatus::Denied)
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseStatus::AwaitingDocuments => write!(f, "AwaitingDocuments"),
            CaseStatus::InProgress => write!(f, "InProgress"),
            CaseStatus::ReadyToAdvance => write!(f, "ReadyToAdvance"),
            CaseStatus::Completed => write!(f, "Completed"),
            CaseStatus::Denied => write!(f, "Denied"),
        }
    }
}

/// Review state of a submitted document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalState::Pending => write!(f, "pending"),
            ApprovalState::Approved => write!(f, "approved"),
            ApprovalState::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ApprovalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ApprovalState::Pending),
            "approved" | "approve" => Ok(ApprovalState::Approved),
            "rejected" | "reject" => Ok(ApprovalState::Rejected),
            other => Err(format!(
                "Unknown approval state '{other}'. Use pending, approved or rejected"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub tag: DocumentTag,
    pub uploaded_at: DateTime<Utc>,
    pub approval: ApprovalState,
}

impl Document {
    pub fn is_approved(&self) -> bool {
        self.approval == ApprovalState::Approved
    }
}

/// One audit-trail record. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    /// Stage the case was in once the action took effect
    pub stage: StageId,
    pub actor: String,
    pub action: HistoryAction,
    #[serde(default)]
    pub note: String,
}

/// What a history entry records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HistoryAction {
    Opened,
    DocumentReviewed {
        tag: DocumentTag,
        state: ApprovalState,
    },
    Advanced {
        from: StageId,
    },
    Completed,
    Denied,
    Held,
    Released,
    Rescheduled {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expected: Option<DateTime<Utc>>,
    },
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryAction::Opened => write!(f, "opened"),
            HistoryAction::DocumentReviewed { tag, state } => {
                write!(f, "document '{tag}' marked {state}")
            }
            HistoryAction::Advanced { from } => write!(f, "advanced from '{from}'"),
            HistoryAction::Completed => write!(f, "completed"),
            HistoryAction::Denied => write!(f, "denied"),
            HistoryAction::Held => write!(f, "held"),
            HistoryAction::Released => write!(f, "released"),
            HistoryAction::Rescheduled { expected: Some(at) } => {
                write!(f, "expected completion set to {}", at.format("%Y-%m-%d"))
            }
            HistoryAction::Rescheduled { expected: None } => {
                write!(f, "expected completion cleared")
            }
        }
    }
}
