use chrono::Utc;
use std::str::FromStr;

use crate::graph::StageGraph;
use crate::validation::validate_id;

use super::{ApprovalState, Case, CaseId, CaseStatus, CaseType, DocumentTag, HistoryAction};

#[test]
fn test_generated_case_id_is_path_safe() {
    let id = CaseId::generate();
    assert!(id.as_str().starts_with("case-"));
    assert!(validate_id(id.as_str()).is_ok());
}

#[test]
fn test_terminal_statuses() {
    assert!(CaseStatus::Completed.is_terminal());
    assert!(CaseStatus::Denied.is_terminal());
    assert!(!CaseStatus::AwaitingDocuments.is_terminal());
    assert!(!CaseStatus::InProgress.is_terminal());
    assert!(!CaseStatus::ReadyToAdvance.is_terminal());
}

#[test]
fn test_status_serializes_kebab_case() {
    let yaml = serde_yaml::to_string(&CaseStatus::AwaitingDocuments).unwrap();
    assert_eq!(yaml.trim(), "awaiting-documents");
    let status: CaseStatus = serde_yaml::from_str("ready-to-advance").unwrap();
    assert_eq!(status, CaseStatus::ReadyToAdvance);
}

#[test]
fn test_approval_state_from_str() {
    assert_eq!(ApprovalState::from_str("approved"), Ok(ApprovalState::Approved));
    assert_eq!(ApprovalState::from_str(" Reject "), Ok(ApprovalState::Rejected));
    assert_eq!(ApprovalState::from_str("pending"), Ok(ApprovalState::Pending));
    assert!(ApprovalState::from_str("maybe").is_err());
}

#[test]
fn test_history_action_tagged_representation() {
    let action = HistoryAction::DocumentReviewed {
        tag: DocumentTag::from("cpf"),
        state: ApprovalState::Approved,
    };
    let value = serde_yaml::to_value(&action).unwrap();
    assert_eq!(value["kind"].as_str(), Some("document-reviewed"));
    assert_eq!(value["tag"].as_str(), Some("cpf"));
    assert_eq!(value["state"].as_str(), Some("approved"));
}

#[test]
fn test_open_uses_given_id() {
    let graph = StageGraph::builtin();
    let case = Case::open(
        &graph,
        CaseId::from("case-0001"),
        CaseType::from("service-ticket"),
        "ouvidoria",
        "coleta de entulho",
    )
    .unwrap();

    assert_eq!(case.id().as_str(), "case-0001");
    assert_eq!(case.current_stage().as_str(), "opened");
    assert_eq!(case.status(), CaseStatus::ReadyToAdvance);
    assert_eq!(case.history().len(), 1);
    assert!(case.opened_at() <= Utc::now());
}

#[test]
fn test_upsert_document_keeps_tags_unique() {
    let graph = StageGraph::builtin();
    let mut case = Case::open(
        &graph,
        CaseId::from("case-0002"),
        CaseType::from("service-ticket"),
        "ouvidoria",
        "",
    )
    .unwrap();
    let tag = DocumentTag::from("address-proof");
    let first = Utc::now();

    case.upsert_document(&tag, ApprovalState::Pending, first);
    case.upsert_document(&tag, ApprovalState::Approved, Utc::now());

    assert_eq!(case.documents().len(), 1);
    let document = case.document(&tag).unwrap();
    assert_eq!(document.approval, ApprovalState::Approved);
    assert_eq!(document.uploaded_at, first);
}
