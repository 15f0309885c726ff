use crate::error::WorkflowError;
use crate::gate::DocumentGate;
use crate::models::case::{ApprovalState, CaseStatus, DocumentTag, HistoryAction};

use super::{approve, open_permit, permit_engine, ACTOR};

#[test]
fn test_review_creates_document() {
    let engine = permit_engine();
    let mut case = open_permit(&engine);
    let tag = DocumentTag::from("cpf");

    engine
        .review_document(&mut case, &tag, ApprovalState::Pending, "triagem", "recebido")
        .unwrap();

    let document = case.document(&tag).unwrap();
    assert_eq!(document.approval, ApprovalState::Pending);
    assert_eq!(case.history().len(), 2);

    let entry = case.history().last().unwrap();
    assert_eq!(entry.actor, "triagem");
    assert_eq!(entry.note, "recebido");
    assert_eq!(
        entry.action,
        HistoryAction::DocumentReviewed {
            tag: tag.clone(),
            state: ApprovalState::Pending,
        }
    );
    assert_eq!(entry.at, document.uploaded_at);
}

#[test]
fn test_review_is_reflected_by_gate() {
    let engine = permit_engine();
    let mut case = open_permit(&engine);
    engine.advance(&mut case, ACTOR, "").unwrap();
    let required = engine
        .graph()
        .requirements_for(case.case_type(), case.current_stage())
        .unwrap()
        .clone();

    approve(&engine, &mut case, "cpf");
    assert!(DocumentGate::is_satisfied(&required, case.documents()));
    assert_eq!(case.status(), CaseStatus::ReadyToAdvance);

    engine
        .review_document(
            &mut case,
            &DocumentTag::from("cpf"),
            ApprovalState::Rejected,
            ACTOR,
            "ilegível",
        )
        .unwrap();
    assert!(!DocumentGate::is_satisfied(&required, case.documents()));
    assert_eq!(case.status(), CaseStatus::AwaitingDocuments);
}

#[test]
fn test_review_same_state_twice_appends_two_entries() {
    let engine = permit_engine();
    let mut case = open_permit(&engine);

    approve(&engine, &mut case, "cpf");
    let documents_after_first = case.documents().to_vec();
    approve(&engine, &mut case, "cpf");

    assert_eq!(case.documents(), documents_after_first.as_slice());
    assert_eq!(case.documents().len(), 1);
    assert_eq!(case.history().len(), 3);
}

#[test]
fn test_resubmission_path_keeps_upload_time() {
    let engine = permit_engine();
    let mut case = open_permit(&engine);
    let tag = DocumentTag::from("cpf");

    engine
        .review_document(&mut case, &tag, ApprovalState::Rejected, ACTOR, "")
        .unwrap();
    let uploaded_at = case.document(&tag).unwrap().uploaded_at;

    engine
        .review_document(&mut case, &tag, ApprovalState::Pending, ACTOR, "reenviado")
        .unwrap();
    engine
        .review_document(&mut case, &tag, ApprovalState::Approved, ACTOR, "")
        .unwrap();

    let document = case.document(&tag).unwrap();
    assert_eq!(document.approval, ApprovalState::Approved);
    assert_eq!(document.uploaded_at, uploaded_at);
    assert_eq!(case.history().len(), 4);
}

#[test]
fn test_review_of_unrequired_document_keeps_status() {
    let engine = permit_engine();
    let mut case = open_permit(&engine);

    engine
        .review_document(
            &mut case,
            &DocumentTag::from("photo"),
            ApprovalState::Rejected,
            ACTOR,
            "",
        )
        .unwrap();
    assert_eq!(case.status(), CaseStatus::ReadyToAdvance);
}

#[test]
fn test_review_rejects_invalid_tag() {
    let engine = permit_engine();
    let mut case = open_permit(&engine);
    let before = case.clone();

    let result = engine.review_document(
        &mut case,
        &DocumentTag::from("../cpf"),
        ApprovalState::Approved,
        ACTOR,
        "",
    );
    assert!(matches!(result, Err(WorkflowError::InvalidInput(_))));
    assert_eq!(case, before);
}
