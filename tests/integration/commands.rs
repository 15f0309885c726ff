//! Command-layer workflow: create, review, hold, advance, reschedule

use casework::commands::list::{self, ListFilter};
use casework::commands::transition::{self, Attribution};
use casework::commands::{create, show, types};
use casework::models::case::{ApprovalState, CaseStatus, HistoryAction};
use casework::WorkflowError;

use super::helpers::{load_case, workspace};

fn by(actor: &str) -> Attribution {
    Attribution {
        actor: Some(actor.to_string()),
        note: None,
    }
}

#[test]
fn test_street_lighting_through_commands() {
    let temp = workspace();
    let base = temp.path();

    let id = create::execute(base, "street-lighting".to_string(), None, None).unwrap();
    let case = load_case(base, &id);
    assert_eq!(case.status(), CaseStatus::ReadyToAdvance);
    // No --actor: the configured default is recorded.
    assert_eq!(case.history()[0].actor, "casework");

    transition::advance(base, id.to_string(), by("ouvidoria")).unwrap();
    assert_eq!(load_case(base, &id).status(), CaseStatus::AwaitingDocuments);

    transition::review(
        base,
        id.to_string(),
        "site-photo".to_string(),
        ApprovalState::Approved,
        by("equipe-3"),
    )
    .unwrap();
    transition::hold(base, id.to_string(), by("equipe-3")).unwrap();
    assert_eq!(load_case(base, &id).status(), CaseStatus::InProgress);

    let err = transition::advance(base, id.to_string(), by("equipe-3")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<WorkflowError>(),
        Some(WorkflowError::OnHold { .. })
    ));

    transition::release(base, id.to_string(), by("equipe-3")).unwrap();
    transition::advance(base, id.to_string(), by("equipe-3")).unwrap();

    let case = load_case(base, &id);
    assert_eq!(case.status(), CaseStatus::Completed);
    let actions: Vec<&HistoryAction> = case.history().iter().map(|e| &e.action).collect();
    // The refused advance left no entry.
    assert_eq!(actions.len(), 6);
    assert_eq!(actions[0], &HistoryAction::Opened);
    assert_eq!(actions[3], &HistoryAction::Held);
    assert_eq!(actions[5], &HistoryAction::Completed);

    show::execute(base, id.to_string(), true).unwrap();
    show::execute(base, id.to_string(), false).unwrap();
}

#[test]
fn test_failed_transition_leaves_record_untouched() {
    let temp = workspace();
    let base = temp.path();
    let id = create::execute(base, "street-lighting".to_string(), None, None).unwrap();
    transition::deny(base, id.to_string(), by("gabinete")).unwrap();
    let before = load_case(base, &id);

    let err = transition::hold(base, id.to_string(), by("gabinete")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<WorkflowError>(),
        Some(WorkflowError::CaseClosed { .. })
    ));
    assert_eq!(load_case(base, &id), before);
}

#[test]
fn test_reschedule_and_clear() {
    let temp = workspace();
    let base = temp.path();
    let id = create::execute(base, "street-lighting".to_string(), None, None).unwrap();

    transition::reschedule(
        base,
        id.to_string(),
        Some("2001-01-31".to_string()),
        by("ouvidoria"),
    )
    .unwrap();
    let case = load_case(base, &id);
    assert!(case.expected_completion_at().is_some());
    assert!(case.is_overdue(chrono::Utc::now()));

    list::execute(
        base,
        ListFilter {
            overdue_only: true,
            ..ListFilter::default()
        },
    )
    .unwrap();

    transition::reschedule(base, id.to_string(), None, by("ouvidoria")).unwrap();
    let case = load_case(base, &id);
    assert!(case.expected_completion_at().is_none());
    assert_eq!(case.history().len(), 3);

    let invalid = Some("soon".to_string());
    assert!(transition::reschedule(base, id.to_string(), invalid, by("ouvidoria")).is_err());
    assert_eq!(load_case(base, &id).history().len(), 3);
}

#[test]
fn test_unknown_case_and_type() {
    let temp = workspace();
    let base = temp.path();

    let err = transition::advance(base, "case-missing".to_string(), Attribution::default())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<WorkflowError>(),
        Some(WorkflowError::NotFound(_))
    ));

    let err = create::execute(base, "zoning".to_string(), None, None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<WorkflowError>(),
        Some(WorkflowError::UnknownCaseType(_))
    ));

    assert!(types::execute(base, Some("zoning".to_string()), false).is_err());
    types::execute(base, Some("street-lighting".to_string()), true).unwrap();
    types::execute(base, None, false).unwrap();
}
