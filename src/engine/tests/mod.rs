use crate::engine::WorkflowEngine;
use crate::graph::{CaseTypeDefinition, StageDefinition, StageGraph};
use crate::models::case::{ApprovalState, Case, CaseType, DocumentTag};

const ACTOR: &str = "protocolo";

/// Engine over the four-stage permit graph: `cpf` gates `review`,
/// `inspection-report` gates `inspection`.
fn permit_engine() -> WorkflowEngine {
    let graph = StageGraph::new()
        .with(CaseTypeDefinition::new(
            "permit",
            "Permit",
            vec![
                StageDefinition::new("protocol", "Protocol", &[]),
                StageDefinition::new("review", "Review", &["cpf"]),
                StageDefinition::new("inspection", "Inspection", &["inspection-report"]),
                StageDefinition::new("approval", "Approval", &[]),
            ],
        ))
        .unwrap()
        .with(CaseTypeDefinition::new(
            "single",
            "Single stage",
            vec![StageDefinition::new("only", "Only", &["signature"])],
        ))
        .unwrap();
    WorkflowEngine::new(graph)
}

fn open_permit(engine: &WorkflowEngine) -> Case {
    engine
        .open_case(&CaseType::from("permit"), ACTOR, "")
        .unwrap()
}

fn approve(engine: &WorkflowEngine, case: &mut Case, tag: &str) {
    engine
        .review_document(case, &DocumentTag::from(tag), ApprovalState::Approved, ACTOR, "")
        .unwrap();
}

mod review;
