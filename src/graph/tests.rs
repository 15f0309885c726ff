use std::collections::BTreeSet;

use crate::error::WorkflowError;
use crate::models::case::{CaseType, DocumentTag, StageId};

use super::builtin::{LAND_REGULARIZATION, MEDICAL_REFERRAL, SERVICE_TICKET};
use super::{graph_to_toml, load_graph_dir, parse_graph, CaseTypeDefinition, StageDefinition, StageGraph};

fn permit_graph() -> StageGraph {
    StageGraph::new()
        .with(CaseTypeDefinition::new(
            "permit",
            "Permit",
            vec![
                StageDefinition::new("protocol", "Protocol", &[]),
                StageDefinition::new("review", "Review", &["cpf"]),
                StageDefinition::new("inspection", "Inspection", &[]),
                StageDefinition::new("approval", "Approval", &[]),
            ],
        ))
        .unwrap()
}

#[test]
fn test_builtin_registers_three_case_types() {
    let graph = StageGraph::builtin();
    for id in [LAND_REGULARIZATION, MEDICAL_REFERRAL, SERVICE_TICKET] {
        assert!(graph.contains(&CaseType::from(id)), "missing {id}");
    }
    assert_eq!(graph.definitions().count(), 3);
}

#[test]
fn test_builtin_definitions_are_valid() {
    for definition in StageGraph::builtin().definitions() {
        definition.validate().unwrap();
    }
}

#[test]
fn test_stages_for_preserves_order() {
    let graph = permit_graph();
    let stages = graph.stages_for(&CaseType::from("permit")).unwrap();
    let ids: Vec<&str> = stages.iter().map(|s| s.as_str()).collect();
    assert_eq!(ids, vec!["protocol", "review", "inspection", "approval"]);
}

#[test]
fn test_stages_for_unknown_case_type() {
    let graph = permit_graph();
    let result = graph.stages_for(&CaseType::from("parking"));
    assert!(matches!(result, Err(WorkflowError::UnknownCaseType(t)) if t.as_str() == "parking"));
}

#[test]
fn test_requirements_for_gated_and_ungated_stage() {
    let graph = permit_graph();
    let permit = CaseType::from("permit");

    let review = graph.requirements_for(&permit, &StageId::from("review")).unwrap();
    let expected: BTreeSet<DocumentTag> = [DocumentTag::from("cpf")].into_iter().collect();
    assert_eq!(review, &expected);

    let protocol = graph.requirements_for(&permit, &StageId::from("protocol")).unwrap();
    assert!(protocol.is_empty());
}

#[test]
fn test_requirements_for_invalid_stage() {
    let graph = permit_graph();
    let result = graph.requirements_for(&CaseType::from("permit"), &StageId::from("titling"));
    assert!(matches!(result, Err(WorkflowError::InvalidStage { .. })));
}

#[test]
fn test_next_stage_walks_to_none() {
    let graph = StageGraph::builtin();
    for definition in graph.definitions() {
        let mut stage = definition.stages[0].id.clone();
        for _ in 0..definition.stages.len() - 1 {
            stage = graph
                .next_stage(&definition.id, &stage)
                .unwrap()
                .expect("stage before the final one has a successor")
                .clone();
        }
        assert!(definition.is_final(&stage));
        assert_eq!(graph.next_stage(&definition.id, &stage).unwrap(), None);
    }
}

#[test]
fn test_next_stage_invalid_stage() {
    let graph = permit_graph();
    let result = graph.next_stage(&CaseType::from("permit"), &StageId::from("nowhere"));
    assert!(matches!(
        result,
        Err(WorkflowError::InvalidStage { stage, .. }) if stage.as_str() == "nowhere"
    ));
}

#[test]
fn test_position_reports_index_and_total() {
    let graph = permit_graph();
    let (index, total) = graph
        .position(&CaseType::from("permit"), &StageId::from("inspection"))
        .unwrap();
    assert_eq!((index, total), (2, 4));
}

#[test]
fn test_register_rejects_empty_graph() {
    let mut graph = StageGraph::new();
    let result = graph.register(CaseTypeDefinition::new("empty", "Empty", vec![]));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("defines no stages"));
    assert!(!graph.contains(&CaseType::from("empty")));
}

#[test]
fn test_register_rejects_duplicate_stage() {
    let mut graph = StageGraph::new();
    let result = graph.register(CaseTypeDefinition::new(
        "twice",
        "Twice",
        vec![
            StageDefinition::new("review", "Review", &[]),
            StageDefinition::new("review", "Review again", &[]),
        ],
    ));
    assert!(result.unwrap_err().to_string().contains("more than once"));
}

#[test]
fn test_register_replaces_existing_definition() {
    let mut graph = StageGraph::builtin();
    graph
        .register(CaseTypeDefinition::new(
            SERVICE_TICKET,
            "Short ticket",
            vec![StageDefinition::new("opened", "Opened", &[])],
        ))
        .unwrap();
    let stages = graph.stages_for(&CaseType::from(SERVICE_TICKET)).unwrap();
    assert_eq!(stages.len(), 1);
}

#[test]
fn test_parse_graph_toml() {
    let content = r#"
id = "street-lighting"
name = "Street lighting repair"

[[stages]]
id = "opened"
name = "Opened"

[[stages]]
id = "inspection"
name = "Inspection"
requires = ["photo", "pole-number"]
"#;
    let definition = parse_graph(content).unwrap();
    assert_eq!(definition.id.as_str(), "street-lighting");
    assert_eq!(definition.stages.len(), 2);
    assert!(definition.stages[0].requires.is_empty());
    assert!(definition.stages[1].requires.contains(&DocumentTag::from("pole-number")));
}

#[test]
fn test_parse_graph_rejects_bad_tag() {
    let content = r#"
id = "bad"
name = "Bad"

[[stages]]
id = "opened"
name = "Opened"
requires = ["../etc/passwd"]
"#;
    assert!(parse_graph(content).is_err());
}

#[test]
fn test_graph_toml_survives_reload() {
    let definition = super::builtin::medical_referral();
    let content = graph_to_toml(&definition).unwrap();
    assert_eq!(parse_graph(&content).unwrap(), definition);
}

#[test]
fn test_load_graph_dir_ignores_other_files() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join("b-permit.toml"),
        graph_to_toml(&permit_graph().definitions().next().unwrap().clone()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        temp.path().join("a-ticket.toml"),
        graph_to_toml(&super::builtin::service_ticket()).unwrap(),
    )
    .unwrap();
    std::fs::write(temp.path().join("notes.md"), "not a graph").unwrap();

    let definitions = load_graph_dir(temp.path()).unwrap();
    let ids: Vec<&str> = definitions.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec![SERVICE_TICKET, "permit"]);
}

#[test]
fn test_load_graph_dir_missing_directory() {
    let temp = tempfile::tempdir().unwrap();
    let definitions = load_graph_dir(&temp.path().join("graphs")).unwrap();
    assert!(definitions.is_empty());
}
