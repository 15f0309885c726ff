//! Case type definitions loaded from `graphs/`

use std::fs;

use casework::commands::common::Workspace;
use casework::config::Config;
use casework::models::case::CaseType;

use super::helpers::workspace;

#[test]
fn test_graph_file_registered_alongside_builtins() {
    let temp = workspace();
    let ws = Workspace::open(temp.path()).unwrap();
    let graph = ws.engine.graph();

    let stages = graph.stages_for(&CaseType::from("street-lighting")).unwrap();
    let names: Vec<&str> = stages.iter().map(|s| s.as_str()).collect();
    assert_eq!(names, vec!["reported", "crew-visit"]);
    assert!(graph.contains(&CaseType::from("medical-referral")));
}

#[test]
fn test_graph_file_overrides_builtin() {
    let temp = workspace();
    fs::write(
        temp.path().join(".casework/graphs/service-ticket.toml"),
        r#"
id = "service-ticket"
name = "Service ticket (single step)"

[[stages]]
id = "done"
name = "Done"
"#,
    )
    .unwrap();

    let ws = Workspace::open(temp.path()).unwrap();
    let stages = ws
        .engine
        .graph()
        .stages_for(&CaseType::from("service-ticket"))
        .unwrap();
    assert_eq!(stages.len(), 1);
}

#[test]
fn test_builtins_can_be_disabled() {
    let temp = workspace();
    let config = Config {
        builtin_graphs: false,
        ..Config::default()
    };
    config
        .save(&temp.path().join(".casework/config.toml"))
        .unwrap();

    let ws = Workspace::open(temp.path()).unwrap();
    let graph = ws.engine.graph();
    assert!(graph.contains(&CaseType::from("street-lighting")));
    assert!(!graph.contains(&CaseType::from("land-regularization")));
}

#[test]
fn test_invalid_graph_file_fails_to_open() {
    let temp = workspace();
    fs::write(
        temp.path().join(".casework/graphs/broken.toml"),
        r#"
id = "broken"
name = "Broken"

[[stages]]
id = "a"
name = "A"

[[stages]]
id = "a"
name = "A again"
"#,
    )
    .unwrap();

    let err = Workspace::open(temp.path()).err().unwrap();
    assert!(format!("{err:#}").contains("more than once"));
}
