//! Shared fixtures for command-layer tests

use std::fs;
use std::path::Path;

use casework::commands::common::Workspace;
use casework::commands::init;
use casework::models::case::Case;
use casework::repository::CaseRepository;
use casework::CaseId;
use tempfile::TempDir;

/// A street-lighting repair: report, then a crew visit gated on a photo.
pub const STREET_LIGHTING: &str = r#"
id = "street-lighting"
name = "Street lighting repair"

[[stages]]
id = "reported"
name = "Reported"

[[stages]]
id = "crew-visit"
name = "Crew visit"
requires = ["site-photo"]
"#;

/// Initialized workspace with the street-lighting graph installed.
pub fn workspace() -> TempDir {
    let temp = TempDir::new().expect("Should create temp dir");
    init::execute(temp.path()).expect("Should initialize workspace");
    fs::write(
        temp.path().join(".casework/graphs/street-lighting.toml"),
        STREET_LIGHTING,
    )
    .expect("Should write graph file");
    temp
}

pub fn load_case(base: &Path, id: &CaseId) -> Case {
    Workspace::open(base)
        .expect("Should open workspace")
        .repository
        .load(id)
        .expect("Should load case")
}
