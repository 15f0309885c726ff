use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::models::case::{CaseId, CaseType};
use crate::repository::CaseRepository;

use super::common::Workspace;

/// Open a case of `case_type` and print its id.
pub fn execute(
    base: &Path,
    case_type: String,
    actor: Option<String>,
    note: Option<String>,
) -> Result<CaseId> {
    let workspace = Workspace::open(base)?;
    let actor = workspace.actor(actor);
    let case = workspace.repository.create(
        &CaseType::new(case_type),
        &actor,
        note.as_deref().unwrap_or_default(),
    )?;

    println!(
        "{} Opened {} ({}) at stage '{}'",
        "✓".green().bold(),
        case.id().as_str().bold(),
        case.case_type(),
        case.current_stage()
    );
    println!("  Status: {}", case.status());
    Ok(case.id().clone())
}
