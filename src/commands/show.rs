use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::engine::Progress;
use crate::models::case::{Case, CaseId, DocumentTag};
use crate::repository::CaseRepository;

use super::common::Workspace;
use super::output::print_case;

#[derive(Serialize)]
struct CaseReport<'a> {
    #[serde(flatten)]
    case: &'a Case,
    progress: Progress,
    percent: u8,
    missing: &'a BTreeSet<DocumentTag>,
}

pub fn execute(base: &Path, case_id: String, json: bool) -> Result<()> {
    let workspace = Workspace::open(base)?;
    let case = workspace.repository.load(&CaseId::new(case_id))?;
    let progress = workspace.engine.progress(&case)?;
    let missing = workspace.engine.missing_documents(&case)?;

    if json {
        let report = CaseReport {
            case: &case,
            progress,
            percent: progress.percent(),
            missing: &missing,
        };
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize case report")?;
        println!("{rendered}");
    } else {
        print_case(&case, progress, &missing);
    }
    Ok(())
}
