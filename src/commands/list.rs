use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use crate::models::case::{Case, CaseType};
use crate::repository::CaseRepository;

use super::common::Workspace;
use super::output::case_line;

/// Which cases `casework list` shows.
#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    pub case_type: Option<CaseType>,
    /// Hide completed and denied cases
    pub open_only: bool,
    /// Only open cases past their expected completion date
    pub overdue_only: bool,
}

impl ListFilter {
    pub fn matches(&self, case: &Case) -> bool {
        if self
            .case_type
            .as_ref()
            .is_some_and(|t| t != case.case_type())
        {
            return false;
        }
        if self.open_only && case.is_closed() {
            return false;
        }
        if self.overdue_only && !case.is_overdue(Utc::now()) {
            return false;
        }
        true
    }
}

pub fn execute(base: &Path, filter: ListFilter) -> Result<()> {
    let workspace = Workspace::open(base)?;
    let cases: Vec<Case> = workspace
        .repository
        .list()?
        .into_iter()
        .filter(|c| filter.matches(c))
        .collect();

    if cases.is_empty() {
        println!("No cases.");
        return Ok(());
    }

    for case in &cases {
        let progress = workspace.engine.progress(case)?;
        println!("{}", case_line(case, progress));
    }
    Ok(())
}
