//! Case transition commands
//! Usage: casework [review|advance|deny|hold|release|reschedule] <case-id>
//!
//! Each command loads the case, applies one engine operation and saves it.
//! A save that finds newer history on disk fails with a conflict and nothing
//! is written.

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;
use std::path::Path;

use crate::engine::Advance;
use crate::error::WorkflowResult;
use crate::models::case::{ApprovalState, Case, CaseId, DocumentTag};
use crate::repository::CaseRepository;

use super::common::Workspace;

/// Actor and note attached to a transition.
#[derive(Debug, Default, Clone)]
pub struct Attribution {
    pub actor: Option<String>,
    pub note: Option<String>,
}

fn apply<T>(
    base: &Path,
    case_id: &str,
    attribution: Attribution,
    op: impl FnOnce(&Workspace, &mut Case, &str, &str) -> WorkflowResult<T>,
) -> Result<(Case, T)> {
    let workspace = Workspace::open(base)?;
    let actor = workspace.actor(attribution.actor);
    let note = attribution.note.unwrap_or_default();

    let mut case = workspace.repository.load(&CaseId::from(case_id))?;
    let outcome = op(&workspace, &mut case, &actor, &note)?;
    workspace.repository.save(&case)?;
    Ok((case, outcome))
}

pub fn review(
    base: &Path,
    case_id: String,
    tag: String,
    state: ApprovalState,
    attribution: Attribution,
) -> Result<()> {
    let tag = DocumentTag::new(tag);
    let (case, ()) = apply(base, &case_id, attribution, |ws, case, actor, note| {
        ws.engine.review_document(case, &tag, state, actor, note)
    })?;

    println!(
        "{} Document '{}' marked {} on case {}",
        "✓".green().bold(),
        tag,
        state,
        case.id().as_str().bold()
    );
    println!("  Status: {}", case.status());
    Ok(())
}

pub fn advance(base: &Path, case_id: String, attribution: Attribution) -> Result<()> {
    let (case, outcome) = apply(base, &case_id, attribution, |ws, case, actor, note| {
        ws.engine.advance(case, actor, note)
    })?;

    match outcome {
        Advance::Moved { from, to } => {
            println!(
                "{} Case {} advanced: {} → {}",
                "✓".green().bold(),
                case.id().as_str().bold(),
                from,
                to.as_str().cyan()
            );
            println!("  Status: {}", case.status());
        }
        Advance::Completed => {
            println!(
                "{} Case {} completed",
                "✓".green().bold(),
                case.id().as_str().bold()
            );
        }
    }
    Ok(())
}

pub fn deny(base: &Path, case_id: String, attribution: Attribution) -> Result<()> {
    let (case, ()) = apply(base, &case_id, attribution, |ws, case, actor, note| {
        ws.engine.deny(case, actor, note)
    })?;

    println!(
        "{} Case {} denied at stage '{}'",
        "✗".red().bold(),
        case.id().as_str().bold(),
        case.current_stage()
    );
    Ok(())
}

pub fn hold(base: &Path, case_id: String, attribution: Attribution) -> Result<()> {
    let (case, ()) = apply(base, &case_id, attribution, |ws, case, actor, note| {
        ws.engine.hold(case, actor, note)
    })?;

    println!(
        "{} Case {} on hold at stage '{}'",
        "●".blue().bold(),
        case.id().as_str().bold(),
        case.current_stage()
    );
    Ok(())
}

pub fn release(base: &Path, case_id: String, attribution: Attribution) -> Result<()> {
    let (case, ()) = apply(base, &case_id, attribution, |ws, case, actor, note| {
        ws.engine.release(case, actor, note)
    })?;

    println!(
        "{} Case {} released",
        "▶".cyan().bold(),
        case.id().as_str().bold()
    );
    println!("  Status: {}", case.status());
    Ok(())
}

/// Set the expected completion date, or clear it with `expected: None`.
pub fn reschedule(
    base: &Path,
    case_id: String,
    expected: Option<String>,
    attribution: Attribution,
) -> Result<()> {
    let expected = expected.as_deref().map(parse_expected).transpose()?;
    let (case, ()) = apply(base, &case_id, attribution, |ws, case, actor, note| {
        ws.engine.reschedule(case, expected, actor, note)
    })?;

    match case.expected_completion_at() {
        Some(at) => println!(
            "{} Case {} expected by {}",
            "✓".green().bold(),
            case.id().as_str().bold(),
            at.format("%Y-%m-%d")
        ),
        None => println!(
            "{} Case {} has no expected completion date",
            "✓".green().bold(),
            case.id().as_str().bold()
        ),
    }
    Ok(())
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates. A plain date
/// means the end of that day (UTC), so a case is not overdue on its due date.
pub fn parse_expected(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(end_of_day) = date.and_hms_opt(23, 59, 59) {
            return Ok(end_of_day.and_utc());
        }
    }
    bail!("Invalid date '{value}'. Use YYYY-MM-DD or an RFC 3339 timestamp")
}
