//! Terminal rendering for cases

use chrono::Utc;
use colored::{ColoredString, Colorize};
use std::collections::BTreeSet;

use crate::engine::Progress;
use crate::models::case::{ApprovalState, Case, CaseStatus, DocumentTag, HistoryEntry};

/// Status indicator with color for display
pub fn status_indicator(status: CaseStatus) -> ColoredString {
    match status {
        CaseStatus::AwaitingDocuments => "○".yellow().bold(),
        CaseStatus::InProgress => "●".blue().bold(),
        CaseStatus::ReadyToAdvance => "▶".cyan().bold(),
        CaseStatus::Completed => "✓".green().bold(),
        CaseStatus::Denied => "✗".red().bold(),
    }
}

fn approval_indicator(state: ApprovalState) -> ColoredString {
    match state {
        ApprovalState::Approved => "✓".green(),
        ApprovalState::Pending => "?".yellow(),
        ApprovalState::Rejected => "✗".red(),
    }
}

/// `[████████░░░░░░░░░░░░] 40%`
pub fn progress_bar(progress: Progress, status: CaseStatus) -> String {
    let width = 20;
    let filled = ((progress.ratio() * width as f64).round() as usize).min(width);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(width - filled));

    let bar = match status {
        CaseStatus::Completed => bar.green(),
        CaseStatus::Denied => bar.red(),
        CaseStatus::AwaitingDocuments => bar.yellow(),
        CaseStatus::InProgress | CaseStatus::ReadyToAdvance => bar.blue(),
    };
    format!("[{bar}] {progress}")
}

/// One line per case for `casework list`.
pub fn case_line(case: &Case, progress: Progress) -> String {
    let mut line = format!(
        "{} {} {} {} {}",
        status_indicator(case.status()),
        case.id().as_str().bold(),
        case.case_type().as_str().dimmed(),
        case.current_stage(),
        format!("{progress}").dimmed()
    );
    if case.is_held() {
        line.push_str(&format!(" {}", "(held)".blue()));
    }
    if case.is_overdue(Utc::now()) {
        line.push_str(&format!(" {}", "overdue".red().bold()));
    }
    line
}

pub fn history_line(entry: &HistoryEntry) -> String {
    let mut line = format!(
        "{} {} {} {}",
        entry.at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        format!("[{}]", entry.stage).cyan(),
        entry.actor.bold(),
        entry.action
    );
    if !entry.note.is_empty() {
        line.push_str(&format!(" {} {}", "-".dimmed(), entry.note.replace('\n', " ")));
    }
    line
}

/// Full case report for `casework show`.
pub fn print_case(case: &Case, progress: Progress, missing: &BTreeSet<DocumentTag>) {
    println!(
        "{} {} {}",
        status_indicator(case.status()),
        "Case".bold(),
        case.id().as_str().bold()
    );
    println!("  Type:     {}", case.case_type());
    println!("  Stage:    {}", case.current_stage());
    let held = if case.is_held() { " (held)" } else { "" };
    println!("  Status:   {}{held}", case.status());
    println!("  Progress: {}", progress_bar(progress, case.status()));
    println!("  Opened:   {}", case.opened_at().format("%Y-%m-%d %H:%M"));
    if let Some(expected) = case.expected_completion_at() {
        let overdue = if case.is_overdue(Utc::now()) {
            format!(" {}", "overdue".red().bold())
        } else {
            String::new()
        };
        println!("  Expected: {}{overdue}", expected.format("%Y-%m-%d"));
    }
    if let Some(closed) = case.closed_at() {
        println!("  Closed:   {}", closed.format("%Y-%m-%d %H:%M"));
    }

    if !case.documents().is_empty() {
        println!();
        println!("{}", "Documents".bold());
        for doc in case.documents() {
            println!(
                "  {} {} {}",
                approval_indicator(doc.approval),
                doc.tag,
                format!("({})", doc.approval).dimmed()
            );
        }
    }

    if !missing.is_empty() && !case.is_closed() {
        println!();
        println!("{}", "Missing for this stage".yellow().bold());
        for tag in missing {
            println!("  {} {tag}", "○".yellow());
        }
    }

    println!();
    println!("{}", "History".bold());
    for entry in case.history() {
        println!("  {}", history_line(entry));
    }
}
