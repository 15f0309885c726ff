//! Case records as markdown with YAML frontmatter
//!
//! The frontmatter carries the full case; the body is a human-readable
//! summary regenerated on every save and ignored when loading.

use anyhow::{Context, Result};

use crate::models::case::Case;
use crate::parser::frontmatter::parse_from_markdown;

pub fn case_from_markdown(content: &str) -> Result<Case> {
    parse_from_markdown(content, "Case")
}

pub fn case_to_markdown(case: &Case) -> Result<String> {
    let yaml = serde_yaml::to_string(case).context("Failed to serialize Case to YAML")?;

    let mut content = String::new();
    content.push_str("---\n");
    content.push_str(&yaml);
    content.push_str("---\n\n");

    content.push_str(&format!("# Case: {}\n\n", case.id()));
    content.push_str(&format!("**Type**: {}\n\n", case.case_type()));
    content.push_str(&format!("**Stage**: {}\n\n", case.current_stage()));
    content.push_str(&format!("**Status**: {}", case.status()));
    if case.is_held() {
        content.push_str(" (held)");
    }
    content.push_str("\n\n");

    if let Some(expected) = case.expected_completion_at() {
        content.push_str(&format!(
            "**Expected completion**: {}\n\n",
            expected.format("%Y-%m-%d")
        ));
    }

    if !case.documents().is_empty() {
        content.push_str("## Documents\n\n");
        for doc in case.documents() {
            let mark = if doc.is_approved() { "x" } else { " " };
            content.push_str(&format!("- [{mark}] {} ({})\n", doc.tag, doc.approval));
        }
        content.push('\n');
    }

    content.push_str("## History\n\n");
    for entry in case.history() {
        content.push_str(&format!(
            "- {} `{}` {}: {}",
            entry.at.format("%Y-%m-%d %H:%M"),
            entry.stage,
            entry.actor,
            entry.action
        ));
        if let Some(first_line) = entry.note.lines().next().filter(|l| !l.trim().is_empty()) {
            content.push_str(&format!(" ({})", first_line.trim()));
        }
        content.push('\n');
    }

    Ok(content)
}
