use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

/// Parse a type from markdown content with YAML frontmatter
///
/// ```text
/// let case: Case = parse_from_markdown(&content, "Case")?;
/// ```
pub fn parse_from_markdown<T: DeserializeOwned>(content: &str, type_name: &str) -> Result<T> {
    let frontmatter = extract_yaml_frontmatter(content)?;
    serde_yaml::from_value(frontmatter)
        .with_context(|| format!("Failed to parse {type_name} from frontmatter"))
}

/// Extract YAML frontmatter from markdown content
///
/// Expects frontmatter delimited by `---` at the start and end:
///
/// ```text
/// ---
/// id: case-0f3a
/// status: awaiting-documents
/// ---
/// # Markdown content here
/// ```
///
/// # Errors
///
/// Returns an error if the opening `---` is missing, the closing `---` is
/// not found, or the YAML cannot be parsed.
pub fn extract_yaml_frontmatter(content: &str) -> Result<serde_yaml::Value> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.is_empty() || !lines[0].trim().starts_with("---") {
        bail!("No frontmatter delimiter found at start of content");
    }

    // The closing delimiter must sit at the opening's indentation, so `---`
    // inside an indented block scalar (a multi-line note) is not mistaken for it.
    let opening_indent = lines[0].len() - lines[0].trim_start().len();

    let mut end_idx = None;
    for (idx, line) in lines.iter().enumerate().skip(1) {
        let trimmed = line.trim_start();
        if trimmed.starts_with("---") {
            let line_indent = line.len() - trimmed.len();
            if line_indent == opening_indent {
                end_idx = Some(idx);
                break;
            }
        }
    }

    let end_idx =
        end_idx.ok_or_else(|| anyhow::anyhow!("Frontmatter not properly closed with ---"))?;

    let yaml_content = lines[1..end_idx].join("\n");

    serde_yaml::from_str(&yaml_content).context("Failed to parse YAML frontmatter")
}
