//! Input validation for case ids, case types, stage ids, document tags,
//! actors and notes.
//!
//! Ids end up in file names under `.casework/`, so they are restricted to a
//! path-safe alphabet before any path is built from them.

use anyhow::{bail, Result};

/// Maximum allowed length for ids and tags.
pub const MAX_ID_LENGTH: usize = 128;

/// Maximum allowed length for an actor identifier.
pub const MAX_ACTOR_LENGTH: usize = 128;

/// Maximum allowed length for a history note.
pub const MAX_NOTE_LENGTH: usize = 2000;

/// Reserved names that cannot be used as ids (case-insensitive).
const RESERVED_NAMES: &[&str] = &[
    ".", "..", "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
    "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Validates that an id is safe for use in file paths.
///
/// An id is valid if it is non-empty, at most `MAX_ID_LENGTH` characters,
/// made of ASCII alphanumerics, dashes and underscores, and not a reserved
/// system name.
///
/// # Examples
///
/// ```
/// use casework::validation::validate_id;
///
/// assert!(validate_id("land-regularization").is_ok());
/// assert!(validate_id("proof_of_residence").is_ok());
/// assert!(validate_id("").is_err());
/// assert!(validate_id("../etc/passwd").is_err());
/// ```
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("ID cannot be empty");
    }

    if id.len() > MAX_ID_LENGTH {
        bail!(
            "ID too long: {} characters (max {})",
            id.len(),
            MAX_ID_LENGTH
        );
    }

    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_chars {
        bail!("ID '{id}' contains invalid characters. Use only alphanumeric characters, dashes (-), and underscores (_)");
    }

    let id_lower = id.to_lowercase();
    if RESERVED_NAMES.contains(&id_lower.as_str()) {
        bail!("ID '{id}' uses a reserved name");
    }

    Ok(())
}

/// Validates the identifier of whoever performs an operation.
///
/// Actors are free text (names, registration numbers, e-mail addresses) but
/// must be non-blank, single-line and bounded.
pub fn validate_actor(actor: &str) -> Result<()> {
    if actor.trim().is_empty() {
        bail!("Actor cannot be empty");
    }

    if actor.chars().count() > MAX_ACTOR_LENGTH {
        bail!(
            "Actor too long: {} characters (max {})",
            actor.chars().count(),
            MAX_ACTOR_LENGTH
        );
    }

    if actor.chars().any(char::is_control) {
        bail!("Actor '{}' contains control characters", actor.escape_debug());
    }

    Ok(())
}

/// Validates that a history note is within acceptable length limits.
pub fn validate_note(note: &str) -> Result<()> {
    if note.chars().count() > MAX_NOTE_LENGTH {
        bail!(
            "Note too long: {} characters (max {})",
            note.chars().count(),
            MAX_NOTE_LENGTH
        );
    }

    Ok(())
}

/// Clap value parser for validating id arguments.
///
/// ```ignore
/// #[arg(value_parser = clap_id_validator)]
/// case_id: String,
/// ```
pub fn clap_id_validator(s: &str) -> Result<String, String> {
    validate_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for actor arguments.
pub fn clap_actor_validator(s: &str) -> Result<String, String> {
    validate_actor(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for note arguments.
pub fn clap_note_validator(s: &str) -> Result<String, String> {
    validate_note(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
