//! File locking utilities for safe concurrent access to case records
//!
//! Provides locked read/write operations using `fs2` advisory locks so that
//! several processes (CLI invocations, service handlers) never observe a
//! half-written record.
//!
//! Advisory locks are cooperative - all participants must use these functions
//! for the locking to be effective.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Read file contents with a shared (read) lock.
pub fn locked_read(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    file.lock_shared()
        .with_context(|| format!("Failed to acquire shared lock: {}", path.display()))?;
    let mut content = String::new();
    BufReader::new(&file)
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(content)
}

/// Read-modify-write under a single exclusive lock.
///
/// The sequence is: open → lock → read → truncate → write → flush, so
/// readers never see a truncated file.
///
/// `update` receives the current content (`None` if the file is new or
/// empty) and returns the content to store. If `update` fails the file is
/// left untouched and its error is returned.
pub fn locked_update<E, F>(path: &Path, update: F) -> Result<(), E>
where
    E: From<anyhow::Error>,
    F: FnOnce(Option<&str>) -> Result<String, E>,
{
    #[allow(clippy::suspicious_open_options)]
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to open file for update: {}", path.display()))?;
    update_locked(file, path, update)
}

/// Like [`locked_update`], but never creates `path`.
///
/// Returns `Ok(false)` without calling `update` if the file does not exist.
pub fn locked_update_existing<E, F>(path: &Path, update: F) -> Result<bool, E>
where
    E: From<anyhow::Error>,
    F: FnOnce(Option<&str>) -> Result<String, E>,
{
    let file = match OpenOptions::new().read(true).write(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to open file for update: {}", path.display()))
                .into())
        }
    };
    update_locked(file, path, update)?;
    Ok(true)
}

fn update_locked<E, F>(mut file: File, path: &Path, update: F) -> Result<(), E>
where
    E: From<anyhow::Error>,
    F: FnOnce(Option<&str>) -> Result<String, E>,
{
    file.lock_exclusive()
        .with_context(|| format!("Failed to acquire exclusive lock: {}", path.display()))?;

    let mut current = String::new();
    file.read_to_string(&mut current)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let existing = (!current.is_empty()).then_some(current.as_str());

    let content = update(existing)?;

    file.set_len(0)
        .with_context(|| format!("Failed to truncate file: {}", path.display()))?;
    file.seek(SeekFrom::Start(0))
        .with_context(|| format!("Failed to rewind file: {}", path.display()))?;
    write_all(&file, path, &content)?;
    Ok(())
}

fn write_all(file: &File, path: &Path, content: &str) -> Result<()> {
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    Ok(())
}
