use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::fs::WorkDir;

/// Create `.casework/` under `base`.
pub fn execute(base: &Path) -> Result<()> {
    let work_dir = WorkDir::new(base);
    work_dir.initialize()?;

    println!(
        "{} Initialized {}",
        "✓".green().bold(),
        work_dir.root().display()
    );
    println!(
        "  Add case types as {} or use the built-in ones ({}).",
        "graphs/<case-type>.toml".dimmed(),
        "casework types".bold()
    );
    Ok(())
}
