use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

const SUBDIRS: [&str; 2] = ["cases", "graphs"];

/// The `.casework/` directory holding configuration, graph files and case
/// records.
#[derive(Debug, Clone)]
pub struct WorkDir {
    root: PathBuf,
}

impl WorkDir {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            root: base_path.as_ref().join(".casework"),
        }
    }

    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    /// Create the directory layout with a default `config.toml`.
    pub fn initialize(&self) -> Result<()> {
        if self.exists() {
            bail!(".casework directory already exists");
        }

        fs::create_dir_all(&self.root).context("Failed to create .casework directory")?;

        for subdir in &SUBDIRS {
            let path = self.root.join(subdir);
            fs::create_dir(&path)
                .with_context(|| format!("Failed to create {subdir} directory"))?;
        }

        Config::default().save(&self.config_path())?;
        self.create_readme()?;

        Ok(())
    }

    pub fn load(&self) -> Result<()> {
        if !self.exists() {
            bail!(".casework directory does not exist. Run 'casework init' first.");
        }

        for dir in &SUBDIRS {
            let path = self.root.join(dir);
            if !path.exists() {
                fs::create_dir(&path)
                    .with_context(|| format!("Failed to create missing directory: {dir}"))?;
            }
        }

        Ok(())
    }

    fn create_readme(&self) -> Result<()> {
        let readme_content = r#"# casework directory

Managed by the casework CLI:

- `config.toml` - default actor and whether built-in case types are registered
- `graphs/` - case type definitions (`<case-type>.toml`), overriding built-ins with the same id
- `cases/` - one record per case: YAML frontmatter followed by a readable summary

Case records carry an append-only history. Edit them through `casework`
commands only; hand edits that rewrite history are rejected on the next save.
"#;

        let readme_path = self.root.join("README.md");
        fs::write(readme_path, readme_content).context("Failed to create README.md")?;

        Ok(())
    }

    pub fn cases_dir(&self) -> PathBuf {
        self.root.join("cases")
    }

    pub fn graphs_dir(&self) -> PathBuf {
        self.root.join("graphs")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
