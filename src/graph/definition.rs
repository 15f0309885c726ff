//! Case type and stage definitions

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::models::case::{CaseType, DocumentTag, StageId};
use crate::validation::validate_id;

/// One stage of a case type's graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    pub id: StageId,
    /// Human-readable stage name
    pub name: String,
    /// Document tags that must be approved before the case may leave this stage
    #[serde(default)]
    pub requires: BTreeSet<DocumentTag>,
}

impl StageDefinition {
    pub fn new(id: &str, name: &str, requires: &[&str]) -> Self {
        Self {
            id: StageId::from(id),
            name: name.to_string(),
            requires: requires.iter().copied().map(DocumentTag::from).collect(),
        }
    }
}

/// The ordered stage sequence of one case type.
///
/// Construct through `CaseTypeDefinition::new` or deserialize and then call
/// `validate`; the registry refuses definitions that fail validation, so a
/// registered definition always has at least one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseTypeDefinition {
    pub id: CaseType,
    pub name: String,
    pub stages: Vec<StageDefinition>,
}

impl CaseTypeDefinition {
    pub fn new(id: &str, name: &str, stages: Vec<StageDefinition>) -> Self {
        Self {
            id: CaseType::from(id),
            name: name.to_string(),
            stages,
        }
    }

    /// Check the definition is usable as a graph.
    ///
    /// Requires a valid id, at least one stage, unique stage ids and valid
    /// document tags.
    pub fn validate(&self) -> Result<()> {
        validate_id(self.id.as_str()).context("Invalid case type id")?;

        if self.stages.is_empty() {
            bail!("Case type '{}' defines no stages", self.id);
        }

        let mut seen = HashSet::new();
        for stage in &self.stages {
            validate_id(stage.id.as_str())
                .with_context(|| format!("Invalid stage id in case type '{}'", self.id))?;
            if !seen.insert(&stage.id) {
                bail!(
                    "Case type '{}' defines stage '{}' more than once",
                    self.id,
                    stage.id
                );
            }
            for tag in &stage.requires {
                validate_id(tag.as_str()).with_context(|| {
                    format!(
                        "Invalid document tag in stage '{}' of case type '{}'",
                        stage.id, self.id
                    )
                })?;
            }
        }

        Ok(())
    }

    /// Position of `stage` in the ordered sequence.
    pub fn position(&self, stage: &StageId) -> Option<usize> {
        self.stages.iter().position(|s| &s.id == stage)
    }

    pub fn stage(&self, stage: &StageId) -> Option<&StageDefinition> {
        self.stages.iter().find(|s| &s.id == stage)
    }

    pub(crate) fn first_stage(&self) -> &StageDefinition {
        &self.stages[0]
    }

    pub fn is_final(&self, stage: &StageId) -> bool {
        self.stages.last().is_some_and(|s| &s.id == stage)
    }
}
