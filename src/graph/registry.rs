//! Stage graph registry
//!
//! Maps each case type to its ordered stage sequence and answers the
//! read-only questions the workflow engine asks: which stages exist, what
//! a stage requires, and which stage follows it.

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{WorkflowError, WorkflowResult};
use crate::models::case::{CaseType, DocumentTag, StageId};

use super::builtin::builtin_definitions;
use super::definition::CaseTypeDefinition;

#[derive(Debug, Clone, Default)]
pub struct StageGraph {
    types: BTreeMap<CaseType, CaseTypeDefinition>,
}

impl StageGraph {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in case types.
    pub fn builtin() -> Self {
        let mut graph = Self::new();
        for definition in builtin_definitions() {
            graph.types.insert(definition.id.clone(), definition);
        }
        graph
    }

    /// Register a case type, replacing any existing definition with the same id.
    pub fn register(&mut self, definition: CaseTypeDefinition) -> Result<()> {
        definition.validate()?;
        self.types.insert(definition.id.clone(), definition);
        Ok(())
    }

    pub fn with(mut self, definition: CaseTypeDefinition) -> Result<Self> {
        self.register(definition)?;
        Ok(self)
    }

    pub fn contains(&self, case_type: &CaseType) -> bool {
        self.types.contains_key(case_type)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &CaseTypeDefinition> {
        self.types.values()
    }

    pub fn definition(&self, case_type: &CaseType) -> WorkflowResult<&CaseTypeDefinition> {
        self.types
            .get(case_type)
            .ok_or_else(|| WorkflowError::UnknownCaseType(case_type.clone()))
    }

    /// Ordered stage ids of `case_type`.
    pub fn stages_for(&self, case_type: &CaseType) -> WorkflowResult<Vec<&StageId>> {
        Ok(self
            .definition(case_type)?
            .stages
            .iter()
            .map(|s| &s.id)
            .collect())
    }

    /// Document tags required to leave `stage`. Empty for ungated stages.
    pub fn requirements_for(
        &self,
        case_type: &CaseType,
        stage: &StageId,
    ) -> WorkflowResult<&BTreeSet<DocumentTag>> {
        let definition = self.definition(case_type)?;
        definition
            .stage(stage)
            .map(|s| &s.requires)
            .ok_or_else(|| invalid_stage(case_type, stage))
    }

    /// The stage after `stage`, or `None` when `stage` is the final one.
    pub fn next_stage(
        &self,
        case_type: &CaseType,
        stage: &StageId,
    ) -> WorkflowResult<Option<&StageId>> {
        let definition = self.definition(case_type)?;
        let index = definition
            .position(stage)
            .ok_or_else(|| invalid_stage(case_type, stage))?;
        Ok(definition.stages.get(index + 1).map(|s| &s.id))
    }

    /// Zero-based position of `stage` and the total stage count.
    pub fn position(&self, case_type: &CaseType, stage: &StageId) -> WorkflowResult<(usize, usize)> {
        let definition = self.definition(case_type)?;
        let index = definition
            .position(stage)
            .ok_or_else(|| invalid_stage(case_type, stage))?;
        Ok((index, definition.stages.len()))
    }
}

fn invalid_stage(case_type: &CaseType, stage: &StageId) -> WorkflowError {
    WorkflowError::InvalidStage {
        case_type: case_type.clone(),
        stage: stage.clone(),
    }
}
