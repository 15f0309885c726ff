pub mod commands;
pub mod completions;
pub mod config;
pub mod engine;
pub mod error;
pub mod fs;
pub mod gate;
pub mod graph;
pub mod models;
pub mod parser;
pub mod repository;
pub mod validation;

pub use engine::{Advance, Progress, WorkflowEngine};
pub use error::{WorkflowError, WorkflowResult};
pub use graph::StageGraph;
pub use models::case::{ApprovalState, Case, CaseId, CaseStatus, CaseType, DocumentTag, StageId};
pub use repository::{CaseRepository, FileRepository, MemoryRepository};
