mod ids;
mod methods;
mod types;

#[cfg(test)]
mod tests;

pub use ids::{CaseId, CaseType, DocumentTag, StageId};
pub use types::{ApprovalState, Case, CaseStatus, Document, HistoryAction, HistoryEntry};
