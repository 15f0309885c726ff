use std::collections::BTreeSet;

use crate::gate::DocumentGate;
use crate::models::case::{CaseStatus, Document, DocumentTag};

/// Status of a case that is not terminal.
///
/// Terminal statuses are set only by the operations that close a case, so
/// they are never derived here.
pub(crate) fn derive_open_status(
    requires: &BTreeSet<DocumentTag>,
    documents: &[Document],
    held: bool,
) -> CaseStatus {
    if !DocumentGate::is_satisfied(requires, documents) {
        CaseStatus::AwaitingDocuments
    } else if held {
        CaseStatus::InProgress
    } else {
        CaseStatus::ReadyToAdvance
    }
}
