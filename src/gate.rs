//! Document gate: decides whether a case's documents allow it to leave its
//! current stage.

use std::collections::BTreeSet;

use crate::models::case::{Document, DocumentTag};

pub struct DocumentGate;

impl DocumentGate {
    /// True iff every required tag is present and approved.
    ///
    /// A document that is pending or rejected does not count.
    pub fn is_satisfied(required: &BTreeSet<DocumentTag>, documents: &[Document]) -> bool {
        required.iter().all(|tag| is_approved(tag, documents))
    }

    /// Required tags that are absent or not yet approved.
    pub fn missing(required: &BTreeSet<DocumentTag>, documents: &[Document]) -> BTreeSet<DocumentTag> {
        required
            .iter()
            .filter(|tag| !is_approved(tag, documents))
            .cloned()
            .collect()
    }
}

fn is_approved(tag: &DocumentTag, documents: &[Document]) -> bool {
    documents
        .iter()
        .any(|d| &d.tag == tag && d.is_approved())
}
