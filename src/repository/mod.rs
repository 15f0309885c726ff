//! Case persistence
//!
//! The engine never touches storage; callers load a case, run an engine
//! operation and save the result. `save` refuses any write that would rewrite
//! history: the stored history must be a prefix of the incoming one. Two
//! writers that loaded the same record cannot both append, so the second
//! save fails with `Conflict` and the caller reloads.

mod file;
mod memory;
mod serialization;

use tracing::warn;

use crate::error::{WorkflowError, WorkflowResult};
use crate::models::case::{Case, CaseId, CaseType};

pub use file::FileRepository;
pub use memory::MemoryRepository;
pub use serialization::{case_from_markdown, case_to_markdown};

pub trait CaseRepository: Send + Sync {
    /// Load a case. Fails with `NotFound` if no such case exists.
    fn load(&self, id: &CaseId) -> WorkflowResult<Case>;

    /// Persist the full case.
    ///
    /// Fails with `Conflict` if the stored record has history the incoming
    /// case does not contain.
    fn save(&self, case: &Case) -> WorkflowResult<()>;

    /// Allocate an id, open a case in the first stage of `case_type` and
    /// persist it.
    fn create(&self, case_type: &CaseType, actor: &str, note: &str) -> WorkflowResult<Case>;

    /// All cases, oldest first.
    fn list(&self) -> WorkflowResult<Vec<Case>>;
}

/// Check that `incoming` only appends to `stored`.
pub(crate) fn check_append_only(stored: &Case, incoming: &Case) -> WorkflowResult<()> {
    let conflict = || {
        warn!(
            case_id = %incoming.id(),
            stored = stored.history().len(),
            incoming = incoming.history().len(),
            "save rejected: stored history is not a prefix of the incoming one"
        );
        WorkflowError::Conflict {
            case_id: incoming.id().clone(),
            stored: stored.history().len(),
            incoming: incoming.history().len(),
        }
    };

    if stored.id() != incoming.id()
        || stored.case_type() != incoming.case_type()
        || stored.opened_at() != incoming.opened_at()
    {
        return Err(conflict());
    }

    if !incoming.history().starts_with(stored.history()) {
        return Err(conflict());
    }

    Ok(())
}

fn sort_cases(cases: &mut [Case]) {
    cases.sort_by(|a, b| {
        a.opened_at()
            .cmp(&b.opened_at())
            .then_with(|| a.id().cmp(b.id()))
    });
}
