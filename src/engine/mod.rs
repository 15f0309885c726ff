//! Workflow engine: stage transitions, document reviews, holds and the
//! derived status and progress of a case.

mod core;
mod progress;
mod status;

#[cfg(test)]
mod tests;

pub use self::core::{Advance, WorkflowEngine};
pub(crate) use self::core::check_input;
pub use progress::Progress;
pub(crate) use status::derive_open_status;
