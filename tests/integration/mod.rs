//! Integration tests for the casework command layer
//!
//! These tests drive the same functions the CLI dispatches to against a
//! temporary `.casework/` directory.

pub mod commands;
pub mod graph_files;
pub mod helpers;
