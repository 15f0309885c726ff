//! Stage graphs: the ordered stages of each case type and what each stage
//! requires before a case may leave it.

pub mod builtin;
mod definition;
mod loader;
mod registry;

#[cfg(test)]
mod tests;

pub use definition::{CaseTypeDefinition, StageDefinition};
pub use loader::{graph_to_toml, load_graph_dir, load_graph_file, parse_graph};
pub use registry::StageGraph;
