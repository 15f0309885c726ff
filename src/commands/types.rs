//! Case type listing and graph export
//! Usage: casework types [<case-type>] [--toml]

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::graph::{graph_to_toml, CaseTypeDefinition};
use crate::models::case::CaseType;

use super::common::Workspace;

pub fn execute(base: &Path, case_type: Option<String>, toml: bool) -> Result<()> {
    let workspace = Workspace::open(base)?;
    let graph = workspace.engine.graph();

    match case_type {
        Some(case_type) => {
            let definition = graph.definition(&CaseType::new(case_type))?;
            if toml {
                print!("{}", graph_to_toml(definition)?);
            } else {
                print_definition(definition);
            }
        }
        None => {
            for definition in graph.definitions() {
                println!(
                    "{} {} {}",
                    definition.id.as_str().bold(),
                    definition.name,
                    format!("({} stages)", definition.stages.len()).dimmed()
                );
            }
        }
    }
    Ok(())
}

fn print_definition(definition: &CaseTypeDefinition) {
    println!("{} {}", definition.id.as_str().bold(), definition.name);
    for (index, stage) in definition.stages.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{}.", index + 1).dimmed(),
            stage.id.as_str().cyan(),
            stage.name
        );
        for tag in &stage.requires {
            println!("       {} {tag}", "requires".dimmed());
        }
    }
}
