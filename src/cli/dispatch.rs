use anyhow::Result;
use casework::commands::list::ListFilter;
use casework::commands::transition::{self, Attribution};
use casework::commands::{create, init, list, show, types};
use casework::completions::{generate_completions, Shell};
use casework::models::case::CaseType;
use clap::CommandFactory;
use std::path::Path;
use std::str::FromStr;

use super::types::{AttributionArgs, Cli, Commands};

impl From<AttributionArgs> for Attribution {
    fn from(args: AttributionArgs) -> Self {
        Self {
            actor: args.actor,
            note: args.note,
        }
    }
}

pub fn dispatch(dir: &Path, command: Commands) -> Result<()> {
    match command {
        Commands::Init => init::execute(dir),
        Commands::Types { case_type, toml } => types::execute(dir, case_type, toml),
        Commands::Create {
            case_type,
            attribution,
        } => create::execute(dir, case_type, attribution.actor, attribution.note).map(|_| ()),
        Commands::Show { case_id, json } => show::execute(dir, case_id, json),
        Commands::List {
            case_type,
            open,
            overdue,
        } => list::execute(
            dir,
            ListFilter {
                case_type: case_type.map(CaseType::new),
                open_only: open,
                overdue_only: overdue,
            },
        ),
        Commands::Review {
            case_id,
            tag,
            state,
            attribution,
        } => transition::review(dir, case_id, tag, state, attribution.into()),
        Commands::Advance {
            case_id,
            attribution,
        } => transition::advance(dir, case_id, attribution.into()),
        Commands::Deny {
            case_id,
            attribution,
        } => transition::deny(dir, case_id, attribution.into()),
        Commands::Hold {
            case_id,
            attribution,
        } => transition::hold(dir, case_id, attribution.into()),
        Commands::Release {
            case_id,
            attribution,
        } => transition::release(dir, case_id, attribution.into()),
        Commands::Reschedule {
            case_id,
            expected,
            clear: _,
            attribution,
        } => transition::reschedule(dir, case_id, expected, attribution.into()),
        Commands::Completions { shell } => {
            let shell = Shell::from_str(&shell)?;
            let mut cmd = Cli::command();
            generate_completions(&mut cmd, shell, &mut std::io::stdout());
            Ok(())
        }
    }
}
