use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{dispatch, Cli};

/// Log filter, e.g. `CASEWORK_LOG=casework=debug`
const LOG_ENV: &str = "CASEWORK_LOG";

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    dispatch(&cli.dir, cli.command)
}
