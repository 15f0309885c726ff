use casework::models::case::ApprovalState;
use casework::validation::{clap_actor_validator, clap_id_validator, clap_note_validator};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "
casework - stage-gated case workflows

{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

#[derive(Parser)]
#[command(name = "casework")]
#[command(about = "Track municipal cases through document-gated stages", long_about = None)]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Directory containing .casework/ (defaults to the current directory)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Who performs an operation and why.
#[derive(Args, Debug, Clone, Default)]
pub struct AttributionArgs {
    /// Actor recorded in the case history (defaults to config.toml's default_actor)
    #[arg(short, long, value_parser = clap_actor_validator)]
    pub actor: Option<String>,

    /// Free-text note recorded in the case history
    #[arg(short, long, value_parser = clap_note_validator)]
    pub note: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the .casework/ directory
    Init,

    /// List case types, or show the stages of one
    Types {
        /// Case type to show (alphanumeric, dash, underscore only)
        #[arg(value_parser = clap_id_validator)]
        case_type: Option<String>,

        /// Print the case type as a graph file instead
        #[arg(long, requires = "case_type")]
        toml: bool,
    },

    /// Open a new case in the first stage of its type
    Create {
        /// Case type (e.g. land-regularization, medical-referral, service-ticket)
        #[arg(value_parser = clap_id_validator)]
        case_type: String,

        #[command(flatten)]
        attribution: AttributionArgs,
    },

    /// Show a case with its documents, progress and history
    Show {
        #[arg(value_parser = clap_id_validator)]
        case_id: String,

        /// Print JSON instead of the formatted report
        #[arg(long)]
        json: bool,
    },

    /// List cases, oldest first
    List {
        /// Only cases of this type
        #[arg(short = 't', long = "type", value_parser = clap_id_validator)]
        case_type: Option<String>,

        /// Hide completed and denied cases
        #[arg(long)]
        open: bool,

        /// Only open cases past their expected completion date
        #[arg(long)]
        overdue: bool,
    },

    /// Record the review of a document (pending, approved, rejected)
    Review {
        #[arg(value_parser = clap_id_validator)]
        case_id: String,

        /// Document tag (e.g. rg, cpf, proof-of-residence)
        #[arg(value_parser = clap_id_validator)]
        tag: String,

        /// Review outcome
        state: ApprovalState,

        #[command(flatten)]
        attribution: AttributionArgs,
    },

    /// Move a case to its next stage, completing it at the final stage
    Advance {
        #[arg(value_parser = clap_id_validator)]
        case_id: String,

        #[command(flatten)]
        attribution: AttributionArgs,
    },

    /// Deny a case (irreversible)
    Deny {
        #[arg(value_parser = clap_id_validator)]
        case_id: String,

        #[command(flatten)]
        attribution: AttributionArgs,
    },

    /// Hold a case for mid-stage work (e.g. a scheduled inspection)
    Hold {
        #[arg(value_parser = clap_id_validator)]
        case_id: String,

        #[command(flatten)]
        attribution: AttributionArgs,
    },

    /// Release a held case
    Release {
        #[arg(value_parser = clap_id_validator)]
        case_id: String,

        #[command(flatten)]
        attribution: AttributionArgs,
    },

    /// Set or clear the expected completion date
    Reschedule {
        #[arg(value_parser = clap_id_validator)]
        case_id: String,

        /// Expected completion (YYYY-MM-DD or RFC 3339)
        #[arg(conflicts_with = "clear", required_unless_present = "clear")]
        expected: Option<String>,

        /// Remove the expected completion date
        #[arg(long)]
        clear: bool,

        #[command(flatten)]
        attribution: AttributionArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}
