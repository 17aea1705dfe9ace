//! Command-line argument definitions for `autonumber`

use autonumber_core::TriggerEvent;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Preview, validate and generate AutoNumber identifiers from JSON records
#[derive(Parser, Debug)]
#[command(name = "autonumber")]
#[command(about = "Preview, validate and generate AutoNumber identifiers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug events
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit log events as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Seed `{rand}` placeholders for reproducible output
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand a template against a record
    Expand(ExpandArgs),

    /// Run a rule against a record and print the identifier
    Generate(GenerateArgs),

    /// Show the configuration-screen preview of a rule
    Preview(PreviewArgs),

    /// Check a template without resolving it
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Template text, e.g. "INV-{customerid.accountnumber|NA}-"
    #[arg(short, long)]
    pub template: String,

    /// JSON record the template is expanded against
    #[arg(short, long)]
    pub record: PathBuf,

    /// JSON map of parent records keyed by id
    #[arg(short, long)]
    pub store: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Rule configuration: a JSON file, inline JSON or a bare entity name
    #[arg(short, long)]
    pub config: String,

    /// JSON record receiving the identifier
    #[arg(short, long)]
    pub record: PathBuf,

    /// Counter value allocated for this record
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub counter: i64,

    /// Event being processed; defaults to the rule's own event
    #[arg(short, long, value_enum)]
    pub event: Option<EventChoice>,

    /// JSON map of parent records keyed by id
    #[arg(short, long)]
    pub store: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Rule configuration: a JSON file, inline JSON or a bare entity name
    #[arg(short, long)]
    pub config: String,

    /// Next counter value; 1 when omitted
    #[arg(short, long)]
    pub next: Option<i64>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[arg(short, long)]
    pub template: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventChoice {
    Create,
    Update,
}

impl From<EventChoice> for TriggerEvent {
    fn from(choice: EventChoice) -> Self {
        match choice {
            EventChoice::Create => TriggerEvent::Create,
            EventChoice::Update => TriggerEvent::Update,
        }
    }
}
