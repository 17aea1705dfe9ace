//! # AutoNumber CLI
//!

use autonumber_cli::cli::{Cli, Commands};
use autonumber_cli::commands::{self, Generated};
use autonumber_cli::{build_engine, logging_preferences};
use autonumber_core::logging::{self, codes};
use autonumber_core::log_error;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = logging::config::init_runtime_preferences(logging_preferences(&cli))
        .and_then(|_| logging::init_global_logging())
    {
        eprintln!("Error: {} ({})", err, codes::system::INITIALIZATION_FAILURE);
        std::process::exit(1);
    }

    let engine = build_engine(&cli);
    let outcome = match &cli.command {
        Commands::Expand(args) => commands::expand(&engine, args).map(Some),
        Commands::Generate(args) => commands::generate(&engine, args).map(|generated| match generated {
            Generated::Identifier(identifier) => Some(identifier),
            Generated::Skipped => None,
        }),
        Commands::Preview(args) => commands::preview(&engine, args).map(Some),
        Commands::Validate(args) => commands::validate(&engine, args).map(Some),
    };

    match outcome {
        Ok(Some(text)) => println!("{}", text),
        Ok(None) => eprintln!("Rule did not apply; no identifier generated"),
        Err(err) => {
            log_error!(codes::system::INTERNAL_ERROR, "Command failed", "error" => &err);
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
