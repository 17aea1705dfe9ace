//! # AutoNumber CLI
//!
//! Thin harness over `autonumber_core` that loads records and rule
//! configurations from JSON files.

pub mod cli;
pub mod commands;
pub mod loader;

use autonumber_core::config::runtime::LogLevel;
use autonumber_core::config::LoggingPreferences;
use autonumber_core::{SeededRandom, TemplateEngine};
use std::sync::Arc;

/// Logging preferences from the environment, overridden by command-line flags
pub fn logging_preferences(cli: &cli::Cli) -> LoggingPreferences {
    let mut preferences = LoggingPreferences::default();
    if cli.verbose {
        preferences.min_log_level = LogLevel::Debug;
    }
    if cli.json_logs {
        preferences.use_structured_logging = true;
    }
    preferences
}

/// Engine for one invocation; `--seed` makes `{rand}` reproducible
pub fn build_engine(cli: &cli::Cli) -> TemplateEngine {
    let engine = TemplateEngine::new();
    match cli.seed {
        Some(seed) => engine.with_random(Arc::new(SeededRandom::new(seed))),
        None => engine,
    }
}
