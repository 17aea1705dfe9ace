// RUNTIME PREFERENCES

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverPreferences {
    /// Length of `{rand}` strings whose length is missing or unparsable
    pub default_random_length: usize,

    /// Upper bound applied to requested random string lengths
    pub max_random_length: usize,

    /// Whether an unsupported attribute value fails resolution instead of
    /// falling back to the placeholder default
    pub reject_unsupported_values: bool,
}

impl Default for ResolverPreferences {
    fn default() -> Self {
        Self {
            default_random_length: env::var(env_vars::RANDOM_DEFAULT_LENGTH)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            max_random_length: env::var(env_vars::RANDOM_MAX_LENGTH)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
            reject_unsupported_values: env::var(env_vars::REJECT_UNSUPPORTED_VALUES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub resolver: ResolverPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Resolver
    pub const RANDOM_DEFAULT_LENGTH: &str = "AUTONUMBER_RANDOM_DEFAULT_LENGTH";
    pub const RANDOM_MAX_LENGTH: &str = "AUTONUMBER_RANDOM_MAX_LENGTH";
    pub const REJECT_UNSUPPORTED_VALUES: &str = "AUTONUMBER_REJECT_UNSUPPORTED_VALUES";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "AUTONUMBER_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "AUTONUMBER_LOGGING_MIN_LEVEL";
}
