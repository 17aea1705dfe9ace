//! Configuration module
//!
//! Runtime preferences are read from `AUTONUMBER_*` environment variables with
//! defaults; see `runtime::env_vars` for the full list.

pub mod runtime;

pub use runtime::{LoggingPreferences, ResolverPreferences, RuntimeConfig};
