//! AutoNumber rules: the persisted configuration and the generation gate

pub mod config;
pub mod gate;

pub use config::{AutoNumberConfig, TriggerEvent};
pub use gate::{GateDecision, GenerationGate, SkipReason};
