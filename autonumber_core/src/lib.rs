//! AutoNumber template engine
//!
//! Expands identifier templates such as `INV-{customerid.accountnumber|NA}-`
//! against host records and combines them with a zero-padded counter.

// Internal modules
#[macro_use]
pub mod logging;
pub mod conditional;
pub mod config;
pub mod engine;
pub mod error;
pub mod expansion;
pub mod parameter;
pub mod resolution;
pub mod rule;
pub mod sequence;
pub mod types;

// Re-export key types for library consumers
pub use conditional::{ConditionalFormatter, Operator};
pub use engine::{expand_template, format_sequence, parse_conditional, parse_parameter, TemplateEngine};
pub use error::{ConfigError, FetchError, TemplateError};
pub use expansion::validate_template;
pub use parameter::{parameters_from_str, ParameterDescriptor};
pub use resolution::{RandomSource, SeededRandom, ThreadRandom, ValueResolver};
pub use rule::{AutoNumberConfig, GateDecision, GenerationGate, SkipReason, TriggerEvent};
pub use sequence::{preview, zero_pad};
pub use types::{
    LookupReference, MemoryRecord, MemoryStore, NoParents, ParentFetcher, RecordView, TypedValue,
};
