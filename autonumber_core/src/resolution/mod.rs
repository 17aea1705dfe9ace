//! Placeholder value resolution
//!
//! - `resolver` dispatches on record value types
//! - `number_format` / `date_format` render host format strings
//! - `random` provides the injectable random source for `{rand}`

pub mod date_format;
pub mod number_format;
pub mod random;
pub mod resolver;

pub use random::{RandomSource, RandomStyle, SeededRandom, ThreadRandom};
pub use resolver::ValueResolver;
