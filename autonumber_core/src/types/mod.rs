pub mod record;
pub mod value;

pub use record::{MemoryRecord, MemoryStore, NoParents, ParentFetcher, RecordView};
pub use value::{LookupReference, TypedValue};
