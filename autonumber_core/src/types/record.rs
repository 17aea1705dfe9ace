//! # Record Access
//!
//! The engine never owns host records. It reads attributes through
//! [`RecordView`] and reaches related records through [`ParentFetcher`],
//! both implemented by the hosting system. [`MemoryRecord`] and
//! [`MemoryStore`] are in-memory implementations used by the CLI and tests.

use crate::error::FetchError;
use crate::types::value::{LookupReference, TypedValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Read-only view of a host record
pub trait RecordView {
    /// Whether the record carries the attribute at all
    fn contains(&self, field: &str) -> bool;

    /// Typed value of an attribute, `None` when absent
    fn get(&self, field: &str) -> Option<TypedValue>;

    /// Host-formatted display label of an attribute (e.g. "Yes"/"No")
    fn formatted_value(&self, _field: &str) -> Option<String> {
        None
    }
}

/// Fetches the record a lookup field points at
///
/// `column` is the single attribute the resolver needs, so hosts can issue a
/// narrow fetch. Failures propagate to the caller unchanged.
pub trait ParentFetcher {
    fn fetch_parent(
        &self,
        lookup_field: &str,
        reference: &LookupReference,
        column: &str,
    ) -> Result<Box<dyn RecordView>, FetchError>;
}

impl<F> ParentFetcher for F
where
    F: Fn(&str, &LookupReference, &str) -> Result<Box<dyn RecordView>, FetchError>,
{
    fn fetch_parent(
        &self,
        lookup_field: &str,
        reference: &LookupReference,
        column: &str,
    ) -> Result<Box<dyn RecordView>, FetchError> {
        self(lookup_field, reference, column)
    }
}

/// Fetcher for callers that have no related records available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParents;

impl ParentFetcher for NoParents {
    fn fetch_parent(
        &self,
        lookup_field: &str,
        _reference: &LookupReference,
        _column: &str,
    ) -> Result<Box<dyn RecordView>, FetchError> {
        Err(FetchError::Failed(format!(
            "no parent records available for '{}'",
            lookup_field
        )))
    }
}

/// In-memory record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    fields: BTreeMap<String, TypedValue>,
    #[serde(default)]
    formatted: BTreeMap<String, String>,
}

impl MemoryRecord {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with(mut self, field: &str, value: impl Into<TypedValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn with_formatted(mut self, field: &str, label: impl Into<String>) -> Self {
        self.formatted.insert(field.to_string(), label.into());
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<TypedValue>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<TypedValue> {
        self.formatted.remove(field);
        self.fields.remove(field)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Reference to this record, usable as a lookup value on a child
    pub fn to_reference(&self, name: impl Into<String>) -> Option<LookupReference> {
        self.id
            .map(|id| LookupReference::new(self.kind.clone(), id, name))
    }

    /// Copy holding only the requested column
    fn narrowed(&self, column: &str) -> MemoryRecord {
        let mut narrowed = MemoryRecord {
            kind: self.kind.clone(),
            id: self.id,
            ..MemoryRecord::default()
        };
        if let Some(value) = self.fields.get(column) {
            narrowed.fields.insert(column.to_string(), value.clone());
        }
        if let Some(label) = self.formatted.get(column) {
            narrowed.formatted.insert(column.to_string(), label.clone());
        }
        narrowed
    }
}

impl RecordView for MemoryRecord {
    fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    fn get(&self, field: &str) -> Option<TypedValue> {
        self.fields.get(field).cloned()
    }

    fn formatted_value(&self, field: &str) -> Option<String> {
        self.formatted.get(field).cloned()
    }
}

/// In-memory record store keyed by record id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    records: BTreeMap<Uuid, MemoryRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: Uuid, mut record: MemoryRecord) {
        record.id = Some(id);
        self.records.insert(id, record);
    }

    pub fn get(&self, id: &Uuid) -> Option<&MemoryRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ParentFetcher for MemoryStore {
    fn fetch_parent(
        &self,
        _lookup_field: &str,
        reference: &LookupReference,
        column: &str,
    ) -> Result<Box<dyn RecordView>, FetchError> {
        let record = self
            .records
            .get(&reference.id)
            .filter(|record| reference.kind.is_empty() || record.kind == reference.kind)
            .ok_or_else(|| FetchError::NotFound {
                kind: reference.kind.clone(),
                id: reference.id.to_string(),
            })?;

        Ok(Box::new(record.narrowed(column)))
    }
}
