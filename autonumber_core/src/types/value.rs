//! Typed attribute values read from host records

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reference from one record to another (a lookup field value)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupReference {
    pub id: Uuid,
    /// Display name of the referenced record
    #[serde(default)]
    pub name: String,
    /// Logical type of the referenced record
    #[serde(default)]
    pub kind: String,
}

impl LookupReference {
    pub fn new(kind: impl Into<String>, id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// Closed set of attribute value types the resolver understands
///
/// `Unsupported` stands in for any host value type outside this set. It is
/// resolved like an absent attribute unless the resolver is configured to
/// reject it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    String(String),
    Integer(i64),
    Decimal(Decimal),
    Double(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Money(Decimal),
    LookupReference(LookupReference),
    OptionValue { code: i32, label: String },
    Unsupported { type_name: String },
}

impl TypedValue {
    /// Short type name used in log context and errors
    pub fn type_name(&self) -> &str {
        match self {
            TypedValue::String(_) => "String",
            TypedValue::Integer(_) => "Integer",
            TypedValue::Decimal(_) => "Decimal",
            TypedValue::Double(_) => "Double",
            TypedValue::Boolean(_) => "Boolean",
            TypedValue::DateTime(_) => "DateTime",
            TypedValue::Money(_) => "Money",
            TypedValue::LookupReference(_) => "LookupReference",
            TypedValue::OptionValue { .. } => "OptionValue",
            TypedValue::Unsupported { type_name } => type_name,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_lookup(&self) -> Option<&LookupReference> {
        match self {
            TypedValue::LookupReference(reference) => Some(reference),
            _ => None,
        }
    }

    /// Option-set code, also accepting a plain integer
    pub fn as_option_code(&self) -> Option<i64> {
        match self {
            TypedValue::OptionValue { code, .. } => Some(i64::from(*code)),
            TypedValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn option(code: i32, label: impl Into<String>) -> Self {
        TypedValue::OptionValue {
            code,
            label: label.into(),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::String(s) => write!(f, "\"{}\"", s),
            TypedValue::Integer(i) => write!(f, "{}", i),
            TypedValue::Decimal(d) => write!(f, "{}", d),
            TypedValue::Double(d) => write!(f, "{}", d),
            TypedValue::Boolean(b) => write!(f, "{}", b),
            TypedValue::DateTime(dt) => write!(f, "{}", dt),
            TypedValue::Money(m) => write!(f, "money({})", m),
            TypedValue::LookupReference(r) => write!(f, "{}({})", r.kind, r.id),
            TypedValue::OptionValue { code, label } => write!(f, "option({}, {})", code, label),
            TypedValue::Unsupported { type_name } => write!(f, "unsupported({})", type_name),
        }
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::String(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::String(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Integer(value)
    }
}

impl From<i32> for TypedValue {
    fn from(value: i32) -> Self {
        TypedValue::Integer(i64::from(value))
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Double(value)
    }
}

impl From<Decimal> for TypedValue {
    fn from(value: Decimal) -> Self {
        TypedValue::Decimal(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for TypedValue {
    fn from(value: NaiveDateTime) -> Self {
        TypedValue::DateTime(value)
    }
}

impl From<LookupReference> for TypedValue {
    fn from(value: LookupReference) -> Self {
        TypedValue::LookupReference(value)
    }
}
