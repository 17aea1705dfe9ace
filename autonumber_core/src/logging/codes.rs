//! Consolidated event codes and classification
//!
//! Single source of truth for the codes attached to log events and the metadata
//! (category, severity, description) used when formatting them.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Metadata for a registered code
#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
}

impl CodeMetadata {
    const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        description: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            description,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Template structure error codes
pub mod template {
    use super::Code;

    pub const UNBALANCED_BRACES: Code = Code::new("E010");
    pub const NESTED_PLACEHOLDER: Code = Code::new("E011");
    pub const MALFORMED_CONDITIONAL: Code = Code::new("E012");
}

/// Value resolution codes
pub mod resolution {
    use super::Code;

    pub const PARENT_NOT_LOOKUP: Code = Code::new("E020");
    pub const PARENT_FETCH_FAILED: Code = Code::new("E021");
    pub const UNSUPPORTED_VALUE: Code = Code::new("W022");
    pub const RANDOM_LENGTH_FALLBACK: Code = Code::new("W023");
    pub const FORMAT_FALLBACK: Code = Code::new("W024");
}

/// Rule configuration codes
pub mod rule {
    use super::Code;

    pub const CONFIG_INVALID: Code = Code::new("E030");
    pub const LEGACY_CONFIG: Code = Code::new("W031");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const TEMPLATE_EXPANDED: Code = Code::new("I010");
    pub const IDENTIFIER_GENERATED: Code = Code::new("I011");
    pub const RULE_SKIPPED: Code = Code::new("I012");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static CODE_REGISTRY: OnceLock<HashMap<&'static str, CodeMetadata>> = OnceLock::new();

fn get_code_registry() -> &'static HashMap<&'static str, CodeMetadata> {
    CODE_REGISTRY.get_or_init(|| {
        [
            CodeMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                "Critical internal error",
            ),
            CodeMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                "Logging system initialization failure",
            ),
            CodeMetadata::new(
                "E010",
                "Template",
                Severity::High,
                "Opening and closing brace counts differ",
            ),
            CodeMetadata::new(
                "E011",
                "Template",
                Severity::High,
                "Placeholder contains another opening brace",
            ),
            CodeMetadata::new(
                "E012",
                "Template",
                Severity::High,
                "Conditional expression is missing '?' or '|'",
            ),
            CodeMetadata::new(
                "E020",
                "Resolution",
                Severity::Medium,
                "Parent lookup field does not hold a lookup reference",
            ),
            CodeMetadata::new(
                "E021",
                "Resolution",
                Severity::High,
                "Parent record could not be fetched",
            ),
            CodeMetadata::new(
                "W022",
                "Resolution",
                Severity::Low,
                "Attribute value type is not supported, default value used",
            ),
            CodeMetadata::new(
                "W023",
                "Resolution",
                Severity::Low,
                "Random string length could not be parsed, default length used",
            ),
            CodeMetadata::new(
                "W024",
                "Resolution",
                Severity::Low,
                "Format string could not be applied, natural form used",
            ),
            CodeMetadata::new(
                "E030",
                "Rule",
                Severity::High,
                "Rule configuration is invalid",
            ),
            CodeMetadata::new(
                "W031",
                "Rule",
                Severity::Low,
                "Legacy bare entity name configuration",
            ),
            CodeMetadata::new("I001", "System", Severity::Low, "Logging initialized"),
            CodeMetadata::new("I010", "Template", Severity::Low, "Template expanded"),
            CodeMetadata::new("I011", "Rule", Severity::Low, "Identifier generated"),
            CodeMetadata::new("I012", "Rule", Severity::Low, "Rule skipped"),
        ]
        .into_iter()
        .map(|metadata| (metadata.code, metadata))
        .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_metadata(code: &str) -> Option<&'static CodeMetadata> {
    get_code_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
