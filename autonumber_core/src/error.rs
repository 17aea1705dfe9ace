//! Error types for template parsing, value resolution and rule configuration

use thiserror::Error;

/// Failure reported by a parent-record fetch collaborator
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Record '{id}' of type '{kind}' was not found")]
    NotFound { kind: String, id: String },

    #[error("Parent record fetch failed: {0}")]
    Failed(String),
}

/// Errors raised while parsing or expanding templates
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Unbalanced braces in template '{template}': {open} opening, {close} closing")]
    UnbalancedBraces {
        template: String,
        open: usize,
        close: usize,
    },

    #[error("Nested placeholder is not supported: '{placeholder}'")]
    NestedPlaceholder { placeholder: String },

    #[error("Malformed conditional '{expression}': {reason}")]
    MalformedConditional { expression: String, reason: String },

    #[error("Lookup field '{field}' does not hold a lookup reference")]
    ParentNotLookup { field: String },

    #[error("Failed to fetch parent record through '{lookup}': {source}")]
    ParentFetch {
        lookup: String,
        #[source]
        source: FetchError,
    },

    #[error("Attribute '{attribute}' holds an unsupported value type '{type_name}'")]
    UnsupportedValue {
        attribute: String,
        type_name: String,
    },
}

impl TemplateError {
    pub(crate) fn malformed_conditional(expression: &str, reason: &str) -> Self {
        Self::MalformedConditional {
            expression: expression.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Structural errors are problems with the template text itself
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnbalancedBraces { .. }
                | Self::NestedPlaceholder { .. }
                | Self::MalformedConditional { .. }
        )
    }
}

/// Errors raised while reading a persisted rule configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration is empty")]
    Empty,

    #[error("Configuration JSON is invalid: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Configuration does not name an entity")]
    MissingEntityName,

    #[error("Legacy configuration '{0}' is not a plain entity name")]
    InvalidLegacyName(String),

    #[error("Unknown trigger event '{0}'")]
    UnknownEvent(String),

    #[error("Configuration is invalid: {0}")]
    Invalid(String),

    #[error("Template '{field}' is invalid: {source}")]
    InvalidTemplate {
        field: &'static str,
        #[source]
        source: TemplateError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_classification() {
        let err = TemplateError::malformed_conditional("a?b", "missing '|'");
        assert!(err.is_structural());

        let err = TemplateError::ParentNotLookup {
            field: "parentcustomerid".to_string(),
        };
        assert!(!err.is_structural());
    }

    #[test]
    fn test_error_messages() {
        let err = TemplateError::UnbalancedBraces {
            template: "INV-{name".to_string(),
            open: 1,
            close: 0,
        };
        assert_eq!(
            err.to_string(),
            "Unbalanced braces in template 'INV-{name': 1 opening, 0 closing"
        );
    }
}
