//! # Template Expansion
//!
//! Replaces every placeholder of a template with its resolved value. The
//! template is validated as a whole before anything is resolved, so a
//! malformed template never produces partial output.

use crate::error::TemplateError;
use crate::logging::codes;
use crate::parameter::{parameters_from_str, ParameterDescriptor};
use crate::resolution::ValueResolver;
use crate::types::{ParentFetcher, RecordView};
use crate::{log_debug, log_error};

/// Check brace balance, nesting and conditional syntax of a template
pub fn validate_template(text: &str) -> Result<(), TemplateError> {
    descriptors(text).map(|_| ())
}

/// Validated, de-duplicated descriptors in first-occurrence order
pub fn descriptors(text: &str) -> Result<Vec<ParameterDescriptor>, TemplateError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    if !braces_balanced(text) {
        let open = text.matches('{').count();
        let close = text.matches('}').count();
        log_error!(codes::template::UNBALANCED_BRACES, "Template braces are unbalanced",
            "template" => text,
            "open" => open,
            "close" => close
        );
        return Err(TemplateError::UnbalancedBraces {
            template: text.to_string(),
            open,
            close,
        });
    }

    parameters_from_str(text)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            let code = match err {
                TemplateError::NestedPlaceholder { .. } => codes::template::NESTED_PLACEHOLDER,
                _ => codes::template::MALFORMED_CONDITIONAL,
            };
            log_error!(code, "Template placeholder is invalid",
                "template" => text,
                "error" => &err
            );
            err
        })
}

/// Every `}` closes an earlier `{` and every `{` is closed
fn braces_balanced(text: &str) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => match depth.checked_sub(1) {
                Some(next) => depth = next,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

/// Expand a template against a record
///
/// Each distinct placeholder is resolved once and every occurrence of its
/// raw text is replaced.
pub fn expand(
    text: &str,
    resolver: &ValueResolver<'_>,
    record: &dyn RecordView,
    fetcher: &dyn ParentFetcher,
) -> Result<String, TemplateError> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }

    let descriptors = descriptors(text)?;
    let expanded = descriptors
        .iter()
        .try_fold(text.to_string(), |current, descriptor| {
            let value = resolver.resolve(descriptor, record, fetcher)?;
            Ok::<_, TemplateError>(current.replace(&descriptor.raw_text, &value))
        })?;

    log_debug!("Template expanded",
        "template" => text,
        "placeholders" => descriptors.len(),
        "result" => &expanded
    );

    Ok(expanded)
}
