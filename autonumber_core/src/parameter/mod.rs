//! # Parameter Descriptors
//!
//! A placeholder such as `{parent.attr|default:format:match?true|false}` is
//! parsed into a [`ParameterDescriptor`]. Delimiters are applied in a fixed
//! order:
//!
//! 1. `:` splits the attribute part from the formatter/conditional part
//! 2. `|` splits a default value off the attribute part
//! 3. `.` splits a parent lookup name off the attribute part
//!
//! The sentinel attribute `rand` takes the whole text after its first `:` as
//! the random-string options (`length` or `length?style`).

use crate::conditional::ConditionalFormatter;
use crate::error::TemplateError;
use crate::log_debug;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Attribute name that requests a random string
pub const RANDOM_ATTRIBUTE: &str = "rand";

// Non-greedy, so `{a{b}` is matched as one placeholder and rejected as nested
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.*?)\}").expect("constant regex pattern is valid"));

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterDescriptor {
    /// Exact placeholder text including braces; the search/replace key
    pub raw_text: String,
    pub attribute_name: String,
    pub parent_lookup_name: String,
    pub default_value: String,
    pub string_formatter: String,
    pub conditional: ConditionalFormatter,
    /// A `match?true|false` part was written, even with empty match text
    pub has_conditional: bool,
}

impl ParameterDescriptor {
    /// Parse one placeholder, braces included
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let inner = raw.trim_start_matches('{').trim_end_matches('}');
        if inner.contains('{') {
            return Err(TemplateError::NestedPlaceholder {
                placeholder: raw.to_string(),
            });
        }

        let mut descriptor = ParameterDescriptor {
            raw_text: raw.to_string(),
            attribute_name: inner.to_string(),
            ..Self::default()
        };

        if let Some((head, rest)) = inner.split_once(':') {
            descriptor.attribute_name = head.to_string();

            if head == RANDOM_ATTRIBUTE {
                descriptor.string_formatter = rest.to_string();
            } else {
                match rest.split_once(':') {
                    Some((segment, _)) if segment.contains('?') => {
                        descriptor.conditional = ConditionalFormatter::parse(rest)?;
                        descriptor.has_conditional = true;
                    }
                    None if rest.contains('?') => {
                        descriptor.conditional = ConditionalFormatter::parse(rest)?;
                        descriptor.has_conditional = true;
                    }
                    Some((format, condition)) => {
                        descriptor.string_formatter = format.to_string();
                        descriptor.conditional = ConditionalFormatter::parse(condition)?;
                        descriptor.has_conditional = true;
                    }
                    None => {
                        descriptor.string_formatter = rest.to_string();
                    }
                }
            }
        }

        if let Some((name, default)) = split_first_segment(&descriptor.attribute_name, '|') {
            descriptor.default_value = default;
            descriptor.attribute_name = name;
        }

        if let Some((lookup, name)) = split_first_segment(&descriptor.attribute_name, '.') {
            descriptor.parent_lookup_name = lookup;
            descriptor.attribute_name = name;
        }

        log_debug!("Parsed placeholder",
            "placeholder" => raw,
            "attribute" => &descriptor.attribute_name,
            "parent" => &descriptor.parent_lookup_name,
            "conditional" => descriptor.conditional.has_condition()
        );

        Ok(descriptor)
    }

    pub fn is_parent_parameter(&self) -> bool {
        !self.parent_lookup_name.is_empty()
    }

    pub fn is_random_parameter(&self) -> bool {
        self.attribute_name == RANDOM_ATTRIBUTE
    }
}

/// Split on the first delimiter, keeping only the segment up to the next
/// occurrence of the same delimiter on the right-hand side
fn split_first_segment(text: &str, delimiter: char) -> Option<(String, String)> {
    let (left, rest) = text.split_once(delimiter)?;
    let right = rest.split(delimiter).next().unwrap_or_default();
    Some((left.to_string(), right.to_string()))
}

/// Lazy sequence of descriptors for the distinct placeholders of a text, in
/// first-occurrence order
pub struct Parameters<'t> {
    matches: regex::Matches<'static, 't>,
    seen: HashSet<&'t str>,
}

impl<'t> Iterator for Parameters<'t> {
    type Item = Result<ParameterDescriptor, TemplateError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.matches.next()?.as_str();
            if self.seen.insert(raw) {
                return Some(ParameterDescriptor::parse(raw));
            }
        }
    }
}

/// Discover every distinct placeholder in `text`
pub fn parameters_from_str(text: &str) -> Parameters<'_> {
    Parameters {
        matches: PLACEHOLDER_PATTERN.find_iter(text),
        seen: HashSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn parse(raw: &str) -> ParameterDescriptor {
        ParameterDescriptor::parse(raw).unwrap()
    }

    #[test]
    fn test_plain_attribute() {
        let descriptor = parse("{attributeName}");
        assert_eq!(descriptor.raw_text, "{attributeName}");
        assert_eq!(descriptor.attribute_name, "attributeName");
        assert_eq!(descriptor.parent_lookup_name, "");
        assert_eq!(descriptor.default_value, "");
        assert_eq!(descriptor.string_formatter, "");
        assert_eq!(descriptor.conditional, ConditionalFormatter::none());
        assert!(!descriptor.is_parent_parameter());
        assert!(!descriptor.is_random_parameter());
    }

    #[test]
    fn test_parent_attribute() {
        let descriptor = parse("{parentLookup.attributeName}");
        assert_eq!(descriptor.parent_lookup_name, "parentLookup");
        assert_eq!(descriptor.attribute_name, "attributeName");
        assert!(descriptor.is_parent_parameter());
    }

    #[test]
    fn test_default_value() {
        let descriptor = parse("{attributeName|defaultValue}");
        assert_eq!(descriptor.attribute_name, "attributeName");
        assert_eq!(descriptor.default_value, "defaultValue");
    }

    #[test]
    fn test_formatter() {
        let descriptor = parse("{attributeName:formatString}");
        assert_eq!(descriptor.attribute_name, "attributeName");
        assert_eq!(descriptor.string_formatter, "formatString");
        assert!(!descriptor.conditional.has_condition());
        assert!(!descriptor.has_conditional);
    }

    #[test]
    fn test_conditional_with_empty_match() {
        let descriptor = parse("{flag:?Yes|No}");
        assert!(descriptor.has_conditional);
        assert!(!descriptor.conditional.has_condition());
        assert_eq!(descriptor.conditional.true_value(), "Yes");
        assert_eq!(descriptor.conditional.false_value(), Some("No"));

        assert!(!parse("{flag}").has_conditional);
        assert!(parse("{flag:yes:x?Y|N}").has_conditional);
    }

    #[test]
    fn test_conditional_without_formatter() {
        let descriptor = parse("{attributeName:matchValue?trueValue|falseValue}");
        assert_eq!(descriptor.string_formatter, "");
        assert_eq!(
            descriptor.conditional,
            ConditionalFormatter::new("matchValue", "trueValue", "falseValue").unwrap()
        );
        assert_eq!(descriptor.conditional.result_str("matchValue"), "trueValue");
        assert_eq!(descriptor.conditional.result_str("other"), "falseValue");
    }

    #[test]
    fn test_all_parts() {
        let descriptor =
            parse("{parentLookup.attributeName|defaultValue:formatString:matchValue?trueValue|falseValue}");
        assert_eq!(descriptor.parent_lookup_name, "parentLookup");
        assert_eq!(descriptor.attribute_name, "attributeName");
        assert_eq!(descriptor.default_value, "defaultValue");
        assert_eq!(descriptor.string_formatter, "formatString");
        assert_eq!(
            descriptor.conditional,
            ConditionalFormatter::new("matchValue", "trueValue", "falseValue").unwrap()
        );
    }

    #[test]
    fn test_default_with_formatter_and_conditional() {
        let descriptor = parse("{attributeName|defaultValue:formatString:matchValue?trueValue|falseValue}");
        assert_eq!(descriptor.attribute_name, "attributeName");
        assert_eq!(descriptor.default_value, "defaultValue");
        assert_eq!(descriptor.string_formatter, "formatString");
        assert!(descriptor.conditional.has_condition());
    }

    #[test]
    fn test_chained_conditional() {
        let descriptor = parse("{attributeName:m1?r1|m2?r2|m3?r3|else}");
        let conditional = &descriptor.conditional;
        assert!(conditional.is_recursive());
        assert_eq!(conditional.result_str("m1"), "r1");
        assert_eq!(conditional.result_str("m2"), "r2");
        assert_eq!(conditional.result_str("m3"), "r3");
        assert_eq!(conditional.result_str("zzz"), "else");
    }

    #[test]
    fn test_numeric_conditional() {
        let descriptor = parse("{attributeName:>100?trueValue|falseValue}");
        assert_eq!(descriptor.conditional.result_f64(101.0), "trueValue");
        assert_eq!(descriptor.conditional.result_f64(99.0), "falseValue");
    }

    #[test]
    fn test_date_conditional() {
        let descriptor = parse("{attributeName:<2015-1-1?trueValue|falseValue}");
        let before = NaiveDate::from_ymd_opt(2014, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let after = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(descriptor.conditional.result_datetime(&before), "trueValue");
        assert_eq!(descriptor.conditional.result_datetime(&after), "falseValue");
    }

    #[test]
    fn test_formatted_date_conditional() {
        let descriptor = parse("{attributeName:yyyy:2015?trueValue|falseValue}");
        assert_eq!(descriptor.string_formatter, "yyyy");
        assert_eq!(descriptor.conditional.result_str("2015"), "trueValue");
        assert_eq!(descriptor.conditional.result_str("2016"), "falseValue");
    }

    #[test]
    fn test_conditional_keeps_colons_in_branches() {
        let descriptor = parse("{attributeName:m?10:30|later}");
        assert_eq!(descriptor.string_formatter, "");
        assert_eq!(descriptor.conditional.true_value(), "10:30");
    }

    #[test]
    fn test_random_parameter() {
        let descriptor = parse("{rand:6?lower}");
        assert!(descriptor.is_random_parameter());
        assert_eq!(descriptor.string_formatter, "6?lower");
        assert!(!descriptor.conditional.has_condition());

        let descriptor = parse("{rand}");
        assert!(descriptor.is_random_parameter());
        assert_eq!(descriptor.string_formatter, "");
    }

    #[test]
    fn test_split_keeps_single_segment() {
        let descriptor = parse("{a.b.c|d|e}");
        assert_eq!(descriptor.default_value, "d");
        assert_eq!(descriptor.parent_lookup_name, "a");
        assert_eq!(descriptor.attribute_name, "b");
    }

    #[test]
    fn test_malformed_conditional_is_rejected() {
        assert_matches!(
            ParameterDescriptor::parse("{attributeName:m?t}"),
            Err(TemplateError::MalformedConditional { .. })
        );
    }

    #[test]
    fn test_parameters_are_distinct_and_ordered() {
        let text = "{b}-{a}-{b}-{parent.c|x}";
        let names: Vec<String> = parameters_from_str(text)
            .map(|p| p.unwrap().raw_text)
            .collect();
        assert_eq!(names, vec!["{b}", "{a}", "{parent.c|x}"]);
    }

    #[test]
    fn test_parameters_restartable() {
        let text = "INV-{name}";
        assert_eq!(parameters_from_str(text).count(), 1);
        assert_eq!(parameters_from_str(text).count(), 1);
        assert_eq!(parameters_from_str("no placeholders").count(), 0);
    }

    #[test]
    fn test_nested_placeholder() {
        let mut parameters = parameters_from_str("{a{b}}");
        assert_matches!(
            parameters.next(),
            Some(Err(TemplateError::NestedPlaceholder { .. }))
        );
    }
}
