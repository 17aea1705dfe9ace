//! # Match Value Comparisons
//!
//! Per-type comparison of a resolved value against the literal match text of
//! a conditional link. When the match text cannot be read as the value's type
//! the value's invariant string form is compared literally instead.

use super::Operator;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// String comparisons are exact and ignore the operator
pub mod string {
    pub fn compare(actual: &str, expected: &str) -> bool {
        actual == expected
    }

}

/// Numeric comparisons over decimal magnitudes
pub mod numeric {
    use super::*;

    /// Read match text as a decimal, tolerating surrounding whitespace and
    /// thousands separators
    pub fn parse_match(expected: &str) -> Option<Decimal> {
        let cleaned: String = expected.trim().chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return None;
        }
        Decimal::from_str(&cleaned).ok()
    }

    pub fn compare(actual: Decimal, expected: &str, operator: Operator) -> bool {
        let Some(target) = parse_match(expected) else {
            return actual.to_string() == expected;
        };

        match operator {
            Operator::GreaterThan => actual > target,
            Operator::LessThan => actual < target,
            Operator::Equals => actual == target,
        }
    }

    /// Doubles are compared after conversion to decimal; values with no
    /// decimal form (NaN, infinities) only match literally
    pub fn compare_f64(actual: f64, expected: &str, operator: Operator) -> bool {
        match Decimal::try_from(actual) {
            Ok(value) => compare(value, expected, operator),
            Err(_) => actual.to_string() == expected,
        }
    }

}

/// Date comparisons
pub mod date {
    use super::*;

    const DATE_TIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

    /// Read match text as a date, accepting ISO-like and US invariant forms
    pub fn parse_match(expected: &str) -> Option<NaiveDateTime> {
        let text = expected.trim();

        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }

    /// Invariant short date (`MM/dd/yyyy`)
    pub fn short_date(value: &NaiveDateTime) -> String {
        value.format("%m/%d/%Y").to_string()
    }

    pub fn compare(actual: &NaiveDateTime, expected: &str, operator: Operator) -> bool {
        let Some(target) = parse_match(expected) else {
            return short_date(actual) == expected;
        };

        match operator {
            Operator::GreaterThan => *actual > target,
            Operator::LessThan => *actual < target,
            Operator::Equals => *actual == target,
        }
    }

}

/// GUID comparisons are equality only
pub mod guid {
    use super::*;

    pub fn compare(actual: &Uuid, expected: &str) -> bool {
        match Uuid::parse_str(expected.trim()) {
            Ok(target) => *actual == target,
            Err(_) => actual.to_string() == expected,
        }
    }

}
