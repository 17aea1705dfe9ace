//! Sequence formatting: expanded prefix, zero-padded counter, expanded suffix

use crate::error::TemplateError;
use crate::expansion::expand;
use crate::resolution::ValueResolver;
use crate::types::{ParentFetcher, RecordView};

/// Left-pad the counter with zeros to `digits`; wider values are kept whole
/// and the sign stays in front of the padding
pub fn zero_pad(counter: i64, digits: u32) -> String {
    let width = digits as usize;
    if counter < 0 {
        format!("-{:0width$}", counter.unsigned_abs(), width = width)
    } else {
        format!("{:0width$}", counter, width = width)
    }
}

/// Counter text of an identifier; zero digits omit the number
pub fn number_text(counter: i64, digits: u32) -> String {
    if digits == 0 {
        String::new()
    } else {
        zero_pad(counter, digits)
    }
}

pub fn format_sequence(
    prefix_template: &str,
    counter: i64,
    digits: u32,
    suffix_template: &str,
    resolver: &ValueResolver<'_>,
    record: &dyn RecordView,
    fetcher: &dyn ParentFetcher,
) -> Result<String, TemplateError> {
    let prefix = expand(prefix_template, resolver, record, fetcher)?;
    let number = number_text(counter, digits);
    let suffix = expand(suffix_template, resolver, record, fetcher)?;

    Ok(format!("{}{}{}", prefix, number, suffix))
}

/// Configuration-screen preview: raw templates around the next number padded
/// to at least one digit
pub fn preview(prefix: &str, next_number: Option<i64>, digits: u32, suffix: &str) -> String {
    let number = zero_pad(next_number.unwrap_or(1), digits.max(1));
    format!("{}{}{}", prefix, number, suffix)
}
