//! # Numeric Format Strings
//!
//! Renders numbers the way host format strings expect them, invariant
//! culture only:
//!
//! - standard specifiers `N`, `F`, `D`, `P`, `G`, `C` with optional precision
//! - custom patterns built from `0`, `#`, `.`, `,`, `%`, quoted literals and
//!   `\` escapes
//!
//! Rounding is midpoint-away-from-zero throughout. Specifiers outside this
//! set render the natural form.

use crate::log_warning;
use crate::logging::codes;
use rust_decimal::{Decimal, RoundingStrategy};

const MAX_SCALE: u32 = 28;

/// Format a decimal with a host format string
pub fn format_decimal(value: Decimal, format: &str) -> String {
    if format.is_empty() {
        return value.to_string();
    }

    match parse_standard(format) {
        Some((specifier, precision)) => standard(value, specifier, precision),
        None => custom(value, format),
    }
}

/// Format a double; values with no decimal form fall back to their natural
/// string
pub fn format_f64(value: f64, format: &str) -> String {
    if format.is_empty() {
        return value.to_string();
    }

    match Decimal::try_from(value) {
        Ok(decimal) => format_decimal(decimal, format),
        Err(_) => value.to_string(),
    }
}

/// Whether a format string would be rendered by a known rule
pub fn is_supported(format: &str) -> bool {
    match parse_standard(format) {
        Some((specifier, _)) => matches!(specifier, 'N' | 'F' | 'D' | 'P' | 'G' | 'C'),
        None => true,
    }
}

/// A standard format is one letter with up to two precision digits
fn parse_standard(format: &str) -> Option<(char, Option<u32>)> {
    let mut chars = format.chars();
    let specifier = chars.next()?;
    if !specifier.is_ascii_alphabetic() {
        return None;
    }

    let digits = chars.as_str();
    if digits.is_empty() {
        return Some((specifier.to_ascii_uppercase(), None));
    }
    if digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits
        .parse()
        .ok()
        .map(|precision| (specifier.to_ascii_uppercase(), Some(precision)))
}

fn round(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places.min(MAX_SCALE), RoundingStrategy::MidpointAwayFromZero)
}

/// Integer and fraction digit strings of a magnitude
fn split_digits(magnitude: Decimal) -> (String, String) {
    let text = magnitude.abs().to_string();
    match text.split_once('.') {
        Some((int, frac)) => (int.to_string(), frac.to_string()),
        None => (text, String::new()),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn sign(rounded: Decimal) -> &'static str {
    if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    }
}

/// Fixed-point rendering with an exact number of decimals
fn fixed(value: Decimal, decimals: u32, grouping: bool) -> String {
    if decimals > MAX_SCALE {
        log_warning!(
            codes::resolution::FORMAT_FALLBACK,
            "Numeric precision exceeds decimal scale, capping",
            "requested" => decimals,
            "applied" => MAX_SCALE
        );
    }
    let rounded = round(value, decimals);
    let (int, mut frac) = split_digits(rounded);
    let decimals = decimals.min(MAX_SCALE) as usize;
    while frac.len() < decimals {
        frac.push('0');
    }

    let int = if grouping { group_thousands(&int) } else { int };
    if decimals == 0 {
        format!("{}{}", sign(rounded), int)
    } else {
        format!("{}{}.{}", sign(rounded), int, frac)
    }
}

fn standard(value: Decimal, specifier: char, precision: Option<u32>) -> String {
    match specifier {
        'N' | 'C' => fixed(value, precision.unwrap_or(2), true),
        'F' => fixed(value, precision.unwrap_or(2), false),
        'P' => match value.checked_mul(Decimal::ONE_HUNDRED) {
            Some(percent) => format!("{} %", fixed(percent, precision.unwrap_or(2), true)),
            None => overflow_fallback(value, "P"),
        },
        'D' => {
            let rounded = round(value, 0);
            let (int, _) = split_digits(rounded);
            let width = precision.unwrap_or(0) as usize;
            format!("{}{:0>width$}", sign(rounded), int, width = width)
        }
        'G' => match precision {
            Some(digits) if digits > 0 => value
                .round_sf_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero)
                .map(|rounded| rounded.normalize().to_string())
                .unwrap_or_else(|| value.to_string()),
            _ => value.to_string(),
        },
        _ => {
            log_warning!(
                codes::resolution::FORMAT_FALLBACK,
                "Unsupported numeric format specifier, using natural form",
                "specifier" => specifier
            );
            value.to_string()
        }
    }
}

/// Natural form for values that cannot be scaled by the format
fn overflow_fallback(value: Decimal, format: &str) -> String {
    log_warning!(
        codes::resolution::FORMAT_FALLBACK,
        "Scaled value overflows decimal range, using natural form",
        "format" => format,
        "value" => value
    );
    value.to_string()
}

// ============================================================================
// Custom patterns
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Zero,
    Hash,
    Point,
    Comma,
    Percent,
    Literal(String),
}

fn tokenize(format: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        let token = match c {
            '0' => Token::Zero,
            '#' => Token::Hash,
            '.' => Token::Point,
            ',' => Token::Comma,
            '%' => Token::Percent,
            '\\' => Token::Literal(chars.next().map(String::from).unwrap_or_default()),
            '\'' | '"' => {
                let literal: String = chars.by_ref().take_while(|&q| q != c).collect();
                Token::Literal(literal)
            }
            other => Token::Literal(other.to_string()),
        };
        tokens.push(token);
    }

    tokens
}

fn is_digit(token: &Token) -> bool {
    matches!(token, Token::Zero | Token::Hash)
}

fn custom(value: Decimal, format: &str) -> String {
    let tokens = tokenize(format);
    let point = tokens.iter().position(|t| *t == Token::Point);
    let (int_tokens, frac_tokens) = match point {
        Some(index) => (&tokens[..index], &tokens[index + 1..]),
        None => (&tokens[..], &tokens[0..0]),
    };

    // Commas between digit placeholders group; trailing ones scale by 1000
    let last_int_digit = int_tokens.iter().rposition(is_digit);
    let first_int_digit = int_tokens.iter().position(is_digit);
    let mut grouping = false;
    let mut scale = 0u32;
    for (index, token) in int_tokens.iter().enumerate() {
        if *token != Token::Comma {
            continue;
        }
        match (first_int_digit, last_int_digit) {
            (Some(first), Some(last)) if index > first && index < last => grouping = true,
            (Some(_), Some(last)) if index > last => scale += 1,
            _ => {}
        }
    }

    let mut scaled = value;
    for token in &tokens {
        if *token == Token::Percent {
            match scaled.checked_mul(Decimal::ONE_HUNDRED) {
                Some(percent) => scaled = percent,
                None => return overflow_fallback(value, format),
            }
        }
    }
    for _ in 0..scale {
        scaled /= Decimal::ONE_THOUSAND;
    }

    let frac_placeholders: Vec<&Token> = frac_tokens.iter().filter(|t| is_digit(t)).collect();
    let max_frac = frac_placeholders.len();
    let min_frac = frac_placeholders
        .iter()
        .rposition(|t| **t == Token::Zero)
        .map(|index| index + 1)
        .unwrap_or(0);
    let min_int = first_zero_run(int_tokens);

    let rounded = round(scaled, max_frac as u32);
    let (int_digits, mut frac_digits) = split_digits(rounded);
    while frac_digits.len() < max_frac {
        frac_digits.push('0');
    }
    while frac_digits.len() > min_frac && frac_digits.ends_with('0') {
        frac_digits.pop();
    }

    let mut int_digits = if int_digits == "0" { String::new() } else { int_digits };
    while int_digits.len() < min_int {
        int_digits.insert(0, '0');
    }

    let mut output = String::from(sign(rounded));
    output.push_str(&render_integer(int_tokens, &int_digits, grouping));
    if point.is_some() {
        output.push_str(&render_fraction(frac_tokens, &frac_digits));
    }
    output
}

/// Placeholders from the first `0` to the end of the integer part are
/// mandatory digits
fn first_zero_run(int_tokens: &[Token]) -> usize {
    let digits: Vec<&Token> = int_tokens.iter().filter(|t| is_digit(t)).collect();
    digits
        .iter()
        .position(|t| **t == Token::Zero)
        .map(|index| digits.len() - index)
        .unwrap_or(0)
}

/// Fill integer placeholders right to left; surplus digits land on the
/// leftmost placeholder
fn render_integer(int_tokens: &[Token], digits: &str, grouping: bool) -> String {
    let Some(leftmost) = int_tokens.iter().position(is_digit) else {
        return literals(int_tokens);
    };

    if grouping {
        let mut output = literals(&int_tokens[..leftmost]);
        output.push_str(&group_thousands(digits));
        for token in &int_tokens[leftmost..] {
            if let Token::Literal(text) = token {
                output.push_str(text);
            }
        }
        return output;
    }

    let mut remaining: Vec<char> = digits.chars().collect();
    let mut pieces: Vec<String> = Vec::new();
    for (index, token) in int_tokens.iter().enumerate().rev() {
        match token {
            Token::Zero | Token::Hash if index == leftmost => {
                pieces.push(remaining.drain(..).collect());
            }
            Token::Zero | Token::Hash => {
                if let Some(c) = remaining.pop() {
                    pieces.push(c.to_string());
                }
            }
            Token::Literal(text) => pieces.push(text.clone()),
            Token::Percent => pieces.push("%".to_string()),
            Token::Point | Token::Comma => {}
        }
    }
    pieces.reverse();
    pieces.concat()
}

fn render_fraction(frac_tokens: &[Token], digits: &str) -> String {
    let mut remaining = digits.chars();
    let mut output = String::new();
    if !digits.is_empty() {
        output.push('.');
    }
    for token in frac_tokens {
        match token {
            Token::Zero | Token::Hash => {
                if let Some(c) = remaining.next() {
                    output.push(c);
                }
            }
            Token::Literal(text) => output.push_str(text),
            Token::Percent => output.push('%'),
            Token::Point | Token::Comma => {}
        }
    }
    output
}

fn literals(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Literal(text) => Some(text.as_str()),
            Token::Percent => Some("%"),
            _ => None,
        })
        .collect()
}
