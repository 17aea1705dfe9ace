//! # Conditional Formatter
//!
//! Chained ternary expressions of the form `match?true|false`, where the
//! false branch may itself be another `match?true|false` link:
//!
//! ```text
//! a?x|b?y|c?z|default
//! ```
//!
//! Each link compares the resolved value against its match text using the
//! operator encoded by a leading `>` or `<` (equality otherwise). Links are
//! evaluated left to right and the first match wins; the terminal link's
//! false text applies when nothing matches.

pub mod comparison;

use crate::error::TemplateError;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

/// Invariant general date form used for date passthrough
pub const GENERAL_DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    Equals,
    GreaterThan,
    LessThan,
}

impl Operator {
    /// Split a leading operator character off the match text
    fn split(match_expr: &str) -> (Operator, &str) {
        let operator = match match_expr.chars().next() {
            Some('>') => Operator::GreaterThan,
            Some('<') => Operator::LessThan,
            _ => Operator::Equals,
        };
        (operator, match_expr.trim_start_matches(['>', '<']))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a link produces when its match fails
#[derive(Debug, Clone, PartialEq)]
pub enum Otherwise {
    /// Terminal text
    Value(String),
    /// Next link of the chain
    Chain(Box<ConditionalFormatter>),
}

/// One link of a conditional chain
///
/// The default instance has no match text and acts as the identity: every
/// typed `result_*` call returns the value's natural string form.
///
/// Equality compares the operator as well as the match, true and false parts,
/// so `>5?a|b` and `5?a|b` are different links.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFormatter {
    operator: Operator,
    match_value: String,
    true_value: String,
    otherwise: Otherwise,
}

impl Default for ConditionalFormatter {
    fn default() -> Self {
        Self::none()
    }
}

impl ConditionalFormatter {
    /// Identity formatter
    pub fn none() -> Self {
        Self {
            operator: Operator::Equals,
            match_value: String::new(),
            true_value: String::new(),
            otherwise: Otherwise::Value(String::new()),
        }
    }

    /// Parse `match?true|false`
    pub fn parse(expression: &str) -> Result<Self, TemplateError> {
        let (match_expr, branches) = expression
            .split_once('?')
            .ok_or_else(|| TemplateError::malformed_conditional(expression, "missing '?'"))?;
        let (true_value, false_value) = branches.split_once('|').ok_or_else(|| {
            TemplateError::malformed_conditional(expression, "missing '|' after the true value")
        })?;

        Self::new(match_expr, true_value, false_value)
    }

    /// Build a link from its three parts; a false value containing `?` is
    /// parsed as the next link
    pub fn new(match_expr: &str, true_value: &str, false_value: &str) -> Result<Self, TemplateError> {
        let (operator, match_value) = Operator::split(match_expr);

        let otherwise = if false_value.contains('?') {
            Otherwise::Chain(Box::new(Self::parse(false_value)?))
        } else {
            Otherwise::Value(false_value.to_string())
        };

        Ok(Self {
            operator,
            match_value: match_value.to_string(),
            true_value: true_value.to_string(),
            otherwise,
        })
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn match_value(&self) -> &str {
        &self.match_value
    }

    pub fn true_value(&self) -> &str {
        &self.true_value
    }

    /// Terminal false text, `None` when the false branch is another link
    pub fn false_value(&self) -> Option<&str> {
        match &self.otherwise {
            Otherwise::Value(value) => Some(value),
            Otherwise::Chain(_) => None,
        }
    }

    pub fn false_condition(&self) -> Option<&ConditionalFormatter> {
        match &self.otherwise {
            Otherwise::Chain(next) => Some(next),
            Otherwise::Value(_) => None,
        }
    }

    pub fn has_condition(&self) -> bool {
        !self.match_value.is_empty()
    }

    pub fn is_recursive(&self) -> bool {
        matches!(self.otherwise, Otherwise::Chain(_))
    }

    /// Number of links in the chain
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut link = self;
        while let Otherwise::Chain(next) = &link.otherwise {
            depth += 1;
            link = next;
        }
        depth
    }

    /// Walk the chain and pick the output text
    ///
    /// A link without match text passes the value through, wherever it sits
    /// in the chain.
    fn select<P, M>(&self, passthrough: P, matches: M) -> String
    where
        P: FnOnce() -> String,
        M: Fn(&ConditionalFormatter) -> bool,
    {
        let mut link = self;
        loop {
            if !link.has_condition() {
                return passthrough();
            }
            if matches(link) {
                return link.true_value.clone();
            }
            match &link.otherwise {
                Otherwise::Value(value) => return value.clone(),
                Otherwise::Chain(next) => link = next,
            }
        }
    }

    // ========================================================================
    // Typed results
    // ========================================================================

    pub fn result_str(&self, input: &str) -> String {
        self.select(
            || input.to_string(),
            |link| comparison::string::compare(input, &link.match_value),
        )
    }

    pub fn result_guid(&self, input: &Uuid) -> String {
        self.select(
            || input.to_string(),
            |link| comparison::guid::compare(input, &link.match_value),
        )
    }

    pub fn result_f64(&self, input: f64) -> String {
        self.select(
            || input.to_string(),
            |link| comparison::numeric::compare_f64(input, &link.match_value, link.operator),
        )
    }

    pub fn result_decimal(&self, input: Decimal) -> String {
        self.select(
            || input.to_string(),
            |link| comparison::numeric::compare(input, &link.match_value, link.operator),
        )
    }

    pub fn result_datetime(&self, input: &NaiveDateTime) -> String {
        self.select(
            || input.format(GENERAL_DATE_FORMAT).to_string(),
            |link| comparison::date::compare(input, &link.match_value, link.operator),
        )
    }

    /// Booleans select between the true text and the terminal false text and
    /// never look at the match text
    pub fn result_bool(&self, input: bool) -> String {
        if input {
            return self.true_value.clone();
        }

        let mut link = self;
        loop {
            match &link.otherwise {
                Otherwise::Value(value) => return value.clone(),
                Otherwise::Chain(next) => link = next,
            }
        }
    }
}

impl fmt::Display for ConditionalFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_condition() && !self.is_recursive() && self.true_value.is_empty() {
            return Ok(());
        }

        let operator = match self.operator {
            Operator::Equals => "",
            other => other.as_str(),
        };
        write!(f, "{}{}?{}|", operator, self.match_value, self.true_value)?;
        match &self.otherwise {
            Otherwise::Value(value) => f.write_str(value),
            Otherwise::Chain(next) => write!(f, "{}", next),
        }
    }
}
