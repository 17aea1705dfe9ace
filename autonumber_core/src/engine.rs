//! # Template Engine
//!
//! Entry point owning the random source and resolver preferences. Every
//! operation is a pure function of its arguments apart from `{rand}`, so one
//! engine can be shared across threads.

use crate::conditional::ConditionalFormatter;
use crate::config::{ResolverPreferences, RuntimeConfig};
use crate::error::TemplateError;
use crate::expansion;
use crate::logging::codes;
use crate::parameter::ParameterDescriptor;
use crate::resolution::{RandomSource, ThreadRandom, ValueResolver};
use crate::rule::{AutoNumberConfig, GateDecision, GenerationGate, TriggerEvent};
use crate::sequence;
use crate::types::{ParentFetcher, RecordView};
use crate::log_success;
use std::sync::{Arc, OnceLock};

#[derive(Clone)]
pub struct TemplateEngine {
    random: Arc<dyn RandomSource>,
    preferences: ResolverPreferences,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Engine with thread-local randomness and environment preferences
    pub fn new() -> Self {
        Self {
            random: Arc::new(ThreadRandom),
            preferences: ResolverPreferences::default(),
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new().with_preferences(config.resolver.clone())
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_preferences(mut self, preferences: ResolverPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn preferences(&self) -> &ResolverPreferences {
        &self.preferences
    }

    pub fn resolver(&self) -> ValueResolver<'_> {
        ValueResolver::new(self.random.as_ref(), &self.preferences)
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    pub fn parse_parameter(&self, raw: &str) -> Result<ParameterDescriptor, TemplateError> {
        ParameterDescriptor::parse(raw)
    }

    pub fn parse_conditional(&self, raw: &str) -> Result<ConditionalFormatter, TemplateError> {
        ConditionalFormatter::parse(raw)
    }

    pub fn validate_template(&self, text: &str) -> Result<(), TemplateError> {
        expansion::validate_template(text)
    }

    // ========================================================================
    // Expansion
    // ========================================================================

    pub fn resolve(
        &self,
        descriptor: &ParameterDescriptor,
        record: &dyn RecordView,
        fetcher: &dyn ParentFetcher,
    ) -> Result<String, TemplateError> {
        self.resolver().resolve(descriptor, record, fetcher)
    }

    pub fn expand_template(
        &self,
        text: &str,
        record: &dyn RecordView,
        fetcher: &dyn ParentFetcher,
    ) -> Result<String, TemplateError> {
        expansion::expand(text, &self.resolver(), record, fetcher)
    }

    pub fn format_sequence(
        &self,
        prefix_template: &str,
        counter: i64,
        digits: u32,
        suffix_template: &str,
        record: &dyn RecordView,
        fetcher: &dyn ParentFetcher,
    ) -> Result<String, TemplateError> {
        sequence::format_sequence(
            prefix_template,
            counter,
            digits,
            suffix_template,
            &self.resolver(),
            record,
            fetcher,
        )
    }

    /// Identifier for a target record, `None` when the rule does not apply
    ///
    /// The counter is allocated by the caller; incrementing and locking it
    /// stay with the host.
    pub fn generate(
        &self,
        config: &AutoNumberConfig,
        counter: i64,
        event: TriggerEvent,
        target: &dyn RecordView,
        fetcher: &dyn ParentFetcher,
    ) -> Result<Option<String>, TemplateError> {
        if let GateDecision::Skip(reason) = GenerationGate::evaluate(config, event, target) {
            log_success!(codes::success::RULE_SKIPPED, "Rule skipped",
                "rule" => config.registration_name(),
                "reason" => reason
            );
            return Ok(None);
        }

        let identifier = self.format_sequence(
            &config.prefix,
            counter,
            config.digits,
            &config.suffix,
            target,
            fetcher,
        )?;

        log_success!(codes::success::IDENTIFIER_GENERATED, "Identifier generated",
            "rule" => config.registration_name(),
            "attribute" => &config.target_attribute,
            "counter" => counter,
            "identifier" => &identifier
        );

        Ok(Some(identifier))
    }

    /// Preview text for a rule before any record exists
    pub fn preview(&self, config: &AutoNumberConfig, next_number: Option<i64>) -> String {
        sequence::preview(&config.prefix, next_number, config.digits, &config.suffix)
    }
}

fn default_engine() -> &'static TemplateEngine {
    static ENGINE: OnceLock<TemplateEngine> = OnceLock::new();
    ENGINE.get_or_init(TemplateEngine::new)
}

// ============================================================================
// Free functions over the default engine
// ============================================================================

pub fn expand_template(
    text: &str,
    record: &dyn RecordView,
    fetcher: &dyn ParentFetcher,
) -> Result<String, TemplateError> {
    default_engine().expand_template(text, record, fetcher)
}

pub fn format_sequence(
    prefix_template: &str,
    counter: i64,
    digits: u32,
    suffix_template: &str,
    record: &dyn RecordView,
    fetcher: &dyn ParentFetcher,
) -> Result<String, TemplateError> {
    default_engine().format_sequence(prefix_template, counter, digits, suffix_template, record, fetcher)
}

pub fn parse_parameter(raw: &str) -> Result<ParameterDescriptor, TemplateError> {
    ParameterDescriptor::parse(raw)
}

pub fn parse_conditional(raw: &str) -> Result<ConditionalFormatter, TemplateError> {
    ConditionalFormatter::parse(raw)
}
