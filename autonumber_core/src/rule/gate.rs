//! Decides whether a rule generates an identifier for a target record

use super::config::{AutoNumberConfig, TriggerEvent};
use crate::types::{RecordView, TypedValue};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The rule is registered for another event
    EventMismatch,
    /// Update without the trigger attribute in the changed values
    TriggerAttributeAbsent,
    /// Conditional option set missing or holding another value
    ConditionNotMet,
    /// Target already holds an identifier
    ValueAlreadyPresent,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::EventMismatch => "event mismatch",
            SkipReason::TriggerAttributeAbsent => "trigger attribute absent",
            SkipReason::ConditionNotMet => "condition not met",
            SkipReason::ValueAlreadyPresent => "value already present",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Generate,
    Skip(SkipReason),
}

impl GateDecision {
    pub fn is_generate(&self) -> bool {
        matches!(self, GateDecision::Generate)
    }
}

pub struct GenerationGate;

impl GenerationGate {
    pub fn evaluate(
        config: &AutoNumberConfig,
        event: TriggerEvent,
        target: &dyn RecordView,
    ) -> GateDecision {
        if config.event != event {
            return GateDecision::Skip(SkipReason::EventMismatch);
        }

        if event == TriggerEvent::Update {
            let triggered = config
                .trigger_attribute
                .as_deref()
                .is_some_and(|name| target.contains(name));
            if !triggered {
                return GateDecision::Skip(SkipReason::TriggerAttributeAbsent);
            }
        }

        if let Some(option_set) = config.conditional_gate() {
            let code = target.get(option_set).and_then(|value| value.as_option_code());
            let expected = config.conditional_value.map(i64::from);
            if code.is_none() || code != expected {
                return GateDecision::Skip(SkipReason::ConditionNotMet);
            }
        }

        if config.pre_generated && has_value(target, &config.target_attribute) {
            return GateDecision::Skip(SkipReason::ValueAlreadyPresent);
        }

        GateDecision::Generate
    }
}

/// Non-blank text, or any non-text value, counts as present
fn has_value(target: &dyn RecordView, attribute: &str) -> bool {
    match target.get(attribute) {
        Some(TypedValue::String(text)) => !text.trim().is_empty(),
        Some(_) => true,
        None => false,
    }
}
