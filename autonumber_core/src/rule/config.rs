//! Persisted AutoNumber rule configuration
//!
//! Hosts store the rule as a flat JSON object with PascalCase keys. Older
//! registrations stored only the entity name, which still parses as a
//! create-only rule.

use crate::error::ConfigError;
use crate::expansion::validate_template;
use crate::logging::codes;
use crate::{log_error, log_warning};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Message that fires a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerEvent {
    #[default]
    Create,
    Update,
}

impl TriggerEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerEvent::Create => "Create",
            TriggerEvent::Update => "Update",
        }
    }

    /// Numeric code used by hosts (0 create, 1 update)
    pub fn code(&self) -> i64 {
        match self {
            TriggerEvent::Create => 0,
            TriggerEvent::Update => 1,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(TriggerEvent::Create),
            1 => Ok(TriggerEvent::Update),
            other => Err(ConfigError::UnknownEvent(other.to_string())),
        }
    }
}

impl FromStr for TriggerEvent {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" | "0" => Ok(TriggerEvent::Create),
            "update" | "1" => Ok(TriggerEvent::Update),
            _ => Err(ConfigError::UnknownEvent(s.to_string())),
        }
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TriggerEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TriggerEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawEvent {
            Name(String),
            Code(i64),
        }

        let parsed = match RawEvent::deserialize(deserializer)? {
            RawEvent::Name(name) => name.parse(),
            RawEvent::Code(code) => TriggerEvent::from_code(code),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

fn default_pre_generated() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoNumberConfig {
    #[serde(alias = "entity_name", default)]
    pub entity_name: String,

    #[serde(rename = "EventName", alias = "event_name", alias = "event", default)]
    pub event: TriggerEvent,

    /// Attribute that receives the generated identifier
    #[serde(rename = "AttributeName", alias = "attribute_name", default)]
    pub target_attribute: String,

    /// Attribute whose presence in an update fires the rule
    #[serde(alias = "trigger_attribute", default, skip_serializing_if = "Option::is_none")]
    pub trigger_attribute: Option<String>,

    #[serde(alias = "digits", default)]
    pub digits: u32,

    #[serde(alias = "prefix", default)]
    pub prefix: String,

    #[serde(alias = "suffix", default)]
    pub suffix: String,

    #[serde(alias = "conditional_option_set", default, skip_serializing_if = "Option::is_none")]
    pub conditional_option_set: Option<String>,

    #[serde(alias = "conditional_value", default, skip_serializing_if = "Option::is_none")]
    pub conditional_value: Option<i32>,

    /// Keep an identifier already present on the target
    #[serde(alias = "pre_generated", default = "default_pre_generated")]
    pub pre_generated: bool,
}

impl AutoNumberConfig {
    /// Minimal create-only rule for an entity
    pub fn for_entity(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            event: TriggerEvent::Create,
            target_attribute: String::new(),
            trigger_attribute: None,
            digits: 0,
            prefix: String::new(),
            suffix: String::new(),
            conditional_option_set: None,
            conditional_value: None,
            pre_generated: true,
        }
    }

    /// Parse a stored configuration: a JSON object or a bare entity name
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ConfigError::Empty);
        }

        if text.starts_with('{') {
            let config: AutoNumberConfig = serde_json::from_str(text)?;
            if config.entity_name.trim().is_empty() {
                return Err(ConfigError::MissingEntityName);
            }
            return Ok(config);
        }

        if text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | '"' | '[' | ']' | ':' | ','))
        {
            return Err(ConfigError::InvalidLegacyName(text.to_string()));
        }

        log_warning!(codes::rule::LEGACY_CONFIG, "Legacy configuration treated as create-only rule",
            "entity" => text
        );
        Ok(Self::for_entity(text))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Name of the host registration step for this rule
    pub fn registration_name(&self) -> String {
        match self.event {
            TriggerEvent::Create => format!("AutoNumber.{}", self.entity_name),
            TriggerEvent::Update => format!("AutoNumber.{} Update", self.entity_name),
        }
    }

    /// Option-set gate, ignoring an empty attribute name
    pub fn conditional_gate(&self) -> Option<&str> {
        self.conditional_option_set
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }

    /// Structural checks that need no remote schema
    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self.check();
        if let Err(err) = &result {
            log_error!(codes::rule::CONFIG_INVALID, "Rule configuration is invalid",
                "entity" => &self.entity_name,
                "error" => err
            );
        }
        result
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.entity_name.trim().is_empty() {
            return Err(ConfigError::MissingEntityName);
        }
        if self.target_attribute.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "target attribute name is required".to_string(),
            ));
        }
        if self.conditional_gate().is_some() && self.conditional_value.is_none() {
            return Err(ConfigError::Invalid(
                "conditional option set requires a conditional value".to_string(),
            ));
        }
        if self.event == TriggerEvent::Update
            && self
                .trigger_attribute
                .as_deref()
                .map_or(true, |name| name.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "update rules require a trigger attribute".to_string(),
            ));
        }

        validate_template(&self.prefix).map_err(|source| ConfigError::InvalidTemplate {
            field: "Prefix",
            source,
        })?;
        validate_template(&self.suffix).map_err(|source| ConfigError::InvalidTemplate {
            field: "Suffix",
            source,
        })?;

        Ok(())
    }
}
