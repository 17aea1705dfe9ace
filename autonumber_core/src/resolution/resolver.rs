//! # Value Resolver
//!
//! Produces the substitution text for one placeholder. Random placeholders
//! draw from the injected [`RandomSource`]; parent-qualified placeholders go
//! through the [`ParentFetcher`] first; everything else reads the record and
//! dispatches on the value type.

use super::date_format::format_datetime;
use super::number_format::{format_decimal, format_f64};
use super::random::{random_string, RandomSource, RandomSpec};
use crate::config::ResolverPreferences;
use crate::error::TemplateError;
use crate::logging::codes;
use crate::parameter::ParameterDescriptor;
use crate::types::{ParentFetcher, RecordView, TypedValue};
use crate::{log_debug, log_error, log_warning};

pub struct ValueResolver<'a> {
    random: &'a dyn RandomSource,
    preferences: &'a ResolverPreferences,
}

impl<'a> ValueResolver<'a> {
    pub fn new(random: &'a dyn RandomSource, preferences: &'a ResolverPreferences) -> Self {
        Self {
            random,
            preferences,
        }
    }

    /// Resolve a descriptor against a record, reaching the parent record for
    /// parent-qualified placeholders
    pub fn resolve(
        &self,
        descriptor: &ParameterDescriptor,
        record: &dyn RecordView,
        fetcher: &dyn ParentFetcher,
    ) -> Result<String, TemplateError> {
        if !descriptor.is_parent_parameter() {
            return self.resolve_on(descriptor, record);
        }

        let lookup = &descriptor.parent_lookup_name;
        let Some(value) = record.get(lookup) else {
            log_debug!("Parent lookup absent, using default",
                "lookup" => lookup,
                "placeholder" => &descriptor.raw_text
            );
            return Ok(descriptor.default_value.clone());
        };

        let Some(reference) = value.as_lookup() else {
            log_warning!(codes::resolution::PARENT_NOT_LOOKUP, "Parent lookup field does not hold a reference",
                "lookup" => lookup,
                "type" => value.type_name()
            );
            return Err(TemplateError::ParentNotLookup {
                field: lookup.clone(),
            });
        };

        let parent = fetcher
            .fetch_parent(lookup, reference, &descriptor.attribute_name)
            .map_err(|source| {
                log_error!(codes::resolution::PARENT_FETCH_FAILED, "Parent record fetch failed",
                    "lookup" => lookup,
                    "id" => reference.id,
                    "error" => &source
                );
                TemplateError::ParentFetch {
                    lookup: lookup.clone(),
                    source,
                }
            })?;

        self.resolve_on(descriptor, parent.as_ref())
    }

    /// Resolve a descriptor against one record, ignoring its parent lookup
    pub fn resolve_on(
        &self,
        descriptor: &ParameterDescriptor,
        record: &dyn RecordView,
    ) -> Result<String, TemplateError> {
        if descriptor.is_random_parameter() {
            return Ok(self.random_value(&descriptor.string_formatter));
        }

        let attribute = &descriptor.attribute_name;
        let Some(value) = record.get(attribute) else {
            return Ok(descriptor.default_value.clone());
        };

        log_debug!("Resolving placeholder",
            "attribute" => attribute,
            "type" => value.type_name(),
            "conditional" => descriptor.conditional.has_condition()
        );

        let conditional = &descriptor.conditional;
        let format = descriptor.string_formatter.as_str();
        let conditioned = conditional.has_condition();

        let text = match value {
            TypedValue::LookupReference(reference) => {
                if conditioned {
                    conditional.result_guid(&reference.id)
                } else {
                    reference.name
                }
            }
            TypedValue::OptionValue { code, label } => {
                if conditioned {
                    conditional.result_str(&code.to_string())
                } else {
                    record.formatted_value(attribute).unwrap_or(label)
                }
            }
            // Any written conditional picks its branch labels, even with no match text
            TypedValue::Boolean(flag) => {
                if descriptor.has_conditional {
                    conditional.result_bool(flag)
                } else {
                    record
                        .formatted_value(attribute)
                        .unwrap_or_else(|| if flag { "True" } else { "False" }.to_string())
                }
            }
            TypedValue::DateTime(date) => {
                if format.is_empty() {
                    conditional.result_datetime(&date)
                } else {
                    conditional.result_str(&format_datetime(&date, format))
                }
            }
            TypedValue::Money(amount) | TypedValue::Decimal(amount) => {
                if conditioned {
                    conditional.result_decimal(amount)
                } else {
                    format_decimal(amount, format)
                }
            }
            // Integers share the double path for comparison and formatting
            TypedValue::Integer(number) => self.resolve_double(descriptor, number as f64),
            TypedValue::Double(number) => self.resolve_double(descriptor, number),
            TypedValue::String(text) => conditional.result_str(&text),
            TypedValue::Unsupported { type_name } => {
                return self.unsupported(descriptor, type_name);
            }
        };

        Ok(text)
    }

    fn resolve_double(&self, descriptor: &ParameterDescriptor, number: f64) -> String {
        if descriptor.conditional.has_condition() {
            descriptor.conditional.result_f64(number)
        } else {
            format_f64(number, &descriptor.string_formatter)
        }
    }

    fn unsupported(
        &self,
        descriptor: &ParameterDescriptor,
        type_name: String,
    ) -> Result<String, TemplateError> {
        log_warning!(codes::resolution::UNSUPPORTED_VALUE, "Unsupported attribute value type",
            "attribute" => &descriptor.attribute_name,
            "type" => &type_name,
            "rejected" => self.preferences.reject_unsupported_values
        );

        if self.preferences.reject_unsupported_values {
            return Err(TemplateError::UnsupportedValue {
                attribute: descriptor.attribute_name.clone(),
                type_name,
            });
        }

        Ok(descriptor.default_value.clone())
    }

    fn random_value(&self, formatter: &str) -> String {
        let spec = RandomSpec::parse(formatter);

        let requested = spec.length.unwrap_or_else(|| {
            if !formatter.is_empty() {
                log_warning!(codes::resolution::RANDOM_LENGTH_FALLBACK, "Random length is not a number, using default",
                    "formatter" => formatter,
                    "length" => self.preferences.default_random_length
                );
            }
            self.preferences.default_random_length
        });

        let length = requested.min(self.preferences.max_random_length);
        if length < requested {
            log_warning!(codes::resolution::RANDOM_LENGTH_FALLBACK, "Random length clamped",
                "requested" => requested,
                "length" => length
            );
        }

        random_string(self.random, length, spec.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::resolution::random::tests::CountingRandom;
    use crate::resolution::random::ThreadRandom;
    use crate::types::{LookupReference, MemoryRecord, MemoryStore, NoParents};
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn preferences() -> ResolverPreferences {
        ResolverPreferences {
            default_random_length: 5,
            max_random_length: 1024,
            reject_unsupported_values: false,
        }
    }

    fn resolve(raw: &str, record: &MemoryRecord) -> Result<String, TemplateError> {
        let preferences = preferences();
        let resolver = ValueResolver::new(&ThreadRandom, &preferences);
        let descriptor = ParameterDescriptor::parse(raw)?;
        resolver.resolve(&descriptor, record, &NoParents)
    }

    fn account_id() -> Uuid {
        Uuid::parse_str("6f9619ff-8b86-d011-b42d-00c04fc964ff").unwrap()
    }

    #[test]
    fn test_absent_attribute_uses_default() {
        let record = MemoryRecord::new("contact");
        assert_eq!(resolve("{firstname|Unknown}", &record).unwrap(), "Unknown");
        assert_eq!(resolve("{firstname}", &record).unwrap(), "");
    }

    #[test]
    fn test_string_values() {
        let record = MemoryRecord::new("contact").with("city", "Oslo");
        assert_eq!(resolve("{city}", &record).unwrap(), "Oslo");
        assert_eq!(resolve("{city:Oslo?NO|XX}", &record).unwrap(), "NO");
        assert_eq!(resolve("{city:Bergen?B|O}", &record).unwrap(), "O");
    }

    #[test]
    fn test_lookup_values() {
        let reference = LookupReference::new("account", account_id(), "Contoso");
        let record = MemoryRecord::new("contact").with("parentcustomerid", reference);

        assert_eq!(resolve("{parentcustomerid}", &record).unwrap(), "Contoso");
        assert_eq!(
            resolve(
                "{parentcustomerid:6f9619ff-8b86-d011-b42d-00c04fc964ff?C|X}",
                &record
            )
            .unwrap(),
            "C"
        );
    }

    #[test]
    fn test_option_values() {
        let record = MemoryRecord::new("lead")
            .with("leadqualitycode", TypedValue::option(1, "Hot"))
            .with("prioritycode", TypedValue::option(2, "Normal"))
            .with_formatted("prioritycode", "Normal (formatted)");

        assert_eq!(resolve("{leadqualitycode}", &record).unwrap(), "Hot");
        assert_eq!(resolve("{leadqualitycode:1?H|C}", &record).unwrap(), "H");
        assert_eq!(resolve("{leadqualitycode:2?W|C}", &record).unwrap(), "C");
        assert_eq!(resolve("{prioritycode}", &record).unwrap(), "Normal (formatted)");
    }

    #[test]
    fn test_boolean_values() {
        let record = MemoryRecord::new("contact")
            .with("donotcall", true)
            .with("donotemail", false)
            .with_formatted("donotemail", "Allow");

        assert_eq!(resolve("{donotcall:x?Y|N}", &record).unwrap(), "Y");
        assert_eq!(resolve("{donotemail:x?Y|N}", &record).unwrap(), "N");
        assert_eq!(resolve("{donotemail}", &record).unwrap(), "Allow");
        assert_eq!(resolve("{donotcall}", &record).unwrap(), "True");
    }

    #[test]
    fn test_boolean_labels_without_match_text() {
        let record = MemoryRecord::new("contact")
            .with("donotcall", true)
            .with("donotemail", false)
            .with_formatted("donotcall", "Do Not Allow");

        assert_eq!(resolve("{donotcall:?Yes|No}", &record).unwrap(), "Yes");
        assert_eq!(resolve("{donotemail:?Yes|No}", &record).unwrap(), "No");
        assert_eq!(resolve("{donotcall:?|}", &record).unwrap(), "");
    }

    #[test]
    fn test_date_values() {
        let created = NaiveDate::from_ymd_opt(2015, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let record = MemoryRecord::new("invoice").with("createdon", created);

        assert_eq!(resolve("{createdon:yyyy}", &record).unwrap(), "2015");
        assert_eq!(resolve("{createdon:yyyy:2015?this|other}", &record).unwrap(), "this");
        assert_eq!(resolve("{createdon:yyyy:2016?this|other}", &record).unwrap(), "other");
        assert_eq!(resolve("{createdon:<2016-1-1?old|new}", &record).unwrap(), "old");
        assert_eq!(resolve("{createdon}", &record).unwrap(), "06/01/2015 00:00:00");
    }

    #[test]
    fn test_numeric_values() {
        let record = MemoryRecord::new("invoice")
            .with("quantity", 7i64)
            .with("weight", 2.5f64)
            .with("rate", Decimal::new(1250, 2))
            .with("amount", TypedValue::Money(Decimal::new(123456, 2)));

        assert_eq!(resolve("{quantity:000}", &record).unwrap(), "007");
        assert_eq!(resolve("{quantity}", &record).unwrap(), "7");
        assert_eq!(resolve("{quantity:>5?big|small}", &record).unwrap(), "big");
        assert_eq!(resolve("{weight:F2}", &record).unwrap(), "2.50");
        assert_eq!(resolve("{rate}", &record).unwrap(), "12.50");
        assert_eq!(resolve("{rate:<10?low|high}", &record).unwrap(), "high");
        assert_eq!(resolve("{amount:N2}", &record).unwrap(), "1,234.56");
        assert_eq!(resolve("{amount:>1000?L|S}", &record).unwrap(), "L");
    }

    #[test]
    fn test_unsupported_value_uses_default() {
        let record = MemoryRecord::new("contact").with(
            "parties",
            TypedValue::Unsupported {
                type_name: "EntityCollection".to_string(),
            },
        );
        assert_eq!(resolve("{parties|none}", &record).unwrap(), "none");
    }

    #[test]
    fn test_unsupported_value_rejected_when_configured() {
        let record = MemoryRecord::new("contact").with(
            "parties",
            TypedValue::Unsupported {
                type_name: "EntityCollection".to_string(),
            },
        );
        let preferences = ResolverPreferences {
            reject_unsupported_values: true,
            ..preferences()
        };
        let resolver = ValueResolver::new(&ThreadRandom, &preferences);
        let descriptor = ParameterDescriptor::parse("{parties|none}").unwrap();

        assert_matches!(
            resolver.resolve(&descriptor, &record, &NoParents),
            Err(TemplateError::UnsupportedValue { .. })
        );
    }

    #[test]
    fn test_random_values() {
        let record = MemoryRecord::new("contact");

        let upper = resolve("{rand:8}", &record).unwrap();
        assert_eq!(upper.len(), 8);
        assert!(upper.chars().all(|c| c.is_ascii_uppercase()));

        let lower = resolve("{rand:6?lower}", &record).unwrap();
        assert_eq!(lower.len(), 6);
        assert!(lower.chars().all(|c| c.is_ascii_lowercase()));

        let mixed = resolve("{rand:4?mix}", &record).unwrap();
        assert_eq!(mixed.len(), 4);
        assert!(mixed.chars().all(|c| c.is_ascii_alphabetic()));

        assert_eq!(resolve("{rand:abc}", &record).unwrap().len(), 5);
        assert_eq!(resolve("{rand}", &record).unwrap().len(), 5);
    }

    #[test]
    fn test_random_length_is_clamped() {
        let preferences = ResolverPreferences {
            max_random_length: 3,
            ..preferences()
        };
        let source = CountingRandom::default();
        let resolver = ValueResolver::new(&source, &preferences);
        let descriptor = ParameterDescriptor::parse("{rand:10}").unwrap();

        let value = resolver
            .resolve(&descriptor, &MemoryRecord::new("contact"), &NoParents)
            .unwrap();
        assert_eq!(value, "ABC");
    }

    #[test]
    fn test_parent_values() {
        let mut store = MemoryStore::new();
        store.insert(
            account_id(),
            MemoryRecord::new("account").with("accountnumber", "ACC-9"),
        );
        let record = MemoryRecord::new("contact").with(
            "parentcustomerid",
            LookupReference::new("account", account_id(), "Contoso"),
        );

        let preferences = preferences();
        let resolver = ValueResolver::new(&ThreadRandom, &preferences);

        let descriptor = ParameterDescriptor::parse("{parentcustomerid.accountnumber}").unwrap();
        assert_eq!(resolver.resolve(&descriptor, &record, &store).unwrap(), "ACC-9");

        let descriptor = ParameterDescriptor::parse("{parentcustomerid.name|n/a}").unwrap();
        assert_eq!(resolver.resolve(&descriptor, &record, &store).unwrap(), "n/a");
    }

    #[test]
    fn test_absent_parent_lookup_skips_fetch() {
        let preferences = preferences();
        let resolver = ValueResolver::new(&ThreadRandom, &preferences);
        let descriptor = ParameterDescriptor::parse("{parentcustomerid.accountnumber|none}").unwrap();

        // NoParents would fail if the fetch were attempted
        let value = resolver
            .resolve(&descriptor, &MemoryRecord::new("contact"), &NoParents)
            .unwrap();
        assert_eq!(value, "none");
    }

    #[test]
    fn test_parent_fetch_failure_propagates() {
        let preferences = preferences();
        let resolver = ValueResolver::new(&ThreadRandom, &preferences);
        let descriptor = ParameterDescriptor::parse("{parentcustomerid.accountnumber}").unwrap();
        let record = MemoryRecord::new("contact").with(
            "parentcustomerid",
            LookupReference::new("account", account_id(), "Contoso"),
        );

        let result = resolver.resolve(&descriptor, &record, &MemoryStore::new());
        assert_matches!(
            result,
            Err(TemplateError::ParentFetch {
                source: FetchError::NotFound { .. },
                ..
            })
        );
    }

    #[test]
    fn test_parent_lookup_must_be_reference() {
        let preferences = preferences();
        let resolver = ValueResolver::new(&ThreadRandom, &preferences);
        let descriptor = ParameterDescriptor::parse("{ownerid.fullname}").unwrap();
        let record = MemoryRecord::new("contact").with("ownerid", "not a reference");

        assert_matches!(
            resolver.resolve(&descriptor, &record, &NoParents),
            Err(TemplateError::ParentNotLookup { .. })
        );
    }
}
