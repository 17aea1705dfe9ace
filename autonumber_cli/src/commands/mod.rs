//! Subcommand handlers
//!
//! Each handler returns the text to print on stdout; `main` owns printing and
//! the exit code.

use crate::cli::{ExpandArgs, GenerateArgs, PreviewArgs, ValidateArgs};
use crate::loader::{self, LoadError};
use autonumber_core::logging::codes;
use autonumber_core::{log_info, log_success};
use autonumber_core::{ConfigError, TemplateEngine, TemplateError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Invalid rule configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result of `generate`: an identifier, or the reason the rule did not apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    Identifier(String),
    Skipped,
}

pub fn expand(engine: &TemplateEngine, args: &ExpandArgs) -> Result<String, CommandError> {
    let record = loader::load_record(&args.record)?;
    let store = loader::load_store(args.store.as_deref())?;

    let expanded = engine.expand_template(&args.template, &record, &store)?;

    log_success!(codes::success::TEMPLATE_EXPANDED, "Template expanded",
        "template" => &args.template,
        "result" => &expanded
    );
    Ok(expanded)
}

pub fn generate(engine: &TemplateEngine, args: &GenerateArgs) -> Result<Generated, CommandError> {
    let config = loader::load_config(&args.config)?;
    config.validate()?;

    let record = loader::load_record(&args.record)?;
    let store = loader::load_store(args.store.as_deref())?;
    let event = args.event.map(Into::into).unwrap_or(config.event);

    log_info!("Running rule",
        "rule" => config.registration_name(),
        "event" => event,
        "counter" => args.counter
    );

    let generated = engine
        .generate(&config, args.counter, event, &record, &store)?
        .map_or(Generated::Skipped, Generated::Identifier);
    Ok(generated)
}

pub fn preview(engine: &TemplateEngine, args: &PreviewArgs) -> Result<String, CommandError> {
    let config = loader::load_config(&args.config)?;
    Ok(engine.preview(&config, args.next))
}

pub fn validate(engine: &TemplateEngine, args: &ValidateArgs) -> Result<String, CommandError> {
    engine.validate_template(&args.template)?;
    Ok("Template is valid".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::EventChoice;
    use autonumber_core::SeededRandom;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    const ACCOUNT_ID: &str = "6f9619ff-8b86-d011-b42d-00c04fc964ff";

    fn engine() -> TemplateEngine {
        TemplateEngine::new().with_random(Arc::new(SeededRandom::new(3)))
    }

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn invoice_record() -> NamedTempFile {
        json_file(&format!(
            r#"{{"kind":"invoice","fields":{{
                "name":{{"String":"Big order"}},
                "customerid":{{"LookupReference":{{"id":"{}","name":"Acme","kind":"account"}}}},
                "prioritycode":{{"OptionValue":{{"code":1,"label":"High"}}}}
            }}}}"#,
            ACCOUNT_ID
        ))
    }

    fn account_store() -> NamedTempFile {
        json_file(&format!(
            r#"{{"{}":{{"kind":"account","fields":{{"accountnumber":{{"String":"ACME"}}}}}}}}"#,
            ACCOUNT_ID
        ))
    }

    fn path(file: &NamedTempFile) -> PathBuf {
        file.path().to_path_buf()
    }

    #[test]
    fn test_expand_with_parent_store() {
        let record = invoice_record();
        let store = account_store();
        let args = ExpandArgs {
            template: "{name}/{customerid.accountnumber|NA}/{prioritycode:1?H|L}".to_string(),
            record: path(&record),
            store: Some(path(&store)),
        };

        assert_eq!(expand(&engine(), &args).unwrap(), "Big order/ACME/H");
    }

    #[test]
    fn test_expand_without_store_fails_on_parent() {
        let record = invoice_record();
        let args = ExpandArgs {
            template: "{customerid.accountnumber}".to_string(),
            record: path(&record),
            store: None,
        };

        assert!(matches!(
            expand(&engine(), &args),
            Err(CommandError::Template(TemplateError::ParentFetch { .. }))
        ));
    }

    #[test]
    fn test_generate() {
        let record = invoice_record();
        let store = account_store();
        let args = GenerateArgs {
            config: r#"{"EntityName":"invoice","AttributeName":"invoicenumber","Digits":4,
                        "Prefix":"INV-{customerid.accountnumber|NA}-"}"#
                .to_string(),
            record: path(&record),
            counter: 42,
            event: None,
            store: Some(path(&store)),
        };

        assert_eq!(
            generate(&engine(), &args).unwrap(),
            Generated::Identifier("INV-ACME-0042".to_string())
        );
    }

    #[test]
    fn test_generate_skips_other_event() {
        let record = invoice_record();
        let args = GenerateArgs {
            config: r#"{"EntityName":"invoice","AttributeName":"invoicenumber"}"#.to_string(),
            record: path(&record),
            counter: 1,
            event: Some(EventChoice::Update),
            store: None,
        };

        assert_eq!(generate(&engine(), &args).unwrap(), Generated::Skipped);
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let record = invoice_record();
        let args = GenerateArgs {
            config: "invoice".to_string(),
            record: path(&record),
            counter: 1,
            event: None,
            store: None,
        };

        assert!(matches!(
            generate(&engine(), &args),
            Err(CommandError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_preview() {
        let args = PreviewArgs {
            config: r#"{"EntityName":"invoice","Digits":3,"Prefix":"INV-{region}-"}"#.to_string(),
            next: None,
        };
        assert_eq!(preview(&engine(), &args).unwrap(), "INV-{region}-001");
    }

    #[test]
    fn test_validate() {
        let valid = ValidateArgs {
            template: "INV-{name|NA}".to_string(),
        };
        assert!(validate(&engine(), &valid).is_ok());

        let invalid = ValidateArgs {
            template: "INV-{name".to_string(),
        };
        assert!(matches!(
            validate(&engine(), &invalid),
            Err(CommandError::Template(TemplateError::UnbalancedBraces { .. }))
        ));
    }
}
