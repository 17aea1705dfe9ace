//! JSON input loading for records, parent stores and rule configurations

use autonumber_core::{AutoNumberConfig, ConfigError, MemoryRecord, MemoryStore};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid rule configuration: {0}")]
    Config(#[from] ConfigError),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_record(path: &Path) -> Result<MemoryRecord, LoadError> {
    read_json(path)
}

/// Parent records; a missing path gives an empty store
pub fn load_store(path: Option<&Path>) -> Result<MemoryStore, LoadError> {
    match path {
        Some(path) => read_json(path),
        None => Ok(MemoryStore::new()),
    }
}

/// Rule configuration from a file path, inline JSON or a bare entity name
pub fn load_config(source: &str) -> Result<AutoNumberConfig, LoadError> {
    let path = Path::new(source);
    if path.is_file() {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(AutoNumberConfig::parse(&text)?);
    }

    Ok(AutoNumberConfig::parse(source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autonumber_core::{RecordView, TriggerEvent, TypedValue};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_record() {
        let file = json_file(
            r#"{"kind":"invoice","fields":{"name":{"String":"Big order"},"prioritycode":{"OptionValue":{"code":1,"label":"High"}}}}"#,
        );

        let record = load_record(file.path()).unwrap();
        assert_eq!(record.kind, "invoice");
        assert_eq!(record.get("name"), Some(TypedValue::from("Big order")));
        assert_eq!(
            record.get("prioritycode").and_then(|value| value.as_option_code()),
            Some(1)
        );
    }

    #[test]
    fn test_load_record_errors() {
        let missing = Path::new("/nonexistent/autonumber/record.json");
        assert!(matches!(load_record(missing), Err(LoadError::Io { .. })));

        let file = json_file("{not json");
        assert!(matches!(load_record(file.path()), Err(LoadError::Json { .. })));
    }

    #[test]
    fn test_load_store() {
        let file = json_file(
            r#"{"6f9619ff-8b86-d011-b42d-00c04fc964ff":{"kind":"account","fields":{"accountnumber":{"String":"ACME"}}}}"#,
        );

        let store = load_store(Some(file.path())).unwrap();
        assert_eq!(store.len(), 1);
        assert!(load_store(None).unwrap().is_empty());
    }

    #[test]
    fn test_load_config_sources() {
        let file = json_file(r#"{"EntityName":"invoice","AttributeName":"invoicenumber","Digits":4}"#);
        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.entity_name, "invoice");
        assert_eq!(config.digits, 4);

        let inline = load_config(r#"{"EntityName":"lead","EventName":"Update"}"#).unwrap();
        assert_eq!(inline.event, TriggerEvent::Update);

        let legacy = load_config("account").unwrap();
        assert_eq!(legacy.entity_name, "account");

        assert!(matches!(load_config("   "), Err(LoadError::Config(ConfigError::Empty))));
    }
}
