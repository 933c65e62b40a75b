//! Form schema model
//!
//! The schema is supplied by the embedding application as a JSON document of
//! shape `{ "data": [FieldDescriptor, ...] }` and is read-only at runtime.

mod field;
mod validate;

pub use field::{ComponentKind, Condition, ConditionKind, FieldDescriptor};
pub use validate::SchemaIssue;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a schema
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed schema: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("schema has {} issue(s): {}", .0.len(), join_issues(.0))]
    Invalid(Vec<SchemaIssue>),
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Top-level schema document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub data: Vec<FieldDescriptor>,
}

impl Schema {
    #[cfg(test)]
    pub fn new(data: Vec<FieldDescriptor>) -> Self {
        Self { data }
    }

    /// Parse a schema from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a schema from a JSON file
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded schema from {} with {} top-level field(s)",
            path.display(),
            schema.data.len()
        );
        Ok(schema)
    }

    /// Load a schema and reject it when validation reports any issue
    pub fn load_strict(path: &Path) -> Result<Self, SchemaError> {
        let schema = Self::load(path)?;
        let issues = schema.validate();
        if issues.is_empty() {
            Ok(schema)
        } else {
            Err(SchemaError::Invalid(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "data": [
            {"name": "Outlet Name", "component": "text", "required": true},
            {"name": "Outlet Type", "component": "select", "options": ["Retail", "Wholesale"], "default": ["Retail"]}
        ]
    }"#;

    #[test]
    fn test_from_json_str() {
        let schema = Schema::from_json_str(SAMPLE).unwrap();
        assert_eq!(schema.data.len(), 2);
        assert_eq!(schema.data[1].options, vec!["Retail", "Wholesale"]);
    }

    #[test]
    fn test_missing_data_is_empty() {
        let schema = Schema::from_json_str("{}").unwrap();
        assert!(schema.data.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let err = Schema::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
        assert!(err.to_string().starts_with("malformed schema"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Schema::load(Path::new("/nonexistent/outlet-form/schema.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
        assert!(err.to_string().contains("schema.json"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let schema = Schema::load(file.path()).unwrap();
        assert_eq!(schema.data[0].name, "Outlet Name");
    }

    #[test]
    fn test_load_strict_rejects_issues() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"data": [{"name": "Items", "component": "group"}]}"#)
            .unwrap();

        let err = Schema::load_strict(file.path()).unwrap_err();
        match err {
            SchemaError::Invalid(issues) => assert_eq!(issues.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_strict_accepts_clean_schema() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        assert!(Schema::load_strict(file.path()).is_ok());
    }

    #[test]
    fn test_bundled_outlet_schema_is_clean() {
        let schema = Schema::from_json_str(include_str!("../../schemas/outlet.json")).unwrap();
        assert_eq!(schema.data.len(), 9);
        assert!(schema.validate().is_empty());
    }
}
