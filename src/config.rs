//! Configuration handling for the form

use crate::state::DEFAULT_TITLE;
use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Where submitted values go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Print JSON after the form closes
    #[default]
    Stdout,
    /// Write JSON to `output_path`
    File,
    /// Copy JSON to the system clipboard
    Clipboard,
}

/// User configuration for the form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Schema file used when none is given on the command line
    pub schema_path: Option<PathBuf>,
    /// Submit target
    pub output: Option<OutputTarget>,
    /// File written by the `file` target
    pub output_path: Option<PathBuf>,
    /// Log file; defaults to the platform data directory
    pub log_file: Option<PathBuf>,
    /// Form title
    pub title: Option<String>,
    /// Refuse schemas with structural issues
    pub strict: Option<bool>,
    /// Keep the form open after a successful submit
    pub keep_open: Option<bool>,
}

impl FormConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "outlet", "outlet-form")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Default log file path
    pub fn default_log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("outlet-form.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FormConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }
}

/// Command line arguments
#[derive(Debug, Default, Parser)]
#[command(name = "outlet-form", version, about = "Fill in an outlet form from a JSON schema")]
pub struct Cli {
    /// Schema file to render
    pub schema: Option<PathBuf>,
    /// Where to send submitted values
    #[arg(long, value_enum)]
    pub output: Option<OutputTarget>,
    /// File written by `--output file`
    #[arg(long)]
    pub output_path: Option<PathBuf>,
    /// Log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Form title
    #[arg(long)]
    pub title: Option<String>,
    /// Refuse schemas with structural issues
    #[arg(long)]
    pub strict: bool,
    /// Keep the form open after submitting
    #[arg(long)]
    pub keep_open: bool,
}

/// Effective settings: command line over config file over defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub schema_path: PathBuf,
    pub output: OutputTarget,
    pub output_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub title: String,
    pub strict: bool,
    pub keep_open: bool,
}

impl Settings {
    pub fn resolve(cli: Cli, config: FormConfig) -> Result<Self> {
        let Some(schema_path) = cli.schema.or(config.schema_path) else {
            bail!("no schema given: pass a schema path or set schema_path in the config file");
        };
        let output = cli.output.or(config.output).unwrap_or_default();
        let output_path = cli.output_path.or(config.output_path);
        if output == OutputTarget::File && output_path.is_none() {
            bail!("--output file needs --output-path");
        }

        Ok(Self {
            schema_path,
            output,
            output_path,
            log_file: cli
                .log_file
                .or(config.log_file)
                .or_else(FormConfig::default_log_path),
            title: cli
                .title
                .or(config.title)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            strict: cli.strict || config.strict.unwrap_or(false),
            keep_open: cli.keep_open || config.keep_open.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert!(config.schema_path.is_none());
        assert!(config.output.is_none());
        assert!(config.output_path.is_none());
        assert!(config.log_file.is_none());
        assert!(config.title.is_none());
        assert!(config.strict.is_none());
        assert!(config.keep_open.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = FormConfig {
            schema_path: Some(PathBuf::from("schemas/outlet.json")),
            output: Some(OutputTarget::File),
            output_path: Some(PathBuf::from("out.json")),
            strict: Some(true),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""output":"file""#));
        let parsed: FormConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.schema_path, Some(PathBuf::from("schemas/outlet.json")));
        assert_eq!(parsed.output, Some(OutputTarget::File));
        assert_eq!(parsed.output_path, Some(PathBuf::from("out.json")));
        assert_eq!(parsed.strict, Some(true));
        assert!(parsed.keep_open.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"output": "clipboard", "unknown_field": "value"}"#;
        let parsed: FormConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.output, Some(OutputTarget::Clipboard));
    }

    #[test]
    fn test_load_returns_ok() {
        // Default config when the file doesn't exist
        assert!(FormConfig::load().is_ok());
    }

    mod settings {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_requires_schema() {
            assert!(Settings::resolve(Cli::default(), FormConfig::default()).is_err());
        }

        #[test]
        fn test_defaults() {
            let cli = Cli {
                schema: Some(PathBuf::from("s.json")),
                ..Default::default()
            };
            let settings = Settings::resolve(cli, FormConfig::default()).unwrap();
            assert_eq!(settings.schema_path, PathBuf::from("s.json"));
            assert_eq!(settings.output, OutputTarget::Stdout);
            assert_eq!(settings.title, DEFAULT_TITLE);
            assert!(!settings.strict);
            assert!(!settings.keep_open);
        }

        #[test]
        fn test_cli_overrides_config() {
            let cli = Cli {
                schema: Some(PathBuf::from("cli.json")),
                title: Some("Outlet".to_string()),
                log_file: Some(PathBuf::from("form.log")),
                ..Default::default()
            };
            let config = FormConfig {
                schema_path: Some(PathBuf::from("config.json")),
                output: Some(OutputTarget::Clipboard),
                title: Some("Ignored".to_string()),
                keep_open: Some(true),
                ..Default::default()
            };
            let settings = Settings::resolve(cli, config).unwrap();
            assert_eq!(settings.schema_path, PathBuf::from("cli.json"));
            assert_eq!(settings.output, OutputTarget::Clipboard);
            assert_eq!(settings.title, "Outlet");
            assert_eq!(settings.log_file, Some(PathBuf::from("form.log")));
            assert!(settings.keep_open);
        }

        #[test]
        fn test_file_output_needs_path() {
            let cli = Cli {
                schema: Some(PathBuf::from("s.json")),
                output: Some(OutputTarget::File),
                ..Default::default()
            };
            assert!(Settings::resolve(cli, FormConfig::default()).is_err());
        }

        #[test]
        fn test_parses_command_line() {
            let cli = Cli::try_parse_from([
                "outlet-form",
                "schema.json",
                "--output",
                "file",
                "--output-path",
                "out.json",
                "--strict",
            ])
            .unwrap();
            assert_eq!(cli.schema, Some(PathBuf::from("schema.json")));
            assert_eq!(cli.output, Some(OutputTarget::File));
            assert!(cli.strict);
            assert!(!cli.keep_open);
        }
    }
}
