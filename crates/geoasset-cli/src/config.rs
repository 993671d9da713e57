//! Configuration file handling for geoasset-cli

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Server used when neither a flag nor the config file names one
pub const DEFAULT_SERVER: &str = "http://localhost:3000";

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default server URL
    pub server: Option<String>,
    /// Default output format
    pub output: Option<OutputFormat>,
    /// Disable colored output
    pub no_color: Option<bool>,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("geoasset-cli");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(
        &self,
        server: Option<&str>,
        output: Option<OutputFormat>,
        no_color: bool,
    ) -> MergedConfig {
        MergedConfig {
            server: server
                .map(String::from)
                .or_else(|| self.server.clone())
                .unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            output: output.or(self.output).unwrap_or_default(),
            no_color: no_color || self.no_color.unwrap_or(false),
        }
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub server: String,
    pub output: OutputFormat,
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let merged = Config::default().merge_with_args(None, None, false);

        assert_eq!(merged.server, DEFAULT_SERVER);
        assert_eq!(merged.output, OutputFormat::Table);
        assert!(!merged.no_color);
    }

    #[test]
    fn test_file_values_used_when_no_flags() {
        let config: Config = toml::from_str(
            r#"
            server = "http://assets.internal:8080"
            output = "json"
            no_color = true
            "#,
        )
        .unwrap();

        let merged = config.merge_with_args(None, None, false);
        assert_eq!(merged.server, "http://assets.internal:8080");
        assert_eq!(merged.output, OutputFormat::Json);
        assert!(merged.no_color);
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config {
            server: Some("http://from-file:1".into()),
            output: Some(OutputFormat::Json),
            no_color: None,
        };

        let merged =
            config.merge_with_args(Some("http://from-flag:2"), Some(OutputFormat::Csv), true);
        assert_eq!(merged.server, "http://from-flag:2");
        assert_eq!(merged.output, OutputFormat::Csv);
        assert!(merged.no_color);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
