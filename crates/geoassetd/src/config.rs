//! Daemon configuration
//!
//! Typed view of the TOML config file. Every section and field has a
//! default, so an empty file (or no file at all) yields a working server.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use anyhow::{Context, Result};
use geoasset_api::ApiConfig;
use geoasset_core::CoordinatePolicy;
use serde::{Deserialize, Serialize};

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DaemonConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Listening address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

/// Upload limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Request body limit for `POST /assets`
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_max_file_bytes() -> usize {
    geoasset_api::state::DEFAULT_MAX_UPLOAD_BYTES
}

/// Payload validation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub coordinates: CoordinatePolicy,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "geoassetd=info,geoasset_api=info,geoasset_core=info".to_string()
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub strict_coordinates: bool,
    pub log_json: bool,
}

impl DaemonConfig {
    /// Parse a config document
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config")
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply command-line overrides
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if overrides.strict_coordinates {
            self.validation.coordinates = CoordinatePolicy::Strict;
        }
        if overrides.log_json {
            self.logging.json = true;
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    /// Settings handed to the HTTP layer
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            max_upload_bytes: self.upload.max_file_bytes,
            coordinates: self.validation.coordinates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = DaemonConfig::from_toml("").unwrap();

        assert_eq!(config, DaemonConfig::default());
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.api_config(), ApiConfig::default());
        assert!(!config.logging.json);
    }

    #[test]
    fn test_full_config() {
        let config = DaemonConfig::from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [upload]
            max_file_bytes = 1024

            [validation]
            coordinates = "strict"

            [logging]
            filter = "debug"
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.api_config(),
            ApiConfig {
                max_upload_bytes: 1024,
                coordinates: CoordinatePolicy::Strict,
            }
        );
        assert_eq!(config.logging.filter, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = DaemonConfig::from_toml("[server]\nport = 9000\n").unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, default_host());
        assert_eq!(config.upload, UploadConfig::default());
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(DaemonConfig::from_toml("[validation]\ncoordinates = \"loose\"\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_section() {
        assert!(DaemonConfig::from_toml("[database]\nurl = \"x\"\n").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = DaemonConfig::from_toml("[server]\nport = 9000\n").unwrap();
        config.apply(&Overrides {
            host: Some("127.0.0.1".parse().unwrap()),
            port: Some(4000),
            strict_coordinates: true,
            log_json: true,
        });

        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:4000");
        assert_eq!(config.validation.coordinates, CoordinatePolicy::Strict);
        assert!(config.logging.json);
    }

    #[test]
    fn test_empty_overrides_keep_file_values() {
        let mut config =
            DaemonConfig::from_toml("[validation]\ncoordinates = \"strict\"\n").unwrap();
        config.apply(&Overrides::default());

        assert_eq!(config.validation.coordinates, CoordinatePolicy::Strict);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[upload]\nmax_file_bytes = 2048").unwrap();

        let config = DaemonConfig::load(file.path()).unwrap();
        assert_eq!(config.upload.max_file_bytes, 2048);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DaemonConfig::load(Path::new("/nonexistent/geoassetd.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
