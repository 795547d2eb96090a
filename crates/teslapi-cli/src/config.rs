//! Configuration file handling for teslapi

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use teslapi_client::config::DEFAULT_PORTAL_URL;

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Portal URL
    pub server: Option<String>,
    /// Streaming base URL
    pub streaming: Option<String>,
    /// Access token
    pub token: Option<String>,
    /// Default vehicle id
    pub vehicle: Option<String>,
    /// Default output format
    pub output: Option<String>,
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
            .join("teslapi");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(&self, args: ArgOverrides<'_>) -> MergedConfig {
        MergedConfig {
            server: args
                .server
                .map(String::from)
                .or_else(|| self.server.clone())
                .unwrap_or_else(|| DEFAULT_PORTAL_URL.to_string()),
            streaming: args
                .streaming
                .map(String::from)
                .or_else(|| self.streaming.clone()),
            token: args.token.map(String::from).or_else(|| self.token.clone()),
            vehicle: args
                .vehicle
                .map(String::from)
                .or_else(|| self.vehicle.clone()),
            output: args
                .output
                .map(String::from)
                .or_else(|| self.output.clone())
                .unwrap_or_else(|| "table".to_string()),
            no_color: args.no_color || self.no_color.unwrap_or(false),
        }
    }
}

/// Values given on the command line (or through `TESLAPI_*` variables)
#[derive(Debug, Default, Clone, Copy)]
pub struct ArgOverrides<'a> {
    pub server: Option<&'a str>,
    pub streaming: Option<&'a str>,
    pub token: Option<&'a str>,
    pub vehicle: Option<&'a str>,
    pub output: Option<&'a str>,
    pub no_color: bool,
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub server: String,
    pub streaming: Option<String>,
    pub token: Option<String>,
    pub vehicle: Option<String>,
    pub output: String,
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server = \"http://localhost:9080\"\ntoken = \"abc\"\nvehicle = \"42\"\nno_color = true"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.server.as_deref(), Some("http://localhost:9080"));
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.vehicle.as_deref(), Some("42"));
        assert_eq!(config.no_color, Some(true));
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server = ").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_args_override_file() {
        let config = Config {
            server: Some("http://file".to_string()),
            token: Some("file-token".to_string()),
            vehicle: Some("1".to_string()),
            ..Default::default()
        };

        let merged = config.merge_with_args(ArgOverrides {
            token: Some("arg-token"),
            ..Default::default()
        });
        assert_eq!(merged.server, "http://file");
        assert_eq!(merged.token.as_deref(), Some("arg-token"));
        assert_eq!(merged.vehicle.as_deref(), Some("1"));
        assert_eq!(merged.output, "table");
        assert!(!merged.no_color);
    }

    #[test]
    fn test_defaults() {
        let merged = Config::default().merge_with_args(ArgOverrides::default());
        assert_eq!(merged.server, DEFAULT_PORTAL_URL);
        assert_eq!(merged.streaming, None);
        assert_eq!(merged.token, None);
    }
}
