//! Client configuration with YAML, JSON and environment support

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default owner API portal
pub const DEFAULT_PORTAL_URL: &str = "https://owner-api.teslamotors.com/";
/// Default telemetry streaming portal
pub const DEFAULT_STREAMING_URL: &str = "https://streaming.vn.teslamotors.com/stream/";

pub const DEFAULT_USER_AGENT: &str = concat!("teslapi/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TESLA_USER_AGENT: &str = "TeslaApp/3.10.9-433/adff2e065/android/9";

/// Environment variable overriding the portal URL
pub const ENV_SERVER: &str = "TESLAPI_SERVER";
/// Environment variable overriding the streaming URL
pub const ENV_STREAMING: &str = "TESLAPI_STREAMING";
/// Environment variable holding the OAuth client id
pub const ENV_CLIENT_ID: &str = "TESLAPI_CLIENT_ID";
/// Environment variable holding the OAuth client secret
pub const ENV_CLIENT_SECRET: &str = "TESLAPI_CLIENT_SECRET";

/// Owner API client configuration
///
/// Can be loaded from YAML or JSON, read from the environment, or
/// constructed programmatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the owner API portal
    #[serde(default = "default_portal_url")]
    pub portal_url: String,

    /// Base URL of the telemetry streaming portal
    #[serde(default = "default_streaming_url")]
    pub streaming_url: String,

    /// OAuth client identity (required for login, refresh and revoke)
    #[serde(default)]
    pub identity: Option<ClientIdentity>,

    /// Static identity headers sent with every request
    #[serde(default)]
    pub headers: HeadersConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    /// How command payloads are sent
    #[serde(default)]
    pub commands: CommandConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            portal_url: default_portal_url(),
            streaming_url: default_streaming_url(),
            identity: None,
            headers: HeadersConfig::default(),
            timeouts: TimeoutsConfig::default(),
            commands: CommandConfig::default(),
        }
    }
}

fn default_portal_url() -> String {
    DEFAULT_PORTAL_URL.to_string()
}

fn default_streaming_url() -> String {
    DEFAULT_STREAMING_URL.to_string()
}

/// OAuth client identity pair
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientIdentity {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientIdentity {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Identity headers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadersConfig {
    /// `User-Agent` header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// `x-tesla-user-agent` header
    #[serde(default = "default_tesla_user_agent")]
    pub tesla_user_agent: String,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            tesla_user_agent: default_tesla_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_tesla_user_agent() -> String {
    DEFAULT_TESLA_USER_AGENT.to_string()
}

/// Timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    /// Request timeout in milliseconds (default: 30s)
    #[serde(default = "default_request_timeout")]
    pub request_ms: u64,

    /// Connect timeout in milliseconds (default: 10s)
    #[serde(default = "default_connect_timeout")]
    pub connect_ms: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            request_ms: default_request_timeout(),
            connect_ms: default_connect_timeout(),
        }
    }
}

impl TimeoutsConfig {
    pub fn request(&self) -> Duration {
        Duration::from_millis(self.request_ms)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_millis(self.connect_ms)
    }
}

fn default_request_timeout() -> u64 {
    30_000 // 30 seconds
}

fn default_connect_timeout() -> u64 {
    10_000 // 10 seconds
}

/// HTTP method used for command endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandMethod {
    /// GET carrying a body, as the legacy clients send it
    #[default]
    Get,
    Post,
}

/// Command payload encoding
///
/// By default the payload travels both as the query string and as the
/// JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default)]
    pub method: CommandMethod,

    /// Send the payload as query parameters
    #[serde(default = "default_true")]
    pub query: bool,

    /// Send the payload as a JSON body
    #[serde(default = "default_true")]
    pub body: bool,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            method: CommandMethod::Get,
            query: true,
            body: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl ClientConfig {
    /// Defaults overridden by `TESLAPI_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `TESLAPI_*` environment variables.
    ///
    /// The identity is only taken when both id and secret are set.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(server) = env_var(ENV_SERVER) {
            self.portal_url = server;
        }
        if let Some(streaming) = env_var(ENV_STREAMING) {
            self.streaming_url = streaming;
        }
        match (env_var(ENV_CLIENT_ID), env_var(ENV_CLIENT_SECRET)) {
            (Some(id), Some(secret)) => self.identity = Some(ClientIdentity::new(id, secret)),
            (Some(_), None) => {
                return Err(ConfigError::Incomplete(format!(
                    "{} is set but {} is not",
                    ENV_CLIENT_ID, ENV_CLIENT_SECRET
                )))
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete(format!(
                    "{} is set but {} is not",
                    ENV_CLIENT_SECRET, ENV_CLIENT_ID
                )))
            }
            (None, None) => {}
        }
        Ok(())
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize configuration to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Create a builder for programmatic configuration
    pub fn builder(portal_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(portal_url)
    }

    /// Portal URL, parsed and normalized to end with `/`
    pub fn portal_base(&self) -> Result<url::Url, url::ParseError> {
        parse_base(&self.portal_url)
    }

    /// Streaming URL, parsed and normalized to end with `/`
    pub fn streaming_base(&self) -> Result<url::Url, url::ParseError> {
        parse_base(&self.streaming_url)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a base URL so that relative paths join beneath it
fn parse_base(raw: &str) -> Result<url::Url, url::ParseError> {
    let mut url = url::Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Builder for ClientConfig
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder with the given portal URL
    pub fn new(portal_url: impl Into<String>) -> Self {
        Self {
            config: ClientConfig {
                portal_url: portal_url.into(),
                ..ClientConfig::default()
            },
        }
    }

    /// Set the streaming portal URL
    pub fn streaming_url(mut self, url: impl Into<String>) -> Self {
        self.config.streaming_url = url.into();
        self
    }

    /// Set the OAuth client identity
    pub fn identity(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.config.identity = Some(ClientIdentity::new(client_id, client_secret));
        self
    }

    /// Set the `User-Agent` header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.headers.user_agent = user_agent.into();
        self
    }

    /// Set the `x-tesla-user-agent` header
    pub fn tesla_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.headers.tesla_user_agent = user_agent.into();
        self
    }

    /// Set request timeout in milliseconds
    pub fn request_timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeouts.request_ms = ms;
        self
    }

    /// Set connect timeout in milliseconds
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeouts.connect_ms = ms;
        self
    }

    /// Set the HTTP method for command endpoints
    pub fn command_method(mut self, method: CommandMethod) -> Self {
        self.config.commands.method = method;
        self
    }

    /// Choose where command payloads are carried
    pub fn command_encoding(mut self, query: bool, body: bool) -> Self {
        self.config.commands.query = query;
        self.config.commands.body = body;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Incomplete configuration: {0}")]
    Incomplete(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for name in [ENV_SERVER, ENV_STREAMING, ENV_CLIENT_ID, ENV_CLIENT_SECRET] {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.portal_url, DEFAULT_PORTAL_URL);
        assert_eq!(config.streaming_url, DEFAULT_STREAMING_URL);
        assert!(config.identity.is_none());
        assert_eq!(config.commands.method, CommandMethod::Get);
        assert!(config.commands.query && config.commands.body);
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
portal_url: "http://localhost:8080"
identity:
  client_id: "abc"
  client_secret: "secret123"
timeouts:
  request_ms: 5000
commands:
  method: post
  query: false
"#;

        let config = ClientConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.portal_url, "http://localhost:8080");
        assert_eq!(config.streaming_url, DEFAULT_STREAMING_URL);
        assert_eq!(config.identity, Some(ClientIdentity::new("abc", "secret123")));
        assert_eq!(config.timeouts.request_ms, 5000);
        assert_eq!(config.timeouts.connect_ms, 10_000);
        assert_eq!(config.commands.method, CommandMethod::Post);
        assert!(!config.commands.query);
        assert!(config.commands.body);
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "streaming_url: \"http://localhost:9000/stream\"").unwrap();

        let config = ClientConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.streaming_url, "http://localhost:9000/stream");
        assert_eq!(
            config.streaming_base().unwrap().as_str(),
            "http://localhost:9000/stream/"
        );
        assert!(ClientConfig::from_yaml_file("/nonexistent/teslapi.yaml").is_err());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder("http://localhost:9080")
            .streaming_url("http://localhost:9081/")
            .identity("id", "secret")
            .request_timeout_ms(1_000)
            .command_method(CommandMethod::Post)
            .command_encoding(false, true)
            .build();

        assert_eq!(config.portal_url, "http://localhost:9080");
        assert_eq!(config.streaming_url, "http://localhost:9081/");
        assert_eq!(config.timeouts.request(), Duration::from_secs(1));
        assert_eq!(config.commands.method, CommandMethod::Post);
        assert!(!config.commands.query);
    }

    #[test]
    fn test_base_normalization() {
        let config = ClientConfig::builder("http://localhost:9080/proxy").build();
        let base = config.portal_base().unwrap();
        assert_eq!(base.as_str(), "http://localhost:9080/proxy/");
        assert_eq!(
            base.join("api/1/vehicles").unwrap().as_str(),
            "http://localhost:9080/proxy/api/1/vehicles"
        );
    }

    #[test]
    fn test_identity_debug_redacted() {
        let identity = ClientIdentity::new("id", "very-secret");
        let debug = format!("{:?}", identity);
        assert!(debug.contains("id"));
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_to_yaml() {
        let yaml = ClientConfig::builder("http://localhost:8080").build().to_yaml().unwrap();
        assert!(yaml.contains("portal_url"));
        assert!(yaml.contains("http://localhost:8080"));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        std::env::set_var(ENV_SERVER, "http://127.0.0.1:7000");
        std::env::set_var(ENV_CLIENT_ID, "env-id");
        std::env::set_var(ENV_CLIENT_SECRET, "env-secret");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.portal_url, "http://127.0.0.1:7000");
        assert_eq!(config.streaming_url, DEFAULT_STREAMING_URL);
        assert_eq!(config.identity, Some(ClientIdentity::new("env-id", "env-secret")));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_half_identity() {
        clear_env();
        std::env::set_var(ENV_CLIENT_ID, "env-id");

        assert!(matches!(ClientConfig::from_env(), Err(ConfigError::Incomplete(_))));

        clear_env();
    }
}
