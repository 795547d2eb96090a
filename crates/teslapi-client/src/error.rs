//! Error types for owner API client operations

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, TeslaClientError>;

/// Errors that can occur during client operations
#[derive(Error, Debug)]
pub enum TeslaClientError {
    /// Transport failure (connect, DNS, TLS, timeouts), surfaced as-is
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server answered with a status other than 200
    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },

    /// Server rejected the access token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Server reported a timeout
    #[error("Request timed out (HTTP {status})")]
    Timeout { status: u16 },

    /// Failed to parse or post-process a response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Command could not be built from its arguments
    #[error(transparent)]
    Command(#[from] teslapi_core::CoreError),

    /// No access token configured on the client
    #[error("No access token configured")]
    MissingToken,

    /// OAuth call attempted without a client identity
    #[error("No client identity configured (set TESLAPI_CLIENT_ID and TESLAPI_CLIENT_SECRET)")]
    MissingIdentity,

    /// Header value rejected (e.g. a token with control characters)
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// Streaming error
    #[error("Stream error: {0}")]
    Stream(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TeslaClientError {
    /// Create a status error from status code and message
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if it came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::Timeout { status } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(e) if e.status().is_none())
    }
}
