//! Types for telemetry streaming

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One telemetry sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,

    /// Column name -> raw value; `None` when the vehicle sent nothing
    pub values: HashMap<String, Option<String>>,
}

impl TelemetryRecord {
    /// Get a column as its raw string
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(|v| v.as_deref())
    }

    pub fn get_f64(&self, column: &str) -> Option<f64> {
        self.get_str(column).and_then(|v| v.parse().ok())
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get_str(column).and_then(|v| v.parse().ok())
    }

    /// Check if a column carries a value
    pub fn has(&self, column: &str) -> bool {
        self.get_str(column).is_some()
    }

    /// Get all column names in this record
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|s| s.as_str())
    }
}

/// Errors that can occur during streaming
#[derive(Debug, Error)]
pub enum StreamError {
    /// HTTP/connection error
    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// Malformed telemetry line
    #[error("Parse error: {0}")]
    Parse(String),

    /// Server returned an error
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid stream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type for streaming operations
pub type StreamResult<T> = std::result::Result<T, StreamError>;
