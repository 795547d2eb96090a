//! Error types for decoding and command construction

use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised before any request is sent
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// VIN present but too short to index the attribute positions
    #[error("VIN too short: expected at least {expected} characters, got {actual}")]
    VinTooShort { expected: usize, actual: usize },

    /// VIN contains characters outside the ASCII range
    #[error("VIN is not ASCII: {0}")]
    VinNotAscii(String),

    /// No command with this name or alias exists in the table
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A required argument was not supplied
    #[error("Missing argument '{param}' for command {command}")]
    MissingArgument {
        command: &'static str,
        param: &'static str,
    },

    /// An argument could not be interpreted as the declared kind
    #[error("Invalid argument '{param}' for command {command}: {reason}")]
    InvalidArgument {
        command: &'static str,
        param: &'static str,
        reason: String,
    },

    /// More positional arguments than the command declares
    #[error("Command {command} takes {expected} argument(s), got {actual}")]
    TooManyArguments {
        command: &'static str,
        expected: usize,
        actual: usize,
    },
}
