//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Input file could not be decoded
    #[error("Invalid input {path}: {source}")]
    Input {
        /// Input path, `-` for stdin
        path: String,
        /// Decoding failure
        source: serde_json::Error,
    },

    /// No candidate query re-finds the element
    #[error("No locator re-finds '{selector}'")]
    NotLocated {
        /// Target selector
        selector: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Scribe library error
    #[error("Scribe error: {0}")]
    Scribe(#[from] scribe::RecorderError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not-located error
    #[must_use]
    pub fn not_located(selector: impl Into<String>) -> Self {
        Self::NotLocated {
            selector: selector.into(),
        }
    }

    /// Create an input decoding error
    #[must_use]
    pub fn input(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }
}
