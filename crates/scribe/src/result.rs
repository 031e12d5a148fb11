//! Result and error types for Scribe.

use thiserror::Error;

use crate::css_path::CssPathError;

/// Result type for Scribe operations
pub type RecorderResult<T> = Result<T, RecorderError>;

/// Errors that can occur in Scribe
#[derive(Debug, Error)]
pub enum RecorderError {
    /// A raw DOM event outside the recorded whitelist reached the classifier.
    ///
    /// This is a caller bug, never a user-data problem.
    #[error("Unrecognized DOM event type '{event_type}'")]
    UnrecognizedEvent {
        /// The rejected event type
        event_type: String,
    },

    /// An assertion was requested for an element that does not support it
    #[error("Assertion {kind} is not applicable to <{tag}>")]
    AssertionNotApplicable {
        /// Requested assertion method
        kind: String,
        /// Tag name of the inspected element
        tag: String,
    },

    /// Node handle does not belong to the document
    #[error("Unknown node id {id}")]
    UnknownNode {
        /// Offending node id
        id: usize,
    },

    /// CSS selector could not be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// Selector source
        selector: String,
        /// Parse failure
        reason: String,
    },

    /// Structural CSS path generation failed for a reason other than "not found"
    #[error("CSS path generation failed: {0}")]
    CssPath(#[from] CssPathError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecorderError {
    /// Create an unrecognized event error
    #[must_use]
    pub fn unrecognized_event(event_type: impl Into<String>) -> Self {
        Self::UnrecognizedEvent {
            event_type: event_type.into(),
        }
    }

    /// Create an invalid selector error
    #[must_use]
    pub fn invalid_selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}
