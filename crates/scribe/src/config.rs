//! Recorder configuration.
//!
//! Hosts usually build a [`RecorderConfig`] with the `with_*` builders; the
//! CLI loads one from YAML:
//!
//! ```yaml
//! test_id_attribute: data-qa
//! dialect: test
//! typed_output: true
//! css_timeout_ms: 500
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::compiler::{CompileOptions, Dialect};
use crate::css_path::CssPathFinder;
use crate::dom::DomQueries;
use crate::result::RecorderResult;

/// Conventional test-id attribute
pub const DEFAULT_TEST_ID_ATTRIBUTE: &str = "data-testid";

/// Default CSS path search budget in milliseconds
pub const DEFAULT_CSS_TIMEOUT_MS: u64 = 1000;

fn default_test_id_attribute() -> String {
    DEFAULT_TEST_ID_ATTRIBUTE.to_string()
}

const fn default_css_timeout_ms() -> u64 {
    DEFAULT_CSS_TIMEOUT_MS
}

/// Recorder settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Attribute read by test-id queries
    #[serde(default = "default_test_id_attribute")]
    pub test_id_attribute: String,
    /// Output dialect
    pub dialect: Dialect,
    /// Emit TypeScript casts
    pub typed_output: bool,
    /// CSS path search budget in milliseconds
    #[serde(default = "default_css_timeout_ms")]
    pub css_timeout_ms: u64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            test_id_attribute: default_test_id_attribute(),
            dialect: Dialect::default(),
            typed_output: false,
            css_timeout_ms: DEFAULT_CSS_TIMEOUT_MS,
        }
    }
}

impl RecorderConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the test-id attribute
    #[must_use]
    pub fn with_test_id_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.test_id_attribute = attribute.into();
        self
    }

    /// Set the output dialect
    #[must_use]
    pub const fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set typed output
    #[must_use]
    pub const fn with_typed_output(mut self, typed: bool) -> Self {
        self.typed_output = typed;
        self
    }

    /// Set the CSS path search budget
    #[must_use]
    pub const fn with_css_timeout_ms(mut self, millis: u64) -> Self {
        self.css_timeout_ms = millis;
        self
    }

    /// Parse from YAML text
    pub fn from_yaml_str(yaml: &str) -> RecorderResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> RecorderResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Compile options derived from this configuration
    #[must_use]
    pub const fn compile_options(&self) -> CompileOptions {
        CompileOptions::new(self.dialect).with_typed(self.typed_output)
    }

    /// CSS path finder honouring the configured budget
    #[must_use]
    pub const fn css_path_finder(&self) -> CssPathFinder {
        CssPathFinder::new(Duration::from_millis(self.css_timeout_ms))
    }

    /// Query engine reading the configured test-id attribute
    #[must_use]
    pub fn queries(&self) -> DomQueries {
        DomQueries::new(self.test_id_attribute.clone())
    }
}
