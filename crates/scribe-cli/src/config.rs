//! CLI configuration

use scribe::RecorderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CliError, CliResult};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - recorder decisions
    Verbose,
    /// Debug - every merge and candidate
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default `tracing` filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "scribe=error",
            Self::Normal => "scribe=warn",
            Self::Verbose => "scribe=debug",
            Self::Debug => "scribe=trace",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when stderr is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::Term::stderr().features().colors_supported(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Recorder settings, from `--config` or defaults
    pub recorder: RecorderConfig,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set recorder settings
    #[must_use]
    pub fn with_recorder(mut self, recorder: RecorderConfig) -> Self {
        self.recorder = recorder;
        self
    }

    /// Load recorder settings from a YAML file
    pub fn load_recorder(self, path: &Path) -> CliResult<Self> {
        let recorder = RecorderConfig::from_yaml_file(path)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))?;
        Ok(self.with_recorder(recorder))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use scribe::Dialect;
    use std::io::Write;

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_default_is_normal() {
            assert_eq!(Verbosity::default(), Verbosity::Normal);
        }

        #[test]
        fn test_levels() {
            assert!(Verbosity::Quiet.is_quiet());
            assert!(!Verbosity::Normal.is_verbose());
            assert!(Verbosity::Verbose.is_verbose());
            assert!(Verbosity::Debug.is_verbose());
        }

        #[test]
        fn test_filter_directives() {
            assert_eq!(Verbosity::Normal.filter_directive(), "scribe=warn");
            assert_eq!(Verbosity::Debug.filter_directive(), "scribe=trace");
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_explicit_choices() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_builders() {
            let config = CliConfig::new()
                .with_verbosity(Verbosity::Quiet)
                .with_color(ColorChoice::Never)
                .with_recorder(RecorderConfig::new().with_dialect(Dialect::Test));
            assert!(config.verbosity.is_quiet());
            assert_eq!(config.color, ColorChoice::Never);
            assert_eq!(config.recorder.dialect, Dialect::Test);
        }

        #[test]
        fn test_load_recorder() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "test_id_attribute: data-qa").unwrap();
            let config = CliConfig::new().load_recorder(file.path()).unwrap();
            assert_eq!(config.recorder.test_id_attribute, "data-qa");
        }

        #[test]
        fn test_load_recorder_missing_file() {
            let err = CliConfig::new()
                .load_recorder(Path::new("/nonexistent/scribe.yaml"))
                .unwrap_err();
            assert!(err.to_string().contains("Configuration error"));
        }
    }
}
