//! Output formatting and diagnostics

use console::{style, Term};
use scribe::{CodeLine, GeneratedCode};
use serde::{Deserialize, Serialize};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Writes diagnostics to stderr so stdout only carries generated output
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self.term.write_line(&self.warning_text(message));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };

        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Warning text with its prefix
    #[must_use]
    pub fn warning_text(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        format!("{prefix} {message}")
    }

    /// Report every flagged line of the generated body
    pub fn code_warnings(&self, code: &GeneratedCode) {
        for message in warning_messages(code.body()) {
            self.warning(&message);
        }
    }
}

/// One message per flagged line: kind, the line, and why it is fragile
#[must_use]
pub fn warning_messages(lines: &[CodeLine]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| {
            line.warning.map(|warning| {
                format!(
                    "{warning}: {}\n  {}",
                    line.text.trim_start(),
                    warning.explanation()
                )
            })
        })
        .collect()
}
