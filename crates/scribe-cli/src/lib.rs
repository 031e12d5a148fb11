//! Scribe CLI Library
//!
//! Command-line interface for the Scribe interaction recorder: compile
//! recorded logs, fold captured entries, and inspect DOM snapshots.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{
    AssertionsArgs, Cli, ColorArg, Commands, CompileArgs, DialectArg, ElementArgs, LocateArgs,
    OutputFormatArg, ReduceArgs, StoryNameArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{warning_messages, OutputFormat, Reporter};
