//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Scribe: compile recorded UI interactions into Testing Library code
#[derive(Parser, Debug)]
#[command(name = "scribe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress warnings)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Recorder configuration file (YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile an interaction log into test code
    Compile(CompileArgs),

    /// Fold captured entries through the merge rules
    Reduce(ReduceArgs),

    /// Synthesize a locator for an element of a DOM snapshot
    Locate(LocateArgs),

    /// List assertions that currently hold for an element
    Assertions(AssertionsArgs),

    /// Normalise a story name into an export name
    StoryName(StoryNameArgs),
}

/// Arguments for the compile command
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Interaction log (JSON array of entries), `-` for stdin
    pub log: PathBuf,

    /// Output dialect, overriding the configuration
    #[arg(short, long)]
    pub dialect: Option<DialectArg>,

    /// Emit TypeScript casts
    #[arg(long)]
    pub typed: bool,

    /// Story export name used to frame test-dialect output
    #[arg(long, default_value = "Primary")]
    pub story: String,

    /// Test name used to frame test-dialect output
    #[arg(long, default_value = "")]
    pub test_name: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormatArg,
}

/// Arguments for the reduce command
#[derive(Parser, Debug)]
pub struct ReduceArgs {
    /// Captured entries (JSON array), `-` for stdin
    pub entries: PathBuf,
}

/// Element selection shared by DOM commands
#[derive(Parser, Debug)]
pub struct ElementArgs {
    /// DOM snapshot of `<body>` (JSON), `-` for stdin
    pub dom: PathBuf,

    /// CSS selector of the target element
    #[arg(short, long)]
    pub target: String,

    /// CSS selector of the container; defaults to `<body>`
    #[arg(short, long)]
    pub container: Option<String>,
}

/// Arguments for the locate command
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Element selection
    #[command(flatten)]
    pub element: ElementArgs,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormatArg,
}

/// Arguments for the assertions command
#[derive(Parser, Debug)]
pub struct AssertionsArgs {
    /// Element selection
    #[command(flatten)]
    pub element: ElementArgs,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormatArg,
}

/// Arguments for the story-name command
#[derive(Parser, Debug)]
pub struct StoryNameArgs {
    /// Name as typed by the user
    pub name: String,
}

/// Output dialect argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialectArg {
    /// `play` function
    #[default]
    Play,
    /// `Story.test(...)` body
    Test,
}

impl From<DialectArg> for scribe::Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Play => Self::Play,
            DialectArg::Test => Self::Test,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<OutputFormatArg> for crate::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => Self::Text,
            OutputFormatArg::Json => Self::Json,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
