//! Scribe CLI: compile recorded interactions into test code
//!
//! ## Usage
//!
//! ```bash
//! scribe compile recording.json               # Play function on stdout
//! scribe compile recording.json -d test       # Story.test(...) body
//! scribe reduce captured.json                 # Fold raw captures
//! scribe locate dom.json --target '#submit'   # Best locator for an element
//! scribe assertions dom.json --target input   # Assertions that hold now
//! ```

use clap::Parser;
use scribe_cli::{
    handlers::{
        execute_assertions, execute_compile, execute_locate, execute_reduce, execute_story_name,
    },
    Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_tracing(config.verbosity);

    match cli.command {
        Commands::Compile(args) => execute_compile(&config, &args),
        Commands::Reduce(args) => execute_reduce(&args),
        Commands::Locate(args) => execute_locate(&config, &args),
        Commands::Assertions(args) => execute_assertions(&args),
        Commands::StoryName(args) => execute_story_name(&args),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.into();

    let config = CliConfig::new().with_verbosity(verbosity).with_color(color);
    match &cli.config {
        Some(path) => config.load_recorder(path),
        None => Ok(config),
    }
}

/// Logs go to stderr so generated code on stdout stays clean
fn init_tracing(verbosity: Verbosity) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.filter_directive().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
