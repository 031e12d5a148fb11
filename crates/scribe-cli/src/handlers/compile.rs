//! Compile command handler

use scribe::{compile, render_code, CompileOptions, GeneratedCode, InteractionLog};
use tracing::debug;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, Reporter};
use crate::CompileArgs;

use super::read_input;

/// Decode an interaction log and compile it
pub fn compile_log(json: &str, source: &str, options: &CompileOptions) -> CliResult<GeneratedCode> {
    let log: InteractionLog = serde_json::from_str(json).map_err(|e| CliError::input(source, e))?;
    debug!(entries = log.len(), source, "loaded interaction log");
    Ok(compile(&log, options))
}

/// Compile options: configuration first, then command-line overrides
#[must_use]
pub fn effective_options(config: &CliConfig, args: &CompileArgs) -> CompileOptions {
    let mut options = config.recorder.compile_options();
    if let Some(dialect) = args.dialect {
        options.dialect = dialect.into();
    }
    if args.typed {
        options.typed = true;
    }
    options
}

/// Execute the compile command
pub fn execute_compile(config: &CliConfig, args: &CompileArgs) -> CliResult<()> {
    let source = args.log.display().to_string();
    let json = read_input(&args.log)?;
    let code = compile_log(&json, &source, &effective_options(config, args))?;
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match OutputFormat::from(args.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&code)?),
        OutputFormat::Text => {
            if code.is_empty() {
                reporter.info("No interactions recorded");
                return Ok(());
            }
            println!("{}", render_code(&code, &args.story, &args.test_name));
            reporter.code_warnings(&code);
        }
    }
    Ok(())
}
