//! Reduce command handler

use scribe::{InteractionLog, LogEntry};
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::ReduceArgs;

use super::read_input;

/// Fold captured entries, in order, through the merge rules
pub fn reduce_entries(json: &str, source: &str) -> CliResult<InteractionLog> {
    let entries: Vec<LogEntry> =
        serde_json::from_str(json).map_err(|e| CliError::input(source, e))?;
    let captured = entries.len();
    let log: InteractionLog = entries.into_iter().collect();
    debug!(captured, reduced = log.len(), "folded captured entries");
    Ok(log)
}

/// Execute the reduce command
pub fn execute_reduce(args: &ReduceArgs) -> CliResult<()> {
    let source = args.entries.display().to_string();
    let log = reduce_entries(&read_input(&args.entries)?, &source)?;
    println!("{}", serde_json::to_string_pretty(&log)?);
    Ok(())
}
