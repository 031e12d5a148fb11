//! Story-name command handler

use scribe::{story_export_name, story_name_from_export};

use crate::error::{CliError, CliResult};
use crate::StoryNameArgs;

/// Export identifier and display name for a typed story name
pub fn story_names(name: &str) -> CliResult<(String, String)> {
    let export = story_export_name(name);
    if export.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "'{name}' has no letters or digits to build a story name from"
        )));
    }
    let display = story_name_from_export(&export);
    Ok((export, display))
}

/// Execute the story-name command
pub fn execute_story_name(args: &StoryNameArgs) -> CliResult<()> {
    let (export, display) = story_names(&args.name)?;
    println!("export: {export}");
    println!("name: {display}");
    Ok(())
}
