//! Assertions command handler

use scribe::{applicable_assertions, format_arguments, ApplicableAssertion};

use crate::error::CliResult;
use crate::output::OutputFormat;
use crate::AssertionsArgs;

use super::{parse_document, read_input, resolve_element};

/// One `label<TAB>matcher(args)` line per assertion
#[must_use]
pub fn render_assertions(assertions: &[ApplicableAssertion]) -> String {
    assertions
        .iter()
        .map(|a| {
            format!(
                "{}\t{}({})",
                a.label,
                a.kind.method(),
                format_arguments(&a.args)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Execute the assertions command
pub fn execute_assertions(args: &AssertionsArgs) -> CliResult<()> {
    let element = &args.element;
    let source = element.dom.display().to_string();
    let doc = parse_document(&read_input(&element.dom)?, &source)?;
    let target = resolve_element(&doc, &element.target)?;
    let assertions = applicable_assertions(&doc, target)?;

    match OutputFormat::from(args.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assertions)?),
        OutputFormat::Text => println!("{}", render_assertions(&assertions)),
    }
    Ok(())
}
