//! Locate command handler

use scribe::dom::{Document, NodeId};
use scribe::{locator_expression, Locator, LocatorSynthesizer, RecorderConfig};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use crate::LocateArgs;

use super::{parse_document, read_input, resolve_element};

/// Synthesize a locator for `target` under `container`
pub async fn locate(
    doc: &Document,
    container: NodeId,
    target: NodeId,
    recorder: &RecorderConfig,
) -> CliResult<Option<Locator>> {
    Ok(LocatorSynthesizer::new(recorder)
        .synthesize(doc, container, target)
        .await?)
}

/// Execute the locate command
pub fn execute_locate(config: &CliConfig, args: &LocateArgs) -> CliResult<()> {
    let element = &args.element;
    let source = element.dom.display().to_string();
    let doc = parse_document(&read_input(&element.dom)?, &source)?;
    let target = resolve_element(&doc, &element.target)?;
    let container = match &element.container {
        Some(selector) => resolve_element(&doc, selector)?,
        None => doc.body(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let locator = runtime
        .block_on(locate(&doc, container, target, &config.recorder))?
        .ok_or_else(|| CliError::not_located(&element.target))?;

    match OutputFormat::from(args.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&locator)?),
        OutputFormat::Text => println!("{}", locator_expression(&locator)),
    }
    Ok(())
}
