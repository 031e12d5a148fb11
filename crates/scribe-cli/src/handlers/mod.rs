//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains the execution logic for one CLI command and
//! the pure helpers it is built from.

pub mod assertions;
pub mod compile;
pub mod locate;
pub mod reduce;
pub mod story_name;

use scribe::dom::{Document, ElementSnapshot, NodeId, SelectorList};
use std::io::Read;
use std::path::Path;

use crate::error::{CliError, CliResult};

pub use assertions::{execute_assertions, render_assertions};
pub use compile::{compile_log, execute_compile};
pub use locate::{execute_locate, locate};
pub use reduce::{execute_reduce, reduce_entries};
pub use story_name::execute_story_name;

/// Read a file, or stdin when the path is `-`
pub fn read_input(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Parse a `<body>` snapshot into a document
pub fn parse_document(json: &str, source: &str) -> CliResult<Document> {
    let body: ElementSnapshot =
        serde_json::from_str(json).map_err(|e| CliError::input(source, e))?;
    Ok(Document::from_snapshot(&body))
}

/// First element matching `selector`, `<body>` included
pub fn resolve_element(doc: &Document, selector: &str) -> CliResult<NodeId> {
    let list = SelectorList::parse(selector)?;
    if list.matches(doc, doc.body()) {
        return Ok(doc.body());
    }
    doc.query_selector(doc.body(), selector)?
        .ok_or_else(|| CliError::invalid_argument(format!("no element matches '{selector}'")))
}
