//! Structural CSS path generation.
//!
//! [`CssPathFinder`] searches for the shortest selector that matches exactly
//! one element under a root. Each element on the path from the target up to
//! the root contributes candidate parts (`#id`, `.class`, tag,
//! `tag:nth-child(n)`), which are combined with the child combinator,
//! shortest chains first. The search is bounded by a time budget; once it is
//! spent the finder falls back to the full `:nth-child` chain.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::trace;

use crate::dom::selector::{escape_identifier, quote_attribute_value};
use crate::dom::{Document, NodeId};

/// Default time budget for the selector search
pub const DEFAULT_CSS_TIMEOUT: Duration = Duration::from_millis(1000);

/// Errors from CSS path generation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CssPathError {
    /// No selector uniquely identifies the target under the root
    #[error("Selector was not found.")]
    NotFound,

    /// The root is not an element, so nothing can be scoped to it
    #[error("Root node {id} is not an element")]
    DetachedRoot {
        /// Offending root id
        id: usize,
    },

    /// A node handle does not belong to the document
    #[error("Unknown node id {id}")]
    UnknownNode {
        /// Offending node id
        id: usize,
    },

    /// A generated selector could not be evaluated
    #[error("Generated selector '{selector}' could not be evaluated")]
    Unevaluable {
        /// The selector
        selector: String,
    },
}

/// Result type for CSS path generation
pub type CssPathResult<T> = Result<T, CssPathError>;

/// Time-bounded unique selector generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssPathFinder {
    timeout: Duration,
}

impl Default for CssPathFinder {
    fn default() -> Self {
        Self::new(DEFAULT_CSS_TIMEOUT)
    }
}

impl CssPathFinder {
    /// Create a finder with the given search budget
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Search budget
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Find a selector, relative to `root`, matching only `target`
    pub fn find(&self, doc: &Document, root: NodeId, target: NodeId) -> CssPathResult<String> {
        if root.0 >= doc.len() {
            return Err(CssPathError::UnknownNode { id: root.0 });
        }
        if target.0 >= doc.len() {
            return Err(CssPathError::UnknownNode { id: target.0 });
        }
        if !doc.is_element(root) {
            return Err(CssPathError::DetachedRoot { id: root.0 });
        }
        if target == root || !doc.is_element(target) || !doc.contains(root, target) {
            return Err(CssPathError::NotFound);
        }

        // Target first, up to the root's child
        let path: Vec<NodeId> = std::iter::once(target)
            .chain(doc.ancestors(target).take_while(|&n| n != root))
            .collect();
        let levels: Vec<Vec<String>> = path.iter().map(|&n| candidate_parts(doc, n)).collect();

        let deadline = Instant::now() + self.timeout;
        for length in 1..=levels.len() {
            let mut choice = vec![0usize; length];
            loop {
                if Instant::now() >= deadline {
                    trace!(target = %target, "css path budget exhausted");
                    return fallback(doc, root, target, &path);
                }
                let selector = join_parts(&levels[..length], &choice);
                if is_unique(doc, root, target, &selector)? {
                    return Ok(selector);
                }
                if !advance(&mut choice, &levels[..length]) {
                    break;
                }
            }
        }

        Err(CssPathError::NotFound)
    }
}

fn candidate_parts(doc: &Document, node: NodeId) -> Vec<String> {
    let mut parts = Vec::new();
    let Some(tag) = doc.tag_name(node) else {
        return parts;
    };

    if let Some(id) = doc.attribute(node, "id").filter(|id| !id.is_empty()) {
        if is_plain_identifier(id) {
            parts.push(format!("#{id}"));
        } else {
            parts.push(format!("[id={}]", quote_attribute_value(id)));
        }
    }
    if let Some(classes) = doc.attribute(node, "class") {
        for class in classes.split_whitespace() {
            parts.push(format!(".{}", escape_identifier(class)));
        }
    }
    parts.push(tag.to_string());
    parts.push(nth_child_part(doc, node, tag));
    parts
}

fn nth_child_part(doc: &Document, node: NodeId, tag: &str) -> String {
    format!("{tag}:nth-child({})", doc.element_index(node))
}

fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Joins one part per level, outermost first
fn join_parts(levels: &[Vec<String>], choice: &[usize]) -> String {
    levels
        .iter()
        .zip(choice)
        .rev()
        .map(|(parts, &i)| parts[i].as_str())
        .collect::<Vec<_>>()
        .join(" > ")
}

/// Odometer increment over the per-level choices; false once exhausted
fn advance(choice: &mut [usize], levels: &[Vec<String>]) -> bool {
    for (slot, parts) in choice.iter_mut().zip(levels).rev() {
        *slot += 1;
        if *slot < parts.len() {
            return true;
        }
        *slot = 0;
    }
    false
}

fn is_unique(doc: &Document, root: NodeId, target: NodeId, selector: &str) -> CssPathResult<bool> {
    let found = doc
        .query_selector_all(root, selector)
        .map_err(|_| CssPathError::Unevaluable {
            selector: selector.to_string(),
        })?;
    Ok(found == [target])
}

fn fallback(doc: &Document, root: NodeId, target: NodeId, path: &[NodeId]) -> CssPathResult<String> {
    let selector = path
        .iter()
        .rev()
        .filter_map(|&n| doc.tag_name(n).map(|tag| nth_child_part(doc, n, tag)))
        .collect::<Vec<_>>()
        .join(" > ");
    if is_unique(doc, root, target, &selector)? {
        Ok(selector)
    } else {
        Err(CssPathError::NotFound)
    }
}
