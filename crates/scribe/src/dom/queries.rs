//! Find-all query primitives, one per locator strategy.
//!
//! Matching follows the Testing Library conventions: text is trimmed and,
//! unless disabled, whitespace-collapsed before comparison; exact matchers
//! compare whole strings case-sensitively, partial matchers do a
//! case-insensitive substring search.

use async_trait::async_trait;

use super::accessibility::{accessible_name, collapse_whitespace, element_labels, is_hidden, role};
use super::{Document, NodeId};
use crate::config::DEFAULT_TEST_ID_ATTRIBUTE;
use crate::locator::{Query, TextMatch};
use crate::result::RecorderResult;

/// Elements whose own text never matches a text query
const IGNORED_TEXT_TAGS: &[&str] = &["script", "style"];

/// Resolves a [`Query`] to every matching element under a container.
///
/// Results are in document order; the container itself is never matched.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Run the query's find-all variant
    async fn query_all(
        &self,
        document: &Document,
        container: NodeId,
        query: &Query,
    ) -> RecorderResult<Vec<NodeId>>;
}

/// Query engine backed by the in-memory [`Document`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomQueries {
    test_id_attribute: String,
}

impl Default for DomQueries {
    fn default() -> Self {
        Self::new(DEFAULT_TEST_ID_ATTRIBUTE)
    }
}

impl DomQueries {
    /// Create an engine reading test ids from `test_id_attribute`
    #[must_use]
    pub fn new(test_id_attribute: impl Into<String>) -> Self {
        Self {
            test_id_attribute: test_id_attribute.into(),
        }
    }

    /// Synchronous form of [`QueryEngine::query_all`]
    pub fn query_all_sync(
        &self,
        doc: &Document,
        container: NodeId,
        query: &Query,
    ) -> RecorderResult<Vec<NodeId>> {
        doc.check(container)?;

        if let Query::Css { selector } = query {
            return doc.query_selector_all(container, selector);
        }

        let matches = doc
            .descendants(container)
            .into_iter()
            .filter(|&n| self.matches(doc, n, query))
            .collect();
        Ok(matches)
    }

    fn matches(&self, doc: &Document, node: NodeId, query: &Query) -> bool {
        match query {
            Query::Role { role: wanted, name } => {
                role(doc, node).as_deref() == Some(wanted.as_str())
                    && !is_hidden(doc, node)
                    && name
                        .as_ref()
                        .map_or(true, |name| accessible_name(doc, node) == *name)
            }
            Query::LabelText { text, options } => element_labels(doc, node)
                .iter()
                .any(|label| text_matches(label, text, *options)),
            Query::PlaceholderText { text, options } => doc
                .attribute(node, "placeholder")
                .is_some_and(|p| text_matches(p, text, *options)),
            Query::Text { text, options } => {
                !doc
                    .tag_name(node)
                    .is_some_and(|tag| IGNORED_TEXT_TAGS.contains(&tag))
                    && text_matches(&doc.node_text(node), text, *options)
            }
            Query::Title { text, options } => doc
                .attribute(node, "title")
                .is_some_and(|t| text_matches(t, text, *options)),
            Query::TestId { id } => doc.attribute(node, &self.test_id_attribute) == Some(id.as_str()),
            // Resolved by `query_selector_all` before per-node matching
            Query::Css { .. } => false,
        }
    }
}

#[async_trait]
impl QueryEngine for DomQueries {
    async fn query_all(
        &self,
        document: &Document,
        container: NodeId,
        query: &Query,
    ) -> RecorderResult<Vec<NodeId>> {
        self.query_all_sync(document, container, query)
    }
}

fn normalize(text: &str, options: TextMatch) -> String {
    if options.collapse_whitespace {
        collapse_whitespace(text)
    } else {
        text.trim().to_string()
    }
}

/// Whether `candidate` satisfies `wanted` under the matcher options
#[must_use]
pub fn text_matches(candidate: &str, wanted: &str, options: TextMatch) -> bool {
    let candidate = normalize(candidate, options);
    if options.exact {
        candidate == wanted
    } else {
        candidate.to_lowercase().contains(&wanted.to_lowercase())
    }
}
