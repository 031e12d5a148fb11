//! Locator synthesis.
//!
//! For a clicked or edited element, build every applicable candidate query,
//! rank them, and return the first one that finds the element again under the
//! container.
//!
//! | Rank | Candidate                                   |
//! |------|---------------------------------------------|
//! | 0    | role with accessible name                   |
//! | 1    | label text                                  |
//! | 2    | placeholder (inputs and textareas)          |
//! | 3    | role without name                           |
//! | 4    | own text, up to 80 characters, exact        |
//! | 5    | own text, first 80 characters, partial      |
//! | 6    | title attribute                             |
//! | 7    | test-id attribute                           |
//! | 8    | structural CSS path                         |

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::RecorderConfig;
use crate::css_path::{CssPathError, CssPathFinder};
use crate::dom::accessibility::{accessible_name, element_labels, role};
use crate::dom::{Document, NodeId, QueryEngine, SelectorList, NO_QUERY_ATTRIBUTE};
use crate::locator::{Locator, Query, TextMatch};
use crate::result::RecorderResult;

/// Controls that absorb events fired on their descendants
pub const INTERACTIVE_SELECTOR: &str = r#"button, select, input, [role="button"], [role="checkbox"], [role="radio"], a, [role="link"]"#;

/// Longest text used for an exact text query
pub const MAX_TEXT_LENGTH: usize = 80;

/// Candidate preference, lower is better
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Role with accessible name
    RoleWithName,
    /// Label text
    Label,
    /// Placeholder
    Placeholder,
    /// Role without name
    RoleWithoutName,
    /// Short text, exact
    TextExact,
    /// Long text, truncated and partial
    TextPartial,
    /// Title attribute
    Title,
    /// Test-id attribute
    TestId,
    /// CSS path
    Css,
}

/// A ranked query that might find the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Preference
    pub rank: Rank,
    /// Query to run
    pub query: Query,
}

impl Candidate {
    const fn new(rank: Rank, query: Query) -> Self {
        Self { rank, query }
    }
}

/// Builds locators for targets under a container
pub struct LocatorSynthesizer {
    engine: Arc<dyn QueryEngine>,
    test_id_attribute: String,
    css: CssPathFinder,
}

impl fmt::Debug for LocatorSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocatorSynthesizer")
            .field("test_id_attribute", &self.test_id_attribute)
            .field("css", &self.css)
            .finish_non_exhaustive()
    }
}

impl Default for LocatorSynthesizer {
    fn default() -> Self {
        Self::new(&RecorderConfig::default())
    }
}

impl LocatorSynthesizer {
    /// Synthesizer using the in-memory query engine
    #[must_use]
    pub fn new(config: &RecorderConfig) -> Self {
        Self {
            engine: Arc::new(config.queries()),
            test_id_attribute: config.test_id_attribute.clone(),
            css: config.css_path_finder(),
        }
    }

    /// Replace the query engine
    #[must_use]
    pub fn with_engine(mut self, engine: impl QueryEngine + 'static) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// Nearest interactive ancestor-or-self, else the target itself
    pub fn effective_target(doc: &Document, target: NodeId) -> RecorderResult<NodeId> {
        let interactive = SelectorList::parse(INTERACTIVE_SELECTOR)?;
        Ok(doc
            .closest(target, |n| interactive.matches(doc, n))
            .unwrap_or(target))
    }

    /// Candidates for `element`, sorted by rank
    pub fn candidates(
        &self,
        doc: &Document,
        container: NodeId,
        element: NodeId,
    ) -> RecorderResult<Vec<Candidate>> {
        let mut candidates = Vec::new();

        if let Some(role) = role(doc, element) {
            let name = accessible_name(doc, element);
            if name.is_empty() {
                candidates.push(Candidate::new(Rank::RoleWithoutName, Query::role(role)));
            } else {
                candidates.push(Candidate::new(Rank::RoleWithName, Query::role_named(role, name)));
            }
        }

        for label in element_labels(doc, element) {
            candidates.push(Candidate::new(
                Rank::Label,
                Query::LabelText {
                    text: label,
                    options: TextMatch::exact(),
                },
            ));
        }

        if matches!(doc.tag_name(element), Some("input" | "textarea")) {
            if let Some(placeholder) = doc.attribute(element, "placeholder").filter(|p| !p.is_empty()) {
                candidates.push(Candidate::new(
                    Rank::Placeholder,
                    Query::PlaceholderText {
                        text: placeholder.to_string(),
                        options: TextMatch::exact(),
                    },
                ));
            }
        }

        if let Some(candidate) = text_candidate(doc, element) {
            candidates.push(candidate);
        }

        if let Some(title) = doc.attribute(element, "title").filter(|t| !t.is_empty()) {
            candidates.push(Candidate::new(
                Rank::Title,
                Query::Title {
                    text: title.to_string(),
                    options: TextMatch::exact(),
                },
            ));
        }

        if let Some(id) = doc
            .attribute(element, &self.test_id_attribute)
            .filter(|id| !id.is_empty())
        {
            candidates.push(Candidate::new(Rank::TestId, Query::test_id(id)));
        }

        match self.css.find(doc, container, element) {
            Ok(selector) => candidates.push(Candidate::new(Rank::Css, Query::css(selector))),
            Err(CssPathError::NotFound) => trace!(element = %element, "no unique css path"),
            Err(err) => return Err(err.into()),
        }

        candidates.sort_by_key(|c| c.rank);
        Ok(candidates)
    }

    /// Locator re-finding `target` under `container`, or `None` when no
    /// candidate finds it.
    pub async fn synthesize(
        &self,
        doc: &Document,
        container: NodeId,
        target: NodeId,
    ) -> RecorderResult<Option<Locator>> {
        doc.check(container)?;
        doc.check(target)?;
        let element = Self::effective_target(doc, target)?;

        for candidate in self.candidates(doc, container, element)? {
            let found: Vec<NodeId> = self
                .engine
                .query_all(doc, container, &candidate.query)
                .await?
                .into_iter()
                .filter(|&n| doc.attribute(n, NO_QUERY_ATTRIBUTE) != Some("true"))
                .collect();

            let Some(position) = found.iter().position(|&n| n == element) else {
                trace!(rank = ?candidate.rank, "candidate misses target");
                continue;
            };

            let locator = if found.len() == 1 {
                Locator::single(candidate.query)
            } else {
                Locator::nth(candidate.query, position)
            };
            debug!(
                rank = ?candidate.rank,
                method = %locator.method_name(crate::locator::QueryFamily::Find),
                index = ?locator.index,
                "synthesized locator"
            );
            return Ok(Some(locator));
        }

        debug!(target = %target, "no locator found");
        Ok(None)
    }
}

fn text_candidate(doc: &Document, element: NodeId) -> Option<Candidate> {
    let own_text = doc.node_text(element);
    let text = own_text.trim();
    if text.is_empty() {
        return None;
    }

    let multiline = text.contains('\n');
    let (rank, text, options) = if text.chars().count() <= MAX_TEXT_LENGTH {
        let options = if multiline {
            TextMatch::multiline()
        } else {
            TextMatch::exact()
        };
        (Rank::TextExact, text.to_string(), options)
    } else {
        let options = if multiline {
            TextMatch::multiline()
        } else {
            TextMatch::partial()
        };
        let truncated = text.chars().take(MAX_TEXT_LENGTH).collect();
        (Rank::TextPartial, truncated, options)
    };

    Some(Candidate::new(rank, Query::Text { text, options }))
}
