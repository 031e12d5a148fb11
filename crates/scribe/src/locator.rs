//! Locator model: how to re-find an element from a scope root.
//!
//! A [`Locator`] pairs a [`Scope`] (which root object generated code queries
//! from) with a [`Query`] (strategy plus its arguments) and an optional index
//! used when the query matched more than one element at capture time.
//!
//! Testing Library method names (`findByRole`, `queryAllByText`, ...) are
//! derived from the strategy only when code is emitted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::{format_arguments, Literal};

/// Root object a locator queries from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    /// `within(...)` bound canvas; queries are asynchronous `find*` calls
    Canvas,
    /// `document.body`; plain synchronous `querySelector*` calls
    Body,
}

impl Scope {
    /// Identifier used in generated code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Canvas => "canvas",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text matcher options shared by the text-based strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMatch {
    /// Whole-string, case-sensitive match when true; substring otherwise
    pub exact: bool,
    /// Collapse runs of whitespace before matching
    #[serde(default = "default_collapse_whitespace")]
    pub collapse_whitespace: bool,
}

const fn default_collapse_whitespace() -> bool {
    true
}

impl Default for TextMatch {
    fn default() -> Self {
        Self::exact()
    }
}

impl TextMatch {
    /// `{ exact: true }`
    #[must_use]
    pub const fn exact() -> Self {
        Self {
            exact: true,
            collapse_whitespace: true,
        }
    }

    /// `{ exact: false }`
    #[must_use]
    pub const fn partial() -> Self {
        Self {
            exact: false,
            collapse_whitespace: true,
        }
    }

    /// `{ exact: false, collapseWhitespace: false }`, used for multi-line text
    #[must_use]
    pub const fn multiline() -> Self {
        Self {
            exact: false,
            collapse_whitespace: false,
        }
    }

    /// Options record as passed to the query
    #[must_use]
    pub fn to_literal(self) -> Literal {
        let mut pairs = vec![("exact", Literal::Bool(self.exact))];
        if !self.collapse_whitespace {
            pairs.push(("collapseWhitespace", Literal::Bool(false)));
        }
        Literal::object(pairs)
    }
}

/// Named lookup method, without its arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Accessible role, optionally with accessible name
    Role,
    /// Label text
    LabelText,
    /// Placeholder attribute
    PlaceholderText,
    /// Visible text
    Text,
    /// Title attribute
    Title,
    /// Test-id attribute
    TestId,
    /// Structural CSS path
    Css,
}

/// Which family of Testing Library query a method name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFamily {
    /// `find*` – asynchronous, rejects when nothing matches
    Find,
    /// `query*` – synchronous, returns null / empty when nothing matches
    Query,
}

impl Strategy {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Role => "Role",
            Self::LabelText => "LabelText",
            Self::PlaceholderText => "PlaceholderText",
            Self::Text => "Text",
            Self::Title => "Title",
            Self::TestId => "TestId",
            Self::Css => "",
        }
    }

    /// Method name emitted into generated code.
    ///
    /// CSS queries always use `querySelector` / `querySelectorAll`.
    #[must_use]
    pub fn method_name(self, family: QueryFamily, all: bool) -> String {
        if self == Self::Css {
            return if all { "querySelectorAll" } else { "querySelector" }.to_string();
        }

        let prefix = match family {
            QueryFamily::Find => "find",
            QueryFamily::Query => "query",
        };
        let by = if all { "AllBy" } else { "By" };
        format!("{prefix}{by}{}", self.suffix())
    }
}

/// A lookup strategy together with its arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "camelCase")]
pub enum Query {
    /// `ByRole(role, { name })`
    Role {
        /// ARIA role
        role: String,
        /// Accessible name, when the element has one
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// `ByLabelText(text, options)`
    LabelText {
        /// Label text
        text: String,
        /// Matcher options
        #[serde(default)]
        options: TextMatch,
    },
    /// `ByPlaceholderText(text, options)`
    PlaceholderText {
        /// Placeholder text
        text: String,
        /// Matcher options
        #[serde(default)]
        options: TextMatch,
    },
    /// `ByText(text, options)`
    Text {
        /// Visible text (possibly truncated)
        text: String,
        /// Matcher options
        #[serde(default)]
        options: TextMatch,
    },
    /// `ByTitle(text, options)`
    Title {
        /// Title attribute value
        text: String,
        /// Matcher options
        #[serde(default)]
        options: TextMatch,
    },
    /// `ByTestId(id)`
    TestId {
        /// Test-id attribute value
        id: String,
    },
    /// `querySelector(selector)`
    Css {
        /// CSS selector relative to the container
        selector: String,
    },
}

impl Query {
    /// Role query with an accessible name
    #[must_use]
    pub fn role_named(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: Some(name.into()),
        }
    }

    /// Role query without a name
    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: None,
        }
    }

    /// CSS selector query
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css {
            selector: selector.into(),
        }
    }

    /// Test-id query
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId { id: id.into() }
    }

    /// Strategy of this query
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Role { .. } => Strategy::Role,
            Self::LabelText { .. } => Strategy::LabelText,
            Self::PlaceholderText { .. } => Strategy::PlaceholderText,
            Self::Text { .. } => Strategy::Text,
            Self::Title { .. } => Strategy::Title,
            Self::TestId { .. } => Strategy::TestId,
            Self::Css { .. } => Strategy::Css,
        }
    }

    /// Scope that generated code must query from
    #[must_use]
    pub const fn scope(&self) -> Scope {
        match self {
            Self::Css { .. } => Scope::Body,
            _ => Scope::Canvas,
        }
    }

    /// Arguments passed to the query method, in order
    #[must_use]
    pub fn arguments(&self) -> Vec<Literal> {
        match self {
            Self::Role { role, name: None } => vec![Literal::from(role.as_str())],
            Self::Role {
                role,
                name: Some(name),
            } => vec![
                Literal::from(role.as_str()),
                Literal::object([("name", Literal::from(name.as_str()))]),
            ],
            Self::LabelText { text, options }
            | Self::PlaceholderText { text, options }
            | Self::Text { text, options }
            | Self::Title { text, options } => {
                vec![Literal::from(text.as_str()), options.to_literal()]
            }
            Self::TestId { id } => vec![Literal::from(id.as_str())],
            Self::Css { selector } => vec![Literal::from(selector.as_str())],
        }
    }
}

/// Identifies how to re-find one element relative to a scope root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    /// Root object
    pub scope: Scope,
    /// Strategy and arguments
    pub query: Query,
    /// Position among multiple matches; `None` means exactly one match
    #[serde(default)]
    pub index: Option<usize>,
}

impl Locator {
    /// Locator expecting exactly one match, scoped by its query
    #[must_use]
    pub fn single(query: Query) -> Self {
        Self {
            scope: query.scope(),
            query,
            index: None,
        }
    }

    /// Locator picking the `index`-th of several matches
    #[must_use]
    pub fn nth(query: Query, index: usize) -> Self {
        Self {
            scope: query.scope(),
            query,
            index: Some(index),
        }
    }

    /// Method name for the given query family
    #[must_use]
    pub fn method_name(&self, family: QueryFamily) -> String {
        self.query
            .strategy()
            .method_name(family, self.index.is_some())
    }

    /// Arguments rendered as source text
    #[must_use]
    pub fn formatted_arguments(&self) -> String {
        format_arguments(&self.query.arguments())
    }

    /// Whether two locators address the same element the same way.
    ///
    /// Compares scope, strategy, formatted arguments and index.
    #[must_use]
    pub fn same_target(&self, other: &Self) -> bool {
        self.scope == other.scope
            && self.query.strategy() == other.query.strategy()
            && self.index == other.index
            && self.formatted_arguments() == other.formatted_arguments()
    }
}
