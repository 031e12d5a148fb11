//! Assertion candidates for an element.
//!
//! The candidates are the most used `jest-dom` matchers. Each carries its
//! precomputed arguments and a human label for the assertion menu.
//!
//! Ordering is fixed per element category:
//!
//! - native checkbox/radio: visible, in document, checked state, enabled state
//! - checkbox/radio/switch roles: visible, in document, enabled, checked
//!   state, text content
//! - everything else: every applicable kind in [`AssertionKind::ALL`] order

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dom::{Document, NodeId};
use crate::element::{self, ElementValue};
use crate::event::InteractionEvent;
use crate::format::Literal;
use crate::result::{RecorderError, RecorderResult};

/// Assertion method emitted after `expect(...)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssertionKind {
    /// `toBeVisible`
    #[serde(rename = "toBeVisible")]
    ToBeVisible,
    /// `toBeInTheDocument`
    #[serde(rename = "toBeInTheDocument")]
    ToBeInTheDocument,
    /// `toBeEnabled`
    #[serde(rename = "toBeEnabled")]
    ToBeEnabled,
    /// `toBeDisabled`
    #[serde(rename = "toBeDisabled")]
    ToBeDisabled,
    /// `toBeChecked`
    #[serde(rename = "toBeChecked")]
    ToBeChecked,
    /// `not.toBeChecked`
    #[serde(rename = "not.toBeChecked")]
    NotToBeChecked,
    /// `toHaveValue`
    #[serde(rename = "toHaveValue")]
    ToHaveValue,
    /// `not.toHaveValue`
    #[serde(rename = "not.toHaveValue")]
    NotToHaveValue,
    /// `toHaveTextContent`
    #[serde(rename = "toHaveTextContent")]
    ToHaveTextContent,
}

impl AssertionKind {
    /// Every kind, in generic list order
    pub const ALL: [Self; 9] = [
        Self::ToBeVisible,
        Self::ToBeInTheDocument,
        Self::ToBeEnabled,
        Self::ToBeDisabled,
        Self::ToBeChecked,
        Self::NotToBeChecked,
        Self::ToHaveValue,
        Self::NotToHaveValue,
        Self::ToHaveTextContent,
    ];

    /// Matcher text, including a `not.` prefix
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::ToBeVisible => "toBeVisible",
            Self::ToBeInTheDocument => "toBeInTheDocument",
            Self::ToBeEnabled => "toBeEnabled",
            Self::ToBeDisabled => "toBeDisabled",
            Self::ToBeChecked => "toBeChecked",
            Self::NotToBeChecked => "not.toBeChecked",
            Self::ToHaveValue => "toHaveValue",
            Self::NotToHaveValue => "not.toHaveValue",
            Self::ToHaveTextContent => "toHaveTextContent",
        }
    }

    /// Menu label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ToBeVisible => "to be visible",
            Self::ToBeInTheDocument => "to be in the document",
            Self::ToBeEnabled => "to be enabled",
            Self::ToBeDisabled => "to be disabled",
            Self::ToBeChecked => "to be checked",
            Self::NotToBeChecked => "to not be checked",
            Self::ToHaveValue => "to have value",
            Self::NotToHaveValue => "to not have value",
            Self::ToHaveTextContent => "to have text content",
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// One fact currently true of an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicableAssertion {
    /// Matcher
    pub kind: AssertionKind,
    /// Matcher arguments
    pub args: Vec<Literal>,
    /// Menu label
    pub label: String,
}

impl ApplicableAssertion {
    fn new(kind: AssertionKind, args: Vec<Literal>) -> Self {
        Self {
            kind,
            args,
            label: kind.label().to_string(),
        }
    }

    /// Semantic event recording this assertion
    #[must_use]
    pub fn into_event(self) -> InteractionEvent {
        InteractionEvent::Assertion {
            kind: self.kind,
            args: self.args,
        }
    }
}

fn checked_state(doc: &Document, id: NodeId) -> Option<bool> {
    if element::is_checkbox_like(doc, id) {
        return Some(element::is_checked(doc, id));
    }
    if element::has_aria_checked_role(doc, id) {
        return element::aria_checked(doc, id);
    }
    None
}

fn has_value(doc: &Document, id: NodeId) -> bool {
    element::is_value_bearing(doc, id)
        || (doc.tag_name(id) == Some("input") && element::in_disabled_fieldset(doc, id))
}

fn value_argument(doc: &Document, id: NodeId) -> Literal {
    match element::current_value(doc, id) {
        Some(ElementValue::Text(text)) => Literal::String(text),
        Some(ElementValue::Number(Some(n))) => Literal::Number(n),
        Some(ElementValue::Number(None)) => Literal::Number(f64::NAN),
        Some(ElementValue::Multiple(values)) => Literal::string_array(&values),
        None => Literal::string(""),
    }
}

fn has_unparsable_number(doc: &Document, id: NodeId) -> bool {
    matches!(
        element::current_value(doc, id),
        Some(ElementValue::Number(None))
    )
}

/// The assertion for `kind` when it holds for the element
fn candidate(doc: &Document, id: NodeId, kind: AssertionKind) -> Option<ApplicableAssertion> {
    let args = match kind {
        AssertionKind::ToBeVisible | AssertionKind::ToBeInTheDocument => Vec::new(),
        AssertionKind::ToBeEnabled => {
            (element::is_disableable(doc, id) && !element::is_disabled(doc, id)).then(Vec::new)?
        }
        AssertionKind::ToBeDisabled => element::is_disabled(doc, id).then(Vec::new)?,
        AssertionKind::ToBeChecked => (checked_state(doc, id) == Some(true)).then(Vec::new)?,
        AssertionKind::NotToBeChecked => (checked_state(doc, id) == Some(false)).then(Vec::new)?,
        AssertionKind::ToHaveValue => {
            if !has_value(doc, id) || has_unparsable_number(doc, id) {
                return None;
            }
            vec![value_argument(doc, id)]
        }
        AssertionKind::NotToHaveValue => {
            (has_value(doc, id) && has_unparsable_number(doc, id)).then(Vec::new)?
        }
        AssertionKind::ToHaveTextContent => {
            let text = doc.text_content(id);
            if text.is_empty() {
                return None;
            }
            vec![Literal::String(text)]
        }
    };
    Some(ApplicableAssertion::new(kind, args))
}

fn ordered(
    doc: &Document,
    id: NodeId,
    kinds: &[AssertionKind],
) -> RecorderResult<Vec<ApplicableAssertion>> {
    kinds
        .iter()
        .map(|&kind| {
            candidate(doc, id, kind)
                .or_else(|| {
                    (kind == AssertionKind::ToHaveValue)
                        .then(|| ApplicableAssertion::new(kind, vec![Literal::string("")]))
                })
                .ok_or_else(|| RecorderError::AssertionNotApplicable {
                    kind: kind.method().to_string(),
                    tag: doc.tag_name(id).unwrap_or_default().to_string(),
                })
        })
        .collect()
}

fn checkbox_recipe(doc: &Document, id: NodeId) -> Vec<AssertionKind> {
    let checked = if element::is_checked(doc, id) {
        AssertionKind::ToBeChecked
    } else {
        AssertionKind::NotToBeChecked
    };
    let enabled = if element::is_disabled(doc, id) {
        AssertionKind::ToBeDisabled
    } else {
        AssertionKind::ToBeEnabled
    };
    vec![
        AssertionKind::ToBeVisible,
        AssertionKind::ToBeInTheDocument,
        checked,
        enabled,
    ]
}

fn aria_checked_recipe(doc: &Document, id: NodeId) -> Vec<AssertionKind> {
    let mut kinds = vec![AssertionKind::ToBeVisible, AssertionKind::ToBeInTheDocument];
    if element::is_disableable(doc, id) {
        kinds.push(if element::is_disabled(doc, id) {
            AssertionKind::ToBeDisabled
        } else {
            AssertionKind::ToBeEnabled
        });
    }
    match element::aria_checked(doc, id) {
        Some(true) => kinds.push(AssertionKind::ToBeChecked),
        Some(false) => kinds.push(AssertionKind::NotToBeChecked),
        None => {}
    }
    if !doc.text_content(id).is_empty() {
        kinds.push(AssertionKind::ToHaveTextContent);
    }
    kinds
}

fn ensure_element(doc: &Document, id: NodeId) -> RecorderResult<()> {
    doc.check(id)?;
    if doc.is_element(id) {
        Ok(())
    } else {
        Err(RecorderError::UnknownNode { id: id.0 })
    }
}

/// Ordered assertions currently true of an element
pub fn applicable_assertions(
    doc: &Document,
    id: NodeId,
) -> RecorderResult<Vec<ApplicableAssertion>> {
    ensure_element(doc, id)?;

    if element::is_checkbox_like(doc, id) {
        return ordered(doc, id, &checkbox_recipe(doc, id));
    }
    if element::has_aria_checked_role(doc, id) {
        return ordered(doc, id, &aria_checked_recipe(doc, id));
    }
    Ok(AssertionKind::ALL
        .into_iter()
        .filter_map(|kind| candidate(doc, id, kind))
        .collect())
}

/// The assertion of one specific kind.
///
/// Fails with [`RecorderError::AssertionNotApplicable`] when the kind does not
/// hold for the element, except `toHaveValue`, which falls back to `''`.
pub fn assertion_for(
    doc: &Document,
    id: NodeId,
    kind: AssertionKind,
) -> RecorderResult<ApplicableAssertion> {
    ensure_element(doc, id)?;
    let mut found = ordered(doc, id, &[kind])?;
    found
        .pop()
        .ok_or_else(|| RecorderError::AssertionNotApplicable {
            kind: kind.method().to_string(),
            tag: doc.tag_name(id).unwrap_or_default().to_string(),
        })
}
