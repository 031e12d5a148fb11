//! In-memory DOM used as the recorder's document collaborator.
//!
//! The document is an arena of nodes addressed by [`NodeId`]. Node `0` is
//! always the `<body>` element. Besides attributes, elements carry the live
//! form-control properties (current value, checked state, chosen files,
//! option selection) that diverge from attributes once a user interacts.
//!
//! Hosts can populate a document from a [`NodeSnapshot`] tree, which is the
//! serde form used by the CLI.

pub mod accessibility;
pub mod queries;
pub mod selector;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::result::{RecorderError, RecorderResult};

pub use queries::{DomQueries, QueryEngine};
pub use selector::SelectorList;

/// Attribute marking synthetic overlay nodes that must never be matched
pub const NO_QUERY_ATTRIBUTE: &str = "data-no-query";

/// Handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Element data: tag, attributes and live control state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Lower-case tag name
    pub tag: String,
    /// Attributes by name
    pub attributes: BTreeMap<String, String>,
    /// Live `value` property, when it differs from the attribute
    pub value: Option<String>,
    /// Live `checked` property for checkboxes and radios
    pub checked: Option<bool>,
    /// Names of files chosen in a file input
    pub files: Vec<String>,
    /// Live `selected` property for `<option>`
    pub selected: Option<bool>,
}

impl Element {
    /// Attribute value by name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the attribute is present
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// Fluent builder for elements appended to a [`Document`]
#[derive(Debug, Clone, Default)]
pub struct ElementBuilder {
    element: Element,
    text: Option<String>,
}

impl ElementBuilder {
    /// Start building an element with the given tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            element: Element {
                tag: tag.into().to_ascii_lowercase(),
                ..Element::default()
            },
            text: None,
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.element.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a text child
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the live value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.element.value = Some(value.into());
        self
    }

    /// Set the live checked state
    #[must_use]
    pub const fn checked(mut self, checked: bool) -> Self {
        self.element.checked = Some(checked);
        self
    }

    /// Set chosen file names
    #[must_use]
    pub fn files<S: Into<String>>(mut self, files: impl IntoIterator<Item = S>) -> Self {
        self.element.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Set the live selected state of an option
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.element.selected = Some(selected);
        self
    }
}

/// Serializable DOM snapshot: either a text node or an element subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSnapshot {
    /// Text node
    Text(String),
    /// Element node
    Element(ElementSnapshot),
}

/// Element part of a [`NodeSnapshot`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Tag name
    pub tag: String,
    /// Attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
    /// Live value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Live checked state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Chosen files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Live option selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

/// Arena-backed document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding an empty `<body>`
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Element(Element {
                    tag: "body".to_string(),
                    ..Element::default()
                }),
            }],
        }
    }

    /// Build a document from a snapshot of its `<body>`.
    ///
    /// Node ids are assigned in document (pre-)order, body first.
    #[must_use]
    pub fn from_snapshot(body: &ElementSnapshot) -> Self {
        let mut doc = Self::new();
        if let NodeData::Element(root) = &mut doc.nodes[0].data {
            root.attributes.clone_from(&body.attributes);
        }
        for child in &body.children {
            doc.append_snapshot(doc.body(), child);
        }
        doc
    }

    fn append_snapshot(&mut self, parent: NodeId, snapshot: &NodeSnapshot) {
        match snapshot {
            NodeSnapshot::Text(text) => {
                self.append_text(parent, text.clone());
            }
            NodeSnapshot::Element(el) => {
                let id = self.push(
                    parent,
                    NodeData::Element(Element {
                        tag: el.tag.to_ascii_lowercase(),
                        attributes: el.attributes.clone(),
                        value: el.value.clone(),
                        checked: el.checked,
                        files: el.files.clone(),
                        selected: el.selected,
                    }),
                );
                for child in &el.children {
                    self.append_snapshot(id, child);
                }
            }
        }
    }

    /// The `<body>` element
    #[must_use]
    pub const fn body(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append an element under `parent` and return its id
    pub fn append(&mut self, parent: NodeId, builder: ElementBuilder) -> NodeId {
        let id = self.push(parent, NodeData::Element(builder.element));
        if let Some(text) = builder.text {
            self.append_text(id, text);
        }
        id
    }

    /// Append a text node under `parent`
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push(parent, NodeData::Text(text.into()))
    }

    /// Number of nodes, text nodes included
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds only its body
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Ensure `id` belongs to this document
    pub fn check(&self, id: NodeId) -> RecorderResult<NodeId> {
        if id.0 < self.nodes.len() {
            Ok(id)
        } else {
            Err(RecorderError::UnknownNode { id: id.0 })
        }
    }

    /// Element data, or `None` for text nodes and unknown ids
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.0).map(|n| &n.data) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> RecorderResult<&mut Element> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data) {
            Some(NodeData::Element(el)) => Ok(el),
            _ => Err(RecorderError::UnknownNode { id: id.0 }),
        }
    }

    /// Whether `id` is an element node
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Lower-case tag name of an element
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// Attribute value of an element
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attribute(name))
    }

    /// Whether an element carries the attribute
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_attribute(name))
    }

    /// Set an attribute on an element
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> RecorderResult<()> {
        self.element_mut(id)?
            .attributes
            .insert(name.into(), value.into());
        Ok(())
    }

    /// Remove an attribute from an element
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> RecorderResult<()> {
        self.element_mut(id)?.attributes.remove(name);
        Ok(())
    }

    /// Set the live value of a control
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> RecorderResult<()> {
        self.element_mut(id)?.value = Some(value.into());
        Ok(())
    }

    /// Set the live checked state of a checkbox or radio
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> RecorderResult<()> {
        self.element_mut(id)?.checked = Some(checked);
        Ok(())
    }

    /// Replace the chosen files of a file input
    pub fn set_files<S: Into<String>>(
        &mut self,
        id: NodeId,
        files: impl IntoIterator<Item = S>,
    ) -> RecorderResult<()> {
        self.element_mut(id)?.files = files.into_iter().map(Into::into).collect();
        Ok(())
    }

    /// Set the live selected state of an option
    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> RecorderResult<()> {
        self.element_mut(id)?.selected = Some(selected);
        Ok(())
    }

    /// Parent node
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Child nodes, text included
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Child elements only
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.is_element(child))
    }

    /// Ancestors from the parent up to the body
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&n| self.parent(n))
    }

    /// Descendant elements of `id` in document order, `id` excluded
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.is_element(node) {
                out.push(node);
                stack.extend(self.children(node).iter().rev().copied());
            }
        }
        out
    }

    /// Whether `node` is `ancestor` or lies inside it
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Nearest ancestor-or-self element satisfying `predicate`
    pub fn closest(&self, id: NodeId, predicate: impl Fn(NodeId) -> bool) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| self.is_element(n) && predicate(n))
    }

    /// Concatenated text of all descendant text nodes (`textContent`)
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.nodes.get(id.0).map(|n| &n.data) {
            Some(NodeData::Text(text)) => out.push_str(text),
            Some(NodeData::Element(_)) => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
            None => {}
        }
    }

    /// Text of the element's own text children only
    #[must_use]
    pub fn node_text(&self, id: NodeId) -> String {
        self.children(id)
            .iter()
            .filter_map(|child| match &self.nodes[child.0].data {
                NodeData::Text(text) => Some(text.as_str()),
                NodeData::Element(_) => None,
            })
            .collect()
    }

    /// First element in the document with the given `id` attribute
    #[must_use]
    pub fn element_by_id(&self, id_value: &str) -> Option<NodeId> {
        let body = self.body();
        std::iter::once(body)
            .chain(self.descendants(body))
            .find(|&n| self.attribute(n, "id") == Some(id_value))
    }

    /// 1-based position among the parent's element children
    #[must_use]
    pub fn element_index(&self, id: NodeId) -> usize {
        self.parent(id).map_or(1, |parent| {
            self.element_children(parent)
                .position(|sibling| sibling == id)
                .map_or(1, |pos| pos + 1)
        })
    }

    /// `container.querySelectorAll(selector)`
    pub fn query_selector_all(
        &self,
        container: NodeId,
        selector: &str,
    ) -> RecorderResult<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants(container)
            .into_iter()
            .filter(|&n| list.matches(self, n))
            .collect())
    }

    /// `container.querySelector(selector)`
    pub fn query_selector(&self, container: NodeId, selector: &str) -> RecorderResult<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .descendants(container)
            .into_iter()
            .find(|&n| list.matches(self, n)))
    }
}
