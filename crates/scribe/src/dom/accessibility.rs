//! Accessible role and name computation.
//!
//! A pragmatic subset of the ARIA role mapping and the accessible-name
//! algorithm, enough to drive role-based locators for common form controls,
//! links, headings and landmarks.

use super::{Document, NodeId};

/// Roles whose accessible name may come from their text content
const NAME_FROM_CONTENT_ROLES: &[&str] = &[
    "button",
    "cell",
    "checkbox",
    "columnheader",
    "heading",
    "link",
    "menuitem",
    "option",
    "radio",
    "rowheader",
    "switch",
    "tab",
    "tooltip",
    "treeitem",
];

/// Tags that can be associated with a `<label>`, `input` handled separately
const LABELABLE_TAGS: &[&str] = &["button", "meter", "output", "progress", "select", "textarea"];

/// Collapse whitespace runs to single spaces and trim
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn input_type(doc: &Document, id: NodeId) -> String {
    doc.attribute(id, "type")
        .map_or_else(|| "text".to_string(), str::to_ascii_lowercase)
}

fn implicit_role(doc: &Document, id: NodeId) -> Option<&'static str> {
    let tag = doc.tag_name(id)?;
    let role = match tag {
        "button" => "button",
        "a" | "area" if doc.has_attribute(id, "href") => "link",
        "input" => match input_type(doc, id).as_str() {
            "button" | "submit" | "reset" | "image" => "button",
            "checkbox" => "checkbox",
            "radio" => "radio",
            "range" => "slider",
            "number" => "spinbutton",
            "search" => "searchbox",
            "hidden" | "file" | "color" | "date" | "datetime-local" | "month" | "time"
            | "week" | "password" => return None,
            _ => "textbox",
        },
        "textarea" => "textbox",
        "select" => {
            let size = doc
                .attribute(id, "size")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .unwrap_or(0);
            if doc.has_attribute(id, "multiple") || size > 1 {
                "listbox"
            } else {
                "combobox"
            }
        }
        "option" => "option",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "ul" | "ol" => "list",
        "li" => "listitem",
        "img" if doc.attribute(id, "alt") == Some("") => "presentation",
        "img" => "img",
        "nav" => "navigation",
        "main" => "main",
        "form" => "form",
        "table" => "table",
        "tr" => "row",
        "td" => "cell",
        "th" => "columnheader",
        "dialog" => "dialog",
        "fieldset" => "group",
        "progress" => "progressbar",
        "meter" => "meter",
        "article" => "article",
        "aside" => "complementary",
        "header" => "banner",
        "footer" => "contentinfo",
        "section" => "region",
        "hr" => "separator",
        _ => return None,
    };
    Some(role)
}

/// Role of an element: the first token of an explicit `role`, else the
/// implicit role of its tag.
#[must_use]
pub fn role(doc: &Document, id: NodeId) -> Option<String> {
    if let Some(explicit) = doc
        .attribute(id, "role")
        .and_then(|r| r.split_whitespace().next())
    {
        return Some(explicit.to_string());
    }
    implicit_role(doc, id).map(str::to_string)
}

/// Whether the element or one of its ancestors is hidden from the
/// accessibility tree.
#[must_use]
pub fn is_hidden(doc: &Document, id: NodeId) -> bool {
    std::iter::once(id)
        .chain(doc.ancestors(id))
        .any(|n| hides_itself(doc, n))
}

fn hides_itself(doc: &Document, id: NodeId) -> bool {
    if doc.has_attribute(id, "hidden") || doc.attribute(id, "aria-hidden") == Some("true") {
        return true;
    }
    doc.attribute(id, "style").is_some_and(|style| {
        style.split(';').any(|decl| {
            let mut parts = decl.splitn(2, ':');
            let property = parts.next().map(str::trim);
            let value = parts.next().map(str::trim);
            property == Some("display") && value == Some("none")
        })
    })
}

/// Whether the element can be associated with a `<label>`
#[must_use]
pub fn is_labelable(doc: &Document, id: NodeId) -> bool {
    match doc.tag_name(id) {
        Some("input") => input_type(doc, id) != "hidden",
        Some(tag) => LABELABLE_TAGS.contains(&tag),
        None => false,
    }
}

/// `<label>` elements associated with a labelable element, by `for` or by
/// nesting, in document order.
#[must_use]
pub fn associated_labels(doc: &Document, id: NodeId) -> Vec<NodeId> {
    if !is_labelable(doc, id) {
        return Vec::new();
    }
    let element_id = doc.attribute(id, "id");
    let body = doc.body();
    doc.descendants(body)
        .into_iter()
        .filter(|&n| doc.tag_name(n) == Some("label"))
        .filter(|&label| match doc.attribute(label, "for") {
            Some(target) => element_id == Some(target),
            None => doc.contains(label, id) && first_labelable(doc, label) == Some(id),
        })
        .collect()
}

fn first_labelable(doc: &Document, label: NodeId) -> Option<NodeId> {
    doc.descendants(label)
        .into_iter()
        .find(|&n| is_labelable(doc, n))
}

/// Label texts for an element: `aria-labelledby` targets, `aria-label`, then
/// associated `<label>` text. Deduplicated, empty entries dropped.
#[must_use]
pub fn element_labels(doc: &Document, id: NodeId) -> Vec<String> {
    let mut labels = Vec::new();

    if let Some(labelledby) = doc.attribute(id, "aria-labelledby") {
        for label_id in labelledby.split_whitespace() {
            if let Some(label) = doc.element_by_id(label_id) {
                labels.push(doc.text_content(label));
            }
        }
    }

    if let Some(aria_label) = doc.attribute(id, "aria-label") {
        if !aria_label.trim().is_empty() {
            labels.push(aria_label.to_string());
        }
    }

    for label in associated_labels(doc, id) {
        labels.push(doc.text_content(label).trim().to_string());
    }

    let mut unique: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !label.is_empty() && !unique.contains(&label) {
            unique.push(label);
        }
    }
    unique
}

/// Accessible name, whitespace collapsed; empty when the element has none
#[must_use]
pub fn accessible_name(doc: &Document, id: NodeId) -> String {
    collapse_whitespace(&raw_accessible_name(doc, id))
}

fn raw_accessible_name(doc: &Document, id: NodeId) -> String {
    if let Some(labelledby) = doc.attribute(id, "aria-labelledby") {
        let parts: Vec<String> = labelledby
            .split_whitespace()
            .filter_map(|label_id| doc.element_by_id(label_id))
            .map(|label| doc.text_content(label))
            .collect();
        let joined = parts.join(" ");
        if !joined.trim().is_empty() {
            return joined;
        }
    }

    if let Some(label) = doc.attribute(id, "aria-label") {
        if !label.trim().is_empty() {
            return label.to_string();
        }
    }

    if doc.tag_name(id) == Some("input") {
        match input_type(doc, id).as_str() {
            "submit" => return doc.attribute(id, "value").unwrap_or("Submit").to_string(),
            "reset" => return doc.attribute(id, "value").unwrap_or("Reset").to_string(),
            "button" => {
                if let Some(value) = doc.attribute(id, "value") {
                    return value.to_string();
                }
            }
            "image" => {
                if let Some(alt) = doc.attribute(id, "alt") {
                    return alt.to_string();
                }
            }
            _ => {}
        }
    }

    let labels: Vec<String> = associated_labels(doc, id)
        .into_iter()
        .map(|label| doc.text_content(label))
        .filter(|text| !text.trim().is_empty())
        .collect();
    if !labels.is_empty() {
        return labels.join(" ");
    }

    if doc.tag_name(id) == Some("img") {
        if let Some(alt) = doc.attribute(id, "alt") {
            return alt.to_string();
        }
    }

    if role(doc, id).is_some_and(|r| NAME_FROM_CONTENT_ROLES.contains(&r.as_str())) {
        let text = doc.text_content(id);
        if !text.trim().is_empty() {
            return text;
        }
    }

    doc.attribute(id, "title").unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementBuilder;

    mod role_tests {
        use super::*;

        #[test]
        fn implicit_roles() {
            let mut doc = Document::new();
            let body = doc.body();
            let button = doc.append(body, ElementBuilder::new("button"));
            let link = doc.append(body, ElementBuilder::new("a").attr("href", "/"));
            let anchor = doc.append(body, ElementBuilder::new("a"));
            let text = doc.append(body, ElementBuilder::new("input"));
            let check = doc.append(body, ElementBuilder::new("input").attr("type", "checkbox"));
            let multi = doc.append(body, ElementBuilder::new("select").attr("multiple", ""));

            assert_eq!(role(&doc, button).as_deref(), Some("button"));
            assert_eq!(role(&doc, link).as_deref(), Some("link"));
            assert_eq!(role(&doc, anchor), None);
            assert_eq!(role(&doc, text).as_deref(), Some("textbox"));
            assert_eq!(role(&doc, check).as_deref(), Some("checkbox"));
            assert_eq!(role(&doc, multi).as_deref(), Some("listbox"));
        }

        #[test]
        fn explicit_role_wins() {
            let mut doc = Document::new();
            let div = doc.append(
                doc.body(),
                ElementBuilder::new("div").attr("role", "switch checkbox"),
            );
            assert_eq!(role(&doc, div).as_deref(), Some("switch"));
        }
    }

    mod name_tests {
        use super::*;

        #[test]
        fn button_name_from_content() {
            let mut doc = Document::new();
            let button = doc.append(doc.body(), ElementBuilder::new("button").text("  Save\n now "));
            assert_eq!(accessible_name(&doc, button), "Save now");
        }

        #[test]
        fn placeholder_is_not_a_name() {
            let mut doc = Document::new();
            let input = doc.append(
                doc.body(),
                ElementBuilder::new("input").attr("placeholder", "Name"),
            );
            assert_eq!(accessible_name(&doc, input), "");
        }

        #[test]
        fn label_for_names_input() {
            let mut doc = Document::new();
            let body = doc.body();
            doc.append(body, ElementBuilder::new("label").attr("for", "email").text("Email"));
            let input = doc.append(body, ElementBuilder::new("input").attr("id", "email"));
            assert_eq!(accessible_name(&doc, input), "Email");
            assert_eq!(element_labels(&doc, input), vec!["Email".to_string()]);
        }

        #[test]
        fn aria_labelledby_takes_precedence() {
            let mut doc = Document::new();
            let body = doc.body();
            doc.append(body, ElementBuilder::new("span").attr("id", "a").text("First"));
            doc.append(body, ElementBuilder::new("span").attr("id", "b").text("Second"));
            let button = doc.append(
                body,
                ElementBuilder::new("button")
                    .attr("aria-labelledby", "a b")
                    .attr("aria-label", "Ignored")
                    .text("Content"),
            );
            assert_eq!(accessible_name(&doc, button), "First Second");
        }

        #[test]
        fn submit_input_default_name() {
            let mut doc = Document::new();
            let input = doc.append(doc.body(), ElementBuilder::new("input").attr("type", "submit"));
            assert_eq!(accessible_name(&doc, input), "Submit");
        }
    }

    mod label_tests {
        use super::*;

        #[test]
        fn labels_are_deduplicated_and_non_empty() {
            let mut doc = Document::new();
            let body = doc.body();
            doc.append(body, ElementBuilder::new("span").attr("id", "l").text("Name"));
            doc.append(body, ElementBuilder::new("span").attr("id", "empty"));
            let label = doc.append(body, ElementBuilder::new("label").text(" Name "));
            let input = doc.append(
                label,
                ElementBuilder::new("input")
                    .attr("aria-labelledby", "l empty")
                    .attr("aria-label", "  "),
            );
            assert_eq!(element_labels(&doc, input), vec!["Name".to_string()]);
        }

        #[test]
        fn hidden_inputs_are_not_labelable() {
            let mut doc = Document::new();
            let label = doc.append(doc.body(), ElementBuilder::new("label").text("Secret"));
            let input = doc.append(label, ElementBuilder::new("input").attr("type", "hidden"));
            assert!(element_labels(&doc, input).is_empty());
        }

        #[test]
        fn nested_label_targets_first_control_only() {
            let mut doc = Document::new();
            let label = doc.append(doc.body(), ElementBuilder::new("label").text("A"));
            let first = doc.append(label, ElementBuilder::new("input"));
            let second = doc.append(label, ElementBuilder::new("input"));
            assert_eq!(associated_labels(&doc, first), vec![label]);
            assert!(associated_labels(&doc, second).is_empty());
        }
    }

    #[test]
    fn hidden_via_ancestor_style() {
        let mut doc = Document::new();
        let wrapper = doc.append(
            doc.body(),
            ElementBuilder::new("div").attr("style", "color: red; display: none"),
        );
        let button = doc.append(wrapper, ElementBuilder::new("button"));
        assert!(is_hidden(&doc, button));
        assert!(!is_hidden(&doc, doc.body()));
    }
}
