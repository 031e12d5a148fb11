//! Element capability queries.
//!
//! All element-kind sniffing (input types, disableable tags, checked state,
//! current values) lives here so the classifier and the assertion generator
//! stay declarative.

use crate::dom::{Document, NodeId};

/// Tags that support the `disabled` attribute
const DISABLEABLE_TAGS: &[&str] = &[
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

/// Roles whose checked state comes from `aria-checked`
const ARIA_CHECKED_ROLES: &[&str] = &["checkbox", "radio", "switch"];

/// Current value of a form control
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    /// Text value of inputs, textareas and single selects
    Text(String),
    /// `valueAsNumber` of a number input; `None` when empty or unparsable
    Number(Option<f64>),
    /// Selected option values of a multi-select
    Multiple(Vec<String>),
}

/// Lower-cased `type` of an `<input>`, defaulting to `text`
#[must_use]
pub fn input_type(doc: &Document, id: NodeId) -> Option<String> {
    if doc.tag_name(id) != Some("input") {
        return None;
    }
    Some(
        doc.attribute(id, "type")
            .map_or_else(|| "text".to_string(), str::to_ascii_lowercase),
    )
}

fn is_input_of(doc: &Document, id: NodeId, types: &[&str]) -> bool {
    input_type(doc, id).is_some_and(|t| types.contains(&t.as_str()))
}

/// Native checkbox or radio input
#[must_use]
pub fn is_checkbox_like(doc: &Document, id: NodeId) -> bool {
    is_input_of(doc, id, &["checkbox", "radio"])
}

/// `<input type="range">`
#[must_use]
pub fn is_range_input(doc: &Document, id: NodeId) -> bool {
    is_input_of(doc, id, &["range"])
}

/// `<input type="file">`
#[must_use]
pub fn is_file_input(doc: &Document, id: NodeId) -> bool {
    is_input_of(doc, id, &["file"])
}

/// `<input type="number">`
#[must_use]
pub fn is_number_input(doc: &Document, id: NodeId) -> bool {
    is_input_of(doc, id, &["number"])
}

/// `<select>`
#[must_use]
pub fn is_select(doc: &Document, id: NodeId) -> bool {
    doc.tag_name(id) == Some("select")
}

/// `<textarea>`
#[must_use]
pub fn is_textarea(doc: &Document, id: NodeId) -> bool {
    doc.tag_name(id) == Some("textarea")
}

/// Whether the element is editable through `contenteditable`, inherited from
/// the nearest ancestor that sets the attribute.
#[must_use]
pub fn is_content_editable(doc: &Document, id: NodeId) -> bool {
    std::iter::once(id)
        .chain(doc.ancestors(id))
        .find_map(|n| doc.attribute(n, "contenteditable"))
        .is_some_and(|value| !value.eq_ignore_ascii_case("false"))
}

/// Whether the tag supports the `disabled` attribute
#[must_use]
pub fn is_disableable(doc: &Document, id: NodeId) -> bool {
    doc.tag_name(id)
        .is_some_and(|tag| DISABLEABLE_TAGS.contains(&tag))
}

/// Disabled by its own attribute or by a disabled ancestor `<fieldset>`
#[must_use]
pub fn is_disabled(doc: &Document, id: NodeId) -> bool {
    if !is_disableable(doc, id) {
        return false;
    }
    doc.has_attribute(id, "disabled") || in_disabled_fieldset(doc, id)
}

/// Whether an ancestor `<fieldset>` carries `disabled`
#[must_use]
pub fn in_disabled_fieldset(doc: &Document, id: NodeId) -> bool {
    doc.ancestors(id)
        .any(|n| doc.tag_name(n) == Some("fieldset") && doc.has_attribute(n, "disabled"))
}

/// Explicit checkbox, radio or switch role
#[must_use]
pub fn has_aria_checked_role(doc: &Document, id: NodeId) -> bool {
    doc.attribute(id, "role")
        .and_then(|r| r.split_whitespace().next())
        .is_some_and(|r| ARIA_CHECKED_ROLES.contains(&r))
}

/// `aria-checked` state, `None` when absent or not a boolean
#[must_use]
pub fn aria_checked(doc: &Document, id: NodeId) -> Option<bool> {
    match doc.attribute(id, "aria-checked") {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Checked state of a native checkbox or radio: the live property, else the
/// `checked` attribute.
#[must_use]
pub fn is_checked(doc: &Document, id: NodeId) -> bool {
    doc.element(id)
        .and_then(|el| el.checked)
        .unwrap_or_else(|| doc.has_attribute(id, "checked"))
}

/// Inputs other than checkbox/radio, selects and textareas
#[must_use]
pub fn is_value_bearing(doc: &Document, id: NodeId) -> bool {
    match doc.tag_name(id) {
        Some("input") => !is_checkbox_like(doc, id),
        Some("select" | "textarea") => true,
        _ => false,
    }
}

/// Text value: the live property, else the `value` attribute, else empty
#[must_use]
pub fn text_value(doc: &Document, id: NodeId) -> String {
    if is_select(doc, id) {
        return selected_values(doc, id).into_iter().next().unwrap_or_default();
    }
    if is_textarea(doc, id) {
        if let Some(value) = doc.element(id).and_then(|el| el.value.clone()) {
            return value;
        }
        return doc.text_content(id);
    }
    doc.element(id)
        .and_then(|el| el.value.clone())
        .or_else(|| doc.attribute(id, "value").map(str::to_string))
        .unwrap_or_default()
}

/// Value reported by an `input` event: `innerText` for content-editable
/// elements, the control value otherwise.
#[must_use]
pub fn input_value(doc: &Document, id: NodeId) -> String {
    if !is_value_bearing(doc, id) && is_content_editable(doc, id) {
        doc.text_content(id)
    } else {
        text_value(doc, id)
    }
}

fn option_value(doc: &Document, option: NodeId) -> String {
    doc.attribute(option, "value")
        .map_or_else(|| doc.text_content(option).trim().to_string(), str::to_string)
}

fn is_option_selected(doc: &Document, option: NodeId) -> bool {
    doc.element(option)
        .and_then(|el| el.selected)
        .unwrap_or_else(|| doc.has_attribute(option, "selected"))
}

/// Values of the selected options of a `<select>`, in document order.
///
/// A single select with nothing explicitly selected reports its first option.
#[must_use]
pub fn selected_values(doc: &Document, id: NodeId) -> Vec<String> {
    let options: Vec<NodeId> = doc
        .descendants(id)
        .into_iter()
        .filter(|&n| doc.tag_name(n) == Some("option"))
        .collect();

    let selected: Vec<String> = options
        .iter()
        .filter(|&&o| is_option_selected(doc, o))
        .map(|&o| option_value(doc, o))
        .collect();

    if selected.is_empty() && !doc.has_attribute(id, "multiple") {
        return options.first().map(|&o| option_value(doc, o)).into_iter().collect();
    }
    selected
}

/// Names of the files chosen in a file input
#[must_use]
pub fn file_names(doc: &Document, id: NodeId) -> Vec<String> {
    doc.element(id).map(|el| el.files.clone()).unwrap_or_default()
}

/// Current value of a value-bearing control
#[must_use]
pub fn current_value(doc: &Document, id: NodeId) -> Option<ElementValue> {
    if !is_value_bearing(doc, id) {
        return None;
    }
    if is_select(doc, id) && doc.has_attribute(id, "multiple") {
        return Some(ElementValue::Multiple(selected_values(doc, id)));
    }
    if is_number_input(doc, id) {
        let parsed = text_value(doc, id)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite());
        return Some(ElementValue::Number(parsed));
    }
    Some(ElementValue::Text(text_value(doc, id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementBuilder;

    mod kind_tests {
        use super::*;

        #[test]
        fn input_kinds() {
            let mut doc = Document::new();
            let body = doc.body();
            let text = doc.append(body, ElementBuilder::new("input"));
            let radio = doc.append(body, ElementBuilder::new("input").attr("type", "RADIO"));
            let range = doc.append(body, ElementBuilder::new("input").attr("type", "range"));
            let div = doc.append(body, ElementBuilder::new("div"));

            assert_eq!(input_type(&doc, text).as_deref(), Some("text"));
            assert!(is_checkbox_like(&doc, radio));
            assert!(is_range_input(&doc, range));
            assert_eq!(input_type(&doc, div), None);
            assert!(is_value_bearing(&doc, text));
            assert!(!is_value_bearing(&doc, radio));
        }

        #[test]
        fn content_editable_is_inherited() {
            let mut doc = Document::new();
            let editor = doc.append(
                doc.body(),
                ElementBuilder::new("div").attr("contenteditable", "true"),
            );
            let inner = doc.append(editor, ElementBuilder::new("p"));
            let off = doc.append(editor, ElementBuilder::new("p").attr("contenteditable", "false"));
            assert!(is_content_editable(&doc, inner));
            assert!(!is_content_editable(&doc, off));
            assert!(!is_content_editable(&doc, doc.body()));
        }
    }

    mod state_tests {
        use super::*;

        #[test]
        fn disabled_fieldset_disables_descendants() {
            let mut doc = Document::new();
            let fieldset = doc.append(doc.body(), ElementBuilder::new("fieldset").attr("disabled", ""));
            let input = doc.append(fieldset, ElementBuilder::new("input"));
            let span = doc.append(fieldset, ElementBuilder::new("span"));
            assert!(is_disabled(&doc, input));
            assert!(!is_disabled(&doc, span));
        }

        #[test]
        fn checked_prefers_live_property() {
            let mut doc = Document::new();
            let check = doc.append(
                doc.body(),
                ElementBuilder::new("input")
                    .attr("type", "checkbox")
                    .attr("checked", "")
                    .checked(false),
            );
            assert!(!is_checked(&doc, check));
        }

        #[test]
        fn aria_checked_roles() {
            let mut doc = Document::new();
            let switch = doc.append(
                doc.body(),
                ElementBuilder::new("div")
                    .attr("role", "switch")
                    .attr("aria-checked", "true"),
            );
            assert!(has_aria_checked_role(&doc, switch));
            assert_eq!(aria_checked(&doc, switch), Some(true));
        }
    }

    mod value_tests {
        use super::*;

        #[test]
        fn number_input_value() {
            let mut doc = Document::new();
            let body = doc.body();
            let set = doc.append(body, ElementBuilder::new("input").attr("type", "number").value("4.5"));
            let empty = doc.append(body, ElementBuilder::new("input").attr("type", "number"));
            assert_eq!(current_value(&doc, set), Some(ElementValue::Number(Some(4.5))));
            assert_eq!(current_value(&doc, empty), Some(ElementValue::Number(None)));
        }

        #[test]
        fn multi_select_values() {
            let mut doc = Document::new();
            let select = doc.append(doc.body(), ElementBuilder::new("select").attr("multiple", ""));
            doc.append(select, ElementBuilder::new("option").attr("value", "a").selected(true));
            doc.append(select, ElementBuilder::new("option").attr("value", "b"));
            doc.append(select, ElementBuilder::new("option").text("C").selected(true));
            assert_eq!(
                current_value(&doc, select),
                Some(ElementValue::Multiple(vec!["a".to_string(), "C".to_string()]))
            );
        }

        #[test]
        fn single_select_defaults_to_first_option() {
            let mut doc = Document::new();
            let select = doc.append(doc.body(), ElementBuilder::new("select"));
            doc.append(select, ElementBuilder::new("option").attr("value", "x"));
            doc.append(select, ElementBuilder::new("option").attr("value", "y"));
            assert_eq!(selected_values(&doc, select), vec!["x".to_string()]);
            assert_eq!(current_value(&doc, select), Some(ElementValue::Text("x".to_string())));
        }

        #[test]
        fn content_editable_input_value_is_text() {
            let mut doc = Document::new();
            let editor = doc.append(
                doc.body(),
                ElementBuilder::new("div").attr("contenteditable", "").text("Hello"),
            );
            assert_eq!(input_value(&doc, editor), "Hello");
        }
    }
}
