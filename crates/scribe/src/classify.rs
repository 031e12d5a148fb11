//! Raw DOM event classification.
//!
//! Maps a listened-to DOM event onto an [`InteractionEvent`], or discards it.
//! Event types outside the whitelist never get this far: they are rejected
//! when the [`RawEventKind`] is parsed.

use crate::dom::{Document, NodeId};
use crate::element;
use crate::event::{InteractionEvent, Key, RawEvent, RawEventKind};

/// Classify a raw event against the current document state
#[must_use]
pub fn classify(doc: &Document, event: &RawEvent) -> Option<InteractionEvent> {
    match event.kind {
        RawEventKind::PointerDown => Some(InteractionEvent::Click),
        RawEventKind::DblClick => Some(InteractionEvent::DoubleClick),
        RawEventKind::Input => classify_input(doc, event.target),
        RawEventKind::KeyDown => classify_key_down(doc, event.target, event.key.as_deref()?),
        RawEventKind::KeyUp => classify_key_up(event.key.as_deref()?),
        RawEventKind::Focus => Some(InteractionEvent::Focus { shift: false }),
    }
}

fn classify_input(doc: &Document, target: NodeId) -> Option<InteractionEvent> {
    if element::is_file_input(doc, target) {
        return Some(InteractionEvent::Upload {
            files: element::file_names(doc, target),
        });
    }

    if element::is_range_input(doc, target) {
        return Some(InteractionEvent::Type {
            value: element::text_value(doc, target),
        });
    }

    let text_like = matches!(doc.tag_name(target), Some("input" | "textarea"))
        || element::is_content_editable(doc, target);
    if text_like {
        // Checkbox and radio changes are recorded from the click
        if element::is_checkbox_like(doc, target) {
            return None;
        }
        return Some(InteractionEvent::Type {
            value: element::input_value(doc, target),
        });
    }

    if element::is_select(doc, target) {
        return Some(InteractionEvent::Select {
            options: element::selected_values(doc, target),
        });
    }

    None
}

fn classify_key_down(doc: &Document, target: NodeId, key: &str) -> Option<InteractionEvent> {
    match key {
        "Tab" => Some(InteractionEvent::KeyDown { key: Key::Tab }),
        "Shift" => Some(InteractionEvent::KeyDown { key: Key::Shift }),
        "Enter"
            if element::is_textarea(doc, target) || element::is_content_editable(doc, target) =>
        {
            None
        }
        " " if element::is_checkbox_like(doc, target) => Some(InteractionEvent::Click),
        "Enter" => Some(InteractionEvent::KeyDown { key: Key::Enter }),
        "Escape" => Some(InteractionEvent::KeyDown { key: Key::Escape }),
        _ => None,
    }
}

fn classify_key_up(key: &str) -> Option<InteractionEvent> {
    (key == "Shift").then_some(InteractionEvent::KeyUp { key: Key::Shift })
}
