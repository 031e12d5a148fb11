//! Interaction merge rules.
//!
//! Real sessions produce several DOM events per logical gesture: typing fires
//! one `input` per keystroke, a double click fires two pointer-downs first,
//! tabbing fires a key-down followed by a focus. Each rule below folds the new
//! entry into the log so that one entry maps to one generated statement.
//!
//! Every rule is a backward scan with its own stop condition:
//!
//! | New event        | Rule                 |
//! |------------------|----------------------|
//! | double click     | [`absorb_clicks`]    |
//! | type             | [`coalesce_type`]    |
//! | key-up           | [`cancel_shift`]     |
//! | focus            | [`fuse_focus`]       |
//! | anything else    | append               |

use tracing::trace;

use crate::event::{InteractionEvent, InteractionLog, Key, LogEntry};

/// Clicks removed by one double click
const CLICKS_PER_DOUBLE_CLICK: usize = 2;

/// Fold `entry` into a copy of `log`
#[must_use]
pub fn reduce(log: &InteractionLog, entry: LogEntry) -> InteractionLog {
    let mut next = log.clone();
    next.record(entry);
    next
}

pub(crate) fn apply(entries: &mut Vec<LogEntry>, entry: LogEntry) {
    match entry.event {
        InteractionEvent::DoubleClick => absorb_clicks(entries, entry),
        InteractionEvent::Type { .. } => coalesce_type(entries, entry),
        InteractionEvent::KeyUp { .. } => cancel_shift(entries),
        InteractionEvent::Focus { .. } => fuse_focus(entries, entry),
        _ => entries.push(entry),
    }
}

/// Remove up to two of the most recent clicks, wherever they are, then append
/// the double click.
pub fn absorb_clicks(entries: &mut Vec<LogEntry>, entry: LogEntry) {
    let mut removed = 0;
    let mut i = entries.len();
    while i > 0 && removed < CLICKS_PER_DOUBLE_CLICK {
        i -= 1;
        if entries[i].event == InteractionEvent::Click {
            entries.remove(i);
            removed += 1;
        }
    }
    trace!(removed, "double click absorbed clicks");
    entries.push(entry);
}

/// Replace the value of an earlier `type` on the same locator.
///
/// The scan skips `type` entries on other locators and shift key-downs; it
/// stops at the first other entry and appends.
pub fn coalesce_type(entries: &mut Vec<LogEntry>, entry: LogEntry) {
    let InteractionEvent::Type { value } = &entry.event else {
        entries.push(entry);
        return;
    };

    for previous in entries.iter_mut().rev() {
        match &mut previous.event {
            InteractionEvent::Type { value: old } => {
                if previous.locator.same_target(&entry.locator) {
                    trace!("coalesced type");
                    old.clone_from(value);
                    return;
                }
            }
            InteractionEvent::KeyDown { key: Key::Shift } => {}
            _ => break,
        }
    }
    entries.push(entry);
}

/// Remove the nearest shift key-down. The key-up itself is never recorded.
pub fn cancel_shift(entries: &mut Vec<LogEntry>) {
    if let Some(i) = entries
        .iter()
        .rposition(|e| e.event.is_key_down(Key::Shift))
    {
        trace!(index = i, "shift press cancelled");
        entries.remove(i);
    }
}

/// Fuse a focus with a tab key-down pressed since the latest shift key-down.
///
/// The scan runs back from the end and stops at the first shift key-down,
/// which marks the focus as shifted. Tabs pressed before that shift belong to
/// an earlier gesture and are never fused. Without a tab key-down the focus is
/// dropped: it is a side effect of an interaction that is already recorded.
pub fn fuse_focus(entries: &mut Vec<LogEntry>, entry: LogEntry) {
    let mut tab = None;
    let mut shift = false;
    for (i, previous) in entries.iter().enumerate().rev() {
        if previous.event.is_key_down(Key::Tab) {
            tab = Some(i);
        }
        if previous.event.is_key_down(Key::Shift) {
            shift = true;
            break;
        }
    }

    let Some(tab) = tab else {
        trace!(shift, "focus without tab dropped");
        return;
    };

    entries.remove(tab);
    entries.push(LogEntry::new(
        entry.locator,
        InteractionEvent::Focus { shift },
    ));
}
