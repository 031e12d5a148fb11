//! Semantic interaction events and the interaction log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::assertion::AssertionKind;
use crate::dom::NodeId;
use crate::format::Literal;
use crate::locator::Locator;
use crate::result::{RecorderError, RecorderResult};

/// Keys that survive classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    /// Enter, emitted as `{enter}`
    Enter,
    /// Escape, emitted as `{esc}`
    Escape,
    /// Tab; folded into focus events by the reducer
    Tab,
    /// Shift; only tracked to detect reverse tabbing
    Shift,
}

impl Key {
    /// Token passed to `userEvent.keyboard`, or the bare key name
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Enter => "{enter}",
            Self::Escape => "{esc}",
            Self::Tab => "tab",
            Self::Shift => "shift",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Intent-level user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InteractionEvent {
    /// Single click
    Click,
    /// Double click
    DoubleClick,
    /// Text entry; the value is the full current value, not a delta
    Type {
        /// Current value
        value: String,
    },
    /// Key press
    KeyDown {
        /// Pressed key
        key: Key,
    },
    /// Key release
    KeyUp {
        /// Released key
        key: Key,
    },
    /// Option selection
    Select {
        /// Selected option values, in order
        options: Vec<String>,
    },
    /// File upload
    Upload {
        /// Chosen file names, in order
        files: Vec<String>,
    },
    /// Focus moved by (shift-)tab
    Focus {
        /// Whether shift was held
        shift: bool,
    },
    /// Expectation about the element's state
    Assertion {
        /// Assertion method
        kind: AssertionKind,
        /// Arguments passed to the assertion
        #[serde(default)]
        args: Vec<Literal>,
    },
}

impl InteractionEvent {
    /// `KeyDown` of the given key
    #[must_use]
    pub fn is_key_down(&self, key: Key) -> bool {
        matches!(self, Self::KeyDown { key: k } if *k == key)
    }

    /// Short name of the variant, for logs
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DoubleClick => "dblclick",
            Self::Type { .. } => "type",
            Self::KeyDown { .. } => "keydown",
            Self::KeyUp { .. } => "keyup",
            Self::Select { .. } => "select",
            Self::Upload { .. } => "upload",
            Self::Focus { .. } => "focus",
            Self::Assertion { .. } => "assertion",
        }
    }
}

/// One recorded step: where and what
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Target of the interaction
    pub locator: Locator,
    /// The interaction
    pub event: InteractionEvent,
}

impl LogEntry {
    /// Create an entry
    #[must_use]
    pub const fn new(locator: Locator, event: InteractionEvent) -> Self {
        Self { locator, event }
    }
}

/// Ordered recording, changed only through the reducer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionLog {
    entries: Vec<LogEntry>,
}

impl InteractionLog {
    /// Empty log
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries in execution order
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold an entry into the log using the merge rules
    pub fn record(&mut self, entry: LogEntry) {
        crate::reducer::apply(&mut self.entries, entry);
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over entries
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a InteractionLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<LogEntry> for InteractionLog {
    /// Folds every entry through the merge rules, in order
    fn from_iter<I: IntoIterator<Item = LogEntry>>(iter: I) -> Self {
        let mut log = Self::new();
        for entry in iter {
            log.record(entry);
        }
        log
    }
}

/// DOM event types the recorder listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawEventKind {
    /// `pointerdown`
    PointerDown,
    /// `dblclick`
    DblClick,
    /// `keydown`
    KeyDown,
    /// `keyup`
    KeyUp,
    /// `input`
    Input,
    /// `focus`
    Focus,
}

impl RawEventKind {
    /// All listened-to event types
    pub const ALL: [Self; 6] = [
        Self::PointerDown,
        Self::DblClick,
        Self::KeyDown,
        Self::KeyUp,
        Self::Input,
        Self::Focus,
    ];

    /// DOM event type string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::DblClick => "dblclick",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Input => "input",
            Self::Focus => "focus",
        }
    }
}

impl FromStr for RawEventKind {
    type Err = RecorderError;

    fn from_str(s: &str) -> RecorderResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RecorderError::unrecognized_event(s))
    }
}

impl fmt::Display for RawEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Low-level DOM event as delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Event type
    pub kind: RawEventKind,
    /// Event target
    pub target: NodeId,
    /// `KeyboardEvent.key` for key events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl RawEvent {
    /// Create a non-keyboard event
    #[must_use]
    pub const fn new(kind: RawEventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            key: None,
        }
    }

    /// Create a keyboard event
    #[must_use]
    pub fn key(kind: RawEventKind, target: NodeId, key: impl Into<String>) -> Self {
        Self {
            kind,
            target,
            key: Some(key.into()),
        }
    }

    /// Parse the type string, rejecting events outside the whitelist
    pub fn parse(event_type: &str, target: NodeId, key: Option<String>) -> RecorderResult<Self> {
        Ok(Self {
            kind: event_type.parse()?,
            target,
            key,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::locator::Query;

    #[test]
    fn key_tokens() {
        assert_eq!(Key::Enter.token(), "{enter}");
        assert_eq!(Key::Escape.token(), "{esc}");
    }

    #[test]
    fn raw_event_kinds_parse_whitelist_only() {
        for kind in RawEventKind::ALL {
            assert_eq!(kind.as_str().parse::<RawEventKind>().unwrap(), kind);
        }
        let err = "mousemove".parse::<RawEventKind>().unwrap_err();
        assert!(matches!(err, RecorderError::UnrecognizedEvent { .. }));
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&InteractionEvent::Type {
            value: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"type","value":"abc"}"#);

        let json = serde_json::to_string(&InteractionEvent::KeyDown { key: Key::Enter }).unwrap();
        assert_eq!(json, r#"{"type":"keyDown","key":"enter"}"#);
    }

    #[test]
    fn log_deserializes_from_entry_array() {
        let json = r#"[
            {"locator": {"scope": "canvas", "query": {"strategy": "role", "role": "button"}},
             "event": {"type": "click"}}
        ]"#;
        let log: InteractionLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].locator, Locator::single(Query::role("button")));
        assert_eq!(log.entries()[0].event, InteractionEvent::Click);
    }

    #[test]
    fn is_key_down_matches_key() {
        let event = InteractionEvent::KeyDown { key: Key::Tab };
        assert!(event.is_key_down(Key::Tab));
        assert!(!event.is_key_down(Key::Shift));
        assert!(!InteractionEvent::Click.is_key_down(Key::Tab));
    }
}
