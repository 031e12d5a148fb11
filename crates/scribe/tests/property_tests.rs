//! Property-based tests for scribe.
//!
//! Uses proptest to verify invariants hold for arbitrary inputs.

#![allow(clippy::unwrap_used)]

use futures::executor::block_on;
use proptest::prelude::*;
use scribe::dom::{Document, ElementBuilder};
use scribe::locator::QueryFamily;
use scribe::{
    quote_string, reduce, story_export_name, InteractionEvent, InteractionLog, Locator,
    LocatorSynthesizer, LogEntry, Query,
};

/// Evaluate a single-quoted or template string literal the way a JavaScript
/// engine would, for the escapes `quote_string` produces.
fn eval_js_string(literal: &str) -> Option<String> {
    let quote = literal.chars().next()?;
    if !matches!(quote, '\'' | '`') || !literal.ends_with(quote) || literal.len() < 2 {
        return None;
    }
    let inner = &literal[1..literal.len() - 1];

    let mut out = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            '\n' if quote == '\'' => return None,
            c if c == quote => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

fn click(name: &str) -> LogEntry {
    LogEntry::new(
        Locator::single(Query::role_named("button", name)),
        InteractionEvent::Click,
    )
}

fn typed(value: &str) -> LogEntry {
    LogEntry::new(
        Locator::single(Query::role_named("textbox", "Name")),
        InteractionEvent::Type {
            value: value.to_string(),
        },
    )
}

// === Formatter Property Tests ===

proptest! {
    /// Quoted strings evaluate back to the original value.
    #[test]
    fn prop_quote_round_trips(value in "[a-zA-Z0-9 .'`\\\\\n\t\"]{0,40}") {
        let literal = quote_string(&value);
        prop_assert_eq!(eval_js_string(&literal), Some(value));
    }

    /// Only strings with a newline use template literals.
    #[test]
    fn prop_template_only_for_multiline(value in "[a-z'\n]{0,20}") {
        let literal = quote_string(&value);
        prop_assert_eq!(literal.starts_with('`'), value.contains('\n'));
    }
}

// === Reducer Property Tests ===

proptest! {
    /// A double click removes at most two clicks and is always appended last.
    #[test]
    fn prop_double_click_absorbs_two(clicks in 0usize..6, others in 0usize..3) {
        let mut entries: Vec<LogEntry> = (0..clicks).map(|i| click(&i.to_string())).collect();
        entries.extend((0..others).map(|i| LogEntry::new(
            Locator::single(Query::test_id(i.to_string())),
            InteractionEvent::KeyDown { key: scribe::Key::Enter },
        )));
        let log: InteractionLog = entries.into_iter().collect();

        let next = reduce(&log, LogEntry::new(
            Locator::single(Query::role("button")),
            InteractionEvent::DoubleClick,
        ));

        prop_assert_eq!(next.len(), log.len() - clicks.min(2) + 1);
        prop_assert_eq!(&next.entries()[next.len() - 1].event, &InteractionEvent::DoubleClick);
    }

    /// Successive types on one field leave a single entry holding the last value.
    #[test]
    fn prop_typing_coalesces(values in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let log: InteractionLog = values.iter().map(|v| typed(v)).collect();
        prop_assert_eq!(log.len(), 1);
        prop_assert_eq!(
            &log.entries()[0].event,
            &InteractionEvent::Type { value: values[values.len() - 1].clone() }
        );
    }
}

// === Locator Property Tests ===

proptest! {
    /// The n-th of several identical buttons is located by index n.
    #[test]
    fn prop_index_matches_position(count in 2usize..6, pick in 0usize..6) {
        let pick = pick % count;
        let mut doc = Document::new();
        let root = doc.append(doc.body(), ElementBuilder::new("div"));
        let buttons: Vec<_> = (0..count)
            .map(|_| doc.append(root, ElementBuilder::new("button")))
            .collect();

        let locator = block_on(LocatorSynthesizer::default().synthesize(&doc, root, buttons[pick]))
            .unwrap()
            .unwrap();

        prop_assert_eq!(locator.index, Some(pick));
        prop_assert_eq!(locator.method_name(QueryFamily::Find), "findAllByRole");
    }

    /// Labelled buttons resolve to a unique named role query.
    #[test]
    fn prop_named_role_wins(name in "[A-Z][a-z]{2,10}") {
        let mut doc = Document::new();
        let root = doc.append(doc.body(), ElementBuilder::new("div"));
        let button = doc.append(
            root,
            ElementBuilder::new("button").attr("data-testid", "x").text(name.clone()),
        );

        let locator = block_on(LocatorSynthesizer::default().synthesize(&doc, root, button))
            .unwrap()
            .unwrap();

        prop_assert_eq!(locator, Locator::single(Query::role_named("button", name)));
    }
}

// === Naming Property Tests ===

proptest! {
    /// Export names keep only letters, digits and trailing separators.
    #[test]
    fn prop_export_name_is_camel_cased(name in "[ -~]{0,30}") {
        let export = story_export_name(&name);
        let separator = |c: char| matches!(c, '-' | '_' | ' ');
        prop_assert!(export.chars().all(|c| c.is_ascii_alphanumeric() || separator(c)), "{}", export);
        let chars: Vec<char> = export.chars().collect();
        prop_assert!(
            chars.windows(2).all(|w| !(separator(w[0]) && w[1].is_ascii_alphanumeric())),
            "{}",
            export
        );
    }
}
