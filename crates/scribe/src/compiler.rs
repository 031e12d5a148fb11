//! Interaction log to test code.
//!
//! Compilation is one statement pass shared by both dialects, followed by a
//! framer:
//!
//! - [`compile_statements`] renders every entry into neutral, unindented
//!   [`CodeLine`]s and records which helpers the lines use
//! - [`frame_play`] wraps them in a `play` function with a scope preamble
//! - [`frame_test`] exposes the helpers as test fixture parameters instead
//!
//! Both dialects therefore contain the same action lines in the same order.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::event::{InteractionEvent, InteractionLog, Key, LogEntry};
use crate::format::{format_arguments, quote_string};
use crate::locator::{Locator, Query, QueryFamily, Scope};

/// Module the play dialect imports helpers from
pub const PLAY_IMPORT_SOURCE: &str = "@storybook/test";

/// Module the test dialect imports helpers from
pub const TEST_IMPORT_SOURCE: &str = "storybook/test";

const TYPED_CAST: &str = " as HTMLElement";

/// Output framing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `play: async ({ canvasElement }) => { ... }`
    #[default]
    Play,
    /// `Story.test('name', async ({ canvas, userEvent }) => { ... })`
    Test,
}

/// Compilation options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Output framing
    pub dialect: Dialect,
    /// Emit TypeScript casts for loosely typed body queries
    pub typed: bool,
}

impl CompileOptions {
    /// Options for the given dialect, untyped
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            typed: false,
        }
    }

    /// Set typed output
    #[must_use]
    pub const fn with_typed(mut self, typed: bool) -> Self {
        self.typed = typed;
        self
    }
}

/// Fragile-locator classification attached to a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Warning {
    /// Role query without an accessible name
    RoleWithoutName,
    /// Structural CSS selector
    QuerySelector,
    /// Test-id query
    TestId,
}

impl Warning {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoleWithoutName => "ROLE_WITHOUT_NAME",
            Self::QuerySelector => "QUERY_SELECTOR",
            Self::TestId => "TEST_ID",
        }
    }

    /// Explanation shown next to the flagged line
    #[must_use]
    pub const fn explanation(self) -> &'static str {
        match self {
            Self::RoleWithoutName => {
                "This element has a role but no accessible name. Give it an aria-label or visible label so the query can find it by name."
            }
            Self::QuerySelector => {
                "No accessible query matched this element, so a CSS selector is used. CSS selectors break easily when markup changes; prefer adding a role, label or text."
            }
            Self::TestId => {
                "This element is found by its test id. Test ids are invisible to users; prefer a query based on role, label or text."
            }
        }
    }

    /// Warning for a locator: CSS first, then role without name, then test id
    #[must_use]
    pub fn for_locator(locator: &Locator) -> Option<Self> {
        match &locator.query {
            Query::Css { .. } => Some(Self::QuerySelector),
            Query::Role { name: None, .. } => Some(Self::RoleWithoutName),
            Query::TestId { .. } => Some(Self::TestId),
            _ => None,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLine {
    /// Source text
    pub text: String,
    /// Fragile-locator warning, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<Warning>,
}

impl CodeLine {
    /// Line without warning
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            warning: None,
        }
    }

    /// Line with an optional warning
    #[must_use]
    pub fn with_warning(text: impl Into<String>, warning: Option<Warning>) -> Self {
        Self {
            text: text.into(),
            warning,
        }
    }

    fn indented(&self) -> Self {
        Self::with_warning(format!("\t{}", self.text), self.warning)
    }
}

/// Compiled output, rebuilt on every compile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dialect", rename_all = "camelCase")]
pub enum GeneratedCode {
    /// Play function bundle
    Play {
        /// Import lines
        imports: Vec<CodeLine>,
        /// `play` property lines, wrapper included
        play: Vec<CodeLine>,
    },
    /// Test fixture bundle
    Test {
        /// Import lines
        imports: Vec<CodeLine>,
        /// Fixture parameter names
        parameters: Vec<String>,
        /// Test body lines, no wrapper
        tests: Vec<CodeLine>,
    },
}

impl GeneratedCode {
    /// Empty bundle of the given dialect
    #[must_use]
    pub const fn empty(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Play => Self::Play {
                imports: Vec::new(),
                play: Vec::new(),
            },
            Dialect::Test => Self::Test {
                imports: Vec::new(),
                parameters: Vec::new(),
                tests: Vec::new(),
            },
        }
    }

    /// Dialect of this bundle
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        match self {
            Self::Play { .. } => Dialect::Play,
            Self::Test { .. } => Dialect::Test,
        }
    }

    /// Import lines
    #[must_use]
    pub fn imports(&self) -> &[CodeLine] {
        match self {
            Self::Play { imports, .. } | Self::Test { imports, .. } => imports,
        }
    }

    /// Body lines (`play` or `tests`)
    #[must_use]
    pub fn body(&self) -> &[CodeLine] {
        match self {
            Self::Play { play, .. } => play,
            Self::Test { tests, .. } => tests,
        }
    }

    /// Whether nothing was generated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imports().is_empty() && self.body().is_empty()
    }

    /// Every warning in the body, in line order
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        self.body().iter().filter_map(|line| line.warning).collect()
    }
}

/// Helpers referenced by compiled statements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    /// A query ran against the document body
    pub body: bool,
    /// A query ran against the canvas
    pub canvas: bool,
    /// `userEvent` was called
    pub user_event: bool,
    /// `waitFor` / `expect` were used, for assertions or body guards
    pub expect: bool,
    /// At least one assertion was compiled
    pub assertions: bool,
}

/// Output of the shared statement pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statements {
    /// Unindented statement lines
    pub lines: Vec<CodeLine>,
    /// Helpers the lines reference
    pub usage: Usage,
}

struct RenderedQuery {
    /// Expression passed to an action
    action: String,
    /// Presence guard for body queries
    guard: Option<String>,
    warning: Option<Warning>,
}

fn query_call(locator: &Locator, family: QueryFamily) -> String {
    format!(
        "{}.{}({})",
        locator.scope,
        locator.method_name(family),
        locator.formatted_arguments()
    )
}

fn with_index(expression: String, index: Option<usize>) -> String {
    match index {
        Some(i) => format!("({expression})[{i}]"),
        None => expression,
    }
}

/// Expression a generated statement uses to reach the located element.
///
/// Canvas queries are awaited `find*` calls; body queries are synchronous
/// `querySelector` calls. Indexed locators subscript the find-all result.
#[must_use]
pub fn locator_expression(locator: &Locator) -> String {
    let call = query_call(locator, QueryFamily::Find);
    let call = match locator.scope {
        Scope::Canvas => format!("await {call}"),
        Scope::Body => call,
    };
    with_index(call, locator.index)
}

fn render_query(locator: &Locator, typed: bool) -> RenderedQuery {
    let expression = locator_expression(locator);
    let warning = Warning::for_locator(locator);

    match locator.scope {
        Scope::Canvas => RenderedQuery {
            action: expression,
            guard: None,
            warning,
        },
        Scope::Body => {
            let cast = if typed { TYPED_CAST } else { "" };
            RenderedQuery {
                action: format!("{expression}{cast}"),
                guard: Some(format!(
                    "await waitFor(() => expect({expression}).toBeInTheDocument());"
                )),
                warning,
            }
        }
    }
}

/// Query expression for assertions: synchronous `query*` variant, no cast
fn render_assertion_query(locator: &Locator) -> String {
    with_index(query_call(locator, QueryFamily::Query), locator.index)
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| quote_string(item))
        .collect::<Vec<_>>()
        .join(", ")
}

fn file_list(files: &[String]) -> String {
    files
        .iter()
        .map(|file| {
            let name = quote_string(file);
            format!("new File([{name}], {name})")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn mark_scope(usage: &mut Usage, scope: Scope) {
    match scope {
        Scope::Body => usage.body = true,
        Scope::Canvas => usage.canvas = true,
    }
}

fn compile_entry(entry: &LogEntry, typed: bool, out: &mut Statements) {
    let LogEntry { locator, event } = entry;

    let (method, arguments) = match event {
        InteractionEvent::KeyUp { .. }
        | InteractionEvent::KeyDown {
            key: Key::Tab | Key::Shift,
        } => return,
        InteractionEvent::KeyDown { key } => {
            out.usage.user_event = true;
            out.lines.push(CodeLine::new(format!(
                "await userEvent.keyboard({});",
                quote_string(key.token())
            )));
            return;
        }
        InteractionEvent::Focus { shift } => {
            out.usage.user_event = true;
            let options = if *shift { "{ shift: true }" } else { "" };
            out.lines
                .push(CodeLine::new(format!("await userEvent.tab({options});")));
            return;
        }
        InteractionEvent::Assertion { kind, args } => {
            out.usage.expect = true;
            out.usage.assertions = true;
            mark_scope(&mut out.usage, locator.scope);
            out.lines.push(CodeLine::with_warning(
                format!(
                    "await waitFor(() => expect({}).{}({}))",
                    render_assertion_query(locator),
                    kind.method(),
                    format_arguments(args)
                ),
                Warning::for_locator(locator),
            ));
            return;
        }
        InteractionEvent::Click => ("click", None),
        InteractionEvent::DoubleClick => ("dblClick", None),
        InteractionEvent::Type { value } if value.is_empty() => ("clear", None),
        InteractionEvent::Type { value } => ("type", Some(quote_string(value))),
        InteractionEvent::Select { options } => {
            ("selectOptions", Some(format!("[{}]", quoted_list(options))))
        }
        InteractionEvent::Upload { files } => ("upload", Some(format!("[{}]", file_list(files)))),
    };

    let query = render_query(locator, typed);
    mark_scope(&mut out.usage, locator.scope);
    out.usage.user_event = true;

    if let Some(guard) = query.guard {
        out.usage.expect = true;
        out.lines.push(CodeLine::with_warning(guard, query.warning));
    }

    let arguments = match arguments {
        Some(extra) => format!("{}, {extra}", query.action),
        None => query.action,
    };
    out.lines.push(CodeLine::with_warning(
        format!("await userEvent.{method}({arguments});"),
        query.warning,
    ));
}

/// Render every entry into unindented statements, tracking helper usage.
///
/// Key-ups and tab/shift key-downs are skipped.
#[must_use]
pub fn compile_statements(log: &InteractionLog, typed: bool) -> Statements {
    let mut out = Statements::default();
    for entry in log {
        compile_entry(entry, typed, &mut out);
    }
    out
}

/// Wrap statements in a `play` function
#[must_use]
pub fn frame_play(statements: &Statements) -> GeneratedCode {
    if statements.lines.is_empty() {
        return GeneratedCode::empty(Dialect::Play);
    }
    let usage = statements.usage;

    let mut names = vec!["userEvent"];
    if usage.canvas {
        names.push("within");
    }
    if usage.expect {
        names.extend(["waitFor", "expect"]);
    }
    let imports = vec![CodeLine::new(format!(
        "import {{ {} }} from '{PLAY_IMPORT_SOURCE}';",
        names.join(", ")
    ))];

    let mut play = vec![CodeLine::new("play: async ({ canvasElement }) => {")];
    if usage.body {
        play.push(CodeLine::new("\tconst body = canvasElement.ownerDocument.body;"));
    }
    if usage.canvas {
        let root = if usage.body {
            "body"
        } else {
            "canvasElement.ownerDocument.body"
        };
        play.push(CodeLine::new(format!("\tconst canvas = within({root});")));
    }
    play.extend(statements.lines.iter().map(CodeLine::indented));
    play.push(CodeLine::new("}"));

    GeneratedCode::Play { imports, play }
}

/// Expose helpers as fixture parameters; no wrapper, no indentation
#[must_use]
pub fn frame_test(statements: &Statements) -> GeneratedCode {
    if statements.lines.is_empty() {
        return GeneratedCode::empty(Dialect::Test);
    }
    let usage = statements.usage;

    let imports = if usage.assertions {
        vec![CodeLine::new(format!(
            "import {{ waitFor, expect }} from '{TEST_IMPORT_SOURCE}';"
        ))]
    } else {
        Vec::new()
    };

    let mut parameters = Vec::new();
    if usage.canvas {
        parameters.push("canvas".to_string());
    }
    if usage.user_event {
        parameters.push("userEvent".to_string());
    }
    if usage.body {
        parameters.push("canvasElement".to_string());
    }

    let mut tests = Vec::with_capacity(statements.lines.len() + 1);
    if usage.body {
        tests.push(CodeLine::new("const body = canvasElement.ownerDocument.body;"));
    }
    tests.extend(statements.lines.iter().cloned());

    GeneratedCode::Test {
        imports,
        parameters,
        tests,
    }
}

/// Compile a log into the requested dialect
#[must_use]
pub fn compile(log: &InteractionLog, options: &CompileOptions) -> GeneratedCode {
    let statements = compile_statements(log, options.typed);
    debug!(
        entries = log.len(),
        lines = statements.lines.len(),
        dialect = ?options.dialect,
        "compiled interaction log"
    );
    match options.dialect {
        Dialect::Play => frame_play(&statements),
        Dialect::Test => frame_test(&statements),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::assertion::AssertionKind;
    use crate::format::Literal;
    use crate::locator::TextMatch;

    fn log(entries: Vec<LogEntry>) -> InteractionLog {
        entries.into_iter().collect()
    }

    fn submit() -> Locator {
        Locator::single(Query::role_named("button", "Submit"))
    }

    fn texts(lines: &[CodeLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    fn play_lines(code: &GeneratedCode) -> Vec<&str> {
        texts(code.body())
    }

    mod query_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn locator_expressions() {
            assert_eq!(
                locator_expression(&submit()),
                "await canvas.findByRole('button', { name: 'Submit' })"
            );
            assert_eq!(
                locator_expression(&Locator::nth(Query::role("button"), 1)),
                "(await canvas.findAllByRole('button'))[1]"
            );
            assert_eq!(
                locator_expression(&Locator::nth(Query::css("li"), 2)),
                "(body.querySelectorAll('li'))[2]"
            );
        }

        #[test]
        fn canvas_queries_are_awaited() {
            let statements = compile_statements(&log(vec![LogEntry::new(submit(), InteractionEvent::Click)]), true);
            assert_eq!(
                texts(&statements.lines),
                vec!["await userEvent.click(await canvas.findByRole('button', { name: 'Submit' }));"]
            );
            assert!(statements.usage.canvas);
            assert!(!statements.usage.body);
        }

        #[test]
        fn indexed_canvas_query() {
            let locator = Locator::nth(Query::role("button"), 1);
            let statements =
                compile_statements(&log(vec![LogEntry::new(locator, InteractionEvent::Click)]), false);
            assert_eq!(
                texts(&statements.lines),
                vec!["await userEvent.click((await canvas.findAllByRole('button'))[1]);"]
            );
            assert_eq!(statements.lines[0].warning, Some(Warning::RoleWithoutName));
        }

        #[test]
        fn body_query_is_guarded_and_cast_when_typed() {
            let locator = Locator::single(Query::css("#name"));
            let statements =
                compile_statements(&log(vec![LogEntry::new(locator, InteractionEvent::Click)]), true);
            assert_eq!(
                texts(&statements.lines),
                vec![
                    "await waitFor(() => expect(body.querySelector('#name')).toBeInTheDocument());",
                    "await userEvent.click(body.querySelector('#name') as HTMLElement);",
                ]
            );
            assert!(statements
                .lines
                .iter()
                .all(|l| l.warning == Some(Warning::QuerySelector)));
        }

        #[test]
        fn indexed_body_query_casts_after_subscript() {
            let locator = Locator::nth(Query::css("li"), 2);
            let statements =
                compile_statements(&log(vec![LogEntry::new(locator, InteractionEvent::Click)]), true);
            assert_eq!(
                statements.lines[1].text,
                "await userEvent.click((body.querySelectorAll('li'))[2] as HTMLElement);"
            );
        }

        #[test]
        fn untyped_body_query_has_no_cast() {
            let locator = Locator::single(Query::css("#name"));
            let statements =
                compile_statements(&log(vec![LogEntry::new(locator, InteractionEvent::Click)]), false);
            assert_eq!(
                statements.lines[1].text,
                "await userEvent.click(body.querySelector('#name'));"
            );
        }
    }

    mod event_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        fn single(event: InteractionEvent) -> String {
            let statements = compile_statements(&log(vec![LogEntry::new(submit(), event)]), false);
            statements.lines.into_iter().map(|l| l.text).collect::<Vec<_>>().join("\n")
        }

        #[test]
        fn type_and_clear() {
            assert_eq!(
                single(InteractionEvent::Type {
                    value: "it's".to_string()
                }),
                r"await userEvent.type(await canvas.findByRole('button', { name: 'Submit' }), 'it\'s');"
            );
            assert_eq!(
                single(InteractionEvent::Type {
                    value: String::new()
                }),
                "await userEvent.clear(await canvas.findByRole('button', { name: 'Submit' }));"
            );
        }

        #[test]
        fn multiline_type_uses_template_literal() {
            assert_eq!(
                single(InteractionEvent::Type {
                    value: "a\nb".to_string()
                }),
                "await userEvent.type(await canvas.findByRole('button', { name: 'Submit' }), `a\nb`);"
            );
        }

        #[test]
        fn keyboard_has_no_query() {
            assert_eq!(
                single(InteractionEvent::KeyDown { key: Key::Enter }),
                "await userEvent.keyboard('{enter}');"
            );
            assert_eq!(
                single(InteractionEvent::KeyDown { key: Key::Escape }),
                "await userEvent.keyboard('{esc}');"
            );
        }

        #[test]
        fn select_and_upload() {
            assert_eq!(
                single(InteractionEvent::Select {
                    options: vec!["a".to_string(), "b".to_string()]
                }),
                "await userEvent.selectOptions(await canvas.findByRole('button', { name: 'Submit' }), ['a', 'b']);"
            );
            assert_eq!(
                single(InteractionEvent::Upload {
                    files: vec!["a.png".to_string()]
                }),
                "await userEvent.upload(await canvas.findByRole('button', { name: 'Submit' }), [new File(['a.png'], 'a.png')]);"
            );
        }

        #[test]
        fn tab_with_and_without_shift() {
            let key = |key| LogEntry::new(submit(), InteractionEvent::KeyDown { key });
            let focus = || LogEntry::new(submit(), InteractionEvent::Focus { shift: false });

            let plain = compile_statements(&log(vec![key(Key::Tab), focus()]), false);
            assert_eq!(texts(&plain.lines), vec!["await userEvent.tab();"]);

            let reverse =
                compile_statements(&log(vec![key(Key::Shift), key(Key::Tab), focus()]), false);
            assert_eq!(texts(&reverse.lines), vec!["await userEvent.tab({ shift: true });"]);
        }

        #[test]
        fn double_click() {
            assert_eq!(
                single(InteractionEvent::DoubleClick),
                "await userEvent.dblClick(await canvas.findByRole('button', { name: 'Submit' }));"
            );
        }

        #[test]
        fn assertion_uses_query_variant() {
            assert_eq!(
                single(InteractionEvent::Assertion {
                    kind: AssertionKind::ToHaveTextContent,
                    args: vec![Literal::from("Submit")],
                }),
                "await waitFor(() => expect(canvas.queryByRole('button', { name: 'Submit' })).toHaveTextContent('Submit'))"
            );
            assert_eq!(
                single(InteractionEvent::Assertion {
                    kind: AssertionKind::NotToBeChecked,
                    args: vec![],
                }),
                "await waitFor(() => expect(canvas.queryByRole('button', { name: 'Submit' })).not.toBeChecked())"
            );
        }

        #[test]
        fn reducer_artifacts_are_skipped() {
            assert_eq!(single(InteractionEvent::KeyUp { key: Key::Shift }), "");
            assert_eq!(single(InteractionEvent::KeyDown { key: Key::Tab }), "");
            assert_eq!(single(InteractionEvent::KeyDown { key: Key::Shift }), "");
        }
    }

    mod warning_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn precedence_follows_strategy() {
            assert_eq!(
                Warning::for_locator(&Locator::single(Query::css("[data-testid=\"x\"]"))),
                Some(Warning::QuerySelector)
            );
            assert_eq!(
                Warning::for_locator(&Locator::single(Query::role("button"))),
                Some(Warning::RoleWithoutName)
            );
            assert_eq!(
                Warning::for_locator(&Locator::single(Query::test_id("x"))),
                Some(Warning::TestId)
            );
            assert_eq!(Warning::for_locator(&submit()), None);
        }

        #[test]
        fn warnings_serialize_screaming() {
            assert_eq!(
                serde_json::to_string(&Warning::RoleWithoutName).unwrap(),
                "\"ROLE_WITHOUT_NAME\""
            );
        }
    }

    mod frame_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn empty_log_compiles_to_nothing() {
            for dialect in [Dialect::Play, Dialect::Test] {
                let code = compile(&InteractionLog::new(), &CompileOptions::new(dialect));
                assert!(code.is_empty());
                assert_eq!(code.dialect(), dialect);
            }
        }

        #[test]
        fn skipped_only_log_compiles_to_nothing() {
            let entries = log(vec![LogEntry::new(
                submit(),
                InteractionEvent::KeyDown { key: Key::Shift },
            )]);
            assert!(compile(&entries, &CompileOptions::default()).is_empty());
        }

        #[test]
        fn play_with_body_and_canvas() {
            let entries = log(vec![
                LogEntry::new(submit(), InteractionEvent::Click),
                LogEntry::new(Locator::single(Query::css("#x")), InteractionEvent::Click),
            ]);
            let code = compile(&entries, &CompileOptions::new(Dialect::Play));
            assert_eq!(
                texts(code.imports()),
                vec!["import { userEvent, within, waitFor, expect } from '@storybook/test';"]
            );
            assert_eq!(
                play_lines(&code),
                vec![
                    "play: async ({ canvasElement }) => {",
                    "\tconst body = canvasElement.ownerDocument.body;",
                    "\tconst canvas = within(body);",
                    "\tawait userEvent.click(await canvas.findByRole('button', { name: 'Submit' }));",
                    "\tawait waitFor(() => expect(body.querySelector('#x')).toBeInTheDocument());",
                    "\tawait userEvent.click(body.querySelector('#x'));",
                    "}",
                ]
            );
        }

        #[test]
        fn play_canvas_only() {
            let entries = log(vec![LogEntry::new(submit(), InteractionEvent::Click)]);
            let code = compile(&entries, &CompileOptions::new(Dialect::Play));
            assert_eq!(
                texts(code.imports()),
                vec!["import { userEvent, within } from '@storybook/test';"]
            );
            assert_eq!(
                play_lines(&code)[1],
                "\tconst canvas = within(canvasElement.ownerDocument.body);"
            );
        }

        #[test]
        fn play_keyboard_only_needs_user_event() {
            let entries = log(vec![LogEntry::new(
                submit(),
                InteractionEvent::KeyDown { key: Key::Enter },
            )]);
            let code = compile(&entries, &CompileOptions::new(Dialect::Play));
            assert_eq!(
                texts(code.imports()),
                vec!["import { userEvent } from '@storybook/test';"]
            );
            assert_eq!(
                play_lines(&code),
                vec![
                    "play: async ({ canvasElement }) => {",
                    "\tawait userEvent.keyboard('{enter}');",
                    "}",
                ]
            );
        }

        #[test]
        fn test_dialect_exposes_parameters() {
            let entries = log(vec![
                LogEntry::new(submit(), InteractionEvent::Click),
                LogEntry::new(
                    submit(),
                    InteractionEvent::Assertion {
                        kind: AssertionKind::ToBeVisible,
                        args: vec![],
                    },
                ),
            ]);
            let code = compile(&entries, &CompileOptions::new(Dialect::Test));
            let GeneratedCode::Test {
                imports,
                parameters,
                tests,
            } = code
            else {
                panic!("expected test dialect");
            };
            assert_eq!(
                texts(&imports),
                vec!["import { waitFor, expect } from 'storybook/test';"]
            );
            assert_eq!(parameters, vec!["canvas", "userEvent"]);
            assert_eq!(
                texts(&tests),
                vec![
                    "await userEvent.click(await canvas.findByRole('button', { name: 'Submit' }));",
                    "await waitFor(() => expect(canvas.queryByRole('button', { name: 'Submit' })).toBeVisible())",
                ]
            );
        }

        #[test]
        fn test_dialect_body_guard_without_assertion_import() {
            let entries = log(vec![LogEntry::new(
                Locator::single(Query::css("#x")),
                InteractionEvent::Click,
            )]);
            let code = compile(&entries, &CompileOptions::new(Dialect::Test));
            assert!(code.imports().is_empty());
            let GeneratedCode::Test { parameters, tests, .. } = code else {
                panic!("expected test dialect");
            };
            assert_eq!(parameters, vec!["userEvent", "canvasElement"]);
            assert_eq!(tests[0].text, "const body = canvasElement.ownerDocument.body;");
            assert_eq!(tests.len(), 3);
        }

        #[test]
        fn dialects_share_action_lines() {
            let entries = log(vec![
                LogEntry::new(submit(), InteractionEvent::Click),
                LogEntry::new(
                    Locator::single(Query::PlaceholderText {
                        text: "Name".to_string(),
                        options: TextMatch::exact(),
                    }),
                    InteractionEvent::Type {
                        value: "abc".to_string(),
                    },
                ),
            ]);
            let play = compile(&entries, &CompileOptions::new(Dialect::Play));
            let test = compile(&entries, &CompileOptions::new(Dialect::Test));
            let play_actions: Vec<String> = play
                .body()
                .iter()
                .filter(|l| l.text.starts_with("\tawait"))
                .map(|l| l.text.trim_start().to_string())
                .collect();
            let test_actions: Vec<String> = test.body().iter().map(|l| l.text.clone()).collect();
            assert_eq!(play_actions, test_actions);
        }
    }

    #[test]
    fn generated_code_serializes_with_dialect_tag() {
        let entries = log(vec![LogEntry::new(
            Locator::single(Query::test_id("x")),
            InteractionEvent::Click,
        )]);
        let json = serde_json::to_value(compile(&entries, &CompileOptions::default())).unwrap();
        assert_eq!(json["dialect"], "play");
        assert_eq!(json["play"][2]["warning"], "TEST_ID");
        assert!(json["imports"][0].get("warning").is_none());
    }
}
