//! Story naming and display framing of generated code.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::compiler::GeneratedCode;
use crate::format::quote_string;

/// Test name used when the user has not typed one
pub const DEFAULT_TEST_NAME: &str = "your test name";

// Patterns are literals checked by the tests below
#[allow(clippy::expect_used)]
fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("literal pattern compiles"))
}

macro_rules! pattern {
    ($name:ident, $source:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            cached(&RE, $source)
        }
    };
}

pattern!(leading_non_letter, r"(?i)^[^a-z]");
pattern!(leading_digits, r"^\d+");
pattern!(invalid_characters, r"(?i)[^a-z0-9\-_ ]");
pattern!(separated_word, r"(?i)[\-_ ]+[a-z0-9]");
pattern!(upper_then_lower, r"([^\n])([A-Z])([a-z])");
pattern!(lower_then_upper, r"([a-z])([A-Z])");
pattern!(letter_then_digit, r"(?i)([a-z])([0-9])");
pattern!(digit_then_letter, r"(?i)([0-9])([a-z])");
pattern!(word_start, r"(\s|^)(\w)");
pattern!(space_runs, r" +");

/// Normalise a user-typed story name into an export identifier.
///
/// Drops one leading non-letter and any leading digits, removes characters
/// other than letters, digits, `-`, `_` and space, then camel-cases across
/// runs of those separators: `"my new-story"` becomes `"myNewStory"`.
#[must_use]
pub fn story_export_name(name: &str) -> String {
    let name = leading_non_letter().replace(name, "");
    let name = leading_digits().replace(&name, "");
    let name = invalid_characters().replace_all(&name, "");
    let name = separated_word().replace_all(&name, |caps: &Captures<'_>| {
        caps[0]
            .to_uppercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
    });
    name.into_owned()
}

/// Display name for an export identifier: `"PrimaryButton"` becomes
/// `"Primary Button"`.
#[must_use]
pub fn story_name_from_export(export: &str) -> String {
    let name = export.replace(['_', '-', '.'], " ");
    let name = upper_then_lower().replace_all(&name, "${1} ${2}${3}");
    let name = lower_then_upper().replace_all(&name, "${1} ${2}");
    let name = letter_then_digit().replace_all(&name, "${1} ${2}");
    let name = digit_then_letter().replace_all(&name, "${1} ${2}");
    let name = word_start().replace_all(&name, |caps: &Captures<'_>| {
        format!("{}{}", &caps[1], caps[2].to_uppercase())
    });
    let name = space_runs().replace_all(&name, " ");
    name.trim().to_string()
}

/// Render generated code as the text shown to the user.
///
/// Imports come first, separated from the body by a blank line. Test bundles
/// are wrapped as `Story.test('name', async ({ canvas }) => { ... });`.
#[must_use]
pub fn render_code(code: &GeneratedCode, story: &str, test_name: &str) -> String {
    if code.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = code.imports().iter().map(|l| l.text.clone()).collect();
    if !lines.is_empty() {
        lines.push(String::new());
    }

    match code {
        GeneratedCode::Play { play, .. } => {
            lines.extend(play.iter().map(|l| l.text.clone()));
        }
        GeneratedCode::Test {
            parameters, tests, ..
        } => {
            let parameters = if parameters.is_empty() {
                "{}".to_string()
            } else {
                format!("{{ {} }}", parameters.join(", "))
            };
            let test_name = if test_name.is_empty() {
                DEFAULT_TEST_NAME
            } else {
                test_name
            };
            lines.push(format!(
                "{story}.test({}, async ({parameters}) => {{",
                quote_string(test_name)
            ));
            lines.extend(tests.iter().map(|l| format!("\t{}", l.text)));
            lines.push("});".to_string());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{CodeLine, Dialect};

    mod export_name_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn camel_cases_separators() {
            assert_eq!(story_export_name("my new-story"), "myNewStory");
            assert_eq!(story_export_name("Primary_button"), "PrimaryButton");
            assert_eq!(story_export_name("a  -  b"), "aB");
        }

        #[test]
        fn strips_leading_junk_and_invalid_characters() {
            assert_eq!(story_export_name("1 Filled!"), "Filled");
            assert_eq!(story_export_name("#42abc"), "abc");
            assert_eq!(story_export_name("Login (error)"), "LoginError");
        }

        #[test]
        fn patterns_are_compiled_once() {
            assert!(std::ptr::eq(separated_word(), separated_word()));
            assert!(std::ptr::eq(word_start(), word_start()));
        }
    }

    mod display_name_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn start_cases_exports() {
            assert_eq!(story_name_from_export("PrimaryButton"), "Primary Button");
            assert_eq!(story_name_from_export("loginForm2"), "Login Form 2");
            assert_eq!(story_name_from_export("with_long-name"), "With Long Name");
            assert_eq!(story_name_from_export("HTMLButton"), "HTML Button");
        }
    }

    mod render_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn empty_bundle_renders_nothing() {
            assert_eq!(render_code(&GeneratedCode::empty(Dialect::Test), "Primary", ""), "");
        }

        #[test]
        fn play_bundle() {
            let code = GeneratedCode::Play {
                imports: vec![CodeLine::new("import { userEvent } from '@storybook/test';")],
                play: vec![
                    CodeLine::new("play: async ({ canvasElement }) => {"),
                    CodeLine::new("\tawait userEvent.tab();"),
                    CodeLine::new("}"),
                ],
            };
            assert_eq!(
                render_code(&code, "Primary", "ignored"),
                "import { userEvent } from '@storybook/test';\n\nplay: async ({ canvasElement }) => {\n\tawait userEvent.tab();\n}"
            );
        }

        #[test]
        fn test_bundle_is_wrapped() {
            let code = GeneratedCode::Test {
                imports: Vec::new(),
                parameters: vec!["canvas".to_string(), "userEvent".to_string()],
                tests: vec![CodeLine::new(
                    "await userEvent.click(await canvas.findByRole('button'));",
                )],
            };
            assert_eq!(
                render_code(&code, "Primary", "submits the form"),
                "Primary.test('submits the form', async ({ canvas, userEvent }) => {\n\tawait userEvent.click(await canvas.findByRole('button'));\n});"
            );
        }

        #[test]
        fn test_bundle_defaults() {
            let code = GeneratedCode::Test {
                imports: Vec::new(),
                parameters: Vec::new(),
                tests: vec![CodeLine::new("await waitFor(() => expect(1).toBe(1))")],
            };
            let rendered = render_code(&code, "Primary", "");
            assert!(rendered.starts_with("Primary.test('your test name', async ({}) => {"));
        }
    }
}
