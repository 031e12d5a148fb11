//! CSS selector subset used by `querySelector(All)`.
//!
//! Supported syntax:
//!
//! - type selectors and `*`
//! - `#id`, `.class`, `[attr]`, `[attr="value"]`
//! - `:nth-child(n)`
//! - child (`>`) and descendant (whitespace) combinators
//! - selector lists separated by `,`
//!
//! Identifiers accept backslash escapes, so `#a\:b` matches `id="a:b"`.

use super::{Document, NodeId};
use crate::result::{RecorderError, RecorderResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeSelector {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeSelector>,
    nth_child: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Child,
    Descendant,
}

/// Compounds from left to right; `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

/// Parsed, comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Complex>,
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: &str) -> RecorderError {
        RecorderError::invalid_selector(self.source, format!("{reason} at offset {}", self.pos))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> RecorderResult<String> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                let escaped = self.peek().ok_or_else(|| self.error("dangling escape"))?;
                out.push(escaped);
                self.pos += 1;
            } else if c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if out.is_empty() {
            return Err(self.error("expected identifier"));
        }
        Ok(out)
    }

    fn quoted(&mut self, quote: char) -> RecorderResult<String> {
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some('\\') => {
                    self.pos += 1;
                    let escaped = self.peek().ok_or_else(|| self.error("dangling escape"))?;
                    out.push(escaped);
                    self.pos += 1;
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn attribute(&mut self) -> RecorderResult<AttributeSelector> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();
        let value = if self.eat('=') {
            self.skip_whitespace();
            let value = match self.peek() {
                Some(q @ ('"' | '\'')) => {
                    self.pos += 1;
                    self.quoted(q)?
                }
                _ => self.ident()?,
            };
            self.skip_whitespace();
            Some(value)
        } else {
            None
        };
        if !self.eat(']') {
            return Err(self.error("expected ']'"));
        }
        Ok(AttributeSelector { name, value })
    }

    fn nth_child(&mut self) -> RecorderResult<usize> {
        let name = self.ident()?;
        if name != "nth-child" || !self.eat('(') {
            return Err(self.error("unsupported pseudo-class"));
        }
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        let n = digits
            .parse::<usize>()
            .map_err(|_| self.error("expected :nth-child index"))?;
        self.skip_whitespace();
        if !self.eat(')') {
            return Err(self.error("expected ')'"));
        }
        Ok(n)
    }

    fn compound(&mut self) -> RecorderResult<Compound> {
        let mut compound = Compound::default();
        let mut empty = true;

        if self.eat('*') {
            empty = false;
        } else if self
            .peek()
            .is_some_and(|c| c.is_alphabetic() || c == '\\' || c == '_' || c == '-')
        {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
            empty = false;
        }

        loop {
            if self.eat('#') {
                compound.id = Some(self.ident()?);
            } else if self.eat('.') {
                compound.classes.push(self.ident()?);
            } else if self.eat('[') {
                compound.attributes.push(self.attribute()?);
            } else if self.eat(':') {
                compound.nth_child = Some(self.nth_child()?);
            } else {
                break;
            }
            empty = false;
        }

        if empty {
            return Err(self.error("expected selector"));
        }
        Ok(compound)
    }

    fn complex(&mut self) -> RecorderResult<Complex> {
        self.skip_whitespace();
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    combinators.push(Combinator::Child);
                }
                Some(_) if had_space => combinators.push(Combinator::Descendant),
                Some(_) => return Err(self.error("unexpected character")),
            }
            compounds.push(self.compound()?);
        }

        Ok(Complex {
            compounds,
            combinators,
        })
    }
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(source: &str) -> RecorderResult<Self> {
        let mut parser = Parser::new(source);
        let mut selectors = vec![parser.complex()?];
        while parser.eat(',') {
            selectors.push(parser.complex()?);
        }
        if parser.peek().is_some() {
            return Err(parser.error("trailing input"));
        }
        Ok(Self { selectors })
    }

    /// Whether `node` matches any selector in the list
    #[must_use]
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.selectors
            .iter()
            .any(|complex| matches_complex(doc, node, complex, complex.compounds.len() - 1))
    }
}

fn matches_complex(doc: &Document, node: NodeId, complex: &Complex, at: usize) -> bool {
    if !matches_compound(doc, node, &complex.compounds[at]) {
        return false;
    }
    if at == 0 {
        return true;
    }
    match complex.combinators[at - 1] {
        Combinator::Child => doc
            .parent(node)
            .is_some_and(|parent| matches_complex(doc, parent, complex, at - 1)),
        Combinator::Descendant => doc
            .ancestors(node)
            .any(|ancestor| matches_complex(doc, ancestor, complex, at - 1)),
    }
}

fn matches_compound(doc: &Document, node: NodeId, compound: &Compound) -> bool {
    let Some(element) = doc.element(node) else {
        return false;
    };

    if compound.tag.as_ref().is_some_and(|tag| *tag != element.tag) {
        return false;
    }
    if let Some(id) = &compound.id {
        if element.attribute("id") != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.is_empty() {
        let classes: Vec<&str> = element
            .attribute("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default();
        if !compound.classes.iter().all(|c| classes.contains(&c.as_str())) {
            return false;
        }
    }
    for attr in &compound.attributes {
        match (&attr.value, element.attribute(&attr.name)) {
            (_, None) => return false,
            (Some(expected), Some(actual)) if expected != actual => return false,
            _ => {}
        }
    }
    if let Some(n) = compound.nth_child {
        if doc.element_index(node) != n {
            return false;
        }
    }
    true
}

/// Escape an identifier for use after `#` or `.`
#[must_use]
pub fn escape_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (i, c) in ident.chars().enumerate() {
        let needs_escape = !(c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii())
            || (i == 0 && c.is_ascii_digit());
        if needs_escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Quote an attribute value with double quotes
#[must_use]
pub fn quote_attribute_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dom::ElementBuilder;

    fn doc() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let nav = doc.append(
            doc.body(),
            ElementBuilder::new("nav").attr("class", "menu main"),
        );
        let ul = doc.append(nav, ElementBuilder::new("ul"));
        let first = doc.append(ul, ElementBuilder::new("li").attr("data-k", "1"));
        let second = doc.append(ul, ElementBuilder::new("li").attr("id", "a:b"));
        (doc, nav, first, second)
    }

    #[test]
    fn type_and_class_selectors() {
        let (doc, nav, _, _) = doc();
        assert_eq!(doc.query_selector_all(doc.body(), "nav.menu").unwrap(), vec![nav]);
        assert!(doc.query_selector_all(doc.body(), "nav.other").unwrap().is_empty());
    }

    #[test]
    fn child_and_descendant_combinators() {
        let (doc, _, first, second) = doc();
        assert_eq!(
            doc.query_selector_all(doc.body(), "nav li").unwrap(),
            vec![first, second]
        );
        assert!(doc.query_selector_all(doc.body(), "nav > li").unwrap().is_empty());
        assert_eq!(
            doc.query_selector_all(doc.body(), "nav > ul > li:nth-child(2)").unwrap(),
            vec![second]
        );
    }

    #[test]
    fn attribute_selectors() {
        let (doc, _, first, _) = doc();
        assert_eq!(doc.query_selector_all(doc.body(), "[data-k]").unwrap(), vec![first]);
        assert_eq!(
            doc.query_selector_all(doc.body(), "li[data-k=\"1\"]").unwrap(),
            vec![first]
        );
        assert!(doc.query_selector_all(doc.body(), "[data-k='2']").unwrap().is_empty());
    }

    #[test]
    fn escaped_ids() {
        let (doc, _, _, second) = doc();
        let selector = format!("#{}", escape_identifier("a:b"));
        assert_eq!(selector, "#a\\:b");
        assert_eq!(doc.query_selector_all(doc.body(), &selector).unwrap(), vec![second]);
    }

    #[test]
    fn selector_lists() {
        let (doc, nav, first, _) = doc();
        assert_eq!(
            doc.query_selector_all(doc.body(), "nav, [data-k]").unwrap(),
            vec![nav, first]
        );
    }

    #[test]
    fn container_itself_is_not_matched() {
        let (doc, nav, _, _) = doc();
        assert!(doc.query_selector_all(nav, "nav").unwrap().is_empty());
    }

    #[test]
    fn invalid_selectors_are_errors() {
        for source in ["", "div >", "a:hover", "[x", "#", "div $"] {
            assert!(SelectorList::parse(source).is_err(), "{source:?} should fail");
        }
    }

    #[test]
    fn leading_digit_is_escaped() {
        assert_eq!(escape_identifier("1a"), "\\1a");
        assert_eq!(quote_attribute_value(r#"say "hi""#), r#""say \"hi\"""#);
    }
}
