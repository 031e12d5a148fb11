//! Source-literal formatting for generated code.
//!
//! Renders argument values into JavaScript/TypeScript literal text:
//!
//! - strings are quoted with [`quote_string`]
//! - arrays become `[a, b]`
//! - records become `{ key: value }` with unquoted keys
//! - numbers follow JavaScript string coercion (`1`, `1.5`, `NaN`)
//!
//! Everything here is a pure text transform.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A primitive or record value that can be emitted as a source literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// `true` / `false`
    Bool(bool),
    /// Any number, including `NaN` and the infinities
    Number(f64),
    /// String, quoted on output
    String(String),
    /// Array literal
    Array(Vec<Literal>),
    /// Record literal; keys keep insertion order
    Object(Vec<(String, Literal)>),
}

impl Literal {
    /// Create a string literal
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create a record literal from key/value pairs
    #[must_use]
    pub fn object<K: Into<String>>(pairs: impl IntoIterator<Item = (K, Literal)>) -> Self {
        Self::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Create an array of string literals
    #[must_use]
    pub fn string_array<S: AsRef<str>>(items: &[S]) -> Self {
        Self::Array(items.iter().map(|s| Self::string(s.as_ref())).collect())
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<serde_json::Value> for Literal {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

// `undefined` and non-finite numbers have no JSON form and serialize as `null`.
impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Self::Null | Self::Undefined => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            Self::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, value) in pairs {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

fn is_integral(n: f64) -> bool {
    n.fract() == 0.0 && n.abs() < 1e15
}

/// Quote a string as a source literal.
///
/// Backslashes are escaped first. Strings containing a newline become
/// template literals with escaped back-ticks; everything else is wrapped in
/// single quotes with escaped single quotes.
#[must_use]
pub fn quote_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\");

    if escaped.contains('\n') {
        format!("`{}`", escaped.replace('`', "\\`"))
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}

/// Format a number the way JavaScript's `String(n)` does for common values.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if is_integral(n) {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Render a single value as source text.
#[must_use]
pub fn format_literal(value: &Literal) -> String {
    match value {
        Literal::Null => "null".to_string(),
        Literal::Undefined => "undefined".to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Number(n) => format_number(*n),
        Literal::String(s) => quote_string(s),
        Literal::Array(items) => format!("[{}]", format_arguments(items)),
        Literal::Object(pairs) => {
            let fields = pairs
                .iter()
                .map(|(key, value)| format!("{key}: {}", format_literal(value)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{ {fields} }}")
        }
    }
}

/// Render an argument list as comma-separated source text.
#[must_use]
pub fn format_arguments(args: &[Literal]) -> String {
    args.iter().map(format_literal).collect::<Vec<_>>().join(", ")
}
