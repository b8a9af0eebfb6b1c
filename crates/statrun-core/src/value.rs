//! Parameter types and the values raw text parses into.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared type of a formula parameter.
///
/// Each kind doubles as the parse function for raw input: see [`ParamKind::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// A base-10 signed integer.
    #[serde(alias = "integer")]
    Int,
    /// A double-precision float.
    #[serde(alias = "number")]
    Float,
    /// An ordered sequence of numbers.
    #[serde(alias = "sequence")]
    List,
}

impl ParamKind {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::List => "list",
        }
    }

    /// Parse raw text into a value of this kind.
    ///
    /// Surrounding whitespace is ignored. Lists accept numbers separated by
    /// commas and/or whitespace, optionally wrapped in `[...]`.
    pub fn parse(&self, raw: &str) -> Result<Value, ParseError> {
        let text = raw.trim();
        match self {
            Self::Int => text.parse::<i64>().map(Value::Int).map_err(|_| ParseError::Invalid {
                kind: *self,
                raw: raw.to_string(),
            }),
            Self::Float => text.parse::<f64>().map(Value::Float).map_err(|_| ParseError::Invalid {
                kind: *self,
                raw: raw.to_string(),
            }),
            Self::List => parse_list(text).map(Value::List),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text could not be coerced to the declared parameter type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("'{raw}' is not a valid {kind}")]
    Invalid { kind: ParamKind, raw: String },

    #[error("list element '{element}' is not a number")]
    ListElement { element: String },
}

/// A parsed argument or a formula result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    List(Vec<f64>),
}

impl Value {
    /// The kind this value satisfies.
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Int(_) => ParamKind::Int,
            Self::Float(_) => ParamKind::Float,
            Self::List(_) => ParamKind::List,
        }
    }

    /// Format the value, rounding floats to `precision` decimals when given.
    pub fn format(&self, precision: Option<usize>) -> String {
        let float = |v: f64| match precision {
            Some(p) => format!("{v:.p$}"),
            None => v.to_string(),
        };
        match self {
            Self::Int(v) => v.to_string(),
            Self::Float(v) => float(*v),
            Self::List(values) => {
                let items: Vec<String> = values.iter().map(|v| float(*v)).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(None))
    }
}

fn parse_list(text: &str) -> Result<Vec<f64>, ParseError> {
    let inner = text
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(text);
    inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>().map_err(|_| ParseError::ListElement {
                element: s.to_string(),
            })
        })
        .collect()
}
