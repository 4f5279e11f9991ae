//! Scalar literals and column defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar literal as it appears in a schema definition.
///
/// Deserializes from any JSON scalar; `null` maps to [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Integer(i64),
    /// Floating point literal.
    Float(f64),
    /// Text literal.
    Text(String),
}

impl Value {
    /// Returns true for numbers and for text that reads as a finite number.
    #[must_use]
    pub fn is_numeric_like(&self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Float(x) => x.is_finite(),
            Self::Text(text) => text.trim().parse::<f64>().is_ok_and(f64::is_finite),
            Self::Null | Self::Bool(_) => false,
        }
    }

    /// Returns true for the empty string.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Default value for a column.
///
/// Literals go through the quoting collaborator; raw expressions such as
/// `CURRENT_TIMESTAMP` are emitted verbatim. The JSON form of a raw
/// expression is `{"raw": "CURRENT_TIMESTAMP"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DefaultRepr", into = "DefaultRepr")]
pub enum DefaultValue {
    /// A scalar literal.
    Literal(Value),
    /// A raw SQL expression.
    Raw(String),
}

impl DefaultValue {
    /// Creates a raw SQL expression default.
    #[must_use]
    pub fn raw(expr: impl Into<String>) -> Self {
        Self::Raw(expr.into())
    }

    /// Returns true for the empty string literal.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Literal(value) if value.is_empty_text())
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

macro_rules! literal_default {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for DefaultValue {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_default!(&str, String, i64, i32, f64, bool);

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DefaultRepr {
    Raw { raw: String },
    Literal(Value),
}

impl From<DefaultRepr> for DefaultValue {
    fn from(repr: DefaultRepr) -> Self {
        match repr {
            DefaultRepr::Raw { raw } => Self::Raw(raw),
            DefaultRepr::Literal(value) => Self::Literal(value),
        }
    }
}

impl From<DefaultValue> for DefaultRepr {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Raw(raw) => Self::Raw { raw },
            DefaultValue::Literal(value) => Self::Literal(value),
        }
    }
}
