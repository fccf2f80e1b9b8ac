use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// A scalar literal allowed in option values and list literals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean literal
    Bool(bool),
    /// Numeric literal
    Number(f64),
    /// Text literal
    Text(String),
}

/// A literal value as it may appear in `defaultValue` or a condition's `value`.
///
/// Objects and `null` are not representable, so malformed configurations are
/// rejected while parsing rather than compared at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Boolean literal
    Bool(bool),
    /// Numeric literal
    Number(f64),
    /// Text literal
    Text(String),
    /// Array of scalar literals
    List(Vec<Scalar>),
}

impl Scalar {
    /// Convert into a JSON value, keeping integral numbers integral
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Number(n) => number_to_json(*n),
            Scalar::Text(s) => Value::String(s.clone()),
        }
    }
}

impl Literal {
    /// Convert into a JSON value, keeping integral numbers integral
    pub fn to_json(&self) -> Value {
        match self {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => number_to_json(*n),
            Literal::Text(s) => Value::String(s.clone()),
            Literal::List(items) => Value::Array(items.iter().map(Scalar::to_json).collect()),
        }
    }

    /// Whether this literal is a boolean
    pub fn is_bool(&self) -> bool {
        matches!(self, Literal::Bool(_))
    }

    /// Whether this literal is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Literal::List(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", number_to_json(*n)),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Join a parent path and a field id into a dotted path (e.g. "address.city")
pub fn join_path(parent: Option<&str>, id: &str) -> String {
    match parent {
        Some(parent) if !parent.is_empty() => format!("{}.{}", parent, id),
        _ => id.to_string(),
    }
}

/// Split a dotted path into its segments
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|segment| !segment.is_empty())
}
