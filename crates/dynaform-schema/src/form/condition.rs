use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Literal;

/// A rule gating a field's visibility on another field's live value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Id of the field whose value is inspected
    pub field: String,

    /// Comparison operator
    pub operator: Operator,

    /// Value the referenced field is compared against
    pub value: Literal,
}

/// Comparison operators available to conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Structural equality
    #[serde(rename = "==")]
    Equals,
    /// Structural inequality
    #[serde(rename = "!=")]
    NotEquals,
    /// Numeric greater-than
    #[serde(rename = ">")]
    GreaterThan,
    /// Numeric less-than
    #[serde(rename = "<")]
    LessThan,
    /// Numeric greater-or-equal
    #[serde(rename = ">=")]
    GreaterOrEqual,
    /// Numeric less-or-equal
    #[serde(rename = "<=")]
    LessOrEqual,
    /// Substring or element membership
    #[serde(rename = "contains")]
    Contains,
    /// Negated substring or element membership
    #[serde(rename = "!contains")]
    NotContains,
}

impl Operator {
    /// The operator as written in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
            Operator::Contains => "contains",
            Operator::NotContains => "!contains",
        }
    }

    /// Whether the operator compares numerically
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::GreaterThan
                | Operator::LessThan
                | Operator::GreaterOrEqual
                | Operator::LessOrEqual
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Condition {
    /// Create a condition
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Literal>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}
