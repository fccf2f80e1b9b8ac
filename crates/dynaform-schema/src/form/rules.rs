use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::text;

lazy_static! {
    // "name" or "name:argument"; the argument may itself contain ':'
    static ref RULE_REGEX: Regex = Regex::new(r"^([a-zA-Z][a-zA-Z_\-]*)(?::(.*))?$").unwrap();
}

/// A named check attached to a text-like field.
///
/// Rules are written as strings in configuration (`"email"`, `"minLength:3"`,
/// `"pattern:^[A-Z]+$"`) and parsed when the configuration is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValidationRule {
    /// Value must look like an e-mail address
    Email,
    /// Value must be an http(s) URL
    Url,
    /// Value must parse as a number
    Numeric,
    /// Value must parse as an integer
    Integer,
    /// Value may only contain letters
    Alpha,
    /// Value may only contain letters and digits
    Alphanumeric,
    /// Value must have at least this many characters
    MinLength(usize),
    /// Value must have at most this many characters
    MaxLength(usize),
    /// Value must match this regular expression
    Pattern(String),
}

/// Error produced when a rule string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleParseError(pub String);

impl fmt::Display for RuleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RuleParseError {}

impl FromStr for ValidationRule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = RULE_REGEX
            .captures(s.trim())
            .ok_or_else(|| RuleParseError(format!("Malformed validation rule: '{}'", s)))?;
        let name = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let arg = captures.get(2).map(|m| m.as_str());

        let length = |arg: Option<&str>| -> Result<usize, RuleParseError> {
            arg.and_then(|a| a.trim().parse::<usize>().ok()).ok_or_else(|| {
                RuleParseError(format!(
                    "Rule '{}' requires a non-negative integer argument",
                    name
                ))
            })
        };

        match (name, arg) {
            ("email", None) => Ok(ValidationRule::Email),
            ("url", None) => Ok(ValidationRule::Url),
            ("numeric", None) => Ok(ValidationRule::Numeric),
            ("integer", None) => Ok(ValidationRule::Integer),
            ("alpha", None) => Ok(ValidationRule::Alpha),
            ("alphanumeric", None) => Ok(ValidationRule::Alphanumeric),
            ("minLength", arg) => Ok(ValidationRule::MinLength(length(arg)?)),
            ("maxLength", arg) => Ok(ValidationRule::MaxLength(length(arg)?)),
            ("pattern", Some(pattern)) if !pattern.is_empty() => {
                Ok(ValidationRule::Pattern(pattern.to_string()))
            }
            ("pattern", _) => Err(RuleParseError(
                "Rule 'pattern' requires a regular expression argument".to_string(),
            )),
            (name, Some(_)) if is_plain(name) => Err(RuleParseError(format!(
                "Rule '{}' does not take an argument",
                name
            ))),
            (name, _) => Err(RuleParseError(format!("Unknown validation rule: '{}'", name))),
        }
    }
}

impl ValidationRule {
    /// Whether `value` satisfies this rule
    pub fn check(&self, value: &str) -> bool {
        match self {
            ValidationRule::Email => text::is_valid_email(value),
            ValidationRule::Url => text::is_valid_url(value),
            ValidationRule::Numeric => text::is_numeric(value),
            ValidationRule::Integer => text::is_integer(value),
            ValidationRule::Alpha => text::is_alpha(value),
            ValidationRule::Alphanumeric => text::is_alphanumeric(value),
            ValidationRule::MinLength(n) => text::char_len(value) >= *n,
            ValidationRule::MaxLength(n) => text::char_len(value) <= *n,
            ValidationRule::Pattern(p) => text::matches_pattern(p, value).unwrap_or(false),
        }
    }

    /// Message used when the field does not provide its own
    pub fn default_message(&self) -> String {
        match self {
            ValidationRule::Email => "must be a valid email address".to_string(),
            ValidationRule::Url => "must be a valid URL".to_string(),
            ValidationRule::Numeric => "must be a number".to_string(),
            ValidationRule::Integer => "must be a whole number".to_string(),
            ValidationRule::Alpha => "may only contain letters".to_string(),
            ValidationRule::Alphanumeric => "may only contain letters and digits".to_string(),
            ValidationRule::MinLength(n) => format!("must be at least {} characters", n),
            ValidationRule::MaxLength(n) => format!("must be at most {} characters", n),
            ValidationRule::Pattern(_) => "has an invalid format".to_string(),
        }
    }
}

fn is_plain(name: &str) -> bool {
    matches!(
        name,
        "email" | "url" | "numeric" | "integer" | "alpha" | "alphanumeric"
    )
}

impl TryFrom<String> for ValidationRule {
    type Error = RuleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValidationRule> for String {
    fn from(rule: ValidationRule) -> Self {
        rule.to_string()
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::Email => f.write_str("email"),
            ValidationRule::Url => f.write_str("url"),
            ValidationRule::Numeric => f.write_str("numeric"),
            ValidationRule::Integer => f.write_str("integer"),
            ValidationRule::Alpha => f.write_str("alpha"),
            ValidationRule::Alphanumeric => f.write_str("alphanumeric"),
            ValidationRule::MinLength(n) => write!(f, "minLength:{}", n),
            ValidationRule::MaxLength(n) => write!(f, "maxLength:{}", n),
            ValidationRule::Pattern(p) => write!(f, "pattern:{}", p),
        }
    }
}
