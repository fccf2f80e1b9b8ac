use lazy_static::lazy_static;
use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    // Pragmatic address check: local part, '@', dotted domain with a TLD
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$"
    ).unwrap();

    // http(s) scheme followed by a host and an optional path/query
    static ref URL_REGEX: Regex = Regex::new(
        r"^https?://[A-Za-z0-9\-._~%]+(?::\d+)?(?:[/?#]\S*)?$"
    ).unwrap();

    // Configured patterns by source text; None marks a pattern that failed to compile
    static ref PATTERN_CACHE: RwLock<HashMap<String, Option<Regex>>> = RwLock::new(HashMap::new());
}

/// Check whether a string looks like an e-mail address.
///
/// Valid examples:
/// - "ada@example.com"
/// - "first.last+tag@mail.example.org"
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Check whether a string is an absolute http or https URL
pub fn is_valid_url(value: &str) -> bool {
    URL_REGEX.is_match(value)
}

/// Check whether a string parses as a finite number
pub fn is_numeric(value: &str) -> bool {
    value.trim().parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Check whether a string parses as an integer
pub fn is_integer(value: &str) -> bool {
    value.trim().parse::<i64>().is_ok()
}

/// Non-empty and letters only
pub fn is_alpha(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_alphabetic)
}

/// Non-empty and letters or digits only
pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_alphanumeric)
}

/// Length in characters, not bytes
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Match `value` against a regular expression given as text.
///
/// Returns `None` when the pattern does not compile. Patterns are checked at
/// load time, so callers treat `None` as a failed match.
pub fn matches_pattern(pattern: &str, value: &str) -> Option<bool> {
    compiled_pattern(pattern).map(|re| re.is_match(value))
}

/// Compile `pattern` once and reuse it for every later check
pub fn compiled_pattern(pattern: &str) -> Option<Regex> {
    if let Some(cached) = PATTERN_CACHE.read().get(pattern) {
        return cached.clone();
    }
    let compiled = Regex::new(pattern).ok();
    PATTERN_CACHE
        .write()
        .entry(pattern.to_string())
        .or_insert(compiled)
        .clone()
}
