use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Live form values: top-level field id to value.
///
/// Groups hold nested objects and lists hold arrays of objects, so the whole
/// map serializes directly into the submitted document.
pub type FormData = serde_json::Map<String, Value>;

/// Validation messages keyed by hierarchical field path
/// (`name`, `address.city`, `contacts.0.email`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Create an empty error map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for a path
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    /// Messages recorded for a path, empty if none
    pub fn get(&self, path: &str) -> &[String] {
        self.0.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any message is recorded for a path
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Whether no errors are recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of paths with errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Paths with errors, in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over path and messages
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }

    /// Remove all errors
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Remove errors for `path` and everything nested below it
    pub fn clear_prefix(&mut self, path: &str) {
        let nested = format!("{}.", path);
        self.0.retain(|key, _| key != path && !key.starts_with(&nested));
    }

    /// Consume into the underlying map
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl From<BTreeMap<String, Vec<String>>> for FieldErrors {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        FieldErrors(map)
    }
}
