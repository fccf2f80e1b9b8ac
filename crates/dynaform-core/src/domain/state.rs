use dynaform_schema::{path_segments, FormConfig, FormField, ListField};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::submission::{transition, SubmissionStatus};
use crate::error::FormError;
use crate::types::{FieldErrors, FormData};

/// Initial value of a field.
///
/// An explicit `defaultValue` wins. Otherwise checkboxes start unchecked,
/// groups start as an object of their fields' initial values, lists start
/// with `minItems` item stubs and everything else, checkbox groups
/// included, starts as an empty string.
pub fn default_value(field: &FormField) -> Value {
    if let Some(default) = &field.base().default_value {
        return default.to_json();
    }

    match field {
        FormField::Checkbox(_) => Value::Bool(false),
        FormField::Group(group) => Value::Object(default_values(&group.fields)),
        FormField::List(list) => {
            let count = list.min_items.unwrap_or(0);
            Value::Array((0..count).map(|_| list_item_stub(list)).collect())
        }
        _ => Value::String(String::new()),
    }
}

/// Initial values for a set of sibling fields
pub fn default_values(fields: &[FormField]) -> FormData {
    fields
        .iter()
        .map(|field| (field.id().to_string(), default_value(field)))
        .collect()
}

/// A fresh item for a list, built from its field template
pub fn list_item_stub(list: &ListField) -> Value {
    Value::Object(default_values(&list.fields))
}

/// Mutable state of one form instance: live values, validation errors and
/// submission status.
#[derive(Debug, Clone, Default)]
pub struct FieldStateStore {
    values: FormData,
    errors: FieldErrors,
    status: SubmissionStatus,
    last_error: Option<String>,
}

impl FieldStateStore {
    /// Create a store initialized from the configuration
    pub fn new(config: &FormConfig) -> Self {
        let mut store = Self::default();
        store.initialize(config);
        store
    }

    /// Replace all state with the configuration's initial values
    pub fn initialize(&mut self, config: &FormConfig) {
        self.values = default_values(&config.fields);
        self.errors.clear();
        self.status = SubmissionStatus::Idle;
        self.last_error = None;
        debug!(form = %config.id, fields = self.values.len(), "Initialized form state");
    }

    /// Return to the initial state. Rejected while a submission is running.
    pub fn reset(&mut self, config: &FormConfig) -> Result<(), FormError> {
        if self.status == SubmissionStatus::Submitting {
            warn!(form = %config.id, "Reset rejected while submitting");
            return Err(FormError::AlreadySubmitting);
        }
        self.initialize(config);
        Ok(())
    }

    /// All live values
    pub fn values(&self) -> &FormData {
        &self.values
    }

    /// Value at a hierarchical path (`address.city`, `contacts.0.email`)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path_segments(path);
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        let mut segments = path_segments(path);
        let mut current = self.values.get_mut(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get_mut(segment)?,
                Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Overwrite the value at a path.
    ///
    /// Every declared field has an entry after initialization, so a path
    /// without one names no field.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), FormError> {
        let slot = self
            .get_mut(path)
            .ok_or_else(|| FormError::UnknownField(path.to_string()))?;
        *slot = value;
        debug!(path, "Field value set");
        Ok(())
    }

    /// Append a fresh item to the list at `path`, returning its index
    pub fn add_list_item(&mut self, config: &FormConfig, path: &str) -> Result<usize, FormError> {
        let list = list_field(config, path)?;
        let max_items = list.max_items;
        let stub = list_item_stub(list);

        let items = self.list_items_mut(path)?;
        if let Some(max) = max_items {
            if items.len() >= max {
                warn!(path, max, "List item rejected");
                return Err(FormError::ListBounds {
                    path: path.to_string(),
                    message: format!("at most {} items allowed", max),
                });
            }
        }
        items.push(stub);
        let index = items.len() - 1;
        debug!(path, index, "List item added");
        Ok(index)
    }

    /// Remove the item at `index` from the list at `path`, returning it.
    /// Errors recorded for the list are cleared since item indices shift.
    pub fn remove_list_item(
        &mut self,
        config: &FormConfig,
        path: &str,
        index: usize,
    ) -> Result<Value, FormError> {
        let min_items = list_field(config, path)?.min_items;

        let items = self.list_items_mut(path)?;
        if index >= items.len() {
            return Err(FormError::UnknownField(format!("{}.{}", path, index)));
        }
        if let Some(min) = min_items {
            if items.len() <= min {
                warn!(path, min, "List item removal rejected");
                return Err(FormError::ListBounds {
                    path: path.to_string(),
                    message: format!("at least {} items required", min),
                });
            }
        }
        let removed = items.remove(index);
        self.errors.clear_prefix(path);
        debug!(path, index, "List item removed");
        Ok(removed)
    }

    fn list_items_mut(&mut self, path: &str) -> Result<&mut Vec<Value>, FormError> {
        match self.get_mut(path) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(FormError::NotAList(path.to_string())),
            None => Err(FormError::UnknownField(path.to_string())),
        }
    }

    /// Current validation errors
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Messages recorded for one path
    pub fn field_errors(&self, path: &str) -> &[String] {
        self.errors.get(path)
    }

    /// Replace all validation errors
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Remove all validation errors
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Current submission status
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Message of the most recent submission fault
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Enter `Submitting`, rejecting a second concurrent submission
    pub fn begin_submission(&mut self) -> Result<(), FormError> {
        self.status = transition(self.status, SubmissionStatus::Submitting)?;
        self.last_error = None;
        Ok(())
    }

    /// Record the handler's result
    pub fn finish_submission(&mut self, result: Result<(), String>) -> Result<(), FormError> {
        match result {
            Ok(()) => {
                self.status = transition(self.status, SubmissionStatus::Success)?;
            }
            Err(message) => {
                self.status = transition(self.status, SubmissionStatus::Failed)?;
                self.last_error = Some(message);
            }
        }
        Ok(())
    }
}

fn list_field<'a>(config: &'a FormConfig, path: &str) -> Result<&'a ListField, FormError> {
    match config.find(path) {
        Some(FormField::List(list)) => Ok(list),
        Some(_) => Err(FormError::NotAList(path.to_string())),
        None => Err(FormError::UnknownField(path.to_string())),
    }
}
