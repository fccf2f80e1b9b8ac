use dynaform_schema::text::{char_len, is_valid_email};
use dynaform_schema::{
    join_path, FormConfig, FormField, InputField, InputKind, ListField, OptionsField, RuleValidation,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::domain::condition::{as_number, as_text, values_equal, ConditionEvaluator, Scope};
use crate::types::{FieldErrors, FormData};

/// Message recorded when a required field is empty
pub const REQUIRED_MESSAGE: &str = "required";

/// Validates live values against a form configuration.
///
/// Only visible fields are checked. For each field the required check runs
/// first, then the type-specific checks; the first failure is the field's
/// error. Group and list fields are then descended into, with nested errors
/// keyed `group.field` and `list.<index>.field`.
#[derive(Clone)]
pub struct FormValidator {
    evaluator: Arc<dyn ConditionEvaluator>,
}

impl FormValidator {
    /// Create a validator that decides visibility with `evaluator`
    pub fn new(evaluator: Arc<dyn ConditionEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Validate all visible fields and return their errors
    pub fn validate(&self, config: &FormConfig, values: &FormData) -> FieldErrors {
        let mut errors = FieldErrors::new();
        self.validate_fields(&config.fields, &Scope::root(values), None, &mut errors);
        debug!(form = %config.id, invalid = errors.len(), "Validated form");
        errors
    }

    fn validate_fields(
        &self,
        fields: &[FormField],
        scope: &Scope<'_>,
        parent: Option<&str>,
        errors: &mut FieldErrors,
    ) {
        let empty = FormData::new();

        for field in fields {
            if !self.evaluator.is_visible(field.conditions(), scope) {
                continue;
            }

            let path = join_path(parent, field.id());
            let value = scope.local().get(field.id()).unwrap_or(&Value::Null);

            if let Some(message) = check_field(field, value) {
                errors.add(path.clone(), message);
            }

            match field {
                FormField::Group(group) => {
                    let frame = match value {
                        Value::Object(obj) => obj,
                        _ => &empty,
                    };
                    self.validate_fields(&group.fields, &scope.nested(frame), Some(&path), errors);
                }
                FormField::List(list) => {
                    if let Value::Array(items) = value {
                        for (idx, item) in items.iter().enumerate() {
                            let frame = match item {
                                Value::Object(obj) => obj,
                                _ => &empty,
                            };
                            let item_path = format!("{}.{}", path, idx);
                            self.validate_fields(
                                &list.fields,
                                &scope.nested(frame),
                                Some(&item_path),
                                errors,
                            );
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

/// Whether a value counts as "not provided": null, `""` or an empty array.
///
/// `false` is a real answer for most fields (a radio offering `false`, say);
/// only a checkbox treats it as unchecked, see [`is_unanswered`].
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Whether `field` has no answer for the purpose of `required`
pub fn is_unanswered(field: &FormField, value: &Value) -> bool {
    match field {
        FormField::Checkbox(_) => value != &Value::Bool(true),
        _ => is_empty_value(value),
    }
}

/// First failing check for one field's own value
fn check_field(field: &FormField, value: &Value) -> Option<String> {
    if is_unanswered(field, value) {
        if field.is_required() {
            return Some(REQUIRED_MESSAGE.to_string());
        }
        // An empty list still has an item count to check
        return match field {
            FormField::List(list) => check_list(list, value),
            _ => None,
        };
    }

    match field {
        FormField::Input(input) => check_input(input, value),
        FormField::Textarea(textarea) => check_rules(textarea.validation.as_ref(), value),
        FormField::Options(options) => check_options(options, value),
        FormField::List(list) => check_list(list, value),
        FormField::Checkbox(_) | FormField::Group(_) => None,
    }
}

fn check_input(input: &InputField, value: &Value) -> Option<String> {
    match input.kind {
        InputKind::Number => {
            let number = match as_number(value) {
                Some(n) => n,
                None => return Some("must be a number".to_string()),
            };
            if let Some(min) = input.min {
                if number < min {
                    return Some(format!("must be at least {}", min));
                }
            }
            if let Some(max) = input.max {
                if number > max {
                    return Some(format!("must be at most {}", max));
                }
            }
        }
        InputKind::Text | InputKind::Email => {
            let length = char_len(&as_text(value));
            if let Some(min) = input.min {
                if (length as f64) < min {
                    return Some(format!("must be at least {} characters", min));
                }
            }
            if let Some(max) = input.max {
                if (length as f64) > max {
                    return Some(format!("must be at most {} characters", max));
                }
            }
            if input.kind == InputKind::Email && !is_valid_email(as_text(value).trim()) {
                return Some(custom_message(
                    input.validation.as_ref().and_then(|v| v.message.as_deref()),
                    "must be a valid email address",
                ));
            }
        }
    }

    check_rules(input.validation.as_ref(), value)
}

fn check_rules(validation: Option<&RuleValidation>, value: &Value) -> Option<String> {
    let validation = validation?;
    let text = as_text(value);
    validation
        .rules
        .iter()
        .find(|rule| !rule.check(&text))
        .map(|rule| custom_message(validation.message.as_deref(), &rule.default_message()))
}

fn check_options(options: &OptionsField, value: &Value) -> Option<String> {
    let selected: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let declared: Vec<Value> = options.options.iter().map(|o| o.value.to_json()).collect();
    let unknown = selected
        .iter()
        .any(|choice| !declared.iter().any(|option| values_equal(choice, option)));
    if unknown {
        return Some("must be one of the available options".to_string());
    }

    let validation = options.validation.as_ref()?;
    let pattern = validation.pattern.as_deref()?;
    let mismatch = selected.iter().any(|choice| {
        !dynaform_schema::text::matches_pattern(pattern, &as_text(choice)).unwrap_or(false)
    });
    mismatch.then(|| custom_message(validation.message.as_deref(), "has an invalid format"))
}

fn check_list(list: &ListField, value: &Value) -> Option<String> {
    let count = match value {
        Value::Array(items) => items.len(),
        Value::Null => 0,
        _ => return Some("must be a list".to_string()),
    };
    if let Some(min) = list.min_items {
        if count < min {
            return Some(format!("must have at least {} items", min));
        }
    }
    if let Some(max) = list.max_items {
        if count > max {
            return Some(format!("must have at most {} items", max));
        }
    }
    None
}

fn custom_message(custom: Option<&str>, fallback: &str) -> String {
    custom.unwrap_or(fallback).to_string()
}
