use std::collections::HashSet;
use regex::Regex;

use crate::form::{FormConfig, FormField, OptionsKind, ValidationRule};
use crate::types::Literal;
use crate::validation::{error_codes, visit_fields, ValidationError, Validator};

/// Validates per-field settings that cannot be expressed in the wire format:
/// consistent bounds, usable option lists, compilable patterns and defaults
/// that fit the field kind.
pub struct RuleValidator;

impl RuleValidator {
    /// Create a new rule validator
    pub fn new() -> Self {
        RuleValidator
    }

    fn check_bounds<T: PartialOrd + std::fmt::Display>(
        &self,
        id: &str,
        names: (&str, &str),
        bounds: (Option<T>, Option<T>),
        location: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        if let (Some(low), Some(high)) = bounds {
            if low > high {
                errors.push(ValidationError {
                    code: error_codes::INVALID_BOUNDS,
                    message: format!(
                        "Field '{}' has {} ({}) greater than {} ({})",
                        id, names.0, low, names.1, high
                    ),
                    path: Some(location.to_string()),
                });
            }
        }
    }

    fn check_pattern(&self, id: &str, pattern: &str, location: &str, errors: &mut Vec<ValidationError>) {
        if let Err(e) = Regex::new(pattern) {
            errors.push(ValidationError {
                code: error_codes::INVALID_RULE,
                message: format!("Field '{}' has an invalid pattern '{}': {}", id, pattern, e),
                path: Some(format!("{}.validation", location)),
            });
        }
    }

    fn check_rules(&self, id: &str, rules: &[ValidationRule], location: &str, errors: &mut Vec<ValidationError>) {
        for rule in rules {
            if let ValidationRule::Pattern(pattern) = rule {
                self.check_pattern(id, pattern, location, errors);
            }
        }
    }

    fn check_field(&self, field: &FormField, location: &str, errors: &mut Vec<ValidationError>) {
        let id = field.id();
        let default = field.base().default_value.as_ref();

        match field {
            FormField::Input(input) => {
                self.check_bounds(id, ("min", "max"), (input.min, input.max), location, errors);
                if let Some(validation) = &input.validation {
                    self.check_rules(id, &validation.rules, location, errors);
                }
                if let Some(Literal::List(_)) = default {
                    self.invalid_default(id, "a single value", location, errors);
                }
            }
            FormField::Textarea(textarea) => {
                if let Some(validation) = &textarea.validation {
                    self.check_rules(id, &validation.rules, location, errors);
                }
                if let Some(Literal::List(_)) = default {
                    self.invalid_default(id, "a single value", location, errors);
                }
            }
            FormField::Options(options) => {
                if options.options.is_empty() {
                    errors.push(ValidationError {
                        code: error_codes::INVALID_OPTIONS,
                        message: format!("Field '{}' must offer at least one option", id),
                        path: Some(location.to_string()),
                    });
                }

                let mut seen = HashSet::new();
                for (idx, option) in options.options.iter().enumerate() {
                    if !seen.insert(option.value.to_json().to_string()) {
                        errors.push(ValidationError {
                            code: error_codes::INVALID_OPTIONS,
                            message: format!(
                                "Field '{}' has duplicate option value '{}'",
                                id, option.value
                            ),
                            path: Some(format!("{}.options[{}]", location, idx)),
                        });
                    }
                }

                if let Some(pattern) = options.validation.as_ref().and_then(|v| v.pattern.as_deref()) {
                    self.check_pattern(id, pattern, location, errors);
                }

                match (options.kind, default) {
                    (OptionsKind::CheckboxGroup, Some(value)) if !value.is_list() => {
                        self.invalid_default(id, "a list of option values", location, errors);
                    }
                    (OptionsKind::Select | OptionsKind::Radio, Some(Literal::List(_))) => {
                        self.invalid_default(id, "a single option value", location, errors);
                    }
                    _ => {}
                }
            }
            FormField::Checkbox(_) => {
                if let Some(value) = default {
                    if !value.is_bool() {
                        self.invalid_default(id, "a boolean", location, errors);
                    }
                }
            }
            FormField::Group(_) => {
                if default.is_some() {
                    self.invalid_default(id, "absent; group values come from their fields", location, errors);
                }
            }
            FormField::List(list) => {
                self.check_bounds(
                    id,
                    ("minItems", "maxItems"),
                    (list.min_items, list.max_items),
                    location,
                    errors,
                );
                if default.is_some() {
                    self.invalid_default(id, "absent; list items come from minItems", location, errors);
                }
            }
        }
    }

    fn invalid_default(&self, id: &str, expected: &str, location: &str, errors: &mut Vec<ValidationError>) {
        errors.push(ValidationError {
            code: error_codes::INVALID_DEFAULT,
            message: format!("Default value of field '{}' must be {}", id, expected),
            path: Some(format!("{}.defaultValue", location)),
        });
    }
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RuleValidator {
    fn validate(&self, config: &FormConfig) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        visit_fields(&config.fields, "", &mut |field: &FormField, location: &str| {
            self.check_field(field, location, &mut errors);
        });
        errors
    }
}
