use std::collections::HashSet;
use crate::form::{FormConfig, FormField};
use crate::validation::{field_location, ValidationError, error_codes, Validator};

/// Validates field identifiers: non-empty and unique within each scope.
///
/// A scope is the top level of the form or the nested field set of one
/// group or list.
pub struct IdentifierValidator;

impl IdentifierValidator {
    /// Create a new identifier validator
    pub fn new() -> Self {
        IdentifierValidator
    }

    fn validate_scope(&self, fields: &[FormField], path: &str, errors: &mut Vec<ValidationError>) {
        let mut seen = HashSet::with_capacity(fields.len());
        let mut reported = HashSet::new();

        for (idx, field) in fields.iter().enumerate() {
            let location = field_location(path, idx);
            let id = field.id();

            if id.trim().is_empty() {
                errors.push(ValidationError {
                    code: error_codes::INVALID_ID,
                    message: format!("Field with label '{}' has an empty id", field.label()),
                    path: Some(location.clone()),
                });
            } else if id.contains('.') {
                errors.push(ValidationError {
                    code: error_codes::INVALID_ID,
                    message: format!("Field id '{}' must not contain '.'", id),
                    path: Some(location.clone()),
                });
            } else if !seen.insert(id) && reported.insert(id) {
                errors.push(ValidationError {
                    code: error_codes::DUPLICATE_ID,
                    message: format!(
                        "Duplicate field id: '{}' - field ids must be unique within a scope",
                        id
                    ),
                    path: Some(location.clone()),
                });
            }

            if !field.children().is_empty() {
                self.validate_scope(field.children(), &location, errors);
            }
        }
    }
}

impl Default for IdentifierValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for IdentifierValidator {
    fn validate(&self, config: &FormConfig) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.validate_scope(&config.fields, "", &mut errors);
        errors
    }
}
