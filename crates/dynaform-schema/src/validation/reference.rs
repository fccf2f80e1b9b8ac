use std::collections::HashSet;
use crate::form::{FormConfig, FormField};
use crate::validation::{field_location, ValidationError, error_codes, Validator};

/// Validates that every condition targets a field that exists.
///
/// Conditions are resolved lexically: a field may reference its siblings or
/// any field of an enclosing scope, out to the top level of the form. A field
/// may not condition its visibility on its own value.
pub struct ConditionReferenceValidator;

impl ConditionReferenceValidator {
    /// Create a new reference validator
    pub fn new() -> Self {
        ConditionReferenceValidator
    }

    fn validate_scope<'a>(
        &self,
        fields: &'a [FormField],
        enclosing: &mut Vec<HashSet<&'a str>>,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        enclosing.push(fields.iter().map(|f| f.id()).collect());

        for (idx, field) in fields.iter().enumerate() {
            let location = field_location(path, idx);

            for (cond_idx, condition) in field.conditions().iter().enumerate() {
                let target = condition.field.as_str();
                let cond_path = format!("{}.conditions[{}]", location, cond_idx);

                if target == field.id() {
                    errors.push(ValidationError {
                        code: error_codes::INVALID_REFERENCE,
                        message: format!("Field '{}' has a condition on itself", field.id()),
                        path: Some(cond_path),
                    });
                    continue;
                }

                if !enclosing.iter().any(|scope| scope.contains(target)) {
                    let mut available: Vec<&str> =
                        enclosing.iter().flat_map(|scope| scope.iter().copied()).collect();
                    available.sort_unstable();
                    errors.push(ValidationError {
                        code: error_codes::INVALID_REFERENCE,
                        message: format!(
                            "Condition on field '{}' refers to unknown field '{}'. Available fields: {}",
                            field.id(),
                            target,
                            available
                                .iter()
                                .map(|id| format!("'{}'", id))
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                        path: Some(cond_path),
                    });
                }
            }

            if !field.children().is_empty() {
                self.validate_scope(field.children(), enclosing, &location, errors);
            }
        }

        enclosing.pop();
    }
}

impl Default for ConditionReferenceValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ConditionReferenceValidator {
    fn validate(&self, config: &FormConfig) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut enclosing = Vec::new();
        self.validate_scope(&config.fields, &mut enclosing, "", &mut errors);
        errors
    }
}
