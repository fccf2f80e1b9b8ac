use std::fmt;
use std::error::Error;
use crate::form::{FormConfig, FormField};
use crate::error::SchemaError;

mod identifiers;
mod reference;
mod rules;

pub use identifiers::IdentifierValidator;
pub use reference::ConditionReferenceValidator;
pub use rules::RuleValidator;

/// Represents a structural problem found in a form configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code (should be a constant identifier)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Optional path to the location of the error (e.g., "fields[0].fields[2]")
    pub path: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl Error for ValidationError {}

/// Validation error codes
pub mod error_codes {
    /// Condition references a field that is not in scope
    pub const INVALID_REFERENCE: &str = "ERR_SCHEMA_VALIDATION_INVALID_REFERENCE";

    /// Duplicate field id within one scope
    pub const DUPLICATE_ID: &str = "ERR_SCHEMA_VALIDATION_DUPLICATE_ID";

    /// Field id is empty or contains a path separator
    pub const INVALID_ID: &str = "ERR_SCHEMA_VALIDATION_INVALID_ID";

    /// min/max or minItems/maxItems are inconsistent
    pub const INVALID_BOUNDS: &str = "ERR_SCHEMA_VALIDATION_INVALID_BOUNDS";

    /// A validation rule or pattern cannot be used
    pub const INVALID_RULE: &str = "ERR_SCHEMA_VALIDATION_INVALID_RULE";

    /// Option list is empty or has duplicate values
    pub const INVALID_OPTIONS: &str = "ERR_SCHEMA_VALIDATION_INVALID_OPTIONS";

    /// Default value does not fit the field kind
    pub const INVALID_DEFAULT: &str = "ERR_SCHEMA_VALIDATION_INVALID_DEFAULT";
}

/// A trait for validators that check specific aspects of a form configuration
pub trait Validator {
    /// Validate the configuration and return a list of validation errors (if any)
    fn validate(&self, config: &FormConfig) -> Vec<ValidationError>;
}

/// Location string for the field at `index` under `parent`
pub(crate) fn field_location(parent: &str, index: usize) -> String {
    if parent.is_empty() {
        format!("fields[{}]", index)
    } else {
        format!("{}.fields[{}]", parent, index)
    }
}

/// Visit every field with its location string, depth-first
pub(crate) fn visit_fields<'a, F>(fields: &'a [FormField], parent: &str, visit: &mut F)
where
    F: FnMut(&'a FormField, &str),
{
    for (idx, field) in fields.iter().enumerate() {
        let location = field_location(parent, idx);
        visit(field, &location);
        visit_fields(field.children(), &location, visit);
    }
}

/// Run all load-time validators and return every problem found
pub fn collect_errors(config: &FormConfig) -> Vec<ValidationError> {
    let validators: Vec<Box<dyn Validator>> = vec![
        Box::new(IdentifierValidator::new()),
        Box::new(ConditionReferenceValidator::new()),
        Box::new(RuleValidator::new()),
    ];

    let mut errors = Vec::new();
    for validator in validators {
        errors.extend(validator.validate(config));
    }
    errors
}

/// Validate a parsed form configuration
pub fn validate_form_config(config: &FormConfig) -> Result<(), SchemaError> {
    let errors = collect_errors(config);

    if !errors.is_empty() {
        return Err(SchemaError::from_validation_errors(errors));
    }

    Ok(())
}
