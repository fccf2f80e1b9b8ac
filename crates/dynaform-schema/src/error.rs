use thiserror::Error;
use crate::validation::ValidationError;
use std::fmt;

/// All possible errors that can occur while loading a form configuration
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Errors that occur during JSON parsing
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Errors that occur during YAML parsing
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A single validation error
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    /// Multiple validation errors
    #[error("{}", MultipleErrorsFormat(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

// Helper struct to format multiple errors
struct MultipleErrorsFormat<'a>(&'a [ValidationError]);

impl fmt::Display for MultipleErrorsFormat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multiple validation errors ({} issues):", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, err)?;
        }
        Ok(())
    }
}

impl SchemaError {
    /// Create a SchemaError from a vector of validation errors
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        let mut errors = errors;
        match errors.len() {
            0 => SchemaError::InternalError(
                "Called from_validation_errors with empty vector".to_string(),
            ),
            1 => match errors.pop() {
                Some(error) => SchemaError::ValidationError(error),
                None => SchemaError::InternalError("Validation error vanished".to_string()),
            },
            _ => SchemaError::MultipleValidationErrors(errors),
        }
    }

    /// The validation errors carried by this error, if any
    pub fn validation_errors(&self) -> Vec<&ValidationError> {
        match self {
            SchemaError::ValidationError(err) => vec![err],
            SchemaError::MultipleValidationErrors(errs) => errs.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SchemaError::JsonError(_) => "ERR_SCHEMA_JSON_PARSE",
            SchemaError::YamlError(_) => "ERR_SCHEMA_YAML_PARSE",
            SchemaError::ValidationError(err) => err.code,
            SchemaError::MultipleValidationErrors(_) => "ERR_SCHEMA_VALIDATION_MULTIPLE",
            SchemaError::InternalError(_) => "ERR_SCHEMA_INTERNAL",
        }
    }
}
