//! Assertion utilities for validating the state of a form.

use dynaform_core::{FormController, SubmissionStatus};
use serde_json::Value;
use thiserror::Error;

/// Error type for form state assertion failures
#[derive(Debug, Error)]
pub enum FormStateAssertionError {
    #[error("Invalid submission status: expected {expected}, got {actual}")]
    InvalidStatus {
        expected: SubmissionStatus,
        actual: SubmissionStatus,
    },

    #[error("Missing value at '{0}'")]
    MissingValue(String),

    #[error("Invalid value at '{path}': expected {expected}, got {actual}")]
    InvalidValue {
        path: String,
        expected: Value,
        actual: Value,
    },

    #[error("Invalid errors at '{path}': expected {expected:?}, got {actual:?}")]
    InvalidErrors {
        path: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Expected no errors, got {0:?}")]
    UnexpectedErrors(Vec<String>),

    #[error("Field '{path}' visibility: expected {expected}, got {actual}")]
    InvalidVisibility {
        path: String,
        expected: bool,
        actual: bool,
    },
}

/// Asserts that a form is in the expected submission status.
pub fn assert_status(
    form: &FormController,
    expected: SubmissionStatus,
) -> Result<(), FormStateAssertionError> {
    let actual = form.status();
    if actual != expected {
        return Err(FormStateAssertionError::InvalidStatus { expected, actual });
    }
    Ok(())
}

/// Asserts that the value at `path` equals `expected`.
pub fn assert_value(
    form: &FormController,
    path: &str,
    expected: &Value,
) -> Result<(), FormStateAssertionError> {
    let actual = form
        .value(path)
        .ok_or_else(|| FormStateAssertionError::MissingValue(path.to_string()))?;
    if &actual != expected {
        return Err(FormStateAssertionError::InvalidValue {
            path: path.to_string(),
            expected: expected.clone(),
            actual,
        });
    }
    Ok(())
}

/// Asserts that the errors recorded for `path` are exactly `expected`.
///
/// Pass an empty slice to assert that the field has no errors.
pub fn assert_field_errors(
    form: &FormController,
    path: &str,
    expected: &[&str],
) -> Result<(), FormStateAssertionError> {
    let actual = form.field_errors(path);
    if actual.iter().map(String::as_str).ne(expected.iter().copied()) {
        return Err(FormStateAssertionError::InvalidErrors {
            path: path.to_string(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
            actual,
        });
    }
    Ok(())
}

/// Asserts that the form currently records no errors at all.
pub fn assert_no_errors(form: &FormController) -> Result<(), FormStateAssertionError> {
    let errors = form.errors();
    if !errors.is_empty() {
        return Err(FormStateAssertionError::UnexpectedErrors(
            errors.paths().map(str::to_string).collect(),
        ));
    }
    Ok(())
}

/// Asserts the visibility of the field at `path`.
pub fn assert_visible(
    form: &FormController,
    path: &str,
    expected: bool,
) -> Result<(), FormStateAssertionError> {
    let actual = form.is_visible(path);
    if actual != expected {
        return Err(FormStateAssertionError::InvalidVisibility {
            path: path.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
