/// Field values, errors and submission status of one form instance
pub mod state;

/// Visibility conditions
pub mod condition;

/// Validation of live values
pub mod validation;

/// Submission lifecycle and the host submit handler
pub mod submission;
