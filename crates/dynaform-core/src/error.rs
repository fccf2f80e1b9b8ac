use thiserror::Error;
use dynaform_schema::SchemaError;

use crate::domain::submission::SubmissionStatus;

/// Errors raised by the form runtime
#[derive(Error, Debug)]
pub enum FormError {
    /// No value exists at the given path
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A list operation targeted a field that is not a list
    #[error("Field is not a list: {0}")]
    NotAList(String),

    /// Adding or removing an item would break minItems/maxItems
    #[error("List bounds violated for '{path}': {message}")]
    ListBounds {
        /// Path of the list field
        path: String,
        /// What went wrong
        message: String,
    },

    /// A submission is already in flight
    #[error("Form submission is already in progress")]
    AlreadySubmitting,

    /// The submission status cannot move from one state to the other
    #[error("Invalid submission state transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status
        from: SubmissionStatus,
        /// Requested status
        to: SubmissionStatus,
    },

    /// Rendering form data failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The form configuration is invalid
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for FormError {
    fn from(err: serde_yaml::Error) -> Self {
        FormError::Serialization(err.to_string())
    }
}

/// Errors raised while fetching a form configuration
#[derive(Error, Debug)]
pub enum LoadError {
    /// The request could not be sent or its body could not be read
    #[error("HTTP request to {url} failed: {message}")]
    Http {
        /// Requested URL
        url: String,
        /// Transport error description
        message: String,
    },

    /// The server answered with a non-success status
    #[error("HTTP request to {url} returned status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Reading a local file failed
    #[error("Could not read {path}: {error}")]
    Io {
        /// File path
        path: String,
        /// Underlying I/O error
        #[source]
        error: std::io::Error,
    },

    /// The document was fetched but is not a valid form configuration
    #[error("Invalid form configuration from {location}: {error}")]
    Schema {
        /// Source the document was read from
        location: String,
        /// Parse or validation failure
        #[source]
        error: SchemaError,
    },

    /// The source string cannot be loaded at all
    #[error("Invalid configuration source: {0}")]
    InvalidSource(String),
}

impl LoadError {
    /// Schema validation problems carried by this error, if any
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            LoadError::Schema { error, .. } => Some(error),
            _ => None,
        }
    }
}
