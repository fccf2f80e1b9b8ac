//! # Dynaform Schema
//!
//! Declarative form configurations for the Dynaform engine. This crate parses
//! JSON or YAML form documents into a typed model and checks them for the
//! structural mistakes the wire format cannot rule out on its own.
//!
//! ## Features
//!
//! * JSON and YAML form documents
//! * Closed set of field kinds, including nested groups and repeatable lists
//! * Visibility conditions with lexical field references
//! * Load-time checks for ids, references, bounds, options and defaults
//!
//! ## Example
//!
//! ```
//! use dynaform_schema::{parse_and_validate_form_config, SourceFormat};
//!
//! let yaml = r#"
//! id: newsletter
//! title: Newsletter
//! fields:
//!   - type: text
//!     id: name
//!     label: Name
//!     required: true
//!   - type: checkbox
//!     id: subscribe
//!     label: Subscribe
//!   - type: email
//!     id: email
//!     label: E-mail
//!     required: true
//!     conditions:
//!       - field: subscribe
//!         operator: "=="
//!         value: true
//! "#;
//!
//! let config = parse_and_validate_form_config(yaml, SourceFormat::Yaml).unwrap();
//! assert_eq!(config.fields.len(), 3);
//! ```

mod error;
mod parser;
mod types;
mod utils;

pub mod form;
pub mod validation;

pub use error::SchemaError;
pub use form::{
    CheckboxField, Condition, FieldBase, FieldEntry, FieldOption, FieldType, FormConfig,
    FormField, GroupField, InputField, InputKind, ListField, Operator, OptionsField,
    OptionsKind, OutputFormat, PatternValidation, RuleValidation, TextareaField, ValidationRule,
};
pub use parser::{parse_form_config, parse_form_config_value, SourceFormat};
pub use types::{join_path, path_segments, Literal, Scalar};
pub use utils::text;
pub use validation::ValidationError;

/// Parse and validate a form configuration document.
///
/// This function performs both steps of loading:
/// 1. Parses the text into a [`FormConfig`]
/// 2. Runs every load-time validator and aggregates their findings
///
/// # Errors
///
/// * Invalid JSON or YAML syntax, or a document that does not fit the model
///   (unknown field type, missing `options` on a select, ...)
/// * Validation errors (duplicate ids, unknown condition targets, inverted
///   bounds, broken patterns, mismatched defaults)
///
/// # Examples
///
/// Handling validation errors:
///
/// ```
/// use dynaform_schema::{parse_and_validate_form_config, SourceFormat};
///
/// let json = r#"{
///   "id": "broken",
///   "fields": [
///     { "type": "text", "id": "name", "label": "Name",
///       "conditions": [ { "field": "missing", "operator": "==", "value": "x" } ] }
///   ]
/// }"#;
///
/// let result = parse_and_validate_form_config(json, SourceFormat::Json);
/// let error = result.unwrap_err();
/// assert!(error.error_code().contains("INVALID_REFERENCE"));
/// ```
pub fn parse_and_validate_form_config(
    input: &str,
    format: SourceFormat,
) -> Result<FormConfig, SchemaError> {
    let config = parser::parse_form_config(input, format)?;
    validation::validate_form_config(&config)?;
    Ok(config)
}

/// Returns a version string for the schema crate
///
/// ```
/// assert!(dynaform_schema::version().starts_with("0."));
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_document() {
        let json = r#"{
            "id": "signup",
            "title": "Sign up",
            "submitLabel": "Create account",
            "fields": [
                { "type": "text", "id": "name", "label": "Name", "required": true },
                { "type": "number", "id": "age", "label": "Age", "min": 18 },
                {
                    "type": "group",
                    "id": "address",
                    "label": "Address",
                    "fields": [
                        { "type": "text", "id": "city", "label": "City" },
                        {
                            "type": "text",
                            "id": "zip",
                            "label": "Zip",
                            "conditions": [ { "field": "city", "operator": "!=", "value": "" } ]
                        }
                    ]
                }
            ]
        }"#;

        let result = parse_and_validate_form_config(json, SourceFormat::Json);
        assert!(result.is_ok(), "Failed to parse valid document: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.id, "signup");
        assert_eq!(config.submit_label.as_deref(), Some("Create account"));
        assert_eq!(config.fields.len(), 3);
        assert_eq!(config.fields[2].children().len(), 2);
    }

    #[test]
    fn test_invalid_yaml_syntax() {
        let yaml = r#"
        id: broken
        fields: [
          - type: text
        "#;

        let result = parse_and_validate_form_config(yaml, SourceFormat::Yaml);
        assert!(matches!(result.unwrap_err(), SchemaError::YamlError(_)));
    }

    #[test]
    fn test_duplicate_ids() {
        let json = r#"{
            "id": "dupes",
            "fields": [
                { "type": "text", "id": "name", "label": "Name" },
                { "type": "email", "id": "name", "label": "Also name" }
            ]
        }"#;

        let err = parse_and_validate_form_config(json, SourceFormat::Json).unwrap_err();
        assert!(err.error_code().contains("DUPLICATE_ID"));
    }

    #[test]
    fn test_errors_are_aggregated() {
        let json = r#"{
            "id": "many",
            "fields": [
                { "type": "number", "id": "n", "label": "N", "min": 5, "max": 1 },
                { "type": "checkbox", "id": "c", "label": "C", "defaultValue": "yes",
                  "conditions": [ { "field": "ghost", "operator": "==", "value": 1 } ] }
            ]
        }"#;

        let err = parse_and_validate_form_config(json, SourceFormat::Json).unwrap_err();
        assert_eq!(err.error_code(), "ERR_SCHEMA_VALIDATION_MULTIPLE");
        assert_eq!(err.validation_errors().len(), 3);
    }

    #[test]
    fn test_empty_form() {
        let result = parse_and_validate_form_config(r#"{ "id": "empty" }"#, SourceFormat::Json);
        assert!(result.is_ok(), "Empty form should be valid");
    }

    #[test]
    fn test_version_function() {
        let ver = version();
        assert!(!ver.is_empty());
        assert!(ver.contains('.'));
    }
}
