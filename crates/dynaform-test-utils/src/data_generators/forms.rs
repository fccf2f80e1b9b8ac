//! Canned form documents.

use dynaform_core::FormData;
use serde_json::Value;

/// Creates a minimal valid form document in JSON.
///
/// # Returns
///
/// A JSON document with a single optional text field.
pub fn create_minimal_form_json() -> String {
    r#"{
  "id": "minimal",
  "fields": [
    { "type": "text", "id": "name", "label": "Name" }
  ]
}"#
    .to_string()
}

/// Creates the newsletter form as YAML with the specified id.
///
/// # Arguments
///
/// * `form_id` - The id to give the form
pub fn create_newsletter_yaml(form_id: &str) -> String {
    format!(
        r#"
id: {}
title: Newsletter
submitLabel: Sign up
fields:
  - type: text
    id: name
    label: Name
    required: true
  - type: checkbox
    id: subscribe
    label: Subscribe
  - type: email
    id: email
    label: E-mail
    required: true
    conditions:
      - field: subscribe
        operator: "=="
        value: true
"#,
        form_id
    )
}

/// Creates a form document that exercises nesting: a group whose fields
/// depend on an outer field and a bounded list of contacts.
pub fn create_nested_form_json() -> String {
    r#"{
  "id": "profile",
  "fields": [
    { "type": "radio", "id": "kind", "label": "Kind",
      "options": [ { "value": "person", "label": "Person" }, { "value": "company", "label": "Company" } ],
      "required": true },
    { "type": "group", "id": "company", "label": "Company",
      "conditions": [ { "field": "kind", "operator": "==", "value": "company" } ],
      "fields": [
        { "type": "text", "id": "name", "label": "Company name", "required": true },
        { "type": "number", "id": "employees", "label": "Employees", "min": 1 }
      ] },
    { "type": "list", "id": "contacts", "label": "Contacts", "minItems": 1, "maxItems": 3,
      "fields": [
        { "type": "email", "id": "email", "label": "E-mail", "required": true },
        { "type": "checkbox", "id": "primary", "label": "Primary" },
        { "type": "text", "id": "phone", "label": "Phone",
          "conditions": [ { "field": "primary", "operator": "==", "value": true } ] }
      ] }
  ]
}"#
    .to_string()
}

/// Creates a form document that parses but fails load-time validation
/// because a condition refers to a field that does not exist.
pub fn create_dangling_reference_json() -> String {
    r#"{
  "id": "dangling",
  "fields": [
    { "type": "text", "id": "name", "label": "Name",
      "conditions": [ { "field": "ghost", "operator": "!=", "value": "" } ] }
  ]
}"#
    .to_string()
}

/// Build [`FormData`] from a JSON object literal; anything else yields an empty map
pub fn form_data(value: Value) -> FormData {
    match value {
        Value::Object(map) => map,
        _ => FormData::new(),
    }
}
