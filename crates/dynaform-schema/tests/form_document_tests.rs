use dynaform_schema::{
    parse_and_validate_form_config, FieldType, FormField, Literal, Operator, OutputFormat,
    SchemaError, SourceFormat, ValidationRule,
};

// Helper function to check whether any aggregated error carries the code
fn error_contains(err: &SchemaError, expected_code: &str) -> bool {
    let error_str = format!("{:?}", err);
    error_str.contains(expected_code)
}

const REGISTRATION_YAML: &str = r#"
id: registration
title: Event registration
description: Tell us who is coming
submitLabel: Register
resetLabel: Start over
outputFormat: yaml
fields:
  - type: text
    id: name
    label: Full name
    required: true
    validation:
      rules: ["minLength:2", "maxLength:80"]
      message: Please enter your full name
  - type: email
    id: email
    label: E-mail
    required: true
  - type: number
    id: guests
    label: Guests
    min: 0
    max: 4
    defaultValue: 0
  - type: select
    id: ticket
    label: Ticket
    options:
      - { value: standard, label: Standard }
      - { value: vip, label: VIP }
    defaultValue: standard
  - type: checkbox-group
    id: sessions
    label: Sessions
    options:
      - { value: morning, label: Morning }
      - { value: afternoon, label: Afternoon }
  - type: group
    id: vip_details
    label: VIP details
    conditions:
      - { field: ticket, operator: "==", value: vip }
    fields:
      - type: textarea
        id: requests
        label: Special requests
        rows: 4
  - type: list
    id: companions
    label: Companions
    minItems: 0
    maxItems: 4
    addButtonLabel: Add companion
    conditions:
      - { field: guests, operator: ">", value: 0 }
    fields:
      - type: text
        id: name
        label: Name
        required: true
      - type: checkbox
        id: vegetarian
        label: Vegetarian
        defaultValue: false
  - type: checkbox
    id: terms
    label: I accept the terms
    required: true
"#;

#[test]
fn test_parse_and_validate_registration_form() {
    let config = parse_and_validate_form_config(REGISTRATION_YAML, SourceFormat::Yaml)
        .expect("registration form should be valid");

    assert_eq!(config.id, "registration");
    assert_eq!(config.output_format, OutputFormat::Yaml);
    assert_eq!(config.reset_label.as_deref(), Some("Start over"));

    let types: Vec<FieldType> = config.fields.iter().map(|f| f.field_type()).collect();
    assert_eq!(
        types,
        vec![
            FieldType::Text,
            FieldType::Email,
            FieldType::Number,
            FieldType::Select,
            FieldType::CheckboxGroup,
            FieldType::Group,
            FieldType::List,
            FieldType::Checkbox,
        ]
    );

    match &config.fields[0] {
        FormField::Input(input) => {
            let validation = input.validation.as_ref().unwrap();
            assert_eq!(
                validation.rules,
                vec![ValidationRule::MinLength(2), ValidationRule::MaxLength(80)]
            );
        }
        other => panic!("Expected input field, got {:?}", other),
    }

    let vip = &config.fields[5];
    assert_eq!(vip.conditions()[0].operator, Operator::Equals);
    assert_eq!(vip.conditions()[0].value, Literal::Text("vip".into()));

    let companion_vegetarian = config.find("companions.0.vegetarian").unwrap();
    assert_eq!(companion_vegetarian.base().default_value, Some(Literal::Bool(false)));
}

#[test]
fn test_json_and_yaml_agree() {
    let from_yaml = parse_and_validate_form_config(REGISTRATION_YAML, SourceFormat::Yaml).unwrap();
    let json = serde_json::to_string(&from_yaml).unwrap();
    let from_json = parse_and_validate_form_config(&json, SourceFormat::Json).unwrap();
    assert_eq!(from_yaml, from_json);
}

#[test]
fn test_nested_condition_may_reference_outer_field() {
    let json = r#"{
        "id": "nested",
        "fields": [
            { "type": "checkbox", "id": "has_phone", "label": "Has phone" },
            {
                "type": "list",
                "id": "contacts",
                "label": "Contacts",
                "fields": [
                    { "type": "text", "id": "phone", "label": "Phone",
                      "conditions": [ { "field": "has_phone", "operator": "==", "value": true } ] }
                ]
            }
        ]
    }"#;

    assert!(parse_and_validate_form_config(json, SourceFormat::Json).is_ok());
}

#[test]
fn test_unknown_field_type() {
    let json = r#"{ "id": "x", "fields": [ { "type": "slider", "id": "s", "label": "S" } ] }"#;
    let err = parse_and_validate_form_config(json, SourceFormat::Json).unwrap_err();
    assert!(matches!(err, SchemaError::JsonError(_)));
    assert_eq!(err.error_code(), "ERR_SCHEMA_JSON_PARSE");
}

#[test]
fn test_unknown_operator() {
    let json = r#"{
        "id": "x",
        "fields": [
            { "type": "text", "id": "a", "label": "A" },
            { "type": "text", "id": "b", "label": "B",
              "conditions": [ { "field": "a", "operator": "~=", "value": "x" } ] }
        ]
    }"#;
    assert!(parse_and_validate_form_config(json, SourceFormat::Json).is_err());
}

#[test]
fn test_unknown_rule() {
    let json = r#"{
        "id": "x",
        "fields": [
            { "type": "text", "id": "a", "label": "A", "validation": { "rules": ["shout"] } }
        ]
    }"#;
    let err = parse_and_validate_form_config(json, SourceFormat::Json).unwrap_err();
    assert!(err.to_string().contains("shout"), "unexpected error: {}", err);
}

#[test]
fn test_invalid_reference_inside_group() {
    let json = r#"{
        "id": "x",
        "fields": [
            {
                "type": "group",
                "id": "g",
                "label": "G",
                "fields": [
                    { "type": "text", "id": "a", "label": "A",
                      "conditions": [ { "field": "nowhere", "operator": "==", "value": "x" } ] }
                ]
            }
        ]
    }"#;
    let err = parse_and_validate_form_config(json, SourceFormat::Json).unwrap_err();
    assert!(error_contains(&err, "INVALID_REFERENCE"));
    let errors = err.validation_errors();
    assert_eq!(errors[0].path.as_deref(), Some("fields[0].fields[0].conditions[0]"));
}

#[test]
fn test_multiple_problems_reported_together() {
    let json = r#"{
        "id": "x",
        "fields": [
            { "type": "text", "id": "a", "label": "A" },
            { "type": "text", "id": "a", "label": "A again" },
            { "type": "list", "id": "l", "label": "L", "minItems": 2, "maxItems": 1, "fields": [] },
            { "type": "radio", "id": "r", "label": "R", "options": [] }
        ]
    }"#;
    let err = parse_and_validate_form_config(json, SourceFormat::Json).unwrap_err();
    assert!(error_contains(&err, "DUPLICATE_ID"));
    assert!(error_contains(&err, "INVALID_BOUNDS"));
    assert!(error_contains(&err, "INVALID_OPTIONS"));
    assert_eq!(err.validation_errors().len(), 3);
}
