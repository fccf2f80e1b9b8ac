use serde::{Deserialize, Serialize};
use std::fmt;

use super::condition::Condition;
use super::rules::ValidationRule;
use crate::types::{Literal, Scalar};

/// Attributes shared by every field kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBase {
    /// Identifier, unique within the enclosing scope
    pub id: String,

    /// Human-readable label
    #[serde(default)]
    pub label: String,

    /// Whether a value must be provided
    #[serde(default)]
    pub required: bool,

    /// Optional help text shown next to the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Explicit initial value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Literal>,

    /// Visibility conditions; all must hold for the field to be shown
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl FieldBase {
    /// Create a base with the given id and label
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
            help_text: None,
            default_value: None,
            conditions: Vec::new(),
        }
    }
}

/// The `type` tag of a field as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Textarea,
    Select,
    Radio,
    CheckboxGroup,
    Checkbox,
    Group,
    List,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::CheckboxGroup => "checkbox-group",
            FieldType::Checkbox => "checkbox",
            FieldType::Group => "group",
            FieldType::List => "list",
        };
        f.write_str(name)
    }
}

/// Single-line input flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Text,
    Email,
    Number,
}

/// Option-based input flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionsKind {
    Select,
    Radio,
    CheckboxGroup,
}

/// Rule-based validation for text-like fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleValidation {
    /// Rules applied in order
    #[serde(default)]
    pub rules: Vec<ValidationRule>,

    /// Message reported when a rule fails
    #[serde(default)]
    pub message: Option<String>,
}

/// Pattern-based validation for option fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternValidation {
    /// Regular expression each selected value must match
    #[serde(default)]
    pub pattern: Option<String>,

    /// Message reported when the pattern does not match
    #[serde(default)]
    pub message: Option<String>,
}

/// One selectable option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: Scalar,
    pub label: String,
}

/// text / email / number
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub base: FieldBase,
    pub kind: InputKind,
    /// Value bound for numbers, character-count bound for text and email
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub placeholder: Option<String>,
    pub validation: Option<RuleValidation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextareaField {
    pub base: FieldBase,
    pub placeholder: Option<String>,
    pub rows: Option<u32>,
    pub validation: Option<RuleValidation>,
}

/// select / radio / checkbox-group
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsField {
    pub base: FieldBase,
    pub kind: OptionsKind,
    pub options: Vec<FieldOption>,
    pub placeholder: Option<String>,
    pub validation: Option<PatternValidation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxField {
    pub base: FieldBase,
}

/// A field producing a nested object of sub-field values
#[derive(Debug, Clone, PartialEq)]
pub struct GroupField {
    pub base: FieldBase,
    pub fields: Vec<FormField>,
}

/// A field producing an array of objects shaped by `fields`
#[derive(Debug, Clone, PartialEq)]
pub struct ListField {
    pub base: FieldBase,
    pub fields: Vec<FormField>,
    pub add_button_label: Option<String>,
    pub remove_button_label: Option<String>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

/// A form field, discriminated by its `type` tag.
///
/// The ten configuration tags collapse into six structural kinds; the
/// flavour of inputs and option fields is kept in `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub enum FormField {
    Input(InputField),
    Textarea(TextareaField),
    Options(OptionsField),
    Checkbox(CheckboxField),
    Group(GroupField),
    List(ListField),
}

impl FormField {
    /// Shared attributes
    pub fn base(&self) -> &FieldBase {
        match self {
            FormField::Input(f) => &f.base,
            FormField::Textarea(f) => &f.base,
            FormField::Options(f) => &f.base,
            FormField::Checkbox(f) => &f.base,
            FormField::Group(f) => &f.base,
            FormField::List(f) => &f.base,
        }
    }

    /// Mutable shared attributes
    pub fn base_mut(&mut self) -> &mut FieldBase {
        match self {
            FormField::Input(f) => &mut f.base,
            FormField::Textarea(f) => &mut f.base,
            FormField::Options(f) => &mut f.base,
            FormField::Checkbox(f) => &mut f.base,
            FormField::Group(f) => &mut f.base,
            FormField::List(f) => &mut f.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn label(&self) -> &str {
        &self.base().label
    }

    pub fn is_required(&self) -> bool {
        self.base().required
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.base().conditions
    }

    /// The configuration tag of this field
    pub fn field_type(&self) -> FieldType {
        match self {
            FormField::Input(f) => match f.kind {
                InputKind::Text => FieldType::Text,
                InputKind::Email => FieldType::Email,
                InputKind::Number => FieldType::Number,
            },
            FormField::Textarea(_) => FieldType::Textarea,
            FormField::Options(f) => match f.kind {
                OptionsKind::Select => FieldType::Select,
                OptionsKind::Radio => FieldType::Radio,
                OptionsKind::CheckboxGroup => FieldType::CheckboxGroup,
            },
            FormField::Checkbox(_) => FieldType::Checkbox,
            FormField::Group(_) => FieldType::Group,
            FormField::List(_) => FieldType::List,
        }
    }

    /// Nested field templates for group and list fields; empty otherwise
    pub fn children(&self) -> &[FormField] {
        match self {
            FormField::Group(f) => &f.fields,
            FormField::List(f) => &f.fields,
            _ => &[],
        }
    }
}

// Flat wire shape. Every kind-specific attribute is optional here and the
// conversion into `FormField` decides which ones apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(rename = "type")]
    field_type: FieldType,

    #[serde(flatten)]
    base: FieldBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    rows: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    validation: Option<RawValidation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<FieldOption>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FormField>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    add_button_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    remove_button_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_items: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_items: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawValidation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    rules: Vec<ValidationRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl RawField {
    fn empty(field_type: FieldType, base: FieldBase) -> Self {
        RawField {
            field_type,
            base,
            min: None,
            max: None,
            placeholder: None,
            rows: None,
            validation: None,
            options: None,
            fields: None,
            add_button_label: None,
            remove_button_label: None,
            min_items: None,
            max_items: None,
        }
    }

    fn rule_validation(&mut self) -> Option<RuleValidation> {
        self.validation.take().map(|v| RuleValidation {
            rules: v.rules,
            message: v.message,
        })
    }

    fn pattern_validation(&mut self) -> Option<PatternValidation> {
        self.validation.take().map(|v| PatternValidation {
            pattern: v.pattern,
            message: v.message,
        })
    }

    fn nested_fields(&mut self) -> Result<Vec<FormField>, String> {
        self.fields.take().ok_or_else(|| {
            format!(
                "Field '{}' of type '{}' requires a 'fields' list",
                self.base.id, self.field_type
            )
        })
    }
}

impl TryFrom<RawField> for FormField {
    type Error = String;

    fn try_from(mut raw: RawField) -> Result<Self, Self::Error> {
        let input_kind = match raw.field_type {
            FieldType::Text => Some(InputKind::Text),
            FieldType::Email => Some(InputKind::Email),
            FieldType::Number => Some(InputKind::Number),
            _ => None,
        };
        let options_kind = match raw.field_type {
            FieldType::Select => Some(OptionsKind::Select),
            FieldType::Radio => Some(OptionsKind::Radio),
            FieldType::CheckboxGroup => Some(OptionsKind::CheckboxGroup),
            _ => None,
        };

        if let Some(kind) = input_kind {
            let validation = raw.rule_validation();
            return Ok(FormField::Input(InputField {
                base: raw.base,
                kind,
                min: raw.min,
                max: raw.max,
                placeholder: raw.placeholder,
                validation,
            }));
        }

        if let Some(kind) = options_kind {
            let validation = raw.pattern_validation();
            let options = raw.options.take().ok_or_else(|| {
                format!(
                    "Field '{}' of type '{}' requires an 'options' list",
                    raw.base.id, raw.field_type
                )
            })?;
            return Ok(FormField::Options(OptionsField {
                base: raw.base,
                kind,
                options,
                placeholder: raw.placeholder,
                validation,
            }));
        }

        match raw.field_type {
            FieldType::Textarea => {
                let validation = raw.rule_validation();
                Ok(FormField::Textarea(TextareaField {
                    base: raw.base,
                    placeholder: raw.placeholder,
                    rows: raw.rows,
                    validation,
                }))
            }
            FieldType::Checkbox => Ok(FormField::Checkbox(CheckboxField { base: raw.base })),
            FieldType::Group => {
                let fields = raw.nested_fields()?;
                Ok(FormField::Group(GroupField {
                    base: raw.base,
                    fields,
                }))
            }
            FieldType::List => {
                let fields = raw.nested_fields()?;
                Ok(FormField::List(ListField {
                    base: raw.base,
                    fields,
                    add_button_label: raw.add_button_label,
                    remove_button_label: raw.remove_button_label,
                    min_items: raw.min_items,
                    max_items: raw.max_items,
                }))
            }
            other => Err(format!("Unhandled field type '{}'", other)),
        }
    }
}

impl From<FormField> for RawField {
    fn from(field: FormField) -> Self {
        let field_type = field.field_type();
        match field {
            FormField::Input(f) => RawField {
                min: f.min,
                max: f.max,
                placeholder: f.placeholder,
                validation: f.validation.map(|v| RawValidation {
                    rules: v.rules,
                    pattern: None,
                    message: v.message,
                }),
                ..RawField::empty(field_type, f.base)
            },
            FormField::Textarea(f) => RawField {
                placeholder: f.placeholder,
                rows: f.rows,
                validation: f.validation.map(|v| RawValidation {
                    rules: v.rules,
                    pattern: None,
                    message: v.message,
                }),
                ..RawField::empty(field_type, f.base)
            },
            FormField::Options(f) => RawField {
                options: Some(f.options),
                placeholder: f.placeholder,
                validation: f.validation.map(|v| RawValidation {
                    rules: Vec::new(),
                    pattern: v.pattern,
                    message: v.message,
                }),
                ..RawField::empty(field_type, f.base)
            },
            FormField::Checkbox(f) => RawField::empty(field_type, f.base),
            FormField::Group(f) => RawField {
                fields: Some(f.fields),
                ..RawField::empty(field_type, f.base)
            },
            FormField::List(f) => RawField {
                fields: Some(f.fields),
                add_button_label: f.add_button_label,
                remove_button_label: f.remove_button_label,
                min_items: f.min_items,
                max_items: f.max_items,
                ..RawField::empty(field_type, f.base)
            },
        }
    }
}
