use dynaform_schema::{
    CheckboxField, Condition, FieldBase, FieldOption, FormConfig, FormField, GroupField,
    InputField, InputKind, ListField, Literal, Operator, OptionsField, OptionsKind, OutputFormat,
    RuleValidation, Scalar, TextareaField, ValidationRule,
};

/// Fluent builder for [`FormConfig`]
#[derive(Debug, Clone)]
pub struct FormConfigBuilder {
    config: FormConfig,
}

impl FormConfigBuilder {
    /// Start an empty form
    pub fn new(id: &str) -> Self {
        Self {
            config: FormConfig::new(id),
        }
    }

    /// Set the title
    pub fn title(mut self, title: &str) -> Self {
        self.config.title = Some(title.to_string());
        self
    }

    /// Set the output format
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// Append a top-level field
    pub fn field(mut self, field: FormField) -> Self {
        self.config.fields.push(field);
        self
    }

    /// Finish building
    pub fn build(self) -> FormConfig {
        self.config
    }
}

fn input(kind: InputKind, id: &str, label: &str) -> FormField {
    FormField::Input(InputField {
        base: FieldBase::new(id, label),
        kind,
        min: None,
        max: None,
        placeholder: None,
        validation: None,
    })
}

/// A text field
pub fn text(id: &str, label: &str) -> FormField {
    input(InputKind::Text, id, label)
}

/// An e-mail field
pub fn email(id: &str, label: &str) -> FormField {
    input(InputKind::Email, id, label)
}

/// A number field with optional bounds
pub fn number(id: &str, label: &str, min: Option<f64>, max: Option<f64>) -> FormField {
    match input(InputKind::Number, id, label) {
        FormField::Input(mut field) => {
            field.min = min;
            field.max = max;
            FormField::Input(field)
        }
        other => other,
    }
}

/// A textarea
pub fn textarea(id: &str, label: &str) -> FormField {
    FormField::Textarea(TextareaField {
        base: FieldBase::new(id, label),
        placeholder: None,
        rows: None,
        validation: None,
    })
}

/// A single checkbox
pub fn checkbox(id: &str, label: &str) -> FormField {
    FormField::Checkbox(CheckboxField {
        base: FieldBase::new(id, label),
    })
}

/// A select, radio or checkbox group whose options use their value as label
pub fn choice(kind: OptionsKind, id: &str, label: &str, values: &[&str]) -> FormField {
    FormField::Options(OptionsField {
        base: FieldBase::new(id, label),
        kind,
        options: values
            .iter()
            .map(|value| FieldOption {
                value: Scalar::from(*value),
                label: value.to_string(),
            })
            .collect(),
        placeholder: None,
        validation: None,
    })
}

/// A group of nested fields
pub fn group(id: &str, label: &str, fields: Vec<FormField>) -> FormField {
    FormField::Group(GroupField {
        base: FieldBase::new(id, label),
        fields,
    })
}

/// A repeatable list of items built from `fields`
pub fn list(
    id: &str,
    label: &str,
    fields: Vec<FormField>,
    min_items: Option<usize>,
    max_items: Option<usize>,
) -> FormField {
    FormField::List(ListField {
        base: FieldBase::new(id, label),
        fields,
        add_button_label: None,
        remove_button_label: None,
        min_items,
        max_items,
    })
}

/// Mark a field as required
pub fn required(mut field: FormField) -> FormField {
    field.base_mut().required = true;
    field
}

/// Give a field an explicit default value
pub fn with_default(mut field: FormField, value: impl Into<Literal>) -> FormField {
    field.base_mut().default_value = Some(value.into());
    field
}

/// Add a visibility condition to a field
pub fn when(
    mut field: FormField,
    target: &str,
    operator: Operator,
    value: impl Into<Literal>,
) -> FormField {
    field
        .base_mut()
        .conditions
        .push(Condition::new(target, operator, value));
    field
}

/// Attach validation rules to a text-like field; other fields are returned unchanged
pub fn with_rules(field: FormField, rules: Vec<ValidationRule>, message: Option<&str>) -> FormField {
    let validation = Some(RuleValidation {
        rules,
        message: message.map(str::to_string),
    });
    match field {
        FormField::Input(mut input) => {
            input.validation = validation;
            FormField::Input(input)
        }
        FormField::Textarea(mut textarea) => {
            textarea.validation = validation;
            FormField::Textarea(textarea)
        }
        other => other,
    }
}

/// The newsletter sign-up form used throughout the tests: a required name,
/// a subscribe checkbox and an e-mail that is only shown (and required) when
/// subscribing.
pub fn newsletter_form() -> FormConfig {
    FormConfigBuilder::new("newsletter")
        .title("Newsletter")
        .field(required(text("name", "Name")))
        .field(checkbox("subscribe", "Subscribe"))
        .field(when(
            required(email("email", "E-mail")),
            "subscribe",
            Operator::Equals,
            true,
        ))
        .build()
}
