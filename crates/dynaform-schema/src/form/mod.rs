mod condition;
mod field;
mod rules;

pub use condition::{Condition, Operator};
pub use field::{
    CheckboxField, FieldBase, FieldOption, FieldType, FormField, GroupField, InputField,
    InputKind, ListField, OptionsField, OptionsKind, PatternValidation, RuleValidation,
    TextareaField,
};
pub use rules::{RuleParseError, ValidationRule};

use serde::{Deserialize, Serialize};

use crate::types::{join_path, path_segments};

/// The complete form configuration.
/// This is the top-level structure loaded from JSON or YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Form identifier
    pub id: String,

    /// Optional title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered top-level fields
    #[serde(default)]
    pub fields: Vec<FormField>,

    /// Label of the submit action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,

    /// Label of the reset action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_label: Option<String>,

    /// Format used when rendering collected data
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Serialization format for submitted form data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// A field visited by [`FormConfig::walk`]
#[derive(Debug, Clone, Copy)]
pub struct FieldEntry<'a> {
    /// Dotted path; list item templates use `*` in place of the item index
    /// (e.g. `contacts.*.email`)
    pub path: &'a str,

    /// Nesting depth, 0 for top-level fields
    pub depth: usize,

    /// The field definition
    pub field: &'a FormField,
}

impl FormConfig {
    /// Create an empty form with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            fields: Vec::new(),
            submit_label: None,
            reset_label: None,
            output_format: OutputFormat::default(),
        }
    }

    /// Top-level fields in declaration order
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Visit every field depth-first in declaration order
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(FieldEntry<'_>),
    {
        fn recurse<F>(fields: &[FormField], parent: Option<&str>, depth: usize, visit: &mut F)
        where
            F: FnMut(FieldEntry<'_>),
        {
            for field in fields {
                let path = join_path(parent, field.id());
                visit(FieldEntry {
                    path: &path,
                    depth,
                    field,
                });
                match field {
                    FormField::Group(group) => recurse(&group.fields, Some(&path), depth + 1, visit),
                    FormField::List(list) => {
                        let item_path = format!("{}.*", path);
                        recurse(&list.fields, Some(&item_path), depth + 1, visit)
                    }
                    _ => {}
                }
            }
        }

        recurse(&self.fields, None, 0, &mut visit);
    }

    /// All field paths in declaration order
    pub fn field_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.walk(|entry| paths.push(entry.path.to_string()));
        paths
    }

    /// Resolve a dotted value path to its field definition.
    ///
    /// Numeric segments (and `*`) following a list field select an item and
    /// are skipped, so `contacts.2.email` resolves to the `email` template of
    /// the `contacts` list.
    pub fn find(&self, path: &str) -> Option<&FormField> {
        let mut fields: &[FormField] = &self.fields;
        let mut current: Option<&FormField> = None;
        let mut expect_index = false;

        for segment in path_segments(path) {
            if expect_index {
                expect_index = false;
                if segment == "*" || segment.parse::<usize>().is_ok() {
                    continue;
                }
                return None;
            }
            let field = fields.iter().find(|f| f.id() == segment)?;
            expect_index = matches!(field, FormField::List(_));
            fields = field.children();
            current = Some(field);
        }

        current
    }
}
