use dynaform_schema::{join_path, Condition, FormConfig, FormField, Operator};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use crate::types::FormData;

/// The value objects visible to a field's conditions.
///
/// Frames run from the form root to the innermost object (a group's value or
/// one list item). Ids are looked up innermost first.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    frames: Vec<&'a FormData>,
}

impl<'a> Scope<'a> {
    /// Scope of top-level fields
    pub fn root(values: &'a FormData) -> Self {
        Self {
            frames: vec![values],
        }
    }

    /// Scope of fields nested in `frame`, which is itself inside this scope
    pub fn nested<'b>(&self, frame: &'b FormData) -> Scope<'b>
    where
        'a: 'b,
    {
        let mut frames: Vec<&'b FormData> = self.frames.clone();
        frames.push(frame);
        Scope { frames }
    }

    /// The innermost value object
    pub fn local(&self) -> &'a FormData {
        self.frames[self.frames.len() - 1]
    }

    /// Resolve an id: local object first, then each enclosing object
    pub fn lookup(&self, id: &str) -> Option<&'a Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(id))
    }
}

/// Decides whether a field's visibility conditions hold
pub trait ConditionEvaluator: Send + Sync {
    /// Evaluate one condition within the given scope
    fn evaluate(&self, condition: &Condition, scope: &Scope<'_>) -> bool;

    /// All conditions must hold; no conditions means visible
    fn is_visible(&self, conditions: &[Condition], scope: &Scope<'_>) -> bool {
        conditions.iter().all(|condition| self.evaluate(condition, scope))
    }
}

/// Default condition evaluator.
///
/// Evaluation is total: type mismatches make a condition false instead of
/// raising an error, and a missing value compares as `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConditionEvaluator;

impl ConditionEvaluator for DefaultConditionEvaluator {
    fn evaluate(&self, condition: &Condition, scope: &Scope<'_>) -> bool {
        let actual = scope.lookup(&condition.field).unwrap_or(&Value::Null);
        let expected = condition.value.to_json();

        match condition.operator {
            Operator::Equals => values_equal(actual, &expected),
            Operator::NotEquals => !values_equal(actual, &expected),
            Operator::GreaterThan => compare(actual, &expected) == Some(Ordering::Greater),
            Operator::LessThan => compare(actual, &expected) == Some(Ordering::Less),
            Operator::GreaterOrEqual => matches!(
                compare(actual, &expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Operator::LessOrEqual => matches!(
                compare(actual, &expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Operator::Contains => contains(actual, &expected) == Some(true),
            Operator::NotContains => contains(actual, &expected) == Some(false),
        }
    }
}

/// Structural equality where numbers compare by value (`1 == 1.0`)
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        _ => a == b,
    }
}

/// Numeric view of a value; numeric strings are parsed
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Text rendering used by `contains` and by text validations
pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    as_number(a)?.partial_cmp(&as_number(b)?)
}

// None when the value is neither text nor an array
fn contains(haystack: &Value, needle: &Value) -> Option<bool> {
    match haystack {
        Value::String(s) => Some(s.contains(as_text(needle).as_str())),
        Value::Array(items) => Some(items.iter().any(|item| values_equal(item, needle))),
        _ => None,
    }
}

/// Visibility of every field, keyed by hierarchical path.
///
/// List items are expanded (`contacts.0.email`); a hidden group or list hides
/// everything below it.
pub fn visibility_map(
    evaluator: &dyn ConditionEvaluator,
    config: &FormConfig,
    values: &FormData,
) -> BTreeMap<String, bool> {
    let mut map = BTreeMap::new();
    collect_visibility(evaluator, &config.fields, &Scope::root(values), None, true, &mut map);
    debug!(
        form = %config.id,
        hidden = map.values().filter(|visible| !**visible).count(),
        "Computed field visibility"
    );
    map
}

fn collect_visibility(
    evaluator: &dyn ConditionEvaluator,
    fields: &[FormField],
    scope: &Scope<'_>,
    parent: Option<&str>,
    parent_visible: bool,
    out: &mut BTreeMap<String, bool>,
) {
    let empty = FormData::new();

    for field in fields {
        let path = join_path(parent, field.id());
        let visible = parent_visible && evaluator.is_visible(field.conditions(), scope);
        out.insert(path.clone(), visible);

        match field {
            FormField::Group(group) => {
                let frame = match scope.local().get(field.id()) {
                    Some(Value::Object(obj)) => obj,
                    _ => &empty,
                };
                let nested = scope.nested(frame);
                collect_visibility(evaluator, &group.fields, &nested, Some(&path), visible, out);
            }
            FormField::List(list) => {
                if let Some(Value::Array(items)) = scope.local().get(field.id()) {
                    for (idx, item) in items.iter().enumerate() {
                        let frame = match item {
                            Value::Object(obj) => obj,
                            _ => &empty,
                        };
                        let item_path = format!("{}.{}", path, idx);
                        let nested = scope.nested(frame);
                        collect_visibility(
                            evaluator,
                            &list.fields,
                            &nested,
                            Some(&item_path),
                            visible,
                            out,
                        );
                    }
                }
            }
            _ => {}
        }
    }
}
