//! Resolution of stored values against the schema

use crate::contract::{FieldDefinition, ProfileView, Schema, SELECT_FORM_TYPE};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One entry per schema field: stored value, else default, else `""`
///
/// Stored values for slugs that are not in the schema are ignored.
pub fn resolve_profile(
    schema: &Schema,
    stored: &HashMap<String, Value>,
    transform: bool,
) -> ProfileView {
    schema
        .iter()
        .map(|(slug, field)| {
            let value = stored
                .get(slug)
                .cloned()
                .unwrap_or_else(|| default_value(field));
            let value = if transform {
                display_value(field, value)
            } else {
                value
            };
            (slug.clone(), value)
        })
        .collect()
}

fn default_value(field: &FieldDefinition) -> Value {
    field
        .form
        .default
        .clone()
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Option label for `select` fields; the raw value when there is no usable label
pub fn display_value(field: &FieldDefinition, value: Value) -> Value {
    if field.form.form_type != SELECT_FORM_TYPE {
        return value;
    }
    let Some(options) = &field.form.options else {
        return value;
    };
    match scalar_key(&value).and_then(|key| options.get(&key)) {
        Some(label) if is_truthy(label) => label.clone(),
        _ => value,
    }
}

/// Slugs whose submitted value differs from the current one
///
/// Iteration follows `current`, so unknown slugs in `data` never show up and
/// slugs missing from `data` are left alone.
pub fn changed_fields(current: &ProfileView, data: &Map<String, Value>) -> Vec<(String, Value)> {
    current
        .iter()
        .filter_map(|(slug, value)| match data.get(slug) {
            Some(submitted) if !values_match(submitted, value) => {
                Some((slug.clone(), submitted.clone()))
            }
            _ => None,
        })
        .collect()
}

/// Loose equality on the submitted form value
///
/// Form submissions arrive as strings while defaults may be numbers or
/// booleans. A boolean matches anything with the same truthiness (`"0"` and
/// `""` match `false`), `null` matches `""` and other falsy values, and
/// remaining scalars match when their string forms are equal.
pub fn values_match(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (Value::Bool(flag), other) | (other, Value::Bool(flag)) => is_truthy(other) == *flag,
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !is_truthy(other),
        _ => match (scalar_key(a), scalar_key(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// String form of a scalar, used for option lookup and loose comparison
fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) | Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
