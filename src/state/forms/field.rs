//! Form field value objects

use super::form_state::FormValues;
use serde::Serialize;
use serde_json::Value;

/// Current value of one field
///
/// Serializes untagged, so a snapshot reads as plain JSON: strings, booleans,
/// arrays of strings, and arrays of objects for group instances.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    List(Vec<String>),
    Group(Vec<FormValues>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    #[cfg(test)]
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Convert a JSON value from a schema default
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::default(),
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Number(n) => FieldValue::Text(n.to_string()),
            Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
                FieldValue::Group(
                    items
                        .iter()
                        .filter_map(Value::as_object)
                        .map(FormValues::from_json_object)
                        .collect(),
                )
            }
            Value::Array(items) => FieldValue::List(items.iter().map(scalar_string).collect()),
            Value::Object(map) => FieldValue::Group(vec![FormValues::from_json_object(map)]),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            FieldValue::Group(instances) => {
                Value::Array(instances.iter().map(FormValues::to_json).collect())
            }
        }
    }

    /// Text shown in a text control
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Bool(true) => "Yes".to_string(),
            FieldValue::Bool(false) => "No".to_string(),
            FieldValue::List(items) => items.join(", "),
            FieldValue::Group(instances) => match instances.len() {
                1 => "1 entry".to_string(),
                n => format!("{n} entries"),
            },
        }
    }

    /// The selected option of a single-select control, if any
    pub fn selected(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_selected(&self, option: &str) -> bool {
        match self {
            FieldValue::List(items) => items.iter().any(|i| i == option),
            FieldValue::Text(s) => s == option,
            _ => false,
        }
    }

    /// Multi-select value with `option` flipped in or out
    pub fn toggled(&self, option: &str) -> FieldValue {
        let mut items = match self {
            FieldValue::List(items) => items.clone(),
            FieldValue::Text(s) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        };
        if let Some(pos) = items.iter().position(|i| i == option) {
            items.remove(pos);
        } else {
            items.push(option.to_string());
        }
        FieldValue::List(items)
    }

    /// State of a yes/no control; `None` while nothing has been chosen
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Text(s) => parse_bool_label(s),
            FieldValue::List(items) => match items.as_slice() {
                [only] => parse_bool_label(only),
                _ => None,
            },
            FieldValue::Group(_) => None,
        }
    }

    /// Whether this value counts as a member of a condition's allowed value.
    /// Booleans also match their `Yes`/`No` labels.
    pub fn matches(&self, allowed: &Value) -> bool {
        if self.to_json() == *allowed {
            return true;
        }
        match self {
            FieldValue::Text(s) => scalar_string(allowed) == *s,
            FieldValue::Bool(b) => parse_bool_label(&scalar_string(allowed)) == Some(*b),
            FieldValue::List(_) | FieldValue::Group(_) => false,
        }
    }

    pub fn instances(&self) -> &[FormValues] {
        match self {
            FieldValue::Group(instances) => instances,
            _ => &[],
        }
    }
}

/// `Yes`/`true` and `No`/`false`, in any case
fn parse_bool_label(label: &str) -> Option<bool> {
    match label.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" => Some(true),
        "no" | "false" => Some(false),
        _ => None,
    }
}

/// String rendering used when a JSON value stands in for a scalar
pub(crate) fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
