//! Field descriptors as declared by the form schema

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of control a field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Single-line text input
    Text,
    /// Numeric text input
    Number,
    /// Single-select dropdown
    Select,
    /// Multi-select checkbox list
    MultiSelect,
    /// Radio choice (boolean when no options are declared)
    Radio,
    /// Nested group of child fields, static or repeatable
    Group,
    /// Camera attachment trigger
    Camera,
    /// Any component name this renderer does not know
    #[serde(other)]
    Unknown,
}

impl ComponentKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Select => "select",
            Self::MultiSelect => "multi_select",
            Self::Radio => "radio",
            Self::Group => "group",
            Self::Camera => "camera",
            Self::Unknown => "unknown",
        }
    }

    /// Select-like kinds take the first default element as their initial value
    pub fn takes_single_default(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

/// Kind of a visibility condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConditionKind {
    /// Visible when the referenced field holds one of the allowed values
    #[serde(rename = "ANY")]
    Any,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Visibility rule attached to a field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default, alias = "type")]
    pub kind: ConditionKind,
    #[serde(default)]
    pub field_name: String,
    #[serde(default, alias = "values")]
    pub allowed_values: Vec<Value>,
}

impl Condition {
    /// Build an `ANY` condition over string values
    #[cfg(test)]
    pub fn any_of(field_name: &str, allowed: &[&str]) -> Self {
        Self {
            kind: ConditionKind::Any,
            field_name: field_name.to_string(),
            allowed_values: allowed.iter().map(|v| Value::from(*v)).collect(),
        }
    }
}

/// One field of the form, read-only at runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Unique identifier within its scope, also used as the display label
    pub name: String,
    pub component: ComponentKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub default: Option<Vec<Value>>,
    /// Display hint only
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub child_components: Vec<FieldDescriptor>,
    #[serde(default)]
    pub add_more: bool,
}

impl FieldDescriptor {
    /// Create a field with no options, default, or condition
    #[cfg(test)]
    pub fn new(name: &str, component: ComponentKind) -> Self {
        Self {
            name: name.to_string(),
            component,
            options: Vec::new(),
            default: None,
            required: false,
            condition: None,
            child_components: Vec::new(),
            add_more: false,
        }
    }

    /// Create a group field
    #[cfg(test)]
    pub fn group(name: &str, add_more: bool, children: Vec<FieldDescriptor>) -> Self {
        Self {
            child_components: children,
            add_more,
            ..Self::new(name, ComponentKind::Group)
        }
    }

    #[cfg(test)]
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }

    #[cfg(test)]
    pub fn with_default(mut self, default: Vec<Value>) -> Self {
        self.default = Some(default);
        self
    }

    #[cfg(test)]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[cfg(test)]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Default values, treating an absent list like an empty one
    pub fn default_values(&self) -> &[Value] {
        self.default.as_deref().unwrap_or(&[])
    }

    pub fn is_group(&self) -> bool {
        self.component == ComponentKind::Group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_descriptor() {
        let json = r#"{
            "name": "Contacts",
            "component": "group",
            "required": true,
            "addMore": true,
            "childComponents": [
                {"name": "Phone", "component": "number"}
            ],
            "condition": {"kind": "ANY", "fieldName": "Type", "allowedValues": ["Retail"]}
        }"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(field.name, "Contacts");
        assert_eq!(field.component, ComponentKind::Group);
        assert!(field.required);
        assert!(field.add_more);
        assert_eq!(field.child_components.len(), 1);
        assert_eq!(field.child_components[0].component, ComponentKind::Number);
        assert_eq!(field.condition, Some(Condition::any_of("Type", &["Retail"])));
    }

    #[test]
    fn test_optional_keys_default() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"name": "Name", "component": "text"}"#).unwrap();
        assert!(field.options.is_empty());
        assert!(field.default.is_none());
        assert!(!field.required);
        assert!(field.condition.is_none());
        assert!(field.child_components.is_empty());
        assert!(!field.add_more);
        assert!(field.default_values().is_empty());
    }

    #[test]
    fn test_unknown_component_kind() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"name": "Map", "component": "geo_picker"}"#).unwrap();
        assert_eq!(field.component, ComponentKind::Unknown);
    }

    #[test]
    fn test_condition_accepts_type_alias() {
        let condition: Condition =
            serde_json::from_str(r#"{"type": "ANY", "fieldName": "A", "values": ["x"]}"#)
                .unwrap();
        assert_eq!(condition.kind, ConditionKind::Any);
        assert_eq!(condition.allowed_values, vec![json!("x")]);
    }

    #[test]
    fn test_empty_condition_is_unknown_kind() {
        let condition: Condition = serde_json::from_str("{}").unwrap();
        assert_eq!(condition.kind, ConditionKind::Unknown);
        assert!(condition.field_name.is_empty());
    }

    #[test]
    fn test_unrecognized_condition_kind() {
        let condition: Condition =
            serde_json::from_str(r#"{"kind": "ALL", "fieldName": "A"}"#).unwrap();
        assert_eq!(condition.kind, ConditionKind::Unknown);
    }

    #[test]
    fn test_takes_single_default() {
        assert!(ComponentKind::Select.takes_single_default());
        assert!(ComponentKind::Radio.takes_single_default());
        assert!(!ComponentKind::MultiSelect.takes_single_default());
        assert!(!ComponentKind::Text.takes_single_default());
    }
}
