//! Structural checks over a loaded schema
//!
//! Nothing here is enforced at render time. Issues are reported so the
//! caller can log them, or refuse the schema in strict mode.

use super::{ComponentKind, ConditionKind, FieldDescriptor, Schema};
use std::collections::HashSet;
use std::fmt;

/// A problem found in a schema, addressed by its field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaIssue {
    DuplicateName { path: String },
    GroupWithoutChildren { path: String },
    MissingOptions { path: String },
    UnknownComponent { path: String },
    UnknownConditionKind { path: String },
    UnresolvedCondition { path: String, field_name: String },
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { path } => write!(f, "{path}: duplicate field name"),
            Self::GroupWithoutChildren { path } => write!(f, "{path}: group has no child fields"),
            Self::MissingOptions { path } => write!(f, "{path}: select field has no options"),
            Self::UnknownComponent { path } => write!(f, "{path}: unknown component kind"),
            Self::UnknownConditionKind { path } => {
                write!(f, "{path}: unknown condition kind, field is always visible")
            }
            Self::UnresolvedCondition { path, field_name } => {
                write!(f, "{path}: condition refers to undeclared field '{field_name}'")
            }
        }
    }
}

impl Schema {
    /// Report every structural issue, in schema order
    pub fn validate(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        let mut enclosing: Vec<HashSet<&str>> = Vec::new();
        check_scope(&self.data, "", &mut enclosing, &mut issues);
        issues
    }
}

fn check_scope<'a>(
    fields: &'a [FieldDescriptor],
    prefix: &str,
    enclosing: &mut Vec<HashSet<&'a str>>,
    issues: &mut Vec<SchemaIssue>,
) {
    let mut names = HashSet::new();
    for field in fields {
        if !names.insert(field.name.as_str()) {
            issues.push(SchemaIssue::DuplicateName {
                path: join_path(prefix, &field.name),
            });
        }
    }
    enclosing.push(names);

    for field in fields {
        let path = join_path(prefix, &field.name);

        match field.component {
            ComponentKind::Group => {
                if field.child_components.is_empty() {
                    issues.push(SchemaIssue::GroupWithoutChildren { path: path.clone() });
                }
            }
            ComponentKind::Select | ComponentKind::MultiSelect => {
                if field.options.is_empty() {
                    issues.push(SchemaIssue::MissingOptions { path: path.clone() });
                }
            }
            ComponentKind::Unknown => {
                issues.push(SchemaIssue::UnknownComponent { path: path.clone() })
            }
            ComponentKind::Text
            | ComponentKind::Number
            | ComponentKind::Radio
            | ComponentKind::Camera => {}
        }

        if let Some(condition) = &field.condition {
            match condition.kind {
                ConditionKind::Any => {
                    let declared = enclosing
                        .iter()
                        .any(|scope| scope.contains(condition.field_name.as_str()));
                    if !declared {
                        issues.push(SchemaIssue::UnresolvedCondition {
                            path: path.clone(),
                            field_name: condition.field_name.clone(),
                        });
                    }
                }
                ConditionKind::Unknown => {
                    issues.push(SchemaIssue::UnknownConditionKind { path: path.clone() })
                }
            }
        }

        if field.is_group() {
            check_scope(&field.child_components, &path, enclosing, issues);
        }
    }

    enclosing.pop();
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix} > {name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Condition;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_schema_has_no_issues() {
        let schema = Schema::new(vec![
            FieldDescriptor::new("Type", ComponentKind::Select).with_options(&["A", "B"]),
            FieldDescriptor::new("Notes", ComponentKind::Text)
                .with_condition(Condition::any_of("Type", &["B"])),
            FieldDescriptor::group(
                "Contacts",
                true,
                vec![FieldDescriptor::new("Phone", ComponentKind::Number)],
            ),
        ]);
        assert!(schema.validate().is_empty());
    }

    #[test]
    fn test_duplicate_names_per_scope() {
        let schema = Schema::new(vec![
            FieldDescriptor::new("Name", ComponentKind::Text),
            FieldDescriptor::new("Name", ComponentKind::Text),
            FieldDescriptor::group(
                "Owner",
                false,
                // Same name as a top-level field is fine in a nested scope
                vec![FieldDescriptor::new("Name", ComponentKind::Text)],
            ),
        ]);
        assert_eq!(
            schema.validate(),
            vec![SchemaIssue::DuplicateName {
                path: "Name".to_string()
            }]
        );
    }

    #[test]
    fn test_group_without_children_and_missing_options() {
        let schema = Schema::new(vec![
            FieldDescriptor::new("Items", ComponentKind::Group),
            FieldDescriptor::new("Brand", ComponentKind::MultiSelect),
        ]);
        assert_eq!(
            schema.validate(),
            vec![
                SchemaIssue::GroupWithoutChildren {
                    path: "Items".to_string()
                },
                SchemaIssue::MissingOptions {
                    path: "Brand".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_conditions_resolve_through_enclosing_scopes() {
        let schema = Schema::new(vec![
            FieldDescriptor::new("Type", ComponentKind::Radio),
            FieldDescriptor::group(
                "Shelves",
                true,
                vec![
                    FieldDescriptor::new("Brand", ComponentKind::Text)
                        .with_condition(Condition::any_of("Type", &["Yes"])),
                    FieldDescriptor::new("Facings", ComponentKind::Number)
                        .with_condition(Condition::any_of("Missing", &["x"])),
                ],
            ),
        ]);
        assert_eq!(
            schema.validate(),
            vec![SchemaIssue::UnresolvedCondition {
                path: "Shelves > Facings".to_string(),
                field_name: "Missing".to_string(),
            }]
        );
    }

    #[test]
    fn test_unknown_kinds_reported() {
        let mut odd = FieldDescriptor::new("Odd", ComponentKind::Text);
        odd.condition = Some(Condition::default());
        let schema = Schema::new(vec![
            FieldDescriptor::new("Map", ComponentKind::Unknown),
            odd,
        ]);
        let issues = schema.validate();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].to_string(), "Map: unknown component kind");
        assert!(issues[1].to_string().contains("always visible"));
    }
}
