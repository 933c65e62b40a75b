//! Conditional field visibility

use super::form_state::{FormValues, ScopeStep};
use crate::schema::{Condition, ConditionKind};

/// Whether a top-level field with this condition is shown
pub fn is_visible(condition: Option<&Condition>, values: &FormValues) -> bool {
    is_visible_in(condition, values, &[])
}

/// Whether a field inside `scope` is shown.
///
/// The referenced field is looked up in the innermost instance first, then in
/// each enclosing store out to the top level.
pub fn is_visible_in(condition: Option<&Condition>, root: &FormValues, scope: &[ScopeStep]) -> bool {
    let Some(condition) = condition else {
        return true;
    };
    match condition.kind {
        ConditionKind::Any => {
            let current = root
                .scope_chain(scope)
                .into_iter()
                .rev()
                .find_map(|store| store.get(&condition.field_name));
            match current {
                Some(value) => condition.allowed_values.iter().any(|a| value.matches(a)),
                None => false,
            }
        }
        // Unrecognized kinds never hide a field
        ConditionKind::Unknown => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ComponentKind, FieldDescriptor};
    use crate::state::forms::FieldValue;
    use serde_json::json;

    fn outlet_values(kind: &str) -> FormValues {
        FormValues::derive(&[FieldDescriptor::new("Outlet Type", ComponentKind::Select)])
            .set_scalar("Outlet Type", FieldValue::text(kind))
    }

    #[test]
    fn test_no_condition_is_visible() {
        assert!(is_visible(None, &FormValues::default()));
    }

    #[test]
    fn test_empty_condition_is_visible() {
        assert!(is_visible(Some(&Condition::default()), &FormValues::default()));
    }

    #[test]
    fn test_any_condition_membership() {
        let condition = Condition::any_of("Outlet Type", &["Retail", "Kiosk"]);
        assert!(is_visible(Some(&condition), &outlet_values("Retail")));
        assert!(is_visible(Some(&condition), &outlet_values("Kiosk")));
        assert!(!is_visible(Some(&condition), &outlet_values("Wholesale")));
        assert!(!is_visible(Some(&condition), &outlet_values("")));
    }

    #[test]
    fn test_visibility_follows_later_changes() {
        let condition = Condition::any_of("Outlet Type", &["Retail"]);
        let values = outlet_values("Wholesale");
        assert!(!is_visible(Some(&condition), &values));

        let values = values.set_scalar("Outlet Type", FieldValue::text("Retail"));
        assert!(is_visible(Some(&condition), &values));

        let values = values.set_scalar("Outlet Type", FieldValue::text("Kiosk"));
        assert!(!is_visible(Some(&condition), &values));
    }

    #[test]
    fn test_missing_referenced_field_hides() {
        let condition = Condition::any_of("Nope", &[""]);
        assert!(!is_visible(Some(&condition), &FormValues::default()));
    }

    #[test]
    fn test_unknown_kind_is_visible() {
        let condition: Condition = serde_json::from_str(
            r#"{"kind": "NONE", "fieldName": "Outlet Type", "allowedValues": ["x"]}"#,
        )
        .unwrap();
        assert!(is_visible(Some(&condition), &outlet_values("Retail")));
    }

    #[test]
    fn test_boolean_values() {
        let condition = Condition {
            kind: ConditionKind::Any,
            field_name: "Open".to_string(),
            allowed_values: vec![json!(true)],
        };
        let values = FormValues::default().set_scalar("Open", FieldValue::Bool(true));
        assert!(is_visible(Some(&condition), &values));
        let values = values.set_scalar("Open", FieldValue::Bool(false));
        assert!(!is_visible(Some(&condition), &values));
    }

    #[test]
    fn test_boolean_matches_yes_label() {
        let condition = Condition::any_of("Open", &["Yes"]);
        let values = FormValues::default().set_scalar("Open", FieldValue::Bool(true));
        assert!(is_visible(Some(&condition), &values));
        let values = values.set_scalar("Open", FieldValue::Bool(false));
        assert!(!is_visible(Some(&condition), &values));
    }

    #[test]
    fn test_scoped_lookup_prefers_instance() {
        let children = vec![FieldDescriptor::new("Kind", ComponentKind::Select)];
        let values = outlet_values("Retail")
            .add_group_instance("Shelves", &children)
            .set_group_field("Shelves", 0, "Kind", FieldValue::text("Cooler"));
        let scope = vec![ScopeStep::new("Shelves", 0)];

        let inner = Condition::any_of("Kind", &["Cooler"]);
        assert!(is_visible_in(Some(&inner), &values, &scope));
        assert!(!is_visible(Some(&inner), &values));

        // Falls back to the enclosing store
        let outer = Condition::any_of("Outlet Type", &["Retail"]);
        assert!(is_visible_in(Some(&outer), &values, &scope));
    }
}
