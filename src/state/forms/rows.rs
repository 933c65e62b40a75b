//! Flattening the visible schema into focusable rows
//!
//! The renderer and the input handler both walk the same row list, so focus
//! indices mean the same thing to each.

use super::form_state::{FormValues, Scope, ScopeStep};
use super::visibility::{is_visible, is_visible_in};
use crate::schema::{ComponentKind, FieldDescriptor, Schema};

/// What a row shows and how it reacts to input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// An editable control for a non-group field
    Field,
    /// Title line of a group
    GroupHeader,
    /// Title line of one instance of a repeatable group
    Instance { index: usize },
    /// "Add another" affordance of a repeatable group
    AddInstance,
    /// Form submit button
    Submit,
}

/// One focusable line of the form
#[derive(Debug, Clone)]
pub struct FormRow<'a> {
    pub kind: RowKind,
    /// The field this row belongs to; `None` only for the submit row
    pub field: Option<&'a FieldDescriptor>,
    /// Scope the field lives in
    pub scope: Scope,
    /// Nesting depth, for indentation
    pub depth: usize,
}

impl<'a> FormRow<'a> {
    fn new(kind: RowKind, field: &'a FieldDescriptor, scope: &[ScopeStep], depth: usize) -> Self {
        Self {
            kind,
            field: Some(field),
            scope: scope.to_vec(),
            depth,
        }
    }

    fn submit() -> Self {
        Self {
            kind: RowKind::Submit,
            field: None,
            scope: Vec::new(),
            depth: 0,
        }
    }

    pub fn component(&self) -> Option<ComponentKind> {
        self.field.map(|f| f.component)
    }

    /// Owned identity of this row, stable while rows above it come and go
    pub fn key(&self) -> RowKey {
        RowKey {
            kind: self.kind,
            scope: self.scope.clone(),
            field: self.field.map(|f| f.name.clone()),
        }
    }
}

/// Identifies a row across rebuilds of the row list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowKey {
    kind: RowKind,
    scope: Scope,
    field: Option<String>,
}

/// Build the row list for the currently visible fields, in schema order
pub fn build_rows<'a>(schema: &'a Schema, values: &FormValues) -> Vec<FormRow<'a>> {
    let mut rows = Vec::new();
    let mut scope = Vec::new();
    push_fields(&schema.data, values, &mut scope, 0, &mut rows);
    rows.push(FormRow::submit());
    rows
}

fn push_fields<'a>(
    fields: &'a [FieldDescriptor],
    root: &FormValues,
    scope: &mut Scope,
    depth: usize,
    rows: &mut Vec<FormRow<'a>>,
) {
    for field in fields {
        let visible = if scope.is_empty() {
            is_visible(field.condition.as_ref(), root)
        } else {
            is_visible_in(field.condition.as_ref(), root, scope)
        };
        if !visible {
            continue;
        }
        match field.component {
            ComponentKind::Unknown => {}
            ComponentKind::Group => push_group(field, root, scope, depth, rows),
            ComponentKind::Text
            | ComponentKind::Number
            | ComponentKind::Select
            | ComponentKind::MultiSelect
            | ComponentKind::Radio
            | ComponentKind::Camera => rows.push(FormRow::new(RowKind::Field, field, scope, depth)),
        }
    }
}

fn push_group<'a>(
    group: &'a FieldDescriptor,
    root: &FormValues,
    scope: &mut Scope,
    depth: usize,
    rows: &mut Vec<FormRow<'a>>,
) {
    rows.push(FormRow::new(RowKind::GroupHeader, group, scope, depth));

    let existing = root
        .scoped(scope)
        .map(|store| store.instances(&group.name).len())
        .unwrap_or(0);
    // A static group always shows its single instance, even before it exists
    let count = if group.add_more { existing } else { 1 };

    for index in 0..count {
        let child_depth = if group.add_more {
            rows.push(FormRow::new(
                RowKind::Instance { index },
                group,
                scope,
                depth + 1,
            ));
            depth + 2
        } else {
            depth + 1
        };
        scope.push(ScopeStep::new(&group.name, index));
        push_fields(&group.child_components, root, scope, child_depth, rows);
        scope.pop();
    }

    if group.add_more {
        rows.push(FormRow::new(RowKind::AddInstance, group, scope, depth + 1));
    }
}
