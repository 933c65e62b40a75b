//! Form state store
//!
//! `FormValues` maps field names to their current values. It is never
//! mutated in place by the application: every operation returns a new store
//! and the caller replaces the old one wholesale.

use super::field::{scalar_string, FieldValue};
use crate::schema::{ComponentKind, FieldDescriptor};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One step into a group: the group's field name and an instance index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeStep {
    pub group: String,
    pub index: usize,
}

impl ScopeStep {
    pub fn new(group: &str, index: usize) -> Self {
        Self {
            group: group.to_string(),
            index,
        }
    }
}

/// Path from the top-level store to a group instance. Empty means top level.
pub type Scope = Vec<ScopeStep>;

/// A single state transition, produced by input handling
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetValue {
        scope: Scope,
        field: String,
        value: FieldValue,
    },
    AddInstance {
        scope: Scope,
        group: String,
        children: Vec<FieldDescriptor>,
    },
    RemoveInstance {
        scope: Scope,
        group: String,
        index: usize,
    },
}

/// Mapping from field name to current value
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    /// Derive the initial state for a list of fields
    pub fn derive(fields: &[FieldDescriptor]) -> Self {
        Self(
            fields
                .iter()
                .map(|field| (field.name.clone(), initial_value(field)))
                .collect(),
        )
    }

    pub fn from_json_object(map: &Map<String, Value>) -> Self {
        Self(
            map.iter()
                .map(|(k, v)| (k.clone(), FieldValue::from_json(v)))
                .collect(),
        )
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    /// Instances of a group field, empty when the field is absent or not a group
    pub fn instances(&self, group: &str) -> &[FormValues] {
        self.get(group).map(FieldValue::instances).unwrap_or(&[])
    }

    /// The instance store a scope points at, if it exists
    pub fn scoped(&self, scope: &[ScopeStep]) -> Option<&FormValues> {
        match scope.split_first() {
            None => Some(self),
            Some((step, rest)) => self.instances(&step.group).get(step.index)?.scoped(rest),
        }
    }

    /// Every store from the top level down to `scope`, outermost first
    pub fn scope_chain(&self, scope: &[ScopeStep]) -> Vec<&FormValues> {
        let mut chain = vec![self];
        let mut current = self;
        for step in scope {
            match current.instances(&step.group).get(step.index) {
                Some(next) => {
                    chain.push(next);
                    current = next;
                }
                None => break,
            }
        }
        chain
    }

    /// Replace a top-level field's value
    pub fn set_scalar(&self, field: &str, value: FieldValue) -> Self {
        self.set_in(&[], field, value)
    }

    /// Replace one field of one group instance, creating the instance if needed
    pub fn set_group_field(&self, group: &str, index: usize, child: &str, value: FieldValue) -> Self {
        self.set_in(&[ScopeStep::new(group, index)], child, value)
    }

    /// Append a freshly derived instance to a group
    pub fn add_group_instance(&self, group: &str, children: &[FieldDescriptor]) -> Self {
        self.add_instance_in(&[], group, children)
    }

    /// Remove a group instance; later instances shift down by one
    pub fn remove_group_instance(&self, group: &str, index: usize) -> Self {
        self.remove_instance_in(&[], group, index)
    }

    pub fn set_in(&self, scope: &[ScopeStep], field: &str, value: FieldValue) -> Self {
        self.update_in(scope, |store| {
            let mut next = store.clone();
            next.0.insert(field.to_string(), value);
            next
        })
    }

    pub fn add_instance_in(
        &self,
        scope: &[ScopeStep],
        group: &str,
        children: &[FieldDescriptor],
    ) -> Self {
        self.update_in(scope, |store| {
            let mut instances = store.instances(group).to_vec();
            instances.push(FormValues::derive(children));
            let mut next = store.clone();
            next.0.insert(group.to_string(), FieldValue::Group(instances));
            next
        })
    }

    pub fn remove_instance_in(&self, scope: &[ScopeStep], group: &str, index: usize) -> Self {
        let in_range = self
            .scoped(scope)
            .is_some_and(|store| index < store.instances(group).len());
        if !in_range {
            tracing::debug!("Ignoring removal of missing instance {group}[{index}]");
            return self.clone();
        }
        self.update_in(scope, |store| {
            let mut instances = store.instances(group).to_vec();
            instances.remove(index);
            let mut next = store.clone();
            next.0.insert(group.to_string(), FieldValue::Group(instances));
            next
        })
    }

    /// Apply a single action, returning the next store.
    /// Top-level and single-group paths use the direct operations.
    pub fn apply(&self, action: &FormAction) -> Self {
        match action {
            FormAction::SetValue {
                scope,
                field,
                value,
            } => match scope.as_slice() {
                [] => self.set_scalar(field, value.clone()),
                [step] => self.set_group_field(&step.group, step.index, field, value.clone()),
                _ => self.set_in(scope, field, value.clone()),
            },
            FormAction::AddInstance {
                scope,
                group,
                children,
            } if scope.is_empty() => self.add_group_instance(group, children),
            FormAction::AddInstance {
                scope,
                group,
                children,
            } => self.add_instance_in(scope, group, children),
            FormAction::RemoveInstance {
                scope,
                group,
                index,
            } if scope.is_empty() => self.remove_group_instance(group, *index),
            FormAction::RemoveInstance {
                scope,
                group,
                index,
            } => self.remove_instance_in(scope, group, *index),
        }
    }

    /// Rebuild the path down to `scope`, replacing the store found there.
    /// Missing instances along the way are created empty.
    fn update_in<F>(&self, scope: &[ScopeStep], update: F) -> Self
    where
        F: FnOnce(&FormValues) -> FormValues,
    {
        let Some((step, rest)) = scope.split_first() else {
            return update(self);
        };
        let mut instances = self.instances(&step.group).to_vec();
        if instances.len() <= step.index {
            instances.resize_with(step.index + 1, FormValues::default);
        }
        instances[step.index] = instances[step.index].update_in(rest, update);

        let mut next = self.clone();
        next.0
            .insert(step.group.clone(), FieldValue::Group(instances));
        next
    }
}

fn initial_value(field: &FieldDescriptor) -> FieldValue {
    let defaults = field.default_values();
    match field.component {
        ComponentKind::Group if field.add_more => FieldValue::Group(
            defaults
                .iter()
                .filter_map(Value::as_object)
                .map(FormValues::from_json_object)
                .collect(),
        ),
        ComponentKind::Group => {
            FieldValue::Group(vec![FormValues::derive(&field.child_components)])
        }
        _ if defaults.is_empty() => FieldValue::default(),
        kind if kind.takes_single_default() => FieldValue::from_json(&defaults[0]),
        _ => FieldValue::List(defaults.iter().map(scalar_string).collect()),
    }
}
