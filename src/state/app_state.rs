//! Application state definitions

use super::forms::{build_rows, FieldValue, FormAction, FormRow, FormValues, RowKey, ScopeStep};
use crate::schema::Schema;

/// Default form title when none is configured
pub const DEFAULT_TITLE: &str = "Dynamic Form";

/// All state the UI renders from
#[derive(Debug, Clone)]
pub struct AppState {
    /// Schema, once it has been loaded
    pub schema: Option<Schema>,
    /// Current form values, replaced wholesale on every change
    pub values: FormValues,
    /// Index of the focused row
    pub focus: usize,
    /// Highlighted option within a focused multi-select
    pub option_cursor: usize,
    /// Form title shown in the frame border
    pub title: String,
    /// Transient message for the status bar
    pub status_message: Option<String>,
    /// Queue of errors to show, oldest first
    pub errors: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl AppState {
    pub fn new(title: &str) -> Self {
        Self {
            schema: None,
            values: FormValues::default(),
            focus: 0,
            option_cursor: 0,
            title: title.to_string(),
            status_message: None,
            errors: Vec::new(),
        }
    }

    /// Install the schema and derive initial values.
    /// Returns false without touching state if a schema is already loaded.
    pub fn load_schema(&mut self, schema: Schema) -> bool {
        if self.schema.is_some() {
            return false;
        }
        self.values = FormValues::derive(&schema.data);
        self.schema = Some(schema);
        self.focus = 0;
        self.option_cursor = 0;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.schema.is_none()
    }

    /// Visible rows, empty while the schema is loading
    pub fn rows(&self) -> Vec<FormRow<'_>> {
        match &self.schema {
            Some(schema) => build_rows(schema, &self.values),
            None => Vec::new(),
        }
    }

    pub fn focused_row(&self) -> Option<FormRow<'_>> {
        self.rows().into_iter().nth(self.focus)
    }

    /// Value of a field within a scope
    pub fn value_in(&self, scope: &[ScopeStep], name: &str) -> Option<&FieldValue> {
        self.values.scoped(scope)?.get(name)
    }

    pub fn next_row(&mut self) {
        let count = self.rows().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
        self.option_cursor = 0;
    }

    pub fn prev_row(&mut self) {
        let count = self.rows().len();
        if count > 0 {
            self.focus = if self.focus == 0 {
                count - 1
            } else {
                (self.focus - 1).min(count - 1)
            };
        }
        self.option_cursor = 0;
    }

    /// Apply one action and keep focus on the same row, wherever it moved
    pub fn dispatch(&mut self, action: &FormAction) {
        let focused = self.focused_row().map(|row| row.key());
        self.values = self.values.apply(action);
        self.refocus(focused);
    }

    fn refocus(&mut self, focused: Option<RowKey>) {
        let (found, count) = {
            let rows = self.rows();
            let found = focused.and_then(|key| rows.iter().position(|row| row.key() == key));
            (found, rows.len())
        };
        match found {
            Some(index) => self.focus = index,
            None if self.focus >= count => {
                self.focus = count.saturating_sub(1);
                self.option_cursor = 0;
            }
            None => self.option_cursor = 0,
        }
    }

    pub fn push_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }
}
