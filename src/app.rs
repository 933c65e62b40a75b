//! Application state and core logic

use crate::schema::{ComponentKind, FieldDescriptor, Schema};
use crate::state::{AppState, FieldValue, FormAction, FormRow, RowKind};
use crate::submit::SubmitHandler;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Message shown when the camera placeholder is activated
const CAMERA_UNAVAILABLE: &str = "Camera capture is not available in the terminal";

/// What a key press on the focused row resolves to
#[derive(Debug, Clone, PartialEq)]
enum RowOutcome {
    Action(FormAction),
    MoveCursor(usize),
    Status(String),
    Submit,
    Ignored,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Receiver of submitted values
    handler: Box<dyn SubmitHandler>,
    /// Stay open after a successful submit
    keep_open: bool,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance with no schema loaded yet
    pub fn new(title: &str, handler: Box<dyn SubmitHandler>, keep_open: bool) -> Self {
        Self {
            state: AppState::new(title),
            handler,
            keep_open,
            quit: false,
        }
    }

    /// Install the schema once it is available; later calls are ignored
    pub fn load_schema(&mut self, schema: Schema) {
        let fields = schema.data.len();
        if self.state.load_schema(schema) {
            tracing::info!("Schema loaded with {fields} top-level field(s)");
        } else {
            tracing::warn!("Schema already loaded, ignoring replacement");
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Let the handler flush anything it deferred until the terminal is back
    pub fn finish(&mut self) -> anyhow::Result<()> {
        self.handler.finish()
    }

    /// Name of the submit target, for the status bar
    pub fn submit_target(&self) -> String {
        self.handler.describe()
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.submit(),
            KeyCode::Enter if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit()
            }
            KeyCode::Tab | KeyCode::Down => self.state.next_row(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_row(),
            _ => self.handle_row_key(key),
        }
    }

    /// Handle keys aimed at the focused row
    fn handle_row_key(&mut self, key: KeyEvent) {
        let outcome = match self.state.focused_row() {
            Some(row) => row_outcome(&self.state, &row, key),
            None => RowOutcome::Ignored,
        };

        match outcome {
            RowOutcome::Action(action) => {
                tracing::trace!("Applying {action:?}");
                self.state.dispatch(&action);
            }
            RowOutcome::MoveCursor(cursor) => self.state.option_cursor = cursor,
            RowOutcome::Status(message) => self.state.status_message = Some(message),
            RowOutcome::Submit => self.submit(),
            RowOutcome::Ignored => {}
        }
    }

    /// Forward the current values, as-is, to the submit handler
    fn submit(&mut self) {
        if self.state.is_loading() {
            self.state.status_message = Some("Schema is still loading".to_string());
            return;
        }

        match self.handler.on_submit(&self.state.values) {
            Ok(()) => {
                let target = self.handler.describe();
                tracing::info!("Submitted form values to {target}");
                if self.keep_open {
                    self.state.status_message = Some(format!("Submitted to {target}"));
                } else {
                    self.quit = true;
                }
            }
            Err(err) => {
                tracing::error!("Submit failed: {err:#}");
                self.push_error(format!("Submit failed: {err:#}"));
            }
        }
    }
}

fn row_outcome(state: &AppState, row: &FormRow, key: KeyEvent) -> RowOutcome {
    let Some(field) = row.field else {
        return match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => RowOutcome::Submit,
            _ => RowOutcome::Ignored,
        };
    };

    match row.kind {
        RowKind::Field => field_outcome(state, row, field, key),
        RowKind::Instance { index } => match key.code {
            // Only Delete removes, so Enter can pass over instances
            KeyCode::Delete => RowOutcome::Action(FormAction::RemoveInstance {
                scope: row.scope.clone(),
                group: field.name.clone(),
                index,
            }),
            _ => RowOutcome::Ignored,
        },
        RowKind::AddInstance => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('+') => {
                RowOutcome::Action(FormAction::AddInstance {
                    scope: row.scope.clone(),
                    group: field.name.clone(),
                    children: field.child_components.clone(),
                })
            }
            _ => RowOutcome::Ignored,
        },
        RowKind::GroupHeader | RowKind::Submit => RowOutcome::Ignored,
    }
}

fn field_outcome(
    state: &AppState,
    row: &FormRow,
    field: &FieldDescriptor,
    key: KeyEvent,
) -> RowOutcome {
    let current = state
        .value_in(&row.scope, &field.name)
        .cloned()
        .unwrap_or_default();
    let set = |value: FieldValue| {
        RowOutcome::Action(FormAction::SetValue {
            scope: row.scope.clone(),
            field: field.name.clone(),
            value,
        })
    };
    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match field.component {
        ComponentKind::Text | ComponentKind::Number => match key.code {
            KeyCode::Char(c) if plain => {
                if field.component == ComponentKind::Number && !is_numeric_char(c) {
                    return RowOutcome::Ignored;
                }
                let mut text = current.as_text();
                text.push(c);
                set(FieldValue::Text(text))
            }
            KeyCode::Backspace => {
                let mut text = current.as_text();
                text.pop();
                set(FieldValue::Text(text))
            }
            _ => RowOutcome::Ignored,
        },
        ComponentKind::Select => cycle_option(&field.options, &current, key)
            .map(|option| set(FieldValue::Text(option)))
            .unwrap_or(RowOutcome::Ignored),
        ComponentKind::Radio if field.options.is_empty() => {
            // An unset control toggles to Yes first
            let next = !matches!(current.as_bool(), Some(true));
            match key.code {
                KeyCode::Char('y') => set(FieldValue::Bool(true)),
                KeyCode::Char('n') => set(FieldValue::Bool(false)),
                KeyCode::Left | KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
                    set(FieldValue::Bool(next))
                }
                _ => RowOutcome::Ignored,
            }
        }
        ComponentKind::Radio => cycle_option(&field.options, &current, key)
            .map(|option| set(FieldValue::Text(option)))
            .unwrap_or(RowOutcome::Ignored),
        ComponentKind::MultiSelect => {
            if field.options.is_empty() {
                return RowOutcome::Ignored;
            }
            let last = field.options.len() - 1;
            let cursor = state.option_cursor.min(last);
            match key.code {
                KeyCode::Left => RowOutcome::MoveCursor(cursor.saturating_sub(1)),
                KeyCode::Right => RowOutcome::MoveCursor((cursor + 1).min(last)),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    set(current.toggled(&field.options[cursor]))
                }
                _ => RowOutcome::Ignored,
            }
        }
        ComponentKind::Camera => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                tracing::debug!("Camera requested for {}", field.name);
                RowOutcome::Status(CAMERA_UNAVAILABLE.to_string())
            }
            _ => RowOutcome::Ignored,
        },
        ComponentKind::Group | ComponentKind::Unknown => RowOutcome::Ignored,
    }
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

/// Next or previous option for a single-choice control, wrapping around
fn cycle_option(options: &[String], current: &FieldValue, key: KeyEvent) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let count = options.len();
    let position = options.iter().position(|o| current.is_selected(o));
    let index = match key.code {
        KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
            position.map(|p| (p + 1) % count).unwrap_or(0)
        }
        KeyCode::Left => position.map(|p| (p + count - 1) % count).unwrap_or(count - 1),
        _ => return None,
    };
    Some(options[index].clone())
}
