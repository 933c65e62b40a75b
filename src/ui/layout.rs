//! Layout components (form area, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::schema::ComponentKind;
use crate::state::{FormRow, RowKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the form area and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    let hints = get_row_hints(app.state.focused_row().as_ref());
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Submit target on the right
    let target = format!(" → {} ", app.submit_target());
    let width = (target.chars().count() as u16).min(area.width);
    let target_area = Rect {
        x: area.x + area.width - width,
        width,
        ..area
    };
    let target_widget =
        Paragraph::new(target).style(Style::default().bg(Color::DarkGray).fg(Color::Blue));
    frame.render_widget(target_widget, target_area);
}

/// Keyboard hints for the focused row
fn get_row_hints(row: Option<&FormRow>) -> String {
    let Some(row) = row else {
        return "Esc:quit".to_string();
    };
    let specific = match (row.kind, row.component()) {
        (RowKind::Submit, _) => "Enter:submit",
        (RowKind::AddInstance, _) => "Enter:add",
        (RowKind::Instance { .. }, _) => "Del:remove",
        (RowKind::GroupHeader, _) => "",
        (RowKind::Field, Some(ComponentKind::Text | ComponentKind::Number)) => "type to edit",
        (RowKind::Field, Some(ComponentKind::Select)) => "←/→:choose",
        (RowKind::Field, Some(ComponentKind::Radio)) => "←/→/Space:choose",
        (RowKind::Field, Some(ComponentKind::MultiSelect)) => "←/→:move  Space:toggle",
        (RowKind::Field, Some(ComponentKind::Camera)) => "Enter:capture",
        (RowKind::Field, _) => "",
    };
    let mut hints = String::from("Tab:next");
    if !specific.is_empty() {
        hints.push_str("  ");
        hints.push_str(specific);
    }
    hints.push_str(&format!("  {SUBMIT_SHORTCUT}:submit  Esc:quit"));
    hints
}
