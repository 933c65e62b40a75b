//! Field rendering for each component kind

use crate::schema::{ComponentKind, FieldDescriptor};
use crate::state::FieldValue;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of an editable field row, including its border
pub const FIELD_HEIGHT: u16 = 3;

const CURSOR: &str = "▌";

/// Draw one non-group field as a bordered control
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDescriptor,
    value: &FieldValue,
    is_active: bool,
    option_cursor: usize,
) {
    let content = match field.component {
        ComponentKind::Text | ComponentKind::Number => text_line(value, is_active),
        ComponentKind::Select => select_line(field, value, is_active),
        ComponentKind::Radio if field.options.is_empty() => {
            let state = value.as_bool();
            choice_line(
                [("Yes", state == Some(true)), ("No", state == Some(false))],
                "(•)",
                "( )",
                None,
            )
        }
        ComponentKind::Radio => choice_line(
            field
                .options
                .iter()
                .map(|o| (o.as_str(), value.is_selected(o))),
            "(•)",
            "( )",
            None,
        ),
        ComponentKind::MultiSelect => {
            if field.options.is_empty() {
                placeholder("(no options)")
            } else {
                choice_line(
                    field
                        .options
                        .iter()
                        .map(|o| (o.as_str(), value.is_selected(o))),
                    "[x]",
                    "[ ]",
                    is_active.then(|| option_cursor.min(field.options.len() - 1)),
                )
            }
        }
        ComponentKind::Camera => placeholder(if is_active {
            "Press Enter to capture a photo"
        } else {
            "Photo capture"
        }),
        ComponentKind::Group | ComponentKind::Unknown => return,
    };

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(field_title(field))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Block title with a required marker and the component label
fn field_title(field: &FieldDescriptor) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(" {}", field.name))];
    if field.required {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    spans.push(Span::styled(
        format!(" ({}) ", field.component.label()),
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

fn text_line(value: &FieldValue, is_active: bool) -> Line<'static> {
    let text = value.as_text();
    if text.is_empty() && !is_active {
        return placeholder("(empty)");
    }
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let mut spans = vec![Span::styled(text, style)];
    if is_active {
        spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

fn select_line(field: &FieldDescriptor, value: &FieldValue, is_active: bool) -> Line<'static> {
    if field.options.is_empty() {
        return placeholder("(no options)");
    }
    let current = match value.selected() {
        Some(option) => Span::raw(option.to_string()),
        None => Span::styled("(choose)", Style::default().fg(Color::DarkGray)),
    };
    if !is_active {
        return Line::from(current);
    }
    let arrow = Style::default().fg(Color::Cyan);
    Line::from(vec![
        Span::styled("◀ ", arrow),
        current,
        Span::styled(" ▶", arrow),
        Span::styled(
            format!("  {} options", field.options.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Options laid out side by side with a marker per option
fn choice_line<'a>(
    options: impl IntoIterator<Item = (&'a str, bool)>,
    on: &str,
    off: &str,
    cursor: Option<usize>,
) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (label, checked)) in options.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let mut style = if checked {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        if cursor == Some(i) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let marker = if checked { on } else { off };
        spans.push(Span::styled(format!("{marker} {label}"), style));
    }
    Line::from(spans)
}

fn placeholder(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_field(field: &FieldDescriptor, value: &FieldValue, is_active: bool) -> String {
        let backend = TestBackend::new(50, FIELD_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_field(frame, frame.area(), field, value, is_active, 0))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_text_field_shows_value_and_required_marker() {
        let field = FieldDescriptor::new("Name", ComponentKind::Text).required();
        let out = render_field(&field, &FieldValue::text("Acme"), true);
        assert!(out.contains("Name *"));
        assert!(out.contains("Acme▌"));
    }

    #[test]
    fn test_empty_text_placeholder() {
        let field = FieldDescriptor::new("Name", ComponentKind::Text);
        let out = render_field(&field, &FieldValue::default(), false);
        assert!(out.contains("(empty)"));
        assert!(!out.contains('*'));
    }

    #[test]
    fn test_select_shows_choice() {
        let field =
            FieldDescriptor::new("Type", ComponentKind::Select).with_options(&["Retail", "Kiosk"]);
        assert!(render_field(&field, &FieldValue::default(), false).contains("(choose)"));
        assert!(render_field(&field, &FieldValue::text("Kiosk"), true).contains("◀ Kiosk ▶"));
    }

    #[test]
    fn test_radio_and_multi_select_markers() {
        let radio =
            FieldDescriptor::new("Size", ComponentKind::Radio).with_options(&["Small", "Large"]);
        let out = render_field(&radio, &FieldValue::text("Large"), false);
        assert!(out.contains("( ) Small"));
        assert!(out.contains("(•) Large"));

        let boolean = FieldDescriptor::new("Open", ComponentKind::Radio);
        assert!(render_field(&boolean, &FieldValue::Bool(true), false).contains("(•) Yes"));
        assert!(render_field(&boolean, &FieldValue::text("No"), false).contains("(•) No"));

        let multi = FieldDescriptor::new("Brands", ComponentKind::MultiSelect)
            .with_options(&["A", "B"]);
        let out = render_field(&multi, &FieldValue::List(vec!["B".to_string()]), false);
        assert!(out.contains("[ ] A"));
        assert!(out.contains("[x] B"));
    }

    #[test]
    fn test_unset_boolean_radio_selects_nothing() {
        let boolean = FieldDescriptor::new("Open", ComponentKind::Radio);
        let out = render_field(&boolean, &FieldValue::default(), false);
        assert!(out.contains("( ) Yes  ( ) No"));
        assert!(!out.contains('•'));
    }

    #[test]
    fn test_camera_placeholder() {
        let field = FieldDescriptor::new("Photo", ComponentKind::Camera);
        assert!(render_field(&field, &FieldValue::default(), true).contains("capture a photo"));
    }
}
