//! Schema-driven form view

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{FormRow, RowKind};
use crate::ui::components::{render_button, render_inline_action, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows a form row occupies on screen
pub fn row_height(row: &FormRow) -> u16 {
    match row.kind {
        RowKind::Field => FIELD_HEIGHT,
        RowKind::GroupHeader | RowKind::Instance { .. } | RowKind::AddInstance => 1,
        RowKind::Submit => BUTTON_HEIGHT,
    }
}

/// First row to draw so the focused row fits in a viewport of `viewport` lines
pub fn first_visible_row(heights: &[u16], focus: usize, viewport: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let focus = focus.min(heights.len() - 1);
    let mut start = focus;
    let mut used = heights[focus];
    while start > 0 && used + heights[start - 1] <= viewport {
        start -= 1;
        used += heights[start];
    }
    // Fill from the top when everything up to the focus fits
    if heights[..=focus].iter().sum::<u16>() <= viewport {
        0
    } else {
        start
    }
}

/// Draw the form inside a titled frame
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let block = Block::default()
        .title(format!(" {} ", state.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.is_loading() {
        let loading = Paragraph::new("Loading schema…")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        let middle = Rect {
            y: inner.y + inner.height / 2,
            height: inner.height.min(1),
            ..inner
        };
        frame.render_widget(loading, middle);
        return;
    }

    let rows = state.rows();
    let heights: Vec<u16> = rows.iter().map(row_height).collect();
    let start = first_visible_row(&heights, state.focus, inner.height);

    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for (index, row) in rows.iter().enumerate().skip(start) {
        if y >= bottom {
            break;
        }
        let height = heights[index].min(bottom - y);
        let indent = (row.depth as u16 * 2).min(inner.width);
        let row_area = Rect {
            x: inner.x + indent,
            y,
            width: inner.width - indent,
            height,
        };
        draw_row(frame, row_area, app, row, index == state.focus);
        y += height;
    }
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, row: &FormRow, is_active: bool) {
    let state = &app.state;
    match (row.kind, row.field) {
        (RowKind::Submit, _) | (_, None) => {
            render_button(frame, area, "Submit", is_active, Some(Color::Green))
        }
        (RowKind::Field, Some(field)) => {
            let value = state
                .value_in(&row.scope, &field.name)
                .cloned()
                .unwrap_or_default();
            draw_field(frame, area, field, &value, is_active, state.option_cursor);
        }
        (RowKind::GroupHeader, Some(field)) => {
            let mut spans = vec![Span::styled(
                field.name.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )];
            if field.add_more {
                let count = state
                    .value_in(&row.scope, &field.name)
                    .map_or(0, |value| value.instances().len());
                spans.push(Span::styled(
                    format!(" ({count})"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), area);
        }
        (RowKind::Instance { index }, Some(field)) => {
            let style = if is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let mut spans = vec![Span::styled(format!("{} #{}", field.name, index + 1), style)];
            if is_active {
                spans.push(Span::styled(
                    "  Del:remove",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)), area);
        }
        (RowKind::AddInstance, Some(field)) => {
            render_inline_action(frame, area, &format!("+ Add {}", field.name), is_active)
        }
    }
}
