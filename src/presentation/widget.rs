use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::rc::Rc;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::form::{FieldState, PhoneField};

/// Right-side affordance on the prefix field (the original widget shows
/// an arrow icon there).
const AFFORDANCE: &str = "▾";
const AFFORDANCE_WIDTH: u16 = 2;

/// Renders the composite field into `area`: a floated-label row, the
/// value row (prefix sized by the controller's width hint, suffix taking
/// the rest), and a message row showing help text or the suffix's
/// current invalid message.
pub fn render_phone_field(frame: &mut Frame<'_>, area: Rect, field: &PhoneField) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let label_columns = field_columns(rows[0], field);
    let value_columns = field_columns(rows[1], field);

    frame.render_widget(
        Paragraph::new(floated_label(field.prefix_field())),
        label_columns[0],
    );
    frame.render_widget(
        Paragraph::new(floated_label(field.suffix_field())),
        label_columns[1],
    );

    frame.render_widget(
        Paragraph::new(value_line(field.prefix_field(), false, true)),
        value_columns[0],
    );
    frame.render_widget(
        Paragraph::new(value_line(field.suffix_field(), field.is_editing(), false)),
        value_columns[1],
    );

    let messages = message_lines(field, rows[2].width);
    if !messages.is_empty() {
        frame.render_widget(Paragraph::new(messages), rows[2]);
    }

    if field.is_editing() {
        let text_width = UnicodeWidthStr::width(field.suffix()) as u16;
        let cursor_x = value_columns[1]
            .x
            .saturating_add(text_width)
            .min(value_columns[1].right().saturating_sub(1));
        frame.set_cursor_position((cursor_x, value_columns[1].y));
    }
}

fn field_columns(row: Rect, field: &PhoneField) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(field.width_hint().saturating_add(AFFORDANCE_WIDTH)),
            Constraint::Min(4),
        ])
        .split(row)
}

/// The placeholder floats above the field once it holds text; while the
/// field is empty it rests inside the value row instead.
fn floated_label(field: &FieldState) -> Line<'static> {
    match field.placeholder() {
        Some(placeholder) if !field.text().is_empty() => Line::from(Span::styled(
            placeholder.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
        _ => Line::default(),
    }
}

fn value_line(field: &FieldState, focused: bool, affordance: bool) -> Line<'static> {
    let mut spans = Vec::new();
    if field.text().is_empty() {
        if let Some(placeholder) = field.placeholder() {
            spans.push(Span::styled(
                placeholder.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }
    } else {
        let style = if focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(field.text().to_string(), style));
    }
    if affordance {
        spans.push(Span::styled(
            format!(" {AFFORDANCE}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn message_lines(field: &PhoneField, width: u16) -> Vec<Line<'static>> {
    let clamp_width = width.max(8) as usize;
    if let Some(result) = field.suffix_field().last_result() {
        if !result.is_valid {
            let message = result
                .message
                .clone()
                .unwrap_or_else(|| "Invalid phone number".to_string());
            return wrap(&message, clamp_width)
                .into_iter()
                .map(|segment| {
                    Line::from(Span::styled(
                        segment.into_owned(),
                        Style::default().fg(Color::Red),
                    ))
                })
                .collect();
        }
    }
    if let Some(help) = field.help_text() {
        return wrap(help, clamp_width)
            .into_iter()
            .map(|segment| {
                Line::from(Span::styled(
                    segment.into_owned(),
                    Style::default().fg(Color::Gray),
                ))
            })
            .collect();
    }
    Vec::new()
}
