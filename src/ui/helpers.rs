//! Shared rendering helpers.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};
use crate::resources::ResourceState;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick / 8) as usize % SPINNER_FRAMES.len()]
}

pub fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Line::styled(
            format!(" {} ", title.into()),
            Style::default().fg(COLOR_HEADER),
        ))
}

/// Render the loading line, the failure note or the empty-state message for
/// `state` into `area`. Returns `false` when the table should be drawn.
pub fn render_placeholder<T>(
    frame: &mut Frame,
    area: Rect,
    block: Block<'static>,
    state: &ResourceState<T>,
    empty: &str,
    tick: u64,
) -> bool {
    let line = if state.loading && state.items.is_empty() {
        Line::styled(format!("{} Loading...", spinner(tick)), Style::default().fg(COLOR_DIM))
    } else if state.error.is_some() && state.items.is_empty() {
        Line::styled("Could not load. See the status line.", Style::default().fg(COLOR_ERROR))
    } else if state.items.is_empty() {
        Line::styled(empty.to_string(), Style::default().fg(COLOR_DIM))
    } else {
        return false;
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
    true
}

/// Title suffix while a reload runs behind rows already shown.
pub fn busy_suffix<T>(state: &ResourceState<T>, tick: u64) -> String {
    if state.loading && !state.items.is_empty() {
        format!(" {}", spinner(tick))
    } else {
        String::new()
    }
}

pub fn format_time(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_opt_time(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_time).unwrap_or_else(|| "-".to_string())
}

pub fn format_opt_f64(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Cut `text` to `max` display columns, ending with an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
