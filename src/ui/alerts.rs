use chrono::Utc;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::helpers::{busy_suffix, format_time, panel, render_placeholder};
use super::theme::{alert_status_color, selected_row, severity_color, table_header, COLOR_ACCENT, COLOR_DIM};
use crate::app::{App, Screen};
use crate::models::Alert;

fn point_name(alert: &Alert) -> String {
    alert
        .monitoring_point
        .as_ref()
        .and_then(|p| p.name.clone())
        .unwrap_or_else(|| format!("#{}", alert.monitoring_point_id))
}

/// "3h ago" style age of a detection.
fn age(alert: &Alert) -> String {
    let minutes = (Utc::now() - alert.detected_at).num_minutes().max(0);
    match minutes {
        0..=59 => format!("{}m ago", minutes),
        60..=1439 => format!("{}h ago", minutes / 60),
        _ => format_time(&alert.detected_at),
    }
}

pub fn render_alerts(frame: &mut Frame, area: Rect, app: &App) {
    let [filter_area, table_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let filter = Line::from(vec![
        Span::styled(" Filter: ", Style::default().fg(COLOR_DIM)),
        Span::styled(
            app.alert_filter.describe(),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(filter), filter_area);

    let state = app.hooks.alerts.snapshot();
    let block = panel(format!(
        "Alerts ({}){}",
        state.items.len(),
        busy_suffix(&state, app.tick_count)
    ));
    let empty = if app.alert_filter.is_empty() {
        "No alerts"
    } else {
        "No alerts match this filter"
    };
    if render_placeholder(frame, table_area, block.clone(), &state, empty, app.tick_count) {
        return;
    }

    let rows = state.items.iter().map(|alert| {
        Row::new(vec![
            Cell::from(alert.id.to_string()),
            Cell::from(alert.severity.as_str()).style(
                Style::default()
                    .fg(severity_color(alert.severity))
                    .add_modifier(Modifier::BOLD),
            ),
            Cell::from(alert.status.as_str()).style(Style::default().fg(alert_status_color(alert.status))),
            Cell::from(alert.alert_type.label()),
            Cell::from(alert.title.clone()),
            Cell::from(point_name(alert)),
            Cell::from(age(alert)),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Length(13),
            Constraint::Length(21),
            Constraint::Min(20),
            Constraint::Length(16),
            Constraint::Length(17),
        ],
    )
    .header(
        Row::new(vec!["ID", "Severity", "Status", "Type", "Title", "Point", "Detected"])
            .style(table_header()),
    )
    .row_highlight_style(selected_row())
    .block(block);

    let mut table_state =
        TableState::default().with_selected(app.selection.clamped(Screen::Alerts, state.items.len()));
    frame.render_stateful_widget(table, table_area, &mut table_state);
}
