use chrono::Utc;
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use super::helpers::{busy_suffix, format_opt_f64, format_opt_time, or_dash, panel, render_placeholder};
use super::theme::{equipment_status_color, exceedance, selected_row, table_header};
use crate::app::{App, Screen};

pub fn render_equipment(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.hooks.equipment.snapshot();
    let title = match app.mine_scope {
        Some(mine_id) => format!("Equipment of mine {}", mine_id),
        None => "Equipment".to_string(),
    };
    let block = panel(format!("{}{}", title, busy_suffix(&state, app.tick_count)));
    if render_placeholder(frame, area, block.clone(), &state, "No equipment registered", app.tick_count) {
        return;
    }

    let now = Utc::now();
    let rows = state.items.iter().map(|item| {
        let due = Cell::from(format_opt_time(item.next_maintenance_date.as_ref()));
        let due = if item.maintenance_overdue(now) {
            due.style(exceedance())
        } else {
            due
        };
        Row::new(vec![
            Cell::from(item.id.to_string()),
            Cell::from(item.name.clone()),
            Cell::from(item.equipment_type.clone()),
            Cell::from(or_dash(item.serial_number.as_deref())),
            Cell::from(item.status.clone())
                .style(Style::default().fg(equipment_status_color(item.known_status()))),
            Cell::from(format!("{:.1}", item.operating_hours)),
            Cell::from(format_opt_f64(item.efficiency_rating, 1)),
            due,
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(16),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(17),
        ],
    )
    .header(
        Row::new(vec!["ID", "Name", "Type", "Serial", "Status", "Hours", "Eff.", "Next service"])
            .style(table_header()),
    )
    .row_highlight_style(selected_row())
    .block(block);

    let mut table_state = TableState::default()
        .with_selected(app.selection.clamped(Screen::Equipment, state.items.len()));
    frame.render_stateful_widget(table, area, &mut table_state);
}
