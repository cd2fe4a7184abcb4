use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use super::helpers::{busy_suffix, format_opt_f64, format_time, or_dash, panel, render_placeholder, truncate};
use super::theme::{selected_row, table_header};
use crate::app::{App, Screen, UPCOMING_DAYS};

pub fn render_maintenance(frame: &mut Frame, area: Rect, app: &App) {
    let [records_area, upcoming_area] =
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    let state = app.hooks.maintenance.snapshot();
    let title = match app.mine_scope {
        Some(mine_id) => format!("Maintenance records of mine {}", mine_id),
        None => "Maintenance records".to_string(),
    };
    let block = panel(format!("{}{}", title, busy_suffix(&state, app.tick_count)));
    if !render_placeholder(
        frame,
        records_area,
        block.clone(),
        &state,
        "No maintenance records",
        app.tick_count,
    ) {
        let rows = state.items.iter().map(|record| {
            Row::new(vec![
                Cell::from(record.id.to_string()),
                Cell::from(record.equipment_id.to_string()),
                Cell::from(record.maintenance_type.clone()),
                Cell::from(record.status.clone()),
                Cell::from(format_time(&record.start_time)),
                Cell::from(or_dash(record.performed_by.as_deref())),
                Cell::from(format_opt_f64(record.cost, 2)),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Length(9),
                Constraint::Length(14),
                Constraint::Length(12),
                Constraint::Length(17),
                Constraint::Min(12),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(vec!["ID", "Equip.", "Type", "Status", "Start", "Performed by", "Cost"])
                .style(table_header()),
        )
        .row_highlight_style(selected_row())
        .block(block);
        let mut table_state = TableState::default()
            .with_selected(app.selection.clamped(Screen::Maintenance, state.items.len()));
        frame.render_stateful_widget(table, records_area, &mut table_state);
    }

    let upcoming = app.hooks.schedule.snapshot();
    let block = panel(format!(
        "Upcoming, next {} days{}",
        UPCOMING_DAYS,
        busy_suffix(&upcoming, app.tick_count)
    ));
    if render_placeholder(
        frame,
        upcoming_area,
        block.clone(),
        &upcoming,
        "Nothing scheduled",
        app.tick_count,
    ) {
        return;
    }
    let width = upcoming_area.width.saturating_sub(46) as usize;
    let rows = upcoming.items.iter().map(|record| {
        Row::new(vec![
            Cell::from(format_time(&record.start_time)),
            Cell::from(record.equipment_id.to_string()),
            Cell::from(record.maintenance_type.clone()),
            Cell::from(truncate(&record.description, width)),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(17),
            Constraint::Length(9),
            Constraint::Length(14),
            Constraint::Min(10),
        ],
    )
    .header(Row::new(vec!["Start", "Equip.", "Type", "Description"]).style(table_header()))
    .block(block);
    frame.render_widget(table, upcoming_area);
}
