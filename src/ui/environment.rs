//! Latest reading per monitoring point with threshold exceedances
//! highlighted, and the statistics panel of the selected point.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::helpers::{busy_suffix, format_opt_f64, format_time, panel, render_placeholder};
use super::theme::{exceedance, selected_row, table_header, COLOR_DIM, COLOR_ERROR, COLOR_OK};
use crate::app::{App, Screen, POINT_STATS_HOURS};
use crate::models::{EnvironmentReading, ReadingField, ReadingThresholds};

/// Columns shown in the table, in order.
pub const SHOWN_FIELDS: [ReadingField; 6] = [
    ReadingField::MethaneConcentration,
    ReadingField::CarbonMonoxide,
    ReadingField::OxygenConcentration,
    ReadingField::Temperature,
    ReadingField::Humidity,
    ReadingField::DustConcentration,
];

fn reading_row(reading: &EnvironmentReading, thresholds: &ReadingThresholds) -> Row<'static> {
    let violations = thresholds.violations(reading);
    let mut cells = vec![
        Cell::from(reading.monitoring_point_id.to_string()),
        Cell::from(format_time(&reading.recorded_at)),
    ];
    for field in SHOWN_FIELDS {
        let cell = Cell::from(format_opt_f64(reading.value(field), 2));
        cells.push(if violations.contains(&field) {
            cell.style(exceedance())
        } else {
            cell
        });
    }
    let ventilation = match reading.ventilation_status {
        Some(true) => Cell::from("on").style(Style::default().fg(COLOR_OK)),
        Some(false) => Cell::from("off").style(Style::default().fg(COLOR_ERROR)),
        None => Cell::from("-"),
    };
    cells.push(ventilation);
    Row::new(cells)
}

pub fn render_environment(frame: &mut Frame, area: Rect, app: &App) {
    let [table_area, stats_area] =
        Layout::horizontal([Constraint::Min(60), Constraint::Length(34)]).areas(area);

    let state = app.hooks.environment.snapshot();
    let scope = match app.mine_scope {
        Some(mine_id) => format!("Latest readings of mine {}", mine_id),
        None => "Latest readings".to_string(),
    };
    let block = panel(format!("{}{}", scope, busy_suffix(&state, app.tick_count)));
    if !render_placeholder(
        frame,
        table_area,
        block.clone(),
        &state,
        "No readings recorded",
        app.tick_count,
    ) {
        let thresholds = ReadingThresholds::default();
        let mut header = vec!["Point".to_string(), "Recorded".to_string()];
        header.extend(SHOWN_FIELDS.iter().map(|f| f.short_label().to_string()));
        header.push("Vent".to_string());

        let mut widths = vec![Constraint::Length(6), Constraint::Length(17)];
        widths.extend(SHOWN_FIELDS.iter().map(|_| Constraint::Length(8)));
        widths.push(Constraint::Length(5));

        let table = Table::new(
            state.items.iter().map(|r| reading_row(r, &thresholds)),
            widths,
        )
        .header(Row::new(header).style(table_header()))
        .row_highlight_style(selected_row())
        .block(block);
        let mut table_state = TableState::default()
            .with_selected(app.selection.clamped(Screen::Environment, state.items.len()));
        frame.render_stateful_widget(table, table_area, &mut table_state);
    }

    render_point_stats(frame, stats_area, app);
}

fn render_point_stats(frame: &mut Frame, area: Rect, app: &App) {
    let Some((point_id, stats)) = &app.point_stats else {
        frame.render_widget(
            Paragraph::new(Line::styled(
                "Select a reading and press Enter",
                Style::default().fg(COLOR_DIM),
            ))
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(panel("Statistics")),
            area,
        );
        return;
    };

    let mut lines = vec![Line::styled(
        format!("{} readings, last {}h", stats.count, POINT_STATS_HOURS),
        Style::default().fg(COLOR_DIM),
    )];
    if stats.is_empty() {
        lines.push(Line::raw("No data in this window"));
    }
    for field in ReadingField::ALL {
        if let Some(field_stats) = stats.field(field) {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<8}", field.short_label()), Style::default().fg(COLOR_DIM)),
                Span::raw(format!(
                    "{:>7.2} {:>7.2} {:>7.2}",
                    field_stats.min, field_stats.avg, field_stats.max
                )),
            ]));
        }
    }
    frame.render_widget(
        Paragraph::new(lines).block(panel(format!("Point {} min/avg/max", point_id))),
        area,
    );
}
