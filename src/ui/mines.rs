use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::helpers::{busy_suffix, format_opt_f64, or_dash, panel, render_placeholder};
use super::theme::{selected_row, table_header, COLOR_DIM, COLOR_OK};
use crate::app::{App, Screen};

pub fn render_mines(frame: &mut Frame, area: Rect, app: &App) {
    let [mines_area, points_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);
    render_mine_table(frame, mines_area, app);
    render_point_table(frame, points_area, app);
}

fn render_mine_table(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.hooks.mines.snapshot();
    let block = panel(format!("Mines{}", busy_suffix(&state, app.tick_count)));
    if render_placeholder(frame, area, block.clone(), &state, "No mines yet", app.tick_count) {
        return;
    }

    let rows = state.items.iter().map(|mine| {
        let marker = if app.mine_scope == Some(mine.id) { "▸" } else { " " };
        Row::new(vec![
            Cell::from(format!("{}{}", marker, mine.id)),
            Cell::from(mine.name.clone()),
            Cell::from(or_dash(mine.location.as_deref())),
            Cell::from(format_opt_f64(mine.depth, 0)),
            Cell::from(mine.status.clone()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(vec!["ID", "Name", "Location", "Depth m", "Status"]).style(table_header()))
    .row_highlight_style(selected_row())
    .block(block);

    let mut table_state =
        TableState::default().with_selected(app.selection.clamped(Screen::Mines, state.items.len()));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn render_point_table(frame: &mut Frame, area: Rect, app: &App) {
    let Some(mine_id) = app.mine_scope else {
        let hint = Paragraph::new(Line::styled(
            "Select a mine and press Enter",
            Style::default().fg(COLOR_DIM),
        ))
        .block(panel("Monitoring points"));
        frame.render_widget(hint, area);
        return;
    };

    let state = app.hooks.points.snapshot();
    let block = panel(format!(
        "Monitoring points of mine {}{}",
        mine_id,
        busy_suffix(&state, app.tick_count)
    ));
    if render_placeholder(
        frame,
        area,
        block.clone(),
        &state,
        "No monitoring points at this mine",
        app.tick_count,
    ) {
        return;
    }

    let rows = state.items.iter().map(|point| {
        let active = if point.is_active {
            Cell::from("yes").style(Style::default().fg(COLOR_OK))
        } else {
            Cell::from("no").style(Style::default().fg(COLOR_DIM))
        };
        Row::new(vec![
            Cell::from(point.name.clone()),
            Cell::from(or_dash(point.location.as_deref())),
            Cell::from(or_dash(point.camera_id.as_deref())),
            active,
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(vec!["Name", "Location", "Camera", "Active"]).style(table_header()))
    .block(block);
    frame.render_widget(table, area);
}
