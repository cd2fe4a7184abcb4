//! Header tabs and the status line shared by the signed-in screens.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_OK, COLOR_WARN};
use crate::app::{App, NoticeKind, Screen};

pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let [tabs_area, user_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(32)]).areas(area);

    let titles: Vec<Line> = Screen::NAVIGABLE
        .iter()
        .enumerate()
        .map(|(i, screen)| Line::from(format!("{} {}", i + 1, screen.title())))
        .collect();
    let selected = Screen::NAVIGABLE.iter().position(|s| *s == app.screen);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(COLOR_DIM))
        .highlight_style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    let brand = Paragraph::new(Line::from(vec![Span::styled(
        " MINEWATCH ",
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    )]));

    let [brand_area, tabs_area] =
        Layout::horizontal([Constraint::Length(12), Constraint::Min(0)]).areas(tabs_area);
    frame.render_widget(brand, brand_area);
    frame.render_widget(tabs, tabs_area);

    let user = match app.store.current_user() {
        Some(user) => format!("{} ({}) ", user.display_name(), user.role.as_str()),
        None => String::new(),
    };
    frame.render_widget(
        Paragraph::new(Line::styled(user, Style::default().fg(COLOR_DIM)))
            .alignment(ratatui::layout::Alignment::Right),
        user_area,
    );
}

/// Message for the status line: a pending confirmation or notice first,
/// then the error of the current screen's hook.
fn status_message(app: &App) -> Option<(String, ratatui::style::Color)> {
    if let Some(pending) = &app.pending_delete {
        return Some((format!("Delete {}? (y/n)", pending.label), COLOR_WARN));
    }
    if let Some(notice) = &app.notice {
        let color = match notice.kind {
            NoticeKind::Info => COLOR_OK,
            NoticeKind::Error => COLOR_ERROR,
        };
        return Some((notice.text.clone(), color));
    }
    screen_error(app).map(|e| (e, COLOR_ERROR))
}

/// Last failure recorded by the hooks the current screen reads.
pub fn screen_error(app: &App) -> Option<String> {
    let hooks = &app.hooks;
    match app.screen {
        Screen::Login => None,
        Screen::Dashboard => hooks
            .alerts
            .snapshot()
            .error
            .or_else(|| hooks.equipment.snapshot().error),
        Screen::Mines => hooks
            .mines
            .snapshot()
            .error
            .or_else(|| hooks.points.snapshot().error),
        Screen::Alerts => hooks.alerts.snapshot().error,
        Screen::Environment => hooks.environment.snapshot().error,
        Screen::Equipment => hooks.equipment.snapshot().error,
        Screen::Maintenance => hooks
            .maintenance
            .snapshot()
            .error
            .or_else(|| hooks.schedule.snapshot().error),
    }
}

fn key_hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => "Tab register/sign in  Enter next/submit  Esc quit",
        Screen::Dashboard => "1-6 screens  R refresh  L logout  q quit",
        Screen::Mines => "Enter points  d delete  R refresh  L logout  q quit",
        Screen::Alerts => "s status  v severity  a ack  r resolve  d delete  R refresh  q quit",
        Screen::Environment => "Enter stats  d delete  R refresh  L logout  q quit",
        Screen::Equipment => "t next status  d delete  R refresh  L logout  q quit",
        Screen::Maintenance => "d delete  R refresh  L logout  q quit",
    }
}

pub fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let hints = key_hints(app.screen);
    let [message_area, hints_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(hints.chars().count() as u16 + 1),
    ])
    .areas(area);

    if let Some((text, color)) = status_message(app) {
        frame.render_widget(
            Paragraph::new(Line::styled(format!(" {}", text), Style::default().fg(color))),
            message_area,
        );
    }
    frame.render_widget(
        Paragraph::new(Line::styled(hints, Style::default().fg(COLOR_DIM))),
        hints_area,
    );
}
