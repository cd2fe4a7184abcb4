//! Overview: alert summary, equipment statistics and service health.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::helpers::{format_time, panel, spinner, truncate};
use super::theme::{severity_color, COLOR_DIM, COLOR_ERROR, COLOR_OK, COLOR_WARN};
use crate::app::App;
use crate::models::AlertSeverity;

fn stat(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<22}", label), Style::default().fg(COLOR_DIM)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn pending(app: &App) -> Line<'static> {
    Line::styled(
        format!("{} Loading...", spinner(app.tick_count)),
        Style::default().fg(COLOR_DIM),
    )
}

pub fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let [top, recent_area] =
        Layout::vertical([Constraint::Length(10), Constraint::Min(0)]).areas(area);
    let [alerts_area, equipment_area, health_area] = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(35),
        Constraint::Percentage(25),
    ])
    .areas(top);

    render_alert_summary(frame, alerts_area, app);
    render_equipment_stats(frame, equipment_area, app);
    render_health(frame, health_area, app);
    render_recent_alerts(frame, recent_area, app);
}

fn render_alert_summary(frame: &mut Frame, area: Rect, app: &App) {
    let lines = match &app.summary {
        None => vec![pending(app)],
        Some(summary) => {
            let mut lines = vec![
                stat("Total alerts", summary.total_alerts.to_string()),
                stat("Active", summary.active_alerts.to_string()),
                Line::from(vec![
                    Span::styled(format!("{:<22}", "Critical"), Style::default().fg(COLOR_DIM)),
                    Span::styled(
                        summary.critical_alerts.to_string(),
                        Style::default()
                            .fg(if summary.critical_alerts > 0 { COLOR_ERROR } else { COLOR_OK })
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::raw(""),
            ];
            let by_severity: Vec<Span> = AlertSeverity::ALL
                .iter()
                .rev()
                .map(|severity| {
                    let count = summary
                        .alerts_by_severity
                        .get(severity.as_str())
                        .copied()
                        .unwrap_or(0);
                    Span::styled(
                        format!("{} {}  ", severity.as_str(), count),
                        Style::default().fg(severity_color(*severity)),
                    )
                })
                .collect();
            lines.push(Line::from(by_severity));
            lines
        }
    };
    frame.render_widget(Paragraph::new(lines).block(panel("Alerts")), area);
}

fn render_equipment_stats(frame: &mut Frame, area: Rect, app: &App) {
    let lines = match &app.equipment_stats {
        None => vec![pending(app)],
        Some(stats) => vec![
            stat("Total equipment", stats.total_equipment.to_string()),
            stat("Operational", stats.operational_equipment.to_string()),
            stat("In maintenance", stats.maintenance_equipment.to_string()),
            stat("Offline", stats.offline_equipment.to_string()),
            stat(
                "Operational rate",
                format!("{:.1}%", stats.operational_rate * 100.0),
            ),
            stat("Average efficiency", format!("{:.1}", stats.average_efficiency)),
            stat("Operating hours", format!("{:.0}", stats.total_operating_hours)),
        ],
    };
    let title = match app.mine_scope {
        Some(mine_id) => format!("Equipment of mine {}", mine_id),
        None => "Equipment".to_string(),
    };
    frame.render_widget(Paragraph::new(lines).block(panel(title)), area);
}

fn render_health(frame: &mut Frame, area: Rect, app: &App) {
    let lines = match &app.health {
        None => vec![pending(app)],
        Some(Ok(health)) => {
            let color = if health.is_healthy() { COLOR_OK } else { COLOR_WARN };
            let mut lines = vec![Line::styled(
                format!("● {}", health.status),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )];
            if let Some(version) = &health.version {
                lines.push(Line::styled(format!("version {}", version), Style::default().fg(COLOR_DIM)));
            }
            if let Some(service) = &health.service {
                lines.push(Line::styled(service.clone(), Style::default().fg(COLOR_DIM)));
            }
            lines
        }
        Some(Err(message)) => vec![
            Line::styled("● unreachable", Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD)),
            Line::styled(message.clone(), Style::default().fg(COLOR_DIM)),
        ],
    };
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(panel("Service")),
        area,
    );
}

fn render_recent_alerts(frame: &mut Frame, area: Rect, app: &App) {
    let recent = app
        .summary
        .as_ref()
        .map(|s| s.recent_alerts.as_slice())
        .unwrap_or_default();
    let width = area.width.saturating_sub(40) as usize;
    let lines: Vec<Line> = if recent.is_empty() {
        vec![Line::styled("No recent alerts", Style::default().fg(COLOR_DIM))]
    } else {
        recent
            .iter()
            .map(|alert| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<9}", alert.severity.as_str()),
                        Style::default().fg(severity_color(alert.severity)),
                    ),
                    Span::styled(
                        format!("{}  ", format_time(&alert.detected_at)),
                        Style::default().fg(COLOR_DIM),
                    ),
                    Span::raw(truncate(&alert.title, width)),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).block(panel("Recent alerts")), area);
}
