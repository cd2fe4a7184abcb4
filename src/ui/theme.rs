//! Color palette of the console.

use ratatui::style::{Color, Modifier, Style};

use crate::models::{AlertSeverity, AlertStatus, EquipmentStatus};

pub const COLOR_BORDER: Color = Color::DarkGray;
pub const COLOR_ACCENT: Color = Color::Cyan;
pub const COLOR_HEADER: Color = Color::White;
pub const COLOR_DIM: Color = Color::DarkGray;
pub const COLOR_OK: Color = Color::LightGreen;
pub const COLOR_WARN: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

/// Background of the selected table row
pub const COLOR_SELECTED_BG: Color = Color::Rgb(30, 40, 60);

pub fn selected_row() -> Style {
    Style::default()
        .bg(COLOR_SELECTED_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn severity_color(severity: AlertSeverity) -> Color {
    match severity {
        AlertSeverity::Low => Color::Gray,
        AlertSeverity::Medium => COLOR_WARN,
        AlertSeverity::High => Color::LightRed,
        AlertSeverity::Critical => COLOR_ERROR,
    }
}

pub fn alert_status_color(status: AlertStatus) -> Color {
    match status {
        AlertStatus::Active => COLOR_ERROR,
        AlertStatus::Acknowledged => COLOR_WARN,
        AlertStatus::Resolved => COLOR_OK,
        AlertStatus::FalseAlarm => COLOR_DIM,
    }
}

pub fn equipment_status_color(status: Option<EquipmentStatus>) -> Color {
    match status {
        Some(EquipmentStatus::Operational) => COLOR_OK,
        Some(EquipmentStatus::Maintenance) => COLOR_WARN,
        Some(EquipmentStatus::Offline) => COLOR_ERROR,
        Some(EquipmentStatus::Retired) | None => COLOR_DIM,
    }
}

/// Style for a value outside its safe range.
pub fn exceedance() -> Style {
    Style::default()
        .fg(COLOR_ERROR)
        .add_modifier(Modifier::BOLD)
}
