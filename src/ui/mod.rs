//! UI rendering for the console.
//!
//! Every screen is a projection of the hooks in [`App::hooks`] plus the
//! small amount of view state the app keeps (selection, filter, form).
//! List areas follow one rule: a loading line while the first load runs,
//! an empty-state message for an empty result, otherwise a table. Hook
//! errors go to the status line.

mod alerts;
mod chrome;
mod dashboard;
mod environment;
mod equipment;
pub mod helpers;
mod login;
mod maintenance;
mod mines;
pub mod theme;

pub use chrome::screen_error;
pub use environment::SHOWN_FIELDS;

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::app::{App, Screen};

/// Render the current screen.
pub fn render(frame: &mut Frame, app: &App) {
    if app.screen == Screen::Login {
        login::render_login_screen(frame, app);
        return;
    }

    let [header, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    chrome::render_header(frame, header, app);
    match app.screen {
        Screen::Login => {}
        Screen::Dashboard => dashboard::render_dashboard(frame, body, app),
        Screen::Mines => mines::render_mines(frame, body, app),
        Screen::Alerts => alerts::render_alerts(frame, body, app),
        Screen::Environment => environment::render_environment(frame, body, app),
        Screen::Equipment => equipment::render_equipment(frame, body, app),
        Screen::Maintenance => maintenance::render_maintenance(frame, body, app),
    }
    chrome::render_status_line(frame, status, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::app::test_support::signed_in_app;
    use crate::app::{Notice, PendingDelete};
    use crate::error::ApiError;
    use crate::models::{Alert, EnvironmentReading};
    use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn alert(id: i64, title: &str) -> Alert {
        serde_json::from_str(&format!(
            r#"{{"id":{},"monitoring_point_id":2,"alert_type":"safety_violation","severity":"high",
                "status":"active","title":"{}","detected_at":"2024-06-01T10:00:00"}}"#,
            id, title
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_screen_masks_password() {
        let http = MockHttpClient::new();
        let mut app = signed_in_app(&http).await;
        app.screen = Screen::Login;
        app.login.username = "operator".to_string();
        app.login.password = "hunter2".to_string();

        let screen = text(&draw(&app));

        assert!(screen.contains("operator"));
        assert!(screen.contains("•••••••"));
        assert!(!screen.contains("hunter2"));
        assert!(screen.contains("Sign in"));
    }

    #[tokio::test]
    async fn test_alerts_loading_line() {
        let http = MockHttpClient::new();
        let mut app = signed_in_app(&http).await;
        app.screen = Screen::Alerts;
        app.hooks.alerts.resource().begin_fetch();

        let screen = text(&draw(&app));

        assert!(screen.contains("Loading..."));
    }

    #[tokio::test]
    async fn test_alerts_empty_state_mentions_filter() {
        let http = MockHttpClient::new();
        let mut app = signed_in_app(&http).await;
        app.screen = Screen::Alerts;
        app.alert_filter.status = Some(crate::models::AlertStatus::Resolved);
        let resource = app.hooks.alerts.resource();
        let ticket = resource.begin_fetch();
        resource.finish_list(ticket, Ok(Vec::new())).unwrap();

        let screen = text(&draw(&app));

        assert!(screen.contains("No alerts match this filter"));
        assert!(screen.contains("status=resolved"));
    }

    #[tokio::test]
    async fn test_alert_rows_and_error_in_status_line() {
        let http = MockHttpClient::new();
        let mut app = signed_in_app(&http).await;
        app.screen = Screen::Alerts;
        let resource = app.hooks.alerts.resource();
        let ticket = resource.begin_fetch();
        resource
            .finish_list(ticket, Ok(vec![alert(1, "Helmet missing"), alert(2, "Blocked exit")]))
            .unwrap();
        let failed: Result<(), ApiError> = resource.fail(ApiError::NotFound {
            message: "Alert not found".to_string(),
        });
        assert!(failed.is_err());

        let screen = text(&draw(&app));

        assert!(screen.contains("Helmet missing"));
        assert!(screen.contains("Blocked exit"));
        assert!(screen.contains("Alert not found"));
    }

    #[tokio::test]
    async fn test_pending_delete_prompt() {
        let http = MockHttpClient::new();
        let mut app = signed_in_app(&http).await;
        app.screen = Screen::Mines;
        app.notice = Some(Notice::info("Signed in as op"));
        app.pending_delete = Some(PendingDelete {
            screen: Screen::Mines,
            id: 4,
            label: "mine \"North Shaft\"".to_string(),
        });

        let screen = text(&draw(&app));

        assert!(screen.contains("Delete mine \"North Shaft\"? (y/n)"));
        assert!(!screen.contains("Signed in as op"));
    }

    #[tokio::test]
    async fn test_environment_highlights_exceedance() {
        let http = MockHttpClient::new();
        let mut app = signed_in_app(&http).await;
        app.screen = Screen::Environment;
        let reading: EnvironmentReading = serde_json::from_str(
            r#"{"id":1,"monitoring_point_id":3,"recorded_at":"2024-06-01T10:00:00",
                "methane_concentration":1.45,"oxygen_concentration":20.9,"temperature":24.0}"#,
        )
        .unwrap();
        let resource = app.hooks.environment.resource();
        let ticket = resource.begin_fetch();
        resource.finish_list(ticket, Ok(vec![reading])).unwrap();

        let buffer = draw(&app);
        let screen = text(&buffer);

        let (row, line) = screen
            .lines()
            .enumerate()
            .find(|(_, line)| line.contains("1.45"))
            .unwrap();
        let x = line.find("1.45").map(|byte| line[..byte].chars().count()).unwrap();
        assert_eq!(buffer[(x as u16, row as u16)].fg, Color::Red);

        let oxygen_x = line.find("20.90").map(|byte| line[..byte].chars().count()).unwrap();
        assert_ne!(buffer[(oxygen_x as u16, row as u16)].fg, Color::Red);
    }

    #[tokio::test]
    async fn test_header_shows_tabs_and_user() {
        let http = MockHttpClient::new();
        let app = signed_in_app(&http).await;

        let screen = text(&draw(&app));
        let header = screen.lines().next().unwrap();

        assert!(header.contains("MINEWATCH"));
        assert!(header.contains("1 Dashboard"));
        assert!(header.contains("6 Maintenance"));
        assert!(header.contains("op (operator)"));
    }

    #[tokio::test]
    async fn test_dashboard_equipment_rate_for_scoped_mine() {
        let http = MockHttpClient::new();
        let mut app = signed_in_app(&http).await;
        app.mine_scope = Some(2);
        app.equipment_stats = Some(crate::models::EquipmentStatistics {
            total_equipment: 8,
            operational_equipment: 6,
            operational_rate: 0.75,
            ..Default::default()
        });

        let screen = text(&draw(&app));

        assert!(screen.contains("Equipment of mine 2"));
        assert!(screen.contains("75.0%"));
    }
}
