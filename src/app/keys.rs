//! Keyboard handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{App, Notice, Screen};
use crate::models::{AlertSeverity, AlertStatus};

/// `None`, then each of `all` in order, then `None` again.
fn cycle<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => all
            .iter()
            .position(|v| *v == value)
            .and_then(|i| all.get(i + 1))
            .copied(),
    }
}

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.mark_dirty();

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        if self.screen == Screen::Login {
            self.handle_login_key(key.code);
            return;
        }
        if let Some(pending) = self.pending_delete.take() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_delete(pending),
                _ => self.notice = Some(Notice::info("Delete cancelled")),
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char(c @ '1'..='6') => {
                if let Some(screen) = Screen::from_digit(c) {
                    self.navigate(screen);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.selection.move_up(self.screen),
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.row_count();
                self.selection.move_down(self.screen, len);
            }
            KeyCode::F(5) | KeyCode::Char('R') => self.refresh(),
            KeyCode::Char('L') => self.logout(),
            KeyCode::Char('d') => self.request_delete(),
            code => self.handle_screen_key(code),
        }
    }

    fn handle_screen_key(&mut self, code: KeyCode) {
        match (self.screen, code) {
            (Screen::Mines, KeyCode::Enter) => self.open_selected_mine(),
            (Screen::Environment, KeyCode::Enter) => self.open_selected_reading(),
            (Screen::Alerts, KeyCode::Char('s')) => {
                self.alert_filter.status = cycle(self.alert_filter.status, &AlertStatus::ALL);
                self.selection.reset();
                self.refresh();
            }
            (Screen::Alerts, KeyCode::Char('v')) => {
                self.alert_filter.severity =
                    cycle(self.alert_filter.severity, &AlertSeverity::ALL);
                self.selection.reset();
                self.refresh();
            }
            (Screen::Alerts, KeyCode::Char('a')) => self.acknowledge_selected(),
            (Screen::Alerts, KeyCode::Char('r')) => self.resolve_selected(),
            (Screen::Equipment, KeyCode::Char('t')) => self.cycle_equipment_status(),
            _ => {}
        }
    }

    fn handle_login_key(&mut self, code: KeyCode) {
        if self.login.submitting {
            return;
        }
        match code {
            KeyCode::Esc => self.quit(),
            KeyCode::Tab => self.login.toggle_mode(),
            KeyCode::BackTab | KeyCode::Up => self.login.focus_prev(),
            KeyCode::Down => self.login.focus_next(),
            KeyCode::Enter if self.login.is_last_field() => self.submit_login(),
            KeyCode::Enter => self.login.focus_next(),
            KeyCode::Backspace => self.login.backspace(),
            KeyCode::Char(c) => self.login.push(c),
            _ => {}
        }
    }
}
