//! Message and session-event handling for the App.

use super::{App, AppMessage, Notice, Screen};
use crate::auth::SessionEvent;

impl App {
    /// Apply the result of a spawned task.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::Loaded(_) => {}
            AppMessage::SignInFinished(Ok(session)) => {
                let name = session.user().display_name().to_string();
                tracing::info!(user = %session.user().username, "Signed in from the console");
                self.login.reset();
                self.selection.reset();
                self.hooks.attach_all();
                self.notice = Some(Notice::info(format!("Signed in as {}", name)));
                self.navigate(Screen::Dashboard);
            }
            AppMessage::SignInFinished(Err(message)) => {
                self.login.submitting = false;
                self.login.password.clear();
                self.login.error = Some(message);
            }
            // Late results from a session that already ended are dropped.
            _ if !self.store.is_authenticated() => {}
            AppMessage::SummaryLoaded(summary) => self.summary = Some(summary),
            AppMessage::EquipmentStatsLoaded(stats) => self.equipment_stats = Some(stats),
            AppMessage::HealthChecked(result) => self.health = Some(result),
            AppMessage::PointStatsLoaded {
                monitoring_point_id,
                statistics,
            } => self.point_stats = Some((monitoring_point_id, statistics)),
            AppMessage::ActionSucceeded(text) => self.notice = Some(Notice::info(text)),
            AppMessage::ActionFailed(text) => self.notice = Some(Notice::error(text)),
        }
    }

    pub fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Expired => {
                tracing::info!("Session expired, returning to sign in");
                self.end_session(Notice::error("Session expired. Sign in again."));
            }
            SessionEvent::SignedOut => {
                if self.screen != Screen::Login {
                    self.end_session(Notice::info("Signed out"));
                }
            }
            SessionEvent::SignedIn(_) => self.mark_dirty(),
        }
    }

    /// Re-read the session after missing events.
    pub fn sync_session(&mut self) {
        if !self.store.is_authenticated() && self.screen != Screen::Login {
            self.end_session(Notice::error("Session ended. Sign in again."));
        }
    }

    /// Back to the login form; data of the ended session is dropped and
    /// calls still in flight are ignored.
    pub(crate) fn end_session(&mut self, notice: Notice) {
        self.hooks.detach_all();
        self.summary = None;
        self.equipment_stats = None;
        self.health = None;
        self.point_stats = None;
        self.pending_delete = None;
        self.mine_scope = None;
        self.selection.reset();
        self.login.reset();
        self.screen = Screen::Login;
        self.notice = Some(notice);
        self.mark_dirty();
    }
}
