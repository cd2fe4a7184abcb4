//! Console state and logic for the TUI.
//!
//! - [`App`] - everything the renderers read, plus the task channel
//! - [`Screen`] - which screen is displayed
//! - [`AppMessage`] - results of spawned tasks
//!
//! Views are projections of the hooks in [`Hooks`]: the app only keeps the
//! selected rows, the alert filter, form values and a few summary records.

mod handlers;
mod keys;
mod messages;
mod tasks;
mod types;

pub use messages::AppMessage;
pub use types::{
    FormField, FormMode, LoginForm, Notice, NoticeKind, PendingDelete, Screen, Selection,
};

use tokio::sync::{broadcast, mpsc};

use crate::auth::{SessionEvent, SessionState, SessionStore};
use crate::models::{
    AlertFilter, AlertSummary, EnvironmentStatistics, EquipmentStatistics, HealthStatus, Identified,
};
use crate::resources::Hooks;
use crate::startup::ConsoleContext;

/// Days of upcoming maintenance shown next to the record list.
pub const UPCOMING_DAYS: u32 = 14;
/// Window of the statistics panel on the environment screen.
pub const POINT_STATS_HOURS: u32 = 24;

/// Main console state.
pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    /// Set by anything that changes what is on screen
    pub needs_redraw: bool,
    pub tick_count: u64,
    pub store: SessionStore,
    pub hooks: Hooks,
    pub login: LoginForm,
    pub selection: Selection,
    pub alert_filter: AlertFilter,
    /// Mine selected on the mines screen; scopes the environment screen
    pub mine_scope: Option<i64>,
    pub summary: Option<AlertSummary>,
    pub equipment_stats: Option<EquipmentStatistics>,
    pub health: Option<Result<HealthStatus, String>>,
    pub point_stats: Option<(i64, EnvironmentStatistics)>,
    pub pending_delete: Option<PendingDelete>,
    pub notice: Option<Notice>,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the event loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Taken by the event loop
    pub session_rx: Option<broadcast::Receiver<SessionEvent>>,
}

impl App {
    pub fn new(store: SessionStore, hooks: Hooks) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let session_rx = store.handle().subscribe();
        Self {
            screen: Screen::Login,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            store,
            hooks,
            login: LoginForm::default(),
            selection: Selection::default(),
            alert_filter: AlertFilter::default(),
            mine_scope: None,
            summary: None,
            equipment_stats: None,
            health: None,
            point_stats: None,
            pending_delete: None,
            notice: None,
            message_tx,
            message_rx: Some(message_rx),
            session_rx: Some(session_rx),
        }
    }

    pub fn from_context(context: &ConsoleContext) -> Self {
        Self::new(context.store.clone(), context.hooks())
    }

    /// Pick the first screen from the restored session.
    pub fn start(&mut self, state: &SessionState) {
        match state.user() {
            Some(user) => {
                self.login.username = user.username.clone();
                self.navigate(Screen::Dashboard);
            }
            None => self.screen = Screen::Login,
        }
        self.mark_dirty();
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance the tick counter used for the loading spinner.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_loading() && self.tick_count % 8 == 0 {
            self.mark_dirty();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Whether the current screen has a call outstanding.
    pub fn is_loading(&self) -> bool {
        match self.screen {
            Screen::Login => self.login.submitting,
            Screen::Dashboard => {
                self.hooks.alerts.snapshot().loading || self.hooks.equipment.snapshot().loading
            }
            Screen::Mines => {
                self.hooks.mines.snapshot().loading || self.hooks.points.snapshot().loading
            }
            Screen::Alerts => self.hooks.alerts.snapshot().loading,
            Screen::Environment => self.hooks.environment.snapshot().loading,
            Screen::Equipment => self.hooks.equipment.snapshot().loading,
            Screen::Maintenance => {
                self.hooks.maintenance.snapshot().loading || self.hooks.schedule.snapshot().loading
            }
        }
    }

    /// Rows of the list the selection moves over on the current screen.
    pub fn row_count(&self) -> usize {
        match self.screen {
            Screen::Login | Screen::Dashboard => 0,
            Screen::Mines => self.hooks.mines.snapshot().items.len(),
            Screen::Alerts => self.hooks.alerts.snapshot().items.len(),
            Screen::Environment => self.hooks.environment.snapshot().items.len(),
            Screen::Equipment => self.hooks.equipment.snapshot().items.len(),
            Screen::Maintenance => self.hooks.maintenance.snapshot().items.len(),
        }
    }

    /// Id of the selected row on the current screen.
    pub fn selected_id(&self) -> Option<i64> {
        fn pick<T: Identified>(items: &[T], index: Option<usize>) -> Option<i64> {
            index.and_then(|i| items.get(i)).map(Identified::id)
        }
        let index = self.selection.clamped(self.screen, self.row_count());
        match self.screen {
            Screen::Login | Screen::Dashboard => None,
            Screen::Mines => pick(&self.hooks.mines.snapshot().items, index),
            Screen::Alerts => pick(&self.hooks.alerts.snapshot().items, index),
            Screen::Environment => pick(&self.hooks.environment.snapshot().items, index),
            Screen::Equipment => pick(&self.hooks.equipment.snapshot().items, index),
            Screen::Maintenance => pick(&self.hooks.maintenance.snapshot().items, index),
        }
    }
}
