//! Spawned work: loading screens, signing in, and mutations.
//!
//! Every task reports back over `message_tx`; hook results are already
//! recorded in the hook by the time the message arrives.

use std::future::Future;

use super::{App, AppMessage, FormMode, Notice, PendingDelete, Screen, POINT_STATS_HOURS, UPCOMING_DAYS};
use crate::error::ApiResult;
use crate::models::{EquipmentFilter, EquipmentStatus, MaintenanceFilter, ReadingFilter};

impl App {
    /// Switch to `screen` and load what it shows.
    pub fn navigate(&mut self, screen: Screen) {
        self.screen = screen;
        self.pending_delete = None;
        self.refresh();
    }

    /// Reload everything the current screen shows.
    pub fn refresh(&mut self) {
        match self.screen {
            Screen::Login => {}
            Screen::Dashboard => {
                self.load_summary();
                self.load_equipment_stats();
                self.check_health();
            }
            Screen::Mines => {
                let mines = self.hooks.mines.clone();
                self.spawn_load(Screen::Mines, "mines", async move { mines.fetch_all().await });
                if let Some(mine_id) = self.mine_scope {
                    self.load_points(mine_id);
                }
            }
            Screen::Alerts => {
                let alerts = self.hooks.alerts.clone();
                let filter = self.alert_filter.clone();
                self.spawn_load(Screen::Alerts, "alerts", async move {
                    alerts.fetch_all(&filter).await
                });
            }
            Screen::Environment => {
                let environment = self.hooks.environment.clone();
                let filter = match self.mine_scope {
                    Some(mine_id) => ReadingFilter::for_mine(mine_id),
                    None => ReadingFilter::default(),
                };
                self.spawn_load(Screen::Environment, "readings", async move {
                    environment.fetch_latest_per_point(&filter).await
                });
            }
            Screen::Equipment => {
                let equipment = self.hooks.equipment.clone();
                let filter = match self.mine_scope {
                    Some(mine_id) => EquipmentFilter::for_mine(mine_id),
                    None => EquipmentFilter::default(),
                };
                self.spawn_load(Screen::Equipment, "equipment", async move {
                    equipment.fetch_all(&filter).await
                });
            }
            Screen::Maintenance => {
                let records = self.hooks.maintenance.clone();
                let scope = self.mine_scope;
                self.spawn_load(Screen::Maintenance, "maintenance records", async move {
                    match scope {
                        Some(mine_id) => records.by_mine(mine_id).await,
                        None => records.fetch_all(&MaintenanceFilter::default()).await,
                    }
                });
                let schedule = self.hooks.schedule.clone();
                self.spawn_load(Screen::Maintenance, "upcoming maintenance", async move {
                    schedule.upcoming(UPCOMING_DAYS).await
                });
            }
        }
        self.mark_dirty();
    }

    fn load_points(&self, mine_id: i64) {
        let points = self.hooks.points.clone();
        self.spawn_load(Screen::Mines, "monitoring points", async move {
            points.fetch_for_mine(mine_id).await
        });
    }

    fn load_summary(&self) {
        let alerts = self.hooks.alerts.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match alerts.summary().await {
                Ok(summary) => AppMessage::SummaryLoaded(summary),
                Err(_) => AppMessage::Loaded(Screen::Dashboard),
            };
            let _ = tx.send(msg);
        });
    }

    fn load_equipment_stats(&self) {
        let equipment = self.hooks.equipment.clone();
        let scope = self.mine_scope;
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match equipment.statistics(scope).await {
                Ok(stats) => AppMessage::EquipmentStatsLoaded(stats),
                Err(_) => AppMessage::Loaded(Screen::Dashboard),
            };
            let _ = tx.send(msg);
        });
    }

    fn check_health(&self) {
        let api = self.store.api().clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = api.system().health().await.map_err(|e| e.user_message());
            let _ = tx.send(AppMessage::HealthChecked(result));
        });
    }

    /// Scope the points list (and the environment screen) to the selected mine.
    pub fn open_selected_mine(&mut self) {
        if let Some(mine_id) = self.selected_id() {
            self.mine_scope = Some(mine_id);
            self.load_points(mine_id);
        }
    }

    /// Load the statistics panel for the selected reading's monitoring point.
    pub fn open_selected_reading(&mut self) {
        let index = self
            .selection
            .clamped(Screen::Environment, self.row_count());
        let point = index
            .and_then(|i| self.hooks.environment.snapshot().items.get(i).cloned())
            .map(|reading| reading.monitoring_point_id);
        let Some(point_id) = point else { return };

        let environment = self.hooks.environment.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match environment.statistics(point_id, POINT_STATS_HOURS).await {
                Ok(statistics) => AppMessage::PointStatsLoaded {
                    monitoring_point_id: point_id,
                    statistics,
                },
                Err(_) => AppMessage::Loaded(Screen::Environment),
            };
            let _ = tx.send(msg);
        });
    }

    /// Send the login form, or the register form followed by a login.
    pub fn submit_login(&mut self) {
        if self.login.submitting {
            return;
        }
        self.login.submitting = true;
        self.login.error = None;

        let store = self.store.clone();
        let tx = self.message_tx.clone();
        match self.login.mode {
            FormMode::SignIn => {
                let credentials = self.login.credentials();
                tokio::spawn(async move {
                    let result = store.login(&credentials).await.map_err(|e| e.user_message());
                    let _ = tx.send(AppMessage::SignInFinished(result));
                });
            }
            FormMode::Register => {
                let new_user = self.login.new_user();
                tokio::spawn(async move {
                    let result = store.register(&new_user).await.map_err(|e| e.user_message());
                    let _ = tx.send(AppMessage::SignInFinished(result));
                });
            }
        }
        self.mark_dirty();
    }

    /// Sign out now; storage is cleared in the background.
    pub fn logout(&mut self) {
        tracing::info!("Signing out from the console");
        let clear_storage = self.store.logout();
        tokio::spawn(async move {
            if let Err(e) = clear_storage.await {
                tracing::warn!(error = %e, "Failed to clear the stored session");
            }
        });
        self.end_session(Notice::info("Signed out"));
    }

    /// Ask for confirmation before deleting the selected row.
    pub fn request_delete(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let label = self.describe_row(id);
        self.pending_delete = Some(PendingDelete {
            screen: self.screen,
            id,
            label,
        });
    }

    fn describe_row(&self, id: i64) -> String {
        let found = match self.screen {
            Screen::Mines => self
                .hooks
                .mines
                .snapshot()
                .items
                .into_iter()
                .find(|m| m.id == id)
                .map(|m| format!("mine \"{}\"", m.name)),
            Screen::Alerts => self
                .hooks
                .alerts
                .snapshot()
                .items
                .into_iter()
                .find(|a| a.id == id)
                .map(|a| format!("alert \"{}\"", a.title)),
            Screen::Equipment => self
                .hooks
                .equipment
                .snapshot()
                .items
                .into_iter()
                .find(|e| e.id == id)
                .map(|e| format!("equipment \"{}\"", e.name)),
            Screen::Environment => Some(format!("reading #{}", id)),
            Screen::Maintenance => Some(format!("maintenance record #{}", id)),
            Screen::Login | Screen::Dashboard => None,
        };
        found.unwrap_or_else(|| format!("#{}", id))
    }

    /// Run a confirmed delete. The row disappears once the server accepts it.
    pub fn confirm_delete(&mut self, pending: PendingDelete) {
        let PendingDelete { screen, id, label } = pending;
        let done = format!("Deleted {}", label);
        match screen {
            Screen::Mines => {
                let mines = self.hooks.mines.clone();
                self.spawn_action(done, async move { mines.delete(id).await });
            }
            Screen::Alerts => {
                let alerts = self.hooks.alerts.clone();
                self.spawn_action(done, async move { alerts.delete(id).await });
            }
            Screen::Environment => {
                let environment = self.hooks.environment.clone();
                self.spawn_action(done, async move { environment.delete(id).await });
            }
            Screen::Equipment => {
                let equipment = self.hooks.equipment.clone();
                self.spawn_action(done, async move { equipment.delete(id).await });
            }
            Screen::Maintenance => {
                let records = self.hooks.maintenance.clone();
                self.spawn_action(done, async move { records.delete(id).await });
            }
            Screen::Login | Screen::Dashboard => {}
        }
    }

    pub fn acknowledge_selected(&mut self) {
        let Some(alert) = self.selected_alert() else { return };
        if !alert.status.can_acknowledge() {
            self.notice = Some(Notice::error(format!(
                "Only active alerts can be acknowledged (this one is {})",
                alert.status
            )));
            return;
        }
        let alerts = self.hooks.alerts.clone();
        self.spawn_action(format!("Acknowledged \"{}\"", alert.title), async move {
            alerts.acknowledge(alert.id).await
        });
    }

    pub fn resolve_selected(&mut self) {
        let Some(alert) = self.selected_alert() else { return };
        if !alert.status.can_resolve() {
            self.notice = Some(Notice::error(format!(
                "Alert is already {}",
                alert.status
            )));
            return;
        }
        let alerts = self.hooks.alerts.clone();
        self.spawn_action(format!("Resolved \"{}\"", alert.title), async move {
            alerts.resolve(alert.id).await
        });
    }

    fn selected_alert(&self) -> Option<crate::models::Alert> {
        let id = self.selected_id()?;
        self.hooks
            .alerts
            .snapshot()
            .items
            .into_iter()
            .find(|a| a.id == id)
    }

    /// Move the selected equipment to the next status.
    pub fn cycle_equipment_status(&mut self) {
        let Some(id) = self.selected_id() else { return };
        let current = self
            .hooks
            .equipment
            .snapshot()
            .items
            .into_iter()
            .find(|e| e.id == id);
        let Some(current) = current else { return };
        let status = current
            .known_status()
            .map(|s| s.next())
            .unwrap_or(EquipmentStatus::Operational);
        let equipment = self.hooks.equipment.clone();
        self.spawn_action(
            format!("{} is now {}", current.name, status.as_str()),
            async move { equipment.set_status(id, status).await },
        );
    }

    fn spawn_load<T, F>(&self, screen: Screen, what: &'static str, call: F)
    where
        T: Send + 'static,
        F: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = call.await {
                tracing::debug!(error = %e, what, "Load failed");
            }
            let _ = tx.send(AppMessage::Loaded(screen));
        });
    }

    fn spawn_action<T, F>(&self, done: String, call: F)
    where
        T: Send + 'static,
        F: Future<Output = ApiResult<T>> + Send + 'static,
    {
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let msg = match call.await {
                Ok(_) => AppMessage::ActionSucceeded(done),
                Err(e) => AppMessage::ActionFailed(e.user_message()),
            };
            let _ = tx.send(msg);
        });
    }
}
