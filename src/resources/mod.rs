//! Per-resource hooks over [`ApiClient`](crate::api::ApiClient).
//!
//! Each hook owns a [`ResourceState`] that views render from. Every call
//! turns `loading` on and clears `error`; a failure records
//! [`ApiError::user_message`](crate::error::ApiError::user_message) and is
//! still returned to the caller. Lists change only from what the server
//! returned: a delete removes the row after the server confirmed it.

pub mod alerts;
pub mod environment;
pub mod equipment;
pub mod maintenance;
pub mod mines;
pub mod state;

pub use alerts::AlertsHook;
pub use environment::EnvironmentHook;
pub use equipment::EquipmentHook;
pub use maintenance::MaintenanceHook;
pub use mines::{MinesHook, MonitoringPointsHook};
pub use state::{Resource, ResourceState, Ticket};

use crate::api::ApiClient;

/// One hook per resource, sharing a client.
#[derive(Debug, Clone)]
pub struct Hooks {
    pub mines: MinesHook,
    pub points: MonitoringPointsHook,
    pub alerts: AlertsHook,
    pub environment: EnvironmentHook,
    pub equipment: EquipmentHook,
    pub maintenance: MaintenanceHook,
    /// Upcoming work, kept apart from the record list.
    pub schedule: MaintenanceHook,
}

impl Hooks {
    pub fn new(api: &ApiClient) -> Self {
        Self {
            mines: MinesHook::new(api.clone()),
            points: MonitoringPointsHook::new(api.clone()),
            alerts: AlertsHook::new(api.clone()),
            environment: EnvironmentHook::new(api.clone()),
            equipment: EquipmentHook::new(api.clone()),
            maintenance: MaintenanceHook::new(api.clone()),
            schedule: MaintenanceHook::new(api.clone()),
        }
    }

    /// Ignore results still in flight and drop what was fetched, e.g. after
    /// the session ended.
    pub fn detach_all(&self) {
        self.mines.resource().detach();
        self.mines.resource().clear();
        self.points.resource().detach();
        self.points.resource().clear();
        self.alerts.resource().detach();
        self.alerts.resource().clear();
        self.environment.resource().detach();
        self.environment.resource().clear();
        self.equipment.resource().detach();
        self.equipment.resource().clear();
        self.maintenance.resource().detach();
        self.maintenance.resource().clear();
        self.schedule.resource().detach();
        self.schedule.resource().clear();
    }

    pub fn attach_all(&self) {
        self.mines.resource().attach();
        self.points.resource().attach();
        self.alerts.resource().attach();
        self.environment.resource().attach();
        self.equipment.resource().attach();
        self.maintenance.resource().attach();
        self.schedule.resource().attach();
    }
}
