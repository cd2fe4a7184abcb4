//! AppMessage enum for results of spawned tasks.

use crate::auth::Session;
use crate::models::{AlertSummary, EnvironmentStatistics, EquipmentStatistics, HealthStatus};

use super::types::Screen;

/// Sent by spawned tasks back to the event loop.
///
/// List results are already recorded in the hooks; these messages carry what
/// the hooks do not keep and mark the screen dirty.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A hook call for `screen` settled
    Loaded(Screen),
    /// Login or registration finished
    SignInFinished(Result<Session, String>),
    SummaryLoaded(AlertSummary),
    EquipmentStatsLoaded(EquipmentStatistics),
    HealthChecked(Result<HealthStatus, String>),
    /// Statistics of one monitoring point over the last day
    PointStatsLoaded {
        monitoring_point_id: i64,
        statistics: EnvironmentStatistics,
    },
    /// A mutation succeeded
    ActionSucceeded(String),
    /// A mutation failed; the message is also in the hook's error
    ActionFailed(String),
}
