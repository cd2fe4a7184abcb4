use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{timestamp, Identified};

/// What raised the alert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    DangerousAction,
    EquipmentFailure,
    EnvironmentalHazard,
    SafetyViolation,
    SystemError,
}

impl AlertType {
    pub fn label(&self) -> &'static str {
        match self {
            AlertType::DangerousAction => "Dangerous action",
            AlertType::EquipmentFailure => "Equipment failure",
            AlertType::EnvironmentalHazard => "Environmental hazard",
            AlertType::SafetyViolation => "Safety violation",
            AlertType::SystemError => "System error",
        }
    }
}

/// Alert severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 4] = [
        AlertSeverity::Low,
        AlertSeverity::Medium,
        AlertSeverity::High,
        AlertSeverity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
            AlertSeverity::Critical => "critical",
        }
    }
}

/// Alert lifecycle status.
///
/// Transitions happen on the backend: `active -> acknowledged -> resolved`,
/// or straight to `false_alarm`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
    FalseAlarm,
}

impl AlertStatus {
    pub const ALL: [AlertStatus; 4] = [
        AlertStatus::Active,
        AlertStatus::Acknowledged,
        AlertStatus::Resolved,
        AlertStatus::FalseAlarm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
            AlertStatus::FalseAlarm => "false_alarm",
        }
    }

    pub fn can_acknowledge(&self) -> bool {
        matches!(self, AlertStatus::Active)
    }

    pub fn can_resolve(&self) -> bool {
        matches!(self, AlertStatus::Active | AlertStatus::Acknowledged)
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monitoring point summary embedded in detailed alerts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mine_id: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
}

/// User summary embedded in detailed alerts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRef {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A safety alert.
///
/// The list and detail endpoints embed the monitoring point and the
/// acknowledging/resolving users; create and update responses omit them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: i64,
    pub monitoring_point_id: i64,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "timestamp")]
    pub detected_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub acknowledged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub acknowledged_by: Option<i64>,
    #[serde(default, with = "timestamp::option")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved_by: Option<i64>,
    /// Detector confidence in 0..=1
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub location_details: Option<String>,
    #[serde(default)]
    pub equipment_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub monitoring_point: Option<PointRef>,
    #[serde(default)]
    pub acknowledged_by_user: Option<UserRef>,
    #[serde(default)]
    pub resolved_by_user: Option<UserRef>,
}

impl Identified for Alert {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Alert {
    /// Mine of the alert, when the monitoring point details are embedded.
    pub fn mine_id(&self) -> Option<i64> {
        self.monitoring_point.as_ref().and_then(|p| p.mine_id)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlertCreate {
    pub monitoring_point_id: i64,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AlertCreate {
    pub fn new(
        monitoring_point_id: i64,
        alert_type: AlertType,
        severity: AlertSeverity,
        title: impl Into<String>,
    ) -> Self {
        Self {
            monitoring_point_id,
            alert_type,
            severity,
            title: title.into(),
            description: None,
            confidence_score: None,
            location_details: None,
            equipment_id: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AlertUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AlertStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// Alert list filter.
///
/// Sent as query parameters and re-checked locally with [`AlertFilter::matches`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertFilter {
    pub status: Option<AlertStatus>,
    pub severity: Option<AlertSeverity>,
    pub mine_id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl AlertFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: AlertStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_severity(mut self, severity: AlertSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_mine(mut self, mine_id: i64) -> Self {
        self.mine_id = Some(mine_id);
        self
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether an alert satisfies every set criterion.
    ///
    /// The mine criterion only rejects alerts whose embedded monitoring point
    /// names a different mine; alerts without details are kept.
    pub fn matches(&self, alert: &Alert) -> bool {
        if self.status.is_some_and(|s| s != alert.status) {
            return false;
        }
        if self.severity.is_some_and(|s| s != alert.severity) {
            return false;
        }
        if let (Some(wanted), Some(actual)) = (self.mine_id, alert.mine_id()) {
            if wanted != actual {
                return false;
            }
        }
        if self.start_date.is_some_and(|start| alert.detected_at < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| alert.detected_at > end) {
            return false;
        }
        true
    }

    /// Short description for the filter bar.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(status) = self.status {
            parts.push(format!("status={}", status));
        }
        if let Some(severity) = self.severity {
            parts.push(format!("severity={}", severity));
        }
        if let Some(mine_id) = self.mine_id {
            parts.push(format!("mine={}", mine_id));
        }
        if parts.is_empty() {
            "all".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Alert overview returned by the summary endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlertSummary {
    pub total_alerts: u64,
    pub active_alerts: u64,
    pub critical_alerts: u64,
    pub alerts_by_severity: BTreeMap<String, u64>,
    pub recent_alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn alert(status: AlertStatus, severity: AlertSeverity) -> Alert {
        Alert {
            id: 1,
            monitoring_point_id: 2,
            alert_type: AlertType::EnvironmentalHazard,
            severity,
            status,
            title: "Methane spike".to_string(),
            description: None,
            detected_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            acknowledged_at: None,
            acknowledged_by: None,
            resolved_at: None,
            resolved_by: None,
            confidence_score: None,
            image_url: None,
            video_url: None,
            location_details: None,
            equipment_id: None,
            notes: None,
            monitoring_point: None,
            acknowledged_by_user: None,
            resolved_by_user: None,
        }
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&AlertStatus::FalseAlarm).unwrap(), "\"false_alarm\"");
        assert_eq!(
            serde_json::to_string(&AlertType::EnvironmentalHazard).unwrap(),
            "\"environmental_hazard\""
        );
        assert_eq!(serde_json::to_string(&AlertSeverity::Critical).unwrap(), "\"critical\"");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(AlertSeverity::Critical > AlertSeverity::High);
        assert!(AlertSeverity::Low < AlertSeverity::Medium);
    }

    #[test]
    fn test_detailed_alert_deserializes() {
        let json = r#"{
            "id": 9, "monitoring_point_id": 4, "alert_type": "safety_violation",
            "severity": "high", "status": "acknowledged", "title": "No helmet",
            "detected_at": "2024-06-01T08:00:00", "acknowledged_by": 2,
            "monitoring_point": {"id": 4, "name": "Gate", "mine_id": 1},
            "acknowledged_by_user": {"id": 2, "username": "ops"}
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.mine_id(), Some(1));
        assert_eq!(alert.acknowledged_by_user.unwrap().username.as_deref(), Some("ops"));
    }

    #[test]
    fn test_filter_status() {
        let filter = AlertFilter::new().with_status(AlertStatus::Active);
        assert!(filter.matches(&alert(AlertStatus::Active, AlertSeverity::Low)));
        assert!(!filter.matches(&alert(AlertStatus::Resolved, AlertSeverity::Low)));
    }

    #[test]
    fn test_filter_dates_inclusive() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let filter = AlertFilter::new().between(at, at);
        assert!(filter.matches(&alert(AlertStatus::Active, AlertSeverity::Low)));
        let later = AlertFilter::new().between(at + chrono::Duration::seconds(1), at + chrono::Duration::hours(1));
        assert!(!later.matches(&alert(AlertStatus::Active, AlertSeverity::Low)));
    }

    #[test]
    fn test_filter_mine_keeps_alerts_without_details() {
        let filter = AlertFilter::new().with_mine(5);
        let mut detailed = alert(AlertStatus::Active, AlertSeverity::Low);
        assert!(filter.matches(&detailed));
        detailed.monitoring_point = Some(PointRef {
            id: 2,
            name: None,
            mine_id: Some(6),
            location: None,
        });
        assert!(!filter.matches(&detailed));
    }

    #[test]
    fn test_filter_describe() {
        assert_eq!(AlertFilter::new().describe(), "all");
        let filter = AlertFilter::new()
            .with_status(AlertStatus::Active)
            .with_severity(AlertSeverity::High);
        assert_eq!(filter.describe(), "status=active severity=high");
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_transitions() {
        assert!(AlertStatus::Active.can_acknowledge());
        assert!(!AlertStatus::Acknowledged.can_acknowledge());
        assert!(AlertStatus::Acknowledged.can_resolve());
        assert!(!AlertStatus::Resolved.can_resolve());
    }

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let summary: AlertSummary = serde_json::from_str(r#"{"total_alerts": 3}"#).unwrap();
        assert_eq!(summary.total_alerts, 3);
        assert!(summary.recent_alerts.is_empty());
    }
}
