use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{timestamp, Identified};

fn default_maintenance_status() -> String {
    "completed".to_string()
}

/// A maintenance job performed (or scheduled) on a piece of equipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceRecord {
    pub id: i64,
    pub equipment_id: i64,
    pub maintenance_type: String,
    pub description: String,
    #[serde(default)]
    pub performed_by: Option<String>,
    #[serde(with = "timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub parts_replaced: Option<String>,
    #[serde(default)]
    pub findings: Option<String>,
    #[serde(default)]
    pub recommendations: Option<String>,
    /// `completed`, `in_progress` or `scheduled`
    #[serde(default = "default_maintenance_status")]
    pub status: String,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for MaintenanceRecord {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaintenanceCreate {
    pub equipment_id: i64,
    pub maintenance_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_by: Option<String>,
    #[serde(with = "timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts_replaced: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    pub status: String,
}

impl MaintenanceCreate {
    pub fn new(
        equipment_id: i64,
        maintenance_type: impl Into<String>,
        description: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            equipment_id,
            maintenance_type: maintenance_type.into(),
            description: description.into(),
            performed_by: None,
            start_time,
            end_time: None,
            duration_hours: None,
            cost: None,
            parts_replaced: None,
            findings: None,
            recommendations: None,
            status: default_maintenance_status(),
        }
    }

    pub fn scheduled(mut self) -> Self {
        self.status = "scheduled".to_string();
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MaintenanceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_by: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Maintenance list filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceFilter {
    pub equipment_id: Option<i64>,
    pub maintenance_type: Option<String>,
    pub status: Option<String>,
    pub performed_by: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl MaintenanceFilter {
    pub fn for_equipment(equipment_id: i64) -> Self {
        Self {
            equipment_id: Some(equipment_id),
            ..Default::default()
        }
    }
}

/// Count, cost and duration of one maintenance type.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypeStatistics {
    pub count: u64,
    pub cost: f64,
    pub duration: f64,
}

/// Maintenance statistics over a window of days.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaintenanceStatistics {
    pub total_records: u64,
    pub completed_records: u64,
    pub in_progress_records: u64,
    pub scheduled_records: u64,
    pub completion_rate: f64,
    pub total_cost: f64,
    pub total_duration: f64,
    pub average_cost: f64,
    pub average_duration: f64,
    pub type_statistics: BTreeMap<String, TypeStatistics>,
}

/// Maintenance spending for a period.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CostAnalysis {
    pub total_cost: f64,
    pub cost_by_type: BTreeMap<String, f64>,
    pub record_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_defaults() {
        let json = r#"{
            "id": 1, "equipment_id": 5, "maintenance_type": "inspection",
            "description": "Monthly check", "start_time": "2024-06-01T08:00:00"
        }"#;
        let record: MaintenanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, "completed");
        assert!(record.cost.is_none());
    }

    #[test]
    fn test_create_payload() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let payload = MaintenanceCreate::new(5, "repair", "Replace bearing", start).scheduled();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["start_time"], "2024-06-01T08:00:00Z");
        assert_eq!(value["status"], "scheduled");
        assert!(value.get("end_time").is_none());
    }

    #[test]
    fn test_statistics_with_types() {
        let json = r#"{
            "total_records": 2, "completed_records": 1, "completion_rate": 0.5,
            "type_statistics": {"repair": {"count": 2, "cost": 300.0, "duration": 5.5}}
        }"#;
        let stats: MaintenanceStatistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.type_statistics["repair"].count, 2);
        assert_eq!(stats.scheduled_records, 0);
    }

    #[test]
    fn test_cost_analysis() {
        let json = r#"{"total_cost": 120.5, "cost_by_type": {"repair": 120.5}, "record_count": 3}"#;
        let cost: CostAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(cost.record_count, 3);
        assert_eq!(cost.cost_by_type["repair"], 120.5);
    }
}
