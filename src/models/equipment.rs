use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_nullable_f64, timestamp, Identified};

/// Values the status endpoint accepts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Operational,
    Maintenance,
    Offline,
    Retired,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 4] = [
        EquipmentStatus::Operational,
        EquipmentStatus::Maintenance,
        EquipmentStatus::Offline,
        EquipmentStatus::Retired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "operational",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Offline => "offline",
            EquipmentStatus::Retired => "retired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Next status in the cycle used by the console's status toggle.
    pub fn next(&self) -> Self {
        match self {
            EquipmentStatus::Operational => EquipmentStatus::Maintenance,
            EquipmentStatus::Maintenance => EquipmentStatus::Offline,
            EquipmentStatus::Offline => EquipmentStatus::Retired,
            EquipmentStatus::Retired => EquipmentStatus::Operational,
        }
    }
}

fn default_equipment_status() -> String {
    "operational".to_string()
}

/// A piece of mine equipment.
///
/// `status` stays a free string because the backend stores whatever was
/// written on create; [`Equipment::known_status`] maps it when possible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    pub id: i64,
    pub mine_id: i64,
    pub name: String,
    pub equipment_type: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub installation_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub last_maintenance_date: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub next_maintenance_date: Option<DateTime<Utc>>,
    #[serde(default = "default_equipment_status")]
    pub status: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub specifications: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_f64")]
    pub operating_hours: f64,
    /// Percent, 0..=100
    #[serde(default)]
    pub efficiency_rating: Option<f64>,
    #[serde(default)]
    pub power_consumption: Option<f64>,
    #[serde(default)]
    pub temperature_threshold: Option<f64>,
    #[serde(default)]
    pub vibration_threshold: Option<f64>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Equipment {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Equipment {
    pub fn known_status(&self) -> Option<EquipmentStatus> {
        EquipmentStatus::parse(&self.status)
    }

    /// Whether the next maintenance date has passed at `now`.
    pub fn maintenance_overdue(&self, now: DateTime<Utc>) -> bool {
        self.next_maintenance_date.is_some_and(|due| due <= now)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EquipmentCreate {
    pub mine_id: i64,
    pub name: String,
    pub equipment_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub installation_date: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub operating_hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_rating: Option<f64>,
}

impl EquipmentCreate {
    pub fn new(mine_id: i64, name: impl Into<String>, equipment_type: impl Into<String>) -> Self {
        Self {
            mine_id,
            name: name.into(),
            equipment_type: equipment_type.into(),
            model: None,
            serial_number: None,
            manufacturer: None,
            installation_date: None,
            next_maintenance_date: None,
            status: default_equipment_status(),
            location: None,
            operating_hours: 0.0,
            efficiency_rating: None,
        }
    }

    pub fn with_serial(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct EquipmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub next_maintenance_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_rating: Option<f64>,
}

/// Equipment list filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentFilter {
    pub mine_id: Option<i64>,
    pub equipment_type: Option<String>,
    pub status: Option<EquipmentStatus>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
}

impl EquipmentFilter {
    pub fn for_mine(mine_id: i64) -> Self {
        Self {
            mine_id: Some(mine_id),
            ..Default::default()
        }
    }
}

/// Fleet statistics. The backend answers `{}` when there is no equipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EquipmentStatistics {
    pub total_equipment: u64,
    pub operational_equipment: u64,
    pub maintenance_equipment: u64,
    pub offline_equipment: u64,
    /// Fraction in 0..=1
    pub operational_rate: f64,
    pub average_efficiency: f64,
    pub total_operating_hours: f64,
}

/// Envelope of the status and operating-hours endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EquipmentEnvelope {
    pub equipment: Equipment,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Equipment {
        serde_json::from_str(
            r#"{
                "id": 5, "mine_id": 1, "name": "Shearer A", "equipment_type": "shearer",
                "status": "maintenance", "operating_hours": null,
                "next_maintenance_date": "2024-06-01T00:00:00",
                "created_at": "2024-01-01T00:00:00"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_equipment_null_hours_reads_as_zero() {
        let equipment = sample();
        assert_eq!(equipment.operating_hours, 0.0);
        assert_eq!(equipment.known_status(), Some(EquipmentStatus::Maintenance));
    }

    #[test]
    fn test_unknown_status_is_kept_verbatim() {
        let mut equipment = sample();
        equipment.status = "standby".to_string();
        assert_eq!(equipment.known_status(), None);
    }

    #[test]
    fn test_maintenance_overdue() {
        let equipment = sample();
        let before = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        assert!(!equipment.maintenance_overdue(before));
        assert!(equipment.maintenance_overdue(after));
    }

    #[test]
    fn test_status_cycle_visits_every_status() {
        let mut status = EquipmentStatus::Operational;
        for _ in 0..4 {
            status = status.next();
        }
        assert_eq!(status, EquipmentStatus::Operational);
    }

    #[test]
    fn test_statistics_empty_object() {
        let stats: EquipmentStatistics = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.total_equipment, 0);
    }

    #[test]
    fn test_envelope() {
        let json = r#"{"message": "Operating hours updated", "equipment": {"id": 5, "mine_id": 1, "name": "A", "equipment_type": "pump", "operating_hours": 12.5}}"#;
        let envelope: EquipmentEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.equipment.operating_hours, 12.5);
    }
}
