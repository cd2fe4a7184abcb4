use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{timestamp, Identified};

fn default_mine_status() -> String {
    "active".to_string()
}

fn default_true() -> bool {
    true
}

/// A mine site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mine {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Depth in metres
    #[serde(default)]
    pub depth: Option<f64>,
    #[serde(default = "default_mine_status")]
    pub status: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Mine {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MineCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    pub status: String,
}

impl MineCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            depth: None,
            status: default_mine_status(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }
}

/// Partial update; `None` fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MineUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A sensor or camera installation inside a mine.
///
/// Alerts and environment readings attach to monitoring points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitoringPoint {
    pub id: i64,
    pub mine_id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub camera_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for MonitoringPoint {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonitoringPointCreate {
    pub mine_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<String>,
    pub is_active: bool,
}

impl MonitoringPointCreate {
    pub fn new(mine_id: i64, name: impl Into<String>) -> Self {
        Self {
            mine_id,
            name: name.into(),
            location: None,
            camera_id: None,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MonitoringPointUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
