use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{timestamp, Identified};

/// One row of sensor readings from a monitoring point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentReading {
    pub id: i64,
    pub monitoring_point_id: i64,
    #[serde(with = "timestamp")]
    pub recorded_at: DateTime<Utc>,
    /// Methane, percent by volume
    #[serde(default)]
    pub methane_concentration: Option<f64>,
    /// Carbon monoxide, ppm
    #[serde(default)]
    pub carbon_monoxide: Option<f64>,
    /// Carbon dioxide, percent
    #[serde(default)]
    pub carbon_dioxide: Option<f64>,
    /// Oxygen, percent by volume
    #[serde(default)]
    pub oxygen_concentration: Option<f64>,
    /// Hydrogen sulfide, ppm
    #[serde(default)]
    pub hydrogen_sulfide: Option<f64>,
    /// Degrees Celsius
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Relative humidity, percent
    #[serde(default)]
    pub humidity: Option<f64>,
    /// kPa
    #[serde(default)]
    pub pressure: Option<f64>,
    /// m/s
    #[serde(default)]
    pub air_flow: Option<f64>,
    /// mg/m³
    #[serde(default)]
    pub dust_concentration: Option<f64>,
    #[serde(default)]
    pub ventilation_status: Option<bool>,
    #[serde(default)]
    pub emergency_system_status: Option<bool>,
}

impl Identified for EnvironmentReading {
    fn id(&self) -> i64 {
        self.id
    }
}

impl EnvironmentReading {
    /// Value of one reading field, `None` when the sensor did not report it.
    pub fn value(&self, field: ReadingField) -> Option<f64> {
        match field {
            ReadingField::MethaneConcentration => self.methane_concentration,
            ReadingField::CarbonMonoxide => self.carbon_monoxide,
            ReadingField::CarbonDioxide => self.carbon_dioxide,
            ReadingField::OxygenConcentration => self.oxygen_concentration,
            ReadingField::HydrogenSulfide => self.hydrogen_sulfide,
            ReadingField::Temperature => self.temperature,
            ReadingField::Humidity => self.humidity,
            ReadingField::Pressure => self.pressure,
            ReadingField::AirFlow => self.air_flow,
            ReadingField::DustConcentration => self.dust_concentration,
        }
    }
}

/// The newest reading of each monitoring point, ordered by point id.
/// Ties on `recorded_at` go to the higher reading id.
pub fn latest_per_point(readings: Vec<EnvironmentReading>) -> Vec<EnvironmentReading> {
    let mut latest: BTreeMap<i64, EnvironmentReading> = BTreeMap::new();
    for reading in readings {
        match latest.get(&reading.monitoring_point_id) {
            Some(kept) if (kept.recorded_at, kept.id) >= (reading.recorded_at, reading.id) => {}
            _ => {
                latest.insert(reading.monitoring_point_id, reading);
            }
        }
    }
    latest.into_values().collect()
}

/// The numeric reading columns, as named on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReadingField {
    MethaneConcentration,
    CarbonMonoxide,
    CarbonDioxide,
    OxygenConcentration,
    HydrogenSulfide,
    Temperature,
    Humidity,
    Pressure,
    AirFlow,
    DustConcentration,
}

impl ReadingField {
    pub const ALL: [ReadingField; 10] = [
        ReadingField::MethaneConcentration,
        ReadingField::CarbonMonoxide,
        ReadingField::CarbonDioxide,
        ReadingField::OxygenConcentration,
        ReadingField::HydrogenSulfide,
        ReadingField::Temperature,
        ReadingField::Humidity,
        ReadingField::Pressure,
        ReadingField::AirFlow,
        ReadingField::DustConcentration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingField::MethaneConcentration => "methane_concentration",
            ReadingField::CarbonMonoxide => "carbon_monoxide",
            ReadingField::CarbonDioxide => "carbon_dioxide",
            ReadingField::OxygenConcentration => "oxygen_concentration",
            ReadingField::HydrogenSulfide => "hydrogen_sulfide",
            ReadingField::Temperature => "temperature",
            ReadingField::Humidity => "humidity",
            ReadingField::Pressure => "pressure",
            ReadingField::AirFlow => "air_flow",
            ReadingField::DustConcentration => "dust_concentration",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }

    /// Column header used by the console.
    pub fn short_label(&self) -> &'static str {
        match self {
            ReadingField::MethaneConcentration => "CH4 %",
            ReadingField::CarbonMonoxide => "CO ppm",
            ReadingField::CarbonDioxide => "CO2 %",
            ReadingField::OxygenConcentration => "O2 %",
            ReadingField::HydrogenSulfide => "H2S ppm",
            ReadingField::Temperature => "Temp °C",
            ReadingField::Humidity => "RH %",
            ReadingField::Pressure => "kPa",
            ReadingField::AirFlow => "Air m/s",
            ReadingField::DustConcentration => "Dust",
        }
    }
}

/// Exceedance rule applied by the backend's environment-alert query.
///
/// The console uses it to highlight readings; it does not raise alerts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingThresholds {
    pub methane_max: f64,
    pub temperature_max: f64,
    pub oxygen_min: f64,
    pub carbon_monoxide_max: f64,
}

impl Default for ReadingThresholds {
    fn default() -> Self {
        Self {
            methane_max: 1.0,
            temperature_max: 40.0,
            oxygen_min: 19.5,
            carbon_monoxide_max: 50.0,
        }
    }
}

impl ReadingThresholds {
    /// Whether a single field value is outside its safe range.
    pub fn exceeds(&self, field: ReadingField, value: f64) -> bool {
        match field {
            ReadingField::MethaneConcentration => value > self.methane_max,
            ReadingField::Temperature => value > self.temperature_max,
            ReadingField::OxygenConcentration => value < self.oxygen_min,
            ReadingField::CarbonMonoxide => value > self.carbon_monoxide_max,
            _ => false,
        }
    }

    /// Fields of a reading that are outside their safe range.
    pub fn violations(&self, reading: &EnvironmentReading) -> Vec<ReadingField> {
        ReadingField::ALL
            .into_iter()
            .filter(|field| {
                reading
                    .value(*field)
                    .is_some_and(|value| self.exceeds(*field, value))
            })
            .collect()
    }
}

/// Payload for recording a reading. Also used, minus the point id, for updates.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct EnvironmentReadingCreate {
    pub monitoring_point_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methane_concentration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_monoxide: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_dioxide: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oxygen_concentration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydrogen_sulfide: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_flow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dust_concentration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ventilation_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_system_status: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct EnvironmentReadingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methane_concentration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_monoxide: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_dioxide: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oxygen_concentration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hydrogen_sulfide: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_flow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dust_concentration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ventilation_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_system_status: Option<bool>,
}

/// Reading list filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingFilter {
    pub monitoring_point_id: Option<i64>,
    pub mine_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl ReadingFilter {
    pub fn for_point(monitoring_point_id: i64) -> Self {
        Self {
            monitoring_point_id: Some(monitoring_point_id),
            ..Default::default()
        }
    }

    pub fn for_mine(mine_id: i64) -> Self {
        Self {
            mine_id: Some(mine_id),
            ..Default::default()
        }
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }
}

/// Min/max/avg of one field over a window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FieldStatistics {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeRange {
    #[serde(with = "timestamp")]
    pub start: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub end: DateTime<Utc>,
}

/// Per-field statistics for a monitoring point.
///
/// The backend returns `{}` when there is no data in the window, and omits
/// fields that had no values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentStatistics {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub time_range: Option<TimeRange>,
    #[serde(flatten)]
    pub fields: BTreeMap<ReadingField, FieldStatistics>,
}

impl EnvironmentStatistics {
    pub fn field(&self, field: ReadingField) -> Option<&FieldStatistics> {
        self.fields.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Time series of one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendReport {
    pub monitoring_point_id: i64,
    pub field: ReadingField,
    pub hours: u32,
    pub data_points: u64,
    #[serde(default)]
    pub trends: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointEnvironmentSummary {
    pub monitoring_point_id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub statistics: EnvironmentStatistics,
}

/// Statistics of every monitoring point of a mine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MineEnvironmentSummary {
    pub mine_id: i64,
    pub monitoring_points_count: u64,
    pub time_range_hours: u32,
    #[serde(default)]
    pub monitoring_points: Vec<PointEnvironmentSummary>,
}
