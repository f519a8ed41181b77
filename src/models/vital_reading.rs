use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TemperatureUnit;

/// One monitored vital-sign dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalChannel {
    HeartRate,
    Temperature,
    Spo2,
}

impl VitalChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            VitalChannel::HeartRate => "heart_rate",
            VitalChannel::Temperature => "temperature",
            VitalChannel::Spo2 => "spo2",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "heart_rate" => Some(VitalChannel::HeartRate),
            "temperature" => Some(VitalChannel::Temperature),
            "spo2" => Some(VitalChannel::Spo2),
            _ => None,
        }
    }

    /// Display unit for this channel. Temperature follows the deployment unit.
    pub fn unit_label(self, unit: TemperatureUnit) -> &'static str {
        match self {
            VitalChannel::HeartRate => "bpm",
            VitalChannel::Temperature => unit.symbol(),
            VitalChannel::Spo2 => "%",
        }
    }
}

impl std::fmt::Display for VitalChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single vitals reading. Temperature is stored in degrees Celsius
/// regardless of the unit it was collected in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalReading {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub heart_rate: i32,
    pub temperature: f64,
    pub spo2: i32,
    pub recorded_at: NaiveDateTime,
    /// Derived from the alerting tier at record time. Always recomputable
    /// from the three channel values; never set independently of them.
    pub alert_flag: bool,
    pub created_at: NaiveDateTime,
}
