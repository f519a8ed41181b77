use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::VitalChannel;

// ---------------------------------------------------------------------------
// ChannelStatus
// ---------------------------------------------------------------------------

/// Per-channel display status. Ordering reflects severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ChannelStatus {
    /// Within the display-tier reference band.
    Normal,
    /// Outside the display band but not critical.
    Warning,
    /// Requires prompt attention; always raises the overall alert.
    Critical,
}

impl ChannelStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

// ---------------------------------------------------------------------------
// VitalsInput & VitalsClassification
// ---------------------------------------------------------------------------

/// One reading to classify. All three channels are required; a partial
/// reading must not be evaluated. Temperature is degrees Celsius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VitalsInput {
    pub heart_rate: i32,
    pub temperature_c: f64,
    pub spo2: i32,
}

/// Verdict for one reading: a display status per channel plus the
/// alerting-tier outcome that drives the persisted alert flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsClassification {
    pub heart_rate: ChannelStatus,
    pub temperature: ChannelStatus,
    pub spo2: ChannelStatus,
    /// True when the alerting tier fires or any channel is critical.
    pub overall_alert: bool,
    /// First channel that tripped the alerting tier, if any.
    pub alert_channel: Option<VitalChannel>,
}

impl VitalsClassification {
    /// Worst status across the three channels.
    pub fn worst(&self) -> ChannelStatus {
        self.heart_rate.max(self.temperature).max(self.spo2)
    }

    pub fn status_of(&self, channel: VitalChannel) -> ChannelStatus {
        match channel {
            VitalChannel::HeartRate => self.heart_rate,
            VitalChannel::Temperature => self.temperature,
            VitalChannel::Spo2 => self.spo2,
        }
    }
}

// ---------------------------------------------------------------------------
// DoseSchedule
// ---------------------------------------------------------------------------

/// One schedule slot with its per-day state. The only transition is
/// `pending -> taken`; the day rollover that resets it is the caller's
/// concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseSlot {
    pub time: NaiveTime,
    pub taken: bool,
}

impl DoseSlot {
    /// Display concern: the slot time has passed and the dose is still
    /// pending. Derived, never stored.
    pub fn is_overdue(&self, now: NaiveTime) -> bool {
        !self.taken && self.time < now
    }
}

/// When the next dose is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextDose {
    /// Earliest remaining slot today.
    Today(NaiveTime),
    /// Today's slots are exhausted; wraps to tomorrow's first dose.
    Tomorrow(NaiveTime),
    /// No configured slots ("as needed" medications).
    Unscheduled,
}

impl NextDose {
    pub fn time(self) -> Option<NaiveTime> {
        match self {
            NextDose::Today(t) | NextDose::Tomorrow(t) => Some(t),
            NextDose::Unscheduled => None,
        }
    }
}

/// Scheduler verdict for one medication on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseSchedule {
    pub medication_id: Uuid,
    pub slots: Vec<DoseSlot>,
    pub next_due: NextDose,
}

impl DoseSchedule {
    pub fn taken_count(&self) -> usize {
        self.slots.iter().filter(|s| s.taken).count()
    }

    pub fn pending_count(&self) -> usize {
        self.slots.len() - self.taken_count()
    }

    pub fn overdue_count(&self, now: NaiveTime) -> usize {
        self.slots.iter().filter(|s| s.is_overdue(now)).count()
    }
}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("implausible {channel} value {value}: expected {low} to {high}")]
    ImplausibleValue {
        channel: VitalChannel,
        value: f64,
        low: f64,
        high: f64,
    },

    #[error("non-finite {channel} value")]
    NonFiniteValue { channel: VitalChannel },
}
