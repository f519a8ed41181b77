//! Dashboard view — single fetch for the patient's monitoring overview:
//! latest classified reading, today's medication progress, and the recent
//! reading history strip.

use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use uuid::Uuid;

use crate::config::DeploymentConfig;
use crate::engine::{ChannelStatus, HealthEngine, NextDose, VitalsInput};
use crate::models::{VitalChannel, VitalReading};
use crate::service::ServiceError;
use crate::store::PatientRecords;

/// History strip length.
const RECENT_READINGS_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One channel card: value in the deployment unit, status badge, range copy.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelCard {
    pub channel: VitalChannel,
    pub value: f64,
    pub unit: &'static str,
    pub status: ChannelStatus,
    pub range_label: String,
}

/// The latest reading rendered for the vitals cards.
#[derive(Debug, Clone, Serialize)]
pub struct VitalsOverview {
    pub recorded_at: NaiveDateTime,
    pub heart_rate: ChannelCard,
    pub temperature: ChannelCard,
    pub spo2: ChannelCard,
    pub overall_alert: bool,
}

/// Aggregated dose progress across every active medication.
#[derive(Debug, Clone, Serialize)]
pub struct MedicationSummary {
    pub active_medications: usize,
    pub total_slots: usize,
    pub taken: usize,
    pub overdue: usize,
    pub next_due: NextDose,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub latest: Option<VitalsOverview>,
    pub medications: MedicationSummary,
    /// Newest first, capped to the history strip length.
    pub recent_readings: Vec<VitalReading>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Assemble the dashboard in one pass over the store.
pub fn get_dashboard_data(
    store: &dyn PatientRecords,
    engine: &HealthEngine,
    config: &DeploymentConfig,
    patient_id: Uuid,
    now: NaiveDateTime,
) -> Result<DashboardData, ServiceError> {
    let latest = match store.fetch_latest_reading(patient_id)? {
        Some(reading) => Some(overview_for(&reading, engine, config)?),
        None => None,
    };

    let mut recent_readings = store.fetch_readings(patient_id)?;
    recent_readings.truncate(RECENT_READINGS_LIMIT);

    let views = crate::service::medication_day_view(store, engine, patient_id, now)?;
    let medications = MedicationSummary {
        active_medications: views.len(),
        total_slots: views.iter().map(|v| v.schedule.slots.len()).sum(),
        taken: views.iter().map(|v| v.schedule.taken_count()).sum(),
        overdue: views
            .iter()
            .map(|v| v.schedule.overdue_count(now.time()))
            .sum(),
        next_due: next_due_across(views.iter().map(|v| v.schedule.next_due)),
    };

    Ok(DashboardData {
        latest,
        medications,
        recent_readings,
    })
}

fn overview_for(
    reading: &VitalReading,
    engine: &HealthEngine,
    config: &DeploymentConfig,
) -> Result<VitalsOverview, ServiceError> {
    let unit = config.temperature_unit;
    let classification = engine.classify(&VitalsInput {
        heart_rate: reading.heart_rate,
        temperature_c: reading.temperature,
        spo2: reading.spo2,
    })?;
    let reference = engine.reference();

    let card = |channel: VitalChannel, value: f64| ChannelCard {
        channel,
        value,
        unit: channel.unit_label(unit),
        status: classification.status_of(channel),
        range_label: reference.range_label(channel, unit),
    };

    Ok(VitalsOverview {
        recorded_at: reading.recorded_at,
        heart_rate: card(VitalChannel::HeartRate, f64::from(reading.heart_rate)),
        temperature: card(
            VitalChannel::Temperature,
            unit.from_celsius(reading.temperature),
        ),
        spo2: card(VitalChannel::Spo2, f64::from(reading.spo2)),
        overall_alert: classification.overall_alert,
    })
}

/// Combine per-medication verdicts: the earliest dose still due today wins;
/// with today exhausted everywhere, the earliest tomorrow slot; otherwise
/// unscheduled.
fn next_due_across(verdicts: impl Iterator<Item = NextDose>) -> NextDose {
    let mut earliest_today: Option<NaiveTime> = None;
    let mut earliest_tomorrow: Option<NaiveTime> = None;

    for verdict in verdicts {
        match verdict {
            NextDose::Today(t) => {
                earliest_today = Some(earliest_today.map_or(t, |cur| cur.min(t)));
            }
            NextDose::Tomorrow(t) => {
                earliest_tomorrow = Some(earliest_tomorrow.map_or(t, |cur| cur.min(t)));
            }
            NextDose::Unscheduled => {}
        }
    }

    match (earliest_today, earliest_tomorrow) {
        (Some(t), _) => NextDose::Today(t),
        (None, Some(t)) => NextDose::Tomorrow(t),
        (None, None) => NextDose::Unscheduled,
    }
}
