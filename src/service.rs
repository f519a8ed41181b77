//! Patient-facing operations: registration, vitals recording, medication
//! schedule management, and dose confirmation.
//!
//! Each operation composes the record store with the evaluation engine.
//! Screens call these instead of re-declaring thresholds or next-dose logic
//! locally, and every call carries an explicit patient id and clock value.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::DeploymentConfig;
use crate::engine::scheduler::normalized_slots;
use crate::engine::{DoseSchedule, EngineError, HealthEngine, VitalsClassification, VitalsInput};
use crate::models::{Medication, MedicationLog, PatientProfile, VitalReading};
use crate::store::{PatientRecords, StoreError};

// ---------------------------------------------------------------------------
// Inputs & results
// ---------------------------------------------------------------------------

/// Registration form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfile {
    pub full_name: String,
    pub age: i32,
    pub gender: String,
    pub contact_number: String,
    pub address: String,
    pub emergency_contact: String,
    pub blood_group: Option<String>,
    pub allergy_history: Vec<String>,
    pub known_diseases: Vec<String>,
    pub current_medications: Vec<String>,
}

/// Vitals form payload. Temperature arrives in the deployment unit.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReadingInput {
    pub heart_rate: i32,
    pub temperature: f64,
    pub spo2: i32,
    pub recorded_at: NaiveDateTime,
}

/// A stored reading together with its classification, so screens can render
/// badges without a second evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedReading {
    pub reading: VitalReading,
    pub classification: VitalsClassification,
}

/// Medication form payload; slot times as "HH:MM" strings.
#[derive(Debug, Clone, Deserialize)]
pub struct MedicationInput {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub schedule_times: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Outcome of a dose confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct DoseConfirmation {
    pub medication_id: Uuid,
    pub scheduled_time: NaiveTime,
    /// True when the slot had already been confirmed today; nothing was
    /// appended.
    pub already_taken: bool,
}

/// One medication with its computed day schedule.
#[derive(Debug, Clone, Serialize)]
pub struct MedicationDayView {
    pub medication: Medication,
    pub schedule: DoseSchedule,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid schedule time {0:?}: expected HH:MM")]
    InvalidTimeSlot(String),

    #[error("Medication {medication_id} has no {slot} slot")]
    UnknownScheduleSlot {
        medication_id: Uuid,
        slot: NaiveTime,
    },

    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Validate and create a patient profile.
pub fn register_patient(
    store: &mut dyn PatientRecords,
    input: NewProfile,
    now: NaiveDateTime,
) -> Result<PatientProfile, ServiceError> {
    require_non_empty("full_name", &input.full_name)?;
    require_non_empty("gender", &input.gender)?;
    require_non_empty("contact_number", &input.contact_number)?;
    require_non_empty("address", &input.address)?;
    require_non_empty("emergency_contact", &input.emergency_contact)?;
    if !(0..=130).contains(&input.age) {
        return Err(ServiceError::InvalidField {
            field: "age",
            reason: format!("{} is outside 0-130", input.age),
        });
    }

    let profile = PatientProfile {
        id: Uuid::new_v4(),
        full_name: input.full_name.trim().to_string(),
        age: input.age,
        gender: input.gender,
        contact_number: input.contact_number,
        address: input.address,
        emergency_contact: input.emergency_contact,
        blood_group: input.blood_group,
        allergy_history: input.allergy_history,
        known_diseases: input.known_diseases,
        current_medications: input.current_medications,
        created_at: now,
        updated_at: now,
    };
    store.create_profile(profile.clone())?;

    tracing::info!(patient_id = %profile.id, "Patient registered");
    Ok(profile)
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidField {
            field,
            reason: "must not be empty".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Vitals
// ---------------------------------------------------------------------------

/// Classify a reading and persist it with its derived alert flag.
///
/// Temperature is converted from the deployment unit to Celsius before it
/// reaches the engine or the store. A rejected reading leaves no trace and
/// does not block later recordings.
pub fn record_reading(
    store: &mut dyn PatientRecords,
    engine: &HealthEngine,
    config: &DeploymentConfig,
    patient_id: Uuid,
    input: ReadingInput,
    now: NaiveDateTime,
) -> Result<RecordedReading, ServiceError> {
    let temperature_c = config.temperature_unit.to_celsius(input.temperature);
    let classification = engine.classify(&VitalsInput {
        heart_rate: input.heart_rate,
        temperature_c,
        spo2: input.spo2,
    })?;

    let reading = VitalReading {
        id: Uuid::new_v4(),
        patient_id,
        heart_rate: input.heart_rate,
        temperature: temperature_c,
        spo2: input.spo2,
        recorded_at: input.recorded_at,
        alert_flag: classification.overall_alert,
        created_at: now,
    };
    store.append_reading(reading.clone())?;

    if classification.overall_alert {
        tracing::warn!(
            patient_id = %patient_id,
            reading_id = %reading.id,
            channel = classification.alert_channel.map(|c| c.as_str()),
            "Vitals reading raised an alert"
        );
    } else {
        tracing::debug!(patient_id = %patient_id, reading_id = %reading.id, "Vitals reading recorded");
    }

    Ok(RecordedReading {
        reading,
        classification,
    })
}

// ---------------------------------------------------------------------------
// Medications
// ---------------------------------------------------------------------------

/// Parse and validate a medication form, then create the schedule.
///
/// Blank slot entries are dropped (the form keeps empty rows around);
/// malformed ones are rejected. An empty slot list is allowed — it is an
/// "as needed" medication with no due times.
pub fn create_medication(
    store: &mut dyn PatientRecords,
    patient_id: Uuid,
    input: MedicationInput,
    now: NaiveDateTime,
) -> Result<Medication, ServiceError> {
    require_non_empty("name", &input.name)?;
    require_non_empty("dosage", &input.dosage)?;
    require_non_empty("frequency", &input.frequency)?;
    if let Some(end) = input.end_date {
        if end < input.start_date {
            return Err(ServiceError::InvalidField {
                field: "end_date",
                reason: format!("{end} precedes start date {}", input.start_date),
            });
        }
    }

    let mut times = Vec::new();
    for raw in &input.schedule_times {
        if raw.trim().is_empty() {
            continue;
        }
        times.push(parse_slot(raw)?);
    }
    let times = normalized_slots(&times);

    let medication = Medication {
        id: Uuid::new_v4(),
        patient_id,
        name: input.name.trim().to_string(),
        dosage: input.dosage.trim().to_string(),
        frequency: input.frequency.trim().to_string(),
        schedule_times: times,
        start_date: input.start_date,
        end_date: input.end_date,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    store.create_medication(medication.clone())?;

    tracing::info!(
        patient_id = %patient_id,
        medication_id = %medication.id,
        slots = medication.schedule_times.len(),
        "Medication schedule created"
    );
    Ok(medication)
}

/// Parse a "HH:MM" (or "HH:MM:SS") slot string.
pub fn parse_slot(raw: &str) -> Result<NaiveTime, ServiceError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ServiceError::InvalidTimeSlot(raw.to_string()))
}

/// Retire a medication; its logs remain.
pub fn deactivate_medication(
    store: &mut dyn PatientRecords,
    patient_id: Uuid,
    medication_id: Uuid,
) -> Result<(), ServiceError> {
    store.deactivate_medication(patient_id, medication_id)?;
    tracing::info!(patient_id = %patient_id, medication_id = %medication_id, "Medication deactivated");
    Ok(())
}

/// Confirm one dose slot for today. Idempotent: confirming an
/// already-taken slot reports `already_taken` and appends nothing.
pub fn confirm_dose(
    store: &mut dyn PatientRecords,
    patient_id: Uuid,
    medication_id: Uuid,
    scheduled_time: NaiveTime,
    now: NaiveDateTime,
) -> Result<DoseConfirmation, ServiceError> {
    let medication = store
        .fetch_medication(patient_id, medication_id)?
        .ok_or_else(|| StoreError::NotFound {
            entity_type: "medication".into(),
            id: medication_id.to_string(),
        })?;
    if !medication.schedule_times.contains(&scheduled_time) {
        return Err(ServiceError::UnknownScheduleSlot {
            medication_id,
            slot: scheduled_time,
        });
    }

    let appended = store.append_medication_log(MedicationLog {
        id: Uuid::new_v4(),
        patient_id,
        medication_id,
        scheduled_time,
        taken_at: now,
        notes: None,
        created_at: now,
    })?;

    if appended {
        tracing::info!(
            patient_id = %patient_id,
            medication_id = %medication_id,
            slot = %scheduled_time,
            "Dose confirmed"
        );
    }

    Ok(DoseConfirmation {
        medication_id,
        scheduled_time,
        already_taken: !appended,
    })
}

/// Today's schedule for every medication currently in effect.
pub fn medication_day_view(
    store: &dyn PatientRecords,
    engine: &HealthEngine,
    patient_id: Uuid,
    now: NaiveDateTime,
) -> Result<Vec<MedicationDayView>, ServiceError> {
    let day = now.date();
    let logs = store.fetch_todays_logs(patient_id, day)?;

    let views = store
        .fetch_active_medications(patient_id)?
        .into_iter()
        .filter(|m| m.is_active_on(day))
        .map(|medication| {
            let schedule = engine.compute_schedule(&medication, &logs, now.time());
            MedicationDayView {
                medication,
                schedule,
            }
        })
        .collect();

    Ok(views)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
