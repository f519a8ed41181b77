//! Persistence-collaborator boundary.
//!
//! Every read and write goes through [`PatientRecords`]; the engine never
//! touches storage itself. Each call takes an explicit patient id — there is
//! no ambient session state scoping queries. Readings and logs are
//! append-only; medications are retired via the lifecycle flag, never
//! deleted.

pub mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Medication, MedicationLog, PatientProfile, VitalReading};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}

/// Contract the surrounding application implements over its backend.
pub trait PatientRecords {
    fn create_profile(&mut self, profile: PatientProfile) -> Result<(), StoreError>;
    fn fetch_profile(&self, patient_id: Uuid) -> Result<Option<PatientProfile>, StoreError>;

    fn append_reading(&mut self, reading: VitalReading) -> Result<(), StoreError>;
    fn fetch_latest_reading(&self, patient_id: Uuid) -> Result<Option<VitalReading>, StoreError>;
    /// All readings for the patient, newest first.
    fn fetch_readings(&self, patient_id: Uuid) -> Result<Vec<VitalReading>, StoreError>;

    fn create_medication(&mut self, medication: Medication) -> Result<(), StoreError>;
    fn fetch_medication(
        &self,
        patient_id: Uuid,
        medication_id: Uuid,
    ) -> Result<Option<Medication>, StoreError>;
    /// Medications with the lifecycle flag set, newest first.
    fn fetch_active_medications(&self, patient_id: Uuid) -> Result<Vec<Medication>, StoreError>;
    fn deactivate_medication(
        &mut self,
        patient_id: Uuid,
        medication_id: Uuid,
    ) -> Result<(), StoreError>;

    /// Append a dose confirmation. A log for the same medication, slot, and
    /// calendar day must be a no-op; returns whether a row was added.
    fn append_medication_log(&mut self, log: MedicationLog) -> Result<bool, StoreError>;
    /// Logs whose `taken_at` falls on the given day, for all of the
    /// patient's medications.
    fn fetch_todays_logs(
        &self,
        patient_id: Uuid,
        day: NaiveDate,
    ) -> Result<Vec<MedicationLog>, StoreError>;
}
