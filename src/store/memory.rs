use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Medication, MedicationLog, PatientProfile, VitalReading};

use super::{PatientRecords, StoreError};

/// In-process implementation of [`PatientRecords`], for tests and for
/// embedding without a backend. Nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: HashMap<Uuid, PatientProfile>,
    readings: Vec<VitalReading>,
    medications: Vec<Medication>,
    logs: Vec<MedicationLog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatientRecords for MemoryStore {
    fn create_profile(&mut self, profile: PatientProfile) -> Result<(), StoreError> {
        if self.profiles.contains_key(&profile.id) {
            return Err(StoreError::ConstraintViolation(format!(
                "profile {} already exists",
                profile.id
            )));
        }
        self.profiles.insert(profile.id, profile);
        Ok(())
    }

    fn fetch_profile(&self, patient_id: Uuid) -> Result<Option<PatientProfile>, StoreError> {
        Ok(self.profiles.get(&patient_id).cloned())
    }

    fn append_reading(&mut self, reading: VitalReading) -> Result<(), StoreError> {
        self.readings.push(reading);
        Ok(())
    }

    fn fetch_latest_reading(&self, patient_id: Uuid) -> Result<Option<VitalReading>, StoreError> {
        Ok(self
            .readings
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .max_by_key(|r| r.recorded_at)
            .cloned())
    }

    fn fetch_readings(&self, patient_id: Uuid) -> Result<Vec<VitalReading>, StoreError> {
        let mut readings: Vec<VitalReading> = self
            .readings
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect();
        readings.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(readings)
    }

    fn create_medication(&mut self, medication: Medication) -> Result<(), StoreError> {
        if self.medications.iter().any(|m| m.id == medication.id) {
            return Err(StoreError::ConstraintViolation(format!(
                "medication {} already exists",
                medication.id
            )));
        }
        self.medications.push(medication);
        Ok(())
    }

    fn fetch_medication(
        &self,
        patient_id: Uuid,
        medication_id: Uuid,
    ) -> Result<Option<Medication>, StoreError> {
        Ok(self
            .medications
            .iter()
            .find(|m| m.id == medication_id && m.patient_id == patient_id)
            .cloned())
    }

    fn fetch_active_medications(&self, patient_id: Uuid) -> Result<Vec<Medication>, StoreError> {
        let mut meds: Vec<Medication> = self
            .medications
            .iter()
            .filter(|m| m.patient_id == patient_id && m.is_active)
            .cloned()
            .collect();
        meds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(meds)
    }

    fn deactivate_medication(
        &mut self,
        patient_id: Uuid,
        medication_id: Uuid,
    ) -> Result<(), StoreError> {
        let med = self
            .medications
            .iter_mut()
            .find(|m| m.id == medication_id && m.patient_id == patient_id)
            .ok_or_else(|| StoreError::NotFound {
                entity_type: "medication".into(),
                id: medication_id.to_string(),
            })?;
        med.is_active = false;
        Ok(())
    }

    fn append_medication_log(&mut self, log: MedicationLog) -> Result<bool, StoreError> {
        let medication_known = self
            .medications
            .iter()
            .any(|m| m.id == log.medication_id && m.patient_id == log.patient_id);
        if !medication_known {
            return Err(StoreError::NotFound {
                entity_type: "medication".into(),
                id: log.medication_id.to_string(),
            });
        }

        let duplicate = self.logs.iter().any(|existing| {
            existing.medication_id == log.medication_id
                && existing.scheduled_time == log.scheduled_time
                && existing.taken_at.date() == log.taken_at.date()
        });
        if duplicate {
            return Ok(false);
        }

        self.logs.push(log);
        Ok(true)
    }

    fn fetch_todays_logs(
        &self,
        patient_id: Uuid,
        day: NaiveDate,
    ) -> Result<Vec<MedicationLog>, StoreError> {
        Ok(self
            .logs
            .iter()
            .filter(|l| l.patient_id == patient_id && l.taken_at.date() == day)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, NaiveTime};

    use super::*;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn reading(patient_id: Uuid, recorded_at: NaiveDateTime) -> VitalReading {
        VitalReading {
            id: Uuid::new_v4(),
            patient_id,
            heart_rate: 72,
            temperature: 37.0,
            spo2: 98,
            recorded_at,
            alert_flag: false,
            created_at: recorded_at,
        }
    }

    fn medication(patient_id: Uuid, created_at: NaiveDateTime) -> Medication {
        Medication {
            id: Uuid::new_v4(),
            patient_id,
            name: "Metformin".into(),
            dosage: "500mg".into(),
            frequency: "Twice daily".into(),
            schedule_times: vec![
                NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            ],
            start_date: created_at.date(),
            end_date: None,
            is_active: true,
            created_at,
            updated_at: created_at,
        }
    }

    fn log_for(med: &Medication, slot: NaiveTime, taken_at: NaiveDateTime) -> MedicationLog {
        MedicationLog {
            id: Uuid::new_v4(),
            patient_id: med.patient_id,
            medication_id: med.id,
            scheduled_time: slot,
            taken_at,
            notes: None,
            created_at: taken_at,
        }
    }

    #[test]
    fn latest_reading_wins_by_recorded_at() {
        let mut store = MemoryStore::new();
        let patient = Uuid::new_v4();

        store.append_reading(reading(patient, ts(10, 8))).unwrap();
        store.append_reading(reading(patient, ts(10, 20))).unwrap();
        store.append_reading(reading(patient, ts(10, 12))).unwrap();

        let latest = store.fetch_latest_reading(patient).unwrap().unwrap();
        assert_eq!(latest.recorded_at, ts(10, 20));
    }

    #[test]
    fn readings_are_scoped_by_patient() {
        let mut store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.append_reading(reading(alice, ts(10, 8))).unwrap();

        assert!(store.fetch_latest_reading(bob).unwrap().is_none());
        assert!(store.fetch_readings(bob).unwrap().is_empty());
        assert_eq!(store.fetch_readings(alice).unwrap().len(), 1);
    }

    #[test]
    fn readings_come_back_newest_first() {
        let mut store = MemoryStore::new();
        let patient = Uuid::new_v4();

        store.append_reading(reading(patient, ts(9, 8))).unwrap();
        store.append_reading(reading(patient, ts(10, 8))).unwrap();

        let readings = store.fetch_readings(patient).unwrap();
        assert_eq!(readings[0].recorded_at, ts(10, 8));
        assert_eq!(readings[1].recorded_at, ts(9, 8));
    }

    #[test]
    fn active_medications_exclude_deactivated() {
        let mut store = MemoryStore::new();
        let patient = Uuid::new_v4();
        let med = medication(patient, ts(1, 8));
        let med_id = med.id;

        store.create_medication(med).unwrap();
        assert_eq!(store.fetch_active_medications(patient).unwrap().len(), 1);

        store.deactivate_medication(patient, med_id).unwrap();
        assert!(store.fetch_active_medications(patient).unwrap().is_empty());
        // Retired, not deleted.
        assert!(store.fetch_medication(patient, med_id).unwrap().is_some());
    }

    #[test]
    fn deactivating_unknown_medication_is_not_found() {
        let mut store = MemoryStore::new();
        let err = store
            .deactivate_medication(Uuid::new_v4(), Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn deactivating_another_patients_medication_is_not_found() {
        let mut store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let med = medication(alice, ts(1, 8));
        let med_id = med.id;
        store.create_medication(med).unwrap();

        let err = store
            .deactivate_medication(Uuid::new_v4(), med_id)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn duplicate_log_for_same_slot_and_day_is_a_noop() {
        let mut store = MemoryStore::new();
        let patient = Uuid::new_v4();
        let med = medication(patient, ts(1, 8));
        let slot = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

        store.create_medication(med.clone()).unwrap();
        assert!(store
            .append_medication_log(log_for(&med, slot, ts(10, 8)))
            .unwrap());
        // Same slot, later the same day.
        assert!(!store
            .append_medication_log(log_for(&med, slot, ts(10, 9)))
            .unwrap());

        assert_eq!(store.fetch_todays_logs(patient, ts(10, 0).date()).unwrap().len(), 1);
    }

    #[test]
    fn same_slot_next_day_logs_again() {
        let mut store = MemoryStore::new();
        let med = medication(Uuid::new_v4(), ts(1, 8));
        let slot = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

        store.create_medication(med.clone()).unwrap();
        assert!(store
            .append_medication_log(log_for(&med, slot, ts(10, 8)))
            .unwrap());
        assert!(store
            .append_medication_log(log_for(&med, slot, ts(11, 8)))
            .unwrap());
    }

    #[test]
    fn log_for_unknown_medication_is_rejected() {
        let mut store = MemoryStore::new();
        let med = medication(Uuid::new_v4(), ts(1, 8));
        let slot = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

        let err = store
            .append_medication_log(log_for(&med, slot, ts(10, 8)))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn todays_logs_are_day_scoped() {
        let mut store = MemoryStore::new();
        let patient = Uuid::new_v4();
        let med = medication(patient, ts(1, 8));
        let slot = NaiveTime::from_hms_opt(8, 0, 0).unwrap();

        store.create_medication(med.clone()).unwrap();
        store
            .append_medication_log(log_for(&med, slot, ts(10, 8)))
            .unwrap();
        store
            .append_medication_log(log_for(&med, slot, ts(11, 8)))
            .unwrap();

        let logs = store.fetch_todays_logs(patient, ts(10, 0).date()).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].taken_at, ts(10, 8));
    }

    #[test]
    fn profile_round_trip() {
        let mut store = MemoryStore::new();
        let profile = PatientProfile {
            id: Uuid::new_v4(),
            full_name: "Asha Patel".into(),
            age: 64,
            gender: "female".into(),
            contact_number: "+1-555-0142".into(),
            address: "12 Garden Row".into(),
            emergency_contact: "+1-555-0143".into(),
            blood_group: Some("O+".into()),
            allergy_history: vec!["penicillin".into()],
            known_diseases: vec![],
            current_medications: vec![],
            created_at: ts(1, 8),
            updated_at: ts(1, 8),
        };
        let id = profile.id;

        store.create_profile(profile.clone()).unwrap();
        let fetched = store.fetch_profile(id).unwrap().unwrap();
        assert_eq!(fetched.full_name, "Asha Patel");

        let err = store.create_profile(profile).unwrap_err();
        assert!(matches!(err, StoreError::ConstraintViolation(_)));
    }
}
