//! Health event evaluation engine: vital-sign classification and medication
//! dose scheduling.
//!
//! Both units are pure functions of their explicit inputs — no storage, no
//! clock, no shared state — so independent invocations need no coordination.
//! Callers share one [`VitalReference`] table through [`HealthEngine`]
//! instead of re-declaring thresholds per screen.

pub mod classifier;
pub mod reference;
pub mod scheduler;
pub mod types;

pub use classifier::classify;
pub use reference::VitalReference;
pub use scheduler::compute_schedule;
pub use types::{
    ChannelStatus, DoseSchedule, DoseSlot, EngineError, NextDose, VitalsClassification,
    VitalsInput,
};

use chrono::NaiveTime;

use crate::models::{Medication, MedicationLog};

/// Engine facade holding the shared reference table.
#[derive(Debug, Clone, Default)]
pub struct HealthEngine {
    reference: VitalReference,
}

impl HealthEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference(reference: VitalReference) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &VitalReference {
        &self.reference
    }

    /// Classify one vitals reading (see [`classifier::classify`]).
    pub fn classify(&self, input: &VitalsInput) -> Result<VitalsClassification, EngineError> {
        classifier::classify(input, &self.reference)
    }

    /// Compute one medication's day schedule (see [`scheduler::compute_schedule`]).
    pub fn compute_schedule(
        &self,
        medication: &Medication,
        todays_logs: &[MedicationLog],
        now: NaiveTime,
    ) -> DoseSchedule {
        scheduler::compute_schedule(medication, todays_logs, now)
    }
}
