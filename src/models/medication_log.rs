use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One confirmed dose. Append-only; per medication and calendar day at most
/// one log exists per distinct scheduled slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationLog {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub medication_id: Uuid,
    /// The schedule slot this confirmation belongs to.
    pub scheduled_time: NaiveTime,
    pub taken_at: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}
