use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub name: String,
    pub dosage: String,
    /// Free-text label ("Twice daily"); not used for computation.
    pub frequency: String,
    /// Time-of-day dose slots, stored deduplicated and sorted.
    pub schedule_times: Vec<NaiveTime>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    /// Lifecycle flag. Deactivated medications are retired, never deleted.
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Medication {
    /// Whether the medication is in effect on the given day: the lifecycle
    /// flag is set and the day falls inside the start/end window.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.is_active
            && day >= self.start_date
            && self.end_date.map_or(true, |end| day <= end)
    }
}
