use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Patient registration record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    pub id: Uuid,
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
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
