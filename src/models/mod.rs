pub mod medication;
pub mod medication_log;
pub mod profile;
pub mod vital_reading;

pub use medication::Medication;
pub use medication_log::MedicationLog;
pub use profile::PatientProfile;
pub use vital_reading::{VitalChannel, VitalReading};
