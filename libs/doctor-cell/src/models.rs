use serde::{Deserialize, Serialize};
use std::fmt;

/// How a consultation with the doctor takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationType {
    Clinic,
    Video,
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsultationType::Clinic => write!(f, "clinic"),
            ConsultationType::Video => write!(f, "video"),
        }
    }
}

/// A doctor in the directory. Constructed from the seeded catalog and
/// immutable for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub rating: f32,
    pub years_experience: i32,
    pub clinic: String,
    pub address: String,
    pub consultation_fee: f64,
    pub available_slots: Vec<String>,
    pub consultation_type: ConsultationType,
}

impl Doctor {
    /// Whether `slot` is one of this doctor's fixed bookable slot strings.
    pub fn offers_slot(&self, slot: &str) -> bool {
        self.available_slots.iter().any(|s| s == slot)
    }
}

#[derive(Debug, Deserialize)]
pub struct DoctorListQuery {
    pub specialty: Option<String>,
    pub sort: Option<DoctorSort>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctorSort {
    Rating,
}

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,
}
