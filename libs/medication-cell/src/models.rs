use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A medication reminder schedule. `times` is the ordered list of daily
/// dose times as "HH:MM" strings; `taken_today` records which of them have
/// been taken on `taken_on`. The set resets when the date moves on.
#[derive(Debug, Clone, Serialize)]
pub struct MedicationSchedule {
    pub id: Uuid,
    pub medication_name: String,
    pub dosage: String,
    pub times: Vec<String>,
    pub is_active: bool,
    pub next_dose: DateTime<Utc>,
    pub taken_today: Vec<String>,
    pub taken_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    Medication,
    Appointment,
}

/// A notification raised for the user: created by the reminder worker or
/// seeded at first access, mutated (read) or removed by user action. No
/// server sync.
#[derive(Debug, Clone, Serialize)]
pub struct Reminder {
    pub id: Uuid,
    pub kind: ReminderKind,
    pub title: String,
    pub message: String,
    pub time: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Medication name and dosage are required")]
    MissingNameOrDosage,

    #[error("Invalid dose time: {0}")]
    InvalidTime(String),

    #[error("Times per day must be between 1 and 4")]
    InvalidFrequency,

    #[error("A schedule needs at least one dose time")]
    NoTimes,

    #[error("Schedule not found")]
    NotFound,

    #[error("{0} is not one of this schedule's dose times")]
    UnknownDoseTime(String),

    #[error("Reminder not found")]
    ReminderNotFound,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Add a medication: either explicit dose times, or a times-per-day count
/// that expands to the default spread.
#[derive(Debug, Deserialize)]
pub struct AddMedicationRequest {
    pub name: String,
    pub dosage: String,
    pub times: Option<Vec<String>>,
    pub times_per_day: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct MarkTakenRequest {
    pub time: String,
}
