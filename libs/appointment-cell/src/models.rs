use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use doctor_cell::models::{ConsultationType, Doctor};

// ==============================================================================
// APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: String,
    pub doctor_id: u32,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub appointment_type: AppointmentType,
    pub reason: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    Clinic,
    Video,
    #[serde(alias = "follow_up")]
    Followup,
}

impl From<ConsultationType> for AppointmentType {
    fn from(consultation_type: ConsultationType) -> Self {
        match consultation_type {
            ConsultationType::Clinic => AppointmentType::Clinic,
            ConsultationType::Video => AppointmentType::Video,
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentType::Clinic => write!(f, "clinic"),
            AppointmentType::Video => write!(f, "video"),
            AppointmentType::Followup => write!(f, "followup"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==============================================================================
// BOOKING DRAFT STATE MACHINE
// ==============================================================================

/// Transient, unsaved selection state for an in-progress booking. The draft
/// moves through doctor -> date -> time; confirmation requires all three.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingDraft {
    pub doctor: Option<Doctor>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub reason: String,
}

impl BookingDraft {
    /// Singleton doctor selection. Any selection (including re-selecting the
    /// current doctor) drops a previously chosen time slot, since the new
    /// doctor may not offer it; the date carries over.
    pub fn select_doctor(&mut self, doctor: Doctor) {
        self.time = None;
        self.doctor = Some(doctor);
    }

    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), BookingError> {
        if date < today {
            return Err(BookingError::DateInPast);
        }
        self.date = Some(date);
        Ok(())
    }

    /// Pick one of the selected doctor's fixed slot strings.
    pub fn select_time(&mut self, slot: &str) -> Result<(), BookingError> {
        let doctor = self.doctor.as_ref().ok_or(BookingError::NoDoctorSelected)?;
        if !doctor.offers_slot(slot) {
            return Err(BookingError::SlotNotOffered(slot.to_string()));
        }
        self.time = Some(slot.to_string());
        Ok(())
    }

    pub fn set_reason(&mut self, reason: String) {
        self.reason = reason;
    }

    /// A booking is complete only when doctor, date and time are all set.
    pub fn is_complete(&self) -> bool {
        self.doctor.is_some() && self.date.is_some() && self.time.is_some()
    }

    /// Produce the confirmation summary. The draft itself is discarded by the
    /// caller once the confirmation has been acted on.
    pub fn confirm(&self) -> Result<ConfirmedBooking, BookingError> {
        let (doctor, date, time) = match (&self.doctor, self.date, &self.time) {
            (Some(doctor), Some(date), Some(time)) => (doctor, date, time),
            _ => return Err(BookingError::Incomplete),
        };

        let message = format!(
            "Appointment booked with {} at {} on {}",
            doctor.name,
            time,
            format_booking_date(date)
        );

        Ok(ConfirmedBooking {
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
            appointment_date: date,
            appointment_time: time.clone(),
            appointment_type: doctor.consultation_type.into(),
            consultation_fee: doctor.consultation_fee,
            reason: if self.reason.trim().is_empty() {
                None
            } else {
                Some(self.reason.clone())
            },
            message,
        })
    }
}

/// M/D/YYYY, the date format shown in the confirmation message.
fn format_booking_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Outcome of a confirmed booking draft, carrying everything the
/// appointment record and the user-facing message need.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmedBooking {
    pub doctor_id: u32,
    pub doctor_name: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub appointment_type: AppointmentType,
    pub consultation_fee: f64,
    pub reason: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Booking date cannot be in the past")]
    DateInPast,

    #[error("Select a doctor before choosing a time slot")]
    NoDoctorSelected,

    #[error("Doctor does not offer the {0} time slot")]
    SlotNotOffered(String),

    #[error("Doctor, date and time must all be selected")]
    Incomplete,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct SelectDoctorRequest {
    pub doctor_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct SelectDateRequest {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct SelectTimeRequest {
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct SetReasonRequest {
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}
