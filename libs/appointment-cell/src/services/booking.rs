use anyhow::{anyhow, Result};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, AppointmentStatus, ConfirmedBooking};

/// Appointment persistence pass-through. All durability and consistency
/// guarantees belong to the external backend; this service only shapes rows
/// and surfaces errors.
pub struct AppointmentBookingService {
    supabase: SupabaseClient,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Record a confirmed booking as a pending appointment row.
    pub async fn create_appointment(
        &self,
        patient_id: &str,
        confirmed: &ConfirmedBooking,
        auth_token: &str,
    ) -> Result<Appointment> {
        info!(
            "Creating appointment for patient {} with doctor {}",
            patient_id, confirmed.doctor_id
        );

        let row = json!({
            "patient_id": patient_id,
            "doctor_id": confirmed.doctor_id,
            "appointment_date": confirmed.appointment_date.format("%Y-%m-%d").to_string(),
            "appointment_time": confirmed.appointment_time,
            "appointment_type": confirmed.appointment_type,
            "reason": confirmed.reason,
            "status": AppointmentStatus::Pending,
        });

        let created = self
            .supabase
            .insert_returning("appointments", row, auth_token)
            .await?;

        let appointment: Appointment = serde_json::from_value(created)?;
        debug!("Appointment created with ID: {}", appointment.id);
        Ok(appointment)
    }

    /// Patient's appointments, soonest first.
    pub async fn list_patient_appointments(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>> {
        debug!("Fetching appointments for patient: {}", patient_id);

        let path = format!(
            "/rest/v1/appointments?patient_id=eq.{}&order=appointment_date.asc",
            patient_id
        );
        let rows: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(Into::into))
            .collect()
    }

    /// Doctor's appointments, soonest first.
    pub async fn list_doctor_appointments(
        &self,
        doctor_id: u32,
        auth_token: &str,
    ) -> Result<Vec<Appointment>> {
        debug!("Fetching appointments for doctor: {}", doctor_id);

        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&order=appointment_date.asc",
            doctor_id
        );
        let rows: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(Into::into))
            .collect()
    }

    pub async fn update_status(
        &self,
        appointment_id: Uuid,
        status: AppointmentStatus,
        auth_token: &str,
    ) -> Result<Appointment> {
        debug!("Updating appointment {} to {}", appointment_id, status);

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let rows: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(auth_token),
                Some(json!({ "status": status })),
                Some(headers),
            )
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Appointment not found"))?;
        Ok(serde_json::from_value(row)?)
    }

    pub async fn delete_appointment(&self, appointment_id: Uuid, auth_token: &str) -> Result<()> {
        debug!("Deleting appointment: {}", appointment_id);

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        self.supabase
            .execute(Method::DELETE, &path, Some(auth_token), None)
            .await
    }
}
