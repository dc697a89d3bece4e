use anyhow::Result;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{CreatePrescriptionRequest, Prescription};

/// Prescription persistence pass-through over the backend's
/// `prescriptions` table.
pub struct PrescriptionService {
    supabase: SupabaseClient,
}

impl PrescriptionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn create_prescription(
        &self,
        doctor_id: &str,
        request: CreatePrescriptionRequest,
        auth_token: &str,
    ) -> Result<Prescription> {
        info!(
            "Creating prescription by doctor {} for patient {}",
            doctor_id, request.patient_id
        );

        let row = json!({
            "doctor_id": doctor_id,
            "patient_id": request.patient_id,
            "appointment_id": request.appointment_id,
            "diagnosis": request.diagnosis,
            "medications": request.medications,
            "notes": request.notes,
        });

        let created = self
            .supabase
            .insert_returning("prescriptions", row, auth_token)
            .await?;

        let prescription: Prescription = serde_json::from_value(created)?;
        debug!("Prescription created with ID: {}", prescription.id);
        Ok(prescription)
    }

    /// Patient's prescriptions, newest first.
    pub async fn list_patient_prescriptions(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Prescription>> {
        debug!("Fetching prescriptions for patient: {}", patient_id);

        let path = format!(
            "/rest/v1/prescriptions?patient_id=eq.{}&order=created_at.desc",
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
}
