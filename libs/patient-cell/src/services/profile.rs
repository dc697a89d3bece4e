use anyhow::{anyhow, Result};
use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{PatientProfile, UpdatePreferencesRequest, UpdateProfileRequest};

/// Profile persistence pass-through over the backend's `profiles` table.
pub struct PatientProfileService {
    supabase: SupabaseClient,
}

impl PatientProfileService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn get_profile(&self, patient_id: &str, auth_token: &str) -> Result<PatientProfile> {
        debug!("Fetching profile: {}", patient_id);

        let path = format!("/rest/v1/profiles?id=eq.{}", patient_id);
        let rows: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Profile not found"))?;
        Ok(serde_json::from_value(row)?)
    }

    pub async fn update_profile(
        &self,
        patient_id: &str,
        request: UpdateProfileRequest,
        auth_token: &str,
    ) -> Result<PatientProfile> {
        debug!("Updating profile: {}", patient_id);

        let mut update_data = serde_json::Map::new();

        if let Some(full_name) = request.full_name {
            update_data.insert("full_name".to_string(), json!(full_name));
        }
        if let Some(phone) = request.phone {
            update_data.insert("phone".to_string(), json!(phone));
        }
        if let Some(birth_date) = request.birth_date {
            update_data.insert(
                "birth_date".to_string(),
                json!(birth_date.format("%Y-%m-%d").to_string()),
            );
        }
        if let Some(blood_type) = request.blood_type {
            update_data.insert("blood_type".to_string(), json!(blood_type));
        }
        if let Some(height_cm) = request.height_cm {
            update_data.insert("height_cm".to_string(), json!(height_cm));
        }
        if let Some(weight_kg) = request.weight_kg {
            update_data.insert("weight_kg".to_string(), json!(weight_kg));
        }
        if let Some(chronic_conditions) = request.chronic_conditions {
            update_data.insert("chronic_conditions".to_string(), json!(chronic_conditions));
        }
        if let Some(allergies) = request.allergies {
            update_data.insert("allergies".to_string(), json!(allergies));
        }

        update_data.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        self.patch_profile(patient_id, Value::Object(update_data), auth_token)
            .await
    }

    /// Persist the two preference flags. They are written on every toggle
    /// and read back once at startup by the client.
    pub async fn update_preferences(
        &self,
        patient_id: &str,
        request: UpdatePreferencesRequest,
        auth_token: &str,
    ) -> Result<PatientProfile> {
        debug!("Updating preferences for: {}", patient_id);

        let mut update_data = serde_json::Map::new();
        if let Some(language) = request.language {
            update_data.insert("language".to_string(), json!(language));
        }
        if let Some(theme) = request.theme {
            update_data.insert("theme".to_string(), json!(theme));
        }
        update_data.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        self.patch_profile(patient_id, Value::Object(update_data), auth_token)
            .await
    }

    async fn patch_profile(
        &self,
        patient_id: &str,
        update: Value,
        auth_token: &str,
    ) -> Result<PatientProfile> {
        let path = format!("/rest/v1/profiles?id=eq.{}", patient_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let rows: Vec<Value> = self
            .supabase
            .request_with_headers(Method::PATCH, &path, Some(auth_token), Some(update), Some(headers))
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Profile not found"))?;
        Ok(serde_json::from_value(row)?)
    }
}
