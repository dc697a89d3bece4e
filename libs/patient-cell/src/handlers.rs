use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::Utc;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{UpdatePreferencesRequest, UpdateProfileRequest};
use crate::services::profile::PatientProfileService;

/// Profile read, including the derived BMI figures.
#[axum::debug_handler]
pub async fn get_patient(
    State(config): State<Arc<AppConfig>>,
    Path(patient_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    if !user.can_access(&patient_id) {
        return Err(AppError::Auth(
            "Not authorized to view this profile".to_string(),
        ));
    }

    let service = PatientProfileService::new(&config);
    let profile = service
        .get_profile(&patient_id, auth.token())
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "profile": profile,
        "bmi": profile.bmi(),
        "bmi_category": profile.bmi_category(),
        "age": profile.age_on(Utc::now().date_naive())
    })))
}

/// Patients edit their own profile.
#[axum::debug_handler]
pub async fn update_patient(
    State(config): State<Arc<AppConfig>>,
    Path(patient_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    if user.id != patient_id && !user.is_admin() {
        return Err(AppError::Auth(
            "Not authorized to edit this profile".to_string(),
        ));
    }

    let service = PatientProfileService::new(&config);
    let profile = service
        .update_profile(&patient_id, request, auth.token())
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "profile": profile
    })))
}

#[axum::debug_handler]
pub async fn update_preferences(
    State(config): State<Arc<AppConfig>>,
    Path(patient_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdatePreferencesRequest>,
) -> Result<Json<Value>, AppError> {
    if user.id != patient_id {
        return Err(AppError::Auth(
            "Preferences can only be changed by their owner".to_string(),
        ));
    }

    let service = PatientProfileService::new(&config);
    let profile = service
        .update_preferences(&patient_id, request, auth.token())
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "language": profile.language,
        "theme": profile.theme
    })))
}
