use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{validate_prescription, CreatePrescriptionRequest};
use crate::services::prescription::PrescriptionService;

/// Only doctors author prescriptions.
#[axum::debug_handler]
pub async fn create_prescription(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreatePrescriptionRequest>,
) -> Result<Json<Value>, AppError> {
    if !user.is_doctor() {
        return Err(AppError::Auth(
            "Only doctors can create prescriptions".to_string(),
        ));
    }

    validate_prescription(&request).map_err(|e| AppError::Validation(e.to_string()))?;

    let service = PrescriptionService::new(&config);
    let prescription = service
        .create_prescription(&user.id, request, auth.token())
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "prescription": prescription,
        "message": "Prescription created"
    })))
}

#[axum::debug_handler]
pub async fn get_patient_prescriptions(
    State(config): State<Arc<AppConfig>>,
    Path(patient_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    if !user.can_access(&patient_id) {
        return Err(AppError::Auth(
            "Not authorized to view this patient's prescriptions".to_string(),
        ));
    }

    let service = PrescriptionService::new(&config);
    let prescriptions = service
        .list_patient_prescriptions(&patient_id, auth.token())
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "prescriptions": prescriptions,
        "count": prescriptions.len()
    })))
}
