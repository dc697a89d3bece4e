use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{DoctorError, DoctorListQuery, DoctorSort};
use crate::services::directory::DoctorDirectory;

#[derive(Clone)]
pub struct DoctorState {
    pub directory: Arc<DoctorDirectory>,
}

impl From<DoctorError> for AppError {
    fn from(e: DoctorError) -> Self {
        match e {
            DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        }
    }
}

/// List the doctor directory, optionally narrowed to one specialty
/// (exact match) and ordered by rating.
#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<DoctorState>,
    Query(query): Query<DoctorListQuery>,
) -> Result<Json<Value>, AppError> {
    let doctors = match (&query.specialty, query.sort) {
        (Some(specialty), _) => state.directory.filter_by_specialty(specialty),
        (None, Some(DoctorSort::Rating)) => state.directory.sorted_by_rating(),
        (None, None) => state.directory.all().to_vec(),
    };

    Ok(Json(json!({
        "success": true,
        "doctors": doctors,
        "count": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<DoctorState>,
    Path(doctor_id): Path<u32>,
) -> Result<Json<Value>, AppError> {
    let doctor = state.directory.find(doctor_id)?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_slots(
    State(state): State<DoctorState>,
    Path(doctor_id): Path<u32>,
) -> Result<Json<Value>, AppError> {
    let doctor = state.directory.find(doctor_id)?;

    Ok(Json(json!({
        "success": true,
        "doctor_id": doctor.id,
        "available_slots": doctor.available_slots
    })))
}

#[axum::debug_handler]
pub async fn list_specialties(
    State(state): State<DoctorState>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({
        "success": true,
        "specialties": state.directory.specialties()
    })))
}
