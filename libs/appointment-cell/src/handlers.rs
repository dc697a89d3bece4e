use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::Utc;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};
use uuid::Uuid;

use doctor_cell::services::directory::DoctorDirectory;
use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    BookingError, SelectDateRequest, SelectDoctorRequest, SelectTimeRequest, SetReasonRequest,
    UpdateStatusRequest,
};
use crate::services::booking::AppointmentBookingService;
use crate::services::draft::DraftService;

#[derive(Clone)]
pub struct AppointmentState {
    pub config: Arc<AppConfig>,
    pub directory: Arc<DoctorDirectory>,
    pub drafts: DraftService,
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::Incomplete => AppError::BadRequest(e.to_string()),
            _ => AppError::Validation(e.to_string()),
        }
    }
}

fn draft_response(draft: &crate::models::BookingDraft) -> Json<Value> {
    Json(json!({
        "success": true,
        "draft": draft,
        "is_complete": draft.is_complete()
    }))
}

// ==============================================================================
// BOOKING DRAFT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_draft(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let draft = state.drafts.draft_for(&user.id).await;
    Ok(draft_response(&draft))
}

#[axum::debug_handler]
pub async fn select_doctor(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Json(request): Json<SelectDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor = state
        .directory
        .find(request.doctor_id)
        .map_err(|_| AppError::NotFound("Doctor not found".to_string()))?
        .clone();

    let draft = state.drafts.select_doctor(&user.id, doctor).await;
    Ok(draft_response(&draft))
}

#[axum::debug_handler]
pub async fn select_date(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Json(request): Json<SelectDateRequest>,
) -> Result<Json<Value>, AppError> {
    let today = Utc::now().date_naive();
    let draft = state
        .drafts
        .select_date(&user.id, request.date, today)
        .await?;
    Ok(draft_response(&draft))
}

#[axum::debug_handler]
pub async fn select_time(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Json(request): Json<SelectTimeRequest>,
) -> Result<Json<Value>, AppError> {
    let draft = state.drafts.select_time(&user.id, &request.time).await?;
    Ok(draft_response(&draft))
}

#[axum::debug_handler]
pub async fn set_reason(
    State(state): State<AppointmentState>,
    Extension(user): Extension<User>,
    Json(request): Json<SetReasonRequest>,
) -> Result<Json<Value>, AppError> {
    let draft = state.drafts.set_reason(&user.id, request.reason).await;
    Ok(draft_response(&draft))
}

/// Confirm the draft: ineffective until doctor, date and time are all set.
/// On success the appointment row is recorded through the backend and the
/// draft is discarded, so an immediate duplicate confirm starts over.
#[axum::debug_handler]
pub async fn confirm_booking(
    State(state): State<AppointmentState>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let confirmed = state.drafts.confirm(&user.id).await?;

    let booking_service = AppointmentBookingService::new(&state.config);
    let appointment = booking_service
        .create_appointment(&user.id, &confirmed, auth.token())
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    state.drafts.discard(&user.id).await;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": confirmed.message
    })))
}

// ==============================================================================
// APPOINTMENT LISTING HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_patient_appointments(
    State(state): State<AppointmentState>,
    Path(patient_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    if !user.can_access(&patient_id) {
        return Err(AppError::Auth(
            "Not authorized to view this patient's appointments".to_string(),
        ));
    }

    let booking_service = AppointmentBookingService::new(&state.config);
    let appointments = booking_service
        .list_patient_appointments(&patient_id, auth.token())
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments,
        "count": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor_appointments(
    State(state): State<AppointmentState>,
    Path(doctor_id): Path<u32>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    if !user.is_doctor() && !user.is_admin() {
        return Err(AppError::Auth(
            "Only doctors can view a doctor's schedule".to_string(),
        ));
    }

    let booking_service = AppointmentBookingService::new(&state.config);
    let appointments = booking_service
        .list_doctor_appointments(doctor_id, auth.token())
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments,
        "count": appointments.len()
    })))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state.config);
    let appointment = booking_service
        .update_status(appointment_id, request.status, auth.token())
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state.config);
    booking_service
        .delete_appointment(appointment_id, auth.token())
        .await
        .map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment deleted"
    })))
}
